use std::sync::{Arc, RwLock};

use dictkv_result::{Error, Result};
use rustc_hash::FxHashMap;

use crate::dictionary::Dictionary;

/// Registry of named dictionaries shared by the dictionary functions.
///
/// Lookups hand out `Arc` snapshots, so replacing or removing an entry never affects a
/// lookup that already holds the previous dictionary.
#[derive(Debug, Default)]
pub struct DictionaryCatalog {
    dictionaries: RwLock<FxHashMap<String, Arc<dyn Dictionary>>>,
}

impl DictionaryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dictionary` under its own name. Fails if the name is taken.
    pub fn register(&self, dictionary: Arc<dyn Dictionary>) -> Result<()> {
        let name = dictionary.name().to_string();
        let mut dictionaries = self.write()?;
        if dictionaries.contains_key(&name) {
            return Err(Error::InvalidArgumentError(format!(
                "dictionary '{name}' is already registered"
            )));
        }
        tracing::debug!(dictionary = %name, keys = dictionary.len(), "registered dictionary");
        dictionaries.insert(name, dictionary);
        Ok(())
    }

    /// Add or swap in `dictionary`, returning the entry it replaced.
    pub fn replace(&self, dictionary: Arc<dyn Dictionary>) -> Result<Option<Arc<dyn Dictionary>>> {
        let name = dictionary.name().to_string();
        tracing::debug!(dictionary = %name, keys = dictionary.len(), "replacing dictionary");
        Ok(self.write()?.insert(name, dictionary))
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Dictionary>> {
        self.read()?
            .get(name)
            .cloned()
            .ok_or_else(|| Error::DictionaryNotFound(name.to_string()))
    }

    pub fn remove(&self, name: &str) -> Result<Option<Arc<dyn Dictionary>>> {
        Ok(self.write()?.remove(name))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.read()?.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, FxHashMap<String, Arc<dyn Dictionary>>>> {
        self.dictionaries
            .read()
            .map_err(|_| Error::Internal("dictionary catalog lock poisoned".into()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, FxHashMap<String, Arc<dyn Dictionary>>>> {
        self.dictionaries
            .write()
            .map_err(|_| Error::Internal("dictionary catalog lock poisoned".into()))
    }
}
