use std::sync::Arc;

use dictkv_block::BlockColumn;
use dictkv_result::{Error, Result};
use rustc_hash::FxHashMap;

use crate::callable::{Callable, FunctionResolver};

/// Name-indexed set of function resolvers.
///
/// The registry is populated up front and then only read, so it is shared by reference (or
/// behind an `Arc`) rather than locked.
#[derive(Default)]
pub struct FunctionRegistry {
    resolvers: FxHashMap<String, Arc<dyn FunctionResolver>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `resolver` under its own name. Names must be unique.
    pub fn register(&mut self, resolver: Arc<dyn FunctionResolver>) -> Result<()> {
        let name = resolver.name().to_string();
        if self.resolvers.contains_key(&name) {
            return Err(Error::InvalidArgumentError(format!(
                "function {name} is already registered"
            )));
        }
        tracing::debug!(function = %name, "registered function resolver");
        self.resolvers.insert(name, resolver);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn FunctionResolver>> {
        self.resolvers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::FunctionNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    /// Resolve `name` against `arguments` and return the bound callable.
    pub fn resolve(&self, name: &str, arguments: &[BlockColumn]) -> Result<Arc<dyn Callable>> {
        let callable = self.get(name)?.build(arguments)?;
        tracing::trace!(
            function = %name,
            return_type = %callable.return_type(),
            "resolved function"
        );
        Ok(callable)
    }
}
