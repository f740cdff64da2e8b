/// Options controlling how a [`crate::DictionaryReader`] is planned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Number of key columns. Only single-column `UInt64` keys are implemented; any other
    /// value is rejected at construction.
    pub key_arity: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { key_arity: 1 }
    }
}

impl ReaderOptions {
    pub fn with_key_arity(mut self, key_arity: usize) -> Self {
        self.key_arity = key_arity;
        self
    }
}
