use std::fmt;

use arrow::array::{ArrayRef, BooleanArray, UInt64Array};
use arrow::datatypes::DataType;
use dictkv_result::Result;

/// A named value column stored by a dictionary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryAttribute {
    pub name: String,
    pub data_type: DataType,
}

impl DictionaryAttribute {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Key column name and attribute list of a dictionary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryStructure {
    pub key: String,
    pub attributes: Vec<DictionaryAttribute>,
}

impl DictionaryStructure {
    pub fn attribute(&self, name: &str) -> Option<&DictionaryAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }
}

/// Key-value store mapping `u64` keys to rows of attributes.
///
/// Both lookups are vectorized over a key array and return one output row per input key.
/// Null keys are never present.
pub trait Dictionary: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn structure(&self) -> &DictionaryStructure;

    /// Number of distinct keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` for every key present in the dictionary. The result has no nulls.
    fn has_keys(&self, keys: &UInt64Array) -> Result<BooleanArray>;

    /// Values of `attribute` for `keys`. Absent keys yield the attribute's default.
    fn get_column(&self, attribute: &str, keys: &UInt64Array) -> Result<ArrayRef>;
}
