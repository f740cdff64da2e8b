//! Key-value dictionaries and the functions that read them.
//!
//! A [`Dictionary`] maps `u64` keys to rows of typed attributes. [`HashedDictionary`] is
//! the in-memory implementation, built from an Arrow `RecordBatch`. Dictionaries are
//! published by name through a [`DictionaryCatalog`], and [`register_dictionary_functions`]
//! exposes the catalog as the `dictHas` and `dictGet` functions.
#![forbid(unsafe_code)]

mod catalog;
mod dictionary;
pub mod functions;
mod hashed;

pub use catalog::DictionaryCatalog;
pub use dictionary::{Dictionary, DictionaryAttribute, DictionaryStructure};
pub use functions::{DICT_GET, DICT_HAS, register_dictionary_functions};
pub use hashed::HashedDictionary;
