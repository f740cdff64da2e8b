//! dictkv: batch key lookups against key-value dictionaries
//!
//! This crate is the entrypoint for the dictkv workspace. It re-exports the reader, the
//! dictionary catalog and the function registry from the underlying `dictkv-*` crates.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use arrow::array::{RecordBatch, StringArray, UInt64Array};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use dictkv::{DictionaryCatalog, DictionaryReader, HashedDictionary};
//!
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("id", DataType::UInt64, false),
//!     Field::new("name", DataType::Utf8, false),
//! ]));
//! let rows = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(UInt64Array::from(vec![10, 12])),
//!         Arc::new(StringArray::from(vec!["Alice", "Bob"])),
//!     ],
//! )
//! .unwrap();
//!
//! let catalog = Arc::new(DictionaryCatalog::new());
//! catalog
//!     .register(Arc::new(HashedDictionary::try_new("users", &rows, "id").unwrap()))
//!     .unwrap();
//! let registry = dictkv::registry_for_catalog(Arc::clone(&catalog)).unwrap();
//!
//! let reader = DictionaryReader::try_new(
//!     &registry,
//!     "users",
//!     &["name"],
//!     &[Field::new("name", DataType::Utf8, false)],
//! )
//! .unwrap();
//! let result = reader.read_keys(&UInt64Array::from(vec![10, 11, 12])).unwrap();
//! assert_eq!(result.batch.num_rows(), 2);
//! assert_eq!(result.output_row(2), Some(1));
//! ```
//!
//! # Architecture
//!
//! - **Reader** (`dictkv-reader`): binds `dictHas`/`dictGet`, compacts rows, builds results.
//! - **Dictionaries** (`dictkv-dictionary`): the `Dictionary` trait, the hashed in-memory
//!   implementation, the catalog and the functions reading it.
//! - **Functions** (`dictkv-function`): resolvers, callables and the registry.
//! - **Blocks** (`dictkv-block`): named, typed column slots over Arrow arrays.

use std::sync::Arc;

pub use dictkv_dictionary::{
    DICT_GET, DICT_HAS, Dictionary, DictionaryAttribute, DictionaryCatalog, DictionaryStructure,
    HashedDictionary, register_dictionary_functions,
};
pub use dictkv_function::{Callable, FunctionRegistry, FunctionResolver};
pub use dictkv_reader::{
    DictionaryReader, LookupPlan, LookupResult, NOT_FOUND_POSITION, ReaderOptions,
};
pub use dictkv_result::{Error, Result};

pub mod block {
    //! Column blocks shared by functions and the reader.

    pub use dictkv_block::{Block, BlockColumn, ColumnarValue, resize_array};
}

/// A function registry holding `dictHas` and `dictGet` over `catalog`.
pub fn registry_for_catalog(catalog: Arc<DictionaryCatalog>) -> Result<FunctionRegistry> {
    let mut registry = FunctionRegistry::new();
    register_dictionary_functions(&mut registry, catalog)?;
    Ok(registry)
}
