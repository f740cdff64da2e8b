//! Two-phase batch reader over a key-value dictionary.
//!
//! Given a batch of `UInt64` keys, a [`DictionaryReader`] asks the dictionary which keys
//! exist (`dictHas`), compacts the batch down to those keys, fetches the requested
//! attributes for them only (`dictGet`), and returns:
//!
//! - a dense output batch with one row per found key, in input order,
//! - the found mask, one entry per input key,
//! - the position map from input rows to output rows.
//!
//! ```text
//! keys:      [10, 11, 12, 13, 14]
//! found:     [ T,  F,  T,  F,  F]
//! positions: [ 0,  -,  1,  -,  -]      (- = NOT_FOUND_POSITION)
//! batch:     [("Alice", 30), ("Bob", 40)]
//! ```
//!
//! Functions are resolved and type-checked once, when the reader is built. Lookups reuse
//! the bindings and only allocate the per-call working block and outputs.
#![forbid(unsafe_code)]

mod compact;
mod executor;
mod materialize;
mod options;
mod plan;
mod reader;

pub use compact::{NOT_FOUND_POSITION, build_position_map};
pub use options::ReaderOptions;
pub use plan::{BoundFunction, DICT_GET_FUNCTION, DICT_HAS_FUNCTION, LookupPlan};
pub use reader::{DictionaryReader, LookupResult};
