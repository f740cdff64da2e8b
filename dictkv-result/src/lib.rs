//! Error types and result definitions for the dictkv workspace.
//!
//! Every dictkv crate returns [`Result<T>`] with the single [`Error`] enum, so failures
//! raised deep inside a dictionary function propagate through the reader with `?` and reach
//! the caller unchanged.
//!
//! # Error Categories
//!
//! - **Planning errors** ([`Error::ColumnCountMismatch`], [`Error::TypeMismatch`],
//!   [`Error::Unsupported`]): raised once, while a reader binds its functions.
//! - **Lookup failures** ([`Error::DictionaryNotFound`], [`Error::AttributeNotFound`],
//!   [`Error::FunctionNotFound`]): a name could not be resolved.
//! - **User input errors** ([`Error::InvalidArgumentError`]): argument-shape violations.
//! - **Data format errors** ([`Error::Arrow`]): Arrow kernel failures.
//! - **Internal errors** ([`Error::Internal`]): bugs or unexpected states.

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
