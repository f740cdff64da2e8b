//! Column blocks for dictkv functions.
//!
//! A [`Block`] is an ordered list of named, typed slots. Each slot is either empty or holds
//! a [`ColumnarValue`]: a per-row Arrow array or a single-row constant. Functions are bound
//! to slot positions once and then invoked against fresh clones of the same block layout.
#![forbid(unsafe_code)]

mod block;
mod value;

pub use block::{Block, BlockColumn, resize_array};
pub use value::ColumnarValue;
