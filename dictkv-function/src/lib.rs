//! Function resolution for dictkv.
//!
//! A [`FunctionResolver`] turns a function name plus a description of its arguments into a
//! type-checked [`Callable`]. Callables are bound to block positions by their caller and
//! invoked once per batch; resolution cost is paid once.
#![forbid(unsafe_code)]

pub mod args;
mod callable;
mod registry;

pub use callable::{Callable, FunctionResolver};
pub use registry::FunctionRegistry;
