use std::fmt;
use std::sync::Arc;

use arrow::datatypes::DataType;
use dictkv_block::{Block, BlockColumn};
use dictkv_result::Result;

/// A function resolved against concrete argument types, ready to run against blocks.
///
/// A callable is produced once by [`FunctionResolver::build`] and then invoked many times.
/// Each invocation reads its arguments from `block` at `arguments` and stores a value of
/// [`Callable::return_type`] with `rows` rows at `result`. Implementations must not keep
/// per-call state, so a single callable can serve concurrent invocations on distinct blocks.
pub trait Callable: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn return_type(&self) -> &DataType;

    fn invoke(&self, block: &mut Block, arguments: &[usize], result: usize, rows: usize)
    -> Result<()>;
}

/// Builds [`Callable`]s for one function name.
///
/// `arguments` describe the slots the callable will be invoked with: their types, and for
/// constant arguments their values. Resolvers validate argument count and types here so
/// that invocation only has to deal with data.
pub trait FunctionResolver: Send + Sync {
    fn name(&self) -> &str;

    fn build(&self, arguments: &[BlockColumn]) -> Result<Arc<dyn Callable>>;
}
