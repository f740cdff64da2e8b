//! Argument validation helpers shared by function resolvers.

use arrow::datatypes::DataType;
use dictkv_block::{Block, BlockColumn};
use dictkv_result::{Error, Result};

pub fn check_argument_count(function: &str, arguments: &[BlockColumn], expected: usize) -> Result<()> {
    if arguments.len() != expected {
        return Err(Error::InvalidArgumentError(format!(
            "function {function} expects {expected} arguments, got {}",
            arguments.len()
        )));
    }
    Ok(())
}

pub fn check_argument_type(
    function: &str,
    arguments: &[BlockColumn],
    index: usize,
    expected: &DataType,
) -> Result<()> {
    let argument = argument(function, arguments, index)?;
    if &argument.data_type != expected {
        return Err(Error::InvalidArgumentError(format!(
            "argument {} ('{}') of function {function} must be {expected}, got {}",
            index + 1,
            argument.name,
            argument.data_type
        )));
    }
    Ok(())
}

/// Value of a constant UTF-8 argument known at build time.
pub fn constant_utf8_argument<'a>(
    function: &str,
    arguments: &'a [BlockColumn],
    index: usize,
) -> Result<&'a str> {
    let argument = argument(function, arguments, index)?;
    argument.utf8_constant_value().ok_or_else(|| {
        Error::InvalidArgumentError(format!(
            "argument {} ('{}') of function {function} must be a constant string",
            index + 1,
            argument.name
        ))
    })
}

/// Value of a constant UTF-8 argument read from a block at invocation time.
pub fn constant_utf8_at<'a>(function: &str, block: &'a Block, position: usize) -> Result<&'a str> {
    let column = block.column(position)?;
    column.utf8_constant_value().ok_or_else(|| {
        Error::InvalidArgumentError(format!(
            "argument '{}' of function {function} must be a constant string",
            column.name
        ))
    })
}

fn argument<'a>(function: &str, arguments: &'a [BlockColumn], index: usize) -> Result<&'a BlockColumn> {
    arguments.get(index).ok_or_else(|| {
        Error::InvalidArgumentError(format!(
            "function {function} is missing argument {}",
            index + 1
        ))
    })
}
