//! Planning: bind `dictHas` / `dictGet` once against a sample block.
//!
//! The sample block is laid out as
//!
//! ```text
//! [0]            dictionary name          (constant)
//! [1 ..= n]      source attribute names   (constants, one per result column)
//! [n + 1]        key                      (placeholder, UInt64)
//! [n + 2]        has result               (placeholder, Boolean)
//! [n + 3 + i]    get result for column i  (placeholder, declared type)
//! ```
//!
//! Every lookup call clones this block, fills the key slot and runs the bound functions
//! against the clone.

use std::fmt;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use dictkv_block::{Block, BlockColumn};
use dictkv_function::{Callable, FunctionRegistry};
use dictkv_result::{Error, Result};

use crate::options::ReaderOptions;

pub const DICT_HAS_FUNCTION: &str = "dictHas";
pub const DICT_GET_FUNCTION: &str = "dictGet";

const DICTIONARY_COLUMN: &str = "dict";
const KEY_COLUMN: &str = "key";
const HAS_COLUMN: &str = "has";

/// A callable bound to argument and result positions of the sample block.
#[derive(Clone)]
pub struct BoundFunction {
    callable: Arc<dyn Callable>,
    arguments: Vec<usize>,
    result: usize,
}

impl fmt::Debug for BoundFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundFunction")
            .field("function", &self.callable.name())
            .field("return_type", self.callable.return_type())
            .field("arguments", &self.arguments)
            .field("result", &self.result)
            .finish()
    }
}

impl BoundFunction {
    /// Resolve `function` against the slots at `arguments` and append its result slot.
    ///
    /// `column` names the result for error messages and the result slot.
    fn bind(
        registry: &FunctionRegistry,
        function: &str,
        block: &mut Block,
        arguments: Vec<usize>,
        column: &str,
        result_name: String,
        expected: &DataType,
    ) -> Result<Self> {
        let callable = registry.resolve(function, &block.columns_at(&arguments)?)?;
        if callable.return_type() != expected {
            return Err(Error::type_mismatch(
                column,
                expected.clone(),
                callable.return_type().clone(),
            ));
        }

        let result = block.insert(BlockColumn::new(result_name, expected.clone()));
        tracing::debug!(
            function,
            column,
            ?arguments,
            result,
            "bound dictionary function"
        );

        Ok(Self {
            callable,
            arguments,
            result,
        })
    }

    pub fn name(&self) -> &str {
        self.callable.name()
    }

    pub fn arguments(&self) -> &[usize] {
        &self.arguments
    }

    pub fn result_position(&self) -> usize {
        self.result
    }

    /// Run the callable against `block` for `rows` rows.
    pub fn execute(&self, block: &mut Block, rows: usize) -> Result<()> {
        self.callable
            .invoke(block, &self.arguments, self.result, rows)
    }
}

/// Immutable result of planning a dictionary reader.
///
/// Holds the bound functions and the sample block they are bound to. A plan never changes
/// after construction, so it can be shared across threads; per-call state lives in the
/// working block each call clones from [`LookupPlan::working_block`].
#[derive(Debug)]
pub struct LookupPlan {
    dictionary: String,
    source_columns: Vec<String>,
    result_schema: SchemaRef,
    key_arity: usize,
    sample_block: Block,
    key_position: usize,
    pub(crate) has_function: BoundFunction,
    pub(crate) get_functions: Vec<BoundFunction>,
}

impl LookupPlan {
    /// Bind `dictHas(dictionary, key)` and one `dictGet(dictionary, source_columns[i], key)`
    /// per entry of `result_columns`.
    ///
    /// Each `dictGet` must return exactly the type declared by the matching result field;
    /// nullability of the field is ignored for the comparison.
    pub fn try_new<S: AsRef<str>>(
        registry: &FunctionRegistry,
        dictionary: &str,
        source_columns: &[S],
        result_columns: &[Field],
        options: &ReaderOptions,
    ) -> Result<Self> {
        if source_columns.len() != result_columns.len() {
            return Err(Error::ColumnCountMismatch {
                source_columns: source_columns.len(),
                result_columns: result_columns.len(),
            });
        }
        // TODO: composite keys would need one key slot per key column and a tuple encoding
        // agreed with the dictionary; until then only a single UInt64 key is bound.
        if options.key_arity != 1 {
            return Err(Error::Unsupported(format!(
                "dictionary keys with {} columns; only single-column keys are supported",
                options.key_arity
            )));
        }

        let source_columns: Vec<String> = source_columns
            .iter()
            .map(|name| name.as_ref().to_string())
            .collect();

        let mut sample_block = Block::new();
        let dictionary_position =
            sample_block.insert(BlockColumn::utf8_constant(DICTIONARY_COLUMN, dictionary));
        let attribute_positions: Vec<usize> = source_columns
            .iter()
            .map(|name| sample_block.insert(BlockColumn::utf8_constant(format!("col_{name}"), name)))
            .collect();
        let key_position = sample_block.insert(BlockColumn::new(KEY_COLUMN, DataType::UInt64));

        let has_function = BoundFunction::bind(
            registry,
            DICT_HAS_FUNCTION,
            &mut sample_block,
            vec![dictionary_position, key_position],
            HAS_COLUMN,
            HAS_COLUMN.to_string(),
            &DataType::Boolean,
        )?;

        let get_functions = result_columns
            .iter()
            .zip(&attribute_positions)
            .map(|(field, &attribute_position)| {
                BoundFunction::bind(
                    registry,
                    DICT_GET_FUNCTION,
                    &mut sample_block,
                    vec![dictionary_position, attribute_position, key_position],
                    field.name(),
                    format!("get_{}", field.name()),
                    field.data_type(),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            dictionary,
            columns = get_functions.len(),
            block_columns = sample_block.num_columns(),
            "planned dictionary reader"
        );

        Ok(Self {
            dictionary: dictionary.to_string(),
            source_columns,
            result_schema: Arc::new(Schema::new(result_columns.to_vec())),
            key_arity: options.key_arity,
            sample_block,
            key_position,
            has_function,
            get_functions,
        })
    }

    pub fn dictionary(&self) -> &str {
        &self.dictionary
    }

    pub fn source_columns(&self) -> &[String] {
        &self.source_columns
    }

    /// Schema of the output batch: the requested result fields, in order.
    pub fn result_schema(&self) -> &SchemaRef {
        &self.result_schema
    }

    pub fn key_arity(&self) -> usize {
        self.key_arity
    }

    pub fn key_position(&self) -> usize {
        self.key_position
    }

    pub fn has_function(&self) -> &BoundFunction {
        &self.has_function
    }

    pub fn get_functions(&self) -> &[BoundFunction] {
        &self.get_functions
    }

    pub fn sample_block(&self) -> &Block {
        &self.sample_block
    }

    /// A fresh copy of the sample block, owned by one lookup call.
    pub fn working_block(&self) -> Block {
        self.sample_block.clone()
    }
}
