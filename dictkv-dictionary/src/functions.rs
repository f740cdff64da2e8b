//! `dictHas` and `dictGet` exposed as resolvable functions.
//!
//! Both functions take the dictionary name as a constant first argument. The dictionary is
//! looked up once at build time, to validate arguments and compute the return type, and again
//! on every invocation so that a dictionary replaced in the catalog is picked up by already
//! bound callables.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, UInt64Type};
use dictkv_block::{Block, BlockColumn, ColumnarValue};
use dictkv_function::args::{
    check_argument_count, check_argument_type, constant_utf8_argument, constant_utf8_at,
};
use dictkv_function::{Callable, FunctionRegistry, FunctionResolver};
use dictkv_result::{Error, Result};

use crate::catalog::DictionaryCatalog;

pub const DICT_HAS: &str = "dictHas";
pub const DICT_GET: &str = "dictGet";

/// Register `dictHas` and `dictGet` backed by `catalog`.
pub fn register_dictionary_functions(
    registry: &mut FunctionRegistry,
    catalog: Arc<DictionaryCatalog>,
) -> Result<()> {
    registry.register(Arc::new(DictHasResolver::new(Arc::clone(&catalog))))?;
    registry.register(Arc::new(DictGetResolver::new(catalog)))?;
    Ok(())
}

/// `dictHas(dictionary, key) -> Boolean`
pub struct DictHasResolver {
    catalog: Arc<DictionaryCatalog>,
}

impl DictHasResolver {
    pub fn new(catalog: Arc<DictionaryCatalog>) -> Self {
        Self { catalog }
    }
}

impl FunctionResolver for DictHasResolver {
    fn name(&self) -> &str {
        DICT_HAS
    }

    fn build(&self, arguments: &[BlockColumn]) -> Result<Arc<dyn Callable>> {
        check_argument_count(DICT_HAS, arguments, 2)?;
        let dictionary = constant_utf8_argument(DICT_HAS, arguments, 0)?;
        self.catalog.get(dictionary)?;
        check_argument_type(DICT_HAS, arguments, 1, &DataType::UInt64)?;

        Ok(Arc::new(DictHas {
            catalog: Arc::clone(&self.catalog),
            return_type: DataType::Boolean,
        }))
    }
}

#[derive(Debug)]
struct DictHas {
    catalog: Arc<DictionaryCatalog>,
    return_type: DataType,
}

impl Callable for DictHas {
    fn name(&self) -> &str {
        DICT_HAS
    }

    fn return_type(&self) -> &DataType {
        &self.return_type
    }

    fn invoke(
        &self,
        block: &mut Block,
        arguments: &[usize],
        result: usize,
        rows: usize,
    ) -> Result<()> {
        let &[dictionary_pos, key_pos] = arguments else {
            return Err(arity_error(DICT_HAS, 2, arguments.len()));
        };
        let dictionary = self
            .catalog
            .get(constant_utf8_at(DICT_HAS, block, dictionary_pos)?)?;
        let keys = key_array(DICT_HAS, block, key_pos, rows)?;

        let found = dictionary.has_keys(keys.as_primitive::<UInt64Type>())?;
        block.set_column(result, ColumnarValue::Array(Arc::new(found) as ArrayRef))
    }
}

/// `dictGet(dictionary, attribute, key) -> attribute type`
pub struct DictGetResolver {
    catalog: Arc<DictionaryCatalog>,
}

impl DictGetResolver {
    pub fn new(catalog: Arc<DictionaryCatalog>) -> Self {
        Self { catalog }
    }
}

impl FunctionResolver for DictGetResolver {
    fn name(&self) -> &str {
        DICT_GET
    }

    fn build(&self, arguments: &[BlockColumn]) -> Result<Arc<dyn Callable>> {
        check_argument_count(DICT_GET, arguments, 3)?;
        let name = constant_utf8_argument(DICT_GET, arguments, 0)?;
        let attribute = constant_utf8_argument(DICT_GET, arguments, 1)?;
        check_argument_type(DICT_GET, arguments, 2, &DataType::UInt64)?;

        let dictionary = self.catalog.get(name)?;
        let return_type = dictionary
            .structure()
            .attribute(attribute)
            .map(|a| a.data_type.clone())
            .ok_or_else(|| Error::AttributeNotFound {
                dictionary: name.to_string(),
                attribute: attribute.to_string(),
            })?;

        Ok(Arc::new(DictGet {
            catalog: Arc::clone(&self.catalog),
            return_type,
        }))
    }
}

#[derive(Debug)]
struct DictGet {
    catalog: Arc<DictionaryCatalog>,
    return_type: DataType,
}

impl Callable for DictGet {
    fn name(&self) -> &str {
        DICT_GET
    }

    fn return_type(&self) -> &DataType {
        &self.return_type
    }

    fn invoke(
        &self,
        block: &mut Block,
        arguments: &[usize],
        result: usize,
        rows: usize,
    ) -> Result<()> {
        let &[dictionary_pos, attribute_pos, key_pos] = arguments else {
            return Err(arity_error(DICT_GET, 3, arguments.len()));
        };
        let dictionary = self
            .catalog
            .get(constant_utf8_at(DICT_GET, block, dictionary_pos)?)?;
        let attribute = constant_utf8_at(DICT_GET, block, attribute_pos)?.to_string();
        let keys = key_array(DICT_GET, block, key_pos, rows)?;

        let values = dictionary.get_column(&attribute, keys.as_primitive::<UInt64Type>())?;
        if values.data_type() != &self.return_type {
            return Err(Error::type_mismatch(
                attribute,
                self.return_type.clone(),
                values.data_type().clone(),
            ));
        }
        block.set_column(result, ColumnarValue::Array(values))
    }
}

/// Materialize the key argument as a `UInt64` array of `rows` rows.
fn key_array(function: &str, block: &Block, position: usize, rows: usize) -> Result<ArrayRef> {
    let keys = block.value(position)?.clone().into_array(rows)?;
    if keys.data_type() != &DataType::UInt64 {
        return Err(Error::InvalidArgumentError(format!(
            "key argument of function {function} must be UInt64, got {}",
            keys.data_type()
        )));
    }
    Ok(keys)
}

fn arity_error(function: &str, expected: usize, actual: usize) -> Error {
    Error::InvalidArgumentError(format!(
        "function {function} bound to {actual} block positions, expected {expected}"
    ))
}
