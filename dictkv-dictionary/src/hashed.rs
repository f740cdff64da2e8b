use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, RecordBatch, UInt64Array, new_null_array,
};
use arrow::compute::{concat, take};
use arrow::datatypes::{DataType, UInt64Type};
use dictkv_result::{Error, Result};
use rustc_hash::FxHashMap;

use crate::dictionary::{Dictionary, DictionaryAttribute, DictionaryStructure};

/// Dictionary backed by a hash index over an Arrow batch.
///
/// Every attribute array carries one extra trailing row holding the attribute's default,
/// so a lookup is a single `take` where absent keys point at that row.
#[derive(Debug)]
pub struct HashedDictionary {
    name: String,
    structure: DictionaryStructure,
    index: FxHashMap<u64, u64>,
    attributes: Vec<ArrayRef>,
    rows: usize,
}

impl HashedDictionary {
    /// Build a dictionary from `batch`, keyed by the `UInt64` column `key_column`.
    ///
    /// All other columns become attributes, defaulting to null. Null keys are rejected;
    /// when a key repeats, the last row wins.
    pub fn try_new(name: impl Into<String>, batch: &RecordBatch, key_column: &str) -> Result<Self> {
        let name = name.into();
        let schema = batch.schema();
        let key_idx = schema.index_of(key_column).map_err(|_| {
            Error::InvalidArgumentError(format!(
                "dictionary '{name}' source has no key column '{key_column}'"
            ))
        })?;

        let keys = batch
            .column(key_idx)
            .as_primitive_opt::<UInt64Type>()
            .ok_or_else(|| {
                Error::InvalidArgumentError(format!(
                    "dictionary '{name}' key column '{key_column}' must be UInt64, got {}",
                    schema.field(key_idx).data_type()
                ))
            })?;
        if keys.null_count() > 0 {
            return Err(Error::InvalidArgumentError(format!(
                "dictionary '{name}' key column '{key_column}' contains nulls"
            )));
        }

        let rows = batch.num_rows();
        let mut index = FxHashMap::default();
        index.reserve(rows);
        for (row, key) in keys.values().iter().enumerate() {
            index.insert(*key, row as u64);
        }

        let mut attributes = Vec::with_capacity(batch.num_columns().saturating_sub(1));
        let mut structure_attributes = Vec::with_capacity(attributes.capacity());
        for (idx, field) in schema.fields().iter().enumerate() {
            if idx == key_idx {
                continue;
            }
            let values = batch.column(idx);
            let default = new_null_array(field.data_type(), 1);
            attributes.push(concat(&[values.as_ref(), default.as_ref()])?);
            structure_attributes.push(DictionaryAttribute::new(
                field.name().clone(),
                field.data_type().clone(),
            ));
        }

        tracing::debug!(
            dictionary = %name,
            rows,
            keys = index.len(),
            attributes = attributes.len(),
            "built hashed dictionary"
        );

        Ok(Self {
            name,
            structure: DictionaryStructure {
                key: key_column.to_string(),
                attributes: structure_attributes,
            },
            index,
            attributes,
            rows,
        })
    }

    /// Replace the default returned for absent keys of `attribute`.
    ///
    /// `default` must be a single-row array of the attribute's type.
    pub fn with_default(mut self, attribute: &str, default: ArrayRef) -> Result<Self> {
        let idx = self.attribute_index(attribute)?;
        let expected = &self.structure.attributes[idx].data_type;
        if default.len() != 1 || default.data_type() != expected {
            return Err(Error::InvalidArgumentError(format!(
                "default for attribute '{attribute}' of dictionary '{}' must be one {expected} value",
                self.name
            )));
        }
        let values = self.attributes[idx].slice(0, self.rows);
        self.attributes[idx] = concat(&[values.as_ref(), default.as_ref()])?;
        Ok(self)
    }

    pub fn attribute_type(&self, attribute: &str) -> Result<&DataType> {
        let idx = self.attribute_index(attribute)?;
        Ok(&self.structure.attributes[idx].data_type)
    }

    fn attribute_index(&self, attribute: &str) -> Result<usize> {
        self.structure
            .attribute_index(attribute)
            .ok_or_else(|| Error::AttributeNotFound {
                dictionary: self.name.clone(),
                attribute: attribute.to_string(),
            })
    }

    /// Row of each key in the attribute arrays; absent and null keys map to the default row.
    fn gather_indices(&self, keys: &UInt64Array) -> UInt64Array {
        let default_row = self.rows as u64;
        keys.iter()
            .map(|key| {
                key.and_then(|k| self.index.get(&k).copied())
                    .unwrap_or(default_row)
            })
            .collect::<Vec<u64>>()
            .into()
    }
}

impl Dictionary for HashedDictionary {
    fn name(&self) -> &str {
        &self.name
    }

    fn structure(&self) -> &DictionaryStructure {
        &self.structure
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn has_keys(&self, keys: &UInt64Array) -> Result<BooleanArray> {
        let found: Vec<bool> = keys
            .iter()
            .map(|key| key.is_some_and(|k| self.index.contains_key(&k)))
            .collect();
        Ok(BooleanArray::from(found))
    }

    fn get_column(&self, attribute: &str, keys: &UInt64Array) -> Result<ArrayRef> {
        let idx = self.attribute_index(attribute)?;
        let indices = self.gather_indices(keys);
        Ok(take(self.attributes[idx].as_ref(), &indices, None)?)
    }
}
