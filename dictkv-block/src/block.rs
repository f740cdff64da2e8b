use arrow::array::{Array, ArrayRef, BooleanArray, new_null_array};
use arrow::compute::{concat, filter};
use arrow::datatypes::{DataType, Field};
use dictkv_result::{Error, Result};

use crate::value::ColumnarValue;

/// A named, typed column slot inside a [`Block`].
///
/// The slot's `data_type` is fixed when the slot is created. `value` may be empty, which is
/// how placeholders for per-call inputs and function results are represented.
#[derive(Clone, Debug)]
pub struct BlockColumn {
    pub name: String,
    pub data_type: DataType,
    pub value: Option<ColumnarValue>,
}

impl BlockColumn {
    /// Create an empty slot.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            value: None,
        }
    }

    /// Create a slot holding a constant UTF-8 value.
    pub fn utf8_constant(name: impl Into<String>, value: &str) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::Utf8,
            value: Some(ColumnarValue::utf8_scalar(value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// The constant string held by this slot, if it is a UTF-8 scalar.
    pub fn utf8_constant_value(&self) -> Option<&str> {
        self.value.as_ref().and_then(ColumnarValue::as_utf8_scalar)
    }

    /// Arrow field describing this slot.
    pub fn field(&self) -> Field {
        Field::new(self.name.clone(), self.data_type.clone(), true)
    }
}

/// An ordered set of column slots addressed by position.
///
/// Functions read their arguments from and write their result into a `Block` by position,
/// so a block laid out once can be cloned and reused for many calls. Cloning is shallow:
/// column buffers are reference counted and never mutated in place, so a clone can be
/// modified without affecting the block it came from.
#[derive(Clone, Debug, Default)]
pub struct Block {
    columns: Vec<BlockColumn>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[BlockColumn] {
        &self.columns
    }

    /// Append a slot and return its position.
    pub fn insert(&mut self, column: BlockColumn) -> usize {
        self.columns.push(column);
        self.columns.len() - 1
    }

    /// Position of the first slot named `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, position: usize) -> Result<&BlockColumn> {
        self.columns.get(position).ok_or_else(|| {
            Error::Internal(format!(
                "block position {position} out of range ({} columns)",
                self.columns.len()
            ))
        })
    }

    /// Copies of the slots at `positions`, in that order.
    pub fn columns_at(&self, positions: &[usize]) -> Result<Vec<BlockColumn>> {
        positions
            .iter()
            .map(|&pos| self.column(pos).cloned())
            .collect()
    }

    /// The value at `position`; fails if the slot is empty.
    pub fn value(&self, position: usize) -> Result<&ColumnarValue> {
        let column = self.column(position)?;
        column.value.as_ref().ok_or_else(|| {
            Error::Internal(format!(
                "block column '{}' at position {position} is empty",
                column.name
            ))
        })
    }

    /// The per-row array at `position`; fails for empty or scalar slots.
    pub fn array(&self, position: usize) -> Result<&ArrayRef> {
        match self.value(position)? {
            ColumnarValue::Array(array) => Ok(array),
            ColumnarValue::Scalar(_) => Err(Error::InvalidArgumentError(format!(
                "block column at position {position} is a constant, expected a column"
            ))),
        }
    }

    /// Store `value` at `position`, replacing whatever the slot held.
    ///
    /// The value's type must equal the slot's declared type.
    pub fn set_column(&mut self, position: usize, value: ColumnarValue) -> Result<()> {
        let len = self.columns.len();
        let column = self.columns.get_mut(position).ok_or_else(|| {
            Error::Internal(format!(
                "block position {position} out of range ({len} columns)"
            ))
        })?;
        if value.data_type() != &column.data_type {
            return Err(Error::InvalidArgumentError(format!(
                "cannot store {} into block column '{}' of type {}",
                value.data_type(),
                column.name,
                column.data_type
            )));
        }
        column.value = Some(value);
        Ok(())
    }

    /// Move the value out of `position`, leaving the slot empty.
    pub fn take_column(&mut self, position: usize) -> Result<ColumnarValue> {
        let len = self.columns.len();
        let column = self.columns.get_mut(position).ok_or_else(|| {
            Error::Internal(format!(
                "block position {position} out of range ({len} columns)"
            ))
        })?;
        column.value.take().ok_or_else(|| {
            Error::Internal(format!(
                "block column '{}' at position {position} is empty",
                column.name
            ))
        })
    }

    /// Keep only the rows of the array at `position` where `mask` is true, preserving order.
    ///
    /// Null mask entries count as false. Returns the new row count.
    pub fn filter_column(&mut self, position: usize, mask: &BooleanArray) -> Result<usize> {
        let array = self.array(position)?;
        if array.len() != mask.len() {
            return Err(Error::InvalidArgumentError(format!(
                "filter mask has {} rows, column has {}",
                mask.len(),
                array.len()
            )));
        }
        let filtered = filter(array.as_ref(), mask)?;
        let rows = filtered.len();
        self.set_column(position, ColumnarValue::Array(filtered))?;
        Ok(rows)
    }
}

/// Copy `array` resized to exactly `rows` rows.
///
/// Shorter arrays are padded with nulls; longer ones are truncated.
pub fn resize_array(array: &dyn Array, rows: usize) -> Result<ArrayRef> {
    let len = array.len();
    if rows <= len {
        return Ok(array.slice(0, rows));
    }
    let padding = new_null_array(array.data_type(), rows - len);
    Ok(concat(&[array, padding.as_ref()])?)
}
