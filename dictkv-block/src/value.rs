use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, StringArray, UInt32Array};
use arrow::compute::take;
use arrow::datatypes::DataType;
use dictkv_result::{Error, Result};

/// Contents of a [`crate::BlockColumn`] slot.
///
/// `Scalar` holds a single-row array whose value applies to every row of the call, which is
/// how constant function arguments (a dictionary name, an attribute name) are passed. `Array`
/// holds one value per row.
#[derive(Clone, Debug)]
pub enum ColumnarValue {
    Array(ArrayRef),
    Scalar(ArrayRef),
}

impl ColumnarValue {
    /// Build a constant UTF-8 value.
    pub fn utf8_scalar(value: &str) -> Self {
        ColumnarValue::Scalar(Arc::new(StringArray::from(vec![value])) as ArrayRef)
    }

    pub fn data_type(&self) -> &DataType {
        match self {
            ColumnarValue::Array(array) | ColumnarValue::Scalar(array) => array.data_type(),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, ColumnarValue::Scalar(_))
    }

    /// Number of rows held by an `Array` value; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            ColumnarValue::Array(array) => Some(array.len()),
            ColumnarValue::Scalar(_) => None,
        }
    }

    /// Return the constant string of a non-null UTF-8 scalar.
    pub fn as_utf8_scalar(&self) -> Option<&str> {
        match self {
            ColumnarValue::Scalar(array) if array.data_type() == &DataType::Utf8 => {
                let strings = array.as_string::<i32>();
                (strings.len() == 1 && strings.is_valid(0)).then(|| strings.value(0))
            }
            _ => None,
        }
    }

    /// Materialize the value as an array of `rows` rows, broadcasting scalars.
    pub fn into_array(self, rows: usize) -> Result<ArrayRef> {
        match self {
            ColumnarValue::Array(array) => {
                if array.len() != rows {
                    return Err(Error::InvalidArgumentError(format!(
                        "column has {} rows, expected {rows}",
                        array.len()
                    )));
                }
                Ok(array)
            }
            ColumnarValue::Scalar(array) => {
                if array.len() != 1 {
                    return Err(Error::Internal(format!(
                        "scalar column holds {} rows",
                        array.len()
                    )));
                }
                let indices = UInt32Array::from(vec![0u32; rows]);
                Ok(take(array.as_ref(), &indices, None)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::UInt64Array;

    #[test]
    fn scalar_broadcasts_to_requested_rows() {
        let value = ColumnarValue::utf8_scalar("users");
        assert_eq!(value.as_utf8_scalar(), Some("users"));

        let array = value.into_array(3).unwrap();
        let strings = array.as_string::<i32>();
        assert_eq!(strings.len(), 3);
        assert!(strings.iter().all(|s| s == Some("users")));
    }

    #[test]
    fn array_length_must_match_rows() {
        let value = ColumnarValue::Array(Arc::new(UInt64Array::from(vec![1, 2])) as ArrayRef);
        assert_eq!(value.len(), Some(2));
        assert!(value.as_utf8_scalar().is_none());
        assert!(matches!(
            value.into_array(3),
            Err(Error::InvalidArgumentError(_))
        ));
    }
}
