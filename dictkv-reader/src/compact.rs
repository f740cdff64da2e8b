//! Row compaction between the has and get phases.

use arrow::array::{Array, AsArray, BooleanArray};
use dictkv_block::{Block, ColumnarValue, resize_array};
use dictkv_result::{Error, Result};

/// Position map entry for rows whose key was not found.
///
/// Only meaningful together with the found mask: callers check the mask first and never use
/// this value as an index.
pub const NOT_FOUND_POSITION: usize = usize::MAX;

/// Store a copy of `keys`, resized to `rows`, in the key slot of `working`.
///
/// The caller's array is never modified.
pub(crate) fn install_keys(
    working: &mut Block,
    key_position: usize,
    keys: &dyn Array,
    rows: usize,
) -> Result<()> {
    let keys = resize_array(keys, rows)?;
    working.set_column(key_position, ColumnarValue::Array(keys))
}

/// Move the has result out of `working` as a null-free found mask of `rows` rows.
///
/// The slot is left empty so the get phase cannot observe it. Null results count as not
/// found.
pub(crate) fn take_found_mask(
    working: &mut Block,
    has_position: usize,
    rows: usize,
) -> Result<BooleanArray> {
    let has = working.take_column(has_position)?.into_array(rows)?;
    let mask = has.as_boolean_opt().ok_or_else(|| {
        Error::Internal(format!(
            "dictHas produced {} instead of Boolean",
            has.data_type()
        ))
    })?;
    if mask.null_count() == 0 {
        return Ok(mask.clone());
    }
    Ok(mask.iter().map(|found| found == Some(true)).collect::<Vec<bool>>().into())
}

/// Map each input row to its row in the compacted output.
///
/// Found rows receive `0, 1, 2, ...` in input order; other rows receive
/// [`NOT_FOUND_POSITION`]. Returns the map together with the number of found rows.
pub fn build_position_map(found: &BooleanArray) -> (Vec<usize>, usize) {
    let mut positions = vec![NOT_FOUND_POSITION; found.len()];
    let mut next = 0;
    for (row, is_found) in found.values().iter().enumerate() {
        if is_found {
            positions[row] = next;
            next += 1;
        }
    }
    (positions, next)
}

/// Drop the rows of the key slot whose key was not found. Returns the remaining row count.
pub(crate) fn filter_keys(
    working: &mut Block,
    key_position: usize,
    found: &BooleanArray,
) -> Result<usize> {
    working.filter_column(key_position, found)
}
