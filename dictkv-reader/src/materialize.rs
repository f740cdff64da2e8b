use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use dictkv_block::Block;
use dictkv_result::Result;

use crate::plan::BoundFunction;

/// Move the get results out of `working` into a batch with `schema`.
///
/// Columns are taken, not copied: each result slot of `working` is empty afterwards. The
/// row count is set explicitly so that a result with no columns still reports `rows`.
pub(crate) fn materialize_output(
    schema: &SchemaRef,
    working: &mut Block,
    functions: &[BoundFunction],
    rows: usize,
) -> Result<RecordBatch> {
    let columns = functions
        .iter()
        .map(|function| {
            working
                .take_column(function.result_position())?
                .into_array(rows)
        })
        .collect::<Result<Vec<ArrayRef>>>()?;

    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    Ok(RecordBatch::try_new_with_options(
        Arc::clone(schema),
        columns,
        &options,
    )?)
}
