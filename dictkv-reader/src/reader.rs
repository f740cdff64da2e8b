use std::sync::Arc;

use arrow::array::{Array, BooleanArray};
use arrow::datatypes::{Field, SchemaRef};
use arrow::record_batch::RecordBatch;
use dictkv_function::FunctionRegistry;
use dictkv_result::Result;

use crate::compact::{build_position_map, filter_keys, install_keys, take_found_mask};
use crate::materialize::materialize_output;
use crate::options::ReaderOptions;
use crate::plan::LookupPlan;

/// Output of one lookup call.
///
/// The three parts are correlated: `found` and `positions` have one entry per input key,
/// and `batch` has one row per found key.
#[derive(Clone, Debug, PartialEq)]
pub struct LookupResult {
    /// Requested attributes of the found keys, in input order.
    pub batch: RecordBatch,
    /// `true` where the input key exists in the dictionary. Contains no nulls.
    pub found: BooleanArray,
    /// Row of `batch` holding each input key's attributes, or
    /// [`NOT_FOUND_POSITION`](crate::NOT_FOUND_POSITION) where
    /// `found` is false.
    pub positions: Vec<usize>,
}

impl LookupResult {
    pub fn num_keys(&self) -> usize {
        self.found.len()
    }

    pub fn found_count(&self) -> usize {
        self.batch.num_rows()
    }

    /// Output row for input row `row`, if its key was found.
    pub fn output_row(&self, row: usize) -> Option<usize> {
        if row < self.found.len() && self.found.value(row) {
            Some(self.positions[row])
        } else {
            None
        }
    }

    pub fn into_parts(self) -> (RecordBatch, BooleanArray, Vec<usize>) {
        (self.batch, self.found, self.positions)
    }
}

/// Batch reader for one dictionary.
///
/// Construction binds `dictHas` and one `dictGet` per result column; every
/// [`DictionaryReader::read_keys`] call reuses those bindings:
///
/// 1. the keys are copied into a working clone of the plan's sample block,
/// 2. `dictHas` produces the found mask and the position map,
/// 3. the keys are filtered down to the found ones,
/// 4. `dictGet` runs on the found keys only,
/// 5. the results are moved into the output batch.
///
/// The reader is cheap to clone and safe to share across threads. Each call owns its
/// working block, so concurrent calls never observe each other's state.
#[derive(Clone, Debug)]
pub struct DictionaryReader {
    plan: Arc<LookupPlan>,
}

impl DictionaryReader {
    /// Plan a reader returning `result_columns`, where result column `i` is read from the
    /// dictionary attribute `source_columns[i]`.
    pub fn try_new<S: AsRef<str>>(
        registry: &FunctionRegistry,
        dictionary: &str,
        source_columns: &[S],
        result_columns: &[Field],
    ) -> Result<Self> {
        Self::try_new_with_options(
            registry,
            dictionary,
            source_columns,
            result_columns,
            &ReaderOptions::default(),
        )
    }

    pub fn try_new_with_options<S: AsRef<str>>(
        registry: &FunctionRegistry,
        dictionary: &str,
        source_columns: &[S],
        result_columns: &[Field],
        options: &ReaderOptions,
    ) -> Result<Self> {
        let plan = LookupPlan::try_new(
            registry,
            dictionary,
            source_columns,
            result_columns,
            options,
        )?;
        Ok(Self {
            plan: Arc::new(plan),
        })
    }

    pub fn plan(&self) -> &LookupPlan {
        &self.plan
    }

    pub fn result_schema(&self) -> &SchemaRef {
        self.plan.result_schema()
    }

    /// Look up every key of `keys`.
    pub fn read_keys(&self, keys: &dyn Array) -> Result<LookupResult> {
        self.read_keys_with_rows(keys, keys.len())
    }

    /// Look up the first `rows` keys of `keys`.
    ///
    /// When `rows` exceeds `keys.len()` the extra rows are null keys, which are never found.
    pub fn read_keys_with_rows(&self, keys: &dyn Array, rows: usize) -> Result<LookupResult> {
        let plan = self.plan.as_ref();
        let key_position = plan.key_position();
        let mut working = plan.working_block();

        install_keys(&mut working, key_position, keys, rows)?;

        plan.execute_has(&mut working, rows)?;
        let found = take_found_mask(
            &mut working,
            plan.has_function().result_position(),
            rows,
        )?;
        let (positions, found_count) = build_position_map(&found);

        let filtered_rows = filter_keys(&mut working, key_position, &found)?;
        debug_assert_eq!(filtered_rows, found_count);

        plan.execute_get(&mut working, filtered_rows)?;
        let batch = materialize_output(
            plan.result_schema(),
            &mut working,
            plan.get_functions(),
            filtered_rows,
        )?;

        tracing::trace!(
            dictionary = plan.dictionary(),
            rows,
            found = found_count,
            "read dictionary keys"
        );

        Ok(LookupResult {
            batch,
            found,
            positions,
        })
    }
}
