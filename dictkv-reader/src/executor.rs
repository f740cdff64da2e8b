use dictkv_block::Block;
use dictkv_result::Result;

use crate::plan::LookupPlan;

impl LookupPlan {
    /// Run the bound `dictHas` against `working`, filling its has slot.
    pub fn execute_has(&self, working: &mut Block, rows: usize) -> Result<()> {
        self.has_function.execute(working, rows)
    }

    /// Run every bound `dictGet`, in result column order, filling their result slots.
    ///
    /// Errors from the dictionary are returned as-is; nothing is retried.
    pub fn execute_get(&self, working: &mut Block, rows: usize) -> Result<()> {
        for function in &self.get_functions {
            function.execute(working, rows)?;
        }
        Ok(())
    }
}
