use crate::error::Result;

use super::reversible_operation::ReversibleOperation;

/// Entry points a trigger source uses to drive a history.
///
/// `undo` and `redo` return `Ok(false)` when there is nothing to move over.
pub trait History<O: ReversibleOperation> {
    /// Discards the redo branch, applies `operation` and records it.
    ///
    /// # Errors
    ///
    /// Propagates the operation's `apply` error; the operation is then not recorded.
    fn execute(&mut self, operation: O, target: &mut O::Target) -> Result<()>;

    /// Reverts the operation at the cursor and steps back.
    ///
    /// # Errors
    ///
    /// Propagates the operation's `revert` error; the cursor stays put.
    fn undo(&mut self, target: &mut O::Target) -> Result<bool>;

    /// Steps forward and re-applies the operation there.
    ///
    /// # Errors
    ///
    /// Propagates the operation's `reapply` error; the cursor stays put.
    fn redo(&mut self, target: &mut O::Target) -> Result<bool>;

    /// Executes `operations` in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// The first error raised by [`execute`](Self::execute).
    fn batch_execute(&mut self, operations: Vec<O>, target: &mut O::Target) -> Result<()> {
        for operation in operations {
            self.execute(operation, target)?;
        }
        Ok(())
    }
}
