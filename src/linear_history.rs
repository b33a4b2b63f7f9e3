use std::num::NonZeroUsize;

use tracing::{debug, trace, warn};

use crate::{
    config::HistoryConfig,
    error::Result,
    traits::{history::History, reversible_operation::ReversibleOperation},
};

/// Linear undo/redo history over a single log of operations.
///
/// Entries before the cursor have been applied; entries after it can be redone.
/// Executing a new operation while redo entries exist discards them.
///
/// # Examples
///
/// ```
/// use revert_history::prelude::*;
/// use revert_history::field;
///
/// struct Label {
///     value: String,
/// }
///
/// let mut label = Label { value: "A".to_owned() };
/// let mut history = LinearHistory::new();
///
/// history.execute(SetField::new(field!(Label, value), "B".to_owned()), &mut label)?;
/// assert_eq!(label.value, "B");
///
/// history.undo(&mut label)?;
/// assert_eq!(label.value, "A");
///
/// history.redo(&mut label)?;
/// assert_eq!(label.value, "B");
/// # Ok::<(), OperationError>(())
/// ```
pub struct LinearHistory<O: ReversibleOperation> {
    log: Vec<O>,
    // Number of applied entries, i.e. the cursor plus one.
    applied: usize,
    limit: Option<NonZeroUsize>,
}

impl<O: ReversibleOperation> LinearHistory<O> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            log: Vec::new(),
            applied: 0,
            limit: config.limit,
        }
    }

    /// Index of the most recently applied entry, `None` when nothing is applied.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.applied < self.log.len()
    }

    /// All logged operations in execution order.
    #[must_use]
    pub fn entries(&self) -> &[O] {
        &self.log
    }

    /// Applied operations, most recent first.
    #[must_use]
    pub fn undo_history(&self) -> Option<Vec<&O>> {
        if self.can_undo() {
            Some(self.log[..self.applied].iter().rev().collect())
        } else {
            None
        }
    }

    /// Redoable operations, next to be redone first.
    #[must_use]
    pub fn redo_history(&self) -> Option<Vec<&O>> {
        if self.can_redo() {
            Some(self.log[self.applied..].iter().collect())
        } else {
            None
        }
    }

    #[must_use]
    pub fn history_limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }

    /// Caps the log at `limit` entries, dropping the oldest applied entries first
    /// and then the furthest redo entries.
    pub fn set_history_limit(&mut self, limit: NonZeroUsize) {
        self.limit = Some(limit);
        self.enforce_limit();
    }

    /// Forgets every entry without touching any target.
    pub fn clear(&mut self) {
        self.log.clear();
        self.applied = 0;
    }

    fn discard_redo_branch(&mut self) {
        if self.can_redo() {
            trace!(
                discarded = self.log.len() - self.applied,
                "discarding redo branch"
            );
            self.log.truncate(self.applied);
        }
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit.map(NonZeroUsize::get) else {
            return;
        };
        if self.log.len() <= limit {
            return;
        }

        let excess = self.log.len() - limit;
        let oldest = excess.min(self.applied);
        self.log.drain(..oldest);
        self.applied -= oldest;
        self.log.truncate(limit);
        trace!(dropped = excess, limit, "history limit reached");
    }
}

impl<O: ReversibleOperation> Default for LinearHistory<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ReversibleOperation> History<O> for LinearHistory<O> {
    fn execute(&mut self, mut operation: O, target: &mut O::Target) -> Result<()> {
        self.discard_redo_branch();

        if let Err(err) = operation.apply(target) {
            warn!(operation = %operation.description(), error = %err, "execute failed");
            return Err(err);
        }

        debug!(operation = %operation.description(), cursor = self.applied, "executed");
        self.log.push(operation);
        self.applied = self.log.len();
        self.enforce_limit();
        Ok(())
    }

    fn undo(&mut self, target: &mut O::Target) -> Result<bool> {
        let Some(cursor) = self.cursor() else {
            trace!("nothing to undo");
            return Ok(false);
        };

        let operation = &mut self.log[cursor];
        if let Err(err) = operation.revert(target) {
            warn!(operation = %operation.description(), error = %err, "undo failed");
            return Err(err);
        }

        debug!(operation = %operation.description(), cursor, "undone");
        self.applied = cursor;
        Ok(true)
    }

    fn redo(&mut self, target: &mut O::Target) -> Result<bool> {
        if !self.can_redo() {
            trace!("nothing to redo");
            return Ok(false);
        }

        let cursor = self.applied;
        let operation = &mut self.log[cursor];
        if let Err(err) = operation.reapply(target) {
            warn!(operation = %operation.description(), error = %err, "redo failed");
            return Err(err);
        }

        debug!(operation = %operation.description(), cursor, "redone");
        self.applied = cursor + 1;
        Ok(true)
    }
}
