use std::num::NonZeroUsize;

/// Settings shared by [`LinearHistory`](crate::linear_history::LinearHistory) and
/// [`SharedHistory`](crate::shared_history::SharedHistory).
///
/// The default keeps every executed operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of logged operations. The oldest entries are dropped first.
    pub limit: Option<NonZeroUsize>,
}

impl HistoryConfig {
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(mut self, limit: NonZeroUsize) -> Self {
        self.limit = Some(limit);
        self
    }
}
