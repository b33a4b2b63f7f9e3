use std::borrow::Cow;

use crate::error::Result;

/// A unit of work that can be applied to a target and later reverted.
///
/// The operation keeps whatever state it needs to undo its own effect, which is
/// why both methods take `&mut self`.
///
/// # Associated Types
///
/// * `Target`: The type of the object the operation mutates.
///
/// # Required Methods
///
/// * `apply(&mut self, target: &mut Self::Target)`: Performs the mutation.
/// * `revert(&mut self, target: &mut Self::Target)`: Restores what `apply` overwrote.
///
/// # Provided Methods
///
/// * `reapply(&mut self, target: &mut Self::Target)`: Called on redo. Defaults to `apply`.
/// * `description(&self) -> Cow<str>`: Defaults to "Unknown operation".
///
/// # Example
///
/// ```
/// use revert_history::prelude::*;
///
/// struct Double {
///     before: Option<i32>,
/// }
///
/// impl ReversibleOperation for Double {
///     type Target = i32;
///
///     fn apply(&mut self, target: &mut i32) -> Result<(), OperationError> {
///         self.before = Some(*target);
///         *target *= 2;
///         Ok(())
///     }
///
///     fn revert(&mut self, target: &mut i32) -> Result<(), OperationError> {
///         *target = self.before.ok_or_else(|| OperationError::NotApplied {
///             description: self.description().into_owned(),
///         })?;
///         Ok(())
///     }
/// }
///
/// let mut value = 21;
/// let mut op = Double { before: None };
/// op.apply(&mut value).unwrap();
/// assert_eq!(value, 42);
/// op.revert(&mut value).unwrap();
/// assert_eq!(value, 21);
/// ```
pub trait ReversibleOperation {
    type Target: ?Sized;

    /// Applies the operation to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error when the target cannot be read or written.
    fn apply(&mut self, target: &mut Self::Target) -> Result<()>;

    /// Reverts a previous `apply`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NotApplied`](crate::error::OperationError::NotApplied)
    /// when called before `apply`, or a target error when the write fails.
    fn revert(&mut self, target: &mut Self::Target) -> Result<()>;

    /// Re-applies the operation after it was reverted.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    fn reapply(&mut self, target: &mut Self::Target) -> Result<()> {
        self.apply(target)
    }

    fn description(&self) -> Cow<'_, str> {
        Cow::Borrowed("Unknown operation")
    }
}

impl<O> ReversibleOperation for Box<O>
where
    O: ReversibleOperation + ?Sized,
{
    type Target = O::Target;

    fn apply(&mut self, target: &mut Self::Target) -> Result<()> {
        (**self).apply(target)
    }

    fn revert(&mut self, target: &mut Self::Target) -> Result<()> {
        (**self).revert(target)
    }

    fn reapply(&mut self, target: &mut Self::Target) -> Result<()> {
        (**self).reapply(target)
    }

    fn description(&self) -> Cow<'_, str> {
        (**self).description()
    }
}
