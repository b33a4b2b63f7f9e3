use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// A thread-safe handle to a target that operations mutate, wrapping it in an
/// `Arc<Mutex<T>>`.
///
/// Cloning the handle shares the same target. [`SharedHistory`](crate::shared_history::SharedHistory)
/// locks it for the duration of each `apply` or `revert`.
///
/// # Examples
///
/// ```
/// use revert_history::shared_target::SharedTarget;
///
/// let target = SharedTarget::new(String::from("A"));
/// target.lock().push('B');
/// assert_eq!(target.into_inner().ok().as_deref(), Some("AB"));
/// ```
pub struct SharedTarget<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> SharedTarget<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }

    /// Consumes the handle and returns the target, or gives the handle back when
    /// other clones are still alive.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged if the target is still shared.
    pub fn into_inner(self) -> Result<T, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<T> Clone for SharedTarget<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedTarget<T>
where
    T: Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> std::fmt::Debug for SharedTarget<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_lock() {
            Some(value) => write!(f, "SharedTarget({:?})", *value),
            None => write!(f, "SharedTarget(<locked>)"),
        }
    }
}
