use std::{num::NonZeroUsize, sync::Arc};

use parking_lot::Mutex;

use crate::{
    config::HistoryConfig,
    error::Result,
    linear_history::LinearHistory,
    shared_target::SharedTarget,
    traits::{history::History, reversible_operation::ReversibleOperation},
};

/// A [`LinearHistory`] that can be driven from several threads.
///
/// Each call holds the history lock for its whole duration, then locks the
/// target, so truncate-then-append and the cursor moves never interleave.
pub struct SharedHistory<O: ReversibleOperation> {
    inner: Mutex<LinearHistory<O>>,
}

impl<O> SharedHistory<O>
where
    O: ReversibleOperation + Send,
    O::Target: Sized,
{
    #[must_use]
    pub fn new() -> Arc<Self> {
        Self::with_config(HistoryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(LinearHistory::with_config(config)),
        })
    }

    /// See [`History::execute`].
    ///
    /// # Errors
    ///
    /// Propagates the operation's `apply` error.
    pub fn execute(&self, operation: O, target: &SharedTarget<O::Target>) -> Result<()> {
        let mut history = self.inner.lock();
        let mut target = target.lock();
        history.execute(operation, &mut target)
    }

    /// See [`History::undo`].
    ///
    /// # Errors
    ///
    /// Propagates the operation's `revert` error.
    pub fn undo(&self, target: &SharedTarget<O::Target>) -> Result<bool> {
        let mut history = self.inner.lock();
        let mut target = target.lock();
        history.undo(&mut target)
    }

    /// See [`History::redo`].
    ///
    /// # Errors
    ///
    /// Propagates the operation's `reapply` error.
    pub fn redo(&self, target: &SharedTarget<O::Target>) -> Result<bool> {
        let mut history = self.inner.lock();
        let mut target = target.lock();
        history.redo(&mut target)
    }

    /// Executes all `operations` under a single lock.
    ///
    /// # Errors
    ///
    /// The first `apply` error; earlier operations stay recorded.
    pub fn batch_execute(
        &self,
        operations: Vec<O>,
        target: &SharedTarget<O::Target>,
    ) -> Result<()> {
        let mut history = self.inner.lock();
        let mut target = target.lock();
        history.batch_execute(operations, &mut target)
    }

    pub fn set_history_limit(&self, limit: NonZeroUsize) {
        self.inner.lock().set_history_limit(limit);
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.inner.lock().cursor()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Runs `f` against a consistent snapshot of the history.
    pub fn inspect<R>(&self, f: impl FnOnce(&LinearHistory<O>) -> R) -> R {
        f(&self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use std::{borrow::Cow, hint::black_box, panic::AssertUnwindSafe, thread, time};

    use rand::Rng;

    use super::*;
    use crate::set_field::SetField;

    struct Add(i32);

    impl ReversibleOperation for Add {
        type Target = i32;

        fn apply(&mut self, target: &mut i32) -> Result<()> {
            *target += self.0;
            Ok(())
        }

        fn revert(&mut self, target: &mut i32) -> Result<()> {
            *target -= self.0;
            Ok(())
        }

        fn description(&self) -> Cow<'_, str> {
            Cow::Owned(format!("Add({})", self.0))
        }
    }

    #[test]
    fn test_execute_undo_redo() {
        let history = SharedHistory::new();
        let target = SharedTarget::new(0);

        history.execute(Add(1), &target).unwrap();
        assert_eq!(*target.lock(), 1);

        assert!(history.undo(&target).unwrap());
        assert_eq!(*target.lock(), 0);
        assert_eq!(history.cursor(), None);

        assert!(history.redo(&target).unwrap());
        assert_eq!(*target.lock(), 1);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_branch_discard() {
        let history = SharedHistory::new();
        let target = SharedTarget::new(0);

        history.batch_execute(vec![Add(1), Add(2)], &target).unwrap();
        history.undo(&target).unwrap();
        history.execute(Add(3), &target).unwrap();

        assert!(!history.redo(&target).unwrap());
        assert_eq!(*target.lock(), 4);
        let descriptions: Vec<String> = history.inspect(|log| {
            log.entries()
                .iter()
                .map(|op| op.description().into_owned())
                .collect()
        });
        assert_eq!(descriptions, ["Add(1)", "Add(3)"]);
    }

    #[test]
    fn test_set_field_across_threads() {
        #[derive(Debug, Default)]
        struct Label {
            text: String,
        }

        let history: Arc<SharedHistory<SetField<Label, String>>> = SharedHistory::new();
        let target = SharedTarget::new(Label::default());

        let handle = {
            let history = Arc::clone(&history);
            let target = target.clone();
            thread::spawn(move || {
                history.execute(
                    SetField::new(crate::field!(Label, text), "B".to_owned()),
                    &target,
                )
            })
        };
        assert!(handle.join().unwrap().is_ok());
        assert_eq!(target.lock().text, "B");

        history.undo(&target).unwrap();
        assert!(target.lock().text.is_empty());
    }

    #[test]
    fn test_limit() {
        let config = HistoryConfig::default().with_limit(NonZeroUsize::new(2).unwrap());
        let history = SharedHistory::with_config(config);
        let target = SharedTarget::new(0);

        history
            .batch_execute(vec![Add(1), Add(2), Add(3)], &target)
            .unwrap();
        assert_eq!(history.len(), 2);

        history.set_history_limit(NonZeroUsize::new(1).unwrap());
        assert_eq!(history.len(), 1);

        history.clear();
        assert!(history.is_empty());
        assert_eq!(*target.lock(), 6);
    }

    #[test]
    fn test_concurrent_rng() {
        let count = rand::thread_rng().gen_range(10..60);
        let history: Arc<SharedHistory<Add>> = SharedHistory::new();
        let target = SharedTarget::new(0);

        let mut handles = Vec::new();
        for _ in 0..count {
            let value = rand::thread_rng().gen_range(0..20);
            let history = Arc::clone(&history);
            let target = target.clone();

            handles.push(black_box(thread::spawn(move || {
                thread::sleep(time::Duration::from_millis(
                    rand::thread_rng().gen_range(0..100),
                ));
                history.execute(Add(value), &target).unwrap();
                value
            })));
        }

        let mut sum = 0;
        for handle in handles {
            let result = handle.join();
            assert!(result.is_ok(), "Thread panicked during execution");
            sum += result.expect("Thread should return a value");
        }

        assert_eq!(*target.lock(), sum);
        assert_eq!(history.len(), count);

        let size = rand::thread_rng().gen_range(1..=count);
        let mut handles = Vec::new();
        for _ in 0..size {
            let history = Arc::clone(&history);
            let target = target.clone();

            handles.push(black_box(thread::spawn(move || {
                thread::sleep(time::Duration::from_millis(
                    rand::thread_rng().gen_range(0..100),
                ));
                assert!(history.undo(&target).unwrap());
                thread::sleep(time::Duration::from_millis(
                    rand::thread_rng().gen_range(0..100),
                ));
                assert!(history.redo(&target).unwrap());
            })));
        }

        for handle in handles {
            assert!(handle.join().is_ok(), "Thread panicked during execution");
        }

        assert_eq!(*target.lock(), sum);
        assert_eq!(history.len(), count);
        assert_eq!(history.cursor(), Some(count - 1));
    }

    #[test]
    fn test_panic_safety() {
        struct Explode;

        impl ReversibleOperation for Explode {
            type Target = i32;

            fn apply(&mut self, _target: &mut i32) -> Result<()> {
                panic!("Simulated panic");
            }

            fn revert(&mut self, _target: &mut i32) -> Result<()> {
                Ok(())
            }
        }

        let history = SharedHistory::<Box<dyn ReversibleOperation<Target = i32> + Send>>::new();
        let target = SharedTarget::new(0);
        history.execute(Box::new(Add(1)), &target).unwrap();

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            history.execute(Box::new(Explode), &target)
        }));

        assert!(result.is_err());
        assert_eq!(*target.lock(), 1);
        assert_eq!(history.len(), 1);

        assert!(history.undo(&target).unwrap());
        assert_eq!(*target.lock(), 0);
    }
}
