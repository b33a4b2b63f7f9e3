use std::{borrow::Cow, fmt, mem};

use tracing::trace;

use crate::{
    error::{OperationError, Result},
    field::Field,
    traits::reversible_operation::ReversibleOperation,
};

enum Prior<V> {
    Pending,
    Applied(V),
    Reverted(V),
}

/// Writes a new value into one field of a target, remembering the value it replaced.
///
/// The prior value is captured when the operation is applied from a non-applied
/// state. Applying again while already applied rewrites the new value but keeps
/// the original prior, so a later `revert` always restores what was there before
/// the operation first took effect.
///
/// # Examples
///
/// ```
/// use revert_history::prelude::*;
/// use revert_history::field;
///
/// struct Label {
///     text: String,
/// }
///
/// let mut label = Label { text: "A".to_owned() };
/// let mut op = SetField::new(field!(Label, text), "B".to_owned());
///
/// op.apply(&mut label).unwrap();
/// assert_eq!(label.text, "B");
/// op.revert(&mut label).unwrap();
/// assert_eq!(label.text, "A");
/// ```
pub struct SetField<T: ?Sized, V> {
    field: Field<T, V>,
    new_value: V,
    prior: Prior<V>,
}

impl<T: ?Sized, V> SetField<T, V> {
    #[must_use]
    pub fn new(field: Field<T, V>, new_value: V) -> Self {
        Self {
            field,
            new_value,
            prior: Prior::Pending,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        self.field.key()
    }

    #[must_use]
    pub fn new_value(&self) -> &V {
        &self.new_value
    }

    /// The value captured by the most recent `apply`, if there was one.
    #[must_use]
    pub fn prior_value(&self) -> Option<&V> {
        match &self.prior {
            Prior::Pending => None,
            Prior::Applied(prior) | Prior::Reverted(prior) => Some(prior),
        }
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self.prior, Prior::Applied(_))
    }
}

impl<T: ?Sized, V: Clone> ReversibleOperation for SetField<T, V> {
    type Target = T;

    fn apply(&mut self, target: &mut T) -> Result<()> {
        if self.is_applied() {
            trace!(key = self.key(), "already applied, keeping prior value");
            self.field.set(target, self.new_value.clone())?;
            return Ok(());
        }

        let prior = self.field.get(target)?;
        self.field.set(target, self.new_value.clone())?;
        self.prior = Prior::Applied(prior);
        Ok(())
    }

    fn revert(&mut self, target: &mut T) -> Result<()> {
        let (prior, was_applied) = match mem::replace(&mut self.prior, Prior::Pending) {
            Prior::Pending => {
                return Err(OperationError::NotApplied {
                    description: self.description().into_owned(),
                })
            }
            Prior::Applied(prior) => (prior, true),
            Prior::Reverted(prior) => (prior, false),
        };

        match self.field.set(target, prior.clone()) {
            Ok(()) => {
                self.prior = Prior::Reverted(prior);
                Ok(())
            }
            Err(err) => {
                self.prior = if was_applied {
                    Prior::Applied(prior)
                } else {
                    Prior::Reverted(prior)
                };
                Err(err.into())
            }
        }
    }

    fn description(&self) -> Cow<'_, str> {
        Cow::Owned(format!("Set {}", self.key()))
    }
}

impl<T: ?Sized, V: fmt::Debug> fmt::Debug for SetField<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetField")
            .field("key", &self.key())
            .field("new_value", &self.new_value)
            .field("prior_value", &self.prior_value())
            .finish()
    }
}
