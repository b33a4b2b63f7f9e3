use std::{borrow::Cow, fmt};

use crate::error::TargetError;

type Getter<T, V> = Box<dyn Fn(&T) -> Result<V, TargetError> + Send + Sync>;
type Setter<T, V> = Box<dyn Fn(&mut T, V) -> Result<(), TargetError> + Send + Sync>;

/// A named getter/setter pair selecting one field of a target.
///
/// The key names the field for descriptions and log output; the accessors decide
/// how the field is reached, e.g. through a nested style object or directly.
///
/// # Examples
///
/// ```
/// use revert_history::field;
/// use revert_history::field::Field;
///
/// struct Style {
///     color: String,
/// }
///
/// struct Element {
///     text: String,
///     style: Style,
/// }
///
/// let color: Field<Element, String> = field!(Element, style.color);
/// let mut element = Element {
///     text: "hello".to_owned(),
///     style: Style { color: "black".to_owned() },
/// };
///
/// color.set(&mut element, "red".to_owned()).unwrap();
/// assert_eq!(color.key(), "style.color");
/// assert_eq!(color.get(&element).unwrap(), "red");
/// assert_eq!(element.text, "hello");
/// ```
pub struct Field<T: ?Sized, V> {
    key: Cow<'static, str>,
    get: Getter<T, V>,
    set: Setter<T, V>,
}

impl<T: ?Sized, V> Field<T, V> {
    /// Builds an accessor whose reads and writes may fail, e.g. when the field lives
    /// behind a lookup that can miss.
    pub fn new<G, S>(key: impl Into<Cow<'static, str>>, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Result<V, TargetError> + Send + Sync + 'static,
        S: Fn(&mut T, V) -> Result<(), TargetError> + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    /// Builds an accessor for a field that is always present.
    pub fn infallible<G, S>(key: impl Into<Cow<'static, str>>, get: G, set: S) -> Self
    where
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self::new(
            key,
            move |target: &T| Ok(get(target)),
            move |target: &mut T, value: V| {
                set(target, value);
                Ok(())
            },
        )
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the current value of the field.
    ///
    /// # Errors
    ///
    /// Whatever the getter reports.
    pub fn get(&self, target: &T) -> Result<V, TargetError> {
        (self.get)(target)
    }

    /// Overwrites the field with `value`.
    ///
    /// # Errors
    ///
    /// Whatever the setter reports.
    pub fn set(&self, target: &mut T, value: V) -> Result<(), TargetError> {
        (self.set)(target, value)
    }
}

impl<T: ?Sized, V> fmt::Debug for Field<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("key", &self.key).finish_non_exhaustive()
    }
}

/// Builds an infallible [`Field`] from a key path on a target type.
///
/// `field!(Element, style.color)` reads with `element.style.color.clone()`, writes
/// with `element.style.color = value` and uses `"style.color"` as its key.
#[macro_export]
macro_rules! field {
    ($target:ty, $first:ident $(. $rest:ident)*) => {
        $crate::field::Field::infallible(
            concat!(stringify!($first) $(, ".", stringify!($rest))*),
            |target: &$target| ::std::clone::Clone::clone(&target.$first $(.$rest)*),
            |target: &mut $target, value| target.$first $(.$rest)* = value,
        )
    };
}
