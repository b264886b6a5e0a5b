//! Atomic Flags
//!
//! Indivisible flags: value flags wrapping a plain value, and named flags that
//! point at themselves. `nothing` is the negative named flag called `nothing`.

use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::{BitOr, Sub},
    sync::{Arc, LazyLock},
};

use tracing::debug;

use crate::flags::{Flag, error::FlagError, point::Point, truthy::Truthy};

const NOTHING_NAME: &str = "nothing";

/// Shared name storage for every `nothing` in the process.
static NOTHING: LazyLock<Arc<str>> = LazyLock::new(|| Arc::from(NOTHING_NAME));

/// An action attached to a callable named flag.
pub type Action<V> = Arc<dyn Fn(V) -> V + Send + Sync>;

/// An indivisible flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AtomicFlag<V> {
    /// A flag wrapping a plain value.
    Value(ValueFlag<V>),

    /// A self-pointing flag identified by name and sign.
    Named(NamedFlag<V>),
}

impl<V> AtomicFlag<V> {
    /// The neutral flag.
    pub fn nothing() -> Self {
        AtomicFlag::Named(NamedFlag::nothing())
    }

    /// Returns true if this is `nothing`.
    pub fn is_nothing(&self) -> bool {
        matches!(self, AtomicFlag::Named(named) if named.is_nothing())
    }

    /// The terminal value of this flag.
    pub fn point(&self) -> Point<V>
    where
        V: Clone,
    {
        match self {
            AtomicFlag::Value(flag) => Point::Value(flag.value.clone()),
            AtomicFlag::Named(flag) => Point::Named(flag.clone()),
        }
    }

    /// Value flags are as truthy as their value; named flags report their sign.
    pub fn is_truthy(&self) -> bool
    where
        V: Truthy,
    {
        match self {
            AtomicFlag::Value(flag) => flag.value.is_truthy(),
            AtomicFlag::Named(flag) => flag.sign,
        }
    }
}

impl<V: fmt::Display> fmt::Display for AtomicFlag<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomicFlag::Value(flag) => fmt::Display::fmt(&flag.value, f),
            AtomicFlag::Named(flag) => fmt::Display::fmt(flag, f),
        }
    }
}

/// A flag wrapping a plain, non-flag value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueFlag<V> {
    value: V,
}

impl<V> ValueFlag<V> {
    /// Wrap a plain value.
    pub fn new(value: V) -> Self {
        Self { value }
    }

    /// Turn a point into a flag: values are wrapped, named flags are returned
    /// unchanged.
    pub fn of(point: Point<V>) -> Flag<V> {
        match point {
            Point::Value(value) => Flag::Atomic(AtomicFlag::Value(Self::new(value))),
            Point::Named(named) => Flag::Atomic(AtomicFlag::Named(named)),
        }
    }

    /// Wrap a point that must be a plain value.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Wrapping`] if the point is a named flag.
    pub fn try_from_point(point: Point<V>) -> Result<Self, FlagError> {
        match point {
            Point::Value(value) => Ok(Self::new(value)),
            Point::Named(named) => {
                debug!(flag = named.name(), "refused to wrap a flag in a value flag");

                Err(FlagError::Wrapping {
                    name: named.name().to_string(),
                })
            }
        }
    }

    /// The wrapped value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consume the flag, returning the wrapped value.
    pub fn into_value(self) -> V {
        self.value
    }
}

/// A self-pointing flag identified by its name and sign.
///
/// Two named flags are equal when their names and signs are equal, whether or
/// not either carries an action.
pub struct NamedFlag<V> {
    name: Arc<str>,
    sign: bool,
    action: Option<Action<V>>,
}

impl<V> NamedFlag<V> {
    /// Create a named flag. A positive sign makes the flag truthy.
    pub fn new(name: impl Into<Arc<str>>, sign: bool) -> Self {
        let name = name.into();

        if !sign && *name == *NOTHING_NAME {
            return Self::nothing();
        }

        Self {
            name,
            sign,
            action: None,
        }
    }

    /// The neutral flag.
    pub fn nothing() -> Self {
        Self {
            name: Arc::clone(&NOTHING),
            sign: false,
            action: None,
        }
    }

    /// The name of the flag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sign of the flag, which is also its truth value.
    pub fn sign(&self) -> bool {
        self.sign
    }

    /// Returns true if this is `nothing`.
    pub fn is_nothing(&self) -> bool {
        !self.sign && *self.name == *NOTHING_NAME
    }

    /// Returns true if an action is attached.
    pub fn is_callable(&self) -> bool {
        self.action.is_some()
    }

    /// Attach an action, producing a callable flag with the same identity.
    ///
    /// If an action is already attached, `action` runs first and the existing
    /// action receives its result.
    #[must_use]
    pub fn to<F>(&self, action: F) -> Self
    where
        F: Fn(V) -> V + Send + Sync + 'static,
        V: 'static,
    {
        let action: Action<V> = match &self.action {
            Some(existing) => {
                let existing = Arc::clone(existing);
                Arc::new(move |value| existing(action(value)))
            }
            None => Arc::new(action),
        };

        Self {
            name: Arc::clone(&self.name),
            sign: self.sign,
            action: Some(action),
        }
    }

    /// Run the attached action, or return `None` if the flag is not callable.
    pub fn call(&self, value: V) -> Option<V> {
        self.action.as_ref().map(|action| action(value))
    }
}

impl<V> Clone for NamedFlag<V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            sign: self.sign,
            action: self.action.clone(),
        }
    }
}

impl<V> fmt::Debug for NamedFlag<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedFlag")
            .field("name", &self.name)
            .field("sign", &self.sign)
            .field("callable", &self.action.is_some())
            .finish()
    }
}

impl<V> fmt::Display for NamedFlag<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign || self.is_nothing() {
            f.write_str(&self.name)
        } else {
            write!(f, "!{}", self.name)
        }
    }
}

impl<V> PartialEq for NamedFlag<V> {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.name == other.name
    }
}

impl<V> Eq for NamedFlag<V> {}

impl<V> Hash for NamedFlag<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sign.hash(state);
    }
}

impl<V, R> BitOr<R> for ValueFlag<V>
where
    V: PartialEq,
    R: Into<Flag<V>>,
{
    type Output = Flag<V>;

    fn bitor(self, rhs: R) -> Self::Output {
        Flag::from(self) | rhs
    }
}

impl<V, R> BitOr<R> for NamedFlag<V>
where
    V: PartialEq,
    R: Into<Flag<V>>,
{
    type Output = Flag<V>;

    fn bitor(self, rhs: R) -> Self::Output {
        Flag::from(self) | rhs
    }
}

impl<V, R> Sub<R> for ValueFlag<V>
where
    V: Clone + PartialEq,
    R: Into<Flag<V>>,
{
    type Output = Flag<V>;

    fn sub(self, rhs: R) -> Self::Output {
        Flag::from(self) - rhs
    }
}

impl<V, R> Sub<R> for NamedFlag<V>
where
    V: Clone + PartialEq,
    R: Into<Flag<V>>,
{
    type Output = Flag<V>;

    fn sub(self, rhs: R) -> Self::Output {
        Flag::from(self) - rhs
    }
}
