//! Points
//!
//! A point is the terminal value a flag stands for.

use std::fmt;

use crate::flags::atomic::NamedFlag;

/// The terminal value of an atomic flag.
///
/// Value flags point at the value they wrap; named flags point at themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Point<V> {
    /// A plain wrapped value.
    Value(V),

    /// A named flag, which is its own point.
    Named(NamedFlag<V>),
}

impl<V> Point<V> {
    /// Returns the wrapped value, if this point is a plain value.
    pub fn value(&self) -> Option<&V> {
        match self {
            Point::Value(value) => Some(value),
            Point::Named(_) => None,
        }
    }

    /// Consumes the point, returning the wrapped value if there is one.
    pub fn into_value(self) -> Option<V> {
        match self {
            Point::Value(value) => Some(value),
            Point::Named(_) => None,
        }
    }

    /// Returns the named flag, if this point is one.
    pub fn named(&self) -> Option<&NamedFlag<V>> {
        match self {
            Point::Value(_) => None,
            Point::Named(named) => Some(named),
        }
    }

    /// Returns true if this point is a plain value.
    pub fn is_value(&self) -> bool {
        matches!(self, Point::Value(_))
    }
}

impl<V: fmt::Display> fmt::Display for Point<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Value(value) => fmt::Display::fmt(value, f),
            Point::Named(named) => fmt::Display::fmt(named, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_points_expose_their_value() {
        let point: Point<i32> = Point::Value(7);

        assert!(point.is_value());
        assert_eq!(point.value(), Some(&7));
        assert!(point.named().is_none());
        assert_eq!(point.into_value(), Some(7));
    }

    #[test]
    fn named_points_expose_their_flag() {
        let point: Point<i32> = Point::Named(NamedFlag::new("ready", true));

        assert!(!point.is_value());
        assert!(point.value().is_none());
        assert_eq!(point.named().map(NamedFlag::name), Some("ready"));
        assert_eq!(point.to_string(), "ready");
    }
}
