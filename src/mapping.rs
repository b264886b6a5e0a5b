//! Point mapping
//!
//! Combinators that transform every point of a flag and sum the results back
//! into a flag.

use crate::flags::{Flag, atomic::ValueFlag, point::Point};

/// Map `action` over every point of a flag and sum the results.
///
/// Points mapped to a named flag become that flag; points mapped to a value
/// become a value flag.
pub fn to_points<V, F>(action: F) -> impl Fn(&Flag<V>) -> Flag<V>
where
    V: Clone + PartialEq,
    F: Fn(Point<V>) -> Point<V>,
{
    move |flag: &Flag<V>| {
        flag.points()
            .into_iter()
            .map(&action)
            .map(ValueFlag::of)
            .collect()
    }
}

/// Map `action` over every plain value of a flag and sum the results.
///
/// Named-flag points pass through unchanged.
pub fn to_value_points<V, F>(action: F) -> impl Fn(&Flag<V>) -> Flag<V>
where
    V: Clone + PartialEq,
    F: Fn(V) -> V,
{
    move |flag: &Flag<V>| {
        flag.points()
            .into_iter()
            .map(|point| match point {
                Point::Value(value) => Point::Value(action(value)),
                named @ Point::Named(_) => named,
            })
            .map(ValueFlag::of)
            .collect()
    }
}
