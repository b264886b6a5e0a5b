//! Constructors

use std::sync::Arc;

use crate::flags::{
    Flag,
    atomic::{NamedFlag, ValueFlag},
};

/// Sum the value flags of `values`, left to right.
///
/// No values give `nothing`; a single value gives its bare value flag.
/// Duplicates collapse because `|` is idempotent.
pub fn pointed<V, I>(values: I) -> Flag<V>
where
    V: PartialEq,
    I: IntoIterator<Item = V>,
{
    values
        .into_iter()
        .map(|value| Flag::from(ValueFlag::new(value)))
        .collect()
}

/// A named flag. Named flags are truthy unless `negative` is set.
pub fn flag_about<V>(name: impl Into<Arc<str>>, negative: bool) -> NamedFlag<V> {
    NamedFlag::new(name, !negative)
}

/// The neutral flag.
pub fn nothing<V>() -> Flag<V> {
    Flag::nothing()
}
