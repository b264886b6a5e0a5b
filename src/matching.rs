//! Membership checks
//!
//! `matches` answers whether a candidate is a flag or one of its atomic
//! components. Both checks depend only on which components a flag has, never
//! on how its unions are nested.

use crate::flags::{Flag, atomic::AtomicFlag};

/// Returns true if `candidate` equals `flag` or one of its atomic components.
pub fn matches<V: PartialEq>(candidate: &Flag<V>, flag: &Flag<V>) -> bool {
    if candidate == flag {
        return true;
    }

    match candidate {
        Flag::Atomic(candidate) => flag.atoms().any(|atom| atom == candidate),
        Flag::Union(_) => false,
    }
}

/// Returns true if one of the value flags in `flag` wraps `value`.
pub fn matches_value<V: PartialEq>(value: &V, flag: &Flag<V>) -> bool {
    flag.atoms()
        .any(|atom| matches!(atom, AtomicFlag::Value(wrapped) if wrapped.value() == value))
}
