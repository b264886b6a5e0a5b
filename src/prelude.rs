//! Pennant prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    constructors::{flag_about, nothing, pointed},
    flags::{
        Flag,
        atomic::{Action, AtomicFlag, NamedFlag, ValueFlag},
        error::FlagError,
        iter::Atoms,
        point::Point,
        truthy::Truthy,
        union::UnionFlag,
    },
    mapping::{to_points, to_value_points},
    matching::{matches, matches_value},
    vector::{FlagVector, Polarity},
};
