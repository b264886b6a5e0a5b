//! Flag errors

use thiserror::Error;

/// Errors raised when a flag is constructed directly instead of through `|` or
/// [`ValueFlag::of`](crate::flags::atomic::ValueFlag::of).
///
/// Both are programmer errors: the algebraic operators never produce them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    /// A union was built with `nothing` as one of its components.
    #[error("a union flag cannot have `nothing` as a component")]
    Construction,

    /// A value flag was asked to wrap a named flag.
    #[error("cannot wrap flag `{name}` in a value flag")]
    Wrapping {
        /// Name of the flag that was passed in
        name: String,
    },
}
