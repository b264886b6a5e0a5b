//! Union Flags
//!
//! A binary node combining two flags. Unions are normally built with `|`,
//! which absorbs `nothing` and collapses equal operands before a node is made.

use std::{mem, sync::Arc};

use smallvec::SmallVec;
use tracing::debug;

use crate::flags::{Flag, error::FlagError, truthy::Truthy};

/// Two flags combined under OR. Neither component is ever `nothing`.
#[derive(Debug)]
pub struct UnionFlag<V> {
    first: Arc<Flag<V>>,
    second: Arc<Flag<V>>,
}

impl<V> UnionFlag<V> {
    /// Build a union node directly, without the reductions `|` applies.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Construction`] if either component is `nothing`.
    pub fn try_new(first: Flag<V>, second: Flag<V>) -> Result<Self, FlagError> {
        if first.is_nothing() || second.is_nothing() {
            debug!("refused to build a union with a `nothing` component");

            return Err(FlagError::Construction);
        }

        Ok(Self::joined(first, second))
    }

    /// Callers guarantee neither component is `nothing`.
    pub(crate) fn joined(first: Flag<V>, second: Flag<V>) -> Self {
        Self {
            first: Arc::new(first),
            second: Arc::new(second),
        }
    }

    /// The left component.
    pub fn first(&self) -> &Flag<V> {
        &self.first
    }

    /// The right component.
    pub fn second(&self) -> &Flag<V> {
        &self.second
    }

    /// True if either component is truthy.
    pub fn is_truthy(&self) -> bool
    where
        V: Truthy,
    {
        self.first.is_truthy() || self.second.is_truthy()
    }

    /// Remove `other` from this union.
    ///
    /// A union operand has each of its components removed, right to left.
    /// Otherwise the rightmost component equal to `other` is removed and every
    /// union above it is rebuilt with `|`. Removing something that is not
    /// present returns the union unchanged.
    #[must_use]
    pub fn subtract(&self, other: &Flag<V>) -> Flag<V>
    where
        V: Clone + PartialEq,
    {
        let mut current = Flag::Union(self.clone());
        let mut pending: SmallVec<[&Flag<V>; 8]> = SmallVec::new();
        pending.push(other);

        while let Some(other) = pending.pop() {
            let next = match (&current, other) {
                (Flag::Atomic(_), _) => (current == *other).then(Flag::nothing),
                (Flag::Union(_), Flag::Union(other)) => {
                    pending.push(other.first());
                    pending.push(other.second());

                    None
                }
                (Flag::Union(union), _) => union.without_rightmost(other),
            };

            if let Some(next) = next {
                current = next;
            }
        }

        current
    }

    /// Remove the rightmost atomic component equal to `atom`, or `None` if
    /// there is none.
    fn without_rightmost(&self, atom: &Flag<V>) -> Option<Flag<V>>
    where
        V: Clone + PartialEq,
    {
        // Each entry is a union on the way down and whether the search went
        // into its right component.
        let mut path: Vec<(&UnionFlag<V>, bool)> = vec![(self, true)];
        let mut stack: SmallVec<[(&Flag<V>, usize, bool); 16]> = SmallVec::new();
        stack.push((self.first(), 1, false));
        stack.push((self.second(), 1, true));

        while let Some((flag, depth, right)) = stack.pop() {
            path.truncate(depth);
            if let Some(parent) = path.last_mut() {
                parent.1 = right;
            }

            match flag {
                Flag::Union(union) => {
                    path.push((union, true));
                    stack.push((union.first(), depth + 1, false));
                    stack.push((union.second(), depth + 1, true));
                }
                Flag::Atomic(_) if flag == atom => {
                    let rebuilt = path
                        .iter()
                        .rev()
                        .fold(Flag::nothing(), |below, (union, right)| {
                            if *right {
                                union.first().clone() | below
                            } else {
                                below | union.second().clone()
                            }
                        });

                    return Some(rebuilt);
                }
                Flag::Atomic(_) => {}
            }
        }

        None
    }

    /// Move uniquely owned union children onto `pending`, leaving `nothing`
    /// in their place.
    fn release_into(&mut self, pending: &mut SmallVec<[Flag<V>; 8]>) {
        for child in [&mut self.first, &mut self.second] {
            let unique = Arc::get_mut(child).filter(|flag| matches!(flag, Flag::Union(_)));

            if let Some(flag) = unique {
                pending.push(mem::take(flag));
            }
        }
    }
}

/// Nested unions are released from a work stack rather than recursively.
impl<V> Drop for UnionFlag<V> {
    fn drop(&mut self) {
        let mut pending = SmallVec::new();
        self.release_into(&mut pending);

        while let Some(flag) = pending.pop() {
            if let Flag::Union(mut union) = flag {
                union.release_into(&mut pending);
            }
        }
    }
}

impl<V> Clone for UnionFlag<V> {
    fn clone(&self) -> Self {
        Self {
            first: Arc::clone(&self.first),
            second: Arc::clone(&self.second),
        }
    }
}
