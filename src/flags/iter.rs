//! Atomic component iteration

use std::iter::FusedIterator;

use smallvec::SmallVec;

use crate::flags::{Flag, atomic::AtomicFlag};

/// Iterator over the atomic components of a flag, depth-first and left to right.
///
/// `nothing` has no components.
#[derive(Debug)]
pub struct Atoms<'a, V> {
    stack: SmallVec<[&'a Flag<V>; 8]>,
}

impl<'a, V> Atoms<'a, V> {
    pub(crate) fn new(flag: &'a Flag<V>) -> Self {
        let mut stack = SmallVec::new();

        if !flag.is_nothing() {
            stack.push(flag);
        }

        Self { stack }
    }
}

impl<'a, V> Iterator for Atoms<'a, V> {
    type Item = &'a AtomicFlag<V>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(flag) = self.stack.pop() {
            match flag {
                Flag::Atomic(atom) => return Some(atom),
                Flag::Union(union) => {
                    self.stack.push(union.second());
                    self.stack.push(union.first());
                }
            }
        }

        None
    }
}

impl<V> FusedIterator for Atoms<'_, V> {}

impl<'a, V> IntoIterator for &'a Flag<V> {
    type Item = &'a AtomicFlag<V>;
    type IntoIter = Atoms<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        Atoms::new(self)
    }
}
