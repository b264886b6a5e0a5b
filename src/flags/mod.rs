//! Flags
//!
//! A [`Flag`] is either atomic (a value flag or a named flag) or a union of two
//! flags. Flags are immutable: `|`, `-` and vector application build new flags.
//!
//! Equality treats a flag as the set of its atomic components, so `a | b` equals
//! `b | a` and nesting does not matter. `nothing` is the only flag with no
//! components; it is the identity for `|`.

use std::{
    fmt,
    hash::{Hash, Hasher},
    iter::Sum,
    ops::{BitOr, BitOrAssign, Neg, Not, Sub},
};

use rustc_hash::FxHasher;
use smallvec::SmallVec;

use crate::vector::{FlagVector, Polarity};

pub mod atomic;
pub mod error;
pub mod iter;
pub mod point;
#[cfg(feature = "serde")]
mod serialize;
pub mod truthy;
pub mod union;

use atomic::{AtomicFlag, NamedFlag, ValueFlag};
use iter::Atoms;
use point::Point;
use truthy::Truthy;
use union::UnionFlag;

/// An immutable flag: an atomic marker or a union of flags.
#[derive(Debug, Clone)]
pub enum Flag<V> {
    /// A single indivisible flag, possibly `nothing`.
    Atomic(AtomicFlag<V>),

    /// Two flags combined under OR.
    Union(UnionFlag<V>),
}

impl<V> Flag<V> {
    /// The neutral flag.
    pub fn nothing() -> Self {
        Flag::Atomic(AtomicFlag::nothing())
    }

    /// Returns true if this is `nothing`.
    pub fn is_nothing(&self) -> bool {
        matches!(self, Flag::Atomic(atom) if atom.is_nothing())
    }

    /// The atomic components, depth-first and left to right.
    pub fn atoms(&self) -> Atoms<'_, V> {
        Atoms::new(self)
    }

    /// The number of atomic components. Zero only for `nothing`.
    pub fn len(&self) -> usize {
        self.atoms().count()
    }

    /// Returns true if this flag has no components, which means it is `nothing`.
    pub fn is_empty(&self) -> bool {
        self.is_nothing()
    }

    /// The leftmost atomic component; `nothing` for `nothing`.
    pub fn atom(&self) -> &AtomicFlag<V> {
        let mut flag = self;

        loop {
            match flag {
                Flag::Atomic(atom) => return atom,
                Flag::Union(union) => flag = union.first(),
            }
        }
    }

    /// The point of the leftmost component.
    pub fn point(&self) -> Point<V>
    where
        V: Clone,
    {
        self.atom().point()
    }

    /// The points of every component, in iteration order.
    pub fn points(&self) -> SmallVec<[Point<V>; 4]>
    where
        V: Clone,
    {
        self.atoms().map(AtomicFlag::point).collect()
    }

    /// True if any component is truthy.
    pub fn is_truthy(&self) -> bool
    where
        V: Truthy,
    {
        self.atoms().any(AtomicFlag::is_truthy)
    }

    /// Keep the components whose point satisfies `predicate`.
    ///
    /// Returns `nothing` when no component does.
    #[must_use]
    pub fn that<F>(&self, predicate: F) -> Self
    where
        V: Clone + PartialEq,
        F: Fn(&Point<V>) -> bool,
    {
        self.atoms()
            .filter(|atom| predicate(&atom.point()))
            .map(|atom| Flag::from(atom.clone()))
            .collect()
    }

    /// Remove `other` from this flag.
    ///
    /// An atomic flag becomes `nothing` if it equals `other` and is otherwise
    /// unchanged. See [`UnionFlag::subtract`] for unions.
    #[must_use]
    pub fn subtract(&self, other: &Flag<V>) -> Self
    where
        V: Clone + PartialEq,
    {
        match self {
            Flag::Atomic(_) if self == other => Flag::nothing(),
            Flag::Atomic(_) => self.clone(),
            Flag::Union(union) => union.subtract(other),
        }
    }

    /// Combine with a plain value.
    #[must_use]
    pub fn with_value(self, value: V) -> Self
    where
        V: PartialEq,
    {
        self | ValueFlag::new(value)
    }

    /// Remove a plain value.
    #[must_use]
    pub fn without_value(&self, value: V) -> Self
    where
        V: Clone + PartialEq,
    {
        self.subtract(&ValueFlag::new(value).into())
    }

    /// A one-step vector that adds this flag.
    pub fn plus(self) -> FlagVector<V> {
        FlagVector::single(self, Polarity::Add)
    }
}

fn same_components<V: PartialEq>(left: &Flag<V>, right: &Flag<V>) -> bool {
    left.atoms().all(|atom| right.atoms().any(|other| atom == other))
        && right.atoms().all(|atom| left.atoms().any(|other| atom == other))
}

impl<V: PartialEq> PartialEq for Flag<V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Flag::Atomic(left), Flag::Atomic(right)) => left == right,
            _ => same_components(self, other),
        }
    }
}

impl<V: Eq> Eq for Flag<V> {}

impl<V: Hash> Hash for Flag<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order and duplicates do not affect equality, so hash the sorted set
        // of component digests.
        let mut digests: SmallVec<[u64; 8]> = self
            .atoms()
            .map(|atom| {
                let mut hasher = FxHasher::default();
                atom.hash(&mut hasher);
                hasher.finish()
            })
            .collect();

        digests.sort_unstable();
        digests.dedup();
        digests.as_slice().hash(state);
    }
}

impl<V> Default for Flag<V> {
    fn default() -> Self {
        Flag::nothing()
    }
}

impl<V: fmt::Display> fmt::Display for Flag<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut atoms = self.atoms();

        let Some(first) = atoms.next() else {
            return fmt::Display::fmt(self.atom(), f);
        };

        fmt::Display::fmt(first, f)?;
        for atom in atoms {
            write!(f, " | {atom}")?;
        }

        Ok(())
    }
}

impl<V> From<AtomicFlag<V>> for Flag<V> {
    fn from(atom: AtomicFlag<V>) -> Self {
        Flag::Atomic(atom)
    }
}

impl<V> From<ValueFlag<V>> for Flag<V> {
    fn from(flag: ValueFlag<V>) -> Self {
        Flag::Atomic(AtomicFlag::Value(flag))
    }
}

impl<V> From<NamedFlag<V>> for Flag<V> {
    fn from(flag: NamedFlag<V>) -> Self {
        Flag::Atomic(AtomicFlag::Named(flag))
    }
}

impl<V> From<UnionFlag<V>> for Flag<V> {
    fn from(union: UnionFlag<V>) -> Self {
        Flag::Union(union)
    }
}

impl<V> From<Point<V>> for Flag<V> {
    fn from(point: Point<V>) -> Self {
        ValueFlag::of(point)
    }
}

impl<V, R> BitOr<R> for Flag<V>
where
    V: PartialEq,
    R: Into<Flag<V>>,
{
    type Output = Self;

    fn bitor(self, rhs: R) -> Self::Output {
        let rhs = rhs.into();

        if rhs.is_nothing() {
            return self;
        }

        if self.is_nothing() {
            return rhs;
        }

        if self == rhs {
            return self;
        }

        Flag::Union(UnionFlag::joined(self, rhs))
    }
}

impl<V, R> BitOrAssign<R> for Flag<V>
where
    V: PartialEq,
    R: Into<Flag<V>>,
{
    fn bitor_assign(&mut self, rhs: R) {
        let current = std::mem::take(self);

        *self = current | rhs;
    }
}

impl<V, R> Sub<R> for Flag<V>
where
    V: Clone + PartialEq,
    R: Into<Flag<V>>,
{
    type Output = Self;

    fn sub(self, rhs: R) -> Self::Output {
        self.subtract(&rhs.into())
    }
}

impl<V> Neg for Flag<V> {
    type Output = FlagVector<V>;

    fn neg(self) -> Self::Output {
        FlagVector::single(self, Polarity::Subtract)
    }
}

/// Identity, so that `!x` yields a flag for both flags and vectors.
impl<V> Not for Flag<V> {
    type Output = Self;

    fn not(self) -> Self::Output {
        self
    }
}

impl<V: PartialEq> FromIterator<Flag<V>> for Flag<V> {
    fn from_iter<I: IntoIterator<Item = Flag<V>>>(iter: I) -> Self {
        iter.into_iter().fold(Flag::nothing(), |sum, flag| sum | flag)
    }
}

impl<V: PartialEq> Sum for Flag<V> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.collect()
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use crate::constructors::{flag_about, pointed};

    use super::*;

    fn named(name: &str) -> Flag<i32> {
        flag_about(name, false).into()
    }

    #[test]
    fn nothing_is_the_identity_for_or() {
        let x = pointed([1, 2]);

        assert_eq!(x.clone() | Flag::nothing(), x);
        assert_eq!(Flag::nothing() | x.clone(), x);
        assert!((Flag::<i32>::nothing() | Flag::nothing()).is_nothing());
    }

    #[test]
    fn or_is_idempotent() {
        let x = pointed([1]) | named("a");

        assert_eq!(x.clone() | x.clone(), x);
        assert!(matches!(pointed([1]) | pointed([1]), Flag::Atomic(_)));
    }

    #[test]
    fn equality_ignores_order_and_nesting() {
        let a = named("a");
        let b = named("b");
        let c = named("c");

        assert_eq!(a.clone() | b.clone(), b.clone() | a.clone());
        assert_eq!(
            (a.clone() | b.clone()) | c.clone(),
            a.clone() | (b.clone() | c.clone())
        );
        assert_ne!(a.clone() | b.clone(), a.clone() | c);
        assert_ne!(a.clone() | b, a);
    }

    #[test]
    fn value_and_named_flags_never_compare_equal() {
        let value: Flag<&str> = pointed(["a"]);
        let named: Flag<&str> = flag_about("a", false).into();

        assert_ne!(value, named);
    }

    #[test]
    fn equal_flags_hash_equally() {
        let mut set = FxHashSet::default();

        set.insert(pointed([1, 2, 3]));
        set.insert(pointed([3, 2, 1]));
        set.insert(pointed([1, 2]) | pointed([2, 3]));

        assert_eq!(set.len(), 1);
        assert!(set.contains(&(pointed([2]) | pointed([1, 3]))));
    }

    #[test]
    fn len_matches_iteration_and_points() {
        let nothing: Flag<i32> = Flag::nothing();
        let flag = pointed([1, 2, 3]) | named("x");

        assert_eq!(nothing.len(), 0);
        assert!(nothing.is_empty());
        assert!(nothing.points().is_empty());
        assert_eq!(flag.len(), 4);
        assert_eq!(flag.atoms().count(), flag.len());
        assert_eq!(flag.points().len(), flag.len());
    }

    #[test]
    fn point_is_the_leftmost_point() {
        let flag = pointed([4]) | named("x");

        assert_eq!(flag.point(), Point::Value(4));
        assert_eq!(flag.atom(), &AtomicFlag::Value(ValueFlag::new(4)));
        assert_eq!(
            Flag::<i32>::nothing().point(),
            Point::Named(NamedFlag::nothing())
        );
    }

    #[test]
    fn that_filters_components() {
        let flag = pointed(0..11);
        let high = flag.that(|point| point.value().is_some_and(|n| *n >= 7));

        assert_eq!(
            high.points().as_slice(),
            &[
                Point::Value(7),
                Point::Value(8),
                Point::Value(9),
                Point::Value(10)
            ]
        );
        assert!(flag.that(|_| false).is_nothing());
        assert!(Flag::<i32>::nothing().that(|_| true).is_nothing());
    }

    #[test]
    fn atomic_subtraction_is_all_or_nothing() {
        let one = pointed([1]);

        assert!((one.clone() - pointed([1])).is_nothing());
        assert_eq!(one.clone() - pointed([2]), one);
        assert_eq!(one.clone() - (pointed([1]) | pointed([2])), one);
    }

    #[test]
    fn subtraction_undoes_or_for_distinct_flags() {
        let x = pointed([1, 2]);
        let y = named("y");

        assert_eq!((x.clone() | y.clone()) - y, x);
    }

    #[test]
    fn value_helpers_coerce_raw_values() {
        let flag = pointed([1]).with_value(2);

        assert_eq!(flag, pointed([1, 2]));
        assert_eq!(flag.without_value(1), pointed([2]));
    }

    #[test]
    fn or_assign_accumulates() {
        let mut flag = Flag::nothing();

        flag |= pointed([1]);
        flag |= named("z");
        flag |= pointed([1]);

        assert_eq!(flag, pointed([1]) | named("z"));
        assert_eq!(flag.len(), 2);
    }

    #[test]
    fn not_is_the_identity_on_flags() {
        let flag = pointed([1, 2]);

        assert_eq!(!flag.clone(), flag);
    }

    #[test]
    fn collecting_sums_left_to_right() {
        let summed: Flag<i32> = [pointed([1]), Flag::nothing(), pointed([2]), pointed([1])]
            .into_iter()
            .sum();

        assert_eq!(summed, pointed([1, 2]));
        assert_eq!(summed.point(), Point::Value(1));
    }

    #[test]
    fn truthiness_is_or_of_components() {
        let a: Flag<i32> = flag_about("a", false).into();
        let b: Flag<i32> = flag_about("b", true).into();

        assert!(a.is_truthy());
        assert!(!b.is_truthy());
        assert!((a | b.clone()).is_truthy());
        assert!(!(b | pointed([0])).is_truthy());
    }

    #[test]
    fn display_joins_components() {
        let flag = pointed([1, 2]) | named("k") | Flag::from(flag_about("off", true));

        assert_eq!(flag.to_string(), "1 | 2 | k | !off");
        assert_eq!(Flag::<i32>::nothing().to_string(), "nothing");
    }

    #[test]
    fn deep_flags_build_and_drop_without_recursing() {
        let flag = pointed(0..100_000);

        assert_eq!(flag.len(), 100_000);
        assert_eq!(flag.point(), Point::Value(0));
        assert!(flag.is_truthy());
        assert_eq!(flag.that(|point| point.value() == Some(&99_999)), pointed([99_999]));
        assert!(flag.to_string().ends_with("99998 | 99999"));

        let shared = flag.clone();
        drop(flag);
        assert_eq!(shared.len(), 100_000);
        drop(shared);
    }
}
