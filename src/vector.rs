//! Flag Vectors
//!
//! A [`FlagVector`] is a deferred sequence of add and subtract steps. Vectors
//! are made from flags with [`Flag::plus`] and `-flag`, chained with `^`,
//! inverted with `-`, and run with [`FlagVector::apply`].

use std::ops::{BitXor, Neg, Not};

use smallvec::SmallVec;
use tracing::trace;

use crate::{constructors::pointed, flags::Flag};

/// Whether a step adds or removes its flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Combine with `|`.
    Add,

    /// Remove with `-`.
    Subtract,
}

impl Polarity {
    /// The opposite polarity.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Polarity::Add => Polarity::Subtract,
            Polarity::Subtract => Polarity::Add,
        }
    }

    /// Returns true for [`Polarity::Add`].
    pub const fn is_add(self) -> bool {
        matches!(self, Polarity::Add)
    }
}

#[derive(Debug, Clone)]
struct Step<V> {
    flag: Flag<V>,
    polarity: Polarity,
}

/// An ordered list of add and subtract steps against a flag.
#[derive(Debug, Clone)]
pub struct FlagVector<V> {
    steps: SmallVec<[Step<V>; 2]>,
}

impl<V> FlagVector<V> {
    pub(crate) fn single(flag: Flag<V>, polarity: Polarity) -> Self {
        let mut steps = SmallVec::new();
        steps.push(Step { flag, polarity });

        Self { steps }
    }

    /// Identity.
    #[must_use]
    pub fn plus(self) -> Self {
        self
    }

    /// The steps in the order they are applied.
    pub fn steps(&self) -> impl Iterator<Item = (&Flag<V>, Polarity)> {
        self.steps.iter().map(|step| (&step.flag, step.polarity))
    }

    /// The number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step against `flag`, in order.
    pub fn apply(&self, flag: Flag<V>) -> Flag<V>
    where
        V: Clone + PartialEq,
    {
        trace!(steps = self.steps.len(), "applying flag vector");

        self.steps
            .iter()
            .fold(flag, |current, step| match step.polarity {
                Polarity::Add => current | step.flag.clone(),
                Polarity::Subtract => current.subtract(&step.flag),
            })
    }

    /// Run every step against the flag wrapping `value`.
    pub fn apply_value(&self, value: V) -> Flag<V>
    where
        V: Clone + PartialEq,
    {
        self.apply(pointed([value]))
    }
}

impl<V> Neg for FlagVector<V> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for step in &mut self.steps {
            step.polarity = step.polarity.flipped();
        }

        self
    }
}

/// `a ^ b` runs `a`, then `b`.
impl<V> BitXor for FlagVector<V> {
    type Output = Self;

    fn bitxor(mut self, rhs: Self) -> Self::Output {
        self.steps.extend(rhs.steps);

        self
    }
}

/// Applies the vector to `nothing`.
impl<V: Clone + PartialEq> Not for FlagVector<V> {
    type Output = Flag<V>;

    fn not(self) -> Self::Output {
        self.apply(Flag::nothing())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        constructors::{flag_about, pointed},
        flags::point::Point,
    };

    use super::*;

    #[test]
    fn plus_and_minus_make_single_steps() {
        let add = pointed([1]).plus();
        let remove = -pointed([1]);

        assert_eq!(add.len(), 1);
        assert!(!add.is_empty());
        assert_eq!(
            add.steps().map(|(_, polarity)| polarity).collect::<Vec<_>>(),
            [Polarity::Add]
        );
        assert_eq!(
            remove.steps().map(|(_, polarity)| polarity).collect::<Vec<_>>(),
            [Polarity::Subtract]
        );
    }

    #[test]
    fn applying_a_subtraction_removes_the_flag() {
        let removed = (-pointed([3])).apply(pointed([1, 2, 3]));

        assert_eq!(
            removed.points().as_slice(),
            &[Point::Value(1), Point::Value(2)]
        );
        assert!((-pointed([1])).apply(pointed([1])).is_nothing());
    }

    #[test]
    fn not_applies_to_nothing() {
        let flag: Flag<i32> = flag_about("ready", false).into();

        assert_eq!(!flag.clone().plus(), flag);
        assert!((!(-flag)).is_nothing());
    }

    #[test]
    fn negating_undoes_a_single_addition() {
        let flag = pointed([7]);

        assert!((-flag.clone().plus()).apply(flag).is_nothing());
    }

    #[test]
    fn negation_flips_every_step_and_keeps_order() {
        let vector = pointed([1]).plus() ^ -pointed([2]) ^ pointed([3]).plus();
        let flipped = -vector;

        let steps: Vec<(Flag<i32>, Polarity)> = flipped
            .steps()
            .map(|(flag, polarity)| (flag.clone(), polarity))
            .collect();

        assert_eq!(
            steps,
            [
                (pointed([1]), Polarity::Subtract),
                (pointed([2]), Polarity::Add),
                (pointed([3]), Polarity::Subtract),
            ]
        );
    }

    #[test]
    fn chained_vectors_run_left_then_right() {
        let first = pointed([1]).plus() ^ pointed([2]).plus();
        let second = -pointed([1]);
        let chained = first.clone() ^ second.clone();

        let input = pointed([9]);

        assert_eq!(
            chained.apply(input.clone()),
            second.apply(first.apply(input))
        );
        assert_eq!(!chained, pointed([2]));
    }

    #[test]
    fn apply_value_wraps_the_input() {
        let vector = pointed([2]).plus();

        assert_eq!(vector.apply_value(1), pointed([1, 2]));
    }

    #[test]
    fn plus_on_a_vector_is_the_identity() {
        let vector = -pointed([4]);

        assert_eq!(vector.clone().plus().len(), vector.len());
        assert!((!vector.plus()).is_nothing());
    }

    #[test]
    fn polarity_flips() {
        assert_eq!(Polarity::Add.flipped(), Polarity::Subtract);
        assert_eq!(Polarity::Subtract.flipped(), Polarity::Add);
        assert!(Polarity::Add.is_add());
        assert!(!Polarity::Subtract.is_add());
    }
}
