//! The `Score` trait engines compare grids with.

use std::fmt::{Debug, Display};
use std::ops::{Add, Neg, Sub};

use super::ScoreLevel;

/// A totally ordered, immutable score. Higher is better and a grid that
/// meets every term of its model scores zero on every level.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Returns true if every mandatory constraint is satisfied.
    fn is_feasible(&self) -> bool;

    fn zero() -> Self;

    /// The value at one level.
    fn level(&self, level: ScoreLevel) -> i64;

    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }

    /// Returns true if no level carries any penalty.
    fn is_perfect(&self) -> bool {
        *self == Self::zero()
    }
}
