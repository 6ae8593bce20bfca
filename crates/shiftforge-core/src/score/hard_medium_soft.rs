//! The three-level score engines assign to candidate grids.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::traits::Score;
use super::ScoreLevel;

/// Penalties on three levels, stored as non-positive numbers.
///
/// Fields compare in declaration order, so any hard violation outweighs
/// every medium and soft penalty, and medium outweighs soft.
///
/// # Examples
///
/// ```
/// use shiftforge_core::HardMediumSoftScore;
///
/// // Ten unmet optional weights, a hundred idealistic penalty points.
/// let loose = HardMediumSoftScore::from_penalties(0, 10, 100);
/// let tight = HardMediumSoftScore::from_penalties(0, 5, 200);
///
/// assert!(tight > loose);
/// assert_eq!(loose.to_string(), "0hard/-10medium/-100soft");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct HardMediumSoftScore {
    hard: i64,
    medium: i64,
    soft: i64,
}

fn negated(penalty: u64) -> i64 {
    i64::try_from(penalty).map_or(i64::MIN, |p| -p)
}

impl HardMediumSoftScore {
    pub const ZERO: HardMediumSoftScore = HardMediumSoftScore {
        hard: 0,
        medium: 0,
        soft: 0,
    };

    #[inline]
    pub const fn of(hard: i64, medium: i64, soft: i64) -> Self {
        HardMediumSoftScore { hard, medium, soft }
    }

    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        Self::of(hard, 0, 0)
    }

    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        Self::of(0, 0, soft)
    }

    /// Builds a score from violation counts and weights summed per level.
    pub fn from_penalties(hard: u64, medium: u64, soft: u64) -> Self {
        Self::of(negated(hard), negated(medium), negated(soft))
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn medium(&self) -> i64 {
        self.medium
    }

    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Highest level carrying a penalty, if any.
    pub fn worst_level(&self) -> Option<ScoreLevel> {
        ScoreLevel::ALL
            .into_iter()
            .find(|&level| self.level(level) < 0)
    }
}

impl Score for HardMediumSoftScore {
    #[inline]
    fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    #[inline]
    fn zero() -> Self {
        HardMediumSoftScore::ZERO
    }

    fn level(&self, level: ScoreLevel) -> i64 {
        match level {
            ScoreLevel::Hard => self.hard,
            ScoreLevel::Medium => self.medium,
            ScoreLevel::Soft => self.soft,
        }
    }
}

impl Add for HardMediumSoftScore {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::of(
            self.hard.saturating_add(rhs.hard),
            self.medium.saturating_add(rhs.medium),
            self.soft.saturating_add(rhs.soft),
        )
    }
}

impl Sub for HardMediumSoftScore {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::of(
            self.hard.saturating_sub(rhs.hard),
            self.medium.saturating_sub(rhs.medium),
            self.soft.saturating_sub(rhs.soft),
        )
    }
}

impl Neg for HardMediumSoftScore {
    type Output = Self;

    fn neg(self) -> Self {
        Self::of(
            self.hard.saturating_neg(),
            self.medium.saturating_neg(),
            self.soft.saturating_neg(),
        )
    }
}

impl fmt::Display for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}medium/{}soft", self.hard, self.medium, self.soft)
    }
}
