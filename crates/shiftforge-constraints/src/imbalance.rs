//! Imbalance policy: caps on how unevenly register work is shared.
//!
//! Two counts are compared across the imbalance pool (regular employees,
//! without designated cashiers and without a lone floor-coverage member):
//! cashier slots, and cashier-or-support slots. A cap bounds the largest
//! pairwise difference of each count.

use std::fmt;

use serde::{Deserialize, Serialize};
use shiftforge_core::{Assignment, Duty, Result, Roster, ShiftforgeError};

use crate::spec::{ConstraintSpec, Rule, Tier};

/// One cap value; `Uncapped` produces no constraint at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cap {
    Capped(u32),
    Uncapped,
}

impl Cap {
    pub fn value(self) -> Option<u32> {
        match self {
            Cap::Capped(v) => Some(v),
            Cap::Uncapped => None,
        }
    }
}

impl fmt::Display for Cap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cap::Capped(v) => write!(f, "{v}"),
            Cap::Uncapped => f.write_str("-"),
        }
    }
}

/// Cashier and register caps tried together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapPair {
    pub cashier: Cap,
    pub register: Cap,
}

impl CapPair {
    pub const UNCAPPED: CapPair = CapPair {
        cashier: Cap::Uncapped,
        register: Cap::Uncapped,
    };

    pub const fn capped(cashier: u32, register: u32) -> Self {
        Self {
            cashier: Cap::Capped(cashier),
            register: Cap::Capped(register),
        }
    }

    /// Both caps as numbers, or `None` if either is uncapped.
    pub fn values(self) -> Option<(u32, u32)> {
        Some((self.cashier.value()?, self.register.value()?))
    }

    /// Returns true if this pair admits every grid the other admits.
    ///
    /// An uncapped component is looser than any number.
    pub fn is_at_least_as_loose_as(self, other: CapPair) -> bool {
        fn looser(a: Cap, b: Cap) -> bool {
            match (a, b) {
                (Cap::Uncapped, _) => true,
                (Cap::Capped(_), Cap::Uncapped) => false,
                (Cap::Capped(x), Cap::Capped(y)) => x >= y,
            }
        }
        looser(self.cashier, other.cashier) && looser(self.register, other.register)
    }
}

impl fmt::Display for CapPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.cashier, self.register)
    }
}

/// Stage A order used unless configured otherwise: one count loosened at
/// a time, cashier first.
pub const DEFAULT_ESCALATION: [CapPair; 7] = [
    CapPair::capped(0, 0),
    CapPair::capped(1, 0),
    CapPair::capped(0, 1),
    CapPair::capped(1, 1),
    CapPair::capped(2, 1),
    CapPair::capped(1, 2),
    CapPair::capped(2, 2),
];

/// Which count an imbalance constraint compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImbalanceKind {
    Cashier,
    Register,
}

impl ImbalanceKind {
    fn counts(self, duty: Duty) -> bool {
        match self {
            ImbalanceKind::Cashier => duty == Duty::Cashier,
            ImbalanceKind::Register => duty.is_register(),
        }
    }

    /// Spec id prefix, e.g. `cashier-diff-1`.
    pub fn id(self, cap: u32) -> String {
        match self {
            ImbalanceKind::Cashier => format!("cashier-diff-{cap}"),
            ImbalanceKind::Register => format!("register-diff-{cap}"),
        }
    }
}

/// Largest pairwise count difference minus the cap, floored at zero.
#[derive(Debug, Clone, Copy)]
pub struct ImbalanceRule {
    pub kind: ImbalanceKind,
    pub cap: u32,
}

impl ImbalanceRule {
    /// Largest pairwise difference across the imbalance pool.
    pub fn spread(&self, roster: &Roster, grid: &Assignment) -> u64 {
        let counts = roster.imbalance_pool().into_iter().map(|id| {
            grid.row(id)
                .iter()
                .filter(|d| self.kind.counts(**d))
                .count() as u64
        });
        let (min, max) = counts.fold((u64::MAX, 0), |(lo, hi), c| (lo.min(c), hi.max(c)));
        max.saturating_sub(min)
    }
}

impl Rule for ImbalanceRule {
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        self.spread(roster, grid).saturating_sub(u64::from(self.cap))
    }
}

/// Builds imbalance constraints for cap pairs and for the fallback ladder.
///
/// # Examples
///
/// ```
/// use shiftforge_constraints::{Cap, CapPair, ImbalancePolicy};
///
/// let policy = ImbalancePolicy::default();
/// assert_eq!(policy.constraints(CapPair::capped(0, 1)).len(), 2);
/// assert!(policy.constraints(CapPair::UNCAPPED).is_empty());
///
/// let half = CapPair { cashier: Cap::Capped(1), register: Cap::Uncapped };
/// assert_eq!(policy.constraints(half)[0].id(), "cashier-diff-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImbalancePolicy {
    /// Loosest cap Stage A may try on either count.
    pub max_cap: u32,
    /// Weight of the ladder term for cap `k` at index `k`.
    pub ladder_weights: Vec<u64>,
}

impl Default for ImbalancePolicy {
    fn default() -> Self {
        Self {
            max_cap: 2,
            ladder_weights: vec![10, 20, 30, 40, 999],
        }
    }
}

impl ImbalancePolicy {
    fn weight(&self, cap: u32) -> u64 {
        self.ladder_weights
            .get(cap as usize)
            .or(self.ladder_weights.last())
            .copied()
            .unwrap_or(1)
    }

    fn spec(&self, kind: ImbalanceKind, cap: u32) -> ConstraintSpec {
        ConstraintSpec::new(kind.id(cap), Tier::Soft, self.weight(cap), ImbalanceRule { kind, cap })
    }

    /// The zero, one or two constraints enforcing a cap pair.
    pub fn constraints(&self, pair: CapPair) -> Vec<ConstraintSpec> {
        let mut specs = Vec::with_capacity(2);
        if let Cap::Capped(c) = pair.cashier {
            specs.push(self.spec(ImbalanceKind::Cashier, c));
        }
        if let Cap::Capped(r) = pair.register {
            specs.push(self.spec(ImbalanceKind::Register, r));
        }
        specs
    }

    /// Every rung `cashier-diff-k` and `register-diff-k`, used as optional
    /// terms when no cap pair could be enforced.
    pub fn fallback_ladder(&self) -> Vec<ConstraintSpec> {
        let rungs = self.ladder_weights.len() as u32;
        let mut specs = Vec::with_capacity(2 * rungs as usize);
        for kind in [ImbalanceKind::Cashier, ImbalanceKind::Register] {
            for cap in 0..rungs {
                specs.push(self.spec(kind, cap));
            }
        }
        specs
    }

    /// Checks a Stage A escalation order.
    ///
    /// Every pair must be capped within `max_cap`, appear once, and no
    /// later pair may be as tight as or tighter than an earlier one.
    pub fn validate_escalation(&self, order: &[CapPair]) -> Result<()> {
        if order.is_empty() {
            return Err(ShiftforgeError::Config("cap escalation is empty".to_string()));
        }
        for pair in order {
            match pair.values() {
                Some((c, r)) if c <= self.max_cap && r <= self.max_cap => {}
                _ => {
                    return Err(ShiftforgeError::Config(format!(
                        "cap pair {pair} must be capped within ({0},{0})",
                        self.max_cap
                    )))
                }
            }
        }
        for (i, earlier) in order.iter().enumerate() {
            for later in &order[i + 1..] {
                if earlier.is_at_least_as_loose_as(*later) {
                    return Err(ShiftforgeError::Config(format!(
                        "cap pair {later} follows the looser or equal pair {earlier}"
                    )));
                }
            }
        }
        Ok(())
    }
}
