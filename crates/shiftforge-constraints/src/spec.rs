//! Constraint specs and the rule trait they wrap.

use std::fmt::{self, Debug};
use std::sync::Arc;

use shiftforge_core::{Assignment, Roster};

/// How a constraint is treated by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Always enforced; never relaxed.
    Hard,
    /// Enforced by default; may be relaxed or weighted.
    Soft,
    /// Only optimized once a valid schedule exists.
    Idealistic,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Hard => f.write_str("hard"),
            Tier::Soft => f.write_str("soft"),
            Tier::Idealistic => f.write_str("idealistic"),
        }
    }
}

/// A rule over a complete duty grid.
///
/// Rules are pure functions of the roster and the grid, so they can be
/// shared across threads during parallel move evaluation.
pub trait Rule: Send + Sync + Debug {
    /// Amount by which the grid breaks the rule. Zero means satisfied.
    ///
    /// For idealistic rules this is the penalty to minimize.
    fn violations(&self, roster: &Roster, grid: &Assignment) -> u64;

    /// Returns a reason when the roster alone makes the rule impossible to
    /// satisfy, whatever the grid.
    fn prove_infeasible(&self, _roster: &Roster) -> Option<String> {
        None
    }
}

/// A named rule with its tier and importance weight.
#[derive(Clone)]
pub struct ConstraintSpec {
    id: String,
    tier: Tier,
    weight: u64,
    rule: Arc<dyn Rule>,
}

impl ConstraintSpec {
    pub fn new(id: impl Into<String>, tier: Tier, weight: u64, rule: impl Rule + 'static) -> Self {
        Self {
            id: id.into(),
            tier,
            weight,
            rule: Arc::new(rule),
        }
    }

    pub fn hard(id: impl Into<String>, rule: impl Rule + 'static) -> Self {
        Self::new(id, Tier::Hard, 1, rule)
    }

    pub fn soft(id: impl Into<String>, weight: u64, rule: impl Rule + 'static) -> Self {
        Self::new(id, Tier::Soft, weight, rule)
    }

    pub fn idealistic(id: impl Into<String>, rule: impl Rule + 'static) -> Self {
        Self::new(id, Tier::Idealistic, 1, rule)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Importance used only when the spec is an optional term.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }

    #[inline]
    pub fn violations(&self, roster: &Roster, grid: &Assignment) -> u64 {
        self.rule.violations(roster, grid)
    }

    pub fn is_satisfied(&self, roster: &Roster, grid: &Assignment) -> bool {
        self.violations(roster, grid) == 0
    }

    pub fn prove_infeasible(&self, roster: &Roster) -> Option<String> {
        self.rule.prove_infeasible(roster)
    }
}

impl Debug for ConstraintSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintSpec")
            .field("id", &self.id)
            .field("tier", &self.tier)
            .field("weight", &self.weight)
            .finish()
    }
}

impl PartialEq for ConstraintSpec {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.tier == other.tier && self.weight == other.weight
    }
}
