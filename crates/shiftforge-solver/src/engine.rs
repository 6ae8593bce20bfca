//! The solving engine contract.
//!
//! An engine receives a roster and a [`ModelConfiguration`], treats every
//! mandatory entry alike, optimizes the objective terms if there are any,
//! and reports one of four statuses before the deadline passes.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shiftforge_constraints::{ConstraintSpec, ModelConfiguration, ModelEntry};
use shiftforge_core::{Assignment, HardMediumSoftScore, Roster};

/// Outcome classification of one engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Every mandatory spec holds and no objective term can improve.
    Optimal,
    /// Every mandatory spec holds.
    Feasible,
    /// Proven that no grid satisfies the mandatory specs.
    Infeasible,
    /// Nothing proven and nothing found before the deadline.
    Unknown,
}

impl SolveStatus {
    /// Returns true if the outcome carries a schedule.
    pub fn is_usable(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => f.write_str("optimal"),
            SolveStatus::Feasible => f.write_str("feasible"),
            SolveStatus::Infeasible => f.write_str("infeasible"),
            SolveStatus::Unknown => f.write_str("unknown"),
        }
    }
}

/// The constraint that made a model infeasible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfeasibilityProof {
    pub constraint: String,
    pub reason: String,
}

/// One engine call.
#[derive(Debug, Clone, Copy)]
pub struct SolveRequest<'a> {
    pub roster: &'a Roster,
    pub model: &'a ModelConfiguration,
    pub time_limit: Duration,
    /// Starting grid; engines that cannot warm start ignore it.
    pub hint: Option<&'a Assignment>,
}

impl<'a> SolveRequest<'a> {
    pub fn new(roster: &'a Roster, model: &'a ModelConfiguration, time_limit: Duration) -> Self {
        Self {
            roster,
            model,
            time_limit,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: &'a Assignment) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Mandatory Hard-tier specs.
    pub fn hard_constraints(&self) -> impl Iterator<Item = &'a ConstraintSpec> {
        self.model.hard_constraints()
    }

    /// Mandatory specs outside the Hard tier. Engines treat them exactly
    /// like the hard ones.
    pub fn soft_constraints(&self) -> impl Iterator<Item = &'a ConstraintSpec> {
        self.model.soft_constraints()
    }

    /// Indicator and penalty terms; empty for a pure feasibility search.
    pub fn objective_terms(&self) -> impl Iterator<Item = &'a ModelEntry> {
        self.model.objective_terms()
    }
}

/// Result of one engine call.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Present exactly when the status is usable.
    pub assignment: Option<Assignment>,
    pub score: Option<HardMediumSoftScore>,
    /// Present for proven infeasibility.
    pub proof: Option<InfeasibilityProof>,
    pub elapsed: Duration,
}

impl SolveOutcome {
    /// A usable outcome; `status` must be Optimal or Feasible.
    pub fn solved(
        status: SolveStatus,
        assignment: Assignment,
        score: HardMediumSoftScore,
        elapsed: Duration,
    ) -> Self {
        Self {
            status,
            assignment: Some(assignment),
            score: Some(score),
            proof: None,
            elapsed,
        }
    }

    pub fn infeasible(proof: InfeasibilityProof, elapsed: Duration) -> Self {
        Self {
            status: SolveStatus::Infeasible,
            assignment: None,
            score: None,
            proof: Some(proof),
            elapsed,
        }
    }

    /// Deadline reached without a usable grid.
    pub fn unknown(best: Option<HardMediumSoftScore>, elapsed: Duration) -> Self {
        Self {
            status: SolveStatus::Unknown,
            assignment: None,
            score: best,
            proof: None,
            elapsed,
        }
    }

    /// The assignment, if the status is usable.
    pub fn usable(&self) -> Option<&Assignment> {
        self.assignment.as_ref().filter(|_| self.status.is_usable())
    }
}

/// A constraint-solving engine.
pub trait SolvingEngine: Send + Sync {
    /// Solves one request, returning by `request.time_limit`.
    fn solve(&self, request: &SolveRequest<'_>) -> SolveOutcome;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

impl<E: SolvingEngine + ?Sized> SolvingEngine for Box<E> {
    fn solve(&self, request: &SolveRequest<'_>) -> SolveOutcome {
        (**self).solve(request)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
