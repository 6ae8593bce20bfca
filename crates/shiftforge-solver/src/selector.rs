//! Verifies stage results and assembles the final [`Schedule`].

use std::fmt;

use serde::Serialize;
use shiftforge_constraints::{
    CapPair, Catalog, ImbalanceKind, ImbalanceRule, ModelConfiguration,
};
use shiftforge_core::{Assignment, Result, Roster, ShiftforgeError};

use crate::engine::{SolveOutcome, SolveStatus};

/// Orchestrator stage that produced a schedule or made an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Stage A: escalating imbalance caps.
    Capped,
    /// Stage B: weighted fallback.
    Weighted,
    /// Stage C: idealistic refinement.
    Refinement,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Capped => f.write_str("capped"),
            Stage::Weighted => f.write_str("weighted"),
            Stage::Refinement => f.write_str("refinement"),
        }
    }
}

/// One engine call made while planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    pub stage: Stage,
    pub version: u64,
    pub label: String,
    pub caps: Option<CapPair>,
    pub limit_ms: u64,
    pub elapsed_ms: u64,
    pub status: SolveStatus,
}

/// What Stage C did to the basic schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Refinement {
    /// The refined grid lowered the idealistic penalty and replaced the
    /// basic schedule.
    Improved { from: u64, to: u64 },
    /// The refined grid was valid but no better.
    Unchanged,
    /// The engine returned nothing usable, or a grid that broke the frozen
    /// floor.
    Rejected { reason: String },
    /// Refinement was disabled.
    Skipped,
}

impl fmt::Display for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refinement::Improved { from, to } => write!(f, "improved {from} -> {to}"),
            Refinement::Unchanged => f.write_str("unchanged"),
            Refinement::Rejected { reason } => write!(f, "rejected: {reason}"),
            Refinement::Skipped => f.write_str("skipped"),
        }
    }
}

/// The verified result of Stage A or B.
#[derive(Debug, Clone)]
pub struct BasicSchedule {
    pub assignment: Assignment,
    pub status: SolveStatus,
    pub stage: Stage,
    /// The configuration the schedule was solved under.
    pub model: ModelConfiguration,
}

/// The final plan for one day and how it came about.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    pub assignment: Assignment,
    pub status: SolveStatus,
    /// Stage that produced the basic schedule.
    pub origin: Stage,
    /// Cap pair enforced when the origin is Stage A.
    pub caps: Option<CapPair>,
    /// Catalog soft constraints the final grid leaves unsatisfied.
    pub unsatisfied_soft: Vec<String>,
    pub cashier_spread: u64,
    pub register_spread: u64,
    pub idealistic_penalty: u64,
    pub refinement: Refinement,
    pub attempts: Vec<AttemptRecord>,
}

impl Schedule {
    /// Returns true if every catalog soft constraint holds.
    pub fn is_fully_satisfied(&self) -> bool {
        self.unsatisfied_soft.is_empty()
    }
}

/// Checks engine output against the catalog and picks the final grid.
#[derive(Debug, Clone, Copy)]
pub struct ResultSelector<'a> {
    roster: &'a Roster,
    catalog: &'a Catalog,
}

impl<'a> ResultSelector<'a> {
    pub fn new(roster: &'a Roster, catalog: &'a Catalog) -> Self {
        Self { roster, catalog }
    }

    /// Hard constraints the grid breaks.
    pub fn broken_hard(&self, grid: &Assignment) -> Vec<String> {
        self.catalog
            .hard()
            .iter()
            .filter(|spec| !spec.is_satisfied(self.roster, grid))
            .map(|spec| spec.id().to_string())
            .collect()
    }

    /// Sum of the catalog's idealistic penalties for a grid.
    pub fn idealistic_penalty(&self, grid: &Assignment) -> u64 {
        self.catalog
            .idealistic()
            .iter()
            .map(|spec| spec.weight() * spec.violations(self.roster, grid))
            .sum()
    }

    /// Accepts a Stage A or B outcome as the basic schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ShiftforgeError::Internal`] if the outcome carries no grid
    /// or if the grid breaks a hard constraint; engines must never report
    /// such a grid as usable.
    pub fn verify_basic(
        &self,
        stage: Stage,
        model: ModelConfiguration,
        outcome: SolveOutcome,
    ) -> Result<BasicSchedule> {
        let status = outcome.status;
        let assignment = match outcome.assignment {
            Some(grid) if status.is_usable() => grid,
            _ => {
                return Err(ShiftforgeError::Internal(format!(
                    "{stage} stage accepted a {status} outcome without a schedule"
                )))
            }
        };
        if assignment.num_employees() != self.roster.len()
            || assignment.num_slots() != self.roster.num_slots()
        {
            return Err(ShiftforgeError::Internal(format!(
                "{model} returned a {}x{} grid for a {}x{} roster",
                assignment.num_employees(),
                assignment.num_slots(),
                self.roster.len(),
                self.roster.num_slots()
            )));
        }
        let broken = self.broken_hard(&assignment);
        if !broken.is_empty() {
            return Err(ShiftforgeError::Internal(format!(
                "{model} returned a {status} schedule breaking {}",
                broken.join(", ")
            )));
        }
        Ok(BasicSchedule {
            assignment,
            status,
            stage,
            model,
        })
    }

    /// Judges a Stage C outcome against the basic schedule it started from.
    ///
    /// `frozen` is the refinement configuration; every mandatory entry in it
    /// must still hold for the refined grid to be considered.
    pub fn judge_refinement(
        &self,
        basic: &Assignment,
        frozen: &ModelConfiguration,
        outcome: &SolveOutcome,
    ) -> Refinement {
        let Some(grid) = outcome.usable() else {
            return Refinement::Rejected {
                reason: format!("engine returned {} without a schedule", outcome.status),
            };
        };
        let broken = frozen.broken_mandatory(self.roster, grid);
        if !broken.is_empty() {
            return Refinement::Rejected {
                reason: format!("refined grid breaks {}", broken.join(", ")),
            };
        }
        let from = self.idealistic_penalty(basic);
        let to = self.idealistic_penalty(grid);
        if to < from {
            Refinement::Improved { from, to }
        } else {
            Refinement::Unchanged
        }
    }

    /// Builds the final schedule.
    ///
    /// `refined` is the refinement configuration and its outcome, or `None`
    /// when Stage C did not run. The basic schedule is kept unless the
    /// refinement improved it. For a weighted basic schedule the unmet
    /// imbalance ladder rungs are listed with the unsatisfied soft ids.
    pub fn finish(
        &self,
        basic: BasicSchedule,
        refined: Option<(&ModelConfiguration, SolveOutcome)>,
        attempts: Vec<AttemptRecord>,
    ) -> Schedule {
        let (assignment, status, refinement) = match refined {
            None => (basic.assignment, basic.status, Refinement::Skipped),
            Some((frozen, outcome)) => {
                match self.judge_refinement(&basic.assignment, frozen, &outcome) {
                    verdict @ Refinement::Improved { .. } => match outcome.assignment {
                        Some(grid) => (grid, outcome.status, verdict),
                        None => (basic.assignment, basic.status, Refinement::Unchanged),
                    },
                    verdict => (basic.assignment, basic.status, verdict),
                }
            }
        };

        // A weighted basic schedule also reports the ladder rungs it missed.
        let ladder = match basic.stage {
            Stage::Weighted => self.catalog.imbalance().fallback_ladder(),
            _ => Vec::new(),
        };
        let unsatisfied_soft = self
            .catalog
            .soft()
            .iter()
            .chain(&ladder)
            .filter(|spec| !spec.is_satisfied(self.roster, &assignment))
            .map(|spec| spec.id().to_string())
            .collect();
        let spread = |kind| ImbalanceRule { kind, cap: 0 }.spread(self.roster, &assignment);

        Schedule {
            cashier_spread: spread(ImbalanceKind::Cashier),
            register_spread: spread(ImbalanceKind::Register),
            idealistic_penalty: self.idealistic_penalty(&assignment),
            unsatisfied_soft,
            status,
            origin: basic.stage,
            caps: basic.model.caps(),
            refinement,
            attempts,
            assignment,
        }
    }
}

#[cfg(test)]
mod tests;
