//! Model configurations: which specs an engine call sees, and how.
//!
//! A `ModelConfiguration` is an immutable value. Each planning stage builds
//! a fresh one with a higher version instead of toggling flags on shared
//! state, so a configuration handed to an engine never changes under it.

use std::fmt;

use shiftforge_core::{Assignment, HardMediumSoftScore, Result, Roster, ShiftforgeError};

use crate::catalog::Catalog;
use crate::imbalance::CapPair;
use crate::spec::{ConstraintSpec, Tier};

/// How the engine treats one spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Must hold. Hard and soft mandatory specs are treated alike.
    Mandatory,
    /// Optional; its weight is earned when satisfied.
    Indicator,
    /// Objective term; weight times violations is minimized.
    Penalty,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Mandatory => f.write_str("mandatory"),
            Role::Indicator => f.write_str("indicator"),
            Role::Penalty => f.write_str("penalty"),
        }
    }
}

/// A spec and its role in one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    pub spec: ConstraintSpec,
    pub role: Role,
}

/// One immutable selection of specs handed to the engine.
#[derive(Debug, Clone)]
pub struct ModelConfiguration {
    version: u64,
    label: String,
    caps: Option<CapPair>,
    entries: Vec<ModelEntry>,
}

impl ModelConfiguration {
    fn new(version: u64, label: impl Into<String>, caps: Option<CapPair>) -> Self {
        Self {
            version,
            label: label.into(),
            caps,
            entries: Vec::new(),
        }
    }

    fn push(&mut self, specs: impl IntoIterator<Item = ConstraintSpec>, role: Role) {
        self.entries
            .extend(specs.into_iter().map(|spec| ModelEntry { spec, role }));
    }

    /// Hard and soft specs plus the cap pair's imbalance specs, all
    /// mandatory.
    pub fn capped(version: u64, catalog: &Catalog, caps: CapPair) -> Self {
        let mut model = Self::new(version, format!("caps {caps}"), Some(caps));
        model.push(catalog.hard().iter().cloned(), Role::Mandatory);
        model.push(catalog.soft().iter().cloned(), Role::Mandatory);
        model.push(catalog.imbalance().constraints(caps), Role::Mandatory);
        model
    }

    /// Hard specs mandatory; every soft spec and the whole imbalance
    /// ladder as weighted indicators.
    pub fn weighted(version: u64, catalog: &Catalog) -> Self {
        let mut model = Self::new(version, "weighted", None);
        model.push(catalog.hard().iter().cloned(), Role::Mandatory);
        model.push(catalog.soft().iter().cloned(), Role::Indicator);
        model.push(catalog.imbalance().fallback_ladder(), Role::Indicator);
        model
    }

    /// Freezes the soft floor reached by `basic` and adds idealistic
    /// penalties.
    ///
    /// Hard specs stay mandatory. Every soft spec of this configuration
    /// that `basic` satisfies becomes mandatory; the others are dropped.
    /// Returns the new configuration and the ids of the dropped specs.
    pub fn refine(
        &self,
        version: u64,
        roster: &Roster,
        basic: &Assignment,
        idealistic: &[ConstraintSpec],
    ) -> (Self, Vec<String>) {
        let mut model = Self::new(version, "refinement", self.caps);
        let mut dropped = Vec::new();
        for entry in &self.entries {
            match entry.spec.tier() {
                Tier::Hard => model.push([entry.spec.clone()], Role::Mandatory),
                Tier::Soft if entry.spec.is_satisfied(roster, basic) => {
                    model.push([entry.spec.clone()], Role::Mandatory)
                }
                Tier::Soft => dropped.push(entry.spec.id().to_string()),
                Tier::Idealistic => {}
            }
        }
        model.push(idealistic.iter().cloned(), Role::Penalty);
        (model, dropped)
    }

    /// Removes a relaxable spec, producing the next version.
    ///
    /// # Errors
    ///
    /// Returns [`ShiftforgeError::HardRelaxation`] for Hard specs.
    pub fn without(&self, version: u64, id: &str) -> Result<Self> {
        if let Some(entry) = self.entry(id) {
            if entry.spec.tier() == Tier::Hard {
                return Err(ShiftforgeError::HardRelaxation(id.to_string()));
            }
        }
        let mut model = self.clone();
        model.version = version;
        model.entries.retain(|e| e.spec.id() != id);
        Ok(model)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The cap pair enforced by this configuration, if any.
    pub fn caps(&self) -> Option<CapPair> {
        self.caps
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|e| e.spec.id() == id)
    }

    pub fn role_of(&self, id: &str) -> Option<Role> {
        self.entry(id).map(|e| e.role)
    }

    fn with_role(&self, role: Role) -> impl Iterator<Item = &ConstraintSpec> {
        self.entries
            .iter()
            .filter(move |e| e.role == role)
            .map(|e| &e.spec)
    }

    /// Mandatory Hard-tier specs.
    pub fn hard_constraints(&self) -> impl Iterator<Item = &ConstraintSpec> {
        self.with_role(Role::Mandatory)
            .filter(|s| s.tier() == Tier::Hard)
    }

    /// Mandatory specs outside the Hard tier.
    pub fn soft_constraints(&self) -> impl Iterator<Item = &ConstraintSpec> {
        self.with_role(Role::Mandatory)
            .filter(|s| s.tier() != Tier::Hard)
    }

    /// Every mandatory spec.
    pub fn mandatory(&self) -> impl Iterator<Item = &ConstraintSpec> {
        self.with_role(Role::Mandatory)
    }

    /// Indicator and penalty entries.
    pub fn objective_terms(&self) -> impl Iterator<Item = &ModelEntry> {
        self.entries.iter().filter(|e| e.role != Role::Mandatory)
    }

    pub fn has_objective(&self) -> bool {
        self.objective_terms().next().is_some()
    }

    /// Scores a grid against this configuration.
    ///
    /// Hard level: negated mandatory violations. Medium: negated weight of
    /// unsatisfied indicators. Soft: negated weighted penalties.
    pub fn score(&self, roster: &Roster, grid: &Assignment) -> HardMediumSoftScore {
        let (mut hard, mut medium, mut soft) = (0u64, 0u64, 0u64);
        for entry in &self.entries {
            let v = entry.spec.violations(roster, grid);
            match entry.role {
                Role::Mandatory => hard += v,
                Role::Indicator if v > 0 => medium += entry.spec.weight(),
                Role::Indicator => {}
                Role::Penalty => soft += entry.spec.weight() * v,
            }
        }
        HardMediumSoftScore::from_penalties(hard, medium, soft)
    }

    /// Ids of mandatory specs the grid breaks.
    pub fn broken_mandatory(&self, roster: &Roster, grid: &Assignment) -> Vec<String> {
        self.mandatory()
            .filter(|s| !s.is_satisfied(roster, grid))
            .map(|s| s.id().to_string())
            .collect()
    }

    /// Ids of soft specs in this configuration the grid leaves unsatisfied.
    pub fn unsatisfied_soft(&self, roster: &Roster, grid: &Assignment) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.spec.tier() == Tier::Soft && !e.spec.is_satisfied(roster, grid))
            .map(|e| e.spec.id().to_string())
            .collect()
    }

    /// Sum of idealistic penalties of the grid.
    pub fn idealistic_penalty(&self, roster: &Roster, grid: &Assignment) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.role == Role::Penalty)
            .map(|e| e.spec.weight() * e.spec.violations(roster, grid))
            .sum()
    }
}

impl fmt::Display for ModelConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{} {}", self.version, self.label)
    }
}

#[cfg(test)]
mod tests;
