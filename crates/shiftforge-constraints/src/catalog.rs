//! The constraint catalog: every spec of a planning run, by tier.

use std::collections::HashSet;

use shiftforge_core::{Result, Roster, ShiftforgeError};

use crate::imbalance::ImbalancePolicy;
use crate::rules::{hard::hard_rules, idealistic::idealistic_rules, soft::soft_rules};
use crate::spec::{ConstraintSpec, Tier};

/// Hard, Soft and Idealistic specs plus the imbalance policy.
///
/// The soft list never contains imbalance constraints; those are produced
/// per cap pair by [`ImbalancePolicy`].
#[derive(Debug, Clone)]
pub struct Catalog {
    hard: Vec<ConstraintSpec>,
    soft: Vec<ConstraintSpec>,
    idealistic: Vec<ConstraintSpec>,
    imbalance: ImbalancePolicy,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// The store's standard rules.
    pub fn standard() -> Self {
        Self {
            hard: hard_rules(),
            soft: soft_rules(),
            idealistic: idealistic_rules(),
            imbalance: ImbalancePolicy::default(),
        }
    }

    /// Builds a catalog from explicit lists.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a spec sits in the wrong tier list
    /// or if two specs, including the imbalance ladder, share an id.
    pub fn new(
        hard: Vec<ConstraintSpec>,
        soft: Vec<ConstraintSpec>,
        idealistic: Vec<ConstraintSpec>,
        imbalance: ImbalancePolicy,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        let ladder = imbalance.fallback_ladder();
        let tiers = [
            (Tier::Hard, &hard),
            (Tier::Soft, &soft),
            (Tier::Idealistic, &idealistic),
            (Tier::Soft, &ladder),
        ];
        for (tier, specs) in tiers {
            for spec in specs {
                if spec.tier() != tier {
                    return Err(ShiftforgeError::Config(format!(
                        "{} is {} but was listed as {}",
                        spec.id(),
                        spec.tier(),
                        tier
                    )));
                }
                if !seen.insert(spec.id().to_string()) {
                    return Err(ShiftforgeError::Config(format!(
                        "constraint id {} is not unique",
                        spec.id()
                    )));
                }
            }
        }
        Ok(Self {
            hard,
            soft,
            idealistic,
            imbalance,
        })
    }

    pub fn hard(&self) -> &[ConstraintSpec] {
        &self.hard
    }

    /// Soft specs excluding imbalance.
    pub fn soft(&self) -> &[ConstraintSpec] {
        &self.soft
    }

    pub fn idealistic(&self) -> &[ConstraintSpec] {
        &self.idealistic
    }

    pub fn imbalance(&self) -> &ImbalancePolicy {
        &self.imbalance
    }

    pub fn get(&self, id: &str) -> Option<&ConstraintSpec> {
        self.hard
            .iter()
            .chain(&self.soft)
            .chain(&self.idealistic)
            .find(|spec| spec.id() == id)
    }

    /// Looks up a spec that is about to be relaxed.
    ///
    /// # Errors
    ///
    /// Relaxing a Hard spec is a programming error and reported as
    /// [`ShiftforgeError::HardRelaxation`]; unknown ids are configuration
    /// errors.
    pub fn relax(&self, id: &str) -> Result<&ConstraintSpec> {
        match self.get(id) {
            Some(spec) if spec.tier() == Tier::Hard => {
                Err(ShiftforgeError::HardRelaxation(id.to_string()))
            }
            Some(spec) => Ok(spec),
            None => Err(ShiftforgeError::Config(format!("unknown constraint {id}"))),
        }
    }

    /// First hard spec the roster makes impossible, with the reason.
    pub fn prove_hard_infeasible(&self, roster: &Roster) -> Option<(String, String)> {
        self.hard.iter().find_map(|spec| {
            spec.prove_infeasible(roster)
                .map(|reason| (spec.id().to_string(), reason))
        })
    }
}

#[cfg(test)]
mod tests;
