//! Constraints for shiftforge.
//!
//! This crate owns everything the planner knows about rules:
//! - [`ConstraintSpec`]: a named rule tagged with its tier and weight
//! - [`Catalog`]: the Hard, Soft and Idealistic specs of a planning run
//! - [`ImbalancePolicy`]: caps on per-employee cashier and register counts
//! - [`ModelConfiguration`]: an immutable, versioned selection of specs
//!   and the role each plays in one engine call
//!
//! Rules are evaluated directly against an [`Assignment`]; how an engine
//! searches for a grid is the concern of `shiftforge-solver`.
//!
//! [`Assignment`]: shiftforge_core::Assignment

pub mod catalog;
pub mod imbalance;
pub mod model;
pub mod rules;
pub mod spec;

pub use catalog::Catalog;
pub use imbalance::{
    Cap, CapPair, ImbalanceKind, ImbalancePolicy, ImbalanceRule, DEFAULT_ESCALATION,
};
pub use model::{ModelConfiguration, ModelEntry, Role};
pub use spec::{ConstraintSpec, Rule, Tier};
