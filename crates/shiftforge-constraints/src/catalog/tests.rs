//! Tests for the constraint catalog.

use super::*;
use crate::rules::hard::ShiftWindow;
use shiftforge_core::{Employee, RegisterTarget, Shift, ShiftKind, StoreHours};
use shiftforge_test::pair_roster;

#[test]
fn test_standard_catalog_is_consistent() {
    let standard = Catalog::standard();
    let rebuilt = Catalog::new(
        standard.hard().to_vec(),
        standard.soft().to_vec(),
        standard.idealistic().to_vec(),
        ImbalancePolicy::default(),
    );
    assert!(rebuilt.is_ok());
    assert_eq!(standard.hard().len(), 10);
    assert_eq!(standard.idealistic().len(), 3);
    assert!(standard.soft().iter().all(|s| {
        !s.id().starts_with("cashier-diff-") && !s.id().starts_with("register-diff-")
    }));
    assert!(standard.get("coverage-diff-break").is_some());
}

#[test]
fn test_relaxing_hard_is_an_error() {
    let catalog = Catalog::standard();
    let err = catalog.relax("cashier-always").unwrap_err();
    assert!(matches!(err, ShiftforgeError::HardRelaxation(_)));
    assert!(catalog.relax("lunch-balance").is_ok());
    assert!(matches!(
        catalog.relax("no-such-rule"),
        Err(ShiftforgeError::Config(_))
    ));
}

#[test]
fn test_wrong_tier_rejected() {
    let misplaced = vec![ConstraintSpec::soft("shift-window", 1, ShiftWindow)];
    let err = Catalog::new(misplaced, vec![], vec![], ImbalancePolicy::default()).unwrap_err();
    assert!(err.to_string().contains("shift-window"));
}

#[test]
fn test_ladder_ids_reserved() {
    let clash = vec![ConstraintSpec::soft("cashier-diff-0", 1, ShiftWindow)];
    assert!(Catalog::new(vec![], clash, vec![], ImbalancePolicy::default()).is_err());
}

#[test]
fn test_hard_proof() {
    let catalog = Catalog::standard();
    assert_eq!(catalog.prove_hard_infeasible(&pair_roster()), None);

    let hours = StoreHours::default();
    let solo = Employee::new("Solo", "SD", Shift::preset(ShiftKind::Early, true, &hours).unwrap());
    let roster = Roster::new(hours, vec![solo], vec![RegisterTarget { count: 1, start: 0 }]).unwrap();
    let (id, reason) = catalog.prove_hard_infeasible(&roster).unwrap();
    assert_eq!(id, "cashier-always");
    assert!(reason.contains("6:30"));
}
