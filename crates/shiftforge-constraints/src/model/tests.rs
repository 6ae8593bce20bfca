//! Tests for model configurations.

use super::*;
use shiftforge_test::{pair_grid, pair_roster};

#[test]
fn test_capped_model_is_all_mandatory() {
    let catalog = Catalog::standard();
    let model = ModelConfiguration::capped(1, &catalog, CapPair::capped(1, 0));
    assert!(!model.has_objective());
    assert_eq!(model.caps(), Some(CapPair::capped(1, 0)));
    assert_eq!(model.role_of("cashier-diff-1"), Some(Role::Mandatory));
    assert_eq!(model.role_of("register-diff-0"), Some(Role::Mandatory));
    assert_eq!(model.hard_constraints().count(), catalog.hard().len());
    assert_eq!(model.soft_constraints().count(), catalog.soft().len() + 2);
    assert_eq!(model.to_string(), "v1 caps (1,0)");
}

#[test]
fn test_weighted_model_roles() {
    let catalog = Catalog::standard();
    let model = ModelConfiguration::weighted(2, &catalog);
    assert_eq!(model.caps(), None);
    assert_eq!(model.role_of("cashier-always"), Some(Role::Mandatory));
    assert_eq!(model.role_of("lunch-balance"), Some(Role::Indicator));
    assert_eq!(model.role_of("register-diff-4"), Some(Role::Indicator));
    assert_eq!(model.role_of("distribute-breaks-lunches"), None);
    assert_eq!(model.soft_constraints().count(), 0);
    assert_eq!(
        model.objective_terms().count(),
        catalog.soft().len() + catalog.imbalance().fallback_ladder().len()
    );
}

#[test]
fn test_weighted_score_levels() {
    let roster = pair_roster();
    let grid = pair_grid();
    let model = ModelConfiguration::weighted(2, &Catalog::standard());
    let score = model.score(&roster, &grid);
    assert_eq!(score.hard(), 0);
    // break-lunch-gap-3, break-lunch-gap-4 and register-max-4-in-16 at least.
    assert!(score.medium() <= -(10 + 4 + 4));
    assert_eq!(score.soft(), 0);
    assert!(model.broken_mandatory(&roster, &grid).is_empty());
}

#[test]
fn test_refine_freezes_satisfied_soft() {
    let roster = pair_roster();
    let grid = pair_grid();
    let catalog = Catalog::standard();
    let basic = ModelConfiguration::capped(1, &catalog, CapPair::capped(1, 0));
    let (refined, dropped) = basic.refine(2, &roster, &grid, catalog.idealistic());

    assert!(dropped.contains(&"break-lunch-gap-3".to_string()));
    assert!(dropped.contains(&"break-lunch-gap-4".to_string()));
    assert!(!dropped.contains(&"lunch-balance".to_string()));
    assert_eq!(refined.role_of("lunch-balance"), Some(Role::Mandatory));
    assert_eq!(refined.role_of("break-lunch-gap-3"), None);
    assert_eq!(
        refined.role_of("distribute-breaks-lunches"),
        Some(Role::Penalty)
    );
    assert_eq!(refined.caps(), Some(CapPair::capped(1, 0)));
    assert_eq!(refined.hard_constraints().count(), catalog.hard().len());

    // The grid that set the floor satisfies every frozen spec.
    let score = refined.score(&roster, &grid);
    assert_eq!(score.hard(), 0);
    let penalty = refined.idealistic_penalty(&roster, &grid);
    assert!(penalty > 0);
    assert_eq!(score.soft(), -(penalty as i64));
    assert!(refined.unsatisfied_soft(&roster, &grid).is_empty());
}

#[test]
fn test_without() {
    let catalog = Catalog::standard();
    let model = ModelConfiguration::capped(1, &catalog, CapPair::capped(0, 0));

    let err = model.without(2, "register-count").unwrap_err();
    assert!(matches!(err, ShiftforgeError::HardRelaxation(_)));

    let relaxed = model.without(2, "lunch-balance").unwrap();
    assert_eq!(relaxed.version(), 2);
    assert_eq!(relaxed.role_of("lunch-balance"), None);
    assert_eq!(relaxed.entries().len(), model.entries().len() - 1);
    // The original is untouched.
    assert_eq!(model.role_of("lunch-balance"), Some(Role::Mandatory));
}
