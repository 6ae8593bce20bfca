use std::time::Duration;

use shiftforge_config::{EngineConfig, MoveThreadCount};
use shiftforge_constraints::rules::hard::hard_rules;
use shiftforge_constraints::{CapPair, Catalog, ImbalancePolicy, ModelConfiguration};
use shiftforge_core::{
    Employee, HardMediumSoftScore, RegisterTarget, Roster, Shift, ShiftKind, StoreHours,
};
use shiftforge_test::{pair_grid, pair_roster};

use super::*;

fn seeded(threads: MoveThreadCount) -> LocalSearchEngine {
    LocalSearchEngine::new(&EngineConfig {
        random_seed: Some(7),
        move_thread_count: threads,
        ..EngineConfig::default()
    })
}

fn solo_roster() -> Roster {
    let hours = StoreHours::default();
    let solo = Employee::new(
        "Solo",
        "SD",
        Shift::preset(ShiftKind::Early, true, &hours).unwrap(),
    );
    Roster::new(hours, vec![solo], vec![RegisterTarget { count: 1, start: 0 }]).unwrap()
}

#[test]
fn test_hard_only_model_is_solved() {
    let roster = pair_roster();
    let catalog = Catalog::new(hard_rules(), vec![], vec![], ImbalancePolicy::default()).unwrap();
    let model = ModelConfiguration::capped(1, &catalog, CapPair::UNCAPPED);
    let engine = seeded(MoveThreadCount::None);

    let outcome = engine.solve(&SolveRequest::new(&roster, &model, Duration::from_secs(10)));

    assert_eq!(outcome.status, SolveStatus::Optimal);
    let grid = outcome.usable().unwrap();
    assert!(model.broken_mandatory(&roster, grid).is_empty());
    assert_eq!(outcome.score, Some(HardMediumSoftScore::ZERO));
}

#[test]
fn test_static_proof_reports_infeasible() {
    let roster = solo_roster();
    let model = ModelConfiguration::capped(1, &Catalog::standard(), CapPair::capped(0, 0));
    let engine = seeded(MoveThreadCount::Auto);

    let outcome = engine.solve(&SolveRequest::new(&roster, &model, Duration::from_secs(1)));

    assert_eq!(outcome.status, SolveStatus::Infeasible);
    assert!(outcome.usable().is_none());
    let proof = outcome.proof.unwrap();
    assert_eq!(proof.constraint, "cashier-always");
}

#[test]
fn test_warm_start_keeps_frozen_floor() {
    let roster = pair_roster();
    let catalog = Catalog::standard();
    let hint = pair_grid();
    let basic = ModelConfiguration::capped(1, &catalog, CapPair::UNCAPPED);
    let (model, dropped) = basic.refine(2, &roster, &hint, catalog.idealistic());
    assert!(!dropped.is_empty());
    let engine = seeded(MoveThreadCount::Count(2));

    let request =
        SolveRequest::new(&roster, &model, Duration::from_millis(1500)).with_hint(&hint);
    let outcome = engine.solve(&request);

    let grid = outcome.usable().unwrap();
    assert!(model.broken_mandatory(&roster, grid).is_empty());
    assert!(
        model.idealistic_penalty(&roster, grid) <= model.idealistic_penalty(&roster, &hint)
    );
}

#[test]
fn test_mismatched_hint_is_ignored() {
    let roster = pair_roster();
    let catalog = Catalog::standard();
    let model = ModelConfiguration::weighted(1, &catalog);
    let wrong = Assignment::new(1, roster.num_slots());
    let request = SolveRequest::new(&roster, &model, Duration::ZERO).with_hint(&wrong);

    let start = LocalSearchEngine::starting_grid(&request);

    assert_eq!(start.num_employees(), roster.len());
    assert_eq!(start, construct(&roster));
}

#[test]
fn test_hill_climbing_when_history_is_empty() {
    let engine = LocalSearchEngine::new(&EngineConfig {
        late_acceptance_size: 0,
        ..EngineConfig::default()
    });
    let acceptor = engine.acceptor();
    assert!(!acceptor.is_accepted(&HardMediumSoftScore::ZERO, &HardMediumSoftScore::of_hard(-1)));
}
