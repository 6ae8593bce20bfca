//! Tests for the result selector.

use std::time::Duration;

use shiftforge_constraints::rules::hard::hard_rules;
use shiftforge_constraints::{ConstraintSpec, ImbalancePolicy, Rule};
use shiftforge_core::{Duty, HardMediumSoftScore};
use shiftforge_test::{pair_grid, pair_roster};

use super::*;

/// Penalizes every cashier slot of the first employee.
#[derive(Debug)]
struct FirstRowCashier;

impl Rule for FirstRowCashier {
    fn violations(&self, _roster: &Roster, grid: &Assignment) -> u64 {
        grid.count_in_row(0, Duty::Cashier) as u64
    }
}

fn hard_catalog() -> Catalog {
    Catalog::new(
        hard_rules(),
        vec![],
        vec![ConstraintSpec::idealistic("first-row-cashier", FirstRowCashier)],
        ImbalancePolicy::default(),
    )
    .unwrap()
}

/// pair_grid with Avery and Blake trading duties at 3:00.
fn swapped_grid() -> Assignment {
    let mut grid = pair_grid();
    grid.set(0, 20, Duty::Cashier);
    grid.set(1, 20, Duty::Other);
    grid
}

fn feasible(grid: Assignment) -> SolveOutcome {
    SolveOutcome::solved(
        SolveStatus::Feasible,
        grid,
        HardMediumSoftScore::ZERO,
        Duration::from_millis(20),
    )
}

fn basic(catalog: &Catalog, grid: Assignment) -> BasicSchedule {
    BasicSchedule {
        assignment: grid,
        status: SolveStatus::Feasible,
        stage: Stage::Capped,
        model: ModelConfiguration::capped(1, catalog, CapPair::capped(0, 1)),
    }
}

#[test]
fn test_verify_basic_accepts_hard_valid_grid() {
    let roster = pair_roster();
    let catalog = Catalog::standard();
    let selector = ResultSelector::new(&roster, &catalog);
    let model = ModelConfiguration::weighted(3, &catalog);

    let basic = selector
        .verify_basic(Stage::Weighted, model, feasible(pair_grid()))
        .unwrap();

    assert_eq!(basic.stage, Stage::Weighted);
    assert_eq!(basic.model.version(), 3);
}

#[test]
fn test_verify_basic_rejects_unusable_and_broken() {
    let roster = pair_roster();
    let catalog = Catalog::standard();
    let selector = ResultSelector::new(&roster, &catalog);
    let model = || ModelConfiguration::capped(1, &catalog, CapPair::capped(0, 0));

    let unknown = SolveOutcome::unknown(None, Duration::from_secs(15));
    let err = selector
        .verify_basic(Stage::Capped, model(), unknown)
        .unwrap_err();
    assert!(matches!(err, ShiftforgeError::Internal(_)));

    let mut broken = pair_grid();
    broken.set(0, 0, Duty::Other);
    let err = selector
        .verify_basic(Stage::Capped, model(), feasible(broken))
        .unwrap_err();
    assert!(err.to_string().contains("cashier-always"));
}

#[test]
fn test_refinement_improves() {
    let roster = pair_roster();
    let catalog = hard_catalog();
    let selector = ResultSelector::new(&roster, &catalog);
    let start = basic(&catalog, swapped_grid());
    let (frozen, _) = start
        .model
        .refine(2, &roster, &start.assignment, catalog.idealistic());

    let verdict = selector.judge_refinement(&start.assignment, &frozen, &feasible(pair_grid()));

    assert_eq!(verdict, Refinement::Improved { from: 18, to: 17 });
}

#[test]
fn test_refinement_unchanged_and_rejected() {
    let roster = pair_roster();
    let catalog = hard_catalog();
    let selector = ResultSelector::new(&roster, &catalog);
    let start = basic(&catalog, pair_grid());
    let (frozen, _) = start
        .model
        .refine(2, &roster, &start.assignment, catalog.idealistic());

    let same = selector.judge_refinement(&start.assignment, &frozen, &feasible(pair_grid()));
    assert_eq!(same, Refinement::Unchanged);

    let worse = selector.judge_refinement(&start.assignment, &frozen, &feasible(swapped_grid()));
    assert_eq!(worse, Refinement::Unchanged);

    let mut broken = pair_grid();
    broken.set(0, 0, Duty::Other);
    let verdict = selector.judge_refinement(&start.assignment, &frozen, &feasible(broken));
    assert!(matches!(verdict, Refinement::Rejected { ref reason } if reason.contains("cashier-always")));

    let timed_out = SolveOutcome::unknown(None, Duration::from_secs(60));
    let verdict = selector.judge_refinement(&start.assignment, &frozen, &timed_out);
    assert!(matches!(verdict, Refinement::Rejected { .. }));
}

#[test]
fn test_finish_keeps_improved_grid() {
    let roster = pair_roster();
    let catalog = hard_catalog();
    let selector = ResultSelector::new(&roster, &catalog);
    let start = basic(&catalog, swapped_grid());
    let (frozen, _) = start
        .model
        .refine(2, &roster, &start.assignment, catalog.idealistic());
    let outcome = SolveOutcome::solved(
        SolveStatus::Optimal,
        pair_grid(),
        HardMediumSoftScore::of_soft(-17),
        Duration::from_secs(1),
    );

    let schedule = selector.finish(start, Some((&frozen, outcome)), vec![]);

    assert_eq!(schedule.assignment, pair_grid());
    assert_eq!(schedule.status, SolveStatus::Optimal);
    assert_eq!(schedule.origin, Stage::Capped);
    assert_eq!(schedule.caps, Some(CapPair::capped(0, 1)));
    assert_eq!(schedule.idealistic_penalty, 17);
    assert!(schedule.is_fully_satisfied());
}

#[test]
fn test_finish_falls_back_to_basic() {
    let roster = pair_roster();
    let catalog = hard_catalog();
    let selector = ResultSelector::new(&roster, &catalog);
    let start = basic(&catalog, swapped_grid());
    let (frozen, _) = start
        .model
        .refine(2, &roster, &start.assignment, catalog.idealistic());
    let timed_out = SolveOutcome::unknown(None, Duration::from_secs(60));

    let schedule = selector.finish(start, Some((&frozen, timed_out)), vec![]);

    assert_eq!(schedule.assignment, swapped_grid());
    assert_eq!(schedule.status, SolveStatus::Feasible);
    assert!(matches!(schedule.refinement, Refinement::Rejected { .. }));
    assert_eq!(schedule.idealistic_penalty, 18);
}

#[test]
fn test_finish_reports_soft_metadata() {
    let roster = pair_roster();
    let catalog = Catalog::standard();
    let selector = ResultSelector::new(&roster, &catalog);
    let start = BasicSchedule {
        assignment: pair_grid(),
        status: SolveStatus::Feasible,
        stage: Stage::Weighted,
        model: ModelConfiguration::weighted(8, &catalog),
    };

    let schedule = selector.finish(start, None, vec![]);

    assert_eq!(schedule.refinement, Refinement::Skipped);
    assert_eq!(schedule.caps, None);
    assert!(schedule.unsatisfied_soft.iter().any(|id| id == "break-lunch-gap-3"));
    assert!(!schedule.unsatisfied_soft.iter().any(|id| id == "lunch-balance"));
    // Avery 17 cashier slots, Blake 23.
    assert_eq!(schedule.cashier_spread, 6);
    for id in ["cashier-diff-0", "cashier-diff-4"] {
        assert!(schedule.unsatisfied_soft.iter().any(|u| u == id), "{id} missing");
    }
}

#[test]
fn test_finish_capped_origin_omits_ladder() {
    let roster = pair_roster();
    let catalog = Catalog::standard();
    let selector = ResultSelector::new(&roster, &catalog);
    let start = BasicSchedule {
        assignment: pair_grid(),
        status: SolveStatus::Feasible,
        stage: Stage::Capped,
        model: ModelConfiguration::capped(7, &catalog, CapPair::capped(2, 2)),
    };

    let schedule = selector.finish(start, None, vec![]);

    assert_eq!(schedule.cashier_spread, 6);
    assert!(!schedule
        .unsatisfied_soft
        .iter()
        .any(|id| id.starts_with("cashier-diff-") || id.starts_with("register-diff-")));
}
