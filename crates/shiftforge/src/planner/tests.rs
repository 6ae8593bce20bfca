//! End-to-end planning tests.

use std::io::Write;
use std::time::Duration;

use shiftforge_core::{HardMediumSoftScore, ShiftforgeError};
use shiftforge_solver::{ResultSelector, ScriptedEngine, SolveOutcome, SolveRequest, SolveStatus};
use shiftforge_test::{pair_grid, pair_roster};

use super::*;
use crate::{Refinement, Stage};

const PAIR: &str = r#"
    [employees]
    Avery = { full_time = true, department = "SD" }
    Blake = { full_time = true, department = "EB" }
    Solo = { full_time = true, department = "SD" }

    [days.monday]
    shifts = [
        { name = "Avery", shift = "E" },
        { name = "Blake", shift = "L" },
    ]
    register_targets = [{ count = 1, start = "10:00" }]

    [days.tuesday]
    shifts = [{ name = "Solo", shift = "E" }]
    register_targets = [{ count = 1, start = "10:00" }]
"#;

fn quick_config() -> PlannerConfig {
    let mut config = PlannerConfig::new()
        .with_random_seed(7)
        .with_stage_seconds(1, 5, 1);
    config.relaxation.cap_escalation = vec![[2, 2]];
    config
}

#[test]
fn test_plan_with_scripted_engine() {
    let engine = ScriptedEngine::new(|request: &SolveRequest<'_>| {
        if request.hint.is_some() {
            return SolveOutcome::unknown(None, request.time_limit);
        }
        SolveOutcome::solved(
            SolveStatus::Optimal,
            pair_grid(),
            HardMediumSoftScore::ZERO,
            Duration::from_millis(3),
        )
    });

    let schedule = plan_with(engine, &pair_roster(), RelaxationConfig::default()).unwrap();

    assert_eq!(schedule.origin, Stage::Capped);
    assert_eq!(schedule.status, SolveStatus::Optimal);
    assert_eq!(schedule.assignment, pair_grid());
    assert!(matches!(schedule.refinement, Refinement::Rejected { .. }));
}

#[test]
fn test_plan_day_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(PAIR.as_bytes()).unwrap();
    let roster_config = RosterConfig::load(file.path()).unwrap();

    let (roster, schedule) = plan_day(&roster_config, &quick_config(), Weekday::Monday).unwrap();

    assert_eq!(roster.len(), 2);
    assert!(schedule.status.is_usable());
    assert!(!schedule.attempts.is_empty());
    let catalog = Catalog::standard();
    let selector = ResultSelector::new(&roster, &catalog);
    assert!(selector.broken_hard(&schedule.assignment).is_empty());
}

#[test]
fn test_lone_cashier_is_hard_infeasible() {
    let roster_config = RosterConfig::from_toml_str(PAIR).unwrap();

    let err = plan_day(&roster_config, &quick_config(), Weekday::Tuesday).unwrap_err();

    assert!(matches!(err, ShiftforgeError::HardInfeasible { .. }));
    assert!(err.is_configuration_error());
}

#[test]
fn test_missing_day_is_configuration_error() {
    let roster_config = RosterConfig::from_toml_str(PAIR).unwrap();

    let err = plan_day(&roster_config, &quick_config(), Weekday::Sunday).unwrap_err();

    assert!(matches!(err, ShiftforgeError::Config(_)));
}

#[test]
fn test_invalid_planner_config_rejected() {
    let config = PlannerConfig::new().with_stage_seconds(0, 60, 60);

    let err = plan_roster(&pair_roster(), &config).unwrap_err();

    assert!(err.is_configuration_error());
}
