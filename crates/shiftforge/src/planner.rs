//! Planning entry points that hide engine and catalog wiring.

use shiftforge_config::{PlannerConfig, RelaxationConfig, RosterConfig, Weekday};
use shiftforge_constraints::Catalog;
use shiftforge_core::{Result, Roster};
use shiftforge_solver::{LocalSearchEngine, Orchestrator, Schedule, SolvingEngine};
use tracing::info;

/// Builds the roster for `day` and plans it with the local search engine
/// and the standard catalog.
///
/// # Errors
///
/// Configuration errors for a bad roster or planner file,
/// [`HardInfeasible`](shiftforge_core::ShiftforgeError::HardInfeasible) when
/// no schedule can meet the hard rules, and
/// [`Unsolved`](shiftforge_core::ShiftforgeError::Unsolved) when even the
/// weighted fallback runs out of time.
pub fn plan_day(
    roster: &RosterConfig,
    config: &PlannerConfig,
    day: Weekday,
) -> Result<(Roster, Schedule)> {
    #[cfg(feature = "console")]
    shiftforge_console::init();

    let roster = roster.build_roster(day)?;
    info!(
        event = "roster_built",
        day = %day,
        employees = roster.len(),
        slots = roster.num_slots(),
    );
    let schedule = plan_roster(&roster, config)?;
    Ok((roster, schedule))
}

/// Plans an already built roster with the local search engine.
pub fn plan_roster(roster: &Roster, config: &PlannerConfig) -> Result<Schedule> {
    config.validate()?;
    let engine = LocalSearchEngine::new(&config.engine);
    plan_with(engine, roster, config.relaxation.clone())
}

/// Plans a roster with any engine and the standard catalog.
pub fn plan_with<E: SolvingEngine>(
    engine: E,
    roster: &Roster,
    relaxation: RelaxationConfig,
) -> Result<Schedule> {
    Orchestrator::new(engine, Catalog::standard(), relaxation)?.plan(roster)
}

#[cfg(test)]
mod tests;
