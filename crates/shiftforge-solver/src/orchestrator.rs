//! The relaxation orchestrator.
//!
//! Planning runs three stages strictly in order, one blocking engine call
//! at a time:
//!
//! 1. **Capped**: every hard and soft constraint mandatory plus the
//!    imbalance caps of one pair, walking the escalation order until an
//!    attempt is usable.
//! 2. **Weighted**: only if no pair worked. Hard constraints mandatory,
//!    soft constraints and the imbalance ladder as weighted indicators.
//! 3. **Refinement**: the soft constraints the basic schedule satisfies
//!    become mandatory and the idealistic penalties are minimized, starting
//!    from the basic schedule.
//!
//! Each engine call receives a freshly built [`ModelConfiguration`] with
//! the next version number. Soft constraints named in
//! [`RelaxationConfig::relaxed`] are removed from the Stage A and Stage B
//! models before the call, so refinement never sees them either.

use std::time::{Duration, Instant};

use shiftforge_config::RelaxationConfig;
use shiftforge_constraints::{Catalog, ModelConfiguration};
use shiftforge_core::{Assignment, Result, Roster, ShiftforgeError};
use tracing::{debug, info, warn};

use crate::engine::{SolveOutcome, SolveRequest, SolveStatus, SolvingEngine};
use crate::selector::{AttemptRecord, BasicSchedule, ResultSelector, Schedule, Stage};

/// Runs the three planning stages against one engine.
///
/// # Examples
///
/// ```no_run
/// use shiftforge_config::{EngineConfig, RelaxationConfig};
/// use shiftforge_constraints::Catalog;
/// use shiftforge_solver::{LocalSearchEngine, Orchestrator};
/// # fn roster() -> shiftforge_core::Roster { unimplemented!() }
///
/// let engine = LocalSearchEngine::new(&EngineConfig::default());
/// let orchestrator =
///     Orchestrator::new(engine, Catalog::standard(), RelaxationConfig::default()).unwrap();
/// let schedule = orchestrator.plan(&roster()).unwrap();
/// println!("{} via {}", schedule.status, schedule.origin);
/// ```
#[derive(Debug)]
pub struct Orchestrator<E> {
    engine: E,
    catalog: Catalog,
    relaxation: RelaxationConfig,
}

impl<E: SolvingEngine> Orchestrator<E> {
    /// Creates an orchestrator.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the escalation order does not fit
    /// the catalog's imbalance policy, a required stage limit is zero or a
    /// relaxed id is unknown. Relaxing a hard constraint is reported as
    /// [`ShiftforgeError::HardRelaxation`].
    pub fn new(engine: E, catalog: Catalog, relaxation: RelaxationConfig) -> Result<Self> {
        catalog
            .imbalance()
            .validate_escalation(&relaxation.escalation())?;
        if relaxation.stage_a_seconds == 0 || relaxation.stage_b_seconds == 0 {
            return Err(ShiftforgeError::Config(
                "stage time limits must be positive".to_string(),
            ));
        }
        for id in &relaxation.relaxed {
            catalog.relax(id)?;
        }
        Ok(Self {
            engine,
            catalog,
            relaxation,
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn relaxation(&self) -> &RelaxationConfig {
        &self.relaxation
    }

    /// Plans one day.
    ///
    /// # Errors
    ///
    /// - [`ShiftforgeError::HardInfeasible`] if the roster rules out a hard
    ///   constraint, either by static proof before any engine call or by
    ///   the engine proving the weighted model infeasible
    /// - [`ShiftforgeError::Unsolved`] if the weighted fallback finds no
    ///   schedule within its limit
    /// - [`ShiftforgeError::Internal`] if the engine reports a usable
    ///   schedule that breaks a hard constraint
    pub fn plan(&self, roster: &Roster) -> Result<Schedule> {
        let started = Instant::now();
        let escalation = self.relaxation.escalation();
        info!(
            event = "plan_start",
            engine = self.engine.name(),
            employees = roster.len(),
            slots = roster.num_slots(),
            cap_pairs = escalation.len(),
        );

        if let Some((constraint, reason)) = self.catalog.prove_hard_infeasible(roster) {
            warn!(
                event = "plan_end",
                outcome = "hard_infeasible",
                constraint = %constraint,
                reason = %reason,
            );
            return Err(ShiftforgeError::HardInfeasible { constraint, reason });
        }

        let selector = ResultSelector::new(roster, &self.catalog);
        let mut run = Run::new(&self.engine, roster);

        let basic = match self.capped(&mut run, &selector)? {
            Some(basic) => basic,
            None => self.weighted(&mut run, &selector)?,
        };
        let schedule = self.refine(&mut run, &selector, basic);

        info!(
            event = "plan_end",
            status = %schedule.status,
            origin = %schedule.origin,
            caps = %schedule.caps.map_or_else(|| "-".to_string(), |c| c.to_string()),
            unsatisfied_soft = schedule.unsatisfied_soft.len(),
            idealistic_penalty = schedule.idealistic_penalty,
            attempts = schedule.attempts.len(),
            duration_ms = started.elapsed().as_millis() as u64,
        );
        Ok(schedule)
    }

    /// Stage A. Returns `None` when every cap pair failed.
    fn capped(
        &self,
        run: &mut Run<'_, E>,
        selector: &ResultSelector<'_>,
    ) -> Result<Option<BasicSchedule>> {
        let limit = self.relaxation.stage_a_limit();
        let retry = self.relaxation.timeout_policy.retry_limit();

        for caps in self.relaxation.escalation() {
            let model = self.relax(ModelConfiguration::capped(
                run.next_version(),
                &self.catalog,
                caps,
            ))?;
            let mut outcome = run.attempt(Stage::Capped, &model, limit, None);
            if let (SolveStatus::Unknown, Some(longer)) = (outcome.status, retry) {
                debug!(
                    caps = %caps,
                    limit_ms = longer.as_millis() as u64,
                    "retrying timed out cap pair"
                );
                outcome = run.attempt(Stage::Capped, &model, longer, None);
            }

            if outcome.status.is_usable() {
                info!(
                    event = "stage_end",
                    stage = %Stage::Capped,
                    caps = %caps,
                    status = %outcome.status,
                );
                return selector.verify_basic(Stage::Capped, model, outcome).map(Some);
            }
            if let Some(proof) = &outcome.proof {
                debug!(
                    caps = %caps,
                    constraint = %proof.constraint,
                    reason = %proof.reason,
                    "cap pair infeasible"
                );
            }
        }

        warn!(
            event = "stage_end",
            stage = %Stage::Capped,
            outcome = "exhausted",
            "no cap pair could be enforced, falling back to weighted model"
        );
        Ok(None)
    }

    /// Stage B.
    fn weighted(
        &self,
        run: &mut Run<'_, E>,
        selector: &ResultSelector<'_>,
    ) -> Result<BasicSchedule> {
        let limit = self.relaxation.stage_b_limit();
        let model = self.relax(ModelConfiguration::weighted(run.next_version(), &self.catalog))?;
        let outcome = run.attempt(Stage::Weighted, &model, limit, None);

        match outcome.status {
            SolveStatus::Optimal | SolveStatus::Feasible => {
                info!(event = "stage_end", stage = %Stage::Weighted, status = %outcome.status);
                selector.verify_basic(Stage::Weighted, model, outcome)
            }
            SolveStatus::Infeasible => {
                let (constraint, reason) = match outcome.proof {
                    Some(proof) => (proof.constraint, proof.reason),
                    None => (
                        "hard-only model".to_string(),
                        "the engine proved the hard constraints unsatisfiable".to_string(),
                    ),
                };
                Err(ShiftforgeError::HardInfeasible { constraint, reason })
            }
            SolveStatus::Unknown => Err(ShiftforgeError::Unsolved(format!(
                "{model} found no schedule within {}s",
                limit.as_secs()
            ))),
        }
    }

    /// Drops the configured relaxed constraints, keeping the version.
    fn relax(&self, model: ModelConfiguration) -> Result<ModelConfiguration> {
        self.relaxation
            .relaxed
            .iter()
            .try_fold(model, |model, id| model.without(model.version(), id))
    }

    /// Stage C. Never fails: a refinement that cannot be used leaves the
    /// basic schedule in place.
    fn refine(
        &self,
        run: &mut Run<'_, E>,
        selector: &ResultSelector<'_>,
        basic: BasicSchedule,
    ) -> Schedule {
        let limit = self.relaxation.stage_c_limit();
        if limit.is_zero() {
            debug!(event = "refine_end", outcome = "skipped");
            return selector.finish(basic, None, run.take_attempts());
        }

        let (model, dropped) = basic.model.refine(
            run.next_version(),
            run.roster,
            &basic.assignment,
            self.catalog.idealistic(),
        );
        debug!(
            model = %model,
            frozen = model.soft_constraints().count(),
            dropped = ?dropped,
            "freezing satisfied soft constraints"
        );
        let outcome = run.attempt(Stage::Refinement, &model, limit, Some(&basic.assignment));
        let schedule = selector.finish(basic, Some((&model, outcome)), run.take_attempts());
        info!(event = "refine_end", refinement = %schedule.refinement);
        schedule
    }
}

/// Per-plan state: the version counter and the attempt log.
struct Run<'a, E> {
    engine: &'a E,
    roster: &'a Roster,
    version: u64,
    attempts: Vec<AttemptRecord>,
}

impl<'a, E: SolvingEngine> Run<'a, E> {
    fn new(engine: &'a E, roster: &'a Roster) -> Self {
        Self {
            engine,
            roster,
            version: 0,
            attempts: Vec::new(),
        }
    }

    fn next_version(&mut self) -> u64 {
        self.version += 1;
        self.version
    }

    fn take_attempts(&mut self) -> Vec<AttemptRecord> {
        std::mem::take(&mut self.attempts)
    }

    fn attempt(
        &mut self,
        stage: Stage,
        model: &ModelConfiguration,
        limit: Duration,
        hint: Option<&Assignment>,
    ) -> SolveOutcome {
        info!(
            event = "attempt_start",
            stage = %stage,
            model = %model,
            limit_ms = limit.as_millis() as u64,
        );
        let mut request = SolveRequest::new(self.roster, model, limit);
        if let Some(hint) = hint {
            request = request.with_hint(hint);
        }
        let outcome = self.engine.solve(&request);
        info!(
            event = "attempt_end",
            stage = %stage,
            model = %model,
            status = %outcome.status,
            duration_ms = outcome.elapsed.as_millis() as u64,
        );
        self.attempts.push(AttemptRecord {
            stage,
            version: model.version(),
            label: model.label().to_string(),
            caps: model.caps(),
            limit_ms: limit.as_millis() as u64,
            elapsed_ms: outcome.elapsed.as_millis() as u64,
            status: outcome.status,
        });
        outcome
    }
}
