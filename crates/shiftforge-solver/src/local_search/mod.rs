//! Late acceptance local search over duty grids.
//!
//! The engine proves infeasibility from static necessary conditions,
//! builds a starting grid (or takes the request's hint), then samples
//! change, swap and lunch moves, scores them in parallel and steps to the
//! best accepted one until the deadline passes or the score is perfect.

pub mod acceptor;
pub mod construction;
pub mod forager;
pub mod moves;

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use shiftforge_config::{EngineConfig, MoveThreadCount};
use shiftforge_constraints::ModelConfiguration;
use shiftforge_core::{Assignment, HardMediumSoftScore, Roster, Score};
use tracing::{debug, info, trace, warn};

use crate::engine::{InfeasibilityProof, SolveOutcome, SolveRequest, SolveStatus, SolvingEngine};

pub use acceptor::{Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor};
pub use construction::construct;
pub use forager::{AcceptedCountForager, LocalSearchForager};
pub use moves::{GridMove, MoveSampler};

type Sc = HardMediumSoftScore;

/// How candidate moves are scored.
enum Evaluation {
    Sequential,
    GlobalPool,
    Pool(ThreadPool),
}

impl std::fmt::Debug for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Evaluation::Sequential => f.write_str("Sequential"),
            Evaluation::GlobalPool => f.write_str("GlobalPool"),
            Evaluation::Pool(pool) => write!(f, "Pool({})", pool.current_num_threads()),
        }
    }
}

/// Local search engine.
///
/// Status mapping: a failed static proof is Infeasible, a perfect score is
/// Optimal, a best grid breaking no mandatory spec is Feasible, and
/// anything else at the deadline is Unknown.
///
/// # Examples
///
/// ```
/// use shiftforge_config::EngineConfig;
/// use shiftforge_solver::LocalSearchEngine;
///
/// let engine = LocalSearchEngine::new(&EngineConfig {
///     random_seed: Some(42),
///     ..EngineConfig::default()
/// });
/// assert_eq!(engine.moves_per_step(), 16);
/// ```
#[derive(Debug)]
pub struct LocalSearchEngine {
    random_seed: Option<u64>,
    late_acceptance_size: usize,
    moves_per_step: usize,
    evaluation: Evaluation,
}

impl Default for LocalSearchEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl LocalSearchEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let evaluation = match config.move_thread_count {
            MoveThreadCount::Auto => Evaluation::GlobalPool,
            MoveThreadCount::None => Evaluation::Sequential,
            MoveThreadCount::Count(n) => match ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => Evaluation::Pool(pool),
                Err(err) => {
                    warn!(threads = n, error = %err, "falling back to the global thread pool");
                    Evaluation::GlobalPool
                }
            },
        };
        Self {
            random_seed: config.random_seed,
            late_acceptance_size: config.late_acceptance_size,
            moves_per_step: config.moves_per_step.max(1),
            evaluation,
        }
    }

    pub fn moves_per_step(&self) -> usize {
        self.moves_per_step
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        }
    }

    fn acceptor(&self) -> Box<dyn Acceptor<Sc>> {
        if self.late_acceptance_size == 0 {
            Box::new(HillClimbingAcceptor)
        } else {
            Box::new(LateAcceptanceAcceptor::new(self.late_acceptance_size))
        }
    }

    fn prove_infeasible(roster: &Roster, model: &ModelConfiguration) -> Option<InfeasibilityProof> {
        model.mandatory().find_map(|spec| {
            spec.prove_infeasible(roster).map(|reason| InfeasibilityProof {
                constraint: spec.id().to_string(),
                reason,
            })
        })
    }

    fn evaluate(
        &self,
        roster: &Roster,
        model: &ModelConfiguration,
        grid: &Assignment,
        moves: &[GridMove],
    ) -> Vec<Sc> {
        let score_one = |m: &GridMove| {
            let mut candidate = grid.clone();
            m.apply(roster, &mut candidate);
            model.score(roster, &candidate)
        };
        match &self.evaluation {
            Evaluation::Sequential => moves.iter().map(score_one).collect(),
            Evaluation::GlobalPool => moves.par_iter().map(score_one).collect(),
            Evaluation::Pool(pool) => pool.install(|| moves.par_iter().map(score_one).collect()),
        }
    }

    fn starting_grid(request: &SolveRequest<'_>) -> Assignment {
        let roster = request.roster;
        match request.hint {
            Some(hint)
                if hint.num_employees() == roster.len()
                    && hint.num_slots() == roster.num_slots() =>
            {
                hint.clone()
            }
            _ => construct(roster),
        }
    }
}

impl SolvingEngine for LocalSearchEngine {
    fn solve(&self, request: &SolveRequest<'_>) -> SolveOutcome {
        let started = Instant::now();
        let (roster, model) = (request.roster, request.model);

        info!(
            event = "solve_start",
            engine = self.name(),
            model = %model,
            mandatory = model.mandatory().count(),
            objective_terms = model.objective_terms().count(),
            limit_ms = request.time_limit.as_millis() as u64,
            warm_start = request.hint.is_some(),
        );

        if let Some(proof) = Self::prove_infeasible(roster, model) {
            info!(
                event = "solve_end",
                status = %SolveStatus::Infeasible,
                constraint = %proof.constraint,
                reason = %proof.reason,
            );
            return SolveOutcome::infeasible(proof, started.elapsed());
        }

        let mut rng = self.rng();
        let sampler = MoveSampler::new(roster);
        let mut acceptor = self.acceptor();
        let mut forager = AcceptedCountForager::new(self.moves_per_step);

        let mut current = Self::starting_grid(request);
        let mut current_score = model.score(roster, &current);
        let mut best = current.clone();
        let mut best_score = current_score;
        acceptor.phase_started(&current_score);

        let mut steps: u64 = 0;
        let mut moves_evaluated: u64 = 0;
        let mut last_progress = Instant::now();

        while !best_score.is_perfect() && started.elapsed() < request.time_limit {
            let moves: Vec<GridMove> = (0..self.moves_per_step)
                .filter_map(|_| sampler.sample(roster, &current, &mut rng))
                .collect();
            if moves.is_empty() {
                break;
            }
            let scores = self.evaluate(roster, model, &current, &moves);
            moves_evaluated += moves.len() as u64;

            forager.step_started();
            for (index, score) in scores.iter().enumerate() {
                if acceptor.is_accepted(&current_score, score) {
                    forager.add_move_index(index, *score);
                    if forager.is_quit_early() {
                        break;
                    }
                }
            }

            if let Some((index, score)) = forager.pick_move_index() {
                moves[index].apply(roster, &mut current);
                current_score = score;
                acceptor.step_ended(&score);
                steps += 1;
                trace!(event = "step", step = steps, mv = ?moves[index], score = %score);

                if score > best_score {
                    best.clone_from(&current);
                    best_score = score;
                }
            }

            if last_progress.elapsed() >= Duration::from_secs(1) {
                debug!(
                    event = "progress",
                    steps = steps,
                    moves = moves_evaluated,
                    score = %best_score,
                );
                last_progress = Instant::now();
            }
        }

        let elapsed = started.elapsed();
        let status = if best_score.is_perfect() {
            SolveStatus::Optimal
        } else if best_score.is_feasible() {
            SolveStatus::Feasible
        } else {
            SolveStatus::Unknown
        };
        info!(
            event = "solve_end",
            status = %status,
            duration_ms = elapsed.as_millis() as u64,
            steps = steps,
            moves = moves_evaluated,
            score = %best_score,
        );

        if status.is_usable() {
            SolveOutcome::solved(status, best, best_score, elapsed)
        } else {
            SolveOutcome::unknown(Some(best_score), elapsed)
        }
    }

    fn name(&self) -> &'static str {
        "local-search"
    }
}

#[cfg(test)]
mod tests;
