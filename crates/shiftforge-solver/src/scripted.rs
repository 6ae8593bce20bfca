//! An engine that replays scripted outcomes.
//!
//! Used to drive the orchestrator through exact status sequences and to
//! inspect what each stage asked for.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use shiftforge_constraints::CapPair;

use crate::engine::{SolveOutcome, SolveRequest, SolvingEngine};

/// What one call to a [`ScriptedEngine`] looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub version: u64,
    pub label: String,
    pub caps: Option<CapPair>,
    pub time_limit: Duration,
    pub mandatory: Vec<String>,
    pub objective: Vec<String>,
    pub has_hint: bool,
}

impl RecordedRequest {
    fn capture(request: &SolveRequest<'_>) -> Self {
        let model = request.model;
        Self {
            version: model.version(),
            label: model.label().to_string(),
            caps: model.caps(),
            time_limit: request.time_limit,
            mandatory: model.mandatory().map(|s| s.id().to_string()).collect(),
            objective: model
                .objective_terms()
                .map(|e| e.spec.id().to_string())
                .collect(),
            has_hint: request.hint.is_some(),
        }
    }

    pub fn is_mandatory(&self, id: &str) -> bool {
        self.mandatory.iter().any(|m| m == id)
    }
}

/// Answers every request with the script's outcome and records it.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use shiftforge_solver::{ScriptedEngine, SolveOutcome};
///
/// let engine = ScriptedEngine::new(|_req| SolveOutcome::unknown(None, Duration::ZERO));
/// assert!(engine.requests().is_empty());
/// ```
pub struct ScriptedEngine<F> {
    script: F,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl<F> ScriptedEngine<F>
where
    F: Fn(&SolveRequest<'_>) -> SolveOutcome + Send + Sync,
{
    pub fn new(script: F) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<F> std::fmt::Debug for ScriptedEngine<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedEngine").finish_non_exhaustive()
    }
}

impl<F> SolvingEngine for ScriptedEngine<F>
where
    F: Fn(&SolveRequest<'_>) -> SolveOutcome + Send + Sync,
{
    fn solve(&self, request: &SolveRequest<'_>) -> SolveOutcome {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest::capture(request));
        (self.script)(request)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
