//! Step acceptance for the duty grid search.
//!
//! An acceptor decides whether the grid produced by a sampled move becomes
//! the next step, given the score of the current step.

use std::fmt::Debug;

use shiftforge_core::Score;

/// Decides which candidate grids the search moves to.
pub trait Acceptor<Sc: Score>: Send + Debug {
    /// Whether a candidate scoring `move_score` may replace a step that
    /// scored `last_step_score`.
    fn is_accepted(&self, last_step_score: &Sc, move_score: &Sc) -> bool;

    /// Called when the search starts.
    fn phase_started(&mut self, _initial_score: &Sc) {}

    /// Records the score of a step that was taken.
    fn step_ended(&mut self, _step_score: &Sc) {}
}

/// Accepts only moves that do not worsen the score.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbingAcceptor;

impl<Sc: Score> Acceptor<Sc> for HillClimbingAcceptor {
    fn is_accepted(&self, last_step_score: &Sc, move_score: &Sc) -> bool {
        move_score >= last_step_score
    }
}

/// Accepts a candidate that beats the current step or the step taken
/// `late_acceptance_size` steps ago, letting the search walk through
/// plateaus of equal-score grids.
#[derive(Debug, Clone)]
pub struct LateAcceptanceAcceptor<Sc: Score> {
    late_acceptance_size: usize,
    /// Ring of past step scores, `None` until filled.
    score_history: Vec<Option<Sc>>,
    current_index: usize,
}

impl<Sc: Score> LateAcceptanceAcceptor<Sc> {
    /// Creates a new late acceptance acceptor keeping at least one score.
    pub fn new(late_acceptance_size: usize) -> Self {
        let late_acceptance_size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size,
            score_history: vec![None; late_acceptance_size],
            current_index: 0,
        }
    }
}

impl<Sc: Score> Default for LateAcceptanceAcceptor<Sc> {
    fn default() -> Self {
        Self::new(400)
    }
}

impl<Sc: Score> Acceptor<Sc> for LateAcceptanceAcceptor<Sc> {
    fn is_accepted(&self, last_step_score: &Sc, move_score: &Sc) -> bool {
        if move_score > last_step_score {
            return true;
        }
        match &self.score_history[self.current_index] {
            Some(late_score) => move_score >= late_score,
            None => true,
        }
    }

    fn phase_started(&mut self, initial_score: &Sc) {
        for slot in &mut self.score_history {
            *slot = Some(*initial_score);
        }
        self.current_index = 0;
    }

    fn step_ended(&mut self, step_score: &Sc) {
        self.score_history[self.current_index] = Some(*step_score);
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftforge_core::HardMediumSoftScore as S;

    #[test]
    fn test_late_acceptance_accepts_improvement() {
        let mut acceptor = LateAcceptanceAcceptor::new(3);
        acceptor.phase_started(&S::of_hard(-5));
        assert!(acceptor.is_accepted(&S::of_hard(-5), &S::of_hard(-4)));
    }

    #[test]
    fn test_late_acceptance_uses_history() {
        let mut acceptor = LateAcceptanceAcceptor::new(2);
        acceptor.phase_started(&S::of_hard(-10));
        acceptor.step_ended(&S::of_hard(-3));
        acceptor.step_ended(&S::of_hard(-2));
        // History wrapped: the late score is -3 again.
        assert!(acceptor.is_accepted(&S::of_hard(-2), &S::of_hard(-3)));
        assert!(!acceptor.is_accepted(&S::of_hard(-2), &S::of_hard(-4)));
    }

    #[test]
    fn test_late_acceptance_accepts_worse_than_current_but_better_than_late() {
        let mut acceptor = LateAcceptanceAcceptor::new(4);
        acceptor.phase_started(&S::of_hard(-10));
        assert!(acceptor.is_accepted(&S::of_hard(-1), &S::of_hard(-8)));
        assert!(!acceptor.is_accepted(&S::of_hard(-1), &S::of_hard(-11)));
    }

    #[test]
    fn test_hill_climbing() {
        let acceptor = HillClimbingAcceptor;
        assert!(acceptor.is_accepted(&S::of_soft(-3), &S::of_soft(-3)));
        assert!(!Acceptor::<S>::is_accepted(&acceptor, &S::of_soft(-3), &S::of_soft(-4)));
    }
}
