//! Foragers for local search move selection.

use std::fmt::Debug;

use shiftforge_core::Score;

/// Collects accepted move indices during a step and picks one.
pub trait LocalSearchForager<Sc: Score>: Send + Debug {
    /// Called at the start of each step to reset state.
    fn step_started(&mut self);

    /// Adds an accepted move by its index in the step's candidate list.
    fn add_move_index(&mut self, index: usize, score: Sc);

    /// Returns true once enough moves were accepted.
    fn is_quit_early(&self) -> bool;

    /// Picks the best collected move. Returns None if nothing was accepted.
    fn pick_move_index(&mut self) -> Option<(usize, Sc)>;
}

/// A forager that collects a limited number of accepted moves and picks
/// the best of them. Ties keep the earliest.
#[derive(Debug, Clone)]
pub struct AcceptedCountForager<Sc: Score> {
    accepted_count_limit: usize,
    accepted: Vec<(usize, Sc)>,
}

impl<Sc: Score> AcceptedCountForager<Sc> {
    pub fn new(accepted_count_limit: usize) -> Self {
        Self {
            accepted_count_limit,
            accepted: Vec::new(),
        }
    }
}

impl<Sc: Score> LocalSearchForager<Sc> for AcceptedCountForager<Sc> {
    fn step_started(&mut self) {
        self.accepted.clear();
    }

    fn add_move_index(&mut self, index: usize, score: Sc) {
        self.accepted.push((index, score));
    }

    fn is_quit_early(&self) -> bool {
        self.accepted.len() >= self.accepted_count_limit
    }

    fn pick_move_index(&mut self) -> Option<(usize, Sc)> {
        let mut best: Option<(usize, Sc)> = None;
        for &(index, score) in &self.accepted {
            match best {
                Some((_, b)) if score <= b => {}
                _ => best = Some((index, score)),
            }
        }
        best
    }
}
