//! Score types for comparing candidate duty grids.
//!
//! An engine scores every candidate grid on three levels:
//! - hard: violations of constraints the current model treats as mandatory
//! - medium: weights of optional constraints left unsatisfied
//! - soft: penalties of idealistic objective terms

mod hard_medium_soft;
mod traits;

#[cfg(test)]
mod tests;

pub use hard_medium_soft::HardMediumSoftScore;
pub use traits::Score;

/// One level of a score, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreLevel {
    /// Mandatory terms; any penalty makes a grid infeasible.
    Hard,
    /// Optional terms the model asks to satisfy.
    Medium,
    /// Idealistic objective terms.
    Soft,
}

impl ScoreLevel {
    pub const ALL: [ScoreLevel; 3] = [ScoreLevel::Hard, ScoreLevel::Medium, ScoreLevel::Soft];
}
