//! Shared test fixtures for shiftforge crates.
//!
//! This crate only depends on `shiftforge-core` so that every other crate
//! can pull it in as a dev-dependency without cycles.
//!
//! - [`roster`] - Ready-made rosters of various sizes
//! - [`grid`] - Builds duty grids from compact glyph strings
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! shiftforge-test = { workspace = true }
//! ```

pub mod grid;
pub mod roster;

pub use grid::parse_grid;
pub use roster::{pair_roster, pair_grid, small_roster, weekday_roster};
