//! Glyph-string grids.
//!
//! Each row uses the renderer's glyphs: `x` off shift, ` ` or `.` regular
//! floor work, `L` lunch, `B` break, `C` cashier, `S` support, `M` meeting.
//! `|` characters are ignored so rows can be split by hour.

use shiftforge_core::{Assignment, Duty};

fn duty_of(glyph: char) -> Duty {
    match glyph {
        'x' => Duty::Unassigned,
        ' ' | '.' => Duty::Other,
        'L' => Duty::Lunch,
        'B' => Duty::Break,
        'C' => Duty::Cashier,
        'S' => Duty::Support,
        'M' => Duty::Meeting,
        other => panic!("unknown duty glyph {other:?}"),
    }
}

/// Parses one row per employee into a grid.
///
/// # Panics
///
/// Panics on unknown glyphs or rows of different lengths.
pub fn parse_grid(rows: &[&str]) -> Assignment {
    let rows: Vec<Vec<Duty>> = rows
        .iter()
        .map(|row| row.chars().filter(|c| *c != '|').map(duty_of).collect())
        .collect();
    Assignment::from_rows(rows).expect("rows must have equal length")
}
