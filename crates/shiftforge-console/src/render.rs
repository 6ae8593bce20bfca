//! Terminal rendering of duty grids and schedules.
//!
//! One row per employee, one glyph per slot, a `|` at every hour. Each
//! row ends with the employee's cashier and support counts, the lengths of
//! the work stretches between breaks and lunch, and the department. Two
//! checksum rows count registers and people in the breakroom per slot.

use std::fmt::Write;

use owo_colors::OwoColorize;
use shiftforge_core::{Assignment, Duty, Roster, SlotRange};
use shiftforge_solver::Schedule;

/// Whether output carries ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    #[default]
    Color,
    Plain,
}

const CHECKSUM_ROWS: [&str; 2] = ["registers", "breakroom"];

/// Renders a grid for the roster.
pub fn render_grid(roster: &Roster, grid: &Assignment, style: Style) -> String {
    let hours = roster.hours();
    let sph = hours.slots_per_hour();
    let width = roster
        .employees()
        .iter()
        .map(|e| e.name.chars().count())
        .chain(CHECKSUM_ROWS.iter().map(|r| r.len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();

    // Hour header.
    let _ = write!(out, "{:width$} ", "");
    for slot in roster.day().step_by(sph) {
        let time = hours.slot_to_time(slot);
        let hour = time.split(':').next().unwrap_or("");
        let _ = write!(out, "|{hour:<sph$}");
    }
    out.push_str("|\n");

    for (id, e) in roster.employees().iter().enumerate() {
        let _ = write!(out, "{:<width$} ", e.name);
        for slot in roster.day() {
            if hours.is_on_the_hour(slot) {
                out.push('|');
            }
            out.push_str(&cell(grid.get(id, slot), style));
        }
        let stretches = work_stretches(grid.row(id), e.shift.window())
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("-");
        let _ = writeln!(
            out,
            "| C{:>2} S{:>2}  {:<12} {}",
            grid.count_in_row(id, Duty::Cashier),
            grid.count_in_row(id, Duty::Support),
            stretches,
            e.department
        );
    }

    let checksums: [(&str, fn(&Assignment, usize) -> usize); 2] = [
        (CHECKSUM_ROWS[0], Assignment::register_at),
        (CHECKSUM_ROWS[1], Assignment::breakroom_at),
    ];
    for (label, count) in checksums {
        let _ = write!(out, "{label:<width$} ");
        for slot in roster.day() {
            if hours.is_on_the_hour(slot) {
                out.push('|');
            }
            out.push(digit(count(grid, slot)));
        }
        out.push_str("|\n");
    }
    out
}

/// Renders a schedule: a summary of how it was reached, then its grid.
pub fn render_schedule(roster: &Roster, schedule: &Schedule, style: Style) -> String {
    let mut out = String::new();
    let caps = schedule
        .caps
        .map(|c| format!(", caps {c}"))
        .unwrap_or_default();
    let status = schedule.status.to_string();
    let status = match style {
        Style::Color => status.bright_green().bold().to_string(),
        Style::Plain => status,
    };
    let _ = writeln!(out, "Status: {status} ({}{caps})", schedule.origin);
    let _ = writeln!(out, "Refinement: {}", schedule.refinement);
    let _ = writeln!(
        out,
        "Idealistic penalty: {} | cashier spread {} | register spread {}",
        schedule.idealistic_penalty, schedule.cashier_spread, schedule.register_spread
    );
    if schedule.is_fully_satisfied() {
        out.push_str("Unsatisfied soft: none\n");
    } else {
        let _ = writeln!(
            out,
            "Unsatisfied soft: {}",
            schedule.unsatisfied_soft.join(", ")
        );
    }
    out.push('\n');
    out.push_str(&render_grid(roster, &schedule.assignment, style));
    out
}

fn cell(duty: Duty, style: Style) -> String {
    let glyph = duty.glyph();
    if style == Style::Plain {
        return glyph.to_string();
    }
    match duty {
        Duty::Unassigned => glyph.bright_black().to_string(),
        Duty::Other => glyph.to_string(),
        Duty::Lunch => glyph.black().on_yellow().to_string(),
        Duty::Break => glyph.black().on_magenta().to_string(),
        Duty::Cashier => glyph.black().on_green().to_string(),
        Duty::Support => glyph.black().on_cyan().to_string(),
        Duty::Meeting => glyph.white().on_blue().to_string(),
    }
}

fn digit(n: usize) -> char {
    char::from_digit(n as u32, 10).unwrap_or('+')
}

/// Lengths of the runs of work between breaks and lunch within a shift.
fn work_stretches(row: &[Duty], window: SlotRange) -> Vec<usize> {
    let mut stretches = Vec::new();
    let mut len = 0;
    for slot in window {
        match row.get(slot) {
            Some(Duty::Break | Duty::Lunch) => {
                if len > 0 {
                    stretches.push(len);
                }
                len = 0;
            }
            Some(_) => len += 1,
            None => break,
        }
    }
    if len > 0 {
        stretches.push(len);
    }
    stretches
}
