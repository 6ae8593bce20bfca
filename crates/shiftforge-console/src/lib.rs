//! Colorful console output for planning runs.
//!
//! Provides a custom `tracing` layer that formats planner and engine events
//! with colors, and [`render`] for printing a finished schedule.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (plan, attempt, stage and solve start/end)
//! - **DEBUG**: Progress updates (1/sec with steps and score)
//! - **TRACE**: Individual steps
//!
//! Everything is written to stderr so that stdout stays free for
//! machine-readable output.

pub mod render;

pub use render::{render_grid, render_schedule, Style};

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static PLAN_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "shiftforge_solver=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(PlannerConsoleLayer)
            .try_init();
    });
}

// Marks the start of planning for elapsed time tracking.
fn mark_plan_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    PLAN_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since plan start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = PLAN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
      _     _  __ _    __
  ___| |__ (_)/ _| |_ / _| ___  _ __ __ _  ___
 / __| '_ \| | |_| __| |_ / _ \| '__/ _` |/ _ \
 \__ \ | | | |  _| |_|  _| (_) | | | (_| |  __/
 |___/_| |_|_|_|  \__|_|  \___/|_|  \__, |\___|
                                    |___/
"#;

    let version_line = format!("             v{} - Shift Duty Planner\n", VERSION);

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", banner.bright_cyan());
    let _ = writeln!(stderr, "{}", version_line.bright_white().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats planner events with colors.
pub struct PlannerConsoleLayer;

impl<S: Subscriber> Layer<S> for PlannerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("shiftforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    engine: Option<String>,
    stage: Option<String>,
    model: Option<String>,
    status: Option<String>,
    origin: Option<String>,
    caps: Option<String>,
    outcome: Option<String>,
    constraint: Option<String>,
    reason: Option<String>,
    refinement: Option<String>,
    score: Option<String>,
    mv: Option<String>,
    employees: Option<u64>,
    slots: Option<u64>,
    cap_pairs: Option<u64>,
    mandatory: Option<u64>,
    objective_terms: Option<u64>,
    limit_ms: Option<u64>,
    duration_ms: Option<u64>,
    steps: Option<u64>,
    step: Option<u64>,
    moves: Option<u64>,
    attempts: Option<u64>,
    unsatisfied_soft: Option<u64>,
    idealistic_penalty: Option<u64>,
    warm_start: Option<bool>,
}

impl EventVisitor {
    fn text(&mut self, name: &str, value: String) {
        let slot = match name {
            "event" => &mut self.event,
            "message" => &mut self.message,
            "engine" => &mut self.engine,
            "stage" => &mut self.stage,
            "model" => &mut self.model,
            "status" => &mut self.status,
            "origin" => &mut self.origin,
            "caps" => &mut self.caps,
            "outcome" => &mut self.outcome,
            "constraint" => &mut self.constraint,
            "reason" => &mut self.reason,
            "refinement" => &mut self.refinement,
            "score" => &mut self.score,
            "mv" => &mut self.mv,
            _ => return,
        };
        *slot = Some(value);
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "employees" => self.employees = Some(value),
            "slots" => self.slots = Some(value),
            "cap_pairs" => self.cap_pairs = Some(value),
            "mandatory" => self.mandatory = Some(value),
            "objective_terms" => self.objective_terms = Some(value),
            "limit_ms" => self.limit_ms = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "steps" => self.steps = Some(value),
            "step" => self.step = Some(value),
            "moves" => self.moves = Some(value),
            "attempts" => self.attempts = Some(value),
            "unsatisfied_soft" => self.unsatisfied_soft = Some(value),
            "idealistic_penalty" => self.idealistic_penalty = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "warm_start" {
            self.warm_start = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.text(field.name(), value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "plan_start" => format_plan_start(v),
        "attempt_start" => format_attempt_start(v),
        "attempt_end" => format_attempt_end(v),
        "stage_end" => format_stage_end(v),
        "refine_end" => format_refine_end(v),
        "plan_end" => format_plan_end(v),
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "progress" => format_progress(v),
        "step" => format_step(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_plan_start(v: &EventVisitor) -> String {
    mark_plan_start();
    format!(
        "{} {} Planning │ {} employees │ {} slots │ {} cap pairs │ engine {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.employees.unwrap_or(0)).bright_yellow(),
        count(v.slots.unwrap_or(0)).bright_yellow(),
        count(v.cap_pairs.unwrap_or(0)).bright_yellow(),
        v.engine.as_deref().unwrap_or("?").bright_magenta()
    )
}

fn format_attempt_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} │ {} limit",
        format_elapsed(),
        "▶".bright_blue(),
        v.stage.as_deref().unwrap_or("?").white().bold(),
        v.model.as_deref().unwrap_or("?"),
        format_duration_ms(v.limit_ms.unwrap_or(0)).yellow()
    )
}

fn format_attempt_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} │ {} │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        v.stage.as_deref().unwrap_or("?").white().bold(),
        v.model.as_deref().unwrap_or("?"),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_status(v.status.as_deref().unwrap_or("?"))
    )
}

fn format_stage_end(v: &EventVisitor) -> String {
    let stage = v.stage.as_deref().unwrap_or("?");
    match v.outcome.as_deref() {
        Some(outcome) => format!(
            "{} {} {} stage {} │ {}",
            format_elapsed(),
            "!".bright_yellow().bold(),
            stage.white().bold(),
            outcome.bright_yellow(),
            v.message.as_deref().unwrap_or("")
        ),
        None => {
            let mut output = format!(
                "{} {} {} stage done │ {}",
                format_elapsed(),
                "■".bright_cyan(),
                stage.white().bold(),
                format_status(v.status.as_deref().unwrap_or("?"))
            );
            if let Some(caps) = &v.caps {
                output.push_str(&format!(" │ caps {}", caps.bright_magenta()));
            }
            output
        }
    }
}

fn format_refine_end(v: &EventVisitor) -> String {
    let refinement = v.refinement.as_deref().unwrap_or("skipped");
    let colored = if refinement.starts_with("improved") {
        refinement.bright_green().to_string()
    } else if refinement.starts_with("rejected") {
        refinement.yellow().to_string()
    } else {
        refinement.white().to_string()
    };
    format!(
        "{} {} refinement {}",
        format_elapsed(),
        "■".bright_cyan(),
        colored
    )
}

fn format_plan_end(v: &EventVisitor) -> String {
    if v.outcome.as_deref() == Some("hard_infeasible") {
        return format!(
            "{} {} {} │ {} │ {}",
            format_elapsed(),
            "■".bright_red().bold(),
            "HARD CONSTRAINTS INFEASIBLE".bright_red().bold(),
            v.constraint.as_deref().unwrap_or("?").white().bold(),
            v.reason.as_deref().unwrap_or("")
        );
    }

    let status = v.status.as_deref().unwrap_or("?");
    let unsatisfied = v.unsatisfied_soft.unwrap_or(0);
    let mut output = format!(
        "{} {} Planning complete │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_status(status),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    );

    let rule = "════════════════════════════════════════════════════════";
    output.push_str("\n\n");
    output.push_str(&format!("╔{rule}╗").bright_cyan().to_string());
    output.push('\n');
    let rows = [
        ("Origin:", v.origin.clone().unwrap_or_default()),
        ("Caps:", v.caps.clone().unwrap_or_else(|| "-".to_string())),
        ("Unsatisfied soft:", count(unsatisfied)),
        ("Idealistic penalty:", count(v.idealistic_penalty.unwrap_or(0))),
        ("Engine calls:", count(v.attempts.unwrap_or(0))),
    ];
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<22}{:>32}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }
    output.push_str(&format!("╚{rule}╝").bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_solve_start(v: &EventVisitor) -> String {
    let mut output = format!(
        "{}   {} {} │ {} mandatory │ {} objective terms",
        format_elapsed(),
        "↳".bright_black(),
        v.engine.as_deref().unwrap_or("engine").bright_black(),
        count(v.mandatory.unwrap_or(0)).bright_yellow(),
        count(v.objective_terms.unwrap_or(0)).bright_yellow()
    );
    if v.warm_start == Some(true) {
        output.push_str(&format!(" │ {}", "warm start".bright_black()));
    }
    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let mut output = format!(
        "{}   {} {}",
        format_elapsed(),
        "↳".bright_black(),
        format_status(v.status.as_deref().unwrap_or("?"))
    );
    if let Some(steps) = v.steps {
        output.push_str(&format!(
            " │ {} steps │ {} moves",
            count(steps).white(),
            count(v.moves.unwrap_or(0)).bright_magenta()
        ));
    }
    if let Some(score) = &v.score {
        output.push_str(&format!(" │ {}", format_score(score)));
    }
    if let Some(constraint) = &v.constraint {
        output.push_str(&format!(
            " │ {} {}",
            constraint.white().bold(),
            v.reason.as_deref().unwrap_or("")
        ));
    }
    output
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "{}   {} {:>10} steps │ {:>12} moves │ {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        count(v.steps.unwrap_or(0)).white(),
        count(v.moves.unwrap_or(0)).bright_magenta().bold(),
        format_score(v.score.as_deref().unwrap_or("N/A"))
    )
}

fn format_step(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{}   {} Step {:>10} │ {} │ {}",
        format_elapsed(),
        "✓".bright_green(),
        count(v.step.unwrap_or(0)).bright_black(),
        v.mv.as_deref().unwrap_or("").bright_black(),
        format_score(v.score.as_deref().unwrap_or("N/A")).bright_black()
    )
}

fn format_status(status: &str) -> String {
    match status {
        "optimal" => "OPTIMAL".bright_green().bold().to_string(),
        "feasible" => "FEASIBLE".green().bold().to_string(),
        "infeasible" => "INFEASIBLE".bright_red().bold().to_string(),
        "unknown" => "UNKNOWN".yellow().bold().to_string(),
        other => other.to_string(),
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Colors each level of a `0hard/-18medium/-3soft` score.
fn format_score(score: &str) -> String {
    let parts: Vec<&str> = score.split('/').collect();
    if parts.len() != 3 {
        return score.white().to_string();
    }

    let levels = ["hard", "medium", "soft"];
    let colored: Vec<String> = parts
        .iter()
        .zip(levels)
        .map(|(part, suffix)| {
            let n: i64 = part.trim_end_matches(suffix).parse().unwrap_or(0);
            match (n < 0, suffix) {
                (false, _) => part.bright_green().to_string(),
                (true, "hard") => part.bright_red().to_string(),
                (true, _) => part.yellow().to_string(),
            }
        })
        .collect();
    colored.join("/")
}
