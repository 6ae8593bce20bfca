use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Datelike;
use clap::Parser;
use owo_colors::OwoColorize;
use shiftforge::console::{render_schedule, Style};
use shiftforge::{plan_day, PlannerConfig, RosterConfig, ShiftforgeError, Weekday};

#[derive(Parser, Debug)]
#[command(
    name = "shiftforge",
    about = "Plans one day's duty schedule by staged constraint relaxation",
    version
)]
struct Cli {
    /// Weekly roster file (TOML or YAML)
    #[arg(short, long)]
    roster: PathBuf,

    /// Planner settings; defaults apply only when the file does not exist
    #[arg(short, long, default_value = "planner.toml")]
    config: PathBuf,

    /// Weekday to plan (default: today)
    #[arg(short, long)]
    day: Option<Weekday>,

    /// Random seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the schedule as JSON instead of a grid
    #[arg(long)]
    json: bool,

    /// Disable colors in the rendered grid
    #[arg(long)]
    plain: bool,
}

fn today() -> Weekday {
    let offset = chrono::Local::now().weekday().num_days_from_monday();
    Weekday::from_monday(offset).unwrap_or(Weekday::Monday)
}

fn run(cli: Cli) -> Result<(), ShiftforgeError> {
    let roster_config = RosterConfig::load(&cli.roster)?;
    let mut config = PlannerConfig::load_or_default(&cli.config)?;
    if let Some(seed) = cli.seed {
        config = config.with_random_seed(seed);
    }
    let day = cli.day.unwrap_or_else(today);

    let (roster, schedule) = plan_day(&roster_config, &config, day)?;

    if cli.json {
        let names: Vec<&str> = roster.employees().iter().map(|e| e.name.as_str()).collect();
        let doc = serde_json::json!({
            "day": day.name(),
            "employees": names,
            "schedule": schedule,
        });
        let text = serde_json::to_string_pretty(&doc)
            .map_err(|e| ShiftforgeError::Internal(format!("cannot encode schedule: {e}")))?;
        println!("{text}");
    } else {
        let style = if cli.plain { Style::Plain } else { Style::Color };
        print!("{}", render_schedule(&roster, &schedule, style));
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".bright_red().bold());
            if err.is_configuration_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PAIR: &str = r#"
        [employees]
        Avery = { full_time = true, department = "SD" }

        [days.monday]
        shifts = [{ name = "Avery", shift = "E" }]
        register_targets = [{ count = 1, start = "10:00" }]
    "#;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "shiftforge", "--roster", "week.toml", "--day", "tue", "--seed", "3", "--json",
        ])
        .unwrap();
        assert_eq!(cli.roster, PathBuf::from("week.toml"));
        assert_eq!(cli.config, PathBuf::from("planner.toml"));
        assert_eq!(cli.day, Some(Weekday::Tuesday));
        assert_eq!(cli.seed, Some(3));
        assert!(cli.json);
        assert!(!cli.plain);
    }

    #[test]
    fn test_unknown_day_rejected() {
        let result = Cli::try_parse_from(["shiftforge", "--roster", "r.toml", "--day", "someday"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_roster_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "shiftforge",
            "--roster",
            dir.path().join("absent.toml").to_str().unwrap(),
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_invalid_planner_file_is_configuration_error() {
        let mut roster = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        roster.write_all(PAIR.as_bytes()).unwrap();
        let mut planner = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        planner
            .write_all(b"[relaxation]\nstage_a_seconds = 0\n")
            .unwrap();
        let cli = Cli::try_parse_from([
            "shiftforge",
            "--roster",
            roster.path().to_str().unwrap(),
            "--config",
            planner.path().to_str().unwrap(),
            "--day",
            "monday",
        ])
        .unwrap();

        let err = run(cli).unwrap_err();

        assert!(err.is_configuration_error());
        assert!(matches!(err, ShiftforgeError::Config(ref msg) if msg.contains("positive")));
    }

    #[test]
    fn test_out_of_range_escalation_is_rejected() {
        let mut roster = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        roster.write_all(PAIR.as_bytes()).unwrap();
        let mut planner = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        planner
            .write_all(b"[relaxation]\ncap_escalation = [[3, 3]]\n")
            .unwrap();
        let cli = Cli::try_parse_from([
            "shiftforge",
            "--roster",
            roster.path().to_str().unwrap(),
            "--config",
            planner.path().to_str().unwrap(),
        ])
        .unwrap();

        let err = run(cli).unwrap_err();

        assert!(err.is_configuration_error());
        assert!(matches!(err, ShiftforgeError::Config(ref msg) if msg.contains("capped within")));
    }

    #[test]
    fn test_unscheduled_day_is_configuration_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(
            br#"
            [employees]
            Avery = { full_time = true, department = "SD" }

            [days.monday]
            shifts = [{ name = "Avery", shift = "E" }]
            "#,
        )
        .unwrap();
        let cli = Cli::try_parse_from([
            "shiftforge",
            "--roster",
            file.path().to_str().unwrap(),
            "--day",
            "friday",
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
