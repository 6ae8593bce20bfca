//! Tests for planner configuration.

use super::*;
use std::io::Write;

#[test]
fn test_defaults() {
    let config = PlannerConfig::default();
    assert_eq!(config.relaxation.stage_a_limit(), Duration::from_secs(15));
    assert_eq!(config.relaxation.stage_c_limit(), Duration::from_secs(60));
    assert_eq!(config.relaxation.escalation(), DEFAULT_ESCALATION.to_vec());
    assert_eq!(config.relaxation.timeout_policy, TimeoutPolicy::Advance);
    assert_eq!(config.engine.late_acceptance_size, 400);
    assert_eq!(config.engine.move_thread_count, MoveThreadCount::Auto);
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [relaxation]
        stage_a_seconds = 5
        stage_b_seconds = 30
        stage_c_seconds = 0
        cap_escalation = [[0, 0], [1, 0], [0, 1], [1, 1]]
        timeout_policy = { retry_once = { seconds = 20 } }

        [engine]
        random_seed = 42
        moves_per_step = 8
        move_thread_count = { count = 2 }
    "#;

    let config = PlannerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.relaxation.stage_b_seconds, 30);
    assert_eq!(config.relaxation.escalation().len(), 4);
    assert_eq!(
        config.relaxation.timeout_policy.retry_limit(),
        Some(Duration::from_secs(20))
    );
    assert_eq!(config.engine.random_seed, Some(42));
    assert_eq!(config.engine.moves_per_step, 8);
    assert_eq!(config.engine.late_acceptance_size, 400);
    assert_eq!(config.engine.move_thread_count, MoveThreadCount::Count(2));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        relaxation:
          stage_a_seconds: 10
          timeout_policy: advance
        engine:
          random_seed: 42
          move_thread_count: none
    "#;

    let config = PlannerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.relaxation.stage_a_seconds, 10);
    assert_eq!(config.relaxation.stage_b_seconds, 60);
    assert_eq!(config.engine.move_thread_count, MoveThreadCount::None);
}

#[test]
fn test_invalid_escalation() {
    let beyond = PlannerConfig::from_toml_str(
        r#"
        [relaxation]
        cap_escalation = [[0, 0], [3, 0]]
        "#,
    );
    assert!(matches!(beyond, Err(ConfigError::Model(_))));

    let tighter = PlannerConfig::from_toml_str(
        r#"
        [relaxation]
        cap_escalation = [[1, 1], [0, 1]]
        "#,
    );
    assert!(tighter.is_err());
}

#[test]
fn test_retry_must_be_longer() {
    let result = PlannerConfig::from_toml_str(
        r#"
        [relaxation]
        stage_a_seconds = 15
        timeout_policy = { retry_once = { seconds = 10 } }
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_load_missing_file_falls_back() {
    let err = PlannerConfig::load("/nonexistent/planner.toml").unwrap_err();
    assert!(err.is_not_found());
    let config = PlannerConfig::load_or_default("/nonexistent/planner.toml").unwrap();
    assert_eq!(config, PlannerConfig::default());
}

#[test]
fn test_load_or_default_keeps_invalid_file_errors() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[relaxation]\nstage_a_seconds = 0").unwrap();
    let err = PlannerConfig::load_or_default(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(!err.is_not_found());

    let mut broken = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(broken, "[relaxation\nstage_a_seconds = 5").unwrap();
    assert!(matches!(
        PlannerConfig::load_or_default(broken.path()),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_relaxed_ids_parse() {
    let config = PlannerConfig::from_toml_str(
        r#"
        [relaxation]
        relaxed = ["aesthetics", "lunch-fair-order"]
        "#,
    )
    .unwrap();
    assert_eq!(config.relaxation.relaxed, vec!["aesthetics", "lunch-fair-order"]);
    assert!(PlannerConfig::default().relaxation.relaxed.is_empty());
}

#[test]
fn test_load_by_extension() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "engine:\n  random_seed: 9").unwrap();
    let config = PlannerConfig::load(file.path()).unwrap();
    assert_eq!(config.engine.random_seed, Some(9));

    let built = PlannerConfig::new()
        .with_random_seed(3)
        .with_stage_seconds(1, 2, 3);
    assert_eq!(built.relaxation.stage_c_seconds, 3);
    assert_eq!(built.engine.random_seed, Some(3));
}
