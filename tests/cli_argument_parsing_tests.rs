//! Tests for CLI argument parsing functionality
//!
//! These tests verify that command line arguments are parsed and merged with
//! configuration files in the documented order: defaults < file < CLI.

use clap::Parser;
use lathe_telemetry_simulator::types::config::{CliArgs, ConfigError, SimulationConfig};
use std::io::Write;
use tempfile::Builder;

/// Test that no arguments yields the default configuration
#[test]
fn test_defaults_without_arguments() {
    let cli_args = CliArgs::try_parse_from(["test"]).unwrap();
    assert!(cli_args.config.is_none());
    assert!(!cli_args.no_noise);
    assert!(!cli_args.dry_run);

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    let defaults = SimulationConfig::default();
    assert_eq!(config.lathe_count, defaults.lathe_count);
    assert_eq!(config.jobs_per_lathe, defaults.jobs_per_lathe);
    assert_eq!(config.duration_range(), defaults.duration_range());
    assert!(config.output_dir.is_none());
}

/// Test parsing of every numeric argument
#[test]
fn test_numeric_arguments() {
    let cli_args = CliArgs::try_parse_from([
        "test",
        "--lathe-count",
        "4",
        "--jobs-per-lathe",
        "6",
        "--min-duration",
        "2.5",
        "--max-duration",
        "12",
        "--max-tool-no",
        "8",
        "--sample-interval",
        "2",
        "--batch-size",
        "250",
        "--seed",
        "31337",
    ])
    .unwrap();

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.lathe_count, 4);
    assert_eq!(config.jobs_per_lathe, 6);
    assert_eq!(config.duration_range(), (2.5, 12.0));
    assert_eq!(config.max_tool_no, 8);
    assert_eq!(config.sample_interval_seconds, 2);
    assert_eq!(config.batch_size, 250);
    assert_eq!(config.seed, Some(31337));
    assert_eq!(config.total_jobs(), 24);
    assert!(config.validate().is_ok());
}

/// Test flags and output paths
#[test]
fn test_flags_and_paths() {
    let cli_args = CliArgs::try_parse_from([
        "test",
        "--output-dir",
        "out",
        "--stats-output",
        "stats.json",
        "--log-dir",
        "logs",
        "--no-noise",
        "--verbose",
        "--dry-run",
    ])
    .unwrap();

    assert!(cli_args.verbose);
    assert!(cli_args.dry_run);
    assert_eq!(cli_args.log_dir.as_deref(), Some("logs"));

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.output_dir.as_deref(), Some("out"));
    assert_eq!(config.stats_output.as_deref(), Some("stats.json"));
    assert!(config.noise.is_disabled());
}

/// Test that invalid values are rejected by the parser
#[test]
fn test_invalid_argument_values() {
    assert!(CliArgs::try_parse_from(["test", "--lathe-count", "-1"]).is_err());
    assert!(CliArgs::try_parse_from(["test", "--min-duration", "soon"]).is_err());
    assert!(CliArgs::try_parse_from(["test", "--unknown-flag"]).is_err());
}

/// Test that CLI arguments take precedence over a config file
#[test]
fn test_cli_overrides_config_file() {
    let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
    temp_file
        .write_all(br#"{"lathe_count": 7, "jobs_per_lathe": 5, "operations": ["drilling"]}"#)
        .unwrap();
    temp_file.flush().unwrap();

    let path = temp_file.path().to_str().unwrap();
    let cli_args =
        CliArgs::try_parse_from(["test", "--config", path, "--lathe-count", "2"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();

    // CLI wins
    assert_eq!(config.lathe_count, 2);
    // File beats defaults
    assert_eq!(config.jobs_per_lathe, 5);
    assert_eq!(config.operations, vec!["drilling"]);
    // Defaults fill the rest
    assert_eq!(config.materials.len(), 3);
}

/// Test that a bad config file surfaces a typed error
#[test]
fn test_malformed_config_file() {
    let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
    temp_file.write_all(b"{ lathe_count: ").unwrap();
    temp_file.flush().unwrap();

    let path = temp_file.path().to_str().unwrap();
    let cli_args = CliArgs::try_parse_from(["test", "--config", path]).unwrap();
    assert!(matches!(
        SimulationConfig::from_cli_args(cli_args),
        Err(ConfigError::JsonError(_))
    ));
}

/// Test that a saved configuration loads back unchanged
#[test]
fn test_saved_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lathe.json");

    let config = SimulationConfig {
        lathe_count: 3,
        materials: vec!["Aluminum".to_string()],
        seed: Some(5),
        ..Default::default()
    };
    config.save_to_file(&path).unwrap();

    let loaded = SimulationConfig::from_file(&path).unwrap();
    assert_eq!(loaded.lathe_count, 3);
    assert_eq!(loaded.materials, vec!["Aluminum"]);
    assert_eq!(loaded.seed, Some(5));
    assert_eq!(loaded.noise, config.noise);
}

/// Test that values accepted by the parser can still fail validation
#[test]
fn test_parsed_values_are_validated() {
    let cli_args = CliArgs::try_parse_from([
        "test",
        "--min-duration",
        "30",
        "--max-duration",
        "5",
        "--materials",
        "Mild Steel,Brass",
    ])
    .unwrap();

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert!(config.validate().is_err());
}
