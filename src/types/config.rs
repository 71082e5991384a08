//! Configuration structures for the lathe telemetry simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control how many lathes and jobs are generated and how each job is sampled.

use crate::telemetry::{NoiseModel, MAX_SAMPLES_PER_RUN};
use crate::types::{Material, Operation, MAX_JOB_NUMBER, MAX_LATHE_NUMBER};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lathe-telemetry-simulator",
    version,
    about = "Lathe Telemetry Simulator - Generates correlated lathe sensor readings",
    long_about = "Generates machining jobs for a fleet of lathes and simulates tool wear, spindle speed, power draw, workpiece temperature and vibration for each job, writing job records and telemetry documents as JSON lines.

EXAMPLES:
    # Run with default settings (10 lathes, 2 jobs each, telemetry to stdout)
    lathe-telemetry-simulator

    # Write jobs.jsonl and telemetry.jsonl into a directory
    lathe-telemetry-simulator --output-dir out/

    # Reproducible run restricted to aluminum turning and facing
    lathe-telemetry-simulator --seed 42 --materials Aluminum --operations turning,facing

    # Generate configuration template
    lathe-telemetry-simulator --print-config > my-config.json

    # Validate configuration without running
    lathe-telemetry-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of lathes to simulate
    #[arg(long, help = "Number of lathes to simulate")]
    pub lathe_count: Option<u32>,

    /// Number of jobs generated per lathe
    #[arg(long, help = "Number of jobs per lathe")]
    pub jobs_per_lathe: Option<u32>,

    /// Minimum job duration in minutes
    #[arg(long, help = "Minimum job duration in minutes")]
    pub min_duration: Option<f64>,

    /// Maximum job duration in minutes
    #[arg(long, help = "Maximum job duration in minutes")]
    pub max_duration: Option<f64>,

    /// Highest tool number a job may use
    #[arg(long, help = "Highest tool number (tools are numbered from 1)")]
    pub max_tool_no: Option<u32>,

    /// Seconds between consecutive sensor samples
    #[arg(
        long,
        help = "Seconds between sensor samples",
        long_help = "Fixed spacing between consecutive sensor samples, in seconds. Must be at least 1. Default: 5"
    )]
    pub sample_interval: Option<u32>,

    /// Telemetry documents per sink write
    #[arg(long, help = "Telemetry documents per batch write")]
    pub batch_size: Option<usize>,

    /// Materials jobs are drawn from
    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma-separated materials to draw jobs from",
        long_help = "Comma-separated list of workpiece materials. Known materials: Mild Steel, Aluminum, Wood. Default: all"
    )]
    pub materials: Option<Vec<String>>,

    /// Operations jobs are drawn from
    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma-separated operations to draw jobs from",
        long_help = "Comma-separated list of lathe operations. Known operations: turning, facing, threading, drilling, boring, knurling. Default: all"
    )]
    pub operations: Option<Vec<String>>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Directory for jobs.jsonl and telemetry.jsonl
    #[arg(
        long,
        help = "Output directory for JSONL files",
        long_help = "Directory receiving jobs.jsonl and telemetry.jsonl. When omitted, telemetry documents are written to stdout."
    )]
    pub output_dir: Option<String>,

    /// Path for the aggregated statistics report
    #[arg(long, help = "Write aggregated min/avg/max statistics as JSON to this path")]
    pub stats_output: Option<String>,

    /// Disable all sensor noise
    #[arg(long, help = "Disable sensor noise (deterministic readings given a seed)")]
    pub no_noise: bool,

    /// Directory for rolling log files
    #[arg(long, help = "Also write JSON logs to daily rolling files in this directory")]
    pub log_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of lathes to simulate
    pub lathe_count: Option<u32>,

    /// Number of jobs generated per lathe
    pub jobs_per_lathe: Option<u32>,

    /// Minimum job duration in minutes
    pub min_duration_minutes: Option<f64>,

    /// Maximum job duration in minutes
    pub max_duration_minutes: Option<f64>,

    /// Highest tool number a job may use
    pub max_tool_no: Option<u32>,

    /// Seconds between consecutive sensor samples
    pub sample_interval_seconds: Option<u32>,

    /// Telemetry documents per sink write
    pub batch_size: Option<usize>,

    /// Materials jobs are drawn from
    pub materials: Option<Vec<String>>,

    /// Operations jobs are drawn from
    pub operations: Option<Vec<String>>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Directory for JSONL output
    pub output_dir: Option<String>,

    /// Path for the aggregated statistics report
    pub stats_output: Option<String>,

    /// Sensor noise amplitudes
    pub noise: Option<NoiseModel>,
}

/// Configuration for a lathe telemetry generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of lathes to simulate
    pub lathe_count: u32,

    /// Number of jobs generated per lathe
    pub jobs_per_lathe: u32,

    /// Minimum job duration in minutes
    pub min_duration_minutes: f64,

    /// Maximum job duration in minutes
    pub max_duration_minutes: f64,

    /// Highest tool number a job may use (tools are numbered from 1)
    pub max_tool_no: u32,

    /// Seconds between consecutive sensor samples
    pub sample_interval_seconds: u32,

    /// Telemetry documents per sink write
    pub batch_size: usize,

    /// Materials jobs are drawn from
    pub materials: Vec<String>,

    /// Operations jobs are drawn from
    pub operations: Vec<String>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Directory for JSONL output (stdout when absent)
    pub output_dir: Option<String>,

    /// Path for the aggregated statistics report
    pub stats_output: Option<String>,

    /// Sensor noise amplitudes
    pub noise: NoiseModel,
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Lathe count is invalid
    #[error("Lathe count must be between 1 and 99, got {0}")]
    InvalidLatheCount(u32),

    /// Jobs per lathe is invalid
    #[error("Jobs per lathe must be between 1 and 99, got {0}")]
    InvalidJobsPerLathe(u32),

    /// Duration range is invalid
    #[error(
        "Invalid duration range: min ({min}) must be positive and <= max ({max}), and max must stay within the per-job sample limit"
    )]
    InvalidDurationRange {
        /// Minimum duration in minutes
        min: f64,
        /// Maximum duration in minutes
        max: f64,
    },

    /// Tool count is invalid
    #[error("Max tool number must be greater than 0, got {0}")]
    InvalidToolCount(u32),

    /// Sample interval is invalid
    #[error("Sample interval must be at least 1 second, got {0}")]
    InvalidSampleInterval(u32),

    /// Batch size is invalid
    #[error("Batch size must be greater than 0, got {0}")]
    InvalidBatchSize(usize),

    /// No materials configured
    #[error("At least one material must be configured")]
    EmptyMaterials,

    /// No operations configured
    #[error("At least one operation must be configured")]
    EmptyOperations,

    /// Material name has no profile
    #[error("Unknown material in configuration: {0}")]
    UnknownMaterial(String),

    /// Operation name has no power factor
    #[error("Unknown operation in configuration: {0}")]
    UnknownOperation(String),

    /// Noise amplitudes are invalid
    #[error("Invalid noise model: {0}")]
    InvalidNoise(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            lathe_count: 10,
            jobs_per_lathe: 2,
            min_duration_minutes: 5.0,
            max_duration_minutes: 30.0,
            max_tool_no: 10,
            sample_interval_seconds: 5,
            batch_size: 1000,
            materials: Material::ALL.iter().map(|m| m.name().to_string()).collect(),
            operations: Operation::ALL.iter().map(|o| o.name().to_string()).collect(),
            seed: None,
            output_dir: None,
            stats_output: None,
            noise: NoiseModel::default(),
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            lathe_count: config_file.lathe_count.unwrap_or(defaults.lathe_count),
            jobs_per_lathe: config_file.jobs_per_lathe.unwrap_or(defaults.jobs_per_lathe),
            min_duration_minutes: config_file
                .min_duration_minutes
                .unwrap_or(defaults.min_duration_minutes),
            max_duration_minutes: config_file
                .max_duration_minutes
                .unwrap_or(defaults.max_duration_minutes),
            max_tool_no: config_file.max_tool_no.unwrap_or(defaults.max_tool_no),
            sample_interval_seconds: config_file
                .sample_interval_seconds
                .unwrap_or(defaults.sample_interval_seconds),
            batch_size: config_file.batch_size.unwrap_or(defaults.batch_size),
            materials: config_file.materials.unwrap_or(defaults.materials),
            operations: config_file.operations.unwrap_or(defaults.operations),
            seed: config_file.seed.or(defaults.seed),
            output_dir: config_file.output_dir.or(defaults.output_dir),
            stats_output: config_file.stats_output.or(defaults.stats_output),
            noise: config_file.noise.unwrap_or(defaults.noise),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.lathe_count {
            config.lathe_count = value;
        }
        if let Some(value) = args.jobs_per_lathe {
            config.jobs_per_lathe = value;
        }
        if let Some(value) = args.min_duration {
            config.min_duration_minutes = value;
        }
        if let Some(value) = args.max_duration {
            config.max_duration_minutes = value;
        }
        if let Some(value) = args.max_tool_no {
            config.max_tool_no = value;
        }
        if let Some(value) = args.sample_interval {
            config.sample_interval_seconds = value;
        }
        if let Some(value) = args.batch_size {
            config.batch_size = value;
        }
        if let Some(value) = args.materials {
            config.materials = value;
        }
        if let Some(value) = args.operations {
            config.operations = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.output_dir {
            config.output_dir = Some(value);
        }
        if let Some(value) = args.stats_output {
            config.stats_output = Some(value);
        }
        if args.no_noise {
            config.noise = NoiseModel::disabled();
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        // Job ids encode both numbers in two digits
        if self.lathe_count == 0 || self.lathe_count > MAX_LATHE_NUMBER {
            return Err(ConfigValidationError::InvalidLatheCount(self.lathe_count));
        }

        if self.jobs_per_lathe == 0 || self.jobs_per_lathe > MAX_JOB_NUMBER {
            return Err(ConfigValidationError::InvalidJobsPerLathe(self.jobs_per_lathe));
        }

        let (min, max) = self.duration_range();
        let max_samples = max * 60.0 / self.sample_interval_seconds.max(1) as f64;
        if !(min.is_finite()
            && max.is_finite()
            && min > 0.0
            && min <= max
            && max_samples <= MAX_SAMPLES_PER_RUN as f64)
        {
            return Err(ConfigValidationError::InvalidDurationRange { min, max });
        }

        if self.max_tool_no == 0 {
            return Err(ConfigValidationError::InvalidToolCount(self.max_tool_no));
        }

        if self.sample_interval_seconds == 0 {
            return Err(ConfigValidationError::InvalidSampleInterval(
                self.sample_interval_seconds,
            ));
        }

        if self.batch_size == 0 {
            return Err(ConfigValidationError::InvalidBatchSize(self.batch_size));
        }

        self.parsed_materials()?;
        self.parsed_operations()?;

        self.noise
            .validate()
            .map_err(|e| ConfigValidationError::InvalidNoise(e.to_string()))?;

        Ok(())
    }

    /// Resolve configured material names against the material profiles
    pub fn parsed_materials(&self) -> Result<Vec<Material>, ConfigValidationError> {
        if self.materials.is_empty() {
            return Err(ConfigValidationError::EmptyMaterials);
        }
        self.materials
            .iter()
            .map(|name| {
                name.parse::<Material>()
                    .map_err(|_| ConfigValidationError::UnknownMaterial(name.clone()))
            })
            .collect()
    }

    /// Resolve configured operation names against the power factor table
    pub fn parsed_operations(&self) -> Result<Vec<Operation>, ConfigValidationError> {
        if self.operations.is_empty() {
            return Err(ConfigValidationError::EmptyOperations);
        }
        self.operations
            .iter()
            .map(|name| {
                name.parse::<Operation>()
                    .map_err(|_| ConfigValidationError::UnknownOperation(name.clone()))
            })
            .collect()
    }

    /// Get the job duration range as a tuple
    pub fn duration_range(&self) -> (f64, f64) {
        (self.min_duration_minutes, self.max_duration_minutes)
    }

    /// Total number of jobs a run generates
    pub fn total_jobs(&self) -> u64 {
        self.lathe_count as u64 * self.jobs_per_lathe as u64
    }

    /// Sample count range per job implied by the duration range
    pub fn samples_per_job_range(&self) -> (usize, usize) {
        let per_minute = 60.0 / self.sample_interval_seconds.max(1) as f64;
        (
            (self.min_duration_minutes * per_minute).floor() as usize,
            (self.max_duration_minutes * per_minute).floor() as usize,
        )
    }
}
