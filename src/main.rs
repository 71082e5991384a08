// Lathe Telemetry Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/lathe-telemetry-simulator --output-dir out/
// ```
//
// Or with a fixed seed and telemetry on stdout:
//
// ```console
// $ ./target/release/lathe-telemetry-simulator --seed 42 --lathe-count 3 --verbose
// ```

use anyhow::{Context, Result};
use clap::Parser;
use lathe_telemetry_simulator::simulation::{
    BatchJobGenerator, JsonlSink, LoggingConfig, TelemetrySink, TelemetryStatistics,
};
use lathe_telemetry_simulator::types::config::CliArgs;
use lathe_telemetry_simulator::types::SimulationConfig;
use std::fs;
use std::process;
use tracing::{error, info};

fn main() {
    if let Err(e) = run() {
        error!("Simulation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        let json = SimulationConfig::default()
            .print_json()
            .context("Failed to serialize default configuration")?;
        println!("{}", json);
        return Ok(());
    }

    let mut logging = if args.debug {
        LoggingConfig::debug()
    } else if args.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::new()
    };
    if let Some(log_dir) = &args.log_dir {
        logging = logging.with_file_logging(log_dir.clone());
    }
    // Held until exit so file logs are flushed
    let _log_guard = logging
        .init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting Lathe Telemetry Simulator");

    let dry_run = args.dry_run;
    let config =
        SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_startup_banner(&config);

    let statistics = match &config.output_dir {
        Some(dir) => {
            let sink = JsonlSink::to_directory(dir)
                .with_context(|| format!("Failed to open output directory '{}'", dir))?;
            generate(config.clone(), sink)?
        }
        None => generate(config.clone(), JsonlSink::stdout())?,
    };

    eprintln!("{}", statistics.generate_summary_output());

    if let Some(path) = &config.stats_output {
        let json = serde_json::to_string_pretty(&statistics.report())
            .context("Failed to serialize statistics report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write statistics to '{}'", path))?;
        eprintln!("Statistics written to: {}", path);
    }

    if statistics.failed_jobs > 0 {
        for (job_id, message) in statistics.failures() {
            eprintln!("  {} failed: {}", job_id, message);
        }
        anyhow::bail!(
            "{} of {} jobs failed",
            statistics.failed_jobs,
            statistics.failed_jobs + statistics.completed_jobs
        );
    }

    info!("Lathe Telemetry Simulator completed successfully");
    Ok(())
}

/// Run batch generation into `sink` and return the run statistics
fn generate<S: TelemetrySink>(
    config: SimulationConfig,
    sink: S,
) -> Result<TelemetryStatistics> {
    let mut generator =
        BatchJobGenerator::new(config, sink).context("Failed to initialize batch generator")?;
    eprintln!("Master seed: {}", generator.master_seed());

    generator.generate_all().context("Batch job generation failed")?;
    Ok(generator.get_statistics().clone())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Lathe Telemetry Simulator");
    eprintln!("=========================");
    eprintln!("Correlated sensor telemetry for lathe machining jobs");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    let (min_samples, max_samples) = config.samples_per_job_range();

    eprintln!("Configuration:");
    eprintln!("  Lathes: {}", config.lathe_count);
    eprintln!("  Jobs per Lathe: {}", config.jobs_per_lathe);
    eprintln!(
        "  Job Duration: {:.1} - {:.1} minutes",
        config.min_duration_minutes, config.max_duration_minutes
    );
    eprintln!("  Tools: 1 - {}", config.max_tool_no);
    eprintln!("  Sample Interval: {} s", config.sample_interval_seconds);
    eprintln!("  Batch Size: {}", config.batch_size);
    eprintln!("  Materials: {}", config.materials.join(", "));
    eprintln!("  Operations: {}", config.operations.join(", "));
    if config.noise.is_disabled() {
        eprintln!("  Noise: disabled");
    }
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    match &config.output_dir {
        Some(dir) => eprintln!("  Output Directory: {}", dir),
        None => eprintln!("  Output: telemetry lines on stdout"),
    }

    eprintln!("\nEstimated Scale:");
    eprintln!("  Total Jobs: {}", config.total_jobs());
    eprintln!(
        "  Samples per Job: {} - {}",
        min_samples, max_samples
    );
    eprintln!();
}
