//! Lathe Telemetry Simulator
//!
//! Generates synthetic, physically plausible sensor telemetry for machining
//! jobs on industrial lathes, for feeding dashboards and analytics pipelines.
//!
//! # Overview
//!
//! For a single job (material, operation, tool, duration) the simulator
//! produces a time series of correlated readings sampled at a fixed interval:
//! tool wear grows with elapsed time, spindle speed sags as the tool wears,
//! power draw rises with wear, workpiece temperature follows the heat put in
//! by the cut, and vibration scales with speed and wear. Every reading is
//! perturbed by Gaussian noise drawn from an injected random source, so runs
//! are reproducible from a seed.
//!
//! ## Key Features
//!
//! - **Material and operation lookups**: enum-keyed tables, unknown names are typed errors
//! - **Single-job simulation**: bounded, correlated sensor series
//! - **Batch generation**: many jobs across many lathes, written through a sink
//! - **Statistics**: min/avg/max per field grouped by lathe and job type
//!
//! ## Quick Start
//!
//! ```rust
//! use lathe_telemetry_simulator::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let samples = simulate("Mild Steel", "turning", 1, 10.0, &mut rng)?;
//! assert_eq!(samples.len(), 120);
//! assert!(samples.iter().all(|s| s.rpm >= 100.0));
//! # Ok::<(), SimulationError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, materials, operations and configuration
//! - [`telemetry`]: lookup tables and the single-job simulator
//! - [`simulation`]: batch generation, sinks, statistics and errors

#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod simulation;
pub mod telemetry;
pub mod types;

// Core types and identifiers
pub use types::{
    ConfigValidationError, JobId, JobStatus, LatheId, Material, Operation, RunId,
    SimulationConfig,
};

// Single-job simulation
pub use telemetry::{
    simulate, simulate_with_interval, MachineParameters, NoiseModel, SensorSample,
    SimulationRun, TelemetrySimulator,
};

// Batch generation and output
pub use simulation::{
    BatchJobGenerator, JobRecord, JsonlSink, MemorySink, SimulationError, SimulationResult,
    TelemetryDocument, TelemetryReport, TelemetrySink, TelemetryStatistics,
};
