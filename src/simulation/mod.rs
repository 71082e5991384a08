//! Batch generation, sinks, statistics and error handling
//!
//! # Overview
//!
//! The simulation module turns single-job telemetry series into a full run:
//!
//! - **BatchJobGenerator**: creates jobs for every lathe and writes their telemetry
//! - **JobRecord / TelemetryDocument**: the persisted record shapes
//! - **TelemetrySink**: destinations for records (`MemorySink`, `JsonlSink`)
//! - **TelemetryStatistics**: min/avg/max summaries per lathe and job type
//! - **SimulationError**: error handling for simulation operations
//!
//! # Usage Example
//!
//! ```rust
//! use lathe_telemetry_simulator::simulation::*;
//! use lathe_telemetry_simulator::types::*;
//!
//! let config = SimulationConfig {
//!     lathe_count: 1,
//!     jobs_per_lathe: 2,
//!     min_duration_minutes: 1.0,
//!     max_duration_minutes: 2.0,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut generator = BatchJobGenerator::new(config, MemorySink::new()).unwrap();
//! generator.generate_all().unwrap();
//!
//! assert_eq!(generator.get_statistics().completed_jobs, 2);
//! assert_eq!(generator.sink().jobs().len(), 2);
//! ```

pub mod batch_generator;
pub mod error;
pub mod job;
pub mod logging;
pub mod sink;
pub mod statistics;

// Re-export all public types for convenience
pub use batch_generator::*;
pub use error::*;
pub use job::*;
pub use logging::*;
pub use sink::*;
pub use statistics::*;
