//! Core types and identifiers for the lathe telemetry simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: lathe numbers, `JOB{lathe}{job}` job ids and UUID run ids
//! - **Enums**: type-safe materials, operations and job states
//! - **Configuration**: run configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use lathe_telemetry_simulator::types::*;
//!
//! let lathe = LatheId::new(3);
//! let job = JobId::for_job(lathe, 1);
//! assert_eq!(job.as_str(), "JOB0301");
//!
//! let material: Material = "Mild Steel".parse().unwrap();
//! assert_eq!(material, Material::MildSteel);
//!
//! let config = SimulationConfig {
//!     lathe_count: 2,
//!     jobs_per_lathe: 1,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
