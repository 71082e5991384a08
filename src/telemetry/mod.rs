//! Sensor telemetry model
//!
//! This module contains the physically-motivated simulation of lathe sensor
//! readings: static material and operation tables, the validated run
//! description, and the simulator that turns a run into an ordered series of
//! samples.
//!
//! # Usage Example
//!
//! ```rust
//! use lathe_telemetry_simulator::telemetry::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let samples = simulate("Mild Steel", "turning", 1, 10.0, &mut rng).unwrap();
//! assert_eq!(samples.len(), 120);
//! ```

pub mod model;
pub mod profiles;
pub mod simulator;

pub use model::*;
pub use profiles::*;
pub use simulator::*;
