//! Simulation inputs and outputs
//!
//! A [`SimulationRun`] is the validated, immutable description of one job to
//! simulate. [`MachineParameters`] are the nominal operating values derived
//! once per run, and [`SensorSample`] is one point of the produced series.

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{Material, Operation};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default spacing between consecutive samples
pub const DEFAULT_SAMPLE_INTERVAL_SECONDS: u32 = 5;

/// Most samples a single run may produce
pub const MAX_SAMPLES_PER_RUN: usize = 1_000_000;

/// Validated input configuration for one simulated job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    material: Material,
    operation: Operation,
    tool_index: u32,
    duration_minutes: f64,
    sample_interval_seconds: u32,
}

impl SimulationRun {
    /// Build a run from already-typed material and operation
    ///
    /// Fails with `InvalidDuration` unless the duration is positive, finite
    /// and yields at most [`MAX_SAMPLES_PER_RUN`] samples, `InvalidToolIndex`
    /// for a zero tool index, and `InvalidSampleInterval` for a zero interval.
    pub fn new(
        material: Material,
        operation: Operation,
        tool_index: u32,
        duration_minutes: f64,
        sample_interval_seconds: u32,
    ) -> SimulationResult<Self> {
        if !(duration_minutes.is_finite() && duration_minutes > 0.0) {
            return Err(SimulationError::InvalidDuration(duration_minutes));
        }
        if tool_index == 0 {
            return Err(SimulationError::InvalidToolIndex(tool_index));
        }
        if sample_interval_seconds == 0 {
            return Err(SimulationError::InvalidSampleInterval(sample_interval_seconds));
        }
        if duration_minutes * 60.0 / sample_interval_seconds as f64 > MAX_SAMPLES_PER_RUN as f64 {
            return Err(SimulationError::InvalidDuration(duration_minutes));
        }

        Ok(Self { material, operation, tool_index, duration_minutes, sample_interval_seconds })
    }

    /// Build a run from material and operation names
    ///
    /// Names are resolved before any numeric validation, so an unknown
    /// material is reported even when other inputs are also invalid.
    pub fn parse(
        material: &str,
        operation: &str,
        tool_index: u32,
        duration_minutes: f64,
        sample_interval_seconds: u32,
    ) -> SimulationResult<Self> {
        let material: Material = material.parse()?;
        let operation: Operation = operation.parse()?;
        Self::new(material, operation, tool_index, duration_minutes, sample_interval_seconds)
    }

    /// Workpiece material
    pub fn material(&self) -> Material {
        self.material
    }

    /// Lathe operation
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Tool index (1-based)
    pub fn tool_index(&self) -> u32 {
        self.tool_index
    }

    /// Job length in minutes
    pub fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    /// Spacing between samples in seconds
    pub fn sample_interval_seconds(&self) -> u32 {
        self.sample_interval_seconds
    }

    /// Tool diameter in mm: `10 + 2 * tool_index`
    pub fn tool_diameter_mm(&self) -> f64 {
        10.0 + 2.0 * self.tool_index as f64
    }

    /// Number of samples the run produces: `floor(duration * 60 / interval)`
    pub fn sample_count(&self) -> usize {
        (self.duration_minutes * 60.0 / self.sample_interval_seconds as f64).floor() as usize
    }

    /// Spacing between samples in minutes
    pub fn sample_step_minutes(&self) -> f64 {
        self.sample_interval_seconds as f64 / 60.0
    }
}

/// Nominal operating parameters, fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineParameters {
    /// Spindle speed before wear and noise
    pub base_rpm: f64,
    /// Power draw before wear and noise, in kW
    pub base_power_kw: f64,
}

impl MachineParameters {
    /// Draw the base RPM from the material range and compute base power
    pub fn derive<R: Rng>(run: &SimulationRun, rng: &mut R) -> Self {
        let base_rpm = rng.gen_range(run.material().base_rpm_range()) as f64;
        let base_power_kw = run.operation().power_factor() * (run.tool_diameter_mm() / 10.0);
        Self { base_rpm, base_power_kw }
    }
}

/// One simulated sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Minutes since the job started
    pub elapsed_minutes: f64,
    /// Cumulative tool wear, 0-100 %
    pub tool_wear_pct: f64,
    /// Spindle speed
    pub rpm: f64,
    /// Spindle power draw in kW
    pub power_kw: f64,
    /// Workpiece temperature in °C
    pub temperature_c: f64,
    /// Vibration amplitude
    pub vibration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_run_validation_order() {
        // Unknown names win over bad numbers
        assert!(matches!(
            SimulationRun::parse("Nonexistent", "turning", 0, -1.0, 0),
            Err(SimulationError::UnknownMaterial(_))
        ));
        assert!(matches!(
            SimulationRun::parse("Wood", "milling", 0, -1.0, 0),
            Err(SimulationError::UnknownOperation(_))
        ));
        assert!(matches!(
            SimulationRun::parse("Wood", "facing", 0, -1.0, 0),
            Err(SimulationError::InvalidDuration(_))
        ));
        assert!(matches!(
            SimulationRun::parse("Wood", "facing", 0, 1.0, 0),
            Err(SimulationError::InvalidToolIndex(0))
        ));
        assert!(matches!(
            SimulationRun::parse("Wood", "facing", 1, 1.0, 0),
            Err(SimulationError::InvalidSampleInterval(0))
        ));
    }

    #[test]
    fn test_non_finite_duration_rejected() {
        for duration in [0.0, f64::NAN, f64::INFINITY, -5.0] {
            let result = SimulationRun::new(Material::Wood, Operation::Boring, 1, duration, 5);
            assert!(matches!(result, Err(SimulationError::InvalidDuration(_))));
        }
    }

    #[test]
    fn test_oversized_duration_rejected() {
        let result = SimulationRun::new(Material::Wood, Operation::Turning, 1, 1e300, 5);
        assert!(matches!(result, Err(SimulationError::InvalidDuration(_))));

        // Right at the limit at a 1 s interval
        let minutes = MAX_SAMPLES_PER_RUN as f64 / 60.0;
        let run = SimulationRun::new(Material::Wood, Operation::Turning, 1, minutes, 1).unwrap();
        assert_eq!(run.sample_count(), MAX_SAMPLES_PER_RUN);
        assert!(SimulationRun::new(Material::Wood, Operation::Turning, 1, minutes + 1.0, 1).is_err());
    }

    #[test]
    fn test_derived_quantities() {
        let run = SimulationRun::new(Material::MildSteel, Operation::Turning, 3, 10.0, 5).unwrap();
        assert_eq!(run.tool_diameter_mm(), 16.0);
        assert_eq!(run.sample_count(), 120);
        assert!((run.sample_step_minutes() - 5.0 / 60.0).abs() < 1e-12);

        let short = SimulationRun::new(Material::MildSteel, Operation::Turning, 1, 0.05, 5).unwrap();
        assert_eq!(short.sample_count(), 0);
    }

    #[test]
    fn test_machine_parameters() {
        let run = SimulationRun::new(Material::Aluminum, Operation::Drilling, 5, 1.0, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let params = MachineParameters::derive(&run, &mut rng);

        assert!((1500.0..=2500.0).contains(&params.base_rpm));
        assert_eq!(params.base_rpm.fract(), 0.0);
        // 5.0 kW * (20 mm / 10)
        assert!((params.base_power_kw - 10.0).abs() < 1e-12);
    }
}
