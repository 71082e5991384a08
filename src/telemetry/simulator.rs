//! Correlated sensor time-series generation
//!
//! The simulator derives base machine parameters once per run and then walks
//! the sample grid, computing tool wear first and feeding it into RPM, power,
//! temperature and vibration. Each field gets its own independent Gaussian
//! draw per sample, taken from the caller's random source in a fixed order
//! (wear, RPM, power, temperature, vibration), so a seeded source always
//! reproduces the same series.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::simulation::{SimulationError, SimulationResult};
use crate::telemetry::model::{
    MachineParameters, SensorSample, SimulationRun, DEFAULT_SAMPLE_INTERVAL_SECONDS,
};
use crate::telemetry::profiles::{
    AMBIENT_TEMPERATURE_C, COOLING_EFFICIENCY, HEAT_CONVERSION, MAX_TEMPERATURE_C,
    MAX_TOOL_WEAR_PCT, MIN_POWER_KW, MIN_RPM,
};

/// Standard deviations of the per-sample noise terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseModel {
    /// Relative noise on the wear multiplier (mean 1)
    pub wear_sigma: f64,
    /// Relative noise on spindle speed
    pub rpm_sigma: f64,
    /// Relative noise on power draw
    pub power_sigma: f64,
    /// Absolute noise on temperature, in °C
    pub temperature_sigma_c: f64,
    /// Relative noise on vibration
    pub vibration_sigma: f64,
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self {
            wear_sigma: 0.05,
            rpm_sigma: 0.03,
            power_sigma: 0.05,
            temperature_sigma_c: 2.0,
            vibration_sigma: 0.1,
        }
    }
}

impl NoiseModel {
    /// Noise model with every amplitude forced to zero
    pub fn disabled() -> Self {
        Self {
            wear_sigma: 0.0,
            rpm_sigma: 0.0,
            power_sigma: 0.0,
            temperature_sigma_c: 0.0,
            vibration_sigma: 0.0,
        }
    }

    /// Whether every amplitude is zero
    pub fn is_disabled(&self) -> bool {
        self.fields().iter().all(|(_, sigma)| *sigma == 0.0)
    }

    /// Reject negative or non-finite amplitudes
    pub fn validate(&self) -> SimulationResult<()> {
        for (field, sigma) in self.fields() {
            if !(sigma.is_finite() && sigma >= 0.0) {
                return Err(SimulationError::configuration_error(format!(
                    "noise amplitude {} must be finite and non-negative, got {}",
                    field, sigma
                )));
            }
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("wear_sigma", self.wear_sigma),
            ("rpm_sigma", self.rpm_sigma),
            ("power_sigma", self.power_sigma),
            ("temperature_sigma_c", self.temperature_sigma_c),
            ("vibration_sigma", self.vibration_sigma),
        ]
    }
}

/// Generates sensor series for simulation runs
#[derive(Debug, Clone, Default)]
pub struct TelemetrySimulator {
    noise: NoiseModel,
}

impl TelemetrySimulator {
    /// Create a simulator with the given noise amplitudes
    pub fn new(noise: NoiseModel) -> SimulationResult<Self> {
        noise.validate()?;
        Ok(Self { noise })
    }

    /// Noise amplitudes in use
    pub fn noise(&self) -> &NoiseModel {
        &self.noise
    }

    /// Simulate a run, drawing base parameters and noise from `rng`
    #[instrument(skip(self, run, rng), fields(
        material = %run.material(),
        operation = %run.operation(),
        tool_index = run.tool_index(),
        samples = run.sample_count(),
    ))]
    pub fn simulate<R: Rng>(&self, run: &SimulationRun, rng: &mut R) -> Vec<SensorSample> {
        let params = MachineParameters::derive(run, rng);
        debug!(
            "Base parameters: {:.0} RPM, {:.2} kW",
            params.base_rpm, params.base_power_kw
        );
        self.simulate_with_parameters(run, &params, rng)
    }

    /// Simulate a run from explicit base parameters
    pub fn simulate_with_parameters<R: Rng>(
        &self,
        run: &SimulationRun,
        params: &MachineParameters,
        rng: &mut R,
    ) -> Vec<SensorSample> {
        let count = run.sample_count();
        let step = run.sample_step_minutes();
        let mut samples = Vec::with_capacity(count);

        for i in 0..count {
            let elapsed = i as f64 * step;
            samples.push(self.sample_at(run, params, elapsed, rng));
        }

        samples
    }

    fn sample_at<R: Rng>(
        &self,
        run: &SimulationRun,
        params: &MachineParameters,
        elapsed_minutes: f64,
        rng: &mut R,
    ) -> SensorSample {
        let material = run.material();
        let profile = material.profile();

        let wear_noise = gaussian(rng, 1.0, self.noise.wear_sigma);
        let tool_wear_pct = (material.tool_wear_rate() * elapsed_minutes * wear_noise)
            .clamp(0.0, MAX_TOOL_WEAR_PCT);

        let rpm_noise = gaussian(rng, 0.0, self.noise.rpm_sigma);
        let rpm = (params.base_rpm * (1.0 - tool_wear_pct / 500.0) * (1.0 + rpm_noise)).max(MIN_RPM);

        let power_noise = gaussian(rng, 0.0, self.noise.power_sigma);
        let power_factor = 1.0 + (tool_wear_pct / 100.0) * 0.5;
        let power_kw = (params.base_power_kw * power_factor * (1.0 + power_noise)).max(MIN_POWER_KW);

        let heat_generated = power_kw * 1000.0 * HEAT_CONVERSION;
        let temperature_rise = heat_generated * elapsed_minutes * 60.0
            / (profile.specific_heat * profile.hardness);
        let temperature_noise = gaussian(rng, 0.0, self.noise.temperature_sigma_c);
        let temperature_c = (AMBIENT_TEMPERATURE_C
            + temperature_rise * (1.0 - COOLING_EFFICIENCY)
            + temperature_noise)
            .clamp(AMBIENT_TEMPERATURE_C, MAX_TEMPERATURE_C);

        let vibration_noise = gaussian(rng, 0.0, self.noise.vibration_sigma);
        let vibration = (material.vibration_base()
            * (rpm / 1000.0)
            * (1.0 + tool_wear_pct / 50.0)
            * (1.0 + vibration_noise))
            .max(0.0);

        SensorSample { elapsed_minutes, tool_wear_pct, rpm, power_kw, temperature_c, vibration }
    }
}

fn gaussian<R: Rng>(rng: &mut R, mean: f64, sigma: f64) -> f64 {
    let z: f64 = StandardNormal.sample(rng);
    mean + sigma * z
}

/// Simulate a job at the default 5 second sample interval
///
/// Material and operation are given by name; unknown names fail with
/// `UnknownMaterial` / `UnknownOperation` before anything is sampled.
pub fn simulate<R: Rng>(
    material: &str,
    operation: &str,
    tool_index: u32,
    duration_minutes: f64,
    rng: &mut R,
) -> SimulationResult<Vec<SensorSample>> {
    simulate_with_interval(
        material,
        operation,
        tool_index,
        duration_minutes,
        DEFAULT_SAMPLE_INTERVAL_SECONDS,
        rng,
    )
}

/// Simulate a job with an explicit sample interval and default noise
pub fn simulate_with_interval<R: Rng>(
    material: &str,
    operation: &str,
    tool_index: u32,
    duration_minutes: f64,
    sample_interval_seconds: u32,
    rng: &mut R,
) -> SimulationResult<Vec<SensorSample>> {
    let run = SimulationRun::parse(
        material,
        operation,
        tool_index,
        duration_minutes,
        sample_interval_seconds,
    )?;
    Ok(TelemetrySimulator::default().simulate(&run, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Material, Operation};
    use rand::{rngs::StdRng, SeedableRng};

    fn quiet_simulator() -> TelemetrySimulator {
        TelemetrySimulator::new(NoiseModel::disabled()).unwrap()
    }

    #[test]
    fn test_noise_model_validation() {
        assert!(NoiseModel::default().validate().is_ok());
        assert!(NoiseModel::disabled().is_disabled());
        assert!(!NoiseModel::default().is_disabled());

        let negative = NoiseModel { rpm_sigma: -0.1, ..NoiseModel::default() };
        assert!(matches!(
            TelemetrySimulator::new(negative),
            Err(SimulationError::ConfigurationError(_))
        ));

        let nan = NoiseModel { temperature_sigma_c: f64::NAN, ..NoiseModel::default() };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_noise_free_sample_matches_closed_form() {
        let run = SimulationRun::new(Material::MildSteel, Operation::Turning, 1, 10.0, 60).unwrap();
        let params = MachineParameters { base_rpm: 1000.0, base_power_kw: 4.2 };
        let mut rng = StdRng::seed_from_u64(1);
        let samples = quiet_simulator().simulate_with_parameters(&run, &params, &mut rng);

        assert_eq!(samples.len(), 10);
        let s = samples[4];
        let t = 4.0;
        let wear = 0.15 * t;
        assert!((s.elapsed_minutes - t).abs() < 1e-12);
        assert!((s.tool_wear_pct - wear).abs() < 1e-12);
        assert!((s.rpm - 1000.0 * (1.0 - wear / 500.0)).abs() < 1e-9);

        let power = 4.2 * (1.0 + wear / 100.0 * 0.5);
        assert!((s.power_kw - power).abs() < 1e-9);

        let rise = power * 1000.0 * 0.8 * t * 60.0 / (460.0 * 120.0);
        assert!((s.temperature_c - (25.0 + rise * 0.3)).abs() < 1e-9);

        let vibration = 2.5 * (s.rpm / 1000.0) * (1.0 + wear / 50.0);
        assert!((s.vibration - vibration).abs() < 1e-9);
    }

    #[test]
    fn test_first_sample_starts_at_ambient() {
        let run = SimulationRun::new(Material::Aluminum, Operation::Facing, 2, 1.0, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let samples = quiet_simulator().simulate(&run, &mut rng);

        assert_eq!(samples[0].elapsed_minutes, 0.0);
        assert_eq!(samples[0].tool_wear_pct, 0.0);
        assert_eq!(samples[0].temperature_c, AMBIENT_TEMPERATURE_C);
    }

    #[test]
    fn test_long_wood_job_saturates_temperature() {
        // Wood has tiny hardness, so heat accumulates past the clamp
        let run = SimulationRun::new(Material::Wood, Operation::Drilling, 10, 30.0, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let samples = TelemetrySimulator::default().simulate(&run, &mut rng);

        let last = samples.last().unwrap();
        assert_eq!(last.temperature_c, MAX_TEMPERATURE_C);
        assert!(samples.iter().all(|s| s.temperature_c <= MAX_TEMPERATURE_C));
    }

    #[test]
    fn test_wear_saturates_at_one_hundred() {
        let run = SimulationRun::new(Material::MildSteel, Operation::Turning, 1, 900.0, 60).unwrap();
        let params = MachineParameters { base_rpm: 800.0, base_power_kw: 4.2 };
        let mut rng = StdRng::seed_from_u64(3);
        let samples = TelemetrySimulator::default().simulate_with_parameters(&run, &params, &mut rng);

        let last = samples.last().unwrap();
        assert_eq!(last.tool_wear_pct, MAX_TOOL_WEAR_PCT);
        assert!(samples.iter().all(|s| s.rpm >= MIN_RPM && s.power_kw >= MIN_POWER_KW));
    }

    #[test]
    fn test_simulate_by_name_rejects_unknown_operation() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = simulate("Aluminum", "grinding", 1, 10.0, &mut rng);
        assert!(matches!(result, Err(SimulationError::UnknownOperation(name)) if name == "grinding"));
    }
}
