//! Statistics collection and reporting
//!
//! Aggregates telemetry documents into min/avg/max summaries per sensor field,
//! grouped by lathe, by job type and by material, alongside run counters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::simulation::job::{JobRecord, TelemetryDocument};
use crate::simulation::SimulationError;
use crate::types::{JobId, LatheId, Material, Operation, RunId};

/// Minimum, mean and maximum of one sensor field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Smallest observed value
    pub min: f64,
    /// Arithmetic mean
    pub avg: f64,
    /// Largest observed value
    pub max: f64,
}

/// Running min/sum/max for one field
#[derive(Debug, Clone, Copy)]
pub struct FieldAccumulator {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl Default for FieldAccumulator {
    fn default() -> Self {
        Self { count: 0, sum: 0.0, min: f64::INFINITY, max: f64::NEG_INFINITY }
    }
}

impl FieldAccumulator {
    /// Add one observation
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Summary of the observations, `None` when there were none
    pub fn finish(&self) -> Option<FieldStats> {
        if self.count == 0 {
            return None;
        }
        Some(FieldStats { min: self.min, avg: self.sum / self.count as f64, max: self.max })
    }
}

/// Per-field summaries for a group of telemetry documents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorStats {
    /// Workpiece temperature
    #[serde(rename = "Temperature")]
    pub temperature: FieldStats,
    /// Vibration amplitude
    #[serde(rename = "Vibration")]
    pub vibration: FieldStats,
    /// Spindle speed
    #[serde(rename = "RPM")]
    pub rpm: FieldStats,
    /// Power draw
    #[serde(rename = "Power")]
    pub power: FieldStats,
    /// Tool wear
    #[serde(rename = "ToolWear")]
    pub tool_wear: FieldStats,
    /// Number of documents summarized
    #[serde(rename = "SampleCount")]
    pub sample_count: usize,
}

/// Accumulates [`SensorStats`] one document at a time
#[derive(Debug, Clone, Default)]
pub struct SensorStatsAccumulator {
    temperature: FieldAccumulator,
    vibration: FieldAccumulator,
    rpm: FieldAccumulator,
    power: FieldAccumulator,
    tool_wear: FieldAccumulator,
    count: usize,
}

impl SensorStatsAccumulator {
    /// Add one document
    pub fn push(&mut self, document: &TelemetryDocument) {
        self.temperature.push(document.temperature);
        self.vibration.push(document.vibration);
        self.rpm.push(document.rpm);
        self.power.push(document.power);
        self.tool_wear.push(document.tool_wear);
        self.count += 1;
    }

    /// Summary of the documents, `None` when there were none
    pub fn finish(&self) -> Option<SensorStats> {
        Some(SensorStats {
            temperature: self.temperature.finish()?,
            vibration: self.vibration.finish()?,
            rpm: self.rpm.finish()?,
            power: self.power.finish()?,
            tool_wear: self.tool_wear.finish()?,
            sample_count: self.count,
        })
    }
}

/// Serializable snapshot of a generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryReport {
    /// Run identifier
    pub run_id: RunId,
    /// Master seed the run was generated from
    pub seed: Option<u64>,
    /// Lathes in the run
    pub total_lathes: usize,
    /// Jobs completed
    pub completed_jobs: usize,
    /// Jobs that stopped with an error
    #[serde(default)]
    pub failed_jobs: usize,
    /// Telemetry documents written
    pub total_samples: usize,
    /// Wall-clock generation time in seconds
    pub simulation_duration_secs: f64,
    /// Field summaries per lathe
    pub by_lathe: BTreeMap<LatheId, SensorStats>,
    /// Field summaries per job type
    pub by_job_type: BTreeMap<Operation, SensorStats>,
    /// Field summaries per material
    pub by_material: BTreeMap<Material, SensorStats>,
    /// Final tool wear of each completed job
    pub final_tool_wear: BTreeMap<JobId, f64>,
    /// Error message of each failed job
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub failures: BTreeMap<JobId, String>,
}

/// Statistics collector for a generation run
#[derive(Debug, Clone)]
pub struct TelemetryStatistics {
    run_id: RunId,
    seed: Option<u64>,
    total_lathes: usize,
    /// Jobs completed so far
    pub completed_jobs: usize,
    /// Jobs that failed so far
    pub failed_jobs: usize,
    /// Telemetry documents recorded so far
    pub total_samples: usize,
    by_lathe: BTreeMap<LatheId, SensorStatsAccumulator>,
    by_job_type: BTreeMap<Operation, SensorStatsAccumulator>,
    by_material: BTreeMap<Material, SensorStatsAccumulator>,
    final_tool_wear: BTreeMap<JobId, f64>,
    failures: BTreeMap<JobId, String>,
    simulation_duration: Duration,
}

impl TelemetryStatistics {
    /// Create an empty collector for a run
    pub fn new(run_id: RunId, seed: Option<u64>, total_lathes: usize) -> Self {
        Self {
            run_id,
            seed,
            total_lathes,
            completed_jobs: 0,
            failed_jobs: 0,
            total_samples: 0,
            by_lathe: BTreeMap::new(),
            by_job_type: BTreeMap::new(),
            by_material: BTreeMap::new(),
            final_tool_wear: BTreeMap::new(),
            failures: BTreeMap::new(),
            simulation_duration: Duration::from_secs(0),
        }
    }

    /// Summarize an existing set of documents
    pub fn from_documents(documents: &[TelemetryDocument]) -> Self {
        let lathes = documents
            .iter()
            .map(|doc| doc.lathe_id)
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        let mut statistics = Self::new(RunId::new(), None, lathes);
        statistics.record_documents(documents);
        statistics
    }

    /// Run identifier
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Add a batch of telemetry documents
    pub fn record_documents(&mut self, documents: &[TelemetryDocument]) {
        for document in documents {
            self.by_lathe.entry(document.lathe_id).or_default().push(document);
            self.by_job_type.entry(document.job_type).or_default().push(document);
            self.by_material.entry(document.material).or_default().push(document);
        }
        self.total_samples += documents.len();
    }

    /// Count a completed job and keep its final tool wear
    pub fn record_completed_job(&mut self, job: &JobRecord) {
        self.completed_jobs += 1;
        self.final_tool_wear.insert(job.job_id.clone(), job.final_tool_wear);
    }

    /// Count a failed job and keep its error message
    ///
    /// Documents the job wrote before failing stay in the field summaries.
    pub fn record_failed_job(&mut self, job_id: JobId, error: &SimulationError) {
        self.failed_jobs += 1;
        self.failures.insert(job_id, error.to_string());
    }

    /// Error messages of failed jobs
    pub fn failures(&self) -> &BTreeMap<JobId, String> {
        &self.failures
    }

    /// Set the wall-clock generation time
    pub fn set_simulation_duration(&mut self, duration: Duration) {
        self.simulation_duration = duration;
    }

    /// Wall-clock generation time
    pub fn simulation_duration(&self) -> Duration {
        self.simulation_duration
    }

    /// Field summaries for one lathe
    pub fn lathe_stats(&self, lathe_id: LatheId) -> Option<SensorStats> {
        self.by_lathe.get(&lathe_id).and_then(SensorStatsAccumulator::finish)
    }

    /// Field summaries for one job type
    pub fn job_type_stats(&self, operation: Operation) -> Option<SensorStats> {
        self.by_job_type.get(&operation).and_then(SensorStatsAccumulator::finish)
    }

    /// Field summaries for one material
    pub fn material_stats(&self, material: Material) -> Option<SensorStats> {
        self.by_material.get(&material).and_then(SensorStatsAccumulator::finish)
    }

    /// Mean final tool wear across completed jobs
    pub fn average_final_tool_wear(&self) -> f64 {
        if self.final_tool_wear.is_empty() {
            0.0
        } else {
            self.final_tool_wear.values().sum::<f64>() / self.final_tool_wear.len() as f64
        }
    }

    /// Average samples per completed job
    pub fn average_samples_per_job(&self) -> f64 {
        if self.completed_jobs == 0 {
            0.0
        } else {
            self.total_samples as f64 / self.completed_jobs as f64
        }
    }

    /// Serializable snapshot
    pub fn report(&self) -> TelemetryReport {
        TelemetryReport {
            run_id: self.run_id,
            seed: self.seed,
            total_lathes: self.total_lathes,
            completed_jobs: self.completed_jobs,
            failed_jobs: self.failed_jobs,
            total_samples: self.total_samples,
            simulation_duration_secs: self.simulation_duration.as_secs_f64(),
            by_lathe: finish_all(&self.by_lathe),
            by_job_type: finish_all(&self.by_job_type),
            by_material: finish_all(&self.by_material),
            final_tool_wear: self.final_tool_wear.clone(),
            failures: self.failures.clone(),
        }
    }

    /// Human readable summary for the end of a run
    pub fn generate_summary_output(&self) -> String {
        let mut output = String::new();

        output.push_str("Lathe Telemetry Simulation Complete\n");
        output.push_str("===================================\n\n");

        output.push_str("Run Summary:\n");
        output.push_str(&format!("   Run: {}\n", self.run_id));
        if let Some(seed) = self.seed {
            output.push_str(&format!("   Seed: {}\n", seed));
        }
        output.push_str(&format!(
            "   Duration: {:.2} seconds\n",
            self.simulation_duration.as_secs_f64()
        ));
        output.push_str(&format!(
            "   Jobs Completed: {} across {} lathes\n",
            self.completed_jobs, self.total_lathes
        ));
        if self.failed_jobs > 0 {
            output.push_str(&format!("   Jobs Failed: {}\n", self.failed_jobs));
        }
        output.push_str(&format!(
            "   Samples Written: {} (avg {:.1}/job)\n",
            self.total_samples,
            self.average_samples_per_job()
        ));
        output.push_str(&format!(
            "   Average Final Tool Wear: {:.2}%\n\n",
            self.average_final_tool_wear()
        ));

        if !self.by_job_type.is_empty() {
            output.push_str("By Job Type (avg):\n");
            for (operation, accumulator) in &self.by_job_type {
                if let Some(stats) = accumulator.finish() {
                    output.push_str(&format!(
                        "   {:<10} {:>6} samples | {:>7.1} RPM | {:>6.2} kW | {:>6.1} °C | vib {:>5.2} | wear {:>5.2}%\n",
                        operation.name(),
                        stats.sample_count,
                        stats.rpm.avg,
                        stats.power.avg,
                        stats.temperature.avg,
                        stats.vibration.avg,
                        stats.tool_wear.avg
                    ));
                }
            }
            output.push('\n');
        }

        if !self.by_material.is_empty() {
            output.push_str("By Material (max temperature / max wear):\n");
            for (material, accumulator) in &self.by_material {
                if let Some(stats) = accumulator.finish() {
                    output.push_str(&format!(
                        "   {:<10} {:>6.1} °C | {:>5.2}%\n",
                        material.name(),
                        stats.temperature.max,
                        stats.tool_wear.max
                    ));
                }
            }
        }

        output
    }
}

fn finish_all<K: Ord + Clone>(
    groups: &BTreeMap<K, SensorStatsAccumulator>,
) -> BTreeMap<K, SensorStats> {
    groups
        .iter()
        .filter_map(|(key, accumulator)| accumulator.finish().map(|stats| (key.clone(), stats)))
        .collect()
}
