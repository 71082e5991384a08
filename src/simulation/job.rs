//! Job records and telemetry documents
//!
//! These are the record shapes handed to a [`TelemetrySink`](crate::simulation::TelemetrySink).
//! Field names follow the document layout the downstream collections expect
//! (`JobID`, `LatheID`, `ToolWear`, ...).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::telemetry::{SensorSample, SimulationRun};
use crate::types::{JobId, JobStatus, LatheId, Material, Operation};

/// One machining job on one lathe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Job identifier, unique across the run
    #[serde(rename = "JobID")]
    pub job_id: JobId,
    /// Lathe running the job
    #[serde(rename = "LatheID")]
    pub lathe_id: LatheId,
    /// Workpiece material
    #[serde(rename = "Material")]
    pub material: Material,
    /// Lathe operation
    #[serde(rename = "JobType")]
    pub job_type: Operation,
    /// Tool number
    #[serde(rename = "ToolNo")]
    pub tool_no: u32,
    /// When the job started
    #[serde(rename = "StartTime")]
    pub start_time: DateTime<Utc>,
    /// Lifecycle state
    #[serde(rename = "Status")]
    pub status: JobStatus,
    /// Tool wear at the last sample, 0 until completed
    #[serde(rename = "FinalToolWear")]
    pub final_tool_wear: f64,
    /// Timestamp of the last sample, set on completion
    #[serde(rename = "EndTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl JobRecord {
    /// Create a running job record for a simulation run
    pub fn start(
        job_id: JobId,
        lathe_id: LatheId,
        run: &SimulationRun,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            job_id,
            lathe_id,
            material: run.material(),
            job_type: run.operation(),
            tool_no: run.tool_index(),
            start_time,
            status: JobStatus::Running,
            final_tool_wear: 0.0,
            end_time: None,
        }
    }

    /// Mark the job completed
    pub fn complete(&mut self, final_tool_wear: f64, end_time: DateTime<Utc>) {
        self.status = JobStatus::Completed;
        self.final_tool_wear = final_tool_wear;
        self.end_time = Some(end_time);
    }

    /// Whether the job has been completed
    pub fn is_completed(&self) -> bool {
        self.status == JobStatus::Completed
    }
}

/// One persisted sensor reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryDocument {
    /// Reading time
    pub timestamp: DateTime<Utc>,
    /// Owning job
    #[serde(rename = "JobID")]
    pub job_id: JobId,
    /// Lathe the reading came from
    #[serde(rename = "LatheID")]
    pub lathe_id: LatheId,
    /// Workpiece material
    #[serde(rename = "Material")]
    pub material: Material,
    /// Lathe operation
    #[serde(rename = "JobType")]
    pub job_type: Operation,
    /// Tool number
    #[serde(rename = "ToolNo")]
    pub tool_no: u32,
    /// Workpiece temperature in °C
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    /// Vibration amplitude
    #[serde(rename = "Vibration")]
    pub vibration: f64,
    /// Spindle speed
    #[serde(rename = "RPM")]
    pub rpm: f64,
    /// Power draw in kW
    #[serde(rename = "Power")]
    pub power: f64,
    /// Tool wear percentage
    #[serde(rename = "ToolWear")]
    pub tool_wear: f64,
}

impl TelemetryDocument {
    /// Build the document for a sample of `job` taken at `timestamp`
    pub fn from_sample(job: &JobRecord, timestamp: DateTime<Utc>, sample: &SensorSample) -> Self {
        Self {
            timestamp,
            job_id: job.job_id.clone(),
            lathe_id: job.lathe_id,
            material: job.material,
            job_type: job.job_type,
            tool_no: job.tool_no,
            temperature: sample.temperature_c,
            vibration: sample.vibration,
            rpm: sample.rpm,
            power: sample.power_kw,
            tool_wear: sample.tool_wear_pct,
        }
    }
}

/// Timestamp of the `index`-th sample: `start + index * interval`
pub fn sample_timestamp(
    start_time: DateTime<Utc>,
    sample_interval_seconds: u32,
    index: usize,
) -> DateTime<Utc> {
    start_time + Duration::seconds(sample_interval_seconds as i64 * index as i64)
}
