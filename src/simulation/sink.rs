//! Telemetry sinks
//!
//! A sink receives job records and batches of telemetry documents. The
//! in-memory sink backs tests and statistics; the JSONL sink writes one JSON
//! document per line, either to files in an output directory or to stdout.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::simulation::job::{JobRecord, TelemetryDocument};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::JobId;

/// File name for job records inside an output directory
pub const JOBS_FILE_NAME: &str = "jobs.jsonl";

/// File name for telemetry documents inside an output directory
pub const TELEMETRY_FILE_NAME: &str = "telemetry.jsonl";

/// Destination for generated jobs and telemetry
pub trait TelemetrySink {
    /// Register a newly started job; job ids must be unique
    fn write_job(&mut self, job: &JobRecord) -> SimulationResult<()>;

    /// Write one batch of documents, returning how many were written
    fn write_batch(&mut self, documents: &[TelemetryDocument]) -> SimulationResult<usize>;

    /// Record the final state of a previously registered job
    fn complete_job(&mut self, job: &JobRecord) -> SimulationResult<()>;

    /// Record a registered job that stopped before completing
    ///
    /// The job keeps its running state and no end time.
    fn fail_job(&mut self, job: &JobRecord) -> SimulationResult<()>;

    /// Flush buffered output
    fn flush(&mut self) -> SimulationResult<()> {
        Ok(())
    }
}

/// Sink that keeps everything in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    jobs: Vec<JobRecord>,
    failed_jobs: Vec<JobId>,
    documents: Vec<TelemetryDocument>,
    batch_sizes: Vec<usize>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Job records in registration order, with their latest state
    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    /// Look up a job by id
    pub fn job(&self, job_id: &JobId) -> Option<&JobRecord> {
        self.jobs.iter().find(|job| &job.job_id == job_id)
    }

    /// Ids of jobs reported as failed
    pub fn failed_jobs(&self) -> &[JobId] {
        &self.failed_jobs
    }

    /// All documents in write order
    pub fn documents(&self) -> &[TelemetryDocument] {
        &self.documents
    }

    /// Documents belonging to one job
    pub fn documents_for_job<'a>(
        &'a self,
        job_id: &'a JobId,
    ) -> impl Iterator<Item = &'a TelemetryDocument> + 'a {
        self.documents.iter().filter(move |doc| &doc.job_id == job_id)
    }

    /// Size of each batch write, in order
    pub fn batch_sizes(&self) -> &[usize] {
        &self.batch_sizes
    }
}

impl TelemetrySink for MemorySink {
    fn write_job(&mut self, job: &JobRecord) -> SimulationResult<()> {
        if self.job(&job.job_id).is_some() {
            return Err(SimulationError::sink_error(format!("duplicate job id {}", job.job_id)));
        }
        self.jobs.push(job.clone());
        Ok(())
    }

    fn write_batch(&mut self, documents: &[TelemetryDocument]) -> SimulationResult<usize> {
        self.documents.extend_from_slice(documents);
        self.batch_sizes.push(documents.len());
        Ok(documents.len())
    }

    fn complete_job(&mut self, job: &JobRecord) -> SimulationResult<()> {
        match self.jobs.iter_mut().find(|existing| existing.job_id == job.job_id) {
            Some(existing) => {
                *existing = job.clone();
                Ok(())
            }
            None => Err(SimulationError::sink_error(format!("unknown job id {}", job.job_id))),
        }
    }

    fn fail_job(&mut self, job: &JobRecord) -> SimulationResult<()> {
        self.complete_job(job)?;
        self.failed_jobs.push(job.job_id.clone());
        Ok(())
    }
}

/// Sink writing JSON lines
///
/// Telemetry documents are written as they arrive. Job records are held until
/// completion or failure and then written once, in their final state. A job id
/// can only be registered once per sink.
pub struct JsonlSink {
    telemetry: Box<dyn Write>,
    jobs: Option<Box<dyn Write>>,
    pending_jobs: HashMap<JobId, JobRecord>,
    seen_jobs: HashSet<JobId>,
    documents_written: usize,
    jobs_written: usize,
    directory: Option<PathBuf>,
}

impl fmt::Debug for JsonlSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonlSink")
            .field("directory", &self.directory)
            .field("pending_jobs", &self.pending_jobs.len())
            .field("documents_written", &self.documents_written)
            .field("jobs_written", &self.jobs_written)
            .finish()
    }
}

impl JsonlSink {
    /// Write `jobs.jsonl` and `telemetry.jsonl` into `directory`, creating it if needed
    pub fn to_directory<P: AsRef<Path>>(directory: P) -> SimulationResult<Self> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory)?;

        let telemetry = BufWriter::new(File::create(directory.join(TELEMETRY_FILE_NAME))?);
        let jobs = BufWriter::new(File::create(directory.join(JOBS_FILE_NAME))?);

        info!("Writing JSONL output to {}", directory.display());
        Ok(Self {
            telemetry: Box::new(telemetry),
            jobs: Some(Box::new(jobs)),
            pending_jobs: HashMap::new(),
            seen_jobs: HashSet::new(),
            documents_written: 0,
            jobs_written: 0,
            directory: Some(directory.to_path_buf()),
        })
    }

    /// Write telemetry documents to stdout; job records are not emitted
    pub fn stdout() -> Self {
        Self::from_writers(Box::new(BufWriter::new(io::stdout())), None)
    }

    /// Build a sink over arbitrary writers
    pub fn from_writers(telemetry: Box<dyn Write>, jobs: Option<Box<dyn Write>>) -> Self {
        Self {
            telemetry,
            jobs,
            pending_jobs: HashMap::new(),
            seen_jobs: HashSet::new(),
            documents_written: 0,
            jobs_written: 0,
            directory: None,
        }
    }

    /// Number of telemetry lines written so far
    pub fn documents_written(&self) -> usize {
        self.documents_written
    }

    /// Number of job lines written so far
    pub fn jobs_written(&self) -> usize {
        self.jobs_written
    }

    /// Output directory, if writing to files
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    fn finish_job(&mut self, job: &JobRecord) -> SimulationResult<()> {
        if self.pending_jobs.remove(&job.job_id).is_none() {
            return Err(SimulationError::sink_error(format!("unknown job id {}", job.job_id)));
        }
        if let Some(writer) = self.jobs.as_mut() {
            let line = serde_json::to_string(job)?;
            writeln!(writer, "{}", line)?;
            self.jobs_written += 1;
        }
        Ok(())
    }
}

impl TelemetrySink for JsonlSink {
    fn write_job(&mut self, job: &JobRecord) -> SimulationResult<()> {
        if !self.seen_jobs.insert(job.job_id.clone()) {
            return Err(SimulationError::sink_error(format!("duplicate job id {}", job.job_id)));
        }
        self.pending_jobs.insert(job.job_id.clone(), job.clone());
        Ok(())
    }

    fn write_batch(&mut self, documents: &[TelemetryDocument]) -> SimulationResult<usize> {
        for document in documents {
            let line = serde_json::to_string(document)?;
            writeln!(self.telemetry, "{}", line)?;
        }
        self.documents_written += documents.len();
        debug!("Wrote batch of {} telemetry lines", documents.len());
        Ok(documents.len())
    }

    fn complete_job(&mut self, job: &JobRecord) -> SimulationResult<()> {
        self.finish_job(job)
    }

    fn fail_job(&mut self, job: &JobRecord) -> SimulationResult<()> {
        debug!("Writing running record for failed job {}", job.job_id);
        self.finish_job(job)
    }

    fn flush(&mut self) -> SimulationResult<()> {
        self.telemetry.flush()?;
        if let Some(writer) = self.jobs.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}
