//! Batch job generator
//!
//! This module contains the BatchJobGenerator that drives a whole run: for
//! every lathe it generates a sequence of jobs, simulates each job's telemetry
//! and writes the resulting documents through a [`TelemetrySink`] in batches.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, instrument, warn};

use crate::simulation::job::{sample_timestamp, JobRecord, TelemetryDocument};
use crate::simulation::{SimulationError, SimulationResult, TelemetrySink, TelemetryStatistics};
use crate::telemetry::{SimulationRun, TelemetrySimulator};
use crate::types::{JobId, LatheId, Material, Operation, RunId, SimulationConfig};

/// Batch generator that processes lathes and their jobs sequentially
///
/// Jobs on the same lathe run back to back: each job starts one sample
/// interval after the previous job's last sample. A job that fails is logged
/// and counted in the statistics, and the next job on that lathe takes its
/// start time. Every job draws from its
/// own `StdRng` seeded from the run's master seed, the lathe and the job
/// number, so a fixed seed reproduces the same output.
#[derive(Debug)]
pub struct BatchJobGenerator<S: TelemetrySink> {
    config: SimulationConfig,
    materials: Vec<Material>,
    operations: Vec<Operation>,
    simulator: TelemetrySimulator,
    sink: S,
    statistics: TelemetryStatistics,
    master_seed: u64,
    start_time: DateTime<Utc>,
}

impl<S: TelemetrySink> BatchJobGenerator<S> {
    /// Create a generator for a validated configuration
    ///
    /// When the configuration carries no seed a random master seed is drawn
    /// and logged so the run can be replayed.
    #[instrument(skip(config, sink), fields(lathes = config.lathe_count, jobs_per_lathe = config.jobs_per_lathe))]
    pub fn new(config: SimulationConfig, sink: S) -> SimulationResult<Self> {
        config.validate()?;
        let materials = config.parsed_materials()?;
        let operations = config.parsed_operations()?;
        let simulator = TelemetrySimulator::new(config.noise)?;

        let master_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let run_id = RunId::new();
        let statistics =
            TelemetryStatistics::new(run_id, Some(master_seed), config.lathe_count as usize);

        info!(
            "Initializing batch job generator: run {}, seed {}, {} lathes x {} jobs",
            run_id, master_seed, config.lathe_count, config.jobs_per_lathe
        );

        Ok(Self {
            config,
            materials,
            operations,
            simulator,
            sink,
            statistics,
            master_seed,
            start_time: Utc::now(),
        })
    }

    /// Start the first job on every lathe at `start_time` instead of now
    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    /// Master seed the per-job generators derive from
    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Generate every job on every lathe
    ///
    /// Per-job failures do not stop the run; check
    /// [`TelemetryStatistics::failed_jobs`] afterwards. Only a failing final
    /// flush is returned as an error.
    #[instrument(skip(self), fields(run_id = %self.statistics.run_id(), total_jobs = self.config.total_jobs()))]
    pub fn generate_all(&mut self) -> SimulationResult<()> {
        info!(
            "Starting batch generation for {} jobs",
            self.config.total_jobs()
        );
        let started = std::time::Instant::now();

        for lathe_number in 1..=self.config.lathe_count {
            let lathe = LatheId::new(lathe_number);
            let mut next_start = self.start_time;

            for job_number in 1..=self.config.jobs_per_lathe {
                match self.generate_job(lathe, job_number, next_start) {
                    Ok(job) => {
                        let last = job.end_time.unwrap_or(job.start_time);
                        next_start =
                            last + Duration::seconds(self.config.sample_interval_seconds as i64);
                    }
                    Err(e) => {
                        let job_id = JobId::for_job(lathe, job_number);
                        error!("Job {} failed ({}): {}", job_id, e.category(), e);
                        self.statistics.record_failed_job(job_id, &e);
                    }
                }
            }
            debug!("Lathe {} finished", lathe);
        }

        self.sink.flush()?;
        self.statistics.set_simulation_duration(started.elapsed());

        info!(
            "Batch generation completed: {} jobs, {} failed, {} samples in {:.2}s",
            self.statistics.completed_jobs,
            self.statistics.failed_jobs,
            self.statistics.total_samples,
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Generate one job with randomly chosen parameters
    pub fn generate_job(
        &mut self,
        lathe: LatheId,
        job_number: u32,
        start_time: DateTime<Utc>,
    ) -> SimulationResult<JobRecord> {
        let mut rng = StdRng::seed_from_u64(job_seed(self.master_seed, lathe, job_number));
        let run = self.choose_run(&mut rng)?;
        self.run_job(JobId::for_job(lathe, job_number), lathe, &run, &mut rng, start_time)
    }

    /// Simulate a prepared run and write it through the sink
    ///
    /// The job is registered as running, its documents are written in
    /// chunks of `batch_size`, and it is completed with the final sample's
    /// wear and timestamp. A run with no samples completes with zero wear
    /// and ends at its start time. If writing fails after registration the
    /// sink is told the job failed, so it keeps the running record.
    #[instrument(skip(self, job_id, run, rng), fields(job_id = %job_id, material = %run.material(), operation = %run.operation()))]
    pub fn run_job<R: Rng>(
        &mut self,
        job_id: JobId,
        lathe: LatheId,
        run: &SimulationRun,
        rng: &mut R,
        start_time: DateTime<Utc>,
    ) -> SimulationResult<JobRecord> {
        let job = JobRecord::start(job_id, lathe, run, start_time);
        self.sink.write_job(&job)?;

        match self.write_telemetry(&job, run, rng) {
            Ok(completed) => Ok(completed),
            Err(e) => {
                if let Err(fail_error) = self.sink.fail_job(&job) {
                    warn!("Could not record failure of job {}: {}", job.job_id, fail_error);
                }
                Err(e)
            }
        }
    }

    fn write_telemetry<R: Rng>(
        &mut self,
        job: &JobRecord,
        run: &SimulationRun,
        rng: &mut R,
    ) -> SimulationResult<JobRecord> {
        let start_time = job.start_time;
        let samples = self.simulator.simulate(run, rng);
        let interval = run.sample_interval_seconds();
        let documents: Vec<TelemetryDocument> = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                TelemetryDocument::from_sample(job, sample_timestamp(start_time, interval, i), sample)
            })
            .collect();

        for chunk in documents.chunks(self.config.batch_size) {
            let written = self.sink.write_batch(chunk)?;
            if written != chunk.len() {
                return Err(SimulationError::sink_error(format!(
                    "sink accepted {} of {} documents for {}",
                    written,
                    chunk.len(),
                    job.job_id
                )));
            }
            self.statistics.record_documents(chunk);
        }

        let final_tool_wear = samples.last().map_or(0.0, |sample| sample.tool_wear_pct);
        let end_time = documents.last().map_or(start_time, |doc| doc.timestamp);
        let mut completed = job.clone();
        completed.complete(final_tool_wear, end_time);
        self.sink.complete_job(&completed)?;
        self.statistics.record_completed_job(&completed);

        debug!(
            "Job {} completed: {} samples, final wear {:.3}%",
            completed.job_id,
            documents.len(),
            final_tool_wear
        );
        Ok(completed)
    }

    /// Get the run statistics
    pub fn get_statistics(&self) -> &TelemetryStatistics {
        &self.statistics
    }

    /// Borrow the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the generator, returning the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn choose_run<R: Rng>(&self, rng: &mut R) -> SimulationResult<SimulationRun> {
        let material = *self
            .materials
            .choose(rng)
            .ok_or_else(|| SimulationError::configuration_error("No materials configured"))?;
        let operation = *self
            .operations
            .choose(rng)
            .ok_or_else(|| SimulationError::configuration_error("No operations configured"))?;
        let tool_index = rng.gen_range(1..=self.config.max_tool_no);

        let (min, max) = self.config.duration_range();
        let duration = if min < max { rng.gen_range(min..max) } else { min };

        SimulationRun::new(
            material,
            operation,
            tool_index,
            duration,
            self.config.sample_interval_seconds,
        )
    }
}

/// Seed for one job's generator, mixed from the master seed and job coordinates
pub fn job_seed(master_seed: u64, lathe: LatheId, job_number: u32) -> u64 {
    let key = ((lathe.number() as u64) << 32) | job_number as u64;
    let mut z = master_seed ^ key.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
