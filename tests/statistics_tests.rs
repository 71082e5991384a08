//! Tests for telemetry statistics
//!
//! These tests verify that the grouped min/avg/max summaries agree with the
//! documents a run produced.

use lathe_telemetry_simulator::simulation::{
    BatchJobGenerator, MemorySink, TelemetryReport, TelemetryStatistics,
};
use lathe_telemetry_simulator::types::{LatheId, Operation, SimulationConfig};

fn generate(seed: u64) -> (TelemetryStatistics, MemorySink) {
    let config = SimulationConfig {
        lathe_count: 2,
        jobs_per_lathe: 3,
        min_duration_minutes: 1.0,
        max_duration_minutes: 2.0,
        seed: Some(seed),
        ..Default::default()
    };
    let mut generator = BatchJobGenerator::new(config, MemorySink::new()).unwrap();
    generator.generate_all().unwrap();
    (generator.get_statistics().clone(), generator.into_sink())
}

/// Per-lathe summaries match a direct scan of the documents
#[test]
fn test_lathe_summary_matches_documents() {
    let (statistics, sink) = generate(11);

    for lathe in [LatheId::new(1), LatheId::new(2)] {
        let temperatures: Vec<f64> = sink
            .documents()
            .iter()
            .filter(|doc| doc.lathe_id == lathe)
            .map(|doc| doc.temperature)
            .collect();
        let stats = statistics.lathe_stats(lathe).unwrap();

        let min = temperatures.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = temperatures.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let avg = temperatures.iter().sum::<f64>() / temperatures.len() as f64;

        assert_eq!(stats.sample_count, temperatures.len());
        assert_eq!(stats.temperature.min, min);
        assert_eq!(stats.temperature.max, max);
        assert!((stats.temperature.avg - avg).abs() < 1e-9);
    }
}

/// Job type groups partition the samples
#[test]
fn test_job_type_groups_partition_samples() {
    let (statistics, sink) = generate(12);

    let grouped: usize = Operation::ALL
        .iter()
        .filter_map(|op| statistics.job_type_stats(*op))
        .map(|stats| stats.sample_count)
        .sum();
    assert_eq!(grouped, sink.documents().len());

    for operation in Operation::ALL {
        let present = sink.documents().iter().any(|doc| doc.job_type == operation);
        assert_eq!(statistics.job_type_stats(operation).is_some(), present);
    }
}

/// Summaries respect the field ordering min <= avg <= max
#[test]
fn test_summary_ordering() {
    let (statistics, _) = generate(13);
    let report = statistics.report();

    for stats in report.by_lathe.values().chain(report.by_job_type.values()) {
        for field in [stats.temperature, stats.vibration, stats.rpm, stats.power, stats.tool_wear] {
            assert!(field.min <= field.avg + 1e-9);
            assert!(field.avg <= field.max + 1e-9);
        }
        assert!(stats.rpm.min >= 100.0);
        assert!(stats.temperature.max <= 300.0);
    }
}

/// The report survives a JSON round trip
#[test]
fn test_report_json_round_trip() {
    let (statistics, _) = generate(14);
    let report = statistics.report();

    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: TelemetryReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.run_id, report.run_id);
    assert_eq!(parsed.completed_jobs, 6);
    assert_eq!(parsed.seed, Some(14));
    assert!(parsed.by_lathe.keys().eq(report.by_lathe.keys()));
    assert!(parsed.by_job_type.keys().eq(report.by_job_type.keys()));
    assert!(parsed.final_tool_wear.keys().eq(report.final_tool_wear.keys()));

    for (lathe, stats) in &report.by_lathe {
        let restored = &parsed.by_lathe[lathe];
        assert_eq!(restored.sample_count, stats.sample_count);
        assert!((restored.rpm.avg - stats.rpm.avg).abs() < 1e-9);
    }
}

/// Summaries from a plain document slice match the run's own
#[test]
fn test_from_documents_matches_run_statistics() {
    let (statistics, sink) = generate(15);
    let rebuilt = TelemetryStatistics::from_documents(sink.documents());

    assert_eq!(rebuilt.total_samples, statistics.total_samples);
    assert_eq!(rebuilt.report().by_lathe, statistics.report().by_lathe);
    assert_eq!(rebuilt.report().total_lathes, 2);
}
