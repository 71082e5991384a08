// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use lathe_telemetry_simulator::*;


mod cli_argument_parsing_tests;
mod statistics_tests;

#[test]
fn test_core_id_types() {
    let lathe = LatheId::new(12);
    assert_eq!(lathe.to_string(), "Lathe12");

    let job = JobId::for_job(lathe, 3);
    assert_eq!(job.as_str(), "JOB1203");

    let run_id = RunId::new();
    assert_ne!(run_id, RunId::new());
    assert!(run_id.to_string().starts_with("RUN_"));
}

#[test]
fn test_enum_types() {
    for material in Material::ALL {
        assert!(!material.to_string().is_empty());
        assert_eq!(material.name().parse::<Material>().unwrap(), material);
    }

    for operation in Operation::ALL {
        assert!(!operation.to_string().is_empty());
        assert_eq!(operation.name().parse::<Operation>().unwrap(), operation);
    }

    assert_eq!(JobStatus::Running.to_string(), "Running");
    assert_eq!(JobStatus::Completed.to_string(), "Completed");
}

#[test]
fn test_serialization_names() {
    assert_eq!(serde_json::to_string(&Material::MildSteel).unwrap(), "\"Mild Steel\"");
    assert_eq!(serde_json::to_string(&Operation::Knurling).unwrap(), "\"knurling\"");

    let material: Material = serde_json::from_str("\"Aluminum\"").unwrap();
    assert_eq!(material, Material::Aluminum);
}

#[test]
fn test_error_classification() {
    let error = "Brass".parse::<Material>().unwrap_err();
    assert!(matches!(error, SimulationError::UnknownMaterial(ref name) if name == "Brass"));
    assert!(!error.is_recoverable());
    assert_eq!(error.category(), "Input Validation");

    let error = SimulationError::sink_error("disk full");
    assert!(error.is_recoverable());
    assert_eq!(error.category(), "Sink");
}

#[test]
fn test_single_job_through_public_api() {
    use rand::{rngs::StdRng, SeedableRng};

    let run = SimulationRun::parse("wood", "Drilling", 2, 5.0, 5).unwrap();
    assert_eq!(run.material(), Material::Wood);
    assert_eq!(run.operation(), Operation::Drilling);
    assert_eq!(run.tool_diameter_mm(), 14.0);

    let samples = TelemetrySimulator::default().simulate(&run, &mut StdRng::seed_from_u64(8));
    assert_eq!(samples.len(), run.sample_count());
    assert_eq!(samples.len(), 60);
}
