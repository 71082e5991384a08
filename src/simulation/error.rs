//! Error types and handling
//!
//! This module contains the error taxonomy for simulation runs and the batch
//! pipeline around them.

use crate::types::ConfigValidationError;
use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Material name has no profile
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    /// Operation name has no power factor
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Duration is zero, negative or not finite
    #[error("Duration must be a positive number of minutes, got {0}")]
    InvalidDuration(f64),

    /// Tool index is zero
    #[error("Tool index must be a positive integer, got {0}")]
    InvalidToolIndex(u32),

    /// Sample interval is zero
    #[error("Sample interval must be at least one second, got {0}")]
    InvalidSampleInterval(u32),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// Telemetry sink rejected a write
    #[error("Telemetry sink error: {0}")]
    SinkError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a sink error
    pub fn sink_error(msg: impl Into<String>) -> Self {
        Self::SinkError(msg.into())
    }

    /// Whether the error was raised while validating simulation input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SimulationError::UnknownMaterial(_)
                | SimulationError::UnknownOperation(_)
                | SimulationError::InvalidDuration(_)
                | SimulationError::InvalidToolIndex(_)
                | SimulationError::InvalidSampleInterval(_)
        )
    }

    /// Check if this is a recoverable error
    ///
    /// Input errors never are: the caller has to supply corrected input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::UnknownMaterial(_)
            | SimulationError::UnknownOperation(_)
            | SimulationError::InvalidDuration(_)
            | SimulationError::InvalidToolIndex(_)
            | SimulationError::InvalidSampleInterval(_)
            | SimulationError::ConfigurationError(_) => false,
            SimulationError::SinkError(_) => true,
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::UnknownMaterial(_)
            | SimulationError::UnknownOperation(_)
            | SimulationError::InvalidDuration(_)
            | SimulationError::InvalidToolIndex(_)
            | SimulationError::InvalidSampleInterval(_) => "Input Validation",
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::SinkError(_) => "Sink",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_messages() {
        let error = SimulationError::UnknownMaterial("Nonexistent".to_string());
        assert_eq!(error.to_string(), "Unknown material: Nonexistent");

        let error = SimulationError::InvalidToolIndex(0);
        assert_eq!(error.to_string(), "Tool index must be a positive integer, got 0");

        let error = SimulationError::configuration_error("bad batch size");
        assert_eq!(error.to_string(), "Configuration validation failed: bad batch size");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let sim_error: SimulationError = io_error.into();
        assert!(matches!(sim_error, SimulationError::IoError(_)));
        assert!(sim_error.is_recoverable());
    }

    #[test]
    fn test_input_errors_are_not_recoverable() {
        let errors = [
            SimulationError::UnknownMaterial("x".to_string()),
            SimulationError::UnknownOperation("y".to_string()),
            SimulationError::InvalidDuration(0.0),
            SimulationError::InvalidToolIndex(0),
            SimulationError::InvalidSampleInterval(0),
        ];

        for error in &errors {
            assert!(error.is_input_error());
            assert!(!error.is_recoverable());
            assert_eq!(error.category(), "Input Validation");
        }
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(SimulationError::sink_error("full").category(), "Sink");
        assert_eq!(SimulationError::configuration_error("x").category(), "Configuration");
        assert!(!SimulationError::sink_error("full").is_input_error());
    }

    #[test]
    fn test_config_validation_error_conversion() {
        let error: SimulationError = ConfigValidationError::InvalidLatheCount(0).into();
        assert!(matches!(error, SimulationError::ConfigurationError(_)));
        assert!(error.to_string().contains("Lathe count"));
    }
}
