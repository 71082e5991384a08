//! Enumeration types for the lathe telemetry simulator
//!
//! This module contains the workpiece materials, machining operations and job
//! states used throughout the simulation system. Material and operation names
//! are parsed explicitly so that unknown names surface as typed errors instead
//! of silently falling back to a default.

use crate::simulation::SimulationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workpiece materials the simulator has physical profiles for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Material {
    /// Low-carbon steel
    #[serde(rename = "Mild Steel")]
    MildSteel,
    /// Aluminum alloy stock
    Aluminum,
    /// Hard or soft wood turning blanks
    Wood,
}

impl Material {
    /// Every material with a profile, in table order
    pub const ALL: [Material; 3] = [Material::MildSteel, Material::Aluminum, Material::Wood];

    /// Canonical display name, as stored in job and telemetry records
    pub fn name(&self) -> &'static str {
        match self {
            Material::MildSteel => "Mild Steel",
            Material::Aluminum => "Aluminum",
            Material::Wood => "Wood",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild steel" | "mildsteel" | "mild_steel" | "mild-steel" => Ok(Material::MildSteel),
            "aluminum" | "aluminium" => Ok(Material::Aluminum),
            "wood" => Ok(Material::Wood),
            _ => Err(SimulationError::UnknownMaterial(s.to_string())),
        }
    }
}

/// Lathe operations (job types) with a known base power draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Reducing the outside diameter along the axis
    Turning,
    /// Cutting across the end face
    Facing,
    /// Cutting a helical thread
    Threading,
    /// Axial hole drilling
    Drilling,
    /// Enlarging an existing bore
    Boring,
    /// Rolling a knurl pattern
    Knurling,
}

impl Operation {
    /// Every operation with a power factor, in table order
    pub const ALL: [Operation; 6] = [
        Operation::Turning,
        Operation::Facing,
        Operation::Threading,
        Operation::Drilling,
        Operation::Boring,
        Operation::Knurling,
    ];

    /// Canonical lowercase name, as stored in job and telemetry records
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Turning => "turning",
            Operation::Facing => "facing",
            Operation::Threading => "threading",
            Operation::Drilling => "drilling",
            Operation::Boring => "boring",
            Operation::Knurling => "knurling",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "turning" => Ok(Operation::Turning),
            "facing" => Ok(Operation::Facing),
            "threading" => Ok(Operation::Threading),
            "drilling" => Ok(Operation::Drilling),
            "boring" => Ok(Operation::Boring),
            "knurling" => Ok(Operation::Knurling),
            _ => Err(SimulationError::UnknownOperation(s.to_string())),
        }
    }
}

/// Lifecycle state of a machining job record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job record created, telemetry not yet fully written
    Running,
    /// All telemetry written and final tool wear recorded
    Completed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Completed => write!(f, "Completed"),
        }
    }
}
