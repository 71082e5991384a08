//! Static material and operation lookup tables
//!
//! Every table is an exhaustive match on [`Material`] or [`Operation`], so a
//! material without a profile or an operation without a power factor fails to
//! compile rather than failing at lookup time.

use crate::types::{Material, Operation};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Workpiece temperature before cutting starts, in °C
pub const AMBIENT_TEMPERATURE_C: f64 = 25.0;

/// Upper clamp for workpiece temperature, in °C
pub const MAX_TEMPERATURE_C: f64 = 300.0;

/// Fraction of generated heat removed by coolant
pub const COOLING_EFFICIENCY: f64 = 0.7;

/// Fraction of spindle power converted to heat at the cut
pub const HEAT_CONVERSION: f64 = 0.8;

/// Tool wear saturates at 100 percent
pub const MAX_TOOL_WEAR_PCT: f64 = 100.0;

/// Spindle speed floor, in RPM
pub const MIN_RPM: f64 = 100.0;

/// Power draw floor, in kW
pub const MIN_POWER_KW: f64 = 0.5;

/// Physical properties of a workpiece material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProfile {
    /// Relative hardness
    pub hardness: f64,
    /// Thermal conductivity, W/(m·K)
    pub thermal_conductivity: f64,
    /// Specific heat capacity, J/(kg·K)
    pub specific_heat: f64,
}

impl Material {
    /// Physical profile of this material
    pub fn profile(&self) -> MaterialProfile {
        match self {
            Material::MildSteel => MaterialProfile {
                hardness: 120.0,
                thermal_conductivity: 50.0,
                specific_heat: 460.0,
            },
            Material::Aluminum => MaterialProfile {
                hardness: 35.0,
                thermal_conductivity: 237.0,
                specific_heat: 900.0,
            },
            Material::Wood => MaterialProfile {
                hardness: 2.0,
                thermal_conductivity: 0.12,
                specific_heat: 1700.0,
            },
        }
    }

    /// Tool wear accumulated per minute of cutting, in percent
    pub fn tool_wear_rate(&self) -> f64 {
        match self {
            Material::MildSteel => 0.15,
            Material::Aluminum => 0.08,
            Material::Wood => 0.02,
        }
    }

    /// Range the nominal spindle speed is drawn from
    pub fn base_rpm_range(&self) -> RangeInclusive<u32> {
        match self {
            Material::MildSteel => 800..=1200,
            Material::Aluminum => 1500..=2500,
            Material::Wood => 2800..=3500,
        }
    }

    /// Vibration amplitude at 1000 RPM with a fresh tool
    pub fn vibration_base(&self) -> f64 {
        match self {
            Material::MildSteel => 2.5,
            Material::Aluminum => 1.8,
            Material::Wood => 0.8,
        }
    }
}

impl Operation {
    /// Base power draw in kW per 10 mm of tool diameter
    pub fn power_factor(&self) -> f64 {
        match self {
            Operation::Turning => 3.5,
            Operation::Facing => 4.0,
            Operation::Threading => 2.8,
            Operation::Drilling => 5.0,
            Operation::Boring => 3.0,
            Operation::Knurling => 2.5,
        }
    }
}
