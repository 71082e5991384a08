//! Identifier types for the lathe telemetry simulator
//!
//! Lathes are numbered from 1, jobs carry the `JOB{lathe:02}{job:02}` naming
//! used by the downstream job collections, and each generation run gets a
//! UUID-based identifier for correlating logs and reports.
//!
//! Job ids are only unique while both numbers fit in two digits, so lathe
//! and job numbers are capped at [`MAX_LATHE_NUMBER`] and [`MAX_JOB_NUMBER`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Highest lathe number that keeps job ids unique
pub const MAX_LATHE_NUMBER: u32 = 99;

/// Highest per-lathe job number that keeps job ids unique
pub const MAX_JOB_NUMBER: u32 = 99;

/// Numeric identifier of a lathe machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LatheId(pub u32);

impl LatheId {
    /// Create a lathe identifier from its number
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// The lathe number
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LatheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lathe{}", self.0)
    }
}

/// Identifier of a machining job
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Build the identifier of the `job_number`-th job on a lathe
    ///
    /// Distinct ids are only guaranteed for lathe and job numbers up to 99;
    /// past that `(10, 101)` and `(101, 1)` both give `JOB10101`.
    pub fn for_job(lathe_id: LatheId, job_number: u32) -> Self {
        Self(format!("JOB{:02}{:02}", lathe_id.number(), job_number))
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for one batch generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RUN_{}", self.0.simple())
    }
}

impl Serialize for RunId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RunId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let uuid_str = s.strip_prefix("RUN_").unwrap_or(&s);
        let uuid = Uuid::parse_str(uuid_str).map_err(serde::de::Error::custom)?;
        Ok(RunId(uuid))
    }
}
