//! Shared types for the process monitor: parameter identifiers, snapshots,
//! severity/direction enums, and the crate-wide error type.
//!
//! # Example
//!
//! ```
//! use spcmon_core::types::{Severity, Snapshot};
//!
//! // Severity levels are ordered
//! assert!(Severity::Low < Severity::Critical);
//!
//! let snap = Snapshot::new(0, [("reactor_temp", 121.4), ("coolant_flow", 93.7)]);
//! assert_eq!(snap.get("reactor_temp"), Some(121.4));
//! assert_eq!(snap.get("unknown"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a monitored process variable.
pub type ParamId = String;

/// Result type for monitor operations.
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Errors raised by the process monitor.
///
/// Configuration variants are raised only while building a
/// [`ParameterRegistry`](crate::registry::ParameterRegistry) or
/// [`SignatureLibrary`](crate::signature::SignatureLibrary) at startup;
/// `MissingReading` is the only per-tick (recoverable) error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MonitorError {
    #[error("Parameter '{param}' has non-positive standard deviation {sigma}")]
    NonPositiveSigma { param: ParamId, sigma: f64 },

    #[error("Parameter '{param}' has invalid control limits: LCL {lcl} / mean {mean} / UCL {ucl} must be strictly increasing")]
    InvalidControlLimits {
        param: ParamId,
        lcl: f64,
        mean: f64,
        ucl: f64,
    },

    #[error("Duplicate parameter identifier '{param}' in registry")]
    DuplicateParameter { param: ParamId },

    #[error("Fault signature '{signature}' references unknown parameter '{param}'")]
    UnknownSignatureParam { signature: String, param: ParamId },

    #[error("Fault signature '{signature}' has negative weight {weight} for parameter '{param}'")]
    NegativeSignatureWeight {
        signature: String,
        param: ParamId,
        weight: f64,
    },

    #[error("Injected fault '{fault}' references unknown parameter '{param}'")]
    UnknownFaultParam { fault: String, param: ParamId },

    #[error("Snapshot {seq} is missing a reading for parameter '{param}'")]
    MissingReading { seq: u64, param: ParamId },

    #[error("Stream controller is not running")]
    NotRunning,
}

/// Severity of a fault archetype, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    /// Degraded performance, no immediate intervention required.
    Low,
    /// Schedule maintenance within the current shift.
    Medium,
    /// Operator action required promptly.
    High,
    /// Immediate intervention; safety-relevant.
    Critical,
}

/// Direction of a deviation relative to the nominal mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Reading above the nominal mean (z > 0).
    High,
    /// Reading at or below the nominal mean (z <= 0).
    Low,
}

impl Direction {
    /// Classify a standardized deviation.
    pub fn from_z(z: f64) -> Self {
        if z > 0.0 {
            Direction::High
        } else {
            Direction::Low
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::High => write!(f, "HIGH"),
            Direction::Low => write!(f, "LOW"),
        }
    }
}

/// One multivariate reading of the process, keyed by parameter identifier.
///
/// Snapshots are immutable once produced. The sequence index is assigned by
/// the producer and increases monotonically; it is logical time, not
/// wall-clock time. Readings are unconstrained in range: out-of-range values
/// are expected input (they are what triggers alarms), never malformed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Monotonically increasing sequence index.
    pub seq: u64,
    /// Reading per parameter identifier.
    pub readings: HashMap<ParamId, f64>,
}

impl Snapshot {
    /// Build a snapshot from `(identifier, reading)` pairs.
    pub fn new<I, S>(seq: u64, readings: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<ParamId>,
    {
        Self {
            seq,
            readings: readings.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Reading for a parameter, if present.
    pub fn get(&self, id: &str) -> Option<f64> {
        self.readings.get(id).copied()
    }
}
