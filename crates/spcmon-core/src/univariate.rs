//! Univariate control test: standardized deviation and limit check for a
//! single reading against its parameter definition.
//!
//! The out-of-control convention is strict: a reading exactly at UCL or LCL
//! is still in control; only `x > UCL` or `x < LCL` trips the flag.
//!
//! # Example
//!
//! ```
//! use spcmon_core::registry::ParameterDef;
//! use spcmon_core::univariate::evaluate;
//! use spcmon_core::types::Direction;
//!
//! let def = ParameterDef::with_three_sigma_limits("temp", "Temperature", "degC", 200.0, 3.0);
//!
//! let eval = evaluate(206.0, &def);
//! assert!((eval.z - 2.0).abs() < 1e-12);
//! assert!(!eval.out_of_control);
//! assert_eq!(eval.direction, Direction::High);
//!
//! // Exactly at the UCL (209.0) is still in control
//! assert!(!evaluate(209.0, &def).out_of_control);
//! assert!(evaluate(209.1, &def).out_of_control);
//! ```

use crate::registry::ParameterDef;
use crate::types::Direction;
use serde::Serialize;

/// Result of the univariate control test for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointEval {
    /// The raw reading.
    pub value: f64,
    /// Standardized deviation z = (x − μ) / σ.
    pub z: f64,
    /// Whether the reading violates a control limit (strict comparison).
    pub out_of_control: bool,
    /// Side of the nominal mean the reading falls on.
    pub direction: Direction,
}

/// Evaluate one reading against its parameter definition.
///
/// Pure function; σ > 0 is guaranteed by registry validation, so the
/// division is always defined.
pub fn evaluate(value: f64, def: &ParameterDef) -> PointEval {
    let z = (value - def.mean) / def.sigma;
    PointEval {
        value,
        z,
        out_of_control: value > def.ucl || value < def.lcl,
        direction: Direction::from_z(z),
    }
}
