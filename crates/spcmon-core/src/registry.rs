//! Parameter registry: the static description of every monitored variable.
//!
//! Each [`ParameterDef`] carries the nominal mean, standard deviation, and
//! explicit control limits for one process variable. The
//! [`ParameterRegistry`] validates the whole set once at load time
//! (σ > 0, LCL < mean < UCL, no duplicate identifiers) so that every
//! downstream computation can index parameters without per-access checks.
//!
//! # Example
//!
//! ```
//! use spcmon_core::registry::{ParameterDef, ParameterRegistry, chi_squared_99};
//!
//! let defs = vec![
//!     ParameterDef::with_three_sigma_limits("reactor_temp", "Reactor temperature", "degC", 120.0, 1.5),
//!     ParameterDef::with_three_sigma_limits("coolant_flow", "Coolant flow", "m3/h", 94.0, 1.8),
//! ];
//! let limit = chi_squared_99(defs.len()).unwrap();
//! let registry = ParameterRegistry::new(defs, limit).unwrap();
//!
//! assert_eq!(registry.len(), 2);
//! let temp = registry.get("reactor_temp").unwrap();
//! assert!((temp.ucl - 124.5).abs() < 1e-12);
//! assert!((registry.joint_limit() - 9.210).abs() < 1e-12);
//! ```

use crate::types::{MonitorError, MonitorResult, ParamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static definition of one monitored process variable.
///
/// Control limits are stored explicitly so they may diverge from the
/// ±3σ default (e.g. tightened limits on a safety-relevant variable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDef {
    /// Stable identifier used to key snapshots and signatures.
    pub id: ParamId,
    /// Human-readable display label.
    pub label: String,
    /// Engineering unit of the reading.
    pub unit: String,
    /// Nominal (in-control) mean.
    pub mean: f64,
    /// Nominal standard deviation. Must be positive.
    pub sigma: f64,
    /// Upper control limit. Must exceed the mean.
    pub ucl: f64,
    /// Lower control limit. Must be below the mean.
    pub lcl: f64,
}

impl ParameterDef {
    /// Build a definition with explicit control limits.
    pub fn new(
        id: impl Into<ParamId>,
        label: impl Into<String>,
        unit: impl Into<String>,
        mean: f64,
        sigma: f64,
        ucl: f64,
        lcl: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            unit: unit.into(),
            mean,
            sigma,
            ucl,
            lcl,
        }
    }

    /// Build a definition with the conventional UCL = μ+3σ, LCL = μ−3σ limits.
    pub fn with_three_sigma_limits(
        id: impl Into<ParamId>,
        label: impl Into<String>,
        unit: impl Into<String>,
        mean: f64,
        sigma: f64,
    ) -> Self {
        Self::new(id, label, unit, mean, sigma, mean + 3.0 * sigma, mean - 3.0 * sigma)
    }
}

/// Validated, immutable set of parameter definitions plus the joint
/// control limit for the multivariate statistic.
///
/// Iteration order is the catalog order the definitions were supplied in;
/// all derived vectors (contributions, reconstructions) follow it.
#[derive(Debug, Clone)]
pub struct ParameterRegistry {
    /// Definitions in catalog order.
    defs: Vec<ParameterDef>,
    /// Identifier to index in `defs`, built once at load.
    index: HashMap<ParamId, usize>,
    /// Upper control limit for the joint statistic (χ² quantile).
    joint_limit: f64,
}

impl ParameterRegistry {
    /// Validate and build a registry.
    ///
    /// `joint_limit` is the upper control limit for the joint statistic,
    /// typically a χ² quantile for `defs.len()` degrees of freedom; see
    /// [`chi_squared_99`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any definition has σ ≤ 0, if its
    /// limits are not strictly ordered LCL < mean < UCL, or if two
    /// definitions share an identifier. These are fatal at startup and
    /// never raised per tick.
    pub fn new(defs: Vec<ParameterDef>, joint_limit: f64) -> MonitorResult<Self> {
        let mut index = HashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            if def.sigma <= 0.0 {
                return Err(MonitorError::NonPositiveSigma {
                    param: def.id.clone(),
                    sigma: def.sigma,
                });
            }
            if !(def.lcl < def.mean && def.mean < def.ucl) {
                return Err(MonitorError::InvalidControlLimits {
                    param: def.id.clone(),
                    lcl: def.lcl,
                    mean: def.mean,
                    ucl: def.ucl,
                });
            }
            if index.insert(def.id.clone(), i).is_some() {
                return Err(MonitorError::DuplicateParameter {
                    param: def.id.clone(),
                });
            }
        }
        Ok(Self {
            defs,
            index,
            joint_limit,
        })
    }

    /// Definition for an identifier, if registered.
    pub fn get(&self, id: &str) -> Option<&ParameterDef> {
        self.index.get(id).map(|&i| &self.defs[i])
    }

    /// Catalog position of an identifier, if registered.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Definitions in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParameterDef> {
        self.defs.iter()
    }

    /// Number of monitored parameters (degrees of freedom of the joint
    /// statistic).
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Upper control limit for the joint statistic.
    pub fn joint_limit(&self) -> f64 {
        self.joint_limit
    }
}

/// χ² distribution 99th-percentile quantiles for 1..=12 degrees of freedom.
///
/// The joint statistic under the diagonal-covariance model follows a χ²
/// distribution with one degree of freedom per monitored parameter when the
/// process is in control; exceeding this quantile flags a joint excursion at
/// the 1% false-alarm rate.
const CHI2_99: [f64; 12] = [
    6.635, 9.210, 11.345, 13.277, 15.086, 16.812, 18.475, 20.090, 21.666, 23.209, 24.725, 26.217,
];

/// 99% χ² quantile for the given degrees of freedom (1..=12).
pub fn chi_squared_99(dof: usize) -> Option<f64> {
    if dof == 0 || dof > CHI2_99.len() {
        return None;
    }
    Some(CHI2_99[dof - 1])
}

/// Demonstration registry: six variables of a continuous stirred-tank
/// reactor, with ±3σ limits and the 99% χ² joint limit for six degrees of
/// freedom.
pub fn demo_reactor() -> ParameterRegistry {
    let defs = vec![
        ParameterDef::with_three_sigma_limits(
            "reactor_temp",
            "Reactor temperature",
            "degC",
            120.0,
            1.5,
        ),
        ParameterDef::with_three_sigma_limits(
            "reactor_pressure",
            "Reactor pressure",
            "kPa",
            2700.0,
            25.0,
        ),
        ParameterDef::with_three_sigma_limits("coolant_flow", "Coolant flow", "m3/h", 94.0, 1.8),
        ParameterDef::with_three_sigma_limits("feed_rate", "Feed rate", "kg/h", 3650.0, 40.0),
        ParameterDef::with_three_sigma_limits("liquid_level", "Liquid level", "%", 62.0, 1.2),
        ParameterDef::with_three_sigma_limits(
            "agitator_speed",
            "Agitator speed",
            "rpm",
            1250.0,
            15.0,
        ),
    ];
    let limit = chi_squared_99(defs.len()).unwrap_or(f64::INFINITY);
    // Demo values are all valid by construction; new() cannot fail here.
    ParameterRegistry::new(defs, limit).expect("demo registry is valid")
}
