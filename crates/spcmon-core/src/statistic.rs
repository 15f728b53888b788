//! Multivariate statistic engine: the joint out-of-control statistic over a
//! full snapshot.
//!
//! The joint statistic is S = Σᵢ zᵢ², the diagonal-covariance form of the
//! generalized squared distance from the nominal operating point (a
//! T²-equivalent that is exact only when parameters are uncorrelated, an
//! accepted simplification here). In control, S follows a χ² distribution
//! with one degree of freedom per parameter; the registry's joint limit is
//! the matching quantile.
//!
//! # Example
//!
//! ```
//! use spcmon_core::registry::{ParameterDef, ParameterRegistry, chi_squared_99};
//! use spcmon_core::statistic::evaluate_snapshot;
//! use spcmon_core::types::Snapshot;
//!
//! let defs = vec![
//!     ParameterDef::with_three_sigma_limits("p1", "P1", "u", 0.0, 1.0),
//!     ParameterDef::with_three_sigma_limits("p2", "P2", "u", 0.0, 1.0),
//! ];
//! let registry = ParameterRegistry::new(defs, chi_squared_99(2).unwrap()).unwrap();
//!
//! let snap = Snapshot::new(0, [("p1", 3.0), ("p2", 4.0)]);
//! let eval = evaluate_snapshot(&snap, &registry).unwrap();
//!
//! assert!((eval.joint.statistic - 25.0).abs() < 1e-12);
//! assert!(eval.joint.out_of_control);
//! assert_eq!(eval.params.len(), 2);
//! ```

use crate::registry::ParameterRegistry;
use crate::types::{Direction, MonitorError, MonitorResult, ParamId, Snapshot};
use crate::univariate::{self, PointEval};
use serde::Serialize;

/// Joint statistic and its control check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointEval {
    /// S = Σ zᵢ² over all registered parameters.
    pub statistic: f64,
    /// Upper control limit the statistic is tested against.
    pub limit: f64,
    /// Whether S > limit (strict comparison).
    pub out_of_control: bool,
}

/// Univariate result for one parameter within a snapshot evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamEval {
    /// Parameter identifier.
    pub id: ParamId,
    /// The raw reading.
    pub value: f64,
    /// Standardized deviation.
    pub z: f64,
    /// Univariate out-of-control flag.
    pub out_of_control: bool,
    /// Side of the nominal mean.
    pub direction: Direction,
}

/// Full evaluation of one snapshot: per-parameter results in registry order
/// plus the joint statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotEval {
    /// Sequence index of the evaluated snapshot.
    pub seq: u64,
    /// Per-parameter results, in registry (catalog) order.
    pub params: Vec<ParamEval>,
    /// Joint statistic and flag.
    pub joint: JointEval,
}

impl SnapshotEval {
    /// Per-parameter result by identifier.
    pub fn param(&self, id: &str) -> Option<&ParamEval> {
        self.params.iter().find(|p| p.id == id)
    }
}

/// Joint statistic S = Σ zᵢ² for a snapshot.
///
/// # Errors
///
/// `MissingReading` if the snapshot lacks a value for any registered
/// parameter. Extra, unregistered readings are ignored.
pub fn joint_statistic(snapshot: &Snapshot, registry: &ParameterRegistry) -> MonitorResult<f64> {
    let mut sum = 0.0;
    for def in registry.iter() {
        let value = snapshot
            .get(&def.id)
            .ok_or_else(|| MonitorError::MissingReading {
                seq: snapshot.seq,
                param: def.id.clone(),
            })?;
        let z = (value - def.mean) / def.sigma;
        sum += z * z;
    }
    Ok(sum)
}

/// Evaluate every parameter of a snapshot plus the joint statistic.
///
/// Pure; the whole evaluation either succeeds or fails without partial
/// output, which is what lets the stream controller treat a tick as atomic.
pub fn evaluate_snapshot(
    snapshot: &Snapshot,
    registry: &ParameterRegistry,
) -> MonitorResult<SnapshotEval> {
    let mut params = Vec::with_capacity(registry.len());
    let mut sum = 0.0;
    for def in registry.iter() {
        let value = snapshot
            .get(&def.id)
            .ok_or_else(|| MonitorError::MissingReading {
                seq: snapshot.seq,
                param: def.id.clone(),
            })?;
        let PointEval {
            value,
            z,
            out_of_control,
            direction,
        } = univariate::evaluate(value, def);
        sum += z * z;
        params.push(ParamEval {
            id: def.id.clone(),
            value,
            z,
            out_of_control,
            direction,
        });
    }
    let limit = registry.joint_limit();
    Ok(SnapshotEval {
        seq: snapshot.seq,
        params,
        joint: JointEval {
            statistic: sum,
            limit,
            out_of_control: sum > limit,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{chi_squared_99, ParameterDef};

    fn two_param_registry() -> ParameterRegistry {
        let defs = vec![
            ParameterDef::with_three_sigma_limits("p1", "P1", "u", 0.0, 1.0),
            ParameterDef::with_three_sigma_limits("p2", "P2", "u", 0.0, 1.0),
        ];
        ParameterRegistry::new(defs, chi_squared_99(2).unwrap()).unwrap()
    }

    #[test]
    fn test_two_parameter_joint_statistic() {
        // Readings (3, 4) with unit sigma give S = 9 + 16 = 25
        let reg = two_param_registry();
        let snap = Snapshot::new(0, [("p1", 3.0), ("p2", 4.0)]);
        let s = joint_statistic(&snap, &reg).unwrap();
        assert!((s - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_nominal_snapshot_is_zero_and_in_control() {
        let reg = two_param_registry();
        let snap = Snapshot::new(0, [("p1", 0.0), ("p2", 0.0)]);
        let eval = evaluate_snapshot(&snap, &reg).unwrap();
        assert_eq!(eval.joint.statistic, 0.0);
        assert!(!eval.joint.out_of_control);
    }

    #[test]
    fn test_joint_limit_is_strict() {
        // Limit of 9.0 with a reading of 3.0 lands S exactly on the limit
        // (3*3 is exact in binary floating point): still in control.
        let defs = vec![ParameterDef::with_three_sigma_limits("p", "P", "u", 0.0, 1.0)];
        let reg = ParameterRegistry::new(defs, 9.0).unwrap();
        let at_limit = Snapshot::new(0, [("p", 3.0)]);
        let eval = evaluate_snapshot(&at_limit, &reg).unwrap();
        assert_eq!(eval.joint.statistic, 9.0);
        assert!(!eval.joint.out_of_control);

        let beyond = Snapshot::new(1, [("p", 3.01)]);
        assert!(evaluate_snapshot(&beyond, &reg).unwrap().joint.out_of_control);
    }

    #[test]
    fn test_missing_reading_is_reported_with_identifier() {
        let reg = two_param_registry();
        let snap = Snapshot::new(9, [("p1", 1.0)]);
        let err = joint_statistic(&snap, &reg).unwrap_err();
        assert_eq!(
            err,
            MonitorError::MissingReading {
                seq: 9,
                param: "p2".into()
            }
        );
    }

    #[test]
    fn test_extra_readings_are_ignored() {
        let reg = two_param_registry();
        let snap = Snapshot::new(0, [("p1", 1.0), ("p2", 1.0), ("unregistered", 99.0)]);
        let s = joint_statistic(&snap, &reg).unwrap();
        assert!((s - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_params_in_registry_order() {
        let reg = two_param_registry();
        let snap = Snapshot::new(0, [("p2", 4.0), ("p1", 3.0)]);
        let eval = evaluate_snapshot(&snap, &reg).unwrap();
        assert_eq!(eval.params[0].id, "p1");
        assert_eq!(eval.params[1].id, "p2");
        assert!((eval.params[1].z - 4.0).abs() < 1e-12);
    }
}
