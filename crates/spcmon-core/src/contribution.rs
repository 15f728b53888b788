//! Contribution decomposer: splits the joint statistic into per-parameter
//! shares.
//!
//! Under the diagonal-covariance model each parameter's contribution is its
//! squared standardized deviation zᵢ², so the contributions sum exactly to
//! the joint statistic. The sorted view drives "top contributor" displays;
//! the normalized view feeds the diagnosis engine.
//!
//! # Example
//!
//! ```
//! use spcmon_core::registry::{ParameterDef, ParameterRegistry, chi_squared_99};
//! use spcmon_core::contribution::decompose;
//! use spcmon_core::types::Snapshot;
//!
//! let defs = vec![
//!     ParameterDef::with_three_sigma_limits("p1", "P1", "u", 0.0, 1.0),
//!     ParameterDef::with_three_sigma_limits("p2", "P2", "u", 0.0, 1.0),
//! ];
//! let registry = ParameterRegistry::new(defs, chi_squared_99(2).unwrap()).unwrap();
//!
//! let snap = Snapshot::new(0, [("p1", 3.0), ("p2", -4.0)]);
//! let contrib = decompose(&snap, &registry).unwrap();
//!
//! assert!((contrib.total() - 25.0).abs() < 1e-12);
//! let top = contrib.sorted_desc();
//! assert_eq!(top[0].id, "p2");
//! assert!((top[0].contribution - 16.0).abs() < 1e-12);
//! ```

use crate::registry::ParameterRegistry;
use crate::types::{Direction, MonitorError, MonitorResult, ParamId, Snapshot};
use serde::Serialize;

/// One parameter's share of the joint statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionEntry {
    /// Parameter identifier.
    pub id: ParamId,
    /// Contribution to the joint statistic (zᵢ², non-negative).
    pub contribution: f64,
    /// Signed standardized deviation.
    pub z: f64,
    /// Side of the nominal mean.
    pub direction: Direction,
}

/// Per-parameter decomposition of the joint statistic, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionVector {
    /// Entries in registry (catalog) order.
    pub entries: Vec<ContributionEntry>,
}

impl ContributionVector {
    /// Sum of all contributions; equals the joint statistic.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.contribution).sum()
    }

    /// Entry by identifier.
    pub fn get(&self, id: &str) -> Option<&ContributionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries sorted descending by contribution value. Ties keep registry
    /// order (stable sort).
    pub fn sorted_desc(&self) -> Vec<ContributionEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| {
            b.contribution
                .partial_cmp(&a.contribution)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    /// Sum-normalized contributions in registry order.
    ///
    /// All-zero when the total is zero (every reading exactly nominal); the
    /// diagnosis engine treats that case as a zero-score match for every
    /// signature rather than a division failure.
    pub fn normalized(&self) -> Vec<(ParamId, f64)> {
        let total = self.total();
        self.entries
            .iter()
            .map(|e| {
                let share = if total > 0.0 {
                    e.contribution / total
                } else {
                    0.0
                };
                (e.id.clone(), share)
            })
            .collect()
    }
}

/// Decompose a snapshot's joint statistic into per-parameter contributions.
///
/// # Errors
///
/// `MissingReading` if the snapshot lacks a value for any registered
/// parameter.
pub fn decompose(
    snapshot: &Snapshot,
    registry: &ParameterRegistry,
) -> MonitorResult<ContributionVector> {
    let mut entries = Vec::with_capacity(registry.len());
    for def in registry.iter() {
        let value = snapshot
            .get(&def.id)
            .ok_or_else(|| MonitorError::MissingReading {
                seq: snapshot.seq,
                param: def.id.clone(),
            })?;
        let z = (value - def.mean) / def.sigma;
        entries.push(ContributionEntry {
            id: def.id.clone(),
            contribution: z * z,
            z,
            direction: Direction::from_z(z),
        });
    }
    Ok(ContributionVector { entries })
}
