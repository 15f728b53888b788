//! Reconstruction analyzer: counterfactual drop in the joint statistic from
//! restoring one parameter to nominal.
//!
//! For each parameter k the analyzer substitutes the nominal mean μₖ for the
//! reading xₖ (all other readings unchanged), recomputes the joint statistic,
//! and reports RBCₖ = S_full − S_without_k. The recompute-with-substitution
//! method is kept deliberately general: a future full-covariance statistic
//! only needs a new formula in the statistic engine, not a new contract
//! here. Under the current diagonal model RBCₖ reduces to zₖ², identical to
//! the plain contribution — a property the tests pin down.
//!
//! # Example
//!
//! ```
//! use spcmon_core::registry::{ParameterDef, ParameterRegistry, chi_squared_99};
//! use spcmon_core::reconstruction::reconstruct;
//! use spcmon_core::types::Snapshot;
//!
//! let defs = vec![
//!     ParameterDef::with_three_sigma_limits("p1", "P1", "u", 0.0, 1.0),
//!     ParameterDef::with_three_sigma_limits("p2", "P2", "u", 0.0, 1.0),
//! ];
//! let registry = ParameterRegistry::new(defs, chi_squared_99(2).unwrap()).unwrap();
//!
//! let snap = Snapshot::new(0, [("p1", 3.0), ("p2", 4.0)]);
//! let recon = reconstruct(&snap, &registry).unwrap();
//!
//! // Restoring p2 alone would remove 16 of the 25 units of deviation
//! assert!((recon.get("p2").unwrap().rbc - 16.0).abs() < 1e-9);
//! assert_eq!(recon.sorted_desc()[0].id, "p2");
//! ```

use crate::registry::ParameterRegistry;
use crate::statistic::joint_statistic;
use crate::types::{MonitorResult, ParamId, Snapshot};
use serde::Serialize;

/// Reconstruction-based contribution for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconstructionEntry {
    /// Parameter identifier.
    pub id: ParamId,
    /// Drop in the joint statistic if this parameter alone were restored to
    /// its nominal mean.
    pub rbc: f64,
}

/// Per-parameter reconstruction results, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconstructionVector {
    /// Entries in registry (catalog) order.
    pub entries: Vec<ReconstructionEntry>,
}

impl ReconstructionVector {
    /// Entry by identifier.
    pub fn get(&self, id: &str) -> Option<&ReconstructionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries sorted descending by RBC value. Ties keep registry order
    /// (stable sort).
    pub fn sorted_desc(&self) -> Vec<ReconstructionEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| {
            b.rbc
                .partial_cmp(&a.rbc)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }
}

/// Compute the reconstruction-based contribution of every parameter.
///
/// Genuinely recomputes the joint statistic with each reading substituted by
/// its nominal mean rather than shortcutting to zₖ², so the contract holds
/// for any statistic formula.
///
/// # Errors
///
/// `MissingReading` if the snapshot lacks a value for any registered
/// parameter.
pub fn reconstruct(
    snapshot: &Snapshot,
    registry: &ParameterRegistry,
) -> MonitorResult<ReconstructionVector> {
    let s_full = joint_statistic(snapshot, registry)?;
    let mut entries = Vec::with_capacity(registry.len());
    for def in registry.iter() {
        let mut substituted = snapshot.clone();
        substituted.readings.insert(def.id.clone(), def.mean);
        let s_without = joint_statistic(&substituted, registry)?;
        entries.push(ReconstructionEntry {
            id: def.id.clone(),
            rbc: s_full - s_without,
        });
    }
    Ok(ReconstructionVector { entries })
}
