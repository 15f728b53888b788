//! Diagnosis engine: ranks fault signatures by cosine similarity against an
//! observed contribution pattern.
//!
//! The raw contribution vector is sum-normalized, then every signature's
//! expected vector is scored by cosine similarity (missing keys count as
//! zero, a zero norm on either side short-circuits to similarity 0). Scores
//! are similarity × 100 rounded to one decimal place, sorted descending with
//! catalog order preserved among exact ties. The function is pure,
//! deterministic, and idempotent.
//!
//! # Example
//!
//! ```
//! use spcmon_core::contribution::decompose;
//! use spcmon_core::diagnosis::diagnose;
//! use spcmon_core::registry::demo_reactor;
//! use spcmon_core::signature::{demo_reactor_faults, SignatureLibrary};
//! use spcmon_core::types::Snapshot;
//!
//! let registry = demo_reactor();
//! let library = SignatureLibrary::new(demo_reactor_faults(), &registry).unwrap();
//!
//! // Low coolant flow with hot reactor: the fouling archetype
//! let snap = Snapshot::new(0, [
//!     ("reactor_temp", 126.0),
//!     ("reactor_pressure", 2748.0),
//!     ("coolant_flow", 85.0),
//!     ("feed_rate", 3650.0),
//!     ("liquid_level", 62.0),
//!     ("agitator_speed", 1250.0),
//! ]);
//! let contrib = decompose(&snap, &registry).unwrap();
//! let ranked = diagnose(&contrib, &library);
//!
//! assert_eq!(ranked[0].signature.name, "Cooling water fouling");
//! assert!(ranked[0].score > ranked[ranked.len() - 1].score);
//! ```

use crate::contribution::ContributionVector;
use crate::signature::{FaultSignature, SignatureLibrary};
use serde::Serialize;

/// One ranked fault hypothesis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisResult {
    /// The matched fault archetype.
    pub signature: FaultSignature,
    /// Similarity score in [0, 100], one decimal place.
    pub score: f64,
}

/// Round to one decimal place; tie-breaking operates on the rounded scores
/// users actually see.
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Cosine similarity between the normalized observed vector and one
/// signature's expected vector. Zero when either norm is zero.
fn similarity(observed: &[(String, f64)], signature: &FaultSignature) -> f64 {
    let mut dot = 0.0;
    let mut obs_sq = 0.0;
    for (id, o) in observed {
        let e = signature.expected.get(id).copied().unwrap_or(0.0);
        dot += o * e;
        obs_sq += o * o;
    }
    let exp_sq: f64 = signature.expected.values().map(|e| e * e).sum();
    let denom = obs_sq.sqrt() * exp_sq.sqrt();
    if denom > 0.0 {
        dot / denom
    } else {
        0.0
    }
}

/// Score every signature against a contribution vector and rank descending.
///
/// An all-zero contribution vector (every reading exactly nominal) yields a
/// score of 0.0 for every signature, ranked in catalog order.
pub fn diagnose(contrib: &ContributionVector, library: &SignatureLibrary) -> Vec<DiagnosisResult> {
    let observed = contrib.normalized();
    let mut results: Vec<DiagnosisResult> = library
        .iter()
        .map(|sig| DiagnosisResult {
            score: round1(similarity(&observed, sig) * 100.0),
            signature: sig.clone(),
        })
        .collect();
    // Stable sort: equal scores keep catalog order.
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}
