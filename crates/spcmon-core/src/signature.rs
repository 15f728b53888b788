//! Fault signature library: the catalog of named fault archetypes the
//! diagnosis engine matches observed deviation patterns against.
//!
//! Each signature pairs an expected normalized contribution vector with the
//! descriptive metadata an operator needs once the match is made: the
//! physical mechanism, ordered corrective actions, a severity level, and a
//! literature citation. The library validates every signature against the
//! parameter registry at load time; an unknown identifier or a negative
//! weight is a fatal configuration error, never a per-tick one.
//!
//! # Example
//!
//! ```
//! use spcmon_core::registry::demo_reactor;
//! use spcmon_core::signature::{demo_reactor_faults, SignatureLibrary};
//!
//! let registry = demo_reactor();
//! let library = SignatureLibrary::new(demo_reactor_faults(), &registry).unwrap();
//!
//! let sig = library.get("Cooling water fouling").unwrap();
//! assert_eq!(sig.primary_driver, "coolant_flow");
//! assert!(!sig.corrective_actions.is_empty());
//! ```

use crate::registry::ParameterRegistry;
use crate::types::{MonitorError, MonitorResult, ParamId, Severity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named fault archetype with its expected deviation pattern.
///
/// The expected vector holds non-negative weights per parameter; it need not
/// sum to exactly 1 and is treated as sum-normalized during scoring. The
/// expected shift is informational display text, not used by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultSignature {
    /// Unique name of the fault archetype.
    pub name: String,
    /// Identifier of the parameter the fault physically originates at.
    pub primary_driver: ParamId,
    /// Expected deviation of the primary driver, e.g. "+3σ to +6σ".
    pub expected_shift: String,
    /// Severity if this fault is confirmed.
    pub severity: Severity,
    /// Expected normalized contribution per parameter (non-negative).
    pub expected: HashMap<ParamId, f64>,
    /// Physical mechanism producing this deviation pattern.
    pub mechanism: String,
    /// Corrective actions in the order they should be taken.
    pub corrective_actions: Vec<String>,
    /// Literature or procedure reference for the archetype.
    pub reference: String,
}

/// Validated, immutable catalog of fault signatures.
///
/// Iteration order is catalog order, which is also the diagnosis tie-break
/// order.
#[derive(Debug, Clone)]
pub struct SignatureLibrary {
    signatures: Vec<FaultSignature>,
}

impl SignatureLibrary {
    /// Validate signatures against the registry and build the library.
    ///
    /// # Errors
    ///
    /// `UnknownSignatureParam` if an expected vector references an
    /// identifier the registry does not carry; `NegativeSignatureWeight`
    /// for any weight below zero. Both are fatal configuration errors.
    pub fn new(
        signatures: Vec<FaultSignature>,
        registry: &ParameterRegistry,
    ) -> MonitorResult<Self> {
        for sig in &signatures {
            for (param, &weight) in &sig.expected {
                if registry.get(param).is_none() {
                    return Err(MonitorError::UnknownSignatureParam {
                        signature: sig.name.clone(),
                        param: param.clone(),
                    });
                }
                if weight < 0.0 {
                    return Err(MonitorError::NegativeSignatureWeight {
                        signature: sig.name.clone(),
                        param: param.clone(),
                        weight,
                    });
                }
            }
        }
        Ok(Self { signatures })
    }

    /// Signature by name.
    pub fn get(&self, name: &str) -> Option<&FaultSignature> {
        self.signatures.iter().find(|s| s.name == name)
    }

    /// Signatures in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, FaultSignature> {
        self.signatures.iter()
    }

    /// Number of signatures in the catalog.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

fn expected<const N: usize>(weights: [(&str, f64); N]) -> HashMap<ParamId, f64> {
    weights.iter().map(|&(k, v)| (k.to_string(), v)).collect()
}

fn actions<const N: usize>(steps: [&str; N]) -> Vec<String> {
    steps.iter().map(|s| s.to_string()).collect()
}

/// Demonstration catalog: six fault archetypes for the continuous
/// stirred-tank reactor of [`demo_reactor`](crate::registry::demo_reactor).
///
/// The expected vectors are illustrative patterns, not calibrated against
/// plant data; a production deployment supplies its own catalog through the
/// same serde-backed types.
pub fn demo_reactor_faults() -> Vec<FaultSignature> {
    vec![
        FaultSignature {
            name: "Cooling water fouling".to_string(),
            primary_driver: "coolant_flow".to_string(),
            expected_shift: "-3σ to -6σ".to_string(),
            severity: Severity::High,
            expected: expected([
                ("coolant_flow", 0.50),
                ("reactor_temp", 0.35),
                ("reactor_pressure", 0.15),
            ]),
            mechanism: "Scale deposits in the jacket restrict coolant circulation; \
                        heat removal degrades, so falling flow drags reactor \
                        temperature and then pressure upward."
                .to_string(),
            corrective_actions: actions([
                "Switch to the standby coolant circuit",
                "Reduce feed rate to cut the heat load",
                "Schedule chemical descaling of the jacket",
                "Verify coolant strainer differential pressure",
            ]),
            reference: "Kourti & MacGregor (1996), J. Quality Technology 28(4), 409-428"
                .to_string(),
        },
        FaultSignature {
            name: "Runaway exotherm".to_string(),
            primary_driver: "reactor_temp".to_string(),
            expected_shift: "+4σ to +8σ".to_string(),
            severity: Severity::Critical,
            expected: expected([
                ("reactor_temp", 0.55),
                ("reactor_pressure", 0.35),
                ("liquid_level", 0.10),
            ]),
            mechanism: "Reaction heat outpaces cooling capacity; temperature and \
                        vapour pressure climb together, accelerating the reaction \
                        further."
                .to_string(),
            corrective_actions: actions([
                "Trip the feed immediately",
                "Open emergency quench",
                "Confirm relief valve availability",
                "Evacuate non-essential personnel per site procedure",
            ]),
            reference: "CCPS, Guidelines for Safe Handling of Reactive Chemicals, ch. 4"
                .to_string(),
        },
        FaultSignature {
            name: "Feed pump cavitation".to_string(),
            primary_driver: "feed_rate".to_string(),
            expected_shift: "-2σ to -5σ".to_string(),
            severity: Severity::Medium,
            expected: expected([
                ("feed_rate", 0.65),
                ("liquid_level", 0.25),
                ("reactor_pressure", 0.10),
            ]),
            mechanism: "Vapour pockets at the pump suction make delivered feed \
                        erratic and low; reactor level drifts down and pressure \
                        follows the reduced throughput."
                .to_string(),
            corrective_actions: actions([
                "Check suction-side strainer and NPSH margin",
                "Vent the pump casing",
                "Fall back to the spare feed pump",
            ]),
            reference: "Montgomery, Introduction to Statistical Quality Control, 8th ed., ch. 11"
                .to_string(),
        },
        FaultSignature {
            name: "Vent system leak".to_string(),
            primary_driver: "reactor_pressure".to_string(),
            expected_shift: "-3σ to -5σ".to_string(),
            severity: Severity::High,
            expected: expected([
                ("reactor_pressure", 0.70),
                ("liquid_level", 0.18),
                ("reactor_temp", 0.12),
            ]),
            mechanism: "A passing relief or vent valve bleeds overhead vapour; \
                        pressure falls with little movement elsewhere until the \
                        liquid flashes and the level starts to drop."
                .to_string(),
            corrective_actions: actions([
                "Survey the vent header with an acoustic leak detector",
                "Check relief valve seat temperature",
                "Isolate and blank the suspect line if safe to do so",
            ]),
            reference: "API RP 576, Inspection of Pressure-Relieving Devices".to_string(),
        },
        FaultSignature {
            name: "Agitator drive degradation".to_string(),
            primary_driver: "agitator_speed".to_string(),
            expected_shift: "-2σ to -4σ".to_string(),
            severity: Severity::Medium,
            expected: expected([("agitator_speed", 0.75), ("reactor_temp", 0.25)]),
            mechanism: "Belt slip or bearing wear slows the impeller; mixing \
                        deteriorates, local hot spots shift the bulk temperature \
                        reading while speed reads persistently low."
                .to_string(),
            corrective_actions: actions([
                "Compare motor current against the speed reading",
                "Inspect drive belt tension",
                "Collect a vibration spectrum of the gearbox",
            ]),
            reference: "ISO 10816-3 vibration severity guidance".to_string(),
        },
        FaultSignature {
            name: "Level transmitter drift".to_string(),
            primary_driver: "liquid_level".to_string(),
            expected_shift: "±2σ to ±4σ".to_string(),
            severity: Severity::Low,
            expected: expected([("liquid_level", 0.90), ("feed_rate", 0.10)]),
            mechanism: "Instrument zero drifts while the process itself holds \
                        steady; the level channel deviates alone with no coupled \
                        movement in the thermodynamic variables."
                .to_string(),
            corrective_actions: actions([
                "Cross-check against the redundant level gauge",
                "Re-zero the transmitter at a known level",
                "Raise an instrument maintenance work order",
            ]),
            reference: "ISA-TR75.25.02, control valve and instrument diagnostics".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::demo_reactor;

    #[test]
    fn test_demo_catalog_validates_against_demo_registry() {
        let registry = demo_reactor();
        let library = SignatureLibrary::new(demo_reactor_faults(), &registry).unwrap();
        assert_eq!(library.len(), 6);
        for sig in library.iter() {
            assert!(
                sig.expected.contains_key(&sig.primary_driver),
                "signature '{}' should weight its own primary driver",
                sig.name
            );
        }
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let registry = demo_reactor();
        let library = SignatureLibrary::new(demo_reactor_faults(), &registry).unwrap();
        let names: Vec<&str> = library.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names[0], "Cooling water fouling");
        assert_eq!(names[1], "Runaway exotherm");
        assert_eq!(names[5], "Level transmitter drift");
    }

    #[test]
    fn test_rejects_unknown_parameter() {
        let registry = demo_reactor();
        let mut sigs = demo_reactor_faults();
        sigs[0]
            .expected
            .insert("turbo_encabulator".to_string(), 0.5);
        let err = SignatureLibrary::new(sigs, &registry).unwrap_err();
        assert!(
            matches!(err, MonitorError::UnknownSignatureParam { ref param, .. }
                if param == "turbo_encabulator"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_rejects_negative_weight() {
        let registry = demo_reactor();
        let mut sigs = demo_reactor_faults();
        sigs[1].expected.insert("reactor_temp".to_string(), -0.2);
        let err = SignatureLibrary::new(sigs, &registry).unwrap_err();
        assert!(
            matches!(err, MonitorError::NegativeSignatureWeight { .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = demo_reactor();
        let library = SignatureLibrary::new(demo_reactor_faults(), &registry).unwrap();
        assert!(library.get("Runaway exotherm").is_some());
        assert!(library.get("No such fault").is_none());
    }

    #[test]
    fn test_signature_deserializes_from_json() {
        // The catalog is supplied by an external configuration loader in
        // production; the serde shape is part of the contract.
        let json = r#"{
            "name": "Sensor stuck",
            "primary_driver": "reactor_temp",
            "expected_shift": "0σ",
            "severity": "Low",
            "expected": { "reactor_temp": 1.0 },
            "mechanism": "Transmitter output frozen at a constant value.",
            "corrective_actions": ["Tap test the transmitter", "Swap the input card"],
            "reference": "Plant procedure M-17"
        }"#;
        let sig: FaultSignature = serde_json::from_str(json).unwrap();
        assert_eq!(sig.severity, Severity::Low);
        let registry = demo_reactor();
        assert!(SignatureLibrary::new(vec![sig], &registry).is_ok());
    }
}
