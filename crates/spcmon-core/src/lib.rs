//! # Multivariate Statistical Process Monitor
//!
//! This crate is the detection-and-diagnosis core of a real-time statistical
//! process monitor. It ingests a stream of multivariate sensor snapshots,
//! detects univariate and multivariate out-of-control conditions, and
//! explains each detected anomaly by attributing it to the most likely
//! physical fault cause.
//!
//! ## Pipeline
//!
//! ```text
//! Snapshot ──▶ univariate z / flags ──▶ joint statistic S = Σ z²
//!                   │                          │
//!                   ▼                          ▼
//!            contribution (z²)          joint control check
//!                   │
//!                   ├──▶ reconstruction (counterfactual drop per variable)
//!                   ▼
//!            cosine match against fault signatures ──▶ ranked diagnosis
//! ```
//!
//! Every analysis stage is a pure function over a [`types::Snapshot`] plus
//! the read-only [`registry::ParameterRegistry`] and
//! [`signature::SignatureLibrary`]; the only stateful component is the
//! [`controller::StreamController`], which owns the bounded history window,
//! the alarm log, and the fault-injection countdown, and is advanced by an
//! externally driven tick call. Rendering, scheduling, and data acquisition
//! all live outside this crate and consume its read-only views.
//!
//! ## Example
//!
//! ```
//! use spcmon_core::{
//!     ControllerState, Snapshot, StreamController,
//!     registry::demo_reactor,
//!     signature::{demo_reactor_faults, SignatureLibrary},
//! };
//!
//! let registry = demo_reactor();
//! let library = SignatureLibrary::new(demo_reactor_faults(), &registry).unwrap();
//! let mut ctl = StreamController::new(registry);
//! ctl.start();
//! assert_eq!(ctl.state(), ControllerState::Running);
//!
//! // One snapshot with the coolant flow well below nominal
//! let snap = Snapshot::new(0, [
//!     ("reactor_temp", 125.3),
//!     ("reactor_pressure", 2738.0),
//!     ("coolant_flow", 85.2),
//!     ("feed_rate", 3655.0),
//!     ("liquid_level", 62.1),
//!     ("agitator_speed", 1251.0),
//! ]);
//! let eval = ctl.ingest(snap).unwrap();
//! assert!(eval.joint.out_of_control);
//!
//! // Top contributor and best fault hypothesis
//! let top = &ctl.contribution_sorted().unwrap()[0];
//! assert_eq!(top.id, "coolant_flow");
//! let ranked = ctl.diagnose(&library).unwrap();
//! assert_eq!(ranked[0].signature.name, "Cooling water fouling");
//! ```

pub mod contribution;
pub mod controller;
pub mod diagnosis;
pub mod reconstruction;
pub mod registry;
pub mod signature;
pub mod statistic;
pub mod types;
pub mod univariate;

pub use contribution::{ContributionEntry, ContributionVector};
pub use controller::{
    AlarmEvent, AlarmSource, ControllerConfig, ControllerState, InjectedFault, StreamController,
};
pub use diagnosis::{diagnose, DiagnosisResult};
pub use reconstruction::{ReconstructionEntry, ReconstructionVector};
pub use registry::{chi_squared_99, ParameterDef, ParameterRegistry};
pub use signature::{FaultSignature, SignatureLibrary};
pub use statistic::{JointEval, ParamEval, SnapshotEval};
pub use types::{Direction, MonitorError, MonitorResult, ParamId, Severity, Snapshot};
pub use univariate::{evaluate, PointEval};
