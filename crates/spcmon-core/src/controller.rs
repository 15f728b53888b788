//! Stream controller: the single stateful component of the monitor.
//!
//! The controller owns the bounded history window, the bounded alarm log,
//! the tick counter, and the fault-injection countdown. It is advanced by an
//! externally driven [`ingest`](StreamController::ingest) call — any
//! scheduling (timer, external clock) lives outside the core and simply
//! invokes that call at the desired cadence. One ingested snapshot runs the
//! full evaluation pass atomically: either the whole pass completes and is
//! recorded, or (on a missing reading) no state changes at all and the error
//! is surfaced, so a dropped reading is never mistaken for a healthy tick.
//!
//! Alarm events are edge-triggered: an event is logged when a parameter (or
//! the joint statistic) enters the out-of-control region, not on every tick
//! it stays there.
//!
//! # Example
//!
//! ```
//! use spcmon_core::controller::{ControllerState, StreamController};
//! use spcmon_core::registry::demo_reactor;
//! use spcmon_core::types::Snapshot;
//!
//! let mut ctl = StreamController::new(demo_reactor());
//! assert_eq!(ctl.state(), ControllerState::Idle);
//!
//! ctl.start();
//! let nominal: Vec<(String, f64)> = ctl
//!     .registry()
//!     .iter()
//!     .map(|d| (d.id.clone(), d.mean))
//!     .collect();
//! let eval = ctl.ingest(Snapshot::new(0, nominal)).unwrap();
//!
//! assert_eq!(eval.joint.statistic, 0.0);
//! assert!(!eval.joint.out_of_control);
//! assert_eq!(ctl.history().count(), 1);
//! assert!(ctl.alarms().next().is_none());
//! ```

use crate::contribution::{self, ContributionEntry, ContributionVector};
use crate::diagnosis::{self, DiagnosisResult};
use crate::reconstruction::{self, ReconstructionEntry, ReconstructionVector};
use crate::registry::ParameterRegistry;
use crate::signature::SignatureLibrary;
use crate::statistic::{self, SnapshotEval};
use crate::types::{MonitorError, MonitorResult, ParamId, Snapshot};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Observable state of the stream controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControllerState {
    /// No stream running; accumulated history is retained until `reset`.
    Idle,
    /// Accepting snapshots.
    Running,
    /// Accepting snapshots with an injected fault biasing them.
    FaultActive {
        /// Snapshots left before the fault clears.
        remaining: u32,
    },
}

/// What an alarm event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AlarmSource {
    /// A single parameter crossed its control limit.
    Parameter(ParamId),
    /// The joint statistic crossed its limit.
    JointStatistic,
}

/// One entry in the alarm log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlarmEvent {
    /// Sequence index of the snapshot that raised the alarm.
    pub seq: u64,
    /// Offending parameter or the joint statistic.
    pub source: AlarmSource,
    /// Value at the time of the excursion (reading, or joint statistic).
    pub value: f64,
}

impl std::fmt::Display for AlarmEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            AlarmSource::Parameter(id) => {
                write!(f, "seq {}: {} = {:.2}", self.seq, id, self.value)
            }
            AlarmSource::JointStatistic => {
                write!(f, "seq {}: T2 = {:.2}", self.seq, self.value)
            }
        }
    }
}

/// A deterministic bias applied to incoming snapshots for a fixed number of
/// ticks. Simulation and commissioning aid; magnitudes and duration are
/// caller configuration, not built-in constants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InjectedFault {
    /// Display label for the injected fault.
    pub label: String,
    /// Per-parameter offsets in multiples of that parameter's σ.
    pub offsets: Vec<(ParamId, f64)>,
    /// Number of snapshots the bias applies to.
    pub duration_ticks: u32,
}

/// Capacity configuration of the controller's bounded buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControllerConfig {
    /// Most-recent snapshots retained for trend views.
    pub history_len: usize,
    /// Most-recent alarm events retained.
    pub alarm_len: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            history_len: 120,
            alarm_len: 50,
        }
    }
}

/// Drives the tick cycle over one logical stream of snapshots.
///
/// Single-writer by construction: `ingest` takes `&mut self`, so no two
/// ticks can be in flight against the same state. All evaluation components
/// it calls are pure and freely shareable across threads.
#[derive(Debug)]
pub struct StreamController {
    registry: ParameterRegistry,
    config: ControllerConfig,
    running: bool,
    /// Active injected fault and its remaining tick count.
    fault: Option<(InjectedFault, u32)>,
    /// Accepted snapshots since the last reset.
    ticks: u64,
    history: VecDeque<SnapshotEval>,
    alarms: VecDeque<AlarmEvent>,
    /// Contribution vector of the latest accepted snapshot.
    latest_contribution: Option<ContributionVector>,
    /// Reconstruction vector of the latest accepted snapshot.
    latest_reconstruction: Option<ReconstructionVector>,
}

impl StreamController {
    /// Controller with default buffer capacities.
    pub fn new(registry: ParameterRegistry) -> Self {
        Self::with_config(registry, ControllerConfig::default())
    }

    /// Controller with explicit buffer capacities.
    pub fn with_config(registry: ParameterRegistry, config: ControllerConfig) -> Self {
        Self {
            registry,
            config,
            running: false,
            fault: None,
            ticks: 0,
            history: VecDeque::with_capacity(config.history_len),
            alarms: VecDeque::with_capacity(config.alarm_len),
            latest_contribution: None,
            latest_reconstruction: None,
        }
    }

    /// The parameter registry this stream is monitored against.
    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    /// Current controller state.
    pub fn state(&self) -> ControllerState {
        if !self.running {
            ControllerState::Idle
        } else {
            match &self.fault {
                Some((_, remaining)) if *remaining > 0 => ControllerState::FaultActive {
                    remaining: *remaining,
                },
                _ => ControllerState::Running,
            }
        }
    }

    /// Remaining ticks of the active injected fault, if any.
    pub fn remaining_fault_ticks(&self) -> Option<u32> {
        match self.state() {
            ControllerState::FaultActive { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// Accepted-snapshot count since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Begin accepting snapshots. No-op if already running.
    pub fn start(&mut self) {
        if !self.running {
            info!("stream started");
            self.running = true;
        }
    }

    /// Stop accepting snapshots. History and alarm state are preserved; an
    /// active injected fault is abandoned.
    pub fn stop(&mut self) {
        if self.running {
            info!("stream stopped after {} ticks", self.ticks);
            self.running = false;
            self.fault = None;
        }
    }

    /// Return to the initial empty state: clears history, alarms, the
    /// active fault, and the tick counter.
    pub fn reset(&mut self) {
        info!("stream reset");
        self.running = false;
        self.fault = None;
        self.ticks = 0;
        self.history.clear();
        self.alarms.clear();
        self.latest_contribution = None;
        self.latest_reconstruction = None;
    }

    /// Arm an injected fault for its configured duration. Legal only while
    /// running; re-injecting overrides the current fault and restarts the
    /// countdown.
    ///
    /// # Errors
    ///
    /// `NotRunning` when the stream is idle; `UnknownFaultParam` when an
    /// offset names a parameter the registry does not carry.
    pub fn inject(&mut self, fault: InjectedFault) -> MonitorResult<()> {
        if !self.running {
            return Err(MonitorError::NotRunning);
        }
        for (param, _) in &fault.offsets {
            if self.registry.get(param).is_none() {
                return Err(MonitorError::UnknownFaultParam {
                    fault: fault.label.clone(),
                    param: param.clone(),
                });
            }
        }
        info!(
            fault = %fault.label,
            duration = fault.duration_ticks,
            "fault injection armed"
        );
        let remaining = fault.duration_ticks;
        self.fault = Some((fault, remaining));
        Ok(())
    }

    /// Accept one snapshot and run the full evaluation pass.
    ///
    /// Applies the active fault bias, evaluates every parameter and the
    /// joint statistic, decomposes contributions, runs the reconstruction
    /// analysis, appends to the history window, logs edge-triggered alarm
    /// events, and advances the fault countdown. The pass is atomic: on any
    /// error no state is modified and the tick counter does not advance.
    ///
    /// # Errors
    ///
    /// `NotRunning` when the stream is idle; `MissingReading` when the
    /// snapshot lacks a registered parameter.
    pub fn ingest(&mut self, snapshot: Snapshot) -> MonitorResult<SnapshotEval> {
        if !self.running {
            return Err(MonitorError::NotRunning);
        }
        let snapshot = self.apply_fault_bias(snapshot);

        // Evaluate everything before touching any state.
        let eval = statistic::evaluate_snapshot(&snapshot, &self.registry)?;
        let contrib = contribution::decompose(&snapshot, &self.registry)?;
        let recon = reconstruction::reconstruct(&snapshot, &self.registry)?;

        // Commit.
        self.ticks += 1;
        self.log_alarms(&eval);
        self.history.push_back(eval.clone());
        while self.history.len() > self.config.history_len {
            self.history.pop_front();
        }
        self.latest_contribution = Some(contrib);
        self.latest_reconstruction = Some(recon);

        let fault_expired = match self.fault.as_mut() {
            Some((fault, remaining)) => {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    info!(fault = %fault.label, "injected fault expired");
                    true
                } else {
                    false
                }
            }
            None => false,
        };
        if fault_expired {
            self.fault = None;
        }
        debug!(
            seq = eval.seq,
            joint = eval.joint.statistic,
            "snapshot accepted"
        );
        Ok(eval)
    }

    /// Latest accepted snapshot evaluation, if any.
    pub fn latest(&self) -> Option<&SnapshotEval> {
        self.history.back()
    }

    /// History window in arrival order (oldest first).
    pub fn history(&self) -> impl Iterator<Item = &SnapshotEval> {
        self.history.iter()
    }

    /// Alarm log, most recent first.
    pub fn alarms(&self) -> impl Iterator<Item = &AlarmEvent> {
        self.alarms.iter().rev()
    }

    /// Contribution entries of the latest snapshot, sorted descending.
    pub fn contribution_sorted(&self) -> Option<Vec<ContributionEntry>> {
        self.latest_contribution.as_ref().map(|c| c.sorted_desc())
    }

    /// Reconstruction entries of the latest snapshot, sorted descending.
    pub fn reconstruction_sorted(&self) -> Option<Vec<ReconstructionEntry>> {
        self.latest_reconstruction.as_ref().map(|r| r.sorted_desc())
    }

    /// Ranked fault hypotheses for the latest snapshot. Computed on demand;
    /// a pure function of the latest contribution vector.
    pub fn diagnose(&self, library: &SignatureLibrary) -> Option<Vec<DiagnosisResult>> {
        self.latest_contribution
            .as_ref()
            .map(|c| diagnosis::diagnose(c, library))
    }

    /// Add the active fault's per-parameter offsets (in σ units) to the
    /// snapshot readings.
    fn apply_fault_bias(&self, mut snapshot: Snapshot) -> Snapshot {
        if let Some((fault, remaining)) = &self.fault {
            if *remaining > 0 {
                for (param, delta_sigmas) in &fault.offsets {
                    // Offsets were validated against the registry at inject
                    // time; a reading absent from the snapshot surfaces as
                    // MissingReading during evaluation.
                    if let (Some(def), Some(reading)) =
                        (self.registry.get(param), snapshot.readings.get_mut(param))
                    {
                        *reading += delta_sigmas * def.sigma;
                    }
                }
            }
        }
        snapshot
    }

    /// Append edge-triggered alarm events for a freshly evaluated snapshot.
    fn log_alarms(&mut self, eval: &SnapshotEval) {
        let previous = self.history.back().cloned();
        let mut events = Vec::new();
        for param in &eval.params {
            if !param.out_of_control {
                continue;
            }
            let was_out = previous
                .as_ref()
                .and_then(|p| p.param(&param.id))
                .map(|p| p.out_of_control)
                .unwrap_or(false);
            if !was_out {
                events.push(AlarmEvent {
                    seq: eval.seq,
                    source: AlarmSource::Parameter(param.id.clone()),
                    value: param.value,
                });
            }
        }
        if eval.joint.out_of_control
            && !previous.map(|p| p.joint.out_of_control).unwrap_or(false)
        {
            events.push(AlarmEvent {
                seq: eval.seq,
                source: AlarmSource::JointStatistic,
                value: eval.joint.statistic,
            });
        }
        for event in events {
            warn!(alarm = %event, "control limit exceeded");
            self.alarms.push_back(event);
            while self.alarms.len() > self.config.alarm_len {
                self.alarms.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{chi_squared_99, demo_reactor, ParameterDef};
    use crate::signature::{demo_reactor_faults, SignatureLibrary};

    fn nominal_snapshot(ctl: &StreamController, seq: u64) -> Snapshot {
        let readings: Vec<(String, f64)> = ctl
            .registry()
            .iter()
            .map(|d| (d.id.clone(), d.mean))
            .collect();
        Snapshot::new(seq, readings)
    }

    fn running_controller() -> StreamController {
        let mut ctl = StreamController::new(demo_reactor());
        ctl.start();
        ctl
    }

    #[test]
    fn test_initial_state_is_idle() {
        let ctl = StreamController::new(demo_reactor());
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert_eq!(ctl.ticks(), 0);
        assert!(ctl.latest().is_none());
    }

    #[test]
    fn test_ingest_rejected_while_idle() {
        let mut ctl = StreamController::new(demo_reactor());
        let snap = nominal_snapshot(&ctl, 0);
        assert_eq!(ctl.ingest(snap), Err(MonitorError::NotRunning));
    }

    #[test]
    fn test_nominal_tick_records_no_alarms() {
        let mut ctl = running_controller();
        let eval = ctl.ingest(nominal_snapshot(&ctl, 0)).unwrap();
        assert_eq!(eval.joint.statistic, 0.0);
        assert_eq!(ctl.ticks(), 1);
        assert_eq!(ctl.alarms().count(), 0);
        assert_eq!(ctl.history().count(), 1);
    }

    #[test]
    fn test_excursion_logs_parameter_and_joint_alarms() {
        let mut ctl = running_controller();
        let mut snap = nominal_snapshot(&ctl, 0);
        // +8σ on reactor temperature: univariate and joint both trip
        snap.readings.insert("reactor_temp".into(), 120.0 + 8.0 * 1.5);
        ctl.ingest(snap).unwrap();
        let alarms: Vec<&AlarmEvent> = ctl.alarms().collect();
        assert_eq!(alarms.len(), 2);
        assert!(alarms
            .iter()
            .any(|a| a.source == AlarmSource::Parameter("reactor_temp".into())));
        assert!(alarms.iter().any(|a| a.source == AlarmSource::JointStatistic));
    }

    #[test]
    fn test_alarms_are_edge_triggered() {
        let mut ctl = running_controller();
        for seq in 0..3 {
            let mut snap = nominal_snapshot(&ctl, seq);
            snap.readings.insert("reactor_temp".into(), 120.0 + 8.0 * 1.5);
            ctl.ingest(snap).unwrap();
        }
        // Same excursion three ticks running: one parameter alarm and one
        // joint alarm, not three of each.
        assert_eq!(ctl.alarms().count(), 2);

        // Back to nominal, then out again: a new pair of events
        ctl.ingest(nominal_snapshot(&ctl, 3)).unwrap();
        let mut snap = nominal_snapshot(&ctl, 4);
        snap.readings.insert("reactor_temp".into(), 120.0 + 8.0 * 1.5);
        ctl.ingest(snap).unwrap();
        assert_eq!(ctl.alarms().count(), 4);
    }

    #[test]
    fn test_alarm_log_is_most_recent_first_and_bounded() {
        let registry = ParameterRegistry::new(
            vec![ParameterDef::with_three_sigma_limits("p", "P", "u", 0.0, 1.0)],
            chi_squared_99(1).unwrap(),
        )
        .unwrap();
        let mut ctl = StreamController::with_config(
            registry,
            ControllerConfig {
                history_len: 100,
                alarm_len: 3,
            },
        );
        ctl.start();
        // Alternate nominal and excursion so every excursion is an edge
        for i in 0..10u64 {
            let value = if i % 2 == 1 { 10.0 } else { 0.0 };
            ctl.ingest(Snapshot::new(i, [("p", value)])).unwrap();
        }
        // Each excursion logs a parameter event and a joint event; the ring
        // keeps only the newest three of the ten produced.
        let alarms: Vec<&AlarmEvent> = ctl.alarms().collect();
        assert_eq!(alarms.len(), 3, "alarm ring must stay at capacity");
        let seqs: Vec<u64> = alarms.iter().map(|a| a.seq).collect();
        assert_eq!(seqs, vec![9, 9, 7], "most recent events first");
        assert_eq!(alarms[0].source, AlarmSource::JointStatistic);
    }

    #[test]
    fn test_history_window_is_bounded_and_in_order() {
        let mut ctl = StreamController::with_config(
            demo_reactor(),
            ControllerConfig {
                history_len: 5,
                alarm_len: 10,
            },
        );
        ctl.start();
        for seq in 0..8 {
            ctl.ingest(nominal_snapshot(&ctl, seq)).unwrap();
        }
        let seqs: Vec<u64> = ctl.history().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![3, 4, 5, 6, 7], "window must hold the 5 most recent");
    }

    #[test]
    fn test_rejected_tick_leaves_state_untouched() {
        let mut ctl = running_controller();
        ctl.ingest(nominal_snapshot(&ctl, 0)).unwrap();

        let incomplete = Snapshot::new(1, [("reactor_temp", 500.0)]);
        let err = ctl.ingest(incomplete).unwrap_err();
        assert!(matches!(err, MonitorError::MissingReading { seq: 1, .. }));

        assert_eq!(ctl.ticks(), 1, "tick counter must not advance");
        assert_eq!(ctl.history().count(), 1, "history must not grow");
        assert_eq!(ctl.alarms().count(), 0, "no alarm from a rejected tick");
        assert_eq!(ctl.latest().map(|e| e.seq), Some(0));
    }

    #[test]
    fn test_inject_requires_running() {
        let mut ctl = StreamController::new(demo_reactor());
        let fault = InjectedFault {
            label: "test".into(),
            offsets: vec![("reactor_temp".into(), 4.0)],
            duration_ticks: 3,
        };
        assert_eq!(ctl.inject(fault), Err(MonitorError::NotRunning));
    }

    #[test]
    fn test_inject_rejects_unknown_parameter() {
        let mut ctl = running_controller();
        let fault = InjectedFault {
            label: "bad".into(),
            offsets: vec![("flux_capacitor".into(), 1.0)],
            duration_ticks: 3,
        };
        let err = ctl.inject(fault).unwrap_err();
        assert!(matches!(err, MonitorError::UnknownFaultParam { .. }), "got {err:?}");
        assert_eq!(ctl.state(), ControllerState::Running);
    }

    #[test]
    fn test_fault_biases_readings_and_counts_down() {
        let mut ctl = running_controller();
        ctl.inject(InjectedFault {
            label: "hot reactor".into(),
            offsets: vec![("reactor_temp".into(), 4.0)],
            duration_ticks: 2,
        })
        .unwrap();
        assert_eq!(ctl.state(), ControllerState::FaultActive { remaining: 2 });

        let eval = ctl.ingest(nominal_snapshot(&ctl, 0)).unwrap();
        // Nominal reading plus 4σ bias
        assert!((eval.param("reactor_temp").unwrap().z - 4.0).abs() < 1e-9);
        assert_eq!(ctl.state(), ControllerState::FaultActive { remaining: 1 });

        let eval = ctl.ingest(nominal_snapshot(&ctl, 1)).unwrap();
        assert!((eval.param("reactor_temp").unwrap().z - 4.0).abs() < 1e-9);
        // Countdown reached zero: back to plain running
        assert_eq!(ctl.state(), ControllerState::Running);
        assert_eq!(ctl.remaining_fault_ticks(), None);

        let eval = ctl.ingest(nominal_snapshot(&ctl, 2)).unwrap();
        assert_eq!(eval.param("reactor_temp").unwrap().z, 0.0, "bias must be gone");
    }

    #[test]
    fn test_reinjection_overrides_and_restarts() {
        let mut ctl = running_controller();
        ctl.inject(InjectedFault {
            label: "first".into(),
            offsets: vec![("reactor_temp".into(), 2.0)],
            duration_ticks: 5,
        })
        .unwrap();
        ctl.ingest(nominal_snapshot(&ctl, 0)).unwrap();
        assert_eq!(ctl.remaining_fault_ticks(), Some(4));

        ctl.inject(InjectedFault {
            label: "second".into(),
            offsets: vec![("coolant_flow".into(), -3.0)],
            duration_ticks: 5,
        })
        .unwrap();
        assert_eq!(ctl.remaining_fault_ticks(), Some(5), "countdown must restart");

        let eval = ctl.ingest(nominal_snapshot(&ctl, 1)).unwrap();
        assert_eq!(eval.param("reactor_temp").unwrap().z, 0.0, "old fault replaced");
        assert!((eval.param("coolant_flow").unwrap().z + 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_stop_preserves_history_reset_clears_it() {
        let mut ctl = running_controller();
        let mut snap = nominal_snapshot(&ctl, 0);
        snap.readings.insert("reactor_temp".into(), 200.0);
        ctl.ingest(snap).unwrap();

        ctl.stop();
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert_eq!(ctl.history().count(), 1);
        assert_eq!(ctl.alarms().count(), 2);
        assert_eq!(ctl.ticks(), 1);

        ctl.reset();
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert_eq!(ctl.history().count(), 0);
        assert_eq!(ctl.alarms().count(), 0);
        assert_eq!(ctl.ticks(), 0);
        assert!(ctl.contribution_sorted().is_none());
    }

    #[test]
    fn test_stop_abandons_active_fault() {
        let mut ctl = running_controller();
        ctl.inject(InjectedFault {
            label: "transient".into(),
            offsets: vec![("feed_rate".into(), 3.0)],
            duration_ticks: 10,
        })
        .unwrap();
        ctl.stop();
        ctl.start();
        assert_eq!(ctl.state(), ControllerState::Running);
        let eval = ctl.ingest(nominal_snapshot(&ctl, 0)).unwrap();
        assert_eq!(eval.param("feed_rate").unwrap().z, 0.0);
    }

    #[test]
    fn test_sorted_views_and_on_demand_diagnosis() {
        let mut ctl = running_controller();
        let library =
            SignatureLibrary::new(demo_reactor_faults(), ctl.registry()).unwrap();
        assert!(ctl.diagnose(&library).is_none(), "no data yet");

        ctl.inject(InjectedFault {
            label: "fouling".into(),
            offsets: vec![("coolant_flow".into(), -5.0), ("reactor_temp".into(), 4.0)],
            duration_ticks: 1,
        })
        .unwrap();
        ctl.ingest(nominal_snapshot(&ctl, 0)).unwrap();

        let contrib = ctl.contribution_sorted().unwrap();
        assert_eq!(contrib[0].id, "coolant_flow", "largest deviation first");
        let recon = ctl.reconstruction_sorted().unwrap();
        assert_eq!(recon[0].id, "coolant_flow");

        let ranked = ctl.diagnose(&library).unwrap();
        assert_eq!(ranked[0].signature.name, "Cooling water fouling");
        // Idempotent: a second call gives the same ranking
        assert_eq!(ctl.diagnose(&library).unwrap(), ranked);
    }

    #[test]
    fn test_restart_continues_accumulating() {
        let mut ctl = running_controller();
        ctl.ingest(nominal_snapshot(&ctl, 0)).unwrap();
        ctl.stop();
        ctl.start();
        ctl.ingest(nominal_snapshot(&ctl, 1)).unwrap();
        assert_eq!(ctl.ticks(), 2);
        assert_eq!(ctl.history().count(), 2);
    }
}
