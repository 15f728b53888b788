//! Drive the monitor through a cooling-fault episode on the demo reactor.
//!
//! Run with: cargo run --example reactor_demo -p spcmon-core

use spcmon_core::registry::demo_reactor;
use spcmon_core::signature::{demo_reactor_faults, SignatureLibrary};
use spcmon_core::{InjectedFault, Snapshot, StreamController};

fn main() {
    let registry = demo_reactor();
    let library =
        SignatureLibrary::new(demo_reactor_faults(), &registry).expect("demo catalog is valid");
    let mut ctl = StreamController::new(registry);
    ctl.start();

    // Deterministic feed: a small in-control wobble around each mean.
    let snapshot = |seq: u64, ctl: &StreamController| {
        let readings: Vec<(String, f64)> = ctl
            .registry()
            .iter()
            .enumerate()
            .map(|(i, def)| {
                let wobble = ((seq as f64) * 0.7 + i as f64).sin() * 0.4 * def.sigma;
                (def.id.clone(), def.mean + wobble)
            })
            .collect();
        Snapshot::new(seq, readings)
    };

    println!("── in-control phase ───────────────────────────");
    for seq in 0..5 {
        let eval = ctl.ingest(snapshot(seq, &ctl)).expect("complete snapshot");
        println!(
            "seq {:>2}  S = {:6.2}  (limit {:.2})  {}",
            eval.seq,
            eval.joint.statistic,
            eval.joint.limit,
            if eval.joint.out_of_control { "OUT OF CONTROL" } else { "ok" }
        );
    }

    println!("\n── injecting cooling water fouling for 4 ticks ─");
    ctl.inject(InjectedFault {
        label: "Cooling water fouling".to_string(),
        offsets: vec![
            ("coolant_flow".to_string(), -4.5),
            ("reactor_temp".to_string(), 3.5),
            ("reactor_pressure".to_string(), 1.5),
        ],
        duration_ticks: 4,
    })
    .expect("stream is running");

    for seq in 5..9 {
        let eval = ctl.ingest(snapshot(seq, &ctl)).expect("complete snapshot");
        println!(
            "seq {:>2}  S = {:6.2}  state = {:?}",
            eval.seq,
            eval.joint.statistic,
            ctl.state()
        );
    }

    println!("\n── top contributors (latest snapshot) ─────────");
    for entry in ctl.contribution_sorted().expect("have data").iter().take(3) {
        println!(
            "{:<18} contribution {:7.2}  z = {:+.2} ({})",
            entry.id, entry.contribution, entry.z, entry.direction
        );
    }

    println!("\n── alarm log (most recent first) ──────────────");
    for alarm in ctl.alarms().take(6) {
        println!("{alarm}");
    }

    println!("\n── ranked diagnosis ───────────────────────────");
    for result in ctl.diagnose(&library).expect("have data").iter().take(3) {
        println!(
            "{:5.1}  {:<28} [{:?}] driver: {}",
            result.score, result.signature.name, result.signature.severity,
            result.signature.primary_driver
        );
    }

    println!("\n── recovery ───────────────────────────────────");
    for seq in 9..12 {
        let eval = ctl.ingest(snapshot(seq, &ctl)).expect("complete snapshot");
        println!(
            "seq {:>2}  S = {:6.2}  state = {:?}",
            eval.seq,
            eval.joint.statistic,
            ctl.state()
        );
    }
}
