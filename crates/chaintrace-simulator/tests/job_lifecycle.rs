// Persistence and scheduling semantics of the simulator: replacement,
// removal, due-time firing, and startup re-arming.

use std::sync::atomic::{AtomicU32, Ordering};

use chaintrace_core::SensorKind;
use chaintrace_simulator::{JobOverrides, SimulatorEngine, SimulatorHandle};
use rusqlite::Connection;
use tokio::sync::mpsc;

static DB_SEQ: AtomicU32 = AtomicU32::new(0);

/// Handle and engine need separate connections to one database, so
/// in-memory SQLite is out — use a throwaway file per test.
fn temp_db_path() -> std::path::PathBuf {
    let seq = DB_SEQ.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "chaintrace-sim-test-{}-{seq}.db",
        std::process::id()
    ))
}

fn open_pair() -> (SimulatorHandle, SimulatorEngine, mpsc::Receiver<chaintrace_simulator::SimJob>) {
    let path = temp_db_path();
    let handle =
        SimulatorHandle::new(Connection::open(&path).unwrap(), 0.05).unwrap();
    let (fired_tx, fired_rx) = mpsc::channel(64);
    let engine = SimulatorEngine::new(Connection::open(&path).unwrap(), fired_tx).unwrap();
    (handle, engine, fired_rx)
}

#[test]
fn add_job_rejects_non_positive_interval() {
    let (handle, _engine, _rx) = open_pair();
    for bad in [0, -5] {
        let err = handle
            .add_job("0xA1", SensorKind::Temperature, bad, JobOverrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("interval_ms"), "{err}");
    }
}

#[test]
fn add_job_rejects_out_of_range_probability() {
    let (handle, _engine, _rx) = open_pair();
    let overrides = JobOverrides {
        anomaly_probability: Some(1.5),
        ..Default::default()
    };
    assert!(handle
        .add_job("0xA1", SensorKind::Temperature, 1000, overrides)
        .is_err());
}

#[test]
fn add_job_requires_base_value_for_unknown_kinds() {
    let (handle, _engine, _rx) = open_pair();
    let kind: SensorKind = "strain".parse().unwrap();

    assert!(handle
        .add_job("0xA1", kind.clone(), 1000, JobOverrides::default())
        .is_err());

    let overrides = JobOverrides {
        base_value: Some(120.0),
        ..Default::default()
    };
    let job = handle.add_job("0xA1", kind, 1000, overrides).unwrap();
    assert_eq!(job.base_value, 120.0);
    assert_eq!(job.variance, 12.0); // 10% of base
}

#[test]
fn add_job_applies_kind_defaults() {
    let (handle, _engine, _rx) = open_pair();
    let job = handle
        .add_job("0xA1", SensorKind::Temperature, 1000, JobOverrides::default())
        .unwrap();
    assert_eq!(job.base_value, 7500.0);
    assert_eq!(job.variance, 750.0);
    assert_eq!(job.anomaly_probability, 0.05);
    assert!(job.enabled);
    assert_eq!(job.run_count, 0);
    assert!(job.next_run >= job.created_at + 1000);
}

#[test]
fn readding_replaces_instead_of_duplicating() {
    let (handle, _engine, _rx) = open_pair();
    let first = handle
        .add_job("0xA1", SensorKind::Temperature, 1000, JobOverrides::default())
        .unwrap();
    let second = handle
        .add_job("0xA1", SensorKind::Temperature, 5000, JobOverrides::default())
        .unwrap();

    assert_eq!(handle.list_jobs().unwrap().len(), 1);
    assert_eq!(second.interval_ms, 5000);
    // Replacement keeps identity, swaps parameters.
    assert_eq!(second.created_at, first.created_at);
}

#[test]
fn jobs_for_different_kinds_coexist() {
    let (handle, _engine, _rx) = open_pair();
    handle
        .add_job("0xA1", SensorKind::Temperature, 1000, JobOverrides::default())
        .unwrap();
    handle
        .add_job("0xA1", SensorKind::Vibration, 1000, JobOverrides::default())
        .unwrap();
    handle
        .add_job("0xB2", SensorKind::Temperature, 1000, JobOverrides::default())
        .unwrap();
    assert_eq!(handle.list_jobs().unwrap().len(), 3);
}

#[test]
fn remove_job_is_idempotent() {
    let (handle, _engine, _rx) = open_pair();
    handle
        .add_job("0xA1", SensorKind::Temperature, 1000, JobOverrides::default())
        .unwrap();

    assert!(handle.remove_job("0xA1", &SensorKind::Temperature).unwrap());
    assert!(!handle.remove_job("0xA1", &SensorKind::Temperature).unwrap());
    assert!(handle.get_job("0xA1", &SensorKind::Temperature).unwrap().is_none());
}

#[test]
fn tick_fires_only_when_due_and_advances_the_schedule() {
    let (handle, mut engine, mut rx) = open_pair();
    let job = handle
        .add_job("0xA1", SensorKind::Temperature, 1000, JobOverrides::default())
        .unwrap();

    // Not yet due.
    assert_eq!(engine.tick_at(job.next_run - 1).unwrap(), 0);
    assert!(rx.try_recv().is_err());

    // Due now.
    assert_eq!(engine.tick_at(job.next_run).unwrap(), 1);
    let fired = rx.try_recv().unwrap();
    assert_eq!(fired.asset_id, "0xA1");
    assert_eq!(fired.run_count, 1);
    assert_eq!(fired.next_run, job.next_run + 1000);
    assert_eq!(fired.last_run, Some(job.next_run));

    // Immediately after firing, nothing is due until the next interval.
    assert_eq!(engine.tick_at(job.next_run + 999).unwrap(), 0);
    assert_eq!(engine.tick_at(job.next_run + 1000).unwrap(), 1);
}

#[test]
fn ticks_repeat_for_the_lifetime_of_the_job() {
    let (handle, mut engine, mut rx) = open_pair();
    let job = handle
        .add_job("0xA1", SensorKind::Temperature, 1000, JobOverrides::default())
        .unwrap();

    let mut now = job.next_run;
    for expected_count in 1..=5u32 {
        assert_eq!(engine.tick_at(now).unwrap(), 1);
        assert_eq!(rx.try_recv().unwrap().run_count, expected_count);
        now += 1000;
    }
}

#[test]
fn removed_jobs_never_fire_again() {
    let (handle, mut engine, mut rx) = open_pair();
    let job = handle
        .add_job("0xA1", SensorKind::Temperature, 1000, JobOverrides::default())
        .unwrap();
    handle.remove_job("0xA1", &SensorKind::Temperature).unwrap();

    // Several intervals past the would-be due times: still silent.
    for i in 1..=5 {
        assert_eq!(engine.tick_at(job.next_run + i * 1000).unwrap(), 0);
    }
    assert!(rx.try_recv().is_err());
}

#[test]
fn one_due_job_does_not_drag_others_forward() {
    let (handle, mut engine, mut rx) = open_pair();
    let fast = handle
        .add_job("0xA1", SensorKind::Temperature, 1000, JobOverrides::default())
        .unwrap();
    handle
        .add_job("0xB2", SensorKind::Pressure, 60_000, JobOverrides::default())
        .unwrap();

    assert_eq!(engine.tick_at(fast.next_run).unwrap(), 1);
    assert_eq!(rx.try_recv().unwrap().asset_id, "0xA1");
    assert!(rx.try_recv().is_err());
}

#[test]
fn replacement_reschedules_pending_ticks() {
    let (handle, mut engine, mut rx) = open_pair();
    let original = handle
        .add_job("0xA1", SensorKind::Temperature, 1000, JobOverrides::default())
        .unwrap();
    let replaced = handle
        .add_job("0xA1", SensorKind::Temperature, 10_000, JobOverrides::default())
        .unwrap();

    // The old one-second due time no longer exists.
    assert_eq!(engine.tick_at(original.next_run).unwrap(), 0);
    assert_eq!(engine.tick_at(replaced.next_run).unwrap(), 1);
    assert_eq!(rx.try_recv().unwrap().interval_ms, 10_000);
}

#[test]
fn missed_jobs_are_rearmed_on_startup() {
    let path = temp_db_path();
    let handle = SimulatorHandle::new(Connection::open(&path).unwrap(), 0.05).unwrap();
    let job = handle
        .add_job("0xA1", SensorKind::Temperature, 1000, JobOverrides::default())
        .unwrap();

    // Simulate a long outage: push the due time far into the past.
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "UPDATE sim_jobs SET next_run = ?1",
            [job.next_run - 3_600_000],
        )
        .unwrap();
    }

    let (fired_tx, mut fired_rx) = mpsc::channel(64);
    let mut engine = SimulatorEngine::new(Connection::open(&path).unwrap(), fired_tx).unwrap();
    engine.rearm_missed_on_startup();

    // The backlog is skipped: nothing fires now, one tick fires an
    // interval later.
    let rearmed = handle
        .get_job("0xA1", &SensorKind::Temperature)
        .unwrap()
        .unwrap();
    assert_eq!(engine.tick_at(rearmed.next_run - 1).unwrap(), 0);
    assert_eq!(engine.tick_at(rearmed.next_run).unwrap(), 1);
    assert!(fired_rx.try_recv().is_ok());
}
