use std::sync::{Arc, Mutex};

use chaintrace_core::types::SensorKind;
use chrono::Utc;
use rusqlite::{Connection, Row};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use crate::{
    db::init_db,
    error::{Result, SimulatorError},
    types::{JobOverrides, SimJob},
};

/// How often the engine checks for due jobs. Intervals are specified
/// in milliseconds, so the poll has to be finer than one second.
const POLL_INTERVAL_MS: u64 = 200;

/// Variance applied when a job does not override it: 10% of base.
const DEFAULT_VARIANCE_FRACTION: f64 = 0.1;

const JOB_COLUMNS: &str = "asset_id, sensor_kind, base_value, variance, anomaly_probability,
     interval_ms, enabled, last_run, next_run, run_count, created_at, updated_at";

fn job_from_row(row: &Row<'_>) -> rusqlite::Result<SimJob> {
    let kind: String = row.get(1)?;
    Ok(SimJob {
        asset_id: row.get(0)?,
        kind: kind.parse().expect("SensorKind::from_str is infallible"),
        base_value: row.get(2)?,
        variance: row.get(3)?,
        anomaly_probability: row.get(4)?,
        interval_ms: row.get(5)?,
        enabled: row.get(6)?,
        last_run: row.get(7)?,
        next_run: row.get(8)?,
        run_count: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

/// Shared handle for job management (add/remove/list) while the engine
/// loop runs.
///
/// Uses its own `Connection` so request handlers can manage jobs
/// without conflicting with the engine's polling queries.
pub struct SimulatorHandle {
    conn: Arc<Mutex<Connection>>,
    default_anomaly_probability: f64,
}

impl SimulatorHandle {
    pub fn new(conn: Connection, default_anomaly_probability: f64) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            default_anomaly_probability,
        })
    }

    /// Create or replace the job keyed by (asset_id, kind).
    ///
    /// Replacement keeps `created_at` and `run_count`, swaps every
    /// parameter, and re-arms the schedule: the first tick after an
    /// add (or replace) fires at now + interval_ms, never immediately.
    pub fn add_job(
        &self,
        asset_id: &str,
        kind: SensorKind,
        interval_ms: i64,
        overrides: JobOverrides,
    ) -> Result<SimJob> {
        if asset_id.trim().is_empty() {
            return Err(SimulatorError::InvalidParameter(
                "asset_id must not be empty".into(),
            ));
        }
        if interval_ms <= 0 {
            return Err(SimulatorError::InvalidParameter(format!(
                "interval_ms must be positive, got {interval_ms}"
            )));
        }

        let base_value = match overrides.base_value.or_else(|| kind.default_base_value()) {
            Some(v) => v,
            None => {
                return Err(SimulatorError::InvalidParameter(format!(
                    "no default base value for sensor kind \"{kind}\" — supply base_value"
                )))
            }
        };
        let variance = overrides
            .variance
            .unwrap_or(base_value.abs() * DEFAULT_VARIANCE_FRACTION);
        if variance < 0.0 {
            return Err(SimulatorError::InvalidParameter(format!(
                "variance must not be negative, got {variance}"
            )));
        }
        let anomaly_probability = overrides
            .anomaly_probability
            .unwrap_or(self.default_anomaly_probability);
        if !(0.0..=1.0).contains(&anomaly_probability) {
            return Err(SimulatorError::InvalidParameter(format!(
                "anomaly_probability must be within 0..=1, got {anomaly_probability}"
            )));
        }

        let now = Utc::now().timestamp_millis();
        let next = now + interval_ms;
        let kind_str = kind.to_string();

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sim_jobs
             (asset_id, sensor_kind, base_value, variance, anomaly_probability,
              interval_ms, enabled, last_run, next_run, run_count, created_at, updated_at)
             VALUES (?1,?2,?3,?4,?5,?6,1,NULL,?7,0,?8,?8)
             ON CONFLICT(asset_id, sensor_kind) DO UPDATE SET
               base_value=excluded.base_value,
               variance=excluded.variance,
               anomaly_probability=excluded.anomaly_probability,
               interval_ms=excluded.interval_ms,
               enabled=1,
               next_run=excluded.next_run,
               updated_at=excluded.updated_at",
            rusqlite::params![
                asset_id,
                kind_str,
                base_value,
                variance,
                anomaly_probability,
                interval_ms,
                next,
                now
            ],
        )?;

        info!(asset_id, kind = %kind_str, interval_ms, "simulation job added");

        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {JOB_COLUMNS} FROM sim_jobs WHERE asset_id = ?1 AND sensor_kind = ?2"
        ))?;
        let job = stmt.query_row(rusqlite::params![asset_id, kind_str], job_from_row)?;
        Ok(job)
    }

    /// Cancel future ticks for (asset_id, kind). Idempotent: removing
    /// a job that does not exist is not an error. Returns whether a
    /// job was actually removed.
    pub fn remove_job(&self, asset_id: &str, kind: &SensorKind) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let n = conn.execute(
            "DELETE FROM sim_jobs WHERE asset_id = ?1 AND sensor_kind = ?2",
            rusqlite::params![asset_id, kind.to_string()],
        )?;
        if n > 0 {
            info!(asset_id, kind = %kind, "simulation job removed");
        }
        Ok(n > 0)
    }

    /// Return all known jobs ordered by creation time.
    pub fn list_jobs(&self) -> Result<Vec<SimJob>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {JOB_COLUMNS} FROM sim_jobs ORDER BY created_at, asset_id, sensor_kind"
        ))?;
        let jobs = stmt
            .query_map([], job_from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(jobs)
    }

    /// Fetch one job, if present.
    pub fn get_job(&self, asset_id: &str, kind: &SensorKind) -> Result<Option<SimJob>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {JOB_COLUMNS} FROM sim_jobs WHERE asset_id = ?1 AND sensor_kind = ?2"
        ))?;
        let job = stmt
            .query_row(rusqlite::params![asset_id, kind.to_string()], job_from_row)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        Ok(job)
    }
}

/// Polling engine: drives the persisted job set and forwards fired
/// jobs to the tick runner.
///
/// The engine itself never executes a tick — execution happens on the
/// runner's per-tick tasks, so one job's slow ledger write can never
/// delay another job's due time.
pub struct SimulatorEngine {
    conn: Connection,
    fired_tx: mpsc::Sender<SimJob>,
}

impl SimulatorEngine {
    /// Create a new engine, initialising the DB schema if needed.
    /// Every fired job is forwarded over `fired_tx` (non-blocking).
    pub fn new(conn: Connection, fired_tx: mpsc::Sender<SimJob>) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self { conn, fired_tx })
    }

    /// Re-arm jobs whose due time passed while the process was down:
    /// missed windows are skipped, not replayed, and the next tick
    /// lands one full interval from now.
    pub fn rearm_missed_on_startup(&self) {
        let now = Utc::now().timestamp_millis();
        match self.conn.execute(
            "UPDATE sim_jobs SET next_run = ?1 + interval_ms, updated_at = ?1
             WHERE enabled = 1 AND next_run < ?1",
            [now],
        ) {
            Ok(n) if n > 0 => warn!(count = n, "jobs re-armed after missed windows"),
            Err(e) => error!("re-arm query failed: {e}"),
            _ => {}
        }
    }

    /// Main event loop. Polls until `shutdown` broadcasts `true`.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("simulator engine started");
        self.rearm_missed_on_startup();

        let mut interval =
            tokio::time::interval(std::time::Duration::from_millis(POLL_INTERVAL_MS));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.tick_at(Utc::now().timestamp_millis()) {
                        error!("simulator tick error: {e}");
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("simulator engine shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Fire every enabled job due as of `now_ms`.
    ///
    /// The schedule advances at fire time — next_run = now + interval —
    /// so a tick that takes longer than its interval to execute does
    /// not stack up a backlog, and jobs never starve each other.
    /// Returns the number of jobs fired.
    pub fn tick_at(&mut self, now_ms: i64) -> Result<usize> {
        // Collect eagerly so `stmt` is dropped before we borrow
        // `self.conn` again for the UPDATE below.
        let due: Vec<SimJob> = {
            let mut stmt = self.conn.prepare_cached(&format!(
                "SELECT {JOB_COLUMNS} FROM sim_jobs
                 WHERE enabled = 1 AND next_run <= ?1"
            ))?;
            let rows: Vec<SimJob> = stmt
                .query_map([now_ms], job_from_row)?
                .filter_map(|r| r.ok())
                .collect();
            rows
        };

        let mut fired = 0;
        for mut job in due {
            let next = now_ms + job.interval_ms;
            let new_count = job.run_count + 1;

            self.conn.execute(
                "UPDATE sim_jobs SET last_run=?1, next_run=?2, run_count=?3, updated_at=?1
                 WHERE asset_id=?4 AND sensor_kind=?5",
                rusqlite::params![now_ms, next, new_count, job.asset_id, job.kind.to_string()],
            )?;

            job.last_run = Some(now_ms);
            job.next_run = next;
            job.run_count = new_count;
            job.updated_at = now_ms;

            // try_send never blocks the poll loop; a full channel means
            // the runner is saturated and this tick is dropped.
            if self.fired_tx.try_send(job.clone()).is_err() {
                warn!(
                    asset_id = %job.asset_id,
                    kind = %job.kind,
                    "tick channel full or closed — tick dropped"
                );
            }
            fired += 1;
        }
        Ok(fired)
    }
}
