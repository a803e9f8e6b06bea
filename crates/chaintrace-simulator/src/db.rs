use rusqlite::Connection;

use crate::error::Result;

/// Initialise the simulator schema in `conn`.
///
/// Creates the `sim_jobs` table (idempotent) and an index on
/// `next_run` so the polling query stays cheap. The composite primary
/// key is what enforces at-most-one-job-per-(asset, kind).
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sim_jobs (
            asset_id            TEXT    NOT NULL,
            sensor_kind         TEXT    NOT NULL,
            base_value          REAL    NOT NULL,
            variance            REAL    NOT NULL,
            anomaly_probability REAL    NOT NULL,
            interval_ms         INTEGER NOT NULL,
            enabled             INTEGER NOT NULL DEFAULT 1,
            last_run            INTEGER,            -- epoch millis or NULL
            next_run            INTEGER NOT NULL,   -- epoch millis
            run_count           INTEGER NOT NULL DEFAULT 0,
            created_at          INTEGER NOT NULL,
            updated_at          INTEGER NOT NULL,
            PRIMARY KEY (asset_id, sensor_kind)
        ) STRICT;

        -- Efficient polling: SELECT … WHERE next_run <= ?
        CREATE INDEX IF NOT EXISTS idx_sim_jobs_next_run ON sim_jobs (next_run);
        ",
    )?;
    Ok(())
}
