//! `chaintrace-simulator` — recurring sensor-simulation jobs.
//!
//! # Overview
//!
//! Jobs are persisted to a SQLite `sim_jobs` table, one row per
//! (asset, sensor kind) pair. The [`engine::SimulatorEngine`] polls
//! the table and forwards due jobs over a bounded channel; the
//! [`runner::TickRunner`] executes each tick on its own task —
//! generate a synthetic reading, submit it to the ledger as one
//! two-call transaction, and broadcast it to live viewers only after
//! the write confirms.
//!
//! A slow or failing tick never delays another job's schedule, and a
//! failed ledger write never produces a broadcast.

pub mod db;
pub mod engine;
pub mod error;
pub mod reading;
pub mod runner;
pub mod types;

pub use engine::{SimulatorEngine, SimulatorHandle};
pub use error::{Result, SimulatorError};
pub use runner::TickRunner;
pub use types::{JobOverrides, SimJob};
