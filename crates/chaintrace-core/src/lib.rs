//! `chaintrace-core` — shared types, configuration, and errors.
//!
//! Everything the other crates agree on lives here: the sensor domain
//! model ([`types::SensorKind`], [`types::Reading`]), the TOML + env
//! configuration layer, and the top-level error type used during
//! process startup.

pub mod config;
pub mod error;
pub mod types;

pub use config::ChaintraceConfig;
pub use error::{ChaintraceError, Result};
pub use types::{Reading, SensorKind};
