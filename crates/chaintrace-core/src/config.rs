use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Top-level config (chaintrace.toml + CHAINTRACE_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaintraceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origin allowed to reach the REST + WS surface (the dashboard).
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

/// Which ledger network the service submits against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Dev,
    Test,
    Main,
}

impl Network {
    /// Well-known public node endpoint for each network.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Dev => "https://rpc.devnet.chaintrace.dev",
            Network::Test => "https://rpc.testnet.chaintrace.dev",
            Network::Main => "https://rpc.chaintrace.dev",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_network")]
    pub network: Network,
    /// Overrides the network's default node endpoint when set.
    pub rpc_url: Option<String>,
    /// Package id of the deployed asset contracts.
    pub package_id: String,
    /// Service signing credential. Required at startup — there is no
    /// unauthenticated write path.
    pub signing_key: Option<String>,
}

impl LedgerConfig {
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// SQLite file holding the recurring job set.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Chance that a tick is flagged anomalous, 0..=1.
    #[serde(default = "default_anomaly_probability")]
    pub anomaly_probability: f64,
    /// Multiplier applied to anomalous values before flooring.
    #[serde(default = "default_amplification")]
    pub amplification: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            anomaly_probability: default_anomaly_probability(),
            amplification: default_amplification(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_allowed_origin() -> String {
    "http://localhost:5173".to_string()
}
fn default_network() -> Network {
    Network::Dev
}
fn default_anomaly_probability() -> f64 {
    0.05
}
fn default_amplification() -> f64 {
    1.5
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{home}/.chaintrace/chaintrace.db")
}

impl ChaintraceConfig {
    /// Load config from a TOML file with CHAINTRACE_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.chaintrace/chaintrace.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: ChaintraceConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CHAINTRACE_").split("_"))
            .extract()
            .map_err(|e| crate::error::ChaintraceError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{home}/.chaintrace/chaintrace.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_urls_are_distinct() {
        assert_ne!(
            Network::Dev.default_rpc_url(),
            Network::Main.default_rpc_url()
        );
    }

    #[test]
    fn rpc_url_override_wins() {
        let cfg = LedgerConfig {
            network: Network::Dev,
            rpc_url: Some("http://localhost:9000".into()),
            package_id: "0x1".into(),
            signing_key: None,
        };
        assert_eq!(cfg.rpc_url(), "http://localhost:9000");
    }

    #[test]
    fn simulator_defaults_match_demo_tuning() {
        let sim = SimulatorConfig::default();
        assert_eq!(sim.anomaly_probability, 0.05);
        assert_eq!(sim.amplification, 1.5);
    }

    #[test]
    fn config_parses_minimal_toml() {
        let config: ChaintraceConfig = Figment::new()
            .merge(figment::providers::Toml::string(
                r#"
                [ledger]
                network = "test"
                package_id = "0xabc"
                "#,
            ))
            .extract()
            .unwrap();
        assert_eq!(config.ledger.network, Network::Test);
        assert_eq!(config.server.port, DEFAULT_PORT);
    }
}
