use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

mod app;
mod error;
mod http;
mod ws;

#[derive(Debug, Parser)]
#[command(name = "chaintrace-gateway", about = "Ledger-backed asset tracking service")]
struct Cli {
    /// Path to chaintrace.toml (default: ~/.chaintrace/chaintrace.toml).
    #[arg(long)]
    config: Option<String>,

    /// Override the configured listen port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chaintrace_gateway=info,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    // config: --config flag > CHAINTRACE_CONFIG env > ~/.chaintrace/chaintrace.toml
    let config_path = cli.config.or_else(|| std::env::var("CHAINTRACE_CONFIG").ok());
    let mut config = chaintrace_core::ChaintraceConfig::load(config_path.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // The signing credential gates every write path: missing means the
    // process is useless, so fail fast instead of limping along.
    let signing_key = config.ledger.signing_key.clone().ok_or_else(|| {
        chaintrace_core::ChaintraceError::CredentialMissing(
            "set ledger.signing_key in chaintrace.toml".into(),
        )
    })?;
    let signer = chaintrace_ledger::Signer::new(&signing_key)?;

    let rpc_url = config.ledger.rpc_url().to_string();
    let ledger_client = chaintrace_ledger::JsonRpcLedger::new(&rpc_url, signer);
    let service_address = ledger_client.address().to_string();
    let ledger: Arc<dyn chaintrace_ledger::Ledger> = Arc::new(ledger_client);
    info!(
        network = ?config.ledger.network,
        url = %rpc_url,
        address = %service_address,
        "ledger gateway initialized"
    );

    // simulator persistence — WAL so the handle and engine connections
    // don't block each other
    let db_path = config.simulator.db_path.clone();
    ensure_parent_dir(&db_path);
    info!(path = %db_path, "opening simulator database");
    let db = rusqlite::Connection::open(&db_path)?;
    db.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    chaintrace_simulator::db::init_db(&db)?;
    drop(db);

    // Fired-tick channel: SimulatorEngine → TickRunner
    let (fired_tx, fired_rx) = tokio::sync::mpsc::channel::<chaintrace_simulator::SimJob>(256);

    let simulator = chaintrace_simulator::SimulatorHandle::new(
        rusqlite::Connection::open(&db_path)?,
        config.simulator.anomaly_probability,
    )?;
    let engine = chaintrace_simulator::SimulatorEngine::new(
        rusqlite::Connection::open(&db_path)?,
        fired_tx,
    )?;

    let hub = Arc::new(chaintrace_telemetry::TelemetryHub::new());
    let runner = Arc::new(chaintrace_simulator::TickRunner::new(
        Arc::clone(&ledger),
        Arc::clone(&hub),
        config.ledger.package_id.clone(),
        config.simulator.amplification,
    ));
    tokio::spawn(runner.run(fired_rx));

    // spawn the engine loop in the background
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(engine.run(shutdown_rx));

    let assets = chaintrace_assets::AssetService::new(
        Arc::clone(&ledger),
        config.ledger.package_id.clone(),
    );

    let bind = config.server.bind.clone();
    let port = config.server.port;
    let state = Arc::new(app::AppState {
        config,
        assets,
        hub,
        simulator,
        service_address,
    });
    let router = app::build_router(Arc::clone(&state));

    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    info!("chaintrace gateway listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    // signal the engine to stop
    let _ = shutdown_tx.send(true);
    Ok(())
}

/// Ensure the parent directory for a file path exists.
fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
