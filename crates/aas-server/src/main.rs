//! # aas-server
//!
//! Startup sequence:
//!
//! 1. Initialize logging (`aas-telemetry`, environment driven)
//! 2. Load configuration (defaults, JSON file, `AAS_*` variables, flags)
//! 3. Build the addition engine and bind the listener
//! 4. Serve sessions until the limit is reached or Ctrl+C arrives

use std::net::IpAddr;
use std::path::PathBuf;

use aas_engine::Backend;
use aas_server::{AdditionServer, ServerConfig};
use aas_telemetry::{init_telemetry, TelemetryConfig};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

/// Array Addition Server
#[derive(Parser, Debug)]
#[command(name = "aas-server")]
#[command(about = "Adds two arrays of base-1000 digits sent over TCP")]
#[command(version)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    bind: Option<IpAddr>,

    /// TCP port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Pending-connection queue length
    #[arg(long)]
    backlog: Option<u32>,

    /// Parallel-stage backend (auto, cpu or threads)
    #[arg(short, long)]
    backend: Option<Backend>,

    /// Rayon worker threads (0 = one per CPU)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Sessions to serve before exiting (0 = unlimited)
    #[arg(short = 'n', long)]
    max_sessions: Option<usize>,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(bind) = self.bind {
            config.network.bind_addr = bind;
        }
        if let Some(port) = self.port {
            config.network.port = port;
        }
        if let Some(backlog) = self.backlog {
            config.network.backlog = backlog;
        }
        if let Some(backend) = self.backend {
            config.engine.backend = backend;
        }
        if let Some(workers) = self.workers {
            config.engine.worker_threads = (workers > 0).then_some(workers);
        }
        if let Some(max_sessions) = self.max_sessions {
            config.max_sessions = max_sessions;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env();
    telemetry.json_logs |= args.json_logs;
    init_telemetry(&telemetry).context("initializing logging")?;

    let mut config = ServerConfig::load(args.config.as_deref()).context("loading configuration")?;
    args.apply(&mut config);

    info!(
        version = aas_engine::VERSION,
        addr = %config.socket_addr(),
        backend = %config.engine.backend,
        max_sessions = config.max_sessions,
        "Starting array addition server"
    );

    let mut server = AdditionServer::bind(config)
        .await
        .context("starting server")?;

    if let Some(shutdown) = server.shutdown_handle() {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => shutdown.trigger(),
                Err(e) => warn!(error = %e, "Could not listen for Ctrl+C"),
            }
        });
    }

    let stats = server.run().await.context("serving sessions")?;
    info!(
        sessions = stats.sessions,
        completed = stats.completed,
        failed = stats.failed,
        "Done"
    );

    Ok(())
}
