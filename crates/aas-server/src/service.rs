//! # Addition Server
//!
//! Owns the listening socket and serves one client at a time.
//!
//! ```text
//! bind ─→ listen ─→ ┌→ accept ─→ session ─┐ ─→ stop
//!                   └─────────────────────┘
//!                 (until max_sessions or shutdown)
//! ```

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use aas_engine::AdditionEngine;
use aas_telemetry::log_event;
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::errors::{ServerError, SessionError};
use crate::session::{Session, SessionOutcome};

/// Pause after a transient accept failure.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Counters reported when the server stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerStats {
    /// Connections accepted.
    pub sessions: usize,
    /// Sessions that delivered a sum.
    pub completed: usize,
    /// Sessions the client abandoned.
    pub disconnected: usize,
    /// Sessions that ended on an I/O or engine error, plus failed accepts.
    pub failed: usize,
}

/// Stops a running server after its current session.
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Request shutdown. Has no effect if the server already stopped.
    pub fn trigger(self) {
        let _ = self.tx.send(());
    }
}

/// Sequential TCP server for array addition sessions.
pub struct AdditionServer {
    config: ServerConfig,
    engine: AdditionEngine,
    listener: TcpListener,
    shutdown_tx: Option<oneshot::Sender<()>>,
    shutdown_rx: oneshot::Receiver<()>,
}

impl AdditionServer {
    /// Validate the config, build the engine and start listening.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        config.validate()?;
        let engine = AdditionEngine::from_config(&config.engine)?;
        Self::bind_with_engine(config, engine).await
    }

    /// Start listening with an already built engine.
    pub async fn bind_with_engine(
        config: ServerConfig,
        engine: AdditionEngine,
    ) -> Result<Self, ServerError> {
        let addr = config.socket_addr();

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(ServerError::Socket)?;
        log_event!(info, "server", "Socket created");

        socket.set_reuseaddr(true).map_err(ServerError::Socket)?;
        socket
            .bind(addr)
            .map_err(|source| ServerError::Bind { addr, source })?;
        log_event!(info, "server", "Socket bound", %addr);

        let listener = socket
            .listen(config.network.backlog)
            .map_err(ServerError::Listen)?;
        let local = listener.local_addr().map_err(ServerError::Listen)?;
        log_event!(
            info,
            "server",
            "Listening for clients",
            addr = %local,
            backlog = config.network.backlog,
            backend = %engine.backend()
        );

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        Ok(Self {
            config,
            engine,
            listener,
            shutdown_tx: Some(shutdown_tx),
            shutdown_rx,
        })
    }

    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener.local_addr().map_err(ServerError::Listen)
    }

    /// Take the shutdown handle. Only the first call returns one.
    pub fn shutdown_handle(&mut self) -> Option<ShutdownHandle> {
        self.shutdown_tx.take().map(|tx| ShutdownHandle { tx })
    }

    /// Serve sessions until the session limit is reached or shutdown is
    /// requested.
    pub async fn run(mut self) -> Result<ServerStats, ServerError> {
        let mut stats = ServerStats::default();
        let limit = self.config.max_sessions;
        // A dropped handle closes the channel without asking for shutdown.
        let mut shutdown_open = true;

        while limit == 0 || stats.sessions < limit {
            let accepted = tokio::select! {
                accepted = self.listener.accept() => accepted,
                signal = &mut self.shutdown_rx, if shutdown_open => match signal {
                    Ok(()) => {
                        info!("Shutdown requested");
                        break;
                    }
                    Err(_) => {
                        shutdown_open = false;
                        continue;
                    }
                },
            };

            let (stream, peer) = match accepted {
                Ok(connection) => connection,
                Err(e) if is_transient_accept_error(&e) => {
                    stats.failed += 1;
                    warn!(error = %e, "Accept failed, retrying");
                    // Back off so a descriptor shortage does not spin the loop.
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
                Err(e) => return Err(ServerError::Accept(e)),
            };

            stats.sessions += 1;
            log_event!(info, "server", "Client accepted", %peer, session = stats.sessions);

            match self.serve(stream).await {
                Ok(SessionOutcome::Completed { .. }) => stats.completed += 1,
                Ok(SessionOutcome::Disconnected) => stats.disconnected += 1,
                Err(e) => {
                    stats.failed += 1;
                    error!(%peer, error = %e, "Session failed");
                }
            }
        }

        info!(
            sessions = stats.sessions,
            completed = stats.completed,
            disconnected = stats.disconnected,
            failed = stats.failed,
            "Server stopped"
        );
        Ok(stats)
    }

    async fn serve(&self, stream: TcpStream) -> Result<SessionOutcome, SessionError> {
        if let Err(e) = stream.set_nodelay(true) {
            warn!(error = %e, "Could not disable Nagle");
        }
        let (read_half, write_half) = stream.into_split();
        let session = Session::new(
            BufReader::new(read_half),
            write_half,
            self.engine.clone(),
            self.config.limits.max_line_bytes,
        );
        session.run().await
    }
}

/// Accept errors that concern one connection or a passing resource limit.
/// Anything else means the listener itself is broken.
fn is_transient_accept_error(e: &io::Error) -> bool {
    match e.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::Interrupted
        | io::ErrorKind::WouldBlock
        | io::ErrorKind::TimedOut
        | io::ErrorKind::OutOfMemory => true,
        // ENFILE, EMFILE
        _ => cfg!(unix) && matches!(e.raw_os_error(), Some(23) | Some(24)),
    }
}
