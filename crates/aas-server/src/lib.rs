//! # Array Addition Server
//!
//! TCP front end for [`aas_engine`]. A client is greeted, asked for two
//! arrays of base-1000 digits (most significant first), and sent their sum.
//!
//! ## Modules
//!
//! - `codec` - text ⇄ digit sequences
//! - `framing` - bounded line reads with overflow detection
//! - `session` - the per-client dialogue
//! - `service` - listening socket and sequential accept loop
//! - `config` - layered server configuration
//! - `prompts` - client-facing text
//!
//! ## Example
//!
//! ```rust,ignore
//! use aas_server::{AdditionServer, ServerConfig};
//!
//! let server = AdditionServer::bind(ServerConfig::default()).await?;
//! let stats = server.run().await?;
//! ```

#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod errors;
pub mod framing;
pub mod prompts;
pub mod service;
pub mod session;

pub use codec::{format_digits, parse_digits, FormattedSum};
pub use config::{ConfigError, LimitsConfig, NetworkConfig, ServerConfig};
pub use errors::{InputError, ServerError, SessionError};
pub use framing::{Frame, LineReader};
pub use service::{AdditionServer, ServerStats, ShutdownHandle};
pub use session::{Session, SessionOutcome};
