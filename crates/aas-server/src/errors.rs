//! # Server Errors
//!
//! `InputError` is recoverable: the client is told what was wrong and asked
//! again. `SessionError` ends one session. `ServerError` ends the server.

use std::io;
use std::net::SocketAddr;

use aas_engine::{DomainError, EngineError, MAX_DIGIT};
use thiserror::Error;

use crate::prompts::{EMPTY_ARRAY_ERROR, INVALID_CONTENT_ERROR, LENGTH_MISMATCH_ERROR};

/// Rejected client input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A token was not an optionally signed decimal integer.
    #[error("Non-integer token: {token:?}")]
    InvalidContent {
        /// Offending token
        token: String,
    },

    /// An integer fell outside `[0, MAX_DIGIT]`.
    #[error("Integer out of range: {token}")]
    OutOfRange {
        /// Offending token
        token: String,
    },

    /// The line contained no integers.
    #[error("Empty array")]
    Empty,

    /// More integers than one operand may hold.
    #[error("Too many integers: {count} > {max}")]
    TooManyDigits {
        /// Integers supplied
        count: usize,
        /// Maximum allowed
        max: usize,
    },

    /// The second array's length differs from the first.
    #[error("Length mismatch: {first} != {second}")]
    LengthMismatch {
        /// Integers in the first array
        first: usize,
        /// Integers in the second array
        second: usize,
    },
}

impl InputError {
    /// Text sent to the client before re-prompting.
    pub fn client_message(&self) -> String {
        match self {
            InputError::InvalidContent { .. } => INVALID_CONTENT_ERROR.to_string(),
            InputError::OutOfRange { token } => format!(
                "\nERROR: The integer {} is out of range. Every integer must be between 0 and {}!\n",
                token, MAX_DIGIT
            ),
            InputError::Empty => EMPTY_ARRAY_ERROR.to_string(),
            InputError::TooManyDigits { count, max } => format!(
                "\nERROR: The inputted integer array has {} integers. At most {} integers are allowed!\n",
                count, max
            ),
            InputError::LengthMismatch { .. } => LENGTH_MISMATCH_ERROR.to_string(),
        }
    }
}

impl From<DomainError> for InputError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::DigitOutOfRange { value, .. } => InputError::OutOfRange {
                token: value.to_string(),
            },
            DomainError::EmptySequence => InputError::Empty,
            DomainError::SequenceTooLong { len, max } => {
                InputError::TooManyDigits { count: len, max }
            }
            DomainError::LengthMismatch { first, second } => {
                InputError::LengthMismatch { first, second }
            }
        }
    }
}

/// Failure that ends a single client session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading from or writing to the client failed.
    #[error("Client I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The addition itself failed; no result was sent.
    #[error("Addition aborted: {0}")]
    Engine(#[from] EngineError),
}

/// Failure that stops the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening socket could not be created.
    #[error("Could not create socket: {0}")]
    Socket(#[source] io::Error),

    /// The socket could not be bound.
    #[error("Could not bind socket to {addr}: {source}")]
    Bind {
        /// Requested address
        addr: SocketAddr,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The socket could not listen.
    #[error("Could not listen: {0}")]
    Listen(#[source] io::Error),

    /// A connection could not be accepted.
    #[error("Could not accept connection: {0}")]
    Accept(#[source] io::Error),

    /// The addition engine could not be built.
    #[error("Engine initialization failed: {0}")]
    Engine(#[from] EngineError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}
