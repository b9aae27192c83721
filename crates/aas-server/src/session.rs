//! # Client Session
//!
//! The dialogue with one client:
//!
//! ```text
//! welcome
//! ┌→ first-array prompt  ── read ─┬─ invalid → error message ─┐
//! └───────────────────────────────┴───────────────────────────┘
//! ┌→ second-array prompt ── read ─┬─ invalid / length mismatch → error ─┐
//! └───────────────────────────────┴─────────────────────────────────────┘
//! add (blocking worker) → result prompt → sum → goodbye
//! ```
//!
//! A client that disconnects ends the session. An engine failure also ends
//! it, before anything of the result is written.

use aas_engine::{AdditionEngine, DigitSequence, EngineError, Operands};
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tracing::Instrument;
use uuid::Uuid;

use crate::codec::{format_digits, parse_digits};
use crate::errors::{InputError, SessionError};
use crate::framing::{Frame, LineReader};
use crate::prompts::{
    FIRST_ARRAY_PROMPT, GOODBYE_PROMPT, INPUT_OVERFLOW_WARNING, OUTPUT_OVERFLOW_WARNING,
    RESULT_PROMPT, SECOND_ARRAY_PROMPT, WELCOME_PROMPT,
};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The sum was sent.
    Completed {
        /// Digits in the sum
        digits: usize,
        /// True when the sum gained a leading digit
        grew: bool,
        /// True when the output line dropped trailing digits
        truncated: bool,
    },
    /// The client went away before the sum could be sent.
    Disconnected,
}

/// One client session over any buffered reader and writer.
pub struct Session<R, W> {
    id: Uuid,
    reader: LineReader<R>,
    writer: W,
    engine: AdditionEngine,
    max_line_bytes: usize,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a session.
    pub fn new(reader: R, writer: W, engine: AdditionEngine, max_line_bytes: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            reader: LineReader::new(reader, max_line_bytes),
            writer,
            engine,
            max_line_bytes,
        }
    }

    /// Correlation id used in this session's logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Run the dialogue to completion.
    pub async fn run(self) -> Result<SessionOutcome, SessionError> {
        let span = tracing::info_span!("session", session_id = %self.id);
        self.converse().instrument(span).await
    }

    async fn converse(mut self) -> Result<SessionOutcome, SessionError> {
        self.send(WELCOME_PROMPT).await?;

        let Some(first) = self.read_operand(FIRST_ARRAY_PROMPT).await? else {
            return Ok(self.disconnected());
        };

        let operands = loop {
            let Some(second) = self.read_operand(SECOND_ARRAY_PROMPT).await? else {
                return Ok(self.disconnected());
            };
            match Operands::new(first.clone(), second) {
                Ok(operands) => break operands,
                Err(e) => self.reject(InputError::from(e)).await?,
            }
        };

        let engine = self.engine.clone();
        let addition = tokio::task::spawn_blocking(move || engine.add(&operands))
            .await
            .map_err(|e| EngineError::SynchronizationFailure(e.to_string()))?
            .map_err(|e| {
                aas_telemetry::log_session_event!(error, self.id, "Addition aborted", error = %e);
                e
            })?;

        let formatted = format_digits(addition.digits(), self.max_line_bytes);
        if formatted.truncated {
            aas_telemetry::log_session_event!(
                warn,
                self.id,
                "Output overflow",
                digits = addition.len(),
                written = formatted.written
            );
            self.send(OUTPUT_OVERFLOW_WARNING).await?;
        }

        self.send(RESULT_PROMPT).await?;
        self.send(&formatted.line).await?;
        self.send(GOODBYE_PROMPT).await?;
        self.writer.shutdown().await?;

        aas_telemetry::log_session_event!(
            info,
            self.id,
            "Sum sent",
            digits = addition.len(),
            grew = addition.grew()
        );

        Ok(SessionOutcome::Completed {
            digits: addition.len(),
            grew: addition.grew(),
            truncated: formatted.truncated,
        })
    }

    /// Prompt until a valid operand arrives. `None` means the client left.
    async fn read_operand(&mut self, prompt: &str) -> Result<Option<DigitSequence>, SessionError> {
        loop {
            self.send(prompt).await?;

            let (text, overflowed) = match self.reader.read_frame().await? {
                Frame::Line { text, overflowed } => (text, overflowed),
                Frame::Disconnected => return Ok(None),
            };

            if overflowed {
                aas_telemetry::log_session_event!(warn, self.id, "Input overflow");
                self.send(INPUT_OVERFLOW_WARNING).await?;
            }

            match parse_digits(&text) {
                Ok(sequence) => return Ok(Some(sequence)),
                Err(e) => self.reject(e).await?,
            }
        }
    }

    async fn reject(&mut self, error: InputError) -> Result<(), SessionError> {
        aas_telemetry::log_session_event!(info, self.id, "Rejected input", reason = %error);
        self.send(&error.client_message()).await
    }

    async fn send(&mut self, text: &str) -> Result<(), SessionError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    fn disconnected(&self) -> SessionOutcome {
        aas_telemetry::log_session_event!(warn, self.id, "Client disconnected");
        SessionOutcome::Disconnected
    }
}
