//! # Line Framing
//!
//! Reads one newline-terminated frame of bounded size from the client.
//!
//! A frame holds at most `max_line_bytes - 1` bytes, newline included. When
//! that budget fills up before a newline arrives, the kept bytes still form
//! the frame, the rest of the line is drained and discarded, and the frame
//! is flagged as overflowed. Control bytes (below 0x20, and 0x7F) are
//! stripped from the frame text, which also removes the line terminator.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// One read from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A line (possibly unterminated at EOF).
    Line {
        /// Printable text of the line.
        text: String,
        /// True when the line exceeded the frame budget.
        overflowed: bool,
    },
    /// The client closed its side before sending anything.
    Disconnected,
}

/// Bounded line reader over a buffered byte stream.
pub struct LineReader<R> {
    inner: R,
    frame_bytes: usize,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    /// Create a reader whose frames hold at most `max_line_bytes - 1` bytes.
    pub fn new(inner: R, max_line_bytes: usize) -> Self {
        Self {
            inner,
            frame_bytes: max_line_bytes.saturating_sub(1).max(1),
        }
    }

    /// Read the next frame.
    pub async fn read_frame(&mut self) -> std::io::Result<Frame> {
        let mut raw = Vec::with_capacity(self.frame_bytes);
        let mut terminated = false;
        let mut eof = false;

        while !terminated && raw.len() < self.frame_bytes {
            let (used, found_newline) = {
                let available = self.inner.fill_buf().await?;
                if available.is_empty() {
                    eof = true;
                    break;
                }
                let room = self.frame_bytes - raw.len();
                let window = &available[..available.len().min(room)];
                match window.iter().position(|&b| b == b'\n') {
                    Some(pos) => {
                        raw.extend_from_slice(&window[..=pos]);
                        (pos + 1, true)
                    }
                    None => {
                        raw.extend_from_slice(window);
                        (window.len(), false)
                    }
                }
            };
            self.inner.consume(used);
            terminated = found_newline;
        }

        if raw.is_empty() && eof {
            return Ok(Frame::Disconnected);
        }

        let overflowed = !terminated && !eof;
        if overflowed {
            let discarded = self.discard_line().await?;
            tracing::debug!(kept = raw.len(), discarded, "Input frame overflowed");
        }

        let printable: Vec<u8> = raw.into_iter().filter(|&b| b >= 0x20 && b != 0x7F).collect();

        Ok(Frame::Line {
            text: String::from_utf8_lossy(&printable).into_owned(),
            overflowed,
        })
    }

    /// Skip input up to and including the next newline (or EOF).
    async fn discard_line(&mut self) -> std::io::Result<usize> {
        let mut discarded = 0;
        loop {
            let (used, done) = {
                let available = self.inner.fill_buf().await?;
                if available.is_empty() {
                    return Ok(discarded);
                }
                match available.iter().position(|&b| b == b'\n') {
                    Some(pos) => (pos + 1, true),
                    None => (available.len(), false),
                }
            };
            self.inner.consume(used);
            discarded += used;
            if done {
                return Ok(discarded);
            }
        }
    }
}
