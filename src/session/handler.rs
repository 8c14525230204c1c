//! Session Handler Module
//!
//! This module runs one interactive session: it reads lines from any async
//! reader, executes them with a [`CommandHandler`] and writes the replies.
//!
//! ## Session Lifecycle
//!
//! ```text
//! 1. Session created over a reader/writer pair
//!        │
//!        ▼
//! 2. ┌──────────────────────────────┐
//!    │      Main Loop               │
//!    │                              │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Read one line           │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Classify and execute    │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Send reply (if any)     │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │         [Loop back]          │
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 3. EOF or quit command, stats returned
//! ```
//!
//! Lines may end in LF or CRLF. Lines that are not commands produce no output.

use crate::commands::{CommandHandler, Reply};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter,
};
use tracing::{debug, info, trace, warn};

/// Maximum accepted length of a single line (64 KB)
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Initial line buffer capacity
const INITIAL_LINE_CAPACITY: usize = 256;

/// Most bytes kept from one line: the limit plus a CRLF terminator
const LINE_BUFFER_LIMIT: usize = MAX_LINE_LENGTH + 2;

/// Counters for one session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Total lines read
    pub lines_read: u64,
    /// Lines executed as commands with a non-error reply
    pub commands_executed: u64,
    /// Lines that were not addressed as commands
    pub lines_ignored: u64,
    /// Lines answered with an error reply
    pub errors: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Errors that end a session early.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// I/O error on the reader or writer
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A line-oriented command session over an async reader and writer.
pub struct Session<R, W> {
    /// Buffered input
    reader: BufReader<R>,

    /// Buffered output
    writer: BufWriter<W>,

    /// Executes command lines
    command_handler: CommandHandler,

    stats: SessionStats,
}

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a new session.
    ///
    /// # Arguments
    ///
    /// * `reader` - Source of input lines
    /// * `writer` - Destination for replies
    /// * `command_handler` - The command handler for executing lines
    pub fn new(reader: R, writer: W, command_handler: CommandHandler) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
            command_handler,
            stats: SessionStats::new(),
        }
    }

    /// Runs the session until EOF or a quit command and returns its stats.
    pub async fn run(mut self) -> Result<SessionStats, SessionError> {
        info!("Session started");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => info!(
                lines = self.stats.lines_read,
                commands = self.stats.commands_executed,
                "Session ended"
            ),
            Err(e) => warn!(error = %e, "Session error"),
        }

        result.map(|()| self.stats)
    }

    /// The main read-execute-reply loop.
    async fn main_loop(&mut self) -> Result<(), SessionError> {
        let mut buf = Vec::with_capacity(INITIAL_LINE_CAPACITY);

        loop {
            buf.clear();
            let read = read_capped_line(&mut self.reader, &mut buf, LINE_BUFFER_LIMIT).await?;
            if read.consumed == 0 {
                debug!("End of input");
                break;
            }

            self.stats.lines_read += 1;
            trace!(bytes = read.consumed, "Read line");

            if read.truncated {
                warn!(size = read.consumed, "Line length limit exceeded");
                self.stats.errors += 1;
                self.send_reply(&line_too_long()).await?;
                continue;
            }

            let Some(reply) = self.process_line(&buf) else {
                continue;
            };

            self.send_reply(&reply).await?;
            if reply.is_quit() {
                debug!("Quit requested");
                break;
            }
        }

        self.writer.flush().await?;
        Ok(())
    }

    /// Decodes and executes a raw line, updating the stats.
    fn process_line(&mut self, raw: &[u8]) -> Option<Reply> {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

        if raw.len() > MAX_LINE_LENGTH {
            warn!(size = raw.len(), "Line length limit exceeded");
            self.stats.errors += 1;
            return Some(line_too_long());
        }

        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                debug!(error = %e, "Invalid UTF-8 in line");
                self.stats.errors += 1;
                return Some(Reply::error("invalid UTF-8 in input"));
            }
        };

        match self.command_handler.execute(line) {
            None => {
                self.stats.lines_ignored += 1;
                None
            }
            Some(reply) => {
                if reply.is_error() {
                    self.stats.errors += 1;
                } else {
                    self.stats.commands_executed += 1;
                }
                Some(reply)
            }
        }
    }

    /// Sends a reply and flushes it.
    async fn send_reply(&mut self, reply: &Reply) -> Result<(), SessionError> {
        let text = reply.serialize();
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        trace!(bytes = text.len(), "Sent reply");
        Ok(())
    }
}

fn line_too_long() -> Reply {
    Reply::error(format!("line too long (max {} bytes)", MAX_LINE_LENGTH))
}

/// Outcome of reading one line with [`read_capped_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineRead {
    /// Bytes consumed from the reader, terminator included
    consumed: usize,
    /// The line did not fit in the buffer limit; the excess was discarded
    truncated: bool,
}

/// Reads up to and including the next `\n`, keeping at most `limit` bytes in
/// `buf`. Bytes past the limit are consumed and dropped, so memory stays
/// bounded however long the line is.
async fn read_capped_line<R>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    limit: usize,
) -> std::io::Result<LineRead>
where
    R: AsyncBufRead + Unpin,
{
    let mut read = LineRead {
        consumed: 0,
        truncated: false,
    };

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            break;
        }

        let (chunk, done) = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => (&available[..=pos], true),
            None => (available, false),
        };

        if !read.truncated {
            let room = limit.saturating_sub(buf.len());
            if chunk.len() <= room {
                buf.extend_from_slice(chunk);
            } else {
                buf.extend_from_slice(&chunk[..room]);
                read.truncated = true;
            }
        }

        let n = chunk.len();
        reader.consume(n);
        read.consumed += n;

        if done {
            break;
        }
    }

    Ok(read)
}
