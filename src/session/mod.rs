//! Session Management Module
//!
//! This module drives an interactive, line-oriented session. It reads lines
//! from any tokio `AsyncRead` (a terminal, a socket, a test buffer), runs
//! them through the command handler and writes replies to an `AsyncWrite`.
//!
//! ## Example
//!
//! ```no_run
//! use linecmd::commands::CommandHandler;
//! use linecmd::session::Session;
//!
//! # async fn example() -> Result<(), linecmd::session::SessionError> {
//! let handler = CommandHandler::default();
//! let session = Session::new(tokio::io::stdin(), tokio::io::stdout(), handler);
//! let stats = session.run().await?;
//! println!("{} lines read", stats.lines_read);
//! # Ok(())
//! # }
//! ```

pub mod handler;

// Re-export commonly used types
pub use handler::{Session, SessionError, SessionStats, MAX_LINE_LENGTH};
