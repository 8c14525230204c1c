//! Command Handler Module
//!
//! This module implements the command layer of the linecmd REPL. It receives
//! raw lines, classifies them with the parser core, executes built-in
//! commands and returns replies.
//!
//! ## Architecture
//!
//! ```text
//! Input Line
//!       │
//!       ▼
//! ┌─────────────────┐
//! │ CommandParser   │  (parser module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! │                 │
//! │  - Dispatch     │
//! │  - Validate     │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     Reply       │
//! └─────────────────┘
//! ```

pub mod handler;
pub mod reply;

pub use handler::{CommandHandler, BUILTIN_COMMANDS, MAX_REPEAT};
pub use reply::Reply;
