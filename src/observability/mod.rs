//! Structured logging to a rotating JSON file.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt JSON layer → Mutex<RotatingFile> → bookshelf-trace.json
//! ```
//!
//! # Features
//!
//! - **File-Based**: Lines go to `<data_dir>/bookshelf-trace.json`
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **JSON Lines**: One object per event with level, target, fields, and current span
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option in plugin configuration
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::RotatingFile;
pub use init::{init_tracing, TRACE_FILE_NAME};
