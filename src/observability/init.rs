//! Tracing initialization and subscriber setup.
//!
//! Events and spans from the `tracing` macros are formatted as JSON lines by
//! `tracing-subscriber` and appended to a rotating file in the data directory.

use super::file_writer::RotatingFile;
use crate::Config;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "bookshelf-trace.json";

/// Level used when neither `RUST_LOG` nor `trace_level` is set.
const DEFAULT_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` if set, otherwise from `trace_level`,
/// otherwise [`DEFAULT_LEVEL`]. An unparseable level falls back to the
/// default. Calling this more than once is harmless; later calls are ignored.
///
/// Nothing touches the filesystem here. The log file is created on the first
/// event, which in a plugin is usually after the filesystem permission has
/// been granted.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let trace_file = config.data_dir().join(TRACE_FILE_NAME);
    let writer = Mutex::new(RotatingFile::new(trace_file));

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_current_span(true)
        .with_span_list(false)
        .with_target(true)
        .with_writer(writer);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .try_init();
}
