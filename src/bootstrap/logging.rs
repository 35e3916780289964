//! Setup for the application logging.
//!
//! It redirects the log info to the standard output with the threshold and
//! style defined in the configuration.
//!
//! Thresholds (case is ignored):
//!
//! - `Off` (no subscriber is installed)
//! - `Error`
//! - `Warn`
//! - `Info`
//! - `Debug`
//! - `Trace`
//!
//! Styles: `full`, `pretty`, `compact` and `json`.
use std::sync::Once;

use swarm_tracker_configuration::{Configuration, LogStyle, Threshold};
use tracing::debug;
use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

/// It redirects the log info to the standard output with the threshold
/// defined in the configuration.
///
/// Only the first call installs the subscriber.
pub fn setup(cfg: &Configuration) {
    let filter = map_to_level_filter(cfg.logging.threshold);

    if filter == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        stdout_init(filter, &TraceStyle::new(cfg.logging.style, filter));
    });
}

fn map_to_level_filter(threshold: Threshold) -> LevelFilter {
    match threshold {
        Threshold::Off => LevelFilter::OFF,
        Threshold::Error => LevelFilter::ERROR,
        Threshold::Warn => LevelFilter::WARN,
        Threshold::Info => LevelFilter::INFO,
        Threshold::Debug => LevelFilter::DEBUG,
        Threshold::Trace => LevelFilter::TRACE,
    }
}

fn stdout_init(filter: LevelFilter, style: &TraceStyle) {
    let builder = tracing_subscriber::fmt().with_max_level(filter).with_ansi(true);

    let () = match style {
        TraceStyle::Default => builder.init(),
        TraceStyle::Pretty(display_filename) => builder.pretty().with_file(*display_filename).init(),
        TraceStyle::Compact => builder.compact().init(),
        TraceStyle::Json => builder.json().init(),
    };

    debug!("Logging initialized: {style}");
}

#[derive(Debug, PartialEq, Eq)]
enum TraceStyle {
    Default,
    Pretty(bool),
    Compact,
    Json,
}

impl TraceStyle {
    fn new(style: LogStyle, filter: LevelFilter) -> Self {
        match style {
            LogStyle::Full => Self::Default,
            // File paths only when debugging (TRACE < DEBUG < INFO < ERROR < OFF).
            LogStyle::Pretty => Self::Pretty(LevelFilter::DEBUG <= filter),
            LogStyle::Compact => Self::Compact,
            LogStyle::Json => Self::Json,
        }
    }
}

impl std::fmt::Display for TraceStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let style = match self {
            TraceStyle::Default => "Default Style",
            TraceStyle::Pretty(path) => match path {
                true => "Pretty Style with File Paths",
                false => "Pretty Style without File Paths",
            },
            TraceStyle::Compact => "Compact Style",
            TraceStyle::Json => "Json Format",
        };

        f.write_str(style)
    }
}
