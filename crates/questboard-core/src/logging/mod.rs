//! Logging setup shared by the desktop app and the CLI.
//!
//! Console output goes through `tracing_subscriber::fmt`, filtered by
//! verbosity (or `RUST_LOG` when set). Optionally every event is also
//! appended to a JSONL file, one file per surface per day:
//!
//! ```text
//! <data_dir>/logs/
//! ├── 2026-10-16_desktop.jsonl
//! └── 2026-10-16_cli.jsonl
//! ```
//!
//! ```bash
//! # Every identity change the client saw
//! jq 'select(.msg | test("player id"))' logs/*.jsonl
//! ```

mod jsonl;

use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use jsonl::{JsonLogEntry, JsonlLayer};

/// Map `-v` counts to a default filter
pub fn filter_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Builder for the global tracing subscriber.
pub struct LoggingBuilder {
    verbosity: u8,
    surface: String,
    jsonl_dir: Option<PathBuf>,
    console_output: bool,
}

impl LoggingBuilder {
    /// `surface` names the log file (`desktop`, `cli`).
    pub fn new(surface: impl Into<String>) -> Self {
        Self {
            verbosity: 0,
            surface: surface.into(),
            jsonl_dir: None,
            console_output: true,
        }
    }

    pub fn verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Also append events to `<dir>/<date>_<surface>.jsonl`.
    pub fn jsonl_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.jsonl_dir = Some(dir.into());
        self
    }

    pub fn no_console(mut self) -> Self {
        self.console_output = false;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_for_verbosity(self.verbosity)))
    }

    /// Install as the global default subscriber.
    ///
    /// A JSONL file that cannot be opened is reported on stderr and skipped.
    pub fn init(self) {
        let jsonl = self.jsonl_dir.as_ref().and_then(|dir| {
            JsonlLayer::new(dir, &self.surface)
                .map_err(|e| eprintln!("questboard: file logging disabled: {}", e))
                .ok()
        });
        let console = self.console_output.then(|| {
            tracing_subscriber::fmt::layer().with_writer(std::io::stderr)
        });

        let _ = tracing_subscriber::registry()
            .with(self.env_filter())
            .with(console)
            .with(jsonl)
            .try_init();
    }
}
