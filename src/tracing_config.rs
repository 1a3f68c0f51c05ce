//! Diagnostic logging for shapetree pipelines.
//!
//! The library crates only emit `tracing` events: builder and fold summaries
//! at `debug`, per-node work-list steps at `trace`, stamping and fingerprint
//! results under `shapetree_entity`. This module turns them into output for
//! tests, benchmarks and small tools that have no subscriber of their own.
//!
//! | variable               | meaning                                      |
//! |------------------------|----------------------------------------------|
//! | `SHAPETREE_LOG`        | filter directives, e.g. `shapetree_core=trace` |
//! | `RUST_LOG`             | fallback when `SHAPETREE_LOG` is unset       |
//! | `SHAPETREE_LOG_FORMAT` | `text` (default), `tree` or `json`           |
//!
//! ```bash
//! SHAPETREE_LOG="shapetree_core::builder=trace" SHAPETREE_LOG_FORMAT=tree cargo test
//! SHAPETREE_LOG=shapetree_entity=debug SHAPETREE_LOG_FORMAT=json cargo bench
//! ```
//!
//! Nothing is installed unless one of the filter variables is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "SHAPETREE_LOG";
const FALLBACK_LOG_VAR: &str = "RUST_LOG";
const LOG_FORMAT_VAR: &str = "SHAPETREE_LOG_FORMAT";

/// How diagnostic events are written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event.
    #[default]
    Text,
    /// Events nested under their builder/fold spans via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; anything unrecognised is `Text`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TracingConfig {
    /// Filter directives; `None` disables logging.
    pub filter: Option<String>,
    pub format: LogFormat,
}

impl TracingConfig {
    /// Read the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(LOG_VAR).ok().as_deref(),
            std::env::var(FALLBACK_LOG_VAR).ok().as_deref(),
            std::env::var(LOG_FORMAT_VAR).ok().as_deref(),
        )
    }

    /// Resolve settings from raw variable values. `SHAPETREE_LOG` wins over
    /// `RUST_LOG`; blank values count as unset.
    pub fn from_values(
        shapetree_log: Option<&str>,
        rust_log: Option<&str>,
        format: Option<&str>,
    ) -> Self {
        let filter = [shapetree_log, rust_log]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|directives| !directives.is_empty())
            .map(str::to_string);

        Self {
            filter,
            format: format.map(LogFormat::from_name).unwrap_or_default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.filter.is_some()
    }

    /// Install a global subscriber for these settings.
    ///
    /// Returns `false` when logging is disabled or another subscriber is
    /// already installed.
    pub fn install(&self) -> bool {
        let Some(directives) = &self.filter else {
            return false;
        };
        let filter = EnvFilter::builder().parse_lossy(directives);

        let installed = match self.format {
            LogFormat::Tree => {
                let tree_layer = tracing_tree::HierarchicalLayer::default()
                    .with_indent_amount(2)
                    .with_indent_lines(true)
                    .with_deferred_spans(true)
                    .with_targets(true);
                Registry::default().with(filter).with(tree_layer).try_init()
            }
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr);
                Registry::default().with(filter).with(json_layer).try_init()
            }
            LogFormat::Text => {
                let text_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
                Registry::default().with(filter).with(text_layer).try_init()
            }
        };
        installed.is_ok()
    }
}

/// Install logging configured from the environment.
///
/// Safe to call from every test: only the first successful call installs a
/// subscriber. Returns whether this call installed one.
pub fn init_tracing() -> bool {
    TracingConfig::from_env().install()
}
