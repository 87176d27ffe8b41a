//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter. `RUST_LOG` is the fallback.
pub const LOG_FILTER_ENV: &str = "GUARDIA_LOG";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-line.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parses a format name. Unknown names are `Pretty`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Event filter.
    pub filter: EnvFilter,
    /// Output format.
    pub format: LogFormat,
    /// Append to this file instead of stderr.
    pub file: Option<PathBuf>,
    /// A filter directive that failed to parse and was replaced by the default.
    pub rejected_filter: Option<String>,
}

impl LoggingConfig {
    /// Resolves settings into a logging configuration.
    ///
    /// Filter precedence: `GUARDIA_LOG`, `RUST_LOG`, the configured filter,
    /// then `debug` when verbose or `warn` otherwise. Empty values are
    /// skipped.
    #[must_use]
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        Self::from_lookup(settings, verbose, |key| std::env::var(key).ok())
    }

    /// Same as [`from_settings`](Self::from_settings) with a custom
    /// environment lookup.
    #[must_use]
    pub fn from_lookup<F>(settings: &LoggingSettings, verbose: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let directive = resolve_directive(settings, verbose, lookup);
        let (filter, rejected_filter) = match EnvFilter::try_new(&directive) {
            Ok(filter) => (filter, None),
            Err(_) => (EnvFilter::new(default_directive(verbose)), Some(directive)),
        };

        Self {
            filter,
            format: settings
                .format
                .as_deref()
                .map(LogFormat::parse)
                .unwrap_or_default(),
            file: settings.file.clone(),
            rejected_filter,
        }
    }
}

fn resolve_directive<F>(settings: &LoggingSettings, verbose: bool, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    non_empty(lookup(LOG_FILTER_ENV))
        .or_else(|| non_empty(lookup("RUST_LOG")))
        .or_else(|| non_empty(settings.filter.clone()))
        .unwrap_or_else(|| default_directive(verbose).to_string())
}

const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}
