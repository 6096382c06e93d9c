//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use web_builder_core::config::LoggingConfig;

/// Build the filter: `RUST_LOG` wins, then the configured level and
/// per-crate filters, then `--verbose`.
fn build_filter(verbose: bool, logging: Option<&LoggingConfig>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = logging
        .and_then(|l| l.level.clone())
        .unwrap_or_else(|| if verbose { "debug" } else { "info" }.to_string());

    let mut directives = vec![level];
    if let Some(logging) = logging {
        directives.extend(logging.filters.iter().cloned());
    }

    EnvFilter::new(directives.join(","))
}

pub fn init(verbose: bool, logging: Option<&LoggingConfig>) {
    let filter = build_filter(verbose, logging);
    let json = logging.is_some_and(|l| l.format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
