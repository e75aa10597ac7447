//! Tracing setup shared by the binaries.
//!
//! Logs go to stderr so stdout stays free for the rendered dashboard.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter used before the configured level is known. Ignores `RUST_LOG`.
const BOOTSTRAP_FILTER: &str = "complaint_dash=info,complaint_dash_api=info";

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "complaint_dash={},complaint_dash_api={},tower_http=info",
            config.level, config.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Run `f` under a temporary stderr subscriber.
///
/// Loading the config happens before [`init_tracing`] can run, and its
/// warnings (unreadable file, ignored override) would otherwise be lost.
pub fn with_bootstrap_logging<T>(f: impl FnOnce() -> T) -> T {
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(BOOTSTRAP_FILTER))
        .with(fmt::layer().with_writer(std::io::stderr));

    tracing::subscriber::with_default(subscriber, f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::io::Write;
    use tracing::Level;

    #[test]
    fn test_bootstrap_logging_enables_warnings() {
        let enabled = with_bootstrap_logging(|| tracing::enabled!(Level::WARN));
        assert!(enabled);
    }

    #[test]
    fn test_bootstrap_logging_passes_result_through() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\npage_size = 7").unwrap();

        let config = with_bootstrap_logging(|| Config::load(file.path())).unwrap();
        assert_eq!(config.dashboard.page_size, 7);
    }
}
