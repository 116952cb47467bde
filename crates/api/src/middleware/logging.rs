//! Logging initialization.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.format == "json" {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_span_events(FmtSpan::NONE)
                    .with_target(true),
            )
            .init();
    }
}

/// sqlx logs every statement at info; keep it at warn unless asked.
fn default_directives(level: &str) -> String {
    format!("{},sqlx=warn,tower_http=debug", level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let directives = default_directives(level);
            assert!(directives.starts_with(level));
            assert!(EnvFilter::try_new(&directives).is_ok());
        }
    }
}
