use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

const FALLBACK_DIRECTIVE: &str = "info";

/// `RUST_LOG` wins over `level`; an unparsable `level` falls back to `info`.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE))
}

/// Installs the global subscriber, writing to stderr.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::build_filter;

    #[test]
    fn configured_level_sets_max_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert_eq!(build_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(build_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
    }
}
