use edgedig_domain::Config;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// the configured level when set.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
