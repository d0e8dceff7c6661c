use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

/// Handle used to swap the log filter once configuration is loaded.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_level` when set.
pub fn init_logging(default_level: &str) -> FilterHandle {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let (filter_layer, filter_handle) = reload::Layer::new(filter);

    if let Err(e) = tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
    {
        eprintln!("warning: logging already initialised: {e}");
    }

    filter_handle
}

/// Replaces the active filter with `level`, keeping the old one if it does not parse.
pub fn apply_level(handle: &FilterHandle, level: &str) {
    match EnvFilter::try_new(level) {
        Ok(filter) => {
            if let Err(e) = handle.modify(|current| *current = filter) {
                tracing::warn!(error = %e, "Failed to update log filter from config");
            }
        }
        Err(e) => {
            tracing::warn!(level, error = %e, "Invalid log level, keeping current filter");
        }
    }
}
