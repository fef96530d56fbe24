use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor `logging.filter` is set.
pub const DEFAULT_FILTER: &str = "warn,oidc_master=info";

/// Resolve the effective filter directive.
///
/// Priority: `RUST_LOG` > configured filter > [`DEFAULT_FILTER`].
pub fn resolve_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| configured.and_then(|directive| EnvFilter::try_new(directive).ok()))
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialise the global `tracing` subscriber with a standard `fmt` layer.
///
/// Logs go to stderr so that command output on stdout stays pipeable.
/// Call this once, at the very start of `main`, before any tracing macro.
/// A second call is a no-op.
pub fn init_tracing(configured: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
