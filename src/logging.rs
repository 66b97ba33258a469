use tracing_subscriber::EnvFilter;

/// Installs a stderr `tracing` subscriber for internal diagnostics.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`, so worker and
/// request chatter only shows up when asked for. Domain log lines go through
/// a [`Reporter`](crate::report::Reporter) instead.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
