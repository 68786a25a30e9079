/// Installs the global subscriber used by the service, the client and the shell.
///
/// Verbosity follows `RUST_LOG`, falling back to `default_filter`:
/// ```bash
/// RUST_LOG=debug inventory_tracker
/// RUST_LOG=inventory_tracker::actors=debug,warn inventory_tracker
/// ```
/// Logs go to stderr so they never interleave with the menu on stdout.
pub fn setup_tracing(default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
