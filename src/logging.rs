//! Opt-in log output for smoke test binaries.

use tracing_subscriber::EnvFilter;

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG`.
///
/// Without `RUST_LOG` the harness logs at `debug` in debug builds and at `info`
/// otherwise. Records emitted through the `log` facade are captured too.
/// Calling this more than once, e.g. from several tests in one binary, is a no-op.
pub fn init_tracing() {
    let directive = if cfg!(debug_assertions) {
        "httpsmoke=debug"
    } else {
        "httpsmoke=info"
    };
    let filter = match directive.parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
