//! Log output for the command line

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber.
///
/// Without `-v` the filter comes from `RUST_LOG` and defaults to `warn`;
/// `-v` forces `debug` and `-vv` forces `trace`.
pub fn init(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // A subscriber may already be installed when running under a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
