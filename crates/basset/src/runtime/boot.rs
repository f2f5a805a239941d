//! Boot — logging init.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr so stdout carries only the report. `debug` forces
/// `basset=debug`; otherwise `RUST_LOG` applies, defaulting to `basset=info`.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        tracing_subscriber::EnvFilter::new("basset=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "basset=info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
