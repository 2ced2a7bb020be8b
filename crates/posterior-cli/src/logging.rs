//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Installs the global subscriber, writing to stderr.
///
/// `POSTERIOR_LOG` takes an `EnvFilter` directive such as
/// `posterior_grid=debug`. Without it the level is `warn`, or `debug` when
/// `verbose` is set. Calling this more than once has no effect.
pub(crate) fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "debug" } else { "warn" };
        let filter =
            EnvFilter::try_from_env("POSTERIOR_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
