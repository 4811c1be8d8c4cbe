//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

static INIT: Once = Once::new();

/// Install the global subscriber. Safe to call multiple times.
///
/// Logs go to stderr at `info` unless `RUST_LOG` says otherwise. Started by
/// the session bus, stderr ends up in the user journal, which stamps its own
/// times.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true)
            .without_time()
            .compact()
            .try_init();

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
