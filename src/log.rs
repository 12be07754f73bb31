// src/log.rs
use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

use crate::config::consts::LOG_ENV;

static INIT: OnceLock<()> = OnceLock::new();

/// Install the stderr subscriber once. `VERSE_SCRAPE_LOG` wins over `level`.
pub fn init(level: &str) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(level));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_writer(std::io::stderr)
            .finish();

        // Another subscriber may already be installed (tests, embedding apps)
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Level string for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
