//! Logging setup: `tracing` records to stderr through `tracing-subscriber`.
//!
//! `RUST_LOG` always wins. Otherwise the level is `info`, or `debug` when
//! verbose output was requested on the command line or in the agent config.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Handle to adjust the level after the agent config has been read.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Switch to debug output unless `RUST_LOG` pinned the filter.
    pub fn set_verbose(&self) {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
            if let Err(e) = self.filter.reload(build_filter(true)) {
                eprintln!("failed to raise log level: {}", e);
            }
        }
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// keep the first subscriber.
pub fn init(verbose: bool) -> LogHandle {
    let (filter, handle) = reload::Layer::new(build_filter(verbose));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
    LogHandle { filter: handle }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        let first = init(false);
        let second = init(true);
        first.set_verbose();
        second.set_verbose();
        tracing::debug!("still alive");
    }
}
