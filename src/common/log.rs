//! Tracing subscriber setup for hosts that want the SDK's log output.
//!
//! The library only emits `tracing` events; installing a subscriber is opt-in.

use std::io::IsTerminal;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::common::config::SdkConfig;

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Errors emitted when configuring the tracing subscriber.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("tracing has already been initialised")]
    AlreadyInitialised,
    #[error("another global subscriber is installed: {0}")]
    Install(String),
}

/// Install a global fmt subscriber. `RUST_LOG` wins over `cfg.log_filter`.
pub fn init_tracing(cfg: &SdkConfig) -> Result<(), InitError> {
    INITIALISED
        .set(())
        .map_err(|_| InitError::AlreadyInitialised)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.log_filter.as_str()));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|err| InitError::Install(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        let cfg = SdkConfig::default();
        // The first call may race with other tests installing a subscriber.
        let _ = init_tracing(&cfg);
        assert!(matches!(
            init_tracing(&cfg),
            Err(InitError::AlreadyInitialised)
        ));
    }
}
