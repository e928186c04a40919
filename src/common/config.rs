//! Wrapper configuration.
//!
//! Construction never reads the environment on its own; callers opt in with
//! [`SdkConfig::from_env`].

use std::env;
use std::thread;

const MAX_DEFAULT_WORKERS: usize = 4;

/// Snapshot of configuration values consumed by the wrapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SdkConfig {
    /// Threads backing the asynchronous helpers. Always at least one.
    pub worker_threads: usize,
    /// Default `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .clamp(1, MAX_DEFAULT_WORKERS);
        Self {
            worker_threads: workers,
            log_filter: "info".to_string(),
        }
    }
}

impl SdkConfig {
    /// Defaults overridden by `RUST_SDK_WORKERS` and `RUST_SDK_LOG`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(workers) = lookup("RUST_SDK_WORKERS")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
        {
            cfg.worker_threads = workers;
        }
        if let Some(filter) = lookup("RUST_SDK_LOG").filter(|raw| !raw.trim().is_empty()) {
            cfg.log_filter = filter;
        }
        cfg
    }

    /// Override the worker count; zero is bumped to one.
    pub fn with_worker_threads(mut self, workers: usize) -> Self {
        self.worker_threads = workers.max(1);
        self
    }
}
