//! Safe, ownership-correct façade over a [`NativeCore`].

use std::ffi::CString;
use std::future::Future;
use std::hint::black_box;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::oneshot;

use crate::common::config::SdkConfig;
use crate::common::error::{SdkError, SdkResult};
use crate::native::domain::Ownership;

use super::bridge::{LinkedCore, NativeCore};
use super::buffer::{borrow_static, OwnedCString};
use super::domain::{InitState, ProcessOutcome, UNKNOWN_VERSION};
use super::workers::Pool;

/// Wrapper context. Construct one explicitly and pass it around, or use
/// [`Sdk::shared`] for the process-wide instance over the linked core.
pub struct Sdk<C: NativeCore = LinkedCore> {
    core: Arc<C>,
    initialized: AtomicBool,
    init_lock: Mutex<()>,
    pool: Pool,
}

impl Sdk<LinkedCore> {
    /// Process-wide context over the linked core, built on first use.
    pub fn shared() -> SdkResult<&'static Sdk<LinkedCore>> {
        static SHARED: OnceLock<SdkResult<Sdk<LinkedCore>>> = OnceLock::new();
        SHARED
            .get_or_init(|| Sdk::new(LinkedCore, SdkConfig::default()))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Context over the linked core with the given configuration.
    pub fn with_config(cfg: SdkConfig) -> SdkResult<Self> {
        Self::new(LinkedCore, cfg)
    }
}

impl<C: NativeCore> Sdk<C> {
    /// Build a context. Fails if the core's version convention differs from
    /// the one this wrapper was compiled against.
    pub fn new(core: C, cfg: SdkConfig) -> SdkResult<Self> {
        let expected = C::VERSION_OWNERSHIP as u32;
        let reported = core.version_ownership();
        if reported != expected {
            let err = SdkError::OwnershipMismatch { expected, reported };
            tracing::warn!(code = err.code() as u32, %err, "refusing native core");
            return Err(err);
        }

        Ok(Self {
            core: Arc::new(core),
            initialized: AtomicBool::new(false),
            init_lock: Mutex::new(()),
            pool: Pool::new(cfg.worker_threads),
        })
    }

    /// Initialise the core once. Later calls return `true` without touching
    /// the core; a failed attempt leaves the context uninitialised.
    pub fn initialize(&self) -> bool {
        if self.initialized.load(Ordering::Acquire) {
            return true;
        }

        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.initialized.load(Ordering::Acquire) {
            return true;
        }

        let ok = self.core.init();
        if ok {
            self.initialized.store(true, Ordering::Release);
            tracing::info!("sdk initialised");
        } else {
            let err = SdkError::InitFailed;
            tracing::warn!(code = err.code() as u32, %err, "sdk initialisation failed");
        }
        ok
    }

    /// The core this context drives.
    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn state(&self) -> InitState {
        if self.initialized.load(Ordering::Acquire) {
            InitState::Initialized
        } else {
            InitState::Uninitialized
        }
    }

    /// Wrapping addition.
    pub fn add(&self, a: i32, b: i32) -> i32 {
        self.core.add(a, b)
    }

    /// Run `input` through the core. The native message buffer is released
    /// before this returns.
    pub fn process_string(&self, input: &str) -> SdkResult<ProcessOutcome> {
        let input = CString::new(input)?;

        // SAFETY: `input` is nul-terminated and outlives the call.
        let raw = unsafe { self.core.process_string(input.as_ptr()) };
        // SAFETY: the call transferred ownership of `message` to us.
        let message = unsafe { OwnedCString::adopt(&*self.core, raw.message) };

        Ok(ProcessOutcome {
            success: raw.success,
            value: raw.value,
            message: message.map(|owned| owned.to_string_lossy()),
        })
    }

    /// 0 for `n <= 0`; saturates at `i64::MAX` past n = 92.
    pub fn fibonacci(&self, n: i32) -> i64 {
        self.core.fibonacci(n)
    }

    /// Core version, or `"unknown"` when the core returns null.
    pub fn version(&self) -> String {
        let ptr = self.core.version();
        let text = match C::VERSION_OWNERSHIP {
            // SAFETY: static convention, the buffer lives for the process.
            Ownership::Static => unsafe { borrow_static(ptr) }
                .map(|text| text.to_string_lossy().into_owned()),
            // SAFETY: caller-frees convention, the buffer is ours now.
            Ownership::CallerFrees => unsafe { OwnedCString::adopt(&*self.core, ptr) }
                .map(|owned| owned.to_string_lossy()),
        };
        text.unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    }

    /// Compute `fibonacci(n)` on the worker pool.
    ///
    /// The job is queued immediately; the returned future only waits for it.
    /// Dropping the future does not stop the computation.
    pub fn fibonacci_async(&self, n: i32) -> impl Future<Output = SdkResult<i64>> + Send + 'static {
        let (tx, rx) = oneshot::channel();
        let core = Arc::clone(&self.core);
        let submitted = self.pool.submit(move || {
            let _ = tx.send(core.fibonacci(n));
        });

        async move {
            submitted?;
            rx.await.map_err(|_| SdkError::TaskDropped)
        }
    }

    /// Mean wall-clock time of one `add` over `iterations` back-to-back calls.
    pub fn benchmark(&self, iterations: u32) -> Duration {
        if iterations == 0 {
            return Duration::ZERO;
        }

        let start = Instant::now();
        for i in 0..iterations {
            let i = i as i32;
            black_box(self.add(black_box(i), black_box(i.wrapping_add(1))));
        }
        let mean = start.elapsed() / iterations;
        tracing::debug!(iterations, mean_ns = mean.as_nanos() as u64, "add benchmark");
        mean
    }
}
