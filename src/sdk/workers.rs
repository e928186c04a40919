//! Fixed-size worker pool for CPU bound calls into the core.
//!
//! Jobs run to completion; there is no cancellation. Dropping the pool closes
//! the queue, lets queued jobs drain and joins the workers.

use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crate::common::error::{SdkError, SdkResult};

type Job = Box<dyn FnOnce() + Send + 'static>;

pub struct Pool {
    tx: Option<mpsc::Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl Pool {
    /// Spawn `size` workers (at least one).
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let (tx, rx) = mpsc::channel::<Job>();
        let shared_rx = Arc::new(Mutex::new(rx));

        let workers = (0..size)
            .filter_map(|idx| {
                let rx = Arc::clone(&shared_rx);
                thread::Builder::new()
                    .name(format!("rust-sdk-worker-{idx}"))
                    .spawn(move || loop {
                        let job = {
                            let guard = rx.lock().unwrap_or_else(PoisonError::into_inner);
                            guard.recv()
                        };

                        match job {
                            Ok(job) => job(),
                            Err(_) => break,
                        }
                    })
                    .map_err(|err| tracing::warn!(%err, idx, "failed to spawn worker"))
                    .ok()
            })
            .collect::<Vec<_>>();

        tracing::debug!(workers = workers.len(), "worker pool started");
        let tx = if workers.is_empty() { None } else { Some(tx) };
        Self { tx, workers }
    }

    /// Number of live worker threads.
    #[cfg(test)]
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn submit<F>(&self, job: F) -> SdkResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let tx = self.tx.as_ref().ok_or(SdkError::PoolClosed)?;
        tx.send(Box::new(job)).map_err(|_| SdkError::PoolClosed)
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        drop(self.tx.take());
        let current = thread::current().id();
        for handle in self.workers.drain(..) {
            // A job that owns the last handle to the pool runs on a worker.
            if handle.thread().id() == current {
                continue;
            }
            let _ = handle.join();
        }
    }
}
