// src/contention.rs

//! Timed lock-contention worker.
//!
//! A worker thread sleeps, takes a shared lock, holds it for a while,
//! releases it, and only then marks itself complete. Used to observe
//! contention and ordering between a starter and one worker; this is a demo
//! of lock timing, not a scheduler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::exec::diag::{DiagnosticSink, TracingSink};

/// Delay parameters captured by the worker.
#[derive(Debug, Clone, Copy)]
pub struct WorkerTiming {
    /// Sleep before attempting to take the lock.
    pub obtain_delay: Duration,
    /// Sleep while holding the lock, before releasing it.
    pub release_delay: Duration,
}

impl WorkerTiming {
    pub fn from_millis(obtain_ms: u64, release_ms: u64) -> Self {
        Self {
            obtain_delay: Duration::from_millis(obtain_ms),
            release_delay: Duration::from_millis(release_ms),
        }
    }
}

/// Handle to a spawned lock worker.
pub struct LockWorker {
    handle: JoinHandle<()>,
    completed: Arc<AtomicBool>,
}

impl LockWorker {
    /// Whether the worker has released the lock and finished.
    ///
    /// Non-blocking; readable while the worker is still running.
    pub fn completed(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    /// Join the worker thread, then report whether it completed
    /// successfully.
    pub fn join(self) -> bool {
        if self.handle.join().is_err() {
            return false;
        }
        self.completed.load(Ordering::Acquire)
    }
}

/// Spawn a worker that sleeps `timing.obtain_delay`, takes `lock`, holds it
/// for `timing.release_delay`, releases it, and only then sets its
/// completion flag.
pub fn spawn_lock_worker(lock: Arc<Mutex<()>>, timing: WorkerTiming) -> LockWorker {
    spawn_lock_worker_with_sink(lock, timing, TracingSink)
}

/// As [`spawn_lock_worker`], with a caller-supplied diagnostic sink.
pub fn spawn_lock_worker_with_sink<S>(
    lock: Arc<Mutex<()>>,
    timing: WorkerTiming,
    diag: S,
) -> LockWorker
where
    S: DiagnosticSink + 'static,
{
    let completed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&completed);

    let handle = thread::spawn(move || {
        thread::sleep(timing.obtain_delay);

        let guard = match lock.lock() {
            Ok(guard) => guard,
            Err(_) => {
                diag.error("lock worker: mutex poisoned, giving up");
                return;
            }
        };

        thread::sleep(timing.release_delay);
        drop(guard);

        // Strictly after the release.
        flag.store(true, Ordering::Release);
    });

    LockWorker { handle, completed }
}
