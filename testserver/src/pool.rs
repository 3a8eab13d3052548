//! Shared thread pool for running mock servers.
//!
//! Every mock listens on its own port, but the threads serving them are
//! shared across all mocks in a test binary.

use once_cell::sync::Lazy;
use threadfin::ThreadPool;

/// Get access to the shared thread pool.
pub(crate) fn pool() -> &'static ThreadPool {
    static POOL: Lazy<ThreadPool> = Lazy::new(|| ThreadPool::builder().size(..100).build());

    &POOL
}
