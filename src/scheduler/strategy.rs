//! Execution strategies for the two halves of a split.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use super::SchedulerError;

/// How the executor runs the two children of a split.
pub trait Strategy: Clone + Send + Sync {
    /// Run both closures and return both results, left first.
    fn join<L, LO, R, RO>(&self, left: L, right: R) -> (LO, RO)
    where
        L: FnOnce() -> LO + Send,
        R: FnOnce() -> RO + Send,
        LO: Send,
        RO: Send;
}

/// Run both halves on the calling thread, left then right.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Strategy for Sequential {
    fn join<L, LO, R, RO>(&self, left: L, right: R) -> (LO, RO)
    where
        L: FnOnce() -> LO + Send,
        R: FnOnce() -> RO + Send,
        LO: Send,
        RO: Send,
    {
        (left(), right())
    }
}

/// Run both halves on a rayon work-stealing pool.
#[derive(Debug, Clone)]
pub struct Parallel {
    thread_pool: Arc<ThreadPool>,
}

impl Parallel {
    /// Wrap an existing pool
    pub fn new(thread_pool: Arc<ThreadPool>) -> Self {
        Self { thread_pool }
    }

    /// Build a dedicated pool with `num_threads` workers
    pub fn with_threads(num_threads: usize) -> Result<Self, SchedulerError> {
        if num_threads == 0 {
            return Err(SchedulerError::InvalidConfiguration(
                "thread count must be > 0".to_string(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|idx| format!("rangesplit-{idx}"))
            .build()?;
        Ok(Self::new(Arc::new(pool)))
    }

    /// Number of workers in the pool
    pub fn num_threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}

impl From<Arc<ThreadPool>> for Parallel {
    fn from(thread_pool: Arc<ThreadPool>) -> Self {
        Self::new(thread_pool)
    }
}

impl Strategy for Parallel {
    fn join<L, LO, R, RO>(&self, left: L, right: R) -> (LO, RO)
    where
        L: FnOnce() -> LO + Send,
        R: FnOnce() -> RO + Send,
        LO: Send,
        RO: Send,
    {
        self.thread_pool.install(|| rayon::join(left, right))
    }
}
