use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use keystone_core::AppContext;

/// Tracks background tasks that complete once the [`AppContext`] terminates.
pub struct TerminationWatch {
    flags: Vec<Arc<AtomicBool>>,
}

impl TerminationWatch {
    pub fn new() -> Self {
        Self { flags: Vec::new() }
    }

    /// Spawns a task that raises its own flag after the context terminates,
    /// then yields so that the task gets to subscribe.
    pub async fn watch(&mut self) {
        let flag = Arc::new(AtomicBool::new(false));

        tokio::spawn(Self::raise_on_termination(Arc::clone(&flag)));
        self.flags.push(flag);

        tokio::task::yield_now().await;
    }

    async fn raise_on_termination(flag: Arc<AtomicBool>) {
        AppContext::terminated().await;

        flag.store(true, Ordering::SeqCst);
    }

    /// Counts the raised flags.
    pub fn raised(&self) -> usize {
        self.flags
            .iter()
            .filter(|flag| flag.load(Ordering::SeqCst))
            .count()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }
}
