//! Work queue: thread-safe dispenser of discovered snapshot paths
//!
//! Workers call [`WorkQueue::next`] until it returns `None`. Each path is
//! delivered to exactly one caller, in discovery order; the mutex around
//! the lazy discovery cursor is the only shared mutable state of the
//! parallel phase.

use crate::ingest::discovery::Discovery;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::info;

/// Thread-safe dispenser over the lazy discovery sequence
pub struct WorkQueue {
    /// Dispensing cursor; locked only long enough to pull one path
    inner: Mutex<Discovery>,

    /// Paths handed out so far
    dispensed: AtomicU64,
}

impl WorkQueue {
    /// Create a queue over a discovery sequence
    pub fn new(discovery: Discovery) -> Self {
        Self {
            inner: Mutex::new(discovery),
            dispensed: AtomicU64::new(0),
        }
    }

    /// Claim the next undelivered path, or `None` when exhausted.
    ///
    /// No two calls ever return the same path.
    pub fn next(&self) -> Option<PathBuf> {
        let path = self
            .inner
            .lock()
            .expect("work queue mutex poisoned")
            .next();

        if let Some(ref path) = path {
            self.dispensed.fetch_add(1, Ordering::Relaxed);
            info!(file = %path.display(), "processing file");
        }
        path
    }

    /// Number of paths handed out so far
    pub fn dispensed(&self) -> u64 {
        self.dispensed.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_paths_delivered_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..20 {
            fs::write(dir.path().join(format!("day-{i:02}.csv")), "").unwrap();
        }

        let queue = Arc::new(WorkQueue::new(Discovery::new(dir.path())));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let queue = Arc::clone(&queue);
            handles.push(thread::spawn(move || {
                let mut claimed = Vec::new();
                while let Some(path) = queue.next() {
                    claimed.push(path);
                }
                claimed
            }));
        }

        let mut all: Vec<PathBuf> = Vec::new();
        for handle in handles {
            all.extend(handle.join().unwrap());
        }

        assert_eq!(all.len(), 20, "every path delivered");
        let unique: BTreeSet<&PathBuf> = all.iter().collect();
        assert_eq!(unique.len(), 20, "no path delivered twice");
        assert_eq!(queue.dispensed(), 20);
    }

    #[test]
    fn test_exhausted_queue_stays_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("one.csv");
        fs::write(&file, "").unwrap();

        let queue = WorkQueue::new(Discovery::new(&file));
        assert_eq!(queue.next(), Some(file));
        assert_eq!(queue.next(), None);
        assert_eq!(queue.next(), None);
        assert_eq!(queue.dispensed(), 1);
    }
}
