use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Millisecond-based id source. Each value is `max(now_ms, last + 1)`, so ids
/// stay close to wall-clock time but never repeat within one process.
/// Separate processes can still collide.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_value(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match self.last.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }

    /// `<prefix>_<digits>`, e.g. `todo_1735689600123`
    pub fn next_id(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.next_value())
    }
}
