// src/utils/ids.rs

use std::sync::atomic::{AtomicU64, Ordering};

/// Record id source.
///
/// Ids are Unix millisecond timestamps, but strictly increasing: when two
/// records are created within the same millisecond (or the clock steps back)
/// the next id is `previous + 1`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, now_millis: u64) -> u64 {
        let mut last = self.last.load(Ordering::Acquire);
        loop {
            let candidate = now_millis.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }

    /// Records an id handed out earlier (for instance by a previous run) so
    /// later ids stay above it.
    pub fn observe(&self, id: u64) {
        self.last.fetch_max(id, Ordering::AcqRel);
    }
}
