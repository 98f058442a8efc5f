//! Process-local thread identifiers for log records.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CURRENT_THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// Returns a stable identifier for the calling thread.
///
/// Identifiers are drawn from a process-local counter on first use and stay
/// fixed for the thread's lifetime; they are never reused within a process.
/// Formatters render them in hexadecimal.
#[must_use]
pub fn current_thread_id() -> u64 {
    CURRENT_THREAD_ID.with(|id| *id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_stable_within_a_thread() {
        assert_eq!(current_thread_id(), current_thread_id());
    }

    #[test]
    fn identifiers_differ_across_threads() -> Result<(), Box<dyn std::error::Error>> {
        let here = current_thread_id();
        let there = std::thread::spawn(current_thread_id)
            .join()
            .map_err(|_| "spawned thread panicked")?;

        assert_ne!(here, there);
        Ok(())
    }
}
