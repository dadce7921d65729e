//! Monotonic atomic sequence counter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe monotonic counter.
///
/// `next()` is a single atomic fetch-and-increment, so concurrent callers never
/// observe the same value. Each repository and generator owns its own instance;
/// there is no process-global state.
#[derive(Debug)]
pub struct SequenceCounter {
    next: AtomicU64,
}

impl SequenceCounter {
    /// First value handed out by a fresh counter.
    pub const START: u64 = 1;

    pub fn new() -> Self {
        Self::starting_at(Self::START)
    }

    pub fn starting_at(value: u64) -> Self {
        Self {
            next: AtomicU64::new(value),
        }
    }

    /// Returns the current value and advances the counter.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Value the next call to [`next`](Self::next) will return.
    pub fn current(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }

    /// Overwrites the next value (state restore after a reload).
    pub fn set(&self, value: u64) {
        self.next.store(value, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.set(Self::START);
    }

    /// Ensures `value` is never handed out later. Never lowers the counter.
    pub fn advance_past(&self, value: u64) {
        self.next
            .fetch_max(value.saturating_add(1), Ordering::SeqCst);
    }
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn starts_at_one_and_increments() {
        let counter = SequenceCounter::new();
        assert_eq!(counter.next(), 1);
        assert_eq!(counter.next(), 2);
        assert_eq!(counter.current(), 3);
    }

    #[test]
    fn set_and_reset() {
        let counter = SequenceCounter::new();
        counter.set(100);
        assert_eq!(counter.next(), 100);
        counter.reset();
        assert_eq!(counter.next(), 1);
    }

    #[test]
    fn advance_past_never_lowers() {
        let counter = SequenceCounter::starting_at(10);
        counter.advance_past(4);
        assert_eq!(counter.current(), 10);
        counter.advance_past(20);
        assert_eq!(counter.next(), 21);
    }

    #[test]
    fn concurrent_next_yields_distinct_values() {
        let counter = Arc::new(SequenceCounter::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                std::thread::spawn(move || (0..500).map(|_| counter.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(seen.insert(value), "duplicate value {value}");
            }
        }
        assert_eq!(seen.len(), 4000);
    }
}
