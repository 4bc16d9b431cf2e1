//! Virtual-clock timer queue
//!
//! Deferred events are kept ordered by due time, then by insertion order, so
//! two events due at the same millisecond fire in the order they were
//! scheduled. Time only moves when the owner pops events or advances the
//! clock; nothing here sleeps.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// An event taken off the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<E> {
    pub due_ms: u64,
    pub event: E,
}

#[derive(Debug)]
struct Entry<E> {
    due_ms: u64,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    // Reversed so the max-heap yields the earliest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Millisecond timer queue driven by an explicit clock.
#[derive(Debug)]
pub struct Scheduler<E> {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Entry<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    /// Create an empty scheduler at time zero
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current clock value in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue `event` to fire `delay_ms` from now. Returns the due time.
    pub fn schedule_in(&mut self, delay_ms: u64, event: E) -> u64 {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry { due_ms, seq, event });
        due_ms
    }

    /// Due time of the earliest pending event
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|e| e.due_ms)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pop the earliest event if it is due at or before `until_ms`, moving
    /// the clock to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<E>> {
        if self.next_due()? > until_ms {
            return None;
        }
        let entry = self.queue.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(Fired {
            due_ms: entry.due_ms,
            event: entry.event,
        })
    }

    /// Move the clock forward to `to_ms`. Never moves it backwards.
    pub fn advance_clock(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(300, "c");
        scheduler.schedule_in(100, "a");
        scheduler.schedule_in(200, "b");
        assert_eq!(scheduler.pending(), 3);
        assert_eq!(scheduler.next_due(), Some(100));

        let fired: Vec<&str> = std::iter::from_fn(|| scheduler.pop_due(u64::MAX))
            .map(|f| f.event)
            .collect();
        assert_eq!(fired, vec!["a", "b", "c"]);
        assert_eq!(scheduler.now_ms(), 300);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_same_due_time_keeps_insertion_order() {
        let mut scheduler = Scheduler::new();
        for i in 0..5 {
            scheduler.schedule_in(50, i);
        }
        let fired: Vec<i32> = std::iter::from_fn(|| scheduler.pop_due(50))
            .map(|f| f.event)
            .collect();
        assert_eq!(fired, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_pop_due_respects_horizon() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(1500, "late");
        assert!(scheduler.pop_due(1499).is_none());
        assert_eq!(scheduler.now_ms(), 0);

        let fired = scheduler.pop_due(1500).unwrap();
        assert_eq!(fired.due_ms, 1500);
        assert_eq!(scheduler.now_ms(), 1500);
    }

    #[test]
    fn test_delays_are_relative_to_clock() {
        let mut scheduler: Scheduler<()> = Scheduler::new();
        scheduler.advance_clock(1000);
        assert_eq!(scheduler.schedule_in(500, ()), 1500);
        scheduler.advance_clock(200);
        assert_eq!(scheduler.now_ms(), 1000);
    }
}
