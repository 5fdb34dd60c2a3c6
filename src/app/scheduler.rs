//! Deferred callbacks with cancellation handles
//!
//! Nothing here reads the wall clock on its own. Callers pass `now` in, so
//! tests drive time with `ManualClock` instead of sleeping.

use std::time::Instant;

#[cfg(test)]
use std::{cell::Cell, time::Duration};

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Real monotonic time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[cfg(test)]
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Handle returned by [`Scheduler::schedule`]; pass it to `cancel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    deadline: Instant,
    id: u64,
    payload: T,
}

/// Pending callbacks keyed by deadline
#[derive(Debug)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to fire at `deadline`
    pub fn schedule(&mut self, deadline: Instant, payload: T) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            deadline,
            id,
            payload,
        });
        TimerHandle(id)
    }

    /// Cancel a pending callback. Returns false if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != handle.0);
        self.entries.len() != before
    }

    /// Whether `handle` is still waiting to fire
    #[cfg(test)]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.id == handle.0)
    }

    /// Remove and return every payload due at `now`, earliest deadline
    /// first. Equal deadlines fire in scheduling order.
    pub fn due(&mut self, now: Instant) -> Vec<T> {
        let mut fired: Vec<Entry<T>> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].deadline <= now {
                fired.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        fired.sort_by_key(|e| (e.deadline, e.id));
        fired.into_iter().map(|e| e.payload).collect()
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_deadline() {
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(clock.now() + Duration::from_millis(300), "reveal");

        clock.advance(Duration::from_millis(299));
        assert!(scheduler.due(clock.now()).is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(scheduler.due(clock.now()), vec!["reveal"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_due_in_deadline_then_insertion_order() {
        let clock = ManualClock::new();
        let start = clock.now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(start + Duration::from_secs(3), "late");
        scheduler.schedule(start + Duration::from_secs(1), "first");
        scheduler.schedule(start + Duration::from_secs(1), "second");

        clock.advance(Duration::from_secs(5));
        assert_eq!(scheduler.due(clock.now()), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_cancel() {
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::new();
        let keep = scheduler.schedule(clock.now() + Duration::from_secs(1), 1);
        let drop = scheduler.schedule(clock.now() + Duration::from_secs(1), 2);

        assert!(scheduler.cancel(drop));
        assert!(!scheduler.cancel(drop));
        assert!(scheduler.is_pending(keep));
        assert!(!scheduler.is_pending(drop));

        clock.advance(Duration::from_secs(1));
        assert_eq!(scheduler.due(clock.now()), vec![1]);
        assert!(!scheduler.cancel(keep));
    }

    #[test]
    fn test_next_deadline() {
        let clock = ManualClock::new();
        let mut scheduler: Scheduler<()> = Scheduler::new();
        assert_eq!(scheduler.next_deadline(), None);

        let soon = clock.now() + Duration::from_millis(10);
        scheduler.schedule(clock.now() + Duration::from_secs(10), ());
        scheduler.schedule(soon, ());
        assert_eq!(scheduler.next_deadline(), Some(soon));
        assert_eq!(scheduler.len(), 2);
    }
}
