//! Cancellable scheduled sequence.
//!
//! A single-threaded timer queue on an explicit clock. Each timer is stamped
//! with the generation current at scheduling time; `cancel_all` bumps the
//! generation and drops every pending timer, and `pop_due` discards any
//! timer whose stamp is stale. After `dispose` nothing can be scheduled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

/// Identifies one scheduled sequence between two cancellations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u64);

#[derive(Debug)]
struct Timer<E> {
    due: Duration,
    seq: u64,
    generation: Generation,
    event: E,
}

// Ordered by due time, ties broken by scheduling order.
impl<E> PartialEq for Timer<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<E> Eq for Timer<E> {}

impl<E> PartialOrd for Timer<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Timer<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Timer queue driven by an externally supplied clock.
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    generation: Generation,
    next_seq: u64,
    pending: BinaryHeap<Reverse<Timer<E>>>,
    disposed: bool,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            generation: Generation::default(),
            next_seq: 0,
            pending: BinaryHeap::new(),
            disposed: false,
        }
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the earliest live timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.peek().map(|Reverse(timer)| timer.due)
    }

    /// Schedule `event` to fire `delay` after the current clock value.
    ///
    /// Returns false (and drops the event) once the scheduler is disposed.
    pub fn schedule(&mut self, delay: Duration, event: E) -> bool {
        if self.disposed {
            return false;
        }
        let timer = Timer {
            due: self.now.saturating_add(delay),
            seq: self.next_seq,
            generation: self.generation,
            event,
        };
        self.next_seq += 1;
        self.pending.push(Reverse(timer));
        true
    }

    /// Drop every pending timer and start a new generation.
    ///
    /// Returns the number of timers dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.generation = Generation(self.generation.0 + 1);
        if dropped > 0 {
            tracing::debug!(dropped, "cancelled pending timers");
        }
        dropped
    }

    /// Cancel everything and refuse further scheduling.
    pub fn dispose(&mut self) {
        self.cancel_all();
        self.disposed = true;
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// The clock moves to the timer's due time, so anything the caller
    /// schedules in response is measured from the moment the timer fired.
    pub fn pop_due(&mut self, until: Duration) -> Option<E> {
        if self.disposed {
            return None;
        }
        loop {
            let due = self.next_deadline()?;
            if due > until {
                return None;
            }
            let Reverse(timer) = self.pending.pop()?;
            if timer.generation != self.generation {
                tracing::trace!(seq = timer.seq, "discarding stale timer");
                continue;
            }
            self.now = self.now.max(timer.due);
            return Some(timer.event);
        }
    }

    /// Move the clock forward to `until`. The clock never runs backwards.
    pub fn advance_clock(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
