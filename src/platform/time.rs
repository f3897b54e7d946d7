//! Virtual-time timer queue
//!
//! A single-threaded stand-in for repeating interval timers. The frontend feeds
//! it wall-clock milliseconds, tests feed it whatever they like. Each timer is
//! owned through a [`Timer`] guard; dropping the guard cancels it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// What a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Marker movement tick
    Movement,
    /// Periodic target shuffle
    Relocate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct TimerId(u64);

#[derive(Debug)]
struct Entry {
    id: TimerId,
    kind: TimerKind,
    period_ms: u64,
    due_ms: u64,
}

#[derive(Debug, Default)]
struct Queue {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry>,
}

/// Shared handle to the timer queue
#[derive(Debug, Clone, Default)]
pub struct Clock {
    queue: Rc<RefCell<Queue>>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (ms)
    pub fn now_ms(&self) -> u64 {
        self.queue.borrow().now_ms
    }

    /// Start a repeating timer, first firing one period from now
    pub fn every(&self, period_ms: u64, kind: TimerKind) -> Timer {
        let period_ms = period_ms.max(1);
        let mut queue = self.queue.borrow_mut();
        let id = TimerId(queue.next_id);
        queue.next_id += 1;
        let due_ms = queue.now_ms + period_ms;
        queue.entries.push(Entry {
            id,
            kind,
            period_ms,
            due_ms,
        });
        log::trace!("Armed {:?} timer {:?} every {}ms", kind, id, period_ms);

        Timer {
            id,
            kind,
            period_ms,
            queue: Rc::downgrade(&self.queue),
        }
    }

    /// Earliest pending expiry
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.borrow().entries.iter().map(|e| e.due_ms).min()
    }

    /// Number of live timers
    pub fn active(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    /// Pop the earliest timer due at or before `now_ms`
    ///
    /// Virtual time jumps to that timer's deadline and the timer is rescheduled
    /// one period later. Ties fire in arming order.
    pub fn pop_due(&self, now_ms: u64) -> Option<TimerKind> {
        let mut queue = self.queue.borrow_mut();
        let entry = queue
            .entries
            .iter_mut()
            .filter(|e| e.due_ms <= now_ms)
            .min_by_key(|e| (e.due_ms, e.id))?;

        let fired_at = entry.due_ms;
        entry.due_ms += entry.period_ms;
        let fired = entry.kind;
        queue.now_ms = queue.now_ms.max(fired_at);
        Some(fired)
    }

    /// Move virtual time forward once due timers have been drained
    pub fn settle(&self, now_ms: u64) {
        let mut queue = self.queue.borrow_mut();
        queue.now_ms = queue.now_ms.max(now_ms);
    }
}

/// Owning handle of a live timer. Dropping it cancels the timer.
#[derive(Debug)]
pub struct Timer {
    id: TimerId,
    kind: TimerKind,
    period_ms: u64,
    queue: Weak<RefCell<Queue>>,
}

impl Timer {
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().entries.retain(|e| e.id != self.id);
            log::trace!("Cancelled {:?} timer {:?}", self.kind, self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &Clock, now: u64) -> Vec<(TimerKind, u64)> {
        let mut fired = Vec::new();
        while let Some(kind) = clock.pop_due(now) {
            fired.push((kind, clock.now_ms()));
        }
        clock.settle(now);
        fired
    }

    #[test]
    fn test_repeating_timer() {
        let clock = Clock::new();
        let _t = clock.every(500, TimerKind::Movement);
        assert_eq!(clock.next_deadline(), Some(500));

        assert!(drain(&clock, 499).is_empty());
        let fired = drain(&clock, 1600);
        assert_eq!(
            fired,
            vec![
                (TimerKind::Movement, 500),
                (TimerKind::Movement, 1000),
                (TimerKind::Movement, 1500),
            ]
        );
        assert_eq!(clock.now_ms(), 1600);
        assert_eq!(clock.next_deadline(), Some(2000));
    }

    #[test]
    fn test_interleaves_by_deadline() {
        let clock = Clock::new();
        let _slow = clock.every(1000, TimerKind::Relocate);
        let _fast = clock.every(400, TimerKind::Movement);
        let kinds: Vec<_> = drain(&clock, 1200).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                TimerKind::Movement,
                TimerKind::Movement,
                TimerKind::Relocate,
                TimerKind::Movement,
            ]
        );
    }

    #[test]
    fn test_drop_cancels() {
        let clock = Clock::new();
        let timer = clock.every(100, TimerKind::Movement);
        assert_eq!(clock.active(), 1);
        drop(timer);
        assert_eq!(clock.active(), 0);
        assert_eq!(clock.next_deadline(), None);
        assert!(clock.pop_due(10_000).is_none());
    }

    #[test]
    fn test_rearm_counts_from_now() {
        let clock = Clock::new();
        let first = clock.every(500, TimerKind::Movement);
        drain(&clock, 700);
        let second = clock.every(450, TimerKind::Movement);
        drop(first);
        assert_eq!(second.period_ms(), 450);
        assert_eq!(clock.active(), 1);
        assert_eq!(clock.next_deadline(), Some(1150));
    }

    #[test]
    fn test_timer_outlives_clock() {
        let timer = {
            let clock = Clock::new();
            clock.every(100, TimerKind::Relocate)
        };
        assert_eq!(timer.kind(), TimerKind::Relocate);
        drop(timer);
    }
}
