//! Simulated clock with cancellable one-shot and repeating timers
//!
//! The arena never touches the host's `setTimeout`. Instead every delayed
//! effect is a [`TimerId`] in this queue, advanced by the frame loop. Cancelled
//! timers are removed outright, so a reset can never be undone by a callback
//! that was already scheduled.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer<E> {
    id: TimerId,
    due_ms: f64,
    /// Re-arm period for repeating timers
    period_ms: Option<f64>,
    event: E,
}

/// Ordered queue of pending timer events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerQueue<E> {
    now_ms: f64,
    next_id: u64,
    timers: Vec<Timer<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 1,
            timers: Vec::new(),
        }
    }

    /// Current simulated time (ms)
    #[inline]
    pub fn now(&self) -> f64 {
        self.now_ms
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Whether a timer is still pending
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    fn alloc_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Fire `event` once, `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: f64, event: E) -> TimerId {
        let id = self.alloc_id();
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms.max(0.0),
            period_ms: None,
            event,
        });
        id
    }

    /// Fire `event` after `delay_ms`, then every `period_ms` until cancelled
    pub fn schedule_repeating(&mut self, delay_ms: f64, period_ms: f64, event: E) -> TimerId {
        debug_assert!(period_ms > 0.0, "repeating timer needs a positive period");
        let id = self.alloc_id();
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms.max(0.0),
            period_ms: Some(period_ms),
            event,
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every handle in `ids`, leaving the list empty
    pub fn cancel_all(&mut self, ids: &mut Vec<TimerId>) {
        for id in ids.drain(..) {
            self.cancel(id);
        }
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

impl<E: Clone> TimerQueue<E> {
    /// Pop the earliest timer due at or before `until_ms`, moving the clock to
    /// its due time. Ties fire in scheduling order.
    ///
    /// Handlers may schedule or cancel timers between pops; call in a loop and
    /// finish with [`TimerQueue::advance_to`].
    pub fn pop_due(&mut self, until_ms: f64) -> Option<(TimerId, E)> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .partial_cmp(&b.due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.id.cmp(&b.id))
            })
            .map(|(i, _)| i)?;

        let due = self.timers[idx].due_ms;
        self.now_ms = self.now_ms.max(due);

        let timer = &self.timers[idx];
        let fired = (timer.id, timer.event.clone());
        let period = timer.period_ms;
        match period {
            Some(period) => self.timers[idx].due_ms += period,
            None => {
                self.timers.swap_remove(idx);
            }
        }
        Some(fired)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, now_ms: f64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<&'static str>, until: f64) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some((_, ev)) = queue.pop_due(until) {
            fired.push(ev);
        }
        queue.advance_to(until);
        fired
    }

    #[test]
    fn test_one_shot_fires_once_at_due_time() {
        let mut queue = TimerQueue::new();
        queue.schedule(100.0, "a");

        assert!(drain(&mut queue, 99.0).is_empty());
        assert_eq!(drain(&mut queue, 100.0), vec!["a"]);
        assert!(drain(&mut queue, 500.0).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fires_in_due_order_then_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(30.0, "late");
        queue.schedule(10.0, "first");
        queue.schedule(10.0, "second");

        assert_eq!(drain(&mut queue, 50.0), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_repeating_rearms() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_repeating(0.0, 50.0, "tick");

        assert_eq!(drain(&mut queue, 120.0).len(), 3); // 0, 50, 100
        assert!(queue.is_pending(id));
        assert_eq!(drain(&mut queue, 150.0).len(), 1);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let keep = queue.schedule(10.0, "keep");
        let dropped = queue.schedule(10.0, "drop");

        assert!(queue.cancel(dropped));
        assert!(!queue.cancel(dropped));
        assert_eq!(drain(&mut queue, 20.0), vec!["keep"]);
        assert!(!queue.is_pending(keep));
    }

    #[test]
    fn test_cancel_all_empties_handles() {
        let mut queue = TimerQueue::new();
        let mut handles = vec![queue.schedule(5.0, "a"), queue.schedule_repeating(5.0, 5.0, "b")];

        queue.cancel_all(&mut handles);
        assert!(handles.is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_delays_are_relative_to_clock() {
        let mut queue = TimerQueue::new();
        queue.advance_to(1000.0);
        queue.schedule(500.0, "x");

        assert!(drain(&mut queue, 1499.0).is_empty());
        assert_eq!(drain(&mut queue, 1500.0), vec!["x"]);
        assert_eq!(queue.now(), 1500.0);
    }
}
