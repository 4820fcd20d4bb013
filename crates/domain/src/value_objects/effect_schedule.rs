//! Virtual-time queue of delayed effects
//!
//! The tour engine never sleeps. It schedules effects against a virtual
//! clock and the caller decides how fast that clock moves: a runtime driver
//! advances it in step with wall time, tests jump straight to the end.

use std::time::Duration;

#[derive(Debug, Clone)]
struct Pending<E> {
    due: Duration,
    seq: u64,
    effect: E,
}

/// Effects waiting for their due time, ordered by (due time, insertion order).
#[derive(Debug, Clone)]
pub struct EffectSchedule<E> {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Default for EffectSchedule<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EffectSchedule<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `effect` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, effect: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due: self.now + delay,
            seq,
            effect,
        });
    }

    /// Removes and returns the earliest effect due at or before `deadline`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<E> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= deadline)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(index, _)| index)?;
        let next = self.pending.swap_remove(index);
        self.now = self.now.max(next.due);
        Some(next.effect)
    }

    /// Moves the clock forward without firing anything. Never moves it back.
    pub fn advance_clock_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    /// Delay until the next effect is due, or `None` when idle.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|p| p.due)
            .min()
            .map(|due| due.saturating_sub(self.now))
    }

    /// Due time of the last pending effect.
    pub fn last_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).max()
    }

    /// Keeps only the effects matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&E) -> bool) {
        self.pending.retain(|p| keep(&p.effect));
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
