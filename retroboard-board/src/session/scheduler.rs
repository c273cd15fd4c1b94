//! Deferred callbacks for the drag controller.
//!
//! The controller never sleeps. It asks a [`Scheduler`] to wake it later
//! (the stacking delay, the next rendering frame) and the host feeds fired
//! wakeups back through `wake`. Each wakeup carries a token; the controller
//! ignores any token it is no longer waiting for.

use std::time::Duration;

/// Generation number identifying one scheduled wakeup
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(u64);

impl Token {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A deferred callback requested by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wakeup {
    /// The stacking delay elapsed
    StackArm(Token),
    /// A rendering frame is due; apply the pending preview
    Frame(Token),
}

impl Wakeup {
    pub fn token(&self) -> Token {
        match self {
            Self::StackArm(token) | Self::Frame(token) => *token,
        }
    }
}

/// Something that can deliver a wakeup after a delay and forget it again
pub trait Scheduler {
    /// Deliver `wakeup` once `delay` has elapsed
    fn schedule(&mut self, wakeup: Wakeup, delay: Duration);

    /// Drop a wakeup that has not fired yet; unknown wakeups are ignored
    fn cancel(&mut self, wakeup: Wakeup);
}

/// Scheduler on a virtual clock that only moves when told to.
///
/// Used by tests and by script replay, where "wait 700ms" must be exact and
/// instantaneous.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    seq: u64,
    pending: Vec<Pending>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    deadline: Duration,
    seq: u64,
    wakeup: Wakeup,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of wakeups waiting to fire
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check if a wakeup is still waiting
    pub fn is_pending(&self, wakeup: Wakeup) -> bool {
        self.pending.iter().any(|p| p.wakeup == wakeup)
    }

    /// Pop the earliest wakeup due at or before `until`, moving the clock to
    /// its deadline. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<Wakeup> {
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= until)
            .min_by_key(|(_, p)| (p.deadline, p.seq))?;
        let due = self.pending.remove(index);
        self.now = self.now.max(due.deadline);
        Some(due.wakeup)
    }

    /// Move the clock forward without firing anything
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Advance the clock and return everything that fired, in order
    pub fn advance(&mut self, by: Duration) -> Vec<Wakeup> {
        let until = self.now + by;
        let fired = std::iter::from_fn(|| self.pop_due(until)).collect();
        self.settle(until);
        fired
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, wakeup: Wakeup, delay: Duration) {
        self.seq += 1;
        self.pending.push(Pending {
            deadline: self.now + delay,
            seq: self.seq,
            wakeup,
        });
    }

    fn cancel(&mut self, wakeup: Wakeup) {
        self.pending.retain(|p| p.wakeup != wakeup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_in_deadline_order() {
        let mut s = VirtualScheduler::new();
        s.schedule(Wakeup::StackArm(Token::new(1)), 600 * MS);
        s.schedule(Wakeup::Frame(Token::new(2)), 16 * MS);

        assert!(s.advance(10 * MS).is_empty());
        assert_eq!(s.advance(10 * MS), [Wakeup::Frame(Token::new(2))]);
        assert_eq!(s.now(), 20 * MS);
        assert_eq!(s.advance(600 * MS), [Wakeup::StackArm(Token::new(1))]);
        assert_eq!(s.pending_count(), 0);
    }

    #[test]
    fn test_cancelled_wakeups_never_fire() {
        let mut s = VirtualScheduler::new();
        let arm = Wakeup::StackArm(Token::new(7));
        s.schedule(arm, 600 * MS);
        assert!(s.is_pending(arm));
        s.cancel(arm);
        assert!(s.advance(1000 * MS).is_empty());
    }

    #[test]
    fn test_pop_due_moves_clock_to_deadline() {
        let mut s = VirtualScheduler::new();
        s.schedule(Wakeup::Frame(Token::new(1)), 16 * MS);
        assert_eq!(s.pop_due(100 * MS), Some(Wakeup::Frame(Token::new(1))));
        assert_eq!(s.now(), 16 * MS);
    }
}
