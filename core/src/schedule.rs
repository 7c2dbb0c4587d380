use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Generation of a session. Resetting the session moves to the next epoch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u32);

/// Handle to a scheduled effect, only honoured by the epoch that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectToken {
    epoch: u32,
    seq: u64,
}

impl EffectToken {
    pub fn epoch(self) -> Epoch {
        Epoch(self.epoch)
    }
}

/// Deferred state change, applied when its timer fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// One second of play has passed.
    Tick,
    /// Highlight window over, the pair starts moving to the tray.
    StartCollecting(PairMatch),
    /// The pair reached the tray.
    FinishCollecting(PairMatch),
    /// A mismatched pair turns back over.
    FlipBack([CardId; 2]),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scheduled {
    pub token: EffectToken,
    pub due: DateTime<Utc>,
    pub effect: Effect,
}

impl Scheduled {
    /// Time left until due, clamped at zero.
    pub fn delay_from(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.due - now).max(TimeDelta::zero())
    }
}

/// Registry of pending effects owned by one session.
///
/// Hosts arm a real timer for every entry returned by [`Scheduler::drain_new`] and hand the
/// token back when it fires. Tokens from an earlier epoch, or ones that were cancelled, are
/// refused by [`Scheduler::take`].
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    epoch: Epoch,
    next_seq: u64,
    pending: BTreeMap<u64, Scheduled>,
    new: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, due: DateTime<Utc>, effect: Effect) -> EffectToken {
        let token = EffectToken {
            epoch: self.epoch.0,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let entry = Scheduled { token, due, effect };
        log::trace!("scheduled {:?} at {}", effect, due);
        self.pending.insert(token.seq, entry);
        self.new.push(entry);
        token
    }

    pub fn schedule_after(
        &mut self,
        now: DateTime<Utc>,
        delay_ms: u32,
        effect: Effect,
    ) -> EffectToken {
        self.schedule(now + TimeDelta::milliseconds(delay_ms.into()), effect)
    }

    /// Drops a pending effect. Returns whether it was still pending.
    pub fn cancel(&mut self, token: EffectToken) -> bool {
        if token.epoch != self.epoch.0 {
            return false;
        }
        self.new.retain(|entry| entry.token != token);
        self.pending.remove(&token.seq).is_some()
    }

    /// Cancels everything and moves to a new epoch, outstanding tokens become inert.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.new.clear();
        self.epoch = Epoch(self.epoch.0.wrapping_add(1));
        log::debug!("scheduler reset to epoch {:?}", self.epoch);
    }

    /// Removes and returns a pending effect, `None` for stale or cancelled tokens.
    pub fn take(&mut self, token: EffectToken) -> Option<Scheduled> {
        if token.epoch != self.epoch.0 {
            log::trace!("stale token {:?} in epoch {:?}", token, self.epoch);
            return None;
        }
        self.new.retain(|entry| entry.token != token);
        self.pending.remove(&token.seq)
    }

    /// The earliest pending effect, ties resolved in scheduling order.
    pub fn peek_next(&self) -> Option<&Scheduled> {
        self.pending
            .values()
            .min_by_key(|entry| (entry.due, entry.token.seq))
    }

    /// Effects scheduled since the last call, for the host to arm timers with.
    pub fn drain_new(&mut self) -> Vec<Scheduled> {
        core::mem::take(&mut self.new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn take_removes_once() {
        let mut scheduler = Scheduler::new();
        let token = scheduler.schedule(at(100), Effect::Tick);

        assert_eq!(scheduler.take(token).map(|e| e.due), Some(at(100)));
        assert_eq!(scheduler.take(token), None);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn cancelled_token_is_refused() {
        let mut scheduler = Scheduler::new();
        let effect = Effect::FlipBack([CardId(0), CardId(1)]);
        let token = scheduler.schedule_after(at(0), 500, effect);

        assert!(scheduler.cancel(token));
        assert!(!scheduler.cancel(token));
        assert_eq!(scheduler.take(token), None);
        assert!(scheduler.drain_new().is_empty());
    }

    #[test]
    fn reset_invalidates_previous_epoch() {
        let mut scheduler = Scheduler::new();
        let stale = scheduler.schedule(at(10), Effect::Tick);
        scheduler.reset();
        let fresh = scheduler.schedule(at(10), Effect::Tick);

        assert_ne!(stale.epoch(), fresh.epoch());
        assert_eq!(scheduler.take(stale), None);
        assert!(!scheduler.cancel(stale));
        assert!(scheduler.take(fresh).is_some());
    }

    #[test]
    fn peek_next_orders_by_due_then_sequence() {
        let mut scheduler = Scheduler::new();
        let late = scheduler.schedule(at(300), Effect::Tick);
        let first = scheduler.schedule(at(100), Effect::FlipBack([CardId(0), CardId(1)]));
        let second = scheduler.schedule(at(100), Effect::Tick);

        assert_eq!(scheduler.peek_next().map(|e| e.token), Some(first));
        scheduler.take(first);
        assert_eq!(scheduler.peek_next().map(|e| e.token), Some(second));
        scheduler.take(second);
        assert_eq!(scheduler.peek_next().map(|e| e.token), Some(late));
    }

    #[test]
    fn drain_new_hands_out_each_entry_once() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(at(0), 1000, Effect::Tick);
        scheduler.schedule_after(at(0), 1500, Effect::Tick);

        let drained = scheduler.drain_new();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].delay_from(at(500)), TimeDelta::milliseconds(1000));
        assert_eq!(drained[1].delay_from(at(5000)), TimeDelta::zero());
        assert!(scheduler.drain_new().is_empty());
        assert_eq!(scheduler.len(), 2);
    }
}
