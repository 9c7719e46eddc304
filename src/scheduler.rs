/// Central tick source.
///
/// Every live entity is registered here exactly once; destroying an entity
/// unregisters it, and an entity that is not registered is never ticked.
/// `FrameClock` turns wall-clock time into a count of fixed ticks for the
/// host loop.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::entities::EntityId;

#[derive(Clone, Debug)]
pub struct Scheduler {
    interval: Duration,
    registered: BTreeSet<EntityId>,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            registered: BTreeSet::new(),
        }
    }

    /// Fixed time step applied on every tick.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `false` if `id` was already registered.
    pub fn register(&mut self, id: EntityId) -> bool {
        self.registered.insert(id)
    }

    /// Returns `false` if `id` was not registered, so a second call is a
    /// harmless no-op.
    pub fn unregister(&mut self, id: EntityId) -> bool {
        self.registered.remove(&id)
    }

    pub fn is_registered(&self, id: EntityId) -> bool {
        self.registered.contains(&id)
    }

    /// Registered ids in ascending (spawn) order.
    pub fn live(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.registered.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

// ── Fixed-step clock ──────────────────────────────────────────────────────────

/// Input and redraw cadence of the host loop (≈60 FPS).  Independent of the
/// simulation interval, so a slow tick never delays pointer response.
pub const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on ticks handed out by a single `advance`.  A stalled host
/// (suspended terminal, debugger) drops the backlog instead of replaying it.
pub const MAX_CATCH_UP_TICKS: u32 = 8;

#[derive(Clone, Debug)]
pub struct FrameClock {
    interval: Duration,
    accumulated: Duration,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    /// Add `elapsed` wall-clock time and return how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulated += elapsed;

        let mut due = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            due += 1;
            if due == MAX_CATCH_UP_TICKS {
                self.accumulated = Duration::ZERO;
                break;
            }
        }
        due
    }
}
