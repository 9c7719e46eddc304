/// All game entity types — pure data, no logic.

use std::collections::BTreeMap;
use std::fmt;

use crate::board::Board;
use crate::config::GameConfig;
use crate::geometry::{Position, Size, Vector, Velocity};
use crate::scheduler::Scheduler;

/// Stable handle for one live entity.  Never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// Player-controlled; moved by pointer input, never by its velocity.
    Shooter,
    /// Flies at constant velocity until it leaves the board.
    Bullet,
}

/// Where an entity is in its lifecycle, as seen from outside the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Live,
    Destroyed,
}

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Centre of the sprite, board-relative.
    pub pos: Position,
    pub size: Size,
    pub velocity: Velocity,
}

impl Entity {
    /// Lower-left corner handed to the presentation layer: `pos − size/2`.
    pub fn render_offset(&self) -> Vector {
        self.pos - self.size.half()
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation.  Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub board: Board,
    /// Live entities keyed by id; iteration order is spawn order.
    pub entities: BTreeMap<EntityId, Entity>,
    /// Central tick source every live entity is registered with.
    pub scheduler: Scheduler,
    pub next_id: u64,
    /// Number of ticks processed so far.
    pub tick_count: u64,
    pub config: GameConfig,
}

impl GameState {
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn lifecycle(&self, id: EntityId) -> Lifecycle {
        if self.scheduler.is_registered(id) {
            Lifecycle::Live
        } else {
            Lifecycle::Destroyed
        }
    }

    pub fn bullets(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .values()
            .filter(|e| e.kind == EntityKind::Bullet)
    }

    pub fn shooters(&self) -> impl Iterator<Item = &Entity> {
        self.board
            .shooters()
            .iter()
            .filter_map(|id| self.entities.get(id))
    }
}
