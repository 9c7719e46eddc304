/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` and returns a `Step`: a brand-new state plus the render
/// commands the transition produced.  The input state is never mutated.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::board::{Board, BoundingBox};
use crate::config::GameConfig;
use crate::entities::{Entity, EntityId, EntityKind, GameState};
use crate::geometry::{Position, Size, Vector, Velocity};
use crate::render::RenderCommand;
use crate::scheduler::Scheduler;

#[derive(Clone, Debug)]
pub struct Step {
    pub state: GameState,
    pub commands: Vec<RenderCommand>,
}

impl Step {
    fn unchanged(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            commands: Vec::new(),
        }
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the board and its first shooter.
pub fn init_state(config: GameConfig) -> Step {
    let mut state = GameState {
        board: Board::new(config.board),
        entities: BTreeMap::new(),
        scheduler: Scheduler::new(config.tick_interval()),
        next_id: 0,
        tick_count: 0,
        config,
    };
    let mut commands = Vec::new();
    let id = add_shooter(&mut state, &mut commands);
    info!(shooter = %id, "board ready");
    Step { state, commands }
}

/// Add another shooter to the board's roster.
pub fn spawn_shooter(state: &GameState) -> (Step, EntityId) {
    let mut state = state.clone();
    let mut commands = Vec::new();
    let id = add_shooter(&mut state, &mut commands);
    (Step { state, commands }, id)
}

fn add_shooter(state: &mut GameState, commands: &mut Vec<RenderCommand>) -> EntityId {
    let board = state.config.board;
    let pos = Vector::new(
        board.width / 2.0,
        board.height / state.config.shooter_height_divisor,
    );
    let size = state.config.shooter;
    let id = spawn(state, EntityKind::Shooter, pos, size, Velocity::ZERO, commands);
    state.board.add_shooter(id);
    id
}

fn spawn(
    state: &mut GameState,
    kind: EntityKind,
    pos: Position,
    size: Size,
    velocity: Velocity,
    commands: &mut Vec<RenderCommand>,
) -> EntityId {
    let id = EntityId(state.next_id);
    state.next_id += 1;

    let entity = Entity {
        id,
        kind,
        pos,
        size,
        velocity,
    };
    commands.push(RenderCommand::Attach { id, kind, size });
    commands.push(RenderCommand::Place {
        id,
        offset: entity.render_offset(),
    });
    state.entities.insert(id, entity);
    state.scheduler.register(id);
    id
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Pointer moved to `absolute`: the shooter follows horizontally, clamped to
/// the board.  Its height never changes.
pub fn move_shooter(state: &GameState, shooter: EntityId, absolute: Position) -> Step {
    if shooter_entity(state, shooter).is_none() {
        warn!(id = %shooter, "pointer move for unknown shooter ignored");
        return Step::unchanged(state);
    }
    let target = state
        .board
        .clamp_to_bounds(state.board.to_relative(absolute));

    let mut state = state.clone();
    let mut commands = Vec::new();
    if let Some(entity) = state.entities.get_mut(&shooter) {
        entity.pos.x = target.x;
        commands.push(RenderCommand::Place {
            id: shooter,
            offset: entity.render_offset(),
        });
    }
    Step { state, commands }
}

/// Fire one bullet from the top edge of `shooter`.  The shooter itself is
/// left untouched.
pub fn shoot(state: &GameState, shooter: EntityId) -> Step {
    let Some(source) = shooter_entity(state, shooter) else {
        warn!(id = %shooter, "shot from unknown shooter ignored");
        return Step::unchanged(state);
    };
    let pos = source.pos + Vector::new(0.0, source.size.height / 2.0);

    let mut state = state.clone();
    let mut commands = Vec::new();
    let size = state.config.bullet;
    let speed = state.config.bullet_speed;
    let id = spawn(&mut state, EntityKind::Bullet, pos, size, speed, &mut commands);
    debug!(bullet = %id, from = %shooter, x = pos.x, y = pos.y, "bullet spawned");
    Step { state, commands }
}

/// Pointer pressed at `absolute`: the shooter first follows the pointer,
/// then fires from its new position.
pub fn press(state: &GameState, shooter: EntityId, absolute: Position) -> Step {
    let moved = move_shooter(state, shooter, absolute);
    let fired = shoot(&moved.state, shooter);
    let mut commands = moved.commands;
    commands.extend(fired.commands);
    Step {
        state: fired.state,
        commands,
    }
}

/// The measured board box changed (startup layout or terminal resize).
/// Shooters left outside a shrunken box are pulled back onto it.
pub fn resize_board(state: &GameState, bounds: BoundingBox) -> Step {
    if state.board.bounds() == bounds {
        return Step::unchanged(state);
    }
    let mut state = state.clone();
    let mut commands = Vec::new();
    state.board.set_bounds(bounds);
    info!(
        width = bounds.width,
        height = bounds.height,
        "board bounds measured"
    );

    let roster = state.board.shooters().to_vec();
    for id in roster {
        let clamped = match state.entities.get(&id) {
            Some(entity) => state.board.clamp_to_bounds(entity.pos),
            None => continue,
        };
        if let Some(entity) = state.entities.get_mut(&id) {
            if entity.pos != clamped {
                entity.pos = clamped;
                commands.push(RenderCommand::Place {
                    id,
                    offset: entity.render_offset(),
                });
            }
        }
    }
    Step { state, commands }
}

fn shooter_entity(state: &GameState, id: EntityId) -> Option<&Entity> {
    state
        .entity(id)
        .filter(|e| e.kind == EntityKind::Shooter)
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Advance every registered entity by one fixed interval.
///
/// Per entity, in id order: kind-specific update (a bullet outside the board
/// is destroyed and skips the rest), then move by its velocity, then place.
pub fn tick(state: &GameState) -> Step {
    let mut state = state.clone();
    let mut commands = Vec::new();
    let dt = state.scheduler.interval();
    state.tick_count += 1;

    let live: Vec<EntityId> = state.scheduler.live().collect();
    for id in live {
        let Some(entity) = state.entities.get(&id) else {
            continue;
        };
        let exited =
            entity.kind == EntityKind::Bullet && !state.board.is_within_bounds(entity.pos);
        if exited {
            remove(&mut state, id, &mut commands);
            continue;
        }

        if let Some(entity) = state.entities.get_mut(&id) {
            if !entity.velocity.is_zero() {
                entity.pos += entity.velocity.displacement(dt);
            }
            commands.push(RenderCommand::Place {
                id,
                offset: entity.render_offset(),
            });
        }
    }

    Step { state, commands }
}

// ── Destruction ──────────────────────────────────────────────────────────────

/// Unregister `id` from the scheduler and drop it.  Destroying an entity
/// that is already gone changes nothing and emits nothing.
pub fn destroy(state: &GameState, id: EntityId) -> Step {
    if !state.scheduler.is_registered(id) {
        return Step::unchanged(state);
    }
    let mut state = state.clone();
    let mut commands = Vec::new();
    remove(&mut state, id, &mut commands);
    Step { state, commands }
}

fn remove(state: &mut GameState, id: EntityId, commands: &mut Vec<RenderCommand>) {
    if !state.scheduler.unregister(id) {
        return;
    }
    if let Some(entity) = state.entities.remove(&id) {
        if entity.kind == EntityKind::Shooter {
            state.board.remove_shooter(id);
        }
        debug!(id = %id, kind = ?entity.kind, y = entity.pos.y, "entity destroyed");
    }
    commands.push(RenderCommand::Remove { id });
}
