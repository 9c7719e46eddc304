mod common;

use board_shooter::board::BoundingBox;
use board_shooter::compute::*;
use board_shooter::config::GameConfig;
use board_shooter::entities::*;
use board_shooter::geometry::*;
use board_shooter::render::{layout_constants, Presenter, RenderCommand};

use common::{approx, Recorder};

fn make_state() -> (GameState, EntityId) {
    let step = init_state(GameConfig::default());
    let shooter = step.state.board.shooters()[0];
    (step.state, shooter)
}

/// Spawn a bullet through the shooter, then teleport it to `pos`.
fn bullet_at(state: &GameState, shooter: EntityId, pos: Position) -> (GameState, EntityId) {
    let step = shoot(state, shooter);
    let mut state = step.state;
    let id = step.commands[0].id();
    if let Some(b) = state.entities.get_mut(&id) {
        b.pos = pos;
    }
    (state, id)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_places_one_shooter() {
    let step = init_state(GameConfig::default());
    let s = &step.state;
    assert_eq!(s.board.shooters().len(), 1);
    let shooter = s.shooters().next().cloned().unwrap();
    assert_eq!(shooter.kind, EntityKind::Shooter);
    assert_eq!(shooter.pos, Vector::new(200.0, 30.0)); // width / 2, height / 20
    assert_eq!(shooter.size, Size::new(40.0, 40.0));
    assert!(shooter.velocity.is_zero());
    assert_eq!(s.lifecycle(shooter.id), Lifecycle::Live);
    assert_eq!(s.tick_count, 0);
    assert_eq!(s.bullets().count(), 0);
}

#[test]
fn init_state_attaches_and_places_shooter() {
    let step = init_state(GameConfig::default());
    let id = step.state.board.shooters()[0];
    assert_eq!(
        step.commands,
        vec![
            RenderCommand::Attach {
                id,
                kind: EntityKind::Shooter,
                size: Size::new(40.0, 40.0),
            },
            RenderCommand::Place {
                id,
                offset: Vector::new(180.0, 10.0),
            },
        ]
    );
}

#[test]
fn layout_constants_name_every_dimension() {
    let mut rec = Recorder::default();
    rec.layout(&layout_constants(&GameConfig::default()));
    let names: Vec<_> = rec.layout.iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        vec![
            "board-width",
            "board-height",
            "shooter-width",
            "shooter-height",
            "bullet-width",
            "bullet-height"
        ]
    );
    assert_eq!(rec.layout[1].value, 600.0);
}

// ── move_shooter ──────────────────────────────────────────────────────────────

#[test]
fn move_shooter_follows_pointer_x() {
    let (s, id) = make_state();
    let s2 = move_shooter(&s, id, Vector::new(250.0, 123.0)).state;
    let e = s2.entity(id).unwrap();
    assert_eq!(e.pos.x, 250.0);
    assert_eq!(e.pos.y, 30.0); // height never follows the pointer
}

#[test]
fn move_shooter_clamps_to_board_width() {
    let (s, id) = make_state();
    let left = move_shooter(&s, id, Vector::new(-80.0, 0.0)).state;
    assert_eq!(left.entity(id).unwrap().pos.x, 0.0);
    let right = move_shooter(&s, id, Vector::new(9000.0, 0.0)).state;
    assert_eq!(right.entity(id).unwrap().pos.x, 400.0);
}

#[test]
fn move_shooter_uses_measured_board_origin() {
    let (s, id) = make_state();
    let s = resize_board(&s, BoundingBox::new(10.0, 40.0, 400.0, 600.0)).state;
    let absolute = Vector::new(110.0, 300.0);
    let s2 = move_shooter(&s, id, absolute).state;
    let expected = s.board.clamp_to_bounds(s.board.to_relative(absolute)).x;
    assert_eq!(expected, 100.0);
    assert_eq!(s2.entity(id).unwrap().pos.x, expected);
}

#[test]
fn move_shooter_emits_one_place() {
    let (s, id) = make_state();
    let step = move_shooter(&s, id, Vector::new(100.0, 0.0));
    assert_eq!(
        step.commands,
        vec![RenderCommand::Place {
            id,
            offset: Vector::new(80.0, 10.0),
        }]
    );
}

#[test]
fn move_shooter_does_not_mutate_original() {
    let (s, id) = make_state();
    let _ = move_shooter(&s, id, Vector::new(10.0, 0.0));
    assert_eq!(s.entity(id).unwrap().pos.x, 200.0);
}

#[test]
fn move_unknown_shooter_is_ignored() {
    let (s, id) = make_state();
    let (s, bullet) = bullet_at(&s, id, Vector::new(5.0, 5.0));
    let step = move_shooter(&s, bullet, Vector::new(300.0, 0.0));
    assert!(step.commands.is_empty());
    assert_eq!(step.state.entity(bullet).unwrap().pos, Vector::new(5.0, 5.0));

    let step = move_shooter(&s, EntityId(999), Vector::new(300.0, 0.0));
    assert!(step.commands.is_empty());
}

// ── shoot ─────────────────────────────────────────────────────────────────────

#[test]
fn shoot_spawns_bullet_at_shooter_top() {
    let (s, id) = make_state();
    let s = move_shooter(&s, id, Vector::new(120.0, 0.0)).state;
    let step = shoot(&s, id);

    let bullets: Vec<_> = step.state.bullets().collect();
    assert_eq!(bullets.len(), 1);
    let b = bullets[0];
    assert_eq!(b.pos, Vector::new(120.0, 30.0 + 20.0));
    assert_eq!(b.size, Size::new(8.0, 8.0));
    assert_eq!(b.velocity, Velocity::new(0.0, 450.0));
    assert_eq!(step.state.lifecycle(b.id), Lifecycle::Live);
}

#[test]
fn shoot_spawns_exactly_one_bullet_per_call() {
    let (mut s, id) = make_state();
    for n in 1..=5 {
        s = shoot(&s, id).state;
        assert_eq!(s.bullets().count(), n);
    }
}

#[test]
fn shoot_does_not_touch_shooter() {
    let (s, id) = make_state();
    let before = s.entity(id).unwrap().clone();
    let step = shoot(&s, id);
    assert_eq!(step.state.entity(id).unwrap(), &before);
    assert!(step.commands.iter().all(|c| c.id() != id));
}

#[test]
fn shoot_emits_attach_then_place() {
    let (s, id) = make_state();
    let step = shoot(&s, id);
    assert_eq!(step.commands.len(), 2);
    let bullet = step.commands[0].id();
    assert!(matches!(
        step.commands[0],
        RenderCommand::Attach { kind: EntityKind::Bullet, .. }
    ));
    assert_eq!(
        step.commands[1],
        RenderCommand::Place {
            id: bullet,
            offset: Vector::new(196.0, 46.0),
        }
    );
}

#[test]
fn shoot_does_not_mutate_original() {
    let (s, id) = make_state();
    let _ = shoot(&s, id);
    assert_eq!(s.bullets().count(), 0);
}

#[test]
fn entity_ids_are_never_reused() {
    let (s, id) = make_state();
    let step = shoot(&s, id);
    let first = step.commands[0].id();
    let s = destroy(&step.state, first).state;
    let step = shoot(&s, id);
    assert_ne!(step.commands[0].id(), first);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_increments_counter() {
    let (s, _) = make_state();
    let s2 = tick(&s).state;
    assert_eq!(s2.tick_count, 1);
}

#[test]
fn tick_moves_bullet_up_by_one_interval() {
    let (s, id) = make_state();
    let (s, b) = bullet_at(&s, id, Vector::new(100.0, 100.0));
    let s2 = tick(&s).state;
    let pos = s2.entity(b).unwrap().pos;
    assert!(approx(pos.x, 100.0));
    assert!(approx(pos.y, 107.2));
}

#[test]
fn tick_rerenders_shooter_without_moving_it() {
    let (s, id) = make_state();
    let step = tick(&s);
    assert_eq!(step.state.entity(id).unwrap().pos, Vector::new(200.0, 30.0));
    assert_eq!(
        step.commands,
        vec![RenderCommand::Place {
            id,
            offset: Vector::new(180.0, 10.0),
        }]
    );
}

#[test]
fn bullet_flies_until_it_leaves_the_top() {
    let (s, id) = make_state();
    let (mut s, b) = bullet_at(&s, id, Vector::new(200.0, 590.0));
    let mut rec = Recorder::default();

    // 590 → 597.2: still on the board
    let step = tick(&s);
    rec.present_all(&step.commands);
    s = step.state;
    assert_eq!(s.lifecycle(b), Lifecycle::Live);
    assert!(approx(s.entity(b).unwrap().pos.y, 597.2));

    // 597.2 → 604.4: started the tick on the board, so it moves and renders
    let step = tick(&s);
    rec.present_all(&step.commands);
    s = step.state;
    assert_eq!(s.lifecycle(b), Lifecycle::Live);
    assert!(approx(s.entity(b).unwrap().pos.y, 604.4));

    // Off the board now → destroyed, no further movement
    let step = tick(&s);
    rec.present_all(&step.commands);
    s = step.state;
    assert_eq!(s.lifecycle(b), Lifecycle::Destroyed);
    assert!(s.entity(b).is_none());
    assert!(!s.scheduler.is_registered(b));

    let seen = rec.for_entity(b);
    assert_eq!(seen.len(), 3);
    assert!(matches!(seen[0], RenderCommand::Place { .. }));
    assert!(matches!(seen[1], RenderCommand::Place { .. }));
    assert_eq!(seen[2], &RenderCommand::Remove { id: b });

    // No render for the bullet after destruction
    for _ in 0..10 {
        let step = tick(&s);
        rec.present_all(&step.commands);
        s = step.state;
    }
    assert_eq!(rec.for_entity(b).len(), 3);
}

#[test]
fn bullet_from_shooter_eventually_leaves() {
    let (s, id) = make_state();
    let step = shoot(&s, id);
    let b = step.commands[0].id();
    let mut s = step.state;
    // (600 - 50) / 7.2 ≈ 77 ticks to reach the top
    for _ in 0..100 {
        s = tick(&s).state;
    }
    assert_eq!(s.lifecycle(b), Lifecycle::Destroyed);
    assert_eq!(s.bullets().count(), 0);
    assert_eq!(s.lifecycle(id), Lifecycle::Live);
}

#[test]
fn bullet_exits_sooner_on_smaller_measured_board() {
    let (s, id) = make_state();
    let s = resize_board(&s, BoundingBox::new(10.0, 40.0, 180.0, 120.0)).state;
    let (mut s, b) = bullet_at(&s, id, Vector::new(90.0, 119.0));
    s = tick(&s).state; // 119 → 126.2
    assert_eq!(s.lifecycle(b), Lifecycle::Live);
    s = tick(&s).state;
    assert_eq!(s.lifecycle(b), Lifecycle::Destroyed);
}

#[test]
fn tick_does_not_mutate_original() {
    let (s, id) = make_state();
    let (s, b) = bullet_at(&s, id, Vector::new(50.0, 50.0));
    let _ = tick(&s);
    assert_eq!(s.entity(b).unwrap().pos, Vector::new(50.0, 50.0));
    assert_eq!(s.tick_count, 0);
}

// ── destroy ───────────────────────────────────────────────────────────────────

#[test]
fn destroy_removes_and_unregisters() {
    let (s, id) = make_state();
    let (s, b) = bullet_at(&s, id, Vector::new(50.0, 50.0));
    let step = destroy(&s, b);
    assert_eq!(step.commands, vec![RenderCommand::Remove { id: b }]);
    assert!(step.state.entity(b).is_none());
    assert_eq!(step.state.lifecycle(b), Lifecycle::Destroyed);
}

#[test]
fn destroy_is_idempotent() {
    let (s, id) = make_state();
    let (s, b) = bullet_at(&s, id, Vector::new(50.0, 50.0));
    let once = destroy(&s, b).state;
    let twice = destroy(&once, b);
    assert!(twice.commands.is_empty());
    assert_eq!(twice.state.scheduler.len(), once.scheduler.len());
}

#[test]
fn no_render_after_destroy() {
    let (s, id) = make_state();
    let (s, b) = bullet_at(&s, id, Vector::new(50.0, 50.0));
    let mut rec = Recorder::default();

    let step = destroy(&s, b);
    rec.present_all(&step.commands);
    let mut s = step.state;
    for _ in 0..20 {
        let step = tick(&s);
        rec.present_all(&step.commands);
        s = step.state;
    }
    assert_eq!(rec.for_entity(b), vec![&RenderCommand::Remove { id: b }]);
}

#[test]
fn destroying_shooter_drops_it_from_roster() {
    let (s, id) = make_state();
    let s = destroy(&s, id).state;
    assert!(s.board.shooters().is_empty());
    assert!(shoot(&s, id).commands.is_empty());
}

// ── several shooters ──────────────────────────────────────────────────────────

#[test]
fn spawn_shooter_adds_to_roster() {
    let (s, first) = make_state();
    let (step, second) = spawn_shooter(&s);
    assert_ne!(first, second);
    assert_eq!(step.state.board.shooters(), &[first, second]);
    assert_eq!(step.state.shooters().count(), 2);

    // Each shooter moves independently
    let s = move_shooter(&step.state, second, Vector::new(40.0, 0.0)).state;
    assert_eq!(s.entity(first).unwrap().pos.x, 200.0);
    assert_eq!(s.entity(second).unwrap().pos.x, 40.0);
}

// ── resize_board ──────────────────────────────────────────────────────────────

#[test]
fn resize_with_same_bounds_is_a_no_op() {
    let (s, _) = make_state();
    let bounds = s.board.bounds();
    let step = resize_board(&s, bounds);
    assert!(step.commands.is_empty());
    assert_eq!(step.state.board.bounds(), bounds);
}

// ── press ─────────────────────────────────────────────────────────────────────

#[test]
fn press_moves_then_shoots_from_pointer_x() {
    let (s, id) = make_state();
    let step = press(&s, id, Vector::new(75.0, 10.0));
    assert_eq!(step.state.entity(id).unwrap().pos.x, 75.0);
    let bullets: Vec<_> = step.state.bullets().collect();
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].pos, Vector::new(75.0, 50.0));

    // Place for the shooter, then Attach + Place for the bullet
    assert_eq!(step.commands.len(), 3);
    assert_eq!(step.commands[0].id(), id);
    assert_eq!(step.commands[1].id(), bullets[0].id);
}

#[test]
fn press_outside_board_fires_from_clamped_x() {
    let (s, id) = make_state();
    let step = press(&s, id, Vector::new(-300.0, 10.0));
    let b = step.state.bullets().next().unwrap();
    assert_eq!(b.pos.x, 0.0);
    assert_eq!(step.state.entity(id).unwrap().pos.x, 0.0);
}

#[test]
fn press_with_unknown_shooter_does_nothing() {
    let (s, _) = make_state();
    let step = press(&s, EntityId(42), Vector::new(75.0, 10.0));
    assert!(step.commands.is_empty());
    assert_eq!(step.state.bullets().count(), 0);
}

// ── resize_board clamps shooters ──────────────────────────────────────────────

#[test]
fn shrinking_board_pulls_shooter_back_inside() {
    let (s, id) = make_state(); // shooter at x = 200
    let step = resize_board(&s, BoundingBox::new(10.0, 40.0, 180.0, 120.0));
    let pos = step.state.entity(id).unwrap().pos;
    assert_eq!(pos, Vector::new(180.0, 30.0));
    assert!(step.state.board.is_within_bounds(pos));
    assert_eq!(
        step.commands,
        vec![RenderCommand::Place {
            id,
            offset: Vector::new(160.0, 10.0),
        }]
    );
}

#[test]
fn growing_board_leaves_shooter_alone() {
    let (s, id) = make_state();
    let step = resize_board(&s, BoundingBox::new(10.0, 40.0, 800.0, 900.0));
    assert_eq!(step.state.entity(id).unwrap().pos, Vector::new(200.0, 30.0));
    assert!(step.commands.is_empty());
}

#[test]
fn shrinking_board_does_not_move_bullets() {
    let (s, id) = make_state();
    let (s, b) = bullet_at(&s, id, Vector::new(300.0, 300.0));
    let step = resize_board(&s, BoundingBox::new(10.0, 40.0, 180.0, 120.0));
    assert_eq!(step.state.entity(b).unwrap().pos, Vector::new(300.0, 300.0));
}
