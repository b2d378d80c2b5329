// Scenario tests for the arena controller, driven the way the web frontend
// drives it: raw pointer coordinates plus elapsed milliseconds.

use std::collections::BTreeMap;

use catch_me::Tuning;
use catch_me::sim::*;
use glam::Vec2;

const VIEWPORT: Vec2 = Vec2::new(1000.0, 800.0);

fn arena_with(tuning: Tuning) -> ArenaState {
    let mut state = ArenaState::new(tuning);
    set_viewport(&mut state, VIEWPORT.x, VIEWPORT.y);
    state
}

fn arena() -> ArenaState {
    arena_with(Tuning::default())
}

fn target_center(state: &ArenaState) -> Vec2 {
    state.target_rect().expect("viewport set").center()
}

/// Point the pointer `offset` px from the current target center
fn point_near(state: &mut ArenaState, offset: Vec2) {
    let pointer = target_center(state) + offset;
    pointer_move(state, pointer);
}

fn moves(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::TargetMoved { .. }))
        .count()
}

#[test]
fn evade_moves_once_and_increases_distance() {
    for angle_deg in [0.0f32, 37.0, 90.0, 160.0, 200.0, 300.0] {
        let mut state = arena();
        state.drain_events();

        let offset = Vec2::from_angle(angle_deg.to_radians()) * 140.0;
        let pointer = target_center(&state) + offset;
        pointer_move(&mut state, pointer);

        let events = state.drain_events();
        assert_eq!(moves(&events), 1, "angle {}", angle_deg);
        let after = target_center(&state).distance(pointer);
        assert!(after > 140.0, "angle {}: distance {} did not grow", angle_deg, after);
    }
}

#[test]
fn evade_ignores_distant_pointer() {
    let mut state = arena();
    point_near(&mut state, Vec2::new(150.0, 0.0));
    assert_eq!(state.position, Vec2::new(50.0, 50.0));
    assert_eq!(moves(&state.drain_events()), 0);
}

#[test]
fn blocked_evade_leaves_position_unchanged() {
    let tuning = Tuning {
        starting_stock: BTreeMap::from([(ShapeKind::Circle, 30)]),
        ..Tuning::default()
    };
    let mut state = arena_with(tuning);

    // Surround the target so every bearing lands on an obstacle
    let center = target_center(&state);
    for dx in [-150.0f32, -75.0, 0.0, 75.0, 150.0] {
        for dy in [-120.0f32, -60.0, 0.0, 60.0, 120.0] {
            if dx == 0.0 && dy == 0.0 {
                continue;
            }
            assert!(begin_drag(&mut state, ShapeKind::Circle, Vec2::new(40.0, 760.0)));
            release_drag(&mut state, center + Vec2::new(dx, dy));
        }
    }
    assert_eq!(state.obstacles.len(), 24);
    state.drain_events();

    point_near(&mut state, Vec2::new(-140.0, 0.0));
    assert_eq!(state.position, Vec2::new(50.0, 50.0));
    assert!(state.drain_events().contains(&GameEvent::MoveBlocked));
}

#[test]
fn drag_straight_onto_arena() {
    let tuning = Tuning {
        starting_stock: BTreeMap::from([(ShapeKind::Straight, 1)]),
        ..Tuning::default()
    };
    let mut state = arena_with(tuning);

    assert!(begin_drag(&mut state, ShapeKind::Straight, Vec2::new(60.0, 740.0)));
    pointer_move(&mut state, Vec2::new(300.0, 500.0));
    pointer_move(&mut state, Vec2::new(400.0, 300.0));
    let outcome = release_drag(&mut state, Vec2::new(400.0, 300.0));

    assert!(matches!(outcome, DropOutcome::Placed { .. }));
    assert_eq!(state.obstacles.len(), 1);
    assert_eq!(state.obstacles.as_slice()[0].pos, Vec2::new(400.0, 300.0));
    assert_eq!(state.obstacles.as_slice()[0].kind, ShapeKind::Straight);
    assert_eq!(state.inventory.remaining(ShapeKind::Straight), 0);

    // Out of stock now: nothing further can be dragged
    assert!(!begin_drag(&mut state, ShapeKind::Straight, Vec2::new(60.0, 740.0)));
    assert_eq!(release_drag(&mut state, Vec2::new(200.0, 200.0)), DropOutcome::NoDrag);
    assert_eq!(state.obstacles.len(), 1);
    assert_eq!(state.inventory.remaining(ShapeKind::Straight), 0);
}

#[test]
fn shrink_timeline() {
    let mut state = arena();
    point_near(&mut state, Vec2::new(80.0, 0.0));

    assert!(state.abilities.shrink.is_active());
    assert!(!state.abilities.shrink.is_available());
    assert_eq!(state.abilities.scale, 0.4);

    advance(&mut state, 3001.0);
    assert!(!state.abilities.shrink.is_active());
    assert!(!state.abilities.shrink.is_available());
    assert_eq!(state.abilities.scale, 1.0);

    advance(&mut state, 11001.0 - 3001.0);
    assert!(state.abilities.shrink.is_available());
}

#[test]
fn shrink_cannot_retrigger_inside_lockout() {
    let mut state = arena();
    point_near(&mut state, Vec2::new(80.0, 0.0));
    state.drain_events();

    // Hold the pointer close for the whole lockout, sampling every 250ms
    for _ in 0..43 {
        advance(&mut state, 250.0);
        point_near(&mut state, Vec2::new(60.0, 0.0));
        assert!(
            !state
                .drain_events()
                .contains(&GameEvent::AbilityActivated(AbilityKind::Shrink)),
            "re-triggered at {}ms",
            state.now_ms()
        );
    }
    assert_eq!(state.now_ms(), 10_750.0);

    advance(&mut state, 251.0);
    assert!(state.abilities.shrink.is_available());
    point_near(&mut state, Vec2::new(60.0, 0.0));
    assert!(state.abilities.shrink.is_active());
}

#[test]
fn translucency_flickers_then_recovers() {
    let mut state = arena();
    point_near(&mut state, Vec2::new(0.0, 115.0));

    assert!(state.abilities.translucency.is_active());
    assert!(!state.abilities.shrink.is_active());

    advance(&mut state, 300.0);
    assert_eq!(state.abilities.opacity, 0.0);
    advance(&mut state, 550.0); // 850
    assert_eq!(state.abilities.opacity, 0.15);

    advance(&mut state, 4001.0 - 850.0);
    assert!(!state.abilities.translucency.is_active());
    assert_eq!(state.abilities.opacity, 1.0);

    advance(&mut state, 14_001.0 - 4001.0);
    assert!(state.abilities.translucency.is_available());
}

#[test]
fn translucency_cannot_retrigger_inside_lockout() {
    let mut state = arena();
    point_near(&mut state, Vec2::new(0.0, 115.0));
    assert!(state.abilities.translucency.is_active());
    state.drain_events();

    // Hold the pointer inside the band for the whole lockout, sampling every 250ms
    for _ in 0..55 {
        advance(&mut state, 250.0);
        point_near(&mut state, Vec2::new(0.0, 115.0));
        assert!(
            !state
                .drain_events()
                .contains(&GameEvent::AbilityActivated(AbilityKind::Translucency)),
            "re-triggered at {}ms",
            state.now_ms()
        );
    }
    assert_eq!(state.now_ms(), 13_750.0);
    assert!(!state.abilities.shrink.is_active());

    advance(&mut state, 251.0);
    assert!(state.abilities.translucency.is_available());
    point_near(&mut state, Vec2::new(0.0, 115.0));
    assert!(state.abilities.translucency.is_active());
}

#[test]
fn chase_capture_then_role_switch() {
    let mut state = arena();
    point_near(&mut state, Vec2::new(80.0, 0.0)); // shrink becomes active
    switch_roles(&mut state);
    assert_eq!(state.mode, GameMode::Chase);
    assert!(state.abilities.shrink.is_available());

    // Pointer 3% away from the target: caught on the next tick
    let pointer = target_center(&state) + Vec2::new(30.0, 0.0);
    pointer_move(&mut state, pointer);
    advance(&mut state, 50.0);
    assert!(state.is_captured());
    assert!(state
        .drain_events()
        .contains(&GameEvent::Captured { mode: GameMode::Chase }));

    switch_roles(&mut state);
    assert_eq!(state.mode, GameMode::Evade);
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(!state.abilities.shrink.is_active());
    assert!(!state.abilities.translucency.is_active());
    assert!(state.abilities.shrink.is_available());
    assert!(state.abilities.translucency.is_available());
}

#[test]
fn chase_blocked_by_obstacle_stays_put() {
    let mut state = arena();
    switch_roles(&mut state);

    // Wall directly between target (500,400) and pointer
    begin_drag(&mut state, ShapeKind::Vertical, Vec2::ZERO);
    release_drag(&mut state, Vec2::new(600.0, 400.0));
    pointer_move(&mut state, Vec2::new(900.0, 400.0));

    advance(&mut state, 500.0);
    assert_eq!(state.position, Vec2::new(50.0, 50.0));
    assert!(!state.is_captured());
}

#[test]
fn stale_timers_do_not_survive_role_switch() {
    let mut state = arena();
    point_near(&mut state, Vec2::new(80.0, 0.0));
    advance(&mut state, 1000.0);

    switch_roles(&mut state);
    switch_roles(&mut state);
    advance(&mut state, 1000.0);

    // Fresh trigger at t=2000; the cancelled expiry at t=3000 must not end it
    point_near(&mut state, Vec2::new(80.0, 0.0));
    advance(&mut state, 1500.0);
    assert!(state.abilities.shrink.is_active());

    advance(&mut state, 1501.0);
    assert!(!state.abilities.shrink.is_active());
}
