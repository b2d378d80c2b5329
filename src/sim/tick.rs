//! Arena transitions
//!
//! Pointer input and elapsed time both funnel through here. Pointer moves
//! drive evade mode directly; chase mode and abilities run off the arena's
//! timer queue, which `advance` steps forward.

use glam::Vec2;

use super::inventory::{DragPreview, DropOutcome};
use super::motion::{ChaseDecision, EvadeDecision, MotionContext, chase_step, evade_step, pointer_distance_px};
use super::obstacle::ShapeKind;
use super::state::{ArenaState, ArenaTimer, GameEvent, GameMode, GamePhase};
use crate::px_to_percent;

/// Raw input forwarded by the rendering surface
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Surface (re)sized, pixels
    Resize { width: f32, height: f32 },
    /// Pointer moved, viewport pixels
    PointerMove { x: f32, y: f32 },
    /// Pressed on a palette item
    PaletteDown { kind: ShapeKind, x: f32, y: f32 },
    /// Pointer released anywhere
    PointerUp { x: f32, y: f32 },
    /// Rotate the dragged shape
    RotateDrag,
    /// Clicked the target itself
    TargetClick,
    SwitchRoles,
    CloseModal,
}

/// Apply one input event
pub fn apply_input(state: &mut ArenaState, input: &InputEvent) {
    match *input {
        InputEvent::Resize { width, height } => set_viewport(state, width, height),
        InputEvent::PointerMove { x, y } => pointer_move(state, Vec2::new(x, y)),
        InputEvent::PaletteDown { kind, x, y } => {
            begin_drag(state, kind, Vec2::new(x, y));
        }
        InputEvent::PointerUp { x, y } => {
            release_drag(state, Vec2::new(x, y));
        }
        InputEvent::RotateDrag => rotate_drag(state),
        InputEvent::TargetClick => click_target(state),
        InputEvent::SwitchRoles => switch_roles(state),
        InputEvent::CloseModal => close_modal(state),
    }
}

/// Record the surface size. Motion stays suspended until this is known.
pub fn set_viewport(state: &mut ArenaState, width: f32, height: f32) {
    if width <= 0.0 || height <= 0.0 {
        log::debug!("Ignoring degenerate viewport {}x{}", width, height);
        return;
    }
    state.viewport = Some(Vec2::new(width, height));
}

/// Handle a pointer move (viewport pixels)
pub fn pointer_move(state: &mut ArenaState, pointer: Vec2) {
    state.pointer_px = Some(pointer);

    if let Some(drag) = state.drag.as_mut() {
        drag.pos = pointer;
        return;
    }
    if state.is_captured() || state.mode != GameMode::Evade {
        return;
    }

    let Some(distance) = MotionContext::from_state(state)
        .map(|ctx| pointer_distance_px(state.position, pointer, &ctx))
    else {
        return;
    };

    // Abilities first: a shrink changes the footprint the move is tested with
    if let Some(event) = state
        .abilities
        .try_trigger(distance, &state.tuning, &mut state.timers)
    {
        state.emit(event);
    }

    let Some(ctx) = MotionContext::from_state(state) else {
        return;
    };
    let decision = evade_step(
        state.position,
        pointer,
        state.tuning.evade_threshold_px,
        state.tuning.evade_step_pct,
        &ctx,
    );

    match decision {
        EvadeDecision::OutOfRange => {}
        EvadeDecision::Moved(to) => move_target(state, to),
        EvadeDecision::Blocked => {
            log::debug!("Evade blocked on every bearing");
            state.emit(GameEvent::MoveBlocked);
        }
    }
}

fn move_target(state: &mut ArenaState, to: Vec2) {
    let from = state.position;
    state.position = state.clamp_position(to);
    state.emit(GameEvent::TargetMoved {
        from,
        to: state.position,
    });
}

/// Direct click on the target. Only catches it in evade mode.
pub fn click_target(state: &mut ArenaState) {
    if state.mode == GameMode::Evade && !state.is_captured() {
        capture(state);
    }
}

fn capture(state: &mut ArenaState) {
    state.phase = GamePhase::Captured;
    log::info!("Captured in {} mode at {:.1}ms", state.mode.as_str(), state.now_ms());
    state.emit(GameEvent::Captured { mode: state.mode });
}

/// Advance the arena clock by `dt_ms`, firing due timers in order.
///
/// The clock is frozen while captured; a capture raised mid-advance stops the
/// clock at the capture time.
pub fn advance(state: &mut ArenaState, dt_ms: f64) {
    if state.is_captured() || dt_ms <= 0.0 {
        return;
    }
    let until = state.now_ms() + dt_ms;

    while let Some((id, timer)) = state.timers.pop_due(until) {
        match timer {
            ArenaTimer::ChaseTick => {
                chase_tick(state);
                if state.is_captured() {
                    return;
                }
            }
            other => {
                if let Some(event) =
                    state
                        .abilities
                        .on_timer(id, other, &state.tuning, &mut state.timers)
                {
                    state.emit(event);
                }
            }
        }
    }
    state.timers.advance_to(until);
}

/// One chase-mode step toward the last known pointer
fn chase_tick(state: &mut ArenaState) {
    if state.mode != GameMode::Chase {
        return;
    }
    let (Some(pointer), Some(viewport)) = (state.pointer_px, state.viewport) else {
        return;
    };
    let Some(ctx) = MotionContext::from_state(state) else {
        return;
    };

    let decision = chase_step(
        state.position,
        px_to_percent(pointer, viewport),
        state.tuning.chase_step_pct,
        state.tuning.chase_capture_pct,
        &ctx,
    );

    match decision {
        ChaseDecision::Capture => capture(state),
        ChaseDecision::Moved(to) => move_target(state, to),
        ChaseDecision::Blocked => state.emit(GameEvent::MoveBlocked),
    }
}

/// Swap roles: flip the mode, reset both abilities and resume play
pub fn switch_roles(state: &mut ArenaState) {
    state.abilities.reset(&mut state.timers);
    if let Some(id) = state.chase_tick.take() {
        state.timers.cancel(id);
    }

    state.mode = state.mode.flipped();
    state.phase = GamePhase::Playing;

    arm_chase_tick(state);

    log::info!("Roles switched, now {}", state.mode.as_str());
    state.emit(GameEvent::ModeSwitched { mode: state.mode });
}

/// Schedule the 20 Hz chase tick if chase mode has none pending
fn arm_chase_tick(state: &mut ArenaState) {
    if state.mode != GameMode::Chase {
        return;
    }
    if state.chase_tick.is_some_and(|id| state.timers.is_pending(id)) {
        return;
    }
    let period = state.tuning.chase_tick_ms;
    state.chase_tick = Some(
        state
            .timers
            .schedule_repeating(period, period, ArenaTimer::ChaseTick),
    );
}

/// Re-arm the chase tick after a `teardown` (page restored from cache).
/// A no-op in evade mode or when the tick is still pending.
pub fn resume(state: &mut ArenaState) {
    let armed = state.chase_tick.is_some();
    arm_chase_tick(state);
    if !armed && state.chase_tick.is_some() {
        log::info!("Chase tick re-armed at {:.1}ms", state.now_ms());
    }
}

/// Dismiss the capture modal without changing roles
pub fn close_modal(state: &mut ArenaState) {
    if state.is_captured() {
        state.phase = GamePhase::Playing;
        state.emit(GameEvent::ModalClosed);
    }
}

/// Start dragging a palette item. Returns false when out of stock or already dragging.
pub fn begin_drag(state: &mut ArenaState, kind: ShapeKind, pointer: Vec2) -> bool {
    if state.is_dragging() {
        log::debug!("Drag already in progress");
        return false;
    }
    if !state.inventory.has(kind) {
        log::debug!("No {} left to drag", kind.as_str());
        return false;
    }
    state.drag = Some(DragPreview::new(kind, pointer));
    true
}

/// Rotate the dragged preview a quarter turn
pub fn rotate_drag(state: &mut ArenaState) {
    if let Some(drag) = state.drag.as_mut() {
        drag.rotate_quarter();
    }
}

/// Finish a drag. Drops above the inventory bar become obstacles.
pub fn release_drag(state: &mut ArenaState, pointer: Vec2) -> DropOutcome {
    let Some(drag) = state.drag.take() else {
        return DropOutcome::NoDrag;
    };

    let above_bar = state
        .drop_boundary_y()
        .is_some_and(|boundary| pointer.y < boundary);

    if !above_bar || !state.inventory.take(drag.kind) {
        log::debug!("Discarded {} drop at ({}, {})", drag.kind.as_str(), pointer.x, pointer.y);
        state.emit(GameEvent::DragDiscarded { kind: drag.kind });
        return DropOutcome::Discarded;
    }

    let id = state.obstacles.place(drag.kind, pointer, drag.rotation);
    log::info!(
        "Placed {} #{} at ({}, {}), {} left",
        drag.kind.as_str(),
        id,
        pointer.x,
        pointer.y,
        state.inventory.remaining(drag.kind)
    );
    state.emit(GameEvent::ObstaclePlaced { id, kind: drag.kind });
    DropOutcome::Placed { id }
}

/// Cancel every pending timer (page unload)
pub fn teardown(state: &mut ArenaState) {
    state.abilities.reset(&mut state.timers);
    state.chase_tick = None;
    state.timers.clear();
}
