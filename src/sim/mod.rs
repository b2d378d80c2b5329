//! Arena simulation module
//!
//! All gameplay logic lives here. This module must stay free of DOM and
//! platform dependencies:
//! - Positions in percent of viewport, geometry in pixels
//! - Time only from the arena's own timer queue
//! - Obstacles iterated in placement order

pub mod abilities;
pub mod collision;
pub mod inventory;
pub mod motion;
pub mod obstacle;
pub mod state;
pub mod tick;
pub mod timers;

pub use abilities::{Abilities, Ability, AbilityKind, AbilityPhase};
pub use collision::{Rect, collides_with_any, first_collision, obstacle_rect};
pub use inventory::{DragPreview, DropOutcome, Inventory};
pub use motion::{
    ALTERNATE_BEARINGS, ChaseDecision, EvadeDecision, MotionContext, chase_step, choose_escape,
    evade_step,
};
pub use obstacle::{Obstacle, ObstacleRegistry, ShapeKind};
pub use state::{ArenaState, ArenaTimer, GameEvent, GameMode, GamePhase};
pub use tick::{
    InputEvent, advance, apply_input, begin_drag, click_target, close_modal, pointer_move,
    release_drag, resume, rotate_drag, set_viewport, switch_roles, teardown,
};
pub use timers::{TimerId, TimerQueue};
