//! Arena state and core simulation types
//!
//! Everything the arena mutates during a session lives in [`ArenaState`].
//! Transitions are applied by the functions in `sim::tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::abilities::{Abilities, AbilityKind};
use super::collision::Rect;
use super::inventory::{DragPreview, Inventory};
use super::obstacle::{ObstacleRegistry, ShapeKind};
use super::timers::{TimerId, TimerQueue};
use crate::percent_to_px;
use crate::tuning::Tuning;

/// Who is chasing whom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Target runs from the pointer
    #[default]
    Evade,
    /// Target hunts the pointer
    Chase,
}

impl GameMode {
    pub fn flipped(self) -> Self {
        match self {
            GameMode::Evade => GameMode::Chase,
            GameMode::Chase => GameMode::Evade,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Evade => "evade",
            GameMode::Chase => "chase",
        }
    }
}

/// Round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Capture modal is open; motion and timers are frozen
    Captured,
}

/// Timer payloads scheduled on the arena clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaTimer {
    AbilityExpired(AbilityKind),
    AbilityReady(AbilityKind),
    /// Translucency flicker on
    PulseOn,
    /// Translucency flicker off
    PulseOff,
    /// Chase mode step (20 Hz)
    ChaseTick,
}

/// Things that happened, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TargetMoved { from: Vec2, to: Vec2 },
    /// Every candidate bearing (or the chase step) was blocked
    MoveBlocked,
    AbilityActivated(AbilityKind),
    AbilityDeactivated(AbilityKind),
    AbilityReady(AbilityKind),
    Captured { mode: GameMode },
    ObstaclePlaced { id: u32, kind: ShapeKind },
    DragDiscarded { kind: ShapeKind },
    ModeSwitched { mode: GameMode },
    ModalClosed,
}

/// Complete arena state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaState {
    pub tuning: Tuning,
    pub mode: GameMode,
    pub phase: GamePhase,
    /// Target center, percent of viewport
    pub position: Vec2,
    /// Last pointer position, viewport pixels
    pub pointer_px: Option<Vec2>,
    /// Viewport size in pixels. None until the surface reports its geometry.
    pub viewport: Option<Vec2>,
    pub obstacles: ObstacleRegistry,
    pub inventory: Inventory,
    pub drag: Option<DragPreview>,
    pub abilities: Abilities,
    pub timers: TimerQueue<ArenaTimer>,
    /// Repeating chase step, present only in chase mode
    pub chase_tick: Option<TimerId>,
    /// Pending events for the presentation layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for ArenaState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl ArenaState {
    pub fn new(tuning: Tuning) -> Self {
        let position = Vec2::new(crate::consts::START_X_PCT, crate::consts::START_Y_PCT);
        let inventory = Inventory::new(tuning.starting_stock.clone());
        let mut state = Self {
            tuning,
            mode: GameMode::Evade,
            phase: GamePhase::Playing,
            position,
            pointer_px: None,
            viewport: None,
            obstacles: ObstacleRegistry::new(),
            inventory,
            drag: None,
            abilities: Abilities::default(),
            timers: TimerQueue::new(),
            chase_tick: None,
            events: Vec::new(),
        };
        state.position = state.clamp_position(position);
        state
    }

    /// Clamp a percent position into the playable area
    pub fn clamp_position(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(self.tuning.min_x_pct, self.tuning.max_x_pct),
            pos.y.clamp(self.tuning.min_y_pct, self.tuning.max_y_pct),
        )
    }

    /// Rendered target size at the current scale (px)
    pub fn target_size(&self) -> Vec2 {
        Vec2::new(self.tuning.target_width_px, self.tuning.target_height_px) * self.abilities.scale
    }

    /// Target bounding box if it were centered at `pos` (percent)
    pub fn target_rect_at(&self, pos: Vec2) -> Option<Rect> {
        let viewport = self.viewport?;
        Some(Rect::from_center(percent_to_px(pos, viewport), self.target_size()))
    }

    /// Current target bounding box; None while geometry is unknown
    pub fn target_rect(&self) -> Option<Rect> {
        self.target_rect_at(self.position)
    }

    /// Vertical pixel line above which drops are committed
    pub fn drop_boundary_y(&self) -> Option<f32> {
        self.viewport
            .map(|v| v.y - self.tuning.inventory_bar_height_px)
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.phase == GamePhase::Captured
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Current simulated time (ms)
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.timers.now()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = ArenaState::default();
        assert_eq!(state.mode, GameMode::Evade);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.position, Vec2::new(50.0, 50.0));
        assert!(state.obstacles.is_empty());
        assert!(state.target_rect().is_none());
    }

    #[test]
    fn test_clamp_position() {
        let state = ArenaState::default();
        assert_eq!(state.clamp_position(Vec2::new(-10.0, 200.0)), Vec2::new(5.0, 85.0));
        assert_eq!(state.clamp_position(Vec2::new(99.0, 1.0)), Vec2::new(95.0, 5.0));
    }

    #[test]
    fn test_target_rect_follows_scale() {
        let mut state = ArenaState::default();
        state.viewport = Some(Vec2::new(1000.0, 800.0));

        let rect = state.target_rect().expect("viewport known");
        assert_eq!(rect.center(), Vec2::new(500.0, 400.0));
        assert_eq!(rect.size(), Vec2::new(110.0, 44.0));

        state.abilities.scale = 0.5;
        let rect = state.target_rect().expect("viewport known");
        assert_eq!(rect.size(), Vec2::new(55.0, 22.0));
    }

    #[test]
    fn test_drop_boundary() {
        let mut state = ArenaState::default();
        assert_eq!(state.drop_boundary_y(), None);
        state.viewport = Some(Vec2::new(1000.0, 800.0));
        assert_eq!(state.drop_boundary_y(), Some(680.0));
    }

    #[test]
    fn test_mode_flip() {
        assert_eq!(GameMode::Evade.flipped(), GameMode::Chase);
        assert_eq!(GameMode::Chase.flipped(), GameMode::Evade);
    }
}
