//! Catch Me - a button that runs away from your pointer (or hunts it down)
//!
//! Core modules:
//! - `sim`: Arena simulation (motion policy, obstacles, abilities, timers)
//! - `tuning`: Data-driven game balance
//! - `ui`: DOM presentation (web only)

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Evade mode: pointer closer than this (px) pushes the target away
    pub const EVADE_THRESHOLD_PX: f32 = 150.0;
    /// Evade jump length (percentage points)
    pub const EVADE_STEP_PCT: f32 = 15.0;

    /// Chase mode tick period (20 Hz)
    pub const CHASE_TICK_MS: f64 = 50.0;
    /// Chase step length (percentage points)
    pub const CHASE_STEP_PCT: f32 = 7.0;
    /// Chase capture radius (percentage points)
    pub const CHASE_CAPTURE_PCT: f32 = 5.0;

    /// Target clamp bounds (percent of viewport). Bottom leaves room for the inventory bar.
    pub const MIN_X_PCT: f32 = 5.0;
    pub const MAX_X_PCT: f32 = 95.0;
    pub const MIN_Y_PCT: f32 = 5.0;
    pub const MAX_Y_PCT: f32 = 85.0;

    /// Target starts centered
    pub const START_X_PCT: f32 = 50.0;
    pub const START_Y_PCT: f32 = 50.0;

    /// Rendered button size at scale 1.0 (px)
    pub const TARGET_WIDTH_PX: f32 = 110.0;
    pub const TARGET_HEIGHT_PX: f32 = 44.0;

    /// Every obstacle collides as a square of this side, whatever its shape
    pub const OBSTACLE_SIZE_PX: f32 = 100.0;
    /// Inventory bar height (px) - drops inside it are discarded
    pub const INVENTORY_BAR_HEIGHT_PX: f32 = 120.0;

    /// Shrink ability
    pub const SHRINK_TRIGGER_PX: f32 = 100.0;
    pub const SHRINK_SCALE: f32 = 0.4;
    pub const SHRINK_ACTIVE_MS: f64 = 3000.0;
    pub const SHRINK_COOLDOWN_MS: f64 = 8000.0;

    /// Translucency ability - triggers in [min, max) px
    pub const TRANSLUCENT_MIN_PX: f32 = 100.0;
    pub const TRANSLUCENT_MAX_PX: f32 = 130.0;
    pub const TRANSLUCENT_ACTIVE_MS: f64 = 4000.0;
    pub const TRANSLUCENT_COOLDOWN_MS: f64 = 10000.0;
    pub const PULSE_PERIOD_MS: f64 = 800.0;
    pub const PULSE_ON_MS: f64 = 200.0;
    pub const PULSE_OPACITY: f32 = 0.15;

    /// Longest frame delta fed to the arena (tab switches, debugger pauses)
    pub const MAX_FRAME_MS: f64 = 100.0;
}

/// Percent-of-viewport position to pixels
#[inline]
pub fn percent_to_px(pct: Vec2, viewport: Vec2) -> Vec2 {
    pct * viewport / 100.0
}

/// Pixels to percent-of-viewport position
#[inline]
pub fn px_to_percent(px: Vec2, viewport: Vec2) -> Vec2 {
    px / viewport * 100.0
}

/// Unit vector for a bearing (radians, screen coordinates: +y points down)
#[inline]
pub fn bearing_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
