//! Data-driven game balance
//!
//! Every gameplay number the arena uses comes from a [`Tuning`]. Defaults
//! mirror [`crate::consts`]; a page can override any subset with JSON.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ShapeKind;

/// Errors raised while loading tuning overrides
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// JSON could not be parsed
    Parse(String),
    /// Parsed values are unusable
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TuningError::Parse(msg) => write!(f, "Tuning parse error: {}", msg),
            TuningError::Invalid(msg) => write!(f, "Invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for TuningError {}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err.to_string())
    }
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Evade ===
    pub evade_threshold_px: f32,
    pub evade_step_pct: f32,

    // === Chase ===
    pub chase_tick_ms: f64,
    pub chase_step_pct: f32,
    pub chase_capture_pct: f32,

    // === Arena geometry ===
    pub min_x_pct: f32,
    pub max_x_pct: f32,
    pub min_y_pct: f32,
    pub max_y_pct: f32,
    pub target_width_px: f32,
    pub target_height_px: f32,
    pub obstacle_size_px: f32,
    pub inventory_bar_height_px: f32,

    // === Shrink ===
    pub shrink_trigger_px: f32,
    pub shrink_scale: f32,
    pub shrink_active_ms: f64,
    pub shrink_cooldown_ms: f64,

    // === Translucency ===
    pub translucent_min_px: f32,
    pub translucent_max_px: f32,
    pub translucent_active_ms: f64,
    pub translucent_cooldown_ms: f64,
    pub pulse_period_ms: f64,
    pub pulse_on_ms: f64,
    pub pulse_opacity: f32,

    /// Obstacles available in the palette at the start of a session
    pub starting_stock: BTreeMap<ShapeKind, u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            evade_threshold_px: EVADE_THRESHOLD_PX,
            evade_step_pct: EVADE_STEP_PCT,

            chase_tick_ms: CHASE_TICK_MS,
            chase_step_pct: CHASE_STEP_PCT,
            chase_capture_pct: CHASE_CAPTURE_PCT,

            min_x_pct: MIN_X_PCT,
            max_x_pct: MAX_X_PCT,
            min_y_pct: MIN_Y_PCT,
            max_y_pct: MAX_Y_PCT,
            target_width_px: TARGET_WIDTH_PX,
            target_height_px: TARGET_HEIGHT_PX,
            obstacle_size_px: OBSTACLE_SIZE_PX,
            inventory_bar_height_px: INVENTORY_BAR_HEIGHT_PX,

            shrink_trigger_px: SHRINK_TRIGGER_PX,
            shrink_scale: SHRINK_SCALE,
            shrink_active_ms: SHRINK_ACTIVE_MS,
            shrink_cooldown_ms: SHRINK_COOLDOWN_MS,

            translucent_min_px: TRANSLUCENT_MIN_PX,
            translucent_max_px: TRANSLUCENT_MAX_PX,
            translucent_active_ms: TRANSLUCENT_ACTIVE_MS,
            translucent_cooldown_ms: TRANSLUCENT_COOLDOWN_MS,
            pulse_period_ms: PULSE_PERIOD_MS,
            pulse_on_ms: PULSE_ON_MS,
            pulse_opacity: PULSE_OPACITY,

            starting_stock: default_stock(),
        }
    }
}

/// Default palette: plenty of bars, fewer of the awkward shapes
fn default_stock() -> BTreeMap<ShapeKind, u32> {
    BTreeMap::from([
        (ShapeKind::Straight, 3),
        (ShapeKind::Vertical, 3),
        (ShapeKind::T, 2),
        (ShapeKind::L, 2),
        (ShapeKind::ReverseL, 2),
        (ShapeKind::Circle, 2),
    ])
}

impl Tuning {
    /// Parse JSON overrides on top of the defaults and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the arena's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.min_x_pct >= self.max_x_pct || self.min_y_pct >= self.max_y_pct {
            return Err(TuningError::Invalid("clamp bounds are empty".into()));
        }
        if self.min_x_pct < 0.0 || self.max_x_pct > 100.0 || self.min_y_pct < 0.0 || self.max_y_pct > 100.0 {
            return Err(TuningError::Invalid("clamp bounds must lie within 0..=100".into()));
        }
        if self.translucent_min_px >= self.translucent_max_px {
            return Err(TuningError::Invalid("translucency band is empty".into()));
        }

        let durations = [
            ("chase_tick_ms", self.chase_tick_ms),
            ("shrink_active_ms", self.shrink_active_ms),
            ("shrink_cooldown_ms", self.shrink_cooldown_ms),
            ("translucent_active_ms", self.translucent_active_ms),
            ("translucent_cooldown_ms", self.translucent_cooldown_ms),
            ("pulse_period_ms", self.pulse_period_ms),
            ("pulse_on_ms", self.pulse_on_ms),
        ];
        for (name, ms) in durations {
            if !(ms > 0.0 && ms.is_finite()) {
                return Err(TuningError::Invalid(format!("{} must be positive", name)));
            }
        }
        if self.pulse_on_ms >= self.pulse_period_ms {
            return Err(TuningError::Invalid("pulse_on_ms must be shorter than pulse_period_ms".into()));
        }

        let lengths = [
            ("evade_step_pct", self.evade_step_pct),
            ("chase_step_pct", self.chase_step_pct),
            ("target_width_px", self.target_width_px),
            ("target_height_px", self.target_height_px),
            ("obstacle_size_px", self.obstacle_size_px),
            ("shrink_scale", self.shrink_scale),
        ];
        for (name, value) in lengths {
            if !(value > 0.0 && value.is_finite()) {
                return Err(TuningError::Invalid(format!("{} must be positive", name)));
            }
        }

        Ok(())
    }

    /// Load overrides from `<script type="application/json" id="arena-tuning">` (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides from page");
                    tuning
                }
                Err(e) => {
                    log::warn!("{} - using default tuning", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Element holding page-supplied overrides
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "arena-tuning";
}
