//! Motion policy: where the target goes next
//!
//! Pure functions over positions and obstacles. Evade mode pushes the target
//! away from the pointer and searches alternate bearings when blocked; chase
//! mode steps toward the pointer and simply stops when blocked.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec2;

use super::collision::{Rect, collides_with_any};
use super::obstacle::Obstacle;
use super::state::ArenaState;
use crate::{bearing_vector, percent_to_px};

/// Bearing offsets tried, in order, when the direct escape is blocked
pub const ALTERNATE_BEARINGS: [f32; 4] = [FRAC_PI_4, -FRAC_PI_4, FRAC_PI_2, -FRAC_PI_2];

/// Geometry needed to test a candidate position
#[derive(Debug, Clone)]
pub struct MotionContext<'a> {
    pub viewport: Vec2,
    /// Target size in pixels at the current scale
    pub target_size: Vec2,
    pub obstacles: &'a [Obstacle],
    pub obstacle_size_px: f32,
    /// Clamp bounds (percent)
    pub min: Vec2,
    pub max: Vec2,
}

impl<'a> MotionContext<'a> {
    /// None while the target has no on-screen geometry
    pub fn from_state(state: &'a ArenaState) -> Option<Self> {
        let viewport = state.viewport?;
        let t = &state.tuning;
        Some(Self {
            viewport,
            target_size: state.target_size(),
            obstacles: state.obstacles.as_slice(),
            obstacle_size_px: t.obstacle_size_px,
            min: Vec2::new(t.min_x_pct, t.min_y_pct),
            max: Vec2::new(t.max_x_pct, t.max_y_pct),
        })
    }

    #[inline]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        pos.clamp(self.min, self.max)
    }

    /// Target center in pixels for a percent position
    #[inline]
    pub fn center_px(&self, pos: Vec2) -> Vec2 {
        percent_to_px(pos, self.viewport)
    }

    /// Whether the target would overlap an obstacle at `pos`
    pub fn collides_at(&self, pos: Vec2) -> bool {
        let rect = Rect::from_center(self.center_px(pos), self.target_size);
        collides_with_any(&rect, self.obstacles, self.obstacle_size_px)
    }
}

/// Outcome of an evade-mode pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvadeDecision {
    /// Pointer is far enough away; nothing to do
    OutOfRange,
    Moved(Vec2),
    /// All five bearings collide
    Blocked,
}

/// Outcome of a chase-mode tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChaseDecision {
    /// Close enough to the pointer to catch it
    Capture,
    Moved(Vec2),
    /// Step would land on an obstacle
    Blocked,
}

/// Pixel distance from the pointer to the target center
pub fn pointer_distance_px(current: Vec2, pointer_px: Vec2, ctx: &MotionContext) -> f32 {
    ctx.center_px(current).distance(pointer_px)
}

/// Candidate positions for an escape along `bearing`: the direct step first,
/// then each alternate offset in order
pub fn candidate_positions(current: Vec2, bearing: f32, step_pct: f32, ctx: &MotionContext) -> [Vec2; 5] {
    let candidate = |offset: f32| ctx.clamp(current + bearing_vector(bearing + offset) * step_pct);
    [
        candidate(0.0),
        candidate(ALTERNATE_BEARINGS[0]),
        candidate(ALTERNATE_BEARINGS[1]),
        candidate(ALTERNATE_BEARINGS[2]),
        candidate(ALTERNATE_BEARINGS[3]),
    ]
}

/// First collision-free candidate along `bearing`, or None if all collide
pub fn choose_escape(current: Vec2, bearing: f32, step_pct: f32, ctx: &MotionContext) -> Option<Vec2> {
    candidate_positions(current, bearing, step_pct, ctx)
        .into_iter()
        .find(|pos| !ctx.collides_at(*pos))
}

/// Evade policy for one pointer move
pub fn evade_step(
    current: Vec2,
    pointer_px: Vec2,
    threshold_px: f32,
    step_pct: f32,
    ctx: &MotionContext,
) -> EvadeDecision {
    let center = ctx.center_px(current);
    if center.distance(pointer_px) >= threshold_px {
        return EvadeDecision::OutOfRange;
    }

    // Bearing from the pointer through the target center
    let away = center - pointer_px;
    let bearing = away.y.atan2(away.x);

    match choose_escape(current, bearing, step_pct, ctx) {
        Some(pos) => EvadeDecision::Moved(pos),
        None => EvadeDecision::Blocked,
    }
}

/// Chase policy for one tick. Positions are in percent.
pub fn chase_step(
    current: Vec2,
    pointer_pct: Vec2,
    step_pct: f32,
    capture_pct: f32,
    ctx: &MotionContext,
) -> ChaseDecision {
    let delta = pointer_pct - current;
    if delta.length() < capture_pct {
        return ChaseDecision::Capture;
    }

    let next = ctx.clamp(current + delta.normalize_or_zero() * step_pct);
    if ctx.collides_at(next) {
        ChaseDecision::Blocked
    } else {
        ChaseDecision::Moved(next)
    }
}
