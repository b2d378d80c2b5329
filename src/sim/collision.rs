//! Axis-aligned collision tests between the target and placed obstacles
//!
//! Obstacles collide as a fixed square regardless of their drawn shape, so a
//! circle or an L blocks exactly as much as a straight bar.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;

/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: rectangles sharing only an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Collision square of an obstacle
#[inline]
pub fn obstacle_rect(obstacle: &Obstacle, size_px: f32) -> Rect {
    Rect::from_center(obstacle.pos, Vec2::splat(size_px))
}

/// First obstacle overlapping `target`, if any
pub fn first_collision<'a>(
    target: &Rect,
    obstacles: &'a [Obstacle],
    obstacle_size_px: f32,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|o| target.overlaps(&obstacle_rect(o, obstacle_size_px)))
}

/// Whether `target` overlaps any obstacle
#[inline]
pub fn collides_with_any(target: &Rect, obstacles: &[Obstacle], obstacle_size_px: f32) -> bool {
    first_collision(target, obstacles, obstacle_size_px).is_some()
}
