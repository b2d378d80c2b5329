//! Placed obstacles and the registry that owns them

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Obstacle shapes offered by the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    /// Horizontal bar
    Straight,
    /// Vertical bar
    Vertical,
    T,
    L,
    ReverseL,
    Circle,
}

impl ShapeKind {
    /// Palette order
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Straight,
        ShapeKind::Vertical,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::ReverseL,
        ShapeKind::Circle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Straight => "straight",
            ShapeKind::Vertical => "vertical",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::ReverseL => "reverseL",
            ShapeKind::Circle => "circle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "straight" => Some(ShapeKind::Straight),
            "vertical" => Some(ShapeKind::Vertical),
            "t" | "T" => Some(ShapeKind::T),
            "l" | "L" => Some(ShapeKind::L),
            "reverseL" | "reverse-l" => Some(ShapeKind::ReverseL),
            "circle" => Some(ShapeKind::Circle),
            _ => None,
        }
    }
}

/// A committed obstacle. Immutable once placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ShapeKind,
    /// Center in viewport pixels
    pub pos: Vec2,
    /// Rotation in degrees (visual only)
    pub rotation: f32,
}

impl Obstacle {
    pub fn new(id: u32, kind: ShapeKind, pos: Vec2, rotation: f32) -> Self {
        Self { id, kind, pos, rotation }
    }
}

/// Append-only list of placed obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl Default for ObstacleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Commit a new obstacle and return its id
    pub fn place(&mut self, kind: ShapeKind, pos: Vec2, rotation: f32) -> u32 {
        let id = self.next_id;
        self.next_id = id + 1;
        self.obstacles.push(Obstacle::new(id, kind, pos, rotation));
        id
    }

    #[inline]
    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
