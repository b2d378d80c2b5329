//! Obstacle palette stock and the drag preview

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::ShapeKind;

/// Remaining obstacles per shape. Never replenished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    stock: BTreeMap<ShapeKind, u32>,
}

impl Inventory {
    pub fn new(stock: BTreeMap<ShapeKind, u32>) -> Self {
        Self { stock }
    }

    /// Remaining count for a shape (0 for shapes never stocked)
    pub fn remaining(&self, kind: ShapeKind) -> u32 {
        self.stock.get(&kind).copied().unwrap_or(0)
    }

    pub fn has(&self, kind: ShapeKind) -> bool {
        self.remaining(kind) > 0
    }

    /// Consume one unit. Returns false (and changes nothing) when out of stock.
    pub fn take(&mut self, kind: ShapeKind) -> bool {
        match self.stock.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn total(&self) -> u32 {
        self.stock.values().sum()
    }
}

/// Floating preview of the shape being dragged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPreview {
    pub kind: ShapeKind,
    /// Pointer position in viewport pixels
    pub pos: Vec2,
    /// Degrees, multiple of 90
    pub rotation: f32,
}

impl DragPreview {
    pub fn new(kind: ShapeKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            rotation: 0.0,
        }
    }

    /// Turn the preview a quarter clockwise
    pub fn rotate_quarter(&mut self) {
        self.rotation = (self.rotation + 90.0) % 360.0;
    }
}

/// Result of releasing the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// New obstacle committed
    Placed { id: u32 },
    /// Released over the inventory bar (or out of stock)
    Discarded,
    /// Nothing was being dragged
    NoDrag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_decrements_until_empty() {
        let mut inventory = Inventory::new(BTreeMap::from([(ShapeKind::T, 2)]));

        assert!(inventory.take(ShapeKind::T));
        assert!(inventory.take(ShapeKind::T));
        assert!(!inventory.take(ShapeKind::T));
        assert_eq!(inventory.remaining(ShapeKind::T), 0);
    }

    #[test]
    fn test_unstocked_shape_is_empty() {
        let mut inventory = Inventory::new(BTreeMap::from([(ShapeKind::T, 1)]));

        assert!(!inventory.has(ShapeKind::Circle));
        assert!(!inventory.take(ShapeKind::Circle));
        assert_eq!(inventory.total(), 1);
    }

    #[test]
    fn test_preview_rotation_wraps() {
        let mut preview = DragPreview::new(ShapeKind::L, Vec2::ZERO);
        for _ in 0..4 {
            preview.rotate_quarter();
        }
        assert_eq!(preview.rotation, 0.0);
        preview.rotate_quarter();
        assert_eq!(preview.rotation, 90.0);
    }
}
