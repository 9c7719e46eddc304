/// The play area: bounds checks and pointer-coordinate conversion.
///
/// Queries run against the board's *measured* bounding box, which the
/// presentation layer reports in absolute coordinates (top-left origin,
/// y-down).  Board-relative results use a bottom-left origin, y-up.

use crate::entities::EntityId;
use crate::geometry::{Position, Size, Vector};

/// Rendered placement of the board in absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    size: Size,
    bounds: BoundingBox,
    shooters: Vec<EntityId>,
}

impl Board {
    /// A board of the given logical size, laid out at the absolute origin
    /// until the presentation layer reports where it actually landed.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            bounds: BoundingBox::new(0.0, 0.0, size.width, size.height),
            shooters: Vec::new(),
        }
    }

    /// Configured logical size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Last measured bounding box.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
    }

    /// `0 ≤ x ≤ width` and `0 ≤ y ≤ height`, inclusive on every edge.
    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.x >= 0.0
            && pos.x <= self.bounds.width
            && pos.y >= 0.0
            && pos.y <= self.bounds.height
    }

    /// Absolute (pointer) coordinate → board-relative coordinate.
    pub fn to_relative(&self, absolute: Position) -> Position {
        let anchor = Vector::new(self.bounds.left, self.bounds.bottom());
        let mut pos = absolute - anchor;
        pos.y = -pos.y;
        pos
    }

    /// Inverse of [`Board::to_relative`].
    pub fn to_absolute(&self, relative: Position) -> Position {
        Vector::new(
            self.bounds.left + relative.x,
            self.bounds.bottom() - relative.y,
        )
    }

    pub fn clamp_to_bounds(&self, pos: Position) -> Position {
        Vector::new(
            pos.x.max(0.0).min(self.bounds.width),
            pos.y.max(0.0).min(self.bounds.height),
        )
    }

    /// Shooters that belong to this board, in spawn order.
    pub fn shooters(&self) -> &[EntityId] {
        &self.shooters
    }

    pub(crate) fn add_shooter(&mut self, id: EntityId) {
        if !self.shooters.contains(&id) {
            self.shooters.push(id);
        }
    }

    pub(crate) fn remove_shooter(&mut self, id: EntityId) {
        self.shooters.retain(|s| *s != id);
    }
}
