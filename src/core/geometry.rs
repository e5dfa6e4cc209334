//=========================================================================
// Geometry
//=========================================================================
//
// Screen-space rectangles and the fixed layout constants shared by
// windows, the transfer pass and the director.
//
// Coordinate system: render-surface pixels, top-left origin, +y down.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Surface & Chrome Constants ==========================================

/// Render surface width in logical pixels.
pub const RENDER_WIDTH: f32 = 640.0;

/// Render surface height in logical pixels.
pub const RENDER_HEIGHT: f32 = 360.0;

/// Height of a window's title bar (drag handle).
pub const TITLE_BAR_HEIGHT: f32 = 20.0;

/// Width of the left/right/bottom window border.
pub const BORDER_WIDTH: f32 = 3.0;

/// Smallest width a window can be resized to.
pub const MIN_WIDTH: f32 = 100.0;

/// Smallest height a window can be resized to.
pub const MIN_HEIGHT: f32 = 80.0;

/// Side of the square resize handle in a window's bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f32 = 12.0;

/// Thickness of the static boundary walls placed outside a content area.
pub const WALL_THICKNESS: f32 = 10.0;

/// Distance beyond the content area a member may drift before it is lost.
pub const LOSS_MARGIN: f32 = 30.0;

//=== Rect ================================================================

/// Axis-aligned rectangle in render-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The whole render surface.
    pub const fn surface() -> Self {
        Self::new(0.0, 0.0, RENDER_WIDTH, RENDER_HEIGHT)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Inclusive containment test; points on the edge are inside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    /// Returns the overlapping region, or `None` when the rectangles only
    /// touch or are disjoint (zero or negative extent).
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 > x1 && y2 > y1 {
            Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    /// True when the rectangle lies entirely inside `bounds`.
    pub fn is_within(&self, bounds: &Rect) -> bool {
        self.x >= bounds.x
            && self.y >= bounds.y
            && self.right() <= bounds.right()
            && self.bottom() <= bounds.bottom()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
