//! Foundation types and path command utilities.
//!
//! Grid points, integer rectangles, the vertex flag carried by path points,
//! and the small vertex-source interface used to hand finished loops to a
//! rendering pipeline.

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// One pixel location on the display grid.
pub type PointI = PointBase<i32>;

impl From<(i32, i32)> for PointI {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// Path point
// ============================================================================

/// A grid point plus the vertex flag.
///
/// `is_vertex` is set on points the user placed explicitly (anchors and
/// corners) and on the far end of every rasterized run; points produced only
/// by rasterizing between two anchors leave it clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PathPoint {
    pub x: i32,
    pub y: i32,
    pub is_vertex: bool,
}

impl PathPoint {
    pub fn new(x: i32, y: i32, is_vertex: bool) -> Self {
        Self { x, y, is_vertex }
    }

    pub fn vertex(p: PointI) -> Self {
        Self::new(p.x, p.y, true)
    }

    pub fn interior(p: PointI) -> Self {
        Self::new(p.x, p.y, false)
    }

    #[inline]
    pub fn point(&self) -> PointI {
        PointI::new(self.x, self.y)
    }

    /// Same grid cell, ignoring the vertex flag.
    #[inline]
    pub fn same_cell(&self, other: &PathPoint) -> bool {
        self.x == other.x && self.y == other.y
    }
}

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two corner points, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Normalize so that x1 <= x2 and y1 <= y2, swapping if needed.
    pub fn normalize(&mut self) -> &Self {
        if self.x1 > self.x2 {
            core::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            core::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    /// Returns `true` if the rectangle is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns `true` if the point (x, y) is inside the rectangle.
    pub fn hit_test(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

/// Compute the intersection of two rectangles.
///
/// The result is not valid (see [`Rect::is_valid`]) when the inputs are
/// disjoint.
pub fn intersect_rectangles<T: Copy + PartialOrd>(r1: &Rect<T>, r2: &Rect<T>) -> Rect<T> {
    let mut r = *r1;
    if r.x2 > r2.x2 {
        r.x2 = r2.x2;
    }
    if r.y2 > r2.y2 {
        r.y2 = r2.y2;
    }
    if r.x1 < r2.x1 {
        r.x1 = r2.x1;
    }
    if r.y1 < r2.y1 {
        r.y1 = r2.y1;
    }
    r
}

/// Rectangle with `i32` coordinates.
pub type RectI = Rect<i32>;

// ============================================================================
// Path commands
// ============================================================================

pub const PATH_CMD_STOP: u32 = 0;
pub const PATH_CMD_MOVE_TO: u32 = 1;
pub const PATH_CMD_LINE_TO: u32 = 2;
pub const PATH_CMD_END_POLY: u32 = 0x0F;

pub const PATH_FLAGS_CLOSE: u32 = 0x40;

/// Returns `true` if `c` is the stop command.
#[inline]
pub fn is_stop(c: u32) -> bool {
    c == PATH_CMD_STOP
}

/// Returns `true` if `c` is a close polygon command.
#[inline]
pub fn is_close(c: u32) -> bool {
    c == (PATH_CMD_END_POLY | PATH_FLAGS_CLOSE)
}

// ============================================================================
// VertexSource trait
// ============================================================================

/// A rewindable stream of vertices.
///
/// Finished loops implement this so a host renderer can consume them the
/// same way it consumes any other polygon.
pub trait VertexSource {
    /// Reset the vertex source to the beginning of the given path.
    fn rewind(&mut self, path_id: u32);

    /// Return the next vertex. Writes coordinates to `x` and `y`, returns a
    /// path command. Returns `PATH_CMD_STOP` when iteration is complete.
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

// ============================================================================
// Tests
// ============================================================================
