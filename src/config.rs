//! Drawing-surface settings read by the path builder and the loop closer.
//!
//! Passed explicitly into `extend` and `close`; nothing here is global.

use crate::basics::RectI;

/// Default number of slots a path buffer grows by.
pub const CAPACITY_INCREMENT: usize = 256;

/// Default initial capacity of a freshly started path.
pub const INITIAL_CAPACITY: usize = 99;

/// Settings for one tracing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TraceConfig {
    /// Slots added each time a path buffer runs out of room. Never zero.
    pub capacity_increment: usize,
    /// Slots reserved when a path is created.
    pub initial_capacity: usize,
    /// Drawing surface in local grid coordinates, inclusive. Pointer
    /// positions outside it are ignored by `extend`.
    pub bounds: Option<RectI>,
    /// Fewest vertices a path must hold before it may be closed.
    pub min_vertices: usize,
}

impl TraceConfig {
    pub fn new() -> Self {
        Self {
            capacity_increment: CAPACITY_INCREMENT,
            initial_capacity: INITIAL_CAPACITY,
            bounds: None,
            min_vertices: 1,
        }
    }

    /// Restrict accepted positions to `bounds` (normalized).
    pub fn with_bounds(mut self, mut bounds: RectI) -> Self {
        bounds.normalize();
        self.bounds = Some(bounds);
        self
    }

    /// Bounds covering a `width` x `height` surface anchored at the origin.
    pub fn with_surface(self, width: u32, height: u32) -> Self {
        let w = width.max(1).min(i32::MAX as u32) as i32;
        let h = height.max(1).min(i32::MAX as u32) as i32;
        self.with_bounds(RectI::new(0, 0, w - 1, h - 1))
    }

    pub fn with_capacity_increment(mut self, increment: usize) -> Self {
        self.capacity_increment = increment.max(1);
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_min_vertices(mut self, min_vertices: usize) -> Self {
        self.min_vertices = min_vertices;
        self
    }

    /// Returns `true` if (x, y) lies on the drawing surface.
    #[inline]
    pub fn accepts(&self, x: i32, y: i32) -> bool {
        match self.bounds {
            Some(r) => r.hit_test(x, y),
            None => true,
        }
    }

    /// Smallest capacity that is at least `required`, reached from `current`
    /// in whole increments.
    pub(crate) fn grown_capacity(&self, current: usize, required: usize) -> usize {
        let step = self.capacity_increment.max(1);
        let mut cap = current;
        while cap < required {
            cap = cap.saturating_add(step);
        }
        cap
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self::new()
    }
}
