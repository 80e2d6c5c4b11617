//! Bounding rectangle calculation.
//!
//! Computes the inclusive axis-aligned bounding box of a run of grid
//! points, as used by the intersection fast path and for repaint regions.

use crate::basics::{PathPoint, PointI, RectI};

/// Compute the bounding rectangle of a sequence of grid coordinates.
///
/// Returns `None` if the sequence is empty.
pub fn bounding_rect<I>(points: I) -> Option<RectI>
where
    I: IntoIterator<Item = PointI>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let mut r = RectI::new(first.x, first.y, first.x, first.y);
    for p in iter {
        if p.x < r.x1 {
            r.x1 = p.x;
        }
        if p.y < r.y1 {
            r.y1 = p.y;
        }
        if p.x > r.x2 {
            r.x2 = p.x;
        }
        if p.y > r.y2 {
            r.y2 = p.y;
        }
    }
    Some(r)
}

/// Bounding rectangle of a run of path points, ignoring vertex flags.
pub fn bounding_rect_path(points: &[PathPoint]) -> Option<RectI> {
    bounding_rect(points.iter().map(PathPoint::point))
}
