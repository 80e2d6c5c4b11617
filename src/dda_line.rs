//! DDA (Digital Differential Analyzer) line rasterization.
//!
//! Converts two integer endpoints into the ordered run of grid points that
//! approximates the segment between them. The walk always goes from the
//! endpoint with the lower major-axis coordinate to the higher one, so a
//! segment and its reverse cover exactly the same pixels; output order is
//! fixed up afterwards so that the first point is always the requested start.

use crate::basics::PointI;
use crate::error::TraceError;

// ============================================================================
// Digital line interpolator
// ============================================================================

/// Integer line interpolator using a Bresenham-style error accumulator.
///
/// Steps one unit along the major axis per call to [`step`](Self::step)
/// and advances the minor axis whenever the accumulated error becomes
/// non-negative.
#[derive(Debug, Clone)]
pub struct DigitalLine {
    x: i32,
    y: i32,
    ver: bool,
    len: u32,
    err: i32,
    inc_straight: i32,
    inc_diagonal: i32,
    minor_inc: i32,
    reversed: bool,
}

/// Absolute distance from `a` to `b`, if it fits in `i32`.
#[inline]
fn span(a: i32, b: i32) -> Option<i32> {
    b.checked_sub(a)?.checked_abs()
}

impl DigitalLine {
    /// Set up the walk from `p1` to `p2`.
    ///
    /// Spans whose error terms do not fit in `i32` report
    /// [`TraceError::Allocation`]: a run that long could never be stored.
    pub fn new(p1: PointI, p2: PointI) -> Result<Self, TraceError> {
        let dx = span(p1.x, p2.x).ok_or(TraceError::Allocation)?;
        let dy = span(p1.y, p2.y).ok_or(TraceError::Allocation)?;
        let ver = dy > dx;

        // Walking towards increasing major coordinate, the minor axis moves
        // against it exactly when the two deltas have opposite signs.
        let minor_inc = if (p2.y < p1.y && p2.x > p1.x) || (p2.x < p1.x && p2.y > p1.y) {
            -1
        } else {
            1
        };

        let (major, minor) = if ver { (dy, dx) } else { (dx, dy) };
        let inc_straight = minor.checked_mul(2).ok_or(TraceError::Allocation)?;
        let inc_diagonal = (minor - major)
            .checked_mul(2)
            .ok_or(TraceError::Allocation)?;
        let err = inc_straight - major;
        let reversed = if ver { p2.y < p1.y } else { p2.x < p1.x };
        let start = if reversed { p2 } else { p1 };

        Ok(Self {
            x: start.x,
            y: start.y,
            ver,
            len: major as u32,
            err,
            inc_straight,
            inc_diagonal,
            minor_inc,
            reversed,
        })
    }

    /// True if the line is vertical-major.
    #[inline]
    pub fn is_ver(&self) -> bool {
        self.ver
    }

    /// Number of steps along the major axis.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Number of grid points the line covers, endpoints included.
    #[inline]
    pub fn count(&self) -> usize {
        (self.len as usize).saturating_add(1)
    }

    /// True if the walk runs from the requested end point back to the
    /// requested start point.
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    #[inline]
    pub fn point(&self) -> PointI {
        PointI::new(self.x, self.y)
    }

    /// Advance one unit along the major axis.
    #[inline]
    pub fn step(&mut self) {
        let minor_step = if self.err < 0 {
            self.err += self.inc_straight;
            0
        } else {
            self.err += self.inc_diagonal;
            self.minor_inc
        };
        if self.ver {
            self.y += 1;
            self.x += minor_step;
        } else {
            self.x += 1;
            self.y += minor_step;
        }
    }
}

// ============================================================================
// Rasterization
// ============================================================================

/// Rasterize the segment `p1`-`p2` into a fresh vector.
///
/// The result holds `max(|dx|, |dy|) + 1` points; the first is `p1` and the
/// last is `p2`. Reversing `rasterize(p1, p2)` gives `rasterize(p2, p1)`.
pub fn rasterize(p1: PointI, p2: PointI) -> Result<Vec<PointI>, TraceError> {
    let mut points = Vec::new();
    rasterize_into(p1, p2, &mut points)?;
    Ok(points)
}

/// Append the rasterized segment `p1`-`p2` to `out` and return the number
/// of points appended. `out` is left untouched on allocation failure.
pub fn rasterize_into(
    p1: PointI,
    p2: PointI,
    out: &mut Vec<PointI>,
) -> Result<usize, TraceError> {
    if p1 == p2 {
        out.try_reserve_exact(1)?;
        out.push(p1);
        return Ok(1);
    }

    let mut line = DigitalLine::new(p1, p2)?;
    let count = line.count();
    out.try_reserve_exact(count)?;

    let base = out.len();
    out.resize(base + count, PointI::default());
    let dst = &mut out[base..];

    // Reversed walks are written back-to-front so dst[0] is always p1.
    let (mut index, backwards) = if line.is_reversed() {
        (count - 1, true)
    } else {
        (0, false)
    };
    dst[index] = line.point();
    for _ in 0..line.len() {
        line.step();
        if backwards {
            index -= 1;
        } else {
            index += 1;
        }
        dst[index] = line.point();
    }
    Ok(count)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(list: &[(i32, i32)]) -> Vec<PointI> {
        list.iter().map(|&p| PointI::from(p)).collect()
    }

    #[test]
    fn test_degenerate_single_point() {
        let p = PointI::new(7, -3);
        let line = rasterize(p, p).unwrap();
        assert_eq!(line, vec![p]);
        assert_eq!(line.len(), 1);
    }

    #[test]
    fn test_horizontal() {
        let line = rasterize(PointI::new(0, 0), PointI::new(4, 0)).unwrap();
        assert_eq!(line, pts(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]));
    }

    #[test]
    fn test_horizontal_reversed() {
        let line = rasterize(PointI::new(4, 0), PointI::new(0, 0)).unwrap();
        assert_eq!(line, pts(&[(4, 0), (3, 0), (2, 0), (1, 0), (0, 0)]));
    }

    #[test]
    fn test_diagonal() {
        let line = rasterize(PointI::new(0, 0), PointI::new(3, 3)).unwrap();
        assert_eq!(line, pts(&[(0, 0), (1, 1), (2, 2), (3, 3)]));
    }

    #[test]
    fn test_anti_diagonal() {
        let line = rasterize(PointI::new(3, 0), PointI::new(0, 3)).unwrap();
        assert_eq!(line, pts(&[(3, 0), (2, 1), (1, 2), (0, 3)]));
    }

    #[test]
    fn test_shallow_slope() {
        let line = rasterize(PointI::new(0, 0), PointI::new(4, 2)).unwrap();
        assert_eq!(line, pts(&[(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)]));
    }

    #[test]
    fn test_steep_slope() {
        let line = rasterize(PointI::new(0, 0), PointI::new(1, 3)).unwrap();
        assert_eq!(line, pts(&[(0, 0), (0, 1), (1, 2), (1, 3)]));
    }

    #[test]
    fn test_vertical_upwards() {
        let line = rasterize(PointI::new(2, 5), PointI::new(2, 2)).unwrap();
        assert_eq!(line, pts(&[(2, 5), (2, 4), (2, 3), (2, 2)]));
    }

    #[test]
    fn test_endpoints_and_count() {
        let ends = [(-7, 3), (0, 0), (5, -9), (12, 4), (-2, -11)];
        for &a in &ends {
            for &b in &ends {
                let (a, b) = (PointI::from(a), PointI::from(b));
                let line = rasterize(a, b).unwrap();
                let dx = (b.x - a.x).abs();
                let dy = (b.y - a.y).abs();
                assert_eq!(line.len(), dx.max(dy) as usize + 1);
                assert_eq!(line[0], a);
                assert_eq!(*line.last().unwrap(), b);
            }
        }
    }

    #[test]
    fn test_symmetry() {
        for x in -4..=4 {
            for y in -4..=4 {
                let a = PointI::new(1, -1);
                let b = PointI::new(x * 3, y * 2);
                let mut forward = rasterize(a, b).unwrap();
                let backward = rasterize(b, a).unwrap();
                forward.reverse();
                assert_eq!(forward, backward, "{:?} -> {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_consecutive_points_are_neighbors() {
        let line = rasterize(PointI::new(-3, 8), PointI::new(17, -5)).unwrap();
        for w in line.windows(2) {
            assert!((w[1].x - w[0].x).abs() <= 1);
            assert!((w[1].y - w[0].y).abs() <= 1);
            assert_ne!(w[0], w[1]);
        }
    }

    #[test]
    fn test_rasterize_into_appends() {
        let mut out = vec![PointI::new(100, 100)];
        let n = rasterize_into(PointI::new(2, 0), PointI::new(0, 0), &mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(out, pts(&[(100, 100), (2, 0), (1, 0), (0, 0)]));
    }

    #[test]
    fn test_digital_line_axes() {
        let h = DigitalLine::new(PointI::new(0, 0), PointI::new(10, 3)).unwrap();
        assert!(!h.is_ver());
        assert_eq!(h.len(), 10);
        assert!(!h.is_reversed());

        let v = DigitalLine::new(PointI::new(0, 10), PointI::new(3, 0)).unwrap();
        assert!(v.is_ver());
        assert_eq!(v.len(), 10);
        assert!(v.is_reversed());
        assert_eq!(v.point(), PointI::new(3, 0));
    }

    #[test]
    fn test_huge_span_does_not_panic() {
        let origin = PointI::new(0, 0);
        assert_eq!(
            rasterize(origin, PointI::new(i32::MAX, 1)),
            Err(TraceError::Allocation)
        );
        assert_eq!(
            rasterize(PointI::new(-1_500_000_000, 0), PointI::new(1_500_000_000, 0)),
            Err(TraceError::Allocation)
        );
        assert_eq!(
            rasterize(PointI::new(i32::MIN, 0), origin),
            Err(TraceError::Allocation)
        );
        assert_eq!(
            rasterize(origin, PointI::new(3, i32::MIN)),
            Err(TraceError::Allocation)
        );
    }
}
