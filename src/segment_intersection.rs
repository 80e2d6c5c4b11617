//! Crossing detection between two rasterized edges.
//!
//! Two digital lines can cross in two ways: by sharing a grid cell, or by
//! swapping a pair of diagonally adjacent cells so that neither line ever
//! occupies a cell of the other. The scan below catches both. It keys on
//! edge A's major axis and walks edge B in lockstep, so every pair of points
//! with the same key coordinate is compared exactly once.

use crate::basics::{intersect_rectangles, PathPoint};
use crate::bounding_rect::bounding_rect_path;

/// Where two edges cross: an index into each edge slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub index_a: usize,
    pub index_b: usize,
}

/// Dominant travel direction of an edge. `Up` is decreasing y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `first` to `last`.
    ///
    /// Exact diagonals count as horizontal.
    pub fn of_edge(first: &PathPoint, last: &PathPoint) -> Self {
        let dx = last.x - first.x;
        let dy = last.y - first.y;
        if dx > 0 {
            if dy > dx {
                Direction::Down
            } else if -dy > dx {
                Direction::Up
            } else {
                Direction::Right
            }
        } else if dy > -dx {
            Direction::Down
        } else if -dy > -dx {
            Direction::Up
        } else {
            Direction::Left
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }
}

/// Find the first crossing of `edge_a` with `edge_b`, in `edge_a` order.
///
/// Both edges must be rasterized runs (consecutive points at most one unit
/// apart on each axis) with a vertex at each end. Crossings of an edge with
/// itself are not looked for.
pub fn find_crossing(edge_a: &[PathPoint], edge_b: &[PathPoint]) -> Option<Crossing> {
    let (a_first, a_last) = (edge_a.first()?, edge_a.last()?);
    let (b_first, b_last) = (edge_b.first()?, edge_b.last()?);

    let overlap = intersect_rectangles(&bounding_rect_path(edge_a)?, &bounding_rect_path(edge_b)?);
    if !overlap.is_valid() {
        return None;
    }

    let direction = Direction::of_edge(a_first, a_last);
    let horizontal = direction.is_horizontal();
    let key = |p: &PathPoint| if horizontal { p.x } else { p.y };
    let minor = |p: &PathPoint| if horizontal { p.y } else { p.x };
    let (lo, hi) = if horizontal {
        (overlap.x1, overlap.x2)
    } else {
        (overlap.y1, overlap.y2)
    };
    let in_box = |p: &PathPoint| (lo..=hi).contains(&key(p));

    let forward = if horizontal {
        (direction == Direction::Right) == (b_last.x > b_first.x)
    } else {
        (direction == Direction::Up) == (b_last.y < b_first.y)
    };

    let a = edge_a;
    let b = edge_b;
    if forward {
        let mut j = b.iter().position(in_box)?;
        for i in 0..a.len() {
            while j < b.len() && key(&b[j]) == key(&a[i]) {
                if b[j].same_cell(&a[i]) {
                    return Some(Crossing {
                        index_a: i,
                        index_b: j,
                    });
                }
                if i + 1 < a.len()
                    && j + 1 < b.len()
                    && key(&a[i + 1]) == key(&b[j + 1])
                    && minor(&b[j + 1]) == minor(&a[i])
                    && minor(&a[i + 1]) == minor(&b[j])
                {
                    return Some(Crossing {
                        index_a: i,
                        index_b: j + 1,
                    });
                }
                j += 1;
            }
        }
    } else {
        // `end` is one past the next B point to examine.
        let mut end = b.iter().rposition(in_box)? + 1;
        for i in 0..a.len() {
            while end > 0 && key(&b[end - 1]) == key(&a[i]) {
                let j = end - 1;
                if b[j].same_cell(&a[i]) {
                    return Some(Crossing {
                        index_a: i,
                        index_b: j,
                    });
                }
                if i + 1 < a.len()
                    && j > 0
                    && key(&a[i + 1]) == key(&b[j - 1])
                    && minor(&b[j - 1]) == minor(&a[i])
                    && minor(&a[i + 1]) == minor(&b[j])
                {
                    return Some(Crossing {
                        index_a: i,
                        index_b: j,
                    });
                }
                end -= 1;
            }
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PointI;
    use crate::dda_line::rasterize;

    fn edge(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<PathPoint> {
        let run = rasterize(PointI::new(x1, y1), PointI::new(x2, y2)).unwrap();
        let last = run.len() - 1;
        run.iter()
            .enumerate()
            .map(|(i, p)| PathPoint::new(p.x, p.y, i == 0 || i == last))
            .collect()
    }

    #[test]
    fn test_direction_of_edge() {
        let p = |x, y| PathPoint::new(x, y, true);
        assert_eq!(Direction::of_edge(&p(0, 0), &p(5, 2)), Direction::Right);
        assert_eq!(Direction::of_edge(&p(0, 0), &p(-5, 2)), Direction::Left);
        assert_eq!(Direction::of_edge(&p(0, 0), &p(2, 5)), Direction::Down);
        assert_eq!(Direction::of_edge(&p(0, 0), &p(-2, -5)), Direction::Up);
        assert_eq!(Direction::of_edge(&p(0, 0), &p(4, 4)), Direction::Right);
        assert_eq!(Direction::of_edge(&p(0, 0), &p(-4, -4)), Direction::Left);
    }

    #[test]
    fn test_disjoint_boxes() {
        let a = edge(0, 0, 5, 0);
        let b = edge(0, 1, 5, 1);
        assert_eq!(find_crossing(&a, &b), None);
    }

    #[test]
    fn test_overlapping_boxes_without_contact() {
        let a = edge(0, 0, 6, 2);
        let b = edge(0, 2, 6, 4);
        assert_eq!(find_crossing(&a, &b), None);
        assert_eq!(find_crossing(&b, &a), None);
    }

    #[test]
    fn test_shared_cell_backward_scan() {
        let a = edge(0, 0, 10, 10);
        let b = edge(10, 0, 0, 10);
        let c = find_crossing(&b, &a).unwrap();
        assert_eq!(c, Crossing { index_a: 5, index_b: 5 });
        assert!(b[c.index_a].same_cell(&a[c.index_b]));
        assert_eq!(b[c.index_a].point(), PointI::new(5, 5));
    }

    #[test]
    fn test_shared_cell_vertical_key() {
        let a = edge(2, 0, 2, 6);
        let b = edge(0, 3, 5, 3);
        assert_eq!(find_crossing(&a, &b), Some(Crossing { index_a: 3, index_b: 2 }));
    }

    #[test]
    fn test_shared_cell_vertical_backward() {
        let a = edge(2, 8, 2, 0);
        let b = edge(0, 0, 4, 8);
        assert_eq!(Direction::of_edge(&a[0], &a[8]), Direction::Up);
        let c = find_crossing(&a, &b).unwrap();
        assert_eq!(c, Crossing { index_a: 4, index_b: 4 });
        assert_eq!(a[c.index_a].point(), PointI::new(2, 4));
    }

    #[test]
    fn test_cell_swap_vertical_key() {
        let down = edge(0, 0, 3, 9);
        let down_left = edge(3, 0, 0, 9);
        for (p, q) in down.iter().zip(down_left.iter()) {
            assert!(!p.same_cell(q));
        }
        // Both travel down: forward scan.
        assert_eq!(
            find_crossing(&down, &down_left),
            Some(Crossing { index_a: 4, index_b: 5 })
        );
        assert_eq!(down[4].point(), PointI::new(1, 4));
        assert_eq!(down_left[5].point(), PointI::new(1, 5));

        // An up edge against a down edge: backward scan.
        let up = edge(0, 9, 3, 0);
        assert_eq!(Direction::of_edge(&up[0], &up[9]), Direction::Up);
        assert_eq!(
            find_crossing(&up, &down),
            Some(Crossing { index_a: 4, index_b: 5 })
        );
        assert_eq!(up[4].point(), PointI::new(1, 5));
        assert_eq!(down[5].point(), PointI::new(2, 5));
    }

    #[test]
    fn test_cell_swap_forward_scan() {
        let a = edge(0, 0, 3, 3);
        let b = edge(0, 3, 3, 0);
        for (p, q) in a.iter().zip(b.iter()) {
            assert!(!p.same_cell(q));
        }
        assert_eq!(find_crossing(&a, &b), Some(Crossing { index_a: 1, index_b: 2 }));
    }

    #[test]
    fn test_cell_swap_backward_scan() {
        let a = edge(0, 0, 3, 3);
        let b = edge(3, 0, 0, 3);
        assert_eq!(find_crossing(&a, &b), Some(Crossing { index_a: 1, index_b: 2 }));
    }

    #[test]
    fn test_shared_endpoint() {
        let a = edge(0, 10, 0, 0);
        let b = edge(0, 0, 10, 0);
        assert_eq!(find_crossing(&a, &b), Some(Crossing { index_a: 10, index_b: 0 }));
    }

    #[test]
    fn test_empty_edge() {
        let a = edge(0, 0, 3, 3);
        assert_eq!(find_crossing(&a, &[]), None);
        assert_eq!(find_crossing(&[], &a), None);
    }
}
