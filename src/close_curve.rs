//! Loop closing: turn a finished free-hand path into one closed polygon.
//!
//! The path is first joined back to its starting point with a final
//! rasterized run. Its vertex-to-vertex edges are then scanned in order for
//! the earliest crossing with an earlier, non-adjacent edge; the closed loop
//! is the stretch of boundary between the two crossing points. Without a
//! crossing the whole closed path is the loop.

use crate::basics::{
    PointI, RectI, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO,
    PATH_CMD_STOP, PATH_FLAGS_CLOSE,
};
use crate::bounding_rect::bounding_rect;
use crate::config::TraceConfig;
use crate::dda_line::rasterize;
use crate::error::TraceError;
use crate::path_storage::PathStorage;
use crate::segment_intersection::find_crossing;

// ============================================================================
// ClosedLoop
// ============================================================================

/// The closed boundary extracted from a gesture.
///
/// `points` is the full rasterized boundary; it always ends on the cell it
/// started from. `vertices` holds, in the same order, the points of that
/// boundary that carry the vertex flag.
#[derive(Debug, Clone)]
pub struct ClosedLoop {
    points: Vec<PointI>,
    vertices: Vec<PointI>,
    iterator: usize,
}

impl ClosedLoop {
    #[inline]
    pub fn points(&self) -> &[PointI] {
        &self.points
    }

    #[inline]
    pub fn vertices(&self) -> &[PointI] {
        &self.vertices
    }

    pub fn into_parts(self) -> (Vec<PointI>, Vec<PointI>) {
        (self.points, self.vertices)
    }

    /// Inclusive bounding box of the boundary, for repaint regions.
    pub fn bounding_rect(&self) -> Option<RectI> {
        bounding_rect(self.points.iter().copied())
    }

    /// Polygon corners without the repeated closing vertex.
    fn corners(&self) -> &[PointI] {
        match self.vertices.split_last() {
            Some((last, rest)) if !rest.is_empty() && *last == rest[0] => rest,
            _ => &self.vertices,
        }
    }
}

// Equality ignores the emission cursor.
impl PartialEq for ClosedLoop {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points && self.vertices == other.vertices
    }
}

impl Eq for ClosedLoop {}

/// Emits the loop's corners as a single closed polygon.
impl VertexSource for ClosedLoop {
    fn rewind(&mut self, _path_id: u32) {
        self.iterator = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        let corners = self.corners().len();
        let i = self.iterator;
        if i > corners || corners == 0 {
            return PATH_CMD_STOP;
        }
        self.iterator += 1;
        if i == corners {
            return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE;
        }
        let p = self.corners()[i];
        *x = p.x as f64;
        *y = p.y as f64;
        if i == 0 {
            PATH_CMD_MOVE_TO
        } else {
            PATH_CMD_LINE_TO
        }
    }
}

// ============================================================================
// Closing
// ============================================================================

/// Close `path` and extract its first non-overlapping loop.
///
/// Fails with [`TraceError::NoPointSelected`] on an empty path (nothing is
/// allocated in that case) and with [`TraceError::TooFewVertices`] when the
/// path has fewer vertices than `config.min_vertices`.
pub fn close_curve(mut path: PathStorage, config: &TraceConfig) -> Result<ClosedLoop, TraceError> {
    let (first, last) = match (path.first_point(), path.last_point()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(TraceError::NoPointSelected),
    };
    let found = path.vertex_count();
    if found < config.min_vertices {
        return Err(TraceError::TooFewVertices {
            found,
            required: config.min_vertices,
        });
    }

    let run = rasterize(last, first)?;
    path.append_run(&run[1..], config)?;
    log::trace!(
        "closing run ({}, {}) -> ({}, {}) added {} points",
        last.x,
        last.y,
        first.x,
        first.y,
        run.len() - 1
    );

    let (start, end) = first_loop(&path)?;
    path.set_vertex(start);
    path.set_vertex(end);
    materialize(&path, start, end)
}

/// Index of the first and last point of the earliest loop.
fn first_loop(path: &PathStorage) -> Result<(usize, usize), TraceError> {
    let points = path.points();
    let n = points.len();
    let mut loop_start = 0;
    let mut loop_end = n - 1;

    // Every vertex but the final one starts an edge.
    let edge_starts = move || {
        points[..n - 1]
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_vertex)
            .map(|(i, _)| i)
    };

    for (k, j) in edge_starts().enumerate() {
        let edge_a = path.edge(j)?;
        let mut found = false;
        // The immediately preceding edge shares vertex j and is skipped.
        for j2 in edge_starts().take(k.saturating_sub(1)) {
            let edge_b = path.edge(j2)?;
            let crossing = match find_crossing(&points[edge_a.clone()], &points[edge_b.clone()]) {
                Some(c) => c,
                None => continue,
            };
            let later = edge_a.start + crossing.index_a;
            let earlier = edge_b.start + crossing.index_b;
            if later < loop_end {
                loop_end = later;
                loop_start = earlier;
                found = true;
            }
        }
        if found {
            log::debug!(
                "path crosses itself at ({}, {}); loop spans points {}..={}",
                points[loop_end].x,
                points[loop_end].y,
                loop_start,
                loop_end
            );
            break;
        }
    }
    Ok((loop_start, loop_end))
}

fn materialize(path: &PathStorage, start: usize, end: usize) -> Result<ClosedLoop, TraceError> {
    let range = &path.points()[start..=end];
    let reopen = !range[0].same_cell(&range[range.len() - 1]);
    let extra = usize::from(reopen);
    let vertex_count = range.iter().filter(|p| p.is_vertex).count();

    let mut points = Vec::new();
    points.try_reserve_exact(range.len() + extra)?;
    let mut vertices = Vec::new();
    vertices.try_reserve_exact(vertex_count + extra)?;

    for p in range {
        points.push(p.point());
        if p.is_vertex {
            vertices.push(p.point());
        }
    }
    if reopen {
        points.push(range[0].point());
        vertices.push(range[0].point());
    }

    Ok(ClosedLoop {
        points,
        vertices,
        iterator: 0,
    })
}

// ============================================================================
// Tests
// ============================================================================
