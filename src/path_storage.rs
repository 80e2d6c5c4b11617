//! Path storage: the growable point buffer a free-hand gesture is traced into.
//!
//! Every anchor reported by the pointer collector is joined to the previous
//! one by a rasterized run, so the buffer always holds a connected chain of
//! grid points. Points the user placed carry the vertex flag.
//!
//! Capacity is managed explicitly: the buffer grows by whole
//! [`TraceConfig::capacity_increment`] steps only when the next run does not
//! fit, and never shrinks while the gesture is being drawn.

use core::ops::Range;

use crate::basics::{PathPoint, PointI};
use crate::close_curve::{close_curve, ClosedLoop};
use crate::config::TraceConfig;
use crate::dda_line::rasterize;
use crate::error::TraceError;

/// The point buffer of one gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathStorage {
    points: Vec<PathPoint>,
    max_points: usize,
}

impl PathStorage {
    /// Create an empty path. Nothing is allocated until the first point.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            max_points: 0,
        }
    }

    /// Create an empty path with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Result<Self, TraceError> {
        let mut points = Vec::new();
        points.try_reserve_exact(capacity)?;
        Ok(Self {
            points,
            max_points: capacity,
        })
    }

    /// Create an empty path sized by `config.initial_capacity`.
    pub fn with_config(config: &TraceConfig) -> Result<Self, TraceError> {
        Self::with_capacity(config.initial_capacity)
    }

    /// Build a path by extending through every anchor in order.
    pub fn from_anchors<I>(anchors: I, config: &TraceConfig) -> Result<Self, TraceError>
    where
        I: IntoIterator<Item = PointI>,
    {
        let mut path = Self::with_config(config)?;
        for p in anchors {
            path.extend(p, config)?;
        }
        Ok(path)
    }

    /// Remove all points (keeps allocated memory).
    pub fn remove_all(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of slots allocated for points.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_points
    }

    #[inline]
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn first_point(&self) -> Option<PointI> {
        self.points.first().map(PathPoint::point)
    }

    pub fn last_point(&self) -> Option<PointI> {
        self.points.last().map(PathPoint::point)
    }

    /// Number of points carrying the vertex flag.
    pub fn vertex_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_vertex).count()
    }

    /// The vertex-flagged points, in path order.
    pub fn vertices(&self) -> impl Iterator<Item = PointI> + '_ {
        self.points.iter().filter(|p| p.is_vertex).map(PathPoint::point)
    }

    /// Extend the path to `p` and return the newly appended points.
    ///
    /// The first point of a path is stored as a vertex. Later points are
    /// joined to the current last point by a rasterized run whose far end
    /// is flagged as a vertex. Repeating the last point, or a position
    /// outside `config.bounds`, appends nothing. On error the path is left
    /// exactly as it was.
    pub fn extend(&mut self, p: PointI, config: &TraceConfig) -> Result<&[PathPoint], TraceError> {
        let len = self.points.len();
        if !config.accepts(p.x, p.y) {
            log::trace!("ignoring ({}, {}): outside drawing surface", p.x, p.y);
            return Ok(&self.points[len..]);
        }

        let last = match self.last_point() {
            Some(last) => last,
            None => {
                self.reserve_for(1, config)?;
                self.points.push(PathPoint::vertex(p));
                return Ok(&self.points[..]);
            }
        };
        if last == p {
            return Ok(&self.points[len..]);
        }

        let run = rasterize(last, p)?;
        let start = self.append_run(&run[1..], config)?;
        Ok(&self.points[start..])
    }

    /// Index range of the vertex-to-vertex edge that begins at `start`,
    /// both end vertices included.
    pub fn edge(&self, start: usize) -> Result<Range<usize>, TraceError> {
        match self.points.get(start) {
            Some(p) if p.is_vertex => {}
            _ => return Err(TraceError::InvalidCurveData),
        }
        self.points[start + 1..]
            .iter()
            .position(|p| p.is_vertex)
            .map(|offset| start..start + offset + 2)
            .ok_or(TraceError::InvalidCurveData)
    }

    /// Close the path and extract its first non-overlapping loop.
    pub fn close(self, config: &TraceConfig) -> Result<ClosedLoop, TraceError> {
        close_curve(self, config)
    }

    /// Append `run` as interior points, flag the last appended point as a
    /// vertex and return the index of the first appended point.
    pub(crate) fn append_run(
        &mut self,
        run: &[PointI],
        config: &TraceConfig,
    ) -> Result<usize, TraceError> {
        let start = self.points.len();
        self.reserve_for(start + run.len(), config)?;
        self.points
            .extend(run.iter().map(|&p| PathPoint::interior(p)));
        if let Some(last) = self.points.last_mut() {
            last.is_vertex = true;
        }
        Ok(start)
    }

    pub(crate) fn set_vertex(&mut self, index: usize) {
        self.points[index].is_vertex = true;
    }

    fn reserve_for(&mut self, required: usize, config: &TraceConfig) -> Result<(), TraceError> {
        if required <= self.max_points {
            return Ok(());
        }
        let new_cap = config.grown_capacity(self.max_points, required);
        self.points
            .try_reserve_exact(new_cap - self.points.len())?;
        log::trace!("path buffer grown from {} to {} slots", self.max_points, new_cap);
        self.max_points = new_cap;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
