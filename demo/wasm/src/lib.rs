use js_sys::Int32Array;
use lasso_trace::{ClosedLoop, PathStorage, PointI, TraceConfig};
use wasm_bindgen::prelude::*;

/// Flatten points into `[x0, y0, x1, y1, ...]`.
fn flatten<I: IntoIterator<Item = PointI>>(points: I) -> Vec<i32> {
    points.into_iter().flat_map(|p| [p.x, p.y]).collect()
}

/// One free-hand tracing gesture on a `width` x `height` canvas.
///
/// The frontend calls `extend` on every pointer-move event and draws the
/// returned run as rubber-band feedback, then calls `close` on release.
#[wasm_bindgen]
pub struct Gesture {
    path: Option<PathStorage>,
    config: TraceConfig,
}

#[wasm_bindgen]
impl Gesture {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Gesture {
        Gesture {
            path: Some(PathStorage::new()),
            config: TraceConfig::new().with_surface(width, height),
        }
    }

    /// Extend the gesture to `(x, y)` and return the newly traced points.
    ///
    /// Positions off the canvas and repeats of the last position return an
    /// empty array. A gesture that has already been closed is restarted.
    pub fn extend(&mut self, x: i32, y: i32) -> Result<Int32Array, JsValue> {
        let path = self.path.get_or_insert_with(PathStorage::new);
        let tail = path
            .extend(PointI::new(x, y), &self.config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let flat = flatten(tail.iter().map(|p| p.point()));
        Ok(Int32Array::from(&flat[..]))
    }

    /// Number of points traced so far.
    pub fn len(&self) -> usize {
        self.path.as_ref().map_or(0, PathStorage::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Close the gesture and extract its first loop.
    ///
    /// The gesture is consumed; a following `extend` starts a new one.
    pub fn close(&mut self) -> Result<ClosedGesture, JsValue> {
        let path = self.path.take().unwrap_or_default();
        path.close(&self.config)
            .map(|lasso| ClosedGesture { lasso })
            .map_err(|e| JsValue::from_str(&format!("error {}: {}", e.code(), e)))
    }
}

/// The closed loop extracted from a gesture.
#[wasm_bindgen]
pub struct ClosedGesture {
    lasso: ClosedLoop,
}

#[wasm_bindgen]
impl ClosedGesture {
    /// Boundary points as `[x0, y0, x1, y1, ...]`.
    pub fn points(&self) -> Int32Array {
        Int32Array::from(&flatten(self.lasso.points().iter().copied())[..])
    }

    /// Polygon vertices as `[x0, y0, x1, y1, ...]`, closing vertex included.
    pub fn vertices(&self) -> Int32Array {
        Int32Array::from(&flatten(self.lasso.vertices().iter().copied())[..])
    }

    /// Inclusive bounding box as `[x1, y1, x2, y2]`.
    pub fn bounds(&self) -> Int32Array {
        let flat: Vec<i32> = self
            .lasso
            .bounding_rect()
            .map(|r| vec![r.x1, r.y1, r.x2, r.y2])
            .unwrap_or_default();
        Int32Array::from(&flat[..])
    }
}

/// Get the library version string.
#[wasm_bindgen]
pub fn version() -> String {
    format!("lasso-trace {}", env!("CARGO_PKG_VERSION"))
}
