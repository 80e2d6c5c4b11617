//! # lasso-trace
//!
//! Free-hand curve digitization and closed-loop extraction on the integer
//! pixel grid, for interactive region tracing in image-annotation tools.
//!
//! Everything works at pixel resolution so that the output lines up one to
//! one with pixels already drawn on screen:
//!
//! - Bidirectional digital line rasterization
//! - An incrementally growing path buffer with anchor (vertex) flags
//! - Crossing detection between rasterized edges, including crossings
//!   that swap diagonal cells without sharing one
//! - Extraction of the first non-overlapping closed loop of a gesture
//!
//! ## Architecture
//!
//! One tracing gesture flows through three stages:
//!
//! 1. **Rasterizer** (`dda_line`): joins two grid points with a run of pixels
//! 2. **Path Builder** (`path_storage`): extended once per pointer event;
//!    each call returns the appended run for rubber-band preview
//! 3. **Loop Closer** (`close_curve`): closes the path, finds the earliest
//!    self-crossing (`segment_intersection`) and returns a `ClosedLoop`
//!
//! ```
//! use lasso_trace::{PathStorage, PointI, TraceConfig};
//!
//! let config = TraceConfig::new().with_surface(64, 64);
//! let mut path = PathStorage::with_config(&config).unwrap();
//! for &(x, y) in &[(0, 0), (10, 10), (10, 0), (0, 10)] {
//!     path.extend(PointI::new(x, y), &config).unwrap();
//! }
//! let lasso = path.close(&config).unwrap();
//! assert_eq!(lasso.vertices()[0], PointI::new(5, 5));
//! ```

// Foundation Types
pub mod basics;
pub mod bounding_rect;
pub mod config;
pub mod error;

// Tracing
pub mod close_curve;
pub mod dda_line;
pub mod path_storage;
pub mod segment_intersection;

pub use basics::{PathPoint, PointI, RectI};
pub use close_curve::{close_curve, ClosedLoop};
pub use config::TraceConfig;
pub use dda_line::rasterize;
pub use error::TraceError;
pub use path_storage::PathStorage;
pub use segment_intersection::{find_crossing, Crossing};
