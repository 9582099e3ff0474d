//! Geographic primitives: GeoJSON shape decomposition and viewport math.

mod feature;
mod viewport;

pub use feature::{decompose_lines, decompose_points, LineShape, PointShape};
pub use viewport::{fit_zoom, Bounds, MAX_LATITUDE};
