//! Viewport math: fitting bounding boxes and constraining the view.
//!
//! The map engine owns panning, zooming, and projection. This module only
//! answers the questions the widget needs before handing the view over:
//! what center/zoom shows a given bounding box, and whether the current
//! view violates the configured constraints.

use serde::{Deserialize, Serialize};

/// Size of one map tile in pixels at every zoom level.
const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.0511;

/// A geographic bounding box given as two opposite `[lat, lon]` corners.
///
/// Corners may be supplied in any order; accessors normalize them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds(pub [f64; 2], pub [f64; 2]);

impl Bounds {
    pub fn new(corner_a: [f64; 2], corner_b: [f64; 2]) -> Self {
        Self(corner_a, corner_b)
    }

    pub fn south(&self) -> f64 {
        self.0[0].min(self.1[0])
    }

    pub fn north(&self) -> f64 {
        self.0[0].max(self.1[0])
    }

    pub fn west(&self) -> f64 {
        self.0[1].min(self.1[1])
    }

    pub fn east(&self) -> f64 {
        self.0[1].max(self.1[1])
    }

    /// Midpoint of the box as `[lat, lon]`.
    pub fn center(&self) -> [f64; 2] {
        [
            (self.south() + self.north()) / 2.0,
            (self.west() + self.east()) / 2.0,
        ]
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.south() && lat <= self.north() && lon >= self.west() && lon <= self.east()
    }

    /// Clamps a `[lat, lon]` position into the box.
    pub fn clamp(&self, lat: f64, lon: f64) -> (f64, f64) {
        (
            lat.clamp(self.south(), self.north()),
            lon.clamp(self.west(), self.east()),
        )
    }
}

/// Projected y coordinate of a latitude in Web Mercator, in radians.
fn mercator_y(lat: f64) -> f64 {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln()
}

/// Returns the largest zoom level at which `bounds` fits entirely into a
/// viewport of `width` x `height` pixels.
///
/// At zoom `z` the world is `256 * 2^z` pixels wide, so the zoom that fits a
/// longitude span is `log2(width / (256 * span / 360))`; the latitude span
/// goes through the Mercator projection first. The smaller of the two axes
/// wins. Degenerate (zero-area) boxes fit at any zoom; the result is only
/// clamped below at 0.
pub fn fit_zoom(bounds: &Bounds, width: f32, height: f32) -> f64 {
    let x_fraction = ((bounds.east() - bounds.west()).abs() / 360.0).max(1e-9);
    let y_fraction = ((mercator_y(bounds.north()) - mercator_y(bounds.south())).abs()
        / (2.0 * std::f64::consts::PI))
        .max(1e-9);

    let zoom_x = (f64::from(width) / (TILE_SIZE * x_fraction)).log2();
    let zoom_y = (f64::from(height) / (TILE_SIZE * y_fraction)).log2();

    zoom_x.min(zoom_y).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_normalization() {
        let bounds = Bounds::new([47.0, 8.0], [46.0, 7.0]);
        assert_eq!(bounds.south(), 46.0);
        assert_eq!(bounds.north(), 47.0);
        assert_eq!(bounds.west(), 7.0);
        assert_eq!(bounds.east(), 8.0);
        assert_eq!(bounds.center(), [46.5, 7.5]);
    }

    #[test]
    fn test_contains_and_clamp() {
        let bounds = Bounds::new([-10.0, -20.0], [10.0, 20.0]);
        assert!(bounds.contains(0.0, 0.0));
        assert!(!bounds.contains(11.0, 0.0));
        assert!(!bounds.contains(0.0, -21.0));

        assert_eq!(bounds.clamp(15.0, -30.0), (10.0, -20.0));
        assert_eq!(bounds.clamp(-5.0, 5.0), (-5.0, 5.0));
    }

    #[test]
    fn test_fit_zoom_world() {
        // The whole world fits a single tile at zoom 0.
        let world = Bounds::new([-MAX_LATITUDE, -180.0], [MAX_LATITUDE, 180.0]);
        let zoom = fit_zoom(&world, 256.0, 256.0);
        assert!(zoom < 0.01, "zoom was {zoom}");
    }

    #[test]
    fn test_fit_zoom_scales_with_viewport() {
        let bounds = Bounds::new([-10.0, -90.0], [10.0, 90.0]);
        let small = fit_zoom(&bounds, 256.0, 256.0);
        let large = fit_zoom(&bounds, 1024.0, 1024.0);
        // Doubling the viewport twice gains two zoom levels.
        assert!((large - small - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_fit_zoom_degenerate_bounds() {
        let point = Bounds::new([46.0, 7.0], [46.0, 7.0]);
        // A zero-area box fits at any zoom; the result stays finite.
        assert!(fit_zoom(&point, 800.0, 600.0).is_finite());
    }

    #[test]
    fn test_bounds_serde_shape() {
        // Bounds round-trip through the `[[lat, lon], [lat, lon]]` JSON shape
        // that dashboard hosts supply.
        let bounds: Bounds = serde_json::from_str("[[46.0, 7.0], [47.0, 8.0]]").unwrap();
        assert_eq!(bounds, Bounds::new([46.0, 7.0], [47.0, 8.0]));
    }
}
