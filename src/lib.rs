//! An embeddable map view widget for egui dashboards.
//!
//! [`MapView`] renders a slippy-map viewport with configurable base tile
//! layers, line overlays, and point overlays sourced from GeoJSON. Each
//! overlay is an independently toggleable entry in a top-right layer
//! control, and clicking a shape opens a popup showing the configured
//! feature property. Tile download and pan/zoom interaction are delegated
//! to the `walkers` map engine; this crate only derives what to render
//! from its configuration.
//!
//! ```no_run
//! use mapview::{LineLayerSpec, MapView, MapViewOptions};
//!
//! # fn build() -> mapview::Result<MapView> {
//! let mut options = MapViewOptions::default();
//! options.lines.push(LineLayerSpec::from_geojson_str(
//!     r#"{"type": "LineString", "coordinates": [[7.0, 46.0], [8.0, 47.0]]}"#,
//!     "Routes",
//!     "name",
//! )?);
//! Ok(MapView::new(options))
//! # }
//! ```

pub mod error;
pub mod geo;
pub mod layer;
pub mod options;
pub mod ui;

pub use error::{Error, Result};
pub use options::{
    BaseLayers, LineLayerSpec, MapStyle, MapViewOptions, NamedTileSource, PointLayerSpec,
    TileSourceSpec, ViewportOptions,
};
pub use ui::MapView;
