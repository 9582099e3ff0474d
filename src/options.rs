//! The widget's public configuration surface.
//!
//! All of these are plain value objects with serde derives, so a host
//! dashboard can build them in code or deserialize the whole widget
//! configuration from JSON. Every field has the documented default; a
//! `MapViewOptions::default()` renders an empty world map on the default
//! public tile source.

use geojson::GeoJson;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geo::Bounds;

/// Style of the widget's outer container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    /// Container height: `"<n>px"`, `"<n>%"` of the space offered by the
    /// host, or unparseable (falls back to the default).
    pub height: String,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            height: String::from("600px"),
        }
    }
}

/// Fallback container height in points.
pub const DEFAULT_HEIGHT: f32 = 600.0;

impl MapStyle {
    /// Whether the configured height is a full-height percentage request.
    pub fn is_full_height(&self) -> bool {
        self.height.trim() == "100%"
    }

    /// Resolves the height string against the space offered by the host.
    pub fn resolve_height(&self, available: f32) -> f32 {
        let height = self.height.trim();
        if let Some(pixels) = height.strip_suffix("px") {
            if let Ok(pixels) = pixels.trim().parse::<f32>() {
                return pixels.max(0.0);
            }
        } else if let Some(percent) = height.strip_suffix('%') {
            if let Ok(percent) = percent.trim().parse::<f32>() {
                return (percent / 100.0 * available).max(0.0);
            }
        }
        log::debug!("unparseable container height {:?}, using default", self.height);
        DEFAULT_HEIGHT
    }
}

/// Initial and constrained view parameters of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ViewportOptions {
    /// Initial view as a bounding box. Takes precedence over `center`/`zoom`.
    pub bounds: Option<Bounds>,
    /// Initial center as `[lat, lon]`.
    pub center: Option<[f64; 2]>,
    /// The view cannot zoom out past showing this whole region. Only
    /// effective when `min_zoom` is not set.
    pub min_bounds: Option<Bounds>,
    /// Panning cannot move the view center outside this box.
    pub max_bounds: Option<Bounds>,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
    /// Initial zoom level.
    pub zoom: Option<f64>,
}

/// Default initial center (`[lat, lon]`) when none is configured.
pub const DEFAULT_CENTER: [f64; 2] = [0.0, 0.0];

/// Default initial zoom when none is configured.
pub const DEFAULT_ZOOM: f64 = 4.0;

/// A tile source given by URL template and attribution.
///
/// The URL template uses `{z}`/`{x}`/`{y}` slippy-map placeholders and an
/// optional `{s}` subdomain placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSourceSpec {
    pub url: String,
    pub attribution: String,
}

/// A tile source with the display name shown in the layer switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedTileSource {
    pub name: String,
    pub url: String,
    pub attribution: String,
}

/// Base layer configuration: one fixed tile source, or a list of named
/// sources offered through the layer switcher.
///
/// An empty `Named` list is treated identically to absent configuration:
/// the default public tile source is used and no switcher is shown. A
/// one-element list behaves like `Single`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BaseLayers {
    Single(TileSourceSpec),
    Named(Vec<NamedTileSource>),
}

/// One line overlay entry: geometry plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineLayerSpec {
    /// GeoJSON carrying the line geometries (a geometry, a feature, or a
    /// feature collection).
    pub geometry: GeoJson,
    /// Overlay name shown in the layer switcher and popup heading.
    pub title: String,
    /// Feature property whose value is shown in popups.
    pub popup_property: String,
}

impl LineLayerSpec {
    /// Parses the geometry from a GeoJSON string.
    pub fn from_geojson_str(
        geojson: &str,
        title: impl Into<String>,
        popup_property: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            geometry: geojson.parse()?,
            title: title.into(),
            popup_property: popup_property.into(),
        })
    }
}

/// One point overlay entry: geometry plus display metadata and an optional
/// marker icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLayerSpec {
    /// GeoJSON carrying the point geometries (a geometry, a feature, or a
    /// feature collection).
    pub geometry: GeoJson,
    /// Overlay name shown in the layer switcher and popup heading.
    pub title: String,
    /// Feature property whose value is shown in popups.
    pub popup_property: String,
    /// Absolute URL of the marker icon image. Must be an external
    /// reference; when absent the default marker asset is used.
    #[serde(default)]
    pub icon_source: Option<String>,
}

impl PointLayerSpec {
    /// Parses the geometry from a GeoJSON string.
    pub fn from_geojson_str(
        geojson: &str,
        title: impl Into<String>,
        popup_property: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            geometry: geojson.parse()?,
            title: title.into(),
            popup_property: popup_property.into(),
            icon_source: None,
        })
    }

    pub fn with_icon_source(mut self, source: impl Into<String>) -> Self {
        self.icon_source = Some(source.into());
        self
    }
}

/// The complete widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MapViewOptions {
    /// Optional identifier of the container, namespacing the widget's UI
    /// state when a dashboard embeds several map views.
    pub id: Option<String>,
    /// Container style.
    pub style: MapStyle,
    /// Initial and constrained view parameters.
    pub map_options: ViewportOptions,
    /// Base layer configuration; absent means the default public source.
    pub base_layers: Option<BaseLayers>,
    /// Line overlay entries, in switcher order.
    pub lines: Vec<LineLayerSpec>,
    /// Point overlay entries, in switcher order.
    pub points: Vec<PointLayerSpec>,
}
