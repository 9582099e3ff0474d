//! Marker icon resolution.

use egui::Vec2;

/// Fixed public asset used when a point layer specifies no icon source.
pub const DEFAULT_ICON_URL: &str = "https://unpkg.com/leaflet@1.4.0/dist/images/marker-icon.png";

/// Natural size of the default marker asset.
const DEFAULT_ICON_SIZE: Vec2 = Vec2::new(25.0, 41.0);

/// Fixed size applied to custom icon sources.
const CUSTOM_ICON_SIZE: Vec2 = Vec2::new(25.0, 25.0);

/// A resolved marker icon: image source plus placement offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerIcon {
    /// Absolute URL of the icon image.
    pub uri: String,
    pub size: Vec2,
    /// Offset from the icon's top-left corner to the point it marks.
    pub anchor: Vec2,
    /// Offset from the marked point to the popup's bottom-center.
    pub popup_anchor: Vec2,
}

/// Resolves a point layer's icon.
///
/// A custom source yields a 25x25 icon anchored at its center with the
/// popup just above it; no source yields the default marker pin anchored
/// at its tip.
pub fn resolve_icon(source: Option<&str>) -> MarkerIcon {
    match source {
        Some(uri) => MarkerIcon {
            uri: uri.to_owned(),
            size: CUSTOM_ICON_SIZE,
            anchor: Vec2::new(12.5, 12.5),
            popup_anchor: Vec2::new(0.0, -12.5),
        },
        None => MarkerIcon {
            uri: String::from(DEFAULT_ICON_URL),
            size: DEFAULT_ICON_SIZE,
            anchor: Vec2::new(12.5, 41.0),
            popup_anchor: Vec2::new(0.0, -41.0),
        },
    }
}
