//! Layer resolution: base tile sources, overlay groups, and marker icons.

mod base;
mod icon;
mod overlay;

pub use base::{
    resolve_base_layers, ResolvedBaseLayer, ResolvedBaseLayers, UrlTemplateSource,
    DEFAULT_ATTRIBUTION, DEFAULT_TILE_NAME, DEFAULT_TILE_URL,
};
pub use icon::{resolve_icon, MarkerIcon, DEFAULT_ICON_URL};
pub use overlay::{resolve_line_overlays, resolve_point_overlays, OverlayGroup, OverlayShape};
