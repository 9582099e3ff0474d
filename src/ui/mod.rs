//! Widget composition: the map view itself, the layer control overlay,
//! and the overlay painting plugin.

mod layer_control;
mod map_view;
mod overlays;

pub use map_view::MapView;
