//! The map view widget.

use std::collections::HashMap;

use egui::{Align2, Color32, FontId, Rect, Response, Ui, Vec2};
use walkers::{lon_lat, HttpTiles, Map, MapMemory, Position};

use crate::geo::fit_zoom;
use crate::layer::{
    resolve_base_layers, resolve_line_overlays, resolve_point_overlays, OverlayGroup,
    UrlTemplateSource,
};
use crate::options::{MapViewOptions, ViewportOptions, DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::ui::layer_control::show_layer_control;
use crate::ui::overlays::{OpenPopup, OverlayPlugin};

/// An embeddable map view: a slippy-map viewport with configurable base
/// layers, line and point overlays, popups, and a layer control.
///
/// The widget owns only transient UI state (the map engine's viewport
/// memory and tile pipelines, the selected base layer, overlay visibility,
/// the open popup). Everything rendered is re-derived from the options on
/// every pass.
///
/// ```no_run
/// # use mapview::{MapView, MapViewOptions};
/// # fn ui(ui: &mut egui::Ui) {
/// let mut map = MapView::new(MapViewOptions::default());
/// map.show(ui);
/// # }
/// ```
pub struct MapView {
    options: MapViewOptions,
    memory: MapMemory,
    /// Tile pipelines keyed by source URL, created lazily per base layer.
    tiles: HashMap<String, HttpTiles>,
    selected_base: usize,
    overlay_visibility: HashMap<String, bool>,
    open_popup: Option<OpenPopup>,
    view_initialized: bool,
    full_height_warned: bool,
}

impl MapView {
    /// Creates the widget for the given configuration.
    ///
    /// Emits a single diagnostic warning when the container style requests
    /// a 100% height, since the map may fail to size when the container's
    /// parent also uses a percentage height. Rendering proceeds regardless.
    pub fn new(options: MapViewOptions) -> Self {
        let full_height_warned = options.style.is_full_height();
        if full_height_warned {
            log::warn!("map may not display if the container and its parent both use 100% height");
        }

        Self {
            options,
            memory: MapMemory::default(),
            tiles: HashMap::new(),
            selected_base: 0,
            overlay_visibility: HashMap::new(),
            open_popup: None,
            view_initialized: false,
            full_height_warned,
        }
    }

    pub fn options(&self) -> &MapViewOptions {
        &self.options
    }

    /// Mutable access to the configuration. Transient UI state is keyed by
    /// position-derived layer ids, so it carries over between compatible
    /// configurations.
    pub fn options_mut(&mut self) -> &mut MapViewOptions {
        &mut self.options
    }

    /// Renders the map view into the available width, sized to the
    /// configured container height.
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        // Marker icons are fetched through the context's URI image loaders.
        egui_extras::install_image_loaders(ui.ctx());

        let base = resolve_base_layers(self.options.base_layers.as_ref());
        if self.selected_base >= base.choices.len() {
            self.selected_base = 0;
        }

        let mut groups = resolve_line_overlays(&self.options.lines);
        groups.extend(resolve_point_overlays(&self.options.points));

        let height = self.options.style.resolve_height(ui.available_height());
        let size = Vec2::new(ui.available_width(), height);

        let (center, initial_zoom) = initial_view(&self.options.map_options, size);
        if !self.view_initialized {
            let _ = self.memory.set_zoom(initial_zoom);
            self.view_initialized = true;
        }
        self.apply_view_constraints(size);

        let selected = base.choices[self.selected_base].clone();
        let tiles = self
            .tiles
            .entry(selected.url.clone())
            .or_insert_with(|| HttpTiles::new(UrlTemplateSource::new(&selected), ui.ctx().clone()));

        let visible: Vec<&OverlayGroup> = groups
            .iter()
            .filter(|group| {
                self.overlay_visibility
                    .get(&group.id)
                    .copied()
                    .unwrap_or(true)
            })
            .collect();

        let memory = &mut self.memory;
        let open_popup = &mut self.open_popup;
        let container_id = self.options.id.clone();

        let response = ui
            .push_id(container_id, |ui| {
                ui.allocate_ui(size, |ui| {
                    ui.set_min_size(size);
                    let map = Map::new(Some(tiles), memory, center).with_plugin(OverlayPlugin {
                        groups: visible,
                        open_popup,
                    });
                    ui.add(map)
                })
                .inner
            })
            .inner;

        show_layer_control(
            ui,
            response.rect,
            &base,
            &mut self.selected_base,
            &groups,
            &mut self.overlay_visibility,
        );
        draw_attribution(ui, response.rect, &selected.attribution);

        response
    }

    /// Re-applies the configured zoom and pan constraints to the engine's
    /// view memory. Runs every pass since the engine processed input since
    /// the last one.
    fn apply_view_constraints(&mut self, size: Vec2) {
        let viewport = &self.options.map_options;

        let zoom = self.memory.zoom();
        if let Some(min_zoom) = effective_min_zoom(viewport, size) {
            if zoom < min_zoom {
                let _ = self.memory.set_zoom(min_zoom);
            }
        }
        if let Some(max_zoom) = viewport.max_zoom {
            if zoom > max_zoom {
                let _ = self.memory.set_zoom(max_zoom);
            }
        }

        if let Some(bounds) = &viewport.max_bounds {
            if let Some(center) = self.memory.detached() {
                if !bounds.contains(center.y(), center.x()) {
                    let (lat, lon) = bounds.clamp(center.y(), center.x());
                    self.memory.center_at(lon_lat(lon, lat));
                }
            }
        }
    }
}

/// Initial center and zoom from the viewport options. Configured bounds
/// take precedence over a center/zoom pair.
fn initial_view(viewport: &ViewportOptions, size: Vec2) -> (Position, f64) {
    if let Some(bounds) = &viewport.bounds {
        let [lat, lon] = bounds.center();
        (lon_lat(lon, lat), fit_zoom(bounds, size.x, size.y))
    } else {
        let [lat, lon] = viewport.center.unwrap_or(DEFAULT_CENTER);
        (lon_lat(lon, lat), viewport.zoom.unwrap_or(DEFAULT_ZOOM))
    }
}

/// The effective minimum zoom: the configured one, or the zoom at which
/// the whole min-bounds region is visible.
fn effective_min_zoom(viewport: &ViewportOptions, size: Vec2) -> Option<f64> {
    viewport
        .min_zoom
        .or_else(|| {
            viewport
                .min_bounds
                .as_ref()
                .map(|bounds| fit_zoom(bounds, size.x, size.y))
        })
}

fn draw_attribution(ui: &Ui, map_rect: Rect, attribution: &str) {
    if attribution.is_empty() {
        return;
    }
    let painter = ui.painter().with_clip_rect(map_rect);
    painter.text(
        map_rect.right_bottom() + Vec2::new(-4.0, -2.0),
        Align2::RIGHT_BOTTOM,
        attribution,
        FontId::proportional(10.0),
        Color32::from_gray(120),
    );
}
