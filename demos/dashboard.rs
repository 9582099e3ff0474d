//! A small host dashboard embedding the map view widget.
//!
//! Run with `cargo run --example dashboard`. Set `RUST_LOG=debug` to see
//! the widget's diagnostics.

use eframe::egui;
use mapview::{
    BaseLayers, LineLayerSpec, MapStyle, MapView, MapViewOptions, NamedTileSource, PointLayerSpec,
    ViewportOptions,
};

const RIVERS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"name": "Aare"},
            "geometry": {
                "type": "LineString",
                "coordinates": [[7.24, 46.07], [7.45, 46.95], [8.23, 47.48]]
            }
        },
        {
            "type": "Feature",
            "properties": {"name": "Rhine"},
            "geometry": {
                "type": "LineString",
                "coordinates": [[8.23, 47.48], [8.55, 47.59], [9.66, 47.44]]
            }
        }
    ]
}"#;

const CITIES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"name": "Bern", "population": 134591},
            "geometry": {"type": "Point", "coordinates": [7.447, 46.948]}
        },
        {
            "type": "Feature",
            "properties": {"name": "Zurich", "population": 421878},
            "geometry": {"type": "Point", "coordinates": [8.541, 47.374]}
        }
    ]
}"#;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Map view demo",
        options,
        Box::new(|_cc| Ok(Box::new(Dashboard::new()))),
    )
}

struct Dashboard {
    map: MapView,
}

impl Dashboard {
    fn new() -> Self {
        let options = MapViewOptions {
            id: Some(String::from("demo_map")),
            style: MapStyle {
                height: String::from("600px"),
            },
            map_options: ViewportOptions {
                center: Some([46.95, 7.45]),
                zoom: Some(8.0),
                ..Default::default()
            },
            base_layers: Some(BaseLayers::Named(vec![
                NamedTileSource {
                    name: String::from("OpenStreetMap"),
                    url: String::from("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"),
                    attribution: String::from("© OpenStreetMap contributors"),
                },
                NamedTileSource {
                    name: String::from("OpenTopoMap"),
                    url: String::from("https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png"),
                    attribution: String::from("© OpenStreetMap contributors, SRTM | © OpenTopoMap"),
                },
            ])),
            lines: vec![LineLayerSpec::from_geojson_str(RIVERS, "Rivers", "name")
                .expect("rivers geojson is valid")],
            points: vec![PointLayerSpec::from_geojson_str(CITIES, "Cities", "population")
                .expect("cities geojson is valid")],
        };

        Self {
            map: MapView::new(options),
        }
    }
}

impl eframe::App for Dashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Regional overview");
            ui.add_space(8.0);
            self.map.show(ui);
        });
    }
}
