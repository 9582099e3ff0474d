//! Decomposition of GeoJSON geometry collections into renderable shapes.
//!
//! A feature set entry carries one GeoJSON value (a geometry, a feature, or
//! a whole feature collection) and the name of the property to surface in
//! popups. Decomposition flattens that value into individual line or point
//! shapes, each carrying the popup value resolved from its source feature.
//! Geometry of the wrong kind degrades to nothing rather than failing.

use geo_types::Coord;
use geojson::{Feature, GeoJson, Geometry, JsonObject, Value};

/// A single renderable line, decomposed from a feature set entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    /// Vertices as lon/lat coordinates (GeoJSON axis order).
    pub points: Vec<Coord<f64>>,
    /// Value of the entry's popup property on the source feature.
    pub popup_value: Option<String>,
}

/// A single renderable marker, decomposed from a feature set entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PointShape {
    /// Position as a lon/lat coordinate (GeoJSON axis order).
    pub position: Coord<f64>,
    /// Value of the entry's popup property on the source feature.
    pub popup_value: Option<String>,
}

/// Flattens a GeoJSON value into line shapes.
///
/// Each `LineString` contributes one shape; a `MultiLineString` contributes
/// one shape per part, all sharing the source feature's popup value.
pub fn decompose_lines(geojson: &GeoJson, popup_property: &str) -> Vec<LineShape> {
    let mut shapes = Vec::new();
    for_each_geometry(geojson, popup_property, &mut |geometry, popup_value| {
        collect_lines(geometry, popup_value, &mut shapes);
    });
    shapes
}

/// Flattens a GeoJSON value into point shapes.
///
/// Each `Point` contributes one marker; a `MultiPoint` contributes one
/// marker per position, all sharing the source feature's popup value.
pub fn decompose_points(geojson: &GeoJson, popup_property: &str) -> Vec<PointShape> {
    let mut shapes = Vec::new();
    for_each_geometry(geojson, popup_property, &mut |geometry, popup_value| {
        collect_points(geometry, popup_value, &mut shapes);
    });
    shapes
}

/// Walks features/geometries of a GeoJSON value, resolving each feature's
/// popup value before handing its geometry to `visit`.
fn for_each_geometry(
    geojson: &GeoJson,
    popup_property: &str,
    visit: &mut dyn FnMut(&Geometry, Option<&str>),
) {
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            for feature in &collection.features {
                visit_feature(feature, popup_property, visit);
            }
        }
        GeoJson::Feature(feature) => visit_feature(feature, popup_property, visit),
        GeoJson::Geometry(geometry) => visit(geometry, None),
    }
}

fn visit_feature(
    feature: &Feature,
    popup_property: &str,
    visit: &mut dyn FnMut(&Geometry, Option<&str>),
) {
    let popup_value = feature
        .properties
        .as_ref()
        .and_then(|properties| property_display_value(properties, popup_property));
    if let Some(geometry) = &feature.geometry {
        visit(geometry, popup_value.as_deref());
    }
}

/// Renders a feature property as popup text. Missing properties and values
/// without a scalar rendering yield `None`, never an error.
fn property_display_value(properties: &JsonObject, name: &str) -> Option<String> {
    match properties.get(name)? {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        serde_json::Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn collect_lines(geometry: &Geometry, popup_value: Option<&str>, shapes: &mut Vec<LineShape>) {
    match &geometry.value {
        Value::LineString(positions) => shapes.push(LineShape {
            points: to_coords(positions),
            popup_value: popup_value.map(str::to_owned),
        }),
        Value::MultiLineString(parts) => {
            for positions in parts {
                shapes.push(LineShape {
                    points: to_coords(positions),
                    popup_value: popup_value.map(str::to_owned),
                });
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_lines(geometry, popup_value, shapes);
            }
        }
        _ => {
            log::debug!("skipping non-line geometry in line layer");
        }
    }
}

fn collect_points(geometry: &Geometry, popup_value: Option<&str>, shapes: &mut Vec<PointShape>) {
    match &geometry.value {
        Value::Point(position) => {
            if let Some(position) = to_coord(position) {
                shapes.push(PointShape {
                    position,
                    popup_value: popup_value.map(str::to_owned),
                });
            }
        }
        Value::MultiPoint(positions) => {
            for position in positions {
                if let Some(position) = to_coord(position) {
                    shapes.push(PointShape {
                        position,
                        popup_value: popup_value.map(str::to_owned),
                    });
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_points(geometry, popup_value, shapes);
            }
        }
        _ => {
            log::debug!("skipping non-point geometry in point layer");
        }
    }
}

fn to_coords(positions: &[Vec<f64>]) -> Vec<Coord<f64>> {
    positions.iter().filter_map(|p| to_coord(p)).collect()
}

fn to_coord(position: &[f64]) -> Option<Coord<f64>> {
    match position {
        [lon, lat, ..] => Some(Coord { x: *lon, y: *lat }),
        _ => None,
    }
}
