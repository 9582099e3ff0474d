//! Overlay group resolution.
//!
//! Each feature set entry becomes one named, independently toggleable
//! overlay group holding the shapes its geometry decomposed into. Groups
//! are derived fresh on every render pass; only their visibility flags
//! (keyed by the position-derived group id) outlive a pass.

use geo_types::Coord;

use crate::geo::{decompose_lines, decompose_points, LineShape, PointShape};
use crate::layer::icon::{resolve_icon, MarkerIcon};
use crate::options::{LineLayerSpec, PointLayerSpec};

/// One renderable shape inside an overlay group.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayShape {
    Line(LineShape),
    Point {
        shape: PointShape,
        icon: MarkerIcon,
    },
}

impl OverlayShape {
    /// The shape's popup value, if its source feature carried one.
    pub fn popup_value(&self) -> Option<&str> {
        match self {
            OverlayShape::Line(line) => line.popup_value.as_deref(),
            OverlayShape::Point { shape, .. } => shape.popup_value.as_deref(),
        }
    }

    /// A representative lon/lat coordinate the popup anchors to.
    pub fn popup_position(&self) -> Option<Coord<f64>> {
        match self {
            OverlayShape::Line(line) => line.points.get(line.points.len() / 2).copied(),
            OverlayShape::Point { shape, .. } => Some(shape.position),
        }
    }
}

/// A named, independently toggleable collection of rendered shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayGroup {
    /// Stable identifier derived from the entry's position.
    pub id: String,
    /// Name shown in the layer switcher and popup headings.
    pub name: String,
    pub shapes: Vec<OverlayShape>,
}

/// Resolves line overlay entries into groups, one per entry, in order.
pub fn resolve_line_overlays(specs: &[LineLayerSpec]) -> Vec<OverlayGroup> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| OverlayGroup {
            id: format!("line_layer{index}"),
            name: spec.title.clone(),
            shapes: decompose_lines(&spec.geometry, &spec.popup_property)
                .into_iter()
                .map(OverlayShape::Line)
                .collect(),
        })
        .collect()
}

/// Resolves point overlay entries into groups, one per entry, in order.
pub fn resolve_point_overlays(specs: &[PointLayerSpec]) -> Vec<OverlayGroup> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let icon = resolve_icon(spec.icon_source.as_deref());
            OverlayGroup {
                id: format!("point_layer{index}"),
                name: spec.title.clone(),
                shapes: decompose_points(&spec.geometry, &spec.popup_property)
                    .into_iter()
                    .map(|shape| OverlayShape::Point {
                        shape,
                        icon: icon.clone(),
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::icon::DEFAULT_ICON_URL;

    fn line_spec(title: &str) -> LineLayerSpec {
        LineLayerSpec::from_geojson_str(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {"name": "Aare"},
                        "geometry": {
                            "type": "MultiLineString",
                            "coordinates": [
                                [[7.0, 46.0], [7.5, 46.5]],
                                [[7.5, 46.5], [8.0, 47.0]]
                            ]
                        }
                    },
                    {
                        "type": "Feature",
                        "properties": {"name": "Rhine"},
                        "geometry": {"type": "LineString", "coordinates": [[8.0, 47.0], [9.0, 47.5]]}
                    }
                ]
            }"#,
            title,
            "name",
        )
        .unwrap()
    }

    fn point_spec(title: &str) -> PointLayerSpec {
        PointLayerSpec::from_geojson_str(
            r#"{
                "type": "Feature",
                "properties": {"name": "Bern"},
                "geometry": {"type": "Point", "coordinates": [7.45, 46.95]}
            }"#,
            title,
            "name",
        )
        .unwrap()
    }

    #[test]
    fn test_empty_specs_produce_no_groups() {
        assert!(resolve_line_overlays(&[]).is_empty());
        assert!(resolve_point_overlays(&[]).is_empty());
    }

    #[test]
    fn test_one_entry_produces_one_group_with_decomposed_shapes() {
        let groups = resolve_line_overlays(&[line_spec("Rivers")]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, "line_layer0");
        assert_eq!(groups[0].name, "Rivers");
        // Two MultiLineString parts plus one LineString.
        assert_eq!(groups[0].shapes.len(), 3);
        assert_eq!(groups[0].shapes[0].popup_value(), Some("Aare"));
        assert_eq!(groups[0].shapes[2].popup_value(), Some("Rhine"));
    }

    #[test]
    fn test_group_ids_are_position_derived() {
        let groups = resolve_line_overlays(&[line_spec("A"), line_spec("B")]);
        assert_eq!(groups[0].id, "line_layer0");
        assert_eq!(groups[1].id, "line_layer1");

        let groups = resolve_point_overlays(&[point_spec("Cities")]);
        assert_eq!(groups[0].id, "point_layer0");
    }

    #[test]
    fn test_point_group_carries_resolved_icon() {
        let groups = resolve_point_overlays(&[point_spec("Cities")]);
        match &groups[0].shapes[0] {
            OverlayShape::Point { icon, .. } => assert_eq!(icon.uri, DEFAULT_ICON_URL),
            OverlayShape::Line(_) => panic!("expected point shape"),
        }

        let groups =
            resolve_point_overlays(&[point_spec("Cities").with_icon_source("https://assets.test/dot.png")]);
        match &groups[0].shapes[0] {
            OverlayShape::Point { icon, .. } => assert_eq!(icon.uri, "https://assets.test/dot.png"),
            OverlayShape::Line(_) => panic!("expected point shape"),
        }
    }

    #[test]
    fn test_resolution_is_pure() {
        // Identical inputs yield structurally identical groups across passes.
        let lines = [line_spec("Rivers")];
        let points = [point_spec("Cities")];
        assert_eq!(resolve_line_overlays(&lines), resolve_line_overlays(&lines));
        assert_eq!(
            resolve_point_overlays(&points),
            resolve_point_overlays(&points)
        );
    }

    #[test]
    fn test_popup_position_for_lines_and_points() {
        let groups = resolve_line_overlays(&[line_spec("Rivers")]);
        // Middle vertex of the line.
        assert!(groups[0].shapes[0].popup_position().is_some());

        let groups = resolve_point_overlays(&[point_spec("Cities")]);
        let position = groups[0].shapes[0].popup_position().unwrap();
        assert_eq!((position.x, position.y), (7.45, 46.95));
    }
}
