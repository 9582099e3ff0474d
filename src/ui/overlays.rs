//! Overlay painting and popup interaction on top of the map viewport.
//!
//! Runs as a map-engine plugin: the engine hands over the widget response
//! and a projector for the current view, and this module paints the
//! visible overlay groups, hit-tests clicks against their shapes, and
//! draws the open popup.

use egui::{Align2, Color32, Pos2, Rect, Response, RichText, Stroke, Ui, Vec2};
use geo_types::Coord;
use walkers::{lon_lat, MapMemory, Plugin, Projector};

use crate::layer::{OverlayGroup, OverlayShape};

/// Stroke applied to line shapes.
const LINE_STROKE: Stroke = Stroke {
    width: 2.0,
    color: Color32::BLACK,
};

/// Pixel distance within which a click counts as hitting a line.
const LINE_HIT_RADIUS: f32 = 6.0;

/// Identifies the shape whose popup is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPopup {
    pub group_id: String,
    pub shape_index: usize,
}

/// The next popup state after a render pass.
///
/// A click replaces the open popup with the hit shape's, closes it when
/// the same shape is hit again, and closes it when nothing was hit.
/// Without a click the current state stands.
fn next_popup(
    current: Option<OpenPopup>,
    clicked: bool,
    hit: Option<OpenPopup>,
) -> Option<OpenPopup> {
    if !clicked {
        return current;
    }
    match hit {
        Some(hit) if current.as_ref() == Some(&hit) => None,
        other => other,
    }
}

pub struct OverlayPlugin<'a> {
    /// Visible overlay groups, lines before points.
    pub groups: Vec<&'a OverlayGroup>,
    pub open_popup: &'a mut Option<OpenPopup>,
}

impl Plugin for OverlayPlugin<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut Ui,
        response: &Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let rect = response.rect;
        let painter = ui.painter().with_clip_rect(rect);
        let click = response
            .clicked()
            .then(|| response.interact_pointer_pos())
            .flatten();
        let mut hit = None;

        for group in &self.groups {
            for (shape_index, shape) in group.shapes.iter().enumerate() {
                match shape {
                    OverlayShape::Line(line) => {
                        let points: Vec<Pos2> =
                            line.points.iter().map(|c| project(projector, *c)).collect();
                        if points.len() < 2 || !screen_bbox_intersects(&points, rect) {
                            continue;
                        }
                        for window in points.windows(2) {
                            painter.line_segment([window[0], window[1]], LINE_STROKE);
                        }
                        if let Some(pointer) = click {
                            let near = points.windows(2).any(|window| {
                                dist_sq_to_segment(pointer, window[0], window[1])
                                    <= LINE_HIT_RADIUS * LINE_HIT_RADIUS
                            });
                            if near {
                                hit = Some(OpenPopup {
                                    group_id: group.id.clone(),
                                    shape_index,
                                });
                            }
                        }
                    }
                    OverlayShape::Point { shape, icon } => {
                        let position = project(projector, shape.position);
                        let icon_rect = Rect::from_min_size(position - icon.anchor, icon.size);
                        if !icon_rect.intersects(rect) {
                            continue;
                        }
                        egui::Image::new(icon.uri.as_str()).paint_at(ui, icon_rect);
                        if let Some(pointer) = click {
                            if icon_rect.contains(pointer) {
                                // Later groups draw on top, so the last hit wins.
                                hit = Some(OpenPopup {
                                    group_id: group.id.clone(),
                                    shape_index,
                                });
                            }
                        }
                    }
                }
            }
        }

        *self.open_popup = next_popup(self.open_popup.take(), click.is_some(), hit);

        // Drop the popup when its group was toggled off or the shape is gone.
        let target = self.open_popup.as_ref().and_then(|open| {
            self.groups
                .iter()
                .find(|group| group.id == open.group_id)
                .and_then(|group| group.shapes.get(open.shape_index).map(|s| (*group, s)))
        });
        match target {
            Some((group, shape)) => draw_popup(ui, projector, group, shape),
            None => *self.open_popup = None,
        }
    }
}

fn draw_popup(ui: &Ui, projector: &Projector, group: &OverlayGroup, shape: &OverlayShape) {
    let Some(position) = shape.popup_position() else {
        return;
    };
    let offset = match shape {
        OverlayShape::Point { icon, .. } => icon.popup_anchor,
        OverlayShape::Line(_) => Vec2::new(0.0, -6.0),
    };
    let anchor = project(projector, position) + offset;

    egui::Area::new(ui.id().with(("overlay_popup", &group.id)))
        .order(egui::Order::Foreground)
        .pivot(Align2::CENTER_BOTTOM)
        .fixed_pos(anchor)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(RichText::new(format!("{}:", group.name)).strong());
                if let Some(value) = shape.popup_value() {
                    ui.label(value);
                }
            });
        });
}

fn project(projector: &Projector, coord: Coord<f64>) -> Pos2 {
    let projected = projector.project(lon_lat(coord.x, coord.y));
    Pos2::new(projected.x, projected.y)
}

/// Quick visibility check on already-projected points.
fn screen_bbox_intersects(points: &[Pos2], rect: Rect) -> bool {
    let mut bbox = Rect::NOTHING;
    for point in points {
        bbox.extend_with(*point);
    }
    bbox.expand(LINE_HIT_RADIUS).intersects(rect)
}

/// Squared distance from a point to a line segment.
fn dist_sq_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq == 0.0 {
        return (p - a).length_sq();
    }
    let t = ((p - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length_sq()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn popup(group: &str, index: usize) -> OpenPopup {
        OpenPopup {
            group_id: group.to_owned(),
            shape_index: index,
        }
    }

    #[test]
    fn test_dist_sq_to_segment() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 0.0);

        // Perpendicular to the middle of the segment.
        assert_eq!(dist_sq_to_segment(Pos2::new(5.0, 3.0), a, b), 9.0);
        // Beyond an endpoint the distance is to the endpoint.
        assert_eq!(dist_sq_to_segment(Pos2::new(13.0, 4.0), a, b), 25.0);
        // Degenerate segment.
        assert_eq!(dist_sq_to_segment(Pos2::new(3.0, 4.0), a, a), 25.0);
    }

    #[test]
    fn test_next_popup_transitions() {
        // No click keeps the current state.
        assert_eq!(next_popup(Some(popup("g", 0)), false, None), Some(popup("g", 0)));

        // A click on a shape opens its popup, replacing any other.
        assert_eq!(
            next_popup(Some(popup("g", 0)), true, Some(popup("h", 2))),
            Some(popup("h", 2))
        );

        // A click on the open shape closes the popup.
        assert_eq!(next_popup(Some(popup("g", 0)), true, Some(popup("g", 0))), None);

        // A click on empty map closes the popup.
        assert_eq!(next_popup(Some(popup("g", 0)), true, None), None);
    }

    #[test]
    fn test_screen_bbox_intersects() {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::Vec2::new(100.0, 100.0));
        let inside = vec![Pos2::new(10.0, 10.0), Pos2::new(20.0, 20.0)];
        let outside = vec![Pos2::new(500.0, 500.0), Pos2::new(600.0, 600.0)];
        assert!(screen_bbox_intersects(&inside, rect));
        assert!(!screen_bbox_intersects(&outside, rect));
    }
}
