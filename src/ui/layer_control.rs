//! The layer control overlay: base layer switcher and overlay toggles.

use std::collections::HashMap;

use egui::{Align2, Rect, Ui, Vec2};

use crate::layer::{OverlayGroup, ResolvedBaseLayers};

/// Margin between the control and the map viewport corner.
const CONTROL_MARGIN: Vec2 = Vec2::new(-10.0, 10.0);

/// Draws the layer control anchored to the top-right of the map viewport.
///
/// Lists the selectable base layers first, then every overlay group in the
/// order given (lines before points). Nothing is drawn when there is only
/// a fixed base layer and no overlays.
pub fn show_layer_control(
    ui: &Ui,
    map_rect: Rect,
    base: &ResolvedBaseLayers,
    selected_base: &mut usize,
    groups: &[OverlayGroup],
    visibility: &mut HashMap<String, bool>,
) {
    if !base.selectable && groups.is_empty() {
        return;
    }

    egui::Area::new(ui.id().with("layer_control"))
        .order(egui::Order::Foreground)
        .pivot(Align2::RIGHT_TOP)
        .fixed_pos(map_rect.right_top() + CONTROL_MARGIN)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                if base.selectable {
                    for (index, choice) in base.choices.iter().enumerate() {
                        ui.radio_value(selected_base, index, &choice.name);
                    }
                }

                if base.selectable && !groups.is_empty() {
                    ui.separator();
                }

                for group in groups {
                    // Overlays start out visible.
                    let checked = visibility.entry(group.id.clone()).or_insert(true);
                    ui.checkbox(checked, &group.name);
                }
            });
        });
}
