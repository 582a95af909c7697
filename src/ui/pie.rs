use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, FontId, Mesh, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};

use crate::color::generate_palette;
use crate::views::Distribution;

/// Inner radius as a fraction of the outer one.
const HOLE: f32 = 0.3;
const SIZE: f32 = 420.0;
/// Slices narrower than this get no percentage label.
const MIN_LABEL_SWEEP: f32 = 0.25;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Angle of a point around the centre, measured clockwise from 12 o'clock,
/// in `[0, TAU)`. Screen coordinates: y grows downwards.
fn clockwise_from_top(offset: Vec2) -> f32 {
    (offset.y.atan2(offset.x) + FRAC_PI_2).rem_euclid(TAU)
}

/// Index of the slice under `offset`, if it lies on the ring.
fn slice_at(offset: Vec2, inner: f32, outer: f32, fractions: &[f32]) -> Option<usize> {
    let r = offset.length();
    if r < inner || r > outer {
        return None;
    }
    let turn = clockwise_from_top(offset) / TAU;
    let mut acc = 0.0;
    for (i, f) in fractions.iter().enumerate() {
        acc += f;
        if turn < acc {
            return Some(i);
        }
    }
    fractions.len().checked_sub(1)
}

/// Ring segment between two angles (screen angles, radians).
fn ring_segment(center: Pos2, inner: f32, outer: f32, from: f32, to: f32, color: Color32) -> Shape {
    let steps = ((to - from).abs() / 0.04).ceil().max(1.0) as u32;
    let mut mesh = Mesh::default();
    for s in 0..=steps {
        let a = from + (to - from) * s as f32 / steps as f32;
        let dir = Vec2::angled(a);
        mesh.colored_vertex(center + dir * outer, color);
        mesh.colored_vertex(center + dir * inner, color);
    }
    for s in 0..steps {
        let i = 2 * s;
        mesh.add_triangle(i, i + 1, i + 2);
        mesh.add_triangle(i + 1, i + 3, i + 2);
    }
    Shape::mesh(mesh)
}

// ---------------------------------------------------------------------------
// Donut chart
// ---------------------------------------------------------------------------

/// Donut chart with a legend. Slices run clockwise from 12 o'clock in the
/// view's order.
pub fn donut(ui: &mut Ui, title: &str, center_label: Option<&str>, view: &Distribution) {
    ui.label(title);

    let total = view.total();
    if total == 0 {
        ui.weak("No values to show.");
        return;
    }
    let fractions: Vec<f32> = view
        .slices
        .iter()
        .map(|(_, n)| *n as f32 / total as f32)
        .collect();
    let colors = generate_palette(view.slices.len());

    ui.horizontal_top(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(SIZE), Sense::hover());
        let center = response.rect.center();
        let outer = SIZE * 0.5 - 12.0;
        let inner = outer * HOLE;
        let separator = Stroke::new(1.5, ui.visuals().panel_fill);
        let text_color = ui.visuals().text_color();

        let hovered = response
            .hover_pos()
            .and_then(|pos| slice_at(pos - center, inner, outer, &fractions));

        let mut start = -FRAC_PI_2;
        for (i, fraction) in fractions.iter().enumerate() {
            let sweep = fraction * TAU;
            let reach = if hovered == Some(i) { outer + 8.0 } else { outer };
            painter.add(ring_segment(center, inner, reach, start, start + sweep, colors[i]));

            let edge = Vec2::angled(start);
            painter.line_segment([center + edge * inner, center + edge * reach], separator);

            if sweep >= MIN_LABEL_SWEEP {
                let mid = Vec2::angled(start + sweep * 0.5) * (inner + outer) * 0.5;
                painter.text(
                    center + mid,
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", fraction * 100.0),
                    FontId::proportional(11.0),
                    Color32::WHITE,
                );
            }
            start += sweep;
        }

        if let Some(text) = center_label {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(16.0),
                text_color,
            );
        }

        if let Some((label, count)) = hovered.and_then(|i| view.slices.get(i)) {
            let pct = *count as f32 / total as f32 * 100.0;
            response.on_hover_text_at_pointer(format!("{label}\n{count} ({pct:.1}%)"));
        }

        ui.vertical(|ui: &mut Ui| {
            for ((label, count), color) in view.slices.iter().zip(&colors) {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(*color));
                    ui.label(format!("{label} ({count})"));
                });
            }
        });
    });
}
