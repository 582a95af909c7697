use eframe::egui::{Align2, FontId, Pos2, Rect, Sense, Ui, Vec2};

use crate::color::ColorScale;

pub const COLOR_BAR_WIDTH: f32 = 110.0;

const STRIPS: usize = 64;
const TICKS: usize = 5;

/// Vertical colour bar with `TICKS` labelled values, `max` at the top.
pub fn color_bar(
    ui: &mut Ui,
    scale: &ColorScale,
    min: f64,
    max: f64,
    title: &str,
    height: f32,
    label: impl Fn(f64) -> String,
) {
    let (response, painter) =
        ui.allocate_painter(Vec2::new(COLOR_BAR_WIDTH, height), Sense::hover());
    let rect = response.rect;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(11.0);

    painter.text(rect.left_top(), Align2::LEFT_TOP, title, font.clone(), text_color);

    let bar = Rect::from_min_max(
        Pos2::new(rect.left(), rect.top() + 24.0),
        Pos2::new(rect.left() + 16.0, rect.bottom() - 16.0),
    );
    let strip_height = bar.height() / STRIPS as f32;
    for i in 0..STRIPS {
        let t = i as f64 / (STRIPS - 1) as f64;
        let top = bar.bottom() - (i + 1) as f32 * strip_height;
        let strip = Rect::from_min_max(
            Pos2::new(bar.left(), top),
            Pos2::new(bar.right(), top + strip_height + 0.5),
        );
        painter.rect_filled(strip, 0.0, scale.sample(t));
    }

    for i in 0..TICKS {
        let t = i as f64 / (TICKS - 1) as f64;
        let value = min + (max - min) * t;
        let y = bar.bottom() - bar.height() * t as f32;
        painter.text(
            Pos2::new(bar.right() + 6.0, y),
            Align2::LEFT_CENTER,
            label(value),
            font.clone(),
            text_color,
        );
    }
}
