use eframe::egui::{Align2, FontId, Pos2, Rect, Sense, Ui, Vec2};

use crate::color::ColorScale;
use crate::format;
use crate::ui::colorbar::{self, COLOR_BAR_WIDTH};
use crate::views::FundingMatrix;

const LABEL_WIDTH: f32 = 260.0;
const LABEL_CHARS: usize = 40;
const HEADER: f32 = 22.0;
const FOOTER: f32 = 48.0;
const CELL_HEIGHT: f32 = 22.0;

/// Shorten a row label to `max` characters, marking the cut with `…`.
fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let kept: String = label.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Grid cell under `offset` (relative to the grid's top-left corner).
fn cell_at(offset: Vec2, cell: Vec2, rows: usize, cols: usize) -> Option<(usize, usize)> {
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    let row = (offset.y / cell.y) as usize;
    let col = (offset.x / cell.x) as usize;
    (row < rows && col < cols).then_some((row, col))
}

/// Funding by sector (rows) and founding year (columns). Blank cells have no
/// matching startups.
pub fn funding_heatmap(ui: &mut Ui, view: &FundingMatrix) {
    let rows = view.sectors.len();
    let cols = view.years.len();
    if rows == 0 || cols == 0 {
        ui.weak("No funding to show.");
        return;
    }

    let scale = ColorScale::viridis();
    let (lo, hi) = view.range.unwrap_or((0.0, 0.0));

    let grid_width = (ui.available_width() - LABEL_WIDTH - COLOR_BAR_WIDTH - 24.0).max(cols as f32 * 24.0);
    let cell = Vec2::new((grid_width / cols as f32).clamp(24.0, 80.0), CELL_HEIGHT);
    let height = HEADER + cell.y * rows as f32 + FOOTER;

    ui.horizontal_top(|ui: &mut Ui| {
        let size = Vec2::new(LABEL_WIDTH + cell.x * cols as f32, height);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let text_color = ui.visuals().text_color();
        let font = FontId::proportional(11.0);

        let origin = response.rect.min + Vec2::new(LABEL_WIDTH, HEADER);
        let grid = Rect::from_min_size(origin, Vec2::new(cell.x * cols as f32, cell.y * rows as f32));

        painter.text(
            Pos2::new(origin.x - 8.0, response.rect.top()),
            Align2::RIGHT_TOP,
            "Focus Sector",
            FontId::proportional(13.0),
            text_color,
        );

        for (r, sector) in view.sectors.iter().enumerate() {
            let y = origin.y + cell.y * r as f32;
            painter.text(
                Pos2::new(origin.x - 8.0, y + cell.y * 0.5),
                Align2::RIGHT_CENTER,
                truncate_label(sector, LABEL_CHARS),
                font.clone(),
                text_color,
            );
            for (c, value) in view.cells[r].iter().enumerate() {
                if let Some(value) = value {
                    let min = Pos2::new(origin.x + cell.x * c as f32, y);
                    painter.rect_filled(
                        Rect::from_min_size(min, cell),
                        0.0,
                        scale.map(*value, lo, hi),
                    );
                }
            }
        }

        for (c, year) in view.years.iter().enumerate() {
            painter.text(
                Pos2::new(origin.x + cell.x * (c as f32 + 0.5), grid.bottom() + 4.0),
                Align2::CENTER_TOP,
                year,
                font.clone(),
                text_color,
            );
        }
        painter.text(
            Pos2::new(grid.center().x, grid.bottom() + 24.0),
            Align2::CENTER_TOP,
            "Founding Year",
            FontId::proportional(13.0),
            text_color,
        );

        let hovered = response
            .hover_pos()
            .and_then(|pos| cell_at(pos - origin, cell, rows, cols));
        if let Some((r, c)) = hovered {
            let amount = match view.cells[r][c] {
                Some(v) => format::funding(v),
                None => "no startups".to_string(),
            };
            response.on_hover_text_at_pointer(format!(
                "{}\n{}\n{amount}",
                view.sectors[r], view.years[c]
            ));
        }

        colorbar::color_bar(ui, &scale, lo, hi, "Funding Amount", height, format::funding);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_are_cut() {
        assert_eq!(truncate_label("Diagnostics", 40), "Diagnostics");
        assert_eq!(truncate_label("abcdef", 4), "abc…");
    }

    #[test]
    fn pointer_maps_to_cell() {
        let cell = Vec2::new(30.0, 20.0);
        assert_eq!(cell_at(Vec2::new(5.0, 5.0), cell, 3, 4), Some((0, 0)));
        assert_eq!(cell_at(Vec2::new(95.0, 45.0), cell, 3, 4), Some((2, 3)));
        assert_eq!(cell_at(Vec2::new(125.0, 5.0), cell, 3, 4), None);
        assert_eq!(cell_at(Vec2::new(-1.0, 5.0), cell, 3, 4), None);
    }
}
