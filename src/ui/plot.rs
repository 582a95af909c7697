use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot, Points, uniform_grid_spacer};

use crate::color::ColorScale;
use crate::format;
use crate::ui::colorbar::{self, COLOR_BAR_WIDTH};
use crate::views::{FundingScatter, RankedCounts, YearCounts};

const TEAL: Color32 = Color32::from_rgb(0, 128, 128);
const BAR_BLUE: Color32 = Color32::from_rgb(99, 110, 250);

/// Label for an axis mark sitting on an integer position, blank elsewhere.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Startups founded each year (vertical bars)
// ---------------------------------------------------------------------------

pub fn startups_per_year(ui: &mut Ui, view: &YearCounts) {
    let bars: Vec<Bar> = view
        .years
        .iter()
        .zip(view.positions())
        .map(|((year, count), x)| Bar::new(x, *count as f64).name(year.to_string()).width(0.8))
        .collect();

    let mut plot = Plot::new("startups_per_year")
        .height(500.0)
        .x_axis_label("Year")
        .y_axis_label("Count")
        .include_y(0.0)
        .allow_scroll(false);

    if !view.is_numeric() {
        let labels: Vec<String> = view.years.iter().map(|(y, _)| y.to_string()).collect();
        plot = plot.x_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value));
    }

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars).color(TEAL).name("Startups"));
    });
}

// ---------------------------------------------------------------------------
// Funding vs. founding year (scatter)
// ---------------------------------------------------------------------------

pub fn funding_vs_year(ui: &mut Ui, view: &FundingScatter) {
    let scale = ColorScale::greens();
    let (lo, hi) = view.funding_range().unwrap_or((0.0, 0.0));
    let height = 600.0;

    ui.horizontal_top(|ui: &mut Ui| {
        let width = (ui.available_width() - COLOR_BAR_WIDTH - 16.0).max(200.0);
        Plot::new("funding_vs_year")
            .width(width)
            .height(height)
            .x_axis_label("Founding Year")
            .y_axis_label("Funding Amount")
            .y_axis_formatter(|mark: GridMark, _range| format::funding(mark.value))
            .label_formatter(|name, value| {
                if name.is_empty() {
                    format!("{:.0}, {}", value.x, format::funding(value.y))
                } else {
                    format!(
                        "Startup: {name}\nFounding Year: {:.0}\nFunding Amount: {}",
                        value.x,
                        format::funding(value.y)
                    )
                }
            })
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for point in &view.points {
                    plot_ui.points(
                        Points::new(vec![[point.year, point.funding]])
                            .radius(5.0)
                            .color(scale.map(point.funding, lo, hi))
                            .name(&point.startup),
                    );
                }
            });

        colorbar::color_bar(ui, &scale, lo, hi, "Funding Amount", height, format::funding);
    });

    if view.skipped > 0 {
        ui.weak(format!("{} startups without a year or funding amount are not plotted", view.skipped));
    }
}

// ---------------------------------------------------------------------------
// Ranked counts (horizontal bars)
// ---------------------------------------------------------------------------

/// Horizontal bars, one per entry, bottom to top in the view's order.
pub fn ranked_bars(ui: &mut Ui, id: &str, title: &str, y_label: &str, view: &RankedCounts) {
    ui.label(title);

    let bars: Vec<Bar> = view
        .entries
        .iter()
        .enumerate()
        .map(|(i, (label, count))| Bar::new(i as f64, *count as f64).name(label).width(0.7))
        .collect();
    let labels: Vec<String> = view.entries.iter().map(|(l, _)| l.clone()).collect();

    Plot::new(id)
        .height(600.0)
        .x_axis_label("Number of Startups")
        .y_axis_label(y_label)
        .y_axis_min_width(160.0)
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .y_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value))
        .include_x(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(BAR_BLUE));
        });
}
