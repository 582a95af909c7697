use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::PAGE_TITLE;
use crate::data::model::{CellValue, Dataset};
use crate::error::DashboardError;
use crate::state::{AppState, Section};
use crate::ui::{heatmap, pie, plot};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: title, source and status.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(PAGE_TITLE);
        ui.separator();

        ui.label(format!(
            "{} startups loaded from {}",
            state.dataset.len(),
            state.source.display()
        ));

        ui.separator();
        egui::widgets::global_theme_preference_switch(ui);

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – contents
// ---------------------------------------------------------------------------

/// Render the contents panel. Clicking an entry scrolls to its section.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Contents");
    ui.separator();

    ScrollArea::vertical()
        .id_salt("contents")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for section in Section::ALL {
                if ui.selectable_label(false, section.title()).clicked() {
                    state.request_scroll(section);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel – the page itself
// ---------------------------------------------------------------------------

/// Render every section, top to bottom, in fixed order.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .id_salt("dashboard")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new(PAGE_TITLE).size(28.0).strong());
            ui.add_space(12.0);

            for section in Section::ALL {
                section_heading(ui, state, section);
                section_body(ui, state, section);
                ui.add_space(28.0);
            }
        });
}

fn section_heading(ui: &mut Ui, state: &mut AppState, section: Section) {
    let response = ui.heading(section.title());
    if state.take_scroll(section) {
        response.scroll_to_me(Some(egui::Align::TOP));
    }
    ui.separator();
}

fn section_body(ui: &mut Ui, state: &AppState, section: Section) {
    let views = &state.dashboard;
    match section {
        Section::Dataset => dataset_preview(ui, &state.preview),
        Section::DatasetInformation => dataset_info(ui, state),
        Section::StartupsPerYear => {
            show_view(ui, &views.startups_per_year, plot::startups_per_year)
        }
        Section::FundingVsYear => show_view(ui, &views.funding_vs_year, plot::funding_vs_year),
        Section::TopInvestors => show_view(ui, &views.top_investors, |ui, view| {
            plot::ranked_bars(ui, "top_investors", "Top Investors", "Investor", view)
        }),
        Section::TopBusinessModels => show_view(ui, &views.top_business_models, |ui, view| {
            plot::ranked_bars(
                ui,
                "top_business_models",
                "Top Business Models",
                "Business Models",
                view,
            )
        }),
        Section::TopSectors => show_view(ui, &views.top_sectors, |ui, view| {
            plot::ranked_bars(ui, "top_sectors", "Top Sectors", "Focus Sector", view)
        }),
        Section::SectorDistribution => show_view(ui, &views.sector_distribution, |ui, view| {
            pie::donut(ui, "Distribution of Focus Sectors", Some("Focus Sectors"), view)
        }),
        Section::EnablerDistribution => show_view(ui, &views.enabler_distribution, |ui, view| {
            pie::donut(ui, "Distribution of Startup Enabler", None, view)
        }),
        Section::FundingHeatmap => show_view(ui, &views.funding_heatmap, heatmap::funding_heatmap),
    }
}

/// Show a view, or the reason it could not be computed.
fn show_view<T>(
    ui: &mut Ui,
    view: &Result<T, DashboardError>,
    show: impl FnOnce(&mut Ui, &T),
) {
    match view {
        Ok(view) => show(ui, view),
        Err(e) => {
            ui.label(RichText::new(format!("Chart unavailable: {e}")).color(Color32::RED));
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset sections
// ---------------------------------------------------------------------------

fn cell_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// The first rows of the table, as loaded.
fn dataset_preview(ui: &mut Ui, preview: &Dataset) {
    ScrollArea::horizontal()
        .id_salt("dataset_preview")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .columns(Column::auto().at_least(60.0).clip(true), preview.column_names.len())
                .header(22.0, |mut header| {
                    for name in &preview.column_names {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|mut body| {
                    for cells in preview.rows() {
                        body.row(20.0, |mut row| {
                            for cell in cells {
                                row.col(|ui: &mut Ui| {
                                    ui.label(cell_text(cell));
                                });
                            }
                        });
                    }
                });
        });
}

fn dataset_info(ui: &mut Ui, state: &AppState) {
    let (rows, cols) = state.dataset.shape();
    ui.label(format!("Dataset Shape: ({rows}, {cols})"));
    ui.label(format!("Number of Rows in the Dataframe: {rows}"));
    ui.label(format!("Number of Columns in the Dataframe: {cols}"));

    if let Some(report) = &state.funding_report {
        ui.label(
            RichText::new(format!(
                "Funding amounts parsed: {}, absent: {}",
                report.cleaned, report.absent
            ))
            .weak(),
        );
    }
}
