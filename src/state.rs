use std::path::PathBuf;

use crate::config::PREVIEW_ROWS;
use crate::data::clean::{CleanReport, clean_funding_column};
use crate::data::model::Dataset;
use crate::views::Dashboard;

// ---------------------------------------------------------------------------
// Page sections
// ---------------------------------------------------------------------------

/// Sections of the page, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dataset,
    DatasetInformation,
    StartupsPerYear,
    FundingVsYear,
    TopInvestors,
    TopBusinessModels,
    TopSectors,
    SectorDistribution,
    EnablerDistribution,
    FundingHeatmap,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::Dataset,
        Section::DatasetInformation,
        Section::StartupsPerYear,
        Section::FundingVsYear,
        Section::TopInvestors,
        Section::TopBusinessModels,
        Section::TopSectors,
        Section::SectorDistribution,
        Section::EnablerDistribution,
        Section::FundingHeatmap,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Dataset => "Dataset",
            Section::DatasetInformation => "Dataset Information",
            Section::StartupsPerYear => "Number of HealthTech Startups Founded Each Year",
            Section::FundingVsYear => "Funding Amount vs. Founding Year",
            Section::TopInvestors => "Top Investors in HealthTech Space",
            Section::TopBusinessModels => "Top Business Models in HealthTech Startups",
            Section::TopSectors => "Top Sectors of HealthTech Startups",
            Section::SectorDistribution => "Distribution of Focus Sectors",
            Section::EnablerDistribution => "Distribution of Startup Enabler",
            Section::FundingHeatmap => "Funding by Year and Sector",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// File the dataset was read from.
    pub source: PathBuf,

    /// Loaded dataset, funding column already cleaned. Never mutated again.
    pub dataset: Dataset,

    /// First rows as loaded, before funding cleaning.
    pub preview: Dataset,

    /// Outcome of the funding cleaning step (None if the column is missing).
    pub funding_report: Option<CleanReport>,

    /// Every chart summary of this render pass.
    pub dashboard: Dashboard,

    /// Section the contents panel asked to scroll to.
    pub scroll_target: Option<Section>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Snapshot the preview, clean the funding column once, then compute
    /// every view from the cleaned dataset.
    pub fn new(source: PathBuf, mut dataset: Dataset) -> Self {
        let preview = dataset.head(PREVIEW_ROWS);

        let (funding_report, status_message) = match clean_funding_column(&mut dataset) {
            Ok(report) => {
                log::info!(
                    "Funding cleaned: {} amounts, {} absent ({} unparsable)",
                    report.cleaned,
                    report.absent,
                    report.unparsable
                );
                (Some(report), None)
            }
            Err(e) => {
                log::warn!("Funding column not cleaned: {e}");
                (None, Some(format!("Error: {e}")))
            }
        };

        let dashboard = Dashboard::compute(&dataset);

        Self {
            source,
            dataset,
            preview,
            funding_report,
            dashboard,
            scroll_target: None,
            status_message,
        }
    }

    /// Ask the central panel to bring `section` into view on the next frame.
    pub fn request_scroll(&mut self, section: Section) {
        self.scroll_target = Some(section);
    }

    /// Consume the pending scroll request if it targets `section`.
    pub fn take_scroll(&mut self, section: Section) -> bool {
        if self.scroll_target == Some(section) {
            self.scroll_target = None;
            true
        } else {
            false
        }
    }
}
