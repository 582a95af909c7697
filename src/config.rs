//! Compile-time settings. The dashboard has no runtime configuration surface;
//! logging verbosity (`RUST_LOG`) is the only thing read from the environment.

/// Spreadsheet read once at start-up.
pub const DATA_PATH: &str = "HealthTech Hyd.xlsx";

pub const PAGE_TITLE: &str = "HealthTech Startups in Hyderabad";

/// Separator used inside multi-value cells (investors, business models, sectors).
pub const MULTI_VALUE_DELIMITER: &str = ", ";

/// Rows shown in the dataset preview table.
pub const PREVIEW_ROWS: usize = 5;

pub const TOP_INVESTORS: usize = 20;
pub const TOP_BUSINESS_MODELS: usize = 5;
pub const TOP_SECTORS: usize = 20;
pub const SECTOR_SLICES: usize = 20;

pub const WINDOW_SIZE: [f32; 2] = [1280.0, 900.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [720.0, 480.0];

/// Column headers the dataset is expected to carry.
pub mod columns {
    pub const STARTUP_NAME: &str = "Startup name";
    pub const FOUNDING_YEAR: &str = "Founding year";
    pub const FUNDING_RECEIVED: &str = "Funding Received";
    pub const INVESTORS: &str = "Investors";
    pub const BUSINESS_MODEL: &str = "Business Model";
    pub const FOCUS_SECTOR: &str = "Focus sector";
    pub const ENABLER: &str = "Enabler";
}
