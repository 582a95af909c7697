use thiserror::Error;

/// Failure of a single view computation. Load failures are not represented
/// here: they abort start-up through `anyhow`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),
}
