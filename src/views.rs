//! One summary per dashboard chart.
//!
//! Every function here reads the dataset and nothing else: no view is built
//! from another view's result.

use serde::Serialize;

use crate::config::{self, columns};
use crate::data::aggregate::{count_multi_values, count_values, pivot_sum};
use crate::data::model::{CellValue, Dataset};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Summary types
// ---------------------------------------------------------------------------

/// Startups founded per year, ascending year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCounts {
    pub years: Vec<(CellValue, usize)>,
}

impl YearCounts {
    /// Whether every year is a number (and can sit on a numeric axis).
    pub fn is_numeric(&self) -> bool {
        self.years.iter().all(|(y, _)| y.as_f64().is_some())
    }

    /// x position of each bar: the year itself, or its rank when some year
    /// is not numeric.
    pub fn positions(&self) -> Vec<f64> {
        if self.is_numeric() {
            self.years
                .iter()
                .filter_map(|(y, _)| y.as_f64())
                .collect()
        } else {
            (0..self.years.len()).map(|i| i as f64).collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingPoint {
    pub startup: String,
    pub year: f64,
    pub funding: f64,
}

/// Funding against founding year, in row order. Rows without a numeric year
/// or without a funding amount are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingScatter {
    pub points: Vec<FundingPoint>,
    pub skipped: usize,
}

impl FundingScatter {
    pub fn funding_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.funding, p.funding)),
            Some((lo, hi)) => Some((lo.min(p.funding), hi.max(p.funding))),
        })
    }
}

/// Top-N counts in display order (smallest first, so the largest bar ends
/// up on top of a horizontal chart).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCounts {
    pub entries: Vec<(String, usize)>,
}

/// Slices of a pie chart, in value-count order (largest first).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub slices: Vec<(String, usize)>,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|(_, n)| n).sum()
    }
}

/// Summed funding per (sector, year). `cells[row][col]` is `None` where no
/// startup matches the pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingMatrix {
    pub sectors: Vec<String>,
    pub years: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
    pub range: Option<(f64, f64)>,
}

// ---------------------------------------------------------------------------
// View computations
// ---------------------------------------------------------------------------

pub fn startups_per_year(dataset: &Dataset) -> Result<YearCounts, DashboardError> {
    let counts = count_values(dataset.column(columns::FOUNDING_YEAR)?).sorted_by_key();
    Ok(YearCounts {
        years: counts.into_entries(),
    })
}

/// Expects the funding column to be cleaned already.
pub fn funding_vs_year(dataset: &Dataset) -> Result<FundingScatter, DashboardError> {
    let names = dataset.column(columns::STARTUP_NAME)?;
    let years = dataset.column(columns::FOUNDING_YEAR)?;
    let funding = dataset.column(columns::FUNDING_RECEIVED)?;

    let mut points = Vec::new();
    let mut skipped = 0;
    for ((name, year), amount) in names.zip(years).zip(funding) {
        match (year.as_f64(), amount.as_f64()) {
            (Some(year), Some(funding)) => points.push(FundingPoint {
                startup: if name.is_null() {
                    String::new()
                } else {
                    name.to_string()
                },
                year,
                funding,
            }),
            _ => skipped += 1,
        }
    }
    Ok(FundingScatter { points, skipped })
}

fn top_of(dataset: &Dataset, column: &str, n: usize) -> Result<RankedCounts, DashboardError> {
    let top = count_multi_values(dataset.column(column)?).nlargest(n);
    Ok(RankedCounts {
        entries: top.reversed().into_entries(),
    })
}

pub fn top_investors(dataset: &Dataset) -> Result<RankedCounts, DashboardError> {
    top_of(dataset, columns::INVESTORS, config::TOP_INVESTORS)
}

pub fn top_business_models(dataset: &Dataset) -> Result<RankedCounts, DashboardError> {
    top_of(dataset, columns::BUSINESS_MODEL, config::TOP_BUSINESS_MODELS)
}

pub fn top_sectors(dataset: &Dataset) -> Result<RankedCounts, DashboardError> {
    top_of(dataset, columns::FOCUS_SECTOR, config::TOP_SECTORS)
}

pub fn sector_distribution(dataset: &Dataset) -> Result<Distribution, DashboardError> {
    let top = count_multi_values(dataset.column(columns::FOCUS_SECTOR)?)
        .nlargest(config::SECTOR_SLICES);
    Ok(Distribution {
        slices: top.into_entries(),
    })
}

pub fn enabler_distribution(dataset: &Dataset) -> Result<Distribution, DashboardError> {
    let counts = count_values(dataset.column(columns::ENABLER)?).ranked();
    Ok(Distribution {
        slices: counts
            .into_entries()
            .into_iter()
            .map(|(k, n)| (k.to_string(), n))
            .collect(),
    })
}

/// Rows are whole "Focus sector" cells, not split items.
/// Expects the funding column to be cleaned already.
pub fn funding_heatmap(dataset: &Dataset) -> Result<FundingMatrix, DashboardError> {
    let sectors = dataset.column(columns::FOCUS_SECTOR)?;
    let years = dataset.column(columns::FOUNDING_YEAR)?;
    let funding = dataset.column(columns::FUNDING_RECEIVED)?;

    let table = pivot_sum(
        sectors
            .zip(years)
            .zip(funding)
            .map(|((s, y), f)| (s.clone(), y.clone(), f.as_f64())),
    );

    let mut cells = vec![vec![None; table.column_keys.len()]; table.row_keys.len()];
    for ((r, c), sum) in table.cells() {
        cells[r][c] = Some(sum);
    }

    Ok(FundingMatrix {
        sectors: table.row_keys.iter().map(|k| k.to_string()).collect(),
        years: table.column_keys.iter().map(|k| k.to_string()).collect(),
        cells,
        range: table.value_range(),
    })
}

// ---------------------------------------------------------------------------
// Dashboard – every view of one render pass
// ---------------------------------------------------------------------------

/// Results of one render pass. Each view keeps its own outcome, so a missing
/// column only takes down the charts that read it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub startups_per_year: Result<YearCounts, DashboardError>,
    pub funding_vs_year: Result<FundingScatter, DashboardError>,
    pub top_investors: Result<RankedCounts, DashboardError>,
    pub top_business_models: Result<RankedCounts, DashboardError>,
    pub top_sectors: Result<RankedCounts, DashboardError>,
    pub sector_distribution: Result<Distribution, DashboardError>,
    pub enabler_distribution: Result<Distribution, DashboardError>,
    pub funding_heatmap: Result<FundingMatrix, DashboardError>,
}

impl Dashboard {
    pub fn compute(dataset: &Dataset) -> Self {
        Dashboard {
            startups_per_year: logged("startups per year", startups_per_year(dataset)),
            funding_vs_year: logged("funding vs. year", funding_vs_year(dataset)),
            top_investors: logged("top investors", top_investors(dataset)),
            top_business_models: logged("top business models", top_business_models(dataset)),
            top_sectors: logged("top sectors", top_sectors(dataset)),
            sector_distribution: logged("sector distribution", sector_distribution(dataset)),
            enabler_distribution: logged("enabler distribution", enabler_distribution(dataset)),
            funding_heatmap: logged("funding heat-map", funding_heatmap(dataset)),
        }
    }
}

fn logged<T: Serialize>(
    view: &str,
    result: Result<T, DashboardError>,
) -> Result<T, DashboardError> {
    match &result {
        Ok(summary) => {
            if log::log_enabled!(log::Level::Debug) {
                match serde_json::to_string(summary) {
                    Ok(json) => log::debug!("{view}: {json}"),
                    Err(e) => log::debug!("{view}: summary not serializable: {e}"),
                }
            }
        }
        Err(e) => log::warn!("{view}: {e}"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::clean_funding_column;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    /// Columns: name, year, funding, investors, business model, sector, enabler.
    fn dataset(rows: Vec<[CellValue; 7]>) -> Dataset {
        let header = [
            columns::STARTUP_NAME,
            columns::FOUNDING_YEAR,
            columns::FUNDING_RECEIVED,
            columns::INVESTORS,
            columns::BUSINESS_MODEL,
            columns::FOCUS_SECTOR,
            columns::ENABLER,
        ];
        let mut ds = Dataset::new(
            header.iter().map(|h| h.to_string()).collect(),
            rows.into_iter().map(|r| r.to_vec()).collect(),
        );
        clean_funding_column(&mut ds).unwrap();
        ds
    }

    fn three_startups() -> Dataset {
        dataset(vec![
            [
                s("Medix"),
                CellValue::Integer(2015),
                s("$2M"),
                s("A, B, A"),
                s("B2B"),
                s("Diagnostics"),
                s("Incubator"),
            ],
            [
                s("Cura"),
                CellValue::Integer(2015),
                s("$3M"),
                s("B"),
                s("B2C, B2B"),
                s("Diagnostics, Pharmacy"),
                s("Accelerator"),
            ],
            [
                s("Vita"),
                CellValue::Integer(2016),
                s("$1M"),
                CellValue::Null,
                s("B2C"),
                s("Pharmacy"),
                s("Incubator"),
            ],
        ])
    }

    #[test]
    fn startups_per_year_counts_each_year() {
        let view = startups_per_year(&three_startups()).unwrap();
        assert_eq!(
            view.years,
            vec![(CellValue::Integer(2015), 2), (CellValue::Integer(2016), 1)]
        );
        assert_eq!(view.positions(), vec![2015.0, 2016.0]);
    }

    #[test]
    fn non_numeric_years_fall_back_to_ranks() {
        let view = YearCounts {
            years: vec![(CellValue::Integer(2015), 1), (s("unknown"), 1)],
        };
        assert!(!view.is_numeric());
        assert_eq!(view.positions(), vec![0.0, 1.0]);
    }

    #[test]
    fn top_investors_count_repeated_names() {
        let view = top_investors(&three_startups()).unwrap();
        let mut entries = view.entries.clone();
        entries.sort();
        assert_eq!(entries, vec![("A".to_string(), 2), ("B".to_string(), 2)]);
    }

    #[test]
    fn ranked_views_are_ascending_for_display() {
        let view = top_business_models(&three_startups()).unwrap();
        assert_eq!(
            view.entries,
            vec![("B2C".to_string(), 2), ("B2B".to_string(), 2)]
        );
        let counts: Vec<usize> = view.entries.iter().map(|e| e.1).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn sector_distribution_keeps_ranked_order() {
        let view = sector_distribution(&three_startups()).unwrap();
        assert_eq!(
            view.slices,
            vec![("Diagnostics".to_string(), 2), ("Pharmacy".to_string(), 2)]
        );
        assert_eq!(view.total(), 4);
    }

    #[test]
    fn enabler_distribution_has_no_limit() {
        let view = enabler_distribution(&three_startups()).unwrap();
        assert_eq!(
            view.slices,
            vec![("Incubator".to_string(), 2), ("Accelerator".to_string(), 1)]
        );
    }

    #[test]
    fn scatter_follows_row_order_and_skips_absent_funding() {
        let mut ds = three_startups();
        ds.map_column(columns::FUNDING_RECEIVED, |c| match c {
            CellValue::Float(v) if *v == 3.0 => CellValue::Null,
            other => other.clone(),
        })
        .unwrap();
        let view = funding_vs_year(&ds).unwrap();
        let names: Vec<&str> = view.points.iter().map(|p| p.startup.as_str()).collect();
        assert_eq!(names, vec!["Medix", "Vita"]);
        assert_eq!(view.skipped, 1);
        assert_eq!(view.funding_range(), Some((1.0, 2.0)));
    }

    #[test]
    fn heatmap_sums_whole_sector_cells_per_year() {
        let view = funding_heatmap(&three_startups()).unwrap();
        assert_eq!(
            view.sectors,
            vec!["Diagnostics", "Diagnostics, Pharmacy", "Pharmacy"]
        );
        assert_eq!(view.years, vec!["2015", "2016"]);
        assert_eq!(view.cells[0], vec![Some(2.0), None]);
        assert_eq!(view.cells[1], vec![Some(3.0), None]);
        assert_eq!(view.cells[2], vec![None, Some(1.0)]);
        assert_eq!(view.range, Some((1.0, 3.0)));
    }

    #[test]
    fn missing_column_only_fails_dependent_views() {
        let ds = Dataset::new(
            vec![columns::FOUNDING_YEAR.to_string()],
            vec![vec![CellValue::Integer(2020)]],
        );
        let dashboard = Dashboard::compute(&ds);
        assert!(dashboard.startups_per_year.is_ok());
        assert_eq!(
            dashboard.top_investors.unwrap_err(),
            DashboardError::MissingColumn(columns::INVESTORS.into())
        );
        assert!(dashboard.funding_heatmap.is_err());
        assert!(dashboard.enabler_distribution.is_err());
    }
}
