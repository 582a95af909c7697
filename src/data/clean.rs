use crate::config::columns;
use crate::error::DashboardError;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Funding text cleaning
// ---------------------------------------------------------------------------

/// Strip everything except ASCII digits and `.` and parse the rest.
///
/// `"$2.5M"` → `Some(2.5)`, `"₹ 1,200"` → `Some(1200.0)`. Text with no digits
/// left, or with more than one decimal point, yields `None`.
pub fn clean_funding_text(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if kept.is_empty() {
        return None;
    }
    kept.parse::<f64>().ok()
}

/// Clean one cell of the funding column. Numbers pass through untouched.
pub fn clean_funding_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Float(v) => CellValue::Float(*v),
        CellValue::Integer(i) => CellValue::Float(*i as f64),
        CellValue::String(s) => match clean_funding_text(s) {
            Some(v) => CellValue::Float(v),
            None => CellValue::Null,
        },
        _ => CellValue::Null,
    }
}

/// Outcome of cleaning the funding column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanReport {
    /// Cells now holding a number.
    pub cleaned: usize,
    /// Non-blank cells that held no parsable amount.
    pub unparsable: usize,
    /// Cells now holding no value (blank or unparsable).
    pub absent: usize,
}

/// Replace the "Funding Received" column by its numeric form, in place.
pub fn clean_funding_column(dataset: &mut Dataset) -> Result<CleanReport, DashboardError> {
    let mut report = CleanReport::default();
    dataset.map_column(columns::FUNDING_RECEIVED, |cell| {
        let cleaned = clean_funding_cell(cell);
        if cleaned.is_null() {
            report.absent += 1;
            if !cell.is_null() {
                log::warn!("Funding value '{cell}' holds no amount; treated as absent");
                report.unparsable += 1;
            }
        } else {
            report.cleaned += 1;
        }
        cleaned
    })?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_currency_symbols_commas_and_suffixes() {
        assert_eq!(clean_funding_text("$2M"), Some(2.0));
        assert_eq!(clean_funding_text("$1,250.50M"), Some(1250.5));
        assert_eq!(clean_funding_text("USD 3.2 Mn"), Some(3.2));
    }

    #[test]
    fn empty_after_cleaning_is_absent() {
        assert_eq!(clean_funding_text("Undisclosed"), None);
        assert_eq!(clean_funding_text(""), None);
        assert_eq!(clean_funding_text("1.2.3"), None);
    }

    #[test]
    fn cleaning_is_idempotent() {
        for raw in ["$2M", "$1,250.50M", "0.75", "12"] {
            let once = clean_funding_text(raw).unwrap();
            let twice = clean_funding_text(&once.to_string()).unwrap();
            assert_eq!(once, twice, "{raw}");
            assert_eq!(
                clean_funding_cell(&clean_funding_cell(&CellValue::String(raw.into()))),
                CellValue::Float(once)
            );
        }
    }

    #[test]
    fn numeric_cells_pass_through() {
        assert_eq!(clean_funding_cell(&CellValue::Integer(4)), CellValue::Float(4.0));
        assert_eq!(clean_funding_cell(&CellValue::Float(0.5)), CellValue::Float(0.5));
        assert_eq!(clean_funding_cell(&CellValue::Null), CellValue::Null);
    }

    #[test]
    fn column_is_replaced_and_counted() {
        let mut ds = Dataset::new(
            vec![columns::FUNDING_RECEIVED.to_string()],
            vec![
                vec![CellValue::String("$2M".into())],
                vec![CellValue::String("N/A".into())],
                vec![CellValue::Null],
            ],
        );
        let report = clean_funding_column(&mut ds).unwrap();
        assert_eq!(
            report,
            CleanReport {
                cleaned: 1,
                unparsable: 1,
                absent: 2
            }
        );
        let col: Vec<_> = ds.column(columns::FUNDING_RECEIVED).unwrap().cloned().collect();
        assert_eq!(col, vec![CellValue::Float(2.0), CellValue::Null, CellValue::Null]);
    }

    #[test]
    fn missing_funding_column_is_an_error() {
        let mut ds = Dataset::new(vec!["other".into()], vec![]);
        assert_eq!(
            clean_funding_column(&mut ds),
            Err(DashboardError::MissingColumn(columns::FUNDING_RECEIVED.into()))
        );
    }
}
