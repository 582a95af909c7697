use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

use crate::config::MULTI_VALUE_DELIMITER;

use super::model::CellValue;

// ---------------------------------------------------------------------------
// Multi-value cells
// ---------------------------------------------------------------------------

/// Split a multi-value cell into its items.
///
/// Text is split on the fixed delimiter, so a single value comes back as a
/// one-element list. Non-text cells (blank, numbers, booleans, dates)
/// contribute no items.
pub fn split_multi_value(cell: &CellValue) -> Vec<String> {
    match cell {
        CellValue::String(s) => s.split(MULTI_VALUE_DELIMITER).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// Occurrence counts kept in a definite order.
///
/// Freshly built counts are in first-encounter order; [`ValueCounts::ranked`]
/// and friends return reordered copies.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCounts<K> {
    entries: Vec<(K, usize)>,
}

impl<K: Clone + Eq + Hash> ValueCounts<K> {
    /// Count every value, keeping keys in the order they are first seen.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut entries: Vec<(K, usize)> = Vec::new();
        for value in values {
            match index.get(&value) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(value.clone(), entries.len());
                    entries.push((value, 1));
                }
            }
        }
        ValueCounts { entries }
    }
}

impl<K: Clone> ValueCounts<K> {
    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(K, usize)> {
        self.entries
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Descending count. The sort is stable, so ties keep encounter order.
    pub fn ranked(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        ValueCounts { entries }
    }

    /// The `n` most frequent keys, highest first.
    pub fn nlargest(&self, n: usize) -> Self {
        let mut ranked = self.ranked();
        ranked.entries.truncate(n);
        ranked
    }

    /// Same pairs, iteration order flipped.
    pub fn reversed(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.reverse();
        ValueCounts { entries }
    }
}

impl<K: Clone + Ord> ValueCounts<K> {
    /// Ascending key order.
    pub fn sorted_by_key(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        ValueCounts { entries }
    }
}

/// Count the items of a multi-value column, flattened across rows.
pub fn count_multi_values<'a, I>(cells: I) -> ValueCounts<String>
where
    I: IntoIterator<Item = &'a CellValue>,
{
    ValueCounts::from_values(cells.into_iter().flat_map(split_multi_value))
}

/// Count a single-value column. Blank cells are not counted.
pub fn count_values<'a, I>(cells: I) -> ValueCounts<CellValue>
where
    I: IntoIterator<Item = &'a CellValue>,
{
    ValueCounts::from_values(cells.into_iter().filter(|c| !c.is_null()).cloned())
}

// ---------------------------------------------------------------------------
// Cross-tabulation
// ---------------------------------------------------------------------------

/// Sparse sum table keyed by (row key, column key). Both key sets are sorted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PivotTable {
    pub row_keys: Vec<CellValue>,
    pub column_keys: Vec<CellValue>,
    cells: BTreeMap<(usize, usize), f64>,
}

impl PivotTable {
    /// Sum for (row, column), `None` when no row matched that pair.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(&(row, column)).copied()
    }

    /// Filled cells as `((row, column), sum)`.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.cells.iter().map(|(k, v)| (*k, *v))
    }

    /// Smallest and largest filled value.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells.values().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Cross-tabulate `values` by `(row, column)` keys, summing per pair.
///
/// Triples with a blank row or column key are skipped. A pair seen only with
/// absent values still yields a cell (sum 0); a pair never seen yields none.
pub fn pivot_sum<I>(triples: I) -> PivotTable
where
    I: IntoIterator<Item = (CellValue, CellValue, Option<f64>)>,
{
    let mut sums: BTreeMap<(CellValue, CellValue), f64> = BTreeMap::new();
    for (row, col, value) in triples {
        if row.is_null() || col.is_null() {
            continue;
        }
        *sums.entry((row, col)).or_insert(0.0) += value.unwrap_or(0.0);
    }

    let row_keys: Vec<CellValue> = sums
        .keys()
        .map(|(r, _)| r.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let column_keys: Vec<CellValue> = sums
        .keys()
        .map(|(_, c)| c.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let cells = sums
        .into_iter()
        .filter_map(|((r, c), sum)| {
            let ri = row_keys.binary_search(&r).ok()?;
            let ci = column_keys.binary_search(&c).ok()?;
            Some(((ri, ci), sum))
        })
        .collect();

    PivotTable {
        row_keys,
        column_keys,
        cells,
    }
}
