use std::fmt;

// ---------------------------------------------------------------------------
// Observation – one row of a source table
// ---------------------------------------------------------------------------

/// A single yearly observation (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Commodity or state name. `None` for series without a category
    /// dimension (the price received index).
    pub category: Option<String>,
    pub year: i32,
    pub value: f64,
}

impl Observation {
    pub fn new(category: Option<&str>, year: i32, value: f64) -> Self {
        Observation {
            category: category.map(|c| c.to_string()),
            year,
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Series – one named, year-indexed dataset
// ---------------------------------------------------------------------------

/// A complete loaded dataset: crop prices, cropland values, or the price
/// received index. Built once at startup and immutable afterwards.
///
/// `rows` is sorted ascending by year (stable, so rows sharing a year keep
/// their source order).
#[derive(Debug, Clone)]
pub struct Series {
    /// Display name, e.g. "Crop Prices".
    pub name: String,
    /// Unit label for axis/metric display, e.g. "$/bushel".
    pub unit: String,
    pub rows: Vec<Observation>,
    /// Category names in configured display order. Empty when the series
    /// has no category dimension.
    pub categories: Vec<String>,
}

impl Series {
    /// Build a series from unordered rows; sorts ascending by year.
    pub fn from_rows(
        name: &str,
        unit: &str,
        mut rows: Vec<Observation>,
        categories: &[&str],
    ) -> Self {
        rows.sort_by_key(|r| r.year);
        Series {
            name: name.to_string(),
            unit: unit.to_string(),
            rows,
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest year present, or `None` for an empty series.
    pub fn min_year(&self) -> Option<i32> {
        self.rows.first().map(|r| r.year)
    }

    /// Latest year present, or `None` for an empty series.
    pub fn max_year(&self) -> Option<i32> {
        self.rows.last().map(|r| r.year)
    }

    /// Sorted distinct years present in the series.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|r| r.year).collect();
        years.dedup();
        years
    }

    /// Whether the series carries a category dimension at all.
    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ResolvedRange – a concrete [start, end] year interval
// ---------------------------------------------------------------------------

/// A concrete inclusive year interval after zoom-preset resolution.
/// Invariant: `start_year <= end_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start_year: i32,
    pub end_year: i32,
}

impl ResolvedRange {
    pub fn new(start_year: i32, end_year: i32) -> Self {
        debug_assert!(start_year <= end_year);
        ResolvedRange {
            start_year,
            end_year,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start_year <= year && year <= self.end_year
    }
}

impl fmt::Display for ResolvedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year, self.end_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_sorts_ascending() {
        let series = Series::from_rows(
            "test",
            "$",
            vec![
                Observation::new(Some("CORN"), 2020, 3.5),
                Observation::new(Some("CORN"), 2018, 3.3),
                Observation::new(Some("CORN"), 2019, 3.6),
            ],
            &["CORN"],
        );
        let years: Vec<i32> = series.rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2018, 2019, 2020]);
        assert_eq!(series.min_year(), Some(2018));
        assert_eq!(series.max_year(), Some(2020));
    }

    #[test]
    fn test_empty_series_bounds() {
        let series = Series::from_rows("empty", "$", Vec::new(), &[]);
        assert!(series.is_empty());
        assert_eq!(series.min_year(), None);
        assert_eq!(series.max_year(), None);
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = ResolvedRange::new(2015, 2020);
        assert!(range.contains(2015));
        assert!(range.contains(2020));
        assert!(!range.contains(2014));
        assert!(!range.contains(2021));
    }
}
