use super::model::{Observation, ResolvedRange, Series};

// ---------------------------------------------------------------------------
// FilteredSubset – a view of a series scoped to a range and key selection
// ---------------------------------------------------------------------------

/// A view of a [`Series`] restricted to a resolved range and a category
/// selection. Holds indices into the series (series order preserved), not
/// copies.
#[derive(Debug, Clone)]
pub struct FilteredSubset<'a> {
    series: &'a Series,
    indices: Vec<usize>,
    pub range: ResolvedRange,
    /// Selected category keys in selection order. Empty for series without
    /// a category dimension.
    pub keys: Vec<String>,
}

impl<'a> FilteredSubset<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn series(&self) -> &'a Series {
        self.series
    }

    /// Rows in scope, ascending by year.
    pub fn rows(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        self.indices.iter().map(|&i| &self.series.rows[i])
    }

    /// Rows in scope for one category, ascending by year.
    pub fn by_category(&self, key: &str) -> Vec<&'a Observation> {
        self.rows()
            .filter(|r| r.category.as_deref() == Some(key))
            .collect()
    }

    /// `(year, value)` pairs in scope, ascending by year. For categorised
    /// series this interleaves categories; use [`Self::by_category`] for
    /// per-key plotting.
    pub fn years_and_values(&self) -> Vec<(i32, f64)> {
        self.rows().map(|r| (r.year, r.value)).collect()
    }

    /// Maximum value in scope, or `None` when empty.
    pub fn max_value(&self) -> Option<f64> {
        self.rows().map(|r| r.value).fold(None, |acc, v| {
            Some(match acc {
                Some(m) => v.max(m),
                None => v,
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Selection filter
// ---------------------------------------------------------------------------

/// Restrict `series` to `range` and the selected category keys.
///
/// Pure: a row is in scope iff its year lies in `range` and either the
/// series has no category dimension or its category is among
/// `selected_keys`. An empty `selected_keys` on a categorised series
/// yields an empty subset — the "no selection" state, not an error.
pub fn filter<'a>(
    series: &'a Series,
    range: ResolvedRange,
    selected_keys: &[String],
) -> FilteredSubset<'a> {
    let indices = series
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            if !range.contains(row.year) {
                return false;
            }
            match &row.category {
                Some(cat) => selected_keys.iter().any(|k| k == cat),
                None => true,
            }
        })
        .map(|(i, _)| i)
        .collect();

    FilteredSubset {
        series,
        indices,
        range,
        keys: if series.has_categories() {
            selected_keys.to_vec()
        } else {
            Vec::new()
        },
    }
}

/// Restrict `series` to `range` with every category included — the
/// combined view's no-category-restriction slice.
pub fn filter_all<'a>(series: &'a Series, range: ResolvedRange) -> FilteredSubset<'a> {
    filter(series, range, &series.categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;

    fn crop_series() -> Series {
        let mut rows = Vec::new();
        for year in 2014..=2022 {
            rows.push(Observation::new(Some("CORN"), year, year as f64 * 0.01));
            rows.push(Observation::new(Some("WHEAT"), year, year as f64 * 0.02));
        }
        Series::from_rows("Crop Prices", "$/bushel", rows, &["CORN", "SOYBEANS", "WHEAT"])
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_range_is_inclusive() {
        let s = crop_series();
        let subset = filter(&s, ResolvedRange::new(2015, 2020), &keys(&["CORN", "WHEAT"]));
        assert_eq!(subset.len(), 12, "6 years x 2 categories");
        assert!(subset.rows().all(|r| (2015..=2020).contains(&r.year)));
    }

    #[test]
    fn test_filter_by_category() {
        let s = crop_series();
        let subset = filter(&s, ResolvedRange::new(2015, 2020), &keys(&["CORN"]));
        assert_eq!(subset.len(), 6);
        assert!(subset.rows().all(|r| r.category.as_deref() == Some("CORN")));
    }

    #[test]
    fn test_empty_selection_yields_empty_subset() {
        let s = crop_series();
        let subset = filter(&s, ResolvedRange::new(2014, 2022), &[]);
        assert!(subset.is_empty());
    }

    #[test]
    fn test_uncategorised_series_ignores_keys() {
        let rows = (2010..=2020)
            .map(|y| Observation::new(None, y, 100.0))
            .collect();
        let s = Series::from_rows("Price Received Index", "index", rows, &[]);
        let subset = filter(&s, ResolvedRange::new(2010, 2020), &[]);
        assert_eq!(subset.len(), 11);
    }

    #[test]
    fn test_by_category_preserves_year_order() {
        let s = crop_series();
        let subset = filter(&s, ResolvedRange::new(2014, 2022), &keys(&["WHEAT"]));
        let wheat = subset.by_category("WHEAT");
        let years: Vec<i32> = wheat.iter().map(|r| r.year).collect();
        assert_eq!(years, (2014..=2022).collect::<Vec<_>>());
    }

    #[test]
    fn test_filter_all_includes_every_category() {
        let s = crop_series();
        let subset = filter_all(&s, ResolvedRange::new(2014, 2022));
        assert_eq!(subset.len(), s.len());
    }

    #[test]
    fn test_max_value() {
        let s = crop_series();
        let subset = filter(&s, ResolvedRange::new(2014, 2022), &keys(&["WHEAT"]));
        assert_eq!(subset.max_value(), Some(2022.0 * 0.02));
        let empty = filter(&s, ResolvedRange::new(2014, 2022), &[]);
        assert_eq!(empty.max_value(), None);
    }
}
