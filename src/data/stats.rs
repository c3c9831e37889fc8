use super::filter::FilteredSubset;
use super::model::Observation;

// ---------------------------------------------------------------------------
// Summary types
// ---------------------------------------------------------------------------

/// Range-scoped statistics for a single selected category (or for a series
/// without a category dimension).
#[derive(Debug, Clone, PartialEq)]
pub struct SingleSummary {
    pub latest: f64,
    pub latest_year: i32,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (N-1 divisor). `None` below 2 points.
    pub std_dev: Option<f64>,
    /// Percent change from earliest to latest value over the range.
    /// `None` below 2 points or when the earliest value is zero.
    pub growth_rate: Option<f64>,
}

/// Per-category tuple shown on the multi-selection metric cards.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub latest: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Result of summarising a filtered subset. `NoData` covers both the
/// empty-selection state and a range with no rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    NoData,
    Single(SingleSummary),
    Multi(Vec<(String, CategorySummary)>),
}

// ---------------------------------------------------------------------------
// Summarisation
// ---------------------------------------------------------------------------

/// Compute range-scoped summary statistics over a filtered subset.
///
/// Branches on the selection width: one selected key (or an uncategorised
/// series) gets the detailed single view, several keys get one
/// `{latest, average, min, max}` tuple per key in selection order. Keys
/// with no rows in range are skipped. Total over any input: an empty
/// subset reports `Summary::NoData`, never NaN.
pub fn summarize(subset: &FilteredSubset<'_>) -> Summary {
    if subset.is_empty() {
        return Summary::NoData;
    }

    if subset.keys.len() > 1 {
        let per_key: Vec<(String, CategorySummary)> = subset
            .keys
            .iter()
            .filter_map(|key| {
                let rows = subset.by_category(key);
                category_summary(&rows).map(|s| (key.clone(), s))
            })
            .collect();
        if per_key.is_empty() {
            return Summary::NoData;
        }
        return Summary::Multi(per_key);
    }

    let rows: Vec<&Observation> = subset.rows().collect();
    match single_summary(&rows) {
        Some(s) => Summary::Single(s),
        None => Summary::NoData,
    }
}

/// The value at the peak of the subset plus the year it was attained.
/// Ties go to the first occurrence in ascending year order.
pub fn peak(subset: &FilteredSubset<'_>) -> Option<(i32, f64)> {
    let mut best: Option<(i32, f64)> = None;
    for row in subset.rows() {
        match best {
            Some((_, v)) if row.value <= v => {}
            _ => best = Some((row.year, row.value)),
        }
    }
    best
}

fn single_summary(rows: &[&Observation]) -> Option<SingleSummary> {
    let (latest_year, latest) = latest(rows)?;
    let values: Vec<f64> = rows.iter().map(|r| r.value).collect();
    let average = mean(&values)?;
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    Some(SingleSummary {
        latest,
        latest_year,
        average,
        min,
        max,
        std_dev: sample_std_dev(&values),
        growth_rate: growth_rate(rows),
    })
}

fn category_summary(rows: &[&Observation]) -> Option<CategorySummary> {
    let (_, latest) = latest(rows)?;
    let values: Vec<f64> = rows.iter().map(|r| r.value).collect();
    let average = mean(&values)?;
    Some(CategorySummary {
        latest,
        average,
        min: values.iter().cloned().fold(f64::INFINITY, f64::min),
        max: values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    })
}

// ---------------------------------------------------------------------------
// Scalar helpers
// ---------------------------------------------------------------------------

/// The value at the most recent year present. Rows arrive ascending by
/// year; ties on the maximum year go to the first such row in subset
/// order, which matches the source table's ordering.
fn latest(rows: &[&Observation]) -> Option<(i32, f64)> {
    let max_year = rows.iter().map(|r| r.year).max()?;
    rows.iter()
        .find(|r| r.year == max_year)
        .map(|r| (r.year, r.value))
}

/// The value at the earliest year present (first-row tie-break).
fn earliest(rows: &[&Observation]) -> Option<(i32, f64)> {
    let min_year = rows.iter().map(|r| r.year).min()?;
    rows.iter()
        .find(|r| r.year == min_year)
        .map(|r| (r.year, r.value))
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (N-1 divisor). `None` below 2 values.
fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = values.iter().sum::<f64>() / values.len() as f64;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

/// Percent change from the earliest to the latest value over the range.
/// Undefined (never a division by zero) when the earliest value is 0 or
/// there are fewer than 2 rows.
fn growth_rate(rows: &[&Observation]) -> Option<f64> {
    if rows.len() < 2 {
        return None;
    }
    let (_, first) = earliest(rows)?;
    let (_, last) = latest(rows)?;
    if first == 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter;
    use crate::data::model::{Observation, ResolvedRange, Series};

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn corn_series() -> Series {
        // CORN prices 2014-2022; SOYBEANS as a second category.
        let corn = [3.7, 3.6, 3.4, 3.4, 3.6, 3.6, 4.5, 6.0, 6.5];
        let mut rows = Vec::new();
        for (i, &v) in corn.iter().enumerate() {
            rows.push(Observation::new(Some("CORN"), 2014 + i as i32, v));
            rows.push(Observation::new(Some("SOYBEANS"), 2014 + i as i32, v * 2.5));
        }
        Series::from_rows("Crop Prices", "$/bushel", rows, &["CORN", "SOYBEANS", "WHEAT"])
    }

    #[test]
    fn test_single_summary_sample_scenario() {
        // Filtering CORN to [2015, 2020]: latest = value at 2020,
        // average = arithmetic mean of the six values.
        let s = corn_series();
        let subset = filter(&s, ResolvedRange::new(2015, 2020), &keys(&["CORN"]));
        let Summary::Single(sum) = summarize(&subset) else {
            panic!("expected single summary");
        };
        assert_eq!(sum.latest, 4.5);
        assert_eq!(sum.latest_year, 2020);
        let expected_avg = (3.6 + 3.4 + 3.4 + 3.6 + 3.6 + 4.5) / 6.0;
        assert!((sum.average - expected_avg).abs() < 1e-12);
        assert_eq!(sum.min, 3.4);
        assert_eq!(sum.max, 4.5);
        assert!(sum.std_dev.is_some());
    }

    #[test]
    fn test_multi_summary_in_selection_order() {
        let s = corn_series();
        let subset = filter(
            &s,
            ResolvedRange::new(2014, 2022),
            &keys(&["SOYBEANS", "CORN"]),
        );
        let Summary::Multi(per_key) = summarize(&subset) else {
            panic!("expected multi summary");
        };
        let names: Vec<&str> = per_key.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["SOYBEANS", "CORN"]);
        assert_eq!(per_key[1].1.latest, 6.5);
    }

    #[test]
    fn test_multi_summary_skips_keys_without_rows() {
        let s = corn_series();
        let subset = filter(
            &s,
            ResolvedRange::new(2014, 2022),
            &keys(&["CORN", "WHEAT"]),
        );
        let Summary::Multi(per_key) = summarize(&subset) else {
            panic!("expected multi summary");
        };
        assert_eq!(per_key.len(), 1, "WHEAT has no rows and is skipped");
    }

    #[test]
    fn test_empty_subset_is_no_data() {
        let s = corn_series();
        let subset = filter(&s, ResolvedRange::new(2014, 2022), &[]);
        assert_eq!(summarize(&subset), Summary::NoData);
        assert_eq!(peak(&subset), None);
    }

    #[test]
    fn test_out_of_range_is_no_data() {
        let s = corn_series();
        let subset = filter(&s, ResolvedRange::new(1900, 1910), &keys(&["CORN"]));
        assert_eq!(summarize(&subset), Summary::NoData);
    }

    #[test]
    fn test_growth_rate_sample_scenario() {
        // Two-point series [(1997, 1000), (2025, 6000)] → +500%.
        let rows = vec![
            Observation::new(Some("KENTUCKY"), 1997, 1000.0),
            Observation::new(Some("KENTUCKY"), 2025, 6000.0),
        ];
        let s = Series::from_rows("Cropland Values", "$/acre", rows, &["KENTUCKY"]);
        let subset = filter(&s, ResolvedRange::new(1997, 2025), &keys(&["KENTUCKY"]));
        let Summary::Single(sum) = summarize(&subset) else {
            panic!("expected single summary");
        };
        assert_eq!(sum.growth_rate, Some(500.0));
    }

    #[test]
    fn test_growth_rate_zero_baseline_is_undefined() {
        let rows = vec![
            Observation::new(Some("KENTUCKY"), 1997, 0.0),
            Observation::new(Some("KENTUCKY"), 2025, 6000.0),
        ];
        let s = Series::from_rows("Cropland Values", "$/acre", rows, &["KENTUCKY"]);
        let subset = filter(&s, ResolvedRange::new(1997, 2025), &keys(&["KENTUCKY"]));
        let Summary::Single(sum) = summarize(&subset) else {
            panic!("expected single summary");
        };
        assert_eq!(sum.growth_rate, None);
    }

    #[test]
    fn test_growth_rate_single_point_is_undefined() {
        let rows = vec![Observation::new(Some("KENTUCKY"), 2025, 6000.0)];
        let s = Series::from_rows("Cropland Values", "$/acre", rows, &["KENTUCKY"]);
        let subset = filter(&s, ResolvedRange::new(1997, 2025), &keys(&["KENTUCKY"]));
        let Summary::Single(sum) = summarize(&subset) else {
            panic!("expected single summary");
        };
        assert_eq!(sum.growth_rate, None);
        assert_eq!(sum.std_dev, None);
    }

    #[test]
    fn test_sample_std_dev_uses_n_minus_one() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Sum of squared deviations from mean 5.0 is 32; 32/7 then sqrt.
        let expected = (32.0f64 / 7.0).sqrt();
        assert!((sample_std_dev(&values).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_peak_first_occurrence_tie_break() {
        let rows = vec![
            Observation::new(None, 2009, 100.0),
            Observation::new(None, 2010, 95.0),
            Observation::new(None, 2011, 100.0),
        ];
        let s = Series::from_rows("Price Received Index", "index", rows, &[]);
        let subset = filter(&s, ResolvedRange::new(2009, 2011), &[]);
        assert_eq!(peak(&subset), Some((2009, 100.0)));
    }
}
