use std::collections::BTreeMap;

use super::filter::{filter_all, FilteredSubset};
use super::model::{Observation, ResolvedRange, Series};

// ---------------------------------------------------------------------------
// CombinedView – the cross-series aligned output
// ---------------------------------------------------------------------------

/// The aligned multi-axis comparison of all three series over a common
/// range, plus the derived display metadata.
#[derive(Debug, Clone)]
pub struct CombinedView {
    pub range: ResolvedRange,
    /// Crop price rows grouped per commodity, ascending by year.
    pub crop_by_category: Vec<(String, Vec<(i32, f64)>)>,
    /// Cropland values aggregated per year: mean across all states.
    pub land_by_year: Vec<(i32, f64)>,
    /// Price index rows, ascending by year.
    pub index_points: Vec<(i32, f64)>,
    /// `index_max / land_max * 100` — picks a shared secondary-axis range
    /// so the index and the land aggregate plot on comparable scales.
    pub scale_factor: f64,
    /// Pearson correlation between the primary crop and the index on
    /// their common years. `None` below 2 common years or for degenerate
    /// (zero-variance) inputs.
    pub correlation: Option<f64>,
    /// Primary-axis display ceiling: crop max * 1.1.
    pub crop_axis_max: f64,
    /// Secondary-axis display ceiling:
    /// `max(index_max, land_max * scale_factor) * 1.1`.
    pub secondary_axis_max: f64,
    /// Range-scoped comparison metrics for the metric cards.
    pub metrics: CombinedMetrics,
}

/// Headline numbers for the combined tab's metric cards.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedMetrics {
    /// Mean price of the primary crop over the range.
    pub avg_primary_crop: Option<f64>,
    pub avg_index: f64,
    pub latest_index: f64,
    /// Mean and latest of the per-year land aggregate.
    pub avg_land: f64,
    pub latest_land: f64,
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Align the three series onto `range` and derive the combined view.
///
/// All-or-nothing: returns `None` ("insufficient data overlap") when any
/// restricted series is empty, rather than a partial view. The category
/// dimension is not restricted — every commodity and state participates.
pub fn align(
    crop: &Series,
    land: &Series,
    index: &Series,
    range: ResolvedRange,
    primary_crop: &str,
) -> Option<CombinedView> {
    let crop_subset = filter_all(crop, range);
    let land_subset = filter_all(land, range);
    let index_subset = filter_all(index, range);

    if crop_subset.is_empty() || land_subset.is_empty() || index_subset.is_empty() {
        return None;
    }

    let land_by_year = mean_by_year(&land_subset);
    let index_points = index_subset.years_and_values();

    // Both maxima exist: the subsets are non-empty. A zero land maximum
    // would make the scale factor divide by zero; treat it as no overlap.
    let index_max = index_subset.max_value()?;
    let land_max = land_by_year
        .iter()
        .map(|&(_, v)| v)
        .fold(f64::NEG_INFINITY, f64::max);
    if land_max <= 0.0 {
        return None;
    }
    let scale_factor = index_max / land_max * 100.0;

    let crop_max = crop_subset.max_value()?;
    let crop_axis_max = crop_max * 1.1;
    let secondary_axis_max = index_max.max(land_max * scale_factor) * 1.1;

    let primary_points = category_points(&crop_subset, primary_crop);
    let correlation = pearson_on_common_years(&primary_points, &index_points);

    let crop_by_category = crop
        .categories
        .iter()
        .map(|c| (c.clone(), category_points(&crop_subset, c)))
        .filter(|(_, pts)| !pts.is_empty())
        .collect();

    let metrics = CombinedMetrics {
        avg_primary_crop: mean_of(&primary_points),
        avg_index: mean_of(&index_points).unwrap_or(0.0),
        latest_index: index_points.last().map(|&(_, v)| v).unwrap_or(0.0),
        avg_land: mean_of(&land_by_year).unwrap_or(0.0),
        latest_land: land_by_year.last().map(|&(_, v)| v).unwrap_or(0.0),
    };

    Some(CombinedView {
        range,
        crop_by_category,
        land_by_year,
        index_points,
        scale_factor,
        correlation,
        crop_axis_max,
        secondary_axis_max,
        metrics,
    })
}

/// Mean value per year across all categories in the subset, ascending.
pub fn mean_by_year(subset: &FilteredSubset<'_>) -> Vec<(i32, f64)> {
    let mut sums: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for row in subset.rows() {
        let entry = sums.entry(row.year).or_insert((0.0, 0));
        entry.0 += row.value;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(year, (sum, n))| (year, sum / n as f64))
        .collect()
}

fn category_points(subset: &FilteredSubset<'_>, category: &str) -> Vec<(i32, f64)> {
    subset
        .by_category(category)
        .iter()
        .map(|r: &&Observation| (r.year, r.value))
        .collect()
}

fn mean_of(points: &[(i32, f64)]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    Some(points.iter().map(|&(_, v)| v).sum::<f64>() / points.len() as f64)
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pearson correlation of two year-indexed series on the intersection of
/// their years. `None` below 2 common years or when either side has zero
/// variance on the intersection.
pub fn pearson_on_common_years(a: &[(i32, f64)], b: &[(i32, f64)]) -> Option<f64> {
    let b_by_year: BTreeMap<i32, f64> = b.iter().cloned().collect();
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .filter_map(|&(year, va)| b_by_year.get(&year).map(|&vb| (va, vb)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for &(va, vb) in &pairs {
        let da = va - mean_a;
        let db = vb - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some(cov / denom)
}
