use std::fmt;

use super::model::{ResolvedRange, Series};

// ---------------------------------------------------------------------------
// Zoom presets
// ---------------------------------------------------------------------------

/// A named shortcut that deterministically computes a [`ResolvedRange`]
/// from a series' year bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPreset {
    /// Keep the explicit start/end pickers untouched.
    Custom,
    /// The series' full span.
    FullView,
    /// The most recent `n` years, inclusive.
    LastYears(u32),
    /// From a fixed year to the series' latest year.
    Since(i32),
}

impl fmt::Display for ZoomPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoomPreset::Custom => write!(f, "Custom Range"),
            ZoomPreset::FullView => write!(f, "Full View"),
            ZoomPreset::LastYears(n) => write!(f, "Last {n} Years"),
            ZoomPreset::Since(y) => write!(f, "Since {y}"),
        }
    }
}

/// Preset menu for the crop prices tab.
pub const CROP_PRESETS: &[ZoomPreset] = &[
    ZoomPreset::FullView,
    ZoomPreset::LastYears(10),
    ZoomPreset::LastYears(20),
    ZoomPreset::Custom,
];

/// Preset menu for the cropland values tab.
pub const LAND_PRESETS: &[ZoomPreset] = &[
    ZoomPreset::FullView,
    ZoomPreset::LastYears(5),
    ZoomPreset::LastYears(10),
    ZoomPreset::Custom,
];

/// Preset menu for the price index tab.
pub const INDEX_PRESETS: &[ZoomPreset] = &[
    ZoomPreset::FullView,
    ZoomPreset::LastYears(5),
    ZoomPreset::LastYears(10),
    ZoomPreset::Since(2010),
    ZoomPreset::Custom,
];

/// Preset menu for the combined view tab.
pub const COMBINED_PRESETS: &[ZoomPreset] = &[
    ZoomPreset::Custom,
    ZoomPreset::LastYears(10),
    ZoomPreset::LastYears(15),
    ZoomPreset::Since(2000),
    ZoomPreset::FullView,
];

// ---------------------------------------------------------------------------
// Range resolution
// ---------------------------------------------------------------------------

/// Map a (preset, explicit start/end) selection onto a concrete year
/// interval for `series`.
///
/// Any preset other than `Custom` overrides the explicit pickers. The
/// result is clamped into the series' actual bounds, so `LastYears(n)`
/// with `n` exceeding the span resolves to the full span rather than
/// starting before the earliest year. Returns `None` for an empty series.
pub fn resolve(
    series: &Series,
    preset: ZoomPreset,
    explicit_start: i32,
    explicit_end: i32,
) -> Option<ResolvedRange> {
    let min = series.min_year()?;
    let max = series.max_year()?;

    let (start, end) = match preset {
        ZoomPreset::FullView => (min, max),
        ZoomPreset::LastYears(n) => (max - (n.max(1) as i32 - 1), max),
        ZoomPreset::Since(year) => (year, max),
        ZoomPreset::Custom => (explicit_start, explicit_end),
    };

    let start = start.clamp(min, max);
    let end = end.clamp(min, max);
    if start <= end {
        Some(ResolvedRange::new(start, end))
    } else {
        Some(ResolvedRange::new(end, start))
    }
}
