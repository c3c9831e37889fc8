use std::path::Path;

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Observation, Series};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to read or parse a source table. Anything less severe (a single
/// non-numeric cell, an out-of-scope row) is handled by dropping the row.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing CSV {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("parsing JSON {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}: expected a top-level JSON array of records")]
    JsonShape { path: String },
    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: String, column: String },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

// ---------------------------------------------------------------------------
// Source specifications
// ---------------------------------------------------------------------------

/// Scope configuration for one source table: which rows belong to the
/// series and how cells are coerced.
#[derive(Debug, Clone, Copy)]
pub struct SourceSpec {
    /// Display name of the resulting series.
    pub name: &'static str,
    /// Unit label, e.g. "$/acre".
    pub unit: &'static str,
    /// File stem looked up under the data directory ("Crop Prices" →
    /// "Crop Prices.csv" or "Crop Prices.json").
    pub file_stem: &'static str,
    /// When set, only rows with `Geo Level` equal to this value are kept.
    pub geo_level: Option<&'static str>,
    /// Column holding the category ("Commodity" or "State"), if any.
    pub category_column: Option<&'static str>,
    /// Allowed category values, in display order. Empty when the series
    /// has no category dimension.
    pub categories: &'static [&'static str],
    /// Inclusive year window; rows outside are dropped.
    pub year_window: (i32, i32),
    /// Strip thousands separators from `Value` before coercion
    /// ("6,050" → 6050.0).
    pub strip_thousands: bool,
}

/// National crop prices for corn, soybeans, and wheat, $/bushel.
pub const CROP_PRICES: SourceSpec = SourceSpec {
    name: "Crop Prices",
    unit: "$/bushel",
    file_stem: "Crop Prices",
    geo_level: Some("NATIONAL"),
    category_column: Some("Commodity"),
    categories: &["CORN", "SOYBEANS", "WHEAT"],
    year_window: (1975, 2025),
    strip_thousands: false,
};

/// Cropland values for Kentucky, Indiana, Ohio, and Tennessee, $/acre.
/// USDA exports format these values with thousands separators.
pub const CROPLAND_VALUES: SourceSpec = SourceSpec {
    name: "Cropland Values",
    unit: "$/acre",
    file_stem: "Cropland Value",
    geo_level: None,
    category_column: Some("State"),
    categories: &["KENTUCKY", "INDIANA", "OHIO", "TENNESSEE"],
    year_window: (1997, 2025),
    strip_thousands: true,
};

/// National price received index, 2011 = 100. No category dimension.
pub const PRICE_INDEX: SourceSpec = SourceSpec {
    name: "Price Received Index",
    unit: "index (2011 = 100)",
    file_stem: "PriceReceivedIndex",
    geo_level: Some("NATIONAL"),
    category_column: None,
    categories: &[],
    year_window: (1990, 2025),
    strip_thousands: false,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one series from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with `Geo Level` / `Commodity` / `State` /
///   `Year` / `Value` columns as applicable
/// * `.json` – records-oriented array with the same keys
pub fn load_series(path: &Path, spec: &SourceSpec) -> Result<Series, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path, spec),
        "json" => load_json(path, spec),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

fn parse_year(s: &str) -> Option<i32> {
    let t = s.trim();
    // USDA exports sometimes carry years as "2020.0".
    t.parse::<i32>()
        .ok()
        .or_else(|| t.parse::<f64>().ok().map(|f| f as i32))
}

fn parse_value(s: &str, strip_thousands: bool) -> Option<f64> {
    let t = s.trim();
    if strip_thousands {
        t.replace(',', "").parse::<f64>().ok()
    } else {
        t.parse::<f64>().ok()
    }
}

/// Apply the spec's scope to one coerced row. Returns the category to
/// record (if any), or `None` when the row is out of scope.
fn in_scope<'a>(
    spec: &SourceSpec,
    geo: Option<&str>,
    category: Option<&'a str>,
    year: i32,
) -> Option<Option<&'a str>> {
    if let Some(wanted) = spec.geo_level {
        if geo != Some(wanted) {
            return None;
        }
    }
    let (lo, hi) = spec.year_window;
    if year < lo || year > hi {
        return None;
    }
    match spec.category_column {
        Some(_) => {
            let cat = category?;
            if spec.categories.contains(&cat) {
                Some(Some(cat))
            } else {
                None
            }
        }
        None => Some(None),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, spec: &SourceSpec) -> Result<Series, LoadError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: display.clone(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Csv {
            path: display.clone(),
            source: e,
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = |name: &str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                path: display.clone(),
                column: name.to_string(),
            })
    };

    let year_idx = col("Year")?;
    let value_idx = col("Value")?;
    let geo_idx = match spec.geo_level {
        Some(_) => Some(col("Geo Level")?),
        None => None,
    };
    let cat_idx = match spec.category_column {
        Some(name) => Some(col(name)?),
        None => None,
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Csv {
            path: display.clone(),
            source: e,
        })?;

        // Non-numeric year or value excludes the row, never errors.
        let Some(year) = record.get(year_idx).and_then(parse_year) else {
            continue;
        };
        let Some(value) = record
            .get(value_idx)
            .and_then(|s| parse_value(s, spec.strip_thousands))
        else {
            continue;
        };

        let geo = geo_idx.and_then(|i| record.get(i)).map(str::trim);
        let cat = cat_idx.and_then(|i| record.get(i)).map(str::trim);

        if let Some(category) = in_scope(spec, geo, cat, year) {
            rows.push(Observation::new(category, year, value));
        }
    }

    Ok(Series::from_rows(spec.name, spec.unit, rows, spec.categories))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Geo Level": "NATIONAL", "Commodity": "CORN",
///     "Year": 2020, "Value": 3.56 },
///   ...
/// ]
/// ```
fn load_json(path: &Path, spec: &SourceSpec) -> Result<Series, LoadError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: display.clone(),
        source: e,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|e| LoadError::Json {
        path: display.clone(),
        source: e,
    })?;

    let records = root.as_array().ok_or(LoadError::JsonShape {
        path: display.clone(),
    })?;

    let mut rows = Vec::new();
    for rec in records {
        let Some(obj) = rec.as_object() else {
            continue;
        };

        let Some(year) = json_year(obj.get("Year")) else {
            continue;
        };
        let Some(value) = json_value(obj.get("Value"), spec.strip_thousands) else {
            continue;
        };

        let geo = obj.get("Geo Level").and_then(|v| v.as_str()).map(str::trim);
        let cat = spec
            .category_column
            .and_then(|c| obj.get(c))
            .and_then(|v| v.as_str())
            .map(str::trim);

        if let Some(category) = in_scope(spec, geo, cat, year) {
            rows.push(Observation::new(category, year, value));
        }
    }

    Ok(Series::from_rows(spec.name, spec.unit, rows, spec.categories))
}

fn json_year(val: Option<&JsonValue>) -> Option<i32> {
    match val? {
        JsonValue::Number(n) => n.as_f64().map(|f| f as i32),
        JsonValue::String(s) => parse_year(s),
        _ => None,
    }
}

fn json_value(val: Option<&JsonValue>, strip_thousands: bool) -> Option<f64> {
    match val? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_value(s, strip_thousands),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_csv_scope_filtering() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "Crop Prices.csv",
            "Geo Level,Commodity,Year,Value\n\
             NATIONAL,CORN,2020,3.56\n\
             NATIONAL,BARLEY,2020,4.70\n\
             STATE,CORN,2020,3.40\n\
             NATIONAL,WHEAT,2020,4.95\n\
             NATIONAL,CORN,1960,1.00\n",
        );

        let series = load_series(&path, &CROP_PRICES).unwrap();
        // BARLEY (category), STATE (geo) and 1960 (year window) are dropped.
        assert_eq!(series.len(), 2);
        assert!(series
            .rows
            .iter()
            .all(|r| r.category.as_deref() == Some("CORN")
                || r.category.as_deref() == Some("WHEAT")));
    }

    #[test]
    fn test_csv_non_numeric_rows_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "Crop Prices.csv",
            "Geo Level,Commodity,Year,Value\n\
             NATIONAL,CORN,2020,3.56\n\
             NATIONAL,CORN,2019,(D)\n\
             NATIONAL,CORN,n/a,3.10\n",
        );

        let series = load_series(&path, &CROP_PRICES).unwrap();
        assert_eq!(series.len(), 1, "withheld and unparseable rows are dropped");
        assert_eq!(series.rows[0].year, 2020);
    }

    #[test]
    fn test_csv_thousands_separators_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "Cropland Value.csv",
            "State,Year,Value\n\
             KENTUCKY,2025,\"6,050\"\n\
             INDIANA,2025,\"9,200\"\n\
             IOWA,2025,\"12,000\"\n",
        );

        let series = load_series(&path, &CROPLAND_VALUES).unwrap();
        assert_eq!(series.len(), 2, "IOWA is out of scope");
        assert_eq!(series.rows[0].value, 6050.0);
    }

    #[test]
    fn test_csv_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "Crop Prices.csv", "Commodity,Year,Value\nCORN,2020,3.5\n");
        let err = load_series(&path, &CROP_PRICES).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column, .. } if column == "Geo Level"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_series(&dir.path().join("nope.csv"), &CROP_PRICES).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_series(Path::new("data.parquet"), &CROP_PRICES).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "parquet"));
    }

    #[test]
    fn test_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "PriceReceivedIndex.json",
            r#"[
              {"Geo Level": "NATIONAL", "Year": 2011, "Value": 100.0},
              {"Geo Level": "NATIONAL", "Year": "2020", "Value": "92.4"},
              {"Geo Level": "STATE", "Year": 2020, "Value": 90.0},
              {"Geo Level": "NATIONAL", "Year": 1980, "Value": 55.0}
            ]"#,
        );

        let series = load_series(&path, &PRICE_INDEX).unwrap();
        assert_eq!(series.len(), 2);
        assert!(series.rows.iter().all(|r| r.category.is_none()));
        assert_eq!(series.rows[1].value, 92.4);
    }

    #[test]
    fn test_index_series_has_no_categories() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "PriceReceivedIndex.csv",
            "Geo Level,Year,Value\nNATIONAL,2011,100.0\n",
        );
        let series = load_series(&path, &PRICE_INDEX).unwrap();
        assert!(!series.has_categories());
    }
}
