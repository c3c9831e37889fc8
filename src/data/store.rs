use std::path::{Path, PathBuf};

use super::loader::{self, LoadError, SourceSpec, CROPLAND_VALUES, CROP_PRICES, PRICE_INDEX};
use super::model::Series;

// ---------------------------------------------------------------------------
// SeriesStore – the three normalized series, loaded once
// ---------------------------------------------------------------------------

/// The three normalized series. Built once at startup from a data
/// directory and treated as immutable, read-only shared state afterwards.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    pub crop_prices: Series,
    pub cropland_values: Series,
    pub price_index: Series,
}

impl SeriesStore {
    /// Load all three sources from `dir`. Each source is looked up by its
    /// configured file stem, preferring `.csv` over `.json`.
    pub fn load(dir: &Path) -> Result<Self, LoadError> {
        let crop_prices = load_one(dir, &CROP_PRICES)?;
        let cropland_values = load_one(dir, &CROPLAND_VALUES)?;
        let price_index = load_one(dir, &PRICE_INDEX)?;

        log::info!(
            "loaded {} crop price, {} cropland value, {} price index rows from {}",
            crop_prices.len(),
            cropland_values.len(),
            price_index.len(),
            dir.display()
        );

        Ok(SeriesStore {
            crop_prices,
            cropland_values,
            price_index,
        })
    }

    /// Total row count across all three series.
    pub fn total_rows(&self) -> usize {
        self.crop_prices.len() + self.cropland_values.len() + self.price_index.len()
    }
}

fn load_one(dir: &Path, spec: &SourceSpec) -> Result<Series, LoadError> {
    let path = resolve_path(dir, spec.file_stem);
    loader::load_series(&path, spec)
}

fn resolve_path(dir: &Path, stem: &str) -> PathBuf {
    let csv_path = dir.join(format!("{stem}.csv"));
    if csv_path.exists() {
        return csv_path;
    }
    let json_path = dir.join(format!("{stem}.json"));
    if json_path.exists() {
        return json_path;
    }
    // Fall through to the CSV path so the loader reports a readable
    // "file not found" for the expected name.
    csv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = std::fs::File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    fn seed_data_dir(dir: &Path) {
        write_file(
            dir,
            "Crop Prices.csv",
            "Geo Level,Commodity,Year,Value\n\
             NATIONAL,CORN,2020,3.56\n\
             NATIONAL,SOYBEANS,2020,10.80\n\
             NATIONAL,WHEAT,2020,4.95\n",
        );
        write_file(
            dir,
            "Cropland Value.csv",
            "State,Year,Value\nKENTUCKY,2020,\"4,800\"\nOHIO,2020,\"6,500\"\n",
        );
        write_file(
            dir,
            "PriceReceivedIndex.csv",
            "Geo Level,Year,Value\nNATIONAL,2011,100.0\nNATIONAL,2020,92.4\n",
        );
    }

    #[test]
    fn test_load_all_three_sources() {
        let dir = tempfile::tempdir().unwrap();
        seed_data_dir(dir.path());

        let store = SeriesStore::load(dir.path()).unwrap();
        assert_eq!(store.crop_prices.len(), 3);
        assert_eq!(store.cropland_values.len(), 2);
        assert_eq!(store.price_index.len(), 2);
        assert_eq!(store.total_rows(), 7);
    }

    #[test]
    fn test_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        // Only one of three files present.
        write_file(
            dir.path(),
            "Crop Prices.csv",
            "Geo Level,Commodity,Year,Value\nNATIONAL,CORN,2020,3.56\n",
        );
        let err = SeriesStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_json_fallback() {
        let dir = tempfile::tempdir().unwrap();
        seed_data_dir(dir.path());
        std::fs::remove_file(dir.path().join("PriceReceivedIndex.csv")).unwrap();
        write_file(
            dir.path(),
            "PriceReceivedIndex.json",
            r#"[{"Geo Level": "NATIONAL", "Year": 2011, "Value": 100.0}]"#,
        );

        let store = SeriesStore::load(dir.path()).unwrap();
        assert_eq!(store.price_index.len(), 1);
    }
}
