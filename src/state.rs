use std::path::PathBuf;

use crate::data::model::Series;
use crate::data::range::{
    ZoomPreset, COMBINED_PRESETS, CROP_PRESETS, INDEX_PRESETS, LAND_PRESETS,
};
use crate::data::store::SeriesStore;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    CropPrices,
    CroplandValues,
    PriceIndex,
    Combined,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::CropPrices,
        Tab::CroplandValues,
        Tab::PriceIndex,
        Tab::Combined,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::CropPrices => "Crop Prices",
            Tab::CroplandValues => "Cropland Values",
            Tab::PriceIndex => "Price Index",
            Tab::Combined => "Combined View",
        }
    }

    /// Zoom preset menu for this tab.
    pub fn presets(&self) -> &'static [ZoomPreset] {
        match self {
            Tab::CropPrices => CROP_PRESETS,
            Tab::CroplandValues => LAND_PRESETS,
            Tab::PriceIndex => INDEX_PRESETS,
            Tab::Combined => COMBINED_PRESETS,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-tab selection (ephemeral, reconstructed per render)
// ---------------------------------------------------------------------------

/// User-selected parameters for one tab: explicit range pickers, zoom
/// preset, and the category keys to display.
#[derive(Debug, Clone)]
pub struct TabSelection {
    pub start_year: i32,
    pub end_year: i32,
    pub preset: ZoomPreset,
    /// Selected categories in selection order. Irrelevant for the index
    /// tab.
    pub selected_keys: Vec<String>,
}

impl TabSelection {
    /// Defaults for a freshly loaded series: full span, default preset,
    /// every category selected.
    fn for_series(series: &Series, preset: ZoomPreset) -> Self {
        TabSelection {
            start_year: series.min_year().unwrap_or(0),
            end_year: series.max_year().unwrap_or(0),
            preset,
            selected_keys: series.categories.clone(),
        }
    }

    pub fn toggle_key(&mut self, key: &str) {
        if let Some(pos) = self.selected_keys.iter().position(|k| k == key) {
            self.selected_keys.remove(pos);
        } else {
            self.selected_keys.push(key.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded store (None until a data directory loads successfully).
    pub store: Option<SeriesStore>,

    pub active_tab: Tab,

    pub crop_selection: TabSelection,
    pub land_selection: TabSelection,
    pub index_selection: TabSelection,
    pub combined_selection: TabSelection,

    /// Directory the store was loaded from.
    pub data_dir: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let empty = TabSelection {
            start_year: 0,
            end_year: 0,
            preset: ZoomPreset::FullView,
            selected_keys: Vec::new(),
        };
        Self {
            store: None,
            active_tab: Tab::CropPrices,
            crop_selection: empty.clone(),
            land_selection: empty.clone(),
            index_selection: empty.clone(),
            combined_selection: empty,
            data_dir: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded store and reset every tab's selection to its
    /// series' defaults.
    pub fn set_store(&mut self, store: SeriesStore, dir: PathBuf) {
        self.crop_selection =
            TabSelection::for_series(&store.crop_prices, ZoomPreset::FullView);
        self.land_selection =
            TabSelection::for_series(&store.cropland_values, ZoomPreset::FullView);
        self.index_selection =
            TabSelection::for_series(&store.price_index, ZoomPreset::FullView);

        // The combined tab spans the land series' window (the narrowest of
        // the three) and defaults to explicit pickers.
        self.combined_selection =
            TabSelection::for_series(&store.cropland_values, ZoomPreset::Custom);
        self.combined_selection.selected_keys.clear();

        self.store = Some(store);
        self.data_dir = Some(dir);
        self.status_message = None;
    }

    /// Selection state for the given tab.
    pub fn selection_mut(&mut self, tab: Tab) -> &mut TabSelection {
        match tab {
            Tab::CropPrices => &mut self.crop_selection,
            Tab::CroplandValues => &mut self.land_selection,
            Tab::PriceIndex => &mut self.index_selection,
            Tab::Combined => &mut self.combined_selection,
        }
    }

    pub fn selection(&self, tab: Tab) -> &TabSelection {
        match tab {
            Tab::CropPrices => &self.crop_selection,
            Tab::CroplandValues => &self.land_selection,
            Tab::PriceIndex => &self.index_selection,
            Tab::Combined => &self.combined_selection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Observation, Series};

    fn store() -> SeriesStore {
        let crop = Series::from_rows(
            "Crop Prices",
            "$/bushel",
            (1975..=2025)
                .map(|y| Observation::new(Some("CORN"), y, 3.0))
                .collect(),
            &["CORN", "SOYBEANS", "WHEAT"],
        );
        let land = Series::from_rows(
            "Cropland Values",
            "$/acre",
            (1997..=2025)
                .map(|y| Observation::new(Some("KENTUCKY"), y, 4000.0))
                .collect(),
            &["KENTUCKY", "INDIANA", "OHIO", "TENNESSEE"],
        );
        let index = Series::from_rows(
            "Price Received Index",
            "index",
            (1990..=2025)
                .map(|y| Observation::new(None, y, 90.0))
                .collect(),
            &[],
        );
        SeriesStore {
            crop_prices: crop,
            cropland_values: land,
            price_index: index,
        }
    }

    #[test]
    fn test_set_store_resets_selections() {
        let mut state = AppState::default();
        state.set_store(store(), PathBuf::from("data"));

        assert_eq!(state.crop_selection.start_year, 1975);
        assert_eq!(state.crop_selection.end_year, 2025);
        assert_eq!(state.crop_selection.selected_keys.len(), 3);
        assert_eq!(state.land_selection.start_year, 1997);
        assert_eq!(state.combined_selection.preset, ZoomPreset::Custom);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_toggle_key_preserves_selection_order() {
        let mut sel = TabSelection {
            start_year: 2000,
            end_year: 2020,
            preset: ZoomPreset::FullView,
            selected_keys: vec!["CORN".to_string(), "WHEAT".to_string()],
        };
        sel.toggle_key("CORN");
        assert_eq!(sel.selected_keys, vec!["WHEAT".to_string()]);
        sel.toggle_key("SOYBEANS");
        assert_eq!(
            sel.selected_keys,
            vec!["WHEAT".to_string(), "SOYBEANS".to_string()]
        );
    }
}
