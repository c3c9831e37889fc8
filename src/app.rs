use std::path::Path;

use eframe::egui;

use crate::data::combined;
use crate::data::filter;
use crate::data::range;
use crate::data::stats::{self, Summary};
use crate::data::store::SeriesStore;
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot};

/// Commodity used for the combined tab's correlation metric.
const PRIMARY_CROP: &str = "CORN";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CropDashApp {
    pub state: AppState,
}

impl CropDashApp {
    /// Start up and try to load the default data directory ("data/", then
    /// the working directory). A missing directory is not fatal: the app
    /// opens with a hint and the user picks a folder.
    pub fn new() -> Self {
        let mut state = AppState::default();
        for dir in [Path::new("data"), Path::new(".")] {
            match SeriesStore::load(dir) {
                Ok(store) => {
                    state.set_store(store, dir.to_path_buf());
                    break;
                }
                Err(e) => {
                    log::warn!("no data in {}: {e}", dir.display());
                }
            }
        }
        if state.store.is_none() {
            state.status_message =
                Some("No data available - open a data folder to begin".to_string());
        }
        Self { state }
    }
}

impl Default for CropDashApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for CropDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu + tab bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: range / zoom / category controls ----
        egui::SidePanel::left("controls_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart + metric cards ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &self.state);
        });
    }
}

// ---------------------------------------------------------------------------
// Central panel: resolve → filter → summarize/align → render
// ---------------------------------------------------------------------------

fn central_panel(ui: &mut egui::Ui, state: &AppState) {
    let Some(store) = &state.store else {
        ui.centered_and_justified(|ui: &mut egui::Ui| {
            ui.heading("Open a data folder to view charts  (File → Open data folder…)");
        });
        return;
    };

    match state.active_tab {
        Tab::Combined => combined_tab(ui, state, store),
        tab => series_tab(ui, state, store, tab),
    }
}

fn series_tab(ui: &mut egui::Ui, state: &AppState, store: &SeriesStore, tab: Tab) {
    let series = match tab {
        Tab::CropPrices => &store.crop_prices,
        Tab::CroplandValues => &store.cropland_values,
        _ => &store.price_index,
    };
    let selection = state.selection(tab);

    // Empty selection is a valid terminal state, rendered distinctly.
    if series.has_categories() && selection.selected_keys.is_empty() {
        ui.heading(series.name.clone());
        ui.separator();
        ui.label("Select at least one item to display data and statistics.");
        return;
    }

    let Some(range) = range::resolve(
        series,
        selection.preset,
        selection.start_year,
        selection.end_year,
    ) else {
        ui.label(format!("No {} data available.", series.name));
        return;
    };

    let subset = filter::filter(series, range, &selection.selected_keys);

    ui.heading(format!("{} ({range})", series.name));
    ui.separator();

    let plot_height = ui.available_height() * 0.6;
    ui.allocate_ui(egui::vec2(ui.available_width(), plot_height), |ui| {
        plot::series_plot(ui, tab.title(), &subset);
    });

    ui.add_space(8.0);
    ui.strong(format!("Summary Statistics ({range})"));

    match stats::summarize(&subset) {
        Summary::NoData => {
            ui.label("No data available for the selected period.");
        }
        Summary::Single(summary) => {
            let name = subset
                .keys
                .first()
                .map(|k| plot::title_case(k))
                .unwrap_or_else(|| series.name.clone());
            match tab {
                Tab::CropPrices => {
                    panels::single_cards(ui, &name, &summary, &panels::fmt_bushel, false)
                }
                Tab::CroplandValues => {
                    panels::single_cards(ui, &name, &summary, &panels::fmt_acre, true)
                }
                _ => panels::index_cards(ui, &summary, stats::peak(&subset)),
            }
        }
        Summary::Multi(per_key) => {
            let fmt: &dyn Fn(f64) -> String = match tab {
                Tab::CropPrices => &panels::fmt_bushel,
                _ => &panels::fmt_acre,
            };
            panels::multi_cards(ui, &per_key, fmt);
        }
    }
}

fn combined_tab(ui: &mut egui::Ui, state: &AppState, store: &SeriesStore) {
    let selection = state.selection(Tab::Combined);

    // The comparison window is bounded by the narrowest series (cropland
    // values), so presets resolve against its span.
    let Some(range) = range::resolve(
        &store.cropland_values,
        selection.preset,
        selection.start_year,
        selection.end_year,
    ) else {
        ui.label("No data available for the combined view.");
        return;
    };

    match combined::align(
        &store.crop_prices,
        &store.cropland_values,
        &store.price_index,
        range,
        PRIMARY_CROP,
    ) {
        Some(view) => {
            ui.heading(format!("Combined Agricultural Data ({range})"));
            ui.separator();

            let plot_height = ui.available_height() * 0.6;
            ui.allocate_ui(egui::vec2(ui.available_width(), plot_height), |ui| {
                plot::combined_plot(ui, &view);
            });

            ui.add_space(8.0);
            ui.strong(format!("Comparative Analysis ({range})"));
            panels::combined_cards(ui, &view, PRIMARY_CROP);
        }
        None => {
            ui.heading("Combined Agricultural Data");
            ui.separator();
            ui.label(
                "Insufficient data overlap between datasets for the selected \
                 time period. Try a range between 1997 and 2025.",
            );
        }
    }
}
