use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::combined::CombinedView;
use crate::data::stats::{CategorySummary, SingleSummary};
use crate::state::{AppState, Tab};
use crate::ui::plot::title_case;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / tab bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in Tab::ALL {
            if ui
                .selectable_label(state.active_tab == tab, tab.title())
                .clicked()
            {
                state.active_tab = tab;
            }
        }

        ui.separator();

        if let Some(store) = &state.store {
            ui.label(format!("{} rows loaded", store.total_rows()));
            if let Some(dir) = &state.data_dir {
                ui.label(RichText::new(dir.display().to_string()).weak());
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open agricultural data folder")
        .pick_folder();

    if let Some(dir) = folder {
        match crate::data::store::SeriesStore::load(&dir) {
            Ok(store) => {
                state.set_store(store, dir);
            }
            Err(e) => {
                log::error!("failed to load data folder: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Left side panel – range, zoom, and category controls
// ---------------------------------------------------------------------------

/// Render the controls for the active tab.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(store) = &state.store else {
        ui.label("No data loaded.");
        ui.label("File → Open data folder…");
        return;
    };

    let tab = state.active_tab;
    // Clone what the widgets need so the selection can be mutated below.
    let series = match tab {
        Tab::CropPrices => &store.crop_prices,
        Tab::CroplandValues => &store.cropland_values,
        Tab::PriceIndex => &store.price_index,
        // The combined tab picks years over the comparison window, which
        // is bounded by the narrowest series.
        Tab::Combined => &store.cropland_values,
    };
    let years = series.years();
    let categories = match tab {
        Tab::CropPrices => store.crop_prices.categories.clone(),
        Tab::CroplandValues => store.cropland_values.categories.clone(),
        _ => Vec::new(),
    };

    let selection = state.selection_mut(tab);

    // ---- Year pickers ----
    ui.strong("Start Year");
    egui::ComboBox::from_id_salt("start_year")
        .selected_text(selection.start_year.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &year in &years {
                ui.selectable_value(&mut selection.start_year, year, year.to_string());
            }
        });

    ui.strong("End Year");
    egui::ComboBox::from_id_salt("end_year")
        .selected_text(selection.end_year.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &year in &years {
                ui.selectable_value(&mut selection.end_year, year, year.to_string());
            }
        });

    // ---- Zoom preset ----
    ui.add_space(4.0);
    ui.strong("Zoom Level");
    egui::ComboBox::from_id_salt("zoom_preset")
        .selected_text(selection.preset.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &preset in tab.presets() {
                ui.selectable_value(&mut selection.preset, preset, preset.to_string());
            }
        });

    // ---- Category checkboxes ----
    if !categories.is_empty() {
        ui.add_space(4.0);
        ui.strong(match tab {
            Tab::CropPrices => "Crops to Display",
            _ => "States to Display",
        });
        for cat in &categories {
            let mut checked = selection.selected_keys.iter().any(|k| k == cat);
            if ui.checkbox(&mut checked, title_case(cat)).changed() {
                selection.toggle_key(cat);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

fn metric_card(ui: &mut Ui, label: &str, value: &str, delta: &str) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).small());
            ui.label(RichText::new(value).heading());
            if !delta.is_empty() {
                ui.label(RichText::new(delta).small().weak());
            }
        });
    });
}

/// Detailed cards for a single selected category.
pub fn single_cards(
    ui: &mut Ui,
    name: &str,
    summary: &SingleSummary,
    fmt: &dyn Fn(f64) -> String,
    show_growth: bool,
) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        metric_card(
            ui,
            &format!("{name} - Latest"),
            &fmt(summary.latest),
            &format!("Year: {}", summary.latest_year),
        );
        metric_card(ui, &format!("{name} - Average"), &fmt(summary.average), "");
        metric_card(
            ui,
            &format!("{name} - Range"),
            &format!("{} - {}", fmt(summary.min), fmt(summary.max)),
            &summary
                .std_dev
                .map(|sd| format!("Volatility: {}", fmt(sd)))
                .unwrap_or_default(),
        );
        if show_growth {
            metric_card(
                ui,
                &format!("{name} - Growth Rate"),
                &summary
                    .growth_rate
                    .map(|g| format!("{g:+.1}%"))
                    .unwrap_or_else(|| "n/a".to_string()),
                "Over period",
            );
        }
    });
}

/// Compact per-category cards for a multi-key selection.
pub fn multi_cards(
    ui: &mut Ui,
    per_key: &[(String, CategorySummary)],
    fmt: &dyn Fn(f64) -> String,
) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (key, s) in per_key {
            ui.group(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.label(RichText::new(title_case(key)).strong());
                    ui.label(RichText::new(fmt(s.latest)).heading());
                    ui.label(
                        RichText::new(format!(
                            "Avg: {} | Range: {}-{}",
                            fmt(s.average),
                            fmt(s.min),
                            fmt(s.max)
                        ))
                        .small()
                        .weak(),
                    );
                });
            });
        }
    });
}

/// Cards for the index tab: latest vs baseline, average, peak-with-year.
pub fn index_cards(ui: &mut Ui, summary: &SingleSummary, peak: Option<(i32, f64)>) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        metric_card(
            ui,
            &format!("Latest Index ({})", summary.latest_year),
            &format!("{:.1}", summary.latest),
            &format!("{:+.1} vs 2011 baseline", summary.latest - 100.0),
        );
        metric_card(ui, "Average Index", &format!("{:.1}", summary.average), "");
        if let Some((year, value)) = peak {
            metric_card(
                ui,
                "Peak Index",
                &format!("{value:.1}"),
                &format!("Year: {year}"),
            );
        }
    });
}

/// Cards for the combined tab's comparative analysis.
pub fn combined_cards(ui: &mut Ui, view: &CombinedView, primary_crop: &str) {
    let m = &view.metrics;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        if let Some(avg) = m.avg_primary_crop {
            metric_card(
                ui,
                &format!("Avg {} Price", title_case(primary_crop)),
                &format!("${avg:.2}/bu"),
                "Primary axis",
            );
        }
        metric_card(
            ui,
            "Avg Price Index",
            &format!("{:.1}", m.avg_index),
            &format!("Latest: {:.1}", m.latest_index),
        );
        metric_card(
            ui,
            "Avg Cropland Value",
            &format!("${}/acre", fmt_thousands(m.avg_land)),
            &format!("Latest: ${}", fmt_thousands(m.latest_land)),
        );
        match view.correlation {
            Some(r) => metric_card(
                ui,
                &format!("{}-Index Correlation", title_case(primary_crop)),
                &format!("{r:.3}"),
                "Relationship strength",
            ),
            None => metric_card(ui, "Correlation", "n/a", "Too few common years"),
        }
    });
}

// ---------------------------------------------------------------------------
// Value formatting
// ---------------------------------------------------------------------------

/// "$3.56/bushel" style for crop prices.
pub fn fmt_bushel(v: f64) -> String {
    format!("${v:.2}/bushel")
}

/// "$6,050/acre" style for land values.
pub fn fmt_acre(v: f64) -> String {
    format!("${}/acre", fmt_thousands(v))
}

/// Round to whole units and insert thousands separators.
pub fn fmt_thousands(v: f64) -> String {
    let negative = v < 0.0;
    let whole = v.abs().round() as u64;
    let digits = whole.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_thousands() {
        assert_eq!(fmt_thousands(6050.0), "6,050");
        assert_eq!(fmt_thousands(950.4), "950");
        assert_eq!(fmt_thousands(1234567.0), "1,234,567");
        assert_eq!(fmt_thousands(-4200.0), "-4,200");
    }

    #[test]
    fn test_fmt_units() {
        assert_eq!(fmt_bushel(3.555), "$3.56/bushel");
        assert_eq!(fmt_acre(6050.0), "$6,050/acre");
    }
}
