use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::{self, INDEX_COLOR, LAND_AVG_COLOR};
use crate::data::combined::CombinedView;
use crate::data::filter::FilteredSubset;

// ---------------------------------------------------------------------------
// Single-series line chart (tabs 1-3)
// ---------------------------------------------------------------------------

/// Render one series' filtered subset as per-category lines. The colour
/// for each line comes from the declarative category → colour hints.
pub fn series_plot(ui: &mut Ui, plot_id: &str, subset: &FilteredSubset<'_>) {
    let series = subset.series();

    Plot::new(plot_id.to_string())
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(series.unit.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if series.has_categories() {
                for (i, key) in subset.keys.iter().enumerate() {
                    let points: PlotPoints = subset
                        .by_category(key)
                        .iter()
                        .map(|r| [r.year as f64, r.value])
                        .collect();
                    let line = Line::new(points)
                        .name(title_case(key))
                        .color(color::color_for(key, i, subset.keys.len()))
                        .width(2.5);
                    plot_ui.line(line);
                }
            } else {
                let points: PlotPoints = subset
                    .years_and_values()
                    .iter()
                    .map(|&(y, v)| [y as f64, v])
                    .collect();
                let line = Line::new(points)
                    .name(series.name.clone())
                    .color(INDEX_COLOR)
                    .width(2.5);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Combined multi-axis chart (tab 4)
// ---------------------------------------------------------------------------

/// Render the combined view. Crop prices draw at their own scale on the
/// primary axis; the index and the cropland aggregate are rescaled into
/// the primary range using the view's axis ceilings, so all three groups
/// remain comparable on one chart. Rescaling here is purely a display
/// concern: the view carries raw values plus the derived scale metadata.
pub fn combined_plot(ui: &mut Ui, view: &CombinedView) {
    // secondary value → primary display coordinate
    let rescale = |v: f64| v / view.secondary_axis_max * view.crop_axis_max;

    Plot::new("combined_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Crop price ($/bushel); index and $/acre rescaled")
        .include_y(0.0)
        .include_y(view.crop_axis_max)
        .show(ui, |plot_ui| {
            for (i, (name, points)) in view.crop_by_category.iter().enumerate() {
                let pts: PlotPoints = points.iter().map(|&(y, v)| [y as f64, v]).collect();
                let line = Line::new(pts)
                    .name(format!("{} Price", title_case(name)))
                    .color(color::color_for(name, i, view.crop_by_category.len()))
                    .width(2.5);
                plot_ui.line(line);
            }

            let index_pts: PlotPoints = view
                .index_points
                .iter()
                .map(|&(y, v)| [y as f64, rescale(v)])
                .collect();
            plot_ui.line(
                Line::new(index_pts)
                    .name("Price Index")
                    .color(INDEX_COLOR)
                    .width(2.5),
            );

            let land_pts: PlotPoints = view
                .land_by_year
                .iter()
                .map(|&(y, v)| [y as f64, rescale(v * view.scale_factor)])
                .collect();
            plot_ui.line(
                Line::new(land_pts)
                    .name("Avg Cropland Value")
                    .color(LAND_AVG_COLOR)
                    .width(2.5),
            );
        });
}

/// "CORN" → "Corn", "KENTUCKY" → "Kentucky".
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}
