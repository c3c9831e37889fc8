use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Declarative style hints: category → colour
// ---------------------------------------------------------------------------

/// Colour for the price index line.
pub const INDEX_COLOR: Color32 = Color32::from_rgb(0xE7, 0x4C, 0x3C);

/// Colour for the per-year cropland aggregate on the combined chart.
pub const LAND_AVG_COLOR: Color32 = Color32::from_rgb(0x9B, 0x59, 0xB6);

/// Fixed colours for the known commodities and states. The data layer
/// hands these to the plotting surface as a lookup; it never touches the
/// plot traces itself.
pub fn category_color(category: &str) -> Option<Color32> {
    let c = match category {
        "CORN" => Color32::from_rgb(0xFF, 0xD7, 0x00),
        "SOYBEANS" => Color32::from_rgb(0x22, 0x8B, 0x22),
        "WHEAT" => Color32::from_rgb(0xDE, 0xB8, 0x87),
        "KENTUCKY" => Color32::from_rgb(0xFF, 0x6B, 0x6B),
        "INDIANA" => Color32::from_rgb(0x4E, 0xCD, 0xC4),
        "OHIO" => Color32::from_rgb(0x45, 0xB7, 0xD1),
        "TENNESSEE" => Color32::from_rgb(0x96, 0xCE, 0xB4),
        _ => return None,
    };
    Some(c)
}

/// Colour for a category, falling back to an evenly-spaced hue for
/// categories outside the configured palettes.
pub fn color_for(category: &str, position: usize, total: usize) -> Color32 {
    category_color(category).unwrap_or_else(|| generated_color(position, total.max(1)))
}

/// Generates the `i`-th of `n` visually distinct colours using evenly
/// spaced hues.
fn generated_color(i: usize, n: usize) -> Color32 {
    let hue = (i as f32 / n as f32) * 360.0;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
