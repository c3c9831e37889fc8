/// Data layer: core types, loading, filtering, and derived statistics.
///
/// Architecture:
/// ```text
///  Crop Prices.csv / Cropland Value.csv / PriceReceivedIndex.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + scope filter → Series
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ SeriesStore  │  three Series, loaded once, immutable
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐     ┌───────────────────┐
///   │  range    │ ──▶ │  filter   │ ──▶ │ stats / combined   │
///   └──────────┘     └──────────┘     └───────────────────┘
///    zoom preset →    range + key      summary statistics,
///    ResolvedRange    selection →      cross-series alignment,
///                     FilteredSubset   scale factor, correlation
/// ```

pub mod combined;
pub mod filter;
pub mod loader;
pub mod model;
pub mod range;
pub mod stats;
pub mod store;
