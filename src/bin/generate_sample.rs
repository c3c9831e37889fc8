use std::path::Path;

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// A plausible random walk around a slow upward trend.
fn walk(rng: &mut SimpleRng, start: f64, drift: f64, noise: f64, steps: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(steps);
    let mut v = start;
    for _ in 0..steps {
        values.push(v);
        v = (v * (1.0 + drift) + rng.gauss(0.0, noise)).max(0.1);
    }
    values
}

fn thousands(v: f64) -> String {
    let whole = v.round() as u64;
    let digits = whole.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn write_crop_prices(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let path = dir.join("Crop Prices.csv");
    let mut w = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["Geo Level", "Commodity", "Year", "Value"])?;

    let crops = [
        ("CORN", 2.5, 0.012, 0.25),
        ("SOYBEANS", 5.5, 0.015, 0.5),
        ("WHEAT", 3.3, 0.010, 0.3),
    ];

    let mut rows = 0;
    for (name, start, drift, noise) in crops {
        let values = walk(rng, start, drift, noise, 2025 - 1975 + 1);
        for (i, v) in values.iter().enumerate() {
            let year = (1975 + i as i32).to_string();
            let price = format!("{v:.2}");
            w.write_record(["NATIONAL", name, year.as_str(), price.as_str()])?;
            rows += 1;
            // State-level rows the loader must filter out.
            if (1975 + i) % 10 == 0 {
                let state_price = format!("{:.2}", v * 0.95);
                w.write_record(["STATE", name, year.as_str(), state_price.as_str()])?;
            }
        }
    }
    // An out-of-scope commodity and a withheld value.
    w.write_record(["NATIONAL", "BARLEY", "2020", "4.70"])?;
    w.write_record(["NATIONAL", "CORN", "1974", "2.40"])?;
    w.write_record(["NATIONAL", "WHEAT", "1999", "(D)"])?;
    w.flush()?;
    Ok(rows)
}

fn write_cropland_values(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let path = dir.join("Cropland Value.csv");
    let mut w = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["State", "Year", "Value"])?;

    let states = [
        ("KENTUCKY", 1800.0),
        ("INDIANA", 2300.0),
        ("OHIO", 2200.0),
        ("TENNESSEE", 1900.0),
        // Out of scope for the dashboard.
        ("IOWA", 2600.0),
    ];

    let mut rows = 0;
    for (name, start) in states {
        let values = walk(rng, start, 0.05, 80.0, 2025 - 1997 + 1);
        for (i, v) in values.iter().enumerate() {
            let year = (1997 + i as i32).to_string();
            let value = thousands(*v);
            // USDA formats these with thousands separators.
            w.write_record([name, year.as_str(), value.as_str()])?;
            rows += 1;
        }
    }
    w.flush()?;
    Ok(rows)
}

fn write_price_index(dir: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let path = dir.join("PriceReceivedIndex.csv");
    let mut w = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["Geo Level", "Year", "Value"])?;

    let values = walk(rng, 62.0, 0.018, 4.0, 2025 - 1990 + 1);
    let mut rows = 0;
    for (i, v) in values.iter().enumerate() {
        let year = 1990 + i as i32;
        // Pin the 2011 baseline at 100.
        let v = if year == 2011 { 100.0 } else { *v };
        let year = year.to_string();
        let value = format!("{v:.1}");
        w.write_record(["NATIONAL", year.as_str(), value.as_str()])?;
        rows += 1;
    }
    w.flush()?;
    Ok(rows)
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let dir = Path::new("data");
    std::fs::create_dir_all(dir).context("creating data directory")?;

    let crops = write_crop_prices(dir, &mut rng)?;
    let land = write_cropland_values(dir, &mut rng)?;
    let index = write_price_index(dir, &mut rng)?;

    println!(
        "Wrote {crops} crop price, {land} cropland value, and {index} price index rows to {}",
        dir.display()
    );
    Ok(())
}
