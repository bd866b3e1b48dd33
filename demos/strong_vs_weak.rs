//! Strong vs weak acid titration curves
//!
//! Prints both built-in curves side by side, then exports them as CSV.
//!
//! ```bash
//! RUST_LOG=info cargo run --example strong_vs_weak -- [output_dir]
//! ```

use std::path::PathBuf;

use titration_rs::chemistry::{IndicatorBand, ScenarioCatalog, titration_curve};
use titration_rs::output::{CsvConfig, CsvMetadata, export_series_csv};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    let catalog = ScenarioCatalog::builtin();
    let strong = catalog.get("Strong Acid - Strong Base").ok_or("missing strong scenario")?;
    let weak = catalog.get("Weak Acid - Strong Base").ok_or("missing weak scenario")?;

    let strong_curve = titration_curve(strong, 50.0, 2.5)?;
    let weak_curve = titration_curve(weak, 50.0, 2.5)?;

    println!("{:>8}  {:>8}  {:>8}  {:<16}", "V (mL)", "strong", "weak", "indicator (weak)");
    for (s, w) in strong_curve.iter().zip(&weak_curve) {
        println!(
            "{:>8.1}  {:>8.3}  {:>8.3}  {:<16}",
            s.volume_added,
            s.ph,
            w.ph,
            format!("{:?}", IndicatorBand::of(w.ph))
        );
    }

    for (scenario, curve, file) in [
        (strong, &strong_curve, "strong_acid.csv"),
        (weak, &weak_curve, "weak_acid.csv"),
    ] {
        let config = CsvConfig::default().with_metadata(CsvMetadata::from_scenario(scenario));
        export_series_csv(curve, output_dir.join(file), Some(&config))?;
    }

    println!("\nCSV files written to {}", output_dir.display());
    Ok(())
}
