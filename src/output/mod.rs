//! Output of titration results
//!
//! - [`csv`]: CSV export of a sample series (session history or theoretical curve)
//!
//! Both take plain `&[Sample]` slices, so a live session and a precomputed
//! curve are exported the same way.
//!
//! ```rust
//! use titration_rs::chemistry::{titration_curve, ScenarioCatalog};
//! use titration_rs::output::{write_series_csv, CsvConfig, CsvMetadata};
//!
//! let catalog = ScenarioCatalog::builtin();
//! let scenario = catalog.default_scenario();
//! let curve = titration_curve(scenario, 50.0, 0.5).unwrap();
//!
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_scenario(scenario));
//! let mut buffer = Vec::new();
//! write_series_csv(&curve, &mut buffer, Some(&config)).unwrap();
//! assert!(String::from_utf8(buffer).unwrap().contains("Volume (mL),pH"));
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvMetadata, export_series_csv, write_series_csv};
