//! CSV export of titration series
//!
//! Writes `(volume, pH)` samples as two columns, readable by spreadsheets,
//! pandas and most plotting tools.
//!
//! # Minimal Export
//!
//! ```rust,no_run
//! use titration_rs::chemistry::ScenarioCatalog;
//! use titration_rs::output::export_series_csv;
//! use titration_rs::session::TitrationSession;
//!
//! let mut session = TitrationSession::new(ScenarioCatalog::builtin().default_scenario().clone());
//! session.add_volume(12.5).unwrap();
//! session.add_volume(12.5).unwrap();
//!
//! export_series_csv(session.series(), "titration.csv", None).unwrap();
//! ```
//!
//! **Output** (`titration.csv`):
//! ```csv
//! Volume (mL),pH
//! 0.000000,1.000000
//! 12.500000,1.477121
//! 25.000000,7.000000
//! ```
//!
//! # With Metadata
//!
//! ```csv
//! # Titration Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Scenario: Strong Acid - Strong Base
//! # Acid: HCl (0.1 mol/L, 25 mL)
//! # Base: NaOH (0.1 mol/L)
//! # Equivalence Volume: 25 mL
//! #
//! Volume (mL),pH
//! ...
//! ```
//!
//! Infinite pH values (the weak acid before any titrant is added) are
//! written as `inf` / `-inf`. NaN is rejected.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::chemistry::{Sample, Scenario};
use crate::error::{Result, TitrationError};

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use titration_rs::output::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 3,
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    pub metadata: Option<CsvMetadata>,

    /// Header of the volume column (default: "Volume (mL)")
    pub volume_header: String,

    /// Header of the pH column (default: "pH")
    pub ph_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            volume_header: "Volume (mL)".to_string(),
            ph_header: "pH".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon delimiter, decimal comma)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Enable the metadata header
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub scenario_name: Option<String>,

    /// Acid label with its concentration and initial volume
    pub acid: Option<String>,

    /// Base label with its concentration
    pub base: Option<String>,

    /// Equivalence volume \[mL\]
    pub equivalence_volume: Option<f64>,

    /// Additional key/value lines
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata describing `scenario`
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let acid = match scenario.pka() {
            Some(pka) => format!(
                "{} ({} mol/L, {} mL, pKa {})",
                scenario.acid(),
                scenario.acid_concentration(),
                scenario.initial_acid_volume(),
                pka
            ),
            None => format!(
                "{} ({} mol/L, {} mL)",
                scenario.acid(),
                scenario.acid_concentration(),
                scenario.initial_acid_volume()
            ),
        };

        Self {
            scenario_name: Some(scenario.name().to_string()),
            acid: Some(acid),
            base: Some(format!("{} ({} mol/L)", scenario.base(), scenario.base_concentration())),
            equivalence_volume: Some(scenario.equivalence_volume()),
            custom: Vec::new(),
        }
    }

    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(out, "# Titration Data")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(name) = &metadata.scenario_name {
        writeln!(out, "# Scenario: {}", name)?;
    }
    if let Some(acid) = &metadata.acid {
        writeln!(out, "# Acid: {}", acid)?;
    }
    if let Some(base) = &metadata.base {
        writeln!(out, "# Base: {}", base)?;
    }
    if let Some(volume) = metadata.equivalence_volume {
        writeln!(out, "# Equivalence Volume: {} mL", volume)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn validate(samples: &[Sample]) -> Result<()> {
    if samples.is_empty() {
        return Err(TitrationError::Export("empty series".to_string()));
    }
    if let Some(bad) = samples.iter().position(|s| s.volume_added.is_nan() || s.ph.is_nan()) {
        return Err(TitrationError::Export(format!("NaN in sample {}", bad)));
    }
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Write a series as CSV to any writer
///
/// # Errors
///
/// - `Export` for an empty series or a NaN value
/// - `Io` when writing fails (the path is reported as `<writer>`)
pub fn write_series_csv<W: Write>(
    samples: &[Sample],
    out: &mut W,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    validate(samples)?;

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    write_rows(samples, out, configuration).map_err(|e| TitrationError::io("<writer>", e))
}

/// Export a series to a CSV file
///
/// # Errors
///
/// - `Export` for an empty series or a NaN value
/// - `Io` when the file cannot be created or written
pub fn export_series_csv(
    samples: &[Sample],
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    let path = output_path.as_ref();
    validate(samples)?;

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let file = File::create(path).map_err(|e| TitrationError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_rows(samples, &mut out, configuration)
        .and_then(|_| out.flush())
        .map_err(|e| TitrationError::io(path, e))?;

    tracing::info!(path = %path.display(), rows = samples.len(), "series exported");
    Ok(())
}

fn write_rows<W: Write>(
    samples: &[Sample],
    out: &mut W,
    configuration: &CsvConfig,
) -> std::io::Result<()> {
    if configuration.include_metadata
        && let Some(metadata) = &configuration.metadata
    {
        write_metadata_header(out, metadata)?;
    }

    writeln!(
        out,
        "{}{}{}",
        configuration.volume_header, configuration.delimiter, configuration.ph_header
    )?;

    for sample in samples {
        writeln!(
            out,
            "{}{}{}",
            format_number(sample.volume_added, configuration),
            configuration.delimiter,
            format_number(sample.ph, configuration)
        )?;
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
