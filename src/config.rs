//! Session configuration
//!
//! # Design
//!
//! Follows the same split as the rest of the crate:
//! - [`Scenario`](crate::chemistry::Scenario) is WHAT is titrated
//! - [`SessionConfiguration`] is HOW the session runs (burette capacity,
//!   automatic increment, tick cadence)
//!
//! Both can be loaded from a TOML file:
//!
//! ```toml
//! [session]
//! max_volume_ml = 50.0
//! auto_increment_ml = 0.1
//! tick_interval_ms = 100
//!
//! [[scenarios]]
//! name = "Strong Acid - Strong Base"
//! acid = "HCl"
//! base = "NaOH"
//! acid_concentration = 0.1
//! base_concentration = 0.1
//! initial_acid_volume = 25.0
//! strong_acid = true
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chemistry::{ScenarioCatalog, ScenarioSpec};
use crate::error::{Result, TitrationError};

/// Burette capacity \[mL\]
pub const DEFAULT_MAX_VOLUME_ML: f64 = 50.0;

/// Volume added by each tick of the continuous-addition process \[mL\]
pub const DEFAULT_AUTO_INCREMENT_ML: f64 = 0.1;

/// Cadence of the continuous-addition process \[ms\]
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Runtime parameters of a titration session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfiguration {
    /// Burette capacity: cumulative titrant volume never exceeds it \[mL\]
    pub max_volume_ml: f64,

    /// Volume added per automatic tick \[mL\]
    pub auto_increment_ml: f64,

    /// Time between automatic ticks \[ms\]
    pub tick_interval_ms: u64,
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            max_volume_ml: DEFAULT_MAX_VOLUME_ML,
            auto_increment_ml: DEFAULT_AUTO_INCREMENT_ML,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl SessionConfiguration {
    /// Builder pattern: set burette capacity
    pub fn max_volume(mut self, max_volume_ml: f64) -> Self {
        self.max_volume_ml = max_volume_ml;
        self
    }

    /// Builder pattern: set automatic increment
    pub fn auto_increment(mut self, auto_increment_ml: f64) -> Self {
        self.auto_increment_ml = auto_increment_ml;
        self
    }

    /// Builder pattern: set tick cadence
    ///
    /// The cadence has millisecond resolution. Sub-millisecond parts are
    /// rounded up, so only `Duration::ZERO` maps to a zero interval.
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        let millis = interval.as_micros().div_ceil(1_000);
        self.tick_interval_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    pub fn tick_interval_duration(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate that parameters are physically meaningful
    pub fn validate(&self) -> Result<()> {
        if !self.max_volume_ml.is_finite() || self.max_volume_ml <= 0.0 {
            return Err(TitrationError::configuration(format!(
                "max volume must be positive, got {}",
                self.max_volume_ml
            )));
        }
        if !self.auto_increment_ml.is_finite() || self.auto_increment_ml <= 0.0 {
            return Err(TitrationError::configuration(format!(
                "auto increment must be positive, got {}",
                self.auto_increment_ml
            )));
        }
        if self.auto_increment_ml > self.max_volume_ml {
            return Err(TitrationError::configuration(format!(
                "auto increment {} mL exceeds burette capacity {} mL",
                self.auto_increment_ml, self.max_volume_ml
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(TitrationError::configuration("tick interval must be greater than 0"));
        }
        Ok(())
    }
}

/// Configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitrationConfig {
    pub session: SessionConfiguration,

    /// Custom scenarios; empty means the built-in catalog
    pub scenarios: Vec<ScenarioSpec>,
}

impl TitrationConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: TitrationConfig = toml::from_str(raw)?;
        config.session.validate()?;
        for spec in &config.scenarios {
            spec.validate()?;
        }
        Ok(config)
    }

    /// Scenario catalog described by this configuration
    pub fn catalog(&self) -> Result<ScenarioCatalog> {
        if self.scenarios.is_empty() {
            Ok(ScenarioCatalog::builtin())
        } else {
            ScenarioCatalog::from_specs(self.scenarios.clone())
        }
    }
}

/// Load a configuration file
///
/// # Errors
///
/// - `Io` when the file cannot be read
/// - `Parse` when it is not valid TOML for [`TitrationConfig`]
/// - `Configuration` when a value is out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<TitrationConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| TitrationError::io(path, e))?;
    let config = TitrationConfig::from_toml_str(&raw)?;

    tracing::info!(
        path = %path.display(),
        scenarios = config.scenarios.len(),
        max_volume_ml = config.session.max_volume_ml,
        "loaded titration configuration"
    );
    Ok(config)
}
