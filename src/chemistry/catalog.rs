//! Scenario catalog
//!
//! The scenarios a caller can pick from. The built-in catalog holds the two
//! classic classroom titrations; configuration files may supply their own.

use crate::chemistry::{Scenario, ScenarioSpec};
use crate::error::{Result, TitrationError};

/// pKa of acetic acid at 25 °C
pub const ACETIC_ACID_PKA: f64 = 4.76;

/// Ordered, name-indexed list of scenarios
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// Strong acid / strong base and weak acid / strong base, 0.1 M, 25 mL
    pub fn builtin() -> Self {
        Self {
            scenarios: vec![strong_acid_strong_base(), weak_acid_strong_base()],
        }
    }

    /// Build a catalog from unchecked specs
    ///
    /// # Errors
    ///
    /// `Configuration` when the list is empty, a spec is invalid, or two
    /// scenarios share a name.
    pub fn from_specs(specs: Vec<ScenarioSpec>) -> Result<Self> {
        if specs.is_empty() {
            return Err(TitrationError::configuration("scenario catalog must not be empty"));
        }

        let mut scenarios: Vec<Scenario> = Vec::with_capacity(specs.len());
        for spec in specs {
            if scenarios.iter().any(|s| s.name() == spec.name) {
                return Err(TitrationError::configuration(format!(
                    "duplicate scenario name '{}'",
                    spec.name
                )));
            }
            scenarios.push(Scenario::try_from(spec)?);
        }

        Ok(Self { scenarios })
    }

    /// Scenario by display name
    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name() == name)
    }

    /// First scenario, selected when nothing else is requested
    pub fn default_scenario(&self) -> &Scenario {
        &self.scenarios[0]
    }

    pub fn names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strong_acid_strong_base() -> Scenario {
    Scenario::from_checked(ScenarioSpec {
        name: "Strong Acid - Strong Base".to_string(),
        acid: "HCl".to_string(),
        base: "NaOH".to_string(),
        acid_concentration: 0.1,
        base_concentration: 0.1,
        initial_acid_volume: 25.0,
        strong_acid: true,
        pka: None,
    })
}

fn weak_acid_strong_base() -> Scenario {
    Scenario::from_checked(ScenarioSpec {
        name: "Weak Acid - Strong Base".to_string(),
        acid: "CH\u{2083}COOH".to_string(),
        base: "NaOH".to_string(),
        acid_concentration: 0.1,
        base_concentration: 0.1,
        initial_acid_volume: 25.0,
        strong_acid: false,
        pka: Some(ACETIC_ACID_PKA),
    })
}
