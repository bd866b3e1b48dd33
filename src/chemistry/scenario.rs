//! Titration scenario definition
//!
//! A scenario fixes everything about the flask and the burette that does not
//! change during a run: what acid sits in the flask, how much of it, and what
//! titrant is added.
//!
//! A [`Scenario`] can only be built through validation, so every value of the
//! type is usable by the pH model. Raw, unchecked parameters live in
//! [`ScenarioSpec`], which is what configuration files deserialize into.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TitrationError};

/// Unchecked scenario parameters
///
/// # Example
///
/// ```rust
/// use titration_rs::chemistry::{Scenario, ScenarioSpec};
///
/// let spec = ScenarioSpec {
///     name: "Weak Acid - Strong Base".to_string(),
///     acid: "CH3COOH".to_string(),
///     base: "NaOH".to_string(),
///     acid_concentration: 0.1,
///     base_concentration: 0.1,
///     initial_acid_volume: 25.0,
///     strong_acid: false,
///     pka: Some(4.76),
/// };
///
/// let scenario = Scenario::try_from(spec).unwrap();
/// assert_eq!(scenario.pka(), Some(4.76));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Display name, unique within a catalog
    pub name: String,

    /// Acid label (e.g. "HCl")
    #[serde(default)]
    pub acid: String,

    /// Titrant label (e.g. "NaOH")
    #[serde(default)]
    pub base: String,

    /// Acid concentration \[mol/L\]
    pub acid_concentration: f64,

    /// Titrant concentration \[mol/L\]
    pub base_concentration: f64,

    /// Acid volume initially in the flask \[mL\]
    pub initial_acid_volume: f64,

    /// Strong acid (full dissociation) or weak acid (single pKa)
    pub strong_acid: bool,

    /// Acid dissociation exponent, weak acids only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pka: Option<f64>,
}

impl ScenarioSpec {
    /// Check the parameters without consuming them
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TitrationError::configuration("scenario name must not be empty"));
        }

        for (label, value) in [
            ("acid concentration", self.acid_concentration),
            ("base concentration", self.base_concentration),
            ("initial acid volume", self.initial_acid_volume),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TitrationError::configuration(format!(
                    "scenario '{}': {} must be positive, got {}",
                    self.name, label, value
                )));
            }
        }

        match (self.strong_acid, self.pka) {
            (false, None) => Err(TitrationError::configuration(format!(
                "scenario '{}': weak acid requires a pKa",
                self.name
            ))),
            (false, Some(pka)) if !pka.is_finite() => Err(TitrationError::configuration(format!(
                "scenario '{}': pKa must be finite, got {}",
                self.name, pka
            ))),
            _ => Ok(()),
        }
    }
}

/// Validated titration scenario
///
/// Immutable once built. Replace the whole value to change scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScenarioSpec", into = "ScenarioSpec")]
pub struct Scenario {
    name: String,
    acid: String,
    base: String,
    acid_concentration: f64,
    base_concentration: f64,
    initial_acid_volume: f64,
    is_strong_acid: bool,
    pka: Option<f64>,
}

impl Scenario {
    /// Strong acid titrated by a strong base
    ///
    /// # Example
    ///
    /// ```rust
    /// use titration_rs::chemistry::Scenario;
    ///
    /// let hcl = Scenario::strong_acid("HCl / NaOH", "HCl", "NaOH", 0.1, 0.1, 25.0).unwrap();
    /// assert!(hcl.is_strong_acid());
    /// assert_eq!(hcl.equivalence_volume(), 25.0);
    /// ```
    pub fn strong_acid(
        name: impl Into<String>,
        acid: impl Into<String>,
        base: impl Into<String>,
        acid_concentration: f64,
        base_concentration: f64,
        initial_acid_volume: f64,
    ) -> Result<Self> {
        Self::try_from(ScenarioSpec {
            name: name.into(),
            acid: acid.into(),
            base: base.into(),
            acid_concentration,
            base_concentration,
            initial_acid_volume,
            strong_acid: true,
            pka: None,
        })
    }

    /// Weak monoprotic acid titrated by a strong base
    pub fn weak_acid(
        name: impl Into<String>,
        acid: impl Into<String>,
        base: impl Into<String>,
        acid_concentration: f64,
        base_concentration: f64,
        initial_acid_volume: f64,
        pka: f64,
    ) -> Result<Self> {
        Self::try_from(ScenarioSpec {
            name: name.into(),
            acid: acid.into(),
            base: base.into(),
            acid_concentration,
            base_concentration,
            initial_acid_volume,
            strong_acid: false,
            pka: Some(pka),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn acid(&self) -> &str {
        &self.acid
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Acid concentration \[mol/L\]
    pub fn acid_concentration(&self) -> f64 {
        self.acid_concentration
    }

    /// Titrant concentration \[mol/L\]
    pub fn base_concentration(&self) -> f64 {
        self.base_concentration
    }

    /// Acid volume initially in the flask \[mL\]
    pub fn initial_acid_volume(&self) -> f64 {
        self.initial_acid_volume
    }

    pub fn is_strong_acid(&self) -> bool {
        self.is_strong_acid
    }

    /// pKa of the weak acid, `None` for strong acids
    pub fn pka(&self) -> Option<f64> {
        if self.is_strong_acid { None } else { self.pka }
    }

    /// Moles of acid initially in the flask
    pub fn moles_acid(&self) -> f64 {
        self.acid_concentration * self.initial_acid_volume / 1000.0
    }

    /// Moles of titrant delivered by `volume` mL
    pub fn moles_base(&self, volume: f64) -> f64 {
        self.base_concentration * volume / 1000.0
    }

    /// Total liquid volume in the flask after adding `volume` mL \[L\]
    pub fn total_volume_litres(&self, volume: f64) -> f64 {
        (self.initial_acid_volume + volume) / 1000.0
    }

    /// Titrant volume at which titrant moles equal acid moles \[mL\]
    pub fn equivalence_volume(&self) -> f64 {
        self.acid_concentration * self.initial_acid_volume / self.base_concentration
    }

    /// Unchecked copy of the parameters
    pub fn to_spec(&self) -> ScenarioSpec {
        self.clone().into()
    }
}

impl TryFrom<ScenarioSpec> for Scenario {
    type Error = TitrationError;

    fn try_from(spec: ScenarioSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self::from_checked(spec))
    }
}

impl Scenario {
    /// Build from parameters that already passed validation
    pub(crate) fn from_checked(spec: ScenarioSpec) -> Self {
        debug_assert!(spec.validate().is_ok(), "unchecked scenario '{}'", spec.name);

        Self {
            name: spec.name,
            acid: spec.acid,
            base: spec.base,
            acid_concentration: spec.acid_concentration,
            base_concentration: spec.base_concentration,
            initial_acid_volume: spec.initial_acid_volume,
            is_strong_acid: spec.strong_acid,
            pka: if spec.strong_acid { None } else { spec.pka },
        }
    }
}

impl From<Scenario> for ScenarioSpec {
    fn from(scenario: Scenario) -> Self {
        Self {
            name: scenario.name,
            acid: scenario.acid,
            base: scenario.base,
            acid_concentration: scenario.acid_concentration,
            base_concentration: scenario.base_concentration,
            initial_acid_volume: scenario.initial_acid_volume,
            strong_acid: scenario.is_strong_acid,
            pka: scenario.pka,
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} {} M, {} mL vs {} {} M)",
            self.name,
            self.acid,
            self.acid_concentration,
            self.initial_acid_volume,
            self.base,
            self.base_concentration
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
