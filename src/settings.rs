//! Numerical constants of the analysis.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{TrussError, ValidationError};

/// Default penalty stiffness added to fixed degrees of freedom.
pub const DEFAULT_PENALTY_STIFFNESS: f64 = 1.0e8;

/// Default condition number at which the solver refuses the system.
pub const DEFAULT_MAX_CONDITION_NUMBER: f64 = 1.0e6;

/// Tunable constants of the penalty method and the conditioning guard.
///
/// Missing keys in a settings file keep their default value.
///
/// # Examples
/// ```
/// use trussfem::AnalysisSettings;
///
/// let settings: AnalysisSettings = serde_json::from_str(r#"{"penalty_stiffness": 1e10}"#).unwrap();
/// assert_eq!(settings.penalty_stiffness, 1e10);
/// assert_eq!(settings.max_condition_number, 1e6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSettings {
    /// Stiffness added to the diagonal of every fixed degree of freedom.
    pub penalty_stiffness: f64,
    /// Condition numbers at or above this value abort the solve.
    pub max_condition_number: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            penalty_stiffness: DEFAULT_PENALTY_STIFFNESS,
            max_condition_number: DEFAULT_MAX_CONDITION_NUMBER,
        }
    }
}

impl AnalysisSettings {
    /// Read settings from a JSON file and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`TrussError::Io`] when the file cannot be read, [`TrussError::Json`]
    /// when it is not a valid settings object and [`TrussError::Validation`] when a
    /// value is out of range.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TrussError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TrussError::io(path, source))?;
        let settings: Self = serde_json::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that both constants are finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSetting`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("penalty_stiffness", self.penalty_stiffness),
            ("max_condition_number", self.max_condition_number),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }
}
