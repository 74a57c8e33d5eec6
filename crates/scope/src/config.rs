//! Scoping configuration (display labels).

use std::env::VarError;

use serde::{Deserialize, Serialize};

pub const OWN_UNIT_LABEL_ENV: &str = "FUELOPS_OWN_UNIT_LABEL";
pub const ALL_UNITS_LABEL_ENV: &str = "FUELOPS_ALL_UNITS_LABEL";

const DEFAULT_OWN_UNIT_LABEL: &str = "Mi Unidad";
const DEFAULT_ALL_UNITS_LABEL: &str = "Todas las unidades";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Shown when a unit-scoped user's unit is missing from the unit list.
    pub own_unit_label: String,
    /// Shown while an admin has no unit selected.
    pub all_units_label: String,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            own_unit_label: DEFAULT_OWN_UNIT_LABEL.to_string(),
            all_units_label: DEFAULT_ALL_UNITS_LABEL.to_string(),
        }
    }
}

impl ScopeConfig {
    pub fn from_env() -> Self {
        Self {
            own_unit_label: label_from_env(OWN_UNIT_LABEL_ENV, DEFAULT_OWN_UNIT_LABEL),
            all_units_label: label_from_env(ALL_UNITS_LABEL_ENV, DEFAULT_ALL_UNITS_LABEL),
        }
    }
}

fn label_from_env(key: &str, default: &str) -> String {
    label_or_default(key, std::env::var(key), default)
}

fn label_or_default(key: &str, value: Result<String, VarError>, default: &str) -> String {
    match value {
        Ok(value) if !value.trim().is_empty() => value,
        Ok(_) => {
            tracing::warn!(key, default, "blank label in environment; using default");
            default.to_string()
        }
        Err(VarError::NotUnicode(_)) => {
            tracing::warn!(key, default, "non-unicode label in environment; using default");
            default.to_string()
        }
        Err(VarError::NotPresent) => default.to_string(),
    }
}
