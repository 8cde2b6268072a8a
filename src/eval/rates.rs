//! Configurable cost rate table.
//!
//! Per-model dollar rates per 1K tokens. Pricing moves too fast to hardcode,
//! so the table is loaded from a YAML file of `model: rate` pairs; the
//! built-in defaults are sample values for the commonly evaluated models.
//!
//! ```yaml
//! gpt-4-turbo: 0.01
//! claude-3-sonnet: 0.003
//! ```

use crate::error::{ForgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Per-model cost rates in dollars per 1K tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl Default for RateTable {
    fn default() -> Self {
        // Sample per-1K rates; callers with current pricing load their own.
        let rates = [
            ("gpt-4-turbo", 0.01),
            ("gpt-4", 0.03),
            ("gpt-3.5-turbo", 0.001),
            ("claude-3-opus", 0.015),
            ("claude-3-sonnet", 0.003),
            ("claude-3-haiku", 0.00025),
        ]
        .into_iter()
        .map(|(model, rate)| (model.to_string(), rate))
        .collect();

        Self { rates }
    }
}

impl RateTable {
    /// Load a rate table from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForgeError::UserError(format!(
                "failed to read rate table '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a rate table from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ForgeError::UserError(format!("failed to parse rate table YAML: {}", e)))
    }

    /// Estimate the cost of a call in dollars.
    ///
    /// Returns `None` for models without a configured rate; an unknown
    /// model is not worth a made-up number.
    pub fn estimate(&self, model: &str, tokens: u32) -> Option<f64> {
        self.rates
            .get(model)
            .map(|rate| (tokens as f64 / 1000.0) * rate)
    }
}
