//! Session configuration.
//!
//! Configuration can be built in code or loaded from YAML:
//!
//! ```yaml
//! confidence_threshold: 0.6
//! tie_epsilon: 0.000001
//! model_path: /opt/filekind/model.fkmw
//! ```
//!
//! Missing keys take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::error::{Error, Result};

/// Default minimum probability for the model's top label to be reported as-is.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Default tolerance under which two probabilities count as tied.
pub const DEFAULT_TIE_EPSILON: f32 = 1e-6;

/// Tunables for a classification session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Top-label probability below which the generic `txt` / `unknown`
    /// fallback is reported instead.
    pub confidence_threshold: f32,
    /// Probabilities within this distance of the top one are resolved by
    /// registry priority.
    pub tie_epsilon: f32,
    /// Weight blob to load instead of the built-in model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            tie_epsilon: DEFAULT_TIE_EPSILON,
            model_path: None,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: SessionConfig = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse YAML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::from_path_io(path, e))?;
        Self::from_yaml_str(&text)
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config to YAML: {}", e)))
    }

    /// Reject values the session cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(Error::Config(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if !self.tie_epsilon.is_finite() || self.tie_epsilon < 0.0 {
            return Err(Error::Config(format!(
                "tie_epsilon must be a non-negative number, got {}",
                self.tie_epsilon
            )));
        }
        Ok(())
    }
}
