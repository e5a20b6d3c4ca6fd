//! Feature manifest data structures
//!
//! The manifest enumerates every logical unit a complete build must contain:
//!
//! ```yaml
//! version: 3
//! units:
//!   - logging
//!   - pet-automation
//! ```
//!
//! It only drives gap detection; builds without a manifest skip that check.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::descriptor::is_valid_id;
use crate::error::{Result, WeldError};
use crate::monolith::UNCLASSIFIED;

/// Versioned list of all unit ids required in a complete build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureManifest {
    /// Manifest revision, bumped whenever the unit list changes
    pub version: u32,

    /// Required unit ids, in declaration order
    #[serde(default)]
    pub units: Vec<String>,
}

impl FeatureManifest {
    /// Parse a feature manifest from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load and validate the manifest file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| WeldError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let manifest: Self =
            serde_yaml::from_str(&yaml).map_err(|e| WeldError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate unit ids: valid tokens, no duplicates, no reserved ids
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for unit in &self.units {
            if !is_valid_id(unit) {
                return Err(WeldError::ManifestInvalid {
                    message: format!("invalid unit id '{unit}'"),
                });
            }
            if unit == UNCLASSIFIED {
                return Err(WeldError::ManifestInvalid {
                    message: format!("'{UNCLASSIFIED}' is reserved for unmarked monolith code"),
                });
            }
            if !seen.insert(unit) {
                return Err(WeldError::ManifestInvalid {
                    message: format!("duplicate unit id '{unit}'"),
                });
            }
        }
        Ok(())
    }
}
