//! Project configuration (scriptweld.yaml) data structures

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WeldError};

/// Default include glob for module discovery
pub const DEFAULT_INCLUDE: &str = "**/*.js";

fn default_include() -> String {
    DEFAULT_INCLUDE.to_string()
}

/// Project configuration from scriptweld.yaml. All paths are relative to the
/// project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// The legacy single-file source
    pub monolith: PathBuf,

    /// Directory holding extracted module sources
    pub modules: PathBuf,

    /// Glob selecting module files under `modules`
    #[serde(default = "default_include")]
    pub include: String,

    /// Feature manifest for gap detection, skipped when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    /// Output artifact location; defaults to `dist/<monolith filename>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl ProjectConfig {
    /// Parse project configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| WeldError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Self =
            serde_yaml::from_str(&yaml).map_err(|e| WeldError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.monolith.as_os_str().is_empty() {
            return Err(WeldError::ConfigInvalid {
                message: "'monolith' must name the legacy source file".to_string(),
            });
        }
        if self.modules.as_os_str().is_empty() {
            return Err(WeldError::ConfigInvalid {
                message: "'modules' must name the extracted-modules directory".to_string(),
            });
        }
        if self.include.is_empty() {
            return Err(WeldError::ConfigInvalid {
                message: "'include' must be a non-empty glob".to_string(),
            });
        }
        Ok(())
    }

    /// Output location, falling back to `dist/<monolith filename>`
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let name = self.monolith.file_name().unwrap_or_default();
                Path::new("dist").join(name)
            }
        }
    }
}
