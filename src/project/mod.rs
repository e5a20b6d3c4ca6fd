//! Project discovery for scriptweld
//!
//! A project is any directory containing `scriptweld.yaml`. Commands locate
//! it from an explicit `--project` flag (or `SCRIPTWELD_PROJECT`), falling
//! back to an upward search from the working directory, so the tool works
//! from anywhere inside the source tree. All configured paths resolve
//! relative to the project root.

use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::error::{Result, WeldError};

/// Project configuration filename
pub const CONFIG_FILE: &str = "scriptweld.yaml";

/// An opened scriptweld project
#[derive(Debug)]
pub struct Project {
    /// Canonicalized root directory (where scriptweld.yaml lives)
    pub root: PathBuf,

    /// Parsed project configuration
    pub config: ProjectConfig,
}

impl Project {
    /// Detect whether a project exists at the given path
    pub fn exists(root: &Path) -> bool {
        root.join(CONFIG_FILE).is_file()
    }

    /// Find a project by searching upward from the given path
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if Self::exists(&current) {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Open an existing project
    pub fn open(root: &Path) -> Result<Self> {
        let root = dunce::canonicalize(root).map_err(|_| WeldError::ProjectNotFound {
            path: root.display().to_string(),
        })?;

        if !Self::exists(&root) {
            return Err(WeldError::ProjectNotFound {
                path: root.display().to_string(),
            });
        }

        let config = ProjectConfig::load(&root.join(CONFIG_FILE))?;

        Ok(Self { root, config })
    }

    /// Locate a project: explicit directory if given, otherwise upward search
    /// from the working directory
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(dir) => Self::open(dir),
            None => {
                let cwd = std::env::current_dir()?;
                let root = Self::find_from(&cwd).ok_or_else(|| WeldError::ProjectNotFound {
                    path: cwd.display().to_string(),
                })?;
                Self::open(&root)
            }
        }
    }

    /// Absolute path of the monolith source
    pub fn monolith_path(&self) -> PathBuf {
        self.root.join(&self.config.monolith)
    }

    /// Absolute path of the extracted-modules directory
    pub fn modules_dir(&self) -> PathBuf {
        self.root.join(&self.config.modules)
    }

    /// Absolute path of the feature manifest, when configured
    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.config.manifest.as_ref().map(|p| self.root.join(p))
    }

    /// Absolute path of the output artifact
    pub fn output_path(&self) -> PathBuf {
        self.root.join(self.config.output_path())
    }
}
