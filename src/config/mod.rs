//! Configuration file handling for scriptweld
//!
//! This module contains data structures for:
//! - `scriptweld.yaml` - Project configuration (input and output locations)
//! - the feature manifest - versioned list of every unit id a complete build
//!   must contain, consumed for gap detection

pub mod manifest;
pub mod project;

// Re-export commonly used types
pub use manifest::FeatureManifest;
pub use project::ProjectConfig;
