//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides helper functions to build the common inputs of a
//! weld build (module files, marked monoliths, manifests, project
//! configuration) with a single function call.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{descriptor, marked_monolith};
//!
//! #[test]
//! fn my_test() {
//!     // A parsed module providing unit "b"
//!     let module = descriptor("b", &["b"], &[]);
//!
//!     // A monolith with two marked sections
//!     let monolith = marked_monolith(&[("a", "let a = 1;\n"), ("c", "let c = 3;\n")]);
//! }
//! ```

use std::path::Path;

use crate::config::FeatureManifest;
use crate::descriptor::ModuleDescriptor;

/// Render a module source file: identity block followed by a stub body.
///
/// Empty `provides`/`requires` slices omit the directive line entirely, so
/// `provides` falls back to `[id]` when parsed.
#[must_use]
pub fn module_text(id: &str, provides: &[&str], requires: &[&str]) -> String {
    let mut text = String::from("// ==WeldModule==\n");
    text.push_str(&format!("// @id        {id}\n"));
    if !provides.is_empty() {
        text.push_str(&format!("// @provides  {}\n", provides.join(" ")));
    }
    if !requires.is_empty() {
        text.push_str(&format!("// @requires  {}\n", requires.join(" ")));
    }
    text.push_str("// ==/WeldModule==\n");
    text.push_str(&format!("registerFeature(\"{id}\");\n"));
    text
}

/// Build a parsed [`ModuleDescriptor`] by rendering and parsing module text.
///
/// Going through the parser keeps the fixture's fields and its `text`
/// consistent with each other.
///
/// # Panics
///
/// Panics if the rendered module text does not parse.
#[must_use]
pub fn descriptor(id: &str, provides: &[&str], requires: &[&str]) -> ModuleDescriptor {
    let path = format!("src/modules/{id}.js");
    let text = module_text(id, provides, requires);
    ModuleDescriptor::parse(&path, &text).expect("fixture module text should parse")
}

/// Render a monolith consisting of back-to-back marked sections.
///
/// Each `(unit, body)` pair becomes a `BEGIN`/`END` block; bodies are
/// newline-terminated if they are not already, and blocks are concatenated
/// with nothing in between, so the scan yields exactly one segment per pair.
#[must_use]
pub fn marked_monolith(sections: &[(&str, &str)]) -> String {
    let mut text = String::new();
    for (unit, body) in sections {
        text.push_str(&format!("// ==BEGIN {unit}==\n"));
        text.push_str(body);
        if !body.is_empty() && !body.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&format!("// ==END {unit}==\n"));
    }
    text
}

/// Build a version-1 manifest requiring the given units in order.
#[must_use]
pub fn manifest_with(units: &[&str]) -> FeatureManifest {
    FeatureManifest {
        version: 1,
        units: units.iter().map(|u| (*u).to_string()).collect(),
    }
}

/// Write a minimal `scriptweld.yaml` into `dir`.
///
/// The configuration names `mgtools.user.js` as the monolith and
/// `src/modules` as the module tree, leaving every optional field unset.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_project_config(dir: &Path) {
    let yaml = "monolith: mgtools.user.js\nmodules: src/modules\n";
    std::fs::write(dir.join(crate::project::CONFIG_FILE), yaml)
        .expect("Failed to write project config");
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_module_text_parses() {
        let text = module_text("pets", &["pets", "pet-presets"], &["logging"]);
        let module = ModuleDescriptor::parse("pets.js", &text).expect("should parse");

        assert_eq!(module.id, "pets");
        assert_eq!(module.provides, vec!["pets", "pet-presets"]);
        assert_eq!(module.requires, vec!["logging"]);
    }

    #[test]
    fn test_module_text_defaults_provides() {
        let text = module_text("solo", &[], &[]);
        let module = ModuleDescriptor::parse("solo.js", &text).expect("should parse");

        assert_eq!(module.provides, vec!["solo"]);
        assert!(module.requires.is_empty());
    }

    #[test]
    fn test_marked_monolith_scans_one_segment_per_section() {
        let text = marked_monolith(&[("a", "1;\n"), ("b", "2;\n"), ("c", "3;\n")]);
        let index = crate::monolith::MonolithIndex::scan(&text).expect("should scan");

        assert_eq!(index.segments.len(), 3);
        assert_eq!(index.units().len(), 3);
    }

    #[test]
    fn test_write_project_config_is_loadable() {
        let temp = tempfile::TempDir::new().expect("Failed to create temp directory");
        write_project_config(temp.path());

        let project = crate::project::Project::open(temp.path()).expect("should open");
        assert_eq!(
            project.config.monolith,
            std::path::PathBuf::from("mgtools.user.js")
        );
    }
}
