//! Common test utilities for Scriptweld integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A test project for integration tests
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new empty test project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a test project with a default scriptweld.yaml and module directory
    ///
    /// The configuration names `mgtools.user.js` as the monolith and
    /// `src/modules` as the module tree.
    pub fn with_config() -> Self {
        let project = Self::new();
        project.write_file(
            "scriptweld.yaml",
            "monolith: mgtools.user.js\nmodules: src/modules\n",
        );
        std::fs::create_dir_all(project.path.join("src/modules"))
            .expect("Failed to create module directory");
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write the monolith file named by the default configuration
    pub fn write_monolith(&self, content: &str) {
        self.write_file("mgtools.user.js", content);
    }

    /// Write a module file under `src/modules` with an identity block
    pub fn write_module(&self, id: &str, provides: &[&str], requires: &[&str]) {
        let text = module_source(id, provides, requires);
        self.write_file(&format!("src/modules/{id}.js"), &text);
    }

    /// Write a feature manifest and point the configuration at it
    pub fn write_manifest(&self, units: &[&str]) {
        let mut yaml = String::from("version: 1\nunits:\n");
        for unit in units {
            yaml.push_str(&format!("  - {unit}\n"));
        }
        self.write_file("features.yaml", &yaml);
        self.write_file(
            "scriptweld.yaml",
            "monolith: mgtools.user.js\nmodules: src/modules\nmanifest: features.yaml\n",
        );
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a module source file: identity block plus a stub body
#[allow(dead_code)]
pub fn module_source(id: &str, provides: &[&str], requires: &[&str]) -> String {
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

/// Render a monolith section bracketed by BEGIN/END markers
#[allow(dead_code)]
pub fn marked_section(unit: &str, body: &str) -> String {
    format!("// ==BEGIN {unit}==\n{body}// ==END {unit}==\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = TestProject::new();
        assert!(project.path.exists());
    }

    #[test]
    fn test_project_file_operations() {
        let project = TestProject::new();
        project.write_file("sub/file.txt", "hello");
        assert!(project.file_exists("sub/file.txt"));
        assert_eq!(project.read_file("sub/file.txt"), "hello");
    }

    #[test]
    fn test_project_with_config() {
        let project = TestProject::with_config();
        assert!(project.file_exists("scriptweld.yaml"));
        assert!(project.file_exists("src/modules"));
    }

    #[test]
    fn test_marked_section_shape() {
        let section = marked_section("pets", "let pets = {};\n");
        assert!(section.starts_with("// ==BEGIN pets==\n"));
        assert!(section.ends_with("// ==END pets==\n"));
    }
}
