//! Error types and handling for scriptweld
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every bundler failure is structural: it is discovered by inspecting the
//! sources before any output is written, so nothing here is transient or
//! retryable. Each fatal class maps to its own process exit code via
//! [`WeldError::exit_code`].

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for scriptweld operations
#[derive(Error, Diagnostic, Debug)]
pub enum WeldError {
    // Descriptor errors
    #[error("Malformed module descriptor in {path}: {reason}")]
    #[diagnostic(
        code(scriptweld::descriptor::malformed),
        help("Every module starts with a // ==WeldModule== block declaring at least an @id")
    )]
    MalformedDescriptor { path: String, reason: String },

    #[error("Duplicate module id '{id}': declared in {first} and {second}")]
    #[diagnostic(
        code(scriptweld::descriptor::duplicate),
        help("Module ids must be unique across the module tree")
    )]
    DuplicateModule {
        id: String,
        first: String,
        second: String,
    },

    // Monolith index errors
    #[error("Malformed monolith markers at line {line}: {reason}")]
    #[diagnostic(
        code(scriptweld::monolith::index),
        help(
            "Sections are bracketed by // ==BEGIN id== / // ==END id== pairs and must not nest, overlap, or repeat an id non-contiguously"
        )
    )]
    IndexError { reason: String, line: usize },

    // Coverage errors
    #[error("Coverage conflict: {details}")]
    #[diagnostic(
        code(scriptweld::coverage::conflict),
        help(
            "A module must fully supersede what it extracts: remove the unit's markers from the monolith, or drop the duplicate provides entry"
        )
    )]
    CoverageConflict { details: String },

    #[error("Manifest units not provided by any source: {units}")]
    #[diagnostic(
        code(scriptweld::coverage::missing_unit),
        help("Extract the unit, mark it in the monolith, or pass --allow-partial to build with stand-ins")
    )]
    MissingUnit { units: String },

    // Dependency errors
    #[error("Cyclic dependency detected: {chain}")]
    #[diagnostic(
        code(scriptweld::deps::cyclic),
        help("Break the cycle by removing one of the @requires edges")
    )]
    CyclicDependency { chain: String },

    #[error("Dependency '{dependency}' (required by module '{module}') not found")]
    #[diagnostic(
        code(scriptweld::deps::not_found),
        help("@requires entries must name the @id of another module in the module tree")
    )]
    DependencyNotFound { module: String, dependency: String },

    // Project errors
    #[error("No scriptweld.yaml found from: {path}")]
    #[diagnostic(
        code(scriptweld::project::not_found),
        help(
            "Run inside a project, pass --project/-p, or give build explicit --monolith and --modules paths"
        )
    )]
    ProjectNotFound { path: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(scriptweld::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(scriptweld::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Invalid feature manifest: {message}")]
    #[diagnostic(
        code(scriptweld::config::manifest_invalid),
        help("The manifest is a YAML document with a numeric 'version' and a 'units' id list")
    )]
    ManifestInvalid { message: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(scriptweld::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(scriptweld::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(scriptweld::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(scriptweld::fs::io_error))]
    IoError { message: String },
}

impl WeldError {
    /// Process exit code for the command-surface contract: distinct codes for
    /// the structural failure classes, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            WeldError::MalformedDescriptor { .. } | WeldError::DuplicateModule { .. } => 2,
            WeldError::IndexError { .. } => 3,
            WeldError::CoverageConflict { .. } => 4,
            WeldError::MissingUnit { .. } => 5,
            WeldError::CyclicDependency { .. } => 6,
            WeldError::DependencyNotFound { .. } => 7,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for WeldError {
    fn from(err: std::io::Error) -> Self {
        WeldError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for WeldError {
    fn from(err: serde_yaml::Error) -> Self {
        WeldError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for WeldError {
    fn from(err: serde_json::Error) -> Self {
        WeldError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, WeldError>;
