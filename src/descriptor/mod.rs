//! Module descriptor loading
//!
//! Every extracted module declares its identity in a leading comment block:
//!
//! ```text
//! // ==WeldModule==
//! // @id        pet-automation
//! // @provides  pet-automation pet-presets
//! // @requires  logging config
//! // ==/WeldModule==
//! ```
//!
//! The block must appear before any non-comment line. `@provides` defaults to
//! the module id when absent; `@requires` defaults to empty. Unknown `@`
//! directives are ignored for forward compatibility.

use std::collections::HashMap;
use std::path::Path;

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{Result, WeldError};

/// Opening sentinel of the module identity block
pub const BLOCK_OPEN: &str = "==WeldModule==";

/// Closing sentinel of the module identity block
pub const BLOCK_CLOSE: &str = "==/WeldModule==";

/// Metadata and source text for one extracted module. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Unique module id from `@id`
    pub id: String,

    /// Logical unit ids this module supersedes (`@provides`, defaults to `[id]`)
    pub provides: Vec<String>,

    /// Module ids this module must be preceded by (`@requires`)
    pub requires: Vec<String>,

    /// Path relative to the modules root, forward slashes
    pub path: String,

    /// Full source text, emitted verbatim into the artifact
    pub text: String,
}

/// Check an id token: non-empty, ASCII alphanumeric plus `-`, `_`, `.`
pub(crate) fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Strip a `//` comment prefix, returning the trimmed remainder
fn comment_body(line: &str) -> Option<&str> {
    line.trim().strip_prefix("//").map(str::trim)
}

/// Split a directive value on whitespace and commas
fn split_values(rest: &str) -> Vec<String> {
    rest.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Append values, skipping ones already present (order-preserving dedup)
fn extend_unique(target: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}

impl ModuleDescriptor {
    /// Parse a module source into its descriptor.
    ///
    /// `path` is the modules-root-relative path, used for error context and
    /// kept on the descriptor for auditability.
    pub fn parse(path: &str, text: &str) -> Result<Self> {
        let malformed = |reason: &str| WeldError::MalformedDescriptor {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let mut lines = text.lines();

        // Scan the leading comment region for the block opener
        let mut opened = false;
        for line in lines.by_ref() {
            match comment_body(line) {
                Some(body) if body == BLOCK_OPEN => {
                    opened = true;
                    break;
                }
                Some(_) => continue,
                None if line.trim().is_empty() => continue,
                None => return Err(malformed("code before the identity block")),
            }
        }
        if !opened {
            return Err(malformed("missing // ==WeldModule== identity block"));
        }

        let mut id: Option<String> = None;
        let mut provides: Option<Vec<String>> = None;
        let mut requires: Vec<String> = Vec::new();
        let mut closed = false;

        for line in lines.by_ref() {
            let Some(body) = comment_body(line) else {
                return Err(malformed("identity block interrupted by a non-comment line"));
            };
            if body == BLOCK_CLOSE {
                closed = true;
                break;
            }
            if !body.starts_with('@') {
                // Plain comment inside the block, tolerated
                continue;
            }
            let (directive, rest) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
            let values = split_values(rest);
            match directive {
                "@id" => {
                    if id.is_some() {
                        return Err(malformed("duplicate @id directive"));
                    }
                    if values.len() != 1 {
                        return Err(malformed("@id takes exactly one value"));
                    }
                    id = Some(values.into_iter().next().unwrap_or_default());
                }
                "@provides" => {
                    if values.is_empty() {
                        return Err(malformed("@provides given without values"));
                    }
                    extend_unique(provides.get_or_insert_with(Vec::new), values);
                }
                "@requires" => {
                    if values.is_empty() {
                        return Err(malformed("@requires given without values"));
                    }
                    extend_unique(&mut requires, values);
                }
                // Unknown directives pass through for forward compatibility
                _ => {}
            }
        }
        if !closed {
            return Err(malformed("unterminated identity block"));
        }

        let id = id.ok_or_else(|| malformed("missing @id directive"))?;
        if !is_valid_id(&id) {
            return Err(malformed(&format!("invalid id token '{id}'")));
        }
        let provides = provides.unwrap_or_else(|| vec![id.clone()]);
        for unit in &provides {
            if !is_valid_id(unit) {
                return Err(malformed(&format!("invalid @provides token '{unit}'")));
            }
        }
        for dep in &requires {
            if !is_valid_id(dep) {
                return Err(malformed(&format!("invalid @requires token '{dep}'")));
            }
        }

        Ok(ModuleDescriptor {
            id,
            provides,
            requires,
            path: path.to_string(),
            text: text.to_string(),
        })
    }
}

/// Load every module under `dir` matching the `include` glob.
///
/// Returns descriptors in discovery order: lexicographic by the forward-slash
/// relative path, stable across machines. Pure read, no side effects.
pub fn load_modules(dir: &Path, include: &str) -> Result<Vec<ModuleDescriptor>> {
    if !dir.is_dir() {
        return Err(WeldError::FileNotFound {
            path: dir.display().to_string(),
        });
    }

    let glob = Glob::new(include).map_err(|e| WeldError::ConfigInvalid {
        message: format!("invalid include glob '{include}': {e}"),
    })?;

    let mut paths: Vec<String> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(dir)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .replace('\\', "/");
            glob.matched(&CandidatePath::from(relative.as_str()))
                .is_some()
                .then_some(relative)
        })
        .collect();

    // Sort for deterministic discovery order
    paths.sort();

    let mut modules = Vec::with_capacity(paths.len());
    let mut seen: HashMap<String, String> = HashMap::new();
    for relative in paths {
        let full = dir.join(&relative);
        let text = std::fs::read_to_string(&full).map_err(|e| WeldError::FileReadFailed {
            path: full.display().to_string(),
            reason: e.to_string(),
        })?;
        let descriptor = ModuleDescriptor::parse(&relative, &text)?;
        if let Some(first) = seen.get(&descriptor.id) {
            return Err(WeldError::DuplicateModule {
                id: descriptor.id,
                first: first.clone(),
                second: relative,
            });
        }
        seen.insert(descriptor.id.clone(), relative);
        modules.push(descriptor);
    }

    Ok(modules)
}
