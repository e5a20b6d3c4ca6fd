//! Coverage resolution for scriptweld builds
//!
//! This module handles:
//! - Merging the module set, the monolith index, and the feature manifest
//!   into one origin decision per logical unit
//! - Conflict detection (a unit claimed by two or more origins)
//! - Gap detection (a manifest unit claimed by none)
//! - Dependency ordering of the extracted modules ([`order`])
//!
//! Resolution itself is pure and infallible: problems are recorded on the
//! [`ResolutionPlan`] and only become fatal in
//! [`ResolutionPlan::ensure_buildable`], which keeps the merge logic
//! independently testable.

pub mod order;

use std::collections::BTreeMap;

use crate::config::FeatureManifest;
use crate::descriptor::ModuleDescriptor;
use crate::error::{Result, WeldError};
use crate::monolith::{MonolithIndex, UNCLASSIFIED};

/// Chosen source for one logical unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOrigin {
    /// Superseded by an extracted module
    Module {
        /// Id of the providing module
        module: String,
    },

    /// Still sourced from the monolith
    Monolith,

    /// Declared by the manifest but provided by nothing; becomes an empty
    /// stand-in under allow-partial, fatal otherwise
    Missing,
}

/// One unit claimed by two or more origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Contested unit id
    pub unit: String,

    /// Human-readable claims, e.g. `module 'pets'`, `monolith`
    pub origins: Vec<String>,
}

impl Conflict {
    /// One-line description naming the unit and every claimant
    pub fn describe(&self) -> String {
        let origins = match self.origins.len() {
            2 => self.origins.join(" and "),
            _ => self.origins.join(", "),
        };
        format!("unit '{}' claimed by {}", self.unit, origins)
    }
}

/// Output of coverage resolution: every tracked unit mapped to its chosen
/// origin, plus everything that would make the build unsound.
#[derive(Debug, Clone)]
pub struct ResolutionPlan {
    /// Unit id -> origin, id-sorted for deterministic iteration
    units: BTreeMap<String, UnitOrigin>,

    /// Units claimed by more than one origin, id-sorted. Always fatal.
    pub conflicts: Vec<Conflict>,

    /// Manifest units claimed by nothing, in manifest declaration order
    pub gaps: Vec<String>,

    /// Marked units still monolith-sourced, in monolith order
    remaining: Vec<String>,
}

/// Decide an origin for every logical unit in sight.
///
/// Units come from three places: the union of module `provides` lists, the
/// marked units of the monolith index, and the manifest. The synthetic
/// unclassified unit is not tracked here; its segments are always emitted
/// from the monolith.
pub fn resolve(
    modules: &[ModuleDescriptor],
    index: &MonolithIndex,
    manifest: Option<&FeatureManifest>,
) -> ResolutionPlan {
    // Gather claims per unit, id-sorted so conflict order is deterministic
    let mut claims: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for module in modules {
        for unit in &module.provides {
            claims
                .entry(unit.clone())
                .or_default()
                .push(format!("module '{}'", module.id));
        }
    }
    for unit in index.units() {
        claims
            .entry(unit.clone())
            .or_default()
            .push("monolith".to_string());
    }

    let mut units = BTreeMap::new();
    let mut conflicts = Vec::new();
    for (unit, origins) in claims {
        // Extracting the unmarked remainder by name is never allowed
        let reserved = unit == UNCLASSIFIED && !origins.contains(&"monolith".to_string());
        if origins.len() > 1 || reserved {
            let mut origins = origins;
            if reserved {
                origins.push("monolith (reserved)".to_string());
            }
            conflicts.push(Conflict { unit, origins });
            continue;
        }
        let origin = if origins[0] == "monolith" {
            UnitOrigin::Monolith
        } else {
            // origins[0] is "module '<id>'"
            let module = origins[0]
                .trim_start_matches("module '")
                .trim_end_matches('\'')
                .to_string();
            UnitOrigin::Module { module }
        };
        units.insert(unit, origin);
    }

    let mut gaps = Vec::new();
    if let Some(manifest) = manifest {
        for unit in &manifest.units {
            let contested = conflicts.iter().any(|c| &c.unit == unit);
            if !units.contains_key(unit) && !contested {
                units.insert(unit.clone(), UnitOrigin::Missing);
                gaps.push(unit.clone());
            }
        }
    }

    let remaining = index
        .units()
        .iter()
        .filter(|unit| matches!(units.get(*unit), Some(UnitOrigin::Monolith)))
        .cloned()
        .collect();

    ResolutionPlan {
        units,
        conflicts,
        gaps,
        remaining,
    }
}

impl ResolutionPlan {
    /// Gate between resolution and assembly: conflicts are always fatal,
    /// gaps are fatal unless the caller accepts stand-ins.
    pub fn ensure_buildable(&self, allow_partial: bool) -> Result<()> {
        if !self.conflicts.is_empty() {
            let details = self
                .conflicts
                .iter()
                .map(Conflict::describe)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(WeldError::CoverageConflict { details });
        }
        if !self.gaps.is_empty() && !allow_partial {
            return Err(WeldError::MissingUnit {
                units: self.gaps.join(", "),
            });
        }
        Ok(())
    }

    /// Origin chosen for a unit, if the unit is tracked
    pub fn origin(&self, unit: &str) -> Option<&UnitOrigin> {
        self.units.get(unit)
    }

    /// All tracked units with their origins, id-sorted
    pub fn units(&self) -> impl Iterator<Item = (&String, &UnitOrigin)> {
        self.units.iter()
    }

    /// Number of tracked units
    pub fn total_units(&self) -> usize {
        self.units.len()
    }

    /// Number of units sourced from extracted modules
    pub fn extracted_units(&self) -> usize {
        self.units
            .values()
            .filter(|origin| matches!(origin, UnitOrigin::Module { .. }))
            .count()
    }

    /// Marked units still monolith-sourced, in monolith order
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    /// Extraction coverage: module-origin units over all tracked units.
    /// An empty unit set reports 0% rather than pretending to be migrated.
    pub fn coverage_percent(&self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        self.extracted_units() as f64 * 100.0 / self.units.len() as f64
    }
}
