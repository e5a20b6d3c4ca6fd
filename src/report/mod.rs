//! Build and status reporting.
//!
//! Read-only observers over the resolution plan and the assembled
//! artifact: nothing here mutates the build. Each report renders both as
//! a console summary and as JSON for scripting.

use std::path::Path;

use console::Style;
use serde::Serialize;

use crate::artifact::BuildArtifact;
use crate::error::Result;
use crate::resolver::{Conflict, ResolutionPlan};

/// Formats a byte count as kilobytes for display.
pub fn format_size(bytes: usize) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

fn rounded_percent(percent: f64) -> f64 {
    (percent * 10.0).round() / 10.0
}

/// Outcome of a completed build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub output: String,
    pub size_bytes: usize,
    pub checksum: String,
    pub units_total: usize,
    pub units_extracted: usize,
    pub coverage_percent: f64,
    pub remaining: Vec<String>,
    pub missing: Vec<String>,
}

impl BuildReport {
    pub fn new(output: &Path, artifact: &BuildArtifact, plan: &ResolutionPlan) -> Self {
        Self {
            output: output.display().to_string(),
            size_bytes: artifact.size,
            checksum: artifact.checksum.clone(),
            units_total: plan.total_units(),
            units_extracted: plan.extracted_units(),
            coverage_percent: rounded_percent(plan.coverage_percent()),
            remaining: plan.remaining().to_vec(),
            missing: plan.gaps.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Prints the human-readable build summary.
    pub fn print(&self, dry_run: bool) {
        let headline = if dry_run {
            "Build verified (dry run):"
        } else {
            "Build complete:"
        };
        println!(
            "{} {}",
            Style::new().green().bold().apply_to(headline),
            self.output
        );
        println!(
            "  {} {} ({} bytes)",
            Style::new().bold().apply_to("Size:"),
            format_size(self.size_bytes),
            self.size_bytes
        );
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Checksum:"),
            self.checksum
        );
        print_coverage(self.units_extracted, self.units_total, self.coverage_percent);
        print_unit_list("Monolith:", &self.remaining);
        if !self.missing.is_empty() {
            println!(
                "  {} {}",
                Style::new().yellow().bold().apply_to("Missing:"),
                self.missing.join(", ")
            );
        }
    }
}

/// Snapshot of extraction progress without writing an artifact.
///
/// Unlike a build, status never fails on conflicts or gaps; it surfaces
/// them so they can be fixed before the next build.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub monolith: String,
    pub monolith_size_bytes: usize,
    pub module_files: usize,
    pub units_total: usize,
    pub units_extracted: usize,
    pub coverage_percent: f64,
    pub remaining: Vec<String>,
    pub gaps: Vec<String>,
    pub conflicts: Vec<String>,
}

impl StatusReport {
    pub fn new(
        monolith: &Path,
        monolith_size_bytes: usize,
        module_files: usize,
        plan: &ResolutionPlan,
    ) -> Self {
        Self {
            monolith: monolith.display().to_string(),
            monolith_size_bytes,
            module_files,
            units_total: plan.total_units(),
            units_extracted: plan.extracted_units(),
            coverage_percent: rounded_percent(plan.coverage_percent()),
            remaining: plan.remaining().to_vec(),
            gaps: plan.gaps.clone(),
            conflicts: plan.conflicts.iter().map(Conflict::describe).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Prints the human-readable extraction status.
    pub fn print(&self) {
        println!(
            "{} {} ({})",
            Style::new().bold().apply_to("Monolith:"),
            self.monolith,
            format_size(self.monolith_size_bytes)
        );
        let files_label = if self.module_files == 1 { "file" } else { "files" };
        println!(
            "{} {} {}",
            Style::new().bold().apply_to("Modules:"),
            self.module_files,
            files_label
        );
        print_coverage(self.units_extracted, self.units_total, self.coverage_percent);
        print_unit_list("Remaining:", &self.remaining);
        if !self.gaps.is_empty() {
            println!(
                "  {} {}",
                Style::new().yellow().bold().apply_to("Gaps:"),
                self.gaps.join(", ")
            );
        }
        if !self.conflicts.is_empty() {
            println!("  {}", Style::new().red().bold().apply_to("Conflicts:"));
            for conflict in &self.conflicts {
                println!("    {conflict}");
            }
        }
    }
}

fn print_coverage(extracted: usize, total: usize, percent: f64) {
    println!(
        "  {} {extracted}/{total} units extracted ({percent}%)",
        Style::new().bold().apply_to("Coverage:")
    );
}

fn print_unit_list(label: &str, units: &[String]) {
    if units.is_empty() {
        println!(
            "  {} {}",
            Style::new().bold().apply_to(label),
            Style::new().dim().apply_to("(none)")
        );
    } else {
        println!(
            "  {} {}",
            Style::new().bold().apply_to(label),
            units.join(", ")
        );
    }
}
