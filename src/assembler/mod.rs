//! Output assembly.
//!
//! Concatenates the build banner, the dependency-ordered module sources,
//! the monolith-sourced sections in their original relative order, and one
//! stand-in delimiter per accepted gap. Modules are reordered by the
//! dependency orderer, but monolith sections never move relative to each
//! other: the legacy code may rely on its own execution order.

use crate::artifact::BuildArtifact;
use crate::descriptor::ModuleDescriptor;
use crate::monolith::{MonolithIndex, UNCLASSIFIED};
use crate::resolver::{ResolutionPlan, UnitOrigin};

const BANNER_OPEN: &str = "// ==WeldBuild==";
const BANNER_CLOSE: &str = "// ==/WeldBuild==";

/// Delimiter emitted before each module's source text.
pub fn module_delimiter(id: &str) -> String {
    format!("// ==module: {id}==")
}

/// Stand-in delimiter emitted for each accepted coverage gap.
pub fn missing_delimiter(unit: &str) -> String {
    format!("// ==missing: {unit}==")
}

fn banner_line(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!("// @{name:<9} {value}\n"));
}

/// Assembles the final output text from the resolved and ordered inputs.
///
/// `identity` is the content hash over all build inputs (see
/// [`crate::hash::build_identity`]); recording it in the banner keeps the
/// output bytes a pure function of the inputs.
pub fn assemble(
    identity: &str,
    ordered: &[ModuleDescriptor],
    monolith_text: &str,
    index: &MonolithIndex,
    plan: &ResolutionPlan,
) -> BuildArtifact {
    let mut out = String::new();

    // Banner
    out.push_str(BANNER_OPEN);
    out.push('\n');
    banner_line(&mut out, "build", identity);
    banner_line(
        &mut out,
        "coverage",
        &format!(
            "{}/{} units extracted ({:.0}%)",
            plan.extracted_units(),
            plan.total_units(),
            plan.coverage_percent()
        ),
    );
    let remaining = if plan.remaining().is_empty() {
        "(none)".to_string()
    } else {
        plan.remaining().join(", ")
    };
    banner_line(&mut out, "monolith", &remaining);
    if !plan.gaps.is_empty() {
        banner_line(&mut out, "missing", &plan.gaps.join(", "));
    }
    out.push_str(BANNER_CLOSE);
    out.push_str("\n\n");

    // Extracted modules, dependency order, each under its own delimiter
    for module in ordered {
        out.push_str(&module_delimiter(&module.id));
        out.push('\n');
        out.push_str(&module.text);
        if !module.text.ends_with('\n') {
            out.push('\n');
        }
    }

    // Monolith remnant: every segment still owned by the monolith, in the
    // source's own order, unclassified segments interleaved as found
    for segment in &index.segments {
        let still_monolith = segment.unit == UNCLASSIFIED
            || matches!(plan.origin(&segment.unit), Some(UnitOrigin::Monolith));
        if still_monolith {
            out.push_str(&monolith_text[segment.range.clone()]);
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }

    // Accepted gaps, manifest declaration order
    for unit in &plan.gaps {
        out.push_str(&missing_delimiter(unit));
        out.push('\n');
    }

    BuildArtifact::new(out)
}
