//! Status command implementation
//!
//! Reports extraction coverage from the project configuration without
//! writing anything: how many units have moved out of the monolith, which
//! ones remain, and any conflicts or gaps the next build would hit.

use std::path::PathBuf;

use crate::cli::StatusArgs;
use crate::config::FeatureManifest;
use crate::descriptor;
use crate::error::{Result, WeldError};
use crate::monolith::MonolithIndex;
use crate::project::Project;
use crate::report::StatusReport;
use crate::resolver;

/// Run status command
pub fn run(project: Option<PathBuf>, args: StatusArgs) -> Result<()> {
    let project = Project::locate(project.as_deref())?;

    let monolith_path = project.monolith_path();
    if !monolith_path.exists() {
        return Err(WeldError::FileNotFound {
            path: monolith_path.display().to_string(),
        });
    }
    let monolith_text =
        std::fs::read_to_string(&monolith_path).map_err(|e| WeldError::FileReadFailed {
            path: monolith_path.display().to_string(),
            reason: e.to_string(),
        })?;

    let modules = descriptor::load_modules(&project.modules_dir(), &project.config.include)?;
    let manifest = match project.manifest_path() {
        Some(path) => Some(FeatureManifest::load(&path)?),
        None => None,
    };

    let index = MonolithIndex::scan(&monolith_text)?;
    let plan = resolver::resolve(&modules, &index, manifest.as_ref());

    let report = StatusReport::new(
        &monolith_path,
        monolith_text.len(),
        modules.len(),
        &plan,
    );
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        report.print();
    }

    Ok(())
}
