//! Build command implementation
//!
//! Runs the full weld pipeline: discover modules, index the monolith,
//! resolve unit coverage, order modules by their declared dependencies,
//! assemble the output, and publish it atomically. Any structural failure
//! aborts before anything is written, so a previous good artifact is never
//! corrupted.
//!
//! Concurrent builds against the same output location are not supported;
//! callers have to serialize them.

use std::path::{Path, PathBuf};

use console::Style;

use crate::assembler;
use crate::cli::BuildArgs;
use crate::config::FeatureManifest;
use crate::config::project::DEFAULT_INCLUDE;
use crate::descriptor::{self, ModuleDescriptor};
use crate::error::{Result, WeldError};
use crate::hash;
use crate::monolith::MonolithIndex;
use crate::project::Project;
use crate::report::BuildReport;
use crate::resolver::{self, order};

/// Resolved input and output locations for one build
struct BuildInputs {
    monolith: PathBuf,
    modules: PathBuf,
    include: String,
    manifest: Option<PathBuf>,
    output: PathBuf,
}

/// Run build command
pub fn run(project: Option<PathBuf>, args: BuildArgs, verbose: bool) -> Result<()> {
    let inputs = resolve_inputs(project.as_deref(), &args)?;

    let monolith_text = read_input(&inputs.monolith)?;
    let modules = descriptor::load_modules(&inputs.modules, &inputs.include)?;
    if verbose {
        print_discovered(&inputs, &modules);
    }

    let (manifest, manifest_text) = load_manifest(inputs.manifest.as_deref())?;

    let index = MonolithIndex::scan(&monolith_text)?;
    let plan = resolver::resolve(&modules, &index, manifest.as_ref());
    plan.ensure_buildable(args.allow_partial)?;
    warn_gaps(&plan);

    let ordered = order::order_modules(&modules)?;
    if verbose {
        print_order(&ordered);
    }

    let module_inputs: Vec<(&str, &str)> = modules
        .iter()
        .map(|m| (m.path.as_str(), m.text.as_str()))
        .collect();
    let identity = hash::build_identity(&monolith_text, &module_inputs, manifest_text.as_deref());

    let artifact = assembler::assemble(&identity, &ordered, &monolith_text, &index, &plan);
    if !args.dry_run {
        artifact.write_atomic(&inputs.output)?;
    }

    let report = BuildReport::new(&inputs.output, &artifact, &plan);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        report.print(args.dry_run);
    }

    Ok(())
}

/// Fill in build locations from explicit flags and the project configuration.
///
/// With both `--monolith` and `--modules` given, no configuration file is
/// needed and flag paths are used exactly as written. Otherwise the project
/// is located (explicit directory, or the nearest ancestor of the current
/// directory with a configuration file) and flags override its individual
/// entries.
fn resolve_inputs(project: Option<&Path>, args: &BuildArgs) -> Result<BuildInputs> {
    if let (Some(monolith), Some(modules)) = (&args.monolith, &args.modules) {
        let output = match &args.output {
            Some(path) => path.clone(),
            None => default_output(monolith),
        };
        return Ok(BuildInputs {
            monolith: monolith.clone(),
            modules: modules.clone(),
            include: DEFAULT_INCLUDE.to_string(),
            manifest: args.manifest.clone(),
            output,
        });
    }

    let project = Project::locate(project)?;
    Ok(BuildInputs {
        monolith: args
            .monolith
            .clone()
            .unwrap_or_else(|| project.monolith_path()),
        modules: args
            .modules
            .clone()
            .unwrap_or_else(|| project.modules_dir()),
        include: project.config.include.clone(),
        manifest: args.manifest.clone().or_else(|| project.manifest_path()),
        output: args.output.clone().unwrap_or_else(|| project.output_path()),
    })
}

/// Default output location when building without a configuration file
fn default_output(monolith: &Path) -> PathBuf {
    let name = monolith.file_name().unwrap_or_default();
    Path::new("dist").join(name)
}

/// Read one input file, distinguishing absence from unreadability
fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(WeldError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| WeldError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Load the manifest, keeping its raw text for the build identity hash
fn load_manifest(path: Option<&Path>) -> Result<(Option<FeatureManifest>, Option<String>)> {
    let Some(path) = path else {
        return Ok((None, None));
    };
    let text = read_input(path)?;
    let manifest: FeatureManifest =
        serde_yaml::from_str(&text).map_err(|e| WeldError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    manifest.validate()?;
    Ok((Some(manifest), Some(text)))
}

/// Warn about accepted coverage gaps; reaching here implies --allow-partial
fn warn_gaps(plan: &resolver::ResolutionPlan) {
    if plan.gaps.is_empty() {
        return;
    }
    eprintln!(
        "{} no source for {}: {}",
        Style::new().yellow().bold().apply_to("Warning:"),
        if plan.gaps.len() == 1 { "unit" } else { "units" },
        plan.gaps.join(", ")
    );
    eprintln!("         stand-in delimiters will mark them in the output");
}

fn print_discovered(inputs: &BuildInputs, modules: &[ModuleDescriptor]) {
    let files_label = if modules.len() == 1 { "file" } else { "files" };
    println!(
        "{} {} {} under {}",
        Style::new().bold().apply_to("Discovered:"),
        modules.len(),
        files_label,
        inputs.modules.display()
    );
    for module in modules {
        println!(
            "  {} (provides: {})",
            Style::new().dim().apply_to(&module.path),
            module.provides.join(", ")
        );
    }
}

fn print_order(ordered: &[ModuleDescriptor]) {
    if ordered.is_empty() {
        return;
    }
    let ids: Vec<&str> = ordered.iter().map(|m| m.id.as_str()).collect();
    println!(
        "{} {}",
        Style::new().bold().apply_to("Weld order:"),
        ids.join(" -> ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_uses_monolith_filename() {
        assert_eq!(
            default_output(Path::new("mgtools.user.js")),
            PathBuf::from("dist/mgtools.user.js")
        );
        assert_eq!(
            default_output(Path::new("legacy/game.user.js")),
            PathBuf::from("dist/game.user.js")
        );
    }

    #[test]
    fn test_resolve_inputs_explicit_flags_need_no_config() {
        let args = BuildArgs {
            monolith: Some(PathBuf::from("game.user.js")),
            modules: Some(PathBuf::from("mods")),
            manifest: None,
            output: None,
            allow_partial: false,
            dry_run: false,
            json: false,
        };

        let inputs = resolve_inputs(None, &args).unwrap();
        assert_eq!(inputs.monolith, PathBuf::from("game.user.js"));
        assert_eq!(inputs.modules, PathBuf::from("mods"));
        assert_eq!(inputs.include, DEFAULT_INCLUDE);
        assert_eq!(inputs.output, PathBuf::from("dist/game.user.js"));
    }

    #[test]
    fn test_resolve_inputs_output_flag_wins() {
        let args = BuildArgs {
            monolith: Some(PathBuf::from("game.user.js")),
            modules: Some(PathBuf::from("mods")),
            manifest: None,
            output: Some(PathBuf::from("out/final.user.js")),
            allow_partial: false,
            dry_run: false,
            json: false,
        };

        let inputs = resolve_inputs(None, &args).unwrap();
        assert_eq!(inputs.output, PathBuf::from("out/final.user.js"));
    }

    #[test]
    fn test_resolve_inputs_from_project_config() {
        let temp = tempfile::TempDir::new().unwrap();
        crate::test_fixtures::write_project_config(temp.path());
        let args = BuildArgs {
            monolith: None,
            modules: None,
            manifest: None,
            output: None,
            allow_partial: false,
            dry_run: false,
            json: false,
        };

        let inputs = resolve_inputs(Some(temp.path()), &args).unwrap();
        assert!(inputs.monolith.ends_with("mgtools.user.js"));
        assert!(inputs.modules.ends_with("src/modules"));
        assert!(inputs.output.ends_with("dist/mgtools.user.js"));
    }

    #[test]
    fn test_read_input_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = read_input(&temp.path().join("absent.js")).unwrap_err();
        assert!(matches!(err, WeldError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_manifest_none() {
        let (manifest, text) = load_manifest(None).unwrap();
        assert!(manifest.is_none());
        assert!(text.is_none());
    }

    #[test]
    fn test_load_manifest_keeps_raw_text() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("features.yaml");
        let yaml = "version: 1\nunits:\n  - logging\n";
        std::fs::write(&path, yaml).unwrap();

        let (manifest, text) = load_manifest(Some(&path)).unwrap();
        assert_eq!(manifest.unwrap().units, vec!["logging"]);
        assert_eq!(text.unwrap(), yaml);
    }

    #[test]
    fn test_load_manifest_parse_error_names_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("features.yaml");
        std::fs::write(&path, "units: [unclosed\n").unwrap();

        let err = load_manifest(Some(&path)).unwrap_err();
        match err {
            WeldError::ConfigParseFailed { path: p, .. } => {
                assert!(p.contains("features.yaml"));
            }
            other => panic!("expected ConfigParseFailed, got {other}"),
        }
    }
}
