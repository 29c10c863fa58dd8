//! Graph command executor

use std::path::{Path, PathBuf};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::{GraphFormat, Mode};
use crate::common::ConfigBuilder;
use crate::config::{GraphConfig, GraphTarget};
use crate::constants::output::{OUTPUT_DIR, PREVIEW_FILE};
use crate::depcruise::{CommandBuilder, GraphRequest, ProcessRunner};
use crate::error::WebDepcruiserError;
use crate::executors::CommandExecutor;
use crate::preview::{PREVIEW, PresentedArtifact, ShowOutcome};
use crate::progress::ProgressReporter;
use crate::resolver::{ConfigResolver, ensure_bundled_config};
use crate::settings::Settings;

pub struct GraphExecutor;

impl CommandExecutor for GraphExecutor {
    type Config = GraphConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let settings = Settings::load(&config.root, &config.overrides)
            .wrap_err("Failed to load web-depcruiser settings")?;

        let mode = config.mode.unwrap_or(settings.default_mode);
        let format = config.format.unwrap_or(settings.default_format);
        let target_path = resolve_target(&config.target)?;

        eprintln!(
            "{} Generating {} graph ({}) for {}...",
            style("🕸").cyan(),
            format,
            mode,
            style(target_path.display()).bold()
        );

        let mut progress = ProgressReporter::new(config.verbose);

        let resolved = ConfigResolver::new(&config.root).resolve();
        ensure_bundled_config(&resolved)
            .into_diagnostic()
            .wrap_err_with(|| {
                format!(
                    "Failed to write bundled config to '{}'",
                    resolved.config_path.display()
                )
            })?;
        progress.config_resolved(&resolved);

        let request = GraphRequest::builder()
            .with_workspace_root(config.root.clone())
            .with_target_path(target_path.clone())
            .with_mode(mode)
            .with_format(format)
            .with_include_node_modules(settings.include_node_modules)
            .with_collapse_pattern(settings.collapse_pattern.clone())
            .with_source_dir(settings.source_dir.clone())
            .build()?;

        let pipeline = CommandBuilder::from_settings(&settings).build(&request, &resolved);
        let runner = ProcessRunner::from_settings(&config.root, &settings);

        progress.start_run(&pipeline);
        let artifact = match runner.run_blocking(&pipeline, format) {
            Ok(artifact) => artifact,
            Err(e) => {
                progress.fail_run();
                if let WebDepcruiserError::EmptyArtifact = e {
                    eprintln!(
                        "{} dependency-cruiser produced no output",
                        style("⚠").yellow()
                    );
                }
                return Err(e).wrap_err_with(|| format!("Command failed: {pipeline}"));
            }
        };
        progress.finish_run(artifact.bytes.len());

        let file_name = artifact_file_name(mode, &request.target_path, &config.root, format);
        let output_dir = config.root.join(OUTPUT_DIR);
        let page = output_dir.join(PREVIEW_FILE);

        let outcome = PREVIEW
            .show(&page, &file_name, PresentedArtifact::present(&artifact))
            .wrap_err("Failed to write the preview page")?;
        progress.preview_written(&page, outcome == ShowOutcome::Replaced);

        if config.open
            && let Err(e) = open::that(&page)
        {
            eprintln!(
                "{} Could not open the preview in a browser: {}",
                style("⚠").yellow(),
                e
            );
        }

        let save_to = config
            .output
            .clone()
            .or_else(|| config.save.then(|| output_dir.join(&file_name)));
        if let Some(path) = save_to {
            PREVIEW.save(&path)?;
            progress.saved(&path);
        }

        Ok(())
    }
}

/// Absolute path of a file target (relative paths are taken from the current
/// directory), or `.` for the whole project
fn resolve_target(target: &GraphTarget) -> Result<PathBuf> {
    match target {
        GraphTarget::Project => Ok(PathBuf::from(".")),
        GraphTarget::File(path) => {
            let absolute = std::path::absolute(path).into_diagnostic()?;
            if !absolute.exists() {
                return Err(WebDepcruiserError::ConfigurationError {
                    message: format!("Target '{}' does not exist", path.display()),
                })
                .wrap_err("Cannot generate a graph");
            }
            Ok(absolute)
        }
    }
}

/// `dependency-<mode>-<basename>.<ext>`, using the workspace directory name
/// when the target has no file name of its own
pub fn artifact_file_name(mode: Mode, target: &Path, root: &Path, format: GraphFormat) -> String {
    let base = target
        .file_stem()
        .filter(|_| target != Path::new("."))
        .or_else(|| root.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());

    format!("dependency-{}-{}.{}", mode, base, format.extension())
}
