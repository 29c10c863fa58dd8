//! Files command executor

use console::style;
use miette::{IntoDiagnostic, Result};
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::WorkspaceReportConfig;
use crate::executors::CommandExecutor;
use crate::file_explorer::FileExplorer;
use crate::utils::string::pluralize;

pub struct FilesExecutor;

impl CommandExecutor for FilesExecutor {
    type Config = WorkspaceReportConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let files = FileExplorer::new(&config.root).list()?;

        match config.format {
            OutputFormat::Human => {
                eprintln!(
                    "{} Found {} source {} in {}",
                    style("📂").cyan(),
                    style(files.len()).yellow().bold(),
                    pluralize("file", files.len()),
                    style(config.root.display()).bold()
                );
                for file in &files {
                    println!("{}", file.display());
                }
            }
            OutputFormat::Json => {
                let report = json!({
                    "root": config.root.display().to_string(),
                    "files": files
                        .iter()
                        .map(|f| f.to_string_lossy().replace('\\', "/"))
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
            }
        }

        Ok(())
    }
}
