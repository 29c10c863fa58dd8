use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid TOML syntax in '{file}'")]
#[diagnostic(
    code(web_depcruiser::toml_parse_error),
    help("Check the settings file syntax near the highlighted position")
)]
pub struct TomlParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum WebDepcruiserError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(web_depcruiser::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    TomlParseError(Box<TomlParseError>),

    /// The message is the captured stderr of the failing process, or the
    /// process error itself when stderr was empty.
    #[error("{message}")]
    #[diagnostic(
        code(web_depcruiser::process_failure),
        help("Run the command shown above by hand to see the full diagnostics")
    )]
    ProcessFailure { program: String, message: String },

    #[error("'{program}' did not finish within {seconds}s and was killed")]
    #[diagnostic(
        code(web_depcruiser::timeout),
        help("Raise the limit with --timeout or narrow the analysed sources")
    )]
    Timeout { program: String, seconds: u64 },

    #[error("'{program}' produced more than {limit} bytes of output")]
    #[diagnostic(
        code(web_depcruiser::output_too_large),
        help("Raise the limit with --max-output or exclude node_modules from the graph")
    )]
    OutputTooLarge { program: String, limit: usize },

    #[error("The generated graph is empty")]
    #[diagnostic(
        code(web_depcruiser::empty_artifact),
        help("The command is likely misconfigured; check the dependency-cruiser config")
    )]
    EmptyArtifact,

    #[error("Failed to save graph to '{path}'")]
    #[diagnostic(
        code(web_depcruiser::save_failure),
        help("The graph is still in the preview; pick another location and retry")
    )]
    SaveFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(web_depcruiser::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("IO error")]
    #[diagnostic(
        code(web_depcruiser::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(web_depcruiser::config_error),
        help("Check your command arguments and web-depcruiser.toml")
    )]
    ConfigurationError { message: String },
}
