//! Request, command and artifact types
//!
//! This module contains the data flowing through a graph run: the request a
//! user makes, the argument vectors built from it, and the bytes that come
//! back.

use std::fmt;
use std::path::PathBuf;

use crate::cli::{GraphFormat, Mode};
use crate::common::ConfigBuilder;
use crate::error::WebDepcruiserError;

/// A single graph generation request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphRequest {
    pub workspace_root: PathBuf,
    pub target_path: PathBuf,
    pub mode: Mode,
    pub format: GraphFormat,
    pub include_node_modules: bool,
    pub collapse_pattern: String,
    pub source_dir: String,
}

impl GraphRequest {
    pub fn builder() -> GraphRequestBuilder {
        GraphRequestBuilder::new()
    }
}

#[derive(Default)]
pub struct GraphRequestBuilder {
    workspace_root: Option<PathBuf>,
    target_path: Option<PathBuf>,
    mode: Option<Mode>,
    format: Option<GraphFormat>,
    include_node_modules: Option<bool>,
    collapse_pattern: Option<String>,
    source_dir: Option<String>,
}

impl GraphRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    pub fn with_target_path(mut self, target: impl Into<PathBuf>) -> Self {
        self.target_path = Some(target.into());
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_include_node_modules(mut self, include: bool) -> Self {
        self.include_node_modules = Some(include);
        self
    }

    pub fn with_collapse_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.collapse_pattern = Some(pattern.into());
        self
    }

    pub fn with_source_dir(mut self, dir: impl Into<String>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }
}

fn missing(field: &str) -> WebDepcruiserError {
    WebDepcruiserError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}

impl ConfigBuilder for GraphRequestBuilder {
    type Config = GraphRequest;

    fn build(self) -> Result<Self::Config, WebDepcruiserError> {
        let target_path = self
            .target_path
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| missing("target_path"))?;

        Ok(GraphRequest {
            workspace_root: self.workspace_root.ok_or_else(|| missing("workspace_root"))?,
            target_path,
            mode: self.mode.ok_or_else(|| missing("mode"))?,
            format: self.format.ok_or_else(|| missing("format"))?,
            include_node_modules: self
                .include_node_modules
                .unwrap_or(crate::constants::defaults::INCLUDE_NODE_MODULES),
            collapse_pattern: self
                .collapse_pattern
                .unwrap_or_else(|| crate::constants::defaults::COLLAPSE_PATTERN.to_string()),
            source_dir: self
                .source_dir
                .unwrap_or_else(|| crate::constants::defaults::SOURCE_DIR.to_string()),
        })
    }
}

/// A program and its argument vector, executed without a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Value following `flag`, if present
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| arg == flag)
    }
}

/// Shell metacharacters backslash-escaped when a command is displayed
const SHELL_SPECIAL: &[char] = &[
    ' ', '(', ')', '[', ']', '{', '}', '|', '&', ';', '<', '>', '$', '`', '\\', '"', '\'', '*',
    '?', '!', '#', '~',
];

fn display_word(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }
    // Backslashes cannot carry control characters through a shell
    if word.chars().any(char::is_control) {
        return match shlex::try_quote(word) {
            Ok(quoted) => quoted.into_owned(),
            Err(_) => format!("{word:?}"),
        };
    }
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        if SHELL_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Renders a copy-pasteable shell form. Only used for diagnostics; execution
/// never goes through a shell.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_word(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", display_word(arg))?;
        }
        Ok(())
    }
}

/// The analysis command, optionally followed by a layout stage fed with its
/// output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub cruise: CommandLine,
    pub layout: Option<CommandLine>,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cruise)?;
        if let Some(layout) = &self.layout {
            write!(f, " | {layout}")?;
        }
        Ok(())
    }
}

/// Raw output of a finished pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphArtifact {
    pub bytes: Vec<u8>,
    pub format: GraphFormat,
}
