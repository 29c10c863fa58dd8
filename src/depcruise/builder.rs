use std::path::Path;

use super::types::{CommandLine, GraphRequest, Pipeline};
use crate::cli::{GraphFormat, Mode};
use crate::resolver::ResolvedConfig;
use crate::settings::Settings;

/// Characters with a meaning in JavaScript regular expressions
const REGEX_SPECIAL: &[char] = &[
    '\\', '^', '$', '.', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}',
];

/// Escape `literal` so dependency-cruiser's (JavaScript) regex engine matches
/// it character for character
pub fn escape_reaches_pattern(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len() * 2);
    for c in literal.chars() {
        if REGEX_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `target` relative to `root`, with forward slashes. Relative targets are
/// taken to be relative to the root already.
pub fn workspace_relative(root: &Path, target: &Path) -> String {
    let relative = target.strip_prefix(root).unwrap_or(target);
    relative.to_string_lossy().replace('\\', "/")
}

/// Turns a [`GraphRequest`] into the argument vectors to run
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    depcruise_program: String,
    depcruise_prefix: Vec<String>,
    dot_path: String,
}

impl CommandBuilder {
    /// `depcruise_command` is split into words with shell quoting rules: the
    /// first word is the program, the rest are prepended to every argument
    /// list. Unparseable or empty commands fall back to plain `depcruise`;
    /// [`Settings`] rejects those before they get here.
    pub fn new(depcruise_command: &str, dot_path: &str) -> Self {
        let mut words = shlex::split(depcruise_command).unwrap_or_default().into_iter();
        let depcruise_program = words.next().unwrap_or_else(|| "depcruise".to_string());

        Self {
            depcruise_program,
            depcruise_prefix: words.collect(),
            dot_path: dot_path.to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.depcruise_command, &settings.dot_path)
    }

    pub fn build(&self, request: &GraphRequest, config: &ResolvedConfig) -> Pipeline {
        let mut cruise = CommandLine::new(&self.depcruise_program)
            .args(self.depcruise_prefix.iter().cloned())
            .arg("--config")
            .arg(config.config_path.to_string_lossy());

        cruise = match request.mode {
            Mode::Deps => cruise.arg(request.target_path.to_string_lossy()),
            Mode::Reaches => {
                let relative = workspace_relative(&request.workspace_root, &request.target_path);
                cruise
                    .arg(&request.source_dir)
                    .arg("--reaches")
                    .arg(escape_reaches_pattern(&relative))
            }
        };

        cruise = if request.include_node_modules {
            cruise.args([
                "--do-not-follow",
                "node_modules",
                "--collapse",
                request.collapse_pattern.as_str(),
            ])
        } else {
            cruise.args(["--exclude", request.collapse_pattern.as_str()])
        };

        let output_type = match request.format {
            GraphFormat::Mmd => "mermaid",
            GraphFormat::Svg | GraphFormat::Png | GraphFormat::Dot => "dot",
        };
        cruise = cruise.args(["--output-type", output_type]);

        let layout = request.format.needs_layout().then(|| {
            CommandLine::new(&self.dot_path).arg(format!("-T{}", request.format.extension()))
        });

        Pipeline { cruise, layout }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::common::ConfigBuilder;
    use crate::resolver::ConfigSource;

    fn config() -> ResolvedConfig {
        ResolvedConfig {
            config_path: PathBuf::from("/work/.dependency-cruiser.cjs"),
            source: ConfigSource::Project,
        }
    }

    fn request(target: &str, mode: Mode, format: GraphFormat) -> GraphRequest {
        GraphRequest::builder()
            .with_workspace_root("/work")
            .with_target_path(target)
            .with_mode(mode)
            .with_format(format)
            .build()
            .unwrap()
    }

    #[test]
    fn test_escape_reaches_pattern() {
        assert_eq!(escape_reaches_pattern("src/a(b).ts"), r"src/a\(b\)\.ts");
        assert_eq!(escape_reaches_pattern("src/[id]/page+1.tsx"), r"src/\[id\]/page\+1\.tsx");
        assert_eq!(escape_reaches_pattern("plain/path"), "plain/path");
    }

    #[test]
    fn test_workspace_relative() {
        let root = Path::new("/work");
        assert_eq!(
            workspace_relative(root, Path::new("/work/src/app.ts")),
            "src/app.ts"
        );
        assert_eq!(workspace_relative(root, Path::new("src/app.ts")), "src/app.ts");
        assert_eq!(
            workspace_relative(root, Path::new("/elsewhere/app.ts")),
            "/elsewhere/app.ts"
        );
    }

    #[test]
    fn test_workspace_relative_normalises_backslashes() {
        assert_eq!(
            workspace_relative(Path::new("/work"), Path::new(r"src\components\Button.tsx")),
            "src/components/Button.tsx"
        );
    }

    #[test]
    fn test_deps_mermaid_command() {
        let builder = CommandBuilder::new("npx depcruise", "dot");
        let pipeline = builder.build(&request("src/index.ts", Mode::Deps, GraphFormat::Mmd), &config());

        assert_eq!(pipeline.cruise.program, "npx");
        assert_eq!(
            pipeline.cruise.args,
            vec![
                "depcruise",
                "--config",
                "/work/.dependency-cruiser.cjs",
                "src/index.ts",
                "--do-not-follow",
                "node_modules",
                "--collapse",
                "^(node_modules|lib)/[^/]+",
                "--output-type",
                "mermaid",
            ]
        );
        assert_eq!(pipeline.layout, None);
    }

    #[test]
    fn test_reaches_command_scans_source_dir() {
        let builder = CommandBuilder::new("depcruise", "dot");
        let pipeline = builder.build(
            &request("/work/src/util/a(b).ts", Mode::Reaches, GraphFormat::Mmd),
            &config(),
        );

        assert_eq!(pipeline.cruise.args[2], "src");
        assert_eq!(pipeline.cruise.value_of("--reaches"), Some(r"src/util/a\(b\)\.ts"));
    }

    #[test]
    fn test_image_formats_add_layout_stage() {
        let builder = CommandBuilder::new("depcruise", "/usr/local/bin/dot");

        for format in [GraphFormat::Svg, GraphFormat::Png] {
            let pipeline = builder.build(&request("src/a.ts", Mode::Deps, format), &config());

            assert_eq!(pipeline.cruise.value_of("--output-type"), Some("dot"));
            let layout = pipeline.layout.expect("image formats need dot");
            assert_eq!(layout.program, "/usr/local/bin/dot");
            assert_eq!(layout.args, vec![format!("-T{format}")]);
        }
    }

    #[test]
    fn test_dot_format_has_no_layout_stage() {
        let builder = CommandBuilder::new("depcruise", "dot");
        let pipeline = builder.build(&request("src/a.ts", Mode::Deps, GraphFormat::Dot), &config());

        assert_eq!(pipeline.cruise.value_of("--output-type"), Some("dot"));
        assert!(pipeline.layout.is_none());
    }

    #[test]
    fn test_excluded_node_modules_use_exclude_clause() {
        let request = GraphRequest::builder()
            .with_workspace_root("/work")
            .with_target_path("src/a.ts")
            .with_mode(Mode::Deps)
            .with_format(GraphFormat::Mmd)
            .with_include_node_modules(false)
            .with_collapse_pattern("^(node_modules|lib)/[^/]+")
            .build()
            .unwrap();

        let pipeline = CommandBuilder::new("depcruise", "dot").build(&request, &config());

        assert_eq!(
            pipeline.cruise.value_of("--exclude"),
            Some("^(node_modules|lib)/[^/]+")
        );
        assert!(!pipeline.cruise.has_flag("--collapse"));
        assert!(!pipeline.cruise.has_flag("--do-not-follow"));
    }

    #[test]
    fn test_empty_depcruise_command_falls_back_to_depcruise() {
        let builder = CommandBuilder::new("   ", "dot");
        let pipeline = builder.build(&request("src/a.ts", Mode::Deps, GraphFormat::Mmd), &config());

        assert_eq!(pipeline.cruise.program, "depcruise");
        assert_eq!(pipeline.cruise.args[0], "--config");
    }

    #[test]
    fn test_quoted_depcruise_command_keeps_spaces() {
        let builder = CommandBuilder::new(r#"node "/opt/my tools/depcruise.js""#, "dot");
        let pipeline = builder.build(&request("src/a.ts", Mode::Deps, GraphFormat::Mmd), &config());

        assert_eq!(pipeline.cruise.program, "node");
        assert_eq!(pipeline.cruise.args[0], "/opt/my tools/depcruise.js");
        assert_eq!(pipeline.cruise.args[1], "--config");
    }
}
