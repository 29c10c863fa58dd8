use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::cli::GraphFormat;
use crate::constants::output::MERMAID_CDN;
use crate::depcruise::GraphArtifact;
use crate::error::WebDepcruiserError;

/// Displayable form of an artifact, one variant per format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactBody {
    Mermaid(String),
    Svg(String),
    Png { base64: String },
    Dot(String),
}

/// An artifact ready for the preview page and for saving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedArtifact {
    body: ArtifactBody,
}

impl PresentedArtifact {
    pub fn present(artifact: &GraphArtifact) -> Self {
        let text = || String::from_utf8_lossy(&artifact.bytes).into_owned();
        let body = match artifact.format {
            GraphFormat::Mmd => ArtifactBody::Mermaid(text()),
            GraphFormat::Svg => ArtifactBody::Svg(text()),
            GraphFormat::Png => ArtifactBody::Png {
                base64: STANDARD.encode(&artifact.bytes),
            },
            GraphFormat::Dot => ArtifactBody::Dot(text()),
        };
        Self { body }
    }

    pub fn body(&self) -> &ArtifactBody {
        &self.body
    }

    pub fn format(&self) -> GraphFormat {
        match self.body {
            ArtifactBody::Mermaid(_) => GraphFormat::Mmd,
            ArtifactBody::Svg(_) => GraphFormat::Svg,
            ArtifactBody::Png { .. } => GraphFormat::Png,
            ArtifactBody::Dot(_) => GraphFormat::Dot,
        }
    }

    fn mime_type(&self) -> &'static str {
        match self.body {
            ArtifactBody::Mermaid(_) | ArtifactBody::Dot(_) => "text/plain;charset=utf-8",
            ArtifactBody::Svg(_) => "image/svg+xml",
            ArtifactBody::Png { .. } => "image/png",
        }
    }

    /// Bytes written by [`PresentedArtifact::save`]. PNG payloads are decoded
    /// from their base64 form; text passes through unchanged.
    pub fn payload(&self) -> Result<Vec<u8>, base64::DecodeError> {
        match &self.body {
            ArtifactBody::Png { base64 } => STANDARD.decode(base64),
            ArtifactBody::Mermaid(text) | ArtifactBody::Svg(text) | ArtifactBody::Dot(text) => {
                Ok(text.as_bytes().to_vec())
            }
        }
    }

    /// Write the artifact to `path`. A failure leaves the artifact untouched so
    /// the save can be retried elsewhere.
    pub fn save(&self, path: &Path) -> Result<(), WebDepcruiserError> {
        let save_failure = |source| WebDepcruiserError::SaveFailure {
            path: path.to_path_buf(),
            source,
        };

        let bytes = self.payload().map_err(|e| {
            save_failure(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(save_failure)?;
        }
        fs::write(path, bytes).map_err(save_failure)
    }

    /// Markup shown inside the page body
    pub fn render_body(&self) -> String {
        match &self.body {
            ArtifactBody::Mermaid(text) => {
                format!("<div class=\"mermaid\">{}</div>", escape_html(text))
            }
            ArtifactBody::Svg(markup) => markup.clone(),
            ArtifactBody::Png { base64 } => {
                format!("<img src=\"data:image/png;base64,{base64}\" alt=\"dependency graph\" />")
            }
            ArtifactBody::Dot(text) => format!("<pre>{}</pre>", escape_html(text)),
        }
    }

    /// Complete preview page with a download link for the artifact
    pub fn to_html(&self, file_name: &str) -> String {
        let mut head = String::new();
        if let ArtifactBody::Mermaid(_) = self.body {
            let _ = write!(
                head,
                "\n  <script src=\"{MERMAID_CDN}\"></script>\n  <script>mermaid.initialize({{ startOnLoad: true }});</script>"
            );
        }

        let encoded = match &self.body {
            ArtifactBody::Png { base64 } => base64.clone(),
            ArtifactBody::Mermaid(text) | ArtifactBody::Svg(text) | ArtifactBody::Dot(text) => {
                STANDARD.encode(text)
            }
        };
        let file_name = escape_html(file_name);

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Dependency Graph</title>{head}
  <style>body {{ padding: 10px; }}</style>
</head>
<body>
  {body}
  <hr />
  <a id="download" download="{file_name}" href="data:{mime};base64,{encoded}">Download {file_name}</a>
</body>
</html>
"#,
            body = self.render_body(),
            mime = self.mime_type(),
        )
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
