//! # Preview
//!
//! Turns raw graph output into a page that can be opened in a browser, and
//! saves artifacts to disk.
//!
//! - **PresentedArtifact**: one render strategy per format. Mermaid source is
//!   rendered client-side, SVG is inlined, PNG is embedded as base64 and DOT
//!   is shown as text.
//! - **PreviewSurface**: holds the single preview panel; showing a new graph
//!   replaces the page in place.

mod document;
mod panel;

pub use document::{ArtifactBody, PresentedArtifact, escape_html};
pub use panel::{PREVIEW, PreviewPanel, PreviewSurface, ShowOutcome};
