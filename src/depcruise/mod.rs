//! # dependency-cruiser Invocation
//!
//! Builds and runs the external tool chain that produces a graph.
//!
//! ## Components
//!
//! - **GraphRequest**: what the user asked for (target, mode, format and the
//!   node_modules policy)
//! - **CommandBuilder**: turns a request plus a resolved config into a
//!   [`Pipeline`] of argument vectors. Nothing is ever passed through a shell.
//! - **ProcessRunner**: runs the pipeline with a timeout and an output bound,
//!   feeding the analysis output into Graphviz when an image was requested
//!
//! ## Example
//!
//! ```
//! use web_depcruiser::cli::{GraphFormat, Mode};
//! use web_depcruiser::common::ConfigBuilder;
//! use web_depcruiser::depcruise::{CommandBuilder, GraphRequest};
//! use web_depcruiser::resolver::{ConfigSource, ResolvedConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = GraphRequest::builder()
//!     .with_workspace_root("/work")
//!     .with_target_path("/work/src/app.ts")
//!     .with_mode(Mode::Reaches)
//!     .with_format(GraphFormat::Svg)
//!     .build()?;
//!
//! let config = ResolvedConfig {
//!     config_path: "/work/.dependency-cruiser.cjs".into(),
//!     source: ConfigSource::Project,
//! };
//!
//! let pipeline = CommandBuilder::new("npx depcruise", "dot").build(&request, &config);
//! assert_eq!(pipeline.cruise.value_of("--reaches"), Some(r"src/app\.ts"));
//! assert!(pipeline.layout.is_some());
//! # Ok(())
//! # }
//! ```

mod builder;
mod runner;
mod types;

pub use builder::{CommandBuilder, escape_reaches_pattern, workspace_relative};
pub use runner::ProcessRunner;
pub use types::{CommandLine, GraphArtifact, GraphRequest, GraphRequestBuilder, Pipeline};
