//! # Configuration Module
//!
//! Configuration structures for the web-depcruiser commands. Each one comes
//! with a builder implementing [`ConfigBuilder`](crate::common::ConfigBuilder).
//!
//! - **GraphConfig**: the `graph` and `project` commands
//! - **WorkspaceReportConfig**: the `files` and `settings` commands
//!
//! ## Example
//!
//! ```
//! use std::path::PathBuf;
//!
//! use web_depcruiser::cli::{GraphFormat, Mode};
//! use web_depcruiser::common::ConfigBuilder;
//! use web_depcruiser::config::{GraphConfig, GraphTarget};
//!
//! let config = GraphConfig::builder()
//!     .with_root(PathBuf::from("/work"))
//!     .with_target(GraphTarget::File(PathBuf::from("src/app.ts")))
//!     .with_mode(Some(Mode::Deps))
//!     .with_format(Some(GraphFormat::Svg))
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.save);
//! ```

pub mod graph;
pub mod report;

pub use graph::{GraphConfig, GraphTarget};
pub use report::WorkspaceReportConfig;
