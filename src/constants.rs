//! Configuration constants for web-depcruiser
//!
//! Defaults that settings files, environment variables and CLI flags can
//! override, plus the fixed names the tool looks for on disk.

use std::time::Duration;

/// Progress spinner configuration
pub mod progress {
    use super::*;

    /// Duration between spinner updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames shown while the external tools run
    pub const SPINNER_FRAMES: &[&str] = &["◜", "◠", "◝", "◞", "◡", "◟"];
}

/// Output formatting configuration
pub mod output {
    /// Default report format for `files` and `settings`
    pub const DEFAULT_FORMAT: &str = "human";

    /// Directory (relative to the workspace root) for saved graphs and the
    /// preview page
    pub const OUTPUT_DIR: &str = ".cruise";

    /// File name of the preview page inside [`OUTPUT_DIR`]
    pub const PREVIEW_FILE: &str = "preview.html";

    /// Mermaid bundle loaded by the preview page
    pub const MERMAID_CDN: &str = "https://cdn.jsdelivr.net/npm/mermaid/dist/mermaid.min.js";
}

/// dependency-cruiser configuration discovery
pub mod cruiser {
    /// Project-local config files, in order of preference
    pub const CONFIG_CANDIDATES: &[&str] = &[
        ".dependency-cruiser.cjs",
        "dependency-cruiser.config.cjs",
        ".dependency-cruiser.js",
        ".dependency-cruiser.json",
        "dependency-cruiser.config.js",
        "dependency-cruiser.config.json",
    ];

    /// File name of the bundled fallback config once written under the output
    /// directory
    pub const BUNDLED_CONFIG_FILE: &str = ".dependency-cruiser.cjs";

    /// Contents of the bundled fallback config
    pub const BUNDLED_CONFIG: &str = include_str!("../assets/dependency-cruiser.cjs");
}

/// Settings defaults
pub mod defaults {
    use super::*;

    pub const SETTINGS_FILE: &str = "web-depcruiser.toml";
    pub const DEPCRUISE_COMMAND: &str = "npx depcruise";
    pub const DOT_PATH: &str = "dot";
    pub const SOURCE_DIR: &str = "src";
    pub const COLLAPSE_PATTERN: &str = "^(node_modules|lib)/[^/]+";
    pub const INCLUDE_NODE_MODULES: bool = true;
    pub const TIMEOUT: Duration = Duration::from_secs(120);
    pub const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

    /// Largest accepted `max-output`
    pub const MAX_OUTPUT_CEILING: usize = 1024 * 1024 * 1024;
}

/// Source files offered by the `files` command
pub mod explorer {
    pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "vue"];
    pub const SKIPPED_DIRS: &[&str] = &["node_modules"];
}
