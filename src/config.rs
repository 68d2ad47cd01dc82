use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Name of the optional project-level configuration file
pub const CONFIG_FILE: &str = "codectx.toml";

/// Main configuration for the context engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Project root every scanned path is made relative to
    pub root: PathBuf,
    /// Glob patterns (relative to root) selecting files to scan
    pub include_patterns: Vec<String>,
    /// Glob patterns excluded from the scan (build output, vendored deps, tests)
    pub ignore_patterns: Vec<String>,
    /// Maximum age of a cached snapshot before the next query rebuilds it
    pub freshness_window_ms: u64,
    /// Directory holding file-system routes (e.g. `app`)
    pub routing_root: String,
    /// Directory holding API route handlers (e.g. `app/api`)
    pub api_root: String,
    /// Import alias mapped onto `alias_target` (e.g. `@/`)
    pub alias_prefix: String,
    /// Root-relative directory the alias points at; empty means the root itself
    pub alias_target: String,
    /// Extensions tried, in order, when resolving extensionless specifiers
    pub extensions: Vec<String>,
}

impl ContextConfig {
    /// Build the default configuration for a given project root.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Validates the configuration, ensuring the root exists.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.root.exists() {
            anyhow::bail!("Project root does not exist: {:?}", self.root);
        }
        if self.include_patterns.is_empty() {
            anyhow::bail!("At least one include pattern is required");
        }
        Ok(())
    }

    pub fn freshness_window(&self) -> Duration {
        Duration::from_millis(self.freshness_window_ms)
    }

    /// Attempts to load configuration from `codectx.toml` in the current directory.
    pub fn load_from_file() -> Option<Self> {
        Self::load_from_path(Path::new(CONFIG_FILE))
    }

    /// Loads a config file. A missing file is silent; an unreadable or
    /// malformed one is logged and treated as absent.
    pub fn load_from_path(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read {:?}, using defaults: {}", path, e);
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring malformed {:?}, using defaults: {}", path, e);
                None
            }
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        let include = [
            "app/**/*.{ts,tsx}",
            "components/**/*.{ts,tsx}",
            "lib/**/*.{ts,tsx}",
            "hooks/**/*.{ts,tsx}",
            "utils/**/*.{ts,tsx}",
            "types/**/*.{ts,tsx}",
        ];
        let ignore = [
            // Dependencies
            "node_modules",
            // Build output
            ".next",
            "dist",
            "build",
            "out",
            "coverage",
            // Tests
            "*.test.*",
            "*.spec.*",
        ];

        Self {
            root: PathBuf::from("."),
            include_patterns: include.into_iter().map(String::from).collect(),
            ignore_patterns: ignore.into_iter().map(String::from).collect(),
            freshness_window_ms: 5 * 60 * 1000,
            routing_root: "app".to_string(),
            api_root: "app/api".to_string(),
            alias_prefix: "@/".to_string(),
            alias_target: String::new(),
            extensions: ["ts", "tsx", "js", "jsx"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
