use crate::error::{ContextError, Result};
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Patterns controlling a directory walk
pub struct WalkConfig<'a> {
    pub include_patterns: &'a [String],
    pub ignore_patterns: &'a [String],
}

/// Walk `root` and return every file matching the include patterns and none
/// of the ignore patterns, sorted by path.
pub fn walk_directory_with_config(root: &Path, config: WalkConfig<'_>) -> Result<Vec<PathBuf>> {
    let mut override_builder = OverrideBuilder::new(root);
    // In override builder:
    // - "pattern" whitelists; once any whitelist exists, unmatched files are skipped
    // - "!pattern" ignores
    // The last matching glob wins, so ignores are added after includes.
    for pattern in config.include_patterns {
        override_builder
            .add(pattern)
            .map_err(|e| ContextError::InvalidPattern(format!("{}: {}", pattern, e)))?;
    }
    for pattern in config.ignore_patterns {
        override_builder
            .add(&format!("!{}", pattern))
            .map_err(|e| ContextError::InvalidPattern(format!("{}: {}", pattern, e)))?;
    }
    let overrides = override_builder
        .build()
        .map_err(|e| ContextError::InvalidPattern(e.to_string()))?;

    let mut builder = WalkBuilder::new(root);
    builder.overrides(overrides);
    // Standard gitignore is on by default.
    builder.standard_filters(true);

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => warn!("Error walking directory: {}", err),
        }
    }

    files.sort();
    Ok(files)
}

/// Render `path` relative to `root` with forward slashes.
pub fn relative_key(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
