//! Source scanner
//!
//! Walks the configured patterns under the project root, reads every match
//! and extracts imports and exports. Unreadable files are skipped, never
//! fatal; only an inaccessible root aborts the scan.

use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::debug;

use crate::config::ContextConfig;
use crate::core::{FileRecord, ScanOutcome, classify};
use crate::error::{ContextError, Result};
use crate::fs::{WalkConfig, relative_key, walk_directory_with_config};
use crate::utils::dependencies::{extract_exports, extract_imports};

/// Bytes inspected for NUL when deciding a file is binary
const BINARY_PROBE_LEN: usize = 8192;

/// Scan the project described by `config`.
///
/// Reads run in parallel; records come back in sorted path order regardless
/// of completion order. `skipped` counts matches that could not be read as
/// text, so `records` may be shorter than the match set.
pub fn scan(config: &ContextConfig) -> Result<ScanOutcome> {
    let root = config
        .root
        .canonicalize()
        .map_err(|source| ContextError::RootInaccessible {
            path: config.root.clone(),
            source,
        })?;
    fs::read_dir(&root).map_err(|source| ContextError::RootInaccessible {
        path: config.root.clone(),
        source,
    })?;

    let paths = walk_directory_with_config(
        &root,
        WalkConfig {
            include_patterns: &config.include_patterns,
            ignore_patterns: &config.ignore_patterns,
        },
    )?;

    let matched = paths.len();
    let records: Vec<FileRecord> = paths
        .par_iter()
        .filter_map(|path| read_record(path, &root, config))
        .collect();

    Ok(ScanOutcome {
        skipped: matched - records.len(),
        records,
    })
}

fn read_record(path: &Path, root: &Path, config: &ContextConfig) -> Option<FileRecord> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Skipping unreadable file {:?}: {}", path, e);
            return None;
        }
    };
    if is_binary(&bytes) {
        debug!("Skipping binary file {:?}", path);
        return None;
    }
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(_) => {
            debug!("Skipping non-UTF-8 file {:?}", path);
            return None;
        }
    };

    let metadata = fs::metadata(path).ok();
    let size = metadata
        .as_ref()
        .map(|m| m.len())
        .unwrap_or(content.len() as u64);
    let last_modified = metadata
        .and_then(|m| m.modified().ok())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|| DateTime::<Utc>::from(UNIX_EPOCH));

    let key = relative_key(path, root);
    Some(FileRecord {
        role: classify(&key, config),
        path: key,
        size,
        last_modified,
        import_targets: extract_imports(&content),
        exported_symbols: extract_exports(&content).into_iter().collect(),
    })
}

/// Looks for null bytes in the first 8KB.
fn is_binary(content: &[u8]) -> bool {
    let check_len = content.len().min(BINARY_PROBE_LEN);
    content[..check_len].contains(&0)
}
