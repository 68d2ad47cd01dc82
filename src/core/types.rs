//! Core types shared across codectx modules

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::utils::graph::DependencyGraph;

/// Sentinel recorded in `exported_symbols` when a file has a default export
pub const DEFAULT_EXPORT: &str = "default";

/// Semantic category of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Page,
    ApiRoute,
    Component,
    Hook,
    Utility,
    Type,
    Config,
    Test,
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Page => "page",
            Role::ApiRoute => "api-route",
            Role::Component => "component",
            Role::Hook => "hook",
            Role::Utility => "utility",
            Role::Type => "type",
            Role::Config => "config",
            Role::Test => "test",
            Role::Other => "other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One scanned source file
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// Root-relative, forward-slash path; the graph's node key
    pub path: String,
    pub role: Role,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    /// Raw module specifiers in textual order, duplicates kept
    pub import_targets: Vec<String>,
    /// Named exports plus [`DEFAULT_EXPORT`] when present
    pub exported_symbols: BTreeSet<String>,
}

/// Files returned by one scan pass, plus how many matches were unreadable
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub records: Vec<FileRecord>,
    pub skipped: usize,
}

/// A component or page file, with the files that import it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRecord {
    /// File basename without extension; not unique across the project
    pub name: String,
    pub file: String,
    pub used_in: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Page,
    Api,
    Layout,
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteKind::Page => "page",
            RouteKind::Api => "api",
            RouteKind::Layout => "layout",
        };
        f.pad(name)
    }
}

/// A file-system route derived from a file under the routing root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    /// URL pattern, e.g. `/bookings/:id`
    pub route_path: String,
    pub file: String,
    pub kind: RouteKind,
    pub is_dynamic: bool,
}

/// Immutable snapshot of one full scan and build
#[derive(Debug, Clone)]
pub struct CodebaseContext {
    pub files: Vec<FileRecord>,
    pub dependencies: DependencyGraph,
    /// Raw specifier -> files importing it (external packages included)
    pub imports: BTreeMap<String, Vec<String>>,
    /// File -> exported symbols
    pub exports: BTreeMap<String, BTreeSet<String>>,
    pub components: Vec<ComponentRecord>,
    pub routes: Vec<RouteRecord>,
    /// Matched files the scanner could not read
    pub skipped_files: usize,
    pub timestamp: DateTime<Utc>,
}

impl CodebaseContext {
    pub fn file(&self, path: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
