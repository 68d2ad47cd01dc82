//! Assembles a [`CodebaseContext`] from scanned file records

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::Utc;
use tracing::debug;

use crate::config::ContextConfig;
use crate::core::{CodebaseContext, ComponentRecord, FileRecord, Role, ScanOutcome};
use crate::utils::dependencies::{Resolution, resolve_import};
use crate::utils::graph::DependencyGraph;
use crate::utils::routes::extract_route;

/// Build the full context snapshot. Never fails: an import that cannot be
/// resolved contributes no edge but still lands in the module index.
pub fn build(outcome: ScanOutcome, config: &ContextConfig) -> CodebaseContext {
    let ScanOutcome { records, skipped } = outcome;

    let dependencies = build_graph(&records, config);
    let imports = build_import_index(&records);
    let exports: BTreeMap<String, BTreeSet<String>> = records
        .iter()
        .map(|r| (r.path.clone(), r.exported_symbols.clone()))
        .collect();
    let components = build_components(&records, &dependencies);
    let routes = records
        .iter()
        .filter_map(|r| extract_route(&r.path, config))
        .collect();

    debug!(
        files = records.len(),
        edges = dependencies.edge_count(),
        modules = imports.len(),
        "Context assembled"
    );

    CodebaseContext {
        files: records,
        dependencies,
        imports,
        exports,
        components,
        routes,
        skipped_files: skipped,
        timestamp: Utc::now(),
    }
}

/// Seeds one node per record, then links reverse edges in a second pass.
pub fn build_graph(records: &[FileRecord], config: &ContextConfig) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    let known: HashSet<&str> = records.iter().map(|r| r.path.as_str()).collect();

    for record in records {
        let id = graph.add_node(record.path.as_str());
        for specifier in &record.import_targets {
            if let Resolution::Local(target) = resolve_import(specifier, &record.path, config, &known)
            {
                graph.add_dependency(id, target);
            }
        }
    }

    graph.link_reverse_edges();
    graph
}

/// Raw specifier -> importing files, each importer listed once per specifier.
fn build_import_index(records: &[FileRecord]) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for record in records {
        let mut seen = HashSet::new();
        for specifier in &record.import_targets {
            if seen.insert(specifier.as_str()) {
                index
                    .entry(specifier.clone())
                    .or_default()
                    .push(record.path.clone());
            }
        }
    }
    index
}

/// One entry per component or page file; names may repeat across directories.
fn build_components(records: &[FileRecord], graph: &DependencyGraph) -> Vec<ComponentRecord> {
    records
        .iter()
        .filter(|r| matches!(r.role, Role::Component | Role::Page))
        .map(|r| ComponentRecord {
            name: file_stem(&r.path).to_string(),
            file: r.path.clone(),
            used_in: graph
                .used_by(&r.path)
                .into_iter()
                .map(String::from)
                .collect(),
        })
        .collect()
}

fn file_stem(path: &str) -> &str {
    let basename = path.rsplit('/').next().unwrap_or(path);
    match basename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => basename,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::classify;
    use chrono::TimeZone;

    pub(crate) fn record(path: &str, imports: &[&str], exports: &[&str]) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            role: classify(path, &ContextConfig::default()),
            size: 0,
            last_modified: Utc.timestamp_opt(0, 0).unwrap(),
            import_targets: imports.iter().map(|s| s.to_string()).collect(),
            exported_symbols: exports.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub(crate) fn context(records: Vec<FileRecord>) -> CodebaseContext {
        build(
            ScanOutcome {
                records,
                skipped: 0,
            },
            &ContextConfig::default(),
        )
    }

    #[test]
    fn test_edge_symmetry() {
        let ctx = context(vec![
            record("lib/db.ts", &["@supabase/supabase-js"], &["db"]),
            record("lib/bookings.ts", &["./db", "./db", "date-fns"], &["listBookings"]),
            record("app/bookings/page.tsx", &["@/lib/bookings", "@/lib/db"], &["default"]),
            record("components/nav.tsx", &["../lib/missing"], &[]),
        ]);
        let graph = &ctx.dependencies;

        for a in graph.nodes() {
            for b in graph.depends_on(a) {
                if graph.contains(b) {
                    assert!(graph.used_by(b).contains(&a), "{} -> {} not mirrored", a, b);
                }
            }
        }
        assert_eq!(graph.depends_on("lib/bookings.ts"), ["lib/db.ts"]);
        assert_eq!(
            graph.used_by("lib/db.ts"),
            vec!["lib/bookings.ts", "app/bookings/page.tsx"]
        );
    }

    #[test]
    fn test_module_index_keeps_raw_specifiers() {
        let ctx = context(vec![
            record("lib/db.ts", &["@supabase/supabase-js"], &[]),
            record("lib/a.ts", &["./db", "./db", "../../x"], &[]),
        ]);
        assert_eq!(ctx.imports["./db"], vec!["lib/a.ts"]);
        assert_eq!(ctx.imports["@supabase/supabase-js"], vec!["lib/db.ts"]);
        // escapes the root, so no edge, but still indexed
        assert!(ctx.imports.contains_key("../../x"));
        assert_eq!(ctx.dependencies.depends_on("lib/a.ts"), ["lib/db.ts"]);
    }

    #[test]
    fn test_self_import_adds_no_edge() {
        let ctx = context(vec![
            record("lib/db.ts", &["./db", "@/lib/db.ts"], &["db"]),
            record("lib/a.ts", &["./db"], &[]),
        ]);
        let graph = &ctx.dependencies;
        assert!(graph.depends_on("lib/db.ts").is_empty());
        assert_eq!(graph.used_by("lib/db.ts"), vec!["lib/a.ts"]);
        assert_eq!(graph.edge_count(), 1);
        // still indexed as a raw specifier
        assert_eq!(ctx.imports["./db"], vec!["lib/db.ts", "lib/a.ts"]);
    }

    #[test]
    fn test_components_allow_duplicate_names() {
        let ctx = context(vec![
            record("components/bookings/table.tsx", &[], &["default"]),
            record("components/drivers/table.tsx", &[], &["default"]),
            record("app/drivers/page.tsx", &["@/components/drivers/table"], &[]),
            record("lib/db.ts", &[], &[]),
        ]);
        let names: Vec<_> = ctx.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["table", "table", "page"]);

        let drivers = &ctx.components[1];
        assert_eq!(drivers.used_in, vec!["app/drivers/page.tsx"]);
        assert!(ctx.components[0].used_in.is_empty());
    }

    #[test]
    fn test_routes_and_exports() {
        let ctx = context(vec![
            record("app/bookings/[id]/page.tsx", &[], &["default"]),
            record("lib/db.ts", &[], &["db"]),
        ]);
        assert_eq!(ctx.routes.len(), 1);
        assert_eq!(ctx.routes[0].route_path, "/bookings/:id");
        assert!(ctx.exports["lib/db.ts"].contains("db"));
    }
}
