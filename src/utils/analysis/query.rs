//! Read-only queries over a context snapshot
//!
//! One-hop neighbourhoods, loose symbol lookup and the summary report.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::{CodebaseContext, ComponentRecord, FileRecord, Role, RouteRecord};
use crate::utils::impact::{ImpactAnalysis, ImpactAnalyzer};

/// How many entries the summary keeps per ranked list
const SUMMARY_LIMIT: usize = 10;

/// Files one hop away from a file, in either direction
#[derive(Debug, Clone, Serialize)]
pub struct RelatedFiles {
    pub file: String,
    pub related: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageKind {
    Definition,
    Import,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolUsage {
    pub file: String,
    pub kind: UsageKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolReport {
    pub symbol: String,
    pub usages: Vec<SymbolUsage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleCount {
    pub module: String,
    pub importers: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentFile {
    pub path: String,
    pub last_modified: DateTime<Utc>,
}

/// Overview of a snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CodebaseSummary {
    pub total_files: usize,
    pub by_role: BTreeMap<Role, usize>,
    pub top_dependencies: Vec<ModuleCount>,
    pub recently_modified: Vec<RecentFile>,
    pub skipped_files: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub routes: Vec<RouteRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentReport {
    pub components: Vec<ComponentRecord>,
}

/// Local dependencies that are graph nodes, then importers, deduplicated.
/// No transitive closure.
pub fn find_related_files(ctx: &CodebaseContext, file: &str) -> RelatedFiles {
    let graph = &ctx.dependencies;
    let mut seen = HashSet::new();
    let mut related = Vec::new();

    let outgoing = graph
        .depends_on(file)
        .iter()
        .map(String::as_str)
        .filter(|dep| graph.contains(dep));
    for path in outgoing.chain(graph.used_by(file)) {
        if seen.insert(path) {
            related.push(path.to_string());
        }
    }

    RelatedFiles {
        file: file.to_string(),
        related,
    }
}

/// Linear scan for `symbol`.
///
/// A file is a definition site when it exports the symbol, and an import
/// site when any raw specifier it imports contains the symbol as a substring.
/// The import match is textual, so `"./shapes"` does not match `Circle`
/// while `"./Circle"` does; false positives are expected. An empty symbol
/// matches nothing.
pub fn find_symbol_usage(ctx: &CodebaseContext, symbol: &str) -> SymbolReport {
    let mut usages = Vec::new();
    if !symbol.is_empty() {
        for file in &ctx.files {
            if file.exported_symbols.contains(symbol) {
                usages.push(SymbolUsage {
                    file: file.path.clone(),
                    kind: UsageKind::Definition,
                });
            }
            if file.import_targets.iter().any(|s| s.contains(symbol)) {
                usages.push(SymbolUsage {
                    file: file.path.clone(),
                    kind: UsageKind::Import,
                });
            }
        }
    }

    SymbolReport {
        symbol: symbol.to_string(),
        usages,
    }
}

pub fn summarize(ctx: &CodebaseContext) -> CodebaseSummary {
    let mut by_role: BTreeMap<Role, usize> = BTreeMap::new();
    for file in &ctx.files {
        *by_role.entry(file.role).or_default() += 1;
    }

    let mut top_dependencies: Vec<ModuleCount> = ctx
        .imports
        .iter()
        .map(|(module, importers)| ModuleCount {
            module: module.clone(),
            importers: importers.len(),
        })
        .collect();
    // BTreeMap iteration is name-ordered and the sort is stable, so ties stay alphabetical
    top_dependencies.sort_by(|a, b| b.importers.cmp(&a.importers));
    top_dependencies.truncate(SUMMARY_LIMIT);

    let mut recent: Vec<&FileRecord> = ctx.files.iter().collect();
    recent.sort_by(|a, b| {
        b.last_modified
            .cmp(&a.last_modified)
            .then_with(|| a.path.cmp(&b.path))
    });
    let recently_modified = recent
        .into_iter()
        .take(SUMMARY_LIMIT)
        .map(|f| RecentFile {
            path: f.path.clone(),
            last_modified: f.last_modified,
        })
        .collect();

    CodebaseSummary {
        total_files: ctx.file_count(),
        by_role,
        top_dependencies,
        recently_modified,
        skipped_files: ctx.skipped_files,
        generated_at: ctx.timestamp,
    }
}

/// Query entry points over one snapshot. File arguments go through
/// [`normalize_query_path`] first.
impl CodebaseContext {
    pub fn analyze_impact(&self, file: &str) -> ImpactAnalysis {
        ImpactAnalyzer::new(&self.dependencies).analyze(&normalize_query_path(file))
    }

    pub fn related_files(&self, file: &str) -> RelatedFiles {
        find_related_files(self, &normalize_query_path(file))
    }

    pub fn symbol_usage(&self, symbol: &str) -> SymbolReport {
        find_symbol_usage(self, symbol)
    }

    pub fn summary(&self) -> CodebaseSummary {
        summarize(self)
    }

    pub fn route_report(&self) -> RouteReport {
        RouteReport {
            routes: self.routes.clone(),
        }
    }

    pub fn component_report(&self) -> ComponentReport {
        ComponentReport {
            components: self.components.clone(),
        }
    }
}

/// Accepts `./lib/db.ts` and `lib\db.ts` for `lib/db.ts`.
pub fn normalize_query_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").to_string()
}

impl fmt::Display for RelatedFiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Related to {}: {}", self.file, self.related.len())?;
        for path in &self.related {
            writeln!(f, "  * {}", path)?;
        }
        Ok(())
    }
}

impl fmt::Display for SymbolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Usages of {}: {}", self.symbol, self.usages.len())?;
        for usage in &self.usages {
            let tag = match usage.kind {
                UsageKind::Definition => "def",
                UsageKind::Import => "imp",
            };
            writeln!(f, "  [{}] {}", tag, usage.file)?;
        }
        Ok(())
    }
}

impl fmt::Display for CodebaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Codebase Summary")?;
        writeln!(f, "================")?;
        writeln!(f)?;
        writeln!(f, "Total files: {}", self.total_files)?;
        for (role, count) in &self.by_role {
            writeln!(f, "  {:<10} {}", role, count)?;
        }

        writeln!(f)?;
        writeln!(f, "Top dependencies:")?;
        for dep in &self.top_dependencies {
            writeln!(f, "  {:>3}  {}", dep.importers, dep.module)?;
        }

        writeln!(f)?;
        writeln!(f, "Recently modified:")?;
        for file in &self.recently_modified {
            writeln!(
                f,
                "  {}  {}",
                file.last_modified.format("%Y-%m-%d %H:%M"),
                file.path
            )?;
        }

        Ok(())
    }
}

impl fmt::Display for RouteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Routes: {}", self.routes.len())?;
        for route in &self.routes {
            let marker = if route.is_dynamic { "*" } else { " " };
            writeln!(
                f,
                "  {}{:<7} {:<40} {}",
                marker, route.kind, route.route_path, route.file
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ComponentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Components: {}", self.components.len())?;
        for c in &self.components {
            writeln!(f, "  {} ({}) used in {}", c.name, c.file, c.used_in.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::builder::tests::{context, record};
    use chrono::TimeZone;

    #[test]
    fn test_related_files_one_hop() {
        let ctx = context(vec![
            record("lib/db.ts", &[], &[]),
            record("lib/bookings.ts", &["./db", "./styles.css", "zod"], &[]),
            record("app/page.tsx", &["@/lib/bookings"], &[]),
            record("app/admin/page.tsx", &["@/lib/bookings", "@/lib/db"], &[]),
        ]);
        let related = find_related_files(&ctx, "lib/bookings.ts").related;
        assert_eq!(related, vec!["lib/db.ts", "app/page.tsx", "app/admin/page.tsx"]);

        // no transitive closure: app pages are two hops from db
        let db = find_related_files(&ctx, "lib/db.ts").related;
        assert_eq!(db, vec!["lib/bookings.ts", "app/admin/page.tsx"]);
    }

    #[test]
    fn test_related_files_deduplicates_mutual_imports() {
        let ctx = context(vec![
            record("a.ts", &["./b"], &[]),
            record("b.ts", &["./a"], &[]),
        ]);
        assert_eq!(find_related_files(&ctx, "a.ts").related, vec!["b.ts"]);
        assert!(find_related_files(&ctx, "missing.ts").related.is_empty());
    }

    #[test]
    fn test_symbol_usage_definition_and_loose_import() {
        let ctx = context(vec![
            record("shapes.ts", &[], &["Circle", "Square"]),
            record("app.ts", &["./shapes"], &[]),
            record("canvas.ts", &["./components/Circle"], &[]),
        ]);
        let usages = find_symbol_usage(&ctx, "Circle").usages;
        assert_eq!(
            usages,
            vec![
                SymbolUsage {
                    file: "shapes.ts".into(),
                    kind: UsageKind::Definition
                },
                SymbolUsage {
                    file: "canvas.ts".into(),
                    kind: UsageKind::Import
                },
            ]
        );
        assert!(find_symbol_usage(&ctx, "").usages.is_empty());
    }

    #[test]
    fn test_summary_rankings() {
        let mut files = vec![
            record("lib/db.ts", &["@supabase/supabase-js"], &[]),
            record("lib/a.ts", &["react", "zod"], &[]),
            record("components/b.tsx", &["react", "zod"], &[]),
            record("components/c.tsx", &["react"], &[]),
        ];
        for (i, file) in files.iter_mut().enumerate() {
            file.last_modified = Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap();
        }
        let summary = summarize(&context(files));

        assert_eq!(summary.total_files, 4);
        assert_eq!(summary.by_role[&Role::Utility], 2);
        assert_eq!(summary.by_role[&Role::Component], 2);
        assert_eq!(
            summary.top_dependencies[0],
            ModuleCount {
                module: "react".into(),
                importers: 3
            }
        );
        assert_eq!(summary.top_dependencies[1].module, "zod");
        assert_eq!(summary.recently_modified[0].path, "components/c.tsx");
        assert_eq!(summary.recently_modified[3].path, "lib/db.ts");
    }

    #[test]
    fn test_summary_limits_to_ten() {
        let files: Vec<_> = (0..15)
            .map(|i| {
                let module = format!("pkg-{}", i);
                let mut r = record(&format!("lib/f{}.ts", i), &[], &[]);
                r.import_targets = vec![module];
                r
            })
            .collect();
        let summary = summarize(&context(files));
        assert_eq!(summary.top_dependencies.len(), 10);
        assert_eq!(summary.recently_modified.len(), 10);
    }
}
