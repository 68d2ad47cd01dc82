//! Context engine: the cached snapshot and the public query surface
//!
//! The engine owns one snapshot and the instant it was built. A query that
//! finds the snapshot older than the freshness window rebuilds it in full;
//! there is no partial invalidation, a change to one file is picked up by
//! the next full rescan.
//!
//! Rebuilds are serialized. Callers that find the snapshot stale queue on the
//! rebuild lock and re-check freshness once they hold it, so concurrent
//! callers share one rebuild. The snapshot is swapped in only when complete.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tracing::info;

use crate::config::ContextConfig;
use crate::core::{CodebaseContext, scan};
use crate::error::Result;
use crate::utils::builder::build;
use crate::utils::impact::ImpactAnalysis;
use crate::utils::query::{CodebaseSummary, ComponentReport, RelatedFiles, RouteReport, SymbolReport};

struct Snapshot {
    context: Arc<CodebaseContext>,
    built_at: Instant,
}

pub struct ContextEngine {
    config: ContextConfig,
    snapshot: RwLock<Option<Snapshot>>,
    rebuild: Mutex<()>,
    builds: AtomicUsize,
}

impl ContextEngine {
    pub fn new(config: ContextConfig) -> Self {
        Self {
            config,
            snapshot: RwLock::new(None),
            rebuild: Mutex::new(()),
            builds: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Returns the cached snapshot while fresh, otherwise rebuilds it.
    ///
    /// A failed rebuild is returned as an error; the stale snapshot is not
    /// served in its place.
    pub fn get_context(&self) -> Result<Arc<CodebaseContext>> {
        if let Some(context) = self.fresh() {
            return Ok(context);
        }

        let _guard = self.rebuild.lock();
        if let Some(context) = self.fresh() {
            return Ok(context);
        }

        let started = Instant::now();
        let outcome = scan(&self.config)?;
        let context = Arc::new(build(outcome, &self.config));
        self.builds.fetch_add(1, Ordering::Relaxed);

        info!(
            files = context.file_count(),
            edges = context.dependencies.edge_count(),
            skipped = context.skipped_files,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Rebuilt codebase context"
        );

        *self.snapshot.write() = Some(Snapshot {
            context: Arc::clone(&context),
            built_at: Instant::now(),
        });
        Ok(context)
    }

    /// Drops the cached snapshot; the next query rebuilds from scratch.
    pub fn invalidate(&self) {
        *self.snapshot.write() = None;
    }

    /// Number of full rebuilds performed so far
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    pub fn analyze_impact(&self, file: &str) -> Result<ImpactAnalysis> {
        Ok(self.get_context()?.analyze_impact(file))
    }

    pub fn find_related_files(&self, file: &str) -> Result<RelatedFiles> {
        Ok(self.get_context()?.related_files(file))
    }

    pub fn find_symbol_usage(&self, symbol: &str) -> Result<SymbolReport> {
        Ok(self.get_context()?.symbol_usage(symbol))
    }

    pub fn summary(&self) -> Result<CodebaseSummary> {
        Ok(self.get_context()?.summary())
    }

    pub fn routes(&self) -> Result<RouteReport> {
        Ok(self.get_context()?.route_report())
    }

    pub fn components(&self) -> Result<ComponentReport> {
        Ok(self.get_context()?.component_report())
    }

    fn fresh(&self) -> Option<Arc<CodebaseContext>> {
        let window = self.config.freshness_window();
        match &*self.snapshot.read() {
            Some(s) if s.built_at.elapsed() < window => Some(Arc::clone(&s.context)),
            _ => None,
        }
    }
}
