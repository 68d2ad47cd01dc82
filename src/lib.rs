pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod format;
pub mod fs;
pub mod utils;

// Re-export key items for convenience
pub use config::ContextConfig;
pub use core::{
    CodebaseContext, ComponentRecord, FileRecord, Role, RouteKind, RouteRecord, ScanOutcome,
    classify, scan,
};
pub use engine::ContextEngine;
pub use error::{ContextError, Result};
pub use utils::analysis::{
    CodebaseSummary, DependencyGraph, ImpactAnalysis, ImpactAnalyzer, RelatedFiles, RiskLevel,
    SymbolReport, SymbolUsage, UsageKind,
};
