//! Analysis utilities for code intelligence
//!
//! Contains extraction, graph building, impact analysis and queries.

pub mod builder;
pub mod dependencies;
pub mod graph;
pub mod impact;
pub mod query;
pub mod routes;

// Re-export commonly used items
pub use builder::build;
pub use graph::{DependencyGraph, NodeId};
pub use impact::{ImpactAnalysis, ImpactAnalyzer, RiskLevel};
pub use query::{CodebaseSummary, RelatedFiles, SymbolReport, SymbolUsage, UsageKind};
