//! Utility modules for codectx
//!
//! Organized into logical groups:
//! - `analysis/` - Code intelligence (extraction, graph, impact, queries)
//! - `integrations/` - File watching

pub mod analysis;
pub mod integrations;

// Short paths like `utils::graph`
pub use analysis::builder;
pub use analysis::dependencies;
pub use analysis::graph;
pub use analysis::impact;
pub use analysis::query;
pub use analysis::routes;

pub use integrations::watch;
