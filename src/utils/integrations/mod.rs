//! Integration utilities
//!
//! Contains file watching for keeping a long-running engine fresh.

pub mod watch;

pub use watch::{Debouncer, FileWatcher, WatchEvent, is_source_change};
