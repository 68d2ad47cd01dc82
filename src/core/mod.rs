//! Core module for codectx
//!
//! This module contains the core types, the file classifier and the scanner.

pub mod classifier;
pub mod scanner;
mod types;

pub use classifier::classify;
pub use scanner::scan;
pub use types::*;
