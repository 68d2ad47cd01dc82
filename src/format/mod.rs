//! Output format modules for codectx reports

pub mod json;
pub mod plain;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::Write;

/// Output format for query reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

/// Any query result that can be rendered both for humans and as JSON
pub trait Report: Display {
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
}

impl<T: Serialize + Display> Report for T {
    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

pub trait Formatter {
    fn write_report(&mut self, output: &mut dyn Write, report: &dyn Report) -> Result<()>;

    /// Appended when the snapshot skipped unreadable files
    fn write_partial_notice(&mut self, output: &mut dyn Write, skipped: usize) -> Result<()>;
}

pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Plain => Box::new(plain::PlainFormatter),
        OutputFormat::Json => Box::new(json::JsonFormatter),
    }
}

/// Render a report to a string in the given format.
pub fn render(report: &dyn Report, format: OutputFormat) -> Result<String> {
    let mut buffer = Vec::new();
    create_formatter(format).write_report(&mut buffer, report)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
