//! JSON output format for codectx

use anyhow::Result;
use std::io::Write;

use super::{Formatter, Report};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn write_report(&mut self, output: &mut dyn Write, report: &dyn Report) -> Result<()> {
        let value = report.to_json()?;
        serde_json::to_writer_pretty(&mut *output, &value)?;
        writeln!(output)?;
        Ok(())
    }

    fn write_partial_notice(&mut self, _output: &mut dyn Write, _skipped: usize) -> Result<()> {
        // Reports already carry `skipped_files` where it matters; keep stdout parseable.
        Ok(())
    }
}
