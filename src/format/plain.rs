//! Plain text output format for codectx

use anyhow::Result;
use std::io::Write;

use super::{Formatter, Report};

pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn write_report(&mut self, output: &mut dyn Write, report: &dyn Report) -> Result<()> {
        write!(output, "{}", report)?;
        Ok(())
    }

    fn write_partial_notice(&mut self, output: &mut dyn Write, skipped: usize) -> Result<()> {
        writeln!(output)?;
        writeln!(
            output,
            "Note: {} file(s) could not be read; results are best-effort.",
            skipped
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::impact::ImpactAnalyzer;
    use crate::utils::graph::DependencyGraph;

    #[test]
    fn test_plain_uses_display() {
        let graph = DependencyGraph::new();
        let analysis = ImpactAnalyzer::new(&graph).analyze("lib/db.ts");
        let text = crate::format::render(&analysis, crate::format::OutputFormat::Plain).unwrap();
        assert!(text.starts_with("Impact Analysis: lib/db.ts"));
    }
}
