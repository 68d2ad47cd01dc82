//! Impact analysis for code changes
//!
//! Traces reverse dependencies of a changed file and classifies the blast
//! radius into a discrete risk level.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use crate::utils::graph::DependencyGraph;

/// How many directly affected files the review recommendation names
const REVIEW_LIST_LIMIT: usize = 5;

/// Impact analysis result for one changed file
#[derive(Debug, Clone, Serialize)]
pub struct ImpactAnalysis {
    pub file: String,
    /// Files importing the changed file
    pub direct_impact: Vec<String>,
    /// Files reaching the changed file only through other importers
    pub indirect_impact: Vec<String>,
    pub total_affected: usize,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// `> 20` critical, `> 10` high, `> 5` medium, otherwise low.
    pub fn from_affected(total: usize) -> Self {
        if total > 20 {
            RiskLevel::Critical
        } else if total > 10 {
            RiskLevel::High
        } else if total > 5 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => f.write_str("LOW"),
            RiskLevel::Medium => f.write_str("MEDIUM"),
            RiskLevel::High => f.write_str("HIGH"),
            RiskLevel::Critical => f.write_str("CRITICAL"),
        }
    }
}

impl fmt::Display for ImpactAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Impact Analysis: {}", self.file)?;
        writeln!(f, "===============")?;
        writeln!(f)?;

        writeln!(f, "Directly affected: {}", self.direct_impact.len())?;
        for file in self.direct_impact.iter().take(10) {
            writeln!(f, "  -> {}", file)?;
        }
        if self.direct_impact.len() > 10 {
            writeln!(f, "  ... and {} more", self.direct_impact.len() - 10)?;
        }

        writeln!(f)?;
        writeln!(f, "Indirectly affected: {}", self.indirect_impact.len())?;
        writeln!(f, "Total affected: {}", self.total_affected)?;
        writeln!(f, "Risk level: {}", self.risk_level)?;

        if !self.recommendations.is_empty() {
            writeln!(f)?;
            writeln!(f, "Recommendations:")?;
            for rec in &self.recommendations {
                writeln!(f, "  - {}", rec)?;
            }
        }

        Ok(())
    }
}

/// Impact analyzer over a built dependency graph
pub struct ImpactAnalyzer<'a> {
    graph: &'a DependencyGraph,
}

impl<'a> ImpactAnalyzer<'a> {
    pub fn new(graph: &'a DependencyGraph) -> Self {
        Self { graph }
    }

    /// Analyze the impact of changing `file`.
    ///
    /// A path the graph does not know yields an empty, low-risk analysis.
    pub fn analyze(&self, file: &str) -> ImpactAnalysis {
        let Some(start) = self.graph.id_of(file) else {
            return Self::finish(file, Vec::new(), Vec::new());
        };

        let node_count = self.graph.node_count();
        let direct: Vec<usize> = self.graph.used_by_ids(start).to_vec();

        // BFS through reverse deps. Direct nodes are pre-marked so they are
        // never reported again as indirect. The changed file itself is not
        // pre-marked: in a cycle it is reachable from its own importers.
        let mut visited = vec![false; node_count];
        for &id in &direct {
            visited[id] = true;
        }
        let mut indirect = Vec::new();
        let mut queue: VecDeque<usize> = direct.iter().copied().collect();

        while let Some(id) = queue.pop_front() {
            for &dependent in self.graph.used_by_ids(id) {
                if !visited[dependent] {
                    visited[dependent] = true;
                    indirect.push(dependent);
                    queue.push_back(dependent);
                }
            }
        }

        let to_paths = |ids: Vec<usize>| -> Vec<String> {
            ids.into_iter()
                .map(|id| self.graph.path_of(id).to_string())
                .collect()
        };
        Self::finish(file, to_paths(direct), to_paths(indirect))
    }

    fn finish(file: &str, direct: Vec<String>, indirect: Vec<String>) -> ImpactAnalysis {
        let total_affected = direct.len() + indirect.len();
        let risk_level = RiskLevel::from_affected(total_affected);
        let recommendations = recommendations(risk_level, &direct);

        ImpactAnalysis {
            file: file.to_string(),
            direct_impact: direct,
            indirect_impact: indirect,
            total_affected,
            risk_level,
            recommendations,
        }
    }
}

fn recommendations(risk: RiskLevel, direct: &[String]) -> Vec<String> {
    let mut recs = Vec::new();
    if risk >= RiskLevel::High {
        recs.push("Run extensive tests: this change reaches a large part of the codebase".to_string());
        recs.push("Consider splitting the change into smaller, independently shippable steps".to_string());
    }
    if !direct.is_empty() {
        let named: Vec<&str> = direct
            .iter()
            .take(REVIEW_LIST_LIMIT)
            .map(String::as_str)
            .collect();
        recs.push(format!("Review directly affected files: {}", named.join(", ")));
    }
    recs
}
