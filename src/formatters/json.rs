use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::{AnalysisReport, HierarchyGraph, InheritanceEdge};

#[derive(Serialize)]
struct FullOutput<'a> {
    #[serde(flatten)]
    report: &'a AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    hierarchy: Option<Vec<InheritanceEdge>>,
}

/// Full serde rendering of the report, optionally with the resolved
/// inheritance edges.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format_to_file(
        &self,
        report: &AnalysisReport,
        hierarchy: Option<&HierarchyGraph>,
        output_path: &Path,
    ) -> Result<()> {
        fs::write(output_path, self.format_report(report, hierarchy)?)?;
        Ok(())
    }

    pub fn format_report(
        &self,
        report: &AnalysisReport,
        hierarchy: Option<&HierarchyGraph>,
    ) -> Result<String> {
        let output = FullOutput {
            report,
            hierarchy: hierarchy.map(HierarchyGraph::edges),
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        Ok(rendered)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
