use anyhow::Result;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::{AnalysisReport, MarkerKind};

/// Minimal JSON: markers as positional arrays, file paths interned.
///
/// `[file_id, line, kind_code, subject, [target, ...]]`
pub struct JsonCompactFormatter {
    /// Emit the tooltip as a sixth element
    with_tooltips: bool,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self {
            with_tooltips: false,
        }
    }

    pub fn with_tooltips(mut self, include: bool) -> Self {
        self.with_tooltips = include;
        self
    }

    pub fn format_to_file(&self, report: &AnalysisReport, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_report(report)?)?;
        Ok(())
    }

    pub fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut file_map: HashMap<String, usize> = HashMap::new();
        let mut files: Vec<String> = Vec::new();
        let mut markers = Vec::new();

        for marker in report.markers() {
            let path = marker
                .anchor
                .file_path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default();
            let file_id = *file_map.entry(path.clone()).or_insert_with(|| {
                files.push(path);
                files.len() - 1
            });

            let targets: Vec<String> = marker.targets.iter().map(|t| t.display_name()).collect();
            let mut row = json!([
                file_id,
                marker.anchor.span.line,
                self.kind_code(marker.kind),
                marker.label.subject,
                targets
            ]);
            if self.with_tooltips {
                if let Some(items) = row.as_array_mut() {
                    items.push(json!(marker.tooltip()));
                }
            }
            markers.push(row);
        }

        let output = json!({
            "meta": {
                "files": report.stats.files,
                "types": report.stats.types,
                "markers": report.stats.markers,
                "format": "compact"
            },
            "files": files,
            "markers": markers
        });

        Ok(serde_json::to_string(&output)?)
    }

    fn kind_code(&self, kind: MarkerKind) -> u8 {
        match kind {
            MarkerKind::Overrides => 0,
            MarkerKind::Implements => 1,
            MarkerKind::ImplementedBy => 2,
            MarkerKind::OverriddenBy => 3,
            MarkerKind::HasSubclasses => 4,
        }
    }
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}
