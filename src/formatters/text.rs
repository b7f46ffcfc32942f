//! Human-readable gutter listing.
//!
//! One block per source file, one line per marker:
//!
//! ```text
//! ## src/geo/Circle.hx
//! 3:16   <  OVERRIDES       area  -> geo.Shape.area
//!          Overrides method 'area' in geo.Shape
//! ```
//!
//! The position is `line:offset`, where offset is the byte offset of the
//! anchor token in its source file. `<` and `>` show the gutter side the
//! marker is drawn on.

use anyhow::Result;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::core::{Alignment, AnalysisReport, MarkerDirective};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextVerbosity {
    /// Marker lines only
    Compact,
    /// Marker lines followed by their tooltip
    #[default]
    Standard,
    /// Tooltip plus the navigation pick-list title
    Verbose,
}

pub struct TextFormatter {
    verbosity: TextVerbosity,
    include_summary: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self {
            verbosity: TextVerbosity::default(),
            include_summary: true,
        }
    }

    pub fn with_verbosity(mut self, verbosity: TextVerbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_summary(mut self, include: bool) -> Self {
        self.include_summary = include;
        self
    }

    pub fn format_to_file(&self, report: &AnalysisReport, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_report(report)?)?;
        Ok(())
    }

    pub fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut out = String::new();

        if self.include_summary {
            let stats = &report.stats;
            writeln!(
                out,
                "# GUTTER_MARKERS files:{} types:{} markers:{}",
                stats.files, stats.types, stats.markers
            )?;
            for (kind, count) in &stats.by_kind {
                writeln!(out, "{}: {}", kind.as_str(), count)?;
            }
            writeln!(out)?;
        }

        for file in &report.files {
            let header = file
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unknown>".to_string());
            writeln!(out, "## {}", header)?;
            for marker in &file.markers {
                self.write_marker(&mut out, marker)?;
            }
            writeln!(out)?;
        }

        Ok(out)
    }

    fn write_marker(&self, out: &mut String, marker: &MarkerDirective) -> Result<()> {
        let side = match marker.alignment {
            Alignment::Left => '<',
            Alignment::Right => '>',
        };
        let span = marker.anchor.span;
        let position = format!("{}:{}", span.line, span.start);
        let targets: Vec<String> = marker.targets.iter().map(|t| t.display_name()).collect();

        writeln!(
            out,
            "{:<6} {}  {:<15} {}  -> {}",
            position,
            side,
            marker.kind.as_str(),
            marker.label.subject,
            targets.join(", ")
        )?;

        let indent = " ".repeat(9);
        if self.verbosity != TextVerbosity::Compact {
            writeln!(out, "{}{}", indent, marker.tooltip())?;
        }
        if self.verbosity == TextVerbosity::Verbose {
            writeln!(out, "{}{}", indent, marker.navigation_title())?;
        }
        Ok(())
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}
