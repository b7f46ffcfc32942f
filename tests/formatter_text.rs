mod common;

use heritage::config::AnalyzerConfig;
use heritage::core::MarkerAnalyzer;
use heritage::formatters::{TextFormatter, TextVerbosity};

#[test]
fn text_formatter_gutter_listing_is_stable() {
    let dir = tempfile::TempDir::new().unwrap();
    common::write_geo_project(dir.path());
    let report = MarkerAnalyzer::new(AnalyzerConfig::default().without_cache())
        .analyze(dir.path())
        .unwrap();

    let out = TextFormatter::new().format_report(&report).unwrap();
    let expected = "\
# GUTTER_MARKERS files:2 types:2 markers:3
OVERRIDES: 1
IMPLEMENTED_BY: 1
HAS_SUBCLASSES: 1

## src/geo/Circle.hx
5:80   <  OVERRIDES       area  -> geo.Shape.area
         Overrides method 'area' in geo.Shape

## src/geo/Shape.hx
4:50   >  IMPLEMENTED_BY  area  -> geo.Circle.area
         Implemented by 1
3:27   >  HAS_SUBCLASSES  Shape  -> geo.Circle
         Implemented by 1 types

";
    assert_eq!(out, expected);
}

#[test]
fn compact_and_verbose_levels_change_detail_lines() {
    let dir = tempfile::TempDir::new().unwrap();
    common::write_geo_project(dir.path());
    let report = MarkerAnalyzer::new(AnalyzerConfig::default().without_cache())
        .analyze(dir.path())
        .unwrap();

    let compact = TextFormatter::new()
        .with_summary(false)
        .with_verbosity(TextVerbosity::Compact)
        .format_report(&report)
        .unwrap();
    assert!(compact.starts_with("## src/geo/Circle.hx\n"));
    assert!(!compact.contains("Overrides method"));

    let verbose = TextFormatter::new()
        .with_verbosity(TextVerbosity::Verbose)
        .format_report(&report)
        .unwrap();
    assert!(verbose.contains("Choose super method of area"));
    assert!(verbose.contains("Choose implementation of area (1 methods found)"));
    assert!(verbose.contains("Choose implementation of Shape (1 types found)"));
}
