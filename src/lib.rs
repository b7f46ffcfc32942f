//! # HERITAGE
//!
//! Override, implementation and subclass gutter markers for class-based
//! languages.
//!
//! Given a declaration model (types, their members and their extends /
//! implements clauses) and an inheritance index, HERITAGE classifies how each
//! public method relates to its supertypes and subtypes and emits plain-data
//! marker directives for an editor to render.
//!
//! ## Marker Kinds
//!
//! - **OVERRIDES / IMPLEMENTS**: the method matches a supertype member
//! - **OVERRIDDEN_BY / IMPLEMENTED_BY**: known subtypes declare the method
//! - **HAS_SUBCLASSES**: the type itself has known direct subtypes
//!
//! ## Output Formats
//!
//! - **Text**: gutter listing grouped by source file
//! - **JSON**: full report with the resolved inheritance edges
//! - **JSON-Compact**: positional arrays for programmatic consumption

pub mod config;
pub mod core;
pub mod formatters;
pub mod loader;
