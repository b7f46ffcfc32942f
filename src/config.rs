use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::loader::cache::DEFAULT_MAX_MEMORY_ENTRIES;

pub const DEFAULT_EXTENSION: &str = ".decl.json";

/// Analyzer settings. Every field has a default so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// File name suffixes that mark declaration files.
    pub extensions: Vec<String>,
    pub cache: CacheConfig,
    /// Worker threads for classification; rayon's default when unset.
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Disk cache location; a directory under the system temp dir when unset.
    pub dir: Option<PathBuf>,
    pub max_memory_entries: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            cache: CacheConfig::default(),
            threads: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            max_memory_entries: DEFAULT_MAX_MEMORY_ENTRIES,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn without_cache(mut self) -> Self {
        self.cache.enabled = false;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: AnalyzerConfig = serde_json::from_str(r#"{"threads": 2}"#).unwrap();
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.extensions, vec![DEFAULT_EXTENSION.to_string()]);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.max_memory_entries, DEFAULT_MAX_MEMORY_ENTRIES);
    }
}
