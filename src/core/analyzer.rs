use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{DeclarationIndex, FileScanner, MarkerDirective, MarkerKind, RelationshipClassifier};
use crate::config::AnalyzerConfig;
use crate::loader::{cache::DeclarationCache, DeclarationLoader, DeclarationSource};

/// Markers for the declarations of one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMarkers {
    pub path: Option<PathBuf>,
    pub markers: Vec<MarkerDirective>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Declaration files loaded, or distinct source files when classifying
    /// an existing index.
    pub files: usize,
    pub types: usize,
    pub markers: usize,
    pub by_kind: BTreeMap<MarkerKind, usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub files: Vec<FileMarkers>,
    pub stats: AnalysisStats,
}

impl AnalysisReport {
    pub fn markers(&self) -> impl Iterator<Item = &MarkerDirective> {
        self.files.iter().flat_map(|f| f.markers.iter())
    }

    /// Markers anchored on `owner` (a type, or members declared in it).
    pub fn markers_for<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a MarkerDirective> {
        self.markers().filter(move |m| m.anchor.owner == owner)
    }
}

/// Loads declaration files from a directory and computes markers for every
/// type they declare.
pub struct MarkerAnalyzer {
    config: AnalyzerConfig,
    file_scanner: FileScanner,
    loader: DeclarationLoader,
    cache: DeclarationCache,
}

impl MarkerAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            file_scanner: FileScanner::new(&config.extensions),
            loader: DeclarationLoader::new(),
            cache: DeclarationCache::from_config(&config.cache),
            config,
        }
    }

    pub fn analyze(&self, root_path: &Path) -> Result<AnalysisReport> {
        let (index, file_count) = self.load_index(root_path)?;
        let mut report = self.analyze_index(&index)?;
        report.stats.files = file_count;
        Ok(report)
    }

    /// Builds an index from every declaration file under `root_path`.
    /// Returns the index and the number of files loaded.
    pub fn load_index(&self, root_path: &Path) -> Result<(DeclarationIndex, usize)> {
        let files = self
            .file_scanner
            .scan_directory(root_path)
            .with_context(|| format!("failed to scan {}", root_path.display()))?;
        tracing::info!("found {} declaration files", files.len());

        let index = DeclarationIndex::new();
        let mut loaded = 0usize;
        let mut cached = 0usize;

        for file_info in &files {
            let path = &file_info.path;
            let declarations = match self.cache.needs_update(path) {
                Ok(false) => self.cache.get(path).inspect(|_| cached += 1),
                Ok(true) => None,
                Err(err) => {
                    tracing::warn!("failed to validate cache entry for {}: {err}", path.display());
                    None
                }
            };

            let declarations = match declarations {
                Some(declarations) => declarations,
                None => match self.loader.load_file(path) {
                    Ok(declarations) => {
                        if let Err(err) = self.cache.store(path, &declarations) {
                            tracing::warn!("failed to cache {}: {err}", path.display());
                        }
                        declarations
                    }
                    Err(err) => {
                        tracing::warn!("skipping {}: {err}", path.display());
                        continue;
                    }
                },
            };

            for decl in declarations.types {
                let name = decl.qualified_name.clone();
                if index.insert(decl).is_some() {
                    tracing::warn!("{name} declared more than once; keeping the last declaration");
                }
            }
            loaded += 1;
        }

        tracing::info!(
            "indexed {} types from {} files ({} from cache)",
            index.len(),
            loaded,
            cached
        );
        Ok((index, loaded))
    }

    /// Classifies every indexed type, in parallel.
    pub fn analyze_index(&self, index: &DeclarationIndex) -> Result<AnalysisReport> {
        match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .context("failed to build classification thread pool")?;
                Ok(pool.install(|| classify_all(index)))
            }
            None => Ok(classify_all(index)),
        }
    }
}

impl Default for MarkerAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

fn classify_all(index: &DeclarationIndex) -> AnalysisReport {
    let types = index.types();
    let classifier = RelationshipClassifier::new(index, index);

    let mut per_type: Vec<(Option<PathBuf>, Vec<MarkerDirective>)> = types
        .par_iter()
        .map(|decl| (decl.file_path.clone(), classifier.classify(decl)))
        .collect();

    let mut stats = AnalysisStats {
        types: types.len(),
        ..AnalysisStats::default()
    };

    // Stable: declaration order is kept within a file.
    per_type.sort_by(|a, b| a.0.cmp(&b.0));

    let mut files: Vec<FileMarkers> = Vec::new();
    for (path, markers) in per_type {
        if markers.is_empty() {
            continue;
        }
        for marker in &markers {
            *stats.by_kind.entry(marker.kind).or_insert(0) += 1;
        }
        stats.markers += markers.len();

        match files.last_mut() {
            Some(last) if last.path == path => last.markers.extend(markers),
            _ => files.push(FileMarkers { path, markers }),
        }
    }

    let mut paths: Vec<&Option<PathBuf>> = types.iter().map(|t| &t.file_path).collect();
    paths.sort();
    paths.dedup();
    stats.files = paths.len();

    AnalysisReport { files, stats }
}
