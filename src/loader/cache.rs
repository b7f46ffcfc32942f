use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use super::{DeclarationFile, LoadError, LoadResult};
use crate::config::CacheConfig;

pub const DEFAULT_MAX_MEMORY_ENTRIES: usize = 1000;

/// Loaded declarations plus the file stamp they were loaded at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedDeclarations {
    pub file: DeclarationFile,
    pub timestamp: u64,
    pub file_size: u64,
}

/// Thread-safe cache of loaded declaration files, in memory with best-effort
/// disk persistence. Entries are invalidated by modification time and size.
pub struct DeclarationCache {
    memory_cache: DashMap<PathBuf, CachedDeclarations>,
    cache_dir: Option<PathBuf>,
    max_memory_entries: usize,
}

impl DeclarationCache {
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        Self::with_capacity(cache_dir, DEFAULT_MAX_MEMORY_ENTRIES)
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        if !config.enabled {
            return Self::in_memory_only();
        }
        Self::with_capacity(config.dir.clone(), config.max_memory_entries)
    }

    fn with_capacity(cache_dir: Option<PathBuf>, max_memory_entries: usize) -> Self {
        let resolved_dir =
            cache_dir.unwrap_or_else(|| std::env::temp_dir().join("heritage_cache"));
        let cache_dir = match fs::create_dir_all(&resolved_dir) {
            Ok(()) => Some(resolved_dir),
            Err(err) => {
                tracing::warn!(
                    "failed to initialize disk cache at {}: {err}",
                    resolved_dir.display()
                );
                None
            }
        };

        Self {
            memory_cache: DashMap::with_capacity(max_memory_entries),
            cache_dir,
            max_memory_entries,
        }
    }

    /// Build an in-memory-only cache without touching the filesystem
    pub fn in_memory_only() -> Self {
        Self {
            memory_cache: DashMap::with_capacity(DEFAULT_MAX_MEMORY_ENTRIES),
            cache_dir: None,
            max_memory_entries: DEFAULT_MAX_MEMORY_ENTRIES,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.cache_dir.is_some()
    }

    /// Whether the file changed since it was cached (or was never cached).
    pub fn needs_update(&self, file_path: &Path) -> io::Result<bool> {
        let (timestamp, file_size) = file_stamp(file_path)?;

        if let Some(entry) = self.memory_cache.get(file_path) {
            return Ok(entry.timestamp != timestamp || entry.file_size != file_size);
        }

        if let Some(cache_path) = self.cache_path(file_path) {
            if cache_path.exists() {
                if let Ok(entry) = self.load_from_disk(&cache_path) {
                    return Ok(entry.timestamp != timestamp || entry.file_size != file_size);
                }
            }
        }

        Ok(true)
    }

    pub fn get(&self, file_path: &Path) -> Option<DeclarationFile> {
        if let Some(entry) = self.memory_cache.get(file_path) {
            return Some(entry.file.clone());
        }

        let cache_path = self.cache_path(file_path)?;
        let entry = self.load_from_disk(&cache_path).ok()?;
        let file = entry.file.clone();
        if self.memory_cache.len() < self.max_memory_entries {
            self.memory_cache.insert(file_path.to_path_buf(), entry);
        }
        Some(file)
    }

    pub fn store(&self, file_path: &Path, file: &DeclarationFile) -> LoadResult<()> {
        let (timestamp, file_size) = file_stamp(file_path).map_err(|source| LoadError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;

        let entry = CachedDeclarations {
            file: file.clone(),
            timestamp,
            file_size,
        };

        if self.memory_cache.len() >= self.max_memory_entries {
            let evicted = self.memory_cache.iter().next().map(|e| e.key().clone());
            if let Some(key) = evicted {
                self.memory_cache.remove(&key);
            }
        }
        self.memory_cache
            .insert(file_path.to_path_buf(), entry.clone());

        if let Some(cache_path) = self.cache_path(file_path) {
            self.store_to_disk(&cache_path, &entry)?;
        }

        Ok(())
    }

    pub fn clear(&self) -> io::Result<()> {
        self.memory_cache.clear();
        if let Some(cache_dir) = &self.cache_dir {
            if cache_dir.exists() {
                fs::remove_dir_all(cache_dir)?;
                fs::create_dir_all(cache_dir)?;
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            memory_entries: self.memory_cache.len(),
            disk_entries: self.disk_entry_count(),
        }
    }

    fn cache_path(&self, file_path: &Path) -> Option<PathBuf> {
        let cache_dir = self.cache_dir.as_ref()?;

        let mut hasher = DefaultHasher::new();
        file_path.hash(&mut hasher);
        let hash = hasher.finish();

        Some(cache_dir.join(format!("decl_{:x}.bincode", hash)))
    }

    fn load_from_disk(&self, cache_path: &Path) -> LoadResult<CachedDeclarations> {
        let data = fs::read(cache_path).map_err(|source| LoadError::Io {
            path: cache_path.to_path_buf(),
            source,
        })?;
        bincode::deserialize(&data).map_err(|source| LoadError::Cache {
            path: cache_path.to_path_buf(),
            source,
        })
    }

    fn store_to_disk(&self, cache_path: &Path, entry: &CachedDeclarations) -> LoadResult<()> {
        let data = bincode::serialize(entry).map_err(|source| LoadError::Cache {
            path: cache_path.to_path_buf(),
            source,
        })?;
        fs::write(cache_path, data).map_err(|source| LoadError::Io {
            path: cache_path.to_path_buf(),
            source,
        })
    }

    fn disk_entry_count(&self) -> usize {
        self.cache_dir
            .as_ref()
            .and_then(|dir| fs::read_dir(dir).ok())
            .map(|entries| entries.filter_map(|e| e.ok()).count())
            .unwrap_or(0)
    }
}

fn file_stamp(file_path: &Path) -> io::Result<(u64, u64)> {
    let metadata = fs::metadata(file_path)?;
    let timestamp = metadata
        .modified()?
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    Ok((timestamp, metadata.len()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub memory_entries: usize,
    pub disk_entries: usize,
}
