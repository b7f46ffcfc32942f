pub mod cache;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::TypeDeclaration;

/// Declaration model of one source file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeclarationFile {
    /// Source file the declarations were extracted from.
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

impl DeclarationFile {
    /// Stamps every type with the source path, falling back to the
    /// declaration file itself. Types that already carry a path keep it.
    fn stamp_paths(&mut self, declaration_path: &Path) {
        let path = self
            .source
            .clone()
            .unwrap_or_else(|| declaration_path.to_path_buf());
        for decl in &mut self.types {
            if decl.file_path.is_none() {
                decl.file_path = Some(path.clone());
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid declaration file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("declaration cache entry {path} is unusable: {source}")]
    Cache {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;

pub trait DeclarationSource {
    fn load_file(&self, file_path: &Path) -> LoadResult<DeclarationFile>;
}

/// Reads JSON declaration files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationLoader;

impl DeclarationLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_str(&self, content: &str, file_path: &Path) -> LoadResult<DeclarationFile> {
        let mut file: DeclarationFile =
            serde_json::from_str(content).map_err(|source| LoadError::Json {
                path: file_path.to_path_buf(),
                source,
            })?;
        file.stamp_paths(file_path);
        Ok(file)
    }

    fn read_file(&self, file_path: &Path) -> std::io::Result<String> {
        let file = File::open(file_path)?;
        let file_size = file.metadata()?.len() as usize;

        let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
        let mut content = String::with_capacity(file_size);
        reader.read_to_string(&mut content)?;
        Ok(content)
    }
}

impl DeclarationSource for DeclarationLoader {
    fn load_file(&self, file_path: &Path) -> LoadResult<DeclarationFile> {
        let content = self.read_file(file_path).map_err(|source| LoadError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;
        self.parse_str(&content, file_path)
    }
}
