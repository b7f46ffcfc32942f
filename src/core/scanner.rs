use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    /// The configured suffix the file matched.
    pub extension: String,
}

/// Finds declaration files under a directory by file name suffix.
pub struct FileScanner {
    extensions: Vec<String>,
}

impl FileScanner {
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions.to_vec(),
        }
    }

    /// Matching files sorted by path.
    pub fn scan_directory(&self, root_path: &Path) -> Result<Vec<FileInfo>> {
        if !root_path.is_dir() {
            anyhow::bail!("{} is not a directory", root_path.display());
        }

        let entries: Vec<_> = WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .collect();

        let mut files: Vec<FileInfo> = entries
            .par_iter()
            .filter_map(|entry| {
                let file_name = entry.file_name().to_string_lossy();
                self.extensions
                    .iter()
                    .find(|ext| file_name.len() > ext.len() && file_name.ends_with(ext.as_str()))
                    .map(|ext| FileInfo {
                        path: entry.path().to_path_buf(),
                        extension: ext.clone(),
                    })
            })
            .collect();

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}
