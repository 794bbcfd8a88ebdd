//! Resolution of configured catalog locations into concrete catalog files
//!
//! A catalog entry may name a file directly or a directory. Directories are
//! scanned (non-recursively) for files with a supported extension, in sorted
//! order so that later files deterministically override earlier ones.

use std::fs;
use std::path::{Path, PathBuf};

/// File extensions a tool catalog may use
pub const CATALOG_EXTENSIONS: &[&str] = &["toml", "json", "yaml", "yml"];

/// Error type for catalog path resolution
#[derive(Debug, Clone)]
pub enum CatalogPathError {
    /// The configured path does not exist
    NotFound(PathBuf),
    /// A file was named explicitly but its extension is not a catalog format
    UnsupportedExtension(PathBuf),
    /// A directory could not be listed
    Unreadable(String),
}

impl std::fmt::Display for CatalogPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogPathError::NotFound(path) => {
                write!(f, "Catalog path not found: {}", path.display())
            }
            CatalogPathError::UnsupportedExtension(path) => write!(
                f,
                "Unsupported catalog format: {} (expected one of {})",
                path.display(),
                CATALOG_EXTENSIONS.join(", ")
            ),
            CatalogPathError::Unreadable(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CatalogPathError {}

fn has_catalog_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            CATALOG_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Expand catalog entries into the list of catalog files to load
pub fn resolve_catalog_files(entries: &[PathBuf]) -> Result<Vec<PathBuf>, CatalogPathError> {
    let mut files = Vec::new();

    for entry in entries {
        if entry.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(entry)
                .map_err(|e| {
                    CatalogPathError::Unreadable(format!(
                        "Failed to read catalog directory {}: {}",
                        entry.display(),
                        e
                    ))
                })?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_file() && has_catalog_extension(p))
                .collect();
            found.sort();
            files.extend(found);
        } else if entry.is_file() {
            if !has_catalog_extension(entry) {
                return Err(CatalogPathError::UnsupportedExtension(entry.clone()));
            }
            files.push(entry.clone());
        } else {
            return Err(CatalogPathError::NotFound(entry.clone()));
        }
    }

    Ok(files)
}
