//! Turning files on disk into batch entries.
//!
//! Two paths exist. Files picked one by one carry no directory structure and
//! no rename capability. A directory scan walks the tree and hands out a
//! [`WritableHandle`](crate::record::WritableHandle) for every file found.

use crate::record::FileSource;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("file name is not valid UTF-8: {}", .0.display())]
    NonUtf8Name(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A file ready to become a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    pub name: String,
    /// Path relative to the import root, `/`-separated
    pub relative_path: String,
    pub source: FileSource,
}

/// Import individually chosen files. Each becomes a flat, read-only entry.
pub fn import_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ImportedFile>, ImportError> {
    paths.iter().map(|p| import_path(p.as_ref())).collect()
}

fn import_path(path: &Path) -> Result<ImportedFile, ImportError> {
    let metadata = std::fs::metadata(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(ImportError::NotAFile(path.to_path_buf()));
    }

    let name = file_name(path)?;
    Ok(ImportedFile {
        relative_path: name.clone(),
        name,
        source: FileSource::detached(path),
    })
}

/// Recursive enumeration of a directory, in file-name order.
///
/// Files and directories whose name starts with `.` are skipped. The scan is
/// lazy; dropping it part way abandons the rest of the tree.
pub struct DirectoryScan {
    root: PathBuf,
    walker: walkdir::FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
}

pub fn scan_directory(root: &Path) -> Result<DirectoryScan, ImportError> {
    let root = root.canonicalize().map_err(|source| ImportError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    if !root.is_dir() {
        return Err(ImportError::NotADirectory(root));
    }

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(is_visible as fn(&DirEntry) -> bool);

    Ok(DirectoryScan { root, walker })
}

impl Iterator for DirectoryScan {
    type Item = Result<ImportedFile, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };
            if !entry.file_type().is_file() {
                if !entry.file_type().is_dir() {
                    log::debug!("skipping non-file entry {}", entry.path().display());
                }
                continue;
            }
            return Some(self.to_imported(&entry));
        }
    }
}

impl DirectoryScan {
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn to_imported(&self, entry: &DirEntry) -> Result<ImportedFile, ImportError> {
        let path = entry.path();
        let name = file_name(path)?;
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        Ok(ImportedFile {
            name,
            relative_path: to_slash_path(relative)?,
            source: FileSource::writable(path),
        })
    }
}

fn is_visible(entry: &DirEntry) -> bool {
    !entry.file_name().to_string_lossy().starts_with('.')
}

fn file_name(path: &Path) -> Result<String, ImportError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| ImportError::NonUtf8Name(path.to_path_buf()))
}

fn to_slash_path(relative: &Path) -> Result<String, ImportError> {
    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part
                .to_str()
                .ok_or_else(|| ImportError::NonUtf8Name(relative.to_path_buf()))?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}
