use crate::error::{AppError, Result};
use crate::tree::{NodeKind, display_name};
use log;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseEntry {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BrowseResult {
    Directory {
        path: PathBuf,
        entries: Vec<BrowseEntry>,
    },
    File {
        path: PathBuf,
        name: String,
        #[serde(rename = "type")]
        kind: NodeKind,
        size: u64,
    },
}

/// Describes a path for interactive path picking: the visible children of a
/// directory, or the size of a file.
pub fn browse(path: &Path) -> Result<BrowseResult> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::path_not_found(path.display().to_string()));
        }
        Err(e) => {
            return Err(AppError::FileRead {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if !meta.is_dir() {
        return Ok(BrowseResult::File {
            path: path.to_path_buf(),
            name: display_name(path),
            kind: NodeKind::File,
            size: meta.len(),
        });
    }

    let listing = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    let mut entries = Vec::new();
    for entry in listing {
        let entry = match entry {
            Ok(entry) => entry,
            // The directory itself could not be listed.
            Err(e) if e.depth() == 0 => return Err(AppError::from(e)),
            Err(e) => {
                log::warn!("Skipping entry in {}: {}", path.display(), AppError::from(e));
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let full_path = entry.into_path();
        let kind = if full_path.is_dir() {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        entries.push(BrowseEntry {
            name,
            path: full_path,
            kind,
        });
    }

    Ok(BrowseResult::Directory {
        path: path.to_path_buf(),
        entries,
    })
}
