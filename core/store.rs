use crate::config::Config;
use crate::document::{Assembler, AssemblyReport, DocumentSource};
use crate::error::{AppError, Result};
use crate::output_formats::serialize_to_json_indented;
use indexmap::IndexMap;
use log;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Shortcut name to its ordered list of paths, in insertion order.
pub type Shortcuts = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Created,
    Replaced,
}

/// Serialises load-modify-save cycles of every store handle in the process.
static STORE_WRITE_LOCK: Mutex<()> = Mutex::new(());

/// JSON-file backed shortcut mapping. Every mutation is one locked
/// load-modify-save cycle and each save atomically replaces the file.
#[derive(Debug, Clone)]
pub struct ShortcutStore {
    path: PathBuf,
}

impl ShortcutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config, project_root: &Path) -> Self {
        Self::new(config.shortcuts_path(project_root))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the store; an absent file is an empty mapping.
    pub fn load(&self) -> Result<Shortcuts> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No shortcut store at {}, starting empty.", self.path.display());
                return Ok(Shortcuts::new());
            }
            Err(e) => {
                return Err(AppError::FileRead {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        serde_json::from_str(&content).map_err(|e| AppError::StoreParse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Replaces the persisted store with `shortcuts`. The JSON is written to a
    /// uniquely named temporary file beside the store and renamed over it.
    pub fn save(&self, shortcuts: &Shortcuts) -> Result<()> {
        let text = serialize_to_json_indented(shortcuts)?;
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| AppError::DirCreation {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
                parent
            }
            None => Path::new("."),
        };

        let write_err = |source: std::io::Error| AppError::FileWrite {
            path: self.path.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(text.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        log::debug!(
            "Saved {} shortcuts to {}",
            shortcuts.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Creates or overwrites `name`. Overwriting replaces the path list entirely.
    pub fn add(&self, name: &str, paths: Vec<String>) -> Result<AddOutcome> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "Shortcut name must not be empty".to_string(),
            ));
        }
        self.mutate(|shortcuts| {
            let outcome = match shortcuts.insert(name.to_string(), paths) {
                Some(_) => {
                    log::info!("Shortcut '{}' already existed and was overwritten.", name);
                    AddOutcome::Replaced
                }
                None => AddOutcome::Created,
            };
            Ok(outcome)
        })
    }

    /// Deletes `name`; fails with `NotFound` and leaves the file untouched if absent.
    pub fn remove(&self, name: &str) -> Result<Vec<String>> {
        self.mutate(|shortcuts| {
            shortcuts
                .shift_remove(name)
                .ok_or_else(|| AppError::shortcut_not_found(name))
        })
    }

    pub fn list(&self) -> Result<Shortcuts> {
        self.load()
    }

    pub fn get(&self, name: &str) -> Result<Vec<String>> {
        self.load()?
            .shift_remove(name)
            .ok_or_else(|| AppError::shortcut_not_found(name))
    }

    /// Combines the files behind `name` into `output`. The output is not
    /// touched when the shortcut does not exist.
    pub fn use_shortcut(
        &self,
        name: &str,
        output: &Path,
        include_tree: bool,
        assembler: &Assembler,
        config: &Config,
    ) -> Result<AssemblyReport> {
        let stored = self.get(name)?;
        let paths: Vec<String> = stored.iter().map(|p| config.expand_path(p)).collect();
        log::debug!("Using shortcut '{}' with paths {:?}", name, paths);
        assembler.combine(DocumentSource::Shortcut(name), &paths, output, include_tree)
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut Shortcuts) -> Result<T>) -> Result<T> {
        // The guarded state is the file on disk, so a poisoned lock is still usable.
        let _guard = STORE_WRITE_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut shortcuts = self.load()?;
        let result = apply(&mut shortcuts)?;
        self.save(&shortcuts)?;
        Ok(result)
    }
}
