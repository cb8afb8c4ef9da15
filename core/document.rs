use crate::config::{Config, DocumentStrategy};
use crate::error::{AppError, Result};
use crate::gather::{Aggregation, aggregate};
use crate::reader::read_file_content;
use crate::tree::{display_name, render_tree};
use log;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const TREE_HEADER: &str = "=== Verzeichnisstruktur ===";

/// What the document was built from; only the manifest layout prints it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource<'a> {
    Shortcut(&'a str),
    Paths,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyReport {
    pub file_count: usize,
    pub output_path: PathBuf,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Builds and writes output documents using the strategy fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assembler {
    strategy: DocumentStrategy,
}

impl Assembler {
    pub fn new(strategy: DocumentStrategy) -> Self {
        Self { strategy }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.output.strategy)
    }

    pub fn strategy(&self) -> DocumentStrategy {
        self.strategy
    }

    /// Aggregates `paths`, renders the document and writes it to `output`.
    pub fn combine<S: AsRef<str>>(
        &self,
        source: DocumentSource<'_>,
        paths: &[S],
        output: &Path,
        include_tree: bool,
    ) -> Result<AssemblyReport> {
        log::debug!(
            "Assembling {} paths into {} ({:?})",
            paths.len(),
            output.display(),
            self.strategy
        );
        let (text, file_count, warnings) = match self.strategy {
            DocumentStrategy::Combined => {
                let aggregation = aggregate(paths);
                let text = assemble(paths, &aggregation, include_tree);
                let warnings = aggregation
                    .warnings
                    .into_iter()
                    .map(|w| w.message)
                    .collect();
                (text, aggregation.files.len(), warnings)
            }
            DocumentStrategy::Manifest => {
                let (text, count) = assemble_manifest(source, paths);
                (text, count, Vec::new())
            }
        };

        let output_path = write_document(output, &text)?;
        log::info!(
            "Wrote {} files into {}",
            file_count,
            output_path.display()
        );
        Ok(AssemblyReport {
            file_count,
            output_path,
            warnings,
        })
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(DocumentStrategy::default())
    }
}

/// Serializes an aggregation: the optional tree section first, then one
/// `=== Datei: <label> ===` section per file.
pub fn assemble<S: AsRef<str>>(
    paths: &[S],
    aggregation: &Aggregation,
    include_tree: bool,
) -> String {
    let mut out = String::new();

    if include_tree {
        out.push_str(TREE_HEADER);
        out.push('\n');
        for raw in paths {
            let path = Path::new(raw.as_ref());
            if path.is_dir() {
                for line in render_tree(path) {
                    out.push_str(&line);
                    out.push('\n');
                }
            } else {
                let _ = writeln!(out, "└── {}", display_name(path));
            }
        }
        out.push('\n');
    }

    for file in &aggregation.files {
        let _ = writeln!(out, "=== Datei: {} ===", file.label);
        out.push_str(&file.content);
        out.push_str("\n\n");
    }
    out
}

/// Path listing with the contents of directly named files. Returns the text
/// and the number of file sections written.
pub fn assemble_manifest<S: AsRef<str>>(
    source: DocumentSource<'_>,
    paths: &[S],
) -> (String, usize) {
    let mut out = String::new();
    match source {
        DocumentSource::Shortcut(name) => {
            let _ = writeln!(out, "=== Shortcuts '{}' verwendet ===", name);
        }
        DocumentSource::Paths => out.push_str("=== Eingabe verwendet ===\n"),
    }
    out.push_str("\nPfade:\n");

    let mut file_count = 0;
    for raw in paths {
        let raw = raw.as_ref();
        let _ = writeln!(out, "- {}", raw);
        let path = Path::new(raw);
        if path.is_file() {
            let _ = writeln!(out, "\n=== Datei: {} ===", raw);
            out.push_str(&read_file_content(path));
            out.push_str("\n\n");
            file_count += 1;
        }
    }
    (out, file_count)
}

/// Writes the document, creating missing parent directories. Returns the
/// absolute location written to.
pub fn write_document(output: &Path, text: &str) -> Result<PathBuf> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AppError::DirCreation {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(output, text).map_err(|e| AppError::FileWrite {
        path: output.to_path_buf(),
        source: e,
    })?;
    std::path::absolute(output).map_err(AppError::Io)
}
