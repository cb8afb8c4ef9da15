use crate::error::AppError;
use crate::output_formats::is_ignored_name;
use crate::reader::read_file_content;
use crate::tree::display_name;
use log;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Base name for directly named files; for files found inside a directory
    /// input, the path relative to that directory's parent.
    pub label: String,
    pub path: PathBuf,
    pub content: String,
}

/// An input path that was neither a regular file nor a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathWarning {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub files: Vec<FileInfo>,
    pub warnings: Vec<PathWarning>,
}

impl Aggregation {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Resolves every input path, in order, into labelled file contents.
/// Duplicates are kept: the same file reached twice is emitted twice.
pub fn aggregate<S: AsRef<str>>(paths: &[S]) -> Aggregation {
    log::debug!("Aggregating {} input paths...", paths.len());
    let mut aggregation = Aggregation::default();

    for raw in paths {
        let raw = raw.as_ref();
        let path = Path::new(raw);
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => {
                log::trace!("Reading file input: {}", path.display());
                aggregation.files.push(FileInfo {
                    label: display_name(path),
                    path: path.to_path_buf(),
                    content: read_file_content(path),
                });
            }
            Ok(meta) if meta.is_dir() => {
                let before = aggregation.files.len();
                collect_directory(path, &mut aggregation.files);
                log::debug!(
                    "Collected {} files from directory {}",
                    aggregation.files.len() - before,
                    path.display()
                );
            }
            Ok(_) => warn_skipped(&mut aggregation, raw),
            Err(e) => {
                log::debug!("Cannot stat {}: {}", raw, e);
                warn_skipped(&mut aggregation, raw)
            }
        }
    }

    log::info!(
        "Aggregation complete: {} files, {} skipped inputs.",
        aggregation.files.len(),
        aggregation.warnings.len()
    );
    aggregation
}

fn warn_skipped(aggregation: &mut Aggregation, raw: &str) {
    let message = format!("{} ist weder eine Datei noch ein Verzeichnis und wird ignoriert.", raw);
    log::info!("{}", message);
    aggregation.warnings.push(PathWarning {
        path: raw.to_string(),
        message,
    });
}

fn collect_directory(dir: &Path, files: &mut Vec<FileInfo>) {
    let root_name = dir.file_name().map(PathBuf::from);

    // Files of a directory come before its subdirectories, each group by name.
    let walker = WalkDir::new(dir)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_pruned_dir(entry));

    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping entry below {}: {}", dir.display(), AppError::from(e));
                continue;
            }
        };
        if !is_regular_file(&entry) {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            log::trace!("Skipping hidden file: {}", entry.path().display());
            continue;
        }

        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        let label = match &root_name {
            Some(name) => name.join(relative),
            None => relative.to_path_buf(),
        };
        files.push(FileInfo {
            label: label.to_string_lossy().into_owned(),
            path: entry.path().to_path_buf(),
            content: read_file_content(entry.path()),
        });
    }
}

fn is_pruned_dir(entry: &DirEntry) -> bool {
    let pruned = entry.file_type().is_dir() && is_ignored_name(entry.file_name());
    if pruned {
        log::trace!("Pruning ignored directory: {}", entry.path().display());
    }
    pruned
}

fn is_regular_file(entry: &DirEntry) -> bool {
    let ft = entry.file_type();
    ft.is_file() || (ft.is_symlink() && entry.path().is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn labels(aggregation: &Aggregation) -> Vec<&str> {
        aggregation.files.iter().map(|f| f.label.as_str()).collect()
    }

    #[test]
    fn single_file_is_labelled_by_base_name() {
        let dir = TempDir::new().unwrap();
        let file = write(dir.path(), "nested/a.txt", "hello");
        let result = aggregate(&[file.to_string_lossy()]);
        assert_eq!(result.len(), 1);
        assert_eq!(result.files[0].label, "a.txt");
        assert_eq!(result.files[0].content, "hello");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn directory_labels_keep_directory_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "proj/a.txt", "a");
        write(dir.path(), "proj/sub/b.txt", "b");
        let proj = dir.path().join("proj");

        let result = aggregate(&[proj.to_string_lossy()]);
        assert_eq!(
            labels(&result),
            vec![
                Path::new("proj").join("a.txt").to_string_lossy().into_owned(),
                Path::new("proj").join("sub").join("b.txt").to_string_lossy().into_owned(),
            ]
        );
    }

    #[test]
    fn files_precede_subdirectories_within_a_directory() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "proj/a/inner.txt", "");
        write(dir.path(), "proj/z.txt", "");
        let proj = dir.path().join("proj");

        let result = aggregate(&[proj.to_string_lossy()]);
        let names: Vec<_> = result
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["z.txt", "inner.txt"]);
    }

    #[test]
    fn ignored_directories_are_not_traversed() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "proj/a.txt", "a");
        write(dir.path(), "proj/node_modules/x.txt", "x");
        write(dir.path(), "proj/deep/__pycache__/c.pyc", "c");
        let proj = dir.path().join("proj");

        let result = aggregate(&[proj.to_string_lossy()]);
        assert_eq!(result.len(), 1);
        assert!(result.files[0].label.ends_with("a.txt"));
    }

    #[test]
    fn hidden_files_are_skipped_inside_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "proj/.env", "secret");
        write(dir.path(), "proj/visible.txt", "v");
        let proj = dir.path().join("proj");

        let result = aggregate(&[proj.to_string_lossy()]);
        assert_eq!(result.len(), 1);
        assert!(result.files[0].label.ends_with("visible.txt"));
    }

    #[test]
    fn directly_named_hidden_file_is_included() {
        let dir = TempDir::new().unwrap();
        let env = write(dir.path(), ".env", "k=v");
        let result = aggregate(&[env.to_string_lossy()]);
        assert_eq!(labels(&result), vec![".env"]);
    }

    #[test]
    fn same_directory_twice_is_duplicated_in_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "proj/a.txt", "a");
        write(dir.path(), "proj/b.txt", "b");
        let proj = dir.path().join("proj").to_string_lossy().into_owned();

        let once = aggregate(&[proj.clone()]);
        let twice = aggregate(&[proj.clone(), proj]);
        assert_eq!(twice.len(), 2 * once.len());
        assert_eq!(&twice.files[..once.len()], &once.files[..]);
        assert_eq!(&twice.files[once.len()..], &once.files[..]);
    }

    #[test]
    fn missing_path_warns_and_continues() {
        let dir = TempDir::new().unwrap();
        let file = write(dir.path(), "a.txt", "a");
        let missing = dir.path().join("missing.txt");

        let result = aggregate(&[missing.to_string_lossy(), file.to_string_lossy()]);
        assert_eq!(labels(&result), vec!["a.txt"]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, missing.to_string_lossy());
    }

    #[cfg(unix)]
    #[test]
    fn special_file_warns_and_continues() {
        let dir = TempDir::new().unwrap();
        let file = write(dir.path(), "a.txt", "a");
        let socket = dir.path().join("daemon.sock");
        let _listener = std::os::unix::net::UnixListener::bind(&socket).unwrap();

        let result = aggregate(&[socket.to_string_lossy(), file.to_string_lossy()]);
        assert_eq!(labels(&result), vec!["a.txt"]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, socket.to_string_lossy());
        assert!(result.warnings[0]
            .message
            .ends_with("ist weder eine Datei noch ein Verzeichnis und wird ignoriert."));
    }

    #[test]
    fn unreadable_file_content_is_a_placeholder() {
        let dir = TempDir::new().unwrap();
        let blob = dir.path().join("blob.bin");
        fs::write(&blob, [0xc3, 0x28]).unwrap();

        let result = aggregate(&[blob.to_string_lossy()]);
        assert_eq!(result.len(), 1);
        assert!(result.files[0].content.starts_with("Fehler beim Lesen der Datei"));
    }
}
