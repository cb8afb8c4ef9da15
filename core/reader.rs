use log;
use std::fs;
use std::path::Path;

/// Reads a file as UTF-8 text. Any failure is folded into the returned text
/// so that one unreadable file never aborts an aggregation.
pub fn read_file_content(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Non-UTF-8 file: {} ({})", path.display(), e);
                read_failure_placeholder(path, &e)
            }
        },
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            read_failure_placeholder(path, &e)
        }
    }
}

pub fn read_failure_placeholder(path: &Path, reason: &dyn std::fmt::Display) -> String {
    format!("Fehler beim Lesen der Datei {}: {}", path.display(), reason)
}
