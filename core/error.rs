use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("TOML Parsing Error: {0}")]
    TomlParse(String),

    #[error("TOML Serialization Error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON Serialization Error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("YAML Parsing/Serialization Error: {0}")]
    YamlError(#[from] serde_yml::Error),

    #[error("Shortcut store '{path}' is not valid JSON: {message}")]
    StoreParse { path: PathBuf, message: String },

    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File Read Error: Path '{path}', Error: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Write Error: Path '{path}', Error: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory Creation Error: Path '{path}', Error: {source}")]
    DirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("WalkDir Error: {0}")]
    WalkDir(String),

    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),
}

impl AppError {
    pub fn shortcut_not_found(name: impl Into<String>) -> Self {
        AppError::NotFound {
            kind: "Shortcut",
            name: name.into(),
        }
    }

    pub fn path_not_found(path: impl Into<String>) -> Self {
        AppError::NotFound {
            kind: "Path",
            name: path.into(),
        }
    }

    /// True for the "name or path does not exist" class, as opposed to I/O failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}

impl From<walkdir::Error> for AppError {
    fn from(err: walkdir::Error) -> Self {
        AppError::WalkDir(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn walk_failures_convert_to_walkdir_variant() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let walk_err = walkdir::WalkDir::new(&missing)
            .into_iter()
            .find_map(|entry| entry.err())
            .unwrap();

        let err = AppError::from(walk_err);
        assert!(matches!(err, AppError::WalkDir(_)));
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("WalkDir Error: "));
    }

    #[test]
    fn not_found_helpers_name_the_kind() {
        assert_eq!(
            AppError::shortcut_not_found("proj").to_string(),
            AppError::NotFound {
                kind: "Shortcut",
                name: "proj".into()
            }
            .to_string()
        );
        assert!(AppError::path_not_found("/nope").is_not_found());
    }
}
