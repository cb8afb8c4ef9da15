use crate::error::{AppError, Result};
use log;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_DIR: &str = ".cofifo";
pub const DEFAULT_CONFIG_FILENAME: &str = "cofifo.toml";
pub const DEFAULT_SHORTCUTS_FILE: &str = "shortcuts.json";
pub const DEFAULT_OUTPUT_FILE: &str = "combined.txt";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    #[serde(default = "default_shortcuts_file")]
    pub shortcuts_file: PathBuf,
    #[serde(default = "default_false")]
    pub expand_paths: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_false")]
    pub include_tree: bool,
    #[serde(default)]
    pub strategy: DocumentStrategy,
    #[serde(default = "default_output_file")]
    pub default_file: PathBuf,
}

/// How the output document is laid out. Chosen once from configuration.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStrategy {
    /// Optional tree section followed by one section per resolved file.
    #[default]
    Combined,
    /// Path listing plus the contents of directly named files, without traversal.
    Manifest,
}

fn default_false() -> bool {
    false
}
fn default_shortcuts_file() -> PathBuf {
    PathBuf::from(DEFAULT_SHORTCUTS_FILE)
}
fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            shortcuts_file: default_shortcuts_file(),
            expand_paths: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_tree: false,
            strategy: DocumentStrategy::default(),
            default_file: default_output_file(),
        }
    }
}

impl Config {
    pub fn determine_project_root(cli_project_root: Option<&PathBuf>) -> Result<PathBuf> {
        let path_str_opt = cli_project_root
            .map(|p| p.to_string_lossy().to_string())
            .or_else(|| env::var("COFIFO_PROJECT_ROOT").ok().filter(|s| !s.is_empty()));

        let path_to_resolve = match path_str_opt {
            Some(p_str) => PathBuf::from(shellexpand::tilde(&p_str).as_ref()),
            None => env::current_dir().map_err(AppError::Io)?,
        };

        path_to_resolve.canonicalize().map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to canonicalize project root '{}': {}",
                    path_to_resolve.display(),
                    e
                ),
            ))
        })
    }

    pub fn resolve_config_path(
        project_root: &Path,
        cli_config_file: Option<&String>,
        cli_disable_config: bool,
    ) -> Result<Option<PathBuf>> {
        if cli_disable_config {
            log::debug!("Config file loading disabled via CLI flag.");
            return Ok(None);
        }

        match cli_config_file {
            Some(p_str) => {
                let mut path = PathBuf::from(shellexpand::tilde(p_str).as_ref());
                if path.is_relative() {
                    path = project_root.join(path);
                }
                if !path.exists() && path.extension().is_none() {
                    path.set_extension("toml");
                }
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Specified config file not found at path: {}",
                        path.display()
                    )));
                }
                log::debug!("Using specified config file path: {}", path.display());
                Ok(Some(path))
            }
            None => {
                let default_path = Self::default_config_path(project_root);
                if default_path.exists() {
                    log::debug!("Using default config file path: {}", default_path.display());
                    Ok(Some(default_path))
                } else {
                    log::debug!(
                        "No config file specified and default not found at: {}",
                        default_path.display()
                    );
                    Ok(None)
                }
            }
        }
    }

    pub fn default_config_path(project_root: &Path) -> PathBuf {
        project_root
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILENAME)
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let toml_content = fs::read_to_string(config_path).map_err(|e| AppError::FileRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&toml_content).map_err(|e| match e {
            AppError::TomlParse(msg) => AppError::TomlParse(format!(
                "Error parsing config file '{}': {}. Check TOML syntax and structure.",
                config_path.display(),
                msg
            )),
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Config>(content).map_err(|e| AppError::TomlParse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Location of the shortcut store; relative settings resolve against the project root.
    pub fn shortcuts_path(&self, project_root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&self.general.shortcuts_file.to_string_lossy())
            .into_owned();
        let path = PathBuf::from(expanded);
        if path.is_absolute() {
            path
        } else {
            project_root.join(path)
        }
    }

    /// Expands `~` and environment variables in a stored path when enabled.
    /// Paths are used verbatim by default. Unknown variables leave the path untouched.
    pub fn expand_path(&self, raw: &str) -> String {
        if !self.general.expand_paths {
            return raw.to_string();
        }
        match shellexpand::full(raw) {
            Ok(expanded) => expanded.into_owned(),
            Err(e) => {
                log::debug!("Leaving path '{}' unexpanded: {}", raw, e);
                raw.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.general.shortcuts_file, PathBuf::from("shortcuts.json"));
        assert!(!config.output.include_tree);
        assert_eq!(config.output.strategy, DocumentStrategy::Combined);
    }

    #[test]
    fn parses_strategy_and_tree_flag() {
        let config = Config::from_toml(
            "[output]\ninclude_tree = true\nstrategy = \"manifest\"\n",
        )
        .unwrap();
        assert!(config.output.include_tree);
        assert_eq!(config.output.strategy, DocumentStrategy::Manifest);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::from_toml("[general]\nbogus = 1\n").unwrap_err();
        assert!(matches!(err, AppError::TomlParse(_)));
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = Config::default().to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), Config::default());
    }

    #[test]
    fn shortcuts_path_is_relative_to_project_root() {
        let config = Config::default();
        let root = Path::new("/work/project");
        assert_eq!(
            config.shortcuts_path(root),
            PathBuf::from("/work/project/shortcuts.json")
        );
    }

    #[test]
    fn resolve_config_path_finds_default_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::resolve_config_path(dir.path(), None, false).unwrap(), None);

        let default_path = Config::default_config_path(dir.path());
        fs::create_dir_all(default_path.parent().unwrap()).unwrap();
        fs::write(&default_path, "").unwrap();
        assert_eq!(
            Config::resolve_config_path(dir.path(), None, false).unwrap(),
            Some(default_path)
        );
        assert_eq!(Config::resolve_config_path(dir.path(), None, true).unwrap(), None);
    }

    #[test]
    fn resolve_config_path_rejects_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let missing = "nope.toml".to_string();
        let err = Config::resolve_config_path(dir.path(), Some(&missing), false).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn expand_path_respects_toggle() {
        let mut config = Config::default();
        assert!(!config.general.expand_paths);
        assert_eq!(config.expand_path("~/notes"), "~/notes");
        assert_eq!(config.expand_path("/data/$HOME/x"), "/data/$HOME/x");
        config.general.expand_paths = true;
        assert_eq!(config.expand_path("/plain/path"), "/plain/path");
        assert_eq!(config.expand_path("$COFIFO_SURELY_UNSET_VAR/x"), "$COFIFO_SURELY_UNSET_VAR/x");
    }
}
