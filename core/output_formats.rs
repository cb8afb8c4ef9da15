use crate::error::{AppError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::HashSet;
use std::ffi::OsStr;

#[derive(Debug, Default, Deserialize)]
pub struct IgnoredDirs {
    #[serde(default)]
    pub dirs: Vec<String>,
}

static IGNORED_DIRS: Lazy<HashSet<String>> = Lazy::new(|| {
    let yaml_content = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../data/ignored_dirs.yaml"
    ));
    let parsed: IgnoredDirs =
        serde_yml::from_str(yaml_content).expect("Failed to parse embedded data/ignored_dirs.yaml");
    parsed.dirs.into_iter().collect()
});

/// Directory names that are never rendered or traversed.
pub fn get_ignored_dirs() -> &'static HashSet<String> {
    &IGNORED_DIRS
}

pub fn is_ignored_name(name: &OsStr) -> bool {
    name.to_str()
        .is_some_and(|n| get_ignored_dirs().contains(n))
}

pub fn serialize_to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).map_err(AppError::JsonSerialize)
    } else {
        serde_json::to_string(value).map_err(AppError::JsonSerialize)
    }
}

/// Pretty JSON with a four-space indent, the layout the shortcut store is kept in.
pub fn serialize_to_json_indented<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn serialize_to_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_yml::to_string(value).map_err(AppError::YamlError)
}
