//! Read and edit individual slate.toml settings.
//!
//! `slt config set` rewrites the file through `toml_edit`, so comments
//! and layout the user put there survive.

use std::fs;
use std::path::{Path, PathBuf};

use toml_edit::DocumentMut;

use crate::io::store;

const CONFIG_FILE: &str = "slate.toml";

const KNOWN_KEYS: &[&str] = &["hour_height", "day_start", "show_key_hints"];

/// Error type for config get/set
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown config key: {0} (known: hour_height, day_start, show_key_hints)")]
    UnknownKey(String),
    #[error("invalid value for {key}: {value} ({hint})")]
    InvalidValue {
        key: String,
        value: String,
        hint: &'static str,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Read one `[ui]` setting, rendered as a string.
pub fn get_value(data_dir: &Path, key: &str) -> Result<String, ConfigError> {
    let doc = read_document(data_dir)?;
    let value = doc
        .get("ui")
        .and_then(|ui| ui.get(key))
        .map(|item| item.to_string());
    match value {
        Some(v) => Ok(v.trim().to_string()),
        None if KNOWN_KEYS.contains(&key) => Ok(default_for(key).to_string()),
        None => Err(ConfigError::UnknownKey(key.to_string())),
    }
}

/// Set one `[ui]` setting, preserving the rest of the file verbatim.
pub fn set_value(data_dir: &Path, key: &str, value: &str) -> Result<(), ConfigError> {
    let item = parse_value(key, value)?;

    let mut doc = read_document(data_dir)?;
    if doc.get("ui").is_none() {
        doc["ui"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["ui"][key] = item;

    store::write_atomic(&data_dir.join(CONFIG_FILE), &doc.to_string())?;
    Ok(())
}

fn read_document(data_dir: &Path) -> Result<DocumentMut, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    content.parse().map_err(|e: toml_edit::TomlError| {
        ConfigError::Parse {
            path,
            message: e.to_string(),
        }
    })
}

fn default_for(key: &str) -> &'static str {
    match key {
        "hour_height" => "2",
        "day_start" => "6",
        "show_key_hints" => "false",
        _ => unreachable!("key checked against KNOWN_KEYS"),
    }
}

fn parse_value(key: &str, value: &str) -> Result<toml_edit::Item, ConfigError> {
    let invalid = |hint| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        hint,
    };
    match key {
        "hour_height" => {
            let n: i64 = value.parse().map_err(|_| invalid("expected 1-6"))?;
            if !(1..=6).contains(&n) {
                return Err(invalid("expected 1-6"));
            }
            Ok(toml_edit::value(n))
        }
        "day_start" => {
            let n: i64 = value.parse().map_err(|_| invalid("expected 0-23"))?;
            if !(0..24).contains(&n) {
                return Err(invalid("expected 0-23"));
            }
            Ok(toml_edit::value(n))
        }
        "show_key_hints" => {
            let b: bool = value.parse().map_err(|_| invalid("expected true or false"))?;
            Ok(toml_edit::value(b))
        }
        _ => Err(ConfigError::UnknownKey(key.to_string())),
    }
}
