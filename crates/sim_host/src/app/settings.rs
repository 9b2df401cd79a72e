use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const SETTINGS_VERSION: u32 = 1;

/// Persisted config-variable values, written on every `writeconfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SettingsFile {
    pub(crate) settings_version: u32,
    #[serde(default)]
    pub(crate) cvars: BTreeMap<String, bool>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            settings_version: SETTINGS_VERSION,
            cvars: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("settings {path} have version {found}; expected {expected}")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads persisted settings. A missing file means "nothing saved yet".
pub(crate) fn load_settings(path: &Path) -> Result<SettingsFile, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Ok(SettingsFile::default())
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let settings: SettingsFile =
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    if settings.settings_version != SETTINGS_VERSION {
        return Err(SettingsError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: settings.settings_version,
            expected: SETTINGS_VERSION,
        });
    }
    Ok(settings)
}

pub(crate) fn save_settings(path: &Path, settings: &SettingsFile) -> Result<(), SettingsError> {
    let mut text = serde_json::to_string_pretty(settings).map_err(SettingsError::Encode)?;
    text.push('\n');
    replace_atomically(path, &text).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// Readers never see a half-written file: write a sibling, then rename over.
fn replace_atomically(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    fs::write(&staging, text)?;
    if let Err(error) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(error);
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "settings.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load_settings(&dir.path().join("input_logger.json")).expect("settings");
        assert_eq!(settings, SettingsFile::default());
    }

    #[test]
    fn saved_values_load_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("input_logger.json");
        let mut settings = SettingsFile::default();
        settings.cvars.insert("enabled".to_string(), false);

        save_settings(&path, &settings).expect("save");

        assert_eq!(load_settings(&path).expect("load"), settings);
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn saving_twice_replaces_previous_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input_logger.json");
        let mut settings = SettingsFile::default();
        settings.cvars.insert("enabled".to_string(), false);
        save_settings(&path, &settings).expect("first save");
        settings.cvars.insert("enabled".to_string(), true);
        save_settings(&path, &settings).expect("second save");

        assert!(load_settings(&path).expect("load").cvars["enabled"]);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input_logger.json");
        fs::write(&path, "{ not json").expect("write");
        assert!(matches!(
            load_settings(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn future_version_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input_logger.json");
        fs::write(&path, r#"{ "settings_version": 9, "cvars": {} }"#).expect("write");
        assert!(matches!(
            load_settings(&path),
            Err(SettingsError::UnsupportedVersion { found: 9, .. })
        ));
    }

    #[test]
    fn staging_file_sits_next_to_target() {
        assert_eq!(
            staging_path(Path::new("cfg/input_logger.json")),
            PathBuf::from("cfg/input_logger.json.tmp")
        );
    }
}
