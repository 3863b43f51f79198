//! User settings, stored as a JSON file in the user's config directory.
//!
//! Settings are a plain value: they are loaded once at startup and replaced wholesale whenever a
//! [`SettingsPatch`] is saved.

use std::{
    fs::{create_dir_all, read_to_string, write},
    io,
    path::{Path, PathBuf},
};

use cfg_if::cfg_if;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::{data::ViewMode, error::SettingsError};

const APP_DIR_NAME: &str = "swf-library";
const SETTINGS_FILE_NAME: &str = "settings.json";

cfg_if! {
    if #[cfg(target_os = "windows")] {
        const RUFFLE_EXECUTABLE: &str = "ruffle.exe";
    } else {
        const RUFFLE_EXECUTABLE: &str = "ruffle";
    }
}

/// Directory holding the application's own files: the bundled emulator, the default games folder
/// and the placeholder cover art
pub fn get_app_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
}

/// Default location of the settings file
pub fn get_default_settings_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(get_app_dir)
        .join(SETTINGS_FILE_NAME)
}

fn get_default_ruffle_path() -> PathBuf {
    get_app_dir().join("ruffle").join(RUFFLE_EXECUTABLE)
}

fn get_default_games_folder() -> PathBuf {
    get_app_dir().join("games")
}

/// Cover art used for games which don't have a `<id>.png` of their own
pub fn get_placeholder_cover_path() -> PathBuf {
    get_app_dir().join("assets").join("default-cover.png")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Path to the Ruffle executable
    pub ruffle_path: PathBuf,
    /// Folder scanned for `.swf` games
    pub games_folder: PathBuf,
    pub dark_mode: bool,
    pub default_view: ViewMode,
    pub auto_refresh: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ruffle_path: get_default_ruffle_path(),
            games_folder: get_default_games_folder(),
            dark_mode: false,
            default_view: ViewMode::Grid,
            auto_refresh: true,
        }
    }
}

/// Partial update to [`Settings`] - any `None` field keeps its current value
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub ruffle_path: Option<PathBuf>,
    pub games_folder: Option<PathBuf>,
    pub dark_mode: Option<bool>,
    pub default_view: Option<ViewMode>,
    pub auto_refresh: Option<bool>,
}

impl Settings {
    /// Parse settings from a JSON string, with defaults for any missing or `null` keys
    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        let patch: SettingsPatch = serde_json::from_str(content)?;
        Ok(Self::default().merged(patch))
    }

    /// Ruffle executable to use, falling back to the default when the setting is empty
    pub fn ruffle_path(&self) -> PathBuf {
        if self.ruffle_path.as_os_str().is_empty() {
            get_default_ruffle_path()
        } else {
            self.ruffle_path.clone()
        }
    }

    /// Games folder to scan, falling back to the default when the setting is empty
    pub fn games_folder(&self) -> PathBuf {
        if self.games_folder.as_os_str().is_empty() {
            get_default_games_folder()
        } else {
            self.games_folder.clone()
        }
    }

    /// Read settings from the given file
    ///
    /// A missing file is not an error: the default settings are returned instead.
    #[tracing::instrument(level = "trace")]
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        match read_to_string(path) {
            Ok(content) => Self::from_json(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Settings - no settings file at {path:?}, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Same as [`Settings::read`], but logs any error and falls back to the defaults
    pub fn load(path: &Path) -> Self {
        Self::read(path).unwrap_or_else(|e| {
            error!("Settings - error loading settings from {path:?}: {e}");
            Self::default()
        })
    }

    /// Write settings to the given file as pretty-printed JSON, creating parent dirs as needed
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        write(path, content)?;

        trace!("Settings - saved to {path:?}");
        Ok(())
    }

    /// Returns new settings with every field set in the patch replaced
    pub fn merged(&self, patch: SettingsPatch) -> Self {
        let SettingsPatch {
            ruffle_path,
            games_folder,
            dark_mode,
            default_view,
            auto_refresh,
        } = patch;

        Self {
            ruffle_path: ruffle_path.unwrap_or_else(|| self.ruffle_path.clone()),
            games_folder: games_folder.unwrap_or_else(|| self.games_folder.clone()),
            dark_mode: dark_mode.unwrap_or(self.dark_mode),
            default_view: default_view.unwrap_or(self.default_view),
            auto_refresh: auto_refresh.unwrap_or(self.auto_refresh),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults_for_missing_keys() -> Result<(), SettingsError> {
        let settings = Settings::from_json(r#"{ "gamesFolder": "/srv/games", "unknown": 1 }"#)?;
        let defaults = Settings::default();

        assert_eq!(settings.games_folder, PathBuf::from("/srv/games"));
        assert_eq!(settings.ruffle_path, defaults.ruffle_path);
        assert!(!settings.dark_mode);
        assert_eq!(settings.default_view, ViewMode::Grid);
        assert!(settings.auto_refresh);

        Ok(())
    }

    #[test]
    fn test_null_keys_use_defaults() -> Result<(), SettingsError> {
        let settings = Settings::from_json(
            r#"{ "rufflePath": null, "gamesFolder": "/srv/games", "darkMode": true }"#,
        )?;

        assert_eq!(settings.ruffle_path, Settings::default().ruffle_path);
        assert_eq!(settings.games_folder, PathBuf::from("/srv/games"));
        assert!(settings.dark_mode);

        Ok(())
    }

    #[test]
    fn test_empty_paths_fall_back_to_defaults() {
        let defaults = Settings::default();
        let settings = defaults.merged(SettingsPatch {
            ruffle_path: Some(PathBuf::new()),
            games_folder: Some(PathBuf::new()),
            ..Default::default()
        });

        // Stored as given, but never used as an empty path
        assert_eq!(settings.games_folder, PathBuf::new());
        assert_eq!(settings.games_folder(), defaults.games_folder);
        assert_eq!(settings.ruffle_path(), defaults.ruffle_path);

        let custom = defaults.merged(SettingsPatch {
            games_folder: Some("/srv/games".into()),
            ..Default::default()
        });
        assert_eq!(custom.games_folder(), PathBuf::from("/srv/games"));
    }

    #[test]
    fn test_default_paths() {
        let settings = Settings::default();

        assert!(settings.games_folder.ends_with("games"));
        assert!(settings.ruffle_path.ends_with(RUFFLE_EXECUTABLE));
        assert!(get_placeholder_cover_path().ends_with("assets/default-cover.png"));
        assert!(get_default_settings_path().ends_with(SETTINGS_FILE_NAME));
    }

    #[test]
    fn test_read_missing_file_gives_defaults() -> Result<(), SettingsError> {
        let dir = tempdir()?;
        let settings = Settings::read(&dir.path().join(SETTINGS_FILE_NAME))?;

        assert_eq!(settings, Settings::default());
        Ok(())
    }

    #[test]
    fn test_load_malformed_file_gives_defaults() -> Result<(), SettingsError> {
        let dir = tempdir()?;
        let path = dir.path().join(SETTINGS_FILE_NAME);
        write(&path, "{ not json")?;

        assert!(matches!(Settings::read(&path), Err(SettingsError::Json(_))));
        assert_eq!(Settings::load(&path), Settings::default());
        Ok(())
    }

    #[test]
    fn test_save_then_read() -> Result<(), SettingsError> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(SETTINGS_FILE_NAME);

        let settings = Settings {
            ruffle_path: "/usr/bin/ruffle".into(),
            games_folder: "/srv/games".into(),
            dark_mode: true,
            default_view: ViewMode::List,
            auto_refresh: false,
        };
        settings.save(&path)?;

        let content = read_to_string(&path)?;
        assert!(content.contains("\"rufflePath\""));
        assert!(content.contains("\"defaultView\": \"list\""));
        assert_eq!(Settings::read(&path)?, settings);

        Ok(())
    }

    #[test]
    fn test_merged_keeps_unset_fields() {
        let settings = Settings::default();
        let merged = settings.merged(SettingsPatch {
            dark_mode: Some(true),
            default_view: Some(ViewMode::List),
            ..Default::default()
        });

        assert!(merged.dark_mode);
        assert_eq!(merged.default_view, ViewMode::List);
        assert_eq!(merged.ruffle_path, settings.ruffle_path);
        assert_eq!(merged.games_folder, settings.games_folder);
        assert_eq!(merged.auto_refresh, settings.auto_refresh);
    }

    #[test]
    fn test_patch_from_partial_json() -> Result<(), serde_json::Error> {
        let patch: SettingsPatch = serde_json::from_str(r#"{ "autoRefresh": false }"#)?;

        assert_eq!(
            patch,
            SettingsPatch {
                auto_refresh: Some(false),
                ..Default::default()
            }
        );
        Ok(())
    }
}
