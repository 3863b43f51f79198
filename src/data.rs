use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CatalogReadError, PlayError},
    settings::{Settings, SettingsPatch},
};

/// Data structure which defines all relevant data about any particular game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// File name of the archive, without the `.swf` extension
    pub id: String,
    pub title: String,
    pub file_path: PathBuf,
    /// Either `<id>.png` next to the archive, or the placeholder cover
    pub cover_path: PathBuf,
    pub categories: Vec<String>,
}

/// Result type for a single catalog scan
pub type CatalogResult = Result<Vec<Game>, CatalogReadError>;

/// One complete, immutable result of a catalog scan
pub type Catalog = Arc<[Game]>;

/// How the visible games are laid out
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ViewMode::Grid => "grid",
                ViewMode::List => "list",
            }
        )
    }
}

/// Commands a front end (window, CLI, ...) uses to talk to the games library.
///
/// None of these panic: catalog failures are logged and degrade to an empty catalog, and launch
/// failures are handed back for the front end to show to the user.
pub trait GamesLibrary {
    fn get_catalog(&self) -> Catalog;
    fn play_game(&self, game_id: &str) -> Result<(), PlayError>;
    /// Same as [`GamesLibrary::get_catalog`], but also notifies any subscribed views
    fn refresh_catalog(&self) -> Catalog;
    fn get_settings(&self) -> &Settings;
    fn save_settings(&mut self, patch: SettingsPatch) -> bool;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_view_mode_toggle() {
        assert_eq!(ViewMode::Grid.toggle(), ViewMode::List);
        assert_eq!(ViewMode::List.toggle(), ViewMode::Grid);
        assert_eq!(ViewMode::Grid.toggle().toggle(), ViewMode::Grid);
    }

    #[test]
    fn test_game_serializes_camel_case() -> Result<(), serde_json::Error> {
        let game = Game {
            id: "a".into(),
            title: "Alpha".into(),
            file_path: "/games/a.swf".into(),
            cover_path: "/games/a.png".into(),
            categories: vec!["Action".into()],
        };

        let value = serde_json::to_value(&game)?;
        assert_eq!(
            value,
            serde_json::json!({
                "id": "a",
                "title": "Alpha",
                "filePath": "/games/a.swf",
                "coverPath": "/games/a.png",
                "categories": ["Action"],
            })
        );

        Ok(())
    }

    #[test]
    fn test_view_mode_serde() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&ViewMode::List)?, "\"list\"");
        assert_eq!(serde_json::from_str::<ViewMode>("\"grid\"")?, ViewMode::Grid);
        assert_eq!(ViewMode::List.to_string(), "list");
        Ok(())
    }
}
