use std::path::{Path, PathBuf};

use tokio::sync::broadcast;
use tracing::{debug, error};

use crate::{
    catalog::CatalogBuilder,
    data::{Catalog, CatalogResult, GamesLibrary},
    error::PlayError,
    launch::launch,
    settings::{Settings, SettingsPatch, get_default_settings_path, get_placeholder_cover_path},
    view::LibraryView,
};

/// Number of catalog updates a slow subscriber can fall behind by before missing some
const UPDATES_CAPACITY: usize = 16;

/// The games library for a single settings file
///
/// Owns the current [`Settings`] and builds a fresh catalog from the configured games folder
/// whenever one is requested.
#[derive(Debug)]
pub struct SwfLibrary {
    settings: Settings,
    path_settings: PathBuf,
    path_placeholder_cover: PathBuf,
    updates: broadcast::Sender<Catalog>,
}

impl SwfLibrary {
    /// Load the settings from the given file (falling back to defaults) and create the library
    pub fn new(path_settings: impl Into<PathBuf>) -> Self {
        let path_settings = path_settings.into();
        let settings = Settings::load(&path_settings);

        Self::with_settings(settings, path_settings)
    }

    pub fn with_settings(settings: Settings, path_settings: impl Into<PathBuf>) -> Self {
        let (updates, _) = broadcast::channel(UPDATES_CAPACITY);

        Self {
            settings,
            path_settings: path_settings.into(),
            path_placeholder_cover: get_placeholder_cover_path(),
            updates,
        }
    }

    /// Use a different placeholder cover for games without cover art
    pub fn placeholder_cover(mut self, path: impl Into<PathBuf>) -> Self {
        self.path_placeholder_cover = path.into();
        self
    }

    pub fn settings_path(&self) -> &Path {
        &self.path_settings
    }

    fn catalog_builder(&self) -> CatalogBuilder {
        CatalogBuilder::new(self.settings.games_folder(), &self.path_placeholder_cover)
    }

    /// Turns a failed scan into an empty catalog, after logging the error
    fn catalog_or_empty(result: CatalogResult) -> Catalog {
        match result {
            Ok(games) => games.into(),
            Err(e) => {
                error!("Error reading games: {e}");
                Catalog::from(Vec::new())
            }
        }
    }

    /// Same as [`GamesLibrary::get_catalog`], but the folder is scanned on tokio's blocking thread
    /// pool so the calling task isn't stalled
    pub async fn get_catalog_async(&self) -> Catalog {
        let builder = self.catalog_builder();

        match tokio::task::spawn_blocking(move || builder.build()).await {
            Ok(result) => Self::catalog_or_empty(result),
            Err(e) => {
                error!("Catalog scan task failed: {e}");
                Catalog::from(Vec::new())
            }
        }
    }

    /// Receive every catalog produced by [`GamesLibrary::refresh_catalog`]
    pub fn subscribe(&self) -> broadcast::Receiver<Catalog> {
        self.updates.subscribe()
    }

    /// A fresh view of the current catalog, in the default view mode from the settings
    pub fn view(&self) -> LibraryView {
        LibraryView::new(self.get_catalog(), self.settings.default_view)
    }
}

impl Default for SwfLibrary {
    fn default() -> Self {
        Self::new(get_default_settings_path())
    }
}

impl GamesLibrary for SwfLibrary {
    fn get_catalog(&self) -> Catalog {
        Self::catalog_or_empty(self.catalog_builder().build())
    }

    fn play_game(&self, game_id: &str) -> Result<(), PlayError> {
        debug!("Request to play '{game_id}'");
        launch(game_id, &self.catalog_builder(), &self.settings.ruffle_path())
    }

    fn refresh_catalog(&self) -> Catalog {
        let catalog = self.get_catalog();

        // Only fails when nobody is subscribed
        if self.updates.send(catalog.clone()).is_err() {
            debug!("No views subscribed to catalog updates");
        }

        catalog
    }

    fn get_settings(&self) -> &Settings {
        &self.settings
    }

    fn save_settings(&mut self, patch: SettingsPatch) -> bool {
        let settings = self.settings.merged(patch);

        match settings.save(&self.path_settings) {
            Ok(()) => {
                self.settings = settings;
                true
            }
            Err(e) => {
                error!("Settings - failed to save to {:?}: {e}", self.path_settings);
                false
            }
        }
    }
}
