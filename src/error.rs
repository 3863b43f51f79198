//! Error types used by this crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Error returned when the catalog folder or its `games.json` sidecar can't be read.
#[derive(Error, Debug)]
pub enum CatalogReadError {
    /// The catalog folder did not exist and could not be created
    #[error("failed to create games folder {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    /// The catalog folder, or one of its entries, could not be read
    #[error("failed to read games folder {path:?}: {source}")]
    ReadDir { path: PathBuf, source: io::Error },

    /// The sidecar exists but could not be read
    #[error("failed to read metadata file {path:?}: {source}")]
    ReadSidecar { path: PathBuf, source: io::Error },

    /// The sidecar is not a valid metadata mapping
    #[error("failed to parse metadata file {path:?}: {source}")]
    ParseSidecar {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Error returned when a game can't be started.
#[derive(Error, Debug)]
pub enum PlayError {
    /// The catalog could not be rebuilt before looking up the game
    #[error(transparent)]
    Catalog(#[from] CatalogReadError),

    /// No game with the requested ID exists in a freshly built catalog
    #[error("game with ID '{0}' not found")]
    GameNotFound(String),

    /// The configured emulator executable does not exist
    #[error(
        "the Ruffle emulator was not found at {0:?}; check that it is installed or set the correct path in the settings"
    )]
    EmulatorMissing(PathBuf),

    /// The OS refused to start the emulator process
    #[error("could not start the game with {path:?}: {source}")]
    Launch { path: PathBuf, source: io::Error },
}

impl PlayError {
    /// Short heading for showing this error to the user, e.g. in a dialog box
    pub fn title(&self) -> &'static str {
        match self {
            PlayError::EmulatorMissing(_) => "Ruffle not found",
            PlayError::GameNotFound(_) => "Game not found",
            PlayError::Catalog(_) | PlayError::Launch { .. } => "Error starting the game",
        }
    }
}

/// Error returned when loading or saving the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Error originating from [`io::Error`]
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Error originating from [`serde_json::Error`]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
