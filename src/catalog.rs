// EXPECTED LAYOUT:
// - <games folder>/<id>.swf   - playable archive
// - <games folder>/<id>.png   - optional cover art
// - <games folder>/games.json - optional metadata sidecar
use std::{
    collections::HashMap,
    fs::{create_dir_all, read_to_string},
    io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::{
    data::{CatalogResult, Game},
    error::CatalogReadError,
    macros::logs::{debug_path, warn_no_games},
    settings::get_placeholder_cover_path,
    utils::{archive_id, get_cover_path},
};

const COMPONENT: &str = "Catalog";
const SIDECAR_FILE_NAME: &str = "games.json";

/// Metadata for a single game, as given in the `games.json` sidecar
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SidecarEntry {
    title: Option<String>,
    categories: Option<Vec<String>>,
}

/// Raw sidecar mapping - entries are only decoded when a game with that ID is found
type Sidecar = HashMap<String, Value>;

/// Build a catalog of all games in the given folder, using the default placeholder cover
///
/// See [`CatalogBuilder::build`].
pub fn build_catalog(folder: impl Into<PathBuf>) -> CatalogResult {
    CatalogBuilder::new(folder, get_placeholder_cover_path()).build()
}

/// Scans a games folder and joins the archives found against the folder's metadata sidecar
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    path_folder: PathBuf,
    path_sidecar: PathBuf,
    path_placeholder_cover: PathBuf,
}

impl CatalogBuilder {
    pub fn new(folder: impl Into<PathBuf>, placeholder_cover: impl Into<PathBuf>) -> Self {
        let path_folder = folder.into();
        let path_sidecar = path_folder.join(SIDECAR_FILE_NAME);

        debug_path!("games folder", path_folder);
        debug_path!("metadata sidecar", path_sidecar);

        Self {
            path_folder,
            path_sidecar,
            path_placeholder_cover: placeholder_cover.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.path_folder
    }

    /// Read the sidecar, if there is one
    ///
    /// Invalid JSON is an error for the whole catalog, not just for the affected entries.
    #[tracing::instrument(level = "trace")]
    fn parse_sidecar(&self) -> Result<Sidecar, CatalogReadError> {
        let content = match read_to_string(&self.path_sidecar) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{COMPONENT} - no {SIDECAR_FILE_NAME} found, using default metadata");
                return Ok(Sidecar::new());
            }
            Err(source) => {
                return Err(CatalogReadError::ReadSidecar {
                    path: self.path_sidecar.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| CatalogReadError::ParseSidecar {
            path: self.path_sidecar.clone(),
            source,
        })
    }

    /// Decode the sidecar entry for a single game
    ///
    /// A missing or `null` entry, or one which isn't an object, gives the default metadata. An
    /// object with wrongly typed fields is an error.
    fn take_sidecar_entry(
        &self,
        sidecar: &mut Sidecar,
        id: &str,
    ) -> Result<SidecarEntry, CatalogReadError> {
        match sidecar.remove(id) {
            Some(value @ Value::Object(_)) => {
                serde_json::from_value(value).map_err(|source| CatalogReadError::ParseSidecar {
                    path: self.path_sidecar.clone(),
                    source,
                })
            }
            None | Some(Value::Null) => Ok(SidecarEntry::default()),
            Some(other) => {
                warn!("{COMPONENT} - ignoring metadata for '{id}' which is not an object: {other}");
                Ok(SidecarEntry::default())
            }
        }
    }

    /// File names of all archives in the games folder, in the order the filesystem lists them
    #[tracing::instrument(level = "trace")]
    fn list_archives(&self) -> Result<Vec<String>, CatalogReadError> {
        let mut file_names = Vec::new();

        for entry in WalkDir::new(&self.path_folder).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| CatalogReadError::ReadDir {
                path: self.path_folder.clone(),
                source: io::Error::from(e),
            })?;

            let Some(file_name) = entry.file_name().to_str() else {
                trace!("{COMPONENT} - skipping non UTF-8 file name {:?}", entry.file_name());
                continue;
            };

            if archive_id(file_name).is_some() && entry.path().is_file() {
                file_names.push(file_name.to_owned());
            }
        }

        trace!("{COMPONENT} - archives found: {file_names:?}");
        Ok(file_names)
    }

    /// Build a fresh catalog snapshot
    ///
    /// If the games folder doesn't exist yet, it is created and an empty catalog is returned.
    /// Nothing is cached: every call re-reads the folder and the sidecar.
    #[tracing::instrument(level = "trace")]
    pub fn build(&self) -> CatalogResult {
        if !self.path_folder.is_dir() {
            debug!(
                "{COMPONENT} - games folder {:?} not found, creating it",
                self.path_folder
            );

            create_dir_all(&self.path_folder).map_err(|source| CatalogReadError::CreateDir {
                path: self.path_folder.clone(),
                source,
            })?;

            return Ok(Vec::new());
        }

        let mut sidecar = self.parse_sidecar()?;
        let archives = self.list_archives()?;

        if archives.is_empty() {
            warn_no_games!(self.path_folder);
        }

        let games = archives
            .into_iter()
            .filter_map(|file_name| Some((archive_id(&file_name)?.to_owned(), file_name)))
            .map(|(id, file_name)| {
                let file_path = self.path_folder.join(&file_name);

                let cover_path = get_cover_path(&self.path_folder, &id);
                trace!("{COMPONENT} - cover for '{id}': {cover_path:?}");

                let SidecarEntry { title, categories } =
                    self.take_sidecar_entry(&mut sidecar, &id)?;

                Ok(Game {
                    title: title.filter(|t| !t.is_empty()).unwrap_or_else(|| id.clone()),
                    categories: categories.unwrap_or_default(),
                    cover_path: cover_path
                        .unwrap_or_else(|| self.path_placeholder_cover.clone()),
                    file_path,
                    id,
                })
            })
            .collect::<CatalogResult>()?;

        debug!("{COMPONENT} - {} games found", games.len());
        Ok(games)
    }
}
