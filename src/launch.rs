use std::path::Path;

use tracing::{debug, error, info};

use crate::{
    catalog::CatalogBuilder,
    data::Game,
    error::PlayError,
    macros::logs::debug_path,
    utils::get_launch_command,
};

const COMPONENT: &str = "Launch";

/// Rebuild the catalog from `builder` and start the game with the given ID in the emulator
///
/// The catalog is always rebuilt, so a game which has been removed since the caller's last scan is
/// reported as not found.
#[tracing::instrument(level = "trace")]
pub fn launch(game_id: &str, builder: &CatalogBuilder, emulator: &Path) -> Result<(), PlayError> {
    let catalog = builder.build()?;
    launch_from_catalog(game_id, &catalog, emulator)
}

/// Start the game with the given ID from an already built catalog
pub fn launch_from_catalog(
    game_id: &str,
    catalog: &[Game],
    emulator: &Path,
) -> Result<(), PlayError> {
    let game = catalog
        .iter()
        .find(|g| g.id == game_id)
        .ok_or_else(|| PlayError::GameNotFound(game_id.to_owned()))?;

    spawn_emulator(emulator, &game.file_path)
}

/// Spawn the emulator with the archive as its only argument
///
/// The child process is not waited on: only a failure to start it is reported.
fn spawn_emulator(emulator: &Path, path_archive: &Path) -> Result<(), PlayError> {
    debug_path!("emulator", emulator);

    if !emulator.exists() {
        error!("{COMPONENT} - emulator not found at {emulator:?}");
        return Err(PlayError::EmulatorMissing(emulator.to_path_buf()));
    }

    let mut command = get_launch_command(emulator, [path_archive]);
    debug!("{COMPONENT} - launch command: {command:?}");

    let child = command.spawn().map_err(|source| {
        error!("{COMPONENT} - failed to start {path_archive:?}: {source}");
        PlayError::Launch {
            path: emulator.to_path_buf(),
            source,
        }
    })?;

    info!(
        "{COMPONENT} - started {path_archive:?} (pid {})",
        child.id()
    );

    Ok(())
}
