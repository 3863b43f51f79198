use std::fs::{File, write};

use pretty_assertions::assert_eq;
use swf_library::{
    catalog::CatalogBuilder,
    data::{Game, GamesLibrary, ViewMode},
    error::PlayError,
    library::SwfLibrary,
    settings::Settings,
    view::{apply_filters, derive_categories},
};
use tempfile::tempdir;

#[test]
fn test_library() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path_games = dir.path().join("games");

    let settings = Settings {
        ruffle_path: dir.path().join("ruffle").join("ruffle"),
        games_folder: path_games.clone(),
        ..Default::default()
    };
    let mut library = SwfLibrary::with_settings(settings, dir.path().join("settings.json"))
        .placeholder_cover("/assets/default-cover.png");

    // First run: the games folder is created
    assert!(library.get_catalog().is_empty());
    assert!(path_games.is_dir());

    File::create(path_games.join("a.swf"))?;
    File::create(path_games.join("a.png"))?;
    write(
        path_games.join("games.json"),
        r#"{"a": {"title": "Alpha", "categories": ["Action"]}}"#,
    )?;

    let mut updates = library.subscribe();
    let catalog = library.refresh_catalog();
    assert_eq!(
        catalog.to_vec(),
        vec![Game {
            id: "a".into(),
            title: "Alpha".into(),
            file_path: path_games.join("a.swf"),
            cover_path: path_games.join("a.png"),
            categories: vec!["Action".into()],
        }]
    );
    assert_eq!(updates.try_recv()?, catalog);

    assert_eq!(apply_filters(&catalog, "al", None).len(), 1);
    assert!(apply_filters(&catalog, "zz", None).is_empty());
    assert_eq!(derive_categories(&catalog), ["Action"]);

    // The emulator doesn't exist yet
    assert!(matches!(
        library.play_game("a"),
        Err(PlayError::EmulatorMissing(_))
    ));
    assert!(matches!(
        library.play_game("missing-id"),
        Err(PlayError::GameNotFound(_))
    ));

    let mut view = library.view();
    assert_eq!(view.mode(), ViewMode::Grid);
    view.select_category(Some("Action".into()));
    assert_eq!(view.visible().len(), 1);

    view.set_catalog(CatalogBuilder::new(&path_games, "/placeholder.png").build()?.into());
    assert_eq!(view.visible().len(), 1);

    Ok(())
}
