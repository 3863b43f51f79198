use std::path::{Path, PathBuf};

/// Extension (without the leading dot) identifying a playable archive
pub const ARCHIVE_EXTENSION: &str = "swf";

/// Returns an Option containing the given `PathBuf`, if the `PathBuf` points to an actual file
pub fn some_if_file(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

/// Returns the game ID for an archive file name, or `None` if the name isn't a `.swf` archive
///
/// e.g. `my_game.swf` gives `my_game`. Matching is on the literal, case-sensitive suffix. A file
/// named just `.swf` has nothing to strip, so its ID is the whole name.
pub fn archive_id(file_name: &str) -> Option<&str> {
    let stem = file_name
        .strip_suffix(ARCHIVE_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))?;

    Some(if stem.is_empty() { file_name } else { stem })
}

/// Returns the path to `<id>.png` in the given directory, if that file exists
pub fn get_cover_path(base_path: &Path, id: &str) -> Option<PathBuf> {
    some_if_file(base_path.join(format!("{id}.png")))
}

#[cfg(test)]
mod tests {
    use std::fs::{File, create_dir};

    use tempfile::tempdir;
    use test_case::test_case;

    use super::*;

    #[test_case("game.swf", Some("game"))]
    #[test_case("my.long.name.swf", Some("my.long.name"))]
    #[test_case(".swf", Some(".swf"); "extension only")]
    #[test_case("game.SWF", None)]
    #[test_case("game.swf.png", None)]
    #[test_case("gameswf", None)]
    #[test_case("games.json", None)]
    fn test_archive_id(file_name: &str, expected: Option<&str>) {
        assert_eq!(archive_id(file_name), expected);
    }

    #[test]
    fn test_get_cover_path() -> std::io::Result<()> {
        let base = PathBuf::new();
        assert_eq!(get_cover_path(&base, "does_not_exist"), None);

        let dir = tempdir()?;
        File::create(dir.path().join("alpha.png"))?;
        create_dir(dir.path().join("beta.png"))?;

        assert_eq!(
            get_cover_path(dir.path(), "alpha"),
            Some(dir.path().join("alpha.png"))
        );
        // Only files count as cover art
        assert_eq!(get_cover_path(dir.path(), "beta"), None);
        assert_eq!(get_cover_path(dir.path(), "gamma"), None);

        Ok(())
    }
}
