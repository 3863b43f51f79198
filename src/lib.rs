//! A Rust library for cataloguing a folder of Flash (`.swf`) games and launching them with the
//! [Ruffle](https://ruffle.rs) emulator.
//!
//! # Description
//!
//! This library is the core of a games launcher: it scans a games folder for `.swf` archives,
//! picks up cover art and metadata for each of them, lets a front end search and filter the
//! resulting catalog, and starts a selected game in Ruffle.
//!
//! # Games folder layout
//!
//! ```text
//! games/
//! ├── games.json      optional metadata, e.g. {"alpha": {"title": "Alpha", "categories": ["Action"]}}
//! ├── alpha.swf       the game, with ID "alpha"
//! ├── alpha.png       optional cover art
//! └── beta.swf
//! ```
//!
//! Games without an entry in `games.json` use their ID as the title and have no categories. Games
//! without a cover use a placeholder image.
//!
//! # Usage
//!
//! ```rust,no_run
//! use swf_library::{data::GamesLibrary, get_library};
//!
//! let library = get_library();
//! let catalog = library.get_catalog();
//!
//! let mut view = library.view();
//! view.set_query("alpha");
//! view.select_category(Some("Action".to_string()));
//!
//! for game in view.visible() {
//!     println!("{} ({})", game.title, game.file_path.display());
//! }
//!
//! if let Err(e) = library.play_game("alpha") {
//!     eprintln!("{}: {e}", e.title());
//! }
//! # let _ = catalog;
//! ```

pub mod catalog;
pub mod data;
pub mod error;
pub mod launch;
pub mod library;
mod macros;
pub mod settings;
mod utils;
pub mod view;

use library::SwfLibrary;

/// Primary entry point into the crate - get a [`SwfLibrary`] using the settings file in the
/// user's config directory
pub fn get_library() -> SwfLibrary {
    SwfLibrary::default()
}
