use std::{
    io::{Write, stderr, stdout},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use itertools::Itertools;
use swf_library::{
    data::{Game, GamesLibrary, ViewMode},
    library::SwfLibrary,
    settings::{SettingsPatch, get_default_settings_path},
    view::LibraryView,
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const GRID_COLUMNS: usize = 4;
const GRID_CELL_WIDTH: usize = 28;

#[derive(Parser)]
#[command(name = "swf-library")]
#[command(about = "Browse and launch a folder of Flash games with Ruffle", long_about = None)]
struct Cli {
    /// Settings file to use instead of the one in the user's config directory
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List games, optionally filtered by title and category
    List {
        /// Only show games whose title contains this text (ignoring case)
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only show games in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Layout to use, defaults to the one in the settings
        #[arg(short, long)]
        view: Option<ViewArg>,

        /// Print the visible games as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all categories used by the games
    Categories,
    /// Start a game in Ruffle
    Play {
        /// ID of the game, i.e. its file name without `.swf`
        id: String,
    },
    /// Rescan the games folder and print the number of games found
    Refresh,
    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the current settings as JSON
    Show,
    /// Change one or more settings
    Set {
        #[arg(long)]
        ruffle_path: Option<PathBuf>,
        #[arg(long)]
        games_folder: Option<PathBuf>,
        #[arg(long)]
        dark_mode: Option<bool>,
        #[arg(long)]
        default_view: Option<ViewArg>,
        #[arg(long)]
        auto_refresh: Option<bool>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Grid,
    List,
}

impl From<ViewArg> for ViewMode {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Grid => ViewMode::Grid,
            ViewArg::List => ViewMode::List,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .without_time()
                .with_writer(stderr)
                // Don't output colours for logs not being printed to a terminal
                .with_ansi(stderr().is_terminal()),
        )
        .with(EnvFilter::from_default_env())
        .init();
}

fn print_grid(out: &mut impl Write, games: &[Game]) -> std::io::Result<()> {
    for row in &games.iter().chunks(GRID_COLUMNS) {
        let line = row
            .map(|game| {
                let title: String = game.title.chars().take(GRID_CELL_WIDTH - 2).collect();
                format!("{title:<GRID_CELL_WIDTH$}")
            })
            .join("");
        writeln!(out, "{}", line.trim_end())?;
    }

    Ok(())
}

fn print_list(out: &mut impl Write, games: &[Game]) -> std::io::Result<()> {
    for game in games {
        writeln!(out, "{}\t{}", game.id, game.title)?;
        if !game.categories.is_empty() {
            writeln!(out, "\tcategories: {}", game.categories.join(", "))?;
        }
        writeln!(out, "\tfile: {}", game.file_path.display())?;
        writeln!(out, "\tcover: {}", game.cover_path.display())?;
    }

    Ok(())
}

fn print_view(view: &LibraryView, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = stdout().lock();
    let games = view.visible();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(games)?)?;
        return Ok(());
    }

    if games.is_empty() {
        writeln!(out, "No games found.")?;
        return Ok(());
    }

    match view.mode() {
        ViewMode::Grid => print_grid(&mut out, games)?,
        ViewMode::List => print_list(&mut out, games)?,
    }

    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let path_settings = cli.settings.unwrap_or_else(get_default_settings_path);
    debug!("Using settings file {path_settings:?}");

    let mut library = SwfLibrary::new(path_settings);

    match cli.command {
        Command::List {
            query,
            category,
            view,
            json,
        } => {
            let mut library_view = library.view();
            library_view.set_query(query);
            library_view.select_category(category);
            if view.is_some_and(|v| ViewMode::from(v) != library_view.mode()) {
                library_view.toggle_view_mode();
            }

            print_view(&library_view, json)?;
        }
        Command::Categories => {
            let view = library.view();
            let mut out = stdout().lock();
            for category in view.categories() {
                writeln!(out, "{category}")?;
            }
        }
        Command::Play { id } => {
            if let Err(e) = library.play_game(&id) {
                eprintln!("{}: {e}", e.title());
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Refresh => {
            let catalog = library.refresh_catalog();
            println!(
                "{} games found in {}",
                catalog.len(),
                library.get_settings().games_folder().display()
            );
        }
        Command::Settings(SettingsCommand::Show) => {
            println!("{}", serde_json::to_string_pretty(library.get_settings())?);
        }
        Command::Settings(SettingsCommand::Set {
            ruffle_path,
            games_folder,
            dark_mode,
            default_view,
            auto_refresh,
        }) => {
            let patch = SettingsPatch {
                ruffle_path,
                games_folder,
                dark_mode,
                default_view: default_view.map(ViewMode::from),
                auto_refresh,
            };

            if !library.save_settings(patch) {
                eprintln!(
                    "Could not save settings to {}",
                    library.settings_path().display()
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
