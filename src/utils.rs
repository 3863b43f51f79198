mod commands;
mod paths;
mod strings;

pub use commands::get_launch_command;
pub use paths::{archive_id, get_cover_path};
pub use strings::contains_ignore_case;
