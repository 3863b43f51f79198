use std::{ffi::OsStr, path::Path, process::Command};

/// Returns a std::process::Command which runs the given executable with the given arguments
pub fn get_launch_command<I, S>(executable: &Path, args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(executable);
    command.args(args);

    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_launch_command() {
        let command = get_launch_command(Path::new("/opt/ruffle/ruffle"), ["/games/a.swf"]);

        assert_eq!(command.get_program(), "/opt/ruffle/ruffle");
        assert_eq!(command.get_args().collect::<Vec<_>>(), ["/games/a.swf"]);
    }
}
