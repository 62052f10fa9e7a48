use ratatui::crossterm::{
    ExecutableCommand,
    cursor::MoveToColumn,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::{
    io::{self, Write},
    time::Duration,
};

pub mod app_core;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod key_handler;
pub mod library;
pub mod player;
pub mod store;
pub mod tui;

pub use error::{OsOp, Result, SegueError, SetupError};
pub use store::Store;

pub const PKG: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DATA_DIRECTORY: &str = "segue";
pub const PLAYLIST_FILE: &str = "playlist";
pub const STATE_FILE: &str = "state";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_FILE: &str = "segue.log";

/// `m:ss`, with minutes left unbounded.
pub fn get_readable_duration(duration: Duration) -> String {
    let mut secs = duration.as_secs();
    let mins = secs / 60;
    secs %= 60;

    format!("{mins}:{secs:02}")
}

/// Replace the current terminal line with `message`.
pub fn overwrite_line(message: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout
        .execute(MoveToColumn(0))?
        .execute(Clear(ClearType::CurrentLine))?
        .execute(Print(message))?;
    stdout.flush()
}

/// Replace the current line with `message` and move below it.
///
/// Raw mode turns off output post-processing, so the carriage return is explicit.
pub fn print_line(message: &str) -> io::Result<()> {
    overwrite_line(&format!("{message}\r\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_duration() {
        assert_eq!(get_readable_duration(Duration::from_secs(0)), "0:00");
        assert_eq!(get_readable_duration(Duration::from_millis(61_900)), "1:01");
        assert_eq!(get_readable_duration(Duration::from_secs(3_725)), "62:05");
    }
}
