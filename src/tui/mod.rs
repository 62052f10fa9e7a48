//! The single-line terminal surface: a header, one line per track and a
//! status line that is redrawn in place.

use crate::{PKG, VERSION, get_readable_duration, overwrite_line, print_line};
use ratatui::crossterm::terminal;
use std::{io, time::Duration};

pub trait Screen {
    /// Shared path prefix, printed once when the playlist loads.
    fn show_prefix(&mut self, prefix: &str) -> io::Result<()>;

    fn now_playing(&mut self, name: &str) -> io::Result<()>;

    /// `position` is 1-based.
    fn status(&mut self, position: usize, total: usize, elapsed: Duration) -> io::Result<()>;

    fn farewell(&mut self) -> io::Result<()>;
}

pub fn status_line(position: usize, total: usize, elapsed: Duration) -> String {
    let elapsed = get_readable_duration(elapsed);
    format!("{position}/{total} {elapsed} > ")
}

pub fn banner() -> String {
    format!("    ]  {PKG} v{VERSION}  [    ")
}

/// Raw-mode terminal. Leaving raw mode happens on drop, so every exit path
/// hands back a sane terminal.
pub struct Terminal {
    _private: (),
}

impl Terminal {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Terminal { _private: () })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Screen for Terminal {
    fn show_prefix(&mut self, prefix: &str) -> io::Result<()> {
        print_line(prefix)
    }

    fn now_playing(&mut self, name: &str) -> io::Result<()> {
        print_line(name)
    }

    fn status(&mut self, position: usize, total: usize, elapsed: Duration) -> io::Result<()> {
        overwrite_line(&status_line(position, total, elapsed))
    }

    fn farewell(&mut self) -> io::Result<()> {
        print_line(&banner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_format() {
        assert_eq!(status_line(1, 3, Duration::from_millis(65_400)), "1/3 1:05 > ");
        assert_eq!(status_line(12, 40, Duration::ZERO), "12/40 0:00 > ");
    }

    #[test]
    fn banner_names_the_package() {
        assert!(banner().contains(&format!("segue v{VERSION}")));
    }
}
