use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for segue
#[derive(Parser, Debug, Default)]
#[command(name = "segue")]
#[command(about = "Plays a playlist through an external decoder and renderer")]
#[command(after_help = "Keys while playing: N next, P previous, Q quit")]
#[command(version)]
pub struct Args {
    /// Files or directories making up a new playlist. Omit to resume the stored one
    pub tracks: Vec<PathBuf>,

    /// Directory holding the playlist, resume state, config and log
    #[arg(long, env = "SEGUE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}
