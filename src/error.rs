//! Error types for segue
//!
//! Two families: setup errors, raised before any role is launched, and OS
//! operation failures, each tagged with the operation that failed. Both are
//! fatal. A renderer that exits on its own is a third, separate fatal case.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Exit status shared by every setup error.
pub const SETUP_EXIT_CODE: u8 = 64;

/// Exit status used when the renderer dies mid-run.
pub const RENDERER_EXIT_CODE: u8 = 1;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("$HOME unset. Environment appears faulty.")]
    MissingHome,

    #[error("Playlist is empty. Run segue with a list of files as argument to generate it.")]
    EmptyPlaylist,

    #[error("Playlist file is corrupt at byte {offset}: {reason}")]
    CorruptPlaylist { offset: usize, reason: &'static str },

    #[error("State file is corrupt: expected {expected} bytes, found {found}")]
    CorruptState { expected: usize, found: usize },

    #[error("Could not create data directory {}: {source}", path.display())]
    CreateDataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0:#}")]
    Config(anyhow::Error),
}

/// The OS-level operation that failed. Each kind maps to its own exit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OsOp {
    Pipe,
    SpawnRenderer,
    SpawnDecoder,
    SpawnKeyReader,
    SpawnTicker,
    WaitChild,
    ResolveTrack,
    PlaylistWriteOpen,
    PlaylistWrite,
    PlaylistWriteSync,
    PlaylistRead,
    StateWriteOpen,
    StateWrite,
    StateWriteSync,
    StateRead,
    LogOpen,
    Terminal,
    EventChannel,
}

impl OsOp {
    pub const ALL: [OsOp; 18] = [
        OsOp::Pipe,
        OsOp::SpawnRenderer,
        OsOp::SpawnDecoder,
        OsOp::SpawnKeyReader,
        OsOp::SpawnTicker,
        OsOp::WaitChild,
        OsOp::ResolveTrack,
        OsOp::PlaylistWriteOpen,
        OsOp::PlaylistWrite,
        OsOp::PlaylistWriteSync,
        OsOp::PlaylistRead,
        OsOp::StateWriteOpen,
        OsOp::StateWrite,
        OsOp::StateWriteSync,
        OsOp::StateRead,
        OsOp::LogOpen,
        OsOp::Terminal,
        OsOp::EventChannel,
    ];

    #[rustfmt::skip]
    pub fn name(self) -> &'static str {
        match self {
            OsOp::Pipe              => "pipe()",
            OsOp::SpawnRenderer     => "spawn(renderer)",
            OsOp::SpawnDecoder      => "spawn(decoder)",
            OsOp::SpawnKeyReader    => "spawn(key reader)",
            OsOp::SpawnTicker       => "spawn(ticker)",
            OsOp::WaitChild         => "wait(child)",
            OsOp::ResolveTrack      => "realpath(track)",
            OsOp::PlaylistWriteOpen => "open(playlist,write)",
            OsOp::PlaylistWrite     => "write(playlist)",
            OsOp::PlaylistWriteSync => "sync(playlist)",
            OsOp::PlaylistRead      => "read(playlist)",
            OsOp::StateWriteOpen    => "open(state,write)",
            OsOp::StateWrite        => "write(state)",
            OsOp::StateWriteSync    => "sync(state)",
            OsOp::StateRead         => "read(state)",
            OsOp::LogOpen           => "open(log)",
            OsOp::Terminal          => "terminal",
            OsOp::EventChannel      => "recv(events)",
        }
    }

    /// Stable exit status for this failure kind, starting at 2.
    pub fn exit_code(self) -> u8 {
        // 0 is success and 1 belongs to the renderer
        Self::ALL
            .iter()
            .position(|op| *op == self)
            .map_or(u8::MAX, |idx| idx as u8 + 2)
    }
}

#[derive(Error, Debug)]
pub enum SegueError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("{} failed: {source}", op.name())]
    Os {
        op: OsOp,
        #[source]
        source: io::Error,
    },

    #[error("Renderer exited ({status}). Output is gone, RIP.")]
    RendererDied { status: String },
}

impl SegueError {
    pub fn os(op: OsOp, source: io::Error) -> Self {
        SegueError::Os { op, source }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            SegueError::Setup(_) => SETUP_EXIT_CODE,
            SegueError::Os { op, .. } => op.exit_code(),
            SegueError::RendererDied { .. } => RENDERER_EXIT_CODE,
        }
    }
}

pub type Result<T> = std::result::Result<T, SegueError>;

/// Tags an `io::Result` with the operation it came from.
pub trait OsResultExt<T> {
    fn os(self, op: OsOp) -> Result<T>;
}

impl<T> OsResultExt<T> for io::Result<T> {
    fn os(self, op: OsOp) -> Result<T> {
        self.map_err(|source| SegueError::os(op, source))
    }
}
