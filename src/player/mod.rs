mod core;
mod decoder;
mod key_reader;
mod launcher;
mod process;
mod renderer;
mod ticker;

pub use self::core::{BootstrapStep, Phase, QuitReason, Supervisor, Transition};
pub use launcher::ProcessLauncher;
pub use process::{Reaped, RoleProcess, Stopper};

use crate::{domain::Track, error::OsOp, error::Result, key_handler::Key};
use std::{fmt, io, os::unix::process::ExitStatusExt, process::ExitStatus, time::Instant};

/// The four playback responsibilities, each backed by at most one live process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Renderer,
    Decoder,
    KeyReader,
    Ticker,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Renderer => "renderer",
            Role::Decoder => "decoder",
            Role::KeyReader => "key-reader",
            Role::Ticker => "ticker",
        })
    }
}

/// How an external role process ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitKind {
    Success,
    Code(i32),
    Signal(i32),
}

impl ExitKind {
    pub fn is_success(self) -> bool {
        self == ExitKind::Success
    }
}

impl From<ExitStatus> for ExitKind {
    fn from(status: ExitStatus) -> Self {
        match (status.success(), status.code(), status.signal()) {
            (true, _, _) => ExitKind::Success,
            (false, Some(code), _) => ExitKind::Code(code),
            (false, None, Some(signal)) => ExitKind::Signal(signal),
            (false, None, None) => ExitKind::Code(-1),
        }
    }
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitKind::Success => write!(f, "success"),
            ExitKind::Code(code) => write!(f, "exit code {code}"),
            ExitKind::Signal(signal) => write!(f, "signal {signal}"),
        }
    }
}

/// Completion of a role, delivered to the supervisor over the event channel.
#[derive(Debug)]
pub enum RoleEvent {
    RendererExited(ExitKind),
    DecoderExited(ExitKind),
    KeyRead(Key),
    Tick { interrupted: bool },
    /// A role's watcher hit an OS failure and could not observe the completion.
    Fault {
        role: Role,
        op: OsOp,
        error: io::Error,
    },
}

impl RoleEvent {
    pub fn role(&self) -> Role {
        match self {
            RoleEvent::RendererExited(_) => Role::Renderer,
            RoleEvent::DecoderExited(_) => Role::Decoder,
            RoleEvent::KeyRead(_) => Role::KeyReader,
            RoleEvent::Tick { .. } => Role::Ticker,
            RoleEvent::Fault { role, .. } => *role,
        }
    }
}

/// Starts one process per role. Every launched role must eventually deliver
/// exactly one `RoleEvent` for its completion.
pub trait RoleLauncher {
    fn launch_renderer(&mut self) -> Result<RoleProcess>;

    /// `seek_secs` is only set for the first decode after a resume.
    fn launch_decoder(&mut self, track: &Track, seek_secs: Option<u64>) -> Result<RoleProcess>;

    fn launch_key_reader(&mut self) -> Result<RoleProcess>;

    /// The tick fires on the next whole second counted from `anchor`.
    fn launch_ticker(&mut self, anchor: Instant) -> Result<RoleProcess>;
}
