use super::Role;
use crossbeam_channel::Sender;
use nix::{
    sys::signal::{self, Signal},
    unistd::Pid,
};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Set by a child's watcher once the pid has been reaped. The watcher holds
/// the lock while reaping, so a signal sent under the lock never reaches a
/// recycled pid.
pub type Reaped = Arc<Mutex<bool>>;

/// How a live role is asked to stop.
#[derive(Debug)]
pub enum Stopper {
    /// External process: deliver SIGINT to this pid unless it is already reaped.
    Signal { pid: Pid, reaped: Reaped },
    /// In-process role: wake it through its stop channel.
    Channel(Sender<()>),
}

/// Handle to one live role. Only the supervisor holds these.
#[derive(Debug)]
pub struct RoleProcess {
    role: Role,
    pid: Option<u32>,
    stopper: Option<Stopper>,
    stopping: bool,
}

impl RoleProcess {
    pub fn external(role: Role, pid: u32, reaped: Reaped) -> Self {
        RoleProcess {
            role,
            pid: Some(pid),
            stopper: Some(Stopper::Signal {
                pid: Pid::from_raw(pid as i32),
                reaped,
            }),
            stopping: false,
        }
    }

    /// A role run inside this process. Without a stop channel it cannot be
    /// interrupted and is simply abandoned at shutdown.
    pub fn internal(role: Role, stop: Option<Sender<()>>) -> Self {
        RoleProcess {
            role,
            pid: None,
            stopper: stop.map(Stopper::Channel),
            stopping: false,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Whether a stop was requested before the completion arrived.
    pub fn is_stopping(&self) -> bool {
        self.stopping
    }

    /// Best-effort interrupt. The role may already have exited, in which case
    /// its completion is still on its way and is handled normally.
    pub fn request_stop(&mut self) {
        if self.stopping {
            return;
        }
        self.stopping = true;

        match &self.stopper {
            Some(Stopper::Signal { pid, reaped }) => {
                let reaped = reaped.lock().unwrap_or_else(PoisonError::into_inner);
                if *reaped {
                    debug!(role = %self.role, %pid, "already reaped");
                } else if let Err(errno) = signal::kill(*pid, Signal::SIGINT) {
                    debug!(role = %self.role, %pid, %errno, "interrupt not delivered");
                }
            }
            Some(Stopper::Channel(stop)) => {
                let _ = stop.try_send(());
            }
            None => debug!(role = %self.role, "role cannot be interrupted"),
        }
    }
}
