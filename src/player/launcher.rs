use super::{
    ExitKind, Reaped, Role, RoleEvent, RoleLauncher, RoleProcess, decoder, key_reader, renderer,
    ticker,
};
use crate::{
    config::Settings,
    domain::Track,
    error::{OsOp, OsResultExt, Result},
};
use crossbeam_channel::Sender;
use nix::{
    errno::Errno,
    sys::{
        signal::{self, Signal},
        wait::{self, Id, WaitPidFlag},
    },
    unistd::Pid,
};
use std::{
    io::{self, PipeReader, PipeWriter},
    process::Child,
    sync::PoisonError,
    thread,
    time::Instant,
};
use tracing::{debug, info};

/// Production launcher: real child processes for the renderer and decoder,
/// threads for the key reader and ticker. Every role reports on `events`.
pub struct ProcessLauncher {
    settings: Settings,
    events: Sender<RoleEvent>,
    renderer_input: Option<PipeReader>,
    // Held for the whole run so the renderer never sees EOF between tracks
    decoder_output: PipeWriter,
}

impl ProcessLauncher {
    pub fn new(settings: Settings, events: Sender<RoleEvent>) -> Result<Self> {
        let (reader, writer) = io::pipe().os(OsOp::Pipe)?;

        Ok(ProcessLauncher {
            settings,
            events,
            renderer_input: Some(reader),
            decoder_output: writer,
        })
    }

    /// Hand `child` to a watcher thread that reports its exit.
    fn watch(&self, role: Role, mut child: Child, into_event: fn(ExitKind) -> RoleEvent) -> io::Result<RoleProcess> {
        let pid = child.id();
        let events = self.events.clone();
        let reaped = Reaped::default();
        let watcher_reaped = reaped.clone();

        let watcher = thread::Builder::new()
            .name(format!("{role}-watch"))
            .spawn(move || {
                let status = wait_for_exit(Pid::from_raw(pid as i32)).and_then(|()| {
                    let mut reaped = watcher_reaped.lock().unwrap_or_else(PoisonError::into_inner);
                    let status = child.wait();
                    *reaped = true;
                    status
                });

                let event = match status {
                    Ok(status) => into_event(ExitKind::from(status)),
                    Err(error) => RoleEvent::Fault {
                        role,
                        op: OsOp::WaitChild,
                        error,
                    },
                };
                let _ = events.send(event);
            });

        if let Err(e) = watcher {
            // Nobody would ever reap it
            let _ = signal::kill(Pid::from_raw(pid as i32), Signal::SIGKILL);
            return Err(e);
        }

        debug!(%role, pid, "launched");
        Ok(RoleProcess::external(role, pid, reaped))
    }
}

/// Block until `pid` has exited without reaping it, so the pid stays reserved.
fn wait_for_exit(pid: Pid) -> io::Result<()> {
    loop {
        match wait::waitid(Id::Pid(pid), WaitPidFlag::WEXITED | WaitPidFlag::WNOWAIT) {
            Ok(_) => return Ok(()),
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(errno.into()),
        }
    }
}

impl RoleLauncher for ProcessLauncher {
    fn launch_renderer(&mut self) -> Result<RoleProcess> {
        let input = self
            .renderer_input
            .take()
            .ok_or_else(|| io::Error::other("renderer input already handed out"))
            .os(OsOp::SpawnRenderer)?;

        let child = renderer::spawn(&self.settings, input).os(OsOp::SpawnRenderer)?;
        info!(program = %self.settings.renderer.program, "renderer started");

        self.watch(Role::Renderer, child, RoleEvent::RendererExited)
            .os(OsOp::SpawnRenderer)
    }

    fn launch_decoder(&mut self, track: &Track, seek_secs: Option<u64>) -> Result<RoleProcess> {
        let output = self.decoder_output.try_clone().os(OsOp::Pipe)?;
        let child = decoder::spawn(&self.settings, track, seek_secs, output).os(OsOp::SpawnDecoder)?;

        self.watch(Role::Decoder, child, RoleEvent::DecoderExited)
            .os(OsOp::SpawnDecoder)
    }

    fn launch_key_reader(&mut self) -> Result<RoleProcess> {
        key_reader::spawn(self.events.clone()).os(OsOp::SpawnKeyReader)?;
        Ok(RoleProcess::internal(Role::KeyReader, None))
    }

    fn launch_ticker(&mut self, anchor: Instant) -> Result<RoleProcess> {
        let stop = ticker::spawn(anchor, self.events.clone()).os(OsOp::SpawnTicker)?;
        Ok(RoleProcess::internal(Role::Ticker, Some(stop)))
    }
}
