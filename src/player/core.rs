use super::{ExitKind, Role, RoleEvent, RoleLauncher, RoleProcess};
use crate::{
    domain::{PlaybackState, Playlist, ResumePoint},
    error::{OsOp, OsResultExt, Result, SegueError},
    key_handler::Key,
    store::Store,
    tui::Screen,
};
use crossbeam_channel::Receiver;
use std::{
    io,
    time::{Duration, Instant},
};
use tracing::{debug, error, info, warn};

/// Synthetic completions replayed once, in order, before real events are awaited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootstrapStep {
    Decoder,
    KeyReader,
    Ticker,
}

impl BootstrapStep {
    fn next(self) -> Phase {
        match self {
            BootstrapStep::Decoder => Phase::Bootstrapping(BootstrapStep::KeyReader),
            BootstrapStep::KeyReader => Phase::Bootstrapping(BootstrapStep::Ticker),
            BootstrapStep::Ticker => Phase::SteadyState,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Bootstrapping(BootstrapStep),
    SteadyState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuitReason {
    EndOfPlaylist,
    UserRequest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit(QuitReason),
}

/// What finished. Bootstrap completions carry no payload.
enum Completion {
    Renderer(ExitKind),
    Decoder(Option<ExitKind>),
    KeyReader(Option<Key>),
    Ticker,
}

/// Owns playback position, the clock anchor and every role handle. All
/// mutation happens here, between waits on the event channel.
pub struct Supervisor {
    launcher: Box<dyn RoleLauncher>,
    screen: Box<dyn Screen>,
    store: Store,
    playlist: Playlist,

    phase: Phase,
    position: i64,
    anchor: Option<Instant>,
    pending_seek: Option<u64>,

    renderer: Option<RoleProcess>,
    decoder: Option<RoleProcess>,
    key_reader: Option<RoleProcess>,
    ticker: Option<RoleProcess>,
}

impl Supervisor {
    pub fn new(
        launcher: Box<dyn RoleLauncher>,
        screen: Box<dyn Screen>,
        store: Store,
        playlist: Playlist,
        resume: ResumePoint,
    ) -> Self {
        Supervisor {
            launcher,
            screen,
            store,
            playlist,

            phase: Phase::Bootstrapping(BootstrapStep::Decoder),
            position: resume.position,
            anchor: None,
            pending_seek: resume.seek_secs,

            renderer: None,
            decoder: None,
            key_reader: None,
            ticker: None,
        }
    }

    /// Play until quit, persist the checkpoint and tear every role down.
    ///
    /// There is no timeout on the wait: a child that never exits stalls playback.
    pub fn run(&mut self, events: &Receiver<RoleEvent>) -> Result<PlaybackState> {
        match self.drive(events) {
            Ok(reason) => self.finish(reason),
            Err(e) => {
                error!("{e}");
                self.stop_all();
                Err(e)
            }
        }
    }

    fn drive(&mut self, events: &Receiver<RoleEvent>) -> Result<QuitReason> {
        if let Transition::Quit(reason) = self.start()? {
            return Ok(reason);
        }

        loop {
            let event = events
                .recv()
                .map_err(|_| io::Error::other("every role sender is gone"))
                .os(OsOp::EventChannel)?;

            if let Transition::Quit(reason) = self.handle(event)? {
                return Ok(reason);
            }
        }
    }

    /// Launch the renderer, then replay the bootstrap completions.
    pub fn start(&mut self) -> Result<Transition> {
        self.screen
            .show_prefix(&self.playlist.prefix())
            .os(OsOp::Terminal)?;
        self.renderer = Some(self.launcher.launch_renderer()?);

        while let Phase::Bootstrapping(step) = self.phase {
            self.phase = step.next();

            let completion = match step {
                BootstrapStep::Decoder => Completion::Decoder(None),
                BootstrapStep::KeyReader => Completion::KeyReader(None),
                BootstrapStep::Ticker => Completion::Ticker,
            };

            if let Transition::Quit(reason) = self.dispatch(completion)? {
                return Ok(Transition::Quit(reason));
            }
        }

        Ok(Transition::Continue)
    }

    /// Apply one real completion.
    pub fn handle(&mut self, event: RoleEvent) -> Result<Transition> {
        debug!(role = %event.role(), "completion");

        let completion = match event {
            RoleEvent::RendererExited(kind) => Completion::Renderer(kind),
            RoleEvent::DecoderExited(kind) => Completion::Decoder(Some(kind)),
            RoleEvent::KeyRead(key) => Completion::KeyReader(Some(key)),
            RoleEvent::Tick { interrupted } => {
                debug!(interrupted, "tick");
                Completion::Ticker
            }
            RoleEvent::Fault { role, op, error } => {
                error!(%role, op = op.name(), %error, "role watcher failed");
                return Err(SegueError::os(op, error));
            }
        };

        self.dispatch(completion)
    }

    #[rustfmt::skip]
    fn dispatch(&mut self, completion: Completion) -> Result<Transition> {
        match completion {
            Completion::Renderer(kind)  => self.on_renderer_exit(kind),
            Completion::Decoder(kind)   => self.on_decoder_exit(kind),
            Completion::KeyReader(key)  => self.on_key(key),
            Completion::Ticker          => self.on_tick(),
        }
    }

    fn on_renderer_exit(&mut self, kind: ExitKind) -> Result<Transition> {
        self.renderer = None;
        Err(SegueError::RendererDied {
            status: kind.to_string(),
        })
    }

    fn on_decoder_exit(&mut self, kind: Option<ExitKind>) -> Result<Transition> {
        if let (Some(done), Some(kind)) = (self.decoder.take(), kind) {
            match (done.is_stopping(), kind.is_success()) {
                (true, _) => debug!(%kind, "decoder stopped on request"),
                (false, true) => debug!("track finished"),
                (false, false) => warn!(%kind, position = self.position, "decoder failed"),
            }
        }

        self.position += 1;
        if self.position >= self.playlist.len() as i64 {
            return Ok(Transition::Quit(QuitReason::EndOfPlaylist));
        }
        if self.position < 0 {
            self.position = 0;
        }

        let idx = self.position as usize;
        let name = self.playlist.display_name(idx).unwrap_or_default();
        self.screen.now_playing(&name).os(OsOp::Terminal)?;

        let seek = self.pending_seek.take();
        let now = Instant::now();
        self.anchor = Some(match seek {
            Some(secs) => now.checked_sub(Duration::from_secs(secs)).unwrap_or(now),
            None => now,
        });

        // A tick computed against the old anchor must not race the new track
        self.request_stop(Role::Ticker);

        let track = self.playlist.tracks()[idx].clone();
        info!(position = idx, track = %track.lossy(), seek_secs = ?seek, "playing");
        self.decoder = Some(self.launcher.launch_decoder(&track, seek)?);

        Ok(Transition::Continue)
    }

    fn on_key(&mut self, key: Option<Key>) -> Result<Transition> {
        self.key_reader = None;

        match key {
            Some(Key::Quit) => return Ok(Transition::Quit(QuitReason::UserRequest)),
            Some(Key::Previous) => {
                // The decoder's completion advances by one, netting a step back
                self.position -= 2;
                self.request_stop(Role::Decoder);
            }
            Some(Key::Next) => self.request_stop(Role::Decoder),
            Some(Key::Other(c)) => debug!(key = ?c, "ignored key"),
            None => (),
        }

        self.key_reader = Some(self.launcher.launch_key_reader()?);
        Ok(Transition::Continue)
    }

    fn on_tick(&mut self) -> Result<Transition> {
        self.ticker = None;

        let anchor = *self.anchor.get_or_insert_with(Instant::now);
        self.screen
            .status(
                (self.position + 1).max(0) as usize,
                self.playlist.len(),
                anchor.elapsed(),
            )
            .os(OsOp::Terminal)?;

        self.ticker = Some(self.launcher.launch_ticker(anchor)?);
        Ok(Transition::Continue)
    }

    /// Mark `role` as stopping and interrupt it. Its completion still runs
    /// the normal transition when it arrives.
    pub fn request_stop(&mut self, role: Role) {
        if let Some(process) = self.slot(role).as_mut() {
            debug!(%role, "requesting stop");
            process.request_stop();
        }
    }

    fn slot(&mut self, role: Role) -> &mut Option<RoleProcess> {
        match role {
            Role::Renderer => &mut self.renderer,
            Role::Decoder => &mut self.decoder,
            Role::KeyReader => &mut self.key_reader,
            Role::Ticker => &mut self.ticker,
        }
    }

    fn stop_all(&mut self) {
        for role in [Role::Ticker, Role::Decoder, Role::Renderer, Role::KeyReader] {
            self.request_stop(role);
        }
    }

    /// The record to persist for a quit of the given kind.
    pub fn checkpoint(&self, reason: QuitReason) -> PlaybackState {
        let skip_in_flight = self.decoder.as_ref().is_some_and(RoleProcess::is_stopping);

        match reason {
            QuitReason::EndOfPlaylist => PlaybackState::new(self.playlist.len() as i64, 0),
            // Resume on the track the pending advance would have started
            QuitReason::UserRequest if skip_in_flight => {
                PlaybackState::new((self.position + 1).max(0), 0)
            }
            QuitReason::UserRequest => {
                let elapsed = self.anchor.map_or(0, |a| a.elapsed().as_secs() as i64);
                PlaybackState::new(self.position, elapsed)
            }
        }
    }

    /// Persist the checkpoint, interrupt every live role and say goodbye.
    pub fn finish(&mut self, reason: QuitReason) -> Result<PlaybackState> {
        let state = self.checkpoint(reason);
        info!(?reason, position = state.position, offset_secs = state.offset_secs, "quitting");

        self.store.save_state(&state)?;
        self.stop_all();
        self.screen.farewell().os(OsOp::Terminal)?;

        Ok(state)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn pending_seek(&self) -> Option<u64> {
        self.pending_seek
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Whether a live process is held for `role`.
    pub fn is_live(&self, role: Role) -> bool {
        match role {
            Role::Renderer => self.renderer.is_some(),
            Role::Decoder => self.decoder.is_some(),
            Role::KeyReader => self.key_reader.is_some(),
            Role::Ticker => self.ticker.is_some(),
        }
    }
}
