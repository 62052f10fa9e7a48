//! Recording doubles for driving the supervisor without real processes.

#![allow(dead_code)]

use crossbeam_channel::Receiver;
use segue::{
    Store,
    domain::{Playlist, ResumePoint, Track},
    player::{Role, RoleLauncher, RoleProcess, Supervisor},
    tui::Screen,
};
use std::{
    io,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use tempfile::TempDir;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Launch {
    Renderer,
    Decoder { track: PathBuf, seek: Option<u64> },
    KeyReader,
    Ticker,
}

/// Every launch the fake performed, with the stop channel it handed out.
#[derive(Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<(Launch, Receiver<()>)>>>,
}

impl Journal {
    pub fn launches(&self) -> Vec<Launch> {
        self.entries.lock().unwrap().iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn decoders(&self) -> Vec<(PathBuf, Option<u64>)> {
        self.launches()
            .into_iter()
            .filter_map(|l| match l {
                Launch::Decoder { track, seek } => Some((track, seek)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, role: Role) -> usize {
        self.launches().iter().filter(|l| role_of(l) == role).count()
    }

    /// Whether the most recent launch for `role` was asked to stop.
    pub fn last_interrupted(&self, role: Role) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(l, _)| role_of(l) == role)
            .is_some_and(|(_, stop)| !stop.is_empty())
    }
}

fn role_of(launch: &Launch) -> Role {
    match launch {
        Launch::Renderer => Role::Renderer,
        Launch::Decoder { .. } => Role::Decoder,
        Launch::KeyReader => Role::KeyReader,
        Launch::Ticker => Role::Ticker,
    }
}

pub struct FakeLauncher {
    journal: Journal,
}

impl FakeLauncher {
    fn record(&mut self, launch: Launch) -> segue::Result<RoleProcess> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let role = role_of(&launch);
        self.journal.entries.lock().unwrap().push((launch, rx));
        Ok(RoleProcess::internal(role, Some(tx)))
    }
}

impl RoleLauncher for FakeLauncher {
    fn launch_renderer(&mut self) -> segue::Result<RoleProcess> {
        self.record(Launch::Renderer)
    }

    fn launch_decoder(&mut self, track: &Track, seek_secs: Option<u64>) -> segue::Result<RoleProcess> {
        self.record(Launch::Decoder {
            track: track.path().to_path_buf(),
            seek: seek_secs,
        })
    }

    fn launch_key_reader(&mut self) -> segue::Result<RoleProcess> {
        self.record(Launch::KeyReader)
    }

    fn launch_ticker(&mut self, _anchor: Instant) -> segue::Result<RoleProcess> {
        self.record(Launch::Ticker)
    }
}

#[derive(Clone, Default)]
pub struct Output {
    pub prefix: Arc<Mutex<Vec<String>>>,
    pub tracks: Arc<Mutex<Vec<String>>>,
    pub statuses: Arc<Mutex<Vec<(usize, usize, Duration)>>>,
    pub farewells: Arc<Mutex<usize>>,
}

pub struct RecordingScreen {
    output: Output,
}

impl Screen for RecordingScreen {
    fn show_prefix(&mut self, prefix: &str) -> io::Result<()> {
        self.output.prefix.lock().unwrap().push(prefix.to_string());
        Ok(())
    }

    fn now_playing(&mut self, name: &str) -> io::Result<()> {
        self.output.tracks.lock().unwrap().push(name.to_string());
        Ok(())
    }

    fn status(&mut self, position: usize, total: usize, elapsed: Duration) -> io::Result<()> {
        self.output.statuses.lock().unwrap().push((position, total, elapsed));
        Ok(())
    }

    fn farewell(&mut self) -> io::Result<()> {
        *self.output.farewells.lock().unwrap() += 1;
        Ok(())
    }
}

pub struct Harness {
    pub supervisor: Supervisor,
    pub journal: Journal,
    pub output: Output,
    pub store: Store,
    _dir: TempDir,
}

pub fn playlist(paths: &[&str]) -> Playlist {
    Playlist::new(paths.iter().map(|p| Track::new(*p)).collect()).unwrap()
}

pub fn harness(paths: &[&str], resume: ResumePoint) -> Harness {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path().join("data")).unwrap();
    let journal = Journal::default();
    let output = Output::default();

    let supervisor = Supervisor::new(
        Box::new(FakeLauncher {
            journal: journal.clone(),
        }),
        Box::new(RecordingScreen {
            output: output.clone(),
        }),
        store.clone(),
        playlist(paths),
        resume,
    );

    Harness {
        supervisor,
        journal,
        output,
        store,
        _dir: dir,
    }
}

pub const THREE: [&str; 3] = ["/a/1.mp3", "/a/2.mp3", "/a/3.mp3"];
