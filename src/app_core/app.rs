use super::init_logging;
use crate::{
    cli::Args,
    config::Settings,
    domain::{PlaybackState, Playlist, ResumePoint},
    error::{OsOp, OsResultExt, Result, SetupError},
    library,
    player::{ProcessLauncher, Supervisor},
    store::Store,
    tui::Terminal,
};
use tracing::info;

/// A configured run: playlist loaded, resume point decided, nothing launched yet.
pub struct Segue {
    store: Store,
    settings: Settings,
    playlist: Playlist,
    resume: ResumePoint,
}

impl Segue {
    /// Resolve the data directory, replace the playlist if tracks were given,
    /// and work out where playback starts.
    ///
    /// Every failure here happens before any role is launched.
    pub fn new(args: Args) -> Result<Self> {
        let store = Store::open(Store::locate(args.data_dir)?)?;
        init_logging(&store.log_path())?;

        let settings = Settings::load_or_default(store.config_path()).map_err(SetupError::Config)?;

        let fresh = !args.tracks.is_empty();
        if fresh {
            let tracks = library::collect_tracks(&args.tracks)?;
            if tracks.is_empty() {
                return Err(SetupError::EmptyPlaylist.into());
            }
            store.save_playlist(&tracks)?;
        }

        let playlist = store.load_playlist()?;

        // A new playlist always starts from the top
        let resume = match fresh {
            true => ResumePoint::start(),
            false => store.load_state()?.resume_point(playlist.len()),
        };

        info!(
            dir = %store.dir().display(),
            tracks = playlist.len(),
            fresh,
            ?resume,
            "session ready"
        );

        Ok(Segue {
            store,
            settings,
            playlist,
            resume,
        })
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn resume_point(&self) -> ResumePoint {
        self.resume
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Start every role and play until quit. Returns the persisted checkpoint.
    pub fn run(self) -> Result<PlaybackState> {
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        let launcher = ProcessLauncher::new(self.settings, events_tx)?;
        let terminal = Terminal::enter().os(OsOp::Terminal)?;

        let mut supervisor = Supervisor::new(
            Box::new(launcher),
            Box::new(terminal),
            self.store,
            self.playlist,
            self.resume,
        );

        supervisor.run(&events_rx)
    }
}
