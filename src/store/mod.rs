mod playlist;
mod state;

pub use playlist::{decode_playlist, encode_playlist};

use crate::{
    CONFIG_FILE, DATA_DIRECTORY, LOG_FILE, PLAYLIST_FILE, STATE_FILE,
    error::{OsOp, OsResultExt, Result, SetupError},
};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

/// The per-user data directory holding the playlist, resume state, config and log.
#[derive(Clone, Debug)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Resolve the data directory, honouring an explicit override.
    ///
    /// `$HOME` must be set either way.
    pub fn locate(override_dir: Option<PathBuf>) -> Result<PathBuf> {
        let home = env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .ok_or(SetupError::MissingHome)?;

        Ok(match override_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .unwrap_or_else(|| home.join(".local").join("share"))
                .join(DATA_DIRECTORY),
        })
    }

    /// Open the store, creating the directory if it does not exist yet.
    pub fn open(dir: PathBuf) -> Result<Self> {
        if let Err(source) = fs::create_dir_all(&dir) {
            return Err(SetupError::CreateDataDir { path: dir, source }.into());
        }
        Ok(Store { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn playlist_path(&self) -> PathBuf {
        self.dir.join(PLAYLIST_FILE)
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }
}

/// Truncate, write and sync `path`, tagging each step with its own failure kind.
fn overwrite(path: &Path, bytes: &[u8], [open, write, sync]: [OsOp; 3]) -> Result<()> {
    let mut file = File::create(path).os(open)?;
    file.write_all(bytes).os(write)?;
    file.sync_all().os(sync)?;
    Ok(())
}
