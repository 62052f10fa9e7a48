use super::{Store, overwrite};
use crate::{
    domain::PlaybackState,
    error::{OsOp, OsResultExt, Result},
};
use std::{fs, io::ErrorKind};
use tracing::info;

impl Store {
    /// Read the resume checkpoint, or the default state if none was ever written.
    pub fn load_state(&self) -> Result<PlaybackState> {
        match fs::read(self.state_path()) {
            Ok(bytes) => Ok(PlaybackState::from_bytes(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(PlaybackState::default()),
            Err(e) => Err(e).os(OsOp::StateRead),
        }
    }

    pub fn save_state(&self, state: &PlaybackState) -> Result<()> {
        overwrite(
            &self.state_path(),
            &state.to_bytes(),
            [OsOp::StateWriteOpen, OsOp::StateWrite, OsOp::StateWriteSync],
        )?;

        info!(
            position = state.position,
            offset_secs = state.offset_secs,
            "state saved"
        );
        Ok(())
    }
}
