use super::{Store, overwrite};
use crate::{
    domain::{Playlist, Track},
    error::{OsOp, OsResultExt, Result, SetupError},
};
use std::{fs, io::ErrorKind};
use tracing::{debug, info};

/// Concatenate every path, each terminated by a NUL byte.
pub fn encode_playlist(tracks: &[Track]) -> Vec<u8> {
    let len = tracks.iter().map(|t| t.as_bytes().len() + 1).sum();
    let mut buf = Vec::with_capacity(len);

    for track in tracks {
        buf.extend_from_slice(track.as_bytes());
        buf.push(0);
    }
    buf
}

/// Split a playlist file back into tracks.
///
/// A missing terminator on the final entry is tolerated; empty or relative
/// entries are not.
pub fn decode_playlist(bytes: &[u8]) -> std::result::Result<Vec<Track>, SetupError> {
    let mut tracks = Vec::new();
    let mut offset = 0;

    for entry in bytes.split(|b| *b == 0) {
        let start = offset;
        offset += entry.len() + 1;

        if entry.is_empty() {
            // Only the tail after the last terminator may be empty
            if offset > bytes.len() {
                break;
            }
            return Err(SetupError::CorruptPlaylist {
                offset: start,
                reason: "empty entry",
            });
        }

        let track = Track::from_bytes(entry);
        if !track.path().is_absolute() {
            return Err(SetupError::CorruptPlaylist {
                offset: start,
                reason: "relative path",
            });
        }
        tracks.push(track);
    }

    Ok(tracks)
}

impl Store {
    /// Replace the stored playlist. Callers pass canonical, absolute paths.
    pub fn save_playlist(&self, tracks: &[Track]) -> Result<()> {
        overwrite(
            &self.playlist_path(),
            &encode_playlist(tracks),
            [
                OsOp::PlaylistWriteOpen,
                OsOp::PlaylistWrite,
                OsOp::PlaylistWriteSync,
            ],
        )?;

        info!(tracks = tracks.len(), "playlist saved");
        Ok(())
    }

    pub fn load_playlist(&self) -> Result<Playlist> {
        let bytes = match fs::read(self.playlist_path()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(SetupError::EmptyPlaylist.into()),
            Err(e) => return Err(e).os(OsOp::PlaylistRead),
        };

        let playlist = Playlist::new(decode_playlist(&bytes)?)?;
        debug!(tracks = playlist.len(), prefix_len = playlist.prefix_len(), "playlist loaded");

        Ok(playlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(paths: &[&str]) -> Vec<Track> {
        paths.iter().map(|p| Track::new(*p)).collect()
    }

    #[test]
    fn entries_are_nul_terminated() {
        let bytes = encode_playlist(&tracks(&["/a/1.mp3", "/b.ogg"]));
        assert_eq!(bytes, b"/a/1.mp3\0/b.ogg\0");
    }

    #[test]
    fn decode_recovers_entries() {
        let decoded = decode_playlist(b"/a/1.mp3\0/a/2.mp3\0/a/3.mp3\0").unwrap();
        assert_eq!(decoded, tracks(&["/a/1.mp3", "/a/2.mp3", "/a/3.mp3"]));
    }

    #[test]
    fn decode_tolerates_missing_final_terminator() {
        let decoded = decode_playlist(b"/a/1.mp3\0/a/2.mp3").unwrap();
        assert_eq!(decoded, tracks(&["/a/1.mp3", "/a/2.mp3"]));
    }

    #[test]
    fn decode_empty_file_yields_nothing() {
        assert!(decode_playlist(b"").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_empty_entry() {
        let err = decode_playlist(b"/a/1.mp3\0\0/a/2.mp3\0").unwrap_err();
        assert!(matches!(err, SetupError::CorruptPlaylist { offset: 9, .. }));
    }

    #[test]
    fn decode_rejects_relative_entry() {
        let err = decode_playlist(b"/a/1.mp3\0music/2.mp3\0").unwrap_err();
        assert!(matches!(
            err,
            SetupError::CorruptPlaylist {
                reason: "relative path",
                ..
            }
        ));
    }
}
