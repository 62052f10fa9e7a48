use crate::error::SetupError;

/// Size of the persisted record: two little-endian `i64`s.
pub const RECORD_LEN: usize = 16;

/// Resume checkpoint, written once when playback quits.
///
/// `position` is the track to resume at and `offset_secs` how far into it
/// playback had got. `{-1, 0}` means "start from the top".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    pub position: i64,
    pub offset_secs: i64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState {
            position: -1,
            offset_secs: 0,
        }
    }
}

impl PlaybackState {
    pub fn new(position: i64, offset_secs: i64) -> Self {
        PlaybackState {
            position,
            offset_secs,
        }
    }

    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut record = [0u8; RECORD_LEN];
        record[..8].copy_from_slice(&self.position.to_le_bytes());
        record[8..].copy_from_slice(&self.offset_secs.to_le_bytes());
        record
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SetupError> {
        let record: &[u8; RECORD_LEN] =
            bytes.try_into().map_err(|_| SetupError::CorruptState {
                expected: RECORD_LEN,
                found: bytes.len(),
            })?;

        let mut position = [0u8; 8];
        let mut offset = [0u8; 8];
        position.copy_from_slice(&record[..8]);
        offset.copy_from_slice(&record[8..]);

        Ok(PlaybackState {
            position: i64::from_le_bytes(position),
            offset_secs: i64::from_le_bytes(offset),
        })
    }

    /// Where the supervisor should start for a playlist of `len` tracks.
    ///
    /// The position lands one before the stored track because the first
    /// decoder completion advances it. A stored track outside the playlist
    /// (finished, or the list shrank) restarts from the top.
    pub fn resume_point(&self, len: usize) -> ResumePoint {
        match usize::try_from(self.position) {
            Ok(idx) if idx < len => ResumePoint {
                position: self.position - 1,
                seek_secs: u64::try_from(self.offset_secs).ok().filter(|s| *s > 0),
            },
            _ => ResumePoint::start(),
        }
    }
}

/// Initial supervisor position plus the one-shot seek for the first decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResumePoint {
    pub position: i64,
    pub seek_secs: Option<u64>,
}

impl ResumePoint {
    pub fn start() -> Self {
        ResumePoint {
            position: -1,
            seek_secs: None,
        }
    }
}
