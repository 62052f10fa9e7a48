use super::Track;
use crate::error::SetupError;

/// The ordered, fixed-for-the-run list of tracks.
#[derive(Clone, Debug)]
pub struct Playlist {
    tracks: Vec<Track>,
    prefix_len: usize,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Result<Self, SetupError> {
        if tracks.is_empty() {
            return Err(SetupError::EmptyPlaylist);
        }
        let prefix_len = common_prefix(&tracks.iter().map(Track::as_bytes).collect::<Vec<_>>());

        Ok(Playlist { tracks, prefix_len })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Leading bytes shared by every track, for the one-line header.
    pub fn prefix(&self) -> String {
        let bytes = self.tracks[0].as_bytes();
        String::from_utf8_lossy(&bytes[..char_boundary(bytes, self.prefix_len)]).into_owned()
    }

    /// Track path with the shared prefix trimmed off.
    ///
    /// Falls back to the full path when trimming would leave nothing, which
    /// happens when the same file is listed more than once.
    pub fn display_name(&self, idx: usize) -> Option<String> {
        let track = self.tracks.get(idx)?;
        let bytes = track.as_bytes();
        let trimmed = &bytes[char_boundary(bytes, self.prefix_len)..];

        Some(match trimmed.is_empty() {
            true => track.lossy().into_owned(),
            false => String::from_utf8_lossy(trimmed).into_owned(),
        })
    }
}

/// Move `cut` back so it does not split a UTF-8 sequence in `bytes`.
///
/// The shared prefix is byte-exact and may stop between two siblings that
/// differ only in a continuation byte.
fn char_boundary(bytes: &[u8], mut cut: usize) -> usize {
    while cut > 0 && cut < bytes.len() && bytes[cut] & 0xC0 == 0x80 {
        cut -= 1;
    }
    cut
}

/// Longest leading byte run shared by all `paths`.
///
/// Zero for fewer than two paths. When no differing byte is found the result is
/// clamped to the length of the shortest path.
pub fn common_prefix<T: AsRef<[u8]>>(paths: &[T]) -> usize {
    if paths.len() < 2 {
        return 0;
    }

    let first = paths[0].as_ref();
    let shortest = paths
        .iter()
        .map(|p| p.as_ref().len())
        .min()
        .unwrap_or(0);

    (0..shortest)
        .find(|&j| paths[1..].iter().any(|p| p.as_ref()[j] != first[j]))
        .unwrap_or(shortest)
}
