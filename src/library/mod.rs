//! Turns invocation arguments into playlist tracks.

use crate::{
    domain::Track,
    error::{OsOp, OsResultExt, Result},
};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

static LEGAL_EXTENSION: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from(["mp3", "m4a", "flac", "ogg", "opus", "wav"]));

/// Canonicalize each argument into an absolute track path.
///
/// Files are taken as given, whatever their extension. Directories expand to
/// the audio files beneath them, sorted by path. Argument order is preserved.
pub fn collect_tracks<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<Track>> {
    let mut tracks = Vec::with_capacity(inputs.len());

    for input in inputs {
        let canon = input.as_ref().canonicalize().os(OsOp::ResolveTrack)?;

        match canon.is_dir() {
            true => {
                let found = scan_dir(&canon)?;
                debug!(dir = %canon.display(), found = found.len(), "expanded directory");
                tracks.extend(found.into_iter().map(Track::from));
            }
            false => tracks.push(Track::from(canon)),
        }
    }

    Ok(tracks)
}

fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !e.path().join(".nomedia").exists())
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file() && is_audio(entry))
        .map(|entry| entry.path().canonicalize().os(OsOp::ResolveTrack))
        .collect::<Result<Vec<_>>>()?;

    found.sort();
    Ok(found)
}

fn is_audio(entry: &DirEntry) -> bool {
    entry
        .path()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| LEGAL_EXTENSION.contains(ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
