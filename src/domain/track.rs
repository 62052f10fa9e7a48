use std::{
    borrow::Cow,
    ffi::OsStr,
    os::unix::ffi::OsStrExt,
    path::{Path, PathBuf},
};

/// One playlist entry: an absolute path handed to the decoder as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    path: PathBuf,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Track { path: path.into() }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Track::new(OsStr::from_bytes(bytes))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.path.as_os_str().as_bytes()
    }

    pub fn lossy(&self) -> Cow<'_, str> {
        self.path.to_string_lossy()
    }
}

impl From<PathBuf> for Track {
    fn from(path: PathBuf) -> Self {
        Track { path }
    }
}
