mod playlist;
mod resume;
mod track;

pub use playlist::{Playlist, common_prefix};
pub use resume::{PlaybackState, RECORD_LEN, ResumePoint};
pub use track::Track;
