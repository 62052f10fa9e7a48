use segue::{
    OsOp, SegueError, SetupError, Store,
    domain::{PlaybackState, Track},
};
use std::fs;
use tempfile::TempDir;

fn store() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path().join("nested").join("segue")).unwrap();
    (dir, store)
}

#[test]
fn open_creates_the_directory_and_tolerates_existing() {
    let (dir, store) = store();
    assert!(store.dir().is_dir());

    let again = Store::open(store.dir().to_path_buf()).unwrap();
    assert_eq!(again.dir(), dir.path().join("nested").join("segue"));
}

#[test]
fn locate_prefers_the_override() {
    let dir = TempDir::new().unwrap();
    let located = Store::locate(Some(dir.path().to_path_buf())).unwrap();
    assert_eq!(located, dir.path());
}

#[test]
fn playlist_roundtrips_through_disk() {
    let (_dir, store) = store();
    let tracks = vec![Track::new("/a/1.mp3"), Track::new("/a/2.mp3"), Track::new("/b/3.mp3")];

    store.save_playlist(&tracks).unwrap();
    let playlist = store.load_playlist().unwrap();

    assert_eq!(playlist.tracks(), tracks.as_slice());
    assert_eq!(playlist.prefix(), "/");
    assert_eq!(fs::read(store.playlist_path()).unwrap(), b"/a/1.mp3\0/a/2.mp3\0/b/3.mp3\0");
}

#[test]
fn saving_replaces_the_previous_playlist() {
    let (_dir, store) = store();
    store
        .save_playlist(&[Track::new("/long/path/one.flac"), Track::new("/long/path/two.flac")])
        .unwrap();
    store.save_playlist(&[Track::new("/x.ogg")]).unwrap();

    let playlist = store.load_playlist().unwrap();
    assert_eq!(playlist.len(), 1);
    assert_eq!(playlist.display_name(0).as_deref(), Some("/x.ogg"));
}

#[test]
fn missing_or_empty_playlist_is_empty() {
    let (_dir, store) = store();
    assert!(matches!(
        store.load_playlist(),
        Err(SegueError::Setup(SetupError::EmptyPlaylist))
    ));

    fs::write(store.playlist_path(), b"").unwrap();
    assert!(matches!(
        store.load_playlist(),
        Err(SegueError::Setup(SetupError::EmptyPlaylist))
    ));
}

#[test]
fn unreadable_playlist_is_an_os_failure() {
    let (_dir, store) = store();
    fs::create_dir(store.playlist_path()).unwrap();

    let err = store.load_playlist().unwrap_err();
    assert_eq!(err.exit_code(), OsOp::PlaylistRead.exit_code());
}

#[test]
fn state_defaults_when_absent() {
    let (_dir, store) = store();
    assert_eq!(store.load_state().unwrap(), PlaybackState::default());
}

#[test]
fn state_roundtrips_through_disk() {
    let (_dir, store) = store();

    for state in [PlaybackState::new(0, 0), PlaybackState::new(1, 37), PlaybackState::new(250, 7_199)] {
        store.save_state(&state).unwrap();
        assert_eq!(fs::metadata(store.state_path()).unwrap().len(), 16);
        assert_eq!(store.load_state().unwrap(), state);
    }
}

#[test]
fn truncated_state_is_corrupt() {
    let (_dir, store) = store();
    fs::write(store.state_path(), [1u8, 0, 0, 0, 37, 0, 0, 0]).unwrap();

    let err = store.load_state().unwrap_err();
    assert!(matches!(
        err,
        SegueError::Setup(SetupError::CorruptState { found: 8, .. })
    ));
}

#[test]
fn state_write_failure_names_the_operation() {
    let (_dir, store) = store();
    fs::create_dir(store.state_path()).unwrap();

    let err = store.save_state(&PlaybackState::new(0, 1)).unwrap_err();
    assert_eq!(err.exit_code(), OsOp::StateWriteOpen.exit_code());
    assert!(err.to_string().starts_with("open(state,write) failed"));
}
