use std::fs;

use tapline::settings::{PlayerSettings, SettingsStore};
use tapline::songs::{SongLibrary, SongStore};

#[test]
fn song_store_falls_back_to_builtin_when_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = SongStore::at(dir.path().join("songs.json"));
    assert_eq!(store.load(), SongLibrary::builtin());
}

#[test]
fn song_store_round_trips_a_library() {
    let dir = tempfile::tempdir().unwrap();
    let store = SongStore::at(dir.path().join("library/songs.json"));

    let library: SongLibrary = serde_json::from_str(
        r#"{
            "version": 1,
            "songs": [
                {"title": "One", "video": "media/one.mp4", "audio": "media/one.wav"},
                {"title": "Two", "video": "media/two.mkv", "audio": "media/two.flac"}
            ]
        }"#,
    )
    .unwrap();

    store.save(&library).unwrap();
    let loaded = store.load();
    assert_eq!(loaded, library);
    assert_eq!(loaded.titles(), vec!["One".to_string(), "Two".to_string()]);
}

#[test]
fn song_store_ignores_corrupt_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("songs.json");
    fs::write(&path, "definitely not json").unwrap();

    let store = SongStore::at(&path);
    assert_eq!(store.load(), SongLibrary::builtin());
}

#[test]
fn settings_store_round_trips_and_sanitizes() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::at(dir.path().join("settings.json"));

    // Missing file: defaults.
    assert_eq!(store.load(), PlayerSettings::default());

    let mut settings = PlayerSettings::default();
    settings.audio.music_volume = 0.25;
    settings.gameplay.countdown_secs = 1.5;
    store.save(&settings).unwrap();
    assert_eq!(store.load(), settings);

    // Out-of-range values on disk are clamped on load.
    let mut wild = settings.clone();
    wild.audio.master_volume = 42.0;
    store.save(&wild).unwrap();
    assert_eq!(store.load().audio.master_volume, 1.0);
}
