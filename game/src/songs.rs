use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One playable track. Immutable once selected; the video/audio paths are
/// opened when the play screen first runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub video: PathBuf,
    pub audio: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongLibrary {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    songs: Vec<Song>,
}

impl Default for SongLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SongLibrary {
    /// The list shipped with the game, used whenever no library file is
    /// available.
    pub fn builtin() -> Self {
        let songs = (1..=3)
            .map(|n| Song {
                title: match n {
                    1 => "APT - ROSE & Bruno Mars".to_string(),
                    n => format!("Song {n}"),
                },
                video: PathBuf::from(format!("songs/song{n}.mp4")),
                audio: PathBuf::from(format!("songs/song{n}.wav")),
            })
            .collect();
        Self {
            version: default_version(),
            songs,
        }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn titles(&self) -> Vec<String> {
        self.songs.iter().map(|s| s.title.clone()).collect()
    }

    /// An empty library is useless at the select screen, so it falls back
    /// to the builtin list.
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        if self.songs.is_empty() {
            self.songs = Self::builtin().songs;
        }
        self
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct SongStore {
    path: PathBuf,
}

impl SongStore {
    pub fn from_env() -> Self {
        let path = std::env::var_os("TAPLINE_SONGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("songs/songs.json"));
        Self::at(path)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Lenient load: a missing or malformed file yields the builtin list.
    pub fn load(&self) -> SongLibrary {
        let Ok(bytes) = fs::read(&self.path) else {
            return SongLibrary::builtin();
        };
        serde_json::from_slice::<SongLibrary>(&bytes)
            .map(SongLibrary::sanitized)
            .unwrap_or_else(|_| SongLibrary::builtin())
    }

    pub fn save(&self, library: &SongLibrary) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(library)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
