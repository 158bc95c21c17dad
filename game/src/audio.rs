use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

/// Plays one song's audio track.
///
/// Playback is fire-and-forget on rodio's mixer thread; the game loop only
/// issues `play_from_start` (at PLAYING entry and on every video loop
/// boundary) and `stop`. Drift between audio and video inside one loop
/// iteration is accepted; the restart at the loop boundary bounds it.
pub struct MusicPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    path: PathBuf,
    volume: f32,
}

impl MusicPlayer {
    /// Opens the output device and validates the track by decoding its
    /// header, so a bad file fails at load time rather than mid-game.
    pub fn open(path: &Path, volume: f32) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("no audio output device available")?;

        let file = File::open(path)
            .with_context(|| format!("could not open audio {}", path.display()))?;
        Decoder::new(BufReader::new(file))
            .with_context(|| format!("could not decode audio {}", path.display()))?;

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            path: path.to_path_buf(),
            volume: volume.clamp(0.0, 1.0),
        })
    }

    /// (Re)starts the track from its first sample. The previous sink, if
    /// any, is stopped first; a decoder cannot be rewound, so the file is
    /// reopened.
    pub fn play_from_start(&mut self) -> Result<()> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let sink = Sink::try_new(&self.handle).context("could not create audio sink")?;
        sink.set_volume(self.volume);

        let file = File::open(&self.path)
            .with_context(|| format!("could not reopen audio {}", self.path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("could not decode audio {}", self.path.display()))?;
        sink.append(source);

        self.sink = Some(sink);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}
