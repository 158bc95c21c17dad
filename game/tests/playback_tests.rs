use anyhow::bail;
use tapline::video::{FrameAdvance, FrameSource, advance_with_loop};

/// Scripted frame source standing in for a real decoder.
struct StubSource {
    total_frames: usize,
    cursor: usize,
    fail_at: Option<usize>,
    rewind_fails: bool,
    rewinds: usize,
    frame: Vec<u8>,
}

impl StubSource {
    fn with_frames(total_frames: usize) -> Self {
        Self {
            total_frames,
            cursor: 0,
            fail_at: None,
            rewind_fails: false,
            rewinds: 0,
            frame: vec![0u8; 2 * 2 * 4],
        }
    }
}

impl FrameSource for StubSource {
    fn frame_rate(&self) -> f64 {
        30.0
    }

    fn width(&self) -> u32 {
        2
    }

    fn height(&self) -> u32 {
        2
    }

    fn next_frame(&mut self) -> bool {
        if self.fail_at == Some(self.cursor) {
            return false;
        }
        if self.cursor >= self.total_frames {
            return false;
        }
        self.cursor += 1;
        true
    }

    fn frame_data(&self) -> &[u8] {
        &self.frame
    }

    fn rewind(&mut self) -> anyhow::Result<()> {
        if self.rewind_fails {
            bail!("seek unsupported");
        }
        self.rewinds += 1;
        self.cursor = 0;
        self.fail_at = None;
        Ok(())
    }
}

#[test]
fn end_of_stream_rewinds_to_the_first_frame() {
    let mut source = StubSource::with_frames(3);

    for _ in 0..3 {
        assert_eq!(advance_with_loop(&mut source), FrameAdvance::Frame);
    }
    assert_eq!(source.cursor, 3);

    // The fourth pull wraps: back to the start, first frame already decoded.
    assert_eq!(advance_with_loop(&mut source), FrameAdvance::Looped);
    assert_eq!(source.rewinds, 1);
    assert_eq!(source.cursor, 1);

    // And playback continues normally from there.
    assert_eq!(advance_with_loop(&mut source), FrameAdvance::Frame);
    assert_eq!(source.cursor, 2);
}

#[test]
fn mid_stream_read_failure_is_treated_as_end_of_stream() {
    let mut source = StubSource::with_frames(10);
    source.fail_at = Some(4);

    for _ in 0..4 {
        assert_eq!(advance_with_loop(&mut source), FrameAdvance::Frame);
    }

    // The bad frame loops instead of erroring out.
    assert_eq!(advance_with_loop(&mut source), FrameAdvance::Looped);
    assert_eq!(source.rewinds, 1);
    assert_eq!(source.cursor, 1);
}

#[test]
fn failed_rewind_is_swallowed() {
    let mut source = StubSource::with_frames(2);
    source.rewind_fails = true;

    assert_eq!(advance_with_loop(&mut source), FrameAdvance::Frame);
    assert_eq!(advance_with_loop(&mut source), FrameAdvance::Frame);

    // Stream is stuck at its end, but the loop keeps reporting Looped
    // rather than crashing; the last frame stays on screen.
    assert_eq!(advance_with_loop(&mut source), FrameAdvance::Looped);
    assert_eq!(advance_with_loop(&mut source), FrameAdvance::Looped);
    assert_eq!(source.rewinds, 0);
}

#[test]
fn looping_repeats_forever() {
    let mut source = StubSource::with_frames(2);
    let mut loops = 0;
    for _ in 0..20 {
        if advance_with_loop(&mut source) == FrameAdvance::Looped {
            loops += 1;
        }
    }
    // 2 frames then a loop, with the loop pull itself yielding frame 1:
    // the wrap happens every third pull after the first cycle.
    assert!(loops >= 6);
    assert_eq!(source.rewinds, loops);
}
