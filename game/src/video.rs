use std::path::Path;

use anyhow::{Result, anyhow};
use ffmpeg_next as ffmpeg;

/// Sequential source of RGBA frames with loop-capable rewind.
///
/// The game loop only ever needs "next frame or tell me the stream ended",
/// so decode errors are folded into the end-of-stream signal; the trait
/// also keeps the loop policy testable without media files.
pub trait FrameSource {
    /// Native frame rate from stream metadata; 0.0 when unknown.
    fn frame_rate(&self) -> f64;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Decodes the next frame into the internal buffer. `false` means the
    /// stream ended or the read failed; the caller is expected to rewind.
    fn next_frame(&mut self) -> bool;

    /// The most recently decoded frame, RGBA, `width * height * 4` bytes.
    fn frame_data(&self) -> &[u8];

    /// Seeks back to the first frame.
    fn rewind(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAdvance {
    Frame,
    /// The stream ended and was rewound to its first frame; the caller
    /// restarts the audio track to match.
    Looped,
}

/// Pulls the next frame, looping back to the start on end-of-stream.
///
/// Read failures behave exactly like end-of-stream, and a failed rewind is
/// swallowed (the previous frame simply stays on screen) -- a stalled
/// stream must never take down the game loop.
pub fn advance_with_loop(source: &mut dyn FrameSource) -> FrameAdvance {
    if source.next_frame() {
        return FrameAdvance::Frame;
    }
    let _ = source.rewind();
    source.next_frame();
    FrameAdvance::Looped
}

/// ffmpeg-backed decoder for the background video of a song.
pub struct VideoDecoder {
    input: ffmpeg::format::context::Input,
    decoder: ffmpeg::decoder::Video,
    scaler: ffmpeg::software::scaling::Context,
    stream_index: usize,
    width: u32,
    height: u32,
    frame_rate: f64,
    rgba: Vec<u8>,
}

impl VideoDecoder {
    pub fn open(path: &Path) -> Result<Self> {
        ffmpeg::init()?;

        let input = ffmpeg::format::input(&path)
            .map_err(|e| anyhow!("could not open video {}: {e}", path.display()))?;

        let stream = input
            .streams()
            .best(ffmpeg::media::Type::Video)
            .ok_or_else(|| anyhow!("no video stream in {}", path.display()))?;
        let stream_index = stream.index();
        let frame_rate = stream_frame_rate(&stream);

        let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = context.decoder().video()?;

        let width = decoder.width();
        let height = decoder.height();
        if width == 0 || height == 0 {
            return Err(anyhow!(
                "video {} reports zero dimensions",
                path.display()
            ));
        }

        let scaler = ffmpeg::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg::format::Pixel::RGBA,
            width,
            height,
            ffmpeg::software::scaling::Flags::BILINEAR,
        )?;

        Ok(Self {
            input,
            decoder,
            scaler,
            stream_index,
            width,
            height,
            frame_rate,
            rgba: vec![0u8; (width as usize) * (height as usize) * 4],
        })
    }

    fn store_frame(&mut self, frame: &ffmpeg::frame::Video) -> bool {
        let mut converted = ffmpeg::frame::Video::empty();
        if self.scaler.run(frame, &mut converted).is_err() {
            return false;
        }

        // Planes can carry per-row padding; copy row by row.
        let stride = converted.stride(0);
        let row_len = self.width as usize * 4;
        let data = converted.data(0);
        for y in 0..self.height as usize {
            let src = y * stride;
            let dst = y * row_len;
            if src + row_len > data.len() || dst + row_len > self.rgba.len() {
                return false;
            }
            self.rgba[dst..dst + row_len].copy_from_slice(&data[src..src + row_len]);
        }
        true
    }
}

impl FrameSource for VideoDecoder {
    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn next_frame(&mut self) -> bool {
        loop {
            // Drain any frame the decoder already holds.
            let mut frame = ffmpeg::frame::Video::empty();
            if self.decoder.receive_frame(&mut frame).is_ok() {
                return self.store_frame(&frame);
            }

            // Feed packets until the decoder accepts one.
            loop {
                match self.input.packets().next() {
                    Some((stream, packet)) => {
                        if stream.index() == self.stream_index
                            && self.decoder.send_packet(&packet).is_ok()
                        {
                            break;
                        }
                    }
                    None => {
                        // End of stream: flush out any delayed frames.
                        let _ = self.decoder.send_eof();
                        let mut frame = ffmpeg::frame::Video::empty();
                        if self.decoder.receive_frame(&mut frame).is_ok() {
                            return self.store_frame(&frame);
                        }
                        return false;
                    }
                }
            }
        }
    }

    fn frame_data(&self) -> &[u8] {
        &self.rgba
    }

    fn rewind(&mut self) -> Result<()> {
        self.input
            .seek(0, 0..i64::MAX)
            .map_err(|e| anyhow!("seek to start failed: {e:?}"))?;
        self.decoder.flush();
        Ok(())
    }
}

fn stream_frame_rate(stream: &ffmpeg::format::stream::Stream) -> f64 {
    let avg = f64::from(stream.avg_frame_rate());
    if avg.is_finite() && avg > 0.0 {
        return avg;
    }
    let real = f64::from(stream.rate());
    if real.is_finite() && real > 0.0 {
        return real;
    }
    0.0
}
