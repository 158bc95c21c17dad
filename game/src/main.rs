use std::time::{Duration, SystemTime, UNIX_EPOCH};

use engine::app::{AppConfig, AppContext, GameApp, InputFrame, run_game};
use engine::graphics::Renderer2d;
use engine::surface::SurfaceSize;
use winit::dpi::PhysicalSize;
use winit::event::VirtualKeyCode;

use tapline::audio::MusicPlayer;
use tapline::render;
use tapline::screens::SongSelectLayout;
use tapline::session::Vec2;
use tapline::settings::{PlayerSettings, SettingsStore};
use tapline::songs::{Song, SongLibrary, SongStore};
use tapline::state::GameState;
use tapline::video::{FrameAdvance, FrameSource, VideoDecoder, advance_with_loop};
use tapline::view::Screen;

const WINDOW_WIDTH: u32 = 1600;
const WINDOW_HEIGHT: u32 = 1200;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = SettingsStore::from_env().load();
    let songs = SongStore::from_env().load();
    println!("tapline: {} songs in library", songs.len());

    let config = AppConfig {
        title: "Tapline".to_string(),
        desired_size: PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        clamp_to_monitor: true,
        vsync: Some(settings.video.vsync),
        present_mode: env_present_mode("TAPLINE_PRESENT_MODE"),
    };

    run_game(config, TaplineApp::new(songs, settings))
}

/// Both media handles for the current song. Dropping this releases the
/// ffmpeg contexts and the audio sink.
struct Media {
    video: VideoDecoder,
    music: MusicPlayer,
}

struct TaplineApp {
    songs: SongLibrary,
    titles: Vec<String>,
    settings: PlayerSettings,
    media: Option<Media>,
    layout: SongSelectLayout,
    mouse: Option<(u32, u32)>,
}

impl TaplineApp {
    fn new(songs: SongLibrary, settings: PlayerSettings) -> Self {
        let titles = songs.titles();
        Self {
            songs,
            titles,
            settings,
            media: None,
            layout: SongSelectLayout::default(),
            mouse: None,
        }
    }

    fn stop_media(&mut self) {
        if let Some(mut media) = self.media.take() {
            media.music.stop();
        }
    }

    fn open_media(&self, song: &Song) -> anyhow::Result<Media> {
        let video = VideoDecoder::open(&song.video)?;
        let mut music =
            MusicPlayer::open(&song.audio, self.settings.audio.effective_music_gain())?;
        music.play_from_start()?;
        Ok(Media { video, music })
    }

    /// PLAYING tick body. First entry lazily opens the song's media; any
    /// load failure there is fatal (reported, process exits non-zero).
    fn update_playing(&mut self, state: &mut GameState, input: &InputFrame, ctx: &mut AppContext) {
        if self.media.is_none() {
            let Some(song) = state.current_song().cloned() else {
                return;
            };
            match self.open_media(&song) {
                Ok(media) => {
                    let fps = media.video.frame_rate();
                    let (w, h) = (media.video.width(), media.video.height());
                    println!("video: {w}x{h} @ {fps:.2} fps");

                    if fps > 0.0 {
                        ctx.set_frame_interval(Duration::from_secs_f64(1.0 / fps));
                    }
                    ctx.window.set_inner_size(PhysicalSize::new(w, h));
                    if let Some(session) = state.session.as_mut() {
                        session.set_frame_rate(fps);
                        session.reposition(w, h);
                    }
                    self.media = Some(media);
                }
                Err(err) => {
                    eprintln!("error loading video/audio: {err:#}");
                    self.stop_media();
                    ctx.request_exit(1);
                    return;
                }
            }
        }

        if let Some(media) = self.media.as_mut() {
            if advance_with_loop(&mut media.video) == FrameAdvance::Looped {
                // Video wrapped; bring the audio back to the top with it.
                if let Err(err) = media.music.play_from_start() {
                    eprintln!("warning: audio restart failed: {err:#}");
                }
            }
        }

        let Some(session) = state.session.as_mut() else {
            return;
        };
        session.advance_tick();
        for &(x, y) in &input.presses {
            session.handle_press(Vec2::new(x as f32, y as f32));
        }

        if input.key_pressed(VirtualKeyCode::Escape) {
            self.stop_media();
            state.end_session();
        }
    }
}

impl GameApp for TaplineApp {
    type State = GameState;

    fn init_state(&mut self, ctx: &mut AppContext) -> GameState {
        self.layout = SongSelectLayout::compute(ctx.surface_size.width, &self.titles);
        GameState::new()
    }

    fn update_state(
        &mut self,
        state: &mut GameState,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    ) {
        if let Some(pos) = input.mouse_pos {
            self.mouse = Some(pos);
        }

        if input.key_pressed(VirtualKeyCode::Q) {
            self.stop_media();
            ctx.request_exit(0);
            return;
        }

        match state.screen {
            Screen::SongSelect => {
                for &(x, y) in &input.presses {
                    if let Some(index) = self.layout.row_at(x, y) {
                        if let Some(song) = self.songs.get(index).cloned() {
                            state.choose_song(
                                song,
                                session_seed(),
                                self.settings.gameplay.countdown(),
                            );
                            break;
                        }
                    }
                }
            }
            Screen::Countdown => state.tick_countdown(dt),
            Screen::Playing => self.update_playing(state, input, ctx),
            Screen::GameOver => {
                if input.key_pressed(VirtualKeyCode::R) {
                    state.restart();
                }
            }
        }
    }

    fn render(&mut self, state: &GameState, gfx: &mut dyn Renderer2d) {
        match state.screen {
            Screen::SongSelect => render::draw_song_select(
                gfx,
                &self.layout,
                &self.titles,
                self.layout.hovered(self.mouse),
            ),
            Screen::Countdown => render::draw_countdown(gfx, state.countdown_display_secs()),
            Screen::Playing => {
                let Some(session) = state.session.as_ref() else {
                    gfx.clear(render::COLOR_BACKGROUND);
                    return;
                };
                let frame = self
                    .media
                    .as_ref()
                    .map(|m| (m.video.frame_data(), m.video.width(), m.video.height()));
                render::draw_playing(gfx, session, frame);
            }
            Screen::GameOver => render::draw_game_over(
                gfx,
                state.session.as_ref().map(|s| s.score()).unwrap_or(0),
            ),
        }
    }

    fn on_resize(&mut self, state: &mut GameState, size: SurfaceSize) {
        self.layout = SongSelectLayout::compute(size.width, &self.titles);
        if let Some(session) = state.session.as_mut() {
            session.reposition(size.width, size.height);
        }
    }

    fn on_exit(&mut self, _state: &mut GameState) {
        self.stop_media();
    }
}

fn session_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15)
}

fn env_present_mode(name: &str) -> Option<pixels::wgpu::PresentMode> {
    use pixels::wgpu::PresentMode;

    let v = std::env::var(name).ok()?;
    match v.to_ascii_lowercase().as_str() {
        "auto" | "auto_vsync" | "vsync" => Some(PresentMode::AutoVsync),
        "auto_no_vsync" | "auto_novsync" | "no_vsync" | "novsync" => Some(PresentMode::AutoNoVsync),
        "fifo" => Some(PresentMode::Fifo),
        "mailbox" => Some(PresentMode::Mailbox),
        "immediate" => Some(PresentMode::Immediate),
        _ => None,
    }
}
