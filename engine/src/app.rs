use std::error::Error;
use std::time::{Duration, Instant};

use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub clamp_to_monitor: bool,
    pub vsync: Option<bool>,
    pub present_mode: Option<pixels::wgpu::PresentMode>,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    pub surface_size: SurfaceSize,
    frame_interval: Duration,
    exit_code: Option<i32>,
}

impl AppContext {
    /// Redraw pacing: the loop sleeps until the next frame deadline. Games
    /// tie this to their content's native rate (e.g. a video's frame rate).
    pub fn set_frame_interval(&mut self, interval: Duration) {
        if !interval.is_zero() {
            self.frame_interval = interval;
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Ends the event loop after the current update. Code 0 is a normal
    /// quit; anything else terminates the process with that exit status.
    pub fn request_exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

/// Input gathered since the previous frame and drained once per tick.
///
/// `presses` keeps one entry per pointer-down event so a frame with several
/// clicks delivers all of them.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub mouse_pos: Option<(u32, u32)>,
    pub presses: Vec<(u32, u32)>,
    pub keys_pressed: Vec<VirtualKeyCode>,
}

impl InputFrame {
    pub fn key_pressed(&self, key: VirtualKeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    fn end_frame(&mut self) {
        self.presses.clear();
        self.keys_pressed.clear();
    }
}

pub trait GameApp {
    type State;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    fn update_state(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    );

    fn render(&mut self, state: &Self::State, gfx: &mut dyn Renderer2d);

    fn on_resize(&mut self, _state: &mut Self::State, _size: SurfaceSize) {}

    /// Called once before the process leaves the event loop, however the
    /// exit was triggered. Release external resources (decoders, audio
    /// streams) here; `winit` exits the process without running drops.
    fn on_exit(&mut self, _state: &mut Self::State) {}
}

pub fn run_game<G: GameApp + 'static>(
    config: AppConfig,
    mut game: G,
) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let monitor_size = if config.clamp_to_monitor {
        event_loop.primary_monitor().map(|m| m.size())
    } else {
        None
    };
    let initial_size = if let Some(monitor) = monitor_size {
        PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        )
    } else {
        config.desired_size
    };
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(initial_size)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width, window_size.height);

    let build_pixels = |present_mode: Option<pixels::wgpu::PresentMode>| -> Result<Pixels, pixels::Error> {
        let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
        let mut pixels_builder =
            PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture);
        if let Some(vsync) = config.vsync {
            pixels_builder = pixels_builder.enable_vsync(vsync);
        }
        if let Some(mode) = present_mode {
            pixels_builder = pixels_builder.present_mode(mode);
        }
        pixels_builder.build()
    };

    let pixels = if let Some(mode) = config.present_mode {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| build_pixels(Some(mode)))) {
            Ok(res) => res?,
            Err(_) => {
                eprintln!(
                    "warning: requested present mode {:?} was not supported; falling back",
                    mode
                );
                build_pixels(None)?
            }
        }
    } else {
        build_pixels(None)?
    };

    let renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    let mut ctx = AppContext {
        window,
        renderer,
        surface_size,
        frame_interval: DEFAULT_FRAME_INTERVAL,
        exit_code: None,
    };
    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let mut last_frame = Instant::now();
    let mut next_redraw = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(next_redraw);

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    game.on_exit(&mut state);
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    if size.width > 0 && size.height > 0 {
                        ctx.surface_size = SurfaceSize::new(size.width, size.height);
                        if let Err(err) = ctx.renderer.resize(ctx.surface_size) {
                            eprintln!("resize failed: {err}");
                        }
                        game.on_resize(&mut state, ctx.surface_size);
                        ctx.window.request_redraw();
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let x = position.x.max(0.0) as u32;
                    let y = position.y.max(0.0) as u32;
                    input.mouse_pos = Some((x, y));
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    if let Some(pos) = input.mouse_pos {
                        input.presses.push(pos);
                    }
                }
                WindowEvent::KeyboardInput { input: key, .. } => {
                    if key.state == ElementState::Pressed {
                        if let Some(vk) = key.virtual_keycode {
                            input.keys_pressed.push(vk);
                        }
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                if now < next_redraw {
                    return;
                }
                next_redraw = now + ctx.frame_interval;

                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                game.update_state(&mut state, &input, dt, &mut ctx);
                input.end_frame();

                if let Some(code) = ctx.exit_code {
                    game.on_exit(&mut state);
                    if code == 0 {
                        *control_flow = ControlFlow::Exit;
                    } else {
                        std::process::exit(code);
                    }
                    return;
                }

                ctx.renderer.draw_frame(|gfx| game.render(&state, gfx));
                if let Err(err) = ctx.renderer.present() {
                    eprintln!("present failed: {err}");
                }
            }
            Event::MainEventsCleared => {
                if Instant::now() >= next_redraw {
                    ctx.window.request_redraw();
                }
            }
            _ => {}
        }
    });

    #[allow(unreachable_code)]
    Ok(())
}
