use engine::graphics::{Color, Renderer2d, text_width};
use engine::ui::Rect;

use crate::screens::{
    COUNTDOWN_SCALE, GAME_OVER_HINT_SCALE, GAME_OVER_SCALE, HUD_MARGIN, SCORE_TEXT_SCALE,
    SCREEN_TITLE_SCALE, SONG_TITLE_HOVER_SCALE, SONG_TITLE_SCALE, SongSelectLayout,
    TICK_TEXT_SCALE, centered_text_rect,
};
use crate::session::Session;

pub const COLOR_BACKGROUND: Color = [0, 0, 0, 255];
pub const COLOR_TEXT: Color = [255, 255, 255, 255];
pub const COLOR_HOVER_TEXT: Color = [255, 255, 0, 255];
pub const COLOR_HOVER_HIGHLIGHT: Color = [128, 128, 128, 255];
pub const COLOR_TARGET_TRIM: Color = [0, 0, 0, 255];
pub const COLOR_TARGET_IDLE: Color = [255, 255, 255, 255];
pub const COLOR_TARGET_LIT: Color = [255, 255, 0, 255];

/// Inner disc diameter relative to the full button (the rim in between
/// reads as a fixed trim ring).
pub const TARGET_INNER_RATIO: f32 = 0.9;

pub fn draw_song_select(
    gfx: &mut dyn Renderer2d,
    layout: &SongSelectLayout,
    titles: &[String],
    hovered: Option<usize>,
) {
    gfx.clear(COLOR_BACKGROUND);

    gfx.draw_text_scaled(
        layout.title.x,
        layout.title.y,
        "SONG SELECTION",
        COLOR_TEXT,
        SCREEN_TITLE_SCALE,
    );

    let width = gfx.size().width;
    for (i, title) in titles.iter().enumerate() {
        let Some(row) = layout.rows.get(i) else {
            break;
        };
        if hovered == Some(i) {
            // Hovered rows render enlarged on the same center, over a
            // highlight slab.
            let (_, cy) = row.center();
            let hover = centered_text_rect(width, cy, title, SONG_TITLE_HOVER_SCALE);
            gfx.fill_rect(hover.inflate(20, 10), COLOR_HOVER_HIGHLIGHT);
            gfx.draw_text_scaled(hover.x, hover.y, title, COLOR_HOVER_TEXT, SONG_TITLE_HOVER_SCALE);
        } else {
            gfx.draw_text_scaled(row.x, row.y, title, COLOR_TEXT, SONG_TITLE_SCALE);
        }
    }
}

pub fn draw_countdown(gfx: &mut dyn Renderer2d, secs_remaining: u64) {
    gfx.clear(COLOR_BACKGROUND);
    let size = gfx.size();
    let text = secs_remaining.to_string();
    let rect = centered_text_rect(size.width, size.height / 2, &text, COUNTDOWN_SCALE);
    gfx.draw_text_scaled(rect.x, rect.y, &text, COLOR_TEXT, COUNTDOWN_SCALE);
}

/// The PLAYING frame: video background, six ringed targets, score and tick
/// overlays.
pub fn draw_playing(
    gfx: &mut dyn Renderer2d,
    session: &Session,
    video_frame: Option<(&[u8], u32, u32)>,
) {
    gfx.clear(COLOR_BACKGROUND);
    let size = gfx.size();

    if let Some((rgba, w, h)) = video_frame {
        gfx.blit_scaled(Rect::from_size(size.width, size.height), w, h, rgba);
    }

    for target in session.targets().targets() {
        let inner = if target.lit {
            COLOR_TARGET_LIT
        } else {
            COLOR_TARGET_IDLE
        };
        gfx.fill_circle(
            target.center.x,
            target.center.y,
            target.radius,
            COLOR_TARGET_TRIM,
        );
        gfx.fill_circle(
            target.center.x,
            target.center.y,
            target.radius * TARGET_INNER_RATIO,
            inner,
        );
    }

    let score_text = format!("SCORE: {}", session.score());
    gfx.draw_text_scaled(HUD_MARGIN, HUD_MARGIN, &score_text, COLOR_TEXT, SCORE_TEXT_SCALE);

    let tick_text = format!("TICK: {}", session.tick());
    let tick_x = size
        .width
        .saturating_sub(HUD_MARGIN + text_width(&tick_text, TICK_TEXT_SCALE));
    gfx.draw_text_scaled(tick_x, HUD_MARGIN, &tick_text, COLOR_TEXT, TICK_TEXT_SCALE);
}

pub fn draw_game_over(gfx: &mut dyn Renderer2d, score: u32) {
    gfx.clear(COLOR_BACKGROUND);
    let size = gfx.size();

    let score_text = format!("FINAL SCORE: {score}");
    let rect = centered_text_rect(size.width, size.height / 2, &score_text, GAME_OVER_SCALE);
    gfx.draw_text_scaled(rect.x, rect.y, &score_text, COLOR_TEXT, GAME_OVER_SCALE);

    let hint = "PRESS R TO RESTART OR Q TO QUIT";
    let hint_rect = centered_text_rect(
        size.width,
        size.height / 2 + 50,
        hint,
        GAME_OVER_HINT_SCALE,
    );
    gfx.draw_text_scaled(hint_rect.x, hint_rect.y, hint, COLOR_TEXT, GAME_OVER_HINT_SCALE);
}
