//! Pixel layouts for the non-gameplay screens.
//!
//! Layouts are pure functions of the surface size (and the song titles),
//! so input hit-testing and rendering always agree on geometry.

use engine::graphics::{text_height, text_width};
use engine::ui::Rect;

pub const SCREEN_TITLE_Y: u32 = 150;
pub const SCREEN_TITLE_SCALE: u32 = 10;

pub const SONG_ROW_START_Y: u32 = 300;
pub const SONG_ROW_STEP_Y: u32 = 100;
pub const SONG_TITLE_SCALE: u32 = 7;
pub const SONG_TITLE_HOVER_SCALE: u32 = 8;

pub const HUD_MARGIN: u32 = 20;
pub const SCORE_TEXT_SCALE: u32 = 6;
pub const TICK_TEXT_SCALE: u32 = 4;

pub const COUNTDOWN_SCALE: u32 = 24;
pub const GAME_OVER_SCALE: u32 = 6;
pub const GAME_OVER_HINT_SCALE: u32 = 4;

/// Bounding box of `text` horizontally centered in `width` with its
/// vertical midpoint on `y_center`.
pub fn centered_text_rect(width: u32, y_center: u32, text: &str, scale: u32) -> Rect {
    let w = text_width(text, scale);
    let h = text_height(scale);
    Rect::new(
        width.saturating_sub(w) / 2,
        y_center.saturating_sub(h / 2),
        w,
        h,
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongSelectLayout {
    pub title: Rect,
    pub rows: Vec<Rect>,
}

impl SongSelectLayout {
    pub fn compute(width: u32, titles: &[String]) -> Self {
        let title = centered_text_rect(width, SCREEN_TITLE_Y, "SONG SELECTION", SCREEN_TITLE_SCALE);
        let rows = titles
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let y_center = SONG_ROW_START_Y + i as u32 * SONG_ROW_STEP_Y;
                centered_text_rect(width, y_center, t, SONG_TITLE_SCALE)
            })
            .collect();
        Self { title, rows }
    }

    /// Index of the song row under the point, if any. Rows use the
    /// normal-size text box, matching the click behavior of the hover
    /// highlight.
    pub fn row_at(&self, x: u32, y: u32) -> Option<usize> {
        self.rows.iter().position(|r| r.contains(x, y))
    }

    pub fn hovered(&self, mouse: Option<(u32, u32)>) -> Option<usize> {
        mouse.and_then(|(x, y)| self.row_at(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles() -> Vec<String> {
        vec!["Alpha".to_string(), "Beta".to_string(), "Gamma Gamma".to_string()]
    }

    #[test]
    fn rows_are_centered_and_evenly_spaced() {
        let layout = SongSelectLayout::compute(1600, &titles());
        assert_eq!(layout.rows.len(), 3);

        for (i, row) in layout.rows.iter().enumerate() {
            let (cx, cy) = row.center();
            // Centering is exact up to integer division.
            assert!((cx as i64 - 800).abs() <= 4, "row {i} off-center: {cx}");
            let expected = SONG_ROW_START_Y + i as u32 * SONG_ROW_STEP_Y;
            assert!((cy as i64 - expected as i64).abs() <= 4);
        }
    }

    #[test]
    fn longer_titles_get_wider_rows() {
        let layout = SongSelectLayout::compute(1600, &titles());
        assert!(layout.rows[2].w > layout.rows[0].w);
    }

    #[test]
    fn row_at_finds_rows_and_rejects_gaps() {
        let layout = SongSelectLayout::compute(1600, &titles());
        let (cx, cy) = layout.rows[1].center();
        assert_eq!(layout.row_at(cx, cy), Some(1));
        // Mid-way between two rows is dead space.
        assert_eq!(layout.row_at(800, SONG_ROW_START_Y + SONG_ROW_STEP_Y / 2), None);
        assert_eq!(layout.hovered(None), None);
    }
}
