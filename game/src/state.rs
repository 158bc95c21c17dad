use std::time::Duration;

use crate::session::Session;
use crate::songs::Song;
use crate::view::{Screen, ScreenEffect, ScreenEvent};

/// Screen machine plus the state hanging off it.
///
/// Invariant: a session (and with it the one current song) exists exactly
/// while the screen is Countdown, Playing or GameOver; SongSelect has none.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub screen: Screen,
    pub session: Option<Session>,
    pub countdown_remaining: Duration,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Song clicked on the select screen: start a fresh session and arm the
    /// countdown. Ignored outside SongSelect.
    pub fn choose_song(&mut self, song: Song, seed: u64, countdown: Duration) {
        let (next, effect) = self.screen.handle(ScreenEvent::SongChosen);
        if effect == ScreenEffect::BeginCountdown {
            self.session = Some(Session::new(song, seed));
            self.countdown_remaining = countdown;
        }
        self.screen = next;
    }

    /// Burns wall-clock time off the countdown; flips to Playing once it
    /// reaches zero. A zero-length countdown passes through on the first
    /// tick.
    pub fn tick_countdown(&mut self, dt: Duration) {
        if self.screen != Screen::Countdown {
            return;
        }
        self.countdown_remaining = self.countdown_remaining.saturating_sub(dt);
        if self.countdown_remaining.is_zero() {
            let (next, _) = self.screen.handle(ScreenEvent::CountdownFinished);
            self.screen = next;
        }
    }

    /// Whole seconds left on the countdown, rounded up for display.
    pub fn countdown_display_secs(&self) -> u64 {
        let remaining = self.countdown_remaining;
        if remaining.is_zero() {
            return 0;
        }
        let secs = remaining.as_secs();
        if remaining.subsec_nanos() > 0 { secs + 1 } else { secs }
    }

    /// The explicit, externally-triggered end condition for a run.
    pub fn end_session(&mut self) {
        let (next, _) = self.screen.handle(ScreenEvent::EndSession);
        self.screen = next;
    }

    /// Restart from GAME_OVER: the session is discarded, so the score is
    /// back at zero when the next one starts.
    pub fn restart(&mut self) {
        let (next, effect) = self.screen.handle(ScreenEvent::Restart);
        if effect == ScreenEffect::DiscardSession {
            self.session = None;
        }
        self.screen = next;
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.session.as_ref().map(|s| s.song())
    }
}
