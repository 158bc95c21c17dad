#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    SongSelect,
    Countdown,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    SongChosen,
    CountdownFinished,
    EndSession,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEffect {
    None,
    BeginCountdown,
    DiscardSession,
}

impl Screen {
    /// Pure transition function for the screen state machine.
    ///
    /// Side-effects (creating or discarding a session, arming the countdown
    /// timer) are reported via `ScreenEffect` so callers stay deterministic
    /// and easy to test. Quitting is not an event here: it is a hard
    /// process exit from any screen.
    pub fn handle(self, event: ScreenEvent) -> (Screen, ScreenEffect) {
        match (self, event) {
            (Screen::SongSelect, ScreenEvent::SongChosen) => {
                (Screen::Countdown, ScreenEffect::BeginCountdown)
            }
            (Screen::Countdown, ScreenEvent::CountdownFinished) => {
                (Screen::Playing, ScreenEffect::None)
            }
            (Screen::Playing, ScreenEvent::EndSession) => (Screen::GameOver, ScreenEffect::None),
            (Screen::GameOver, ScreenEvent::Restart) => {
                (Screen::SongSelect, ScreenEffect::DiscardSession)
            }

            // Ignore irrelevant events in the current screen.
            (screen, _) => (screen, ScreenEffect::None),
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, Screen::Playing)
    }
}
