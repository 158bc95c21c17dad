use std::time::Duration;

use tapline::session::HIT_AWARD;
use tapline::songs::{Song, SongLibrary};
use tapline::state::GameState;
use tapline::view::Screen;

fn first_song() -> Song {
    SongLibrary::builtin().get(0).cloned().unwrap()
}

#[test]
fn full_cycle_song_select_to_restart() {
    let mut state = GameState::new();
    assert_eq!(state.screen, Screen::SongSelect);
    assert!(state.current_song().is_none());

    state.choose_song(first_song(), 42, Duration::from_secs(3));
    assert_eq!(state.screen, Screen::Countdown);
    assert_eq!(state.current_song().map(|s| s.title.as_str()), Some("APT - ROSE & Bruno Mars"));

    // Countdown burns off in wall-clock steps.
    state.tick_countdown(Duration::from_secs(2));
    assert_eq!(state.screen, Screen::Countdown);
    state.tick_countdown(Duration::from_secs(2));
    assert_eq!(state.screen, Screen::Playing);

    // Score some points mid-run.
    {
        let session = state.session.as_mut().unwrap();
        session.set_frame_rate(60.0);
        session.targets_mut().light(1);
        let center = session.targets().targets()[1].center;
        session.handle_press(center);
        assert_eq!(session.score(), HIT_AWARD);
    }

    // The explicit end condition moves to GAME_OVER; the session (and its
    // final score) survives for the results screen.
    state.end_session();
    assert_eq!(state.screen, Screen::GameOver);
    assert_eq!(state.session.as_ref().unwrap().score(), HIT_AWARD);

    // Restart key: back to song select, score gone with the session.
    state.restart();
    assert_eq!(state.screen, Screen::SongSelect);
    assert!(state.session.is_none());

    // The next run starts from zero.
    state.choose_song(first_song(), 43, Duration::ZERO);
    assert_eq!(state.session.as_ref().unwrap().score(), 0);
}

#[test]
fn restart_only_works_from_game_over() {
    let mut state = GameState::new();
    state.choose_song(first_song(), 1, Duration::from_secs(1));

    state.restart();
    assert_eq!(state.screen, Screen::Countdown);
    assert!(state.session.is_some());

    state.tick_countdown(Duration::from_secs(2));
    state.restart();
    assert_eq!(state.screen, Screen::Playing);
    assert!(state.session.is_some());
}

#[test]
fn end_session_is_ignored_outside_playing() {
    let mut state = GameState::new();
    state.end_session();
    assert_eq!(state.screen, Screen::SongSelect);

    state.choose_song(first_song(), 1, Duration::from_secs(1));
    state.end_session();
    assert_eq!(state.screen, Screen::Countdown);
}

#[test]
fn choosing_twice_keeps_the_first_song_current() {
    let mut state = GameState::new();
    let library = SongLibrary::builtin();

    state.choose_song(library.get(0).cloned().unwrap(), 1, Duration::from_secs(1));
    let second = library.get(1).cloned().unwrap();
    state.choose_song(second, 2, Duration::from_secs(1));

    // Only one song is ever current for a cycle.
    assert_eq!(
        state.current_song().map(|s| s.title.clone()),
        Some("APT - ROSE & Bruno Mars".to_string())
    );
}
