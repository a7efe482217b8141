//! Game flow: menu, difficulty select, play, pause and the resume countdown

use log::{info, warn};

use super::difficulty::{Difficulty, profile};
use super::state::{GameMode, GameState, PauseCursor, PauseState};
use crate::input::Command;

/// Whether the driver should keep running after this command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    Continue,
    Quit,
}

/// Apply one discrete command to the game flow
pub fn apply_command(state: &mut GameState, command: Command) -> FlowOutcome {
    if command == Command::Quit {
        info!("Quit requested");
        return FlowOutcome::Quit;
    }

    match state.mode {
        GameMode::Menu => {
            // Any key leaves the title screen and is consumed by it
            state.mode = GameMode::DifficultySelect;
            state.selector = Some(Difficulty::Easy);
            info!("Title -> difficulty select");
        }

        GameMode::DifficultySelect => match command {
            Command::NavLeft => state.selector = state.selector.map(Difficulty::prev),
            Command::NavRight => state.selector = state.selector.map(Difficulty::next),
            Command::Confirm => match state.selector {
                Some(difficulty) => start_match(state, difficulty),
                None => warn!("Confirm with no difficulty selected, ignoring"),
            },
            _ => {}
        },

        GameMode::Playing => {
            if command == Command::PauseToggle {
                state.mode = GameMode::Paused(PauseState::default());
                info!("Paused");
            }
        }

        GameMode::Paused(mut pause) => {
            if pause.counting_down {
                return FlowOutcome::Continue;
            }
            match command {
                Command::NavLeft => pause.cursor = pause.cursor.prev(),
                Command::NavRight => pause.cursor = pause.cursor.next(),
                Command::Confirm => match pause.cursor {
                    PauseCursor::Resume => {
                        pause.counting_down = true;
                        pause.countdown_remaining = state.tuning.resume_countdown;
                        info!("Resuming in {:.1}s", pause.countdown_remaining);
                    }
                    PauseCursor::ExitToMenu => {
                        exit_to_menu(state);
                        return FlowOutcome::Continue;
                    }
                },
                _ => {}
            }
            state.mode = GameMode::Paused(pause);
        }
    }

    FlowOutcome::Continue
}

/// Run down the resume countdown; switches back to Playing once it hits zero
pub fn update_countdown(state: &mut GameState, dt: f32) {
    let expired = match &mut state.mode {
        GameMode::Paused(pause) if pause.counting_down => {
            pause.countdown_remaining -= dt;
            pause.countdown_remaining <= 0.0
        }
        _ => false,
    };
    if expired {
        state.mode = GameMode::Playing;
        info!("Resumed");
    }
}

/// Fresh match at `difficulty`: scores cleared, paddles centered, serve to the left
pub fn start_match(state: &mut GameState, difficulty: Difficulty) {
    let profile = profile(difficulty, &state.tuning);
    state.speed_factor = profile.speed_factor;
    state.left.speed = profile.paddle_speed;
    state.right.speed = profile.paddle_speed;
    state.score.reset();
    state.center_paddles();
    state.reset_round(-1.0);
    state.mode = GameMode::Playing;
    info!(
        "Match started on {} (speed factor {}, paddle speed {})",
        difficulty, profile.speed_factor, profile.paddle_speed
    );
}

fn exit_to_menu(state: &mut GameState) {
    state.selector = None;
    state.score.reset();
    state.reset_round(-1.0);
    state.mode = GameMode::Menu;
    info!("Exited to menu");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;

    fn state() -> GameState {
        GameState::new(Tuning::default())
    }

    fn apply_all(state: &mut GameState, commands: &[Command]) {
        for &command in commands {
            assert_eq!(apply_command(state, command), FlowOutcome::Continue);
        }
    }

    #[test]
    fn test_any_key_leaves_menu_at_easy() {
        for command in [
            Command::AnyKey,
            Command::Confirm,
            Command::NavRight,
            Command::PauseToggle,
        ] {
            let mut state = state();
            apply_all(&mut state, &[command]);
            assert_eq!(state.mode, GameMode::DifficultySelect);
            assert_eq!(state.selector, Some(Difficulty::Easy));
        }
    }

    #[test]
    fn test_quit_from_any_mode() {
        let mut state = state();
        assert_eq!(apply_command(&mut state, Command::Quit), FlowOutcome::Quit);
        assert_eq!(state.mode, GameMode::Menu);

        apply_all(&mut state, &[Command::AnyKey, Command::Confirm]);
        assert_eq!(apply_command(&mut state, Command::Quit), FlowOutcome::Quit);
    }

    #[test]
    fn test_selector_clamps_at_bounds() {
        let mut state = state();
        apply_all(&mut state, &[Command::AnyKey, Command::NavLeft]);
        assert_eq!(state.selector, Some(Difficulty::Easy));

        apply_all(
            &mut state,
            &[Command::NavRight, Command::NavRight, Command::NavRight],
        );
        assert_eq!(state.selector, Some(Difficulty::Hard));
    }

    #[test]
    fn test_confirm_applies_hard_profile() {
        let mut state = state();
        state.score.left = 4;
        state.hit_count = 2;
        apply_all(
            &mut state,
            &[
                Command::AnyKey,
                Command::NavRight,
                Command::NavRight,
                Command::Confirm,
            ],
        );

        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.selector, Some(Difficulty::Hard));
        assert_eq!(state.speed_factor, 2.10);
        assert_eq!(state.left.speed, 14);
        assert_eq!(state.right.speed, 14);
        assert_eq!(state.score.left, 0);
        assert_eq!(state.hit_count, 0);
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_confirm_without_selector_is_noop() {
        let mut state = state();
        state.mode = GameMode::DifficultySelect;
        apply_all(&mut state, &[Command::Confirm]);
        assert_eq!(state.mode, GameMode::DifficultySelect);
        assert_eq!(state.selector, None);
    }

    #[test]
    fn test_pause_only_while_playing() {
        let mut state = state();
        apply_all(&mut state, &[Command::AnyKey, Command::PauseToggle]);
        assert_eq!(state.mode, GameMode::DifficultySelect);

        apply_all(&mut state, &[Command::Confirm, Command::PauseToggle]);
        assert_eq!(state.mode, GameMode::Paused(PauseState::default()));

        // A second toggle does not unpause
        apply_all(&mut state, &[Command::PauseToggle]);
        assert!(matches!(state.mode, GameMode::Paused(_)));
    }

    #[test]
    fn test_pause_cursor_and_countdown() {
        let mut state = state();
        apply_all(
            &mut state,
            &[
                Command::AnyKey,
                Command::Confirm,
                Command::PauseToggle,
                Command::NavRight,
                Command::NavRight,
                Command::NavLeft,
                Command::Confirm,
            ],
        );
        let pause = *state.mode.pause().expect("paused");
        assert!(pause.counting_down);
        assert_eq!(pause.cursor, PauseCursor::Resume);
        assert_eq!(pause.countdown_remaining, 2.0);

        // Navigation and confirm are ignored while counting down
        apply_all(&mut state, &[Command::NavRight, Command::Confirm]);
        assert_eq!(state.mode, GameMode::Paused(pause));

        update_countdown(&mut state, 1.5);
        assert!(matches!(state.mode, GameMode::Paused(_)));
        update_countdown(&mut state, 0.5);
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_countdown_idle_without_resume() {
        let mut state = state();
        apply_all(
            &mut state,
            &[Command::AnyKey, Command::Confirm, Command::PauseToggle],
        );
        update_countdown(&mut state, 10.0);
        assert_eq!(state.mode, GameMode::Paused(PauseState::default()));
    }

    #[test]
    fn test_exit_to_menu_resets_match() {
        let mut state = state();
        apply_all(&mut state, &[Command::AnyKey, Command::Confirm]);
        state.score.right = 3;
        state.hit_count = 5;
        state.ball.pos.x = 100.0;

        apply_all(
            &mut state,
            &[Command::PauseToggle, Command::NavRight, Command::Confirm],
        );

        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.selector, None);
        assert_eq!(state.score.right, 0);
        assert_eq!(state.hit_count, 0);
        assert_eq!(state.ball.pos, state.viewport / 2.0);
    }
}
