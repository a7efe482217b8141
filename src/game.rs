//! Per-frame facade driven by the platform shell
//!
//! The shell forwards key events as they arrive, calls `advance` once per
//! frame, then reads `snapshot` to draw.

use log::{trace, warn};

use crate::input::{Action, InputLatch, KeyEvent};
use crate::settings::Settings;
use crate::sim::{
    FlowOutcome, GameEvent, GameState, Side, Snapshot, Steer, apply_command, tick,
    update_countdown,
};

/// What the driver should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Quit was pressed; stop after this tick
    Quit,
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    settings: Settings,
    latch: InputLatch,
    state: GameState,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        Self {
            latch: InputLatch::new(settings.bindings.clone()),
            state: GameState::new(settings.tuning),
            events: Vec::new(),
            settings,
        }
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        self.latch.handle(event);
    }

    /// Hold or release a paddle's bound keys to match `steer`
    pub fn apply_steer(&mut self, side: Side, steer: Steer) {
        let (up, down) = Action::paddle_pair(side);
        self.hold(up, steer.up);
        self.hold(down, steer.down);
    }

    fn hold(&mut self, action: Action, down: bool) {
        let Some(code) = self.settings.bindings.key_for(action) else {
            return;
        };
        if self.latch.is_key_down(code) == down {
            return;
        }
        self.latch.handle(if down {
            KeyEvent::Pressed(code)
        } else {
            KeyEvent::Released(code)
        });
    }

    /// Advance one frame: input commands, game flow, then physics if playing
    pub fn advance(&mut self, dt: f32, viewport_width: f32, viewport_height: f32) -> TickOutcome {
        self.events.clear();
        self.state.set_viewport(viewport_width, viewport_height);

        let mut outcome = TickOutcome::Continue;
        for command in self.latch.drain_commands() {
            trace!("Command {:?} in {:?}", command, self.state.mode);
            if apply_command(&mut self.state, command) == FlowOutcome::Quit {
                outcome = TickOutcome::Quit;
            }
        }
        if dt.is_finite() && dt > 0.0 {
            update_countdown(&mut self.state, dt);
        } else {
            warn!("Ignoring frame time {}", dt);
        }

        if self.state.mode.is_playing() {
            self.events = tick(&mut self.state, &self.latch.tick_input());
        }

        outcome
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Events produced by the most recent `advance`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::sim::GameMode;

    const DT: f32 = crate::consts::TICK_DT;

    fn tap(game: &mut Game, code: KeyCode) {
        game.handle_key(KeyEvent::Pressed(code));
        game.handle_key(KeyEvent::Released(code));
        game.advance(DT, 1280.0, 720.0);
    }

    #[test]
    fn test_menu_key_is_not_a_paddle_move() {
        let mut game = Game::new(Settings::default());
        game.handle_key(KeyEvent::Pressed(KeyCode::KeyW));
        game.advance(DT, 1280.0, 720.0);
        assert_eq!(game.snapshot().mode, GameMode::DifficultySelect);
        assert_eq!(game.state().left.y, 310.0);
    }

    #[test]
    fn test_confirm_tick_steps_physics() {
        let mut game = Game::new(Settings::default());
        tap(&mut game, KeyCode::Space);
        tap(&mut game, KeyCode::Enter);
        assert_eq!(game.snapshot().mode, GameMode::Playing);
        assert_eq!(game.snapshot().ball_x, 635.0);

        game.advance(DT, 1280.0, 720.0);
        assert_eq!(game.snapshot().ball_x, 630.0);
    }

    #[test]
    fn test_pause_tick_does_not_step_physics() {
        let mut game = Game::new(Settings::default());
        tap(&mut game, KeyCode::Space);
        tap(&mut game, KeyCode::Enter);
        let ball = game.state().ball;
        tap(&mut game, KeyCode::KeyP);
        assert!(game.snapshot().pause().is_some());
        assert_eq!(game.state().ball, ball);
    }

    #[test]
    fn test_bad_frame_time_does_not_stall_countdown() {
        let mut game = Game::new(Settings::default());
        tap(&mut game, KeyCode::Space);
        tap(&mut game, KeyCode::Enter);
        tap(&mut game, KeyCode::KeyP);
        tap(&mut game, KeyCode::Enter);

        for dt in [f32::NAN, f32::INFINITY, 0.0, -1.0] {
            game.advance(dt, 1280.0, 720.0);
            let pause = *game.snapshot().pause().unwrap();
            assert!(pause.countdown_remaining.is_finite());
            assert!(pause.countdown_remaining > 0.0);
        }

        for _ in 0..200 {
            game.advance(DT, 1280.0, 720.0);
        }
        assert_eq!(game.snapshot().mode, GameMode::Playing);
    }

    #[test]
    fn test_apply_steer_drives_bound_keys() {
        let mut game = Game::new(Settings::default());
        tap(&mut game, KeyCode::Space);
        tap(&mut game, KeyCode::Enter);

        game.apply_steer(Side::Right, Steer::UP);
        game.advance(DT, 1280.0, 720.0);
        assert_eq!(game.state().right.y, 302.0);

        game.apply_steer(Side::Right, Steer::NONE);
        game.advance(DT, 1280.0, 720.0);
        assert_eq!(game.state().right.y, 302.0);
    }

    #[test]
    fn test_quit_reports_after_tick() {
        let mut game = Game::new(Settings::default());
        game.handle_key(KeyEvent::Pressed(KeyCode::Escape));
        assert_eq!(game.advance(DT, 1280.0, 720.0), TickOutcome::Quit);
    }
}
