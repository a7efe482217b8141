//! Game state and core simulation types
//!
//! Everything the frame driver and renderer can observe lives in `GameState`.

use glam::Vec2;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, profile};
use super::tick::Steer;
use crate::settings::Tuning;

/// Which paddle / half of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Horizontal sign pointing from this side's paddle into the field
    #[inline]
    pub fn toward_field(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Pause menu entry under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PauseCursor {
    #[default]
    Resume,
    ExitToMenu,
}

impl PauseCursor {
    pub fn prev(self) -> Self {
        PauseCursor::Resume
    }

    pub fn next(self) -> Self {
        PauseCursor::ExitToMenu
    }
}

/// Sub-state of the pause screen
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PauseState {
    pub cursor: PauseCursor,
    /// Seconds left before play resumes (only meaningful while counting down)
    pub countdown_remaining: f32,
    pub counting_down: bool,
}

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for any key
    #[default]
    Menu,
    /// Choosing Easy/Medium/Hard
    DifficultySelect,
    /// Active gameplay
    Playing,
    /// Pause menu, optionally counting down to resume
    Paused(PauseState),
}

impl GameMode {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameMode::Playing)
    }

    pub fn pause(&self) -> Option<&PauseState> {
        match self {
            GameMode::Paused(pause) => Some(pause),
            _ => None,
        }
    }
}

/// Something a physics step produced, for effects in the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce,
    PaddleHit { side: Side, hits: u32 },
    Scored { side: Side },
}

/// A vertical paddle. `y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub y: f32,
    pub height: f32,
    /// Pixels per tick while a direction is held
    pub speed: i32,
}

impl Paddle {
    pub fn new(height: f32, speed: i32, viewport_height: f32) -> Self {
        let mut paddle = Self {
            y: 0.0,
            height,
            speed,
        };
        paddle.center(viewport_height);
        paddle
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Largest legal `y`; zero when the viewport is shorter than the paddle
    #[inline]
    pub fn max_y(&self, viewport_height: f32) -> f32 {
        (viewport_height - self.height).max(0.0)
    }

    pub fn center(&mut self, viewport_height: f32) {
        self.y = self.max_y(viewport_height) / 2.0;
    }

    pub fn clamp(&mut self, viewport_height: f32) {
        self.y = self.y.clamp(0.0, self.max_y(viewport_height));
    }

    /// Move by the held directions, then clamp
    pub fn steer(&mut self, steer: Steer, viewport_height: f32) {
        let speed = self.speed as f32;
        if steer.up {
            self.y -= speed;
        }
        if steer.down {
            self.y += speed;
        }
        self.clamp(viewport_height);
    }
}

/// The ball. Velocity is in pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Place at the viewport center with the serve velocity, horizontal sign from `direction`
    pub fn serve(&mut self, viewport: Vec2, serve_velocity: Vec2, direction: f32) {
        self.pos = viewport / 2.0;
        self.vel = Vec2::new(direction.signum() * serve_velocity.x.abs(), serve_velocity.y);
    }

    /// Keep the ball inside `[r, max(r, extent - r)]` on both axes
    pub fn clamp_to(&mut self, viewport: Vec2) {
        let min = Vec2::splat(self.radius);
        let max = (viewport - min).max(min);
        self.pos = self.pos.clamp(min, max);
    }
}

/// Points per side for the current match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Read-only view handed to the renderer once per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub difficulty: Option<Difficulty>,
    pub left_paddle_y: f32,
    pub right_paddle_y: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub score_left: u32,
    pub score_right: u32,
    pub hit_count: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Snapshot {
    pub fn pause(&self) -> Option<&PauseState> {
        self.mode.pause()
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    /// Highlighted / active difficulty; `None` until the player reaches the select screen
    pub selector: Option<Difficulty>,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Paddle hits since the last round reset
    pub hit_count: u32,
    /// Ball speed multiplier per paddle hit for the active difficulty
    pub speed_factor: f32,
    /// Viewport size in pixels (x = width, y = height)
    pub viewport: Vec2,
    pub tuning: Tuning,
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        let viewport = Vec2::new(tuning.viewport_width, tuning.viewport_height);
        let easy = profile(Difficulty::Easy, &tuning);
        let mut state = Self {
            mode: GameMode::Menu,
            selector: None,
            left: Paddle::new(tuning.paddle_height, easy.paddle_speed, viewport.y),
            right: Paddle::new(tuning.paddle_height, easy.paddle_speed, viewport.y),
            ball: Ball::new(tuning.ball_radius),
            score: Score::default(),
            hit_count: 0,
            speed_factor: easy.speed_factor,
            viewport,
            tuning,
        };
        state.reset_round(-1.0);
        state
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// x of the plane the ball bounces off for this paddle
    pub fn paddle_face_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.tuning.paddle_inset,
            Side::Right => self.viewport.x - self.tuning.paddle_inset,
        }
    }

    /// Adopt a (possibly new) viewport size and re-clamp everything to it
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() {
            warn!("Ignoring non-finite viewport {}x{}", width, height);
            return;
        }
        let viewport = Vec2::new(width.max(0.0), height.max(0.0));
        if viewport == self.viewport {
            return;
        }
        debug!(
            "Viewport {}x{} -> {}x{}",
            self.viewport.x, self.viewport.y, viewport.x, viewport.y
        );
        self.viewport = viewport;
        self.left.clamp(viewport.y);
        self.right.clamp(viewport.y);
        self.ball.clamp_to(viewport);
    }

    pub fn center_paddles(&mut self) {
        let height = self.viewport.y;
        self.left.center(height);
        self.right.center(height);
    }

    /// Re-serve from the center; `direction` < 0 serves toward the left
    pub fn reset_round(&mut self, direction: f32) {
        self.ball
            .serve(self.viewport, self.tuning.serve_velocity, direction);
        self.hit_count = 0;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode,
            difficulty: self.selector,
            left_paddle_y: self.left.y,
            right_paddle_y: self.right.y,
            paddle_width: self.tuning.paddle_width,
            paddle_height: self.left.height,
            ball_x: self.ball.pos.x,
            ball_y: self.ball.pos.y,
            score_left: self.score.left,
            score_right: self.score.right,
            hit_count: self.hit_count,
            viewport_width: self.viewport.x,
            viewport_height: self.viewport.y,
        }
    }
}
