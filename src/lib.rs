//! Paddle Duel - a two-paddle arcade ball game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (game flow, physics, collisions, difficulty)
//! - `input`: Key event latch (held paddle buttons + one-shot navigation events)
//! - `settings`: Tuning and key bindings, loaded from JSON
//! - `game`: The per-frame facade a rendering shell drives

pub mod game;
pub mod input;
pub mod settings;
pub mod sim;

pub use game::{Game, TickOutcome};
pub use input::{Action, InputLatch, KeyCode, KeyEvent};
pub use settings::{Bindings, Settings, SettingsError, Tuning};
pub use sim::{Difficulty, GameMode, GameState, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Nominal tick duration handed to `Game::advance` by the frame driver (seconds)
    pub const TICK_DT: f32 = 0.016;

    /// Default viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 1280.0;
    pub const VIEWPORT_HEIGHT: f32 = 720.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Distance from the side edge to the paddle's hitting face
    pub const PADDLE_INSET: f32 = 20.0;
    /// Paddle speed on Easy (pixels per tick)
    pub const BASE_PADDLE_SPEED: i32 = 8;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 6.0;
    /// Serve velocity (pixels per tick); x sign is replaced by the serve direction
    pub const SERVE_VELOCITY_X: f32 = 5.0;
    pub const SERVE_VELOCITY_Y: f32 = 3.0;

    /// Paddle hits per round that still speed the ball up
    pub const MAX_HITS_FOR_SPEED_INCREASE: u32 = 6;
    /// Extra vertical velocity for an edge hit (scaled by offset from paddle center)
    pub const DEFLECTION_GAIN: f32 = 6.0;

    /// Countdown after choosing Resume in the pause menu (seconds)
    pub const RESUME_COUNTDOWN: f32 = 2.0;

    /// Per-difficulty ball speed factor applied on each paddle hit
    pub const SPEED_FACTORS: [f32; 3] = [1.25, 1.75, 2.10];
    /// Per-difficulty paddle speed bonus on top of `BASE_PADDLE_SPEED`
    pub const PADDLE_SPEED_BONUS: [i32; 3] = [0, 3, 6];
}
