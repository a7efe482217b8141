//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Single explicit `GameState`, no globals
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod flow;
pub mod state;
pub mod tick;

pub use collision::{PaddleContact, bounce_off_walls, scoring_side, swept_paddle_contact};
pub use difficulty::{Difficulty, DifficultyProfile, ParseDifficultyError, profile};
pub use flow::{FlowOutcome, apply_command, update_countdown};
pub use state::{
    Ball, GameEvent, GameMode, GameState, Paddle, PauseCursor, PauseState, Score, Side, Snapshot,
};
pub use tick::{Steer, TickInput, tick};
