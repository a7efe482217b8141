//! Key event latch
//!
//! Turns raw key-down/key-up/key-repeat events from the platform shell into
//! the four held paddle buttons plus one-shot navigation commands.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::settings::Bindings;
use crate::sim::{Side, Steer, TickInput};

/// Physical key identifier delivered by the platform shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    KeyW,
    KeyS,
    KeyP,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
    Space,
    /// Any other key, by platform scan/virtual code
    Other(u32),
}

/// Raw key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(KeyCode),
    /// Auto-repeat while held
    Repeated(KeyCode),
    Released(KeyCode),
}

/// What a bound key does
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    LeftPaddleUp,
    LeftPaddleDown,
    RightPaddleUp,
    RightPaddleDown,
    NavLeft,
    NavRight,
    Confirm,
    PauseToggle,
    Quit,
}

impl Action {
    /// (up, down) actions for a paddle
    pub fn paddle_pair(side: Side) -> (Action, Action) {
        match side {
            Side::Left => (Action::LeftPaddleUp, Action::LeftPaddleDown),
            Side::Right => (Action::RightPaddleUp, Action::RightPaddleDown),
        }
    }

    /// One-shot command for this action; `None` for held paddle buttons
    pub fn command(self) -> Option<Command> {
        match self {
            Action::NavLeft => Some(Command::NavLeft),
            Action::NavRight => Some(Command::NavRight),
            Action::Confirm => Some(Command::Confirm),
            Action::PauseToggle => Some(Command::PauseToggle),
            Action::Quit => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Discrete event consumed by the game flow, one per physical key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A key with no navigation meaning (paddle keys, unbound keys)
    AnyKey,
    NavLeft,
    NavRight,
    Confirm,
    PauseToggle,
    Quit,
}

/// Latched keyboard state between ticks
#[derive(Debug, Clone)]
pub struct InputLatch {
    bindings: Bindings,
    keys_down: HashSet<KeyCode>,
    held: TickInput,
    pending: Vec<Command>,
}

impl InputLatch {
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            keys_down: HashSet::new(),
            held: TickInput::default(),
            pending: Vec::new(),
        }
    }

    pub fn handle(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Pressed(code) => {
                // Platforms that repeat key-down without a repeat flag land here too
                let fresh = self.keys_down.insert(code);
                let action = self.bindings.action_for(code);
                if let Some(action) = action {
                    self.set_held(action, true);
                }
                if fresh {
                    let command = action.and_then(Action::command).unwrap_or(Command::AnyKey);
                    self.pending.push(command);
                }
            }
            KeyEvent::Repeated(code) => {
                self.keys_down.insert(code);
                if let Some(action) = self.bindings.action_for(code) {
                    self.set_held(action, true);
                }
            }
            KeyEvent::Released(code) => {
                self.keys_down.remove(&code);
                if let Some(action) = self.bindings.action_for(code) {
                    self.set_held(action, false);
                }
            }
        }
    }

    fn set_held(&mut self, action: Action, down: bool) {
        let slot = match action {
            Action::LeftPaddleUp => &mut self.held.left.up,
            Action::LeftPaddleDown => &mut self.held.left.down,
            Action::RightPaddleUp => &mut self.held.right.up,
            Action::RightPaddleDown => &mut self.held.right.down,
            _ => return,
        };
        *slot = down;
    }

    pub fn is_key_down(&self, code: KeyCode) -> bool {
        self.keys_down.contains(&code)
    }

    /// Held paddle buttons as of now
    pub fn tick_input(&self) -> TickInput {
        self.held
    }

    pub fn steer(&self, side: Side) -> Steer {
        self.held.for_side(side)
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Take the commands queued since the last call, oldest first
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }
}
