//! Fixed timestep physics step
//!
//! One call advances paddles and ball by one tick. Order matters: paddles,
//! ball integration, walls, paddle contact, scoring.

use glam::Vec2;
use log::{debug, info};

use super::collision::{PaddleContact, bounce_off_walls, scoring_side, swept_paddle_contact};
use super::state::{GameEvent, GameState, Side};

/// Held directions for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steer {
    pub up: bool,
    pub down: bool,
}

impl Steer {
    pub const NONE: Steer = Steer {
        up: false,
        down: false,
    };
    pub const UP: Steer = Steer {
        up: true,
        down: false,
    };
    pub const DOWN: Steer = Steer {
        up: false,
        down: true,
    };
}

/// Held input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: Steer,
    pub right: Steer,
}

impl TickInput {
    pub fn for_side(&self, side: Side) -> Steer {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Advance the match by one tick. Caller is responsible for only stepping while playing.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let height = state.viewport.y;

    state.left.steer(input.left, height);
    state.right.steer(input.right, height);

    let prev = state.ball.pos;
    state.ball.pos += state.ball.vel;

    if bounce_off_walls(&mut state.ball, height) {
        events.push(GameEvent::WallBounce);
    }

    let vel_x = state.ball.vel.x;
    let approaching = if vel_x < 0.0 {
        Some(Side::Left)
    } else if vel_x > 0.0 {
        Some(Side::Right)
    } else {
        None
    };
    if let Some(side) = approaching {
        let paddle = state.paddle(side);
        let contact = swept_paddle_contact(
            prev,
            state.ball.pos,
            vel_x,
            state.ball.radius,
            side,
            state.paddle_face_x(side),
            paddle.top(),
            paddle.height,
        );
        if let Some(contact) = contact {
            return_ball(state, side, &contact);
            events.push(GameEvent::PaddleHit {
                side,
                hits: state.hit_count,
            });
        }
    }

    if let Some(scorer) = scoring_side(&state.ball, state.viewport.x) {
        state.score.award(scorer);
        // Next serve heads toward the side that just scored
        state.reset_round(-scorer.toward_field());
        info!(
            "Point {} ({} - {})",
            scorer.as_str(),
            state.score.left,
            state.score.right
        );
        events.push(GameEvent::Scored { side: scorer });
    }

    events
}

/// Send the ball back into the field after it met `side`'s paddle
fn return_ball(state: &mut GameState, side: Side, contact: &PaddleContact) {
    state.hit_count += 1;
    let toward = side.toward_field();
    let face_x = state.paddle_face_x(side);
    let tuning = state.tuning;
    let ball = &mut state.ball;

    if state.hit_count <= tuning.max_hits_for_speed_increase {
        ball.vel.x = toward * ball.vel.x.abs() * state.speed_factor;
        ball.vel.y *= state.speed_factor;
    } else {
        ball.vel.x = toward * ball.vel.x.abs();
    }

    ball.pos = Vec2::new(face_x + toward * ball.radius, contact.point.y);
    ball.vel.y += (contact.hit_fraction.clamp(0.0, 1.0) - 0.5) * tuning.deflection_gain;

    debug!(
        "{} paddle hit #{} at {:.2}, vel now ({:.2}, {:.2})",
        side.as_str(),
        state.hit_count,
        contact.hit_fraction,
        ball.vel.x,
        ball.vel.y
    );
}
