//! Simple ball-tracking controller for unattended play (demo mode, soak tests)
//!
//! Produces held-direction intents only; they go through the same input latch
//! a human player's keys do.

use super::state::{Ball, Paddle, Side};
use super::tick::Steer;

/// Decide which direction `side`'s paddle should hold this tick
pub fn steer(paddle: &Paddle, side: Side, ball: &Ball, viewport_height: f32) -> Steer {
    // Track the ball while it approaches, otherwise drift back to center
    let approaching = ball.vel.x * side.toward_field() < 0.0;
    let target = if approaching {
        ball.pos.y
    } else {
        viewport_height / 2.0
    };

    let dead_zone = paddle.height / 4.0;
    let center = paddle.center_y();
    if target < center - dead_zone {
        Steer::UP
    } else if target > center + dead_zone {
        Steer::DOWN
    } else {
        Steer::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn ball(x: f32, y: f32, vx: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, 3.0),
            radius: 6.0,
        }
    }

    #[test]
    fn test_tracks_approaching_ball() {
        let paddle = Paddle::new(100.0, 8, 720.0);
        assert_eq!(
            steer(&paddle, Side::Left, &ball(300.0, 50.0, -5.0), 720.0),
            Steer::UP
        );
        assert_eq!(
            steer(&paddle, Side::Left, &ball(300.0, 650.0, -5.0), 720.0),
            Steer::DOWN
        );
    }

    #[test]
    fn test_holds_inside_dead_zone() {
        let paddle = Paddle::new(100.0, 8, 720.0);
        assert_eq!(
            steer(&paddle, Side::Right, &ball(900.0, 370.0, 5.0), 720.0),
            Steer::NONE
        );
    }

    #[test]
    fn test_returns_to_center_when_ball_leaves() {
        let mut paddle = Paddle::new(100.0, 8, 720.0);
        paddle.y = 0.0;
        // Ball moving away from the right paddle
        assert_eq!(
            steer(&paddle, Side::Right, &ball(900.0, 20.0, -5.0), 720.0),
            Steer::DOWN
        );
    }
}
