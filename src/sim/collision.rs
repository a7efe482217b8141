//! Collision detection for the ball against walls and paddles
//!
//! Paddle contact is swept: the ball's whole path over the tick is tested
//! against the paddle's face plane, so a fast ball whose per-tick displacement
//! is larger than the gap to the paddle still registers the hit.

use glam::Vec2;

use super::state::{Ball, Side};

/// Where and when the ball met a paddle face during the last tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleContact {
    /// Ball center at the moment its leading edge touched the face plane
    pub point: Vec2,
    /// Fraction of the tick at which contact happened, in [0, 1]
    pub t: f32,
    /// Contact height relative to the paddle, 0 = top, 1 = bottom (unclamped)
    pub hit_fraction: f32,
}

/// Bounce off the top/bottom walls. Returns true on a bounce.
///
/// Only one wall can apply per tick; the top is checked first.
pub fn bounce_off_walls(ball: &mut Ball, viewport_height: f32) -> bool {
    if ball.pos.y - ball.radius <= 0.0 {
        ball.vel.y = ball.vel.y.abs();
        ball.pos.y = ball.radius;
        true
    } else if ball.pos.y + ball.radius >= viewport_height {
        ball.vel.y = -ball.vel.y.abs();
        ball.pos.y = viewport_height - ball.radius;
        true
    } else {
        false
    }
}

/// Swept test of the ball's path from `prev` to `pos` against a paddle face.
///
/// `face_x` is the plane the ball's leading edge must cross, `vel_x` the
/// horizontal velocity used for this tick's displacement. The caller only
/// asks for the paddle the ball is moving toward.
#[allow(clippy::too_many_arguments)]
pub fn swept_paddle_contact(
    prev: Vec2,
    pos: Vec2,
    vel_x: f32,
    radius: f32,
    side: Side,
    face_x: f32,
    paddle_top: f32,
    paddle_height: f32,
) -> Option<PaddleContact> {
    if vel_x == 0.0 {
        return None;
    }

    // Leading edge trails the center by the radius on the paddle's side
    let lead = -side.toward_field() * radius;
    let prev_edge = prev.x + lead;
    let t = (face_x - prev_edge) / vel_x;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    let point = prev.lerp(pos, t);
    if point.y < paddle_top - radius || point.y > paddle_top + paddle_height + radius {
        return None;
    }

    let hit_fraction = if paddle_height > 0.0 {
        (point.y - paddle_top) / paddle_height
    } else {
        0.5
    };

    Some(PaddleContact {
        point,
        t,
        hit_fraction,
    })
}

/// Side that wins the point if the ball has fully left the court
pub fn scoring_side(ball: &Ball, viewport_width: f32) -> Option<Side> {
    if ball.pos.x + ball.radius < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x - ball.radius > viewport_width {
        Some(Side::Left)
    } else {
        None
    }
}
