//! Collision detection and response for axis-aligned boxes
//!
//! Balls, paddles and bricks are all boxes described by a center and a
//! half-extent. A hit is decided by the overlap rectangle of the two boxes,
//! and the overlap's shape picks which velocity component bounces.

use glam::Vec2;

use super::state::Ball;

/// Axis-aligned box given by center and half-extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub radius: Vec2,
}

impl Aabb {
    pub const fn new(center: Vec2, radius: Vec2) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.radius
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.radius
    }

    /// Intersection of two boxes, `None` if they are disjoint.
    ///
    /// Boxes that only touch still overlap (zero-width intersection).
    pub fn overlap(&self, other: &Aabb) -> Option<Overlap> {
        let min = self.min().max(other.min());
        let max = self.max().min(other.max());
        if min.x > max.x || min.y > max.y {
            return None;
        }
        Some(Overlap { min, max })
    }
}

/// Intersection rectangle of two boxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub min: Vec2,
    pub max: Vec2,
}

impl Overlap {
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Wider than tall means the ball came in through the top or bottom
    pub fn bounce_axis(&self) -> BounceAxis {
        if self.width() > self.height() {
            BounceAxis::Y
        } else {
            BounceAxis::X
        }
    }
}

/// Velocity component that was reflected by a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Top/bottom face: y velocity points away from the obstacle
    Y,
    /// Left/right face: x velocity points away from the obstacle
    X,
}

/// What happens to the ball's velocity after the sign correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deflection {
    /// Plain bounce
    Pure,
    /// Side hits blend y velocity toward the hit's offset from center
    Aim { mix: f32 },
}

/// Something a ball can bounce off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Box used to decide whether there is a hit
    pub hitbox: Aabb,
    /// Half-extent the ball is pushed clear of
    pub extent: Vec2,
    pub deflection: Deflection,
}

impl Obstacle {
    /// Paddle: full-size hitbox, aims the ball on side hits
    pub fn paddle(center: Vec2, radius: Vec2, aim_mix: f32) -> Self {
        Self {
            hitbox: Aabb::new(center, radius),
            extent: radius,
            deflection: Deflection::Aim { mix: aim_mix },
        }
    }

    /// Brick: shrunk hitbox so grazing an edge doesn't count, pure bounce
    pub fn brick(center: Vec2, radius: Vec2, hitbox_scale: f32) -> Self {
        Self {
            hitbox: Aabb::new(center, radius * hitbox_scale),
            extent: radius,
            deflection: Deflection::Pure,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.hitbox.center
    }
}

/// Resolve a ball against an obstacle.
///
/// On a hit the ball is moved just outside the obstacle along the bounce
/// axis and the matching velocity component is forced to point away.
/// Returns the axis that bounced, or `None` (ball untouched) on a miss.
pub fn ball_box_collision(
    ball: &mut Ball,
    ball_radius: Vec2,
    obstacle: &Obstacle,
) -> Option<BounceAxis> {
    let ball_box = Aabb::new(ball.pos, ball_radius);
    let overlap = obstacle.hitbox.overlap(&ball_box)?;
    let center = obstacle.center();
    let clearance = obstacle.extent + ball_radius;

    let axis = overlap.bounce_axis();
    match axis {
        BounceAxis::Y => {
            if ball.pos.y > center.y {
                ball.pos.y = center.y + clearance.y;
                ball.vel.y = ball.vel.y.abs();
            } else {
                ball.pos.y = center.y - clearance.y;
                ball.vel.y = -ball.vel.y.abs();
            }
        }
        BounceAxis::X => {
            if ball.pos.x > center.x {
                ball.pos.x = center.x + clearance.x;
                ball.vel.x = ball.vel.x.abs();
            } else {
                ball.pos.x = center.x - clearance.x;
                ball.vel.x = -ball.vel.x.abs();
            }
            if let Deflection::Aim { mix } = obstacle.deflection {
                let aim = (ball.pos.y - center.y) / clearance.y;
                ball.vel.y += (aim - ball.vel.y) * mix;
            }
        }
    }

    Some(axis)
}
