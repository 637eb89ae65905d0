//! Ball physics: integration, boundary bounce, drag capture, probes
//!
//! The tricky part of Roto Box: a ball resolves rectangle contact through
//! four small probe circles inset tangent to its edge at the cardinal
//! points. Whichever probe overlaps an obstacle first names the side, and
//! the ball snaps flush against that edge with a mirror bounce.

use glam::Vec2;

use super::geom::{Circle, Rect};
use super::state::Obstacle;
use crate::consts::PROBE_RADIUS;

/// Drag state for a ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallState {
    /// Moving under physics
    Free,
    /// Slaved to the pointer; `offset` keeps the grab point fixed so the
    /// ball does not jump to center on the cursor
    Dragging { offset: Vec2 },
}

/// Which side of a ball contacted an obstacle, named by the probe that hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSide {
    Up,
    Down,
    Left,
    Right,
}

/// Collision probes at the four cardinal edge points
#[derive(Debug, Clone, Copy)]
pub struct Probes {
    pub up: Circle,
    pub down: Circle,
    pub left: Circle,
    pub right: Circle,
}

impl Probes {
    fn new() -> Self {
        let probe = Circle::new(Vec2::ZERO, PROBE_RADIUS);
        Self {
            up: probe,
            down: probe,
            left: probe,
            right: probe,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    /// Per-tick velocity decay multiplier, in (0, 1]
    pub friction: f32,
    /// Restitution applied on boundary bounces only
    pub elasticity: f32,
    /// Per-axis speed clamp
    pub max_speed: f32,
    /// Display-only
    pub color: [f32; 4],
    pub state: BallState,
    pub probes: Probes,
}

impl Ball {
    pub fn new(
        pos: Vec2,
        radius: f32,
        vel: Vec2,
        friction: f32,
        elasticity: f32,
        max_speed: f32,
        color: [f32; 4],
    ) -> Self {
        let mut ball = Self {
            pos,
            prev_pos: pos,
            radius,
            vel,
            friction,
            elasticity,
            max_speed,
            color,
            state: BallState::Free,
            probes: Probes::new(),
        };
        ball.update_probes();
        ball
    }

    /// The ball's own collision circle
    #[inline]
    pub fn as_circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// Drag capture: a press inside the circle picks the ball up, a release
    /// drops it unconditionally. A press that misses does nothing.
    pub fn process_input(&mut self, pointer: Vec2, pressed: bool, released: bool) {
        if pressed && self.as_circle().contains_point(pointer) {
            self.state = BallState::Dragging {
                offset: pointer - self.pos,
            };
        }
        if released {
            self.state = BallState::Free;
        }
    }

    /// Per-frame physics step
    ///
    /// Free: integrate, reflect off the box walls with restitution, then
    /// friction, then per-axis clamp - in that order, every frame.
    /// Dragging: follow the pointer and rebuild velocity from the frame
    /// displacement so a release throws the ball.
    pub fn update(&mut self, dt: f32, limits: &Rect, pointer: Vec2) {
        match self.state {
            BallState::Free => {
                self.pos += self.vel * dt;

                if self.pos.x - self.radius <= limits.x {
                    self.pos.x = limits.x + self.radius;
                    self.vel.x = -self.vel.x * self.elasticity;
                } else if self.pos.x + self.radius >= limits.x + limits.width {
                    self.pos.x = limits.x + limits.width - self.radius;
                    self.vel.x = -self.vel.x * self.elasticity;
                }

                if self.pos.y - self.radius <= limits.y {
                    self.pos.y = limits.y + self.radius;
                    self.vel.y = -self.vel.y * self.elasticity;
                } else if self.pos.y + self.radius >= limits.y + limits.height {
                    self.pos.y = limits.y + limits.height - self.radius;
                    self.vel.y = -self.vel.y * self.elasticity;
                }

                self.vel *= self.friction;
                self.vel = self
                    .vel
                    .clamp(Vec2::splat(-self.max_speed), Vec2::splat(self.max_speed));
            }
            BallState::Dragging { offset } => {
                self.pos = pointer - offset;
                // A zero dt would make the reconstructed velocity non-finite
                self.vel = if dt > 0.0 {
                    (self.pos - self.prev_pos) / dt
                } else {
                    Vec2::ZERO
                };
            }
        }

        self.prev_pos = self.pos;
        self.update_probes();
    }

    /// Rebuild the four probes from the current position
    ///
    /// Each probe center is inset by the probe radius, leaving the probe
    /// circle internally tangent to the ball edge.
    pub fn update_probes(&mut self) {
        let reach = self.radius - PROBE_RADIUS;
        self.probes.up.center = self.pos - Vec2::new(0.0, reach);
        self.probes.down.center = self.pos + Vec2::new(0.0, reach);
        self.probes.left.center = self.pos - Vec2::new(reach, 0.0);
        self.probes.right.center = self.pos + Vec2::new(reach, 0.0);
    }

    /// Accelerate toward "down" in the rotated visual frame
    ///
    /// The camera rotation redefines which way gravity pulls: at 0 degrees
    /// this is +y (screen down), at 90 degrees the box spills sideways.
    pub fn apply_gravity(&mut self, rotation_deg: f32, gravity: f32) {
        self.vel.x += (rotation_deg - 90.0).to_radians().cos() * gravity;
        self.vel.y += (rotation_deg + 90.0).to_radians().sin() * gravity;
    }

    /// Probe the obstacle, vertical sides first
    ///
    /// Down/up take priority over left/right so a ball whose probes
    /// straddle a corner resolves vertically.
    pub fn check_collision(&self, obstacle: &Obstacle) -> Option<HitSide> {
        if self.probes.down.overlaps_rect(&obstacle.rect) {
            return Some(HitSide::Down);
        }
        if self.probes.up.overlaps_rect(&obstacle.rect) {
            return Some(HitSide::Up);
        }
        if self.probes.left.overlaps_rect(&obstacle.rect) {
            return Some(HitSide::Left);
        }
        if self.probes.right.overlaps_rect(&obstacle.rect) {
            return Some(HitSide::Right);
        }
        None
    }

    /// Snap flush against each contacted obstacle edge and mirror velocity
    ///
    /// Obstacle bounces are hard: full reflection, no restitution, unlike
    /// the box walls. Probes are rebuilt after every obstacle so a ball
    /// resolving several overlapping obstacles in one frame tests each
    /// against up-to-date contact points.
    pub fn resolve_obstacle_collisions(&mut self, obstacles: &[Obstacle]) {
        for obstacle in obstacles {
            match self.check_collision(obstacle) {
                Some(HitSide::Up) => {
                    self.pos.y = obstacle.rect.y + obstacle.rect.height + self.radius;
                    self.vel.y = -self.vel.y;
                }
                Some(HitSide::Down) => {
                    self.pos.y = obstacle.rect.y - self.radius;
                    self.vel.y = -self.vel.y;
                }
                Some(HitSide::Left) => {
                    self.pos.x = obstacle.rect.x + obstacle.rect.width + self.radius;
                    self.vel.x = -self.vel.x;
                }
                Some(HitSide::Right) => {
                    self.pos.x = obstacle.rect.x - self.radius;
                    self.vel.x = -self.vel.x;
                }
                None => {}
            }
            self.update_probes();
        }
    }
}

/// Push ball `index` and every ball it overlaps apart by a fixed impulse
///
/// Deliberately not momentum-conserving: each overlapping pair gets
/// equal-and-opposite nudges of constant magnitude along the center line,
/// with no positional de-penetration. The sweep is order-dependent within
/// one frame; later balls see impulses already applied by earlier ones.
pub fn resolve_ball_collisions(balls: &mut [Ball], index: usize, impulse: f32) {
    for other in 0..balls.len() {
        if other == index {
            continue;
        }
        if !balls[index]
            .as_circle()
            .overlaps_circle(&balls[other].as_circle())
        {
            continue;
        }
        let delta = balls[index].pos - balls[other].pos;
        let push = Vec2::from_angle(delta.y.atan2(delta.x)) * impulse;
        balls[index].vel += push;
        balls[other].vel -= push;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-3;

    fn test_ball(pos: Vec2, vel: Vec2) -> Ball {
        Ball::new(pos, 30.0, vel, 0.99, 0.9, 1000.0, [1.0; 4])
    }

    fn wide_limits() -> Rect {
        Rect::new(0.0, 0.0, 2000.0, 2000.0)
    }

    #[test]
    fn test_free_integration() {
        let mut ball = test_ball(Vec2::new(500.0, 500.0), Vec2::new(100.0, -50.0));
        ball.friction = 1.0;
        ball.update(0.5, &wide_limits(), Vec2::ZERO);
        assert!((ball.pos.x - 550.0).abs() < EPS);
        assert!((ball.pos.y - 475.0).abs() < EPS);
        assert_eq!(ball.prev_pos, ball.pos);
    }

    #[test]
    fn test_wall_reflection_applies_elasticity_then_friction() {
        // Resting against the left wall, moving into it
        let limits = wide_limits();
        let mut ball = test_ball(Vec2::new(limits.x + 30.0, 500.0), Vec2::new(-200.0, 0.0));
        ball.update(1.0 / 60.0, &limits, Vec2::ZERO);
        // Reflected: -(-200) * 0.9, then scaled by friction 0.99
        assert!((ball.vel.x - 200.0 * 0.9 * 0.99).abs() < EPS);
        assert!((ball.pos.x - (limits.x + 30.0)).abs() < EPS);
    }

    #[test]
    fn test_wall_reflects_once_per_contact() {
        // Ball flying left at an exposed left wall at x=30; crossing reflects
        // exactly once, not once per frame while near the wall.
        let limits = Rect::new(30.0, 30.0, 2640.0, 2640.0);
        let mut ball = test_ball(Vec2::new(100.0, 100.0), Vec2::new(-500.0, 0.0));
        ball.friction = 1.0;
        ball.elasticity = 0.9;

        let mut reflections = 0;
        let mut last_sign = ball.vel.x.signum();
        for _ in 0..120 {
            ball.update(1.0 / 60.0, &limits, Vec2::ZERO);
            let sign = ball.vel.x.signum();
            if sign != last_sign {
                reflections += 1;
                last_sign = sign;
            }
        }
        assert_eq!(reflections, 1);
        assert!((ball.vel.x - 500.0 * 0.9).abs() < EPS);
    }

    #[test]
    fn test_probe_placement_invariant() {
        let mut ball = test_ball(Vec2::new(700.0, 900.0), Vec2::new(123.0, -456.0));
        ball.update(0.016, &wide_limits(), Vec2::ZERO);

        let reach = ball.radius - PROBE_RADIUS;
        assert!(ball.probes.up.center.abs_diff_eq(ball.pos - Vec2::new(0.0, reach), EPS));
        assert!(ball.probes.down.center.abs_diff_eq(ball.pos + Vec2::new(0.0, reach), EPS));
        assert!(ball.probes.left.center.abs_diff_eq(ball.pos - Vec2::new(reach, 0.0), EPS));
        assert!(ball.probes.right.center.abs_diff_eq(ball.pos + Vec2::new(reach, 0.0), EPS));
    }

    #[test]
    fn test_drag_capture_and_release() {
        let mut ball = test_ball(Vec2::new(500.0, 500.0), Vec2::new(100.0, 0.0));

        // Press outside the circle: nothing happens
        ball.process_input(Vec2::new(600.0, 500.0), true, false);
        assert_eq!(ball.state, BallState::Free);

        // Press on the edge region: captured with the grab offset
        ball.process_input(Vec2::new(520.0, 510.0), true, false);
        assert_eq!(
            ball.state,
            BallState::Dragging {
                offset: Vec2::new(20.0, 10.0)
            }
        );

        // Release always drops
        ball.process_input(Vec2::new(0.0, 0.0), false, true);
        assert_eq!(ball.state, BallState::Free);
    }

    #[test]
    fn test_drag_reconstructs_throw_velocity() {
        let mut ball = test_ball(Vec2::new(500.0, 500.0), Vec2::ZERO);
        ball.process_input(Vec2::new(500.0, 500.0), true, false);

        // Pointer moves 30 world units right in one 1/60s frame
        let dt = 1.0 / 60.0;
        ball.update(dt, &wide_limits(), Vec2::new(530.0, 500.0));
        assert!((ball.pos.x - 530.0).abs() < EPS);
        assert!((ball.vel.x - 30.0 / dt).abs() < 0.1);
        assert!(ball.vel.y.abs() < EPS);
    }

    #[test]
    fn test_drag_zero_dt_yields_zero_velocity() {
        let mut ball = test_ball(Vec2::new(500.0, 500.0), Vec2::new(999.0, 999.0));
        ball.process_input(Vec2::new(500.0, 500.0), true, false);
        ball.update(0.0, &wide_limits(), Vec2::new(530.0, 500.0));
        assert_eq!(ball.vel, Vec2::ZERO);
        assert!(ball.vel.is_finite());
    }

    #[test]
    fn test_dragging_skips_boundary_physics() {
        // Dragged outside the walls: no clamping, no reflection
        let limits = wide_limits();
        let mut ball = test_ball(Vec2::new(100.0, 100.0), Vec2::ZERO);
        ball.process_input(Vec2::new(100.0, 100.0), true, false);
        ball.update(1.0 / 60.0, &limits, Vec2::new(-500.0, 100.0));
        assert!((ball.pos.x - (-500.0)).abs() < EPS);
    }

    #[test]
    fn test_gravity_follows_rotation() {
        // No rotation: gravity is straight +y (screen down)
        let mut ball = test_ball(Vec2::new(500.0, 500.0), Vec2::ZERO);
        ball.apply_gravity(0.0, 50.0);
        assert!(ball.vel.x.abs() < EPS);
        assert!((ball.vel.y - 50.0).abs() < EPS);

        // Quarter turn: gravity points along +x in world space
        let mut ball = test_ball(Vec2::new(500.0, 500.0), Vec2::ZERO);
        ball.apply_gravity(90.0, 50.0);
        assert!((ball.vel.x - 50.0).abs() < EPS);
        assert!(ball.vel.y.abs() < 1e-2);
    }

    #[test]
    fn test_check_collision_priority_is_vertical_first() {
        // Ball overlapping an obstacle corner so both the down and right
        // probes hit: the vertical answer wins. The corner at (504, 504)
        // is within 5 units of the down probe (500, 525) and the right
        // probe (525, 500).
        let obstacle = Obstacle::new(Rect::new(504.0, 504.0, 60.0, 60.0), [0.5; 4]);
        let mut ball = test_ball(Vec2::new(500.0, 500.0), Vec2::ZERO);
        ball.update_probes();
        assert!(ball.probes.down.overlaps_rect(&obstacle.rect));
        assert!(ball.probes.right.overlaps_rect(&obstacle.rect));
        assert_eq!(ball.check_collision(&obstacle), Some(HitSide::Down));
    }

    #[test]
    fn test_resolve_obstacle_from_below() {
        // Ball under the obstacle, moving up; the up probe hits, the ball
        // snaps flush below and vel.y flips with no energy loss.
        let obstacle = Obstacle::new(Rect::new(470.0, 400.0, 60.0, 60.0), [0.5; 4]);
        let mut ball = test_ball(Vec2::new(500.0, 485.0), Vec2::new(0.0, -300.0));
        ball.update_probes();
        assert_eq!(ball.check_collision(&obstacle), Some(HitSide::Up));

        ball.resolve_obstacle_collisions(std::slice::from_ref(&obstacle));
        assert!((ball.pos.y - (400.0 + 60.0 + 30.0)).abs() < EPS);
        assert!((ball.vel.y - 300.0).abs() < EPS);
        // Probes were rebuilt at the snapped position
        assert!((ball.probes.up.center.y - (ball.pos.y - 25.0)).abs() < EPS);
    }

    #[test]
    fn test_resolve_obstacle_from_left() {
        let obstacle = Obstacle::new(Rect::new(500.0, 470.0, 60.0, 60.0), [0.5; 4]);
        let mut ball = test_ball(Vec2::new(480.0, 500.0), Vec2::new(250.0, 0.0));
        ball.update_probes();
        assert_eq!(ball.check_collision(&obstacle), Some(HitSide::Right));

        ball.resolve_obstacle_collisions(std::slice::from_ref(&obstacle));
        assert!((ball.pos.x - (500.0 - 30.0)).abs() < EPS);
        assert!((ball.vel.x - (-250.0)).abs() < EPS);
    }

    #[test]
    fn test_ball_separation_requires_strict_overlap() {
        // Centers exactly r1 + r2 apart: no impulse
        let mut balls = vec![
            test_ball(Vec2::new(500.0, 500.0), Vec2::ZERO),
            test_ball(Vec2::new(560.0, 500.0), Vec2::ZERO),
        ];
        resolve_ball_collisions(&mut balls, 0, 30.0);
        assert_eq!(balls[0].vel, Vec2::ZERO);
        assert_eq!(balls[1].vel, Vec2::ZERO);

        // A hair closer: equal-and-opposite pushes of fixed magnitude
        balls[1].pos.x = 559.9;
        resolve_ball_collisions(&mut balls, 0, 30.0);
        assert!((balls[0].vel.x - (-30.0)).abs() < EPS);
        assert!((balls[1].vel.x - 30.0).abs() < EPS);
        assert!((balls[0].vel.length() - 30.0).abs() < EPS);
        assert!(balls[0].vel.abs_diff_eq(-balls[1].vel, EPS));
    }

    proptest! {
        #[test]
        fn prop_velocity_never_exceeds_max_speed(
            px in 100.0f32..1900.0,
            py in 100.0f32..1900.0,
            vx in -50_000.0f32..50_000.0,
            vy in -50_000.0f32..50_000.0,
        ) {
            let mut ball = test_ball(Vec2::new(px, py), Vec2::new(vx, vy));
            ball.update(1.0 / 60.0, &wide_limits(), Vec2::ZERO);
            prop_assert!(ball.vel.x.abs() <= ball.max_speed);
            prop_assert!(ball.vel.y.abs() <= ball.max_speed);
        }

        #[test]
        fn prop_probes_stay_on_cardinal_axes(
            px in -5000.0f32..5000.0,
            py in -5000.0f32..5000.0,
            vx in -1000.0f32..1000.0,
            vy in -1000.0f32..1000.0,
        ) {
            let mut ball = test_ball(Vec2::new(px, py), Vec2::new(vx, vy));
            ball.update(1.0 / 120.0, &Rect::new(-10_000.0, -10_000.0, 20_000.0, 20_000.0), Vec2::ZERO);
            let reach = ball.radius - PROBE_RADIUS;
            for (probe, dir) in [
                (ball.probes.up, Vec2::new(0.0, -1.0)),
                (ball.probes.down, Vec2::new(0.0, 1.0)),
                (ball.probes.left, Vec2::new(-1.0, 0.0)),
                (ball.probes.right, Vec2::new(1.0, 0.0)),
            ] {
                prop_assert!(probe.center.abs_diff_eq(ball.pos + dir * reach, 1e-2));
            }
        }
    }
}
