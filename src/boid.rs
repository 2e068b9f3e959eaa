/*
 * Boid Module
 *
 * This module defines the Boid struct and its behaviour.
 * A boid is a circle that travels in a straight line until it hits either
 * the canvas edge or another boid:
 * 1. Canvas edges: the position is clamped back inside and the offending
 *    velocity component is negated
 * 2. Other boids: the boid is nudged away from the other one and takes the
 *    other's velocity, reflected about the contact line, at its own speed
 *
 * Collision checks return a proposed update instead of mutating, so the
 * caller decides when (and to which copy) the result is applied.
 */

use std::f32::consts::TAU;

use rand::Rng;

use crate::colour::{self, Colour};
use crate::vector::{Vector2, VectorExt};

// Seconds of highlight after a boid-vs-boid hit
pub const COLLISION_COOLDOWN: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub pos: Vector2,
    pub vel: Vector2,
    pub speed: f32,
    pub radius: f32,
    pub colour: Colour,
    pub collision_cooldown: f32,
}

// Corrected position and velocity proposed by a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidUpdate {
    pub pos: Vector2,
    pub vel: Vector2,
}

impl Boid {
    pub fn new(pos: Vector2, radius: f32, speed: f32, colour: Colour) -> Self {
        Self {
            pos,
            vel: Vector2::ZERO,
            speed,
            radius,
            colour,
            collision_cooldown: 0.0,
        }
    }

    /// Create a stationary boid with a random radius, placed fully inside a `width` x `height` canvas.
    pub fn spawn_on_canvas<R: Rng + ?Sized>(
        rng: &mut R,
        width: f32,
        height: f32,
        min_radius: f32,
        max_radius: f32,
        colour: Colour,
        speed: f32,
    ) -> Self {
        let radius = uniform(rng, min_radius, max_radius);
        let x = uniform(rng, radius, width - radius);
        let y = uniform(rng, radius, height - radius);

        Boid::new(Vector2::new(x, y), radius, speed, colour)
    }

    // Point the boid in a random direction at its spawn speed
    pub fn randomize_direction<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let angle = rng.gen_range(0.0..TAU);
        self.vel = Vector2::from_radians(angle) * self.speed;
    }

    // Advance position by velocity and let the highlight fade
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.collision_cooldown = (self.collision_cooldown - dt).max(0.0);
    }

    pub fn apply(&mut self, update: BoidUpdate) {
        self.pos = update.pos;
        self.vel = update.vel;
    }

    pub fn colour_hex(&self) -> String {
        colour::to_hex(&self.colour)
    }

    // Base colour fading towards `highlight` while the cooldown is running
    pub fn render_colour(&self, highlight: Colour) -> Colour {
        colour::blend(self.colour, highlight, self.collision_cooldown)
    }

    /// Keep the boid inside `[radius, size - radius]` on both axes.
    ///
    /// Each axis is checked on its own, so a corner hit corrects both. Returns
    /// `None` when the boid is already in bounds.
    pub fn collide_and_bounce_off_canvas(&self, width: f32, height: f32) -> Option<BoidUpdate> {
        let mut pos = self.pos;
        let mut vel = self.vel;
        let mut hit = false;

        if pos.x < self.radius {
            pos.x = self.radius;
            vel.x = -vel.x;
            hit = true;
        } else if pos.x > width - self.radius {
            pos.x = width - self.radius;
            vel.x = -vel.x;
            hit = true;
        }

        if pos.y < self.radius {
            pos.y = self.radius;
            vel.y = -vel.y;
            hit = true;
        } else if pos.y > height - self.radius {
            pos.y = height - self.radius;
            vel.y = -vel.y;
            hit = true;
        }

        hit.then_some(BoidUpdate { pos, vel })
    }

    /// Resolve `self` against `other`, returning the new state for `self` only.
    ///
    /// The push is weighted by `self.radius / other.radius` and is not mirrored
    /// onto `other`; call again with the roles swapped to move both. Circles
    /// that merely touch do not collide.
    pub fn collide_and_bounce_off_other_boid(&self, other: &Boid) -> Option<BoidUpdate> {
        let reach = self.radius + other.radius;
        let between = other.pos - self.pos;
        if between.length_squared() >= reach * reach {
            return None;
        }

        let push = between.normalize_or_zero() * (0.5 * (self.radius / other.radius));
        let pos = self.pos - push;

        let speed = self.vel.length();
        let vel = other.vel.reflect(between.left_normal()).normalize_or_zero() * speed;

        Some(BoidUpdate { pos, vel })
    }
}

// Uniform sample in [lo, hi]; collapses to the midpoint when the range is inverted
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        (lo + hi) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::color::rgba;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn white() -> Colour {
        rgba(1.0, 1.0, 1.0, 1.0)
    }

    fn boid_at(x: f32, y: f32, radius: f32) -> Boid {
        Boid::new(Vector2::new(x, y), radius, 100.0, white())
    }

    #[test]
    fn spawn_lands_inside_canvas() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let b = Boid::spawn_on_canvas(&mut rng, 200.0, 100.0, 4.0, 9.0, white(), 50.0);
            assert!(b.radius >= 4.0 && b.radius <= 9.0);
            assert!(b.pos.x >= b.radius && b.pos.x <= 200.0 - b.radius);
            assert!(b.pos.y >= b.radius && b.pos.y <= 100.0 - b.radius);
            assert_eq!(b.vel, Vector2::ZERO);
            assert_eq!(b.collision_cooldown, 0.0);
        }
    }

    #[test]
    fn spawn_on_tiny_canvas_centres_the_boid() {
        let mut rng = StdRng::seed_from_u64(1);
        let b = Boid::spawn_on_canvas(&mut rng, 6.0, 6.0, 5.0, 5.0, white(), 10.0);
        assert_eq!(b.pos, Vector2::new(3.0, 3.0));
    }

    #[test]
    fn randomized_direction_has_spawn_speed() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut b = boid_at(50.0, 50.0, 5.0);
        b.randomize_direction(&mut rng);
        assert!((b.vel.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn update_integrates_and_decays_cooldown() {
        let mut b = boid_at(10.0, 10.0, 2.0);
        b.vel = Vector2::new(4.0, -2.0);
        b.collision_cooldown = 0.3;
        b.update(0.5);
        assert_eq!(b.pos, Vector2::new(12.0, 9.0));
        assert!((b.collision_cooldown - 0.0).abs() < f32::EPSILON);

        b.collision_cooldown = 1.0;
        b.update(0.25);
        assert!((b.collision_cooldown - 0.75).abs() < 1e-6);
    }

    #[test]
    fn in_bounds_boid_does_not_hit_canvas() {
        let b = boid_at(50.0, 50.0, 5.0);
        assert_eq!(b.collide_and_bounce_off_canvas(100.0, 100.0), None);
    }

    #[test]
    fn left_edge_bounce() {
        let mut b = boid_at(4.0, 50.0, 5.0);
        b.vel = Vector2::new(-5.0, 0.0);
        let update = b.collide_and_bounce_off_canvas(100.0, 100.0).expect("hit left edge");
        assert_eq!(update.pos.x, 5.0);
        assert_eq!(update.vel.x, 5.0);
        assert_eq!(update.pos.y, 50.0);
        // Checks never mutate
        assert_eq!(b.pos.x, 4.0);
    }

    #[test]
    fn corner_bounce_corrects_both_axes() {
        let mut b = boid_at(98.0, 99.0, 5.0);
        b.vel = Vector2::new(3.0, 7.0);
        let update = b.collide_and_bounce_off_canvas(100.0, 100.0).expect("hit corner");
        assert_eq!(update.pos, Vector2::new(95.0, 95.0));
        assert_eq!(update.vel, Vector2::new(-3.0, -7.0));
    }

    #[test]
    fn tangent_boids_do_not_collide() {
        let a = boid_at(10.0, 10.0, 3.0);
        let b = boid_at(17.0, 10.0, 4.0);
        assert_eq!(a.collide_and_bounce_off_other_boid(&b), None);
        assert_eq!(b.collide_and_bounce_off_other_boid(&a), None);

        let c = boid_at(17.0 - 1e-3, 10.0, 4.0);
        assert!(a.collide_and_bounce_off_other_boid(&c).is_some());
    }

    #[test]
    fn overlap_pushes_away_and_keeps_own_speed() {
        let mut a = boid_at(10.0, 10.0, 5.0);
        let mut b = boid_at(16.0, 10.0, 5.0);
        a.vel = Vector2::new(3.0, 4.0);
        b.vel = Vector2::new(-10.0, 0.0);

        let update = a.collide_and_bounce_off_other_boid(&b).expect("overlap");
        // Equal radii: push of 0.5 along -x
        assert!((update.pos.x - 9.5).abs() < 1e-5);
        assert!((update.pos.y - 10.0).abs() < 1e-5);
        assert!((update.vel.length() - 5.0).abs() < 1e-4);
        // b's velocity (-10, 0) reflected about the contact line's normal (0, -1) keeps pointing -x
        assert!((update.vel.x + 5.0).abs() < 1e-4);
    }

    #[test]
    fn push_is_weighted_by_radius_ratio() {
        let big = boid_at(10.0, 10.0, 8.0);
        let small = boid_at(20.0, 10.0, 4.0);
        let big_update = big.collide_and_bounce_off_other_boid(&small).expect("overlap");
        let small_update = small.collide_and_bounce_off_other_boid(&big).expect("overlap");
        assert!((big_update.pos.x - 9.0).abs() < 1e-5);
        assert!((small_update.pos.x - 20.25).abs() < 1e-5);
    }

    #[test]
    fn coincident_centres_do_not_produce_nan() {
        let mut a = boid_at(10.0, 10.0, 5.0);
        let mut b = boid_at(10.0, 10.0, 5.0);
        a.vel = Vector2::new(1.0, 0.0);
        b.vel = Vector2::new(0.0, 2.0);
        let update = a.collide_and_bounce_off_other_boid(&b).expect("overlap");
        assert_eq!(update.pos, a.pos);
        assert!((update.vel.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn render_colour_follows_cooldown() {
        let mut b = boid_at(0.0, 0.0, 1.0);
        let red = rgba(1.0, 0.0, 0.0, 1.0);
        assert!(colour::approx_eq(&b.render_colour(red), &white()));
        b.collision_cooldown = COLLISION_COOLDOWN;
        assert!(colour::approx_eq(&b.render_colour(red), &red));
        assert_eq!(b.colour_hex(), "#ffffffff");
    }
}
