/*
 * Physics Module
 *
 * This module holds the per-tick passes that move the population:
 * - Boid-vs-boid collisions, either brute force over every ordered pair or
 *   limited to pairs sharing a spatial grid cell
 * - Canvas-edge bounces followed by integration
 *
 * Boids live in one contiguous slice and the grid stores indices into it, so
 * every mutation goes through an index rather than a shared reference.
 */

use rand::Rng;

use crate::boid::{Boid, COLLISION_COOLDOWN};
use crate::params::SimConfig;
use crate::spatial_grid::{Partition, SpatialGrid};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionPass {
    pub pair_checks: usize,
    pub collisions: usize,
}

// Create `count` boids on a `width` x `height` canvas, already heading somewhere
pub fn spawn_boids<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    width: f32,
    height: f32,
    config: &SimConfig,
) -> Vec<Boid> {
    (0..count)
        .map(|_| {
            let mut boid = Boid::spawn_on_canvas(
                rng,
                width,
                height,
                config.min_radius,
                config.max_radius,
                config.boid_colour,
                config.boid_speed,
            );
            boid.randomize_direction(rng);
            boid
        })
        .collect()
}

// Resolve boid `i` against boid `j`, updating `i` only
#[inline]
fn resolve_pair(boids: &mut [Boid], i: usize, j: usize, pass: &mut CollisionPass) {
    pass.pair_checks += 1;
    if let Some(update) = boids[i].collide_and_bounce_off_other_boid(&boids[j]) {
        let boid = &mut boids[i];
        boid.apply(update);
        boid.collision_cooldown = COLLISION_COOLDOWN;
        pass.collisions += 1;
    }
}

/// Test every ordered pair of boids (O(n²)).
pub fn collide_brute_force(boids: &mut [Boid]) -> CollisionPass {
    let mut pass = CollisionPass::default();
    let n = boids.len();

    for i in 0..n {
        for j in 0..n {
            if i != j {
                resolve_pair(boids, i, j, &mut pass);
            }
        }
    }

    pass
}

/// Re-bucket the population into `grid`, then test ordered pairs within each cell.
///
/// With neighbour-aware bucketing two boids can share several cells and are
/// then resolved once per shared cell.
pub fn collide_with_grid(boids: &mut [Boid], grid: &mut SpatialGrid, partition: Partition) -> CollisionPass {
    grid.rebuild(boids, partition);

    let mut pass = CollisionPass::default();
    for cell in grid.iter() {
        for &i in &cell.members {
            for &j in &cell.members {
                if i != j {
                    resolve_pair(boids, i, j, &mut pass);
                }
            }
        }
    }

    pass
}

/// Bounce each boid off the canvas edges, then advance it by `dt` seconds.
/// Returns the number of edge bounces.
pub fn bounce_and_integrate(boids: &mut [Boid], width: f32, height: f32, dt: f32) -> usize {
    let mut hits = 0;
    for boid in boids.iter_mut() {
        if let Some(update) = boid.collide_and_bounce_off_canvas(width, height) {
            boid.apply(update);
            hits += 1;
        }
        boid.update(dt);
    }
    hits
}
