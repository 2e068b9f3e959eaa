/*
 * Simulation Module
 *
 * This module defines the Sim struct, the single owner of the boid population,
 * the spatial grid and the drawing surface. It exposes the control surface
 * used by the UI (init, spawn, clear and the display toggles) and runs the
 * per-tick pipeline:
 * 1. Boid-vs-boid collisions (grid broad phase in performance mode, brute force otherwise)
 * 2. Canvas bounces and integration
 * 3. Rendering
 *
 * Control calls made before `init` (or a second `init`) are logged and ignored.
 */

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use crate::boid::Boid;
use crate::debug::TickStats;
use crate::error::SimError;
use crate::params::SimConfig;
use crate::physics::{self, CollisionPass};
use crate::realtime::{FrameTick, RealtimeUpdate};
use crate::renderer::{self, RenderFlags};
use crate::spatial_grid::SpatialGrid;
use crate::surface::Surface;

// Everything that only exists once a surface has been bound
struct Bound<S> {
    surface: S,
    grid: SpatialGrid,
    scheduler: RealtimeUpdate,
}

pub struct Sim<S: Surface> {
    config: SimConfig,
    rng: StdRng,
    boids: Vec<Boid>,
    flags: RenderFlags,
    stats: TickStats,
    bound: Option<Bound<S>>,
}

impl<S: Surface> Sim<S> {
    pub fn new(config: SimConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    // Deterministic spawning for tests and benchmarks
    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            boids: Vec::new(),
            flags: RenderFlags::default(),
            stats: TickStats::default(),
            bound: None,
        }
    }

    pub fn has_init(&self) -> bool {
        self.bound.is_some()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn flags(&self) -> RenderFlags {
        self.flags
    }

    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    pub fn surface(&self) -> Option<&S> {
        self.bound.as_ref().map(|bound| &bound.surface)
    }

    pub fn grid(&self) -> Option<&SpatialGrid> {
        self.bound.as_ref().map(|bound| &bound.grid)
    }

    fn ensure_init(&self, operation: &'static str) -> Result<(), SimError> {
        if self.has_init() {
            Ok(())
        } else {
            Err(SimError::NotInitialised { operation })
        }
    }

    /// Bind `surface`, build the grid for its size and start the frame scheduler.
    /// Logs and does nothing if already initialised.
    pub fn init(&mut self, surface: S) {
        if let Err(err) = self.try_init(surface, Instant::now()) {
            warn!(error = %err, "init ignored");
        }
    }

    pub fn try_init(&mut self, surface: S, start: Instant) -> Result<(), SimError> {
        if self.has_init() {
            return Err(SimError::AlreadyInitialised);
        }
        self.config.validate()?;

        let (width, height) = (surface.width(), surface.height());
        let grid = SpatialGrid::new(width, height, self.config.cell_size, self.config.grid_colour);
        let scheduler = RealtimeUpdate::new(self.config.target_fps, start);

        info!(
            width,
            height,
            rows = grid.rows(),
            columns = grid.columns(),
            target_fps = self.config.target_fps,
            "simulation initialised"
        );

        self.bound = Some(Bound {
            surface,
            grid,
            scheduler,
        });
        Ok(())
    }

    pub fn spawn(&mut self, count: usize) {
        if let Err(err) = self.try_spawn(count) {
            warn!(error = %err, count, "spawn ignored");
        }
    }

    pub fn try_spawn(&mut self, count: usize) -> Result<(), SimError> {
        let Some(bound) = self.bound.as_ref() else {
            return Err(SimError::NotInitialised { operation: "spawn" });
        };

        let (width, height) = (bound.surface.width(), bound.surface.height());
        let spawned = physics::spawn_boids(&mut self.rng, count, width, height, &self.config);
        self.boids.extend(spawned);

        info!(count, total = self.boids.len(), "spawned boids");
        Ok(())
    }

    /// Append a boid exactly as given, bypassing random placement.
    ///
    /// Not part of the control surface; integration tests use it to stage
    /// exact collisions. Like `spawn` it is ignored before `init`.
    #[doc(hidden)]
    pub fn add_boid(&mut self, boid: Boid) {
        match self.ensure_init("add a boid") {
            Ok(()) => self.boids.push(boid),
            Err(err) => warn!(error = %err, "add_boid ignored"),
        }
    }

    pub fn clear(&mut self) {
        if let Err(err) = self.try_clear() {
            warn!(error = %err, "clear ignored");
        }
    }

    pub fn try_clear(&mut self) -> Result<(), SimError> {
        self.ensure_init("clear")?;
        let removed = self.boids.len();
        self.boids.clear();
        info!(removed, "cleared boids");
        Ok(())
    }

    pub fn set_show_grid(&mut self, on: bool) {
        match self.ensure_init("toggle the grid") {
            Ok(()) => {
                self.flags.show_grid = on;
                debug!(on, "show grid");
            }
            Err(err) => warn!(error = %err, "set_show_grid ignored"),
        }
    }

    pub fn set_performance_mode(&mut self, on: bool) {
        match self.ensure_init("toggle performance mode") {
            Ok(()) => {
                self.flags.performance_mode = on;
                debug!(on, "performance mode");
            }
            Err(err) => warn!(error = %err, "set_performance_mode ignored"),
        }
    }

    pub fn set_show_fps(&mut self, on: bool) {
        match self.ensure_init("toggle the fps readout") {
            Ok(()) => {
                self.flags.show_fps = on;
                debug!(on, "show fps");
            }
            Err(err) => warn!(error = %err, "set_show_fps ignored"),
        }
    }

    /// Host repaint hook. Runs a tick if the scheduler accepts a frame at `now`
    /// and returns whether it did.
    pub fn frame(&mut self, now: Instant) -> bool {
        let tick: Option<FrameTick> = match self.bound.as_mut() {
            Some(bound) => bound.scheduler.poll(now),
            None => None,
        };

        match tick {
            Some(FrameTick { dt, fps }) => {
                self.tick(dt, fps);
                true
            }
            None => false,
        }
    }

    /// Run one full collide / integrate / render pass with `dt` seconds elapsed.
    pub fn tick(&mut self, dt: f32, fps: u32) {
        let Some(bound) = self.bound.as_mut() else {
            trace!("tick before init ignored");
            return;
        };

        let pass: CollisionPass = if self.flags.performance_mode {
            physics::collide_with_grid(&mut self.boids, &mut bound.grid, self.config.partition)
        } else {
            // Stale indices must not outlive the population they point into
            bound.grid.clear();
            physics::collide_brute_force(&mut self.boids)
        };

        let (width, height) = (bound.surface.width(), bound.surface.height());
        let boundary_hits = physics::bounce_and_integrate(&mut self.boids, width, height, dt);

        self.stats = TickStats {
            ticks: self.stats.ticks + 1,
            dt,
            fps,
            boids: self.boids.len(),
            pair_checks: pass.pair_checks,
            collisions: pass.collisions,
            boundary_hits,
            occupied_cells: bound.grid.occupied_cells(),
        };

        renderer::render(
            &mut bound.surface,
            &self.boids,
            &mut bound.grid,
            self.flags,
            &self.config,
            &self.stats,
        );

        trace!(
            dt,
            fps,
            boids = self.stats.boids,
            pair_checks = self.stats.pair_checks,
            collisions = self.stats.collisions,
            boundary_hits,
            "tick"
        );
    }
}
