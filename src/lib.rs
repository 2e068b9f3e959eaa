/*
 * Collision Boids - Module Definitions
 *
 * This file defines the module structure for the boid collision simulation.
 * The core (vector and colour math, frame scheduler, boid model, spatial
 * grid, physics passes, renderer and the Sim orchestrator) is independent of
 * the window; `app` and `ui` are the nannou/egui host around it.
 */

// Re-export key components for easier access
pub use app::Model;
pub use boid::{Boid, BoidUpdate};
pub use colour::Colour;
pub use debug::TickStats;
pub use error::SimError;
pub use params::SimConfig;
pub use realtime::{FrameTick, RealtimeUpdate};
pub use renderer::{NannouSurface, RenderFlags};
pub use sim::Sim;
pub use spatial_grid::{Cell, GridPosition, Partition, SpatialGrid};
pub use surface::Surface;
pub use vector::{Vector2, VectorExt};

// Define modules
pub mod app;
pub mod boid;
pub mod colour;
pub mod debug;
pub mod error;
pub mod params;
pub mod physics;
pub mod realtime;
pub mod renderer;
pub mod sim;
pub mod spatial_grid;
pub mod surface;
pub mod ui;
pub mod vector;

// Canvas size of the desktop host
pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 640;
