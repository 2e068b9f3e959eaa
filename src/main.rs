/*
 * Collision Boids
 *
 * Circular boids bounce around an 800x640 canvas, off its edges and off each
 * other. The control panel spawns and clears boids and toggles the grid
 * overlay, the FPS readout and the grid-accelerated collision pass
 * ("performance mode", which also heat-maps the grid by occupancy).
 *
 * Logging goes through tracing; set RUST_LOG to override the default filter.
 */

use collision_boids::app;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("collision_boids=info,wgpu=error,naga=error"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() {
    init_logging();
    nannou::app(app::model).update(app::update).run();
}
