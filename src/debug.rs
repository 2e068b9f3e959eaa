/*
 * Debug Information Module
 *
 * This module defines the TickStats struct that records what the last tick
 * did. It feeds the FPS readout and the control panel, and lets tests observe
 * how much work the broad phase saved.
 */

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    pub ticks: u64,
    pub dt: f32,
    pub fps: u32,
    pub boids: usize,
    // Ordered pairs handed to the narrow phase
    pub pair_checks: usize,
    pub collisions: usize,
    pub boundary_hits: usize,
    pub occupied_cells: usize,
}

impl TickStats {
    pub fn fps_label(&self) -> String {
        format!("FPS: {}", self.fps)
    }
}
