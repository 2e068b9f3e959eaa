/*
 * Simulation Parameters Module
 *
 * This module defines the SimConfig struct holding every tunable of the
 * simulation: spawn ranges, grid tuning, frame rate and palette. The control
 * panel reads the slider ranges from here as well.
 */

use nannou::color::rgba;

use crate::colour::Colour;
use crate::error::SimError;
use crate::realtime::frame_interval;
use crate::spatial_grid::Partition;
use crate::vector::Vector2;

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub cell_size: f32,
    pub partition: Partition,
    pub min_radius: f32,
    pub max_radius: f32,
    pub boid_speed: f32,
    pub target_fps: f32,

    // Palette
    pub background: Colour,
    pub boid_colour: Colour,
    pub collision_colour: Colour,
    pub grid_colour: Colour,
    pub heat_cold: Colour,
    pub heat_hot: Colour,
    pub grid_line_colour: Colour,
    pub grid_line_width: f32,

    // FPS readout
    pub fps_colour: Colour,
    pub fps_position: Vector2,
    pub fps_font_size: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cell_size: 32.0,
            partition: Partition::NeighbourAware,
            min_radius: 4.0,
            max_radius: 8.0,
            boid_speed: 120.0,
            target_fps: 60.0,
            background: rgba(0.0, 0.0, 0.0, 1.0),
            boid_colour: rgba(1.0, 1.0, 1.0, 1.0),
            collision_colour: rgba(1.0, 0.0, 0.0, 1.0),
            grid_colour: rgba(0.08, 0.08, 0.1, 1.0),
            heat_cold: rgba(0.05, 0.05, 0.25, 1.0),
            heat_hot: rgba(0.9, 0.45, 0.0, 1.0),
            grid_line_colour: rgba(0.25, 0.25, 0.3, 1.0),
            grid_line_width: 1.0,
            fps_colour: rgba(0.0, 1.0, 0.0, 1.0),
            fps_position: Vector2::new(8.0, 16.0),
            fps_font_size: 14,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.cell_size > 0.0) {
            return Err(SimError::InvalidConfig("cell_size must be positive"));
        }
        if !(self.min_radius > 0.0) || self.min_radius > self.max_radius {
            return Err(SimError::InvalidConfig("radius range must satisfy 0 < min_radius <= max_radius"));
        }
        if !(self.target_fps > 0.0) {
            return Err(SimError::InvalidConfig("target_fps must be positive"));
        }
        if frame_interval(self.target_fps).is_zero() {
            return Err(SimError::InvalidConfig("target_fps is too high to schedule"));
        }
        if !(self.boid_speed >= 0.0) {
            return Err(SimError::InvalidConfig("boid_speed must not be negative"));
        }
        Ok(())
    }

    // Ranges for the control panel
    pub fn get_spawn_count_range() -> std::ops::RangeInclusive<usize> {
        1..=1000
    }
}
