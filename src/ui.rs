/*
 * UI Module
 *
 * The control panel, built with nannou_egui. It never touches the simulation
 * directly: every widget interaction becomes a ControlAction that the app
 * applies through the Sim control surface on the same thread.
 */

use nannou_egui::{egui, Egui};

use crate::debug::TickStats;
use crate::params::SimConfig;
use crate::renderer::RenderFlags;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Spawn(usize),
    Clear,
    ShowGrid(bool),
    ShowFps(bool),
    PerformanceMode(bool),
}

// Panel-local state that is not part of the simulation
pub struct PanelState {
    pub spawn_count: usize,
}

impl Default for PanelState {
    fn default() -> Self {
        Self { spawn_count: 100 }
    }
}

/// Lay out the panel for this frame and return the requested actions.
pub fn update_ui(egui: &mut Egui, panel: &mut PanelState, flags: RenderFlags, stats: &TickStats) -> Vec<ControlAction> {
    let mut actions = Vec::new();
    let mut show_grid = flags.show_grid;
    let mut show_fps = flags.show_fps;
    let mut performance_mode = flags.performance_mode;

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 40.0])
        .show(&ctx, |ui| {
            ui.add(egui::Slider::new(&mut panel.spawn_count, SimConfig::get_spawn_count_range()).text("Boids to spawn"));

            ui.horizontal(|ui| {
                if ui.button("Spawn").clicked() {
                    actions.push(ControlAction::Spawn(panel.spawn_count));
                }
                if ui.button("Clear").clicked() {
                    actions.push(ControlAction::Clear);
                }
            });

            ui.separator();

            if ui.checkbox(&mut show_grid, "Show Grid").changed() {
                actions.push(ControlAction::ShowGrid(show_grid));
            }
            if ui.checkbox(&mut show_fps, "Show FPS").changed() {
                actions.push(ControlAction::ShowFps(show_fps));
            }
            if ui.checkbox(&mut performance_mode, "Performance Mode").changed() {
                actions.push(ControlAction::PerformanceMode(performance_mode));
            }

            ui.separator();

            ui.label(format!("Boids: {}", stats.boids));
            ui.label(format!("Pair checks: {}", stats.pair_checks));
            ui.label(format!("Collisions: {}", stats.collisions));
            ui.label(format!("Occupied cells: {}", stats.occupied_cells));
        });

    actions
}
