/*
 * Application Module
 *
 * This module defines the nannou application model: the window, the egui
 * control panel and the Sim bound to a NannouSurface. nannou calls `update`
 * once per repaint, which is where the simulation's frame scheduler is
 * driven; `view` only presents what the last accepted tick drew.
 */

use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::warn;

use crate::params::SimConfig;
use crate::renderer::NannouSurface;
use crate::sim::Sim;
use crate::surface::Surface;
use crate::ui::{self, ControlAction, PanelState};
use crate::{CANVAS_HEIGHT, CANVAS_WIDTH};

// Main model for the application
pub struct Model {
    pub sim: Sim<NannouSurface>,
    pub egui: Egui,
    pub panel: PanelState,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Collision Boids")
        .size(CANVAS_WIDTH, CANVAS_HEIGHT)
        .resizable(false)
        .view(view)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to create the simulation window");

    let window = app.window(window_id).expect("window was just created");
    let egui = Egui::from_window(&window);

    let mut sim = Sim::new(SimConfig::default());
    sim.init(NannouSurface::new(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32));
    sim.set_show_grid(true);
    sim.set_show_fps(true);
    sim.set_performance_mode(true);

    Model {
        sim,
        egui,
        panel: PanelState::default(),
    }
}

// Update the model
pub fn update(_app: &App, model: &mut Model, update: Update) {
    model.egui.set_elapsed_time(update.since_start);

    let actions = ui::update_ui(&mut model.egui, &mut model.panel, model.sim.flags(), model.sim.stats());
    for action in actions {
        apply_action(&mut model.sim, action);
    }

    model.sim.frame(Instant::now());
}

// Route a control panel request to the matching control-surface call
pub fn apply_action<S: Surface>(sim: &mut Sim<S>, action: ControlAction) {
    match action {
        ControlAction::Spawn(count) => sim.spawn(count),
        ControlAction::Clear => sim.clear(),
        ControlAction::ShowGrid(on) => sim.set_show_grid(on),
        ControlAction::ShowFps(on) => sim.set_show_fps(on),
        ControlAction::PerformanceMode(on) => sim.set_performance_mode(on),
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    match model.sim.surface() {
        Some(surface) => {
            if let Err(err) = surface.draw().to_frame(app, &frame) {
                warn!(error = ?err, "failed to draw simulation frame");
            }
        }
        None => frame.clear(BLACK),
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(error = ?err, "failed to draw control panel");
    }
}

// Pass window events through to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
