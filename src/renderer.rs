/*
 * Renderer Module
 *
 * This module handles the rendering half of a tick: clear, optional grid
 * (flat or heat-mapped tiles plus lines), boids coloured by collision
 * cooldown, and the FPS readout. It draws through the `Surface` trait so the
 * same pass runs against nannou in the app and a recorder in tests.
 */

use nannou::prelude::*;

use crate::boid::Boid;
use crate::colour::Colour;
use crate::debug::TickStats;
use crate::params::SimConfig;
use crate::spatial_grid::SpatialGrid;
use crate::surface::Surface;
use crate::vector::Vector2;

// Width of the box the FPS text is laid out in
const TEXT_BOX_WIDTH: f32 = 200.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderFlags {
    pub show_grid: bool,
    pub show_fps: bool,
    pub performance_mode: bool,
}

/// Redraw the whole scene onto `surface`.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    boids: &[Boid],
    grid: &mut SpatialGrid,
    flags: RenderFlags,
    config: &SimConfig,
    stats: &TickStats,
) {
    surface.clear(config.background);

    if flags.show_grid {
        if flags.performance_mode {
            grid.colour_heat_map(config.heat_cold, config.heat_hot, config.partition.heat_normalisation());
        } else {
            grid.colour_flat(config.grid_colour);
        }
        draw_grid_tiles(surface, grid);
        draw_grid_lines(surface, grid, config.grid_line_colour, config.grid_line_width);
    }

    for boid in boids {
        surface.fill_circle(boid.pos, boid.radius, boid.render_colour(config.collision_colour));
    }

    if flags.show_fps {
        surface.draw_text(&stats.fps_label(), config.fps_position, config.fps_font_size, config.fps_colour);
    }
}

pub fn draw_grid_tiles<S: Surface + ?Sized>(surface: &mut S, grid: &SpatialGrid) {
    let size = Vector2::new(grid.cell_size, grid.cell_size);
    for cell in grid.iter() {
        surface.fill_rect(cell.surface_pos, size, cell.colour);
    }
}

// One vertical line per column edge and one horizontal line per row edge
pub fn draw_grid_lines<S: Surface + ?Sized>(surface: &mut S, grid: &SpatialGrid, colour: Colour, weight: f32) {
    let width = surface.width();
    let height = surface.height();

    for column in 0..=grid.columns() {
        let x = column as f32 * grid.cell_size;
        surface.stroke_line(Vector2::new(x, 0.0), Vector2::new(x, height), weight, colour);
    }

    for row in 0..=grid.rows() {
        let y = row as f32 * grid.cell_size;
        surface.stroke_line(Vector2::new(0.0, y), Vector2::new(width, y), weight, colour);
    }
}

/// A `Surface` backed by a retained nannou `Draw`.
///
/// Commands accumulate until the next `clear`, so the window can present the
/// last simulated frame on every repaint, including repaints the frame
/// scheduler skipped.
pub struct NannouSurface {
    draw: Draw,
    width: f32,
    height: f32,
}

impl NannouSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            draw: Draw::new(),
            width,
            height,
        }
    }

    pub fn draw(&self) -> &Draw {
        &self.draw
    }

    // Canvas space (top-left origin, y down) to nannou space (centred, y up)
    #[inline]
    fn to_nannou(&self, p: Vector2) -> Point2 {
        pt2(p.x - self.width / 2.0, self.height / 2.0 - p.y)
    }
}

impl Surface for NannouSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self, colour: Colour) {
        self.draw.reset();
        self.draw.background().color(colour);
    }

    fn fill_circle(&mut self, centre: Vector2, radius: f32, colour: Colour) {
        self.draw
            .ellipse()
            .xy(self.to_nannou(centre))
            .radius(radius)
            .color(colour);
    }

    fn fill_rect(&mut self, top_left: Vector2, size: Vector2, colour: Colour) {
        let centre = top_left + size * 0.5;
        self.draw
            .rect()
            .xy(self.to_nannou(centre))
            .wh(size)
            .color(colour);
    }

    fn stroke_line(&mut self, from: Vector2, to: Vector2, weight: f32, colour: Colour) {
        self.draw
            .line()
            .start(self.to_nannou(from))
            .end(self.to_nannou(to))
            .weight(weight)
            .color(colour);
    }

    fn draw_text(&mut self, text: &str, position: Vector2, font_size: u32, colour: Colour) {
        let anchor = self.to_nannou(position);
        self.draw
            .text(text)
            .left_justify()
            .no_line_wrap()
            .w(TEXT_BOX_WIDTH)
            .x_y(anchor.x + TEXT_BOX_WIDTH / 2.0, anchor.y)
            .font_size(font_size)
            .color(colour);
    }
}
