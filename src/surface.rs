/*
 * Surface Module
 *
 * The drawing capability the simulation needs from its host. Coordinates are
 * canvas space: (0, 0) at the top-left, y increasing downward.
 */

use crate::colour::Colour;
use crate::vector::Vector2;

pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    // Wipe the whole surface to `colour`
    fn clear(&mut self, colour: Colour);
    fn fill_circle(&mut self, centre: Vector2, radius: f32, colour: Colour);
    fn fill_rect(&mut self, top_left: Vector2, size: Vector2, colour: Colour);
    fn stroke_line(&mut self, from: Vector2, to: Vector2, weight: f32, colour: Colour);
    // `position` is the left end of the text baseline
    fn draw_text(&mut self, text: &str, position: Vector2, font_size: u32, colour: Colour);
}
