/*
 * Colour Module
 *
 * Colours are nannou's `Rgba` with float channels in [0, 1], handed to the
 * draw calls as-is. This module adds the blend, hex encoding and comparison
 * helpers the simulation needs on top of it.
 */

use nannou::color::{LinSrgba, Mix, Rgba};

pub type Colour = Rgba;

/// Interpolate each channel from `first` to `last`. `amount` is clamped to [0, 1].
///
/// palette only implements `Mix` for linear encodings, so the stored channels
/// are mixed through `LinSrgba` without converting them.
pub fn blend(first: Colour, last: Colour, amount: f32) -> Colour {
    let first = LinSrgba::from_components(first.into_components());
    let last = LinSrgba::from_components(last.into_components());
    Colour::from_components(first.mix(&last, amount).into_components())
}

// "#rrggbbaa", each channel rounded from [0, 1] to [0, 255]
pub fn to_hex(colour: &Colour) -> String {
    let (r, g, b, a) = colour.into_components();
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        channel_to_byte(r),
        channel_to_byte(g),
        channel_to_byte(b),
        channel_to_byte(a),
    )
}

pub fn approx_eq(a: &Colour, b: &Colour) -> bool {
    let (ar, ag, ab, aa) = a.into_components();
    let (br, bg, bb, ba) = b.into_components();
    float_equal(ar, br) && float_equal(ag, bg) && float_equal(ab, bb) && float_equal(aa, ba)
}

#[inline]
fn channel_to_byte(channel: f32) -> u8 {
    (channel * 255.0).round() as u8
}

/// True when `a` and `b` differ by less than machine epsilon.
pub fn float_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < f32::EPSILON
}
