/*
 * Vector Module
 *
 * The simulation does its 2D maths on nannou's glam `Vec2`. Coordinates are in
 * canvas space: (0, 0) is the top-left corner and y grows downward.
 *
 * glam covers the arithmetic (`+`, `-`, `*` by scalar or component-wise,
 * `dot`, `length`, `length_squared`, `normalize_or_zero`). The helpers it
 * lacks live on `VectorExt`.
 */

use nannou::prelude::Vec2;

pub type Vector2 = Vec2;

pub trait VectorExt {
    /// Unit vector pointing along `radians`, measured from the +x axis.
    fn from_radians(radians: f32) -> Self;

    /// Mirror `self` about the line perpendicular to `normal`, which must be unit length.
    fn reflect(self, normal: Self) -> Self;

    fn left_normal(self) -> Self;

    fn right_normal(self) -> Self;
}

impl VectorExt for Vec2 {
    fn from_radians(radians: f32) -> Vec2 {
        Vec2::new(radians.cos(), radians.sin())
    }

    fn reflect(self, normal: Vec2) -> Vec2 {
        self - normal * (2.0 * self.dot(normal))
    }

    // Zero in, zero out
    fn left_normal(self) -> Vec2 {
        (-self.perp()).normalize_or_zero()
    }

    fn right_normal(self) -> Vec2 {
        self.perp().normalize_or_zero()
    }
}
