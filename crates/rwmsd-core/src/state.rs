//! Planar position type and the dimension constant.

use nalgebra::Vector2;

/// Spatial dimension of every walk in this crate.
pub const DIMENSION: usize = 2;

/// A point (or displacement) in the plane.
pub type Position = Vector2<f64>;

pub fn origin() -> Position {
    Position::zeros()
}

/// |b - a|²
pub fn squared_displacement(a: &Position, b: &Position) -> f64 {
    (b - a).norm_squared()
}
