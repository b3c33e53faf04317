//! Planar kinematic primitives.
//!
//! Everything here is a thin wrapper over `nalgebra::Vector2<f64>`; the only
//! non-trivial operation is the 2D cross product, which nalgebra does not
//! provide natively (it returns a scalar in 2D, not a vector).

use nalgebra::Vector2;

/// 2D cross product `a.x * b.y - a.y * b.x`.
///
/// Geometrically, the z-component of the 3D cross product of `(a, 0)` and
/// `(b, 0)`. Used throughout for the scalar "moment arm" of an offset vector
/// about a normal or velocity direction.
#[inline]
pub fn cross2d(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Cross product of a scalar angular velocity with a planar vector: `ω × r`.
///
/// In 2D this is `ω * perp(r)` where `perp((x, y)) = (-y, x)`.
#[inline]
pub fn angular_cross(omega: f64, r: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-omega * r.y, omega * r.x)
}
