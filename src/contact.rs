//! Contact descriptor: one detected contact point, valid for one resolution
//! call.
//!
//! Contacts are produced by an external collision-detection collaborator and
//! consumed by exactly one resolution call; the core never persists them.
//! Bodies are referenced by index into the caller's body slice rather than
//! by pointer or trait-object reference, which keeps the borrow-checker
//! story simple (see `strategy` and `apply` for the mutable-aliasing
//! discipline this buys) and matches how a step loop already tracks bodies.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A single contact point between two bodies, or a bilateral joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Index of the primary body in the caller's body slice.
    pub primary_body: usize,

    /// Index of the normal body; `normal` points outward from this body.
    pub normal_body: usize,

    /// Offset from the primary body's center of mass to the impact point.
    pub r1: Vector2<f64>,

    /// Offset from the normal body's center of mass to the impact point.
    pub r2: Vector2<f64>,

    /// Unit vector pointing outward from `normal_body`.
    pub normal: Vector2<f64>,

    /// Signed pre-resolution relative normal approach speed (negative = approaching).
    pub normal_velocity: f64,

    /// Coefficient of restitution in `[0, 1]`.
    pub elasticity: f64,

    /// `true` for a bilateral joint (impulse sign unconstrained, must zero
    /// out normal velocity); `false` for a unilateral contact (impulse `>= 0`).
    pub joint: bool,

    /// Scalar impulse finally applied at this contact. Written by the core,
    /// read by the caller after resolution for diagnostics/event reporting.
    pub impulse: f64,
}

impl Contact {
    /// Creates a new contact descriptor with zero accumulated impulse.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        primary_body: usize,
        normal_body: usize,
        r1: Vector2<f64>,
        r2: Vector2<f64>,
        normal: Vector2<f64>,
        normal_velocity: f64,
        elasticity: f64,
        joint: bool,
    ) -> Self {
        Self {
            primary_body,
            normal_body,
            r1,
            r2,
            normal,
            normal_velocity,
            elasticity,
            joint,
            impulse: 0.0,
        }
    }

    /// Whether `body` is one of the two bodies this contact references.
    pub fn references(&self, body_index: usize) -> bool {
        self.primary_body == body_index || self.normal_body == body_index
    }
}
