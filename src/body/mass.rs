//! Mass properties for a planar rigid body.

use crate::error::{PhysicsError, PhysicsResult};
use serde::{Deserialize, Serialize};

/// Mass and rotational inertia of a planar rigid body.
///
/// The moment of inertia is a scalar here (inertia about the out-of-plane
/// z-axis through the center of mass), unlike the 3x3 tensor a 3D engine
/// needs — 2D rotation has exactly one degree of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassProperties {
    /// Total mass (kg), or `f64::INFINITY` for an immovable body.
    pub mass: f64,

    /// Inverse mass (1/kg); `0.0` for an immovable body.
    pub inverse_mass: f64,

    /// Moment of inertia about the center of mass (kg·m²), or
    /// `f64::INFINITY` for an immovable body.
    pub moment_of_inertia: f64,

    /// Inverse moment of inertia; `0.0` for an immovable body.
    pub inverse_moment_of_inertia: f64,
}

impl MassProperties {
    /// Creates mass properties from explicit mass and moment of inertia.
    pub fn new(mass: f64, moment_of_inertia: f64) -> PhysicsResult<Self> {
        if mass <= 0.0 {
            return Err(PhysicsError::invariant(format!(
                "mass must be positive, got {mass}"
            )));
        }
        if moment_of_inertia <= 0.0 {
            return Err(PhysicsError::invariant(format!(
                "moment of inertia must be positive, got {moment_of_inertia}"
            )));
        }

        Ok(Self {
            mass,
            inverse_mass: 1.0 / mass,
            moment_of_inertia,
            inverse_moment_of_inertia: 1.0 / moment_of_inertia,
        })
    }

    /// Mass properties for a solid disk of the given radius.
    ///
    /// `I = 0.5 * m * r^2` about the center.
    pub fn disk(mass: f64, radius: f64) -> Self {
        let moment = 0.5 * mass * radius * radius;
        Self::new(mass, moment).expect("disk mass properties are always well-formed")
    }

    /// Mass properties for a solid rectangle with the given width/height.
    ///
    /// `I = (1/12) * m * (w^2 + h^2)` about the center.
    pub fn rectangle(mass: f64, width: f64, height: f64) -> Self {
        let moment = (mass / 12.0) * (width * width + height * height);
        Self::new(mass, moment).expect("rectangle mass properties are always well-formed")
    }

    /// Mass properties for an immovable body.
    pub fn infinite() -> Self {
        Self {
            mass: f64::INFINITY,
            inverse_mass: 0.0,
            moment_of_inertia: f64::INFINITY,
            inverse_moment_of_inertia: 0.0,
        }
    }
}
