//! Body capability and a concrete planar rigid body.
//!
//! The resolution core never needs a concrete body type: it only needs the
//! capability set {mass, moment of inertia about the center of mass, linear
//! and angular velocity read/write, stable identity}. [`Body`] expresses that
//! capability as a trait so that callers can plug in whatever body
//! representation their simulation already uses; [`PlanarBody`] is the one
//! concrete implementation this crate ships, grounded directly in it.

mod mass;

pub use mass::MassProperties;

use nalgebra::Vector2;

/// Capability set the resolution core needs from a rigid body.
///
/// A body with infinite mass is immovable: the core never calls the velocity
/// setters on it, and [`Body::is_static`] lets the core assert that an
/// upstream bug never gave such a body non-zero velocity.
pub trait Body {
    /// A stable identifier, used only for equality comparison between the
    /// two bodies referenced by a contact.
    fn id(&self) -> u64;

    /// Mass in kilograms; `f64::INFINITY` for an immovable body.
    fn mass(&self) -> f64;

    /// Moment of inertia about the center of mass (kg·m²);
    /// `f64::INFINITY` for an immovable body.
    fn moment_about_cm(&self) -> f64;

    /// Current linear velocity (m/s).
    fn linear_velocity(&self) -> Vector2<f64>;

    /// Sets linear velocity. Never called on a static body.
    fn set_linear_velocity(&mut self, v: Vector2<f64>);

    /// Current angular velocity (rad/s).
    fn angular_velocity(&self) -> f64;

    /// Sets angular velocity. Never called on a static body.
    fn set_angular_velocity(&mut self, omega: f64);

    /// True when the body has infinite mass and must never be mutated.
    fn is_static(&self) -> bool {
        self.mass().is_infinite()
    }
}

/// Extends [`Body`] with a per-body elasticity, for callers whose
/// contact-detection collaborator reads it back out to populate
/// `Contact::elasticity` on newly produced contacts.
///
/// Kept separate from [`Body`] rather than folded in: the resolution core
/// itself never reads a body's elasticity (only the contact's, per section
/// 4), so the capability the core actually needs stays minimal. Only the
/// `set_elasticity` broadcast in the crate root needs this.
pub trait ElasticBody: Body {
    /// Current elasticity (coefficient of restitution) in `[0, 1]`.
    fn elasticity(&self) -> f64;

    /// Sets elasticity. Callers broadcast through [`crate::set_elasticity`]
    /// rather than calling this directly, which validates the range and the
    /// non-empty-world precondition once for the whole body list.
    fn set_elasticity(&mut self, value: f64);
}

/// Concrete planar rigid body: mass properties plus linear/angular velocity.
///
/// Position and orientation are not modeled here — the resolution core only
/// ever needs velocity and the per-contact offset vectors the caller already
/// computed, so this type carries exactly the state the core mutates.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlanarBody {
    /// Stable identity, distinct across a simulation's lifetime.
    pub id: u64,

    /// Mass properties (mass, moment of inertia about the CM).
    pub mass_props: MassProperties,

    /// Linear velocity (m/s).
    pub linear_velocity: Vector2<f64>,

    /// Angular velocity (rad/s).
    pub angular_velocity: f64,

    /// Elasticity (coefficient of restitution) this body contributes when a
    /// contact-detection collaborator derives `Contact::elasticity` for a
    /// new contact involving this body. Not read by the resolution core.
    pub elasticity: f64,
}

impl PlanarBody {
    /// Creates a new body at rest, with elasticity defaulted to `1.0`.
    pub fn new(id: u64, mass_props: MassProperties) -> Self {
        Self {
            id,
            mass_props,
            linear_velocity: Vector2::zeros(),
            angular_velocity: 0.0,
            elasticity: 1.0,
        }
    }

    /// Creates an immovable (infinite-mass) body at rest.
    pub fn new_static(id: u64) -> Self {
        Self::new(id, MassProperties::infinite())
    }

    /// Velocity at a point offset `r` from the center of mass: `v + ω × r`.
    pub fn velocity_at_offset(&self, r: Vector2<f64>) -> Vector2<f64> {
        self.linear_velocity + crate::geometry::angular_cross(self.angular_velocity, r)
    }
}

impl Body for PlanarBody {
    fn id(&self) -> u64 {
        self.id
    }

    fn mass(&self) -> f64 {
        self.mass_props.mass
    }

    fn moment_about_cm(&self) -> f64 {
        self.mass_props.moment_of_inertia
    }

    fn linear_velocity(&self) -> Vector2<f64> {
        self.linear_velocity
    }

    fn set_linear_velocity(&mut self, v: Vector2<f64>) {
        self.linear_velocity = v;
    }

    fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    fn set_angular_velocity(&mut self, omega: f64) {
        self.angular_velocity = omega;
    }
}

impl ElasticBody for PlanarBody {
    fn elasticity(&self) -> f64 {
        self.elasticity
    }

    fn set_elasticity(&mut self, value: f64) {
        self.elasticity = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_body_reports_infinite_mass() {
        let body = PlanarBody::new_static(0);
        assert!(body.is_static());
        assert_eq!(body.mass_props.inverse_mass, 0.0);
    }

    #[test]
    fn velocity_at_offset_adds_rotational_component() {
        let mut body = PlanarBody::new(1, MassProperties::disk(2.0, 1.0));
        body.linear_velocity = Vector2::new(1.0, 0.0);
        body.angular_velocity = 2.0;

        let r = Vector2::new(0.0, 1.0);
        let v = body.velocity_at_offset(r);
        // v_cm + ω × r = (1,0) + 2*(-1,0) = (-1, 0)
        assert_eq!(v, Vector2::new(-1.0, 0.0));
    }
}
