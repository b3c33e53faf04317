//! Impulse applier: mutates body velocities given a contact and a scalar
//! impulse (section 4.4).

use crate::body::Body;
use crate::contact::Contact;
use crate::error::{PhysicsError, PhysicsResult};
use crate::geometry::cross2d;

/// Impulse magnitude below which a unilateral contact's negative impulse is
/// tolerated as round-off rather than rejected as an invariant violation.
pub const TINY_IMPULSE: f64 = 1e-12;

/// Impulse magnitude below which the resulting velocity jump is flagged as
/// "continuous" rather than a discontinuous bump, for the surrounding
/// integrator's benefit.
pub const SMALL_IMPULSE: f64 = 1e-4;

/// Outcome of applying one contact's impulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplyOutcome {
    /// The impulse actually recorded on the contact (after clamping).
    pub impulse: f64,

    /// Hint to the surrounding integrator: `true` when `|impulse| <
    /// SMALL_IMPULSE`, i.e. the velocity change is small enough not to be
    /// treated as a discontinuous bump.
    pub continuous: bool,
}

/// Applies scalar impulse `j` at `contact`, mutating the two referenced
/// bodies' linear and angular velocities.
///
/// Bodies are updated one at a time (primary, then normal) rather than
/// simultaneously, which sidesteps the aliasing a pointer-based
/// implementation would need to worry about even when `primary_body ==
/// normal_body`.
pub fn apply_impulse<B: Body>(
    bodies: &mut [B],
    contact: &mut Contact,
    j: f64,
) -> PhysicsResult<ApplyOutcome> {
    let mut j = j;

    if !contact.joint && j < 0.0 {
        if j.abs() <= TINY_IMPULSE {
            j = 0.0;
        } else {
            return Err(PhysicsError::invariant(format!(
                "unilateral contact received impulse {j} < -TINY_IMPULSE"
            )));
        }
    }

    contact.impulse = j;

    if j == 0.0 {
        return Ok(ApplyOutcome {
            impulse: 0.0,
            continuous: true,
        });
    }

    let continuous = j.abs() < SMALL_IMPULSE;
    let n = contact.normal;
    let delta = n * j;

    {
        let body = &mut bodies[contact.primary_body];
        if !body.is_static() {
            let v = body.linear_velocity();
            body.set_linear_velocity(v + delta / body.mass());
            let domega = j * cross2d(contact.r1, n) / body.moment_about_cm();
            let omega = body.angular_velocity();
            body.set_angular_velocity(omega + domega);
        }
    }

    {
        let body = &mut bodies[contact.normal_body];
        if !body.is_static() {
            let v = body.linear_velocity();
            body.set_linear_velocity(v - delta / body.mass());
            let domega = j * cross2d(contact.r2, n) / body.moment_about_cm();
            let omega = body.angular_velocity();
            body.set_angular_velocity(omega - domega);
        }
    }

    Ok(ApplyOutcome {
        impulse: j,
        continuous,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{MassProperties, PlanarBody};
    use nalgebra::Vector2;

    #[test]
    fn negative_tiny_impulse_clamps_to_zero() {
        let mut bodies = vec![
            PlanarBody::new(0, MassProperties::disk(1.0, 1.0)),
            PlanarBody::new(1, MassProperties::disk(1.0, 1.0)),
        ];
        let mut contact = Contact::new(
            0,
            1,
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::new(1.0, 0.0),
            0.0,
            0.0,
            false,
        );
        let outcome = apply_impulse(&mut bodies, &mut contact, -1e-13).unwrap();
        assert_eq!(outcome.impulse, 0.0);
        assert_eq!(contact.impulse, 0.0);
    }

    #[test]
    fn large_negative_impulse_on_unilateral_contact_is_rejected() {
        let mut bodies = vec![
            PlanarBody::new(0, MassProperties::disk(1.0, 1.0)),
            PlanarBody::new(1, MassProperties::disk(1.0, 1.0)),
        ];
        let mut contact = Contact::new(
            0,
            1,
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::new(1.0, 0.0),
            0.0,
            0.0,
            false,
        );
        let result = apply_impulse(&mut bodies, &mut contact, -1.0);
        assert!(result.is_err());
    }

    #[test]
    fn joint_accepts_negative_impulse() {
        let mut bodies = vec![
            PlanarBody::new(0, MassProperties::disk(1.0, 1.0)),
            PlanarBody::new(1, MassProperties::disk(1.0, 1.0)),
        ];
        let mut contact = Contact::new(
            0,
            1,
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::new(1.0, 0.0),
            0.0,
            0.0,
            true,
        );
        let outcome = apply_impulse(&mut bodies, &mut contact, -2.5).unwrap();
        assert_eq!(outcome.impulse, -2.5);
    }

    #[test]
    fn equal_mass_head_on_impulse_splits_velocity_change() {
        let mut bodies = vec![
            PlanarBody::new(0, MassProperties::disk(1.0, 1.0)),
            PlanarBody::new(1, MassProperties::disk(1.0, 1.0)),
        ];
        bodies[0].linear_velocity = Vector2::new(1.0, 0.0);
        bodies[1].linear_velocity = Vector2::new(-1.0, 0.0);

        let mut contact = Contact::new(
            0,
            1,
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::new(-1.0, 0.0),
            -2.0,
            1.0,
            false,
        );

        // j = 2.0 exchanges velocities exactly for equal masses, e=1.
        apply_impulse(&mut bodies, &mut contact, 2.0).unwrap();
        assert!((bodies[0].linear_velocity.x - (-1.0)).abs() < 1e-9);
        assert!((bodies[1].linear_velocity.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn static_body_is_never_mutated() {
        let mut bodies = vec![PlanarBody::new_static(0), PlanarBody::new(1, MassProperties::disk(1.0, 1.0))];
        bodies[1].linear_velocity = Vector2::new(-1.0, 0.0);

        let mut contact = Contact::new(
            0,
            1,
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::new(1.0, 0.0),
            -1.0,
            1.0,
            false,
        );
        apply_impulse(&mut bodies, &mut contact, 2.0).unwrap();
        assert_eq!(bodies[0].linear_velocity, Vector2::zeros());
        assert_eq!(bodies[0].angular_velocity, 0.0);
    }
}
