//! Pre-resolution consistency checks (section 3 invariants).
//!
//! Run once per `handle_collisions` call, before any strategy touches the
//! contact list: a violation here means the caller's collision-detection
//! collaborator produced something the resolution core cannot act on safely.

use crate::body::Body;
use crate::contact::Contact;
use crate::error::{PhysicsError, PhysicsResult};

const UNIT_NORMAL_TOLERANCE: f64 = 1e-6;

/// Checks that every contact's body indices are in range, every normal is
/// unit length, and no infinite-mass body carries non-zero velocity.
pub fn validate<B: Body>(bodies: &[B], contacts: &[Contact]) -> PhysicsResult<()> {
    for (i, contact) in contacts.iter().enumerate() {
        if contact.primary_body >= bodies.len() || contact.normal_body >= bodies.len() {
            return Err(PhysicsError::invariant(format!(
                "contact {i} references a body index out of range"
            )));
        }
        let norm = contact.normal.norm();
        if (norm - 1.0).abs() > UNIT_NORMAL_TOLERANCE {
            return Err(PhysicsError::invariant(format!(
                "contact {i} normal is not unit length: |n| = {norm}"
            )));
        }
    }

    for (i, body) in bodies.iter().enumerate() {
        if body.is_static() {
            let moving = body.linear_velocity().norm() > 0.0 || body.angular_velocity() != 0.0;
            if moving {
                return Err(PhysicsError::invariant(format!(
                    "body {i} has infinite mass but non-zero velocity"
                )));
            }
        }
    }

    Ok(())
}
