//! Simultaneous strategy: assemble the whole system once, solve once, apply
//! once (section 4.5).

use crate::apply::{apply_impulse, TINY_IMPULSE};
use crate::body::Body;
use crate::contact::Contact;
use crate::error::{PhysicsError, PhysicsResult};
use crate::lcp::{verify_residuals, LcpSolver, LcpStatus};
use crate::matrix::InfluenceMatrix;

/// Resolves every contact in one shot: assembles the full influence matrix,
/// hands it to `solver`, and applies the resulting impulses.
///
/// Returns `true` iff at least one contact received an impulse greater than
/// [`TINY_IMPULSE`].
pub fn resolve_simultaneous<B: Body, S: LcpSolver>(
    bodies: &mut [B],
    contacts: &mut [Contact],
    solver: &mut S,
    time_hint: f64,
) -> PhysicsResult<bool> {
    let n = contacts.len();
    if n == 0 {
        return Ok(false);
    }

    let a = InfluenceMatrix::assemble(bodies, contacts);
    let b: Vec<f64> = contacts
        .iter()
        .map(|c| {
            if c.joint {
                c.normal_velocity
            } else {
                c.normal_velocity * (1.0 + c.elasticity)
            }
        })
        .collect();
    let joint: Vec<bool> = contacts.iter().map(|c| c.joint).collect();

    let mut j = vec![0.0; n];
    let status = solver.solve(&a, &b, &joint, time_hint, &mut j);
    if let LcpStatus::WorstResidual(row) = status {
        tracing::warn!(row, time_hint, "LCP solver reported non-convergence; verifying independently");
    }
    verify_residuals(&a, &b, &joint, &j).map_err(|row| PhysicsError::ResidualOutOfTolerance {
        row,
        residual: j[row],
        time_hint,
    })?;

    let mut any_impulse = false;
    for (contact, &impulse) in contacts.iter_mut().zip(j.iter()) {
        let outcome = apply_impulse(bodies, contact, impulse)?;
        if outcome.impulse > TINY_IMPULSE {
            any_impulse = true;
        }
    }

    Ok(any_impulse)
}
