//! Serial strategy: resolve one contact (or a small connected subset) at a
//! time, re-selecting focus every iteration, until nothing is approaching
//! (section 4.6).
//!
//! The influence matrix is assembled once; throughout the loop each contact's
//! running *raw* relative normal velocity lives in `b`, updated incrementally
//! by the increment each subset solve returns, rather than being recomputed
//! by re-reading body velocities every iteration. `b` never has a restitution
//! factor baked into it -- per 4.6 step 3, `(1 + e)` is applied fresh to a
//! subset's `b'` only at the moment that subset is solved, so a contact that
//! becomes focus again later still bounces off its *then-current* approach
//! velocity rather than a stale one. Bodies are only mutated once, at the
//! very end, via the accumulated per-contact impulse -- linearity of the
//! impulse response means applying the final cumulative impulse in one call
//! is equivalent to applying every intermediate increment as it was computed.

use crate::apply::{apply_impulse, TINY_IMPULSE};
use crate::body::Body;
use crate::config::{CollisionHandling, ResolutionConfig};
use crate::contact::Contact;
use crate::error::{PhysicsError, PhysicsResult};
use crate::lcp::{verify_residuals, LcpSolver, LcpStatus};
use crate::matrix::InfluenceMatrix;
use crate::rng::Lcg;

/// Hard ceiling on serial-strategy iterations, independent of contact count:
/// a resolution that has not converged by here is an upstream bug, not
/// something to keep spinning on.
pub const ITERATION_CEILING: usize = 100_000;

/// Resolves `contacts` against `bodies` using one of the serial strategies.
///
/// Returns `true` iff at least one contact ended up with a cumulative impulse
/// greater than [`TINY_IMPULSE`].
pub fn resolve_serial<B: Body, S: LcpSolver>(
    bodies: &mut [B],
    contacts: &mut [Contact],
    handling: CollisionHandling,
    config: &ResolutionConfig,
    solver: &mut S,
    time_hint: f64,
) -> PhysicsResult<bool> {
    let n = contacts.len();
    if n == 0 {
        return Ok(false);
    }

    let a = InfluenceMatrix::assemble(bodies, contacts);
    let joint: Vec<bool> = contacts.iter().map(|c| c.joint).collect();
    let mut b: Vec<f64> = contacts.iter().map(|c| c.normal_velocity).collect();
    let mut cumulative = vec![0.0; n];

    let mut rng = Lcg::new(config.random_seed);
    let panic_limit = 20 * n;
    let mut epsilon_v = config.epsilon_v();
    let mut iterations = 0usize;

    loop {
        if iterations >= ITERATION_CEILING {
            tracing::error!(
                iterations,
                ceiling = ITERATION_CEILING,
                "serial resolution exceeded its iteration ceiling"
            );
            return Err(PhysicsError::IterationCeilingExceeded {
                iterations,
                ceiling: ITERATION_CEILING,
            });
        }

        // Re-permuted every iteration: a fixed order would starve whichever
        // contact happens to sort last.
        let order = rng.permutation(n);
        let is_large = |i: usize| {
            if joint[i] {
                b[i].abs() > epsilon_v
            } else {
                b[i] < -epsilon_v
            }
        };
        let focus = match order.iter().copied().find(|&i| is_large(i)) {
            Some(i) => i,
            None => break,
        };

        let subset = determine_subset(focus, contacts, &b, handling, epsilon_v);

        let sub_a = a.submatrix(&subset);
        let sub_b: Vec<f64> = subset
            .iter()
            .map(|&i| {
                if joint[i] {
                    b[i]
                } else {
                    b[i] * (1.0 + contacts[i].elasticity)
                }
            })
            .collect();
        let sub_joint: Vec<bool> = subset.iter().map(|&i| joint[i]).collect();
        let mut sub_j = vec![0.0; subset.len()];

        let status = solver.solve(&sub_a, &sub_b, &sub_joint, time_hint, &mut sub_j);
        if let LcpStatus::WorstResidual(row) = status {
            tracing::warn!(
                row = subset[row],
                time_hint,
                "LCP solver reported non-convergence on subset solve; verifying independently"
            );
        }
        verify_residuals(&sub_a, &sub_b, &sub_joint, &sub_j).map_err(|row| {
            PhysicsError::ResidualOutOfTolerance {
                row: subset[row],
                residual: sub_j[row],
                time_hint,
            }
        })?;

        for (pos, &idx) in subset.iter().enumerate() {
            let increment = sub_j[pos];
            if increment != 0.0 {
                cumulative[idx] += increment;
                for (i, bi) in b.iter_mut().enumerate() {
                    *bi += a.get(i, idx) * increment;
                }
            }
        }

        iterations += 1;
        if panic_limit > 0 && iterations % panic_limit == 0 {
            epsilon_v *= 2.0;
            tracing::debug!(
                iterations,
                epsilon_v,
                "panic relaxation: widening small-velocity tolerance to force progress"
            );
        }
    }

    if handling.has_last_pass() {
        run_last_pass(contacts, &a, &b, &mut cumulative, solver, time_hint)?;
    }

    let mut any_impulse = false;
    for (idx, contact) in contacts.iter_mut().enumerate() {
        let outcome = apply_impulse(bodies, contact, cumulative[idx])?;
        if outcome.impulse > TINY_IMPULSE {
            any_impulse = true;
        }
    }

    Ok(any_impulse)
}

/// Determines which contacts get resolved together this iteration.
///
/// `SerialSeparate` resolves only `focus`. The grouped and hybrid strategies
/// resolve the transitive joint-closure reachable from `focus` through shared
/// bodies; `Hybrid` additionally folds in currently-approaching non-joint
/// contacts that share a body with that closure, so a large contact doesn't
/// have to wait for its own focus turn just because a joint chain is nearby.
fn determine_subset(
    focus: usize,
    contacts: &[Contact],
    b: &[f64],
    handling: CollisionHandling,
    epsilon_v: f64,
) -> Vec<usize> {
    if !handling.is_grouped_or_hybrid() {
        return vec![focus];
    }

    let mut in_subset = vec![false; contacts.len()];
    in_subset[focus] = true;

    loop {
        let mut changed = false;
        for (i, contact) in contacts.iter().enumerate() {
            if in_subset[i] || !contact.joint {
                continue;
            }
            let shares_body = in_subset
                .iter()
                .enumerate()
                .any(|(j, &member)| member && contacts_share_body(&contacts[j], contact));
            if shares_body {
                in_subset[i] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    if handling.is_hybrid() {
        let closure_snapshot = in_subset.clone();
        for (i, contact) in contacts.iter().enumerate() {
            if in_subset[i] || contact.joint || b[i] >= -epsilon_v {
                continue;
            }
            let shares_body = closure_snapshot
                .iter()
                .enumerate()
                .any(|(j, &member)| member && contacts_share_body(&contacts[j], contact));
            if shares_body {
                in_subset[i] = true;
            }
        }
    }

    (0..contacts.len()).filter(|&i| in_subset[i]).collect()
}

fn contacts_share_body(a: &Contact, b: &Contact) -> bool {
    a.references(b.primary_body) || a.references(b.normal_body)
}

/// Final zero-elasticity sweep over every contact (focus = "all"), run once
/// the iterative process finds nothing left approaching.
///
/// Per 4.6 step 3, `focus = -1` leaves `b'` unscaled (equivalent to zero
/// elasticity); `b` is already the raw running relative normal velocity, so
/// this solves directly against it with no restitution factor applied.
fn run_last_pass<S: LcpSolver>(
    contacts: &[Contact],
    a: &InfluenceMatrix,
    b: &[f64],
    cumulative: &mut [f64],
    solver: &mut S,
    time_hint: f64,
) -> PhysicsResult<()> {
    let n = contacts.len();
    let joint: Vec<bool> = contacts.iter().map(|c| c.joint).collect();
    let b0 = b.to_vec();

    let mut j0 = vec![0.0; n];
    let status = solver.solve(a, &b0, &joint, time_hint, &mut j0);
    if let LcpStatus::WorstResidual(row) = status {
        tracing::warn!(row, time_hint, "LCP solver reported non-convergence on last pass; verifying independently");
    }
    verify_residuals(a, &b0, &joint, &j0).map_err(|row| PhysicsError::ResidualOutOfTolerance {
        row,
        residual: j0[row],
        time_hint,
    })?;

    for (c, j) in cumulative.iter_mut().zip(j0.iter()) {
        *c += j;
    }
    Ok(())
}
