//! AccuScene Impulse Core
//!
//! Impulse-based collision resolution for planar (2D) rigid-body
//! reconstruction: given a list of detected contacts and joints, computes and
//! applies the instantaneous velocity changes that leave no pair of bodies
//! interpenetrating with an approach velocity above a small tolerance, while
//! resolving bilateral joints exactly.
//!
//! # What this crate does not do
//!
//! Contact/geometry detection, time integration of position, and the
//! surrounding simulation loop are all external collaborators. This crate
//! consumes a contact list produced upstream and mutates body velocities;
//! nothing here advances position or re-detects contacts. The sub-algorithm
//! that actually solves the mixed linear complementarity problem ([`lcp`]) is
//! a swappable dependency behind the [`lcp::LcpSolver`] trait — this crate
//! ships one implementation, [`lcp::ProjectedGaussSeidelSolver`].
//!
//! # The math
//!
//! For two contacts `i`, `j` sharing a body `B`, the [`influence::influence`]
//! function gives the change in relative normal velocity at `i` per unit
//! impulse applied at `j` on `B`:
//!
//! ```text
//! factor * [ n_i.x * (n_j.x/m - r_i.y * (r_j x n_j) / I)
//!          + n_i.y * (n_j.y/m + r_i.x * (r_j x n_j) / I) ]
//! ```
//!
//! [`matrix::InfluenceMatrix`] assembles the dense `n x n` matrix `A` of those
//! values; an [`lcp::LcpSolver`] then finds impulses `j >= 0` (sign
//! unconstrained on joint rows) such that `a = A*j + b` satisfies
//! complementarity. [`strategy`] supplies six ways of driving that solve —
//! one coupled system at once, or a sequence of smaller ones — and
//! [`apply::apply_impulse`] is the only place body velocities are mutated.
//!
//! # Example
//!
//! ```
//! use accuscene_impulse_core::body::{MassProperties, PlanarBody};
//! use accuscene_impulse_core::config::ResolutionConfig;
//! use accuscene_impulse_core::contact::Contact;
//! use accuscene_impulse_core::lcp::ProjectedGaussSeidelSolver;
//! use accuscene_impulse_core::{handle_collisions, ResolutionTotals};
//! use nalgebra::Vector2;
//!
//! let mut bodies = vec![
//!     PlanarBody::new(0, MassProperties::disk(1.0, 1.0)),
//!     PlanarBody::new(1, MassProperties::disk(1.0, 1.0)),
//! ];
//! bodies[0].linear_velocity = Vector2::new(1.0, 0.0);
//! bodies[1].linear_velocity = Vector2::new(-1.0, 0.0);
//!
//! let mut contacts = vec![Contact::new(
//!     0, 1,
//!     Vector2::new(1.0, 0.0), Vector2::new(-1.0, 0.0),
//!     Vector2::new(-1.0, 0.0),
//!     -2.0, 1.0, false,
//! )];
//!
//! let config = ResolutionConfig::default();
//! let mut solver = ProjectedGaussSeidelSolver::default();
//! let mut totals = ResolutionTotals::default();
//!
//! let changed = handle_collisions(
//!     &mut bodies, &mut contacts, &config, &mut solver, 0.0, Some(&mut totals),
//! ).unwrap();
//!
//! assert!(changed);
//! assert_eq!(totals.impulses, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod apply;
pub mod body;
pub mod config;
pub mod contact;
pub mod error;
pub mod geometry;
pub mod influence;
pub mod lcp;
pub mod matrix;
pub mod rng;
pub mod strategy;
pub mod validate;

/// Convenient imports for callers driving a resolution loop.
pub mod prelude {
    pub use crate::apply::{apply_impulse, ApplyOutcome, SMALL_IMPULSE, TINY_IMPULSE};
    pub use crate::body::{Body, ElasticBody, MassProperties, PlanarBody};
    pub use crate::config::{CollisionHandling, ResolutionConfig};
    pub use crate::contact::Contact;
    pub use crate::error::{PhysicsError, PhysicsResult};
    pub use crate::lcp::{LcpSolver, LcpStatus, ProjectedGaussSeidelSolver};
    pub use crate::matrix::InfluenceMatrix;
    pub use crate::{handle_collisions, set_elasticity, ResolutionTotals};

    pub use nalgebra::Vector2;
}

use body::{Body, ElasticBody};
use config::ResolutionConfig;
use contact::Contact;
use error::{PhysicsError, PhysicsResult};
use lcp::LcpSolver;

/// Running counter the surrounding simulation loop may thread across many
/// `handle_collisions` calls (section 3: "a caller-supplied totals counter").
///
/// Not touched by the core except to increment [`ResolutionTotals::impulses`]
/// when a call actually applies a non-trivial impulse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionTotals {
    /// Number of `handle_collisions` calls that applied at least one impulse
    /// above [`apply::TINY_IMPULSE`].
    pub impulses: u64,
}

/// Resolves `contacts` against `bodies`: validates the input, dispatches to
/// the strategy named by `config.collision_handling`, and applies the
/// resulting impulses.
///
/// Returns `true` iff at least one contact ended up with a non-trivial
/// impulse; increments `totals.impulses` when it does, if a totals counter
/// is supplied. `time_hint` is forwarded to the LCP solver for diagnostics
/// only; this core attaches no meaning to it beyond that.
///
/// # Errors
///
/// See [`error::PhysicsError`]: an invalid `config`, an invariant violation
/// in the input (an infinite-mass body with non-zero velocity, or a
/// unilateral contact that wants a large negative impulse), an LCP residual
/// outside tolerance, or an exceeded iteration ceiling in a serial strategy.
pub fn handle_collisions<B: Body, S: LcpSolver>(
    bodies: &mut [B],
    contacts: &mut [Contact],
    config: &ResolutionConfig,
    solver: &mut S,
    time_hint: f64,
    totals: Option<&mut ResolutionTotals>,
) -> PhysicsResult<bool> {
    config.validate()?;
    validate::validate(bodies, contacts)?;

    let changed = strategy::resolve(bodies, contacts, config, solver, time_hint)?;

    if changed {
        if let Some(totals) = totals {
            totals.impulses += 1;
        }
    }

    Ok(changed)
}

/// Broadcasts `value` as the elasticity of every body in `bodies`.
///
/// This is the one piece of user-facing parameter plumbing section 1 treats
/// as out of scope for contact *production* but section 6 still names as an
/// interface this core exposes: a per-body elasticity the upstream
/// contact-detection collaborator reads when filling in `Contact::elasticity`
/// for a new contact. See `DESIGN.md` for why this lives on [`ElasticBody`]
/// rather than the core [`Body`] capability set.
///
/// # Errors
///
/// Returns [`PhysicsError::InvalidConfiguration`] if `value` is outside
/// `[0, 1]`, or [`PhysicsError::EmptyWorld`] if `bodies` is empty.
pub fn set_elasticity<B: ElasticBody>(bodies: &mut [B], value: f64) -> PhysicsResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(PhysicsError::InvalidConfiguration {
            parameter: "elasticity".into(),
            value: value.to_string(),
            constraint: "in [0, 1]".into(),
        });
    }
    if bodies.is_empty() {
        return Err(PhysicsError::EmptyWorld(
            "set_elasticity called with no bodies present".into(),
        ));
    }
    for body in bodies.iter_mut() {
        body.set_elasticity(value);
    }
    Ok(())
}

/// Post-resolution invariant check (section 3 / section 8 testable
/// properties): every unilateral contact separates no slower than `-eps_v`,
/// every joint's normal velocity is within `eps_v` of zero.
///
/// Not called by [`handle_collisions`] itself — it recomputes relative
/// normal velocity from scratch, which the resolution loop already tracks
/// incrementally, so forcing it into every call would double that work for
/// no benefit outside tests and diagnostics. Exposed for exactly those two
/// uses.
pub fn verify_postconditions<B: Body>(
    bodies: &[B],
    contacts: &[Contact],
    epsilon_v: f64,
) -> PhysicsResult<()> {
    for (i, contact) in contacts.iter().enumerate() {
        let v_primary = bodies[contact.primary_body].linear_velocity()
            + geometry::angular_cross(
                bodies[contact.primary_body].angular_velocity(),
                contact.r1,
            );
        let v_normal = bodies[contact.normal_body].linear_velocity()
            + geometry::angular_cross(bodies[contact.normal_body].angular_velocity(), contact.r2);
        let relative_normal_velocity = (v_primary - v_normal).dot(&contact.normal);

        if contact.joint {
            if relative_normal_velocity.abs() > epsilon_v {
                return Err(PhysicsError::invariant(format!(
                    "joint {i} relative normal velocity {relative_normal_velocity} exceeds eps_v {epsilon_v}"
                )));
            }
        } else if relative_normal_velocity <= -epsilon_v {
            return Err(PhysicsError::invariant(format!(
                "unilateral contact {i} still approaching: v = {relative_normal_velocity}, eps_v = {epsilon_v}"
            )));
        }
    }
    Ok(())
}
