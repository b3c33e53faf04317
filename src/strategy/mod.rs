//! The six collision-handling strategies and their dispatcher.

mod serial;
mod simultaneous;

pub use serial::{resolve_serial, ITERATION_CEILING};
pub use simultaneous::resolve_simultaneous;

use crate::body::Body;
use crate::config::{CollisionHandling, ResolutionConfig};
use crate::contact::Contact;
use crate::error::PhysicsResult;
use crate::lcp::LcpSolver;

/// Dispatches to the strategy named by `config.collision_handling`.
///
/// Returns `true` iff at least one contact ended up with a non-trivial
/// impulse.
pub fn resolve<B: Body, S: LcpSolver>(
    bodies: &mut [B],
    contacts: &mut [Contact],
    config: &ResolutionConfig,
    solver: &mut S,
    time_hint: f64,
) -> PhysicsResult<bool> {
    match config.collision_handling {
        CollisionHandling::Simultaneous => {
            resolve_simultaneous(bodies, contacts, solver, time_hint)
        }
        handling => resolve_serial(bodies, contacts, handling, config, solver, time_hint),
    }
}
