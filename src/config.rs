//! Runtime-settable tuning parameters for the resolution core (section 6).

use crate::error::{PhysicsError, PhysicsResult};
use serde::{Deserialize, Serialize};

/// Which of the six handling strategies `handle_collisions` dispatches to.
///
/// A closed sum over six strategies, modeled as a tagged enum rather than a
/// string so dispatch is a `match`, not a string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionHandling {
    /// One-shot: assemble the full matrix, solve, apply (4.5).
    Simultaneous,

    /// Serial strategy; subset = joint-closure plus any large non-joint
    /// contacts sharing a body with that closure.
    Hybrid,

    /// Serial strategy; subset = just the focus contact.
    SerialSeparate,

    /// Serial strategy; subset = joint-closure only (non-joint contacts
    /// outside the closure are never grouped in).
    SerialGrouped,

    /// [`CollisionHandling::SerialSeparate`] with a final zero-elasticity
    /// sweep over every contact.
    SerialSeparateLastPass,

    /// [`CollisionHandling::SerialGrouped`] with a final zero-elasticity
    /// sweep over every contact.
    SerialGroupedLastPass,
}

impl CollisionHandling {
    /// Whether this variant uses the iterative serial strategy at all.
    pub fn is_serial(self) -> bool {
        !matches!(self, CollisionHandling::Simultaneous)
    }

    /// Whether the subset-determination step groups in the joint-closure
    /// (grouped and hybrid strategies both do; plain serial-separate does not).
    pub fn is_grouped_or_hybrid(self) -> bool {
        matches!(
            self,
            CollisionHandling::Hybrid
                | CollisionHandling::SerialGrouped
                | CollisionHandling::SerialGroupedLastPass
        )
    }

    /// Whether the subset-determination step also pulls in currently-large
    /// non-joint contacts sharing a body with the joint-closure (hybrid only).
    pub fn is_hybrid(self) -> bool {
        matches!(self, CollisionHandling::Hybrid)
    }

    /// Whether a final zero-elasticity sweep runs once focus selection is exhausted.
    pub fn has_last_pass(self) -> bool {
        matches!(
            self,
            CollisionHandling::SerialSeparateLastPass | CollisionHandling::SerialGroupedLastPass
        )
    }
}

/// Runtime-settable tuning parameters, validated on construction and on
/// every setter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Which strategy `handle_collisions` dispatches to.
    pub collision_handling: CollisionHandling,

    /// Contact-detection distance tolerance (m); owned here for validation
    /// even though consumed by the upstream contact-detection collaborator.
    pub distance_tol: f64,

    /// Contact-detection velocity tolerance (m/s); same ownership rationale
    /// as `distance_tol`.
    pub velocity_tol: f64,

    /// Accuracy/speed trade-off in `(0, 1]`. Scales the effective
    /// small-velocity tolerance used by focus selection and the post-
    /// resolution invariant checks: smaller accuracy widens the tolerance.
    pub collision_accuracy: f64,

    /// Seed for the focus-selection RNG; externally settable for reproducibility.
    pub random_seed: i64,

    /// Base small-velocity tolerance `eps_v` before scaling by `collision_accuracy`.
    pub small_velocity: f64,
}

impl ResolutionConfig {
    /// Effective small-velocity tolerance `eps_v`, after applying the accuracy scale.
    pub fn epsilon_v(&self) -> f64 {
        self.small_velocity / self.collision_accuracy
    }

    /// Validates `distance_tol`, `velocity_tol`, and `collision_accuracy`.
    pub fn validate(&self) -> PhysicsResult<()> {
        if self.distance_tol <= 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                parameter: "distance_tol".into(),
                value: self.distance_tol.to_string(),
                constraint: "> 0".into(),
            });
        }
        if self.velocity_tol <= 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                parameter: "velocity_tol".into(),
                value: self.velocity_tol.to_string(),
                constraint: "> 0".into(),
            });
        }
        if !(self.collision_accuracy > 0.0 && self.collision_accuracy <= 1.0) {
            return Err(PhysicsError::InvalidConfiguration {
                parameter: "collision_accuracy".into(),
                value: self.collision_accuracy.to_string(),
                constraint: "in (0, 1]".into(),
            });
        }
        Ok(())
    }

    /// Sets `collision_handling`.
    pub fn set_collision_handling(&mut self, handling: CollisionHandling) {
        self.collision_handling = handling;
    }

    /// Sets `distance_tol`, validating it is positive.
    pub fn set_distance_tol(&mut self, value: f64) -> PhysicsResult<()> {
        if value <= 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                parameter: "distance_tol".into(),
                value: value.to_string(),
                constraint: "> 0".into(),
            });
        }
        self.distance_tol = value;
        Ok(())
    }

    /// Sets `velocity_tol`, validating it is positive.
    pub fn set_velocity_tol(&mut self, value: f64) -> PhysicsResult<()> {
        if value <= 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                parameter: "velocity_tol".into(),
                value: value.to_string(),
                constraint: "> 0".into(),
            });
        }
        self.velocity_tol = value;
        Ok(())
    }

    /// Sets `collision_accuracy`, validating it is in `(0, 1]`.
    pub fn set_collision_accuracy(&mut self, value: f64) -> PhysicsResult<()> {
        if !(value > 0.0 && value <= 1.0) {
            return Err(PhysicsError::InvalidConfiguration {
                parameter: "collision_accuracy".into(),
                value: value.to_string(),
                constraint: "in (0, 1]".into(),
            });
        }
        self.collision_accuracy = value;
        Ok(())
    }

    /// Sets `random_seed`. Any `i64` is valid.
    pub fn set_random_seed(&mut self, seed: i64) {
        self.random_seed = seed;
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            collision_handling: CollisionHandling::SerialGroupedLastPass,
            distance_tol: 0.01,
            velocity_tol: 0.5,
            collision_accuracy: 0.6,
            random_seed: 0,
            small_velocity: 1e-5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ResolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn collision_accuracy_out_of_range_is_rejected() {
        let mut config = ResolutionConfig::default();
        assert!(config.set_collision_accuracy(0.0).is_err());
        assert!(config.set_collision_accuracy(1.5).is_err());
        assert!(config.set_collision_accuracy(1.0).is_ok());
    }

    #[test]
    fn epsilon_v_widens_as_accuracy_drops() {
        let mut config = ResolutionConfig::default();
        let tight = config.epsilon_v();
        config.set_collision_accuracy(0.1).unwrap();
        let loose = config.epsilon_v();
        assert!(loose > tight);
    }

    #[test]
    fn handling_predicates_partition_as_expected() {
        assert!(!CollisionHandling::Simultaneous.is_serial());
        assert!(CollisionHandling::Hybrid.is_grouped_or_hybrid());
        assert!(CollisionHandling::Hybrid.is_hybrid());
        assert!(!CollisionHandling::SerialGrouped.is_hybrid());
        assert!(CollisionHandling::SerialGroupedLastPass.has_last_pass());
        assert!(!CollisionHandling::SerialGrouped.has_last_pass());
    }
}
