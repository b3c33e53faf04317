//! The external LCP (linear complementarity problem) solver contract.
//!
//! `ComputeForces`-equivalent: given the influence matrix `A`, the
//! pre-impulse RHS `b`, and which rows are bilateral joints, produce an
//! impulse vector `j` such that `a = A*j + b` satisfies, per row:
//! - non-joint: `j[i] >= 0`, `a[i] >= 0`, `j[i] * a[i] = 0` (complementarity)
//! - joint: `a[i] = 0`, `j[i]` unconstrained in sign
//!
//! This is treated as a swappable sub-algorithm: [`LcpSolver`] is the
//! interface, [`ProjectedGaussSeidelSolver`] is the one implementation this
//! crate ships.

use crate::matrix::InfluenceMatrix;

/// Fixed residual tolerance the core checks solver output against (section 6).
pub const RESIDUAL_TOLERANCE: f64 = 1e-4;

/// Outcome of an LCP solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcpStatus {
    /// Every row's complementarity condition was satisfied to the solver's
    /// own internal tolerance.
    Success,

    /// The solver could not certify convergence; `row` identifies the worst
    /// residual, for diagnostics. The core re-verifies independently before
    /// deciding whether this is actually fatal (see [`verify_residuals`]).
    WorstResidual(usize),
}

/// Contract for a sub-solver that resolves one linear complementarity
/// problem: given `a` (assembled influence matrix), `b` (pre-impulse RHS),
/// and `joint` flags (one per row), write the solved impulses into `j_out`.
pub trait LcpSolver {
    /// Solves the LCP, writing impulses into `j_out` (must be pre-sized to
    /// `a.len()`). `time_hint` is forwarded only for diagnostics.
    fn solve(
        &mut self,
        a: &InfluenceMatrix,
        b: &[f64],
        joint: &[bool],
        time_hint: f64,
        j_out: &mut [f64],
    ) -> LcpStatus;
}

/// Projected Gauss-Seidel LCP solver.
///
/// Iterates row by row, projecting each impulse onto its feasible set after
/// every update (non-joint rows clamp to `j[i] >= 0`; joint rows are left
/// unconstrained). This is the classic PGS method used for contact LCPs in
/// real-time engines; unlike a plain Gauss-Seidel velocity solve, clamping
/// happens every row instead of only between outer passes, which is what
/// lets the same routine serve both unilateral and bilateral rows.
#[derive(Debug, Clone)]
pub struct ProjectedGaussSeidelSolver {
    /// Maximum sweeps over all rows.
    pub max_iterations: usize,

    /// Convergence tolerance on the largest per-row impulse change.
    pub tolerance: f64,
}

impl ProjectedGaussSeidelSolver {
    /// Creates a solver with the given iteration cap and tolerance.
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }
}

impl Default for ProjectedGaussSeidelSolver {
    fn default() -> Self {
        Self::new(50, 1e-10)
    }
}

impl LcpSolver for ProjectedGaussSeidelSolver {
    fn solve(
        &mut self,
        a: &InfluenceMatrix,
        b: &[f64],
        joint: &[bool],
        _time_hint: f64,
        j_out: &mut [f64],
    ) -> LcpStatus {
        let n = a.len();
        if n == 0 {
            return LcpStatus::Success;
        }

        for v in j_out.iter_mut() {
            *v = 0.0;
        }

        for _ in 0..self.max_iterations {
            let mut max_change: f64 = 0.0;

            for i in 0..n {
                let diagonal = a.get(i, i);
                if diagonal.abs() < 1e-12 {
                    continue;
                }

                let mut residual = b[i];
                for k in 0..n {
                    residual += a.get(i, k) * j_out[k];
                }

                let delta = -residual / diagonal;
                let old = j_out[i];
                let mut new_value = old + delta;
                if !joint[i] {
                    new_value = new_value.max(0.0);
                }
                j_out[i] = new_value;
                max_change = max_change.max((new_value - old).abs());
            }

            if max_change < self.tolerance {
                break;
            }
        }

        // Identify the worst residual row for diagnostics; the core performs
        // its own independent tolerance check via `verify_residuals`.
        let mut worst_row = 0;
        let mut worst_residual = 0.0f64;
        for i in 0..n {
            let mut a_i = b[i];
            for k in 0..n {
                a_i += a.get(i, k) * j_out[k];
            }
            if a_i.abs() > worst_residual {
                worst_residual = a_i.abs();
                worst_row = i;
            }
        }

        if worst_residual <= RESIDUAL_TOLERANCE {
            LcpStatus::Success
        } else {
            LcpStatus::WorstResidual(worst_row)
        }
    }
}

/// Computes `a[i] = (A*j + b)[i]` for every row and checks it against the
/// fixed residual tolerance, per the contract in section 4.3: joint rows
/// must have `|a[i]|` within tolerance; non-joint rows must have `|a[i]|`
/// within tolerance whenever `j[i] > 0`.
///
/// Returns the worst offending row on failure.
pub fn verify_residuals(
    a: &InfluenceMatrix,
    b: &[f64],
    joint: &[bool],
    j: &[f64],
) -> Result<(), usize> {
    let n = a.len();
    for i in 0..n {
        let mut a_i = b[i];
        for k in 0..n {
            a_i += a.get(i, k) * j[k];
        }

        let must_check = joint[i] || j[i] > 0.0;
        if must_check && a_i.abs() > RESIDUAL_TOLERANCE {
            return Err(i);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{MassProperties, PlanarBody};
    use crate::contact::Contact;
    use nalgebra::Vector2;

    #[test]
    fn single_unilateral_contact_solves_to_nonnegative_impulse() {
        let bodies = vec![
            PlanarBody::new(0, MassProperties::disk(1.0, 1.0)),
            PlanarBody::new(1, MassProperties::disk(1.0, 1.0)),
        ];
        let contact = Contact::new(
            0,
            1,
            Vector2::new(1.0, 0.0),
            Vector2::new(-1.0, 0.0),
            Vector2::new(1.0, 0.0),
            -2.0,
            1.0,
            false,
        );
        let contacts = vec![contact];
        let a = InfluenceMatrix::assemble(&bodies, &contacts);
        let b = vec![contacts[0].normal_velocity * (1.0 + contacts[0].elasticity)];
        let joint = vec![false];

        let mut solver = ProjectedGaussSeidelSolver::default();
        let mut j = vec![0.0];
        let status = solver.solve(&a, &b, &joint, 0.0, &mut j);

        assert_eq!(status, LcpStatus::Success);
        assert!(j[0] >= 0.0);
        assert!(verify_residuals(&a, &b, &joint, &j).is_ok());
    }

    #[test]
    fn empty_system_solves_trivially() {
        let a = InfluenceMatrix::assemble::<PlanarBody>(&[], &[]);
        let mut solver = ProjectedGaussSeidelSolver::default();
        let mut j: Vec<f64> = vec![];
        let status = solver.solve(&a, &[], &[], 0.0, &mut j);
        assert_eq!(status, LcpStatus::Success);
    }
}
