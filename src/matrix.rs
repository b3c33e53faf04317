//! Dense influence matrix assembly.

use crate::body::Body;
use crate::contact::Contact;
use crate::influence::influence;

/// Dense, row-major `n x n` influence matrix.
///
/// `A[i][k]` is the change in relative normal velocity at contact `i` per
/// unit impulse at contact `k`. The matrix is mathematically symmetric; we
/// compute only the upper triangle and mirror it, halving the number of
/// `influence` evaluations.
#[derive(Debug, Clone)]
pub struct InfluenceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl InfluenceMatrix {
    /// Builds the influence matrix for the full contact list.
    ///
    /// `A[i][k] = influence(ci, ck, ci.primary_body) - influence(ci, ck, ci.normal_body)`.
    pub fn assemble<B: Body>(bodies: &[B], contacts: &[Contact]) -> Self {
        let n = contacts.len();
        let mut data = vec![0.0; n * n];

        for i in 0..n {
            let primary_i = contacts[i].primary_body;
            let normal_i = contacts[i].normal_body;

            for k in i..n {
                let value = influence(bodies, contacts, i, k, primary_i)
                    - influence(bodies, contacts, i, k, normal_i);
                data[i * n + k] = value;
                data[k * n + i] = value;
            }
        }

        Self { n, data }
    }

    /// Number of rows/columns.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True when the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Reads `A[i][k]`.
    pub fn get(&self, i: usize, k: usize) -> f64 {
        self.data[i * self.n + k]
    }

    /// Extracts the principal submatrix indexed by `indices`, reusing the
    /// already-assembled full matrix rather than re-running `influence`.
    ///
    /// Used by the serial strategy's subset solve (4.6 step 3): the subset
    /// of contacts resolved together this iteration never needs a fresh
    /// assembly, only a gather of the rows/columns already computed.
    pub fn submatrix(&self, indices: &[usize]) -> InfluenceMatrix {
        let m = indices.len();
        let mut data = vec![0.0; m * m];
        for (row, &i) in indices.iter().enumerate() {
            for (col, &k) in indices.iter().enumerate() {
                data[row * m + col] = self.get(i, k);
            }
        }
        InfluenceMatrix { n: m, data }
    }

    /// Maximum absolute asymmetry `|A[i][j] - A[j][i]|` relative to the
    /// entries' magnitude; used by tests and the optional consistency check.
    pub fn asymmetry(&self) -> f64 {
        let mut worst: f64 = 0.0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let a = self.get(i, j);
                let b = self.get(j, i);
                let scale = a.abs().max(b.abs()).max(1.0);
                worst = worst.max((a - b).abs() / scale);
            }
        }
        worst
    }
}
