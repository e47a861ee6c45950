//! LU decomposition with partial pivoting for dense complex systems.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use thiserror::Error;

/// Errors that can occur during LU factorization
#[derive(Error, Debug)]
pub enum LuError {
    #[error("matrix is singular or nearly singular")]
    SingularMatrix,
    #[error("matrix dimensions mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// LU factorization result
///
/// Stores L and U factors along with pivot information
#[derive(Debug, Clone)]
pub struct LuFactorization {
    /// Combined L and U matrices (L is unit lower triangular, stored below
    /// the diagonal)
    pub lu: Array2<Complex64>,
    /// Pivot indices
    pub pivots: Vec<usize>,
    /// Matrix dimension
    pub n: usize,
}

impl LuFactorization {
    /// Solve Ax = b using the pre-computed LU factorization
    pub fn solve(&self, b: &Array1<Complex64>) -> Result<Array1<Complex64>, LuError> {
        if b.len() != self.n {
            return Err(LuError::DimensionMismatch {
                expected: self.n,
                got: b.len(),
            });
        }

        // pivots[i] holds the original row index that ended up in row i,
        // so applying P is a gather, not a sequence of swaps
        let mut x = Array1::from_shape_fn(self.n, |i| b[self.pivots[i]]);

        // Forward substitution: Ly = Pb
        for i in 0..self.n {
            for j in 0..i {
                let l_ij = self.lu[[i, j]];
                x[i] = x[i] - l_ij * x[j];
            }
        }

        // Backward substitution: Ux = y
        for i in (0..self.n).rev() {
            for j in (i + 1)..self.n {
                let u_ij = self.lu[[i, j]];
                x[i] = x[i] - u_ij * x[j];
            }
            let u_ii = self.lu[[i, i]];
            if u_ii.norm() < 1e-30 {
                return Err(LuError::SingularMatrix);
            }
            x[i] /= u_ii;
        }

        Ok(x)
    }
}

/// Compute LU factorization with partial pivoting
pub fn lu_factorize(a: &Array2<Complex64>) -> Result<LuFactorization, LuError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(LuError::DimensionMismatch {
            expected: n,
            got: a.ncols(),
        });
    }

    let mut lu = a.clone();
    let mut pivots: Vec<usize> = (0..n).collect();

    for k in 0..n {
        // Find pivot
        let mut max_val = lu[[k, k]].norm();
        let mut max_row = k;

        for i in (k + 1)..n {
            let val = lu[[i, k]].norm();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        if max_val < 1e-30 {
            return Err(LuError::SingularMatrix);
        }

        // Swap rows if needed
        if max_row != k {
            for j in 0..n {
                let tmp = lu[[k, j]];
                lu[[k, j]] = lu[[max_row, j]];
                lu[[max_row, j]] = tmp;
            }
            pivots.swap(k, max_row);
        }

        // Compute multipliers and eliminate
        let pivot = lu[[k, k]];
        for i in (k + 1)..n {
            let mult = lu[[i, k]] / pivot;
            lu[[i, k]] = mult;

            for j in (k + 1)..n {
                let update = mult * lu[[k, j]];
                lu[[i, j]] -= update;
            }
        }
    }

    Ok(LuFactorization { lu, pivots, n })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_lu_solve_complex() {
        let a = array![
            [Complex64::new(4.0, 1.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(3.0, -1.0)],
        ];
        let b = array![Complex64::new(1.0, 1.0), Complex64::new(2.0, -1.0)];

        let factorization = lu_factorize(&a).expect("factorization should succeed");
        let x = factorization.solve(&b).expect("solve should succeed");

        let ax = a.dot(&x);
        for i in 0..2 {
            assert_relative_eq!((ax[i] - b[i]).norm(), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lu_singular() {
        let a = array![
            [Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)],
            [Complex64::new(2.0, 0.0), Complex64::new(4.0, 0.0)],
        ];
        assert!(lu_factorize(&a).is_err());
    }

    #[test]
    fn test_lu_factorize_multiple_rhs() {
        let a = array![
            [
                Complex64::new(4.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(0.0, 0.0)
            ],
            [
                Complex64::new(1.0, 0.0),
                Complex64::new(3.0, 0.0),
                Complex64::new(1.0, 0.0)
            ],
            [
                Complex64::new(0.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(2.0, 0.0)
            ],
        ];

        let factorization = lu_factorize(&a).expect("factorization should succeed");
        for b in [
            array![
                Complex64::new(1.0, 0.0),
                Complex64::new(2.0, 1.0),
                Complex64::new(3.0, -1.0)
            ],
            array![
                Complex64::new(4.0, -2.0),
                Complex64::new(5.0, 0.0),
                Complex64::new(6.0, 3.0)
            ],
        ] {
            let x = factorization.solve(&b).expect("solve should succeed");
            let ax = a.dot(&x);
            for i in 0..3 {
                assert_relative_eq!((ax[i] - b[i]).norm(), 0.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_lu_pivoting_required() {
        // Zero leading pivot forces a row swap
        let a = array![
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)],
        ];
        let b = array![Complex64::new(2.0, 0.0), Complex64::new(3.0, 0.0)];
        let factorization = lu_factorize(&a).expect("factorization should succeed");
        let x = factorization.solve(&b).expect("solve should succeed");
        assert_relative_eq!((x[0] - Complex64::new(1.0, 0.0)).norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!((x[1] - Complex64::new(2.0, 0.0)).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lu_cyclic_permutation() {
        // A cyclic permutation matrix forces a swap at every elimination step,
        // so the net row permutation is a 3-cycle. Solving must apply that
        // full cycle to b, not a pairing that cancels.
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let a = array![[zero, zero, one], [one, zero, zero], [zero, one, zero]];
        let b = array![
            Complex64::new(1.0, 0.0),
            Complex64::new(2.0, 0.0),
            Complex64::new(3.0, 0.0)
        ];
        let factorization = lu_factorize(&a).expect("factorization should succeed");
        let x = factorization.solve(&b).expect("solve should succeed");
        let expected = [
            Complex64::new(2.0, 0.0),
            Complex64::new(3.0, 0.0),
            Complex64::new(1.0, 0.0),
        ];
        for i in 0..3 {
            assert_relative_eq!((x[i] - expected[i]).norm(), 0.0, epsilon = 1e-12);
        }
    }
}
