//! Direct solution of the folded boundary system.

pub mod lu;

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::core::error::BemError;
use crate::core::types::AccuracyWarning;
use self::lu::lu_factorize;

/// Condition estimates below this are treated as a hard failure
pub const RCOND_FAILURE: f64 = 1e-12;
/// Condition estimates below this only produce a warning
pub const RCOND_WARNING: f64 = 1e-8;
/// Relative residuals above this produce a warning
pub const RESIDUAL_WARNING: f64 = 1e-8;

/// Solution of the dense system with its accuracy diagnostics
#[derive(Debug, Clone)]
pub struct DenseSolution {
    pub x: Array1<Complex64>,
    /// Cheap reciprocal condition estimate, min|U_ii| / max|U_ii|
    pub rcond: f64,
    /// Relative residual ‖Mx - b‖ / ‖b‖ (zero when b is zero)
    pub residual: f64,
    pub warnings: Vec<AccuracyWarning>,
}

/// Factor, solve and check the result.
///
/// The pivot-ratio condition estimate is crude but catches the failure
/// modes that actually occur here: interior resonances and degenerate-scale
/// 2D problems, both of which collapse a pivot by orders of magnitude.
pub fn solve_dense(
    matrix: &Array2<Complex64>,
    rhs: &Array1<Complex64>,
) -> Result<DenseSolution, BemError> {
    let n = matrix.nrows();
    if rhs.len() != n {
        return Err(BemError::DimensionMismatch {
            expected: n,
            got: rhs.len(),
        });
    }

    let factorization = lu_factorize(matrix).map_err(|_| BemError::SingularSystem { rcond: 0.0 })?;

    let mut min_pivot = f64::INFINITY;
    let mut max_pivot = 0.0_f64;
    for i in 0..n {
        let p = factorization.lu[[i, i]].norm();
        min_pivot = min_pivot.min(p);
        max_pivot = max_pivot.max(p);
    }
    let rcond = if max_pivot > 0.0 {
        min_pivot / max_pivot
    } else {
        0.0
    };
    if rcond < RCOND_FAILURE {
        return Err(BemError::SingularSystem { rcond });
    }

    let x = factorization
        .solve(rhs)
        .map_err(|_| BemError::SingularSystem { rcond })?;

    let rhs_norm = norm2(rhs);
    let residual = if rhs_norm > 0.0 {
        let r = matrix.dot(&x) - rhs;
        norm2(&r) / rhs_norm
    } else {
        0.0
    };

    let mut warnings = Vec::new();
    if rcond < RCOND_WARNING {
        log::warn!("system is ill-conditioned (rcond = {:.3e})", rcond);
        warnings.push(AccuracyWarning::IllConditioned { rcond });
    }
    if residual > RESIDUAL_WARNING {
        log::warn!("large relative residual {:.3e}", residual);
        warnings.push(AccuracyWarning::LargeResidual { residual });
    }

    Ok(DenseSolution {
        x,
        rcond,
        residual,
        warnings,
    })
}

fn norm2(v: &Array1<Complex64>) -> f64 {
    v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
}
