//! Dense system assembly.
//!
//! Collocating the combined boundary integral equation at every element
//! centroid gives, with τ = +1 exterior / -1 interior and the Burton-Miller
//! coupling μ (zero when stabilization is off):
//!
//! ```text
//! (M - τ/2 I + μN) p - (L + μMt + μτ/2 I) q = -τ (p_inc + μ q_inc)
//! ```
//!
//! Half-space problems use the Rayleigh form `p + L_hs q = 0` instead.
//! All N² ordered pairs are integrated explicitly; rows are independent and
//! filled in parallel with per-row accumulation, so the result does not
//! depend on scheduling or element order.
//!
//! [`fold_boundary_conditions`] then eliminates the prescribed half of each
//! (p_j, q_j) column pair, picking the better-conditioned pivot, and yields
//! the square system handed to the direct solver.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use num_traits::Zero;
use rayon::prelude::*;

use crate::core::error::BemError;
use crate::core::incident::IncidentField;
use crate::core::integration::regular::{integrate_pair, UNRESOLVED_RATIO};
use crate::core::integration::singular::integrate_self;
use crate::core::mesh::element::Mesh;
use crate::core::types::{
    BoundaryCondition, Geometry, Orientation, PhysicsParams, SolverConfig, Stabilization,
    SystemMatrices,
};

/// Burton-Miller coupling parameter for this problem, zero when disabled
///
/// Explicitly requested stabilization fails for interior, axisymmetric and
/// half-space problems (no hypersingular self term for rings, nothing to
/// stabilize otherwise); `Auto` silently falls back to the plain BIE there.
pub fn effective_coupling(
    geometry: Geometry,
    orientation: Orientation,
    physics: &PhysicsParams,
    config: &SolverConfig,
) -> Result<Complex64, BemError> {
    let available = orientation == Orientation::Exterior
        && matches!(geometry, Geometry::TwoDim | Geometry::ThreeDim);
    match config.stabilization {
        Stabilization::Off => Ok(Complex64::new(0.0, 0.0)),
        Stabilization::Auto => {
            if available && physics.wave_number.norm() > 0.0 {
                Ok(config.coupling.unwrap_or_else(|| physics.burton_miller_mu()))
            } else {
                Ok(Complex64::new(0.0, 0.0))
            }
        }
        Stabilization::BurtonMiller => {
            if available {
                Ok(config.coupling.unwrap_or_else(|| physics.burton_miller_mu()))
            } else {
                Err(BemError::UnsupportedStabilization(
                    "Burton-Miller coupling requires an exterior 2D or 3D problem".to_string(),
                ))
            }
        }
    }
}

struct AssembledRow {
    b_row: Vec<Complex64>,
    a_row: Vec<Complex64>,
    rhs: Complex64,
    unresolved_pairs: usize,
}

/// Assemble the dense operator matrices and the incident right-hand side
pub fn assemble(
    mesh: &Mesh,
    physics: &PhysicsParams,
    orientation: Orientation,
    incident: Option<&IncidentField>,
    config: &SolverConfig,
) -> Result<SystemMatrices, BemError> {
    let geometry = mesh.geometry;
    let n = mesh.num_elements();
    let k = physics.wave_number;
    let tau = orientation.tau();
    let mu = effective_coupling(geometry, orientation, physics, config)?;

    // Element vertices gathered once; rows only read them
    let all_verts: Vec<Vec<[f64; 3]>> = mesh
        .elements
        .iter()
        .map(|e| mesh.element_vertices(e))
        .collect();

    log::debug!(
        "assembling {}x{} system ({:?}, {:?}, |mu| = {:.3})",
        n,
        n,
        geometry,
        orientation,
        mu.norm()
    );

    let rows: Vec<AssembledRow> = (0..n)
        .into_par_iter()
        .map(|i| {
            let source = &mesh.elements[i];
            let p = source.center;
            let np = source.normal;

            let mut b_row = vec![Complex64::zero(); n];
            let mut a_row = vec![Complex64::zero(); n];
            let mut unresolved_pairs = 0;

            for j in 0..n {
                let field = &mesh.elements[j];
                let ints = if i == j {
                    integrate_self(geometry, k, field, &all_verts[j], config.singular_scheme)
                } else {
                    let (ints, ratio) =
                        integrate_pair(geometry, k, &p, &np, field, &all_verts[j], config);
                    if ratio < UNRESOLVED_RATIO {
                        unresolved_pairs += 1;
                    }
                    ints
                };

                if geometry == Geometry::HalfSpace {
                    // Rayleigh form: p + L_hs q = 0
                    if i == j {
                        b_row[j] = Complex64::new(1.0, 0.0);
                    }
                    a_row[j] = -ints.l;
                } else {
                    b_row[j] = ints.m + mu * ints.n;
                    a_row[j] = ints.l + mu * ints.mt;
                    if i == j {
                        b_row[j] -= 0.5 * tau;
                        a_row[j] += mu * 0.5 * tau;
                    }
                }
            }

            let rhs = match incident {
                Some(field) if geometry != Geometry::HalfSpace => {
                    let p_inc = field.pressure_at(geometry, k, &p);
                    let q_inc = field.flux_at(geometry, k, &p, &np);
                    -(p_inc + mu * q_inc) * tau
                }
                _ => Complex64::zero(),
            };

            AssembledRow {
                b_row,
                a_row,
                rhs,
                unresolved_pairs,
            }
        })
        .collect();

    let mut b_mat = Array2::zeros((n, n));
    let mut a_mat = Array2::zeros((n, n));
    let mut rhs = Array1::zeros(n);
    let mut near_singular_pairs = 0;
    for (i, row) in rows.into_iter().enumerate() {
        for j in 0..n {
            b_mat[[i, j]] = row.b_row[j];
            a_mat[[i, j]] = row.a_row[j];
        }
        rhs[i] = row.rhs;
        near_singular_pairs += row.unresolved_pairs;
    }

    Ok(SystemMatrices {
        b_mat,
        a_mat,
        rhs,
        near_singular_pairs,
    })
}

// ============================================================================
// Boundary condition folding
// ============================================================================

/// Boundary condition lowered to flux form `α p + β' q = f` with
/// `β' = β / (iρω)`, plus the pivot choice
#[derive(Debug, Clone, Copy)]
pub struct LoweredBc {
    pub alpha: Complex64,
    pub beta_flux: Complex64,
    pub f: Complex64,
    /// True when the pressure stays the unknown of this column
    pub solve_for_pressure: bool,
}

/// Lower the user boundary conditions to flux form and pick per-column
/// pivots by coefficient magnitude
pub fn lower_boundary_conditions(
    conditions: &[BoundaryCondition],
    physics: &PhysicsParams,
) -> Result<Vec<LoweredBc>, BemError> {
    let flux_factor = physics.flux_factor();
    conditions
        .iter()
        .map(|bc| {
            let (alpha, beta, f) = bc.coefficients();
            if beta.norm() > 0.0 && flux_factor.norm() == 0.0 {
                return Err(BemError::VelocityWithoutFrequency);
            }
            let beta_flux = if beta.norm() > 0.0 {
                beta / flux_factor
            } else {
                Complex64::new(0.0, 0.0)
            };
            Ok(LoweredBc {
                alpha,
                beta_flux,
                f,
                solve_for_pressure: beta_flux.norm() >= alpha.norm(),
            })
        })
        .collect()
}

/// Eliminate the prescribed half of every (p_j, q_j) pair:
/// returns the square matrix and right-hand side of `M x = rhs` where
/// `x_j` is `p_j` or `q_j` according to the pivot choice
pub fn fold_boundary_conditions(
    system: &SystemMatrices,
    lowered: &[LoweredBc],
) -> (Array2<Complex64>, Array1<Complex64>) {
    let n = lowered.len();
    let mut matrix = Array2::zeros((n, n));
    let mut rhs = system.rhs.clone();

    for j in 0..n {
        let bc = &lowered[j];
        if bc.solve_for_pressure {
            // q_j = (f - α p_j)/β'
            let ratio = bc.alpha / bc.beta_flux;
            let shift = bc.f / bc.beta_flux;
            for i in 0..n {
                matrix[[i, j]] = system.b_mat[[i, j]] + system.a_mat[[i, j]] * ratio;
                rhs[i] += system.a_mat[[i, j]] * shift;
            }
        } else {
            // p_j = (f - β' q_j)/α
            let ratio = bc.beta_flux / bc.alpha;
            let shift = bc.f / bc.alpha;
            for i in 0..n {
                matrix[[i, j]] = -(system.a_mat[[i, j]] + system.b_mat[[i, j]] * ratio);
                rhs[i] -= system.b_mat[[i, j]] * shift;
            }
        }
    }

    (matrix, rhs)
}

/// Recover the full (pressure, flux) boundary vectors from the solved
/// unknowns
pub fn recover_boundary_values(
    lowered: &[LoweredBc],
    x: &Array1<Complex64>,
) -> (Array1<Complex64>, Array1<Complex64>) {
    let n = lowered.len();
    let mut pressures = Array1::zeros(n);
    let mut fluxes = Array1::zeros(n);
    for j in 0..n {
        let bc = &lowered[j];
        if bc.solve_for_pressure {
            pressures[j] = x[j];
            fluxes[j] = (bc.f - bc.alpha * x[j]) / bc.beta_flux;
        } else {
            fluxes[j] = x[j];
            pressures[j] = (bc.f - bc.beta_flux * x[j]) / bc.alpha;
        }
    }
    (pressures, fluxes)
}
