//! Problem definition and solve orchestration.
//!
//! [`HelmholtzProblem`] bundles mesh, medium, orientation, per-element
//! boundary conditions and an optional incident field. [`HelmholtzSolver`]
//! validates the problem, assembles the dense system, folds the boundary
//! conditions, solves by LU and returns a [`BemSolution`] holding the full
//! boundary pressure and flux vectors plus the solve diagnostics.

use ndarray::Array1;
use num_complex::Complex64;

use crate::core::assembly::{
    assemble, fold_boundary_conditions, lower_boundary_conditions, recover_boundary_values,
};
use crate::core::error::BemError;
use crate::core::incident::IncidentField;
use crate::core::mesh::element::Mesh;
use crate::core::postprocess::field::{evaluate_at, evaluate_batch, FieldPoint};
use crate::core::solver::solve_dense;
use crate::core::types::{
    AccuracyWarning, BoundaryCondition, Geometry, Orientation, PhysicsParams, SingularScheme,
    SolveReport, SolverConfig, Stabilization,
};

/// A complete boundary value problem
#[derive(Debug, Clone)]
pub struct HelmholtzProblem {
    pub mesh: Mesh,
    pub physics: PhysicsParams,
    pub orientation: Orientation,
    /// One boundary condition per element, in element order
    pub boundary_conditions: Vec<BoundaryCondition>,
    /// Optional scattering excitation (None for pure radiation)
    pub incident: Option<IncidentField>,
}

impl HelmholtzProblem {
    fn validate(&self) -> Result<(), BemError> {
        let geometry = self.mesh.geometry;
        let n = self.mesh.num_elements();
        if self.boundary_conditions.len() != n {
            return Err(BemError::BoundaryConditionMismatch {
                expected: n,
                got: self.boundary_conditions.len(),
            });
        }
        if geometry == Geometry::TwoDim && self.physics.wave_number.im != 0.0 {
            return Err(BemError::UnsupportedWaveNumber {
                geometry,
                reason: "2D kernels are evaluated with real Bessel functions".to_string(),
            });
        }
        if geometry == Geometry::HalfSpace && self.orientation != Orientation::Exterior {
            return Err(BemError::UnsupportedOrientation {
                geometry,
                reason: "half-space problems have no interior domain".to_string(),
            });
        }
        if let Some(incident) = &self.incident {
            incident.validate(geometry)?;
        }
        Ok(())
    }
}

/// Collocation BEM solver
///
/// A thin configuration holder: [`HelmholtzSolver::solve`] is a pure
/// function of the problem and the configuration.
#[derive(Debug, Clone, Default)]
pub struct HelmholtzSolver {
    config: SolverConfig,
}

impl HelmholtzSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn with_quadrature_order(mut self, order: usize) -> Self {
        self.config.quadrature_order = order;
        self
    }

    pub fn with_singular_scheme(mut self, scheme: SingularScheme) -> Self {
        self.config.singular_scheme = scheme;
        self
    }

    pub fn with_stabilization(mut self, stabilization: Stabilization) -> Self {
        self.config.stabilization = stabilization;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve the boundary value problem
    pub fn solve(&self, problem: &HelmholtzProblem) -> Result<BemSolution, BemError> {
        problem.validate()?;

        let lowered = lower_boundary_conditions(&problem.boundary_conditions, &problem.physics)?;
        let system = assemble(
            &problem.mesh,
            &problem.physics,
            problem.orientation,
            problem.incident.as_ref(),
            &self.config,
        )?;
        let (matrix, rhs) = fold_boundary_conditions(&system, &lowered);
        let dense = solve_dense(&matrix, &rhs)?;
        let (pressures, fluxes) = recover_boundary_values(&lowered, &dense.x);

        let mut warnings = dense.warnings;
        if system.near_singular_pairs > 0 {
            log::warn!(
                "{} element pairs exhausted the near-singular escalation ladder",
                system.near_singular_pairs
            );
            warnings.push(AccuracyWarning::NearSingularPairs {
                count: system.near_singular_pairs,
            });
        }
        let report = SolveReport {
            matrix_size: problem.mesh.num_elements(),
            rcond: dense.rcond,
            residual: dense.residual,
            warnings,
        };
        log::info!(
            "solved {}x{} system (rcond = {:.3e}, residual = {:.3e}, {} warnings)",
            report.matrix_size,
            report.matrix_size,
            report.rcond,
            report.residual,
            report.warnings.len()
        );

        Ok(BemSolution {
            mesh: problem.mesh.clone(),
            physics: problem.physics.clone(),
            orientation: problem.orientation,
            incident: problem.incident.clone(),
            config: self.config.clone(),
            pressures,
            fluxes,
            report,
        })
    }
}

/// Solved boundary data plus everything needed for field evaluation
#[derive(Debug, Clone)]
pub struct BemSolution {
    pub mesh: Mesh,
    pub physics: PhysicsParams,
    pub orientation: Orientation,
    pub incident: Option<IncidentField>,
    pub config: SolverConfig,
    /// Surface pressure per element
    pub pressures: Array1<Complex64>,
    /// Surface flux `q = ∂p/∂n` per element
    pub fluxes: Array1<Complex64>,
    pub report: SolveReport,
}

impl BemSolution {
    /// Outward normal velocities `v = q / (iρω)`, None in the static limit
    pub fn velocities(&self) -> Option<Array1<Complex64>> {
        let flux_factor = self.physics.flux_factor();
        if flux_factor.norm() == 0.0 {
            return None;
        }
        Some(self.fluxes.mapv(|q| q / flux_factor))
    }

    /// Pressure at one (padded) point in the acoustic domain
    pub fn evaluate_pressure(&self, position: [f64; 3]) -> FieldPoint {
        evaluate_at(
            &self.mesh,
            &self.physics,
            self.orientation,
            self.incident.as_ref(),
            &self.pressures,
            &self.fluxes,
            &self.config,
            position,
        )
    }

    /// Pressure at a batch of points, evaluated in parallel
    pub fn evaluate_pressure_batch(&self, positions: &[[f64; 3]]) -> Vec<FieldPoint> {
        evaluate_batch(
            &self.mesh,
            &self.physics,
            self.orientation,
            self.incident.as_ref(),
            &self.pressures,
            &self.fluxes,
            &self.config,
            positions,
        )
    }
}
