//! Boundary element method engine for the acoustic Helmholtz equation.
//!
//! Solves time-harmonic acoustic radiation and scattering problems by
//! collocation BEM: Green's function kernels, singular quadrature, dense
//! complex system assembly, direct solve and field extrapolation. Four
//! geometry variants are supported:
//!
//! - 2D problems on closed polygonal curves (line elements)
//! - 3D problems on closed triangulated surfaces
//! - axisymmetric bodies described by a generator curve (ring elements)
//! - half-space radiation from patches on a rigid baffle (Rayleigh integral)
//!
//! The time convention is `exp(-iωt)`, so the free-space kernel carries
//! `exp(+ikr)` and the normal flux is `q = ∂p/∂n = iρω v`.
//!
//! # Example
//!
//! ```no_run
//! use acoustic_bem::core::mesh::generators::sphere_mesh;
//! use acoustic_bem::core::types::{BoundaryCondition, Orientation, PhysicsParams};
//! use acoustic_bem::{HelmholtzProblem, HelmholtzSolver};
//! use num_complex::Complex64;
//!
//! let mesh = sphere_mesh(1.0, 12, 24).unwrap();
//! let n = mesh.num_elements();
//! let problem = HelmholtzProblem {
//!     mesh,
//!     physics: PhysicsParams::new(54.6, 343.0, 1.21),
//!     orientation: Orientation::Exterior,
//!     boundary_conditions: vec![BoundaryCondition::Velocity(Complex64::new(1.0, 0.0)); n],
//!     incident: None,
//! };
//! let solution = HelmholtzSolver::new().solve(&problem).unwrap();
//! let p = solution.evaluate_pressure([2.0, 0.0, 0.0]);
//! println!("pressure at 2m: {}", p.p_total);
//! ```

pub mod analytical;
pub mod core;
pub mod special;

pub use crate::core::bem_solver::{BemSolution, HelmholtzProblem, HelmholtzSolver};
pub use crate::core::error::BemError;
pub use crate::core::incident::IncidentField;
pub use crate::core::mesh::element::Mesh;
pub use crate::core::types::{
    AccuracyWarning, BoundaryCondition, Geometry, Orientation, PhysicsParams, SolveReport,
    SolverConfig,
};
