//! Error taxonomy for the BEM engine.
//!
//! Fatal conditions are reported through [`BemError`]. Recoverable accuracy
//! degradation (ill conditioning, large residuals, unresolved near-singular
//! pairs) is reported as warnings inside the solve report instead, see
//! [`crate::core::types::AccuracyWarning`].

use crate::core::types::Geometry;
use thiserror::Error;

/// Errors that can occur while building or solving a BEM problem
#[derive(Error, Debug)]
pub enum BemError {
    /// Element with (numerically) zero length or area, or collapsed onto the
    /// symmetry axis for axisymmetric meshes
    #[error("degenerate element {index}: {reason}")]
    DegenerateElement { index: usize, reason: String },

    /// Connectivity entry referencing a vertex that does not exist
    #[error("element {index} references vertex {vertex}, mesh has {num_vertices}")]
    InvalidConnectivity {
        index: usize,
        vertex: usize,
        num_vertices: usize,
    },

    /// One boundary condition per element is required
    #[error("boundary condition count {got} does not match element count {expected}")]
    BoundaryConditionMismatch { expected: usize, got: usize },

    /// Wavenumber outside the supported domain for this geometry
    #[error("unsupported wave number for {geometry:?} geometry: {reason}")]
    UnsupportedWaveNumber { geometry: Geometry, reason: String },

    /// Half-space elements must lie on the z=0 baffle with +z normal
    #[error("element {index} does not lie on the z=0 baffle plane")]
    OffBafflePlane { index: usize },

    /// Velocity data cannot be lowered to flux form at zero frequency
    /// (the conversion factor iρω vanishes)
    #[error("velocity boundary conditions require a nonzero frequency")]
    VelocityWithoutFrequency,

    /// Orientation incompatible with the geometry variant
    #[error("unsupported orientation for {geometry:?} geometry: {reason}")]
    UnsupportedOrientation { geometry: Geometry, reason: String },

    /// Requested stabilization is not available for this problem
    #[error("stabilization not available: {0}")]
    UnsupportedStabilization(String),

    /// Incident field incompatible with the geometry variant
    #[error("unsupported incident field: {0}")]
    UnsupportedIncident(String),

    /// System matrix factorization broke down or the reciprocal condition
    /// estimate fell below the hard floor
    #[error("system matrix is singular or nearly singular (rcond = {rcond:.3e})")]
    SingularSystem { rcond: f64 },

    /// Internal dimension mismatch between matrix and vector sizes
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
