//! Core type definitions for the Helmholtz BEM engine.
//!
//! Geometry and orientation tags, physical parameters, boundary conditions,
//! solver configuration and the result/report structures shared by assembly,
//! solve and post-processing.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

// ============================================================================
// Geometry and Orientation
// ============================================================================

/// Geometry variant of a BEM problem
///
/// The variant decides which element type the mesh carries and which kernel
/// and quadrature path is taken. It is the only dispatch point: no other
/// component branches on the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Geometry {
    /// 2D problem on a closed polygonal curve (line elements, coordinates x/y)
    TwoDim,
    /// 3D problem on a closed triangulated surface
    ThreeDim,
    /// Body of revolution described by a generator curve in the (r, z)
    /// half-plane (ring elements)
    Axisymmetric,
    /// Radiating patches on an infinite rigid baffle at z = 0, domain z > 0
    HalfSpace,
}

impl Geometry {
    /// Number of coordinates per mesh vertex
    pub fn vertex_dim(&self) -> usize {
        match self {
            Geometry::TwoDim | Geometry::Axisymmetric => 2,
            Geometry::ThreeDim | Geometry::HalfSpace => 3,
        }
    }

    /// Number of vertices per element
    pub fn element_nodes(&self) -> usize {
        match self {
            Geometry::TwoDim | Geometry::Axisymmetric => 2,
            Geometry::ThreeDim | Geometry::HalfSpace => 3,
        }
    }
}

/// Which side of the boundary the acoustic domain lies on
///
/// The mesh normal always points away from the enclosed volume, so for
/// exterior problems it points into the domain and for interior problems out
/// of it. Half-space problems are always exterior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Domain is the enclosed volume (cavity problems)
    Interior,
    /// Domain is the unbounded complement (radiation/scattering)
    Exterior,
}

impl Orientation {
    /// Sign constant used in the boundary integral equations:
    /// +1 for exterior, -1 for interior problems
    pub fn tau(&self) -> f64 {
        match self {
            Orientation::Exterior => 1.0,
            Orientation::Interior => -1.0,
        }
    }
}

// ============================================================================
// Physical Parameters
// ============================================================================

/// Physical parameters of the acoustic medium and excitation frequency
///
/// Time convention is `exp(-iωt)`, hence outgoing waves carry `exp(+ikr)`
/// and the boundary flux is `q = ∂p/∂n = iρω v`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Frequency (Hz)
    pub frequency: f64,
    /// Speed of sound in the medium (m/s)
    pub speed_of_sound: f64,
    /// Density of the medium (kg/m³)
    pub density: f64,
    /// Angular frequency ω = 2πf
    pub omega: f64,
    /// Wave number, complex to allow lossy media; k = ω/c for a real medium
    pub wave_number: Complex64,
}

impl PhysicsParams {
    /// Create parameters for a lossless medium, k = ω/c (real).
    ///
    /// A zero frequency yields k = 0, the Laplace (incompressible) limit.
    pub fn new(frequency: f64, speed_of_sound: f64, density: f64) -> Self {
        use std::f64::consts::PI;
        let omega = 2.0 * PI * frequency;
        Self {
            frequency,
            speed_of_sound,
            density,
            omega,
            wave_number: Complex64::new(omega / speed_of_sound, 0.0),
        }
    }

    /// Override the wave number, e.g. to add damping through a positive
    /// imaginary part. Only 3D, axisymmetric and half-space geometries
    /// accept a complex wave number.
    pub fn with_wave_number(mut self, wave_number: Complex64) -> Self {
        self.wave_number = wave_number;
        self
    }

    /// Factor converting normal velocity to normal flux: `q = iρω v`
    pub fn flux_factor(&self) -> Complex64 {
        Complex64::new(0.0, self.density * self.omega)
    }

    /// Default Burton-Miller coupling parameter `μ = i/(k + 1)`
    ///
    /// The +1 keeps the coupling bounded in the low-frequency limit.
    pub fn burton_miller_mu(&self) -> Complex64 {
        Complex64::new(0.0, 1.0) / (self.wave_number + 1.0)
    }
}

// ============================================================================
// Boundary Conditions
// ============================================================================

/// Boundary condition on a single element, `α p + β v = f`
///
/// `v` is the outward normal velocity of the surface (outward meaning along
/// the mesh normal, away from the enclosed volume).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum BoundaryCondition {
    /// Prescribed surface pressure (Dirichlet): `p = value`
    Pressure(Complex64),
    /// Prescribed normal velocity (Neumann): `v = value`
    Velocity(Complex64),
    /// Locally reacting surface (Robin): `v = admittance · p + velocity`
    Impedance {
        admittance: Complex64,
        velocity: Complex64,
    },
}

impl BoundaryCondition {
    /// Lower to the generic coefficient form `(α, β, f)` with `α p + β v = f`
    pub fn coefficients(&self) -> (Complex64, Complex64, Complex64) {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        match *self {
            BoundaryCondition::Pressure(p) => (one, zero, p),
            BoundaryCondition::Velocity(v) => (zero, one, v),
            BoundaryCondition::Impedance {
                admittance,
                velocity,
            } => (-admittance, one, velocity),
        }
    }
}

// ============================================================================
// Solver Configuration
// ============================================================================

/// Quadrature profile for singular self-element integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SingularScheme {
    /// Default Duffy-fan orders, adequate for engineering accuracy
    Standard,
    /// Higher-order Duffy fans for convergence studies
    HighAccuracy,
}

/// Stabilization against fictitious interior eigenfrequencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stabilization {
    /// Plain collocation BIE, no coupling
    Off,
    /// Burton-Miller coupling of the hypersingular equation; only available
    /// for exterior 2D and 3D problems
    BurtonMiller,
    /// Burton-Miller where available, plain BIE otherwise
    Auto,
}

/// Solver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Base Gauss-Legendre order for regular element pairs
    pub quadrature_order: usize,
    /// Distance/element-size ratio below which the escalated near-singular
    /// quadrature path is taken
    pub near_singular_ratio: f64,
    /// Self-element quadrature profile
    pub singular_scheme: SingularScheme,
    /// Fictitious-eigenfrequency stabilization
    pub stabilization: Stabilization,
    /// Override for the Burton-Miller coupling parameter μ
    /// (default `i/(k + 1)`)
    pub coupling: Option<Complex64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            quadrature_order: 4,
            near_singular_ratio: 3.0,
            singular_scheme: SingularScheme::Standard,
            stabilization: Stabilization::Auto,
            coupling: None,
        }
    }
}

// ============================================================================
// Operator Integrals
// ============================================================================

/// The four kernel integrals of one (collocation point, element) pair
///
/// Named after the classical layer operators: L single layer, M double
/// layer, Mt adjoint double layer, N hypersingular. Self-element entries of
/// `n` are finite-part values; self entries of `m`/`mt` vanish on flat
/// elements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OperatorIntegrals {
    /// ∫ G dS
    pub l: Complex64,
    /// ∫ ∂G/∂n_q dS
    pub m: Complex64,
    /// ∫ ∂G/∂n_p dS
    pub mt: Complex64,
    /// ∫ ∂²G/(∂n_p ∂n_q) dS
    pub n: Complex64,
}

// ============================================================================
// Assembled System
// ============================================================================

/// Dense operator matrices of the boundary system
///
/// Rows collocate at element centroids; the jump terms and the Burton-Miller
/// coupling are already folded in:
///
/// ```text
/// b_mat · p - a_mat · q = rhs
/// ```
///
/// with `b_mat = M - τ/2 I + μN`, `a_mat = L + μMt + μτ/2 I` and
/// `rhs_i = -τ (p_inc + μ q_inc)(x_i)`. A pure function of mesh, physics,
/// orientation and configuration.
#[derive(Debug, Clone)]
pub struct SystemMatrices {
    /// Coefficient of the pressure vector
    pub b_mat: Array2<Complex64>,
    /// Coefficient of the flux vector
    pub a_mat: Array2<Complex64>,
    /// Incident-field right-hand side (zero without an incident field)
    pub rhs: Array1<Complex64>,
    /// Pairs that exhausted the near-singular escalation ladder
    pub near_singular_pairs: usize,
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Recoverable accuracy degradation detected during a solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AccuracyWarning {
    /// Reciprocal condition estimate below the soft threshold
    IllConditioned { rcond: f64 },
    /// Relative residual of the solved system above the soft threshold
    LargeResidual { residual: f64 },
    /// Element pairs closer than the escalation ladder can resolve
    NearSingularPairs { count: usize },
}

/// Diagnostics of a completed solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    /// Dimension of the dense system
    pub matrix_size: usize,
    /// Reciprocal condition estimate from the LU diagonal growth ratio
    pub rcond: f64,
    /// Relative residual ‖Mx - rhs‖ / ‖rhs‖
    pub residual: f64,
    /// Accuracy warnings; empty for a clean solve
    pub warnings: Vec<AccuracyWarning>,
}
