//! Closed-form reference solutions for validation.
//!
//! All formulas follow the crate's `exp(-iωt)` time convention, so outgoing
//! waves carry `exp(+ikr)` and the specific impedance of a plane wave is
//! `+ρc`.

use num_complex::Complex64;

use crate::core::types::PhysicsParams;
use crate::special::{bessel_j, hankel1_0, hankel1_1};

/// Pressure of a uniformly pulsating sphere of radius `a` with surface
/// normal velocity `v0`, at distance `r ≥ a` from the center:
///
/// ```text
/// p(r) = ρc v0 · (ika / (ika - 1)) · (a/r) · exp(ik(r - a))
/// ```
pub fn pulsating_sphere_pressure(
    a: f64,
    r: f64,
    physics: &PhysicsParams,
    v0: Complex64,
) -> Complex64 {
    let k = physics.wave_number;
    let rho_c = physics.density * physics.speed_of_sound;
    let ika = Complex64::new(0.0, 1.0) * k * a;
    let phase = (Complex64::new(0.0, 1.0) * k * (r - a)).exp();
    rho_c * v0 * (ika / (ika - 1.0)) * (a / r) * phase
}

/// Pressure of an infinite pulsating cylinder of radius `a` with surface
/// normal velocity `v0`, at distance `r ≥ a` from the axis:
///
/// ```text
/// p(r) = -iρc v0 · H0(kr) / H1(ka)
/// ```
pub fn radiating_cylinder_pressure(
    a: f64,
    r: f64,
    physics: &PhysicsParams,
    v0: Complex64,
) -> Complex64 {
    let k = physics.wave_number.re;
    let rho_c = physics.density * physics.speed_of_sound;
    -Complex64::new(0.0, 1.0) * rho_c * v0 * hankel1_0(k * r) / hankel1_1(k * a)
}

/// On-axis pressure of a rigid circular piston of radius `a` in an infinite
/// baffle, vibrating with normal velocity `v0`, at height `z ≥ 0`:
///
/// ```text
/// p(z) = ρc v0 · (exp(ikz) - exp(ik√(z² + a²)))
/// ```
pub fn piston_on_axis_pressure(
    a: f64,
    z: f64,
    physics: &PhysicsParams,
    v0: Complex64,
) -> Complex64 {
    let k = physics.wave_number;
    let rho_c = physics.density * physics.speed_of_sound;
    let i = Complex64::new(0.0, 1.0);
    let edge = (z * z + a * a).sqrt();
    rho_c * v0 * ((i * k * z).exp() - (i * k * edge).exp())
}

/// Boundary flux `q = ∂p/∂n` of the interior Dirichlet problem on a circle
/// of radius `a` with uniform boundary pressure:
///
/// the cavity solution is `p(r) = p̄ J0(kr)/J0(ka)`, hence
/// `q(a) = -p̄ k J1(ka)/J0(ka)`.
///
/// Diverges at the cavity eigenfrequencies `J0(ka) = 0`.
pub fn interior_circle_dirichlet_flux(a: f64, k: f64, pressure: Complex64) -> Complex64 {
    pressure * (-k * bessel_j(1, k * a) / bessel_j(0, k * a))
}
