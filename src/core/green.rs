//! Pointwise Green's function kernels for the Helmholtz operator.
//!
//! For a collocation point `p` (normal `n_p`) and a surface point `q`
//! (normal `n_q`) a [`KernelSample`] carries the four layer-operator kernels
//! in one pass:
//!
//! ```text
//! g  = G(p, q)               h  = ∂G/∂n_q
//! ht = ∂G/∂n_p               e  = ∂²G/(∂n_p ∂n_q)
//! ```
//!
//! With `u = r̂·n_q`, `v = -r̂·n_p` and `r̂ = (q - p)/r` all four follow from
//! the radial derivatives of G:
//!
//! ```text
//! h  = G'(r) u
//! ht = G'(r) v
//! e  = G''(r) u v - G'(r) (n_p·n_q + u v) / r
//! ```
//!
//! 3D uses `G = exp(ikr)/(4πr)` (complex k allowed, positive imaginary part
//! for lossy media). 2D uses `G = (i/4) H0^(1)(kr)` with real k, falling back
//! to the Laplace kernel `-ln(r)/(2π)` at k = 0. The axisymmetric variant
//! reuses the 3D kernels on reconstructed ring points; the half-space variant
//! adds the mirror image, which for on-baffle points doubles the direct term.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::core::mesh::element::dot;
use crate::special::{hankel1_0, hankel1_1};

/// The four kernels of one point pair
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelSample {
    /// G
    pub g: Complex64,
    /// ∂G/∂n_q
    pub h: Complex64,
    /// ∂G/∂n_p
    pub ht: Complex64,
    /// ∂²G/(∂n_p ∂n_q)
    pub e: Complex64,
}

fn combine(
    g: Complex64,
    gp: Complex64,
    gpp: Complex64,
    u: f64,
    v: f64,
    np_dot_nq: f64,
    r: f64,
) -> KernelSample {
    KernelSample {
        g,
        h: gp * u,
        ht: gp * v,
        e: gpp * u * v - gp * (np_dot_nq + u * v) / r,
    }
}

/// Geometry factors of a point pair: distance and projected directions
fn pair_geometry(
    p: &[f64; 3],
    np: &[f64; 3],
    q: &[f64; 3],
    nq: &[f64; 3],
) -> (f64, f64, f64, f64) {
    let diff = [q[0] - p[0], q[1] - p[1], q[2] - p[2]];
    let r = dot(&diff, &diff).sqrt();
    let rhat = [diff[0] / r, diff[1] / r, diff[2] / r];
    let u = dot(&rhat, nq);
    let v = -dot(&rhat, np);
    (r, u, v, dot(np, nq))
}

/// Free-space 3D kernels, `G = exp(ikr)/(4πr)`
///
/// `k = 0` degenerates to the Laplace kernel `1/(4πr)` without a special
/// branch.
pub fn kernels_3d(
    k: Complex64,
    p: &[f64; 3],
    np: &[f64; 3],
    q: &[f64; 3],
    nq: &[f64; 3],
) -> KernelSample {
    let (r, u, v, nn) = pair_geometry(p, np, q, nq);
    let ik = Complex64::new(0.0, 1.0) * k;
    let g = (ik * r).exp() / (4.0 * PI * r);
    let ik_m = ik - 1.0 / r;
    let gp = g * ik_m;
    let gpp = g * (ik_m * ik_m + 1.0 / (r * r));
    combine(g, gp, gpp, u, v, nn, r)
}

/// Free-space 2D kernels, `G = (i/4) H0^(1)(kr)`; the z components of the
/// padded coordinates must be zero
pub fn kernels_2d(k: f64, p: &[f64; 3], np: &[f64; 3], q: &[f64; 3], nq: &[f64; 3]) -> KernelSample {
    let (r, u, v, nn) = pair_geometry(p, np, q, nq);
    if k == 0.0 {
        let g = Complex64::new(-r.ln() / (2.0 * PI), 0.0);
        let gp = Complex64::new(-1.0 / (2.0 * PI * r), 0.0);
        let gpp = Complex64::new(1.0 / (2.0 * PI * r * r), 0.0);
        return combine(g, gp, gpp, u, v, nn, r);
    }
    let quarter_i = Complex64::new(0.0, 0.25);
    let h0 = hankel1_0(k * r);
    let h1 = hankel1_1(k * r);
    let g = quarter_i * h0;
    let gp = -quarter_i * k * h1;
    // d/dx H1 = H0 - H1/x
    let gpp = -quarter_i * k * k * (h0 - h1 / (k * r));
    combine(g, gp, gpp, u, v, nn, r)
}

/// Half-space 3D kernels with a rigid baffle at z = 0: free-space term plus
/// the mirror image across the plane
pub fn kernels_half_space(
    k: Complex64,
    p: &[f64; 3],
    np: &[f64; 3],
    q: &[f64; 3],
    nq: &[f64; 3],
) -> KernelSample {
    let direct = kernels_3d(k, p, np, q, nq);
    let q_image = [q[0], q[1], -q[2]];
    let nq_image = [nq[0], nq[1], -nq[2]];
    let image = kernels_3d(k, p, np, &q_image, &nq_image);
    KernelSample {
        g: direct.g + image.g,
        h: direct.h + image.h,
        ht: direct.ht + image.ht,
        e: direct.e + image.e,
    }
}
