//! Singular self-element integration.
//!
//! Collocation sits at the element centroid, so the self entries of the four
//! layer operators need dedicated treatment:
//!
//! - 2D line elements: the single layer splits into the closed-form static
//!   log integral plus Gauss quadrature of the smooth log-subtracted
//!   Helmholtz remainder. The hypersingular finite part reduces to endpoint
//!   Hankel terms plus `k²` times the single layer. Double layer and adjoint
//!   vanish identically on a straight element.
//! - 3D triangles: a polar (Duffy) fan about the centroid, whose radial
//!   Jacobian cancels the `1/r` of the single layer. The hypersingular
//!   finite part is the static edge-fan closed form plus the Duffy integral
//!   of the regular Helmholtz remainder.
//! - Ring elements: a Duffy fan on the (generator, azimuth) parameter
//!   rectangle; single, double and adjoint layers are integrable there. The
//!   hypersingular self entry is not provided, which is why Burton-Miller
//!   stabilization is rejected for axisymmetric problems.
//! - Half-space triangles: the mirror image coincides with the element, so
//!   the self single layer is twice the free-space value.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::core::integration::gauss::gauss_legendre;
use crate::core::mesh::element::{distance, dot, sub, Element};
use crate::core::types::{Geometry, OperatorIntegrals, SingularScheme};
use crate::special::{hankel1_0, hankel1_1};

/// Self-element integrals for any geometry variant
pub fn integrate_self(
    geometry: Geometry,
    k: Complex64,
    element: &Element,
    verts: &[[f64; 3]],
    scheme: SingularScheme,
) -> OperatorIntegrals {
    match geometry {
        Geometry::TwoDim => self_line(k.re, &element.center, verts),
        Geometry::ThreeDim => self_triangle(k, &element.center, verts, scheme),
        Geometry::HalfSpace => {
            let free = self_triangle(k, &element.center, verts, scheme);
            OperatorIntegrals {
                l: 2.0 * free.l,
                ..OperatorIntegrals::default()
            }
        }
        Geometry::Axisymmetric => self_ring(k, element, verts, scheme),
    }
}

// ============================================================================
// 2D line elements
// ============================================================================

/// Single layer over one arm [0, c] of the element: closed-form static log
/// part plus Gauss quadrature of the smooth remainder `(i/4)H0(kρ) + ln ρ/(2π)`
fn line_arm_single_layer(k: f64, c: f64) -> Complex64 {
    let log_part = Complex64::new((c - c * c.ln()) / (2.0 * PI), 0.0);
    if k == 0.0 {
        return log_part;
    }
    let quarter_i = Complex64::new(0.0, 0.25);
    let mut remainder = Complex64::new(0.0, 0.0);
    for &(x, w) in gauss_legendre(16) {
        let rho = 0.5 * c * (1.0 + x);
        let value = quarter_i * hankel1_0(k * rho) + rho.ln() / (2.0 * PI);
        remainder += value * (w * 0.5 * c);
    }
    log_part + remainder
}

fn self_line(k: f64, center: &[f64; 3], verts: &[[f64; 3]]) -> OperatorIntegrals {
    let ra = distance(center, &verts[0]);
    let rb = distance(center, &verts[1]);

    let l = line_arm_single_layer(k, ra) + line_arm_single_layer(k, rb);

    // Hypersingular finite part: the 1/ρ² divergence integrates to endpoint
    // Hankel terms, the rest is k² times the single layer. Static limit:
    // -(1/2π)(1/ra + 1/rb).
    let n = if k == 0.0 {
        Complex64::new(-(1.0 / ra + 1.0 / rb) / (2.0 * PI), 0.0)
    } else {
        let quarter_ik = Complex64::new(0.0, 0.25 * k);
        k * k * l - quarter_ik * (hankel1_1(k * ra) + hankel1_1(k * rb))
    };

    OperatorIntegrals {
        l,
        m: Complex64::new(0.0, 0.0),
        mt: Complex64::new(0.0, 0.0),
        n,
    }
}

// ============================================================================
// 3D triangles
// ============================================================================

/// `φ(x) = (e^{ix}(1 - ix) - 1)/x²`, the regular part of the hypersingular
/// Helmholtz remainder; series expansion near zero to avoid cancellation
fn hypersingular_phi(x: Complex64) -> Complex64 {
    if x.norm() < 1e-3 {
        let half = Complex64::new(0.5, 0.0);
        half + x * Complex64::new(0.0, 1.0 / 3.0) - x * x * 0.125
            - x * x * x * Complex64::new(0.0, 1.0 / 30.0)
    } else {
        let ix = Complex64::new(0.0, 1.0) * x;
        (ix.exp() * (1.0 - ix) - 1.0) / (x * x)
    }
}

/// Static hypersingular finite part over a flat polygon seen from an
/// interior point: `-(1/4π) ∮ dθ / R(θ)`, evaluated edge by edge
fn static_hypersingular_fan(center: &[f64; 3], verts: &[[f64; 3]]) -> f64 {
    let mut total = 0.0;
    let count = verts.len();
    for i in 0..count {
        let v1 = verts[i];
        let v2 = verts[(i + 1) % count];
        let edge = sub(&v2, &v1);
        let edge_len = distance(&v1, &v2);
        let that = [edge[0] / edge_len, edge[1] / edge_len, edge[2] / edge_len];
        let to_v1 = sub(&v1, center);
        let along = dot(&to_v1, &that);
        let foot = [
            v1[0] - along * that[0],
            v1[1] - along * that[1],
            v1[2] - along * that[2],
        ];
        let h = distance(center, &foot);
        let s1 = along;
        let s2 = along + edge_len;
        let sin1 = s1 / (s1 * s1 + h * h).sqrt();
        let sin2 = s2 / (s2 * s2 + h * h).sqrt();
        total -= (sin2 - sin1) / (h * 4.0 * PI);
    }
    total
}

/// Duffy orders per scheme
fn duffy_order(scheme: SingularScheme) -> usize {
    match scheme {
        SingularScheme::Standard => 8,
        SingularScheme::HighAccuracy => 16,
    }
}

fn self_triangle(
    k: Complex64,
    center: &[f64; 3],
    verts: &[[f64; 3]],
    scheme: SingularScheme,
) -> OperatorIntegrals {
    let order = duffy_order(scheme);
    let rule = gauss_legendre(order);
    let ik = Complex64::new(0.0, 1.0) * k;
    let k2 = k * k;

    let mut l = Complex64::new(0.0, 0.0);
    let mut n_rem = Complex64::new(0.0, 0.0);

    // Fan of three subtriangles (centroid, v_i, v_{i+1}); inside each, the
    // polar map x = c + s (e(t) - c) has surface element 2A s ds dt, which
    // cancels the 1/ρ of the single layer and reduces the remainder kernel
    // to the bounded φ.
    for i in 0..3 {
        let v1 = verts[i];
        let v2 = verts[(i + 1) % 3];
        let e1 = sub(&v1, center);
        let e2 = sub(&v2, center);
        let cr = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        let area = 0.5 * dot(&cr, &cr).sqrt();
        let factor = area / (2.0 * PI);

        for &(xt, wt) in rule {
            let t = 0.5 * (1.0 + xt);
            // Distance from the centroid to the edge point e(t)
            let et = [
                v1[0] + t * (v2[0] - v1[0]) - center[0],
                v1[1] + t * (v2[1] - v1[1]) - center[1],
                v1[2] + t * (v2[2] - v1[2]) - center[2],
            ];
            let d = dot(&et, &et).sqrt();
            for &(xs, ws) in rule {
                let s = 0.5 * (1.0 + xs);
                let w = factor * (0.5 * wt) * (0.5 * ws);
                l += (ik * (s * d)).exp() / d * w;
                n_rem += k2 * hypersingular_phi(k * (s * d)) / d * w;
            }
        }
    }

    let n = Complex64::new(static_hypersingular_fan(center, verts), 0.0) + n_rem;

    OperatorIntegrals {
        l,
        m: Complex64::new(0.0, 0.0),
        mt: Complex64::new(0.0, 0.0),
        n,
    }
}

// ============================================================================
// Ring elements (axisymmetric)
// ============================================================================

/// Duffy fan over the (generator, azimuth) parameter rectangle of a ring
/// element, singular at the collocation parameters (1/2, 0)
fn self_ring(
    k: Complex64,
    element: &Element,
    verts: &[[f64; 3]],
    scheme: SingularScheme,
) -> OperatorIntegrals {
    use crate::core::green::kernels_3d;

    let (a, b) = (verts[0], verts[1]);
    let length = distance(&a, &b);
    let (nr, nz) = (element.normal[0], element.normal[1]);
    let p3 = [element.center[0], 0.0, element.center[1]];
    let np3 = [nr, 0.0, nz];

    let order = duffy_order(scheme);
    // The azimuth leg spans up to π; raise its order once the ring
    // circumference holds several wavelengths
    let max_r = a[0].max(b[0]);
    let beta_order = if k.norm() * max_r > 4.0 { 16 } else { order };
    let alpha_rule = gauss_legendre(order);
    let beta_rule = gauss_legendre(beta_order);

    // Fan of four parameter triangles from (1/2, 0) to the rectangle corners
    let p0 = (0.5, 0.0);
    let corners = [(0.0, -PI), (1.0, -PI), (1.0, PI), (0.0, PI)];

    let mut result = OperatorIntegrals::default();
    for i in 0..4 {
        let c1 = corners[i];
        let c2 = corners[(i + 1) % 4];
        let d1 = (c1.0 - p0.0, c1.1 - p0.1);
        let d2 = (c2.0 - p0.0, c2.1 - p0.1);
        let twice_area = (d1.0 * d2.1 - d1.1 * d2.0).abs();

        for &(xb, wb) in beta_rule {
            let beta = 0.5 * (1.0 + xb);
            let edge = (
                c1.0 + beta * (c2.0 - c1.0),
                c1.1 + beta * (c2.1 - c1.1),
            );
            for &(xa, wa) in alpha_rule {
                let alpha = 0.5 * (1.0 + xa);
                let t = p0.0 + alpha * (edge.0 - p0.0);
                let theta = p0.1 + alpha * (edge.1 - p0.1);

                let rq = a[0] + t * (b[0] - a[0]);
                let zq = a[1] + t * (b[1] - a[1]);
                let (sin_t, cos_t) = theta.sin_cos();
                let q3 = [rq * cos_t, rq * sin_t, zq];
                let nq3 = [nr * cos_t, nr * sin_t, nz];

                let sample = kernels_3d(k, &p3, &np3, &q3, &nq3);
                let param_jac = alpha * twice_area * (0.5 * wa) * (0.5 * wb);
                let weight = param_jac * length * rq;
                result.l += sample.g * weight;
                result.m += sample.h * weight;
                result.mt += sample.ht * weight;
                // Hypersingular self entry intentionally left at zero
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use crate::core::mesh::element::Mesh;
    use crate::core::types::Geometry;

    #[test]
    fn test_line_static_single_layer_closed_form() {
        // Element of length 2 centered at the collocation point:
        // ∫ -ln ρ /(2π) = 2 (1 - ln 1)/(2π) = 1/π
        let center = [0.0, 0.0, 0.0];
        let verts = [[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let result = self_line(0.0, &center, &verts);
        assert_abs_diff_eq!(result.l.re, 1.0 / PI, epsilon = 1e-12);
        assert_abs_diff_eq!(result.n.re, -1.0 / PI, epsilon = 1e-12);
        assert_eq!(result.m, Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_line_helmholtz_single_layer_against_composite_quadrature() {
        // Reference: static closed form on [0, δ] plus composite Gauss of
        // the full Hankel kernel on [δ, c]
        let k: f64 = 1.7;
        let c = 0.35;
        let delta: f64 = 1e-4;
        let mut reference = Complex64::new(
            (delta - delta * delta.ln()) / (2.0 * PI),
            0.25 * delta, // (i/4) H0 ≈ i/4 - (ln(kρ/2)+γ)/(2π); log part folded below
        );
        // Correct the crude [0, δ] Helmholtz remainder with its limit value
        let gamma = 0.577_215_664_901_532_9;
        reference.re -= delta * ((k / 2.0).ln() + gamma) / (2.0 * PI);
        let panels = 200;
        let width = (c - delta) / panels as f64;
        for i in 0..panels {
            let left = delta + i as f64 * width;
            for &(x, w) in gauss_legendre(8) {
                let rho = left + 0.5 * (1.0 + x) * width;
                reference += Complex64::new(0.0, 0.25) * hankel1_0(k * rho) * (w * 0.5 * width);
            }
        }

        // Element with two arms of length c around the collocation point
        let center = [0.0, 0.0, 0.0];
        let verts = [[-c, 0.0, 0.0], [c, 0.0, 0.0]];
        let result = self_line(k, &center, &verts);
        assert_abs_diff_eq!((result.l - 2.0 * reference).norm(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_triangle_static_single_layer_matches_edge_fan_closed_form() {
        // ∫ 1/(4πρ) dS from an interior point has the closed form
        // (1/4π) Σ_edges h asinh(s/h) |_{s1}^{s2}
        let verts = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.2, 0.8, 0.0]];
        let center = [0.4, 8.0 / 30.0, 0.0];
        let mut exact = 0.0;
        for i in 0..3 {
            let v1 = verts[i];
            let v2 = verts[(i + 1) % 3];
            let edge_len = distance(&v1, &v2);
            let that = [
                (v2[0] - v1[0]) / edge_len,
                (v2[1] - v1[1]) / edge_len,
                (v2[2] - v1[2]) / edge_len,
            ];
            let to_v1 = sub(&v1, &center);
            let along = dot(&to_v1, &that);
            let foot = [
                v1[0] - along * that[0],
                v1[1] - along * that[1],
                v1[2] - along * that[2],
            ];
            let h = distance(&center, &foot);
            let (s1, s2) = (along, along + edge_len);
            exact += h * ((s2 / h).asinh() - (s1 / h).asinh()) / (4.0 * PI);
        }

        let result = self_triangle(
            Complex64::new(0.0, 0.0),
            &center,
            &verts,
            SingularScheme::HighAccuracy,
        );
        assert_abs_diff_eq!(result.l.re, exact, epsilon = 1e-7);
        assert_abs_diff_eq!(result.l.im, 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_triangle_hypersingular_static_limit() {
        let verts = [[0.0, 0.0, 0.0], [0.5, 0.0, 0.0], [0.0, 0.5, 0.0]];
        let center = [1.0 / 6.0, 1.0 / 6.0, 0.0];
        let static_n = self_triangle(
            Complex64::new(0.0, 0.0),
            &center,
            &verts,
            SingularScheme::Standard,
        );
        let small_k = self_triangle(
            Complex64::new(1e-4, 0.0),
            &center,
            &verts,
            SingularScheme::Standard,
        );
        assert!(static_n.n.re < 0.0);
        assert_abs_diff_eq!((small_k.n - static_n.n).norm(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_hypersingular_phi_series_matches_direct() {
        let x = Complex64::new(2e-3, 0.0);
        let ix = Complex64::new(0.0, 1.0) * x;
        let direct = (ix.exp() * (1.0 - ix) - 1.0) / (x * x);
        assert_abs_diff_eq!((hypersingular_phi(x) - direct).norm(), 0.0, epsilon = 1e-9);
        // Limit value 1/2
        assert_abs_diff_eq!(
            hypersingular_phi(Complex64::new(1e-8, 0.0)).re,
            0.5,
            epsilon = 1e-7
        );
    }

    #[test]
    fn test_ring_self_is_finite_and_dominated_by_single_layer() {
        let vertices = array![[0.98, 0.2], [0.98, -0.2]];
        let mesh = Mesh::new(Geometry::Axisymmetric, vertices, vec![vec![0, 1]]).unwrap();
        let verts = mesh.element_vertices(&mesh.elements[0]);
        let result = self_ring(
            Complex64::new(1.0, 0.0),
            &mesh.elements[0],
            &verts,
            SingularScheme::Standard,
        );
        assert!(result.l.norm().is_finite());
        assert!(result.l.re > 0.0);
        assert!(result.m.norm() < result.l.norm());
        assert_eq!(result.n, Complex64::new(0.0, 0.0));
    }
}
