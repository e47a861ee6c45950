//! Regular and near-singular pair integration.
//!
//! Integrates the four layer-operator kernels of one (collocation point,
//! field element) pair where the collocation point does not lie on the
//! element. Pairs closer than `near_singular_ratio` times the element size
//! escalate the quadrature order; very close pairs additionally subdivide
//! the field element until the pieces are small against their distance.
//!
//! Self-element pairs are handled in [`crate::core::integration::singular`].

use num_complex::Complex64;

use crate::core::green::{kernels_2d, kernels_3d, KernelSample};
use crate::core::integration::gauss::{gauss_legendre, triangle_rule};
use crate::core::mesh::element::{distance, Element};
use crate::core::types::{Geometry, OperatorIntegrals, SolverConfig};

/// Distance/size ratio below which the quadrature order is raised another
/// step beyond the configured near-singular threshold
pub const HIGH_ACCURACY_RATIO: f64 = 2.0;

/// Distance/size ratio below which the field element is subdivided
pub const SUBDIVISION_RATIO: f64 = 1.0;

/// Ratio below which a pair counts as unresolved even after escalation
pub const UNRESOLVED_RATIO: f64 = 0.25;

/// Maximum recursive subdivision depth for very close pairs
const MAX_SUBDIVISION_DEPTH: usize = 5;

/// Gauss-Legendre order for a pair at the given distance/size ratio
///
/// Regular pairs use the configured base order; the order is raised in two
/// steps as the pair approaches the near-singular threshold. A base order
/// above an escalation step wins, so escalation never lowers the order.
pub fn escalated_order(ratio: f64, near_singular_ratio: f64, base_order: usize) -> usize {
    if ratio < HIGH_ACCURACY_RATIO {
        base_order.max(12)
    } else if ratio < near_singular_ratio {
        base_order.max(8)
    } else {
        base_order
    }
}

fn accumulate(result: &mut OperatorIntegrals, sample: &KernelSample, weight: f64) {
    result.l += sample.g * weight;
    result.m += sample.h * weight;
    result.mt += sample.ht * weight;
    result.n += sample.e * weight;
}

/// Integrate one off-element pair; returns the integrals and the
/// distance/element-size ratio used by the escalation ladder
pub fn integrate_pair(
    geometry: Geometry,
    k: Complex64,
    p: &[f64; 3],
    np: &[f64; 3],
    element: &Element,
    verts: &[[f64; 3]],
    config: &SolverConfig,
) -> (OperatorIntegrals, f64) {
    let dist = distance(p, &element.center);
    let size = element.size(geometry);
    let ratio = dist / size;
    let order = escalated_order(ratio, config.near_singular_ratio, config.quadrature_order);

    let result = match geometry {
        Geometry::TwoDim => {
            if ratio < SUBDIVISION_RATIO {
                line_adaptive(k.re, p, np, &verts[0], &verts[1], &element.normal, 0)
            } else {
                line_quad(k.re, p, np, &verts[0], &verts[1], &element.normal, order)
            }
        }
        Geometry::ThreeDim => {
            if ratio < SUBDIVISION_RATIO {
                triangle_adaptive(k, p, np, verts, &element.normal, 0)
            } else {
                triangle_quad(k, p, np, verts, &element.normal, order)
            }
        }
        Geometry::Axisymmetric => {
            if ratio < SUBDIVISION_RATIO {
                ring_adaptive(k, p, np, &verts[0], &verts[1], &element.normal, 0)
            } else {
                ring_quad(k, p, np, &verts[0], &verts[1], &element.normal, order, 1)
            }
        }
        Geometry::HalfSpace => {
            // The element lies on the baffle, so its mirror image coincides
            // with itself: the half-space kernel is exactly twice the free
            // one, for collocation rows and field points alike.
            let free = if ratio < SUBDIVISION_RATIO {
                triangle_adaptive(k, p, np, verts, &element.normal, 0)
            } else {
                triangle_quad(k, p, np, verts, &element.normal, order)
            };
            OperatorIntegrals {
                l: 2.0 * free.l,
                ..OperatorIntegrals::default()
            }
        }
    };

    (result, ratio)
}

// ============================================================================
// Line elements (2D)
// ============================================================================

fn line_quad(
    k: f64,
    p: &[f64; 3],
    np: &[f64; 3],
    a: &[f64; 3],
    b: &[f64; 3],
    nq: &[f64; 3],
    order: usize,
) -> OperatorIntegrals {
    let mut result = OperatorIntegrals::default();
    let half = [0.5 * (b[0] - a[0]), 0.5 * (b[1] - a[1]), 0.0];
    let mid = [0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1]), 0.0];
    let jacobian = (half[0] * half[0] + half[1] * half[1]).sqrt();
    for &(x, w) in gauss_legendre(order) {
        let q = [mid[0] + x * half[0], mid[1] + x * half[1], 0.0];
        let sample = kernels_2d(k, p, np, &q, nq);
        accumulate(&mut result, &sample, w * jacobian);
    }
    result
}

fn line_adaptive(
    k: f64,
    p: &[f64; 3],
    np: &[f64; 3],
    a: &[f64; 3],
    b: &[f64; 3],
    nq: &[f64; 3],
    depth: usize,
) -> OperatorIntegrals {
    let mid = [0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1]), 0.0];
    let length = distance(a, b);
    if depth >= MAX_SUBDIVISION_DEPTH || distance(p, &mid) > length {
        return line_quad(k, p, np, a, b, nq, 12);
    }
    let mut result = line_adaptive(k, p, np, a, &mid, nq, depth + 1);
    let right = line_adaptive(k, p, np, &mid, b, nq, depth + 1);
    result.l += right.l;
    result.m += right.m;
    result.mt += right.mt;
    result.n += right.n;
    result
}

// ============================================================================
// Triangle elements (3D and half-space)
// ============================================================================

fn triangle_quad(
    k: Complex64,
    p: &[f64; 3],
    np: &[f64; 3],
    verts: &[[f64; 3]],
    nq: &[f64; 3],
    degree: usize,
) -> OperatorIntegrals {
    let (v0, v1, v2) = (verts[0], verts[1], verts[2]);
    let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
    // Jacobian of the reference map = 2 * area; the rule weights sum to 1/2
    let jacobian = 2.0
        * 0.5
        * ((e1[1] * e2[2] - e1[2] * e2[1]).powi(2)
            + (e1[2] * e2[0] - e1[0] * e2[2]).powi(2)
            + (e1[0] * e2[1] - e1[1] * e2[0]).powi(2))
        .sqrt();

    let mut result = OperatorIntegrals::default();
    for &(xi, eta, w) in triangle_rule(degree) {
        let q = [
            v0[0] + xi * e1[0] + eta * e2[0],
            v0[1] + xi * e1[1] + eta * e2[1],
            v0[2] + xi * e1[2] + eta * e2[2],
        ];
        let sample = kernels_3d(k, p, np, &q, nq);
        accumulate(&mut result, &sample, w * jacobian);
    }
    result
}

fn triangle_adaptive(
    k: Complex64,
    p: &[f64; 3],
    np: &[f64; 3],
    verts: &[[f64; 3]],
    nq: &[f64; 3],
    depth: usize,
) -> OperatorIntegrals {
    let (v0, v1, v2) = (verts[0], verts[1], verts[2]);
    let center = [
        (v0[0] + v1[0] + v2[0]) / 3.0,
        (v0[1] + v1[1] + v2[1]) / 3.0,
        (v0[2] + v1[2] + v2[2]) / 3.0,
    ];
    let size = distance(&v0, &v1)
        .max(distance(&v1, &v2))
        .max(distance(&v2, &v0));
    if depth >= MAX_SUBDIVISION_DEPTH || distance(p, &center) > 1.5 * size {
        return triangle_quad(k, p, np, verts, nq, 5);
    }

    let m01 = midpoint(&v0, &v1);
    let m12 = midpoint(&v1, &v2);
    let m20 = midpoint(&v2, &v0);
    let children = [
        [v0, m01, m20],
        [m01, v1, m12],
        [m20, m12, v2],
        [m01, m12, m20],
    ];
    let mut result = OperatorIntegrals::default();
    for child in &children {
        let part = triangle_adaptive(k, p, np, child, nq, depth + 1);
        result.l += part.l;
        result.m += part.m;
        result.mt += part.mt;
        result.n += part.n;
    }
    result
}

fn midpoint(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        0.5 * (a[0] + b[0]),
        0.5 * (a[1] + b[1]),
        0.5 * (a[2] + b[2]),
    ]
}

// ============================================================================
// Ring elements (axisymmetric)
// ============================================================================

/// Azimuthal panel count resolving the kernel oscillation along the ring
fn azimuthal_panels(k: Complex64, max_radius: f64, refine: usize) -> usize {
    let oscillation = (k.norm() * max_radius).ceil() as usize;
    (2 + oscillation / 2 + refine).min(64)
}

/// Integrate over a ring element: Gauss along the generator segment times a
/// panel-composite Gauss rule over the azimuth. `p` and the generator
/// vertices are (r, z) pairs padded to three coordinates; the collocation
/// ring is taken at azimuth zero. The integrand is even in the azimuth, so
/// only half the circle is sampled.
fn ring_quad(
    k: Complex64,
    p: &[f64; 3],
    np: &[f64; 3],
    a: &[f64; 3],
    b: &[f64; 3],
    nq: &[f64; 3],
    order: usize,
    refine: usize,
) -> OperatorIntegrals {
    use std::f64::consts::PI;

    let p3 = [p[0], 0.0, p[1]];
    let np3 = [np[0], 0.0, np[1]];
    let (nr, nz) = (nq[0], nq[1]);

    let length = distance(a, b);
    let jac_s = 0.5 * length;
    let panels = azimuthal_panels(k, a[0].max(b[0]), refine);
    let dtheta = PI / panels as f64;

    let mut result = OperatorIntegrals::default();
    for &(xs, ws) in gauss_legendre(order) {
        let t = 0.5 * (1.0 + xs);
        let rq = a[0] + t * (b[0] - a[0]);
        let zq = a[1] + t * (b[1] - a[1]);
        for panel in 0..panels {
            let theta0 = panel as f64 * dtheta;
            for &(xt, wt) in gauss_legendre(8) {
                let theta = theta0 + 0.5 * (1.0 + xt) * dtheta;
                let (sin_t, cos_t) = theta.sin_cos();
                let q3 = [rq * cos_t, rq * sin_t, zq];
                let nq3 = [nr * cos_t, nr * sin_t, nz];
                let sample = kernels_3d(k, &p3, &np3, &q3, &nq3);
                // factor 2: the mirror half-circle
                let weight = 2.0 * ws * jac_s * wt * 0.5 * dtheta * rq;
                accumulate(&mut result, &sample, weight);
            }
        }
    }
    result
}

fn ring_adaptive(
    k: Complex64,
    p: &[f64; 3],
    np: &[f64; 3],
    a: &[f64; 3],
    b: &[f64; 3],
    nq: &[f64; 3],
    depth: usize,
) -> OperatorIntegrals {
    let mid = [0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1]), 0.0];
    let length = distance(a, b);
    if depth >= MAX_SUBDIVISION_DEPTH || distance(p, &mid) > length {
        return ring_quad(k, p, np, a, b, nq, 12, 4);
    }
    let mut result = ring_adaptive(k, p, np, a, &mid, nq, depth + 1);
    let right = ring_adaptive(k, p, np, &mid, b, nq, depth + 1);
    result.l += right.l;
    result.m += right.m;
    result.mt += right.mt;
    result.n += right.n;
    result
}
