//! Off-boundary field evaluation.
//!
//! With the boundary pressures and fluxes known, the representation
//! formula gives the pressure anywhere in the acoustic domain:
//!
//! ```text
//! p(x) = p_inc(x) + τ ( Σ_j M_j(x) p_j - Σ_j L_j(x) q_j )
//! ```
//!
//! Half-space problems use the Rayleigh integral `p(x) = -Σ_j L_hs,j(x) q_j`
//! above the baffle and are identically zero below it. Evaluation points
//! use the same coordinate padding as the mesh.

use ndarray::Array1;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::core::incident::IncidentField;
use crate::core::integration::regular::integrate_pair;
use crate::core::mesh::element::Mesh;
use crate::core::types::{Geometry, Orientation, PhysicsParams, SolverConfig};

/// Pressure decomposition at one evaluation point
#[derive(Debug, Clone, Copy)]
pub struct FieldPoint {
    pub position: [f64; 3],
    pub p_incident: Complex64,
    pub p_scattered: Complex64,
    pub p_total: Complex64,
}

/// Evaluate the representation formula at one point
#[allow(clippy::too_many_arguments)]
pub fn evaluate_at(
    mesh: &Mesh,
    physics: &PhysicsParams,
    orientation: Orientation,
    incident: Option<&IncidentField>,
    pressures: &Array1<Complex64>,
    fluxes: &Array1<Complex64>,
    config: &SolverConfig,
    position: [f64; 3],
) -> FieldPoint {
    let geometry = mesh.geometry;
    let k = physics.wave_number;

    if geometry == Geometry::HalfSpace && position[2] < 0.0 {
        let zero = Complex64::new(0.0, 0.0);
        return FieldPoint {
            position,
            p_incident: zero,
            p_scattered: zero,
            p_total: zero,
        };
    }

    // Field points carry no normal; only the L and M integrals are read
    let dummy_normal = [0.0; 3];
    let mut single = Complex64::new(0.0, 0.0);
    let mut double = Complex64::new(0.0, 0.0);
    for (j, element) in mesh.elements.iter().enumerate() {
        let verts = mesh.element_vertices(element);
        let (ints, _) = integrate_pair(geometry, k, &position, &dummy_normal, element, &verts, config);
        single += ints.l * fluxes[j];
        double += ints.m * pressures[j];
    }

    let p_incident = match incident {
        Some(field) if geometry != Geometry::HalfSpace => field.pressure_at(geometry, k, &position),
        _ => Complex64::new(0.0, 0.0),
    };
    let p_scattered = if geometry == Geometry::HalfSpace {
        -single
    } else {
        (double - single) * orientation.tau()
    };

    FieldPoint {
        position,
        p_incident,
        p_scattered,
        p_total: p_incident + p_scattered,
    }
}

/// Evaluate a batch of points in parallel
#[allow(clippy::too_many_arguments)]
pub fn evaluate_batch(
    mesh: &Mesh,
    physics: &PhysicsParams,
    orientation: Orientation,
    incident: Option<&IncidentField>,
    pressures: &Array1<Complex64>,
    fluxes: &Array1<Complex64>,
    config: &SolverConfig,
    positions: &[[f64; 3]],
) -> Vec<FieldPoint> {
    positions
        .par_iter()
        .map(|&position| {
            evaluate_at(
                mesh,
                physics,
                orientation,
                incident,
                pressures,
                fluxes,
                config,
                position,
            )
        })
        .collect()
}

/// Evenly spaced evaluation points on the segment from `start` to `end`,
/// endpoints included
pub fn line_points(start: [f64; 3], end: [f64; 3], count: usize) -> Vec<[f64; 3]> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![start];
    }
    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            [
                start[0] + t * (end[0] - start[0]),
                start[1] + t * (end[1] - start[1]),
                start[2] + t * (end[2] - start[2]),
            ]
        })
        .collect()
}
