//! Incident excitation fields.
//!
//! An incident field enters the boundary system through the right-hand side
//! `-τ (p_inc + μ q_inc)` and is added back during field evaluation. Both
//! variants follow the `exp(+ikr)` convention of the kernels.
//!
//! Coordinates are padded like mesh coordinates: `[x, y, 0]` in 2D,
//! `[r, z, 0]` for axisymmetric problems (where the field must be
//! rotationally symmetric: axial plane waves and on-axis point sources).

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::error::BemError;
use crate::core::mesh::element::{dot, normalize, sub};
use crate::core::types::Geometry;
use crate::special::{hankel1_0, hankel1_1};

/// Incident excitation field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IncidentField {
    /// Plane wave `p = amplitude · exp(ik d·x)`
    PlaneWave {
        /// Unit propagation direction (padded like mesh coordinates)
        direction: [f64; 3],
        amplitude: Complex64,
    },
    /// Monopole `p = strength · G(x, position)`
    PointSource {
        /// Source location (padded like mesh coordinates)
        position: [f64; 3],
        strength: Complex64,
    },
}

impl IncidentField {
    /// Plane wave with the direction normalized
    pub fn plane_wave(direction: [f64; 3], amplitude: Complex64) -> Self {
        let (unit, _) = normalize(&direction);
        IncidentField::PlaneWave {
            direction: unit,
            amplitude,
        }
    }

    pub fn point_source(position: [f64; 3], strength: Complex64) -> Self {
        IncidentField::PointSource { position, strength }
    }

    /// Check compatibility with the geometry variant
    pub fn validate(&self, geometry: Geometry) -> Result<(), BemError> {
        if geometry == Geometry::HalfSpace {
            return Err(BemError::UnsupportedIncident(
                "half-space problems take their excitation from the boundary data".to_string(),
            ));
        }
        if geometry == Geometry::Axisymmetric {
            match self {
                IncidentField::PlaneWave { direction, .. } => {
                    // Axial propagation: (r, z) padding puts z in slot 1
                    if direction[0].abs() > 1e-12 || direction[2].abs() > 1e-12 {
                        return Err(BemError::UnsupportedIncident(
                            "axisymmetric plane waves must propagate along the axis".to_string(),
                        ));
                    }
                }
                IncidentField::PointSource { position, .. } => {
                    if position[0].abs() > 1e-12 {
                        return Err(BemError::UnsupportedIncident(
                            "axisymmetric point sources must sit on the axis".to_string(),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Incident pressure at a (padded) point
    pub fn pressure_at(&self, geometry: Geometry, k: Complex64, x: &[f64; 3]) -> Complex64 {
        let (x3, _) = unpad(geometry, x, &[0.0; 3]);
        match self {
            IncidentField::PlaneWave {
                direction,
                amplitude,
            } => {
                let d3 = plane_direction(geometry, direction);
                let phase = Complex64::new(0.0, 1.0) * k * dot(&d3, &x3);
                amplitude * phase.exp()
            }
            IncidentField::PointSource { position, strength } => {
                let (s3, _) = unpad(geometry, position, &[0.0; 3]);
                let (_, r) = normalize(&sub(&x3, &s3));
                strength * green(geometry, k, r)
            }
        }
    }

    /// Incident flux `∂p_inc/∂n` at a (padded) point with (padded) normal
    pub fn flux_at(
        &self,
        geometry: Geometry,
        k: Complex64,
        x: &[f64; 3],
        normal: &[f64; 3],
    ) -> Complex64 {
        let (x3, n3) = unpad(geometry, x, normal);
        match self {
            IncidentField::PlaneWave { direction, .. } => {
                let d3 = plane_direction(geometry, direction);
                let p = self.pressure_at(geometry, k, x);
                Complex64::new(0.0, 1.0) * k * dot(&d3, &n3) * p
            }
            IncidentField::PointSource { position, strength } => {
                let (s3, _) = unpad(geometry, position, &[0.0; 3]);
                let (rhat, r) = normalize(&sub(&x3, &s3));
                strength * green_radial_derivative(geometry, k, r) * dot(&rhat, &n3)
            }
        }
    }
}

/// Map padded coordinates to true 3D: identity for 2D/3D (the padded z of 2D
/// is zero anyway), (r, z) to the azimuth-zero meridian for axisymmetric
fn unpad(geometry: Geometry, x: &[f64; 3], n: &[f64; 3]) -> ([f64; 3], [f64; 3]) {
    match geometry {
        Geometry::Axisymmetric => ([x[0], 0.0, x[1]], [n[0], 0.0, n[1]]),
        _ => (*x, *n),
    }
}

fn plane_direction(geometry: Geometry, direction: &[f64; 3]) -> [f64; 3] {
    match geometry {
        Geometry::Axisymmetric => [direction[0], 0.0, direction[1]],
        _ => *direction,
    }
}

/// Free-space Green's function at distance r for the geometry's dimension
fn green(geometry: Geometry, k: Complex64, r: f64) -> Complex64 {
    match geometry {
        Geometry::TwoDim => Complex64::new(0.0, 0.25) * hankel1_0(k.re * r),
        _ => (Complex64::new(0.0, 1.0) * k * r).exp() / (4.0 * PI * r),
    }
}

fn green_radial_derivative(geometry: Geometry, k: Complex64, r: f64) -> Complex64 {
    match geometry {
        Geometry::TwoDim => -Complex64::new(0.0, 0.25) * k.re * hankel1_1(k.re * r),
        _ => {
            let g = (Complex64::new(0.0, 1.0) * k * r).exp() / (4.0 * PI * r);
            g * (Complex64::new(0.0, 1.0) * k - 1.0 / r)
        }
    }
}
