//! Canonical meshes for tests, examples and convergence studies.

use ndarray::Array2;
use std::f64::consts::PI;

use crate::core::error::BemError;
use crate::core::mesh::element::Mesh;
use crate::core::types::Geometry;

/// Circle of `n` equal line elements, wound counter-clockwise (2D)
pub fn circle_mesh(radius: f64, n: usize) -> Result<Mesh, BemError> {
    let mut vertices = Array2::zeros((n, 2));
    for i in 0..n {
        let theta = 2.0 * PI * i as f64 / n as f64;
        vertices[[i, 0]] = radius * theta.cos();
        vertices[[i, 1]] = radius * theta.sin();
    }
    let connectivity = (0..n).map(|i| vec![i, (i + 1) % n]).collect();
    Mesh::new(Geometry::TwoDim, vertices, connectivity)
}

/// Latitude/longitude triangulated sphere with outward normals (3D)
///
/// `n_theta` latitude bands (>= 2) and `n_phi` azimuthal sectors (>= 3);
/// the two polar bands are triangle fans.
pub fn sphere_mesh(radius: f64, n_theta: usize, n_phi: usize) -> Result<Mesh, BemError> {
    let num_rings = n_theta - 1;
    let mut vertices = Array2::zeros((2 + num_rings * n_phi, 3));
    // North pole, rings, south pole
    vertices[[0, 2]] = radius;
    let ring_index = |i: usize, j: usize| 1 + (i - 1) * n_phi + (j % n_phi);
    for i in 1..n_theta {
        let theta = PI * i as f64 / n_theta as f64;
        for j in 0..n_phi {
            let phi = 2.0 * PI * j as f64 / n_phi as f64;
            let row = ring_index(i, j);
            vertices[[row, 0]] = radius * theta.sin() * phi.cos();
            vertices[[row, 1]] = radius * theta.sin() * phi.sin();
            vertices[[row, 2]] = radius * theta.cos();
        }
    }
    let south = 1 + num_rings * n_phi;
    vertices[[south, 2]] = -radius;

    let mut connectivity = Vec::new();
    for j in 0..n_phi {
        connectivity.push(vec![0, ring_index(1, j), ring_index(1, j + 1)]);
    }
    for i in 1..num_rings {
        for j in 0..n_phi {
            let (p00, p10) = (ring_index(i, j), ring_index(i + 1, j));
            let (p01, p11) = (ring_index(i, j + 1), ring_index(i + 1, j + 1));
            connectivity.push(vec![p00, p10, p11]);
            connectivity.push(vec![p00, p11, p01]);
        }
    }
    for j in 0..n_phi {
        connectivity.push(vec![ring_index(num_rings, j), south, ring_index(num_rings, j + 1)]);
    }

    Mesh::new(Geometry::ThreeDim, vertices, connectivity)
}

/// Semicircular generator arc of a sphere, `n` ring elements (axisymmetric)
///
/// Runs from the north pole (z = +radius) to the south pole, which is the
/// orientation the axisymmetric normal convention expects.
pub fn sphere_generator_mesh(radius: f64, n: usize) -> Result<Mesh, BemError> {
    let mut vertices = Array2::zeros((n + 1, 2));
    for i in 0..=n {
        let t = PI * i as f64 / n as f64;
        vertices[[i, 0]] = radius * t.sin();
        vertices[[i, 1]] = radius * t.cos();
    }
    let connectivity = (0..n).map(|i| vec![i, i + 1]).collect();
    Mesh::new(Geometry::Axisymmetric, vertices, connectivity)
}

/// Triangulated disk on the z = 0 baffle plane, normal +z (half-space)
///
/// `n_rings` concentric rings of `n_sectors` sectors each; the innermost
/// ring is a fan around the center vertex.
pub fn disk_mesh(radius: f64, n_rings: usize, n_sectors: usize) -> Result<Mesh, BemError> {
    let mut vertices = Array2::zeros((1 + n_rings * n_sectors, 3));
    let ring_index = |i: usize, j: usize| 1 + (i - 1) * n_sectors + (j % n_sectors);
    for i in 1..=n_rings {
        let r = radius * i as f64 / n_rings as f64;
        for j in 0..n_sectors {
            let phi = 2.0 * PI * j as f64 / n_sectors as f64;
            let row = ring_index(i, j);
            vertices[[row, 0]] = r * phi.cos();
            vertices[[row, 1]] = r * phi.sin();
        }
    }

    let mut connectivity = Vec::new();
    for j in 0..n_sectors {
        connectivity.push(vec![0, ring_index(1, j), ring_index(1, j + 1)]);
    }
    for i in 1..n_rings {
        for j in 0..n_sectors {
            let (p00, p10) = (ring_index(i, j), ring_index(i + 1, j));
            let (p01, p11) = (ring_index(i, j + 1), ring_index(i + 1, j + 1));
            connectivity.push(vec![p00, p10, p11]);
            connectivity.push(vec![p00, p11, p01]);
        }
    }

    Mesh::new(Geometry::HalfSpace, vertices, connectivity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mesh::element::dot;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_circle_mesh_perimeter_and_normals() {
        let mesh = circle_mesh(2.0, 64).unwrap();
        let perimeter: f64 = mesh.elements.iter().map(|e| e.measure).sum();
        assert_abs_diff_eq!(perimeter, 2.0 * PI * 2.0, epsilon = 0.05);
        for e in &mesh.elements {
            // Outward: normal aligned with the centroid direction
            let radial = [e.center[0], e.center[1], 0.0];
            assert!(dot(&e.normal, &radial) > 0.0);
        }
    }

    #[test]
    fn test_sphere_mesh_area_and_normals() {
        let mesh = sphere_mesh(1.0, 12, 24).unwrap();
        let area: f64 = mesh.elements.iter().map(|e| e.measure).sum();
        assert!((area - 4.0 * PI).abs() / (4.0 * PI) < 0.05);
        for e in &mesh.elements {
            assert!(dot(&e.normal, &e.center) > 0.0);
        }
    }

    #[test]
    fn test_sphere_generator_arc_length() {
        let mesh = sphere_generator_mesh(1.0, 32).unwrap();
        let length: f64 = mesh.elements.iter().map(|e| e.measure).sum();
        assert_abs_diff_eq!(length, PI, epsilon = 0.01);
        for e in &mesh.elements {
            // Outward radial normal of the sphere surface
            let radial = [e.center[0], e.center[1], 0.0];
            assert!(dot(&e.normal, &radial) > 0.0);
        }
    }

    #[test]
    fn test_disk_mesh_area() {
        let mesh = disk_mesh(1.0, 6, 24).unwrap();
        let area: f64 = mesh.elements.iter().map(|e| e.measure).sum();
        assert!((area - PI).abs() / PI < 0.02);
        for e in &mesh.elements {
            assert_abs_diff_eq!(e.normal[2], 1.0, epsilon = 1e-10);
        }
    }
}
