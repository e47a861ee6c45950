//! Boundary elements and mesh construction.
//!
//! A mesh is a vertex table plus a list of constant (collocation at the
//! centroid) elements. Elements precompute their centroid, unit normal and
//! measure at construction; a mesh is immutable afterwards.
//!
//! All per-element coordinates are padded to `[f64; 3]`:
//! - 2D: `[x, y, 0]`
//! - axisymmetric: `[r, z, 0]` (generator half-plane)
//! - 3D and half-space: `[x, y, z]`
//!
//! Normal conventions (the normal always points away from the enclosed
//! volume):
//! - 2D: closed curves are wound counter-clockwise, normal = `(t_y, -t_x)`
//! - axisymmetric: the generator runs from max z to min z, normal =
//!   `(-t_z, t_r)` in the (r, z) plane
//! - 3D: triangles are wound counter-clockwise seen from outside
//! - half-space: triangles lie on z = 0 wound counter-clockwise seen from
//!   the domain z > 0, so the normal is +z

use ndarray::Array2;

use crate::core::error::BemError;
use crate::core::types::Geometry;

// ============================================================================
// Small vector helpers
// ============================================================================

pub fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn norm(a: &[f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

pub fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    norm(&sub(a, b))
}

/// Unit vector and length; zero-length input yields a zero vector
pub fn normalize(a: &[f64; 3]) -> ([f64; 3], f64) {
    let len = norm(a);
    if len < 1e-300 {
        ([0.0; 3], 0.0)
    } else {
        ([a[0] / len, a[1] / len, a[2] / len], len)
    }
}

// ============================================================================
// Element and Mesh
// ============================================================================

/// Smallest element measure accepted as non-degenerate
const DEGENERATE_MEASURE: f64 = 1e-12;

/// Largest |z| accepted as "on the baffle" for half-space meshes
const BAFFLE_PLANE_TOLERANCE: f64 = 1e-9;

/// A constant boundary element with precomputed geometry
#[derive(Debug, Clone)]
pub struct Element {
    /// Vertex indices (2 for line/ring elements, 3 for triangles)
    pub connectivity: Vec<usize>,
    /// Centroid, padded to three coordinates
    pub center: [f64; 3],
    /// Unit normal, padded to three coordinates
    pub normal: [f64; 3],
    /// Length (line/ring elements) or area (triangles)
    pub measure: f64,
}

impl Element {
    /// Characteristic size used for near-singular distance ratios
    pub fn size(&self, geometry: Geometry) -> f64 {
        match geometry {
            Geometry::TwoDim | Geometry::Axisymmetric => self.measure,
            Geometry::ThreeDim | Geometry::HalfSpace => self.measure.sqrt(),
        }
    }
}

/// Boundary element mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Geometry variant this mesh discretizes
    pub geometry: Geometry,
    /// Vertex coordinates (num_vertices × 2 or × 3 depending on geometry)
    pub vertices: Array2<f64>,
    /// Elements with precomputed centroid, normal and measure
    pub elements: Vec<Element>,
}

impl Mesh {
    /// Build a mesh and validate every element.
    ///
    /// Degenerate elements, out-of-range connectivity, negative radii
    /// (axisymmetric) and off-plane elements (half-space) are fatal.
    pub fn new(
        geometry: Geometry,
        vertices: Array2<f64>,
        connectivity: Vec<Vec<usize>>,
    ) -> Result<Self, BemError> {
        let dim = geometry.vertex_dim();
        if vertices.ncols() != dim {
            return Err(BemError::DimensionMismatch {
                expected: dim,
                got: vertices.ncols(),
            });
        }

        let mut elements = Vec::with_capacity(connectivity.len());
        for (index, conn) in connectivity.iter().enumerate() {
            elements.push(build_element(geometry, &vertices, conn, index)?);
        }

        Ok(Self {
            geometry,
            vertices,
            elements,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.nrows()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Padded vertex coordinates of one element
    pub fn element_vertices(&self, element: &Element) -> Vec<[f64; 3]> {
        element
            .connectivity
            .iter()
            .map(|&v| padded_vertex(&self.vertices, v))
            .collect()
    }
}

fn padded_vertex(vertices: &Array2<f64>, index: usize) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (j, x) in vertices.row(index).iter().enumerate() {
        out[j] = *x;
    }
    out
}

fn build_element(
    geometry: Geometry,
    vertices: &Array2<f64>,
    connectivity: &[usize],
    index: usize,
) -> Result<Element, BemError> {
    let nodes = geometry.element_nodes();
    if connectivity.len() != nodes {
        return Err(BemError::DegenerateElement {
            index,
            reason: format!("expected {} vertices, got {}", nodes, connectivity.len()),
        });
    }
    for &v in connectivity {
        if v >= vertices.nrows() {
            return Err(BemError::InvalidConnectivity {
                index,
                vertex: v,
                num_vertices: vertices.nrows(),
            });
        }
    }

    let coords: Vec<[f64; 3]> = connectivity
        .iter()
        .map(|&v| padded_vertex(vertices, v))
        .collect();

    match geometry {
        Geometry::TwoDim => build_line_element(&coords, connectivity, index, false),
        Geometry::Axisymmetric => build_line_element(&coords, connectivity, index, true),
        Geometry::ThreeDim => build_triangle_element(&coords, connectivity, index, false),
        Geometry::HalfSpace => build_triangle_element(&coords, connectivity, index, true),
    }
}

fn build_line_element(
    coords: &[[f64; 3]],
    connectivity: &[usize],
    index: usize,
    axisymmetric: bool,
) -> Result<Element, BemError> {
    let (a, b) = (coords[0], coords[1]);
    let tangent = sub(&b, &a);
    let (unit_t, length) = normalize(&tangent);
    if length < DEGENERATE_MEASURE {
        return Err(BemError::DegenerateElement {
            index,
            reason: "zero length".to_string(),
        });
    }

    let center = [
        0.5 * (a[0] + b[0]),
        0.5 * (a[1] + b[1]),
        0.5 * (a[2] + b[2]),
    ];

    let normal = if axisymmetric {
        // (r, z) half-plane, generator running from max z to min z
        if a[0] < 0.0 || b[0] < 0.0 {
            return Err(BemError::DegenerateElement {
                index,
                reason: "negative radius".to_string(),
            });
        }
        if center[0] < DEGENERATE_MEASURE {
            return Err(BemError::DegenerateElement {
                index,
                reason: "ring element collapsed onto the symmetry axis".to_string(),
            });
        }
        [-unit_t[1], unit_t[0], 0.0]
    } else {
        [unit_t[1], -unit_t[0], 0.0]
    };

    Ok(Element {
        connectivity: connectivity.to_vec(),
        center,
        normal,
        measure: length,
    })
}

fn build_triangle_element(
    coords: &[[f64; 3]],
    connectivity: &[usize],
    index: usize,
    half_space: bool,
) -> Result<Element, BemError> {
    let (v0, v1, v2) = (coords[0], coords[1], coords[2]);
    let n = cross(&sub(&v1, &v0), &sub(&v2, &v0));
    let (normal, twice_area) = normalize(&n);
    let area = 0.5 * twice_area;
    if area < DEGENERATE_MEASURE {
        return Err(BemError::DegenerateElement {
            index,
            reason: "zero area".to_string(),
        });
    }

    let center = [
        (v0[0] + v1[0] + v2[0]) / 3.0,
        (v0[1] + v1[1] + v2[1]) / 3.0,
        (v0[2] + v1[2] + v2[2]) / 3.0,
    ];

    if half_space {
        let scale = 1.0 + coords.iter().flatten().map(|x| x.abs()).fold(0.0, f64::max);
        if coords.iter().any(|v| v[2].abs() > BAFFLE_PLANE_TOLERANCE * scale) {
            return Err(BemError::OffBafflePlane { index });
        }
        if normal[2] < 0.5 {
            return Err(BemError::DegenerateElement {
                index,
                reason: "baffle element wound clockwise, normal must be +z".to_string(),
            });
        }
    }

    Ok(Element {
        connectivity: connectivity.to_vec(),
        center,
        normal,
        measure: area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_vector_helpers() {
        let a = [1.0, 0.0, 0.0];
        let b = [0.0, 1.0, 0.0];
        assert_eq!(cross(&a, &b), [0.0, 0.0, 1.0]);
        assert_eq!(dot(&a, &b), 0.0);
        let (u, l) = normalize(&[3.0, 4.0, 0.0]);
        assert_abs_diff_eq!(l, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u[0], 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_ccw_square_has_outward_normals() {
        let vertices = array![[1.0, -1.0], [1.0, 1.0], [-1.0, 1.0], [-1.0, -1.0]];
        let conn = vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![3, 0]];
        let mesh = Mesh::new(Geometry::TwoDim, vertices, conn).unwrap();

        // Right edge normal points +x
        assert_abs_diff_eq!(mesh.elements[0].normal[0], 1.0, epsilon = 1e-12);
        // Top edge normal points +y
        assert_abs_diff_eq!(mesh.elements[1].normal[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mesh.elements[0].measure, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_axisym_equator_normal_points_outward() {
        // Generator piece near the equator of a unit sphere, running downward
        let vertices = array![[0.999, 0.04], [0.999, -0.04]];
        let mesh = Mesh::new(Geometry::Axisymmetric, vertices, vec![vec![0, 1]]).unwrap();
        assert!(mesh.elements[0].normal[0] > 0.99); // +r direction
    }

    #[test]
    fn test_triangle_normal_and_area() {
        let vertices = array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let mesh = Mesh::new(Geometry::ThreeDim, vertices, vec![vec![0, 1, 2]]).unwrap();
        let e = &mesh.elements[0];
        assert_abs_diff_eq!(e.measure, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(e.normal[2], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e.center[0], 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_element_rejected() {
        let vertices = array![[0.0, 0.0], [0.0, 0.0]];
        let err = Mesh::new(Geometry::TwoDim, vertices, vec![vec![0, 1]]).unwrap_err();
        assert!(matches!(err, BemError::DegenerateElement { index: 0, .. }));
    }

    #[test]
    fn test_off_baffle_element_rejected() {
        let vertices = array![[0.0, 0.0, 0.1], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let err = Mesh::new(Geometry::HalfSpace, vertices, vec![vec![0, 1, 2]]).unwrap_err();
        assert!(matches!(err, BemError::OffBafflePlane { index: 0 }));
    }

    #[test]
    fn test_axis_element_rejected() {
        let vertices = array![[0.0, 1.0], [0.0, -1.0]];
        let err = Mesh::new(Geometry::Axisymmetric, vertices, vec![vec![0, 1]]).unwrap_err();
        assert!(matches!(err, BemError::DegenerateElement { .. }));
    }
}
