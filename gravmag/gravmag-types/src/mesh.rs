//! Outward-oriented indexed triangle mesh.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed triangle mesh with outward-consistent orientation.
///
/// Faces are triples of indices into `vertices`, wound counter-clockwise
/// when viewed from outside the body. `normals` holds one outward unit
/// vector per face, parallel in index order to `faces`, and `volume` is the
/// enclosed volume of the body.
///
/// # Invariants
///
/// - `normals.len() == faces.len()`
/// - every index in `faces` is valid into `vertices`
/// - for every face, the winding normal (right-hand rule) has a positive dot
///   product with the stored normal
///
/// The mesh is treated as immutable once derived; only rigid translation is
/// provided, which preserves all invariants.
///
/// # Example
///
/// ```
/// use gravmag_types::{OrientedMesh, Point3};
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
/// ];
/// let faces = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
///
/// let mesh = OrientedMesh::from_parts(vertices, faces);
/// assert_eq!(mesh.face_count(), 4);
/// assert!((mesh.volume - 1.0 / 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrientedMesh {
    /// Vertex coordinates in meters.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into `vertices`, CCW seen from outside.
    pub faces: Vec<[u32; 3]>,

    /// Outward unit normal per face, parallel to `faces`.
    pub normals: Vec<Vector3<f64>>,

    /// Enclosed volume in cubic meters.
    pub volume: f64,
}

impl OrientedMesh {
    /// Build a mesh from vertices and outward-wound faces.
    ///
    /// The outward normals are derived from the winding of each face and the
    /// volume from the divergence theorem, so the caller only has to supply
    /// a consistently wound closed surface. A face with zero area gets a
    /// zero normal.
    ///
    /// # Example
    ///
    /// ```
    /// use gravmag_types::{unit_tetrahedron, OrientedMesh};
    ///
    /// let tet = unit_tetrahedron();
    /// let rebuilt = OrientedMesh::from_parts(tet.vertices.clone(), tet.faces.clone());
    /// assert_eq!(rebuilt.normals.len(), rebuilt.faces.len());
    /// ```
    #[must_use]
    pub fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        let mut mesh = Self {
            vertices,
            faces,
            normals: Vec::new(),
            volume: 0.0,
        };

        let normals = mesh
            .faces
            .iter()
            .map(|&face| {
                mesh.winding_normal_of(face)
                    .try_normalize(0.0)
                    .unwrap_or_else(Vector3::zeros)
            })
            .collect();
        mesh.normals = normals;
        mesh.volume = mesh.signed_volume();
        mesh
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Check whether the mesh has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The three vertex positions of face `index`, in winding order.
    ///
    /// Returns `None` if `index` is out of range.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<[Point3<f64>; 3]> {
        let &[a, b, c] = self.faces.get(index)?;
        Some([
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ])
    }

    /// The (unnormalized) winding normal of face `index` by the right-hand
    /// rule. Its magnitude is twice the face area.
    ///
    /// Returns `None` if `index` is out of range.
    #[must_use]
    pub fn winding_normal(&self, index: usize) -> Option<Vector3<f64>> {
        self.faces
            .get(index)
            .map(|&face| self.winding_normal_of(face))
    }

    fn winding_normal_of(&self, [a, b, c]: [u32; 3]) -> Vector3<f64> {
        let v0 = self.vertices[a as usize];
        let v1 = self.vertices[b as usize];
        let v2 = self.vertices[c as usize];
        (v1 - v0).cross(&(v2 - v0))
    }

    /// Signed volume by the divergence theorem.
    ///
    /// Sums the signed tetrahedra spanned by each face and the origin.
    /// Positive for a closed surface wound CCW seen from outside; negative
    /// for an inside-out mesh.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut six_vol = 0.0;
        for &[a, b, c] in &self.faces {
            let v0 = self.vertices[a as usize].coords;
            let v1 = self.vertices[b as usize].coords;
            let v2 = self.vertices[c as usize].coords;
            six_vol += v0.dot(&v1.cross(&v2));
        }
        six_vol / 6.0
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.faces
            .iter()
            .map(|&face| self.winding_normal_of(face).norm() / 2.0)
            .sum()
    }

    /// Translate all vertices by `offset`.
    ///
    /// Normals and volume are unaffected by a rigid translation.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }
}

/// Unit cube centered at the origin, triangulated into 12 outward-wound
/// faces.
///
/// # Example
///
/// ```
/// use gravmag_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> OrientedMesh {
    let vertices = vec![
        Point3::new(-0.5, -0.5, -0.5),
        Point3::new(0.5, -0.5, -0.5),
        Point3::new(0.5, 0.5, -0.5),
        Point3::new(-0.5, 0.5, -0.5),
        Point3::new(-0.5, -0.5, 0.5),
        Point3::new(0.5, -0.5, 0.5),
        Point3::new(0.5, 0.5, 0.5),
        Point3::new(-0.5, 0.5, 0.5),
    ];

    // Two triangles per cube face, CCW seen from outside.
    let faces = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];

    OrientedMesh::from_parts(vertices, faces)
}

/// Unit right tetrahedron with vertices at the origin and the three axis
/// unit points, outward-wound.
#[must_use]
pub fn unit_tetrahedron() -> OrientedMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];
    let faces = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

    OrientedMesh::from_parts(vertices, faces)
}
