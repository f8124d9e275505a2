//! # Mesh Descriptor
//!
//! The `(vertices, faces)` record every builder produces. Faces are triangles
//! or quads of vertex indices wound right-handed, so the outward normal is
//! `(b - a) x (c - a)` for each triangle.

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};

// =============================================================================
// FACE
// =============================================================================

/// One face of a mesh descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Triangle([u32; 3]),
    Quad([u32; 4]),
}

impl Face {
    /// Returns the vertex indices of this face in winding order.
    pub fn indices(&self) -> &[u32] {
        match self {
            Face::Triangle(tri) => tri.as_slice(),
            Face::Quad(quad) => quad.as_slice(),
        }
    }

    /// Splits the face into triangles along the fixed `a-c` diagonal.
    ///
    /// A quad `(a, b, c, d)` becomes `(a, b, c)` and `(c, d, a)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use solid_mesh::Face;
    ///
    /// let tris: Vec<_> = Face::Quad([0, 1, 2, 3]).triangles().collect();
    /// assert_eq!(tris, vec![[0, 1, 2], [2, 3, 0]]);
    /// ```
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> {
        let (first, second) = match *self {
            Face::Triangle(tri) => (tri, None),
            Face::Quad([a, b, c, d]) => ([a, b, c], Some([c, d, a])),
        };
        std::iter::once(first).chain(second)
    }

    /// Returns the same face with every index shifted by `offset`.
    pub fn offset(&self, offset: u32) -> Face {
        match *self {
            Face::Triangle([a, b, c]) => Face::Triangle([a + offset, b + offset, c + offset]),
            Face::Quad([a, b, c, d]) => {
                Face::Quad([a + offset, b + offset, c + offset, d + offset])
            }
        }
    }

    /// Returns the face with reversed winding.
    pub fn reversed(&self) -> Face {
        match *self {
            Face::Triangle([a, b, c]) => Face::Triangle([c, b, a]),
            Face::Quad([a, b, c, d]) => Face::Quad([d, c, b, a]),
        }
    }
}

// =============================================================================
// FACE MODE
// =============================================================================

/// Whether builders emit quads or split every quad into two triangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceMode {
    #[default]
    Quads,
    Triangles,
}

impl FaceMode {
    /// Pushes one quad in this mode.
    pub fn push_quad(self, faces: &mut Vec<Face>, quad: [u32; 4]) {
        match self {
            FaceMode::Quads => faces.push(Face::Quad(quad)),
            FaceMode::Triangles => faces.extend(Face::Quad(quad).triangles().map(Face::Triangle)),
        }
    }

    /// Number of faces one quad becomes in this mode.
    #[inline]
    pub fn faces_per_quad(self) -> usize {
        match self {
            FaceMode::Quads => 1,
            FaceMode::Triangles => 2,
        }
    }
}

// =============================================================================
// MESH
// =============================================================================

/// A mesh descriptor: an ordered vertex list and faces indexing into it.
///
/// All geometry is f64. Export to f32 only happens at the host boundary.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::{Face, Mesh};
///
/// let mesh = Mesh::from_parts(
///     vec![DVec3::ZERO, DVec3::X, DVec3::Y],
///     vec![Face::Triangle([0, 1, 2])],
/// )
/// .unwrap();
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Builds a mesh from a vertex list and a face list.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `vertices` is empty or holds a non-finite point
    /// - `DegenerateSeam` if a face references a missing vertex
    pub fn from_parts(vertices: Vec<DVec3>, faces: Vec<Face>) -> MeshResult<Self> {
        if vertices.is_empty() {
            return Err(MeshError::invalid_parameter(
                "mesh construction needs at least one vertex",
            ));
        }
        if let Some(bad) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(MeshError::invalid_parameter(format!(
                "vertex {bad} is not finite"
            )));
        }
        let mesh = Self { vertices, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Creates an empty mesh, the identity for [`Mesh::merge`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces as emitted (quads count once).
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of triangles after splitting quads.
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| match f {
                Face::Triangle(_) => 1,
                Face::Quad(_) => 2,
            })
            .sum()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Consumes the mesh, returning its parts.
    pub fn into_parts(self) -> (Vec<DVec3>, Vec<Face>) {
        (self.vertices, self.faces)
    }

    /// Iterates all triangles, splitting quads along the fixed diagonal.
    pub fn triangle_indices(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.faces.iter().flat_map(|f| f.triangles())
    }

    /// Returns a copy with every quad split into two triangles.
    pub fn triangulated(&self) -> Mesh {
        Mesh {
            vertices: self.vertices.clone(),
            faces: self.triangle_indices().map(Face::Triangle).collect(),
        }
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Signed enclosed volume by the divergence theorem.
    ///
    /// Positive for a closed mesh wound outward.
    pub fn signed_volume(&self) -> f64 {
        self.triangle_indices()
            .map(|[a, b, c]| {
                let v0 = self.vertices[a as usize];
                let v1 = self.vertices[b as usize];
                let v2 = self.vertices[c as usize];
                v0.dot(v1.cross(v2))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Checks that every face index is inside the vertex list.
    ///
    /// # Errors
    ///
    /// `DegenerateSeam` naming the first offending face.
    pub fn validate(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(&index) = face
                .indices()
                .iter()
                .find(|&&i| i as usize >= vertex_count)
            {
                return Err(MeshError::degenerate_seam(face_idx, index, vertex_count));
            }
        }
        Ok(())
    }

    /// Transforms all vertices by a 4x4 matrix.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
        // A mirroring transform turns the mesh inside out
        if matrix.determinant() < 0.0 {
            for face in &mut self.faces {
                *face = face.reversed();
            }
        }
    }

    /// Returns a transformed copy.
    pub fn transformed(&self, matrix: &DMat4) -> Mesh {
        let mut mesh = self.clone();
        mesh.transform(matrix);
        mesh
    }

    /// Translates the mesh by a vector.
    ///
    /// # Arguments
    ///
    /// * `offset` - Translation vector
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Returns a translated copy.
    pub fn translated(&self, offset: DVec3) -> Mesh {
        let mut mesh = self.clone();
        mesh.translate(offset);
        mesh
    }

    /// Joins another mesh into this one (no boolean union).
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the joined vertex count no longer fits a `u32`
    /// index.
    pub fn merge(&mut self, other: &Mesh) -> MeshResult<()> {
        let total = self.vertices.len() + other.vertices.len();
        if u32::try_from(total).is_err() {
            return Err(MeshError::invalid_parameter(format!(
                "merged mesh would hold {total} vertices"
            )));
        }
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(other.faces.iter().map(|f| f.offset(offset)));
        Ok(())
    }

    /// Joins a sequence of meshes in order.
    pub fn join<I>(meshes: I) -> MeshResult<Mesh>
    where
        I: IntoIterator<Item = Mesh>,
    {
        meshes.into_iter().try_fold(Mesh::empty(), |mut acc, mesh| {
            acc.merge(&mesh)?;
            Ok(acc)
        })
    }

    /// Exports vertices as f32 array for the host.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            result.push(v.x as f32);
            result.push(v.y as f32);
            result.push(v.z as f32);
        }
        result
    }

    /// Exports triangle indices as u32 array for the host.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangle_indices().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_tetrahedron() -> Mesh {
        Mesh::from_parts(
            vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z],
            vec![
                Face::Triangle([0, 2, 1]),
                Face::Triangle([0, 1, 3]),
                Face::Triangle([0, 3, 2]),
                Face::Triangle([1, 2, 3]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_parts_rejects_empty_vertices() {
        let err = Mesh::from_parts(vec![], vec![]).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { .. }));
    }

    #[test]
    fn test_from_parts_rejects_dangling_index() {
        let err = Mesh::from_parts(vec![DVec3::ZERO], vec![Face::Triangle([0, 1, 2])])
            .unwrap_err();
        assert_eq!(err, MeshError::degenerate_seam(0, 1, 1));
    }

    #[test]
    fn test_from_parts_rejects_nan() {
        let err = Mesh::from_parts(vec![DVec3::new(f64::NAN, 0.0, 0.0)], vec![]).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { .. }));
    }

    #[test]
    fn test_quad_split_diagonal() {
        let mut faces = Vec::new();
        FaceMode::Triangles.push_quad(&mut faces, [4, 5, 6, 7]);
        assert_eq!(
            faces,
            vec![Face::Triangle([4, 5, 6]), Face::Triangle([6, 7, 4])]
        );
        FaceMode::Quads.push_quad(&mut faces, [0, 1, 2, 3]);
        assert_eq!(faces[2], Face::Quad([0, 1, 2, 3]));
    }

    #[test]
    fn test_signed_volume_tetrahedron() {
        let mesh = unit_tetrahedron();
        assert_relative_eq!(mesh.signed_volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mirror_keeps_outward_winding() {
        let mirror = DMat4::from_scale(DVec3::new(-1.0, 1.0, 1.0));
        let mesh = unit_tetrahedron().transformed(&mirror);
        assert_relative_eq!(mesh.signed_volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mesh = unit_tetrahedron().translated(DVec3::new(-1.0, -2.0, -3.0));
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(0.0, -1.0, -2.0));
    }

    #[test]
    fn test_mesh_merge_offsets_indices() {
        let mut a = unit_tetrahedron();
        let b = unit_tetrahedron().translated(DVec3::splat(5.0));
        a.merge(&b).unwrap();
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.face_count(), 8);
        assert_eq!(a.faces()[4], Face::Triangle([4, 6, 5]));
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_join_of_nothing_is_empty() {
        let joined = Mesh::join(Vec::new()).unwrap();
        assert!(joined.is_empty());
    }

    #[test]
    fn test_host_buffers() {
        let mesh = Mesh::from_parts(
            vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
            vec![Face::Quad([0, 1, 2, 3])],
        )
        .unwrap();
        assert_eq!(mesh.vertices_f32().len(), 12);
        assert_eq!(mesh.indices_u32(), vec![0, 1, 2, 2, 3, 0]);
        assert_eq!(mesh.triangulated().face_count(), 2);
    }

    #[test]
    fn test_serde_round_trip() {
        let mesh = unit_tetrahedron();
        let json = serde_json::to_string(&mesh).unwrap();
        let back: Mesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mesh);
    }
}
