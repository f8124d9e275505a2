//! # CSG Engine
//!
//! The boolean collaborator seam. Composites and text layout talk to a
//! [`CsgEngine`]; [`BspEngine`] is the in-crate implementation.

use tracing::{debug, instrument};

use super::boolean;
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

/// Boolean operations on closed meshes.
///
/// A failure is returned as-is to the caller; implementations do not retry.
pub trait CsgEngine {
    /// `a ∪ b`.
    fn union(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh>;

    /// `a - b`.
    fn difference(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh>;

    /// `a ∩ b`.
    fn intersection(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh>;

    /// Thin hollow shell: `outer - inner` where `inner` sits inside `outer`.
    fn shell_difference(&self, outer: &Mesh, inner: &Mesh) -> MeshResult<Mesh> {
        self.difference(outer, inner)
    }

    /// Joins meshes in order without a boolean union.
    fn merge(&self, meshes: Vec<Mesh>) -> MeshResult<Mesh> {
        Mesh::join(meshes)
    }
}

impl<E: CsgEngine + ?Sized> CsgEngine for &E {
    fn union(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
        (**self).union(a, b)
    }

    fn difference(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
        (**self).difference(a, b)
    }

    fn intersection(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
        (**self).intersection(a, b)
    }

    fn shell_difference(&self, outer: &Mesh, inner: &Mesh) -> MeshResult<Mesh> {
        (**self).shell_difference(outer, inner)
    }

    fn merge(&self, meshes: Vec<Mesh>) -> MeshResult<Mesh> {
        (**self).merge(meshes)
    }
}

/// CSG engine backed by the BSP boolean operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct BspEngine;

impl BspEngine {
    #[instrument(level = "debug", skip(self, a, b, op), fields(a_faces = a.face_count(), b_faces = b.face_count()))]
    fn run(
        &self,
        name: &'static str,
        a: &Mesh,
        b: &Mesh,
        op: fn(&Mesh, &Mesh) -> MeshResult<Mesh>,
    ) -> MeshResult<Mesh> {
        let result = op(a, b).map_err(|e| MeshError::collaborator("bsp", format!("{name}: {e}")))?;
        debug!(
            vertices = result.vertex_count(),
            triangles = result.triangle_count(),
            "bsp boolean finished"
        );
        Ok(result)
    }
}

impl CsgEngine for BspEngine {
    fn union(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
        self.run("union", a, b, boolean::union)
    }

    fn difference(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
        self.run("difference", a, b, boolean::difference)
    }

    fn intersection(&self, a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
        self.run("intersection", a, b, boolean::intersection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FaceMode;
    use crate::primitives::create_mesh_rectangular_prism;
    use approx::assert_relative_eq;
    use glam::DVec3;

    fn cube(size: f64) -> Mesh {
        create_mesh_rectangular_prism(DVec3::splat(size), [1, 1, 1], DVec3::ZERO, FaceMode::Quads)
            .unwrap()
    }

    #[test]
    fn test_shell_difference_defaults_to_difference() {
        let engine = BspEngine;
        let shell = engine.shell_difference(&cube(4.0), &cube(2.0)).unwrap();
        assert_relative_eq!(shell.signed_volume(), 56.0, epsilon = 1e-6);
    }

    #[test]
    fn test_merge_joins_in_order() {
        let engine = BspEngine;
        let a = cube(1.0);
        let b = cube(2.0);
        let merged = engine.merge(vec![a.clone(), b.clone()]).unwrap();
        assert_eq!(merged.vertex_count(), a.vertex_count() + b.vertex_count());
        assert_eq!(&merged.vertices()[..a.vertex_count()], a.vertices());
    }

    #[test]
    fn test_engine_through_reference() {
        fn volume_of_union<E: CsgEngine>(engine: E, a: &Mesh, b: &Mesh) -> f64 {
            engine.union(a, b).unwrap().signed_volume()
        }
        let engine = BspEngine;
        let v = volume_of_union(&engine, &cube(2.0), &cube(1.0));
        assert_relative_eq!(v, 8.0, epsilon = 1e-6);
    }
}
