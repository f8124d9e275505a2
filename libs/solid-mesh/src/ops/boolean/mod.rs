//! # Boolean Operations
//!
//! CSG union, difference and intersection using BSP trees (csg.js algorithm).
//!
//! ## Algorithm
//!
//! Each operand is turned into convex polygons and a BSP tree. Polygons of
//! one tree are clipped against the other tree, inverting trees to select
//! the inside or outside, and the survivors are rebuilt into a mesh.

pub mod bsp;
pub mod plane;
pub mod polygon;


use std::collections::HashMap;

use config::constants::VERTEX_MERGE_EPSILON;
use glam::DVec3;

use crate::error::MeshResult;
use crate::mesh::{Face, Mesh};
use bsp::BspTree;
use polygon::Polygon;

/// Converts a mesh into convex polygons, dropping zero-area triangles.
pub fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    let vertices = mesh.vertices();
    mesh.triangle_indices()
        .filter_map(|[a, b, c]| {
            Polygon::from_vertices(vec![
                vertices[a as usize],
                vertices[b as usize],
                vertices[c as usize],
            ])
        })
        .collect()
}

/// Fan-triangulates polygons back into a mesh, sharing identical vertices.
///
/// No surviving polygons gives an empty mesh.
pub fn polygons_to_mesh(polygons: &[Polygon]) -> MeshResult<Mesh> {
    let mut vertices: Vec<DVec3> = Vec::new();
    let mut lookup: HashMap<[u64; 3], u32> = HashMap::new();
    let mut faces = Vec::new();

    let mut index_of = |v: DVec3, vertices: &mut Vec<DVec3>| -> u32 {
        let key = [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()];
        *lookup.entry(key).or_insert_with(|| {
            vertices.push(v);
            (vertices.len() - 1) as u32
        })
    };

    for polygon in polygons {
        let verts = polygon.vertices();
        for i in 1..verts.len().saturating_sub(1) {
            let (a, b, c) = (verts[0], verts[i], verts[i + 1]);
            if (b - a).cross(c - a).length() < VERTEX_MERGE_EPSILON {
                continue;
            }
            let tri = [
                index_of(a, &mut vertices),
                index_of(b, &mut vertices),
                index_of(c, &mut vertices),
            ];
            faces.push(Face::Triangle(tri));
        }
    }

    if faces.is_empty() {
        return Ok(Mesh::empty());
    }
    Mesh::from_parts(vertices, faces)
}

/// Computes the union of two meshes (A ∪ B).
///
/// An operand without polygons leaves the other one unchanged.
pub fn union(a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);
    if polys_a.is_empty() {
        return Ok(b.clone());
    }
    if polys_b.is_empty() {
        return Ok(a.clone());
    }

    let mut a = BspTree::new(polys_a);
    let mut b = BspTree::new(polys_b);
    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.all_polygons());
    polygons_to_mesh(&a.all_polygons())
}

/// Computes the difference of two meshes (A - B).
///
/// Nothing minus anything is empty; A minus nothing is A.
pub fn difference(a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
    let polys_a = mesh_to_polygons(a);
    if polys_a.is_empty() {
        return Ok(Mesh::empty());
    }
    let polys_b = mesh_to_polygons(b);
    if polys_b.is_empty() {
        return Ok(a.clone());
    }

    let mut a = BspTree::new(polys_a);
    let mut b = BspTree::new(polys_b);
    a.invert();
    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.all_polygons());
    a.invert();
    polygons_to_mesh(&a.all_polygons())
}

/// Computes the intersection of two meshes (A ∩ B).
///
/// Empty when either operand has no polygons.
pub fn intersection(a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);
    if polys_a.is_empty() || polys_b.is_empty() {
        return Ok(Mesh::empty());
    }

    let mut a = BspTree::new(polys_a);
    let mut b = BspTree::new(polys_b);
    a.invert();
    b.clip_to(&a);
    b.invert();
    a.clip_to(&b);
    b.clip_to(&a);
    a.build(b.all_polygons());
    a.invert();
    polygons_to_mesh(&a.all_polygons())
}
