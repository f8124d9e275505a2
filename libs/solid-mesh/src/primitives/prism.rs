//! # Rectangular Prism Primitive
//!
//! Six independently tessellated planar grids. Each pair of opposite sides
//! is one grid plus a copy rotated 180° about the prism centre.

use glam::DVec3;
use tracing::{debug, info, instrument};

use super::{require_count, require_indexable, require_positive};
use crate::error::MeshResult;
use crate::mesh::{Face, FaceMode, Mesh};
use crate::transform::Transformation;

/// One side grid: `(u_faces + 1) x (v_faces + 1)` vertices, `u`-major.
struct SideGrid {
    vertices: Vec<DVec3>,
    quads: Vec<[u32; 4]>,
}

impl SideGrid {
    fn new<P, Q>(u_faces: u32, v_faces: u32, point: P, quad: Q) -> Self
    where
        P: Fn(u32, u32) -> DVec3,
        Q: Fn(u32, u32, u32) -> [u32; 4],
    {
        let stride = v_faces + 1;
        let vertices = (0..=u_faces)
            .flat_map(|u| (0..=v_faces).map(move |v| (u, v)))
            .map(|(u, v)| point(u, v))
            .collect();
        let quads = (0..u_faces)
            .flat_map(|u| (0..v_faces).map(move |v| (u, v)))
            .map(|(u, v)| quad(u, v, stride))
            .collect();
        Self { vertices, quads }
    }

    /// Appends this grid and its 180° copy about `axis`.
    fn push_pair(
        &self,
        axis: DVec3,
        mode: FaceMode,
        vertices: &mut Vec<DVec3>,
        faces: &mut Vec<Face>,
    ) -> MeshResult<()> {
        let flip = Transformation::rotation_deg(180.0, axis, DVec3::ZERO)?;
        for side in [self.vertices.clone(), flip.apply_points(&self.vertices)] {
            let offset = vertices.len() as u32;
            vertices.extend(side);
            for quad in &self.quads {
                mode.push_quad(faces, quad.map(|i| i + offset));
            }
        }
        Ok(())
    }
}

/// Creates a rectangular prism with tessellated sides.
///
/// # Arguments
///
/// * `size` - Edge lengths along X, Y and Z
/// * `faces` - Faces along X, Y and Z for every side touching that axis
/// * `center` - Centre of the prism
/// * `mode` - Quads, or quads split into triangles
///
/// Sides do not share edge vertices.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::primitives::create_mesh_rectangular_prism;
/// use solid_mesh::FaceMode;
///
/// let mesh = create_mesh_rectangular_prism(
///     DVec3::new(1.0, 2.0, 3.0), [1, 2, 3], DVec3::ZERO, FaceMode::Quads,
/// ).unwrap();
/// assert_eq!(mesh.face_count(), 2 * (1 * 2 + 1 * 3 + 2 * 3));
/// assert!((mesh.signed_volume() - 6.0).abs() < 1e-9);
/// ```
#[instrument(level = "debug")]
pub fn create_mesh_rectangular_prism(
    size: DVec3,
    faces: [u32; 3],
    center: DVec3,
    mode: FaceMode,
) -> MeshResult<Mesh> {
    require_positive("prism x size", size.x)?;
    require_positive("prism y size", size.y)?;
    require_positive("prism z size", size.z)?;
    let [nx, ny, nz] = faces;
    require_count("prism x faces", nx, 1)?;
    require_count("prism y faces", ny, 1)?;
    require_count("prism z faces", nz, 1)?;

    let grid = |u: u32, v: u32| u.checked_add(1)?.checked_mul(v.checked_add(1)?);
    let vertex_total = require_indexable(
        "prism",
        grid(nx, ny)
            .zip(grid(nx, nz))
            .zip(grid(ny, nz))
            .and_then(|((a, b), c)| a.checked_add(b)?.checked_add(c)?.checked_mul(2)),
    )?;

    let start = -size / 2.0;
    let inc = size / DVec3::new(nx as f64, ny as f64, nz as f64);
    let half = size / 2.0;

    let top = SideGrid::new(
        nx,
        ny,
        |xi, yi| DVec3::new(start.x + xi as f64 * inc.x, start.y + yi as f64 * inc.y, half.z),
        |xi, yi, s| [xi * s + yi, (xi + 1) * s + yi, (xi + 1) * s + yi + 1, xi * s + yi + 1],
    );
    let front = SideGrid::new(
        nx,
        nz,
        |xi, zi| DVec3::new(start.x + xi as f64 * inc.x, half.y, start.z + zi as f64 * inc.z),
        |xi, zi, s| [xi * s + zi + 1, (xi + 1) * s + zi + 1, (xi + 1) * s + zi, xi * s + zi],
    );
    let right = SideGrid::new(
        ny,
        nz,
        |yi, zi| DVec3::new(half.x, start.y + yi as f64 * inc.y, start.z + zi as f64 * inc.z),
        |yi, zi, s| [yi * s + zi, (yi + 1) * s + zi, (yi + 1) * s + zi + 1, yi * s + zi + 1],
    );

    let mut vertices = Vec::with_capacity(vertex_total as usize);
    let mut face_list = Vec::new();
    top.push_pair(DVec3::X, mode, &mut vertices, &mut face_list)?;
    front.push_pair(DVec3::Z, mode, &mut vertices, &mut face_list)?;
    right.push_pair(DVec3::Y, mode, &mut vertices, &mut face_list)?;
    debug!(vertex_total, "tessellated prism sides");

    let mut mesh = Mesh::from_parts(vertices, face_list)?;
    mesh.translate(center);
    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "built rectangular prism mesh"
    );
    Ok(mesh)
}
