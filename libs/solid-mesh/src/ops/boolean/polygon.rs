//! # BSP Polygons
//!
//! Convex faces carried through the BSP tree, with plane splitting.

use glam::DVec3;

use super::plane::{Classification, Plane};

/// Convex face plus the plane it lies in.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertices in counter-clockwise order seen from the front.
    vertices: Vec<DVec3>,
    plane: Plane,
}

/// Output buckets for [`Polygon::split`].
#[derive(Debug, Default)]
pub struct SplitBuckets {
    pub coplanar_front: Vec<Polygon>,
    pub coplanar_back: Vec<Polygon>,
    pub front: Vec<Polygon>,
    pub back: Vec<Polygon>,
}

impl Polygon {
    /// `None` when the first three vertices are collinear or missing.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self { vertices, plane })
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Turns the polygon inside out.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane = self.plane.flip();
    }

    pub fn classify(&self, plane: &Plane) -> Classification {
        let (mut front, mut back) = (false, false);
        for &v in &self.vertices {
            match plane.classify_point(v) {
                Classification::Front => front = true,
                Classification::Back => back = true,
                _ => {}
            }
        }
        match (front, back) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Sorts this polygon into `buckets` against `plane`.
    ///
    /// Coplanar polygons go to `coplanar_front` when they face the same way
    /// as `plane`. Pieces of a spanning polygon keep this polygon's plane.
    pub fn split(self, plane: &Plane, out: &mut SplitBuckets) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal().dot(plane.normal()) > 0.0 {
                    out.coplanar_front.push(self);
                } else {
                    out.coplanar_back.push(self);
                }
            }
            Classification::Front => out.front.push(self),
            Classification::Back => out.back.push(self),
            Classification::Spanning => {
                let n = self.vertices.len();
                let mut front_verts = Vec::with_capacity(n + 1);
                let mut back_verts = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let vi = self.vertices[i];
                    let vj = self.vertices[(i + 1) % n];
                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);

                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }

                    let crosses = matches!(
                        (ti, tj),
                        (Classification::Front, Classification::Back)
                            | (Classification::Back, Classification::Front)
                    );
                    if crosses {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let t = di / (di - dj);
                        let cut = vi.lerp(vj, t);
                        front_verts.push(cut);
                        back_verts.push(cut);
                    }
                }

                if front_verts.len() >= 3 {
                    out.front.push(Polygon {
                        vertices: front_verts,
                        plane: self.plane,
                    });
                }
                if back_verts.len() >= 3 {
                    out.back.push(Polygon {
                        vertices: back_verts,
                        plane: self.plane,
                    });
                }
            }
        }
    }
}
