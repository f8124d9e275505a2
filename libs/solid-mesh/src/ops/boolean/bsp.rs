//! # BSP Tree
//!
//! Binary space partitioning tree for the csg.js boolean algorithm. Nodes
//! live in a flat arena and refer to their children by index, so every
//! traversal is an explicit work stack.

use std::mem;

use super::plane::Plane;
use super::polygon::{Polygon, SplitBuckets};

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct Node {
    plane: Option<Plane>,
    polygons: Vec<Polygon>,
    front: Option<usize>,
    back: Option<usize>,
}

/// A BSP tree over convex polygons.
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<Node>,
}

impl Default for BspTree {
    fn default() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Front,
    Back,
}

impl BspTree {
    /// Builds a tree from polygons.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut tree = Self::default();
        tree.build(polygons);
        tree
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts polygons into the tree, growing new nodes as needed.
    ///
    /// A node without a plane takes the plane of the first polygon it sees.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut work = vec![(ROOT, polygons)];
        while let Some((idx, polygons)) = work.pop() {
            let Some(first) = polygons.first() else {
                continue;
            };
            let plane = *self.nodes[idx].plane.get_or_insert(*first.plane());

            let mut out = SplitBuckets::default();
            for polygon in polygons {
                polygon.split(&plane, &mut out);
            }
            let node = &mut self.nodes[idx];
            node.polygons.append(&mut out.coplanar_front);
            node.polygons.append(&mut out.coplanar_back);

            if !out.front.is_empty() {
                let child = self.child(idx, Side::Front);
                work.push((child, out.front));
            }
            if !out.back.is_empty() {
                let child = self.child(idx, Side::Back);
                work.push((child, out.back));
            }
        }
    }

    fn child(&mut self, idx: usize, side: Side) -> usize {
        let existing = match side {
            Side::Front => self.nodes[idx].front,
            Side::Back => self.nodes[idx].back,
        };
        if let Some(child) = existing {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(Node::default());
        match side {
            Side::Front => self.nodes[idx].front = Some(child),
            Side::Back => self.nodes[idx].back = Some(child),
        }
        child
    }

    /// Converts solid space to empty space and empty space to solid space.
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            for polygon in &mut node.polygons {
                polygon.flip();
            }
            node.plane = node.plane.map(|p| p.flip());
            mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Removes the parts of `polygons` that lie inside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut kept = Vec::new();
        let mut work = vec![(ROOT, polygons)];
        while let Some((idx, polygons)) = work.pop() {
            let node = &self.nodes[idx];
            let Some(plane) = node.plane else {
                kept.extend(polygons);
                continue;
            };

            let mut out = SplitBuckets::default();
            for polygon in polygons {
                polygon.split(&plane, &mut out);
            }
            let mut front = out.front;
            front.append(&mut out.coplanar_front);
            let mut back = out.back;
            back.append(&mut out.coplanar_back);

            match node.front {
                Some(child) => work.push((child, front)),
                None => kept.extend(front),
            }
            // Polygons behind a leaf are inside the solid
            if let Some(child) = node.back {
                work.push((child, back));
            }
        }
        kept
    }

    /// Removes every polygon of this tree that lies inside `other`.
    pub fn clip_to(&mut self, other: &BspTree) {
        for node in &mut self.nodes {
            let polygons = mem::take(&mut node.polygons);
            node.polygons = other.clip_polygons(polygons);
        }
    }

    /// Collects every polygon stored in the tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        self.nodes
            .iter()
            .flat_map(|node| node.polygons.iter().cloned())
            .collect()
    }
}
