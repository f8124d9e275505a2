//! # Ring Indexing
//!
//! Flat vertex indices for ring-major vertex blocks. Sweep builders store
//! rings of equal length back to back; this maps `(ring, position)` to the
//! flat index and wraps the position around the seam.

/// A block of equally sized rings starting at `base`.
///
/// # Example
///
/// ```rust
/// use solid_mesh::ring::RingIndex;
///
/// let rings = RingIndex::new(2, 5);
/// assert_eq!(rings.at(0, 0), 2);
/// assert_eq!(rings.at(1, 4), 11);
/// // position wraps to the start of the same ring
/// assert_eq!(rings.next(1, 4), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingIndex {
    base: u32,
    ring_len: u32,
}

impl RingIndex {
    /// Creates an index helper for rings of `ring_len` vertices from `base`.
    pub fn new(base: u32, ring_len: u32) -> Self {
        Self { base, ring_len }
    }

    /// Number of vertices in each ring.
    #[inline]
    pub fn ring_len(&self) -> u32 {
        self.ring_len
    }

    /// Index of the first vertex of the block.
    #[inline]
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Flat index of `position` (taken modulo the ring length) in `ring`.
    #[inline]
    pub fn at(&self, ring: u32, position: u32) -> u32 {
        self.base + ring * self.ring_len + position % self.ring_len
    }

    /// Flat index of the vertex after `position` in `ring`, wrapping the seam.
    #[inline]
    pub fn next(&self, ring: u32, position: u32) -> u32 {
        self.at(ring, position + 1)
    }

    /// First index past `rings` rings of this block.
    #[inline]
    pub fn end(&self, rings: u32) -> u32 {
        self.base + rings * self.ring_len
    }

    /// Quad between `ring` and `other_ring` at `position`:
    /// `(ring[p], ring[p+1], other[p+1], other[p])`.
    #[inline]
    pub fn quad(&self, ring: u32, other_ring: u32, position: u32) -> [u32; 4] {
        [
            self.at(ring, position),
            self.next(ring, position),
            self.next(other_ring, position),
            self.at(other_ring, position),
        ]
    }
}
