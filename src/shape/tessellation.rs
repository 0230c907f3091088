use crate::shape::MeshError;
use alloc::vec::Vec;

/// A primitive of a face tessellation.
///
/// Each primitive references vertices of its face by their index in
/// [`Face::vertices`](crate::shape::Face::vertices). Triangles are
/// counter-clockwise when seen from the side the face normal points to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum TessellationPrimitive {
    /// Independent triangles, three indices each.
    TriangleList(Vec<u32>),
    /// A strip of triangles where each index after the first two adds a triangle.
    TriangleStrip(Vec<u32>),
    /// A fan of triangles all sharing the first vertex.
    TriangleFan(Vec<u32>),
    /// Independent quads, four indices each.
    QuadList(Vec<u32>),
    /// A strip of quads where each pair of indices after the first two adds a quad.
    QuadStrip(Vec<u32>),
}

impl TessellationPrimitive {
    /// The face vertex indices of this primitive.
    pub fn vertices(&self) -> &[u32] {
        match self {
            Self::TriangleList(v)
            | Self::TriangleStrip(v)
            | Self::TriangleFan(v)
            | Self::QuadList(v)
            | Self::QuadStrip(v) => v,
        }
    }

    /// A human readable name for the kind of this primitive.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::TriangleList(_) => "triangle list",
            Self::TriangleStrip(_) => "triangle strip",
            Self::TriangleFan(_) => "triangle fan",
            Self::QuadList(_) => "quad list",
            Self::QuadStrip(_) => "quad strip",
        }
    }

    /// Builds a primitive of the same kind with every index passed through `f`.
    pub fn map_vertices(&self, f: impl FnMut(u32) -> u32) -> Self {
        let mapped = self.vertices().iter().copied().map(f).collect();

        match self {
            Self::TriangleList(_) => Self::TriangleList(mapped),
            Self::TriangleStrip(_) => Self::TriangleStrip(mapped),
            Self::TriangleFan(_) => Self::TriangleFan(mapped),
            Self::QuadList(_) => Self::QuadList(mapped),
            Self::QuadStrip(_) => Self::QuadStrip(mapped),
        }
    }

    /// Checks that the number of indices is compatible with the kind of this primitive.
    pub fn validate(&self) -> Result<(), MeshError> {
        let len = self.vertices().len();
        let valid = match self {
            Self::TriangleList(_) => len % 3 == 0,
            Self::TriangleStrip(_) | Self::TriangleFan(_) => len >= 3,
            Self::QuadList(_) => len % 4 == 0,
            Self::QuadStrip(_) => len >= 4 && len % 2 == 0,
        };

        if valid {
            Ok(())
        } else {
            Err(MeshError::InvalidPrimitive {
                kind: self.kind_name(),
                len,
            })
        }
    }

    /// The number of triangles this primitive expands to.
    pub fn triangle_count(&self) -> usize {
        let len = self.vertices().len();
        match self {
            Self::TriangleList(_) => len / 3,
            Self::TriangleStrip(_) | Self::TriangleFan(_) => len.saturating_sub(2),
            Self::QuadList(_) => (len / 4) * 2,
            Self::QuadStrip(_) => (len.saturating_sub(2) / 2) * 2,
        }
    }

    /// The `i`-th triangle of this primitive.
    ///
    /// Strips alternate their winding so every triangle keeps the orientation
    /// of the first one. Quads are split along the diagonal starting at their
    /// first vertex.
    ///
    /// # Panics
    /// Panics if `i >= self.triangle_count()`.
    pub fn triangle(&self, i: usize) -> [u32; 3] {
        let v = self.vertices();
        match self {
            Self::TriangleList(_) => [v[i * 3], v[i * 3 + 1], v[i * 3 + 2]],
            Self::TriangleStrip(_) => {
                if i % 2 == 0 {
                    [v[i], v[i + 1], v[i + 2]]
                } else {
                    [v[i + 1], v[i], v[i + 2]]
                }
            }
            Self::TriangleFan(_) => [v[0], v[i + 1], v[i + 2]],
            Self::QuadList(_) => {
                let q = i / 2 * 4;
                split_quad([v[q], v[q + 1], v[q + 2], v[q + 3]], i % 2)
            }
            Self::QuadStrip(_) => {
                let q = i / 2 * 2;
                split_quad([v[q], v[q + 1], v[q + 3], v[q + 2]], i % 2)
            }
        }
    }

    /// Iterates through the triangles of this primitive.
    pub fn triangles(&self) -> TriangleIter<'_> {
        TriangleIter {
            primitive: self,
            curr: 0,
            count: self.triangle_count(),
        }
    }
}

fn split_quad(quad: [u32; 4], half: usize) -> [u32; 3] {
    if half == 0 {
        [quad[0], quad[1], quad[2]]
    } else {
        [quad[0], quad[2], quad[3]]
    }
}

/// Iterator through the triangles of a [`TessellationPrimitive`].
pub struct TriangleIter<'a> {
    primitive: &'a TessellationPrimitive,
    curr: usize,
    count: usize,
}

impl Iterator for TriangleIter<'_> {
    type Item = [u32; 3];

    fn next(&mut self) -> Option<[u32; 3]> {
        if self.curr < self.count {
            let tri = self.primitive.triangle(self.curr);
            self.curr += 1;
            Some(tri)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.curr;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TriangleIter<'_> {}

/// The tessellation of a face: its boundary outlines and its triangulated primitives.
///
/// An outline is a sequence of face vertex indices. It is closed when its
/// last index equals its first one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Tessellation {
    /// The boundary outlines.
    pub outlines: Vec<Vec<u32>>,
    /// The triangulated primitives.
    pub primitives: Vec<TessellationPrimitive>,
}

impl Tessellation {
    /// Creates a tessellation from its outlines and primitives.
    pub fn new(outlines: Vec<Vec<u32>>, primitives: Vec<TessellationPrimitive>) -> Self {
        Self {
            outlines,
            primitives,
        }
    }

    /// The tessellation of a convex polygon with `vertex_count` vertices: one closed
    /// outline through all the vertices and a triangle fan.
    pub fn convex_polygon(vertex_count: u32) -> Self {
        let mut outline: Vec<u32> = (0..vertex_count).collect();
        if vertex_count > 0 {
            outline.push(0);
        }

        let primitives = if vertex_count >= 3 {
            alloc::vec![TessellationPrimitive::TriangleFan((0..vertex_count).collect())]
        } else {
            Vec::new()
        };

        Self::new(alloc::vec![outline], primitives)
    }

    /// Tests if an outline is closed.
    pub fn is_closed_outline(outline: &[u32]) -> bool {
        outline.len() > 1 && outline.first() == outline.last()
    }

    /// Iterates through the triangles of all the primitives.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.primitives.iter().flat_map(|p| p.triangles())
    }

    /// The total number of triangles of all the primitives.
    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(|p| p.triangle_count()).sum()
    }

    /// Checks every primitive and outline, and that all indices are smaller than `vertex_count`.
    pub fn validate(&self, vertex_count: usize) -> Result<(), MeshError> {
        for primitive in &self.primitives {
            primitive.validate()?;
            check_indices(primitive.vertices(), vertex_count)?;
        }

        for outline in &self.outlines {
            if outline.len() < 2 {
                return Err(MeshError::InvalidOutline { len: outline.len() });
            }
            check_indices(outline, vertex_count)?;
        }

        Ok(())
    }
}

fn check_indices(indices: &[u32], len: usize) -> Result<(), MeshError> {
    match indices.iter().find(|i| **i as usize >= len) {
        Some(index) => Err(MeshError::FaceVertexOutOfBounds { index: *index, len }),
        None => Ok(()),
    }
}
