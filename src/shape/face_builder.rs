use crate::math::{Point, Real, UnitVector, Uv};
use crate::shape::{Face, FaceVertex, MeshError, Tessellation, TessellationPrimitive};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::HashablePartialEq;
use alloc::vec::Vec;

/// Incremental construction of a [`Face`].
///
/// Vertices are de-duplicated on their mesh coordinate index and texture
/// coordinates. Independent triangles and quads are accumulated into a single
/// triangle list and a single quad list. A builder can be reused after
/// [`FaceBuilder::build`] by calling [`FaceBuilder::reset`], keeping its allocations.
#[derive(Clone, Debug, Default)]
pub struct FaceBuilder {
    normal: Option<UnitVector<Real>>,
    vertices: Vec<FaceVertex>,
    vertex_lookup: HashMap<HashablePartialEq<(u32, Uv)>, u32>,
    outlines: Vec<Vec<u32>>,
    triangles: Vec<u32>,
    quads: Vec<u32>,
    primitives: Vec<TessellationPrimitive>,
}

impl FaceBuilder {
    /// Creates an empty face builder without normal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets this builder and sets the normal of the next face built.
    ///
    /// If `normal` is `None`, it will be derived from the face geometry.
    pub fn initialize(&mut self, normal: Option<UnitVector<Real>>) {
        self.reset();
        self.normal = normal;
    }

    /// Removes every vertex, outline and primitive from this builder.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.vertex_lookup.clear();
        self.outlines.clear();
        self.triangles.clear();
        self.quads.clear();
        self.primitives.clear();
    }

    /// Is there nothing to build a face from?
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
            && self.quads.is_empty()
            && self.primitives.is_empty()
            && self.outlines.is_empty()
    }

    /// The vertices added so far.
    pub fn vertices(&self) -> &[FaceVertex] {
        &self.vertices
    }

    /// The index of the face vertex with the given coordinate index and texture
    /// coordinates, adding it if needed.
    pub fn vertex_index(&mut self, point: Point<Real>, vertex_index: u32, uv: Uv) -> u32 {
        match self
            .vertex_lookup
            .entry(HashablePartialEq::new((vertex_index, uv)))
        {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = self.vertices.len() as u32;
                self.vertices
                    .push(FaceVertex::new(point, vertex_index).with_uv(uv));
                let _ = e.insert(id);
                id
            }
        }
    }

    /// Adds a triangle to the face.
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.extend_from_slice(&[a, b, c]);
    }

    /// Adds a quad to the face.
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.quads.extend_from_slice(&[a, b, c, d]);
    }

    /// Adds a tessellation primitive to the face.
    ///
    /// Triangle and quad lists are merged with the independent triangles and quads.
    pub fn add_primitive(&mut self, primitive: TessellationPrimitive) {
        match primitive {
            TessellationPrimitive::TriangleList(v) => self.triangles.extend(v),
            TessellationPrimitive::QuadList(v) => self.quads.extend(v),
            other => self.primitives.push(other),
        }
    }

    /// Adds an outline to the face.
    pub fn add_outline(&mut self, outline: Vec<u32>) {
        self.outlines.push(outline);
    }

    /// Builds the face.
    ///
    /// With an explicit normal, the plane distance of the face is computed from its first vertex.
    pub fn build(&self) -> Result<Face, MeshError> {
        if self.is_empty() {
            return Err(MeshError::EmptyFace);
        }

        let mut primitives = self.primitives.clone();
        if !self.triangles.is_empty() {
            primitives.push(TessellationPrimitive::TriangleList(self.triangles.clone()));
        }
        if !self.quads.is_empty() {
            primitives.push(TessellationPrimitive::QuadList(self.quads.clone()));
        }

        let tessellation = Tessellation::new(self.outlines.clone(), primitives);

        match self.normal {
            Some(normal) => Face::with_normal(normal, self.vertices.clone(), tessellation),
            None => Face::new(self.vertices.clone(), tessellation),
        }
    }
}
