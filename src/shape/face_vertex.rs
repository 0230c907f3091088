use crate::math::{Point, Real, Uv, Vector};

/// A vertex of a [`Face`](crate::shape::Face).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FaceVertex {
    /// The position of this vertex.
    pub point: Point<Real>,
    /// The shading normal of this vertex, if it differs from the face normal.
    pub normal: Option<Vector<Real>>,
    /// Index of `point` in the vertex table of the mesh owning the face.
    pub vertex_index: u32,
    /// The texture coordinates of this vertex.
    pub uv: Uv,
}

impl FaceVertex {
    /// Creates a face vertex with zero texture coordinates and no explicit normal.
    pub fn new(point: Point<Real>, vertex_index: u32) -> Self {
        Self {
            point,
            normal: None,
            vertex_index,
            uv: Uv::origin(),
        }
    }

    /// Sets the texture coordinates of this vertex.
    pub fn with_uv(mut self, uv: Uv) -> Self {
        self.uv = uv;
        self
    }

    /// Sets the shading normal of this vertex.
    pub fn with_normal(mut self, normal: Vector<Real>) -> Self {
        self.normal = Some(normal);
        self
    }
}
