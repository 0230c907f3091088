use crate::math::{Real, UnitVector, Vector};
use crate::shape::{Appearance, FaceVertex, MeshError, Tessellation, TessellationPrimitive};
use crate::utils;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// A planar polygonal face of a mesh.
///
/// A face owns its vertices and a [`Tessellation`] referencing them by
/// index. Its triangles are counter-clockwise when seen from the side its
/// normal points to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Face {
    normal: UnitVector<Real>,
    distance: Real,
    vertices: Vec<FaceVertex>,
    tessellation: Tessellation,
}

impl Face {
    /// Creates a face, deriving its normal from its geometry.
    ///
    /// The normal is the area-weighted sum of the tessellation triangle
    /// normals, or Newell's normal of the vertex loop if the tessellation has
    /// no triangles.
    pub fn new(vertices: Vec<FaceVertex>, tessellation: Tessellation) -> Result<Self, MeshError> {
        if vertices.is_empty() {
            return Err(MeshError::EmptyFace);
        }

        tessellation.validate(vertices.len())?;

        let normal = if tessellation.triangle_count() > 0 {
            let mut sum = Vector::zeros();
            for [a, b, c] in tessellation.triangles() {
                let pa = vertices[a as usize].point;
                let pb = vertices[b as usize].point;
                let pc = vertices[c as usize].point;
                sum += (pb - pa).cross(&(pc - pa));
            }
            UnitVector::try_new(sum, crate::math::DEFAULT_EPSILON)
        } else {
            utils::newell_face_normal(vertices.iter().map(|v| &v.point))
        };

        let normal = normal.ok_or(MeshError::DegenerateFace)?;
        Ok(Self::with_normal_unchecked(normal, vertices, tessellation))
    }

    /// Creates a face with an explicit normal.
    ///
    /// The plane distance is computed from the first vertex.
    pub fn with_normal(
        normal: UnitVector<Real>,
        vertices: Vec<FaceVertex>,
        tessellation: Tessellation,
    ) -> Result<Self, MeshError> {
        if vertices.is_empty() {
            return Err(MeshError::EmptyFace);
        }

        tessellation.validate(vertices.len())?;
        Ok(Self::with_normal_unchecked(normal, vertices, tessellation))
    }

    /// Creates a convex polygonal face from its counter-clockwise vertex loop.
    pub fn convex_polygon(vertices: Vec<FaceVertex>) -> Result<Self, MeshError> {
        let tessellation = Tessellation::convex_polygon(vertices.len() as u32);
        Self::new(vertices, tessellation)
    }

    fn with_normal_unchecked(
        normal: UnitVector<Real>,
        vertices: Vec<FaceVertex>,
        tessellation: Tessellation,
    ) -> Self {
        let distance = normal.dot(&vertices[0].point.coords);
        Self {
            normal,
            distance,
            vertices,
            tessellation,
        }
    }

    /// Builds a copy of this face with the same tessellation but different vertices.
    ///
    /// `vertices` must have the same length as `self.vertices()`.
    pub(crate) fn with_vertices(&self, vertices: Vec<FaceVertex>) -> Self {
        assert_eq!(vertices.len(), self.vertices.len());
        Self {
            normal: self.normal,
            distance: self.distance,
            vertices,
            tessellation: self.tessellation.clone(),
        }
    }

    /// The unit normal of this face.
    #[inline]
    pub fn normal(&self) -> UnitVector<Real> {
        self.normal
    }

    /// The signed distance from the origin to the plane of this face, along its normal.
    #[inline]
    pub fn distance(&self) -> Real {
        self.distance
    }

    /// The vertices of this face.
    #[inline]
    pub fn vertices(&self) -> &[FaceVertex] {
        &self.vertices
    }

    /// The shading normal of the `i`-th vertex: its own normal if set, the face normal otherwise.
    pub fn vertex_normal(&self, i: usize) -> Vector<Real> {
        self.vertices[i]
            .normal
            .unwrap_or_else(|| self.normal.into_inner())
    }

    /// The tessellation of this face.
    #[inline]
    pub fn tessellation(&self) -> &Tessellation {
        &self.tessellation
    }

    /// The outlines of this face.
    #[inline]
    pub fn outlines(&self) -> &[Vec<u32>] {
        &self.tessellation.outlines
    }

    /// The tessellation primitives of this face.
    #[inline]
    pub fn primitives(&self) -> &[TessellationPrimitive] {
        &self.tessellation.primitives
    }
}

/// A set of faces sharing the same appearance and shading flags.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FaceGroup {
    /// The appearance of the faces of this group.
    pub appearance: Option<Arc<Appearance>>,
    /// Whether normals are smoothed across the faces of this group.
    pub smooth: bool,
    /// Whether the faces of this group are visible from both sides.
    pub two_sided: bool,
    faces: Vec<Face>,
}

impl FaceGroup {
    /// Creates an empty face group.
    pub fn new(appearance: Option<Arc<Appearance>>, smooth: bool, two_sided: bool) -> Self {
        Self {
            appearance,
            smooth,
            two_sided,
            faces: Vec::new(),
        }
    }

    /// Tests if this group has the given appearance and flags.
    pub fn matches(
        &self,
        appearance: Option<&Arc<Appearance>>,
        smooth: bool,
        two_sided: bool,
    ) -> bool {
        Appearance::same(self.appearance.as_ref(), appearance)
            && self.smooth == smooth
            && self.two_sided == two_sided
    }

    /// The faces of this group.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub(crate) fn push(&mut self, face: Face) {
        self.faces.push(face)
    }
}
