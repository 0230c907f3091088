use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::{Appearance, Face, FaceGroup, MeshError};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::HashablePartialEq;
use alloc::sync::Arc;
use alloc::vec::Vec;
use num::Zero;

/// A polyhedral mesh made of planar faces grouped by appearance.
///
/// The mesh owns a table of vertex coordinates shared by its faces. Face
/// vertices refer to it through [`FaceVertex::vertex_index`](crate::shape::FaceVertex::vertex_index).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Mesh {
    vertices: Vec<Point<Real>>,
    face_groups: Vec<FaceGroup>,
    // Lookup table for `vertex_index`. Only `vertices[..indexed]` are registered.
    #[cfg_attr(feature = "serde-serialize", serde(skip))]
    vertex_lookup: HashMap<HashablePartialEq<Point<Real>>, u32>,
    #[cfg_attr(feature = "serde-serialize", serde(skip))]
    indexed: usize,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh without faces, with the given vertex table.
    pub fn with_vertices(vertices: Vec<Point<Real>>) -> Self {
        Self {
            vertices,
            ..Self::default()
        }
    }

    /// The vertex coordinates table of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The face groups of this mesh.
    #[inline]
    pub fn face_groups(&self) -> &[FaceGroup] {
        &self.face_groups
    }

    /// Iterates through all the faces of this mesh.
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.face_groups.iter().flat_map(|g| g.faces().iter())
    }

    /// The number of faces of this mesh.
    pub fn face_count(&self) -> usize {
        self.face_groups.iter().map(|g| g.faces().len()).sum()
    }

    /// Does this mesh have no face at all?
    pub fn is_empty(&self) -> bool {
        self.face_count() == 0
    }

    /// The index of the vertex with exactly the coordinates of `point`, adding it if needed.
    pub fn vertex_index(&mut self, point: Point<Real>) -> u32 {
        self.index_vertices();

        match self.vertex_lookup.entry(HashablePartialEq::new(point)) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = self.vertices.len() as u32;
                self.vertices.push(point);
                self.indexed += 1;
                let _ = e.insert(id);
                id
            }
        }
    }

    /// Appends a vertex to the vertex table, even if another one has the same coordinates.
    pub fn add_vertex(&mut self, point: Point<Real>) -> u32 {
        let id = self.vertices.len() as u32;
        self.vertices.push(point);
        id
    }

    fn index_vertices(&mut self) {
        for (i, pt) in self.vertices.iter().enumerate().skip(self.indexed) {
            let _ = self
                .vertex_lookup
                .entry(HashablePartialEq::new(*pt))
                .or_insert(i as u32);
        }

        self.indexed = self.vertices.len();
    }

    /// The face group with the given appearance and flags, if it exists.
    pub fn face_group(
        &self,
        appearance: Option<&Arc<Appearance>>,
        smooth: bool,
        two_sided: bool,
    ) -> Option<&FaceGroup> {
        self.face_groups
            .iter()
            .find(|g| g.matches(appearance, smooth, two_sided))
    }

    /// The index of the face group with the given appearance and flags, creating it if needed.
    pub(crate) fn face_group_index(
        &mut self,
        appearance: Option<&Arc<Appearance>>,
        smooth: bool,
        two_sided: bool,
    ) -> usize {
        if let Some(id) = self
            .face_groups
            .iter()
            .position(|g| g.matches(appearance, smooth, two_sided))
        {
            return id;
        }

        self.face_groups
            .push(FaceGroup::new(appearance.cloned(), smooth, two_sided));
        self.face_groups.len() - 1
    }

    /// Adds a face to the group with the given appearance and flags.
    ///
    /// Fails if a face vertex refers to a coordinate outside of the vertex table.
    pub fn add_face(
        &mut self,
        appearance: Option<Arc<Appearance>>,
        smooth: bool,
        two_sided: bool,
        face: Face,
    ) -> Result<(), MeshError> {
        let len = self.vertices.len();
        if let Some(v) = face
            .vertices()
            .iter()
            .find(|v| v.vertex_index as usize >= len)
        {
            return Err(MeshError::CoordinateOutOfBounds {
                index: v.vertex_index,
                len,
            });
        }

        let group = self.face_group_index(appearance.as_ref(), smooth, two_sided);
        self.push_face(group, face);
        Ok(())
    }

    pub(crate) fn push_face(&mut self, group: usize, face: Face) {
        self.face_groups[group].push(face)
    }

    /// Iterates through every triangle of every face of this mesh.
    pub fn triangles(&self) -> impl Iterator<Item = [Point<Real>; 3]> + '_ {
        self.faces().flat_map(|face| {
            face.tessellation()
                .triangles()
                .map(move |tri| tri.map(|i| face.vertices()[i as usize].point))
        })
    }

    /// The number of triangles of this mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces().map(|f| f.tessellation().triangle_count()).sum()
    }

    /// The bounding box of the vertices used by the faces of this mesh.
    ///
    /// Returns `None` if the mesh has no face.
    pub fn aabb(&self) -> Option<Aabb> {
        let aabb = Aabb::from_points(
            self.faces()
                .flat_map(|f| f.vertices().iter().map(|v| v.point)),
        );
        aabb.is_valid().then_some(aabb)
    }

    /// The total area of the triangles of this mesh.
    pub fn surface_area(&self) -> Real {
        self.triangles().fold(Real::zero(), |acc, [a, b, c]| {
            acc + (b - a).cross(&(c - a)).norm() * 0.5
        })
    }

    /// The signed volume enclosed by the triangles of this mesh.
    ///
    /// This is only meaningful if the mesh is closed. The volume is positive if
    /// the triangles are counter-clockwise seen from outside.
    pub fn signed_volume(&self) -> Real {
        self.triangles().fold(Real::zero(), |acc, [a, b, c]| {
            acc + a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
        })
    }
}
