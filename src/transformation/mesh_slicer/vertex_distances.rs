use super::CuttingPlane;
use crate::math::Real;
use crate::shape::Mesh;
use alloc::vec::Vec;

/// The side of a cutting plane a point lies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    /// The side the plane normal points to, including the plane itself.
    Top,
    /// The other side.
    Bottom,
}

impl PlaneSide {
    /// The side of a point with the given signed distance to the plane.
    ///
    /// The test is exact: only negative distances are on the bottom side.
    #[inline]
    pub fn of(distance: Real) -> Self {
        if distance < 0.0 {
            Self::Bottom
        } else {
            Self::Top
        }
    }
}

/// Which sides of a cutting plane a set of points occupies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SideSet {
    /// Is at least one point on the top side?
    pub top: bool,
    /// Is at least one point on the bottom side?
    pub bottom: bool,
}

impl SideSet {
    /// Marks `side` as occupied.
    #[inline]
    pub fn insert(&mut self, side: PlaneSide) {
        match side {
            PlaneSide::Top => self.top = true,
            PlaneSide::Bottom => self.bottom = true,
        }
    }

    /// Are both sides occupied?
    #[inline]
    pub fn is_straddling(&self) -> bool {
        self.top && self.bottom
    }

    /// The only side occupied, if exactly one is.
    pub fn single(&self) -> Option<PlaneSide> {
        match (self.top, self.bottom) {
            (true, false) => Some(PlaneSide::Top),
            (false, true) => Some(PlaneSide::Bottom),
            _ => None,
        }
    }
}

/// Signed distances from every vertex of a mesh to a cutting plane.
#[derive(Clone, Debug, Default)]
pub struct VertexDistances {
    distances: Vec<Real>,
    sides: SideSet,
}

impl VertexDistances {
    /// Computes the distances of all the vertices of `mesh`, reusing this buffer.
    pub fn compute(&mut self, mesh: &Mesh, plane: &CuttingPlane) {
        self.distances.clear();
        self.sides = SideSet::default();

        for pt in mesh.vertices() {
            let d = plane.signed_distance(pt);
            self.distances.push(d);
            self.sides.insert(PlaneSide::of(d));
        }
    }

    /// The signed distance of the mesh vertex with the given coordinate index.
    #[inline]
    pub fn distance(&self, vertex_index: u32) -> Real {
        self.distances[vertex_index as usize]
    }

    /// The side of the mesh vertex with the given coordinate index.
    #[inline]
    pub fn side(&self, vertex_index: u32) -> PlaneSide {
        PlaneSide::of(self.distance(vertex_index))
    }

    /// The sides occupied by the whole mesh.
    #[inline]
    pub fn sides(&self) -> SideSet {
        self.sides
    }

    /// The sides occupied by the given vertices.
    pub fn classify(&self, vertex_indices: impl IntoIterator<Item = u32>) -> SideSet {
        let mut sides = SideSet::default();
        for i in vertex_indices {
            sides.insert(self.side(i));
            if sides.is_straddling() {
                break;
            }
        }
        sides
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{Point, Vector};
    use alloc::vec;

    #[test]
    fn points_on_the_plane_are_on_top() {
        assert_eq!(PlaneSide::of(0.0), PlaneSide::Top);
        assert_eq!(PlaneSide::of(-0.0), PlaneSide::Top);
        assert_eq!(PlaneSide::of(-1.0e-30), PlaneSide::Bottom);
    }

    #[test]
    fn mesh_classification() {
        let mesh = Mesh::with_vertices(vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.0, 0.0, -1.0),
        ]);
        let plane = CuttingPlane::new(Vector::z(), 0.0).unwrap();
        let mut distances = VertexDistances::default();
        distances.compute(&mesh, &plane);

        assert!(distances.sides().is_straddling());
        assert_eq!(distances.distance(2), -1.0);
        assert_eq!(distances.classify([0, 1]).single(), Some(PlaneSide::Top));
        assert_eq!(distances.classify([2]).single(), Some(PlaneSide::Bottom));
        assert!(distances.classify([1, 2]).is_straddling());
    }
}
