use super::{CapContour, CuttingPlane, IntersectionGraph};
use crate::math::{Point, Point2, Real, UnitVector};
use crate::shape::{Face, FaceVertex, Mesh, MeshError};
use crate::transformation::{CapTessellation, Tessellator, UvGenerator, WindingRule};
use crate::utils;
use alloc::vec::Vec;

/// Turns the intersection graph of a slice into cap faces.
#[derive(Clone, Debug, Default)]
pub(crate) struct CapBuilder {
    node_loops: Vec<Vec<u32>>,
    contours: Vec<CapContour>,
    // Compact numbering of the nodes used by the contours.
    node_to_vertex: Vec<Option<u32>>,
    vertices: Vec<Point2<Real>>,
    origins: Vec<Point<Real>>,
    index_contours: Vec<Vec<u32>>,
}

impl CapBuilder {
    /// The contours found by the last call to `build_contours`.
    pub fn contours(&self) -> &[CapContour] {
        &self.contours
    }

    /// Forgets the contours of the previous slice.
    pub fn clear(&mut self) {
        self.contours.clear();
    }

    /// Extracts the oriented contours of the graph.
    ///
    /// Every contour is first made counter-clockwise, then reversed if it lies
    /// inside an odd number of other contours so that holes are subtracted
    /// with the non-zero winding rule.
    pub fn build_contours(&mut self, graph: &mut IntersectionGraph) {
        self.node_loops.clear();
        self.contours.clear();
        self.vertices.clear();
        self.origins.clear();
        self.index_contours.clear();

        graph.extract_contours(&mut self.node_loops);

        for nodes in &mut self.node_loops {
            let mut contour = CapContour::new(nodes.iter().map(|n| *graph.point(*n)).collect());
            if !contour.is_ccw() {
                contour.reverse();
                nodes.reverse();
            }
            self.contours.push(contour);
        }

        for i in 0..self.contours.len() {
            let points = &self.contours[i].points;
            let test_point = na::center(&points[0], &points[1 % points.len()]);
            let depth = self
                .contours
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && utils::point_in_poly2d(&test_point, &other.points))
                .count();

            if depth % 2 == 1 {
                self.contours[i].reverse();
                self.node_loops[i].reverse();
            }
        }

        self.node_to_vertex.clear();
        self.node_to_vertex.resize(graph.node_count(), None);

        for nodes in &self.node_loops {
            let contour = nodes
                .iter()
                .map(|n| match self.node_to_vertex[*n as usize] {
                    Some(id) => id,
                    None => {
                        let id = self.vertices.len() as u32;
                        self.vertices.push(*graph.point(*n));
                        self.origins.push(*graph.origin(*n));
                        self.node_to_vertex[*n as usize] = Some(id);
                        id
                    }
                })
                .collect();
            self.index_contours.push(contour);
        }
    }

    /// Triangulates the contours with the non-zero winding rule.
    pub fn tessellate(&mut self, tessellator: &mut dyn Tessellator) -> CapTessellation {
        tessellator.tessellate(&self.vertices, &self.index_contours, WindingRule::NonZero)
    }

    /// Builds a cap face and registers its vertices in `mesh`.
    ///
    /// The counter-clockwise part of the tessellation is used if `ccw` is
    /// true, the clockwise part otherwise. Vertices created by the
    /// tessellator are placed back on the plane.
    pub fn build_face(
        &self,
        tessellation: &CapTessellation,
        ccw: bool,
        normal: UnitVector<Real>,
        plane: &CuttingPlane,
        uvs: &UvGenerator,
        mesh: &mut Mesh,
        merge_vertices: bool,
    ) -> Result<Face, MeshError> {
        let vertices = tessellation
            .vertices
            .iter()
            .enumerate()
            .map(|(i, pt)| {
                let point = self
                    .origins
                    .get(i)
                    .copied()
                    .unwrap_or_else(|| plane.unproject(pt));
                let vertex_index = if merge_vertices {
                    mesh.vertex_index(point)
                } else {
                    mesh.add_vertex(point)
                };

                FaceVertex::new(point, vertex_index)
                    .with_normal(normal.into_inner())
                    .with_uv(uvs.generate(&point))
            })
            .collect();

        let tess = if ccw {
            &tessellation.counter_clockwise
        } else {
            &tessellation.clockwise
        };

        Face::with_normal(normal, vertices, tess.clone())
    }
}
