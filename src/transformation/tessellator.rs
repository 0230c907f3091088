use crate::math::{Point2, Real};
use crate::shape::{Tessellation, TessellationPrimitive};
use crate::utils::{self, winding_number2d};
use alloc::vec::Vec;
use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, Point2 as Pt2, Triangulation};

/// The rule deciding which regions enclosed by a set of contours are filled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum WindingRule {
    /// A point is inside if the contours wind around it an odd number of times.
    Odd,
    /// A point is inside if the contours wind around it a non-zero number of times.
    #[default]
    NonZero,
    /// A point is inside if the contours wind around it counter-clockwise.
    Positive,
}

impl WindingRule {
    /// Does a point with the given winding number lie inside the filled region?
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            Self::Odd => winding % 2 != 0,
            Self::NonZero => winding != 0,
            Self::Positive => winding > 0,
        }
    }
}

/// The triangulation of a set of 2D contours.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapTessellation {
    /// The vertices referenced by the tessellations.
    ///
    /// The first vertices are the ones given to the tessellator, possibly
    /// followed by vertices created where contours intersect.
    pub vertices: Vec<Point2<Real>>,
    /// Counter-clockwise triangles, with the contours as outlines.
    pub counter_clockwise: Tessellation,
    /// The same triangles and outlines with reversed orientation.
    pub clockwise: Tessellation,
}

impl CapTessellation {
    /// Is there no triangle in this tessellation?
    pub fn is_empty(&self) -> bool {
        self.counter_clockwise.triangle_count() == 0
    }
}

/// Turns closed 2D contours into triangles.
pub trait Tessellator: Send {
    /// Triangulates the regions enclosed by `contours` according to `rule`.
    ///
    /// Each contour is a list of indices into `vertices`. Contours are
    /// implicitly closed: their last vertex connects back to the first one.
    fn tessellate(
        &mut self,
        vertices: &[Point2<Real>],
        contours: &[Vec<u32>],
        rule: WindingRule,
    ) -> CapTessellation;
}

/// A [`Tessellator`] based on a constrained Delaunay triangulation.
///
/// Every contour edge is inserted as a constraint. Constraints crossing each
/// other are split, adding new vertices. A triangle is kept if the winding
/// number of the contours around its centroid satisfies the winding rule.
#[derive(Clone, Debug, Default)]
pub struct DelaunayTessellator {
    handles: Vec<Option<FixedVertexHandle>>,
    handle_to_vertex: Vec<Option<u32>>,
    contour_points: Vec<Point2<Real>>,
}

impl DelaunayTessellator {
    /// Creates a new tessellator.
    pub fn new() -> Self {
        Self::default()
    }

    fn winding_number(&mut self, pt: &Point2<Real>, vertices: &[Point2<Real>], contours: &[Vec<u32>]) -> i32 {
        let mut winding = 0;

        for contour in contours {
            self.contour_points.clear();
            self.contour_points
                .extend(contour.iter().map(|i| vertices[*i as usize]));
            winding += winding_number2d(pt, &self.contour_points);
        }

        winding
    }
}

impl Tessellator for DelaunayTessellator {
    fn tessellate(
        &mut self,
        vertices: &[Point2<Real>],
        contours: &[Vec<u32>],
        rule: WindingRule,
    ) -> CapTessellation {
        let mut cdt = ConstrainedDelaunayTriangulation::<Pt2<Real>>::new();

        self.handles.clear();
        for pt in vertices {
            let pt = utils::spade::sanitize_spade_point(Pt2::new(pt.x, pt.y));
            match cdt.insert(pt) {
                Ok(handle) => self.handles.push(Some(handle)),
                Err(err) => {
                    log::warn!("tessellator rejected cap vertex {:?}: {:?}", pt, err);
                    self.handles.push(None)
                }
            }
        }

        for contour in contours {
            for (ia, a) in contour.iter().enumerate() {
                let b = contour[(ia + 1) % contour.len()];

                if let (Some(handle_a), Some(handle_b)) =
                    (self.handles[*a as usize], self.handles[b as usize])
                {
                    if handle_a != handle_b {
                        let _ = cdt.add_constraint_and_split(handle_a, handle_b, |v| v);
                    }
                }
            }
        }

        let mut result = CapTessellation {
            vertices: vertices.to_vec(),
            ..Default::default()
        };

        // Vertices given multiple times share a handle, map it to the first one.
        self.handle_to_vertex.clear();
        self.handle_to_vertex.resize(cdt.num_vertices(), None);
        for (i, handle) in self.handles.iter().enumerate() {
            if let Some(handle) = handle {
                let id = &mut self.handle_to_vertex[handle.index()];
                if id.is_none() {
                    *id = Some(i as u32);
                }
            }
        }

        let mut ccw = Vec::new();

        for face in cdt.inner_faces() {
            let tri_idx = face.vertices().map(|v| {
                let id = &mut self.handle_to_vertex[v.fix().index()];
                match *id {
                    Some(id) => id,
                    None => {
                        // Vertex created by splitting intersecting constraints.
                        let pt = v.data();
                        let new_id = result.vertices.len() as u32;
                        result.vertices.push(Point2::new(pt.x, pt.y));
                        *id = Some(new_id);
                        new_id
                    }
                }
            });

            let [a, b, c] = tri_idx.map(|i| result.vertices[i as usize]);
            let center = Point2::from((a.coords + b.coords + c.coords) / 3.0);

            if rule.is_inside(self.winding_number(&center, &result.vertices, contours)) {
                ccw.extend_from_slice(&tri_idx);
            }
        }

        let mut cw = ccw.clone();
        for tri in cw.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }

        if !ccw.is_empty() {
            result.counter_clockwise.primitives = alloc::vec![TessellationPrimitive::TriangleList(ccw)];
            result.clockwise.primitives = alloc::vec![TessellationPrimitive::TriangleList(cw)];
        }

        for contour in contours.iter().filter(|c| c.len() > 1) {
            let mut outline = contour.clone();
            outline.push(contour[0]);
            let mut reversed = outline.clone();
            reversed.reverse();

            result.counter_clockwise.outlines.push(outline);
            result.clockwise.outlines.push(reversed);
        }

        result
    }
}
