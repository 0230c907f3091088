use crate::math::{Point, Real, Uv};
use crate::shape::Face;
use arrayvec::ArrayVec;

/// A vertex of a clipped polygon: either a vertex of the source face or an
/// intersection of one of its edges with the cutting plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClipVertex {
    /// The position of this vertex.
    pub point: Point<Real>,
    /// The texture coordinates of this vertex.
    pub uv: Uv,
    /// The index of the source face vertex, or `None` for intersections.
    pub face_vertex: Option<u32>,
}

impl ClipVertex {
    /// The `i`-th vertex of `face`.
    pub fn from_face_vertex(face: &Face, i: u32) -> Self {
        let v = &face.vertices()[i as usize];
        Self {
            point: v.point,
            uv: v.uv,
            face_vertex: Some(i),
        }
    }

    /// The point where the segment `[a, b]` crosses the plane, `da` and `db`
    /// being the signed distances of its endpoints.
    ///
    /// Position and texture coordinates are interpolated linearly. The result
    /// does not depend on the order of the endpoints.
    pub fn intersection(a: &Self, da: Real, b: &Self, db: Real) -> Self {
        let total = db - da;
        let ra = db / total;
        let rb = -da / total;

        Self {
            point: Point::from(a.point.coords * ra + b.point.coords * rb),
            uv: Uv::from(a.uv.coords * ra + b.uv.coords * rb),
            face_vertex: None,
        }
    }
}

/// The result of clipping a triangle against the cutting plane.
#[derive(Clone, Debug, PartialEq)]
pub enum TriangleClip {
    /// The triangle lies entirely on the top side.
    Top,
    /// The triangle lies entirely on the bottom side.
    Bottom,
    /// The triangle straddles the plane.
    Split {
        /// The part on the top side: a triangle or a quad.
        top: ArrayVec<ClipVertex, 4>,
        /// The part on the bottom side: a triangle or a quad.
        bottom: ArrayVec<ClipVertex, 4>,
        /// The segment along which the triangle crosses the plane.
        edge: [Point<Real>; 2],
    },
}

/// Clips the triangle `[v1, v2, v3]` with signed distances `[d1, d2, d3]`.
///
/// The side with two vertices gets a quad, the other side a triangle, both
/// with the orientation of the input triangle.
pub fn clip_triangle(vertices: [ClipVertex; 3], distances: [Real; 3]) -> TriangleClip {
    let [v1, v2, v3] = vertices;
    let [d1, d2, d3] = distances;
    let below = [d1 < 0.0, d2 < 0.0, d3 < 0.0];

    let inter = ClipVertex::intersection;
    let polygon = |pts: &[ClipVertex]| pts.iter().copied().collect::<ArrayVec<_, 4>>();

    let (i1, i2, top, bottom) = match below {
        [true, true, true] => return TriangleClip::Bottom,
        [false, false, false] => return TriangleClip::Top,
        [true, true, false] => {
            let i1 = inter(&v1, d1, &v3, d3);
            let i2 = inter(&v2, d2, &v3, d3);
            (i1, i2, polygon(&[i1, i2, v3]), polygon(&[v1, v2, i2, i1]))
        }
        [true, false, true] => {
            let i1 = inter(&v1, d1, &v2, d2);
            let i2 = inter(&v2, d2, &v3, d3);
            (i1, i2, polygon(&[i1, v2, i2]), polygon(&[v1, i1, i2, v3]))
        }
        [true, false, false] => {
            let i1 = inter(&v1, d1, &v2, d2);
            let i2 = inter(&v1, d1, &v3, d3);
            (i1, i2, polygon(&[i1, v2, v3, i2]), polygon(&[v1, i1, i2]))
        }
        [false, false, true] => {
            let i1 = inter(&v1, d1, &v3, d3);
            let i2 = inter(&v2, d2, &v3, d3);
            (i1, i2, polygon(&[v1, v2, i2, i1]), polygon(&[i1, i2, v3]))
        }
        [false, true, false] => {
            let i1 = inter(&v1, d1, &v2, d2);
            let i2 = inter(&v2, d2, &v3, d3);
            (i1, i2, polygon(&[v1, i1, i2, v3]), polygon(&[i1, v2, i2]))
        }
        [false, true, true] => {
            let i1 = inter(&v1, d1, &v2, d2);
            let i2 = inter(&v1, d1, &v3, d3);
            (i1, i2, polygon(&[v1, i1, i2]), polygon(&[i1, v2, v3, i2]))
        }
    };

    TriangleClip::Split {
        top,
        bottom,
        edge: [i1.point, i2.point],
    }
}
