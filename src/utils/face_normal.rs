use crate::math::{Point, Real, UnitVector, Vector, DEFAULT_EPSILON};

/// Computes the normal of a counter-clock-wise polygon with Newell's method.
///
/// The polygon doesn’t have to be planar nor convex: the result is the normal
/// of the plane best fitting its vertices. Returns `None` if the polygon has
/// no area.
pub fn newell_face_normal<'a>(pts: impl IntoIterator<Item = &'a Point<Real>>) -> Option<UnitVector<Real>> {
    let mut pts = pts.into_iter();
    let first = *pts.next()?;
    let mut prev = first;
    let mut res = Vector::zeros();

    for curr in pts.copied().chain(core::iter::once(first)) {
        res.x += (prev.y - curr.y) * (prev.z + curr.z);
        res.y += (prev.z - curr.z) * (prev.x + curr.x);
        res.z += (prev.x - curr.x) * (prev.y + curr.y);
        prev = curr;
    }

    UnitVector::try_new(res, DEFAULT_EPSILON)
}
