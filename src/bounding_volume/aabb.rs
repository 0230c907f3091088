//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};
use na;
use num::Bounded;

/// An Axis-Aligned Bounding Box (AABB).
///
/// The box is defined by its minimum and maximum corners, and its edges are
/// parallel to the coordinate axes.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use planecut3d::bounding_volume::Aabb;
/// use nalgebra::Point3;
///
/// let points = vec![
///     Point3::new(1.0, 2.0, 3.0),
///     Point3::new(-1.0, 4.0, 2.0),
///     Point3::new(0.0, 0.0, 5.0),
/// ];
/// let aabb = Aabb::from_points(points);
///
/// assert_eq!(aabb.mins, Point3::new(-1.0, 0.0, 2.0));
/// assert_eq!(aabb.maxs, Point3::new(1.0, 4.0, 5.0));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `Real::max_values` and `maxs`components set to `-Real::max_values`.
    ///
    /// This is often used as the initial values of some AABB merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Computes the AABB of a set of points.
    ///
    /// The result is invalid (see [`Aabb::is_valid`]) if `pts` is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();

        for pt in pts {
            result.take_point(pt);
        }

        result
    }

    /// Checks that every component of `mins` is smaller than or equal to the
    /// corresponding component of `maxs`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..DIM).all(|i| self.mins[i] <= self.maxs[i])
    }

    /// The center of this `Aabb`.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this `Aabb`.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        self.extents() * 0.5
    }

    /// The extents of this `Aabb`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The volume of this `Aabb`.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// Enlarges this `Aabb` so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Does this AABB contains a point expressed in the same coordinate frame as `self`?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_point_cloud_gives_invalid_aabb() {
        let aabb = Aabb::from_points(core::iter::empty());
        assert!(!aabb.is_valid());
    }

    #[test]
    fn aabb_of_points() {
        let aabb = Aabb::from_points([Point::new(1.0, -2.0, 0.5), Point::new(-1.0, 2.0, 1.5)]);
        assert!(aabb.is_valid());
        assert_eq!(aabb.center(), Point::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.extents(), Vector::new(2.0, 4.0, 1.0));
        assert_relative_eq!(aabb.volume(), 8.0);
        assert!(aabb.contains_local_point(&Point::new(0.0, 1.9, 1.0)));
        assert!(!aabb.contains_local_point(&Point::new(0.0, 2.1, 1.0)));
    }
}
