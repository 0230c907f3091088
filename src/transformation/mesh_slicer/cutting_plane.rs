use crate::math::{Isometry, Point, Point2, Real, UnitVector, Vector};
use crate::transformation::uv_map::plane_frame;

/// The plane along which a mesh is sliced.
///
/// Points with a non-negative signed distance to the plane are on its top
/// side, the others on its bottom side. The plane carries a local frame (its
/// normal is the local `z` axis) used to express cross-sections in 2D.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CuttingPlane {
    normal: UnitVector<Real>,
    distance: Real,
    plane_to_model: Isometry<Real>,
}

impl CuttingPlane {
    /// A plane with the given normal, at `distance` from the origin along that normal.
    ///
    /// The normal does not have to be normalized. Returns `None` if it is zero.
    pub fn new(normal: Vector<Real>, distance: Real) -> Option<Self> {
        let normal = UnitVector::try_new(normal, crate::math::DEFAULT_EPSILON)?;
        Some(Self::with_unit_normal(normal, distance))
    }

    /// A plane with the given unit normal, at `distance` from the origin along that normal.
    pub fn with_unit_normal(normal: UnitVector<Real>, distance: Real) -> Self {
        let origin = Point::from(normal.into_inner() * distance);
        Self {
            normal,
            distance,
            plane_to_model: plane_frame(&normal, &origin),
        }
    }

    /// The `xy` plane of the given frame.
    pub fn from_isometry(plane_to_model: Isometry<Real>) -> Self {
        let normal = plane_to_model.rotation * Vector::z_axis();
        let distance = normal.dot(&plane_to_model.translation.vector);
        Self {
            normal,
            distance,
            plane_to_model,
        }
    }

    /// The unit normal of this plane, pointing to its top side.
    #[inline]
    pub fn normal(&self) -> UnitVector<Real> {
        self.normal
    }

    /// The signed distance from the origin to this plane.
    #[inline]
    pub fn distance(&self) -> Real {
        self.distance
    }

    /// The local frame of this plane.
    #[inline]
    pub fn plane_to_model(&self) -> &Isometry<Real> {
        &self.plane_to_model
    }

    /// The signed distance from `pt` to this plane.
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&pt.coords) - self.distance
    }

    /// Projects `pt` on this plane, expressed in the plane's local frame.
    #[inline]
    pub fn project(&self, pt: &Point<Real>) -> Point2<Real> {
        let local = self.plane_to_model.inverse_transform_point(pt);
        Point2::new(local.x, local.y)
    }

    /// The model-space point with the given local plane coordinates.
    #[inline]
    pub fn unproject(&self, pt: &Point2<Real>) -> Point<Real> {
        self.plane_to_model * Point::new(pt.x, pt.y, 0.0)
    }
}
