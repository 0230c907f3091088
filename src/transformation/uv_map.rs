use crate::math::{Isometry, Point, Real, UnitVector, Uv, Vector, Vector2};
use crate::shape::Appearance;
use crate::utils::WBasis;
use core::fmt::Debug;

/// Generates texture coordinates for points on a surface.
pub trait UvMap: Debug + Send + Sync {
    /// The texture coordinates of `point`, lying on a surface with the given normal.
    ///
    /// The result is in model units: it is scaled to the color map size by
    /// [`UvGenerator`].
    fn generate(&self, point: &Point<Real>, normal: &Vector<Real>) -> Uv;
}

/// Projects points on a plane and uses their plane coordinates as texture coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PlanarUvMap {
    /// Scale factor applied to the plane coordinates.
    pub scale: Vector2<Real>,
    /// Transforms plane coordinates to model coordinates.
    pub plane_to_model: Isometry<Real>,
    /// If `true`, the two texture coordinates are swapped.
    pub flip: bool,
}

impl PlanarUvMap {
    /// A planar map on the `xy` plane of the given frame, with a uniform scale.
    pub fn new(scale: Real, plane_to_model: Isometry<Real>) -> Self {
        Self {
            scale: Vector2::repeat(scale),
            plane_to_model,
            flip: false,
        }
    }

    /// A planar map on the plane through the origin with the given normal.
    pub fn with_normal(scale: Real, normal: &UnitVector<Real>) -> Self {
        Self::new(scale, plane_frame(normal, &Point::origin()))
    }

    /// Swaps the two generated texture coordinates.
    pub fn flipped(mut self) -> Self {
        self.flip = !self.flip;
        self
    }
}

impl UvMap for PlanarUvMap {
    fn generate(&self, point: &Point<Real>, _normal: &Vector<Real>) -> Uv {
        let local = self.plane_to_model.inverse_transform_point(point);
        let uv = Uv::new(local.x * self.scale.x, local.y * self.scale.y);

        if self.flip {
            Uv::new(uv.y, uv.x)
        } else {
            uv
        }
    }
}

/// Projects points on one of the six faces of a box, chosen from the surface normal.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BoxUvMap {
    /// Scale factor applied to the projected coordinates.
    pub scale: Real,
    /// Transforms box coordinates to model coordinates.
    pub box_to_model: Isometry<Real>,
}

impl BoxUvMap {
    /// A box map aligned with the given frame.
    pub fn new(scale: Real, box_to_model: Isometry<Real>) -> Self {
        Self {
            scale,
            box_to_model,
        }
    }
}

impl UvMap for BoxUvMap {
    fn generate(&self, point: &Point<Real>, normal: &Vector<Real>) -> Uv {
        // Normals within 45 degrees of an axis select the box face of that axis.
        let threshold: Real = (0.5 as Real).sqrt() - crate::math::DEFAULT_EPSILON;
        let local = self.box_to_model.inverse_transform_point(point);
        let n = self
            .box_to_model
            .inverse_transform_vector(normal)
            .try_normalize(crate::math::DEFAULT_EPSILON)
            .unwrap_or_else(Vector::z);

        let uv = if n.x >= threshold {
            Uv::new(local.y, local.z)
        } else if n.x <= -threshold {
            Uv::new(-local.y, local.z)
        } else if n.y >= threshold {
            Uv::new(-local.x, local.z)
        } else if n.y <= -threshold {
            Uv::new(local.x, local.z)
        } else if n.z >= threshold {
            Uv::new(local.x, local.y)
        } else {
            Uv::new(local.x, -local.y)
        };

        uv * self.scale
    }
}

/// Texture coordinates generation for one appearance and surface orientation.
///
/// Coordinates produced by the map are divided by the color map size of the
/// appearance, if it has one. Without map, every coordinate is zero.
#[derive(Copy, Clone, Debug)]
pub struct UvGenerator<'a> {
    map: Option<&'a dyn UvMap>,
    normal: Vector<Real>,
    scale: Vector2<Real>,
}

impl<'a> UvGenerator<'a> {
    /// Creates a generator for surfaces with the given normal and appearance.
    pub fn new(
        appearance: Option<&Appearance>,
        map: Option<&'a dyn UvMap>,
        normal: Vector<Real>,
    ) -> Self {
        let scale = appearance
            .and_then(|a| a.color_map_size)
            .filter(|size| size.x > 0.0 && size.y > 0.0)
            .map(|size| Vector2::new(1.0 / size.x, 1.0 / size.y))
            .unwrap_or_else(|| Vector2::repeat(1.0));

        Self { map, normal, scale }
    }

    /// The texture coordinates of `point`.
    pub fn generate(&self, point: &Point<Real>) -> Uv {
        match self.map {
            Some(map) => {
                let uv = map.generate(point, &self.normal);
                Uv::new(uv.x * self.scale.x, uv.y * self.scale.y)
            }
            None => Uv::origin(),
        }
    }
}

/// A right-handed frame with `origin` as origin and `normal` as `z` axis.
pub(crate) fn plane_frame(normal: &UnitVector<Real>, origin: &Point<Real>) -> Isometry<Real> {
    let [x, _] = normal.orthonormal_basis();
    let y = normal.cross(&x);
    let rotation = na::Rotation3::from_matrix_unchecked(na::Matrix3::from_columns(&[
        x,
        y,
        normal.into_inner(),
    ]));

    Isometry::from_parts(
        origin.coords.into(),
        na::UnitQuaternion::from_rotation_matrix(&rotation),
    )
}
