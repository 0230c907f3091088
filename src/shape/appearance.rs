use crate::math::{Real, Vector2};
use alloc::string::String;
use alloc::sync::Arc;

/// Material properties shared by all the faces of a [`FaceGroup`](crate::shape::FaceGroup).
///
/// Appearances are compared by identity: two face groups share an appearance
/// only if they hold the same `Arc`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Appearance {
    /// The name of this appearance, used as material name on export.
    pub name: String,
    /// The size, in model units, covered by one repetition of the color map.
    ///
    /// When set, texture coordinates generated for this appearance are
    /// divided by this size so one unit of UV space covers the whole map.
    pub color_map_size: Option<Vector2<Real>>,
}

impl Appearance {
    /// Creates an appearance without color map.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_map_size: None,
        }
    }

    /// Sets the size covered by one repetition of the color map.
    pub fn with_color_map_size(mut self, width: Real, height: Real) -> Self {
        self.color_map_size = Some(Vector2::new(width, height));
        self
    }

    /// Tests if two appearance handles designate the same appearance.
    ///
    /// Two absent appearances are the same.
    pub fn same(a: Option<&Arc<Appearance>>, b: Option<&Arc<Appearance>>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}
