//! Various unsorted geometrical and logical operators.

pub use self::face_normal::newell_face_normal;
pub use self::hashable_partial_eq::HashablePartialEq;
pub use self::point_in_poly2d::{point_in_poly2d, winding_number2d};
pub use self::wops::WBasis;

mod face_normal;
mod hashable_partial_eq;
pub mod hashmap;
mod point_in_poly2d;
pub(crate) mod spade;
mod wops;
