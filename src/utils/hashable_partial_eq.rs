use crate::math::{Point, Point2, Real};
use core::hash::{Hash, Hasher};
use ordered_float::OrderedFloat;

/// A structure that implements `Eq` and is hashable even if the wrapped data
/// implements only `PartialEq`.
///
/// Points are hashed coordinate by coordinate, so two points compare equal
/// (and hash identically) only if their coordinates match exactly.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HashablePartialEq<T> {
    value: T,
}

impl<T> HashablePartialEq<T> {
    /// Creates a new `HashablePartialEq`. Please make sure that you really
    /// want to transform the wrapped object's partial equality to an equivalence relation.
    pub fn new(value: T) -> HashablePartialEq<T> {
        HashablePartialEq { value }
    }

    /// Gets the wrapped value.
    pub fn unwrap(self) -> T {
        self.value
    }
}

impl<T: PartialEq> Eq for HashablePartialEq<T> {}

impl Hash for HashablePartialEq<Point<Real>> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        for coord in self.value.iter() {
            OrderedFloat(*coord).hash(state);
        }
    }
}

impl Hash for HashablePartialEq<Point2<Real>> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        for coord in self.value.iter() {
            OrderedFloat(*coord).hash(state);
        }
    }
}

impl<T: Copy> Hash for HashablePartialEq<(u32, T)>
where
    HashablePartialEq<T>: Hash,
{
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.0.hash(state);
        HashablePartialEq::new(self.value.1).hash(state);
    }
}
