//! Miscellaneous utilities.

use crate::math::Real;
use na::Vector3;

/// Trait to compute the orthonormal basis of a vector.
pub trait WBasis: Sized {
    /// The type of the array of orthonormal vectors.
    type Basis;
    /// Computes the vectors which, when combined with `self`, form an orthonormal basis.
    fn orthonormal_basis(self) -> Self::Basis;
}

impl WBasis for Vector3<Real> {
    type Basis = [Vector3<Real>; 2];
    // Robust and branchless implementation from Pixar:
    // https://graphics.pixar.com/library/OrthonormalB/paper.pdf
    fn orthonormal_basis(self) -> [Vector3<Real>; 2] {
        let sign = (1.0 as Real).copysign(self.z);
        let a = -1.0 / (sign + self.z);
        let b = self.x * self.y * a;

        [
            Vector3::new(1.0 + sign * self.x * self.x * a, sign * b, -sign * self.x),
            Vector3::new(b, sign + self.y * self.y * a, -self.y),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::WBasis;
    use crate::math::{Real, Vector};

    #[test]
    fn basis_is_orthonormal_and_right_handed() {
        let dirs: [Vector<Real>; 4] = [
            Vector::z(),
            -Vector::z(),
            Vector::x(),
            Vector::new(1.0, -2.0, 0.5).normalize(),
        ];

        for n in dirs {
            let [b0, b1] = n.orthonormal_basis();
            assert_relative_eq!(b0.norm(), 1.0 as Real, epsilon = 1.0e-5);
            assert_relative_eq!(b1.norm(), 1.0 as Real, epsilon = 1.0e-5);
            assert_relative_eq!(b0.dot(&b1), 0.0, epsilon = 1.0e-5);
            assert_relative_eq!(b0.dot(&n), 0.0, epsilon = 1.0e-5);
            assert_relative_eq!(b0.cross(&b1), n, epsilon = 1.0e-5);
        }
    }
}
