use crate::math::Real;
use na::Point2;

/// Tests if the given point is inside an arbitrary closed polygon with arbitrary orientation,
/// using a counting winding strategy.
///
/// The polygon is assumed to be closed, i.e., first and last point of the polygon are implicitly
/// assumed to be connected by an edge.
pub fn point_in_poly2d(pt: &Point2<Real>, poly: &[Point2<Real>]) -> bool {
    winding_number2d(pt, poly) % 2 != 0
}

/// Computes the signed number of times the closed polygon `poly` winds around `pt`.
///
/// The result is positive for counter-clockwise windings and negative for clockwise
/// ones. Points exactly on the boundary give an unspecified (but finite) result.
pub fn winding_number2d(pt: &Point2<Real>, poly: &[Point2<Real>]) -> i32 {
    let mut winding = 0;

    for (i, a) in poly.iter().enumerate() {
        let b = poly[(i + 1) % poly.len()];
        let seg_dir = b - a;
        let dpt = pt - a;
        let perp = seg_dir.perp(&dpt);

        if a.y <= pt.y {
            if b.y > pt.y && perp > 0.0 {
                // Upward crossing with the point on the left.
                winding += 1;
            }
        } else if b.y <= pt.y && perp < 0.0 {
            // Downward crossing with the point on the right.
            winding -= 1;
        }
    }

    winding
}

#[cfg(test)]
mod test {
    use super::*;

    fn square(ccw: bool) -> Vec<Point2<Real>> {
        let mut pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        if !ccw {
            pts.reverse();
        }
        pts
    }

    #[test]
    fn winding_sign_follows_orientation() {
        let inside = Point2::new(1.0, 1.0);
        let outside = Point2::new(3.0, 1.0);
        assert_eq!(winding_number2d(&inside, &square(true)), 1);
        assert_eq!(winding_number2d(&inside, &square(false)), -1);
        assert_eq!(winding_number2d(&outside, &square(true)), 0);
        assert!(point_in_poly2d(&inside, &square(false)));
        assert!(!point_in_poly2d(&outside, &square(true)));
    }

    #[test]
    fn concave_polygon() {
        // A "U" shape.
        let poly = [
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 3.0),
            Point2::new(2.0, 3.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 3.0),
            Point2::new(0.0, 3.0),
        ];
        assert!(point_in_poly2d(&Point2::new(0.5, 2.0), &poly));
        assert!(!point_in_poly2d(&Point2::new(1.5, 2.0), &poly));
        assert_eq!(winding_number2d(&Point2::new(1.5, 0.5), &poly), 1);
    }
}
