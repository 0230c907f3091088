use crate::fixtures::cube;
use approx::assert_relative_eq;
use planecut3d::math::{Real, Vector};
use planecut3d::transformation::{CuttingPlane, MeshSlicer, SlicerFlags};

#[test]
fn random_planes_conserve_volume_and_area() {
    let mesh = cube(1.0);
    let mut rng = oorandom::Rand32::new(42);
    let mut slicer = MeshSlicer::default();
    slicer.set_flags(
        SlicerFlags::TOP | SlicerFlags::BOTTOM | SlicerFlags::SLICE | SlicerFlags::default(),
    );

    let mut sliced = 0;
    while sliced < 50 {
        let mut coord = || rng.rand_float() as Real * 2.0 - 1.0;
        let normal = Vector::new(coord(), coord(), coord());
        let distance = coord() * 0.5;
        let Some(plane) = CuttingPlane::new(normal, distance) else {
            continue;
        };
        if normal.norm() < 0.1 {
            continue;
        }

        slicer.set_cutting_plane(plane);
        slicer.slice(&mesh).unwrap();
        sliced += 1;

        let top = slicer.top_mesh().unwrap();
        let bottom = slicer.bottom_mesh().unwrap();
        let slice = slicer.slice_mesh().unwrap();

        assert!(top.signed_volume() > 0.0);
        assert!(bottom.signed_volume() > 0.0);
        assert_relative_eq!(
            top.signed_volume() + bottom.signed_volume(),
            8.0,
            epsilon = 1.0e-3
        );
        assert_relative_eq!(
            top.surface_area() + bottom.surface_area(),
            24.0 + 2.0 * slice.surface_area(),
            epsilon = 1.0e-3
        );
    }
}
