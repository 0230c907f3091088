use crate::fixtures::{faces_on_z0, outline_cube};
use approx::assert_relative_eq;
use planecut3d::math::Vector;
use planecut3d::transformation::{CuttingPlane, MeshSlicer, SlicerFlags};

#[test]
fn outline_only_cube_is_capped() {
    let mesh = outline_cube(1.0);
    let mut slicer = MeshSlicer::new(CuttingPlane::new(Vector::z(), 0.0).unwrap());
    slicer.set_flags(
        SlicerFlags::TOP | SlicerFlags::BOTTOM | SlicerFlags::SLICE | SlicerFlags::default(),
    );
    slicer.slice(&mesh).unwrap();

    assert_eq!(slicer.contours().len(), 1);
    assert!(slicer.contours()[0].is_ccw());

    let slice = slicer.slice_mesh().unwrap();
    assert_relative_eq!(slice.surface_area(), 4.0, epsilon = 1.0e-4);

    let top = slicer.top_mesh().unwrap();
    let bottom = slicer.bottom_mesh().unwrap();
    assert_eq!(faces_on_z0(top).len(), 1);
    assert_eq!(faces_on_z0(bottom).len(), 1);

    // Side faces keep an outline on each side of the plane.
    for part in [top, bottom] {
        let sides = part
            .faces()
            .filter(|f| f.normal().z.abs() < 1.0e-5)
            .filter(|f| !f.outlines().is_empty())
            .count();
        assert_eq!(sides, 4);
    }
}
