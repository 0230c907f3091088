use crate::fixtures::{cube, faces_on_z0};
use approx::assert_relative_eq;
use planecut3d::math::Vector;
use planecut3d::transformation::{CuttingPlane, MeshSlicer, SlicerFlags};

fn slicer(flags: SlicerFlags) -> MeshSlicer {
    let mut slicer = MeshSlicer::new(CuttingPlane::new(Vector::z(), 0.0).unwrap());
    slicer.set_flags(flags);
    slicer
}

#[test]
fn uncapped_halves_are_open() {
    let mesh = cube(1.0);
    let mut slicer = slicer(
        SlicerFlags::TOP
            | SlicerFlags::BOTTOM
            | SlicerFlags::INTERSECT_FACES
            | SlicerFlags::INTERSECT_TRIANGLES
            | SlicerFlags::MERGE_DUPLICATE_VERTICES,
    );
    slicer.slice(&mesh).unwrap();

    let top = slicer.top_mesh().unwrap();
    assert!(faces_on_z0(top).is_empty());
    assert_relative_eq!(top.surface_area(), 12.0, epsilon = 1.0e-4);
    assert!(slicer.contours().is_empty());
}

#[test]
fn single_capped_side() {
    let mesh = cube(1.0);
    let mut slicer = slicer(SlicerFlags::TOP | SlicerFlags::default());
    slicer.set_bottom_capped(false);
    slicer.slice(&mesh).unwrap();

    assert!(slicer.bottom_mesh().is_none());
    assert!(slicer.slice_mesh().is_none());
    let top = slicer.top_mesh().unwrap();
    assert_relative_eq!(top.surface_area(), 16.0, epsilon = 1.0e-4);
    assert_eq!(faces_on_z0(top).len(), 1);

    // Capping the missing side alone does not build any cap.
    slicer.set_flags(SlicerFlags::TOP | SlicerFlags::BOTTOM_CAPPED | SlicerFlags::default());
    slicer.set_top_capped(false);
    slicer.slice(&mesh).unwrap();
    assert!(faces_on_z0(slicer.top_mesh().unwrap()).is_empty());
}

#[test]
fn no_output_enabled() {
    let mesh = cube(1.0);
    let mut slicer = slicer(SlicerFlags::default());
    slicer.slice(&mesh).unwrap();

    assert!(slicer.top_mesh().is_none());
    assert!(slicer.bottom_mesh().is_none());
    assert!(slicer.slice_mesh().is_none());
}

#[test]
fn faces_are_dropped_without_face_intersection() {
    let mesh = cube(1.0);
    let mut slicer = slicer(SlicerFlags::TOP | SlicerFlags::BOTTOM | SlicerFlags::default());
    slicer.set_intersect_faces(false);
    slicer.slice(&mesh).unwrap();

    // Only the faces entirely on one side remain, and nothing is capped.
    assert_eq!(slicer.top_mesh().unwrap().face_count(), 1);
    assert_eq!(slicer.bottom_mesh().unwrap().face_count(), 1);
    assert!(slicer.contours().is_empty());
}

#[test]
fn plane_can_be_replaced_between_slices() {
    let mesh = cube(1.0);
    let mut slicer = slicer(SlicerFlags::TOP | SlicerFlags::BOTTOM | SlicerFlags::default());

    slicer
        .slice_with_plane(&mesh, CuttingPlane::new(Vector::x(), 0.5).unwrap())
        .unwrap();
    assert_relative_eq!(
        slicer.top_mesh().unwrap().signed_volume(),
        2.0,
        epsilon = 1.0e-4
    );

    slicer
        .slice_with_plane(&mesh, CuttingPlane::new(Vector::x(), 2.0).unwrap())
        .unwrap();
    assert!(slicer.top_mesh().is_none());
    assert!(std::sync::Arc::ptr_eq(slicer.bottom_mesh().unwrap(), &mesh));
}
