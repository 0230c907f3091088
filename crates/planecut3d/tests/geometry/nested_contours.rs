use crate::fixtures::{add_box, assert_closed, faces_on_z0};
use approx::assert_relative_eq;
use planecut3d::math::{Point, Vector};
use planecut3d::shape::Mesh;
use planecut3d::transformation::{CuttingPlane, MeshSlicer, SlicerFlags};
use std::sync::Arc;

fn z_slicer() -> MeshSlicer {
    let mut slicer = MeshSlicer::new(CuttingPlane::new(Vector::z(), 0.0).unwrap());
    slicer.set_flags(
        SlicerFlags::TOP | SlicerFlags::BOTTOM | SlicerFlags::SLICE | SlicerFlags::default(),
    );
    slicer
}

#[test]
fn hollow_box_cap_has_a_hole() {
    let mut mesh = Mesh::new();
    add_box(
        &mut mesh,
        Point::new(-1.0, -1.0, -1.0),
        Point::new(1.0, 1.0, 1.0),
        false,
        None,
    );
    add_box(
        &mut mesh,
        Point::new(-0.5, -0.5, -0.5),
        Point::new(0.5, 0.5, 0.5),
        true,
        None,
    );
    let mesh = Arc::new(mesh);
    assert_relative_eq!(mesh.signed_volume(), 7.0, epsilon = 1.0e-4);

    let mut slicer = z_slicer();
    slicer.slice(&mesh).unwrap();

    let contours = slicer.contours();
    assert_eq!(contours.len(), 2);
    assert_eq!(contours.iter().filter(|c| c.is_ccw()).count(), 1);
    assert_eq!(contours.iter().filter(|c| !c.is_ccw()).count(), 1);

    assert_relative_eq!(
        slicer.slice_mesh().unwrap().surface_area(),
        3.0,
        epsilon = 1.0e-4
    );

    let top = slicer.top_mesh().unwrap();
    let bottom = slicer.bottom_mesh().unwrap();
    assert_relative_eq!(top.signed_volume(), 3.5, epsilon = 1.0e-4);
    assert_relative_eq!(bottom.signed_volume(), 3.5, epsilon = 1.0e-4);
    assert_closed(top);
    assert_closed(bottom);

    // The cap must not cover the cavity.
    for cap in faces_on_z0(top) {
        for v in cap.vertices() {
            assert!(v.point.x.abs() >= 0.5 - 1.0e-5 || v.point.y.abs() >= 0.5 - 1.0e-5);
        }
    }
}

#[test]
fn disjoint_boxes_give_disjoint_contours() {
    let mut mesh = Mesh::new();
    add_box(
        &mut mesh,
        Point::new(-3.0, -1.0, -1.0),
        Point::new(-1.0, 1.0, 1.0),
        false,
        None,
    );
    add_box(
        &mut mesh,
        Point::new(1.0, -1.0, -1.0),
        Point::new(3.0, 1.0, 1.0),
        false,
        None,
    );
    let mesh = Arc::new(mesh);

    let mut slicer = z_slicer();
    slicer.slice(&mesh).unwrap();

    assert_eq!(slicer.contours().len(), 2);
    assert!(slicer.contours().iter().all(|c| c.is_ccw()));
    assert_relative_eq!(
        slicer.slice_mesh().unwrap().surface_area(),
        8.0,
        epsilon = 1.0e-4
    );
    assert_relative_eq!(
        slicer.top_mesh().unwrap().signed_volume(),
        4.0,
        epsilon = 1.0e-4
    );
}

#[test]
fn open_surface_has_no_cap() {
    // The cut of a single face is an open chain, which is pruned.
    let mut mesh = Mesh::new();
    add_box(
        &mut mesh,
        Point::new(-1.0, -1.0, -1.0),
        Point::new(1.0, 1.0, 1.0),
        false,
        None,
    );
    let full = Arc::new(mesh);

    let mut single = Mesh::with_vertices(full.vertices().to_vec());
    let face = full.faces().next().unwrap().clone();
    single.add_face(None, false, false, face).unwrap();
    let single = Arc::new(single);

    let mut slicer = z_slicer();
    slicer.slice(&single).unwrap();

    assert!(slicer.slice_mesh().is_none());
    assert!(slicer.contours().is_empty());
    assert!(faces_on_z0(slicer.top_mesh().unwrap()).is_empty());
    assert_eq!(slicer.top_mesh().unwrap().face_count(), 1);
    assert_eq!(slicer.bottom_mesh().unwrap().face_count(), 1);
}
