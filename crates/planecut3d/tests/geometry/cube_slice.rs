use crate::fixtures::{assert_closed, cube, faces_on_z0, projected_areas};
use approx::assert_relative_eq;
use planecut3d::math::Vector;
use planecut3d::transformation::{CuttingPlane, MeshSlicer, SlicerFlags};
use std::collections::HashSet;

fn slicer(flags: SlicerFlags) -> MeshSlicer {
    let mut slicer = MeshSlicer::new(CuttingPlane::new(Vector::z(), 0.0).unwrap());
    slicer.set_flags(flags | SlicerFlags::default());
    slicer
}

#[test]
fn cube_halves_are_closed() {
    let mesh = cube(1.0);
    let mut slicer = slicer(SlicerFlags::TOP | SlicerFlags::BOTTOM);
    slicer.slice(&mesh).unwrap();

    let top = slicer.top_mesh().unwrap();
    let bottom = slicer.bottom_mesh().unwrap();

    assert_relative_eq!(top.signed_volume(), 4.0, epsilon = 1.0e-4);
    assert_relative_eq!(bottom.signed_volume(), 4.0, epsilon = 1.0e-4);
    assert_relative_eq!(top.surface_area(), 16.0, epsilon = 1.0e-4);
    assert_relative_eq!(bottom.surface_area(), 16.0, epsilon = 1.0e-4);
    assert_closed(top);
    assert_closed(bottom);

    let aabb = top.aabb().unwrap();
    assert_relative_eq!(aabb.mins.z, 0.0);
    assert_relative_eq!(aabb.maxs.z, 1.0);
}

#[test]
fn cube_cap_orientation() {
    let mesh = cube(1.0);
    let mut slicer = slicer(SlicerFlags::TOP | SlicerFlags::BOTTOM | SlicerFlags::SLICE);
    slicer.slice(&mesh).unwrap();

    let top_caps = faces_on_z0(slicer.top_mesh().unwrap());
    let bottom_caps = faces_on_z0(slicer.bottom_mesh().unwrap());
    assert_eq!(top_caps.len(), 1);
    assert_eq!(bottom_caps.len(), 1);
    assert_eq!(top_caps[0].normal(), -Vector::z_axis());
    assert_eq!(bottom_caps[0].normal(), Vector::z_axis());

    for area in projected_areas(top_caps[0], &-Vector::z()) {
        assert!(area >= 0.0);
    }
    for area in projected_areas(bottom_caps[0], &Vector::z()) {
        assert!(area >= 0.0);
    }

    let slice = slicer.slice_mesh().unwrap();
    assert_eq!(slice.face_groups().len(), 1);
    assert!(slice.face_groups()[0].two_sided);
    assert!(!slice.face_groups()[0].smooth);
    assert_relative_eq!(slice.surface_area(), 4.0, epsilon = 1.0e-4);

    let face = slice.faces().next().unwrap();
    assert_eq!(face.normal(), Vector::z_axis());
    assert!(face.vertices().iter().all(|v| v.normal == Some(Vector::z())));

    assert_eq!(slicer.contours().len(), 1);
    assert!(slicer.contours()[0].is_ccw());
}

#[test]
fn cube_vertices_are_merged() {
    let mesh = cube(1.0);
    let mut slicer = slicer(SlicerFlags::TOP | SlicerFlags::BOTTOM);
    slicer.slice(&mesh).unwrap();

    let top = slicer.top_mesh().unwrap();
    let unique: HashSet<_> = top
        .vertices()
        .iter()
        .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
        .collect();
    assert_eq!(unique.len(), top.vertices().len());
    assert!(top.vertices().iter().all(|p| p.z >= 0.0));

    slicer.set_merge_duplicate_vertices(false);
    slicer.slice(&mesh).unwrap();
    assert!(slicer.top_mesh().unwrap().vertices().len() > unique.len());
}

#[test]
fn one_cut_edge_per_straddling_triangle() {
    let mesh = cube(1.0);
    let mut slicer = slicer(SlicerFlags::SLICE);
    slicer.slice(&mesh).unwrap();

    assert!(slicer.top_mesh().is_none());
    assert!(slicer.bottom_mesh().is_none());

    // Each of the four side quads has two straddling triangles.
    let contour = &slicer.contours()[0];
    assert_eq!(contour.points.len(), 8);
    assert_relative_eq!(slicer.slice_mesh().unwrap().surface_area(), 4.0, epsilon = 1.0e-4);
}

#[test]
fn tilted_plane_conserves_volume() {
    let mesh = cube(1.0);
    let plane = CuttingPlane::new(Vector::new(1.0, 1.0, 1.0), 0.5).unwrap();
    let mut slicer = MeshSlicer::new(plane);
    slicer.set_flags(SlicerFlags::TOP | SlicerFlags::BOTTOM | SlicerFlags::default());
    slicer.slice(&mesh).unwrap();

    let top = slicer.top_mesh().unwrap();
    let bottom = slicer.bottom_mesh().unwrap();
    assert_relative_eq!(
        top.signed_volume() + bottom.signed_volume(),
        8.0,
        epsilon = 1.0e-3
    );
    assert!(top.signed_volume() < bottom.signed_volume());
    assert_closed(top);
    assert_closed(bottom);

    for v in top.vertices() {
        assert!(plane.signed_distance(v) > -1.0e-5);
    }
    for v in bottom.vertices() {
        assert!(plane.signed_distance(v) < 1.0e-5);
    }
}
