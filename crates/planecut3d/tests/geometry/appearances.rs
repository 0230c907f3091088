use crate::fixtures::{cube, faces_on_z0};
use approx::assert_relative_eq;
use planecut3d::math::Vector;
use planecut3d::shape::Appearance;
use planecut3d::transformation::{CuttingPlane, MeshSlicer, PlanarUvMap, SlicerFlags, UvMap};
use std::sync::Arc;

fn slicer() -> MeshSlicer {
    let mut slicer = MeshSlicer::new(CuttingPlane::new(Vector::z(), 0.0).unwrap());
    slicer.set_flags(
        SlicerFlags::TOP | SlicerFlags::BOTTOM | SlicerFlags::SLICE | SlicerFlags::default(),
    );
    slicer
}

#[test]
fn top_override_and_slice_appearance() {
    let mesh = cube(1.0);
    let red = Arc::new(Appearance::new("red"));
    let cut = Arc::new(Appearance::new("cut"));

    let mut slicer = slicer();
    slicer.set_top_appearance(Some(red.clone()));
    slicer.set_slice_appearance(Some(cut.clone()));
    slicer.slice(&mesh).unwrap();

    let top = slicer.top_mesh().unwrap();
    assert_eq!(top.face_groups().len(), 1);
    assert!(Arc::ptr_eq(
        top.face_groups()[0].appearance.as_ref().unwrap(),
        &red
    ));

    // Without override, the bottom part keeps the input appearance and its cap
    // gets the slice appearance.
    let bottom = slicer.bottom_mesh().unwrap();
    assert_eq!(bottom.face_groups().len(), 2);
    let cap_group = bottom
        .face_groups()
        .iter()
        .find(|g| g.appearance.is_some())
        .unwrap();
    assert!(Arc::ptr_eq(cap_group.appearance.as_ref().unwrap(), &cut));
    assert_eq!(cap_group.faces().len(), 1);
    assert!(!cap_group.two_sided);

    let slice = slicer.slice_mesh().unwrap();
    assert!(Arc::ptr_eq(
        slice.face_groups()[0].appearance.as_ref().unwrap(),
        &cut
    ));
}

#[test]
fn slice_uvs_follow_the_uv_map() {
    let mesh = cube(1.0);
    let cut = Arc::new(Appearance::new("cut").with_color_map_size(2.0, 2.0));
    let map: Arc<dyn UvMap> = Arc::new(PlanarUvMap::with_normal(1.0, &Vector::z_axis()));

    let mut slicer = slicer();
    slicer.set_slice_appearance(Some(cut));
    slicer.set_slice_uv_map(Some(map));
    slicer.slice(&mesh).unwrap();

    let face = slicer.slice_mesh().unwrap().faces().next().unwrap();
    let vertices = face.vertices();
    for a in vertices {
        for b in vertices {
            let duv = (a.uv - b.uv).norm();
            let dpt = (a.point - b.point).norm();
            assert_relative_eq!(duv, dpt / 2.0, epsilon = 1.0e-4);
        }
    }
}

#[test]
fn caps_without_uv_map_have_zero_uvs() {
    let mesh = cube(1.0);
    let mut slicer = slicer();
    slicer.slice(&mesh).unwrap();

    for cap in faces_on_z0(slicer.top_mesh().unwrap()) {
        assert!(cap.vertices().iter().all(|v| v.uv == planecut3d::math::Uv::origin()));
    }
}
