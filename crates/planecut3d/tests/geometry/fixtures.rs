use planecut3d::math::{Point, Real, Vector};
use planecut3d::shape::{Appearance, Face, FaceVertex, Mesh, Tessellation};
use std::collections::HashMap;
use std::sync::Arc;

// Corners of each face of the unit box, counter-clockwise seen from outside.
const BOX_FACES: [[[Real; 3]; 4]; 6] = [
    [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
    [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
    [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
    [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
    [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
];

/// Adds the six quads of an axis-aligned box to `mesh`.
///
/// With `inward`, the faces point to the inside of the box, to carve a cavity.
pub fn add_box(
    mesh: &mut Mesh,
    mins: Point<Real>,
    maxs: Point<Real>,
    inward: bool,
    appearance: Option<Arc<Appearance>>,
) {
    let extents = maxs - mins;

    for corners in BOX_FACES {
        let mut vertices: Vec<_> = corners
            .iter()
            .map(|c| {
                let pt = mins + Vector::new(c[0], c[1], c[2]).component_mul(&extents);
                FaceVertex::new(pt, mesh.vertex_index(pt))
            })
            .collect();
        if inward {
            vertices.reverse();
        }

        let face = Face::convex_polygon(vertices).unwrap();
        mesh.add_face(appearance.clone(), false, false, face).unwrap();
    }
}

/// The box `[-half_extent, half_extent]³`.
pub fn cube(half_extent: Real) -> Arc<Mesh> {
    let mut mesh = Mesh::new();
    add_box(
        &mut mesh,
        Point::new(-half_extent, -half_extent, -half_extent),
        Point::new(half_extent, half_extent, half_extent),
        false,
        None,
    );
    Arc::new(mesh)
}

/// The box `[-half_extent, half_extent]³` whose faces only carry closed
/// outlines, without any triangle.
pub fn outline_cube(half_extent: Real) -> Arc<Mesh> {
    let mut mesh = Mesh::new();

    for corners in BOX_FACES {
        let vertices: Vec<_> = corners
            .iter()
            .map(|c| {
                let pt = Point::new(c[0], c[1], c[2]) * (2.0 * half_extent)
                    - Vector::repeat(half_extent);
                FaceVertex::new(pt, mesh.vertex_index(pt))
            })
            .collect();
        let tessellation = Tessellation::new(vec![vec![0, 1, 2, 3, 0]], vec![]);
        let face = Face::new(vertices, tessellation).unwrap();
        mesh.add_face(None, false, false, face).unwrap();
    }

    Arc::new(mesh)
}

/// Checks that every triangle edge of `mesh` is matched by an edge with the
/// opposite direction.
pub fn assert_closed(mesh: &Mesh) {
    let mut edges: HashMap<(u32, u32), i32> = HashMap::new();

    for face in mesh.faces() {
        for tri in face.tessellation().triangles() {
            let ids = tri.map(|i| face.vertices()[i as usize].vertex_index);
            for k in 0..3 {
                let (a, b) = (ids[k], ids[(k + 1) % 3]);
                if a != b {
                    *edges.entry((a, b)).or_insert(0) += 1;
                }
            }
        }
    }

    for ((a, b), count) in &edges {
        assert_eq!(
            edges.get(&(*b, *a)).copied().unwrap_or(0),
            *count,
            "unmatched edge {} -> {}",
            a,
            b
        );
    }
}

/// The faces of `mesh` lying on the plane `z = 0`.
pub fn faces_on_z0(mesh: &Mesh) -> Vec<&Face> {
    mesh.faces()
        .filter(|f| f.vertices().iter().all(|v| v.point.z.abs() < 1.0e-5))
        .collect()
}

/// Twice the signed area of each triangle of `face`, projected on `normal`.
pub fn projected_areas(face: &Face, normal: &Vector<Real>) -> Vec<Real> {
    face.tessellation()
        .triangles()
        .map(|[a, b, c]| {
            let pa = face.vertices()[a as usize].point;
            let pb = face.vertices()[b as usize].point;
            let pc = face.vertices()[c as usize].point;
            (pb - pa).cross(&(pc - pa)).dot(normal)
        })
        .collect()
}
