use crate::shape::Mesh;
use alloc::{format, string::String, vec, vec::Vec};
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::path::Path;

impl Mesh {
    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// Each face group becomes an obj group. Faces are written as triangles
    /// with their texture coordinates and vertex normals.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), ObjError> {
        let mut file = std::fs::File::create(path)?;
        self.to_obj_data().write_to_buf(&mut file)
    }

    /// Converts this mesh to the in-memory representation of a Wavefront file.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    #[allow(clippy::unnecessary_cast)]
    pub fn to_obj_data(&self) -> ObjData {
        let mut texture = Vec::new();
        let mut normal = Vec::new();
        let mut groups = Vec::with_capacity(self.face_groups().len());

        for (group_id, group) in self.face_groups().iter().enumerate() {
            let mut polys = Vec::new();

            for face in group.faces() {
                let base = texture.len();
                for (i, v) in face.vertices().iter().enumerate() {
                    let n = face.vertex_normal(i);
                    texture.push([v.uv.x as f32, v.uv.y as f32]);
                    normal.push([n.x as f32, n.y as f32, n.z as f32]);
                }

                let tuple = |i: u32| {
                    let attr = base + i as usize;
                    let coord = face.vertices()[i as usize].vertex_index as usize;
                    IndexTuple(coord, Some(attr), Some(attr))
                };

                polys.extend(
                    face.tessellation()
                        .triangles()
                        .map(|tri| SimplePolygon(tri.iter().map(|i| tuple(*i)).collect())),
                );
            }

            let name = group
                .appearance
                .as_ref()
                .map(|a| a.name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| format!("group{}", group_id));

            groups.push(Group {
                name,
                index: 0,
                material: None,
                polys,
            });
        }

        ObjData {
            position: self
                .vertices()
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32])
                .collect(),
            texture,
            normal,
            objects: vec![Object {
                name: String::new(),
                groups,
            }],
            ..Default::default()
        }
    }
}
