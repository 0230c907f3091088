//! The polyhedral mesh model: meshes, face groups, faces and their tessellations.

pub use self::appearance::Appearance;
pub use self::face::{Face, FaceGroup};
pub use self::face_builder::FaceBuilder;
pub use self::face_vertex::FaceVertex;
pub use self::mesh::Mesh;
pub use self::mesh_error::MeshError;
pub use self::tessellation::{Tessellation, TessellationPrimitive, TriangleIter};

mod appearance;
mod face;
mod face_builder;
mod face_vertex;
mod mesh;
mod mesh_error;
mod tessellation;
