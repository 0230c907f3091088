//! Slicing of polyhedral meshes along a plane.

pub use self::cutting_plane::CuttingPlane;
pub use self::intersection_graph::{total_turning_angle, CapContour, IntersectionGraph};
pub use self::mesh_slicer::{MeshSlicer, MeshSlicerConfig, SliceOutputs, SlicerFlags};
pub use self::outline_splitter::{OutlineSplitter, OutlineVertex};
#[cfg(feature = "parallel")]
pub use self::parallel::slice_meshes_parallel;
pub use self::triangle_clipper::{clip_triangle, ClipVertex, TriangleClip};
pub use self::vertex_distances::{PlaneSide, SideSet, VertexDistances};

mod cap_builder;
mod cutting_plane;
mod intersection_graph;
mod mesh_slicer;
mod outline_splitter;
#[cfg(feature = "parallel")]
mod parallel;
mod triangle_clipper;
mod vertex_distances;
