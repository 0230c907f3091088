//! Mesh slicing, cap tessellation and texture coordinates generation.

pub use self::mesh_slicer::*;
pub use self::tessellator::{CapTessellation, DelaunayTessellator, Tessellator, WindingRule};
pub use self::uv_map::{BoxUvMap, PlanarUvMap, UvGenerator, UvMap};

mod mesh_slicer;
mod tessellator;
pub(crate) mod uv_map;

#[cfg(feature = "wavefront")]
mod wavefront;
