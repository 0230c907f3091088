use super::{MeshSlicer, MeshSlicerConfig, SliceOutputs};
use crate::shape::{Mesh, MeshError};
use alloc::sync::Arc;
use alloc::vec::Vec;
use rayon::prelude::*;

/// Slices every mesh of `meshes` with the same configuration, in parallel.
///
/// Each worker thread reuses a single [`MeshSlicer`]. The results are in the
/// same order as `meshes`.
///
/// This function is enabled by the `parallel` feature flag.
pub fn slice_meshes_parallel(
    meshes: &[Arc<Mesh>],
    config: &MeshSlicerConfig,
) -> Vec<Result<SliceOutputs, MeshError>> {
    meshes
        .par_iter()
        .map_init(
            || MeshSlicer::with_config(config.clone()),
            |slicer, mesh| {
                slicer.slice(mesh)?;
                Ok(slicer.take_outputs())
            },
        )
        .collect()
}
