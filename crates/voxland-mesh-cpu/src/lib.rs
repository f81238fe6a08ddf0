//! CPU batching: projects a voxel grid into per-block instanced batches.
#![forbid(unsafe_code)]

mod batch;
mod build;

pub use batch::{BatchKey, Exposure, InstanceTransform, MeshBatch, MeshBatches};
pub use build::{
    SurfaceVisitor, build_batches, build_batches_parallel, build_batches_with, exposure_at,
};
