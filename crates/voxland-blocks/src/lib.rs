//! Block types, the voxel cell record, and the material catalog.
#![forbid(unsafe_code)]

pub mod material;
pub mod types;

pub use material::{Material, MaterialCatalog};
pub use types::{BlockType, UnknownBlockType, Voxel};
