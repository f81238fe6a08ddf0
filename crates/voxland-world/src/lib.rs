//! Voxel grid, noise sampling, worldgen parameters and terrain generation.
#![forbid(unsafe_code)]

pub mod generation;
pub mod grid;
pub mod noise;
pub mod query;
pub mod worldgen;

pub use generation::{TerrainStats, classify_biome, column_height, generate_terrain};
pub use grid::{GridError, VoxelGrid};
pub use noise::{ConstantNoise, NoiseSource, SimplexNoise};
pub use query::SpatialQuery;
pub use worldgen::{
    BiomeThresholds, GenerationParams, ParamsError, TerrainMode, TreeParams, TreeSource,
    WorldGenConfig, load_config_from_path, load_params_from_path,
};
