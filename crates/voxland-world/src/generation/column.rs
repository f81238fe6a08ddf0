use voxland_blocks::{BlockType, Voxel};

use crate::worldgen::{BiomeThresholds, GenerationParams};

/// Maps a noise sample to a column height in `1..=grid_height`.
///
/// `floor(grid_height * (offset + magnitude * n))`; the float-to-int cast
/// saturates, so NaN and huge values land on the clamp bounds.
pub fn column_height(n: f32, params: &GenerationParams, grid_height: usize) -> usize {
    let scaled = params.offset + params.magnitude * n;
    let raw = (grid_height as f32 * scaled).floor() as i64;
    raw.clamp(1, grid_height as i64) as usize
}

/// Block type for row `y` of a solid column.
pub fn classify_biome(y: usize, biome: &BiomeThresholds) -> BlockType {
    if y == 0 {
        BlockType::Stone
    } else if y < biome.sand_level {
        BlockType::Sand
    } else if y < biome.stone_level {
        BlockType::Dirt
    } else {
        BlockType::Grass
    }
}

pub(super) fn fill_column(column: &mut [Voxel], height: usize, biome: &BiomeThresholds) {
    for (y, cell) in column.iter_mut().enumerate() {
        *cell = if y < height {
            Voxel::solid(classify_biome(y, biome))
        } else {
            Voxel::AIR
        };
    }
}
