mod column;
mod water;

use std::time::{Duration, Instant};

use crate::grid::VoxelGrid;
use crate::noise::NoiseSource;
use crate::worldgen::{GenerationParams, TerrainMode};

pub use self::column::{classify_biome, column_height};
use self::column::fill_column;
use self::water::apply_water_fill;

/// Summary of one terrain pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainStats {
    pub columns: usize,
    pub solid_cells: usize,
    pub water_cells: usize,
    pub min_height: usize,
    pub max_height: usize,
    pub elapsed: Duration,
}

/// Fills `grid` column by column from `noise`.
///
/// The grid's own extents drive the walk; every cell is rewritten, so callers
/// can pass a recycled grid without resetting it first.
pub fn generate_terrain<N: NoiseSource + ?Sized>(
    grid: &mut VoxelGrid,
    params: &GenerationParams,
    noise: &N,
) -> TerrainStats {
    let start = Instant::now();
    let width = grid.width();
    let grid_height = grid.height();
    let mut stats = TerrainStats {
        min_height: grid_height,
        ..TerrainStats::default()
    };

    for x in 0..width {
        for z in 0..width {
            let height = match params.mode {
                TerrainMode::Noise => {
                    let n = noise.sample(x as f32 / params.scale, z as f32 / params.scale);
                    column_height(n, params, grid_height)
                }
                TerrainMode::Flat { thickness } => thickness.clamp(1, grid_height),
            };
            let column = grid.column_mut(x, z);
            fill_column(column, height, &params.biome);
            let water = apply_water_fill(column, height, params.water_level);

            stats.columns += 1;
            stats.solid_cells += height;
            stats.water_cells += water;
            stats.min_height = stats.min_height.min(height);
            stats.max_height = stats.max_height.max(height);
        }
    }

    stats.elapsed = start.elapsed();
    log::debug!(
        "terrain pass: {} columns, heights {}..={}, {} solid, {} water in {:?}",
        stats.columns,
        stats.min_height,
        stats.max_height,
        stats.solid_cells,
        stats.water_cells,
        stats.elapsed
    );
    stats
}
