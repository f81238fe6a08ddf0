use voxland_blocks::{BlockType, Voxel};

/// Floods rows `height..level` of a column; returns the number of water cells.
pub(super) fn apply_water_fill(column: &mut [Voxel], height: usize, level: Option<usize>) -> usize {
    let Some(level) = level else {
        return 0;
    };
    let top = level.min(column.len());
    if height >= top {
        return 0;
    }
    for cell in &mut column[height..top] {
        *cell = Voxel::solid(BlockType::Water);
    }
    top - height
}
