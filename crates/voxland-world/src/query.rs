use voxland_blocks::BlockType;
use voxland_geom::Vec3;

use crate::grid::VoxelGrid;

/// Read-only probes an avatar controller runs every tick for collision and
/// grounding. All of them are O(1) apart from the short column scan in
/// `height_by_xz`, and none of them panic on off-grid coordinates.
pub trait SpatialQuery {
    fn in_bounds(&self, x: i32, z: i32, y: i32) -> bool;

    fn has_voxel(&self, x: i32, z: i32, y: i32) -> bool;

    fn block_at(&self, x: i32, z: i32, y: i32) -> Option<BlockType>;

    fn height_by_xz(&self, x: i32, z: i32) -> i32;

    fn center_map(&self) -> Vec3;

    /// Whether a body may not enter the cell. Water and anything off the
    /// grid are passable.
    fn blocks_movement(&self, x: i32, z: i32, y: i32) -> bool {
        if !self.in_bounds(x, z, y) {
            return false;
        }
        match self.block_at(x, z, y) {
            Some(block) => !block.is_liquid(),
            None => self.has_voxel(x, z, y),
        }
    }
}

impl SpatialQuery for VoxelGrid {
    #[inline]
    fn in_bounds(&self, x: i32, z: i32, y: i32) -> bool {
        VoxelGrid::in_bounds(self, x, z, y)
    }

    #[inline]
    fn has_voxel(&self, x: i32, z: i32, y: i32) -> bool {
        VoxelGrid::has_voxel(self, x, z, y)
    }

    #[inline]
    fn block_at(&self, x: i32, z: i32, y: i32) -> Option<BlockType> {
        VoxelGrid::block_type(self, x, z, y)
    }

    #[inline]
    fn height_by_xz(&self, x: i32, z: i32) -> i32 {
        VoxelGrid::height_by_xz(self, x, z)
    }

    #[inline]
    fn center_map(&self) -> Vec3 {
        VoxelGrid::center_map(self)
    }
}
