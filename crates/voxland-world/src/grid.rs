use std::fmt;

use voxland_blocks::{BlockType, Voxel};
use voxland_geom::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    ZeroExtent { width: usize, height: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ZeroExtent { width, height } => {
                write!(f, "grid extents must be non-zero (width={width}, height={height})")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Dense, fully resident voxel grid with a square `width × width` footprint.
///
/// Cells live in one flat buffer; `(x, z, y)` maps to
/// `x * width * height + z * height + y`, so each column is a contiguous
/// `height`-long slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    cells: Vec<Voxel>,
}

impl VoxelGrid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "voxel grid needs non-zero extents (width={width}, height={height})"
        );
        Self {
            width,
            height,
            cells: vec![Voxel::AIR; width * width * height],
        }
    }

    pub fn try_new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroExtent { width, height });
        }
        Ok(Self::new(width, height))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear offset of an in-range cell. Out-of-range input is a caller bug.
    #[inline]
    pub fn index(&self, x: usize, z: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && z < self.width && y < self.height,
            "cell ({x}, {z}, {y}) outside {}x{}x{} grid",
            self.width,
            self.width,
            self.height
        );
        (x * self.width + z) * self.height + y
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, z: i32, y: i32) -> bool {
        x >= 0
            && (x as usize) < self.width
            && z >= 0
            && (z as usize) < self.width
            && y >= 0
            && (y as usize) < self.height
    }

    #[inline]
    fn checked_index(&self, x: i32, z: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, z, y) {
            Some(self.index(x as usize, z as usize, y as usize))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, x: i32, z: i32, y: i32) -> Option<Voxel> {
        self.checked_index(x, z, y).map(|i| self.cells[i])
    }

    /// Occupancy of a cell; `false` for anything off the grid.
    #[inline]
    pub fn has_voxel(&self, x: i32, z: i32, y: i32) -> bool {
        self.get(x, z, y).is_some_and(|v| v.occupied)
    }

    /// Block type of an occupied cell.
    #[inline]
    pub fn block_type(&self, x: i32, z: i32, y: i32) -> Option<BlockType> {
        self.get(x, z, y).and_then(|v| v.occupied_block())
    }

    /// Returns `false` (and writes nothing) when the cell is off the grid.
    pub fn set_block_type(&mut self, x: i32, z: i32, y: i32, block: BlockType) -> bool {
        match self.checked_index(x, z, y) {
            Some(i) => {
                self.cells[i].block = Some(block);
                true
            }
            None => false,
        }
    }

    /// Returns `false` (and writes nothing) when the cell is off the grid.
    pub fn set_occupied(&mut self, x: i32, z: i32, y: i32, occupied: bool) -> bool {
        match self.checked_index(x, z, y) {
            Some(i) => {
                self.cells[i].occupied = occupied;
                true
            }
            None => false,
        }
    }

    pub fn set_voxel(&mut self, x: i32, z: i32, y: i32, voxel: Voxel) -> bool {
        match self.checked_index(x, z, y) {
            Some(i) => {
                self.cells[i] = voxel;
                true
            }
            None => false,
        }
    }

    pub fn clear_voxel(&mut self, x: i32, z: i32, y: i32) -> bool {
        self.set_voxel(x, z, y, Voxel::AIR)
    }

    #[inline]
    pub fn column(&self, x: usize, z: usize) -> &[Voxel] {
        let start = self.index(x, z, 0);
        &self.cells[start..start + self.height]
    }

    #[inline]
    pub fn column_mut(&mut self, x: usize, z: usize) -> &mut [Voxel] {
        let start = self.index(x, z, 0);
        let height = self.height;
        &mut self.cells[start..start + height]
    }

    /// Every cell in storage order, for bulk comparison.
    #[inline]
    pub fn cells(&self) -> &[Voxel] {
        &self.cells
    }

    pub fn reset(&mut self) {
        self.cells.fill(Voxel::AIR);
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|v| v.occupied).count()
    }

    pub fn count_of(&self, block: BlockType) -> usize {
        self.cells
            .iter()
            .filter(|v| v.occupied_block() == Some(block))
            .count()
    }

    /// First unoccupied row scanning up from `y = 1`.
    ///
    /// Only meaningful for columns that are solid from the ground up; an
    /// edited column with a hole reports the bottom of the hole.
    pub fn height_by_xz(&self, x: i32, z: i32) -> i32 {
        let mut y = 1;
        while self.has_voxel(x, z, y) {
            y += 1;
        }
        y
    }

    /// Topmost occupied row of a column.
    pub fn surface_y(&self, x: usize, z: usize) -> Option<usize> {
        self.column(x, z).iter().rposition(|v| v.occupied)
    }

    /// Grid midpoint, used as the avatar spawn point.
    pub fn center_map(&self) -> Vec3 {
        Vec3::new(
            self.width as f32 / 2.0,
            self.height as f32 / 2.0,
            self.width as f32 / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_air() {
        let g = VoxelGrid::new(4, 3);
        assert_eq!(g.len(), 4 * 4 * 3);
        assert_eq!(g.occupied_count(), 0);
        assert!(g.cells().iter().all(|v| *v == Voxel::AIR));
    }

    #[test]
    fn zero_extent_is_rejected() {
        assert_eq!(
            VoxelGrid::try_new(0, 5),
            Err(GridError::ZeroExtent { width: 0, height: 5 })
        );
        assert!(VoxelGrid::try_new(3, 0).is_err());
    }

    #[test]
    fn index_layout_keeps_columns_contiguous() {
        let g = VoxelGrid::new(5, 7);
        assert_eq!(g.index(0, 0, 0), 0);
        assert_eq!(g.index(0, 0, 6), 6);
        assert_eq!(g.index(0, 1, 0), 7);
        assert_eq!(g.index(1, 0, 0), 5 * 7);
        assert_eq!(g.index(4, 4, 6), g.len() - 1);
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut g = VoxelGrid::new(2, 2);
        assert!(!g.set_occupied(-1, 0, 0, true));
        assert!(!g.set_block_type(0, 2, 0, BlockType::Dirt));
        assert!(!g.set_voxel(0, 0, 2, Voxel::solid(BlockType::Stone)));
        assert_eq!(g.occupied_count(), 0);
        assert!(g.set_voxel(1, 1, 1, Voxel::solid(BlockType::Stone)));
        assert!(g.has_voxel(1, 1, 1));
        assert_eq!(g.block_type(1, 1, 1), Some(BlockType::Stone));
    }

    #[test]
    fn type_and_presence_are_independent() {
        let mut g = VoxelGrid::new(2, 2);
        g.set_block_type(0, 0, 0, BlockType::Grass);
        assert!(!g.has_voxel(0, 0, 0));
        assert_eq!(g.block_type(0, 0, 0), None);
        g.set_occupied(0, 0, 0, true);
        assert_eq!(g.block_type(0, 0, 0), Some(BlockType::Grass));
        g.clear_voxel(0, 0, 0);
        assert_eq!(g.get(0, 0, 0), Some(Voxel::AIR));
    }

    #[test]
    fn height_scan_starts_at_one() {
        let mut g = VoxelGrid::new(1, 6);
        assert_eq!(g.height_by_xz(0, 0), 1);
        g.set_voxel(0, 0, 0, Voxel::solid(BlockType::Stone));
        assert_eq!(g.height_by_xz(0, 0), 1);
        for y in 1..6 {
            g.set_voxel(0, 0, y, Voxel::solid(BlockType::Dirt));
        }
        // full column stops at the top edge
        assert_eq!(g.height_by_xz(0, 0), 6);
        // a hole is reported as the height
        g.clear_voxel(0, 0, 3);
        assert_eq!(g.height_by_xz(0, 0), 3);
        assert_eq!(g.surface_y(0, 0), Some(5));
    }

    #[test]
    fn center_map_uses_half_extents() {
        let g = VoxelGrid::new(17, 8);
        assert_eq!(g.center_map(), Vec3::new(8.5, 4.0, 8.5));
    }
}
