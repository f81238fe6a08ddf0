use proptest::prelude::*;
use voxland_blocks::{BlockType, Voxel};
use voxland_world::{SpatialQuery, VoxelGrid};

fn dim() -> impl Strategy<Value = usize> {
    1usize..=8
}

fn probe() -> impl Strategy<Value = i32> {
    -1_000i32..=1_000
}

proptest! {
    // index maps each (x,z,y) within bounds to a unique in-range slot
    #[test]
    fn index_is_unique_and_in_range(w in dim(), h in dim()) {
        let grid = VoxelGrid::new(w, h);
        let expect = w * w * h;
        let mut seen = vec![false; expect];
        for x in 0..w { for z in 0..w { for y in 0..h {
            let i = grid.index(x, z, y);
            prop_assert!(i < expect);
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // has_voxel never panics and is false off the grid
    #[test]
    fn has_voxel_is_total(w in dim(), h in dim(), x in probe(), z in probe(), y in probe()) {
        let mut grid = VoxelGrid::new(w, h);
        for cx in 0..w as i32 { for cz in 0..w as i32 {
            grid.set_voxel(cx, cz, 0, Voxel::solid(BlockType::Stone));
        }}
        let hit = grid.has_voxel(x, z, y);
        if !grid.in_bounds(x, z, y) {
            prop_assert!(!hit);
            prop_assert!(!grid.blocks_movement(x, z, y));
        } else {
            prop_assert_eq!(hit, y == 0);
        }
    }

    // checked writes land exactly where in_bounds says they may
    #[test]
    fn writes_are_clipped_to_bounds(w in dim(), h in dim(), x in -3i32..12, z in -3i32..12, y in -3i32..12) {
        let mut grid = VoxelGrid::new(w, h);
        let wrote = grid.set_voxel(x, z, y, Voxel::solid(BlockType::Tree));
        prop_assert_eq!(wrote, grid.in_bounds(x, z, y));
        prop_assert_eq!(grid.occupied_count(), usize::from(wrote));
        prop_assert_eq!(grid.block_type(x, z, y), wrote.then_some(BlockType::Tree));
    }
}
