use std::time::Instant;

use rayon::prelude::*;
use voxland_blocks::{BlockType, Voxel};
use voxland_world::VoxelGrid;

use crate::batch::{BatchKey, Exposure, InstanceTransform, MeshBatches};

/// Hook run for every exposed cell during the generation walk.
///
/// Called after the cell has been batched; the visitor may write into the
/// grid, and cells it fills ahead of the walk are read as they are found.
pub trait SurfaceVisitor {
    fn visit_surface(&mut self, grid: &mut VoxelGrid, x: i32, z: i32, y: i32);
}

impl<F> SurfaceVisitor for F
where
    F: FnMut(&mut VoxelGrid, i32, i32, i32),
{
    fn visit_surface(&mut self, grid: &mut VoxelGrid, x: i32, z: i32, y: i32) {
        self(grid, x, z, y)
    }
}

/// Exposed iff the cell above is unoccupied or off the top of the grid.
#[inline]
pub fn exposure_at(grid: &VoxelGrid, x: i32, z: i32, y: i32) -> Exposure {
    if grid.has_voxel(x, z, y + 1) {
        Exposure::Buried
    } else {
        Exposure::Exposed
    }
}

#[inline]
fn instanced_block(v: Voxel) -> Option<BlockType> {
    v.occupied_block().filter(|b| b.is_instanced())
}

fn walk_slab(grid: &VoxelGrid, x: usize, out: &mut MeshBatches) {
    let width = grid.width();
    for z in 0..width {
        let column = grid.column(x, z);
        for (y, cell) in column.iter().enumerate() {
            if !cell.occupied {
                continue;
            }
            let Some(block) = instanced_block(*cell) else {
                out.add_unbatched(1);
                continue;
            };
            let exposure = match column.get(y + 1) {
                Some(above) if above.occupied => Exposure::Buried,
                _ => Exposure::Exposed,
            };
            out.push(
                BatchKey::new(block, exposure),
                InstanceTransform::at_cell(x as i32, y as i32, z as i32),
            );
        }
    }
}

/// Read-only projection of `grid` into batches.
pub fn build_batches(grid: &VoxelGrid) -> MeshBatches {
    let start = Instant::now();
    let mut out = MeshBatches::new();
    for x in 0..grid.width() {
        walk_slab(grid, x, &mut out);
    }
    log::debug!(
        "batched {} instances into {} batches in {:?}",
        out.total_instances(),
        out.len(),
        start.elapsed()
    );
    out
}

/// Same result as [`build_batches`], with `x` slabs walked on the rayon pool.
pub fn build_batches_parallel(grid: &VoxelGrid) -> MeshBatches {
    let start = Instant::now();
    let slabs: Vec<MeshBatches> = (0..grid.width())
        .into_par_iter()
        .map(|x| {
            let mut slab = MeshBatches::new();
            walk_slab(grid, x, &mut slab);
            slab
        })
        .collect();
    let mut out = MeshBatches::new();
    for slab in slabs {
        out.append(slab);
    }
    log::debug!(
        "batched {} instances into {} batches across {} slabs in {:?}",
        out.total_instances(),
        out.len(),
        grid.width(),
        start.elapsed()
    );
    out
}

/// Generation walk: batches every cell and hands exposed cells to `visitor`.
///
/// Exposure is judged when a cell is visited. `unbatched` is counted over
/// the final grid, so it also covers cells the visitor wrote behind the walk.
pub fn build_batches_with<V: SurfaceVisitor + ?Sized>(
    grid: &mut VoxelGrid,
    visitor: &mut V,
) -> MeshBatches {
    let start = Instant::now();
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut out = MeshBatches::new();
    for x in 0..width {
        for z in 0..width {
            for y in 0..height {
                let Some(cell) = grid.get(x, z, y) else {
                    continue;
                };
                let Some(block) = instanced_block(cell) else {
                    continue;
                };
                let exposure = exposure_at(grid, x, z, y);
                out.push(BatchKey::new(block, exposure), InstanceTransform::at_cell(x, y, z));
                if exposure == Exposure::Exposed {
                    visitor.visit_surface(grid, x, z, y);
                }
            }
        }
    }
    let unbatched = grid
        .cells()
        .iter()
        .filter(|v| v.occupied && instanced_block(**v).is_none())
        .count();
    out.set_unbatched(unbatched);
    log::debug!(
        "generation walk batched {} instances ({} unbatched) in {:?}",
        out.total_instances(),
        unbatched,
        start.elapsed()
    );
    out
}
