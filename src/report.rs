use voxland_blocks::BlockType;
use voxland_runtime::{GenerationReport, World};
use voxland_world::SpatialQuery;

pub fn print_report(world: &World, report: &GenerationReport) {
    let p = world.params();
    println!(
        "world {}x{}x{} seed {} ({} columns, heights {}..={})",
        p.width,
        p.height,
        p.width,
        p.seed,
        report.terrain.columns,
        report.terrain.min_height,
        report.terrain.max_height
    );
    for rb in world.render_batches() {
        println!(
            "  {:<6} {:<7} {:>7} instances  color #{:06x}{}",
            rb.key.block.name(),
            if rb.batch.casts_shadow() { "exposed" } else { "buried" },
            rb.batch.count(),
            rb.material.color,
            if rb.material.is_transparent() { " (transparent)" } else { "" }
        );
    }
    println!(
        "  {} instances in {} batches, {} tree cells",
        report.instances, report.batches, report.unbatched
    );

    let mut trees: Vec<_> = report.trees.iter().collect();
    trees.sort();
    let summary: Vec<String> = trees.iter().map(|(a, n)| format!("{a}={n}")).collect();
    println!("  trees: {} [{}]", report.trees_planted(), summary.join(", "));

    let spawn = world.spawn_point();
    println!("  spawn at ({:.1}, {:.1}, {:.1})", spawn.x, spawn.y, spawn.z);
    println!("  generated in {:?}", report.elapsed);
}

/// One character per column: `~` water, `T` tree, otherwise the height in base 36.
pub fn heightmap_rows(world: &World) -> Vec<String> {
    let grid = world.grid();
    let w = grid.width();
    (0..w)
        .map(|z| {
            (0..w)
                .map(|x| {
                    let top = grid
                        .surface_y(x, z)
                        .and_then(|y| world.block_at(x as i32, z as i32, y as i32));
                    match top {
                        Some(BlockType::Water) => '~',
                        Some(BlockType::Tree) => 'T',
                        _ => {
                            let h = world.height_by_xz(x as i32, z as i32).max(0) as u32;
                            char::from_digit(h.min(35), 36).unwrap_or('#')
                        }
                    }
                })
                .collect()
        })
        .collect()
}
