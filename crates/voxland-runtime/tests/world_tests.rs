use std::fs;
use std::thread;

use proptest::prelude::*;

use voxland_blocks::{BlockType, Voxel};
use voxland_geom::Vec3;
use voxland_mesh_cpu::{BatchKey, Exposure, build_batches};
use voxland_runtime::{EditError, World, WorldEvent};
use voxland_structures::{TreeArchetype, TreeLibrary, VegetationPlacer};
use voxland_world::{ConstantNoise, GenerationParams, SpatialQuery};

fn small_params(width: usize, height: usize) -> GenerationParams {
    GenerationParams {
        scale: 10.0,
        ..GenerationParams::default()
    }
    .with_grid(width, height)
}

fn bare_world() -> World {
    let params = small_params(16, 8).without_trees();
    World::new(params, Box::new(ConstantNoise(0.0)), None).unwrap()
}

// 12 rows high at noise 0.5 gives 7-row columns with grass on top
fn forest(seed: i32) -> World {
    let params = small_params(16, 12).with_seed(seed);
    let placer = VegetationPlacer::new(seed, 1.0, TreeLibrary::builtin());
    World::new(params, Box::new(ConstantNoise(0.5)), Some(placer)).unwrap()
}

#[test]
fn new_world_is_empty_until_generated() {
    let world = bare_world();
    assert_eq!(world.grid().occupied_count(), 0);
    assert!(world.batches().is_empty());
    assert_eq!(world.revision(), 0);
}

#[test]
fn constant_noise_world_end_to_end() {
    let mut world = bare_world();
    let report = world.generate();
    assert_eq!(report.terrain.min_height, 3);
    assert_eq!(report.terrain.max_height, 3);
    assert_eq!(report.instances, 16 * 16 * 3);
    assert_eq!(report.unbatched, 0);
    assert_eq!(report.trees_planted(), 0);
    assert_eq!(world.height_by_xz(4, 11), 3);
    assert_eq!(world.center_map(), Vec3::new(8.0, 4.0, 8.0));
    assert_eq!(world.spawn_point(), Vec3::new(8.0, 3.0, 8.0));
    assert!(world.blocks_movement(0, 0, 2));
    assert!(!world.blocks_movement(0, 0, 3));
    assert!(!world.has_voxel(-1, 0, 0));
}

#[test]
fn render_batches_carry_block_materials() {
    let mut world = bare_world();
    world.generate();
    let mut seen = 0;
    for rb in world.render_batches() {
        assert_eq!(rb.material.block, rb.key.block);
        assert_eq!(rb.batch.key, rb.key);
        seen += rb.batch.count();
    }
    assert_eq!(seen, world.grid().occupied_count());
}

#[test]
fn trees_grow_and_stay_out_of_batches() {
    let mut world = forest(5);
    let report = world.generate();
    assert!(report.trees_planted() > 0);
    let grid = world.grid();
    assert_eq!(report.unbatched, grid.count_of(BlockType::Tree));
    assert_eq!(report.instances + report.unbatched, grid.occupied_count());
    for (block, n) in world.batches().by_block() {
        assert_eq!(n, grid.count_of(block), "{block}");
    }
    for tree in world.vegetation() {
        let (x, y, z) = tree.base;
        assert_eq!(grid.block_type(x, z, y - 1), Some(BlockType::Grass));
        assert!(grid.has_voxel(x, z, y));
        assert!(grid.has_voxel(x, z, y + 1));
    }
}

#[test]
fn every_tree_cell_is_drawn_by_some_vegetation() {
    let mut world = forest(11);
    world.generate();
    let grid = world.grid();
    for x in 0..16 {
        for z in 0..16 {
            for y in 0..12 {
                if grid.block_type(x, z, y) != Some(BlockType::Tree) {
                    continue;
                }
                let c = Vec3::cell_center(x, y, z);
                assert!(
                    world.vegetation().iter().any(|t| t.bounds().contains(c)),
                    "tree cell ({x},{z},{y}) has no geometry"
                );
            }
        }
    }
}

#[test]
fn regeneration_is_deterministic_and_wholesale() {
    let mut world = forest(21);
    world.generate();
    let first_cells = world.grid().cells().to_vec();
    let first_trees = world.vegetation().to_vec();
    world.remove_voxel(0, 0, 0).unwrap();
    world.generate();
    assert_eq!(world.grid().cells(), &first_cells[..]);
    assert_eq!(world.vegetation(), &first_trees[..]);
}

#[test]
fn edits_rebuild_batches() {
    let mut world = bare_world();
    world.generate();
    let rev = world.revision();

    world.add_voxel(2, 2, 3, BlockType::Stone).unwrap();
    assert_eq!(world.revision(), rev + 1);
    assert_eq!(world.batches(), &build_batches(world.grid()));
    assert_eq!(
        world
            .batches()
            .count_for(BatchKey::new(BlockType::Stone, Exposure::Exposed)),
        1
    );
    assert_eq!(
        world
            .batches()
            .count_for(BatchKey::new(BlockType::Dirt, Exposure::Buried)),
        1
    );

    world.remove_voxel(2, 2, 2).unwrap();
    assert_eq!(world.batches().total_instances(), world.grid().occupied_count());
    assert_eq!(world.grid().get(2, 2, 2), Some(Voxel::AIR));
}

#[test]
fn bad_edits_are_rejected() {
    let mut world = bare_world();
    world.generate();
    let rev = world.revision();
    assert_eq!(
        world.add_voxel(16, 0, 0, BlockType::Sand),
        Err(EditError::OutOfBounds { x: 16, z: 0, y: 0 })
    );
    assert_eq!(
        world.add_voxel(0, 0, 0, BlockType::Sand),
        Err(EditError::Occupied { x: 0, z: 0, y: 0 })
    );
    assert_eq!(
        world.remove_voxel(0, 0, 7),
        Err(EditError::Empty { x: 0, z: 0, y: 7 })
    );
    assert_eq!(world.revision(), rev);
}

#[test]
fn removing_a_trunk_fells_the_whole_tree() {
    let mut world = forest(5);
    world.generate();
    let before = world.vegetation().len();
    let felled = world.vegetation()[0].clone();
    let (x, y, z) = felled.base;

    world.remove_voxel(x, z, y).unwrap();
    assert_eq!(world.vegetation().len(), before - 1);
    assert!(!world.vegetation().contains(&felled));
    for &(cx, cy, cz) in &felled.cells {
        assert_ne!(world.grid().block_type(cx, cz, cy), Some(BlockType::Tree));
    }
    assert!(!world.vegetation().iter().any(|t| t.claims(x, y, z)));
    assert_eq!(world.batches(), &build_batches(world.grid()));
    assert_eq!(world.batches().unbatched(), world.grid().count_of(BlockType::Tree));
}

#[test]
fn felling_through_events_matches_direct_removal() {
    let mut direct = forest(9);
    direct.generate();
    let mut queued = forest(9);
    queued.generate();
    let (x, y, z) = direct.vegetation()[0].base;

    direct.remove_voxel(x, z, y + 1).unwrap();
    queued
        .events()
        .send(WorldEvent::VoxelRemoved { x, z, y: y + 1 })
        .unwrap();
    assert_eq!(queued.pump_events().applied, 1);
    assert_eq!(queued.grid().cells(), direct.grid().cells());
    assert_eq!(queued.vegetation(), direct.vegetation());
}

#[test]
fn tree_blocks_cannot_be_added_directly() {
    let mut world = bare_world();
    world.generate();
    let rev = world.revision();
    assert_eq!(
        world.add_voxel(2, 2, 5, BlockType::Tree),
        Err(EditError::TreeBlock { x: 2, z: 2, y: 5 })
    );
    assert_eq!(world.grid().get(2, 2, 5), Some(Voxel::AIR));
    assert_eq!(world.revision(), rev);

    world
        .events()
        .send(WorldEvent::VoxelAdded { x: 2, z: 2, y: 5, block: BlockType::Tree })
        .unwrap();
    assert_eq!(world.pump_events().rejected, 1);
    assert_eq!(world.grid().count_of(BlockType::Tree), 0);
}

#[test]
fn a_broken_tree_file_only_skips_its_own_archetype() {
    let dir = std::env::temp_dir().join(format!("voxland-world-trees-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    let tree = r#"[
        {"position": {"x": 0, "y": 1, "z": 0},
         "additionalData": {"width": 1, "height": 3, "depth": 1, "name": "wood"}},
        {"position": {"x": 0, "y": 3, "z": 0},
         "additionalData": {"width": 3, "height": 1, "depth": 3, "name": "darkgreen"}}
    ]"#;
    fs::write(dir.join("oak.json"), tree).unwrap();
    fs::write(dir.join("default.json"), tree).unwrap();
    // autumn.json is left missing

    let lib = TreeLibrary::load_dir(&dir);
    assert!(lib.get(TreeArchetype::Autumn).is_err());
    let params = small_params(16, 12).with_seed(3);
    let placer = VegetationPlacer::new(3, 1.0, lib);
    let mut world = World::new(params, Box::new(ConstantNoise(0.5)), Some(placer)).unwrap();
    let report = world.generate();

    assert_eq!(report.trees.get(&TreeArchetype::Autumn).copied().unwrap_or(0), 0);
    assert!(report.trees.get(&TreeArchetype::Oak).copied().unwrap_or(0) > 0);
    assert!(report.trees.get(&TreeArchetype::Default).copied().unwrap_or(0) > 0);
    assert!(world.vegetation().iter().all(|t| t.archetype != TreeArchetype::Autumn));
    assert_eq!(report.instances + report.unbatched, world.grid().occupied_count());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn events_from_other_threads_apply_on_pump() {
    let mut world = bare_world();
    world.generate();
    let tx = world.events();
    let handle = thread::spawn(move || {
        tx.send(WorldEvent::VoxelAdded {
            x: 1,
            z: 1,
            y: 3,
            block: BlockType::Sand,
        })
        .unwrap();
        tx.send(WorldEvent::VoxelRemoved { x: 5, z: 5, y: 7 }).unwrap();
        tx.send(WorldEvent::VoxelRemoved { x: 1, z: 1, y: 0 }).unwrap();
    });
    handle.join().unwrap();

    let stats = world.pump_events();
    assert_eq!(stats.applied, 2);
    assert_eq!(stats.rejected, 1);
    assert!(!stats.regenerated);
    assert_eq!(world.grid().block_type(1, 1, 3), Some(BlockType::Sand));
    assert_eq!(world.batches(), &build_batches(world.grid()));
    assert_eq!(world.pump_events().applied, 0);
}

#[test]
fn params_change_regenerates_or_is_rejected() {
    let mut world = bare_world();
    world.generate();
    let tx = world.events();

    let mut bad = world.params().clone();
    bad.scale = -1.0;
    tx.send(WorldEvent::ParamsChanged(Box::new(bad))).unwrap();
    let stats = world.pump_events();
    assert_eq!(stats.rejected, 1);
    assert!(!stats.regenerated);

    let taller = world.params().clone().with_grid(8, 20);
    tx.send(WorldEvent::ParamsChanged(Box::new(taller))).unwrap();
    let stats = world.pump_events();
    assert!(stats.regenerated);
    assert_eq!(world.grid().width(), 8);
    // floor(20 * 0.4); the water level sits below the surface
    assert_eq!(world.height_by_xz(0, 0), 8);
}

#[test]
fn invalid_params_fail_construction() {
    let params = small_params(0, 8);
    assert!(World::new(params, Box::new(ConstantNoise(0.0)), None).is_err());
}

#[test]
fn parallel_rebuilds_match() {
    let mut world = bare_world();
    world.set_batch_threads(2).unwrap();
    world.generate();
    world.add_voxel(3, 3, 3, BlockType::Grass).unwrap();
    assert_eq!(world.batches(), &build_batches(world.grid()));
}

proptest! {
    // after any sequence of edits the batches equal a fresh read-only build
    #[test]
    fn edits_never_leave_stale_batches(ops in proptest::collection::vec((any::<bool>(), -1i32..17, -1i32..17, -1i32..9), 1..24)) {
        let mut world = bare_world();
        world.generate();
        for (add, x, z, y) in ops {
            let expect_ok = world.in_bounds(x, z, y) && world.has_voxel(x, z, y) != add;
            let res = if add {
                world.add_voxel(x, z, y, BlockType::Sand)
            } else {
                world.remove_voxel(x, z, y)
            };
            prop_assert_eq!(res.is_ok(), expect_ok);
            prop_assert_eq!(world.batches(), &build_batches(world.grid()));
        }
    }
}
