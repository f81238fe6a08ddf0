//! World facade: owns the grid, runs generation and keeps batches in step with edits.
#![forbid(unsafe_code)]

mod edit;
mod events;

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use hashbrown::HashMap;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use voxland_blocks::{BlockType, Material, MaterialCatalog, Voxel};
use voxland_geom::Vec3;
use voxland_mesh_cpu::{
    BatchKey, MeshBatch, MeshBatches, SurfaceVisitor, build_batches, build_batches_parallel,
    build_batches_with,
};
use voxland_structures::{TreeArchetype, Vegetation, VegetationPlacer};
use voxland_world::{
    GenerationParams, NoiseSource, ParamsError, SimplexNoise, SpatialQuery, TerrainStats,
    VoxelGrid, generate_terrain,
};

pub use edit::EditError;
pub use events::{PumpStats, WorldEvent};

/// A batch paired with the material it should be drawn with.
#[derive(Clone, Copy, Debug)]
pub struct RenderBatch<'a> {
    pub key: BatchKey,
    pub material: &'a Material,
    pub batch: &'a MeshBatch,
}

#[derive(Clone, Debug, Default)]
pub struct GenerationReport {
    pub terrain: TerrainStats,
    pub trees: HashMap<TreeArchetype, usize>,
    pub instances: usize,
    pub unbatched: usize,
    pub batches: usize,
    pub elapsed: Duration,
}

impl GenerationReport {
    pub fn trees_planted(&self) -> usize {
        self.trees.values().sum()
    }
}

struct TreePlanter<'a> {
    placer: Option<&'a VegetationPlacer>,
    planted: Vec<Vegetation>,
}

impl SurfaceVisitor for TreePlanter<'_> {
    fn visit_surface(&mut self, grid: &mut VoxelGrid, x: i32, z: i32, y: i32) {
        if let Some(tree) = self.placer.and_then(|p| p.consider(grid, x, z, y)) {
            self.planted.push(tree);
        }
    }
}

pub struct World {
    params: GenerationParams,
    noise: Box<dyn NoiseSource>,
    placer: Option<VegetationPlacer>,
    materials: MaterialCatalog,
    grid: VoxelGrid,
    batches: MeshBatches,
    vegetation: Vec<Vegetation>,
    pool: Option<ThreadPool>,
    events_tx: Sender<WorldEvent>,
    events_rx: Receiver<WorldEvent>,
    revision: u64,
}

impl World {
    /// An all-air world; call [`World::generate`] to fill it.
    pub fn new(
        params: GenerationParams,
        noise: Box<dyn NoiseSource>,
        placer: Option<VegetationPlacer>,
    ) -> Result<Self, ParamsError> {
        params.validate()?;
        let grid = VoxelGrid::new(params.width, params.height);
        let (events_tx, events_rx) = unbounded::<WorldEvent>();
        Ok(Self {
            params,
            noise,
            placer,
            materials: MaterialCatalog::builtin(),
            grid,
            batches: MeshBatches::new(),
            vegetation: Vec::new(),
            pool: None,
            events_tx,
            events_rx,
            revision: 0,
        })
    }

    /// Simplex noise seeded from `params` and trees from `params.trees`.
    pub fn from_params(params: GenerationParams) -> Result<Self, ParamsError> {
        let noise = Box::new(SimplexNoise::new(params.seed));
        let placer = VegetationPlacer::from_params(params.seed, &params.trees);
        Self::new(params, noise, placer)
    }

    pub fn with_materials(mut self, materials: MaterialCatalog) -> Self {
        self.materials = materials;
        self
    }

    /// Rebuilds after edits on a dedicated rayon pool; `0` goes back to the
    /// sequential walk.
    pub fn set_batch_threads(&mut self, threads: usize) -> Result<(), ThreadPoolBuildError> {
        self.pool = if threads == 0 {
            None
        } else {
            Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("voxland-batch-{i}"))
                    .build()?,
            )
        };
        Ok(())
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn batches(&self) -> &MeshBatches {
        &self.batches
    }

    pub fn vegetation(&self) -> &[Vegetation] {
        &self.vegetation
    }

    pub fn materials(&self) -> &MaterialCatalog {
        &self.materials
    }

    /// Bumped on every generation and applied edit.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Builds terrain, batches and vegetation into fresh buffers, then swaps
    /// them in together. Anything from a previous run is discarded.
    pub fn generate(&mut self) -> GenerationReport {
        let start = Instant::now();
        let mut grid = VoxelGrid::new(self.params.width, self.params.height);
        let terrain = generate_terrain(&mut grid, &self.params, &*self.noise);

        let mut planter = TreePlanter {
            placer: self.placer.as_ref(),
            planted: Vec::new(),
        };
        let batches = build_batches_with(&mut grid, &mut planter);
        let vegetation = planter.planted;

        let mut trees: HashMap<TreeArchetype, usize> = HashMap::new();
        for tree in &vegetation {
            *trees.entry(tree.archetype).or_insert(0) += 1;
        }
        let report = GenerationReport {
            terrain,
            trees,
            instances: batches.total_instances(),
            unbatched: batches.unbatched(),
            batches: batches.len(),
            elapsed: start.elapsed(),
        };

        self.grid = grid;
        self.batches = batches;
        self.vegetation = vegetation;
        self.revision += 1;

        log::info!(
            "generated {}x{}x{} world (seed {}): {} instances in {} batches, {} trees, {:?}",
            self.params.width,
            self.params.height,
            self.params.width,
            self.params.seed,
            report.instances,
            report.batches,
            report.trees_planted(),
            report.elapsed
        );
        report
    }

    pub fn add_voxel(&mut self, x: i32, z: i32, y: i32, block: BlockType) -> Result<(), EditError> {
        self.apply_add(x, z, y, block)?;
        self.rebuild_batches();
        Ok(())
    }

    pub fn remove_voxel(&mut self, x: i32, z: i32, y: i32) -> Result<(), EditError> {
        self.apply_remove(x, z, y)?;
        self.rebuild_batches();
        Ok(())
    }

    fn apply_add(&mut self, x: i32, z: i32, y: i32, block: BlockType) -> Result<(), EditError> {
        if !self.grid.in_bounds(x, z, y) {
            return Err(EditError::OutOfBounds { x, z, y });
        }
        if block == BlockType::Tree {
            return Err(EditError::TreeBlock { x, z, y });
        }
        if self.grid.has_voxel(x, z, y) {
            return Err(EditError::Occupied { x, z, y });
        }
        self.grid.set_voxel(x, z, y, Voxel::solid(block));
        self.revision += 1;
        Ok(())
    }

    fn apply_remove(&mut self, x: i32, z: i32, y: i32) -> Result<(), EditError> {
        if !self.grid.in_bounds(x, z, y) {
            return Err(EditError::OutOfBounds { x, z, y });
        }
        if !self.grid.has_voxel(x, z, y) {
            return Err(EditError::Empty { x, z, y });
        }
        if self.grid.block_type(x, z, y) == Some(BlockType::Tree) {
            self.fell_tree_at(x, z, y);
        }
        self.grid.clear_voxel(x, z, y);
        self.revision += 1;
        Ok(())
    }

    /// Removing any cell of a tree takes the whole tree and its record with it.
    fn fell_tree_at(&mut self, x: i32, z: i32, y: i32) {
        let Some(i) = self.vegetation.iter().position(|t| t.claims(x, y, z)) else {
            return;
        };
        let tree = self.vegetation.remove(i);
        for &(cx, cy, cz) in &tree.cells {
            if self.grid.block_type(cx, cz, cy) == Some(BlockType::Tree) {
                self.grid.clear_voxel(cx, cz, cy);
            }
        }
        log::debug!(
            "felled {} tree at {:?} ({} cells)",
            tree.archetype,
            tree.base,
            tree.cells.len()
        );
    }

    fn rebuild_batches(&mut self) {
        let batches = match &self.pool {
            Some(pool) => pool.install(|| build_batches_parallel(&self.grid)),
            None => build_batches(&self.grid),
        };
        self.batches = batches;
    }

    /// Sender for queuing changes from other threads.
    pub fn events(&self) -> Sender<WorldEvent> {
        self.events_tx.clone()
    }

    /// Applies every queued event in arrival order. Edits are batched into a
    /// single rebuild at the end.
    pub fn pump_events(&mut self) -> PumpStats {
        let mut stats = PumpStats::default();
        let mut dirty = false;
        loop {
            let event = match self.events_rx.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };
            match event {
                WorldEvent::Regenerate => {
                    self.generate();
                    dirty = false;
                    stats.regenerated = true;
                    stats.applied += 1;
                }
                WorldEvent::ParamsChanged(params) => match self.replace_params(*params) {
                    Ok(()) => {
                        self.generate();
                        dirty = false;
                        stats.regenerated = true;
                        stats.applied += 1;
                    }
                    Err(e) => {
                        log::warn!("ignoring params change: {e}");
                        stats.rejected += 1;
                    }
                },
                WorldEvent::VoxelAdded { x, z, y, block } => match self.apply_add(x, z, y, block) {
                    Ok(()) => {
                        dirty = true;
                        stats.applied += 1;
                    }
                    Err(e) => {
                        log::warn!("add {block} rejected: {e}");
                        stats.rejected += 1;
                    }
                },
                WorldEvent::VoxelRemoved { x, z, y } => match self.apply_remove(x, z, y) {
                    Ok(()) => {
                        dirty = true;
                        stats.applied += 1;
                    }
                    Err(e) => {
                        log::warn!("remove rejected: {e}");
                        stats.rejected += 1;
                    }
                },
            }
        }
        if dirty {
            self.rebuild_batches();
        }
        stats
    }

    /// Swaps in new params; the noise is reseeded only when the seed changes.
    fn replace_params(&mut self, params: GenerationParams) -> Result<(), ParamsError> {
        params.validate()?;
        if params.seed != self.params.seed {
            self.noise = Box::new(SimplexNoise::new(params.seed));
        }
        self.placer = VegetationPlacer::from_params(params.seed, &params.trees);
        self.params = params;
        Ok(())
    }

    pub fn render_batches(&self) -> impl Iterator<Item = RenderBatch<'_>> {
        self.batches.iter().map(move |batch| RenderBatch {
            key: batch.key,
            material: self.materials.get(batch.key.block),
            batch,
        })
    }

    /// Grid centre lifted onto the terrain surface.
    pub fn spawn_point(&self) -> Vec3 {
        let c = self.grid.center_map();
        let y = self.grid.height_by_xz(c.x as i32, c.z as i32);
        Vec3::new(c.x, y as f32, c.z)
    }
}

impl SpatialQuery for World {
    fn in_bounds(&self, x: i32, z: i32, y: i32) -> bool {
        self.grid.in_bounds(x, z, y)
    }

    fn has_voxel(&self, x: i32, z: i32, y: i32) -> bool {
        self.grid.has_voxel(x, z, y)
    }

    fn block_at(&self, x: i32, z: i32, y: i32) -> Option<BlockType> {
        self.grid.block_type(x, z, y)
    }

    fn height_by_xz(&self, x: i32, z: i32) -> i32 {
        self.grid.height_by_xz(x, z)
    }

    fn center_map(&self) -> Vec3 {
        self.grid.center_map()
    }
}
