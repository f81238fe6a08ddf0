use voxland_blocks::{BlockType, Voxel};
use voxland_geom::{Aabb, Vec3};
use voxland_world::{TreeParams, TreeSource, VoxelGrid};

use crate::archetype::TreeArchetype;
use crate::definition::{PartMaterial, TreeRole};
use crate::library::TreeLibrary;

const SALT_PLACE: u32 = 0x5eed_7ee5;
const SALT_KIND: u32 = 0x0a2c_4e11;

fn hash2_tree(ix: i32, iz: i32, seed: u32) -> u32 {
    let mut h = (ix as u32).wrapping_mul(0x85eb_ca6b)
        ^ (iz as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

/// Deterministic per-column value in `[0, 1)`.
pub fn rand01_tree(world_seed: u32, ix: i32, iz: i32, salt: u32) -> f32 {
    let h = hash2_tree(ix, iz, (world_seed ^ salt).wrapping_add(0x9E37_79B9));
    ((h & 0x00FF_FFFF) as f32) / 16_777_216.0
}

/// A placed box in world space, for whatever draws trees.
#[derive(Clone, Debug, PartialEq)]
pub struct VegetationPart {
    pub center: Vec3,
    pub size: Vec3,
    pub role: TreeRole,
    pub material: PartMaterial,
}

impl VegetationPart {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.center, self.size)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Vegetation {
    pub archetype: TreeArchetype,
    /// Cell the trunk starts in, as `(x, y, z)`.
    pub base: (i32, i32, i32),
    pub parts: Vec<VegetationPart>,
    /// Grid cells this tree actually claimed, as `(x, y, z)`; clipped and
    /// never shared with another tree.
    pub cells: Vec<(i32, i32, i32)>,
}

impl Vegetation {
    pub fn claims(&self, x: i32, y: i32, z: i32) -> bool {
        self.cells.contains(&(x, y, z))
    }

    pub fn bounds(&self) -> Aabb {
        let mut parts = self.parts.iter().map(VegetationPart::bounds);
        let first = parts.next().unwrap_or_else(|| {
            let c = Vec3::cell_center(self.base.0, self.base.1, self.base.2);
            Aabb::from_center_size(c, Vec3::ZERO)
        });
        parts.fold(first, |acc, b| acc.union(&b))
    }
}

pub struct VegetationPlacer {
    seed: u32,
    probability: f32,
    library: TreeLibrary,
}

impl VegetationPlacer {
    pub fn new(seed: i32, probability: f32, library: TreeLibrary) -> Self {
        Self {
            seed: seed as u32,
            probability,
            library,
        }
    }

    /// `None` when trees are disabled.
    pub fn from_params(seed: i32, trees: &TreeParams) -> Option<Self> {
        if !trees.enable {
            return None;
        }
        let library = match &trees.source {
            TreeSource::Builtin => TreeLibrary::builtin(),
            TreeSource::Files(dir) => TreeLibrary::load_dir(dir),
        };
        Some(Self::new(seed, trees.probability, library))
    }

    pub fn probability(&self) -> f32 {
        self.probability
    }

    pub fn library(&self) -> &TreeLibrary {
        &self.library
    }

    /// Whether column `(x, z)` wins the placement roll.
    pub fn roll(&self, x: i32, z: i32) -> bool {
        rand01_tree(self.seed, x, z, SALT_PLACE) < self.probability
    }

    pub fn archetype_at(&self, x: i32, z: i32) -> TreeArchetype {
        TreeArchetype::select(rand01_tree(self.seed, x, z, SALT_KIND))
    }

    /// Called for an exposed cell; plants a tree on top of it when the cell is
    /// grass, the cell above is open and the column wins its roll.
    pub fn consider(&self, grid: &mut VoxelGrid, x: i32, z: i32, y: i32) -> Option<Vegetation> {
        if grid.block_type(x, z, y) != Some(BlockType::Grass) {
            return None;
        }
        if !grid.in_bounds(x, z, y + 1) || grid.has_voxel(x, z, y + 1) {
            return None;
        }
        if !self.roll(x, z) {
            return None;
        }
        self.place(grid, self.archetype_at(x, z), (x, y + 1, z))
    }

    /// Writes the archetype's footprint at `base` and returns its render record.
    ///
    /// Only air cells are claimed; cells off the grid or already occupied are
    /// left alone. Returns `None` if the archetype failed to load.
    pub fn place(
        &self,
        grid: &mut VoxelGrid,
        archetype: TreeArchetype,
        base: (i32, i32, i32),
    ) -> Option<Vegetation> {
        let def = match self.library.get(archetype) {
            Ok(def) => def,
            Err(e) => {
                log::warn!("skipping {archetype} tree at {base:?}: {e}");
                return None;
            }
        };
        let (bx, by, bz) = base;

        let mut cells = Vec::new();
        for (dx, dy, dz) in def.footprint() {
            let (x, y, z) = (bx + dx, by + dy, bz + dz);
            if grid.in_bounds(x, z, y)
                && !grid.has_voxel(x, z, y)
                && grid.set_voxel(x, z, y, Voxel::solid(BlockType::Tree))
            {
                cells.push((x, y, z));
            }
        }

        let parts = def
            .parts
            .iter()
            .map(|part| {
                let [(x0, nx), (y0, ny), (z0, nz)] = part.cell_extent();
                let size = Vec3::new(nx as f32, ny as f32, nz as f32);
                let min = Vec3::new((bx + x0) as f32, (by + y0) as f32, (bz + z0) as f32);
                VegetationPart {
                    center: min + size * 0.5,
                    size,
                    role: part.role,
                    material: part.material.clone(),
                }
            })
            .collect();

        log::trace!("planted {archetype} tree at {base:?} ({} cells)", cells.len());
        Some(Vegetation {
            archetype,
            base,
            parts,
            cells,
        })
    }
}
