use std::collections::BTreeMap;

use voxland_blocks::BlockType;
use voxland_geom::Vec3;

/// Whether the cell above is open to the sky.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Exposure {
    Exposed,
    Buried,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchKey {
    pub block: BlockType,
    pub exposure: Exposure,
}

impl BatchKey {
    pub const fn new(block: BlockType, exposure: Exposure) -> Self {
        Self { block, exposure }
    }

    /// Exposed cells are drawn on the shadow-casting path.
    #[inline]
    pub fn casts_shadow(&self) -> bool {
        self.exposure == Exposure::Exposed
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub translation: Vec3,
}

impl InstanceTransform {
    #[inline]
    pub fn at_cell(x: i32, y: i32, z: i32) -> Self {
        Self {
            translation: Vec3::cell_center(x, y, z),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshBatch {
    pub key: BatchKey,
    pub instances: Vec<InstanceTransform>,
}

impl MeshBatch {
    pub fn new(key: BatchKey) -> Self {
        Self {
            key,
            instances: Vec::new(),
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn casts_shadow(&self) -> bool {
        self.key.casts_shadow()
    }
}

/// All batches for one grid snapshot, keyed by block type and exposure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBatches {
    batches: BTreeMap<BatchKey, MeshBatch>,
    unbatched: usize,
}

impl MeshBatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: BatchKey, instance: InstanceTransform) {
        self.batches
            .entry(key)
            .or_insert_with(|| MeshBatch::new(key))
            .instances
            .push(instance);
    }

    pub(crate) fn add_unbatched(&mut self, n: usize) {
        self.unbatched += n;
    }

    pub(crate) fn set_unbatched(&mut self, n: usize) {
        self.unbatched = n;
    }

    /// Appends `other`'s instances after this one's, batch by batch.
    pub(crate) fn append(&mut self, other: MeshBatches) {
        for (key, batch) in other.batches {
            self.batches
                .entry(key)
                .or_insert_with(|| MeshBatch::new(key))
                .instances
                .extend(batch.instances);
        }
        self.unbatched += other.unbatched;
    }

    pub fn get(&self, key: BatchKey) -> Option<&MeshBatch> {
        self.batches.get(&key)
    }

    pub fn count_for(&self, key: BatchKey) -> usize {
        self.get(key).map_or(0, MeshBatch::count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MeshBatch> {
        self.batches.values()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn total_instances(&self) -> usize {
        self.batches.values().map(MeshBatch::count).sum()
    }

    /// Occupied cells with no instanced representation (tree cells, untyped cells).
    pub fn unbatched(&self) -> usize {
        self.unbatched
    }

    /// Instance counts per block type with both exposure paths folded together.
    pub fn by_block(&self) -> BTreeMap<BlockType, usize> {
        let mut out = BTreeMap::new();
        for batch in self.batches.values() {
            *out.entry(batch.key.block).or_insert(0) += batch.count();
        }
        out
    }
}

impl<'a> IntoIterator for &'a MeshBatches {
    type Item = &'a MeshBatch;
    type IntoIter = std::collections::btree_map::Values<'a, BatchKey, MeshBatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.batches.values()
    }
}
