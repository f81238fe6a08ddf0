use voxland_blocks::BlockType;
use voxland_world::GenerationParams;

/// Requests applied by the owning [`crate::World`] in `pump_events`.
#[derive(Clone, Debug)]
pub enum WorldEvent {
    Regenerate,
    ParamsChanged(Box<GenerationParams>),
    VoxelAdded {
        x: i32,
        z: i32,
        y: i32,
        block: BlockType,
    },
    VoxelRemoved {
        x: i32,
        z: i32,
        y: i32,
    },
}

/// What one `pump_events` call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub applied: usize,
    pub rejected: usize,
    pub regenerated: bool,
}
