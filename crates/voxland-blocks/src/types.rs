use std::fmt;
use std::str::FromStr;

/// Block kinds the terrain generator and vegetation placer can write.
///
/// The declaration order of the four terrain tiers (`Stone`, `Sand`, `Dirt`,
/// `Grass`) is the bottom-up biome order of a generated column.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum BlockType {
    Stone,
    Sand,
    Dirt,
    Grass,
    Water,
    Tree,
}

impl BlockType {
    pub const ALL: [BlockType; 6] = [
        BlockType::Stone,
        BlockType::Sand,
        BlockType::Dirt,
        BlockType::Grass,
        BlockType::Water,
        BlockType::Tree,
    ];

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Stone => "stone",
            BlockType::Sand => "sand",
            BlockType::Dirt => "dirt",
            BlockType::Grass => "grass",
            BlockType::Water => "water",
            BlockType::Tree => "tree",
        }
    }

    /// Position in the stone → sand → dirt → grass layering, `None` for
    /// blocks that are not part of it.
    #[inline]
    pub fn biome_tier(self) -> Option<u8> {
        match self {
            BlockType::Stone => Some(0),
            BlockType::Sand => Some(1),
            BlockType::Dirt => Some(2),
            BlockType::Grass => Some(3),
            BlockType::Water | BlockType::Tree => None,
        }
    }

    /// Trees carry their own geometry and are never drawn as instanced cubes.
    #[inline]
    pub fn is_instanced(self) -> bool {
        !matches!(self, BlockType::Tree)
    }

    #[inline]
    pub fn is_liquid(self) -> bool {
        matches!(self, BlockType::Water)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownBlockType(pub String);

impl fmt::Display for UnknownBlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block type '{}'", self.0)
    }
}

impl std::error::Error for UnknownBlockType {}

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBlockType(s.to_string()))
    }
}

/// One grid cell. `occupied` is the presence flag; `block` only selects the
/// batch/material the cell is drawn with.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Voxel {
    pub block: Option<BlockType>,
    pub occupied: bool,
}

impl Voxel {
    pub const AIR: Voxel = Voxel {
        block: None,
        occupied: false,
    };

    #[inline]
    pub const fn solid(block: BlockType) -> Self {
        Self {
            block: Some(block),
            occupied: true,
        }
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        !self.occupied
    }

    /// The block type of an occupied cell.
    #[inline]
    pub fn occupied_block(&self) -> Option<BlockType> {
        if self.occupied { self.block } else { None }
    }
}
