//! Tree archetypes, tree definitions and vegetation placement.
#![forbid(unsafe_code)]

mod archetype;
mod definition;
mod format;
mod library;
mod placer;

pub use archetype::TreeArchetype;
pub use definition::{PartMaterial, TreeDefinition, TreePart, TreeRole};
pub use format::{parse_color, parse_definition};
pub use library::{TreeLibrary, TreeLoadError};
pub use placer::{Vegetation, VegetationPart, VegetationPlacer, rand01_tree};
