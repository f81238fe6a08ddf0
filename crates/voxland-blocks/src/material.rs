use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::types::BlockType;

/// Renderer-facing description of how one block type is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub block: BlockType,
    pub color: u32,
    pub opacity: f32,
    pub top_texture: Option<PathBuf>,
    pub side_texture: Option<PathBuf>,
}

impl Material {
    pub fn plain(block: BlockType, color: u32) -> Self {
        Self {
            block,
            color,
            opacity: 1.0,
            top_texture: None,
            side_texture: None,
        }
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    #[inline]
    pub fn key(&self) -> &'static str {
        self.block.name()
    }
}

#[derive(Clone, Debug)]
pub struct MaterialCatalog {
    by_block: HashMap<BlockType, Material>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MaterialCatalog {
    /// Palette and textures the viewer ships with.
    pub fn builtin() -> Self {
        let mut by_block = HashMap::new();
        let ground = PathBuf::from("assets/ground.jpg");
        by_block.insert(
            BlockType::Grass,
            Material {
                top_texture: Some(PathBuf::from("assets/grass.jpg")),
                side_texture: Some(ground.clone()),
                ..Material::plain(BlockType::Grass, 0x228b22)
            },
        );
        by_block.insert(
            BlockType::Dirt,
            Material {
                top_texture: Some(ground.clone()),
                side_texture: Some(ground),
                ..Material::plain(BlockType::Dirt, 0x926c4d)
            },
        );
        by_block.insert(BlockType::Stone, Material::plain(BlockType::Stone, 0x808080));
        by_block.insert(BlockType::Sand, Material::plain(BlockType::Sand, 0xc2b280));
        let water = PathBuf::from("assets/water.jpg");
        by_block.insert(
            BlockType::Water,
            Material {
                opacity: 0.7,
                top_texture: Some(water.clone()),
                side_texture: Some(water),
                ..Material::plain(BlockType::Water, 0x3f76e4)
            },
        );
        by_block.insert(BlockType::Tree, Material::plain(BlockType::Tree, 0x966f33));
        Self { by_block }
    }

    pub fn get(&self, block: BlockType) -> &Material {
        // builtin() seeds every variant and overrides only replace entries
        &self.by_block[&block]
    }

    pub fn len(&self) -> usize {
        self.by_block.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_block.is_empty()
    }

    /// Builtin catalog with the entries of a `[materials]` table layered on top.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::builtin();
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let block: BlockType = key.parse()?;
            let base = catalog.get(block).clone();
            let material = match entry {
                MaterialEntry::Color(color) => Material { color, ..base },
                MaterialEntry::Detail {
                    color,
                    opacity,
                    texture,
                    top,
                    side,
                } => {
                    let texture = texture.map(PathBuf::from);
                    Material {
                        block,
                        color: color.unwrap_or(base.color),
                        opacity: opacity.unwrap_or(base.opacity).clamp(0.0, 1.0),
                        top_texture: top
                            .map(PathBuf::from)
                            .or_else(|| texture.clone())
                            .or(base.top_texture),
                        side_texture: side.map(PathBuf::from).or(texture).or(base.side_texture),
                    }
                }
            };
            catalog.by_block.insert(block, material);
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct MaterialsConfig {
    #[serde(default)]
    pub materials: HashMap<String, MaterialEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    // Simple: grass = 0x228b22
    Color(u32),
    // Detailed: water = { color = 0x3f76e4, opacity = 0.7, texture = "assets/water.jpg" }
    Detail {
        color: Option<u32>,
        opacity: Option<f32>,
        texture: Option<String>,
        top: Option<String>,
        side: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_block() {
        let catalog = MaterialCatalog::builtin();
        assert_eq!(catalog.len(), BlockType::ALL.len());
        for b in BlockType::ALL {
            assert_eq!(catalog.get(b).block, b);
        }
        assert!(catalog.get(BlockType::Water).is_transparent());
        assert!(!catalog.get(BlockType::Stone).is_transparent());
    }

    #[test]
    fn toml_overrides_layer_on_builtin() {
        let src = r#"
            [materials]
            stone = 0x101010
            water = { opacity = 0.5, texture = "sea.png" }
            grass = { top = "top.png" }
        "#;
        let catalog = MaterialCatalog::from_toml_str(src).unwrap();
        assert_eq!(catalog.get(BlockType::Stone).color, 0x101010);
        let water = catalog.get(BlockType::Water);
        assert_eq!(water.opacity, 0.5);
        assert_eq!(water.top_texture.as_deref(), Some(Path::new("sea.png")));
        assert_eq!(water.side_texture.as_deref(), Some(Path::new("sea.png")));
        let grass = catalog.get(BlockType::Grass);
        assert_eq!(grass.top_texture.as_deref(), Some(Path::new("top.png")));
        assert_eq!(grass.color, 0x228b22);
        assert_eq!(
            grass.side_texture.as_deref(),
            Some(Path::new("assets/ground.jpg"))
        );
        assert_eq!(catalog.get(BlockType::Sand).color, 0xc2b280);
    }

    #[test]
    fn unknown_block_key_is_an_error() {
        let src = "[materials]\nlava = 0xff0000\n";
        assert!(MaterialCatalog::from_toml_str(src).is_err());
    }
}
