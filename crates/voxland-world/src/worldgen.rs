use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default)]
    pub grid: Grid,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub biome: Biome,
    #[serde(default)]
    pub water: Water,
    #[serde(default)]
    pub flat: Flat,
    #[serde(default)]
    pub trees: Trees,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            mode: Mode::Normal,
            grid: Grid::default(),
            terrain: Terrain::default(),
            biome: Biome::default(),
            water: Water::default(),
            flat: Flat::default(),
            trees: Trees::default(),
        }
    }
}

fn default_seed() -> i32 {
    1337
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Normal,
    Flat,
}

fn default_mode() -> Mode {
    Mode::Normal
}

#[derive(Clone, Debug, Deserialize)]
pub struct Grid {
    #[serde(default = "default_grid_width")]
    pub width: usize,
    #[serde(default = "default_grid_height")]
    pub height: usize,
}
fn default_grid_width() -> usize {
    256
}
fn default_grid_height() -> usize {
    20
}
impl Default for Grid {
    fn default() -> Self {
        Self {
            width: default_grid_width(),
            height: default_grid_height(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Terrain {
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_magnitude")]
    pub magnitude: f32,
    #[serde(default = "default_offset")]
    pub offset: f32,
}
fn default_scale() -> f32 {
    100.0
}
fn default_magnitude() -> f32 {
    0.4
}
fn default_offset() -> f32 {
    0.4
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            magnitude: default_magnitude(),
            offset: default_offset(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Biome {
    #[serde(default = "default_sand_level")]
    pub sand_level: usize,
    #[serde(default = "default_stone_level")]
    pub stone_level: usize,
}
fn default_sand_level() -> usize {
    2
}
fn default_stone_level() -> usize {
    3
}
impl Default for Biome {
    fn default() -> Self {
        Self {
            sand_level: default_sand_level(),
            stone_level: default_stone_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Water {
    #[serde(default = "default_water_enable")]
    pub enable: bool,
    #[serde(default = "default_water_level")]
    pub level: usize,
}
fn default_water_enable() -> bool {
    true
}
fn default_water_level() -> usize {
    3
}
impl Default for Water {
    fn default() -> Self {
        Self {
            enable: default_water_enable(),
            level: default_water_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Flat {
    #[serde(default = "default_flat_thickness")]
    pub thickness: usize,
}
fn default_flat_thickness() -> usize {
    3
}
impl Default for Flat {
    fn default() -> Self {
        Self {
            thickness: default_flat_thickness(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Trees {
    #[serde(default = "default_trees_enable")]
    pub enable: bool,
    #[serde(default = "default_tree_probability")]
    pub probability: f32,
    #[serde(default = "default_tree_source")]
    pub source: TreeSourceKind,
    #[serde(default = "default_tree_dir")]
    pub dir: String,
}
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TreeSourceKind {
    Builtin,
    Files,
}
fn default_trees_enable() -> bool {
    true
}
fn default_tree_probability() -> f32 {
    0.003
}
fn default_tree_source() -> TreeSourceKind {
    TreeSourceKind::Builtin
}
fn default_tree_dir() -> String {
    "assets/trees".into()
}
impl Default for Trees {
    fn default() -> Self {
        Self {
            enable: default_trees_enable(),
            probability: default_tree_probability(),
            source: default_tree_source(),
            dir: default_tree_dir(),
        }
    }
}

// --- Runtime params (immutable, validated) ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerrainMode {
    Noise,
    Flat { thickness: usize },
}

/// Row thresholds counted from the ground up: row 0 is stone, rows below
/// `sand_level` are sand, rows below `stone_level` are dirt, the rest grass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BiomeThresholds {
    pub sand_level: usize,
    pub stone_level: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeSource {
    Builtin,
    Files(PathBuf),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeParams {
    pub enable: bool,
    pub probability: f32,
    pub source: TreeSource,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParams {
    pub seed: i32,
    pub width: usize,
    pub height: usize,
    pub mode: TerrainMode,
    pub scale: f32,
    pub magnitude: f32,
    pub offset: f32,
    pub biome: BiomeThresholds,
    pub water_level: Option<usize>,
    pub trees: TreeParams,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            width: default_grid_width(),
            height: default_grid_height(),
            mode: TerrainMode::Noise,
            scale: default_scale(),
            magnitude: default_magnitude(),
            offset: default_offset(),
            biome: BiomeThresholds {
                sand_level: default_sand_level(),
                stone_level: default_stone_level(),
            },
            water_level: Some(default_water_level()),
            trees: TreeParams {
                enable: default_trees_enable(),
                probability: default_tree_probability(),
                source: TreeSource::Builtin,
            },
        }
    }
}

impl GenerationParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Result<Self, ParamsError> {
        let params = Self {
            seed: cfg.seed,
            width: cfg.grid.width,
            height: cfg.grid.height,
            mode: match cfg.mode {
                Mode::Normal => TerrainMode::Noise,
                Mode::Flat => TerrainMode::Flat {
                    thickness: cfg.flat.thickness,
                },
            },
            scale: cfg.terrain.scale,
            magnitude: cfg.terrain.magnitude,
            offset: cfg.terrain.offset,
            biome: BiomeThresholds {
                sand_level: cfg.biome.sand_level,
                stone_level: cfg.biome.stone_level,
            },
            water_level: if cfg.water.enable {
                Some(cfg.water.level)
            } else {
                None
            },
            trees: TreeParams {
                enable: cfg.trees.enable,
                probability: cfg.trees.probability,
                source: match cfg.trees.source {
                    TreeSourceKind::Builtin => TreeSource::Builtin,
                    TreeSourceKind::Files => TreeSource::Files(PathBuf::from(&cfg.trees.dir)),
                },
            },
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.width == 0 || self.height == 0 {
            return Err(ParamsError::ZeroExtent {
                width: self.width,
                height: self.height,
            });
        }
        if !self.scale.is_finite() {
            return Err(ParamsError::NonFinite("terrain.scale"));
        }
        if self.scale <= 0.0 {
            return Err(ParamsError::NonPositiveScale(self.scale));
        }
        if !self.magnitude.is_finite() {
            return Err(ParamsError::NonFinite("terrain.magnitude"));
        }
        if !self.offset.is_finite() {
            return Err(ParamsError::NonFinite("terrain.offset"));
        }
        let p = self.trees.probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ParamsError::ProbabilityOutOfRange(p));
        }
        Ok(())
    }

    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    pub fn without_trees(mut self) -> Self {
        self.trees.enable = false;
        self
    }

    pub fn without_water(mut self) -> Self {
        self.water_level = None;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParamsError {
    ZeroExtent { width: usize, height: usize },
    NonPositiveScale(f32),
    NonFinite(&'static str),
    ProbabilityOutOfRange(f32),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::ZeroExtent { width, height } => {
                write!(f, "grid extents must be non-zero (width={width}, height={height})")
            }
            ParamsError::NonPositiveScale(s) => {
                write!(f, "terrain.scale must be positive, got {s}")
            }
            ParamsError::NonFinite(field) => write!(f, "{field} must be a finite number"),
            ParamsError::ProbabilityOutOfRange(p) => {
                write!(f, "trees.probability must lie in [0, 1], got {p}")
            }
        }
    }
}

impl Error for ParamsError {}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: WorldGenConfig = toml::from_str(&s)?;
    Ok(cfg)
}

pub fn load_params_from_path(path: &Path) -> Result<GenerationParams, Box<dyn Error>> {
    let cfg = load_config_from_path(path)?;
    Ok(GenerationParams::from_config(&cfg)?)
}
