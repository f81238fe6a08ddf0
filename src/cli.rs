use std::path::PathBuf;

use clap::Parser;
use voxland_world::{GenerationParams, TerrainMode, TreeSource};

#[derive(Parser, Debug)]
#[command(name = "voxland", about = "Generate a voxel island and report its batches")]
pub struct Cli {
    /// Worldgen TOML; defaults to assets/worldgen.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Assets root (falls back to VOXLAND_ASSETS, then a nearby search).
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Block materials TOML layered over the built-in palette.
    #[arg(long)]
    pub materials: Option<PathBuf>,

    #[arg(long)]
    pub seed: Option<i32>,

    #[arg(long)]
    pub width: Option<usize>,

    #[arg(long)]
    pub height: Option<usize>,

    /// Flat world of the given thickness instead of noise terrain.
    #[arg(long, value_name = "THICKNESS")]
    pub flat: Option<usize>,

    /// Load tree definitions (<archetype>.json) from this directory.
    #[arg(long, value_name = "DIR")]
    pub trees_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub no_trees: bool,

    /// Print a top-down ASCII heightmap.
    #[arg(long, default_value_t = false)]
    pub heightmap: bool,
}

impl Cli {
    /// Flags win over whatever the config file said.
    pub fn apply_overrides(&self, mut params: GenerationParams) -> GenerationParams {
        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        if let Some(w) = self.width {
            params.width = w;
        }
        if let Some(h) = self.height {
            params.height = h;
        }
        if let Some(thickness) = self.flat {
            params.mode = TerrainMode::Flat { thickness };
        }
        if let Some(dir) = &self.trees_dir {
            params.trees.enable = true;
            params.trees.source = TreeSource::Files(dir.clone());
        }
        if self.no_trees {
            params.trees.enable = false;
        }
        params
    }
}
