mod assets;
mod cli;
mod report;

use std::error::Error;

use clap::Parser;
use voxland_blocks::MaterialCatalog;
use voxland_runtime::World;
use voxland_world::{GenerationParams, TreeSource, load_params_from_path};

use crate::cli::Cli;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let root = assets::resolve_assets_root(cli.assets.as_deref());

    let config_path = cli.config.clone().or_else(|| {
        let p = assets::worldgen_path(&root);
        p.exists().then_some(p)
    });
    let params = match &config_path {
        Some(path) => {
            log::info!("worldgen config: {}", path.display());
            load_params_from_path(path)?
        }
        None => {
            log::info!("no worldgen config found; using defaults");
            GenerationParams::default()
        }
    };
    let mut params = cli.apply_overrides(params);
    if let TreeSource::Files(dir) = &params.trees.source {
        params.trees.source = TreeSource::Files(assets::under_root(&root, dir));
    }
    params.validate()?;

    let materials_path = cli
        .materials
        .clone()
        .unwrap_or_else(|| assets::materials_path(&root));
    let materials = if materials_path.exists() {
        MaterialCatalog::from_path(&materials_path)?
    } else {
        MaterialCatalog::builtin()
    };

    let mut world = World::from_params(params)?.with_materials(materials);

    let report = world.generate();
    report::print_report(&world, &report);
    if cli.heightmap {
        for row in report::heightmap_rows(&world) {
            println!("{row}");
        }
    }
    Ok(())
}
