use std::path::{Path, PathBuf};

pub fn resolve_assets_root(cli: Option<&Path>) -> PathBuf {
    // Precedence: CLI flag -> VOXLAND_ASSETS env -> search nearby dirs -> CWD
    if let Some(p) = cli {
        if p.exists() {
            return p.to_path_buf();
        }
        log::warn!("assets root {} does not exist; searching", p.display());
    }
    if let Ok(p) = std::env::var("VOXLAND_ASSETS") {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return pb;
        }
    }
    // Search candidates: CWD, executable dir, crate root; climb up to 5 parents
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.to_path_buf());
        }
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

    for base in candidates {
        let mut cur = base.clone();
        for _ in 0..5 {
            if worldgen_path(&cur).exists() {
                return cur;
            }
            if let Some(parent) = cur.parent() {
                cur = parent.to_path_buf();
            } else {
                break;
            }
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn worldgen_path(root: &Path) -> PathBuf {
    root.join("assets/worldgen.toml")
}

pub fn materials_path(root: &Path) -> PathBuf {
    root.join("assets/materials.toml")
}

/// Relative paths from config files are taken against the assets root.
pub fn under_root(root: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_wins_when_present() {
        let here = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        assert_eq!(resolve_assets_root(Some(&here)), here);
    }

    #[test]
    fn relative_paths_join_the_root() {
        let root = Path::new("/srv/voxland");
        assert_eq!(
            under_root(root, Path::new("assets/trees")),
            PathBuf::from("/srv/voxland/assets/trees")
        );
        assert_eq!(under_root(root, Path::new("/abs")), PathBuf::from("/abs"));
    }
}
