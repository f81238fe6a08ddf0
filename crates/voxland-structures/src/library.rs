use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::archetype::TreeArchetype;
use crate::definition::TreeDefinition;
use crate::format::parse_definition;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeLoadError {
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    Empty { path: PathBuf },
}

impl fmt::Display for TreeLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeLoadError::Io { path, message } => {
                write!(f, "cannot read tree definition {}: {message}", path.display())
            }
            TreeLoadError::Parse { path, message } => {
                write!(f, "invalid tree definition {}: {message}", path.display())
            }
            TreeLoadError::Empty { path } => {
                write!(f, "tree definition {} has no parts", path.display())
            }
        }
    }
}

impl Error for TreeLoadError {}

type Entry = Result<Arc<TreeDefinition>, TreeLoadError>;

/// One definition (or its load failure) per archetype.
#[derive(Clone, Debug)]
pub struct TreeLibrary {
    entries: [Entry; 3],
}

impl TreeLibrary {
    pub fn builtin() -> Self {
        Self {
            entries: TreeArchetype::ALL.map(|a| Ok(Arc::new(TreeDefinition::builtin(a)))),
        }
    }

    /// Loads `<archetype>.json` from `dir` for every archetype.
    ///
    /// Failures are kept per archetype so the remaining trees still grow.
    pub fn load_dir(dir: &Path) -> Self {
        let entries = TreeArchetype::ALL.map(|a| {
            let path = dir.join(a.file_name());
            let entry = load_file(a, &path);
            match &entry {
                Ok(def) => log::info!(
                    "loaded {} tree from {} ({} parts)",
                    a,
                    path.display(),
                    def.parts.len()
                ),
                Err(e) => log::warn!("{e}; {a} trees will be skipped"),
            }
            entry
        });
        Self { entries }
    }

    pub fn from_definitions(defs: impl IntoIterator<Item = TreeDefinition>) -> Self {
        let mut lib = Self::builtin();
        for def in defs {
            let slot = def.archetype.slot();
            lib.entries[slot] = Ok(Arc::new(def));
        }
        lib
    }

    pub fn get(&self, archetype: TreeArchetype) -> Result<&Arc<TreeDefinition>, &TreeLoadError> {
        self.entries[archetype.slot()].as_ref()
    }

    pub fn failures(&self) -> impl Iterator<Item = (TreeArchetype, &TreeLoadError)> {
        TreeArchetype::ALL
            .into_iter()
            .zip(self.entries.iter())
            .filter_map(|(a, e)| e.as_ref().err().map(|err| (a, err)))
    }
}

impl Default for TreeLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

fn load_file(archetype: TreeArchetype, path: &Path) -> Entry {
    let json = fs::read_to_string(path).map_err(|e| TreeLoadError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_definition(archetype, &json, path).map(Arc::new)
}
