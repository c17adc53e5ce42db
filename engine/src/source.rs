//! Template source loading.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::{EngineOptions, SourceError};

/// Supplies template text by file identifier.
pub trait SourceProvider: Send + Sync {
    fn get_text(&self, file: &str) -> Result<Arc<str>, SourceError>;
}

/// Reads templates from disk, confined to a root directory.
#[derive(Debug)]
pub struct FsSourceProvider {
    root: PathBuf,
    cache: RwLock<HashMap<PathBuf, Arc<str>>>,
}

impl FsSourceProvider {
    pub fn new(options: &EngineOptions) -> Self {
        Self {
            root: normalize(options.root_dir()),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `file` against the root without touching the filesystem.
    /// Fails if the result escapes the root.
    pub fn resolve(&self, file: &str) -> Result<PathBuf, SourceError> {
        let path = normalize(&self.root.join(file));
        if !path.starts_with(&self.root) {
            warn!(file, path = %path.display(), "template path outside root denied");
            return Err(SourceError::outside_root(path));
        }
        Ok(path)
    }

    fn cached(&self, path: &Path) -> Option<Arc<str>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }
}

impl SourceProvider for FsSourceProvider {
    fn get_text(&self, file: &str) -> Result<Arc<str>, SourceError> {
        let path = self.resolve(file)?;

        if let Some(text) = self.cached(&path) {
            return Ok(text);
        }

        let metadata = fs::metadata(&path).map_err(|e| SourceError::inaccessible(&path, e))?;
        if !metadata.is_file() {
            return Err(SourceError::not_a_file(path));
        }
        let text: Arc<str> = fs::read_to_string(&path)
            .map_err(|e| SourceError::unreadable(&path, e))?
            .into();

        debug!(path = %path.display(), bytes = text.len(), "loaded template source");

        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, Arc::clone(&text));
        Ok(text)
    }
}

/// Fold `.` and `..` components lexically. `..` never climbs above the
/// filesystem root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Serves templates from memory.
#[derive(Debug, Default)]
pub struct MemorySourceProvider {
    sources: HashMap<String, Arc<str>>,
}

impl MemorySourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, file: impl Into<String>, source: impl Into<Arc<str>>) -> Self {
        self.insert(file, source);
        self
    }

    pub fn insert(&mut self, file: impl Into<String>, source: impl Into<Arc<str>>) {
        self.sources.insert(file.into(), source.into());
    }
}

impl SourceProvider for MemorySourceProvider {
    fn get_text(&self, file: &str) -> Result<Arc<str>, SourceError> {
        self.sources
            .get(file)
            .cloned()
            .ok_or_else(|| SourceError::not_found(file))
    }
}
