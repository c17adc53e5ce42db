//! Engine options.

use std::path::{Path, PathBuf};

use crate::OptionsError;

/// Validated engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    root_dir: PathBuf,
}

impl EngineOptions {
    /// Options rooted at `root_dir`, which must be absolute.
    pub fn new(root_dir: impl Into<PathBuf>) -> Result<Self, OptionsError> {
        Self::builder().root_dir(root_dir).build()
    }

    pub fn builder() -> EngineOptionsBuilder {
        EngineOptionsBuilder::default()
    }

    /// Directory all template paths are resolved against and confined to.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

/// Builder for [`EngineOptions`].
#[derive(Debug, Clone, Default)]
pub struct EngineOptionsBuilder {
    root_dir: Option<PathBuf>,
}

impl EngineOptionsBuilder {
    pub fn root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    pub fn build(self) -> Result<EngineOptions, OptionsError> {
        let root_dir = self
            .root_dir
            .ok_or_else(|| OptionsError::missing_option("root_dir"))?;

        if root_dir.as_os_str().is_empty() {
            return Err(OptionsError::bad_option(
                "root_dir",
                "",
                "'root_dir' must not be empty.",
            ));
        }
        if !root_dir.is_absolute() {
            return Err(OptionsError::bad_option(
                "root_dir",
                root_dir.display().to_string(),
                "'root_dir' must be an absolute path!",
            ));
        }

        Ok(EngineOptions { root_dir })
    }
}
