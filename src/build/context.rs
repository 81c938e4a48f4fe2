//! Build context containing configuration and paths for a conversion run.

use crate::catalog::{IconCatalog, SheetGeometry};
use crate::config::IconsheetConfig;
use std::path::{Path, PathBuf};

/// Everything a conversion run needs: the loaded configuration, the
/// directory relative paths resolve against, and run options.
///
/// The context is read-only once built; each stage borrows it.
#[derive(Debug, Clone)]
pub struct BuildContext {
    config: IconsheetConfig,
    /// Directory containing iconsheet.toml (or the working directory)
    project_root: PathBuf,
    dry_run: bool,
    /// Only convert this icon
    icon_filter: Option<String>,
}

impl BuildContext {
    /// Create a new build context.
    pub fn new(config: IconsheetConfig, project_root: PathBuf) -> Self {
        Self { config, project_root, dry_run: false, icon_filter: None }
    }

    pub fn config(&self) -> &IconsheetConfig {
        &self.config
    }

    /// Sprite sheet source file (resolved).
    pub fn source_path(&self) -> PathBuf {
        self.resolve_path(&self.config.sheet.source)
    }

    /// Output directory (resolved).
    pub fn out_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.project.out)
    }

    pub fn geometry(&self) -> SheetGeometry {
        self.config.geometry()
    }

    /// Catalog restricted by the icon filter, if one is set.
    ///
    /// Returns `None` when the filter names an icon that does not exist.
    pub fn catalog(&self) -> Option<IconCatalog> {
        let catalog = self.config.catalog();
        match &self.icon_filter {
            Some(name) => catalog.only(name),
            None => Some(catalog),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn icon_filter(&self) -> Option<&str> {
        self.icon_filter.as_deref()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Restrict the run to a single icon.
    pub fn with_filter(mut self, icon: impl Into<String>) -> Self {
        self.icon_filter = Some(icon.into());
        self
    }

    /// Resolve a path relative to the project root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        crate::config::resolve_path(&self.project_root, path)
    }
}
