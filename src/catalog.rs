//! Icon catalog and sprite sheet geometry
//!
//! Icons are named entries that point at a *cell key*; the key resolves to a
//! `(row, column)` grid position on the sheet. Several icons may share one
//! key when the sheet has no dedicated art for them, so the grid position is
//! stored once per key rather than per icon.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::emit::c_identifier;
use crate::region::Region;

/// Position of a cell on the sprite sheet grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
}

impl GridCell {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Fixed layout of a sprite sheet and the icon size produced from it.
///
/// The origin and cell size describe the specific sheet; they are
/// configuration, not something derived from the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGeometry {
    pub sheet_width: u32,
    pub sheet_height: u32,
    pub cell_size: u32,
    pub origin_x: i64,
    pub origin_y: i64,
    pub icon_size: u32,
}

impl Default for SheetGeometry {
    fn default() -> Self {
        Self {
            sheet_width: 1920,
            sheet_height: 1178,
            cell_size: 176,
            origin_x: 80,
            origin_y: 61,
            icon_size: 64,
        }
    }
}

impl SheetGeometry {
    /// Top-left pixel of a grid cell.
    ///
    /// ```
    /// use iconsheet::catalog::{GridCell, SheetGeometry};
    ///
    /// let geo = SheetGeometry::default();
    /// assert_eq!(geo.cell_origin(GridCell::new(0, 0)), (80, 61));
    /// assert_eq!(geo.cell_origin(GridCell::new(3, 9)), (80 + 9 * 176, 61 + 3 * 176));
    /// ```
    pub fn cell_origin(&self, cell: GridCell) -> (i64, i64) {
        (
            self.origin_x + cell.col as i64 * self.cell_size as i64,
            self.origin_y + cell.row as i64 * self.cell_size as i64,
        )
    }

    /// The full cell rectangle.
    pub fn cell_region(&self, cell: GridCell) -> Region {
        let (x, y) = self.cell_origin(cell);
        Region::new(x, y, self.cell_size, self.cell_size)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconEntry {
    pub name: String,
    pub cell_key: String,
}

impl IconEntry {
    /// Whether this icon borrows another cell's art.
    pub fn is_alias(&self) -> bool {
        self.name != self.cell_key
    }
}

/// Problem found while checking a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// No icons at all
    Empty,
    /// An icon refers to a cell key that was never defined
    UnknownCell { icon: String, cell_key: String },
    /// Same icon name listed twice
    DuplicateIcon(String),
    /// Two names map to the same C identifier and would write the same files
    StemCollision { first: String, second: String, identifier: String },
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogIssue::Empty => write!(f, "catalog contains no icons"),
            CatalogIssue::UnknownCell { icon, cell_key } => {
                write!(f, "icon '{}' refers to unknown cell '{}'", icon, cell_key)
            }
            CatalogIssue::DuplicateIcon(name) => write!(f, "icon '{}' is listed twice", name),
            CatalogIssue::StemCollision { first, second, identifier } => write!(
                f,
                "icons '{}' and '{}' both become '{}' and would overwrite each other",
                first, second, identifier
            ),
        }
    }
}

/// Mapping from icon names to grid cells, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconCatalog {
    cells: BTreeMap<String, GridCell>,
    icons: Vec<IconEntry>,
}

impl IconCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a cell key.
    pub fn with_cell(mut self, key: &str, cell: GridCell) -> Self {
        self.cells.insert(key.to_string(), cell);
        self
    }

    /// Add an icon with its own cell, keyed by the icon name.
    pub fn with_icon(self, name: &str, cell: GridCell) -> Self {
        self.with_cell(name, cell).with_alias(name, name)
    }

    /// Add an icon that reuses an existing cell key.
    pub fn with_alias(mut self, name: &str, cell_key: &str) -> Self {
        self.icons.push(IconEntry { name: name.to_string(), cell_key: cell_key.to_string() });
        self
    }

    /// The weather sprite sheet catalog.
    pub fn weather() -> Self {
        Self::new()
            .with_icon("sunny", GridCell::new(0, 2))
            .with_icon("clear-night", GridCell::new(0, 4))
            .with_icon("partlycloudy", GridCell::new(0, 0))
            .with_icon("cloudy", GridCell::new(0, 1))
            .with_icon("rainy", GridCell::new(1, 0))
            .with_icon("pouring", GridCell::new(1, 1))
            .with_icon("snowy", GridCell::new(4, 0))
            .with_alias("snowy-rainy", "snowy")
            .with_alias("fog", "partlycloudy")
            .with_alias("hail", "partlycloudy")
            .with_icon("windy", GridCell::new(5, 0))
            .with_icon("lightning", GridCell::new(3, 9))
            .with_alias("lightning-rainy", "lightning")
            .with_alias("exceptional", "partlycloudy")
    }

    /// Icons in declaration order.
    pub fn icons(&self) -> &[IconEntry] {
        &self.icons
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Look up an icon entry by name.
    pub fn entry(&self, name: &str) -> Option<&IconEntry> {
        self.icons.iter().find(|e| e.name == name)
    }

    /// Resolve an icon name to its grid cell.
    pub fn resolve(&self, name: &str) -> Option<GridCell> {
        self.entry(name).and_then(|e| self.cells.get(&e.cell_key).copied())
    }

    /// Keep only the named icon. Returns `None` if it is not in the catalog.
    pub fn only(&self, name: &str) -> Option<Self> {
        let entry = self.entry(name)?.clone();
        Some(Self { cells: self.cells.clone(), icons: vec![entry] })
    }

    /// Check the catalog for problems. An empty list means it is usable.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        if self.icons.is_empty() {
            issues.push(CatalogIssue::Empty);
        }

        let mut seen = HashSet::new();
        let mut identifiers: HashMap<String, &str> = HashMap::new();
        for entry in &self.icons {
            if !seen.insert(entry.name.as_str()) {
                issues.push(CatalogIssue::DuplicateIcon(entry.name.clone()));
            } else {
                let identifier = c_identifier(&entry.name);
                match identifiers.get(&identifier) {
                    Some(first) => issues.push(CatalogIssue::StemCollision {
                        first: first.to_string(),
                        second: entry.name.clone(),
                        identifier,
                    }),
                    None => {
                        identifiers.insert(identifier, entry.name.as_str());
                    }
                }
            }
            if !self.cells.contains_key(&entry.cell_key) {
                issues.push(CatalogIssue::UnknownCell {
                    icon: entry.name.clone(),
                    cell_key: entry.cell_key.clone(),
                });
            }
        }
        issues
    }
}
