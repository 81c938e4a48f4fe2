//! Catalog command implementation

use std::path::Path;
use std::process::ExitCode;

use serde_json::json;

use crate::catalog::{IconCatalog, SheetGeometry};

use super::{load_project, EXIT_SUCCESS};

/// Run the catalog command
pub fn run_catalog(config_path: Option<&Path>, json: bool) -> ExitCode {
    let (config, _) = match load_project(config_path, false) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let catalog = config.catalog();
    let geometry = config.geometry();

    if json {
        println!("{}", catalog_json(&catalog, &geometry));
    } else {
        print!("{}", catalog_table(&catalog, &geometry));
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn catalog_table(catalog: &IconCatalog, geometry: &SheetGeometry) -> String {
    let width = catalog.icons().iter().map(|e| e.name.len()).max().unwrap_or(4).max(4);
    let mut out =
        format!("{:<width$}  {:<7}  {:<11}  {}\n", "ICON", "CELL", "OFFSET", "ART", width = width);

    for entry in catalog.icons() {
        let (cell, offset) = match catalog.resolve(&entry.name) {
            Some(cell) => {
                let (x, y) = geometry.cell_origin(cell);
                (cell.to_string(), format!("({},{})", x, y))
            }
            None => ("?".to_string(), "?".to_string()),
        };
        let art =
            if entry.is_alias() { format!("alias of {}", entry.cell_key) } else { "own".to_string() };
        out.push_str(&format!(
            "{:<width$}  {:<7}  {:<11}  {}\n",
            entry.name,
            cell,
            offset,
            art,
            width = width
        ));
    }
    out
}

fn catalog_json(catalog: &IconCatalog, geometry: &SheetGeometry) -> serde_json::Value {
    let icons: Vec<serde_json::Value> = catalog
        .icons()
        .iter()
        .map(|entry| {
            let cell = catalog.resolve(&entry.name);
            let origin = cell.map(|c| geometry.cell_origin(c));
            json!({
                "name": entry.name,
                "cell": entry.cell_key,
                "alias": entry.is_alias(),
                "row": cell.map(|c| c.row),
                "col": cell.map(|c| c.col),
                "x": origin.map(|o| o.0),
                "y": origin.map(|o| o.1),
            })
        })
        .collect();
    json!({ "icon_size": geometry.icon_size, "icons": icons })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_table_rows() {
        let table = catalog_table(&IconCatalog::weather(), &SheetGeometry::default());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 15);
        assert!(lines[0].starts_with("ICON"));
        assert!(lines[1].starts_with("sunny"));
        assert!(lines[1].contains("(0,2)"));
        assert!(lines[1].contains("(432,61)"));
        assert!(lines[1].ends_with("own"));

        let fog = lines.iter().find(|l| l.starts_with("fog ")).unwrap();
        assert!(fog.contains("(80,61)"));
        assert!(fog.ends_with("alias of partlycloudy"));
    }

    #[test]
    fn test_catalog_json() {
        let value = catalog_json(&IconCatalog::weather(), &SheetGeometry::default());
        assert_eq!(value["icon_size"], 64);
        let lightning = &value["icons"][11];
        assert_eq!(lightning["name"], "lightning");
        assert_eq!(lightning["x"], 80 + 9 * 176);
        assert_eq!(lightning["y"], 61 + 3 * 176);
        assert_eq!(lightning["alias"], false);
        assert_eq!(value["icons"][12]["alias"], true);
    }
}
