//! Library-level tests for the extraction pipeline
//!
//! These run the full catalog -> `.c`/`.h`/`.bmp` flow against small
//! synthetic sheets, and the weather catalog against an in-memory sheet.

use std::fs;
use std::path::Path;

use iconsheet::bmp::encode_bmp;
use iconsheet::build::{render_icon, BuildContext, IconPipeline, NullProgress};
use iconsheet::catalog::{GridCell, IconCatalog, SheetGeometry};
use iconsheet::color::Rgb565;
use iconsheet::config::IconsheetConfig;
use iconsheet::emit::emit_c_source;
use iconsheet::pixels::PixelBuffer;
use iconsheet::source::{read_byte_array, read_square_icon};
use iconsheet::IconError;
use tempfile::TempDir;

/// Pixel value encoding its own position, so every crop is distinguishable.
fn position_color(x: u32, y: u32) -> Rgb565 {
    Rgb565(((y * 31 + x * 7) & 0xFFFF) as u16)
}

fn sheet_bytes(width: u32, height: u32) -> Vec<u8> {
    PixelBuffer::from_fn(width, height, position_color).to_le_bytes()
}

fn write_sheet_source(path: &Path, bytes: &[u8]) {
    let mut text = String::from("// sprite sheet\nconst uint8_t weathers_map[] = {\n");
    for line in bytes.chunks(32) {
        let literals: Vec<String> = line.iter().map(|b| format!("0x{:02X}", b)).collect();
        text.push_str("  ");
        text.push_str(&literals.join(", "));
        text.push_str(",\n");
    }
    text.push_str("};\n");
    fs::write(path, text).unwrap();
}

/// 40x30 sheet, 8px cells from (2, 3), scaled to 4px icons.
fn small_project(dir: &Path) -> IconsheetConfig {
    write_sheet_source(&dir.join("sheet.c"), &sheet_bytes(40, 30));

    let mut config = IconsheetConfig::default();
    config.sheet.source = "sheet.c".into();
    config.sheet.width = 40;
    config.sheet.height = 30;
    config.sheet.cell_size = 8;
    config.sheet.origin_x = 2;
    config.sheet.origin_y = 3;
    config.output.size = 4;
    config.project.out = "icons".into();
    config.cells.insert("sunny".to_string(), [0, 1]);
    config.cells.insert("partlycloudy".to_string(), [1, 0]);
    config.icons.insert("fog".to_string(), "partlycloudy".to_string());
    config
}

#[test]
fn test_aliases_produce_identical_outputs() {
    let temp = TempDir::new().unwrap();
    let config = small_project(temp.path());
    let ctx = BuildContext::new(config, temp.path().to_path_buf());
    let progress = NullProgress::new();

    let result = IconPipeline::new(ctx, &progress).run().unwrap();
    assert_eq!(result.tally(), "3/3");

    let out = temp.path().join("icons");
    let fog_c = fs::read_to_string(out.join("fog_icon_4.c")).unwrap();
    let cloud_c = fs::read_to_string(out.join("partlycloudy_icon_4.c")).unwrap();
    assert_eq!(read_byte_array(&fog_c).unwrap(), read_byte_array(&cloud_c).unwrap());
    assert!(fog_c.contains("const lv_image_dsc_t fog_icon_4 = {"));

    let fog_bmp = fs::read(out.join("fog_icon_4.bmp")).unwrap();
    let cloud_bmp = fs::read(out.join("partlycloudy_icon_4.bmp")).unwrap();
    assert_eq!(fog_bmp, cloud_bmp);

    let sunny_c = fs::read_to_string(out.join("sunny_icon_4.c")).unwrap();
    assert_ne!(read_byte_array(&sunny_c).unwrap(), read_byte_array(&cloud_c).unwrap());
}

#[test]
fn test_emitted_icon_matches_sampled_sheet() {
    let temp = TempDir::new().unwrap();
    let config = small_project(temp.path());
    let ctx = BuildContext::new(config, temp.path().to_path_buf()).with_filter("sunny");
    let progress = NullProgress::new();

    IconPipeline::new(ctx, &progress).run().unwrap();

    let text = fs::read_to_string(temp.path().join("icons/sunny_icon_4.c")).unwrap();
    let icon = read_square_icon(&text).unwrap();
    assert_eq!((icon.width(), icon.height()), (4, 4));

    // sunny is cell (0, 1): origin (10, 3). 8 -> 4 samples every other pixel.
    for dy in 0..4 {
        for dx in 0..4 {
            assert_eq!(icon.get(dx, dy), Some(position_color(10 + dx * 2, 3 + dy * 2)));
        }
    }

    let header = fs::read_to_string(temp.path().join("icons/sunny_icon_4.h")).unwrap();
    assert!(header.contains("#ifndef SUNNY_ICON_4_H"));
    assert!(header.contains("extern const lv_image_dsc_t sunny_icon_4;"));
}

#[test]
fn test_bmp_preview_matches_direct_encoding() {
    let temp = TempDir::new().unwrap();
    let mut config = small_project(temp.path());
    config.output.png = true;
    let geometry = config.geometry();
    let ctx = BuildContext::new(config, temp.path().to_path_buf()).with_filter("sunny");
    let progress = NullProgress::new();

    let result = IconPipeline::new(ctx, &progress).run().unwrap();
    assert_eq!(result.items[0].outputs.len(), 4);

    let sheet = sheet_bytes(40, 30);
    let icon = render_icon(&sheet, &geometry, GridCell::new(0, 1));
    let expected = encode_bmp(&icon).unwrap();

    let written = fs::read(temp.path().join("icons/sunny_icon_4.bmp")).unwrap();
    assert_eq!(written, expected);

    let png = image::open(temp.path().join("icons/sunny_icon_4.png")).unwrap();
    assert_eq!((png.width(), png.height()), (4, 4));
}

#[test]
fn test_cell_past_sheet_edge_fills_empty() {
    let temp = TempDir::new().unwrap();
    let mut config = small_project(temp.path());
    // Cell (3, 4) starts at (34, 27): 6 columns and 3 rows remain on the sheet.
    config.cells.insert("edge".to_string(), [3, 4]);
    config.output.size = 8;
    let ctx = BuildContext::new(config, temp.path().to_path_buf()).with_filter("edge");
    let progress = NullProgress::new();

    let result = IconPipeline::new(ctx, &progress).run().unwrap();
    assert!(result.is_success());

    let text = fs::read_to_string(temp.path().join("icons/edge_icon_8.c")).unwrap();
    let icon = read_square_icon(&text).unwrap();
    for y in 0..8 {
        for x in 0..8 {
            let expected =
                if x < 6 && y < 3 { position_color(34 + x, 27 + y) } else { Rgb565::EMPTY };
            assert_eq!(icon.get(x, y), Some(expected), "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_failed_icon_does_not_stop_batch() {
    let temp = TempDir::new().unwrap();
    let config = small_project(temp.path());
    let out = temp.path().join("icons");
    fs::create_dir_all(out.join("fog_icon_4.bmp")).unwrap();
    let ctx = BuildContext::new(config, temp.path().to_path_buf());
    let progress = NullProgress::new();

    let result = IconPipeline::new(ctx, &progress).run().unwrap();

    assert_eq!(result.tally(), "2/3");
    let failure = &result.failures()[0];
    assert_eq!(failure.name, "fog");
    assert!(failure.status.to_string().contains("fog_icon_4.bmp"));
    assert!(out.join("sunny_icon_4.bmp").is_file());
}

#[test]
fn test_malformed_sheet_is_fatal() {
    let temp = TempDir::new().unwrap();
    let config = small_project(temp.path());
    fs::write(temp.path().join("sheet.c"), "/* empty */ uint8_t m[] = { };").unwrap();
    let ctx = BuildContext::new(config, temp.path().to_path_buf());
    let progress = NullProgress::new();

    let err = IconPipeline::new(ctx, &progress).run().unwrap_err();
    assert!(matches!(err, iconsheet::build::BuildError::Sheet(IconError::MalformedSource)));
}

#[test]
fn test_4096_pixels_round_trip_as_64x64() {
    let icon = PixelBuffer::from_fn(64, 64, position_color);
    let text = emit_c_source(&icon, "probe_icon_64", 16);

    let decoded = read_square_icon(&text).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 64));
    assert_eq!(decoded, icon);

    let mut bytes = icon.to_le_bytes();
    bytes.extend_from_slice(&[0x00, 0x00]);
    let literals: Vec<String> = bytes.iter().map(|b| format!("0x{:02x}", b)).collect();
    let text = format!("{{{}}}", literals.join(","));
    assert!(matches!(
        read_square_icon(&text),
        Err(IconError::AmbiguousDimensions { pixels: 4097 })
    ));
}

#[test]
fn test_weather_aliases_render_identically() {
    let geometry = SheetGeometry::default();
    let sheet = sheet_bytes(geometry.sheet_width, geometry.sheet_height);
    let catalog = IconCatalog::weather();

    let render = |name: &str| render_icon(&sheet, &geometry, catalog.resolve(name).unwrap());

    for (alias, target) in [
        ("fog", "partlycloudy"),
        ("hail", "partlycloudy"),
        ("exceptional", "partlycloudy"),
        ("snowy-rainy", "snowy"),
        ("lightning-rainy", "lightning"),
    ] {
        let a = render(alias);
        let b = render(target);
        assert_eq!(a, b, "{} vs {}", alias, target);
        assert_eq!(encode_bmp(&a).unwrap(), encode_bmp(&b).unwrap());
    }

    assert_ne!(render("sunny"), render("cloudy"));
}

#[test]
fn test_weather_icon_sampling_truncates() {
    let geometry = SheetGeometry::default();
    let sheet = sheet_bytes(geometry.sheet_width, geometry.sheet_height);
    let icon = render_icon(&sheet, &geometry, IconCatalog::weather().resolve("sunny").unwrap());

    assert_eq!((icon.width(), icon.height()), (64, 64));
    // sunny cell origin (432, 61); destination 63 samples source 63*176/64 = 173.
    assert_eq!(icon.get(0, 0), Some(position_color(432, 61)));
    assert_eq!(icon.get(63, 63), Some(position_color(432 + 173, 61 + 173)));
    assert_eq!(icon.get(1, 0), Some(position_color(432 + 2, 61)));
}
