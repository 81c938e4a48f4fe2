//! Packed-pixel C source emission
//!
//! Produces the `.c`/`.h` pair consumed by the firmware UI build: a
//! `uint8_t <name>_map[]` byte array (two bytes per pixel, low byte first)
//! and an `lv_image_dsc_t` descriptor pointing at it.

use std::fmt::Write as _;

use crate::pixels::PixelBuffer;

/// Default number of pixels written per line of the byte array.
pub const DEFAULT_PIXELS_PER_LINE: usize = 16;

/// Header included by every emitted file.
const UI_HEADER: &str = "lvgl.h";

/// Color format tag written into the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Rgb565,
}

impl ColorFormat {
    /// The UI library's constant name for this format.
    pub fn tag(self) -> &'static str {
        match self {
            ColorFormat::Rgb565 => "LV_COLOR_FORMAT_RGB565",
        }
    }

    /// Bytes used per pixel.
    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            ColorFormat::Rgb565 => 2,
        }
    }
}

/// Image descriptor record.
///
/// Field order and presence are fixed by the consuming UI loader:
/// `header.cf`, `header.magic`, `header.w`, `header.h`, `data_size`, `data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub name: String,
    pub format: ColorFormat,
    pub width: u32,
    pub height: u32,
    pub data_size: u64,
    pub data_ref: String,
}

impl ImageDescriptor {
    /// Describe an RGB565 buffer stored in `<name>_map`.
    pub fn rgb565(name: &str, buffer: &PixelBuffer) -> Self {
        let format = ColorFormat::Rgb565;
        Self {
            name: name.to_string(),
            format,
            width: buffer.width(),
            height: buffer.height(),
            data_size: buffer.width() as u64
                * buffer.height() as u64
                * format.bytes_per_pixel() as u64,
            data_ref: map_name(name),
        }
    }

    /// Render as a C initializer.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "const lv_image_dsc_t {} = {{", self.name);
        let _ = writeln!(out, "  .header.cf = {},", self.format.tag());
        let _ = writeln!(out, "  .header.magic = LV_IMAGE_HEADER_MAGIC,");
        let _ = writeln!(out, "  .header.w = {},", self.width);
        let _ = writeln!(out, "  .header.h = {},", self.height);
        let _ = writeln!(out, "  .data_size = {},", self.data_size);
        let _ = writeln!(out, "  .data = {},", self.data_ref);
        out.push_str("};\n");
        out
    }
}

/// Turn an icon name into a C identifier (`snowy-rainy` -> `snowy_rainy`).
pub fn c_identifier(name: &str) -> String {
    let mut ident: String =
        name.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Include guard for an asset (`sunny_icon_64` -> `SUNNY_ICON_64_H`).
pub fn include_guard(name: &str) -> String {
    let upper: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("{}_H", upper)
}

fn map_name(name: &str) -> String {
    format!("{}_map", name)
}

/// Emit the `.c` source for `buffer` under the variable name `name`.
///
/// ```
/// use iconsheet::color::Rgb565;
/// use iconsheet::emit::emit_c_source;
/// use iconsheet::pixels::PixelBuffer;
///
/// let buf = PixelBuffer::new(1, 1, vec![Rgb565(0xF800)]).unwrap();
/// let c = emit_c_source(&buf, "dot", 16);
/// assert!(c.contains("uint8_t dot_map[] = {\n  0x00, 0xf8,\n};"));
/// assert!(c.contains(".data_size = 2,"));
/// ```
pub fn emit_c_source(buffer: &PixelBuffer, name: &str, pixels_per_line: usize) -> String {
    let per_line = pixels_per_line.max(1);
    let mut out = String::new();

    let _ = writeln!(out, "#include \"{}\"\n", UI_HEADER);
    out.push_str("#ifndef LV_ATTRIBUTE_MEM_ALIGN\n");
    out.push_str("#define LV_ATTRIBUTE_MEM_ALIGN\n");
    out.push_str("#endif\n\n");

    let _ = writeln!(out, "const LV_ATTRIBUTE_MEM_ALIGN uint8_t {}[] = {{", map_name(name));
    for row in buffer.pixels().chunks(per_line) {
        let line: Vec<String> = row
            .iter()
            .map(|p| {
                let [low, high] = p.to_le_bytes();
                format!("0x{:02x}, 0x{:02x},", low, high)
            })
            .collect();
        let _ = writeln!(out, "  {}", line.join(" "));
    }
    out.push_str("};\n\n");

    out.push_str(&ImageDescriptor::rgb565(name, buffer).render());
    out
}

/// Emit the companion `.h` header declaring the descriptor.
///
/// ```
/// use iconsheet::emit::emit_header;
///
/// let h = emit_header("sunny_icon_64");
/// assert!(h.starts_with("#ifndef SUNNY_ICON_64_H\n#define SUNNY_ICON_64_H\n"));
/// assert!(h.contains("extern const lv_image_dsc_t sunny_icon_64;"));
/// ```
pub fn emit_header(name: &str) -> String {
    let guard = include_guard(name);
    let mut out = String::new();
    let _ = writeln!(out, "#ifndef {}", guard);
    let _ = writeln!(out, "#define {}\n", guard);
    let _ = writeln!(out, "#include \"{}\"\n", UI_HEADER);
    let _ = writeln!(out, "extern const lv_image_dsc_t {};\n", name);
    out.push_str("#endif\n");
    out
}
