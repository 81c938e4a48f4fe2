//! Rectangular region extraction from a packed sprite sheet

use crate::color::Rgb565;
use crate::pixels::PixelBuffer;

/// A rectangle in sheet coordinates. The origin may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Copy `region` out of a little-endian RGB565 byte buffer of size
/// `src_width` x `src_height`.
///
/// Samples outside the sheet, or past the end of `bytes`, become
/// [`Rgb565::EMPTY`]. Border pixels are never repeated. The result always
/// holds exactly `region.width * region.height` pixels.
///
/// ```
/// use iconsheet::color::Rgb565;
/// use iconsheet::region::{extract, Region};
///
/// // 2x1 sheet: red, blue
/// let sheet = [0x00, 0xF8, 0x1F, 0x00];
/// let icon = extract(&sheet, 2, 1, Region::new(1, 0, 2, 1));
/// assert_eq!(icon.pixels(), &[Rgb565(0x001F), Rgb565::EMPTY]);
/// ```
pub fn extract(bytes: &[u8], src_width: u32, src_height: u32, region: Region) -> PixelBuffer {
    PixelBuffer::from_fn(region.width, region.height, |dx, dy| {
        sample(bytes, src_width, src_height, region.x + dx as i64, region.y + dy as i64)
    })
}

fn sample(bytes: &[u8], src_width: u32, src_height: u32, x: i64, y: i64) -> Rgb565 {
    if x < 0 || y < 0 || x >= src_width as i64 || y >= src_height as i64 {
        return Rgb565::EMPTY;
    }
    let offset = (y as usize * src_width as usize + x as usize) * 2;
    match (bytes.get(offset), bytes.get(offset + 1)) {
        (Some(&low), Some(&high)) => Rgb565::from_le_bytes(low, high),
        _ => Rgb565::EMPTY,
    }
}
