//! 24-bit uncompressed BMP encoding
//!
//! Layout written by [`encode_bmp`]:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0  | 2 | `"BM"` |
//! | 2  | 4 | file size (`54 + width*height*3`) |
//! | 6  | 4 | reserved (two zero u16) |
//! | 10 | 4 | pixel data offset (54) |
//! | 14 | 4 | info header size (40) |
//! | 18 | 4 | width (i32) |
//! | 22 | 4 | height (i32, positive = bottom-up) |
//! | 26 | 2 | planes (1) |
//! | 28 | 2 | bits per pixel (24) |
//! | 30 | 4 | compression (0) |
//! | 34 | 4 | image size (`width*height*3`) |
//! | 38 | 4 | horizontal resolution (2835 px/m) |
//! | 42 | 4 | vertical resolution (2835 px/m) |
//! | 46 | 4 | palette size (0) |
//! | 50 | 4 | important colors (0) |
//!
//! Rows follow bottom-to-top, pixels as B,G,R, each row zero-padded to a
//! multiple of four bytes. The size fields count unpadded pixel bytes; the
//! file itself contains the padding.

use std::path::Path;

use crate::color::expand;
use crate::error::{IconError, Result};
use crate::pixels::PixelBuffer;

pub const FILE_HEADER_SIZE: u32 = 14;
pub const INFO_HEADER_SIZE: u32 = 40;
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
pub const PIXELS_PER_METER: u32 = 2835;

/// Zero bytes appended to each row of `width` pixels.
pub fn row_padding(width: u32) -> usize {
    (4 - (width as usize * 3) % 4) % 4
}

/// Encode `buffer` as a 24-bit bottom-up BMP.
///
/// Fails with `InvalidDimensions` if either dimension is zero or does not fit
/// the header's signed 32-bit fields.
///
/// ```
/// use iconsheet::bmp::encode_bmp;
/// use iconsheet::color::Rgb565;
/// use iconsheet::pixels::PixelBuffer;
///
/// let red = PixelBuffer::filled(2, 2, Rgb565(0xF800));
/// let bmp = encode_bmp(&red).unwrap();
/// assert_eq!(bmp.len(), 54 + 2 * (6 + 2));
/// assert_eq!(&bmp[0..2], b"BM");
/// assert_eq!(&bmp[54..57], &[0x00, 0x00, 0xFF]);
/// ```
pub fn encode_bmp(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let width = buffer.width();
    let height = buffer.height();
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(IconError::InvalidDimensions { width, height });
    }

    let image_size = (width as u64 * height as u64 * 3) as u32;
    let file_size = PIXEL_DATA_OFFSET.wrapping_add(image_size);
    let padding = row_padding(width);
    let row_len = width as usize * 3 + padding;

    let mut out = Vec::with_capacity(PIXEL_DATA_OFFSET as usize + row_len * height as usize);

    // File header
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

    // Info header
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    for row in buffer.pixels().chunks_exact(width as usize).rev() {
        for pixel in row {
            let [r, g, b] = expand(*pixel).0;
            out.extend_from_slice(&[b, g, r]);
        }
        out.extend(std::iter::repeat(0u8).take(padding));
    }

    Ok(out)
}

/// Encode `buffer` and write it to `path`, creating parent directories.
pub fn save_bmp(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let bytes = encode_bmp(buffer)?;
    crate::output::write_file(path, &bytes)
}
