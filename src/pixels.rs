//! RGB565 pixel buffers

use image::RgbImage;

use crate::color::{expand, Rgb565};
use crate::error::{IconError, Result};

/// A row-major, top-to-bottom grid of packed RGB565 pixels.
///
/// The pixel count always equals `width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb565>,
}

impl PixelBuffer {
    /// Create a buffer from existing pixels.
    ///
    /// Fails with `InvalidDimensions` if the pixel count does not match the
    /// requested size.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb565>) -> Result<Self> {
        if pixels.len() as u64 != width as u64 * height as u64 {
            return Err(IconError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height, pixels })
    }

    /// Create a buffer filled with a single color.
    pub fn filled(width: u32, height: u32, color: Rgb565) -> Self {
        Self { width, height, pixels: vec![color; width as usize * height as usize] }
    }

    /// Create a buffer by evaluating `f(x, y)` for every pixel in row-major order.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb565) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self { width, height, pixels }
    }

    /// Build a square buffer from a flat pixel list, inferring the side length.
    ///
    /// ```
    /// use iconsheet::color::Rgb565;
    /// use iconsheet::pixels::PixelBuffer;
    ///
    /// let buf = PixelBuffer::from_square(vec![Rgb565::EMPTY; 4096]).unwrap();
    /// assert_eq!((buf.width(), buf.height()), (64, 64));
    /// assert!(PixelBuffer::from_square(vec![Rgb565::EMPTY; 4097]).is_err());
    /// ```
    pub fn from_square(pixels: Vec<Rgb565>) -> Result<Self> {
        let side = infer_square_side(pixels.len())?;
        Ok(Self { width: side, height: side, pixels })
    }

    /// Decode little-endian byte pairs into pixels.
    ///
    /// A trailing odd byte is ignored.
    pub fn pixels_from_le_bytes(bytes: &[u8]) -> Vec<Rgb565> {
        bytes.chunks_exact(2).map(|pair| Rgb565::from_le_bytes(pair[0], pair[1])).collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Get the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Serialize as little-endian byte pairs (low byte first).
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect()
    }

    /// Expand to an 8-bit RGB image for PNG previews.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width, self.height);
        for (i, pixel) in self.pixels.iter().enumerate() {
            let x = (i % self.width as usize) as u32;
            let y = (i / self.width as usize) as u32;
            img.put_pixel(x, y, expand(*pixel));
        }
        img
    }
}

/// Infer the side of a square image from its pixel count.
///
/// Fails with `AmbiguousDimensions` unless `round(sqrt(n))^2 == n`.
pub fn infer_square_side(pixel_count: usize) -> Result<u32> {
    let side = (pixel_count as f64).sqrt().round() as u64;
    if side * side != pixel_count as u64 || side > u32::MAX as u64 {
        return Err(IconError::AmbiguousDimensions { pixels: pixel_count });
    }
    Ok(side as u32)
}
