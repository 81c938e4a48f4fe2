//! RGB565 color codec
//!
//! Packed colors use the layout `[15:11] = R5`, `[10:5] = G6`, `[4:0] = B5`.
//! Expansion to 8 bits per channel uses bit replication, so that `0` maps to
//! `0` and full-scale maps to `255`.

use image::Rgb;

/// A 16-bit packed RGB565 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Empty color used for out-of-range samples.
    pub const EMPTY: Rgb565 = Rgb565(0x0000);

    /// Combine a low byte and a high byte (little-endian) into a packed color.
    ///
    /// ```
    /// use iconsheet::color::Rgb565;
    ///
    /// assert_eq!(Rgb565::from_le_bytes(0x00, 0xF8), Rgb565(0xF800));
    /// ```
    pub fn from_le_bytes(low: u8, high: u8) -> Self {
        Rgb565(((high as u16) << 8) | low as u16)
    }

    /// Split into `[low, high]`.
    pub fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    /// 5-bit red field.
    pub fn r5(self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }

    /// 6-bit green field.
    pub fn g6(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// 5-bit blue field.
    pub fn b5(self) -> u8 {
        (self.0 & 0x1F) as u8
    }
}

impl From<u16> for Rgb565 {
    fn from(value: u16) -> Self {
        Rgb565(value)
    }
}

/// Pack 8-bit channels into RGB565 by truncating the low bits.
///
/// ```
/// use iconsheet::color::{pack, Rgb565};
///
/// assert_eq!(pack(255, 0, 0), Rgb565(0xF800));
/// assert_eq!(pack(255, 255, 255), Rgb565(0xFFFF));
/// ```
pub fn pack(r: u8, g: u8, b: u8) -> Rgb565 {
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    Rgb565((r5 << 11) | (g6 << 5) | b5)
}

/// Expand a packed color to 8 bits per channel.
///
/// Each field is shifted to the top of the byte and its high bits are
/// replicated into the vacated low bits.
///
/// ```
/// use iconsheet::color::{expand, Rgb565};
///
/// assert_eq!(expand(Rgb565(0xFFFF)).0, [255, 255, 255]);
/// assert_eq!(expand(Rgb565(0xF800)).0, [255, 0, 0]);
/// ```
pub fn expand(color: Rgb565) -> Rgb<u8> {
    let r5 = color.r5();
    let g6 = color.g6();
    let b5 = color.b5();
    Rgb([(r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2)])
}
