//! Nearest-neighbor resampling

use crate::color::Rgb565;
use crate::pixels::PixelBuffer;

/// Resize `src` to `dst_width` x `dst_height` using nearest-neighbor sampling.
///
/// Destination `(dx, dy)` samples source `(dx * src_w / dst_w, dy * src_h / dst_h)`
/// with integer truncation. A sample that falls outside the source yields
/// [`Rgb565::EMPTY`].
///
/// ```
/// use iconsheet::color::Rgb565;
/// use iconsheet::pixels::PixelBuffer;
/// use iconsheet::resample::resize_nearest;
///
/// let src = PixelBuffer::new(2, 1, vec![Rgb565(1), Rgb565(2)]).unwrap();
/// let wide = resize_nearest(&src, 4, 1);
/// assert_eq!(wide.pixels(), &[Rgb565(1), Rgb565(1), Rgb565(2), Rgb565(2)]);
/// ```
pub fn resize_nearest(src: &PixelBuffer, dst_width: u32, dst_height: u32) -> PixelBuffer {
    let src_w = src.width() as u64;
    let src_h = src.height() as u64;

    PixelBuffer::from_fn(dst_width, dst_height, |dx, dy| {
        let sx = dx as u64 * src_w / dst_width as u64;
        let sy = dy as u64 * src_h / dst_height as u64;
        if sx >= src_w || sy >= src_h {
            return Rgb565::EMPTY;
        }
        src.get(sx as u32, sy as u32).unwrap_or(Rgb565::EMPTY)
    })
}
