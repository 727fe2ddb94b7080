//! Black/white framebuffer and drawing primitives
use crate::uc8179::color::Color;
use core::convert::Infallible;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// Packed 1-bit-per-pixel frame in the controller's layout.
///
/// Rows follow each other top to bottom, each row is `width.div_ceil(8)`
/// bytes and the leftmost pixel of a byte is its most significant bit. A set
/// bit is black. The buffer is allocated once and never resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u16,
    height: u16,
    bytes_per_row: usize,
    buffer: Box<[u8]>,
}

impl Framebuffer {
    /// All-white frame of the given size
    pub fn new(width: u16, height: u16) -> Self {
        let bytes_per_row = usize::from(width).div_ceil(8);
        let buffer = vec![Color::White.byte(); bytes_per_row * usize::from(height)];
        Framebuffer {
            width,
            height,
            bytes_per_row,
            buffer: buffer.into_boxed_slice(),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Raw bytes in the order the controller expects them
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Byte index and bit mask of a pixel, `None` outside the frame
    fn locate(&self, x: i64, y: i64) -> Option<(usize, u8)> {
        let x = usize::try_from(x).ok().filter(|&x| x < usize::from(self.width))?;
        let y = usize::try_from(y).ok().filter(|&y| y < usize::from(self.height))?;
        Some((y * self.bytes_per_row + x / 8, 0x80 >> (x % 8)))
    }

    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let Some((index, mask)) = self.locate(x, y) {
            if color.is_set() {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
    }

    /// Set one pixel. Coordinates outside the frame are ignored, line drawing
    /// overshoots the edges all the time.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.plot(i64::from(x), i64::from(y), color);
    }

    /// Read one pixel back, `None` outside the frame
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.locate(i64::from(x), i64::from(y))
            .map(|(index, mask)| Color::from_bit(self.buffer[index] & mask != 0))
    }

    /// Bresenham line, both endpoints included.
    ///
    /// The endpoints are ordered before stepping so that a line drawn in either
    /// direction covers the same pixels. Only the steps along the major axis
    /// that land inside the frame are visited, so any `i32` endpoints are fine.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let ((x_start, y_start), (x_end, y_end)) = if (x1, y1) <= (x2, y2) {
            ((x1, y1), (x2, y2))
        } else {
            ((x2, y2), (x1, y1))
        };
        let (x_start, y_start) = (i64::from(x_start), i64::from(y_start));
        // Ordering makes delta_x >= 0
        let delta_x = i64::from(x_end) - x_start;
        let delta_y = i64::from(y_end) - y_start;

        let x_major = delta_x >= delta_y.abs();
        let across = Axis::new(x_start, 1, delta_x);
        let down = Axis::new(y_start, delta_y.signum(), delta_y.abs());
        let (major, minor) = if x_major { (across, down) } else { (down, across) };
        let extent = i64::from(if x_major { self.width } else { self.height });

        for step in major.visible_steps(extent) {
            let a = major.at(step);
            let b = minor.at(minor_steps(step, major.len, minor.len));
            if x_major {
                self.plot(a, b, color);
            } else {
                self.plot(b, a, color);
            }
        }
    }

    /// Paint the whole frame, pixel by pixel
    pub fn fill(&mut self, color: Color) {
        for x in 0..i32::from(self.width) {
            for y in 0..i32::from(self.height) {
                self.set_pixel(x, y, color);
            }
        }
    }
}

/// One axis of a line: start coordinate, direction and length in pixels
struct Axis {
    start: i64,
    sign: i64,
    len: i64,
}

impl Axis {
    fn new(start: i64, sign: i64, len: i64) -> Self {
        Axis { start, sign, len }
    }

    fn at(&self, steps: i64) -> i64 {
        self.start + self.sign * steps
    }

    /// Steps `0..=len` whose coordinate lies in `0..extent`
    fn visible_steps(&self, extent: i64) -> core::ops::RangeInclusive<i64> {
        let (lo, hi) = if self.sign < 0 {
            (self.start - (extent - 1), self.start)
        } else {
            (-self.start, extent - 1 - self.start)
        };
        lo.max(0)..=hi.min(self.len)
    }
}

/// Minor axis steps taken after `step` major axis steps.
///
/// Closed form of the Bresenham error accumulator (`err = dx - dy`, doubled,
/// compared against `-dy` and `dx`): the minor axis has moved once for every
/// `j >= 0` with `(2j + 1) * major < 2 * minor * step`.
fn minor_steps(step: i64, major: i64, minor: i64) -> i64 {
    let numerator = 2 * i128::from(minor) * i128::from(step) - i128::from(major);
    if numerator <= 0 {
        return 0;
    }
    let denominator = 2 * i128::from(major);
    // Never more than `minor`, which came from an i64
    i64::try_from((numerator + denominator - 1) / denominator).unwrap_or(minor)
}

/// Map `value` from one range to another (not precise, using ints).
///
/// The scale factor is truncated before it is applied, so
/// `map_value(255, 0, 255, 0, 800)` is 765 and not 800. An empty input range
/// maps everything to `out_lo`. Results beyond `i32` saturate.
pub fn map_value(value: i32, in_lo: i32, in_hi: i32, out_lo: i32, out_hi: i32) -> i32 {
    let span_in = i64::from(in_hi) - i64::from(in_lo);
    let span_out = i64::from(out_hi) - i64::from(out_lo);
    let Some(scale) = span_out.checked_div(span_in) else {
        return out_lo;
    };
    let mapped =
        i128::from(out_lo) + i128::from(scale) * (i128::from(value) - i128::from(in_lo));
    mapped.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into());
        Ok(())
    }
}
