//! Pixel colors of the black/white panel
use embedded_graphics::pixelcolor::BinaryColor;

/// Color of a single pixel.
///
/// The discriminant is the byte that paints 8 pixels of that color: the
/// controller reads a set bit as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    White = 0x00,
    Black = 0xFF,
}

impl Color {
    /// Byte holding 8 pixels of this color
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Value of a single bit of this color
    pub const fn is_set(self) -> bool {
        matches!(self, Color::Black)
    }

    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}

impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => BinaryColor::On,
            Color::White => BinaryColor::Off,
        }
    }
}
