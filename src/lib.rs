//! Driver for the Good Display GDEY075T7 7.5" e-paper panel.
//!
//! The panel is 800x480, black and white, and is driven by an UltraChip UC8179
//! controller over SPI. See [`uc8179`] for the driver itself.

pub mod uc8179;

pub use crate::uc8179::color::Color;
pub use crate::uc8179::config::Config;
pub use crate::uc8179::driver::Uc8179;
pub use crate::uc8179::error::Error;
pub use crate::uc8179::graphics::{map_value, Framebuffer};
pub use crate::uc8179::transport::{
    ByteKind, FourWireBitBang, FourWireSpi, ThreeWireBitBang, ThreeWireSpi, Transport,
    TransportMode,
};
pub use crate::uc8179::{BUFFER_SIZE, HEIGHT, WIDTH};
