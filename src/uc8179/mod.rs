//! UC8179 ePaper Display Driver
//!
//! Used in the [GDEY075T7 7.5" black/white display](https://www.good-display.com/product/396.html)
//! (800x480, 3s/frame).
//!
//! ### Usage
//! The driver owns one black/white buffer. To display something you:
//!
//! 1. draw into the buffer with [`driver::Uc8179::set_pixel`], [`driver::Uc8179::draw_line`]
//!    or any [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//!    primitive through [`driver::Uc8179::framebuffer_mut`]
//! 1. then push the buffer and refresh the panel with [`driver::Uc8179::update_screen`]
//!
//! Every update runs the whole controller sequence: hardware reset, power and
//! panel configuration, image transfer, refresh and deep sleep. Nothing is kept
//! on the controller side between two updates.
//!
//! ### Wiring
//! The controller listens on 4-wire SPI (separate D/C pin) or 3-wire SPI (9-bit
//! words, the first bit tells command from data). Both can be driven by the SPI
//! peripheral or bit-banged on plain GPIOs, see [`transport`].
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod cmd;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod flag;
pub mod graphics;
pub mod interface;
pub mod pins;
pub mod sequence;
pub mod transport;

/// GPIO level used on both sides of the pin capabilities
pub use embedded_hal::digital::PinState;

/// Display width, pixels horizontally
pub const WIDTH: u16 = 800;

/// Display height, pixels vertically
pub const HEIGHT: u16 = 480;

/// Size of one full frame in bytes, 8 horizontal pixels per byte
pub const BUFFER_SIZE: usize = WIDTH as usize * HEIGHT as usize / 8;
