//! UC8179 Display Driver Implementation
//!
//! The driver owns the [`DisplayInterface`] and one [`Framebuffer`]. Drawing
//! only touches the framebuffer, the panel changes when one of the two cycle
//! functions runs:
//!
//! - `update_screen()` - send the framebuffer and refresh
//! - `clean_screen()` - refresh to all white, the framebuffer is left alone
//!
//! Both run the complete sequence (see [`crate::uc8179::sequence`]) and leave
//! the controller in deep sleep. A full refresh takes about 3 seconds during
//! which the calling thread blocks.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::uc8179::config::Config;
use crate::uc8179::error::Error;
use crate::uc8179::graphics::Framebuffer;
use crate::uc8179::interface::DisplayInterface;
use crate::uc8179::sequence::Image;
use crate::uc8179::transport::Transport;
use crate::uc8179::{color::Color, BUFFER_SIZE, HEIGHT, WIDTH};

/// UC8179 E-Paper Display Driver
///
/// ## Type Parameters
///
/// - `T` - byte [`Transport`], picks 3- or 4-wire and hardware or bit-banged SPI
/// - `BSY` - BUSY input pin (LOW while the controller is busy)
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for timing
pub struct Uc8179<T, BSY, RST, DELAY> {
    interface: DisplayInterface<T, BSY, RST, DELAY>,
    framebuffer: Framebuffer,
}

impl<T, BSY, RST, DELAY> Uc8179<T, BSY, RST, DELAY> {
    /// Create the driver with the default [`Config`].
    ///
    /// Nothing is sent to the panel until the first update, the framebuffer
    /// starts all white.
    pub fn new(transport: T, busy: BSY, rst: RST, delay: DELAY) -> Self {
        Self::with_config(transport, busy, rst, delay, Config::default())
    }

    pub fn with_config(transport: T, busy: BSY, rst: RST, delay: DELAY, config: Config) -> Self {
        Uc8179 {
            interface: DisplayInterface::new(transport, busy, rst, delay, config),
            framebuffer: Framebuffer::new(WIDTH, HEIGHT),
        }
    }

    pub fn config(&self) -> &Config {
        &self.interface.config
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Mutable access for [`embedded_graphics`] drawing
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.framebuffer.set_pixel(x, y, color);
    }

    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        self.framebuffer.draw_line(x1, y1, x2, y2, color);
    }

    pub fn fill(&mut self, color: Color) {
        self.framebuffer.fill(color);
    }

    /// Destroy the driver and hand back the transport and pins
    pub fn release(self) -> (T, BSY, RST, DELAY) {
        self.interface.release()
    }
}

impl<T, BSY, RST, DELAY> Uc8179<T, BSY, RST, DELAY>
where
    T: Transport,
    BSY: InputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Send the framebuffer to the panel and refresh it
    pub fn update_screen(&mut self) -> Result<(), Error> {
        log::info!("Updating UC8179 screen ({:?})", T::MODE);
        let Self {
            interface,
            framebuffer,
        } = self;
        interface.run_cycle(Image::Frame(framebuffer.buffer()))?;
        log::info!("Screen update complete");
        Ok(())
    }

    /// Refresh the panel to all white without touching the framebuffer
    pub fn clean_screen(&mut self) -> Result<(), Error> {
        log::info!("Cleaning UC8179 screen ({:?})", T::MODE);
        self.interface.run_cycle(Image::Solid {
            byte: Color::White.byte(),
            len: BUFFER_SIZE,
        })?;
        log::info!("Screen clean complete");
        Ok(())
    }

    /// Whether the BUSY pin currently reports the controller as idle
    pub fn is_ready(&mut self) -> Result<bool, Error> {
        self.interface.is_ready()
    }
}
