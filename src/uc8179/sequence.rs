//! The UC8179 refresh cycle, one phase at a time
//!
//! Every cycle runs the whole sequence from a hardware reset to deep sleep:
//!
//! | Phase         | Commands                                                  |
//! |---------------|-----------------------------------------------------------|
//! | Reset         | RST low, wait, RST high, wait                             |
//! | PowerConfig   | `0x01` power setting, `0x04` power on, wait for BUSY      |
//! | PanelConfig   | `0x00` panel, `0x61` resolution, `0x15`, `0x50`, `0x60`   |
//! | ImageTransfer | `0x10` + 48000 x `0x00`, `0x13` + new image               |
//! | Refresh       | `0x12`, wait for BUSY                                     |
//! | Sleep         | `0x50` border floating, `0x02` power off, `0x07` + `0xA5` |
use core::fmt;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::uc8179::config::REFRESH_SETTLE_US;
use crate::uc8179::interface::DisplayInterface;
use crate::uc8179::transport::Transport;
use crate::uc8179::{cmd::Cmd, error::Error, flag::Flag, BUFFER_SIZE};

/// Steps of a refresh cycle, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Reset,
    PowerConfig,
    PanelConfig,
    ImageTransfer,
    Refresh,
    Sleep,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Reset,
        Phase::PowerConfig,
        Phase::PanelConfig,
        Phase::ImageTransfer,
        Phase::Refresh,
        Phase::Sleep,
    ];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Reset => "reset",
            Phase::PowerConfig => "power config",
            Phase::PanelConfig => "panel config",
            Phase::ImageTransfer => "image transfer",
            Phase::Refresh => "refresh",
            Phase::Sleep => "sleep",
        };
        f.write_str(name)
    }
}

/// New image for the `0x13` transfer
#[derive(Debug, Clone, Copy)]
pub(crate) enum Image<'a> {
    /// Packed frame, sent byte for byte
    Frame(&'a [u8]),
    /// The same byte `len` times
    Solid { byte: u8, len: usize },
}

impl<T, BSY, RST, DELAY> DisplayInterface<T, BSY, RST, DELAY>
where
    T: Transport,
    BSY: InputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Run all phases in order, stopping at the first one that fails
    pub(crate) fn run_cycle(&mut self, image: Image<'_>) -> Result<(), Error> {
        for phase in Phase::ALL {
            log::debug!("UC8179 {} ({:?})", phase, T::MODE);
            self.run_phase(phase, image).map_err(|e| {
                log::error!("UC8179 {} failed: {}", phase, e);
                e
            })?;
        }
        Ok(())
    }

    fn run_phase(&mut self, phase: Phase, image: Image<'_>) -> Result<(), Error> {
        match phase {
            Phase::Reset => Ok(self.reset()?),
            Phase::PowerConfig => self.power_config(),
            Phase::PanelConfig => self.panel_config(),
            Phase::ImageTransfer => self.transfer_image(image),
            Phase::Refresh => self.refresh(),
            Phase::Sleep => self.sleep(),
        }
    }

    fn power_config(&mut self) -> Result<(), Error> {
        self.cmd_with_data(Cmd::POWER_SETTING, &Flag::POWER_SETTING)?;
        self.cmd(Cmd::POWER_ON)?;
        self.wait_until_idle()
    }

    fn panel_config(&mut self) -> Result<(), Error> {
        self.cmd_with_data(Cmd::PANEL_SETTING, &[Flag::PANEL_KW_LUT_OTP])?;
        self.cmd_with_data(Cmd::RESOLUTION_SETTING, &Flag::RESOLUTION)?;
        self.cmd_with_data(Cmd::DUAL_SPI, &[Flag::DUAL_SPI_DISABLED])?;
        self.cmd_with_data(Cmd::VCOM_DATA_INTERVAL, &Flag::VCOM_DATA_INTERVAL)?;
        self.cmd_with_data(Cmd::TCON_SETTING, &[Flag::TCON])?;
        Ok(())
    }

    /// Old frame is always all white, the controller only needs it for its
    /// waveform lookup.
    fn transfer_image(&mut self, image: Image<'_>) -> Result<(), Error> {
        self.cmd(Cmd::DATA_START_TRANSMISSION_1)?;
        self.data_x_times(Flag::OLD_DATA, BUFFER_SIZE)?;

        self.cmd(Cmd::DATA_START_TRANSMISSION_2)?;
        match image {
            Image::Frame(frame) => self.data(frame)?,
            Image::Solid { byte, len } => self.data_x_times(byte, len)?,
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), Error> {
        self.cmd(Cmd::DISPLAY_REFRESH)?;
        self.delay.delay_us(REFRESH_SETTLE_US);
        self.wait_until_idle()
    }

    fn sleep(&mut self) -> Result<(), Error> {
        self.cmd_with_data(Cmd::VCOM_DATA_INTERVAL, &[Flag::VCOM_DATA_INTERVAL_SLEEP])?;
        self.cmd(Cmd::POWER_OFF)?;
        self.wait_until_idle()?;
        self.cmd_with_data(Cmd::DEEP_SLEEP, &[Flag::DEEP_SLEEP_CHECK])?;
        Ok(())
    }
}
