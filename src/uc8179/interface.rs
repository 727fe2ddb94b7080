//! Command channel and BUSY handling on top of a [`Transport`]
use crate::uc8179::config::{Config, BUSY_POLL_INTERVAL_US, BUSY_SETTLE_US};
use crate::uc8179::transport::{ByteKind, Transport};
use crate::uc8179::{cmd::Cmd, error::Error};
use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

/// Level of the BUSY pin once the controller is idle (BUSY_N, low while busy)
const BUSY_READY_HIGH: bool = true;

/// Polls after which a still busy panel is worth a warning
const SLOW_BUSY_POLLS: u32 = 50_000;

/// The connection to the UC8179 controller
pub struct DisplayInterface<T, BSY, RST, DELAY> {
    /// Byte transport, owns the SPI bus or the bit-banged pins
    transport: T,
    /// Low while the controller is busy, wait until it reads high!
    busy: BSY,
    /// Pin for Reseting
    rst: RST,
    /// Delay provider, also used for the bit-banged clock
    pub(crate) delay: DELAY,
    pub(crate) config: Config,
}

impl<T, BSY, RST, DELAY> DisplayInterface<T, BSY, RST, DELAY> {
    /// Bind the transport and pins, nothing is sent yet
    pub fn new(transport: T, busy: BSY, rst: RST, delay: DELAY, config: Config) -> Self {
        DisplayInterface {
            transport,
            busy,
            rst,
            delay,
            config,
        }
    }

    /// Hand the transport and pins back
    pub fn release(self) -> (T, BSY, RST, DELAY) {
        (self.transport, self.busy, self.rst, self.delay)
    }
}

impl<T, BSY, RST, DELAY> DisplayInterface<T, BSY, RST, DELAY>
where
    T: Transport,
    BSY: InputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn write(&mut self, value: u8, kind: ByteKind) -> Result<(), DisplayError> {
        self.transport.select(kind)?;
        self.transport.write_byte(value, kind, &mut self.delay)
    }

    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        self.write(command, ByteKind::Command).map_err(|e| {
            log::error!("Failed to send command 0x{:02X}: {:?}", command, e);
            e
        })
    }

    /// Basic function for sending an array of u8-values of data, one framed byte at a time
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        data.iter()
            .try_for_each(|&byte| self.write(byte, ByteKind::Data))
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Basic function for sending the same byte of data (one u8) multiple times
    /// Used for setting one color for the whole frame
    pub(crate) fn data_x_times(&mut self, val: u8, repetitions: usize) -> Result<(), DisplayError> {
        for _ in 0..repetitions {
            self.write(val, ByteKind::Data)?;
        }
        log::debug!("Completed sending {} bytes of 0x{:02X}", repetitions, val);
        Ok(())
    }

    /// Hardware reset: RST low for the configured pulse width, then high and wait again
    pub(crate) fn reset(&mut self) -> Result<(), DisplayError> {
        let pulse_us = self.config.reset_pulse_us;
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_us(pulse_us);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_us(pulse_us);
        Ok(())
    }

    /// Whether the BUSY pin currently reports the controller as idle
    pub fn is_ready(&mut self) -> Result<bool, Error> {
        let high = self.busy.is_high().map_err(|_| Error::BusyPin)?;
        Ok(high == BUSY_READY_HIGH)
    }

    /// Waits until the device isn't busy anymore.
    ///
    /// Every poll sends the status command, reads BUSY and sleeps 100 us. When
    /// the config has a busy timeout the wait gives up after the number of polls
    /// that fit in it, otherwise it blocks until the panel answers.
    pub(crate) fn wait_until_idle(&mut self) -> Result<(), Error> {
        let limit = self.config.max_busy_polls();
        let mut polls: u32 = 0;

        loop {
            polls = polls.saturating_add(1);
            self.cmd(Cmd::GET_STATUS)?;
            let ready = self.is_ready()?;
            self.delay.delay_us(BUSY_POLL_INTERVAL_US);

            if ready {
                break;
            }
            if polls == SLOW_BUSY_POLLS {
                log::warn!("Panel still busy after {} polls", polls);
            }
            if limit.is_some_and(|max| polls >= max) {
                log::error!("TIMEOUT waiting for BUSY to go HIGH after {} polls", polls);
                return Err(Error::BusyTimeout { polls });
            }
        }

        self.delay.delay_us(BUSY_SETTLE_US);
        log::debug!("Panel ready after {} polls", polls);
        Ok(())
    }
}
