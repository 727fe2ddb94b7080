//! Byte transports between the host and the UC8179
//!
//! The controller accepts two framings:
//!
//! - **4-wire**: a separate D/C pin is LOW while a command byte is clocked
//!   in and HIGH for data bytes.
//! - **3-wire**: no D/C pin, every byte is preceded by one extra bit which is
//!   0 for a command and 1 for data (9-bit words).
//!
//! Each framing is available on the SPI peripheral ([`FourWireSpi`],
//! [`ThreeWireSpi`]) or bit-banged on plain GPIOs ([`FourWireBitBang`],
//! [`ThreeWireBitBang`]). All four put the same bits on the wire. The transport
//! is picked once by its type, there is no switching at runtime.
use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{OutputPin, PinState},
    spi::SpiDevice,
};

// Bit-banged timing. The UC8179 wants at least 100 ns per SCL cycle on writes.
const CS_SETUP_NS: u32 = 60;
const DATA_HOLD_NS: u32 = 20;
const DATA_SETUP_NS: u32 = 30;
const CLOCK_HIGH_NS: u32 = 50;

/// What the controller should make of a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteKind {
    Command,
    Data,
}

impl ByteKind {
    /// Level of the D/C pin on 4-wire transports
    pub const fn dc_level(self) -> PinState {
        match self {
            ByteKind::Command => PinState::Low,
            ByteKind::Data => PinState::High,
        }
    }

    /// Leading bit of a 3-wire frame
    pub const fn discriminator(self) -> bool {
        matches!(self, ByteKind::Data)
    }

    /// 9-bit 3-wire word: discriminator bit followed by the byte, MSB first
    pub const fn nine_bit_word(self, value: u8) -> u16 {
        ((self.discriminator() as u16) << 8) | value as u16
    }
}

/// Wiring and bus used to reach the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Hardware4Wire,
    Hardware3Wire,
    Software4Wire,
    Software3Wire,
}

/// Puts single bytes on the wire.
///
/// Chip select framing is per byte: the hardware variants leave it to the
/// `SpiDevice`, the bit-banged variants assert CS around every byte.
pub trait Transport {
    /// Wiring of this transport
    const MODE: TransportMode;

    /// Drive the D/C pin for the next byte. 3-wire transports have no D/C pin.
    fn select(&mut self, _kind: ByteKind) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Send one byte, `kind` is only used by the 3-wire framing
    fn write_byte<D: DelayNs>(
        &mut self,
        value: u8,
        kind: ByteKind,
        delay: &mut D,
    ) -> Result<(), DisplayError>;
}

/// SPI peripheral with a separate D/C pin
pub struct FourWireSpi<SPI, DC> {
    spi: SPI,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
}

impl<SPI, DC> FourWireSpi<SPI, DC> {
    pub fn new(spi: SPI, dc: DC) -> Self {
        FourWireSpi { spi, dc }
    }

    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> Transport for FourWireSpi<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    const MODE: TransportMode = TransportMode::Hardware4Wire;

    fn select(&mut self, kind: ByteKind) -> Result<(), DisplayError> {
        self.dc
            .set_state(kind.dc_level())
            .map_err(|_| DisplayError::DCError)
    }

    fn write_byte<D: DelayNs>(
        &mut self,
        value: u8,
        _kind: ByteKind,
        _delay: &mut D,
    ) -> Result<(), DisplayError> {
        self.spi.write(&[value]).map_err(|e| {
            log::error!("SPI write error for byte 0x{:02X}: {:?}", value, e);
            DisplayError::BusWriteError
        })
    }
}

/// SPI peripheral configured for 9-bit words, no D/C pin
///
/// The word is written as a `u16`, the bus shifts out its low 9 bits MSB first.
pub struct ThreeWireSpi<SPI> {
    spi: SPI,
}

impl<SPI> ThreeWireSpi<SPI> {
    /// Word length the SPI peripheral must be set to
    pub const WORD_BITS: u8 = 9;

    /// Wraps an SPI device that is already set up for 9-bit words
    /// ([`Self::WORD_BITS`]).
    ///
    /// The driver does not configure the word length. A device left at 16-bit
    /// words shifts out 7 leading zero bits before every word, and the
    /// controller misreads the stream.
    pub fn new(spi: SPI) -> Self {
        ThreeWireSpi { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Transport for ThreeWireSpi<SPI>
where
    SPI: SpiDevice<u16>,
{
    const MODE: TransportMode = TransportMode::Hardware3Wire;

    fn write_byte<D: DelayNs>(
        &mut self,
        value: u8,
        kind: ByteKind,
        _delay: &mut D,
    ) -> Result<(), DisplayError> {
        let word = kind.nine_bit_word(value);
        self.spi.write(&[word]).map_err(|e| {
            log::error!("SPI write error for word 0x{:03X}: {:?}", word, e);
            DisplayError::BusWriteError
        })
    }
}

/// Clock, data and chip select driven from GPIOs
struct BitBang<MOSI, CLK, CS> {
    mosi: MOSI,
    clk: CLK,
    cs: CS,
}

impl<MOSI, CLK, CS> BitBang<MOSI, CLK, CS>
where
    MOSI: OutputPin,
    CLK: OutputPin,
    CS: OutputPin,
{
    /// Shift out the low `bits` bits of `word`, MSB first, inside one CS frame
    fn frame<D: DelayNs>(&mut self, word: u16, bits: u8, delay: &mut D) -> Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::CSError)?;
        delay.delay_ns(CS_SETUP_NS);

        let shifted = (0..bits)
            .rev()
            .try_for_each(|i| self.clock_out((word >> i) & 1 != 0, delay));

        // CS goes back high even when a bit failed
        let released = self.cs.set_high().map_err(|_| DisplayError::CSError);
        shifted.and(released)
    }

    /// Data changes while SCL is low, the controller samples on the rising edge
    fn clock_out<D: DelayNs>(&mut self, bit: bool, delay: &mut D) -> Result<(), DisplayError> {
        self.clk
            .set_low()
            .map_err(|_| DisplayError::BusWriteError)?;
        delay.delay_ns(DATA_HOLD_NS);
        self.mosi
            .set_state(PinState::from(bit))
            .map_err(|_| DisplayError::BusWriteError)?;
        delay.delay_ns(DATA_SETUP_NS);
        self.clk
            .set_high()
            .map_err(|_| DisplayError::BusWriteError)?;
        delay.delay_ns(CLOCK_HIGH_NS);
        Ok(())
    }
}

/// Bit-banged SPI with a separate D/C pin
pub struct FourWireBitBang<MOSI, CLK, CS, DC> {
    bus: BitBang<MOSI, CLK, CS>,
    dc: DC,
}

impl<MOSI, CLK, CS, DC> FourWireBitBang<MOSI, CLK, CS, DC> {
    pub fn new(mosi: MOSI, clk: CLK, cs: CS, dc: DC) -> Self {
        FourWireBitBang {
            bus: BitBang { mosi, clk, cs },
            dc,
        }
    }

    pub fn release(self) -> (MOSI, CLK, CS, DC) {
        let BitBang { mosi, clk, cs } = self.bus;
        (mosi, clk, cs, self.dc)
    }
}

impl<MOSI, CLK, CS, DC> Transport for FourWireBitBang<MOSI, CLK, CS, DC>
where
    MOSI: OutputPin,
    CLK: OutputPin,
    CS: OutputPin,
    DC: OutputPin,
{
    const MODE: TransportMode = TransportMode::Software4Wire;

    fn select(&mut self, kind: ByteKind) -> Result<(), DisplayError> {
        self.dc
            .set_state(kind.dc_level())
            .map_err(|_| DisplayError::DCError)
    }

    fn write_byte<D: DelayNs>(
        &mut self,
        value: u8,
        _kind: ByteKind,
        delay: &mut D,
    ) -> Result<(), DisplayError> {
        self.bus.frame(u16::from(value), 8, delay)
    }
}

/// Bit-banged SPI with 9-bit words, no D/C pin
pub struct ThreeWireBitBang<MOSI, CLK, CS> {
    bus: BitBang<MOSI, CLK, CS>,
}

impl<MOSI, CLK, CS> ThreeWireBitBang<MOSI, CLK, CS> {
    pub fn new(mosi: MOSI, clk: CLK, cs: CS) -> Self {
        ThreeWireBitBang {
            bus: BitBang { mosi, clk, cs },
        }
    }

    pub fn release(self) -> (MOSI, CLK, CS) {
        let BitBang { mosi, clk, cs } = self.bus;
        (mosi, clk, cs)
    }
}

impl<MOSI, CLK, CS> Transport for ThreeWireBitBang<MOSI, CLK, CS>
where
    MOSI: OutputPin,
    CLK: OutputPin,
    CS: OutputPin,
{
    const MODE: TransportMode = TransportMode::Software3Wire;

    fn write_byte<D: DelayNs>(
        &mut self,
        value: u8,
        kind: ByteKind,
        delay: &mut D,
    ) -> Result<(), DisplayError> {
        self.bus.frame(kind.nine_bit_word(value), 9, delay)
    }
}
