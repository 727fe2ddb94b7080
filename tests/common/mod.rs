//! Recording fake for the driver's pin, SPI and delay capabilities.
//!
//! Every fake shares one [`Wire`]. Bit-banged traffic is decoded back into
//! command and data bytes when CS is released, so the four transports can be
//! compared event for event.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin, PinState};
use embedded_hal::spi::{self, ErrorKind, Operation, SpiDevice};

use gd_epaper::{
    Config, FourWireBitBang, FourWireSpi, ThreeWireBitBang, ThreeWireSpi, Uc8179,
};

/// What the controller saw, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Reset(PinState),
    DelayUs(u32),
    BusyRead(PinState),
    Command(u8),
    Data(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Rst,
    Dc,
    Mosi,
    Clk,
    Cs,
    Busy,
}

pub struct Wire {
    pub events: Vec<Event>,
    dc_high: bool,
    mosi_high: bool,
    clk_high: bool,
    cs_low: bool,
    bits: Vec<bool>,
    /// Levels returned by the next BUSY reads
    pub busy_script: VecDeque<PinState>,
    /// Level returned once the script is used up
    pub busy_idle: PinState,
    /// SPI writes succeed until this many bytes went out
    pub spi_fail_after: Option<usize>,
    spi_bytes: usize,
}

impl Default for Wire {
    fn default() -> Self {
        Wire {
            events: Vec::new(),
            dc_high: false,
            mosi_high: false,
            clk_high: false,
            cs_low: false,
            bits: Vec::new(),
            busy_script: VecDeque::new(),
            busy_idle: PinState::High,
            spi_fail_after: None,
            spi_bytes: 0,
        }
    }
}

impl Wire {
    fn drive(&mut self, role: Role, high: bool) {
        match role {
            Role::Rst => self.events.push(Event::Reset(PinState::from(high))),
            Role::Dc => self.dc_high = high,
            Role::Mosi => self.mosi_high = high,
            Role::Clk => {
                if high && !self.clk_high && self.cs_low {
                    self.bits.push(self.mosi_high);
                }
                self.clk_high = high;
            }
            Role::Cs => {
                if !high && !self.cs_low {
                    self.bits.clear();
                } else if high && self.cs_low {
                    self.end_frame();
                }
                self.cs_low = !high;
            }
            Role::Busy => panic!("BUSY is an input"),
        }
    }

    fn end_frame(&mut self) {
        let word = self
            .bits
            .iter()
            .fold(0u16, |word, &bit| (word << 1) | u16::from(bit));
        let event = match self.bits.len() {
            8 => self.byte_event(word as u8, self.dc_high),
            9 => self.byte_event(word as u8, word & 0x100 != 0),
            n => panic!("unexpected frame of {n} bits"),
        };
        self.events.push(event);
    }

    fn byte_event(&self, byte: u8, data: bool) -> Event {
        if data {
            Event::Data(byte)
        } else {
            Event::Command(byte)
        }
    }

    fn read_busy(&mut self) -> PinState {
        let level = self.busy_script.pop_front().unwrap_or(self.busy_idle);
        self.events.push(Event::BusyRead(level));
        level
    }

    fn spi_write(&mut self, data: bool, byte: u8) -> Result<(), ErrorKind> {
        if self.spi_fail_after.is_some_and(|limit| self.spi_bytes >= limit) {
            return Err(ErrorKind::Other);
        }
        self.spi_bytes += 1;
        let event = self.byte_event(byte, data);
        self.events.push(event);
        Ok(())
    }
}

pub type SharedWire = Rc<RefCell<Wire>>;

pub struct FakePin {
    wire: SharedWire,
    role: Role,
}

impl digital::ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.wire.borrow_mut().drive(self.role, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.wire.borrow_mut().drive(self.role, true);
        Ok(())
    }
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.wire.borrow_mut().read_busy() == PinState::High)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.wire.borrow_mut().read_busy() == PinState::Low)
    }
}

/// Records microsecond delays. Nanosecond delays only pace the bit-banged
/// clock and are dropped.
pub struct FakeDelay {
    wire: SharedWire,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_us(&mut self, us: u32) {
        self.wire.borrow_mut().events.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

/// SPI peripheral for 8-bit words, D/C comes from the wire
pub struct FakeSpi {
    wire: SharedWire,
}

impl spi::ErrorType for FakeSpi {
    type Error = ErrorKind;
}

impl SpiDevice<u8> for FakeSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
        let mut wire = self.wire.borrow_mut();
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        let data = wire.dc_high;
                        wire.spi_write(data, byte)?;
                    }
                }
                Operation::DelayNs(_) => {}
                _ => panic!("the display is write only"),
            }
        }
        Ok(())
    }
}

/// SPI peripheral for 9-bit words, the leading bit tells command from data
pub struct FakeSpi9 {
    wire: SharedWire,
}

impl spi::ErrorType for FakeSpi9 {
    type Error = ErrorKind;
}

impl SpiDevice<u16> for FakeSpi9 {
    fn transaction(&mut self, operations: &mut [Operation<'_, u16>]) -> Result<(), ErrorKind> {
        let mut wire = self.wire.borrow_mut();
        for op in operations {
            match op {
                Operation::Write(words) => {
                    for &word in words.iter() {
                        assert!(word < 0x200, "word 0x{word:X} is wider than 9 bits");
                        wire.spi_write(word & 0x100 != 0, word as u8)?;
                    }
                }
                Operation::DelayNs(_) => {}
                _ => panic!("the display is write only"),
            }
        }
        Ok(())
    }
}

/// A set of fakes sharing one wire
#[derive(Default, Clone)]
pub struct Rig {
    pub wire: SharedWire,
}

pub type Display<T> = Uc8179<T, FakePin, FakePin, FakeDelay>;

impl Rig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, role: Role) -> FakePin {
        FakePin {
            wire: Rc::clone(&self.wire),
            role,
        }
    }

    pub fn delay(&self) -> FakeDelay {
        FakeDelay {
            wire: Rc::clone(&self.wire),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.wire.borrow().events.clone()
    }

    pub fn four_wire_spi(&self, config: Config) -> Display<FourWireSpi<FakeSpi, FakePin>> {
        let transport = FourWireSpi::new(
            FakeSpi {
                wire: Rc::clone(&self.wire),
            },
            self.pin(Role::Dc),
        );
        self.display(transport, config)
    }

    pub fn three_wire_spi(&self, config: Config) -> Display<ThreeWireSpi<FakeSpi9>> {
        let transport = ThreeWireSpi::new(FakeSpi9 {
            wire: Rc::clone(&self.wire),
        });
        self.display(transport, config)
    }

    pub fn four_wire_bit_bang(
        &self,
        config: Config,
    ) -> Display<FourWireBitBang<FakePin, FakePin, FakePin, FakePin>> {
        let transport = FourWireBitBang::new(
            self.pin(Role::Mosi),
            self.pin(Role::Clk),
            self.pin(Role::Cs),
            self.pin(Role::Dc),
        );
        self.display(transport, config)
    }

    pub fn three_wire_bit_bang(
        &self,
        config: Config,
    ) -> Display<ThreeWireBitBang<FakePin, FakePin, FakePin>> {
        let transport =
            ThreeWireBitBang::new(self.pin(Role::Mosi), self.pin(Role::Clk), self.pin(Role::Cs));
        self.display(transport, config)
    }

    fn display<T>(&self, transport: T, config: Config) -> Display<T> {
        Uc8179::with_config(
            transport,
            self.pin(Role::Busy),
            self.pin(Role::Rst),
            self.delay(),
            config,
        )
    }
}

/// Compare two event logs, reporting the first difference instead of
/// dumping ~100k events.
pub fn assert_events(actual: &[Event], expected: &[Event]) {
    if let Some(i) = actual.iter().zip(expected).position(|(a, e)| a != e) {
        panic!(
            "event {i} differs: got {:?}, expected {:?}",
            actual[i], expected[i]
        );
    }
    assert_eq!(
        actual.len(),
        expected.len(),
        "event logs differ in length, first extra event: {:?}",
        actual.get(expected.len()).or(expected.get(actual.len()))
    );
}

/// Builds the event log of one complete cycle with an immediately ready panel
pub struct Expected {
    pub events: Vec<Event>,
    reset_pulse_us: u32,
}

impl Expected {
    pub fn new(config: &Config) -> Self {
        Expected {
            events: Vec::new(),
            reset_pulse_us: config.reset_pulse_us,
        }
    }

    pub fn command(&mut self, command: u8, data: &[u8]) -> &mut Self {
        self.events.push(Event::Command(command));
        self.events.extend(data.iter().map(|&b| Event::Data(b)));
        self
    }

    /// One status poll that finds the panel ready, then the settle delay
    pub fn ready(&mut self) -> &mut Self {
        self.events.extend([
            Event::Command(0x71),
            Event::BusyRead(PinState::High),
            Event::DelayUs(100),
            Event::DelayUs(200),
        ]);
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        self.events.extend([
            Event::Reset(PinState::Low),
            Event::DelayUs(self.reset_pulse_us),
            Event::Reset(PinState::High),
            Event::DelayUs(self.reset_pulse_us),
        ]);
        self
    }

    pub fn power_and_panel(&mut self) -> &mut Self {
        self.command(0x01, &[0x07, 0x07, 0x3F, 0x3F])
            .command(0x04, &[])
            .ready()
            .command(0x00, &[0x1F])
            .command(0x61, &[0x03, 0x20, 0x01, 0xE0])
            .command(0x15, &[0x00])
            .command(0x50, &[0x10, 0x07])
            .command(0x60, &[0x22])
    }

    pub fn image(&mut self, image: &[u8]) -> &mut Self {
        self.command(0x10, &[0x00; 48_000]).command(0x13, image)
    }

    pub fn refresh_and_sleep(&mut self) -> &mut Self {
        self.command(0x12, &[]);
        self.events.push(Event::DelayUs(20));
        self.ready()
            .command(0x50, &[0xF7])
            .command(0x02, &[])
            .ready()
            .command(0x07, &[0xA5])
    }

    /// The whole cycle with `image` as the new frame
    pub fn cycle(config: &Config, image: &[u8]) -> Vec<Event> {
        let mut expected = Expected::new(config);
        expected
            .reset()
            .power_and_panel()
            .image(image)
            .refresh_and_sleep();
        expected.events
    }
}
