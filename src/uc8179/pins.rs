//! Pin definitions for the GDEY075T7 e-paper display on an ESP32-C3
//!
//! This module contains the GPIO pin assignments used by the demo binary.
use thiserror::Error;

/// Pin configuration constants for the UC8179 display
pub struct Pins;

impl Pins {
    /// Busy status pin (LOW while the controller is busy)
    pub const BSY: u8 = 2;
    /// Reset pin for display
    pub const RST: u8 = 4;
    /// Data/Command control pin (High for data, Low for command)
    pub const DC: u8 = 5;
    /// SPI Clock pin
    pub const SCK: u8 = 6;
    /// SPI Master Out Slave In
    pub const MOSI: u8 = 7;
    /// Chip Select pin for SPI display
    pub const CS: u8 = 8;

    /// Signal name and GPIO number for every wire
    pub const WIRING: [(&'static str, u8); 6] = [
        ("BSY", Self::BSY),
        ("RST", Self::RST),
        ("DC", Self::DC),
        ("SCK", Self::SCK),
        ("MOSI", Self::MOSI),
        ("CS", Self::CS),
    ];

    /// Compares the GPIOs actually handed to the drivers with [`Self::WIRING`].
    ///
    /// `assigned` pairs a signal name with the GPIO number the pin driver owns.
    pub fn check(assigned: &[(&str, i32)]) -> Result<(), WiringError> {
        for &(signal, gpio) in assigned {
            let expected = Self::WIRING
                .iter()
                .find(|(name, _)| *name == signal)
                .map(|&(_, pin)| pin)
                .ok_or_else(|| WiringError::UnknownSignal(signal.to_owned()))?;
            if i32::from(expected) != gpio {
                return Err(WiringError::Mismatch {
                    signal: signal.to_owned(),
                    expected,
                    actual: gpio,
                });
            }
        }
        Ok(())
    }
}

/// A pin driver does not sit on the GPIO listed in [`Pins`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WiringError {
    #[error("{signal} is wired to GPIO{expected} but the driver uses GPIO{actual}")]
    Mismatch {
        signal: String,
        expected: u8,
        actual: i32,
    },
    #[error("no pin named {0} in the wiring table")]
    UnknownSignal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_signal_has_its_own_gpio() {
        let mut gpios: Vec<u8> = Pins::WIRING.iter().map(|&(_, pin)| pin).collect();
        gpios.sort_unstable();
        gpios.dedup();
        assert_eq!(gpios.len(), Pins::WIRING.len());
    }

    #[test]
    fn matching_drivers_pass() {
        let assigned: Vec<(&str, i32)> = Pins::WIRING
            .iter()
            .map(|&(name, pin)| (name, i32::from(pin)))
            .collect();
        assert_eq!(Pins::check(&assigned), Ok(()));
    }

    #[test]
    fn swapped_driver_is_reported() {
        assert_eq!(
            Pins::check(&[("BSY", 2), ("SCK", 7), ("MOSI", 6)]),
            Err(WiringError::Mismatch {
                signal: "SCK".to_owned(),
                expected: 6,
                actual: 7,
            })
        );
    }

    #[test]
    fn unknown_signal_is_reported() {
        assert_eq!(
            Pins::check(&[("MISO", 9)]),
            Err(WiringError::UnknownSignal("MISO".to_owned()))
        );
    }
}
