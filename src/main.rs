//! GDEY075T7 demo on an ESP32-C3: draws random lines and refreshes every 5 seconds.
//!
//! Builds with `--features esp-idf`. The default wiring bit-bangs 4-wire SPI on
//! plain GPIOs, enable `hardware-spi` to drive the same pins from SPI2 instead.
use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use esp_idf_svc::hal::delay::{Delay, FreeRtos};
use esp_idf_svc::hal::gpio::{Pin, PinDriver, Pull};
use esp_idf_svc::hal::peripherals::Peripherals;

use gd_epaper::uc8179::pins::Pins;
use gd_epaper::{map_value, Color, Config, Transport, Uc8179, HEIGHT, WIDTH};

/// Lines added to the picture on every refresh
const LINES_PER_CYCLE: usize = 5;

/// Refreshes before the picture is wiped and started over
const CYCLES_BEFORE_WIPE: u32 = 30;

const CYCLE_INTERVAL_MS: u32 = 5000;

/// Random bytes from the hardware RNG
fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    // SAFETY: the pointer and length describe `buf`, which outlives the call
    unsafe {
        esp_idf_svc::sys::esp_fill_random(buf.as_mut_ptr().cast(), buf.len());
    }
    buf
}

/// Draw a few random lines and push the frame, forever
fn run<T, BSY, RST, DELAY>(display: &mut Uc8179<T, BSY, RST, DELAY>) -> !
where
    T: Transport,
    BSY: InputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    let width = i32::from(WIDTH);
    let height = i32::from(HEIGHT);
    let mut cycles: u32 = 0;

    loop {
        if cycles > CYCLES_BEFORE_WIPE {
            log::info!("{} refreshes done, starting over on a white frame", cycles);
            cycles = 0;
            display.fill(Color::White);
        }

        let random: [u8; LINES_PER_CYCLE * 4] = random_bytes();
        for line in random.chunks_exact(4) {
            let [x1, y1, x2, y2] = [line[0], line[1], line[2], line[3]].map(i32::from);
            display.draw_line(
                map_value(x1, 0, 255, 0, width),
                map_value(y1, 0, 255, 0, height),
                map_value(x2, 0, 255, 0, width),
                map_value(y2, 0, 255, 0, height),
                Color::Black,
            );
        }

        // The next cycle starts with a hardware reset anyway
        if let Err(e) = display.update_screen() {
            log::error!("Failed to update screen: {}", e);
        }
        cycles += 1;
        FreeRtos::delay_ms(CYCLE_INTERVAL_MS);
    }
}

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    log::info!(
        "GDEY075T7 wiring: BUSY={} RST={} DC={} SCK={} MOSI={} CS={}",
        Pins::BSY,
        Pins::RST,
        Pins::DC,
        Pins::SCK,
        Pins::MOSI,
        Pins::CS
    );

    // Refuse to start if the drivers below disagree with the wiring table
    Pins::check(&[
        ("BSY", pins.gpio2.pin()),
        ("RST", pins.gpio4.pin()),
        ("DC", pins.gpio5.pin()),
        ("SCK", pins.gpio6.pin()),
        ("MOSI", pins.gpio7.pin()),
        ("CS", pins.gpio8.pin()),
    ])?;

    let mut busy = PinDriver::input(pins.gpio2)?; // Pins::BSY
    busy.set_pull(Pull::Up)?;
    let rst = PinDriver::output(pins.gpio4)?; // Pins::RST
    let dc = PinDriver::output(pins.gpio5)?; // Pins::DC

    let config = Config::new().with_busy_timeout(Some(Duration::from_secs(30)));

    #[cfg(feature = "hardware-spi")]
    let transport = {
        use esp_idf_svc::hal::gpio::AnyIOPin;
        use esp_idf_svc::hal::prelude::*;
        use esp_idf_svc::hal::spi;

        log::info!("Configuring SPI2 at 1 MHz, mode 0");
        let spi = spi::SpiDeviceDriver::new_single(
            peripherals.spi2,
            pins.gpio6,               // SCK - Pins::SCK
            pins.gpio7,               // MOSI - Pins::MOSI
            Option::<AnyIOPin>::None, // The panel has no MISO
            Some(pins.gpio8),         // CS - Pins::CS
            &spi::SpiDriverConfig::new(),
            &spi::SpiConfig::new().baudrate(1.MHz().into()),
        )?;
        gd_epaper::FourWireSpi::new(spi, dc)
    };

    #[cfg(not(feature = "hardware-spi"))]
    let transport = {
        log::info!("Bit-banging 4-wire SPI on GPIOs");
        gd_epaper::FourWireBitBang::new(
            PinDriver::output(pins.gpio7)?, // Pins::MOSI
            PinDriver::output(pins.gpio6)?, // Pins::SCK
            PinDriver::output(pins.gpio8)?, // Pins::CS
            dc,
        )
    };

    let mut display = Uc8179::with_config(transport, busy, rst, Delay::default(), config);
    run(&mut display)
}
