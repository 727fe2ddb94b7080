//! Timing configuration of the driver
use core::time::Duration;

/// Interval between two status polls while waiting for BUSY
pub const BUSY_POLL_INTERVAL_US: u32 = 100;

/// Settle time after the panel reported ready, the controller wants at least 100 us
pub const BUSY_SETTLE_US: u32 = 200;

/// Delay between the refresh command and the first status poll, at least 20 us
pub const REFRESH_SETTLE_US: u32 = 20;

const RESET_PULSE_US: u32 = 10_000;
const BUSY_TIMEOUT: Duration = Duration::from_secs(60);

/// Driver configuration, fixed at construction.
///
/// ```
/// use core::time::Duration;
/// use gd_epaper::Config;
///
/// let config = Config::new()
///     .with_reset_pulse_us(20_000)
///     .with_busy_timeout(Some(Duration::from_secs(10)));
/// assert_eq!(config.max_busy_polls(), Some(100_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Time RST is held low, and the wait after releasing it (the panel needs at least 10 ms)
    pub reset_pulse_us: u32,
    /// Give up waiting for BUSY after this long, `None` waits forever
    pub busy_timeout: Option<Duration>,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            reset_pulse_us: RESET_PULSE_US,
            busy_timeout: Some(BUSY_TIMEOUT),
        }
    }

    pub const fn with_reset_pulse_us(mut self, reset_pulse_us: u32) -> Self {
        self.reset_pulse_us = reset_pulse_us;
        self
    }

    pub const fn with_busy_timeout(mut self, busy_timeout: Option<Duration>) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Number of status polls that fit in the busy timeout, at least one.
    ///
    /// Only the poll interval is counted, so the real wait is somewhat longer
    /// than the timeout.
    pub fn max_busy_polls(&self) -> Option<u32> {
        self.busy_timeout.map(|timeout| {
            let polls = timeout.as_micros() / u128::from(BUSY_POLL_INTERVAL_US);
            u32::try_from(polls).unwrap_or(u32::MAX).max(1)
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
