/// Data bytes that follow the UC8179 commands for the GDEY075T7 panel.
///
/// All values are fixed for this panel model and sent as-is.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Power Setting (0x01): border LDO + internal DC/DC, VGH=20V VGL=-20V, VDH=15V, VDL=-15V
    pub const POWER_SETTING: [u8; 4] = [0x07, 0x07, 0x3F, 0x3F];

    // Panel Setting (0x00)
    pub const PANEL_KW_LUT_OTP: u8 = 0x1F; // KW mode, LUT from OTP (KWR would be 0x2F)

    // Resolution Setting (0x61): source 800, gate 480, high byte first
    pub const RESOLUTION: [u8; 4] = [0x03, 0x20, 0x01, 0xE0];

    // Dual SPI (0x15)
    pub const DUAL_SPI_DISABLED: u8 = 0x00;

    // VCOM and Data Interval Setting (0x50)
    pub const VCOM_DATA_INTERVAL: [u8; 2] = [0x10, 0x07];
    pub const VCOM_DATA_INTERVAL_SLEEP: u8 = 0xF7; // floating border before power off

    // TCON Setting (0x60)
    pub const TCON: u8 = 0x22;

    // Deep Sleep (0x07) check code
    pub const DEEP_SLEEP_CHECK: u8 = 0xA5;

    // Old frame (0x10) contents
    pub const OLD_DATA: u8 = 0x00;
}
