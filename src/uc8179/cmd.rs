pub struct Cmd;
impl Cmd {
    // Init
    pub const PANEL_SETTING: u8 = 0x00;
    pub const POWER_SETTING: u8 = 0x01;
    pub const POWER_ON: u8 = 0x04;
    pub const DUAL_SPI: u8 = 0x15;
    pub const VCOM_DATA_INTERVAL: u8 = 0x50;
    pub const TCON_SETTING: u8 = 0x60;
    pub const RESOLUTION_SETTING: u8 = 0x61;

    // Update
    pub const DATA_START_TRANSMISSION_1: u8 = 0x10;
    pub const DATA_START_TRANSMISSION_2: u8 = 0x13;
    pub const DISPLAY_REFRESH: u8 = 0x12;
    pub const GET_STATUS: u8 = 0x71;

    // Sleep
    pub const POWER_OFF: u8 = 0x02;
    pub const DEEP_SLEEP: u8 = 0x07;
}

/*
GDEY075T7 sample code uses these:
0x01 - Power Setting (PWR)
0x04 - Power ON (PON)
0x00 - Panel Setting (PSR)
0x61 - Resolution Setting (TRES)
0x15 - Dual SPI (DUSPI)
0x50 - VCOM and Data Interval Setting (CDI)
0x60 - TCON Setting (TCON)
0x10 - Display Start Transmission 1 (DTM1, old data)
0x13 - Display Start Transmission 2 (DTM2, new data)
0x12 - Display Refresh (DRF)
0x71 - Get Status (FLG)
0x02 - Power OFF (POF)
0x07 - Deep Sleep (DSLP)
*/
