#![no_std]
//! Board support for the nRF52832 analyzer: the chip peripherals behind the
//! traits the acquisition and application crates drive.

pub mod battery;
pub mod power;
pub mod radio;
pub mod settings;

use cfg_if::cfg_if;
use micro_viz::PanelKind;

cfg_if! {
    if #[cfg(feature = "oled-sh1106")] {
        pub const PANEL: PanelKind = PanelKind::Sh1106;
    } else {
        pub const PANEL: PanelKind = PanelKind::St7565;
    }
}

/// GPIO numbers on port 0.
pub mod pins {
    pub const LCD_SCL: usize = 26;
    pub const LCD_MOSI: usize = 25;
    pub const LCD_CS: usize = 27;
    pub const LCD_DC: usize = 28;
    pub const LCD_RST: usize = 29;
    pub const LCD_BL: usize = 30;
    pub const BTN_LEFT: usize = 5;
    pub const BTN_MID: usize = 6;
    pub const BTN_RIGHT: usize = 7;
    /// AIN0.
    pub const ADC_INPUT: usize = 2;
    pub const CHRG_STAT: usize = 3;
}
