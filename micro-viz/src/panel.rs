#[cfg(feature = "logging")]
use defmt::info;

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::frame::{Frame, PAGES};

pub const DEFAULT_CONTRAST: u8 = 32;
const CONTRAST_MASK: u8 = 0x3F;

const SH1106_INIT: [u8; 23] = [
    0x40, 0xB0, 0x81, 0xCF, 0xA1, 0xA6, 0xA8, 0x3F, 0xAD, 0x8B, 0x33, 0xC8, 0xD3, 0x00, 0xD5,
    0x80, 0xD9, 0x1F, 0xDA, 0x12, 0xDB, 0x40, 0xAF,
];
const ST7565_INIT_HEAD: [u8; 5] = [0xA2, 0xA0, 0xC8, 0x23, 0x81];
const ST7565_INIT_TAIL: [u8; 4] = [0x2F, 0xB0, 0xA6, 0xAF];

/// Controller fitted to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum PanelKind {
    /// Monochrome LCD with software contrast.
    St7565,
    /// 132 column OLED driving a 128 column window.
    Sh1106,
}

impl PanelKind {
    /// First RAM column of the visible window.
    pub const fn column_offset(self) -> u8 {
        match self {
            PanelKind::St7565 => 0,
            PanelKind::Sh1106 => 2,
        }
    }

    /// Whether the controller accepts the contrast command.
    pub const fn has_contrast(self) -> bool {
        matches!(self, PanelKind::St7565)
    }
}

/// Commands that point the write cursor at `column` of `page`.
pub const fn page_address(page: u8, column: u8) -> [u8; 3] {
    [0xB0 | (page & 0x0F), column & 0x0F, 0x10 | ((column >> 4) & 0x0F)]
}

/// Something a finished frame can be pushed to.
pub trait DisplayTransport {
    type Error;

    /// Writes all pages of `frame`.
    fn present(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// GPIO lines of the panel header. All of them are outputs.
pub struct PanelPins<P> {
    pub scl: P,
    pub mosi: P,
    pub cs: P,
    pub dc: P,
    pub rst: P,
    pub backlight: P,
}

/// Write-only 3-wire panel driven by toggling GPIOs.
pub struct BitBangPanel<P> {
    pins: PanelPins<P>,
    kind: PanelKind,
}

impl<P, E> BitBangPanel<P>
where
    P: OutputPin<Error = E>,
{
    /// Wraps the pins without touching them; call [`BitBangPanel::init`] next.
    ///
    /// # Arguments
    /// * `pins`: Already configured as push-pull outputs, CS idle high.
    /// * `kind`: Selects the init sequence, the column offset and contrast support.
    pub fn new(pins: PanelPins<P>, kind: PanelKind) -> Self {
        Self { pins, kind }
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    fn shift_out(&mut self, byte: u8) -> Result<(), E> {
        for bit in (0..8).rev() {
            if byte & (1 << bit) != 0 {
                self.pins.mosi.set_high()?;
            } else {
                self.pins.mosi.set_low()?;
            }
            self.pins.scl.set_high()?;
            self.pins.scl.set_low()?;
        }
        Ok(())
    }

    /// Sends one command byte (DC low).
    pub fn command(&mut self, cmd: u8) -> Result<(), E> {
        self.pins.cs.set_low()?;
        self.pins.dc.set_low()?;
        self.shift_out(cmd)?;
        self.pins.cs.set_high()
    }

    /// Sends each byte as its own command.
    pub fn commands(&mut self, cmds: &[u8]) -> Result<(), E> {
        cmds.iter().try_for_each(|&c| self.command(c))
    }

    /// Sends a block of display RAM bytes (DC high) in one CS frame.
    pub fn data(&mut self, bytes: &[u8]) -> Result<(), E> {
        self.pins.cs.set_low()?;
        self.pins.dc.set_high()?;
        for &b in bytes {
            self.shift_out(b)?;
        }
        self.pins.cs.set_high()
    }

    /// Hardware reset followed by the controller's power-up sequence.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D, contrast: u8) -> Result<(), E> {
        self.pins.cs.set_high()?;
        self.pins.backlight.set_high()?;

        self.pins.rst.set_low()?;
        delay.delay_ms(100);
        self.pins.rst.set_high()?;
        delay.delay_ms(100);

        match self.kind {
            PanelKind::Sh1106 => {
                let [_, lo, hi] = page_address(0, self.kind.column_offset());
                self.commands(&[0xAE, lo, hi])?;
                self.commands(&SH1106_INIT)?;
            }
            PanelKind::St7565 => {
                self.command(0xE2)?;
                delay.delay_ms(10);
                self.commands(&ST7565_INIT_HEAD)?;
                self.command(contrast)?;
                self.commands(&ST7565_INIT_TAIL)?;
            }
        }

        #[cfg(feature = "logging")]
        info!("panel {} up, contrast {}", self.kind, contrast);
        Ok(())
    }

    /// Ignored by panels without software contrast.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), E> {
        if self.kind.has_contrast() {
            self.commands(&[0x81, contrast & CONTRAST_MASK])?;
        }
        Ok(())
    }

    /// Panel off and backlight dark, ahead of power-down.
    pub fn uninit<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), E> {
        if self.kind == PanelKind::Sh1106 {
            self.command(0xAE)?;
        }
        self.pins.backlight.set_low()?;
        delay.delay_ms(100);
        Ok(())
    }
}

impl<P, E> DisplayTransport for BitBangPanel<P>
where
    P: OutputPin<Error = E>,
{
    type Error = E;

    fn present(&mut self, frame: &Frame) -> Result<(), E> {
        let column = self.kind.column_offset();
        for page in 0..PAGES {
            self.commands(&page_address(page as u8, column))?;
            self.data(frame.page(page))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::frame::FRAME_WIDTH;
    use core::convert::Infallible;
    use std::{cell::RefCell, rc::Rc, vec, vec::Vec};

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Line {
        Scl,
        Mosi,
        Cs,
        Dc,
        Rst,
        Backlight,
    }

    type Log = Rc<RefCell<Vec<(Line, bool)>>>;

    struct RecordingPin {
        line: Line,
        log: Log,
    }

    impl embedded_hal::digital::ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push((self.line, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push((self.line, true));
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.ns += ns as u64;
        }
    }

    fn panel(kind: PanelKind) -> (BitBangPanel<RecordingPin>, Log) {
        let log: Log = Rc::default();
        let pin = |line| RecordingPin { line, log: log.clone() };
        let pins = PanelPins {
            scl: pin(Line::Scl),
            mosi: pin(Line::Mosi),
            cs: pin(Line::Cs),
            dc: pin(Line::Dc),
            rst: pin(Line::Rst),
            backlight: pin(Line::Backlight),
        };
        (BitBangPanel::new(pins, kind), log)
    }

    /// Replays the pin log as the panel sees it: one entry per CS frame,
    /// flagged `true` for data.
    fn decode(log: &Log) -> Vec<(bool, Vec<u8>)> {
        let mut out = Vec::new();
        let (mut mosi, mut dc, mut selected) = (false, false, false);
        let (mut byte, mut bits) = (0u8, 0);
        let mut current = Vec::new();

        for &(line, level) in log.borrow().iter() {
            match line {
                Line::Mosi => mosi = level,
                Line::Dc => dc = level,
                Line::Scl if level && selected => {
                    byte = (byte << 1) | mosi as u8;
                    bits += 1;
                    if bits == 8 {
                        current.push(byte);
                        bits = 0;
                    }
                }
                Line::Cs if !level => selected = true,
                Line::Cs if level && selected => {
                    selected = false;
                    out.push((dc, core::mem::take(&mut current)));
                }
                _ => {}
            }
        }
        out
    }

    fn commands_only(frames: &[(bool, Vec<u8>)]) -> Vec<u8> {
        frames
            .iter()
            .filter(|(data, _)| !data)
            .flat_map(|(_, bytes)| bytes.iter().copied())
            .collect()
    }

    #[test]
    fn command_is_shifted_msb_first() {
        let (mut panel, log) = panel(PanelKind::St7565);
        panel.command(0xA5).unwrap();
        assert_eq!(decode(&log), vec![(false, vec![0xA5])]);
    }

    #[test]
    fn st7565_init_sequence_carries_contrast() {
        let (mut panel, log) = panel(PanelKind::St7565);
        let mut delay = CountingDelay::default();
        panel.init(&mut delay, 40).unwrap();

        assert_eq!(
            commands_only(&decode(&log)),
            vec![0xE2, 0xA2, 0xA0, 0xC8, 0x23, 0x81, 40, 0x2F, 0xB0, 0xA6, 0xAF]
        );
        assert_eq!(delay.ns, 210_000_000);
        // Backlight comes on before the reset pulse.
        let first_rst = log.borrow().iter().position(|&(l, _)| l == Line::Rst).unwrap();
        assert!(log.borrow()[..first_rst].contains(&(Line::Backlight, true)));
    }

    #[test]
    fn sh1106_init_sets_column_offset() {
        let (mut panel, log) = panel(PanelKind::Sh1106);
        panel.init(&mut CountingDelay::default(), DEFAULT_CONTRAST).unwrap();

        let cmds = commands_only(&decode(&log));
        assert_eq!(&cmds[..4], &[0xAE, 0x02, 0x10, 0x40]);
        assert_eq!(cmds.len(), 26);
        assert_eq!(cmds.last(), Some(&0xAF));
    }

    #[test]
    fn contrast_only_on_st7565() {
        let (mut lcd, log) = panel(PanelKind::St7565);
        lcd.set_contrast(0xFF).unwrap();
        assert_eq!(commands_only(&decode(&log)), vec![0x81, 0x3F]);

        let (mut oled, log) = panel(PanelKind::Sh1106);
        oled.set_contrast(10).unwrap();
        assert!(decode(&log).is_empty());
    }

    #[test]
    fn present_streams_pages_with_address_prefix() {
        let (mut panel, log) = panel(PanelKind::Sh1106);
        let mut frame = Frame::new();
        frame.set_page_byte(0, 3, 0x5A);
        panel.present(&frame).unwrap();

        let frames = decode(&log);
        assert_eq!(frames.len(), PAGES * 4);
        for (page, chunk) in frames.chunks(4).enumerate() {
            let addr: Vec<u8> = chunk[..3].iter().flat_map(|(_, b)| b.clone()).collect();
            assert_eq!(addr, page_address(page as u8, 2).to_vec());
            let (is_data, bytes) = &chunk[3];
            assert!(is_data);
            assert_eq!(bytes.len(), FRAME_WIDTH);
            assert_eq!(bytes[0], if page == 3 { 0x5A } else { 0 });
        }
    }

    #[test]
    fn uninit_darkens_backlight() {
        let (mut panel, log) = panel(PanelKind::Sh1106);
        panel.uninit(&mut CountingDelay::default()).unwrap();
        assert_eq!(commands_only(&decode(&log)), vec![0xAE]);
        assert_eq!(log.borrow().last(), Some(&(Line::Backlight, false)));
    }
}
