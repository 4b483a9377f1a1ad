use core::fmt::Write;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    mono_font::{ascii::FONT_5X7, MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use heapless::String;

use crate::frame::FRAME_WIDTH;

/// 5x7 glyphs on a 6 pixel advance.
const FONT: MonoFont<'static> = MonoFont {
    character_spacing: 1,
    ..FONT_5X7
};
const CHAR_ADVANCE: i32 = 6;

pub const MENU_LEFT_X: i32 = 25;
pub const MAX_CONTRAST: u8 = 63;
pub const BATTERY_LEVELS: u8 = 8;

/// What the battery corner of the scanner screen shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatteryIndicator {
    Charging,
    Percent(u8),
}

/// Everything drawn on top of the spectrum and waterfall.
pub struct ScannerOverlay<'a> {
    /// Top-left label, the frame rate or the scanner mode.
    pub corner: &'a str,
    pub start_mhz: u16,
    pub end_mhz: u16,
    pub battery: BatteryIndicator,
}

/// Draws `s` with its top-left corner at `(x, y)`.
pub fn text<D>(target: &mut D, x: i32, y: i32, s: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT, BinaryColor::On);
    Text::with_baseline(s, Point::new(x, y), style, Baseline::Top).draw(target)?;
    Ok(())
}

fn text_width(s: &str) -> i32 {
    s.len() as i32 * CHAR_ADVANCE
}

fn outline<D>(target: &mut D, x: i32, y: i32, w: u32, h: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(target)
}

fn filled<D>(target: &mut D, x: i32, y: i32, w: u32, h: u32, color: BinaryColor) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)
}

/// Outlined bar with its inside filled in proportion to `level / max`.
pub fn filled_bar<D>(
    target: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    level: u32,
    max: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    outline(target, x, y, w, h)?;
    if level > 0 && max > 0 {
        let level = level.min(max);
        let inner = level * w.saturating_sub(2) / max;
        filled(target, x + 1, y + 1, inner, h.saturating_sub(2), BinaryColor::On)?;
    }
    Ok(())
}

/// Formats a frame rate as `"57hz"`.
pub fn fps_label(fps: u32) -> String<12> {
    let mut s = String::new();
    let _ = write!(s, "{}hz", fps);
    s
}

/// Corner label, band edges and battery on top of a composed frame.
pub fn scanner_overlay<D>(target: &mut D, overlay: &ScannerOverlay<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut buf: String<8> = String::new();

    text(target, 0, 0, overlay.corner)?;

    let _ = write!(buf, "{}", overlay.start_mhz);
    text(target, 0, 56, &buf)?;
    buf.clear();
    let _ = write!(buf, "{}", overlay.end_mhz);
    text(target, 100, 56, &buf)?;

    buf.clear();
    match overlay.battery {
        BatteryIndicator::Charging => text(target, 100, 0, "CHRG")?,
        BatteryIndicator::Percent(pct) => {
            let _ = write!(buf, "{}%", pct);
            text(target, 100, 0, &buf)?;
        }
    }
    Ok(())
}

/// Inverse banner drawn over a frozen frame when the radio stops answering.
pub fn fault_banner<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    const LABEL: &str = "SENSOR FAULT";
    let x = (FRAME_WIDTH as i32 - text_width(LABEL)) / 2;
    filled(target, x - 4, 24, text_width(LABEL) as u32 + 8, 11, BinaryColor::On)?;
    let style = MonoTextStyle::new(&FONT, BinaryColor::Off);
    Text::with_baseline(LABEL, Point::new(x, 26), style, Baseline::Top).draw(target)?;
    Ok(())
}

/// Double border and title shown once after the power-on hold.
pub fn boot_screen<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    outline(target, 2, 2, 124, 60)?;
    outline(target, 4, 4, 120, 56)?;
    text(target, 46, 15, "2.4GHz")?;
    text(target, 40, 25, "SPECTRUM")?;
    text(target, 40, 35, "ANALYZER")?;
    text(target, 44, 45, "ATC1441")
}

/// Progress of the power-on hold, `step` out of `steps`.
pub fn hold_to_start<D>(target: &mut D, step: u32, steps: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    text(target, 25, 25, "HOLD TO START")?;
    outline(target, 14, 38, 100, 8)?;
    let fill = step * 96 / steps.saturating_sub(1).max(1);
    filled(target, 16, 40, fill.min(96), 4, BinaryColor::On)
}

/// Centered single line message, used for the goodbye and bootloader notices.
pub fn message<D>(target: &mut D, x: i32, y: i32, s: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    text(target, x, y, s)
}

/// Credits page opened from the menu.
pub fn info_screen<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    outline(target, 0, 0, 128, 64)?;
    text(target, 4, 4, "Made by ATC1441")?;
    text(target, 4, 13, "github.com")?;
    text(target, 4, 21, "/atc1441")?;
    text(target, 4, 29, "/pixlAnalyzer")?;
    text(target, 4, 44, "Credit Codebase:")?;
    text(target, 4, 52, "solosky/pixl.js")
}

/// Current contrast as a number and as a bar.
pub fn contrast_screen<D>(target: &mut D, contrast: u8) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut buf: String<16> = String::new();
    let _ = write!(buf, "Contrast: {}", contrast);
    text(target, (FRAME_WIDTH as i32 - text_width(&buf)) / 2, 20, &buf)?;

    let w = MAX_CONTRAST as u32 + 2;
    let x = (FRAME_WIDTH as i32 - w as i32) / 2;
    filled_bar(target, x, 30, w, 8, contrast as u32, MAX_CONTRAST as u32)
}

/// The main menu with battery readout. `voltage` is in volts, `level` in `0..=8`.
pub fn menu_screen<D>(
    target: &mut D,
    items: &[&str],
    selection: usize,
    voltage: f32,
    level: u8,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    outline(target, 0, 0, 128, 64)?;
    text(target, 52, 3, "MENU")?;

    let mut buf: String<16> = String::new();
    let volts = voltage.max(0.0);
    let whole = volts as u32;
    let hundredths = ((volts - whole as f32) * 100.0) as u32;
    let _ = write!(buf, "Batt: {}.{:02}V", whole, hundredths);
    let y = 11;
    text(target, MENU_LEFT_X, y, &buf)?;

    // Battery body with two pixels per level, then its tip.
    let x = MENU_LEFT_X + (buf.len() as i32 + 1) * CHAR_ADVANCE;
    let h = 7;
    let w = BATTERY_LEVELS as u32 * 2 + 2;
    filled_bar(target, x, y, w, h, level as u32, BATTERY_LEVELS as u32)?;
    outline(target, x + w as i32, y + 2, 2, h - 4)?;

    for (line, item) in items.iter().enumerate() {
        let y = line as i32 * 8 + 21;
        if line == selection {
            text(target, MENU_LEFT_X - 10, y, ">")?;
        }
        text(target, MENU_LEFT_X, y, item)?;
    }
    Ok(())
}
