use core::convert::Infallible;
use core::fmt::Write;

use heapless::String;
use micro_rssi::Scanner;
use micro_viz::{
    screens::{self, ScannerOverlay},
    Compositor, Frame, SpectrumView,
};

use crate::app::{App, Screen};
use crate::battery::BatteryStatus;

/// Top-left label of the scanner screen: the frame rate when measured,
/// otherwise the scanner mode.
pub fn corner_label(app: &App, fps: Option<u32>) -> String<12> {
    match fps {
        Some(fps) => screens::fps_label(fps),
        None => {
            let mut s = String::new();
            let _ = write!(s, "{}", app.scanner_mode());
            s
        }
    }
}

/// Spectrum, waterfall and overlay for one scanner frame. A faulted
/// scanner still has its last good state, so the frame it gives is the
/// frozen one plus the fault banner.
pub fn render_scanner<const N: usize, const W: usize>(
    frame: &mut Frame,
    compositor: &Compositor,
    scanner: &Scanner<N, W>,
    corner: &str,
    battery: &BatteryStatus,
) -> Result<(), Infallible> {
    compositor.compose(frame, &SpectrumView::from_scanner(scanner));

    let config = scanner.config();
    let overlay = ScannerOverlay {
        corner,
        start_mhz: config.start_mhz(),
        end_mhz: config.end_mhz(),
        battery: battery.indicator(),
    };
    screens::scanner_overlay(frame, &overlay)?;

    if scanner.is_faulted() {
        screens::fault_banner(frame)?;
    }
    Ok(())
}

/// Full-screen pages other than the scanner. Does nothing on the scanner screen.
pub fn render_page(frame: &mut Frame, app: &App, battery: &BatteryStatus) -> Result<(), Infallible> {
    match app.screen() {
        Screen::Scanner => return Ok(()),
        Screen::Menu => {
            frame.clear();
            screens::menu_screen(
                frame,
                &app.menu_labels(),
                app.selection(),
                battery.voltage,
                battery.level,
            )?;
        }
        Screen::Info => {
            frame.clear();
            screens::info_screen(frame)?;
        }
        Screen::Contrast => {
            frame.clear();
            screens::contrast_screen(frame, app.contrast())?;
        }
    }
    Ok(())
}
