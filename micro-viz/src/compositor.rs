#[cfg(feature = "logging")]
use defmt::trace;

use micro_rssi::{column_to_channel, ScanConfig, Scanner};

use crate::frame::{Frame, FRAME_HEIGHT, FRAME_WIDTH, PAGES, PAGE_HEIGHT};

/// Rows between the floating marker and the row its level points at.
const DOT_OFFSET: i32 = 2;

/// The numeric state one scanner frame is drawn from.
#[derive(Clone, Copy)]
pub struct SpectrumView<'a> {
    /// Peak-hold height per channel.
    pub peak: &'a [u8],
    /// Floating height per channel, same length as `peak`.
    pub floating: &'a [f32],
    /// Waterfall history per display column, newest scan in bit 0.
    pub waterfall: &'a [u32],
}

impl<'a> SpectrumView<'a> {
    /// Borrows the tracker and waterfall state of `scanner`.
    pub fn from_scanner<const N: usize, const W: usize>(scanner: &'a Scanner<N, W>) -> Self {
        Self {
            peak: scanner.tracker().peak(),
            floating: scanner.tracker().floating(),
            waterfall: scanner.waterfall().columns(),
        }
    }
}

/// Merges tracker and waterfall state into a packed frame.
///
/// Rows `0..spectrum_height` hold the bars and floating dots, rows from
/// `waterfall_start` down hold the waterfall with the newest scan on the row
/// right below the split and the oldest on the bottom row.
pub struct Compositor {
    spectrum_height: i32,
    waterfall_page: usize,
}

impl Compositor {
    /// `waterfall_start` is rounded down to a page boundary.
    pub fn new(spectrum_height: u8, waterfall_start: usize) -> Self {
        Self {
            spectrum_height: spectrum_height as i32,
            waterfall_page: (waterfall_start / PAGE_HEIGHT).min(PAGES),
        }
    }

    /// Compositor for the configured spectrum height and the fixed waterfall split.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.spectrum_height, micro_rssi::config::WATERFALL_START)
    }

    /// Rebuilds `frame` from scratch out of `view`.
    pub fn compose(&self, frame: &mut Frame, view: &SpectrumView<'_>) {
        frame.clear();
        self.draw_spectrum(frame, view.peak, view.floating);
        self.draw_waterfall(frame, view.waterfall);

        #[cfg(feature = "logging")]
        trace!("compose: {} channels, {} waterfall columns", view.peak.len(), view.waterfall.len());
    }

    fn draw_spectrum(&self, frame: &mut Frame, peak: &[u8], floating: &[f32]) {
        let channels = peak.len().min(floating.len());
        if channels == 0 {
            return;
        }
        let base = self.spectrum_height;

        for x in 0..FRAME_WIDTH {
            let ch = column_to_channel(x, channels, FRAME_WIDTH);
            let x = x as i32;

            let bar_h = peak[ch] as i32;
            if bar_h > 0 {
                frame.vline(x, base - bar_h, base - 1);
            }

            // Truncation toward zero keeps a half-step level on the lower row.
            let dot_y = base - floating[ch] as i32 - DOT_OFFSET;
            if (0..base).contains(&dot_y) {
                frame.set_pixel(x, dot_y, true);
            }
        }
    }

    fn draw_waterfall(&self, frame: &mut Frame, columns: &[u32]) {
        let rows = FRAME_HEIGHT - self.waterfall_page * PAGE_HEIGHT;
        let bytes = (rows / PAGE_HEIGHT).min(4);

        for (x, &history) in columns.iter().enumerate().take(FRAME_WIDTH) {
            for p in 0..bytes {
                frame.set_page_byte(x, self.waterfall_page + p, (history >> (p * 8)) as u8);
            }
        }
    }
}
