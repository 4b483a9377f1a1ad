use core::fmt;

// --- Band Config ---
pub const SCAN_START_FREQ: u8 = 0; // Radio FREQUENCY register value of channel 0
pub const SCAN_END_FREQ: u8 = 87;
pub const BANDWIDTH: usize = (SCAN_END_FREQ - SCAN_START_FREQ) as usize + 1;
pub const BASE_FREQ_MHZ: u16 = 2400;
pub const DATA_WHITENING_IV: u8 = 0x40;

// --- Display Config ---
pub const DISPLAY_WIDTH: usize = 128;
pub const DISPLAY_HEIGHT: usize = 64;
pub const SPECTRUM_HEIGHT: u8 = 32;
pub const WATERFALL_START: usize = 32; // First waterfall row, must be page aligned

// --- Tracker / Waterfall Calibration ---
pub const HEIGHT_BASIS: u8 = 95; // Sample value that maps to a zero-height bar
pub const WATERFALL_FLOOR: u8 = 88; // Samples below this light a waterfall pixel
pub const WATERFALL_DEPTH: u32 = 32; // Rows of history, one bit each
pub const FLOATING_DECAY_STEP: f32 = 0.5;

// --- Fault Handling ---
pub const WAIT_BUDGET: u32 = 100_000; // Status polls before a radio/clock wait gives up
pub const MAX_CONSECUTIVE_FAULTS: u8 = 3;

/// Runtime view of the scan constants.
///
/// The array sizes are fixed at compile time by the const generics of
/// [`crate::Scanner`]; `bandwidth` and `display_width` must agree with them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanConfig {
    pub start_channel: u8,
    pub bandwidth: usize,
    pub display_width: usize,
    pub spectrum_height: u8,
    pub height_basis: u8,
    pub waterfall_floor: u8,
    pub waterfall_depth: u32,
    pub floating_decay_step: f32,
    pub wait_budget: u32,
    pub max_consecutive_faults: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            start_channel: SCAN_START_FREQ,
            bandwidth: BANDWIDTH,
            display_width: DISPLAY_WIDTH,
            spectrum_height: SPECTRUM_HEIGHT,
            height_basis: HEIGHT_BASIS,
            waterfall_floor: WATERFALL_FLOOR,
            waterfall_depth: WATERFALL_DEPTH,
            floating_decay_step: FLOATING_DECAY_STEP,
            wait_budget: WAIT_BUDGET,
            max_consecutive_faults: MAX_CONSECUTIVE_FAULTS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
/// Reasons a [`ScanConfig`] cannot drive a scanner.
pub enum ConfigError {
    EmptyBand,
    /// The radio only tunes 0..=100 above the base frequency.
    BandOutOfRange,
    EmptyDisplay,
    ZeroSpectrumHeight,
    /// Depth must be 1..=32 to fit the per-column `u32` history.
    WaterfallDepth(u32),
    /// Decay step must be positive and finite.
    DecayStep,
    ZeroWaitBudget,
    /// A zero limit would report a fault before the first sweep.
    ZeroFaultLimit,
    /// Array sizes of the scanner do not match the configuration.
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyBand => write!(f, "band has no channels"),
            ConfigError::BandOutOfRange => write!(f, "band exceeds the tunable range"),
            ConfigError::EmptyDisplay => write!(f, "display has no columns"),
            ConfigError::ZeroSpectrumHeight => write!(f, "spectrum height is zero"),
            ConfigError::WaterfallDepth(d) => write!(f, "waterfall depth {} not in 1..=32", d),
            ConfigError::DecayStep => write!(f, "floating decay step must be positive"),
            ConfigError::ZeroWaitBudget => write!(f, "wait budget is zero"),
            ConfigError::ZeroFaultLimit => write!(f, "consecutive fault limit is zero"),
            ConfigError::SizeMismatch { expected, actual } => {
                write!(f, "expected {} slots, scanner has {}", expected, actual)
            }
        }
    }
}

impl ScanConfig {
    /// Checks every field against the ranges the pipeline can handle.
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bandwidth == 0 {
            return Err(ConfigError::EmptyBand);
        }
        if self.start_channel as usize + self.bandwidth - 1 > 100 {
            return Err(ConfigError::BandOutOfRange);
        }
        if self.display_width == 0 {
            return Err(ConfigError::EmptyDisplay);
        }
        if self.spectrum_height == 0 {
            return Err(ConfigError::ZeroSpectrumHeight);
        }
        if self.waterfall_depth == 0 || self.waterfall_depth > 32 {
            return Err(ConfigError::WaterfallDepth(self.waterfall_depth));
        }
        if !(self.floating_decay_step > 0.0) || !self.floating_decay_step.is_finite() {
            return Err(ConfigError::DecayStep);
        }
        if self.wait_budget == 0 {
            return Err(ConfigError::ZeroWaitBudget);
        }
        if self.max_consecutive_faults == 0 {
            return Err(ConfigError::ZeroFaultLimit);
        }
        Ok(())
    }

    /// Last channel of the band, as programmed into the radio.
    pub fn end_channel(&self) -> u8 {
        self.start_channel + (self.bandwidth - 1) as u8
    }

    /// Frequency of the first channel, for the band label.
    pub fn start_mhz(&self) -> u16 {
        BASE_FREQ_MHZ + self.start_channel as u16
    }

    /// Frequency of the last channel, for the band label.
    pub fn end_mhz(&self) -> u16 {
        BASE_FREQ_MHZ + self.end_channel() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_band_constants() {
        let config = ScanConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.bandwidth, 88);
        assert_eq!(config.start_mhz(), 2400);
        assert_eq!(config.end_mhz(), 2487);
    }

    #[test]
    fn rejects_bad_depth_and_step() {
        let mut config = ScanConfig::default();
        config.waterfall_depth = 33;
        assert_eq!(config.validate(), Err(ConfigError::WaterfallDepth(33)));

        let mut config = ScanConfig::default();
        config.floating_decay_step = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::DecayStep));

        let mut config = ScanConfig::default();
        config.floating_decay_step = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::DecayStep));
    }

    #[test]
    fn rejects_zero_fault_limit() {
        let mut config = ScanConfig::default();
        config.max_consecutive_faults = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFaultLimit));
        assert!(crate::BandScanner::new(config).is_err());
    }

    #[test]
    fn rejects_band_past_tunable_range() {
        let mut config = ScanConfig::default();
        config.start_channel = 20;
        assert_eq!(config.validate(), Err(ConfigError::BandOutOfRange));
    }
}
