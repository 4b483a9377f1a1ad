#[cfg(feature = "logging")]
use defmt::{error, info, warn};

use crate::config::{ConfigError, ScanConfig};
use crate::fault::SweepFault;
use crate::radio::{HfClock, Radio};
use crate::sweep::SweepDriver;
use crate::tracker::SignalTracker;
use crate::waterfall::Waterfall;

/// Outcome of one [`Scanner::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum ScanStatus {
    /// Sweep succeeded, tracker and waterfall advanced.
    Fresh,
    /// Sweep faulted; tracker and waterfall were left untouched this frame.
    Skipped(SweepFault),
    /// Too many consecutive faults, the display should freeze and show the fault.
    Faulted(SweepFault),
}

impl ScanStatus {
    /// True when the sweep landed and the trackers moved.
    pub fn is_fresh(&self) -> bool {
        matches!(self, ScanStatus::Fresh)
    }
}

/// Owns the acquisition state and runs sweep, track and waterfall once per frame.
///
/// `N` is the channel count of the band and `W` the number of display columns.
pub struct Scanner<const N: usize, const W: usize> {
    config: ScanConfig,
    driver: SweepDriver,
    levels: [u8; N],
    tracker: SignalTracker<N>,
    waterfall: Waterfall<W>,
    consecutive_faults: u8,
    last_fault: Option<SweepFault>,
    frames: u32,
}

impl<const N: usize, const W: usize> Scanner<N, W> {
    /// Creates a scanner with empty history.
    ///
    /// # Arguments
    /// * `config`: Validated here; `bandwidth` must equal `N` and `display_width` must equal `W`.
    ///
    /// # Errors
    /// Any [`ConfigError`] from [`ScanConfig::validate`], or `SizeMismatch`.
    pub fn new(config: ScanConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.bandwidth != N {
            return Err(ConfigError::SizeMismatch { expected: config.bandwidth, actual: N });
        }
        if config.display_width != W {
            return Err(ConfigError::SizeMismatch { expected: config.display_width, actual: W });
        }

        #[cfg(feature = "std")]
        std::println!(
            "Scanner::new called with bandwidth: {}, display_width: {}, depth: {}",
            N,
            W,
            config.waterfall_depth
        );

        Ok(Self {
            config,
            driver: SweepDriver::new(&config),
            // Weakest possible reading until the first sweep lands.
            levels: [u8::MAX; N],
            tracker: SignalTracker::new(&config),
            waterfall: Waterfall::from_config(&config),
            consecutive_faults: 0,
            last_fault: None,
            frames: 0,
        })
    }

    /// Puts the radio into the idle state expected by [`Scanner::step`].
    pub fn init_radio<R: Radio>(&self, radio: &mut R) -> Result<(), SweepFault> {
        self.driver.init_radio(radio)
    }

    /// Leaves the radio disabled for power-down.
    pub fn shutdown_radio<R: Radio>(&self, radio: &mut R) -> Result<(), SweepFault> {
        self.driver.shutdown_radio(radio)
    }

    /// Sweeps the band and, if the sweep was clean, feeds it to the tracker
    /// and the waterfall.
    pub fn step<R: Radio, C: HfClock>(&mut self, radio: &mut R, clock: &mut C) -> ScanStatus {
        self.frames = self.frames.wrapping_add(1);

        match self.driver.sweep(radio, clock, &mut self.levels) {
            Ok(()) => {
                if self.consecutive_faults >= self.config.max_consecutive_faults {
                    #[cfg(feature = "logging")]
                    info!("scanner: sweep recovered after {} faults", self.consecutive_faults);
                }
                self.consecutive_faults = 0;
                self.last_fault = None;
                self.tracker.update(&self.levels);
                self.waterfall.update(&self.levels);
                ScanStatus::Fresh
            }
            Err(fault) => {
                self.consecutive_faults = self.consecutive_faults.saturating_add(1);
                self.last_fault = Some(fault);

                #[cfg(feature = "std")]
                std::println!("Scanner: sweep fault #{}: {}", self.consecutive_faults, fault);

                if self.consecutive_faults >= self.config.max_consecutive_faults {
                    #[cfg(feature = "logging")]
                    error!("scanner: fault state after {} sweeps: {}", self.consecutive_faults, fault);
                    ScanStatus::Faulted(fault)
                } else {
                    #[cfg(feature = "logging")]
                    warn!("scanner: skipping faulted sweep: {}", fault);
                    ScanStatus::Skipped(fault)
                }
            }
        }
    }

    /// True after `max_consecutive_faults` failed sweeps in a row, until a sweep succeeds.
    pub fn is_faulted(&self) -> bool {
        self.consecutive_faults >= self.config.max_consecutive_faults
    }

    /// Fault of the most recent sweep, `None` if it succeeded.
    pub fn last_fault(&self) -> Option<SweepFault> {
        self.last_fault
    }

    /// Raw RSSI magnitudes of the latest sweep, one per channel.
    pub fn levels(&self) -> &[u8; N] {
        &self.levels
    }

    /// Peak and floating heights as of the last good sweep.
    pub fn tracker(&self) -> &SignalTracker<N> {
        &self.tracker
    }

    /// Per-column history as of the last good sweep.
    pub fn waterfall(&self) -> &Waterfall<W> {
        &self.waterfall
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Frames stepped since start, faulted ones included.
    pub fn frames(&self) -> u32 {
        self.frames
    }
}
