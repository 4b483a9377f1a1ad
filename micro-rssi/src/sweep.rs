#[cfg(feature = "logging")]
use defmt::{trace, warn};

use crate::config::{ScanConfig, DATA_WHITENING_IV};
use crate::fault::{RadioStage, SweepFault};
use crate::radio::{HfClock, Radio};

/// Busy-polls `done` up to `budget` times. Returns false when the budget ran out.
fn wait_until(budget: u32, mut done: impl FnMut() -> bool) -> bool {
    for _ in 0..budget {
        if done() {
            return true;
        }
        core::hint::spin_loop();
    }
    false
}

/// Tunes the radio across the band and records one RSSI sample per channel.
pub struct SweepDriver {
    start_channel: u8,
    whitening_iv: u8,
    wait_budget: u32,
}

impl SweepDriver {
    /// Creates a driver for the band described by `config`.
    ///
    /// # Arguments
    /// * `config`: Supplies the first channel and the poll budget of every wait.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            start_channel: config.start_channel,
            whitening_iv: DATA_WHITENING_IV,
            wait_budget: config.wait_budget,
        }
    }

    /// Brings the radio into the disabled, powered, BLE 1 Mbit state a sweep expects.
    pub fn init_radio<R: Radio>(&self, radio: &mut R) -> Result<(), SweepFault> {
        radio.disable();
        if !wait_until(self.wait_budget, || radio.is_disabled()) {
            return Err(SweepFault::RadioInit);
        }
        radio.power_up();
        Ok(())
    }

    /// Disables the radio ahead of System OFF. The wait is bounded like every
    /// other radio wait, so a dead radio cannot hold the device awake.
    pub fn shutdown_radio<R: Radio>(&self, radio: &mut R) -> Result<(), SweepFault> {
        radio.disable();
        if wait_until(self.wait_budget, || radio.is_disabled()) {
            Ok(())
        } else {
            Err(SweepFault::RadioShutdown)
        }
    }

    /// Starts the crystal oscillator unless it is already the running source.
    pub fn ensure_clock<C: HfClock>(&self, clock: &mut C) -> Result<(), SweepFault> {
        if clock.is_running() {
            return Ok(());
        }
        clock.request_start();
        if wait_until(self.wait_budget, || clock.is_running()) {
            Ok(())
        } else {
            Err(SweepFault::Clock)
        }
    }

    /// Runs one full sweep, writing `levels[i]` for channel `start + i`.
    ///
    /// Channels are measured strictly in order, one sample each. On a fault the
    /// radio is asked to disable (without waiting) and the levels written so far
    /// are left in place.
    pub fn sweep<R: Radio, C: HfClock>(
        &self,
        radio: &mut R,
        clock: &mut C,
        levels: &mut [u8],
    ) -> Result<(), SweepFault> {
        self.ensure_clock(clock)?;

        for (i, level) in levels.iter_mut().enumerate() {
            let channel = self.start_channel.wrapping_add(i as u8);
            match self.sample_channel(radio, channel) {
                Ok(sample) => *level = sample,
                Err(stage) => {
                    #[cfg(feature = "logging")]
                    warn!("sweep: channel {} stuck waiting for {}", channel, stage);
                    radio.disable();
                    return Err(SweepFault::Radio { stage, channel });
                }
            }
        }

        #[cfg(feature = "logging")]
        trace!("sweep: {} channels sampled", levels.len());
        Ok(())
    }

    fn sample_channel<R: Radio>(&self, radio: &mut R, channel: u8) -> Result<u8, RadioStage> {
        radio.set_frequency(channel);
        radio.set_whitening_iv(self.whitening_iv);

        radio.start_receive();
        if !wait_until(self.wait_budget, || radio.is_ready()) {
            return Err(RadioStage::Ready);
        }

        radio.start_rssi();
        if !wait_until(self.wait_budget, || radio.is_rssi_done()) {
            return Err(RadioStage::RssiEnd);
        }
        let sample = radio.rssi_sample();

        radio.disable();
        if !wait_until(self.wait_budget, || radio.is_disabled()) {
            return Err(RadioStage::Disabled);
        }
        Ok(sample)
    }
}
