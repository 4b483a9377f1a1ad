/// Register-level access to the 2.4 GHz radio.
///
/// Every operation that the hardware completes asynchronously is split into a
/// trigger and a status poll so that [`crate::SweepDriver`] owns the waiting and
/// can bound it. Triggers clear their matching event before firing, so a status
/// poll only ever sees the completion of the most recent trigger.
pub trait Radio {
    /// Power the radio up and select the 1 Mbit BLE mode used for RSSI sampling.
    fn power_up(&mut self);

    /// Program the FREQUENCY register (MHz above 2400).
    fn set_frequency(&mut self, frequency: u8);

    /// Program the data whitening initial value required by the BLE demodulator.
    fn set_whitening_iv(&mut self, iv: u8);

    /// Clear READY and trigger RXEN.
    fn start_receive(&mut self);

    /// True once READY fired after the last [`Radio::start_receive`].
    fn is_ready(&mut self) -> bool;

    /// Clear RSSIEND and trigger RSSISTART.
    fn start_rssi(&mut self);

    /// True once RSSIEND fired after the last [`Radio::start_rssi`].
    fn is_rssi_done(&mut self) -> bool;

    /// Latest RSSI sample, the magnitude of the received power in -dBm.
    fn rssi_sample(&mut self) -> u8;

    /// Clear DISABLED and trigger DISABLE.
    fn disable(&mut self);

    /// True once DISABLED fired after the last [`Radio::disable`].
    fn is_disabled(&mut self) -> bool;
}

/// High frequency clock source feeding the radio.
pub trait HfClock {
    /// True when the crystal oscillator is both selected and running.
    fn is_running(&mut self) -> bool;

    /// Trigger HFCLKSTART. Completion is observed through [`HfClock::is_running`].
    fn request_start(&mut self);
}
