use micro_rssi::{HfClock, Radio};
use nrf52832_hal::pac::{CLOCK, RADIO};

/// The on-chip 2.4 GHz transceiver, used only as an RSSI probe.
pub struct NrfRadio {
    radio: RADIO,
}

impl NrfRadio {
    pub fn new(radio: RADIO) -> Self {
        Self { radio }
    }

    /// BLE 1 Mbit framing; the RSSI path needs a mode set but no packet config.
    pub fn set_ble_1mbit(&mut self) {
        self.radio.mode.write(|w| w.mode().ble_1mbit());
    }
}

impl Radio for NrfRadio {
    fn power_up(&mut self) {
        self.radio.power.write(|w| w.power().enabled());
        self.set_ble_1mbit();
    }

    fn set_frequency(&mut self, frequency: u8) {
        self.radio.frequency.write(|w| unsafe { w.frequency().bits(frequency) });
    }

    fn set_whitening_iv(&mut self, iv: u8) {
        self.radio.datawhiteiv.write(|w| unsafe { w.datawhiteiv().bits(iv) });
    }

    fn start_receive(&mut self) {
        self.radio.events_ready.reset();
        self.radio.tasks_rxen.write(|w| unsafe { w.bits(1) });
    }

    fn is_ready(&mut self) -> bool {
        self.radio.events_ready.read().bits() != 0
    }

    fn start_rssi(&mut self) {
        self.radio.events_rssiend.reset();
        self.radio.tasks_rssistart.write(|w| unsafe { w.bits(1) });
    }

    fn is_rssi_done(&mut self) -> bool {
        self.radio.events_rssiend.read().bits() != 0
    }

    fn rssi_sample(&mut self) -> u8 {
        self.radio.rssisample.read().rssisample().bits()
    }

    fn disable(&mut self) {
        self.radio.events_disabled.reset();
        self.radio.tasks_disable.write(|w| unsafe { w.bits(1) });
    }

    fn is_disabled(&mut self) -> bool {
        self.radio.events_disabled.read().bits() != 0
    }
}

/// High-frequency clock; the radio needs the crystal, not the RC oscillator.
pub struct NrfHfClock {
    clock: CLOCK,
}

impl NrfHfClock {
    pub fn new(clock: CLOCK) -> Self {
        Self { clock }
    }
}

impl HfClock for NrfHfClock {
    fn is_running(&mut self) -> bool {
        let stat = self.clock.hfclkstat.read();
        stat.src().is_xtal() && stat.state().is_running()
    }

    fn request_start(&mut self) {
        self.clock.events_hfclkstarted.reset();
        self.clock.tasks_hfclkstart.write(|w| unsafe { w.bits(1) });
    }
}
