use embedded_hal::digital::InputPin;
use micro_app::BatterySensor;
use nrf52832_hal::{
    gpio::{p0::P0_02, Floating, Input, Pin, PullUp},
    pac::SAADC,
    saadc::{Gain, Oversample, Reference, Resistor, Resolution, Saadc, SaadcConfig, Time},
};

/// Cell voltage through the divider on AIN0, charger status on an active-low line.
pub struct SaadcBattery {
    saadc: Saadc,
    sense: P0_02<Input<Floating>>,
    charge_status: Pin<Input<PullUp>>,
}

impl SaadcBattery {
    /// Creating the converter also runs its offset calibration.
    pub fn new(saadc: SAADC, sense: P0_02<Input<Floating>>, charge_status: Pin<Input<PullUp>>) -> Self {
        let config = SaadcConfig {
            resolution: Resolution::_10BIT,
            oversample: Oversample::BYPASS,
            reference: Reference::INTERNAL,
            gain: Gain::GAIN1_6,
            resistor: Resistor::BYPASS,
            time: Time::_40US,
        };
        Self {
            saadc: Saadc::new(saadc, config),
            sense,
            charge_status,
        }
    }
}

impl BatterySensor for SaadcBattery {
    type Error = ();

    fn sample(&mut self) -> Result<i16, ()> {
        self.saadc.read_channel(&mut self.sense)
    }

    fn is_charging(&mut self) -> Result<bool, ()> {
        self.charge_status.is_low().map_err(|_| ())
    }
}
