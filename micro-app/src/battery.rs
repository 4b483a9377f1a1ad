use micro_viz::BatteryIndicator;

/// Volts at which the charge reaches 8, 7, ... 0 bars.
pub const LIPO_VOLTAGE_MAP: [f32; 9] = [4.1, 3.98, 3.92, 3.87, 3.8, 3.7, 3.6, 3.5, 3.4];
pub const LEVELS: u8 = 8;

const ADC_FULL_SCALE_V: f32 = 3.6;
const ADC_STEPS: f32 = 1024.0;
/// Ratio of the cell divider feeding the ADC pin.
const DIVIDER: f32 = 1.451;

/// One battery reading source: a single-ended ADC sample and the charger status line.
pub trait BatterySensor {
    type Error;

    fn sample(&mut self) -> Result<i16, Self::Error>;

    fn is_charging(&mut self) -> Result<bool, Self::Error>;
}

pub fn raw_to_voltage(raw: i16) -> f32 {
    ADC_FULL_SCALE_V / ADC_STEPS * raw.max(0) as f32 * DIVIDER
}

pub fn voltage_to_level(voltage: f32) -> u8 {
    LIPO_VOLTAGE_MAP
        .iter()
        .position(|&v| voltage >= v)
        .map_or(0, |i| LEVELS - i as u8)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BatteryStatus {
    pub raw: i16,
    pub voltage: f32,
    pub level: u8,
    pub charging: bool,
}

impl BatteryStatus {
    pub fn from_raw(raw: i16, charging: bool) -> Self {
        let raw = raw.max(0);
        let voltage = raw_to_voltage(raw);
        Self {
            raw,
            voltage,
            level: voltage_to_level(voltage),
            charging,
        }
    }

    pub fn measure<S: BatterySensor>(sensor: &mut S) -> Result<Self, S::Error> {
        let raw = sensor.sample()?;
        let charging = sensor.is_charging()?;
        Ok(Self::from_raw(raw, charging))
    }

    pub fn percent(&self) -> u8 {
        (self.level as u16 * 100 / LEVELS as u16) as u8
    }

    pub fn indicator(&self) -> BatteryIndicator {
        if self.charging {
            BatteryIndicator::Charging
        } else {
            BatteryIndicator::Percent(self.percent())
        }
    }
}
