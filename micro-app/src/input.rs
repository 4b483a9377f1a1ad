use embedded_hal::{delay::DelayNs, digital::InputPin};

pub const DEBOUNCE_MS: u32 = 10;
pub const REPEAT_MS: u32 = 333;

/// One active-low push button with leading-edge detection.
///
/// A change of level is only accepted if it is still there after
/// [`DEBOUNCE_MS`]. With a repeat period set, holding the button also
/// reports a press every period.
pub struct Button<P> {
    pin: P,
    pressed: bool,
    repeat_ms: Option<u32>,
    last_press_ms: u32,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            pressed: false,
            repeat_ms: None,
            last_press_ms: 0,
        }
    }

    pub fn with_repeat(pin: P, period_ms: u32) -> Self {
        Self {
            repeat_ms: Some(period_ms),
            ..Self::new(pin)
        }
    }

    /// Current level, bypassing debounce. Also resyncs the edge detector so
    /// a button held through this call is not reported as a new press.
    pub fn raw(&mut self) -> Result<bool, P::Error> {
        self.pressed = self.pin.is_low()?;
        Ok(self.pressed)
    }

    /// `true` on a debounced press or an auto-repeat tick.
    pub fn poll<D: DelayNs>(&mut self, delay: &mut D, now_ms: u32) -> Result<bool, P::Error> {
        let level = self.pin.is_low()?;

        if level != self.pressed {
            delay.delay_ms(DEBOUNCE_MS);
            let level = self.pin.is_low()?;
            if level != self.pressed {
                self.pressed = level;
                if level {
                    self.last_press_ms = now_ms;
                    return Ok(true);
                }
            }
        } else if level {
            if let Some(period) = self.repeat_ms {
                if now_ms.wrapping_sub(self.last_press_ms) >= period {
                    self.last_press_ms = now_ms;
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// Presses seen in one poll of the three buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct ButtonEvents {
    pub left: bool,
    pub mid: bool,
    pub right: bool,
}

impl ButtonEvents {
    pub fn any(&self) -> bool {
        self.left || self.mid || self.right
    }
}

/// Left and right repeat while held, mid does not.
pub struct Buttons<P> {
    pub left: Button<P>,
    pub mid: Button<P>,
    pub right: Button<P>,
}

impl<P: InputPin> Buttons<P> {
    /// Reads all three pins once so keys held at power-on are not presses.
    pub fn new(left: P, mid: P, right: P) -> Result<Self, P::Error> {
        let mut buttons = Self {
            left: Button::with_repeat(left, REPEAT_MS),
            mid: Button::new(mid),
            right: Button::with_repeat(right, REPEAT_MS),
        };
        buttons.sync()?;
        Ok(buttons)
    }

    pub fn sync(&mut self) -> Result<(), P::Error> {
        self.left.raw()?;
        self.mid.raw()?;
        self.right.raw()?;
        Ok(())
    }

    pub fn poll<D: DelayNs>(&mut self, delay: &mut D, now_ms: u32) -> Result<ButtonEvents, P::Error> {
        Ok(ButtonEvents {
            mid: self.mid.poll(delay, now_ms)?,
            left: self.left.poll(delay, now_ms)?,
            right: self.right.poll(delay, now_ms)?,
        })
    }
}
