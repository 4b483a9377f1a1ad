#[cfg(feature = "logging")]
use defmt::{info, warn};

use core::fmt;

/// Value of a word that has never been programmed.
pub const ERASED: u32 = 0xFFFF_FFFF;
pub const DEFAULT_CONTRAST: u8 = 32;
pub const MAX_CONTRAST: u8 = 63;

const CONTRAST_BITS: u32 = 0x7F;

/// User preferences that survive power-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct Settings {
    pub lcd_contrast: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self { lcd_contrast: DEFAULT_CONTRAST }
    }
}

impl Settings {
    /// An erased word yields the defaults; an out-of-range contrast is clamped.
    pub fn decode(word: u32) -> Self {
        if word == ERASED {
            return Self::default();
        }
        Self {
            lcd_contrast: ((word & CONTRAST_BITS) as u8).min(MAX_CONTRAST),
        }
    }

    /// Bits outside the contrast field stay erased.
    pub fn encode(&self) -> u32 {
        !CONTRAST_BITS | (self.lcd_contrast.min(MAX_CONTRAST) as u32 & CONTRAST_BITS)
    }
}

/// A row of one-time-programmable words. Programming can only clear bits,
/// so every save goes to a fresh slot.
pub trait SettingsStore {
    type Error;

    fn slots(&self) -> usize;

    fn read(&mut self, slot: usize) -> u32;

    fn program(&mut self, slot: usize, word: u32) -> Result<(), Self::Error>;
}

#[derive(Debug, PartialEq, Eq)]
pub enum SettingsError<E> {
    /// Every slot has been programmed; the store needs an erase.
    Full,
    Store(E),
}

impl<E: fmt::Debug> fmt::Display for SettingsError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Full => write!(f, "no erased settings slot left"),
            SettingsError::Store(e) => write!(f, "settings write failed: {:?}", e),
        }
    }
}

/// Programmed slots are contiguous from slot 0; the last one is current.
fn used_slots<S: SettingsStore>(store: &mut S) -> usize {
    (0..store.slots())
        .find(|&slot| store.read(slot) == ERASED)
        .unwrap_or(store.slots())
}

pub fn load<S: SettingsStore>(store: &mut S) -> Settings {
    let settings = match used_slots(store) {
        0 => Settings::default(),
        used => Settings::decode(store.read(used - 1)),
    };

    #[cfg(feature = "logging")]
    info!("settings loaded: {}", settings);
    settings
}

pub fn save<S: SettingsStore>(store: &mut S, settings: &Settings) -> Result<(), SettingsError<S::Error>> {
    let slot = used_slots(store);
    if slot >= store.slots() {
        #[cfg(feature = "logging")]
        warn!("settings store full, {} not saved", settings);
        return Err(SettingsError::Full);
    }
    store.program(slot, settings.encode()).map_err(SettingsError::Store)?;

    #[cfg(feature = "logging")]
    info!("settings saved to slot {}", slot);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct Words<const N: usize>([u32; N]);

    impl<const N: usize> SettingsStore for Words<N> {
        type Error = Infallible;

        fn slots(&self) -> usize {
            N
        }

        fn read(&mut self, slot: usize) -> u32 {
            self.0[slot]
        }

        fn program(&mut self, slot: usize, word: u32) -> Result<(), Infallible> {
            // Only 1 -> 0 transitions stick, as on the real part.
            self.0[slot] &= word;
            Ok(())
        }
    }

    #[test]
    fn erased_word_gives_defaults() {
        assert_eq!(Settings::decode(ERASED), Settings { lcd_contrast: 32 });
        assert_eq!(load(&mut Words([ERASED; 4])), Settings::default());
    }

    #[test]
    fn decode_clamps_contrast() {
        assert_eq!(Settings::decode(0x0000_007F).lcd_contrast, 63);
        assert_eq!(Settings::decode(0xFFFF_FF85).lcd_contrast, 5);
    }

    #[test]
    fn encode_keeps_upper_bits_erased() {
        assert_eq!(Settings { lcd_contrast: 40 }.encode(), 0xFFFF_FF80 | 40);
        assert_eq!(Settings::decode(Settings { lcd_contrast: 17 }.encode()).lcd_contrast, 17);
    }

    #[test]
    fn raising_contrast_survives_one_time_programming() {
        let mut store = Words([ERASED; 4]);
        save(&mut store, &Settings { lcd_contrast: 20 }).unwrap();
        save(&mut store, &Settings { lcd_contrast: 45 }).unwrap();
        assert_eq!(load(&mut store).lcd_contrast, 45);
    }

    #[test]
    fn single_word_image_still_loads() {
        let mut store = Words([0xFFFF_FF80 | 12, ERASED, ERASED]);
        assert_eq!(load(&mut store).lcd_contrast, 12);
    }

    #[test]
    fn full_store_rejects_save() {
        let mut store = Words([0xFFFF_FF80 | 1, 0xFFFF_FF80 | 2]);
        assert_eq!(save(&mut store, &Settings { lcd_contrast: 9 }), Err(SettingsError::Full));
        assert_eq!(load(&mut store).lcd_contrast, 2);
    }
}
