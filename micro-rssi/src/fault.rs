use core::fmt;

/// The radio status flag a sweep was waiting on when it ran out of polls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum RadioStage {
    /// RXEN was triggered but READY never asserted.
    Ready,
    /// RSSISTART was triggered but RSSIEND never asserted.
    RssiEnd,
    /// DISABLE was triggered but DISABLED never asserted.
    Disabled,
}

/// Hardware fault detected at the sweep boundary.
///
/// Reported next to the level array, never instead of it: the array keeps
/// whatever the partial sweep managed to write and callers decide whether to
/// ingest it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum SweepFault {
    /// High frequency crystal never reported running.
    Clock,
    /// Radio did not reach the idle state during initialisation.
    RadioInit,
    /// Radio did not confirm DISABLED before power-down.
    RadioShutdown,
    Radio { stage: RadioStage, channel: u8 },
}

impl fmt::Display for RadioStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RadioStage::Ready => "READY",
            RadioStage::RssiEnd => "RSSIEND",
            RadioStage::Disabled => "DISABLED",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SweepFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepFault::Clock => write!(f, "HF clock did not start"),
            SweepFault::RadioInit => write!(f, "radio did not disable during init"),
            SweepFault::RadioShutdown => write!(f, "radio did not disable before power-down"),
            SweepFault::Radio { stage, channel } => {
                write!(f, "radio timed out waiting for {} on channel {}", stage, channel)
            }
        }
    }
}
