use crate::config::ScanConfig;

/// Converts a raw RSSI magnitude into a bar height in pixels.
///
/// Smaller samples are stronger signals, so the height grows as the sample
/// drops below `basis` and is clamped to `[0, max_height]`.
pub fn bar_height(level: u8, basis: u8, max_height: u8) -> u8 {
    basis.saturating_sub(level).min(max_height)
}

/// Per-channel fast-rise, slow-fall trackers.
///
/// Two independent representations are kept on purpose: an integer peak that
/// falls one pixel per frame and drives the bars, and a real-valued floating
/// level that falls by a fractional step and drives the marker dot.
pub struct SignalTracker<const N: usize> {
    /// Peak-hold height per channel, always within `[0, spectrum_height]`.
    peak: [u8; N],
    /// Floating height per channel, always within `[0, spectrum_height]`.
    floating: [f32; N],
    spectrum_height: u8,
    height_basis: u8,
    decay_step: f32,
}

impl<const N: usize> SignalTracker<N> {
    /// Creates a tracker with every height at zero.
    ///
    /// # Arguments
    /// * `config`: Supplies the height basis, the spectrum height both trackers are
    ///   clamped to, and the floating decay step.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            peak: [0; N],
            floating: [0.0; N],
            spectrum_height: config.spectrum_height,
            height_basis: config.height_basis,
            decay_step: config.floating_decay_step,
        }
    }

    /// Folds one sweep into both trackers. Call exactly once per good sweep.
    pub fn update(&mut self, levels: &[u8; N]) {
        for (i, &level) in levels.iter().enumerate() {
            let height = bar_height(level, self.height_basis, self.spectrum_height);

            let peak = &mut self.peak[i];
            if height >= *peak {
                *peak = height;
            } else if *peak > 0 {
                *peak -= 1;
            }

            let floating = &mut self.floating[i];
            let fh = height as f32;
            if fh >= *floating {
                *floating = fh;
            } else {
                *floating = (*floating - self.decay_step).max(0.0);
            }
        }
    }

    /// Integer peak-hold heights in pixels.
    pub fn peak(&self) -> &[u8; N] {
        &self.peak
    }

    /// Real-valued floating heights in pixels.
    pub fn floating(&self) -> &[f32; N] {
        &self.floating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tracker<const N: usize>() -> SignalTracker<N> {
        SignalTracker::new(&ScanConfig::default())
    }

    #[test]
    fn bar_height_clamps_both_ends() {
        assert_eq!(bar_height(95, 95, 32), 0);
        assert_eq!(bar_height(120, 95, 32), 0);
        assert_eq!(bar_height(80, 95, 32), 15);
        assert_eq!(bar_height(63, 95, 32), 32);
        assert_eq!(bar_height(0, 95, 32), 32);
    }

    #[test]
    fn rises_instantly_to_new_maximum() {
        let mut t = tracker::<2>();
        t.update(&[85, 95]);
        assert_eq!(t.peak(), &[10, 0]);
        assert_relative_eq!(t.floating()[0], 10.0);

        t.update(&[70, 95]);
        assert_eq!(t.peak()[0], 25);
        assert_relative_eq!(t.floating()[0], 25.0);
    }

    #[test]
    fn equal_height_holds_without_decay() {
        let mut t = tracker::<1>();
        t.update(&[85]);
        t.update(&[85]);
        assert_eq!(t.peak()[0], 10);
        assert_relative_eq!(t.floating()[0], 10.0);
    }

    #[test]
    fn peak_falls_one_per_frame_floating_half() {
        let mut t = tracker::<1>();
        t.update(&[85]);
        t.update(&[95]);
        assert_eq!(t.peak()[0], 9);
        assert_relative_eq!(t.floating()[0], 9.5);
        t.update(&[95]);
        assert_eq!(t.peak()[0], 8);
        assert_relative_eq!(t.floating()[0], 9.0);
    }

    #[test]
    fn rise_from_between_decay_steps() {
        let mut t = tracker::<1>();
        t.update(&[85]);
        t.update(&[95]); // peak 9, floating 9.5
        t.update(&[86]); // height 9
        assert_eq!(t.peak()[0], 9);
        assert_relative_eq!(t.floating()[0], 9.0);
    }

    #[test]
    fn floors_stay_at_zero() {
        let mut t = tracker::<1>();
        t.update(&[94]);
        for _ in 0..10 {
            t.update(&[200]);
        }
        assert_eq!(t.peak()[0], 0);
        assert_relative_eq!(t.floating()[0], 0.0);
    }
}
