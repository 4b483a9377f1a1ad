use crate::config::ScanConfig;

/// Maps a display column onto the channel it shows.
///
/// Plain integer floor division, no rounding or interpolation, so adjacent
/// columns repeat a channel whenever the panel is wider than the band.
pub fn column_to_channel(x: usize, channels: usize, width: usize) -> usize {
    ((x * channels) / width).min(channels.saturating_sub(1))
}

fn depth_mask(depth: u32) -> u32 {
    if depth >= u32::BITS {
        u32::MAX
    } else {
        (1u32 << depth) - 1
    }
}

/// Scrolling per-column history of thresholded channel activity.
///
/// Bit 0 of each column is the newest scan. Every update shifts the column up
/// by one and anything beyond `depth` bits falls off.
pub struct Waterfall<const W: usize> {
    columns: [u32; W],
    floor: u8,
    mask: u32,
}

impl<const W: usize> Waterfall<W> {
    /// `depth` is clamped to `1..=32`.
    pub fn new(floor: u8, depth: u32) -> Self {
        let depth = depth.clamp(1, u32::BITS);
        Self {
            columns: [0; W],
            floor,
            mask: depth_mask(depth),
        }
    }

    /// Waterfall with the floor and depth from `config`.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.waterfall_floor, config.waterfall_depth)
    }

    /// True when the sample is strong enough to light a pixel.
    pub fn is_present(&self, level: u8) -> bool {
        level < self.floor
    }

    /// Appends one scan to every column.
    pub fn update(&mut self, levels: &[u8]) {
        if levels.is_empty() {
            return;
        }
        for x in 0..W {
            let level = levels[column_to_channel(x, levels.len(), W)];
            let bit = self.is_present(level) as u32;
            self.columns[x] = ((self.columns[x] << 1) | bit) & self.mask;
        }
    }

    /// History of column `x`, newest scan in bit 0.
    pub fn column(&self, x: usize) -> u32 {
        self.columns[x]
    }

    pub fn columns(&self) -> &[u32; W] {
        &self.columns
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_endpoints_for_the_band() {
        assert_eq!(column_to_channel(0, 88, 128), 0);
        assert_eq!(column_to_channel(1, 88, 128), 0);
        assert_eq!(column_to_channel(2, 88, 128), 1);
        assert_eq!(column_to_channel(127, 88, 128), 87);
    }

    #[test]
    fn mapping_is_monotonic() {
        let mut previous = 0;
        for x in 0..128 {
            let channel = column_to_channel(x, 88, 128);
            assert!(channel >= previous);
            assert!(channel < 88);
            previous = channel;
        }
    }

    #[test]
    fn depth_four_sequence() {
        let mut wf = Waterfall::<1>::new(88, 4);
        for sample in [90, 80, 70, 95] {
            wf.update(&[sample]);
        }
        // Oldest to newest: 0, 1, 1, 0.
        assert_eq!(wf.column(0), 0b0110);
    }

    #[test]
    fn oldest_bit_ages_out() {
        let mut wf = Waterfall::<1>::new(88, 4);
        wf.update(&[10]);
        assert_eq!(wf.column(0), 0b0001);
        for _ in 0..3 {
            wf.update(&[100]);
        }
        assert_eq!(wf.column(0), 0b1000);
        wf.update(&[100]);
        assert_eq!(wf.column(0), 0);
    }

    #[test]
    fn floor_is_exclusive() {
        let mut wf = Waterfall::<1>::new(88, 32);
        wf.update(&[88]);
        assert_eq!(wf.column(0), 0);
        wf.update(&[87]);
        assert_eq!(wf.column(0), 1);
    }

    #[test]
    fn full_depth_keeps_thirty_two_scans() {
        let mut wf = Waterfall::<1>::new(88, 32);
        wf.update(&[0]);
        for _ in 0..31 {
            wf.update(&[255]);
        }
        assert_eq!(wf.column(0), 1 << 31);
        wf.update(&[255]);
        assert_eq!(wf.column(0), 0);
    }

    #[test]
    fn columns_share_aliased_channels() {
        let mut levels = [255u8; 88];
        levels[0] = 40;
        let mut wf = Waterfall::<128>::new(88, 32);
        wf.update(&levels);
        let lit: usize = wf.columns().iter().filter(|&&c| c == 1).count();
        // Columns 0 and 1 both floor onto channel 0.
        assert_eq!(lit, 2);
        assert_eq!(wf.column(0), 1);
        assert_eq!(wf.column(1), 1);
        assert_eq!(wf.column(2), 0);
    }
}
