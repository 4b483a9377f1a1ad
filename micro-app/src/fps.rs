pub const FPS_WINDOW_MS: u32 = 1000;
/// Scanner frames between two battery readings.
pub const BATTERY_REFRESH_FRAMES: u32 = 62;

/// Frames counted over a fixed wall-clock window.
pub struct FpsCounter {
    frames: u32,
    fps: u32,
    window_start_ms: u32,
}

impl FpsCounter {
    pub fn new(now_ms: u32) -> Self {
        Self {
            frames: 0,
            fps: 0,
            window_start_ms: now_ms,
        }
    }

    /// Counts one frame and returns the rate of the last complete window.
    pub fn tick(&mut self, now_ms: u32) -> u32 {
        self.frames += 1;
        if now_ms.wrapping_sub(self.window_start_ms) >= FPS_WINDOW_MS {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start_ms = now_ms;
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Fires on every `period`-th call.
pub struct Cadence {
    period: u32,
    count: u32,
}

impl Cadence {
    pub const fn new(period: u32) -> Self {
        Self { period, count: 0 }
    }

    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.period {
            self.count = 0;
            true
        } else {
            false
        }
    }
}
