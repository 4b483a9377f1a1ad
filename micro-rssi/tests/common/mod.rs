#![allow(dead_code)]

use micro_rssi::{HfClock, Radio, RadioStage};
use std::collections::VecDeque;

/// Radio stand-in that replays canned samples and records what it was told.
pub struct FakeRadio {
    samples: VecDeque<u8>,
    /// Sample returned once the queue runs dry.
    pub idle_sample: u8,
    pub frequencies: Vec<u8>,
    pub whitening: Vec<u8>,
    pub powered: bool,
    /// Stage that never completes, if any.
    pub stuck: Option<RadioStage>,
    /// Channel on which `stuck` applies; `None` means every channel.
    pub stuck_channel: Option<u8>,
    current: u8,
    ready: bool,
    rssi_done: bool,
    disabled: bool,
    pub disable_requests: u32,
}

impl FakeRadio {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::new(),
            idle_sample: 95,
            frequencies: Vec::new(),
            whitening: Vec::new(),
            powered: false,
            stuck: None,
            stuck_channel: None,
            current: 0,
            ready: false,
            rssi_done: false,
            disabled: true,
            disable_requests: 0,
        }
    }

    pub fn push_sweep(&mut self, sweep: &[u8]) {
        self.samples.extend(sweep.iter().copied());
    }

    pub fn push_uniform(&mut self, level: u8, channels: usize) {
        self.samples.extend(std::iter::repeat(level).take(channels));
    }

    fn blocks(&self, stage: RadioStage) -> bool {
        self.stuck == Some(stage) && self.stuck_channel.map_or(true, |c| c == self.current)
    }
}

impl Radio for FakeRadio {
    fn power_up(&mut self) {
        self.powered = true;
    }

    fn set_frequency(&mut self, frequency: u8) {
        self.current = frequency;
        self.frequencies.push(frequency);
    }

    fn set_whitening_iv(&mut self, iv: u8) {
        self.whitening.push(iv);
    }

    fn start_receive(&mut self) {
        self.disabled = false;
        self.ready = !self.blocks(RadioStage::Ready);
    }

    fn is_ready(&mut self) -> bool {
        self.ready
    }

    fn start_rssi(&mut self) {
        self.rssi_done = !self.blocks(RadioStage::RssiEnd);
    }

    fn is_rssi_done(&mut self) -> bool {
        self.rssi_done
    }

    fn rssi_sample(&mut self) -> u8 {
        self.samples.pop_front().unwrap_or(self.idle_sample)
    }

    fn disable(&mut self) {
        self.disable_requests += 1;
        self.ready = false;
        self.disabled = !self.blocks(RadioStage::Disabled);
    }

    fn is_disabled(&mut self) -> bool {
        self.disabled
    }
}

pub struct FakeClock {
    pub running: bool,
    pub starts: u32,
    pub broken: bool,
}

impl FakeClock {
    pub fn running() -> Self {
        Self { running: true, starts: 0, broken: false }
    }

    pub fn stopped() -> Self {
        Self { running: false, starts: 0, broken: false }
    }
}

impl HfClock for FakeClock {
    fn is_running(&mut self) -> bool {
        self.running
    }

    fn request_start(&mut self) {
        self.starts += 1;
        if !self.broken {
            self.running = true;
        }
    }
}
