/// Frame clock driven by an external, monotonically increasing timestamp
/// (e.g. the `requestAnimationFrame` callback argument, in milliseconds).
///
/// The first tick has no predecessor, so its delta is undefined.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp in milliseconds.
    /// Returns seconds elapsed since the previous tick, or `None` on the first tick.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<f32> {
        let delta = self
            .last_timestamp
            .map(|last| ((timestamp_ms - last) / 1000.0) as f32);
        self.last_timestamp = Some(timestamp_ms);
        delta
    }

    /// Timestamp of the most recent tick.
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    /// Forget the previous timestamp; the next tick behaves like the first.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}
