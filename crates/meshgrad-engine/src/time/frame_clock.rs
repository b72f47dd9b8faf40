use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    pub now: Instant,
    pub frame_index: u64,
    /// Exponentially smoothed frames per second.
    pub fps: f32,
}

/// Produces `FrameTime` snapshots.
///
/// Delta time is clamped so a stall (debugger, minimized window) does not
/// produce a huge step, and a tight loop never reports zero.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
    smoothed_dt: Option<f32>,
}

/// Weight of the newest sample in the fps average.
const SMOOTHING: f32 = 0.1;

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
            smoothed_dt: None,
        }
    }

    /// Resets the baseline, e.g. after the window was hidden.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.smoothed_dt = None;
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max)
            .as_secs_f32();
        self.last = now;

        let smoothed = match self.smoothed_dt {
            None => dt,
            Some(prev) => prev + (dt - prev) * SMOOTHING,
        };
        self.smoothed_dt = Some(smoothed);

        let ft = FrameTime { dt, now, frame_index: self.frame_index, fps: 1.0 / smoothed };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
