use alloc::collections::VecDeque;

/// Only samples this recent contribute to the release velocity.
pub const DEFAULT_WINDOW_MS: u64 = 100;

/// Upper bound on a measured fling (px/s).
pub const MAX_FLING_VELOCITY: f64 = 8_000.0;

const MAX_SAMPLES: usize = 32;

/// Estimates pointer velocity from timestamped positions.
///
/// The adapter records the accumulated pointer travel on every move; the velocity is the slope
/// between the oldest and newest samples inside the window. A pointer that rested longer than
/// the window before release reports zero.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: VecDeque<(u64, f64)>,
    window_ms: u64,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MS)
    }
}

impl VelocityTracker {
    pub fn new(window_ms: u64) -> Self {
        Self {
            samples: VecDeque::with_capacity(MAX_SAMPLES),
            window_ms: window_ms.max(1),
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn record(&mut self, now_ms: u64, position: f64) {
        if !position.is_finite() {
            return;
        }
        if self.samples.len() == MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back((now_ms, position));
    }

    /// Velocity in px/s as of `now_ms`, clamped to `±MAX_FLING_VELOCITY`.
    pub fn velocity(&self, now_ms: u64) -> f64 {
        let horizon = now_ms.saturating_sub(self.window_ms);
        let mut recent = self.samples.iter().filter(|(t, _)| *t >= horizon);
        let Some(&(first_ms, first_pos)) = recent.next() else {
            return 0.0;
        };
        let Some(&(last_ms, last_pos)) = recent.last() else {
            return 0.0;
        };
        let dt = last_ms.saturating_sub(first_ms);
        if dt == 0 {
            return 0.0;
        }
        let v = (last_pos - first_pos) / (dt as f64 / 1000.0);
        v.clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY)
    }
}
