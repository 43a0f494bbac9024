use carousel::{SettleConfig, SnapTarget, SpringConfig};

/// Maximum integration step (4ms). Longer frames are subdivided.
const MAX_STEP_SECS: f64 = 0.004;

/// Frames longer than this (e.g. a backgrounded tab) are treated as this long.
const MAX_FRAME_SECS: f64 = 0.1;

/// A damped spring driving the track toward a snap target, for adapter-driven settling.
///
/// Semi-implicit Euler on `a = -k (x - target) - c v` with unit mass. The spring comes to rest
/// (and lands exactly on `target`) once it is within `rest_delta` px and slower than
/// `rest_speed` px/s.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spring {
    pub position: f64,
    /// px/s, same sign convention as drag velocity.
    pub velocity: f64,
    pub target: f64,
    pub config: SpringConfig,
    pub rest_delta: f64,
    pub rest_speed: f64,
    last_ms: u64,
    at_rest: bool,
}

impl Spring {
    pub fn new(from: f64, to: f64, velocity: f64, config: SpringConfig, start_ms: u64) -> Self {
        let mut spring = Self {
            position: from,
            velocity: if velocity.is_finite() { velocity } else { 0.0 },
            target: to,
            config,
            rest_delta: 0.5,
            rest_speed: 2.0,
            last_ms: start_ms,
            at_rest: false,
        };
        spring.check_rest();
        spring
    }

    /// A spring toward `target`, tuned for the input that produced it.
    pub fn for_target(
        from: f64,
        target: &SnapTarget,
        velocity: f64,
        settle: &SettleConfig,
        start_ms: u64,
    ) -> Self {
        Self::new(
            from,
            target.position,
            velocity,
            settle.spring_for(target.input),
            start_ms,
        )
        .with_rest_thresholds(settle.rest_delta, settle.rest_speed)
    }

    pub fn with_rest_thresholds(mut self, rest_delta: f64, rest_speed: f64) -> Self {
        self.rest_delta = rest_delta.abs();
        self.rest_speed = rest_speed.abs();
        self.at_rest = false;
        self.check_rest();
        self
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Moves the target, keeping position and velocity. Wakes the spring.
    pub fn retarget(&mut self, target: f64) {
        self.target = target;
        self.at_rest = false;
        self.check_rest();
    }

    /// Rewrites the current position (e.g. after a resize changed the geometry).
    pub fn reset_position(&mut self, position: f64) {
        self.position = position;
        self.at_rest = false;
        self.check_rest();
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration =
            -self.config.stiffness * displacement - self.config.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    fn check_rest(&mut self) {
        if (self.position - self.target).abs() < self.rest_delta
            && self.velocity.abs() < self.rest_speed
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }

    /// Advances the spring by `dt` seconds, subdividing for stability.
    pub fn advance(&mut self, dt: f64) {
        if self.at_rest || dt.is_nan() || dt <= 0.0 {
            return;
        }
        let mut remaining = dt.min(MAX_FRAME_SECS);
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            self.step(step);
            remaining -= step;
        }
        self.check_rest();
    }

    /// Advances to `now_ms` and returns the new position.
    pub fn sample(&mut self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.last_ms);
        self.last_ms = self.last_ms.max(now_ms);
        self.advance(elapsed as f64 / 1000.0);
        self.position
    }
}
