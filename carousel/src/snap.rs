use crate::error::ensure_non_negative;
use crate::{ConfigError, FlickRounding, InputKind, Layout, SnapTarget};

/// Fractional indexes this close to an integer are treated as that integer.
const INDEX_EPSILON: f64 = 1e-6;

/// Velocity thresholds and flick rounding for the snap resolver.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapConfig {
    /// Minimum |velocity| (px/s) that biases a pointer release.
    pub pointer_swipe_threshold: f64,
    /// Minimum |velocity| (px/s) that biases a touch release.
    pub touch_swipe_threshold: f64,
    pub flick_rounding: FlickRounding,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            pointer_swipe_threshold: 500.0,
            touch_swipe_threshold: 300.0,
            flick_rounding: FlickRounding::Directional,
        }
    }
}

impl SnapConfig {
    pub fn swipe_threshold(&self, input: InputKind) -> f64 {
        match input {
            InputKind::Pointer => self.pointer_swipe_threshold,
            InputKind::Touch => self.touch_swipe_threshold,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("snap.pointer_swipe_threshold", self.pointer_swipe_threshold)?;
        ensure_non_negative("snap.touch_swipe_threshold", self.touch_swipe_threshold)?;
        Ok(())
    }
}

/// Clamps an index request into `[0, 3N - 1]`.
pub fn clamp_index(layout: &Layout, index: i64) -> usize {
    let max = layout.working_len().saturating_sub(1) as i64;
    index.clamp(0, max.max(0)) as usize
}

fn settle_to_integer(raw: f64) -> f64 {
    let nearest = raw.round();
    if (raw - nearest).abs() < INDEX_EPSILON {
        nearest
    } else {
        raw
    }
}

/// Picks the target index for a release at `position` with `velocity` (px/s).
///
/// Below the swipe threshold the nearest index wins. Above it the target moves one card in the
/// direction of travel; a negative velocity travels toward higher indexes. The comparison is
/// strict, so a velocity exactly at the threshold does not swipe.
pub fn resolve_snap(
    layout: &Layout,
    position: f64,
    velocity: f64,
    input: InputKind,
    config: &SnapConfig,
) -> SnapTarget {
    let raw_index = settle_to_integer(layout.index_at(position));
    let velocity = if velocity.is_finite() { velocity } else { 0.0 };
    let nearest = raw_index.round();

    let swiped = velocity.abs() > config.swipe_threshold(input);
    let target = if !swiped {
        nearest
    } else {
        let toward_higher = velocity < 0.0;
        match (config.flick_rounding, toward_higher) {
            (FlickRounding::Directional, true) => raw_index.floor() + 1.0,
            (FlickRounding::Directional, false) => raw_index.ceil() - 1.0,
            (FlickRounding::Step, true) => nearest + 1.0,
            (FlickRounding::Step, false) => nearest - 1.0,
        }
    };

    let index = clamp_index(layout, target as i64);
    ctrace!(raw_index, velocity, swiped, index, "resolve_snap");
    SnapTarget {
        index,
        position: layout.position_for(index as f64),
        raw_index,
        velocity,
        swiped,
        input,
    }
}

/// Builds a snap target for an explicit index request (tap, keyboard, programmatic).
pub fn snap_target_for_index(
    layout: &Layout,
    position: f64,
    index: i64,
    input: InputKind,
) -> SnapTarget {
    let index = clamp_index(layout, index);
    SnapTarget {
        index,
        position: layout.position_for(index as f64),
        raw_index: layout.index_at(position),
        velocity: 0.0,
        swiped: false,
        input,
    }
}
