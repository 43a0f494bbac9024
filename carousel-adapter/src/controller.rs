use carousel::{Carousel, CarouselOptions, ConfigError, InputKind, ItemKey, SnapTarget};

use crate::{CenterAnchor, Spring, VelocityTracker, apply_center_anchor, capture_center_anchor};

/// A framework-neutral controller that wraps a [`Carousel`] and owns the settle animation.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_resize` when the viewport width changes
/// - `on_drag_start` / `on_drag_move` / `on_drag_end` for pointer or touch gestures
/// - `on_card_tap` when a card is tapped
/// - `tick(now_ms)` each animation frame while `is_animating()`
///
/// After each call, read the track position from `carousel().position()` and the per-card
/// transforms from `carousel().for_each_render_descriptor`.
#[derive(Clone, Debug)]
pub struct Controller<K = ItemKey> {
    c: Carousel<K>,
    spring: Option<Spring>,
    tracker: VelocityTracker,
    pointer_travel: f64,
}

impl<K> Controller<K> {
    pub fn new(options: CarouselOptions<K>) -> Result<Self, ConfigError> {
        Ok(Self::from_carousel(Carousel::new(options)?))
    }

    pub fn from_carousel(c: Carousel<K>) -> Self {
        Self {
            c,
            spring: None,
            tracker: VelocityTracker::default(),
            pointer_travel: 0.0,
        }
    }

    pub fn carousel(&self) -> &Carousel<K> {
        &self.c
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel<K> {
        &mut self.c
    }

    pub fn into_carousel(self) -> Carousel<K> {
        self.c
    }

    pub fn spring(&self) -> Option<&Spring> {
        self.spring.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.spring.is_some()
    }

    /// `true` while dragging or settling; use it to suppress click-through navigation.
    pub fn is_interacting(&self) -> bool {
        self.c.is_interacting()
    }

    /// Stops the settle animation where it is.
    pub fn cancel_animation(&mut self) {
        self.spring = None;
        self.c.cancel_settle();
    }

    /// Call this when the viewport width changes.
    ///
    /// A running settle keeps its target card; the spring is moved onto the new geometry.
    pub fn on_resize(&mut self, viewport_width: f64) {
        self.c.set_viewport_width(viewport_width);
        if let (Some(spring), Some(target)) = (self.spring.as_mut(), self.c.settle_target()) {
            spring.reset_position(self.c.position());
            spring.retarget(target.position);
        }
    }

    /// Starts a gesture. Cancels any running settle.
    ///
    /// When the carousel refuses the drag (unmeasured, already dragging) nothing changes.
    pub fn on_drag_start(&mut self, input: InputKind, now_ms: u64) -> bool {
        if !self.c.begin_drag(input) {
            return false;
        }
        self.spring = None;
        self.tracker.reset();
        self.pointer_travel = 0.0;
        self.tracker.record(now_ms, 0.0);
        true
    }

    /// Applies a pointer-move delta (px, positive = content moves right).
    pub fn on_drag_move(&mut self, delta: f64, now_ms: u64) -> bool {
        if !delta.is_finite() || !self.c.is_dragging() {
            return false;
        }
        self.pointer_travel += delta;
        self.tracker.record(now_ms, self.pointer_travel);
        let velocity = self.tracker.velocity(now_ms);
        self.c.drag_by(delta, Some(velocity))
    }

    /// Ends a gesture and starts settling.
    ///
    /// `velocity` overrides the tracked release velocity (px/s, negative = toward higher
    /// indexes). Returns the snap target.
    pub fn on_drag_end(&mut self, now_ms: u64, velocity: Option<f64>) -> Option<SnapTarget> {
        if !self.c.is_dragging() {
            return None;
        }
        let velocity = velocity
            .filter(|v| v.is_finite())
            .unwrap_or_else(|| self.tracker.velocity(now_ms));
        let target = self.c.end_drag(Some(velocity))?;
        self.start_spring(&target, velocity, now_ms);
        Some(target)
    }

    /// Abandons a gesture (pointer cancel) and settles on the nearest card.
    pub fn on_drag_cancel(&mut self, now_ms: u64) -> Option<SnapTarget> {
        let target = self.c.cancel_drag()?;
        self.start_spring(&target, 0.0, now_ms);
        Some(target)
    }

    /// Tapping a card centers it. Ignored while dragging; retargets a running settle.
    pub fn on_card_tap(&mut self, index: usize, input: InputKind, now_ms: u64) -> Option<SnapTarget> {
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        self.snap_to_index(index, input, now_ms)
    }

    /// Starts an animated snap to working-set `index` (clamped).
    pub fn snap_to_index(&mut self, index: i64, input: InputKind, now_ms: u64) -> Option<SnapTarget> {
        let target = self.c.snap_to_index(index, input)?;
        self.continue_spring(&target, now_ms);
        Some(target)
    }

    pub fn next(&mut self, input: InputKind, now_ms: u64) -> Option<SnapTarget> {
        let target = self.c.next(input)?;
        self.continue_spring(&target, now_ms);
        Some(target)
    }

    pub fn previous(&mut self, input: InputKind, now_ms: u64) -> Option<SnapTarget> {
        let target = self.c.previous(input)?;
        self.continue_spring(&target, now_ms);
        Some(target)
    }

    /// Centers working-set `index` immediately (no animation).
    pub fn jump_to_index(&mut self, index: i64) -> bool {
        let jumped = self.c.jump_to_index(index);
        if jumped {
            self.spring = None;
        }
        jumped
    }

    fn start_spring(&mut self, target: &SnapTarget, velocity: f64, now_ms: u64) {
        let settle = self.c.options().settle;
        let spring = Spring::for_target(self.c.position(), target, velocity, &settle, now_ms);
        adebug!(
            from = spring.position,
            to = spring.target,
            velocity = spring.velocity,
            "settle spring started"
        );
        self.spring = Some(spring);
    }

    // Keeps momentum when a settle is retargeted mid-flight.
    fn continue_spring(&mut self, target: &SnapTarget, now_ms: u64) {
        let velocity = self.spring.map_or(0.0, |s| s.velocity);
        self.start_spring(target, velocity, now_ms);
    }

    /// Advances the controller.
    ///
    /// - While settling, steps the spring, writes the frame, and returns the new position.
    ///   When the spring comes to rest the carousel lands on the target and folds.
    /// - Otherwise returns `None`.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        let spring = self.spring.as_mut()?;
        if !self.c.is_settling() {
            self.spring = None;
            return None;
        }

        let position = spring.sample(now_ms);
        if spring.is_at_rest() {
            self.spring = None;
            self.c.finish_settle();
            atrace!(position = self.c.position(), "settle done");
        } else {
            self.c.apply_settle_frame(position);
        }
        Some(self.c.position())
    }

    pub fn capture_center_anchor(&self) -> Option<CenterAnchor<K>> {
        capture_center_anchor(&self.c)
    }

    /// Re-centers a previously captured anchor. Cancels any settle.
    pub fn apply_center_anchor(
        &mut self,
        anchor: &CenterAnchor<K>,
        key_to_index: impl FnMut(&K) -> Option<usize>,
    ) -> bool {
        self.spring = None;
        self.c.cancel_settle();
        apply_center_anchor(&mut self.c, anchor, key_to_index)
    }
}

impl<K: PartialEq> Controller<K> {
    /// Replaces the item list, keeping the centered item (by key) centered when it survives.
    ///
    /// Returns `Ok(true)` when the previously centered item was found in the new list.
    pub fn set_items(
        &mut self,
        count: usize,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Result<bool, ConfigError> {
        let anchor = self.capture_center_anchor();
        let mut next = self.c.options().clone().with_get_item_key(get_item_key);
        next.count = count;
        self.c.set_options(next)?;
        self.spring = None;
        self.c.cancel_settle();

        let Some(anchor) = anchor else {
            return Ok(false);
        };
        let c = &self.c;
        let found = (0..count).find(|&i| c.key_for(i) == anchor.key);
        Ok(apply_center_anchor(&mut self.c, &anchor, |_| found))
    }
}
