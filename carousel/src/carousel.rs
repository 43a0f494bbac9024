use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::fold::{Fold, fold_position};
use crate::layout::compute_layout;
use crate::projection::project;
use crate::snap::{clamp_index, resolve_snap, snap_target_for_index};
use crate::working_set::{original_index, replica_of, working_len};
use crate::{
    CarouselOptions, CarouselSnapshot, ConfigError, FoldPolicy, InputKind, ItemKey, Layout,
    OnChangeCallback, Phase, RenderDescriptor, SnapTarget, WorkingKey,
};

/// Handle returned by [`Carousel::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Transient state of an active drag gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragSession {
    pub start_position: f64,
    pub input: InputKind,
    /// Last velocity reported by the adapter (px/s).
    pub velocity: f64,
    /// Sum of raw drag deltas, before elastic resistance.
    pub travel: f64,
}

#[derive(Clone)]
struct Observers<K> {
    next_id: u64,
    entries: Vec<(ObserverId, OnChangeCallback<K>)>,
}

impl<K> Default for Observers<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<K> core::fmt::Debug for Observers<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish()
    }
}

/// A headless infinite carousel.
///
/// This type is UI-agnostic:
/// - It does not hold any UI objects or clocks.
/// - Your adapter drives it with viewport widths, drag deltas, and settle frames.
/// - Rendering is exposed as pure per-card descriptors (`for_each_render_descriptor`).
///
/// The original items are laid out three times (`[0, 3N)`). The track position is kept inside
/// the middle of that range by folding it one set width at a time, which makes the carousel
/// loop forever in both directions. The settle animation itself lives in the adapter; see the
/// `carousel-adapter` crate.
#[derive(Clone, Debug)]
pub struct Carousel<K = ItemKey> {
    options: CarouselOptions<K>,
    viewport_width: Option<f64>,
    layout: Option<Layout>,
    position: f64,
    initialized: bool,
    phase: Phase,
    drag: Option<DragSession>,
    settle: Option<SnapTarget>,
    pending_viewport: Option<f64>,
    // Fractional index remembered while the viewport is unmeasured.
    suspended_index: Option<f64>,

    observers: Observers<K>,
    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<K> Carousel<K> {
    /// Creates a carousel from validated options.
    ///
    /// If `options.initial_viewport_width` is set, the layout is computed and the track is placed
    /// on the initial item in the middle replica immediately.
    pub fn new(options: CarouselOptions<K>) -> Result<Self, ConfigError> {
        options.validate()?;
        cdebug!(
            count = options.count,
            fold_policy = ?options.fold_policy,
            "Carousel::new"
        );
        let initial_viewport = options.initial_viewport_width;
        let mut c = Self {
            options,
            viewport_width: None,
            layout: None,
            position: 0.0,
            initialized: false,
            phase: Phase::Idle,
            drag: None,
            settle: None,
            pending_viewport: None,
            suspended_index: None,
            observers: Observers::default(),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        if let Some(width) = initial_viewport {
            c.relayout(width);
        }
        Ok(c)
    }

    pub fn options(&self) -> &CarouselOptions<K> {
        &self.options
    }

    /// Replaces the options.
    ///
    /// Invalid options are rejected and leave the carousel untouched. A count change re-homes the
    /// track on the same original item (clamped); a layout change recomputes geometry keeping the
    /// centered item in place.
    pub fn set_options(&mut self, options: CarouselOptions<K>) -> Result<(), ConfigError> {
        options.validate()?;
        let prev_count = self.options.count;
        let layout_changed = self.options.layout != options.layout;
        self.options = options;
        ctrace!(count = self.options.count, "Carousel::set_options");

        if self.options.count != prev_count {
            let keep = self.centered_original_index_for_count(prev_count);
            self.rebuild_for_count(keep);
        } else if layout_changed {
            if let Some(width) = self.viewport_width {
                self.resize_or_defer(width);
            }
        }

        self.notify();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut CarouselOptions<K>),
    ) -> Result<(), ConfigError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Carousel<K>, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    /// Registers an additional observer, called after every state change.
    pub fn subscribe(&mut self, f: impl Fn(&Carousel<K>, bool) + Send + Sync + 'static) -> ObserverId {
        let id = ObserverId(self.observers.next_id);
        self.observers.next_id = self.observers.next_id.wrapping_add(1);
        self.observers.entries.push((id, Arc::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.entries.len();
        self.observers.entries.retain(|(entry, _)| *entry != id);
        self.observers.entries.len() != before
    }

    fn notify_now(&self) {
        let interacting = self.is_interacting();
        if let Some(cb) = &self.options.on_change {
            cb(self, interacting);
        }
        for (_, cb) in &self.observers.entries {
            cb(self, interacting);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn working_len(&self) -> usize {
        working_len(self.options.count)
    }

    /// `true` once there are items and a measured viewport. Otherwise drag and snap are no-ops.
    pub fn is_enabled(&self) -> bool {
        self.active_layout().is_some()
    }

    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    fn active_layout(&self) -> Option<Layout> {
        self.layout.filter(|_| self.options.count > 0)
    }

    pub fn viewport_width(&self) -> Option<f64> {
        self.viewport_width
    }

    /// A resize received mid-drag, applied when the drag ends.
    pub fn pending_viewport_width(&self) -> Option<f64> {
        self.pending_viewport
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    pub fn is_settling(&self) -> bool {
        self.phase == Phase::Settling
    }

    /// Dragging or settling. Presentation layers use this to suppress click-through navigation.
    pub fn is_interacting(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn settle_target(&self) -> Option<SnapTarget> {
        self.settle
    }

    /// Fractional working-set index at the viewport center.
    ///
    /// `None` while there are no items or the viewport has not been measured.
    pub fn virtual_index(&self) -> Option<f64> {
        self.active_layout().map(|l| l.index_at(self.position))
    }

    /// The working-set index closest to the viewport center.
    pub fn centered_index(&self) -> Option<usize> {
        let layout = self.active_layout()?;
        let index = layout.index_at(self.position).round();
        Some(clamp_index(&layout, index as i64))
    }

    /// The original item closest to the viewport center.
    pub fn centered_original_index(&self) -> Option<usize> {
        self.centered_original_index_for_count(self.options.count)
    }

    fn centered_original_index_for_count(&self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let index = self.layout?.index_at(self.position).round() as i64;
        Some(index.rem_euclid(count as i64) as usize)
    }

    pub fn key_for(&self, original_index: usize) -> K {
        (self.options.get_item_key)(original_index)
    }

    /// Render key for a working-set card. Replicas share the item key but not the index.
    pub fn working_key(&self, index: usize) -> Option<WorkingKey<K>> {
        let count = self.options.count;
        let original = original_index(index, count)?;
        let replica = replica_of(index, count)?;
        Some(WorkingKey {
            key: self.key_for(original),
            index,
            replica,
        })
    }

    /// Reports a new viewport width.
    ///
    /// Geometry is recomputed so the same logical item stays centered. During a drag the resize is
    /// deferred to the end of the gesture, since changing card widths mid-drag would desync the
    /// pointer from the track.
    pub fn set_viewport_width(&mut self, viewport_width: f64) {
        if self.viewport_width == Some(viewport_width) && self.pending_viewport.is_none() {
            return;
        }
        self.resize_or_defer(viewport_width);
        self.notify();
    }

    fn resize_or_defer(&mut self, viewport_width: f64) {
        if self.phase == Phase::Dragging {
            cdebug!(viewport_width, "resize deferred until drag end");
            self.pending_viewport = Some(viewport_width);
            return;
        }
        self.relayout(viewport_width);
    }

    fn relayout(&mut self, viewport_width: f64) {
        let prev_index = self.virtual_index().or(self.suspended_index);
        self.viewport_width = Some(viewport_width);

        let Some(layout) = compute_layout(&self.options.layout, viewport_width, self.options.count)
        else {
            if self.layout.is_some() {
                cdebug!(viewport_width, "viewport unmeasured; index math suspended");
            }
            self.layout = None;
            if self.initialized {
                self.suspended_index = prev_index;
            }
            // No geometry to animate in: the settle lands on its target once measured again.
            if let Some(target) = self.settle.take() {
                cdebug!(index = target.index, "settle resolved while viewport unmeasured");
                self.suspended_index = Some(target.index as f64);
                self.phase = Phase::Idle;
            }
            return;
        };
        ctrace!(
            viewport_width,
            card_width = layout.card_width,
            card_gap = layout.card_gap,
            "relayout"
        );
        self.layout = Some(layout);
        self.suspended_index = None;
        if self.options.count == 0 {
            return;
        }

        match prev_index.filter(|_| self.initialized) {
            Some(index) => self.position = layout.position_for(index),
            None => {
                self.position = layout.home_position(self.options.initial_index);
                self.initialized = true;
            }
        }
        if let Some(target) = self.settle.as_mut() {
            target.position = layout.position_for(target.index as f64);
        }
        if self.phase == Phase::Idle {
            self.apply_fold();
        }
    }

    /// Changes the number of original items.
    ///
    /// Any drag or settle is abandoned and the track is re-homed on the previously centered
    /// original item (clamped to the new count).
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        let keep = self.centered_original_index();
        self.options.count = count;
        cdebug!(count, "set_count");
        self.rebuild_for_count(keep);
        self.notify();
    }

    fn rebuild_for_count(&mut self, keep: Option<usize>) {
        self.reset_interaction();
        self.initialized = false;
        self.suspended_index = None;
        let Some(width) = self.viewport_width else {
            return;
        };
        let count = self.options.count;
        self.layout = compute_layout(&self.options.layout, width, count);
        let Some(layout) = self.active_layout() else {
            return;
        };
        let original = keep.unwrap_or(self.options.initial_index);
        self.position = layout.home_position(original);
        self.initialized = true;
    }

    fn reset_interaction(&mut self) {
        self.phase = Phase::Idle;
        self.drag = None;
        self.settle = None;
        if let Some(width) = self.pending_viewport.take() {
            self.viewport_width = Some(width);
        }
    }

    /// Starts a drag session. A running settle is cancelled; the drag takes over the position.
    ///
    /// Returns `false` when disabled or already dragging.
    pub fn begin_drag(&mut self, input: InputKind) -> bool {
        if self.active_layout().is_none() || self.phase == Phase::Dragging {
            return false;
        }
        if self.settle.take().is_some() {
            cdebug!(position = self.position, "drag interrupts settle");
        }
        self.phase = Phase::Dragging;
        self.drag = Some(DragSession {
            start_position: self.position,
            input,
            velocity: 0.0,
            travel: 0.0,
        });
        ctrace!(position = self.position, input = ?input, "begin_drag");
        self.notify();
        true
    }

    /// Moves the track by `delta` pixels (1:1), optionally recording the current velocity.
    ///
    /// Deltas that push the virtual index outside `[0, 3N - 1]` are scaled by `drag_elastic`.
    /// With [`FoldPolicy::Continuous`] the position is folded after every update.
    pub fn drag_by(&mut self, delta: f64, velocity: Option<f64>) -> bool {
        let Some(layout) = self.active_layout() else {
            return false;
        };
        let Some(session) = self.drag.as_mut() else {
            return false;
        };
        if !delta.is_finite() {
            cwarn!(delta, "drag_by: ignoring non-finite delta");
            return false;
        }

        session.travel += delta;
        if let Some(v) = velocity.filter(|v| v.is_finite()) {
            session.velocity = v;
        }

        let max_index = layout.working_len().saturating_sub(1) as f64;
        let next_index = layout.index_at(self.position + delta);
        let outward = (next_index < 0.0 && delta > 0.0) || (next_index > max_index && delta < 0.0);
        self.position += if outward {
            delta * self.options.drag_elastic
        } else {
            delta
        };

        if self.options.fold_policy == FoldPolicy::Continuous {
            if let Some(fold) = fold_position(&layout, self.position) {
                ctrace!(direction = ?fold.direction, sets = fold.sets, "fold during drag");
                session.start_position += fold.position - self.position;
                self.position = fold.position;
            }
        }

        self.notify();
        true
    }

    /// Ends the drag and resolves the snap target.
    ///
    /// `velocity` overrides the last velocity passed to `drag_by`. A resize deferred during the
    /// drag is applied first. The carousel enters [`Phase::Settling`]; the adapter animates the
    /// position and calls [`Carousel::finish_settle`].
    pub fn end_drag(&mut self, velocity: Option<f64>) -> Option<SnapTarget> {
        if self.phase != Phase::Dragging {
            return None;
        }
        let session = self.drag.take()?;
        let velocity = velocity
            .filter(|v| v.is_finite())
            .unwrap_or(session.velocity);

        self.phase = Phase::Idle;
        if let Some(width) = self.pending_viewport.take() {
            self.relayout(width);
        }
        let Some(layout) = self.active_layout() else {
            self.notify();
            return None;
        };

        let target = resolve_snap(
            &layout,
            self.position,
            velocity,
            session.input,
            &self.options.snap,
        );
        cdebug!(
            raw_index = target.raw_index,
            velocity,
            swiped = target.swiped,
            index = target.index,
            "end_drag"
        );
        self.phase = Phase::Settling;
        self.settle = Some(target);
        self.notify();
        Some(target)
    }

    /// Abandons the drag (e.g. pointer cancel) and settles on the nearest card.
    pub fn cancel_drag(&mut self) -> Option<SnapTarget> {
        self.end_drag(Some(0.0))
    }

    /// Starts settling toward `index` (clamped to `[0, 3N - 1]`).
    ///
    /// Used for taps and programmatic navigation. Ignored while dragging. When already settling,
    /// the target is replaced.
    pub fn snap_to_index(&mut self, index: i64, input: InputKind) -> Option<SnapTarget> {
        if self.phase == Phase::Dragging {
            return None;
        }
        let layout = self.active_layout()?;
        let target = snap_target_for_index(&layout, self.position, index, input);
        ctrace!(requested = index, index = target.index, "snap_to_index");
        self.phase = Phase::Settling;
        self.settle = Some(target);
        self.notify();
        Some(target)
    }

    /// Snaps one card toward higher indexes (relative to the pending target while settling).
    pub fn next(&mut self, input: InputKind) -> Option<SnapTarget> {
        self.step(1, input)
    }

    /// Snaps one card toward lower indexes (relative to the pending target while settling).
    pub fn previous(&mut self, input: InputKind) -> Option<SnapTarget> {
        self.step(-1, input)
    }

    fn step(&mut self, by: i64, input: InputKind) -> Option<SnapTarget> {
        let base = match self.settle {
            Some(target) => target.index,
            None => self.centered_index()?,
        };
        self.snap_to_index(base as i64 + by, input)
    }

    /// Writes an animation frame. Only valid while settling; never folds.
    pub fn apply_settle_frame(&mut self, position: f64) -> bool {
        if self.phase != Phase::Settling || !position.is_finite() {
            return false;
        }
        self.position = position;
        self.notify();
        true
    }

    /// Completes the settle: lands exactly on the target, returns to idle, and folds once.
    pub fn finish_settle(&mut self) -> Option<Fold> {
        if self.phase != Phase::Settling {
            return None;
        }
        let target = self.settle.take()?;
        self.position = target.position;
        self.phase = Phase::Idle;
        let fold = self.apply_fold();
        cdebug!(
            index = target.index,
            position = self.position,
            folded = fold.is_some(),
            "settle finished"
        );
        self.notify();
        fold
    }

    /// Stops a settle where it is (no snap) and folds.
    pub fn cancel_settle(&mut self) {
        if self.phase != Phase::Settling {
            return;
        }
        self.settle = None;
        self.phase = Phase::Idle;
        self.apply_fold();
        self.notify();
    }

    /// Centers working-set `index` (clamped) immediately, without animation.
    pub fn jump_to_index(&mut self, index: i64) -> bool {
        if self.phase == Phase::Dragging {
            return false;
        }
        let Some(layout) = self.active_layout() else {
            return false;
        };
        let index = clamp_index(&layout, index);
        self.settle = None;
        self.phase = Phase::Idle;
        self.position = layout.position_for(index as f64);
        self.apply_fold();
        self.notify();
        true
    }

    /// Centers original item `original_index` in the middle replica, offset by `fraction` cards.
    pub fn jump_to_original(&mut self, original_index: usize, fraction: f64) -> bool {
        if self.phase == Phase::Dragging || self.options.count == 0 || !fraction.is_finite() {
            return false;
        }
        let count = self.options.count;
        let index = (count + original_index.min(count - 1)) as f64 + fraction;
        self.settle = None;
        self.phase = Phase::Idle;
        match self.active_layout() {
            Some(layout) => {
                self.position = layout.position_for(index);
                self.apply_fold();
            }
            None => self.suspended_index = Some(index),
        }
        self.initialized = true;
        self.notify();
        true
    }

    /// Writes the track position directly. Only valid when idle; folds afterwards.
    pub fn set_position(&mut self, position: f64) -> bool {
        if self.phase != Phase::Idle || !position.is_finite() {
            return false;
        }
        self.position = position;
        self.apply_fold();
        self.notify();
        true
    }

    fn apply_fold(&mut self) -> Option<Fold> {
        let layout = self.active_layout()?;
        let fold = fold_position(&layout, self.position)?;
        ctrace!(
            direction = ?fold.direction,
            sets = fold.sets,
            from = self.position,
            to = fold.position,
            "fold"
        );
        self.position = fold.position;
        Some(fold)
    }

    /// Captures the centered item in a layout-independent form.
    pub fn snapshot(&self) -> Option<CarouselSnapshot> {
        let layout = self.active_layout()?;
        let index = layout.index_at(self.position);
        let nearest = index.round();
        Some(CarouselSnapshot {
            viewport_width: layout.viewport_width,
            centered_original_index: (nearest as i64).rem_euclid(self.options.count as i64)
                as usize,
            fraction: index - nearest,
        })
    }

    /// Restores a snapshot: applies its viewport width, then centers its item.
    pub fn restore_snapshot(&mut self, snapshot: CarouselSnapshot) -> bool {
        if self.phase == Phase::Dragging {
            return false;
        }
        let mut restored = false;
        self.batch_update(|c| {
            c.reset_interaction();
            c.set_viewport_width(snapshot.viewport_width);
            restored = c.jump_to_original(snapshot.centered_original_index, snapshot.fraction);
        });
        restored
    }

    /// Render descriptor for working-set `index` at the current position.
    pub fn render_descriptor(&self, index: usize) -> Option<RenderDescriptor> {
        let layout = self.active_layout()?;
        if index >= layout.working_len() {
            return None;
        }
        Some(project(&layout, self.position, index, &self.options.projection))
    }

    /// Iterates descriptors for every card in the working set without allocating.
    pub fn for_each_render_descriptor(&self, mut f: impl FnMut(RenderDescriptor)) {
        let Some(layout) = self.active_layout() else {
            return;
        };
        for index in 0..layout.working_len() {
            f(project(&layout, self.position, index, &self.options.projection));
        }
    }

    pub fn render_descriptors(&self) -> Vec<RenderDescriptor> {
        let mut out = Vec::with_capacity(self.working_len());
        self.for_each_render_descriptor(|d| out.push(d));
        out
    }
}
