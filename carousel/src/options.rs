use alloc::sync::Arc;

use crate::carousel::Carousel;
use crate::error::{ensure_non_negative, ensure_positive, ensure_unit};
use crate::{ConfigError, FoldPolicy, InputKind, ItemKey, LayoutConfig, ProjectionConfig, SnapConfig};

/// A callback fired after a carousel state change.
///
/// The second argument is `is_interacting` (dragging or settling).
pub type OnChangeCallback<K> = Arc<dyn Fn(&Carousel<K>, bool) + Send + Sync>;

/// Lowest accepted [`SpringConfig::damping_ratio`]. Lighter damping rings for too long to settle.
pub const MIN_DAMPING_RATIO: f64 = 0.1;

/// Damped-spring parameters (unit mass).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self { stiffness, damping }
    }

    /// Damping at which the spring converges fastest without overshoot (`2 * sqrt(k)`).
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.sqrt()
    }

    /// `damping / critical_damping`. Values near 1 settle without visible bounce.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / self.critical_damping()
    }

    fn validate(&self, stiffness: &'static str, damping: &'static str) -> Result<(), ConfigError> {
        ensure_positive(stiffness, self.stiffness)?;
        ensure_non_negative(damping, self.damping)?;
        let ratio = self.damping_ratio();
        if ratio < MIN_DAMPING_RATIO {
            return Err(ConfigError::Underdamped {
                field: damping,
                ratio,
                min: MIN_DAMPING_RATIO,
            });
        }
        Ok(())
    }
}

/// Settle animation parameters per input kind, plus the rest thresholds that end it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettleConfig {
    pub pointer: SpringConfig,
    pub touch: SpringConfig,
    /// Distance to the target (px) below which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed (px/s) below which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            pointer: SpringConfig::new(300.0, 30.0),
            touch: SpringConfig::new(400.0, 40.0),
            rest_delta: 0.5,
            rest_speed: 2.0,
        }
    }
}

impl SettleConfig {
    pub fn spring_for(&self, input: InputKind) -> SpringConfig {
        match input {
            InputKind::Pointer => self.pointer,
            InputKind::Touch => self.touch,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.pointer
            .validate("settle.pointer.stiffness", "settle.pointer.damping")?;
        self.touch
            .validate("settle.touch.stiffness", "settle.touch.damping")?;
        ensure_positive("settle.rest_delta", self.rest_delta)?;
        ensure_positive("settle.rest_speed", self.rest_speed)?;
        Ok(())
    }
}

/// Configuration for [`crate::Carousel`].
///
/// Cheap to clone: the key mapping and observer are stored in `Arc`s so adapters can tweak a
/// field and call `Carousel::set_options` without reallocating closures.
pub struct CarouselOptions<K = ItemKey> {
    /// Number of original items (`N`).
    pub count: usize,
    /// Stable key for original item `i`, used for anchoring and render keys.
    pub get_item_key: Arc<dyn Fn(usize) -> K + Send + Sync>,

    pub layout: LayoutConfig,
    pub snap: SnapConfig,
    pub settle: SettleConfig,
    pub projection: ProjectionConfig,
    pub fold_policy: FoldPolicy,

    /// Fraction of a drag delta applied when it pushes the virtual index outside `[0, 3N - 1]`.
    pub drag_elastic: f64,

    /// Viewport width known at construction time, if any.
    pub initial_viewport_width: Option<f64>,
    /// Original item centered when the layout first becomes known.
    pub initial_index: usize,

    pub on_change: Option<OnChangeCallback<K>>,
}

impl<K> Clone for CarouselOptions<K> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            get_item_key: Arc::clone(&self.get_item_key),
            layout: self.layout,
            snap: self.snap,
            settle: self.settle,
            projection: self.projection,
            fold_policy: self.fold_policy,
            drag_elastic: self.drag_elastic,
            initial_viewport_width: self.initial_viewport_width,
            initial_index: self.initial_index,
            on_change: self.on_change.clone(),
        }
    }
}

impl CarouselOptions<ItemKey> {
    /// Creates options for `count` items keyed by original index.
    pub fn new(count: usize) -> Self {
        Self::new_with_key(count, |i| i as u64)
    }
}

impl<K> CarouselOptions<K> {
    /// Creates options with a custom key mapping (`get_item_key(i)` for original index `i`).
    pub fn new_with_key(
        count: usize,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            count,
            get_item_key: Arc::new(get_item_key),
            layout: LayoutConfig::default(),
            snap: SnapConfig::default(),
            settle: SettleConfig::default(),
            projection: ProjectionConfig::default(),
            fold_policy: FoldPolicy::default(),
            drag_elastic: 0.1,
            initial_viewport_width: None,
            initial_index: 0,
            on_change: None,
        }
    }

    pub fn with_get_item_key(
        mut self,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        self.get_item_key = Arc::new(get_item_key);
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_snap(mut self, snap: SnapConfig) -> Self {
        self.snap = snap;
        self
    }

    pub fn with_settle(mut self, settle: SettleConfig) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_projection(mut self, projection: ProjectionConfig) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_fold_policy(mut self, fold_policy: FoldPolicy) -> Self {
        self.fold_policy = fold_policy;
        self
    }

    pub fn with_drag_elastic(mut self, drag_elastic: f64) -> Self {
        self.drag_elastic = drag_elastic;
        self
    }

    pub fn with_initial_viewport_width(mut self, viewport_width: Option<f64>) -> Self {
        self.initial_viewport_width = viewport_width;
        self
    }

    pub fn with_initial_index(mut self, initial_index: usize) -> Self {
        self.initial_index = initial_index;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Carousel<K>, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    /// Rejects configurations that would misbehave at animation or layout time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.snap.validate()?;
        self.settle.validate()?;
        self.projection.validate()?;
        ensure_unit("drag_elastic", self.drag_elastic)?;
        Ok(())
    }
}

impl<K> core::fmt::Debug for CarouselOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CarouselOptions")
            .field("count", &self.count)
            .field("layout", &self.layout)
            .field("snap", &self.snap)
            .field("settle", &self.settle)
            .field("projection", &self.projection)
            .field("fold_policy", &self.fold_policy)
            .field("drag_elastic", &self.drag_elastic)
            .field("initial_viewport_width", &self.initial_viewport_width)
            .field("initial_index", &self.initial_index)
            .finish_non_exhaustive()
    }
}
