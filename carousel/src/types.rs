use alloc::string::String;

pub type ItemKey = u64;

/// An item supplied by the presentation layer.
///
/// The carousel never reads or mutates item content; it only needs the item count and a stable
/// key per original index. This type is provided for adapters that don't bring their own.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: u64,
    pub title: String,
}

impl Item {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// The kind of device that produced a gesture.
///
/// Touch input uses a lower swipe threshold and a snappier settle spring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputKind {
    #[default]
    Pointer,
    Touch,
}

/// Lifecycle of the track position.
///
/// `Idle -> Dragging -> Settling -> Idle`. Programmatic snaps go `Idle -> Settling -> Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

/// When the loop fold is allowed to rewrite the track position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoldPolicy {
    /// Fold after idle position writes and once when a settle completes. Never during a drag.
    #[default]
    Quiescent,
    /// Like `Quiescent`, and also after every drag update.
    Continuous,
}

/// Direction of a loop fold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoldDirection {
    /// `position -= one_set_width`: the virtual index grows by `N`.
    Left,
    /// `position += one_set_width`: the virtual index shrinks by `N`.
    Right,
}

/// How a swipe biases the snap target away from the nearest index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlickRounding {
    /// `floor(raw) + 1` toward higher indexes, `ceil(raw) - 1` toward lower ones.
    #[default]
    Directional,
    /// `round(raw) ± 1`.
    Step,
}

/// A resolved snap: the working-set index to center and the track position that centers it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapTarget {
    pub index: usize,
    pub position: f64,
    /// Fractional index at release (before rounding/biasing).
    pub raw_index: f64,
    /// Release velocity in px/s. Negative means travel toward higher indexes.
    pub velocity: f64,
    /// Whether the velocity exceeded the swipe threshold.
    pub swiped: bool,
    pub input: InputKind,
}

/// Per-card output consumed by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderDescriptor {
    /// Working-set index in `[0, 3N)`.
    pub index: usize,
    /// Screen-space x of the card's left edge (track position + card start).
    pub position_offset: f64,
    pub scale: f64,
    pub opacity: f64,
    pub z_index: i32,
    pub width: f64,
    pub height: f64,
}

/// A key for a card in the working set: the original item's key plus its replica.
///
/// Replicas of one item share `key` but never `index`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkingKey<K> {
    pub key: K,
    pub index: usize,
    pub replica: usize,
}
