/// A lightweight, serializable snapshot of which item is centered.
///
/// Snapshots are layout-independent: restoring one under a different viewport width centers the
/// same original item at the same fractional offset.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselSnapshot {
    pub viewport_width: f64,
    pub centered_original_index: usize,
    /// Offset from the centered item in cards, in `[-0.5, 0.5]`.
    pub fraction: f64,
}
