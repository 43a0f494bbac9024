use core::fmt;

use carousel::Carousel;

/// A center anchor that keeps the same item centered across data changes.
///
/// Typical use cases:
/// - the item list is replaced/reordered and the centered card should stay put
/// - restoring the carousel after the host rebuilds it with a different count
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CenterAnchor<K> {
    pub key: K,
    /// Offset from the anchored item in cards, in `[-0.5, 0.5]`.
    pub fraction: f64,
}

impl<K: fmt::Debug> fmt::Debug for CenterAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CenterAnchor")
            .field("key", &self.key)
            .field("fraction", &self.fraction)
            .finish()
    }
}

/// Captures an anchor for the centered item (by key).
///
/// Returns `None` if the carousel is disabled (no items or unmeasured viewport).
pub fn capture_center_anchor<K>(c: &Carousel<K>) -> Option<CenterAnchor<K>> {
    let snapshot = c.snapshot()?;
    Some(CenterAnchor {
        key: c.key_for(snapshot.centered_original_index),
        fraction: snapshot.fraction,
    })
}

/// Re-centers a previously captured anchor.
///
/// The adapter must provide a `key_to_index` mapping for the *current* item list.
///
/// Returns `true` when the anchor was applied.
pub fn apply_center_anchor<K>(
    c: &mut Carousel<K>,
    anchor: &CenterAnchor<K>,
    mut key_to_index: impl FnMut(&K) -> Option<usize>,
) -> bool {
    let Some(index) = key_to_index(&anchor.key) else {
        return false;
    };
    if index >= c.count() {
        return false;
    }
    c.jump_to_original(index, anchor.fraction)
}
