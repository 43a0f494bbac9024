//! Loop folding: keeps the virtual index inside the middle band of the working set.
//!
//! A fold rewrites the track position by exactly one set width. Since `index mod N` is unchanged
//! by adding or subtracting `N`, the centered original item stays the same and the rewrite is
//! invisible.

use crate::{FoldDirection, Layout};

/// Result of folding a position back into the safe band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fold {
    pub position: f64,
    pub direction: FoldDirection,
    /// Number of single-set folds applied (at least 1).
    pub sets: usize,
}

/// The safe band `[N/2, 2N + N/2]` in virtual-index units.
pub fn fold_band(count: usize) -> (f64, f64) {
    let n = count as f64;
    (n / 2.0, n * 2.0 + n / 2.0)
}

pub fn fold_left(layout: &Layout, position: f64) -> f64 {
    position - layout.one_set_width()
}

pub fn fold_right(layout: &Layout, position: f64) -> f64 {
    position + layout.one_set_width()
}

/// Folds `position` until its virtual index lies in the safe band.
///
/// Returns `None` when no fold is needed (or the layout has no items).
pub fn fold_position(layout: &Layout, position: f64) -> Option<Fold> {
    if layout.count == 0 || !position.is_finite() {
        return None;
    }
    let n = layout.count as f64;
    let (low, high) = fold_band(layout.count);
    let index = layout.index_at(position);

    if index < low {
        let sets = ((low - index) / n).ceil().max(1.0) as usize;
        let position = position - sets as f64 * layout.one_set_width();
        return Some(Fold {
            position,
            direction: FoldDirection::Left,
            sets,
        });
    }
    if index > high {
        let sets = ((index - high) / n).ceil().max(1.0) as usize;
        let position = position + sets as f64 * layout.one_set_width();
        return Some(Fold {
            position,
            direction: FoldDirection::Right,
            sets,
        });
    }
    None
}
