use core::ops::Range;

/// Number of contiguous copies of the original sequence in the working set.
pub const REPLICAS: usize = 3;

/// Length of the working set for `count` original items.
pub fn working_len(count: usize) -> usize {
    count.saturating_mul(REPLICAS)
}

/// Maps a working-set index to its original item index (`index mod N`).
pub fn original_index(index: usize, count: usize) -> Option<usize> {
    if index >= working_len(count) {
        return None;
    }
    Some(index % count)
}

/// Which replica (0, 1 or 2) a working-set index falls into.
pub fn replica_of(index: usize, count: usize) -> Option<usize> {
    if index >= working_len(count) {
        return None;
    }
    Some(index / count)
}

/// The middle replica, `[N, 2N)`.
pub fn home_range(count: usize) -> Range<usize> {
    count..count.saturating_mul(2)
}

/// A read-only view of `original ++ original ++ original` without copying items.
#[derive(Clone, Copy, Debug)]
pub struct WorkingSet<'a, T> {
    items: &'a [T],
}

impl<'a, T> WorkingSet<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items }
    }

    pub fn originals(&self) -> &'a [T] {
        self.items
    }

    pub fn len(&self) -> usize {
        working_len(self.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a T> {
        let original = original_index(index, self.items.len())?;
        self.items.get(original)
    }

    /// Iterates `(working_index, item)` over all three replicas.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a T)> + 'a {
        let items = self.items;
        (0..working_len(items.len())).map(move |i| (i, &items[i % items.len()]))
    }
}
