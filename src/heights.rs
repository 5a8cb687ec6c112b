use alloc::vec::Vec;

use crate::fenwick::Fenwick;

/// Height changes smaller than this are stored without touching the index.
pub(crate) const SUBPIXEL_EPSILON: f64 = 0.5;

#[derive(Clone, Copy, Debug)]
struct Slot {
    /// Last reported (or seeded) height.
    value: f64,
    /// What this slot currently contributes to the index.
    indexed: f64,
    measured: bool,
}

/// Per-item heights kept in lockstep with a [`Fenwick`] index.
#[derive(Clone, Debug)]
pub(crate) struct HeightStore {
    slots: Vec<Slot>,
    sums: Fenwick,
    estimated: f64,
}

impl HeightStore {
    pub(crate) fn new(estimated: f64) -> Self {
        Self {
            slots: Vec::new(),
            sums: Fenwick::new(),
            estimated,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn estimated(&self) -> f64 {
        self.estimated
    }

    #[cfg(test)]
    pub(crate) fn index_len(&self) -> usize {
        self.sums.len()
    }

    pub(crate) fn set_len(&mut self, n: usize) {
        if n > self.len() {
            self.ensure_capacity(n);
        } else if n < self.len() {
            self.shrink_capacity(n);
        }
    }

    pub(crate) fn ensure_capacity(&mut self, n: usize) {
        let cur = self.len();
        if n <= cur {
            return;
        }
        self.sums.resize(n);
        self.slots.reserve(n - cur);
        let est = self.estimated;
        for i in cur..n {
            self.slots.push(Slot {
                value: est,
                indexed: est,
                measured: false,
            });
            self.sums.update(i, est);
        }
    }

    pub(crate) fn shrink_capacity(&mut self, n: usize) {
        let cur = self.len();
        if n >= cur {
            return;
        }
        for i in n..cur {
            let indexed = self.slots[i].indexed;
            self.sums.update(i, -indexed);
        }
        self.slots.truncate(n);
        self.sums.shrink(n);
    }

    /// Records a real height for `index`.
    ///
    /// Returns `false` (and changes nothing) for out-of-range indexes and for heights that are
    /// not finite or not positive.
    pub(crate) fn update_height(&mut self, index: usize, height: f64) -> bool {
        if !height.is_finite() || height <= 0.0 {
            return false;
        }
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        slot.value = height;
        slot.measured = true;
        let delta = height - slot.indexed;
        if delta < SUBPIXEL_EPSILON && delta > -SUBPIXEL_EPSILON {
            return true;
        }
        slot.indexed = height;
        self.sums.update(index, delta);
        true
    }

    /// Replaces the estimate and re-seeds every slot that has not been measured yet.
    pub(crate) fn set_estimated(&mut self, estimated: f64) {
        self.estimated = estimated;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.measured {
                continue;
            }
            let delta = estimated - slot.indexed;
            slot.value = estimated;
            slot.indexed = estimated;
            self.sums.update(i, delta);
        }
    }

    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.sums = Fenwick::new();
    }

    pub(crate) fn is_measured(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.measured)
    }

    pub(crate) fn measured_len(&self) -> usize {
        self.slots.iter().filter(|s| s.measured).count()
    }

    pub(crate) fn height(&self, index: usize) -> f64 {
        self.slots.get(index).map_or(self.estimated, |s| s.value)
    }

    pub(crate) fn offset(&self, index: usize) -> f64 {
        self.sums.prefix_sum(index.min(self.len()))
    }

    pub(crate) fn total(&self) -> f64 {
        self.sums.total()
    }

    pub(crate) fn index_at_offset(&self, offset: f64) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.sums.partition_point(offset)
    }

    /// The first item whose end reaches `target` (see [`Fenwick::lower_bound`]).
    pub(crate) fn index_ending_at(&self, target: f64) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.sums.lower_bound(target)
    }
}
