use alloc::collections::BTreeMap;

use crate::FrameScheduler;
use crate::frame::FrameSlot;

/// Pending re-measurements, flushed once per frame.
#[derive(Clone, Debug)]
pub(crate) struct MeasurementQueue<T> {
    pending: BTreeMap<usize, T>,
    pub(crate) slot: FrameSlot,
}

impl<T: PartialEq> MeasurementQueue<T> {
    pub(crate) fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            slot: FrameSlot::Idle,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn is_queued(&self, index: usize) -> bool {
        self.pending.contains_key(&index)
    }

    /// Queues `target` for measurement and arms a frame if none is armed.
    ///
    /// A later request for the same index replaces the earlier target.
    pub(crate) fn push(&mut self, index: usize, target: T, frames: &mut impl FrameScheduler) {
        self.pending.insert(index, target);
        self.slot.arm(frames);
    }

    /// Drops the queued measurement for `index` if it was queued for `target`.
    pub(crate) fn discard(&mut self, index: usize, target: &T) {
        if self.pending.get(&index) == Some(target) {
            self.pending.remove(&index);
        }
    }

    /// Takes everything queued (ascending index order) and cancels the armed frame.
    pub(crate) fn drain(&mut self, frames: &mut impl FrameScheduler) -> BTreeMap<usize, T> {
        self.slot.cancel(frames);
        core::mem::take(&mut self.pending)
    }

    pub(crate) fn clear(&mut self, frames: &mut impl FrameScheduler) {
        self.slot.cancel(frames);
        self.pending.clear();
    }
}
