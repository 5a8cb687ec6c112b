use alloc::string::String;
use alloc::vec::Vec;

use crate::heights::HeightStore;
use crate::key::RecordMap;
use crate::measure::MeasurementQueue;
use crate::scroll::ScrollBinding;
use crate::spacer::SpacerScheduler;
use crate::{
    Container, Error, FrameHandle, FrameScheduler, ListSnapshot, Px, Range, VirtualListOptions,
};

/// A mounted render target.
#[derive(Clone, Debug)]
pub(crate) struct RenderRecord<T> {
    pub(crate) index: usize,
    pub(crate) target: T,
}

/// A virtualized list of variable-height items.
///
/// Only the items in the current [`Range`] have live render targets in the container; the
/// height of everything else is represented by two spacers. Heights start at
/// `estimated_item_height` and are replaced by real measurements read back from mounted
/// targets.
///
/// The list is driven entirely by its host:
/// - scroll events go to [`Self::handle_scroll_event`] (after [`Self::attach_scroll_handler`]),
/// - fired frames go to [`Self::run_frame`],
/// - content changes that do not remount go to [`Self::notify_item_mutated`].
pub struct VirtualList<C: Container, F: FrameScheduler> {
    pub(crate) options: VirtualListOptions<C>,
    pub(crate) container: C,
    pub(crate) frames: F,
    pub(crate) heights: HeightStore,
    pub(crate) records: RecordMap<C::Target>,
    /// The last range applied by the reconciler.
    pub(crate) applied: Option<Range>,
    pub(crate) measurements: MeasurementQueue<C::Target>,
    pub(crate) spacers: SpacerScheduler,
    pub(crate) scroll: ScrollBinding,
    pub(crate) destroyed: bool,
}

impl<C: Container, F: FrameScheduler> VirtualList<C, F> {
    /// Creates a list from options and a frame scheduler.
    ///
    /// Fails without a container or with a non-finite / non-positive estimated height. The
    /// container is moved out of `options` and is reachable through [`Self::container`].
    pub fn new(mut options: VirtualListOptions<C>, frames: F) -> Result<Self, Error> {
        validate_estimate(options.estimated_item_height)?;
        let mut container = options.container.take().ok_or(Error::MissingContainer)?;
        container.ensure_spacers();

        let mut heights = HeightStore::new(options.estimated_item_height);
        heights.ensure_capacity((options.get_item_count)());
        vdebug!(
            len = heights.len(),
            estimated_item_height = options.estimated_item_height,
            overscan = options.overscan,
            use_spacers = options.use_spacers,
            "VirtualList::new"
        );

        Ok(Self {
            options,
            container,
            frames,
            heights,
            records: RecordMap::default(),
            applied: None,
            measurements: MeasurementQueue::new(),
            spacers: SpacerScheduler::new(),
            scroll: ScrollBinding::default(),
            destroyed: false,
        })
    }

    /// The options this list was built with. `container` is always `None` here.
    pub fn options(&self) -> &VirtualListOptions<C> {
        &self.options
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }

    /// Number of size records (the data length last synced).
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// The last range applied by [`Self::set_window`] (empty before the first one).
    pub fn range(&self) -> Range {
        self.applied.unwrap_or(Range::EMPTY)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    /// Replaces the estimated height. Unmeasured slots are re-seeded with the new value.
    pub fn set_estimated_item_height(&mut self, height: f64) -> Result<(), Error> {
        validate_estimate(height)?;
        self.options.estimated_item_height = height;
        self.heights.set_estimated(height);
        self.update_spacers();
        Ok(())
    }

    pub fn estimated_item_height(&self) -> f64 {
        self.heights.estimated()
    }

    /// Unmounts everything and drops all size records.
    ///
    /// Afterwards the total height is `0` until [`Self::set_data_length`] or the next window
    /// computation re-syncs the length.
    pub fn reset_measurements(&mut self) {
        vdebug!(
            len = self.heights.len(),
            mounted = self.records.len(),
            "reset_measurements"
        );
        self.unmount_all();
        self.measurements.clear(&mut self.frames);
        self.heights.reset();
        self.applied = None;
        self.update_spacers();
    }

    /// Grows or shrinks the size records to `len` items. Ignored after [`Self::destroy`].
    pub fn set_data_length(&mut self, len: usize) {
        if self.destroyed {
            return;
        }
        if len != self.heights.len() {
            vdebug!(from = self.heights.len(), to = len, "set_data_length");
        }
        self.heights.set_len(len);
    }

    /// Records a real height for `index`.
    ///
    /// Non-finite and non-positive heights are ignored and `false` is returned; the previous
    /// estimate stays in place.
    pub fn update_height(&mut self, index: usize, height: f64) -> bool {
        let accepted = self.heights.update_height(index, height);
        if accepted {
            self.update_spacers();
        }
        accepted
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.heights.is_measured(index)
    }

    /// Queues `target` to be measured on the next frame.
    ///
    /// Without `force`, slots that are already measured (and not queued) are skipped.
    pub fn schedule_measurement(&mut self, index: usize, target: C::Target, force: bool) {
        if self.destroyed || index >= self.heights.len() {
            return;
        }
        if !force && self.heights.is_measured(index) && !self.measurements.is_queued(index) {
            return;
        }
        self.measurements.push(index, target, &mut self.frames);
    }

    /// Forces re-measurement of the target currently mounted for `index`, if any.
    pub fn notify_item_mutated(&mut self, index: usize) {
        let key = (self.options.get_item_key)(index);
        let Some(record) = self.records.get(&key).filter(|r| r.index == index) else {
            return;
        };
        let target = record.target.clone();
        self.schedule_measurement(index, target, true);
    }

    /// Flushes queued measurements right away instead of waiting for the frame.
    pub fn measure_now(&mut self) {
        self.flush_measurements();
    }

    pub fn pending_measurements(&self) -> usize {
        self.measurements.len()
    }

    /// Height of `index`; the estimate for out-of-range indexes.
    pub fn get_height_for_index(&self, index: usize) -> f64 {
        self.heights.height(index)
    }

    /// Sum of heights before `index` (clamped to the data length).
    pub fn get_offset_for_index(&self, index: usize) -> f64 {
        self.heights.offset(index)
    }

    pub fn get_total_height(&self) -> f64 {
        self.heights.total()
    }

    /// The item whose `[offset, offset + height)` span contains `offset`, clamped to the last
    /// item. Returns `0` for an empty list.
    pub fn get_index_at_offset(&self, offset: f64) -> usize {
        self.heights.index_at_offset(offset)
    }

    /// The items intersecting `[scroll_top, scroll_top + viewport_height)`, without overscan.
    pub fn visible_range_for(&self, scroll_top: f64, viewport_height: f64) -> Range {
        let n = self.heights.len();
        let top = finite_or_zero(scroll_top).max(0.0);
        let view = finite_or_zero(viewport_height);
        if n == 0 || view <= 0.0 || top >= self.heights.total() {
            return Range::EMPTY;
        }
        let start = self.heights.index_at_offset(top);
        let last = self.heights.index_ending_at(top + view);
        Range::new(start, (last + 1).min(n))
    }

    /// Converts a scroll position into the range to materialize, including overscan.
    ///
    /// Re-syncs the data length first. Overscan is measured in estimated heights, so the
    /// buffer is approximate.
    pub fn compute_window_from_scroll(&mut self, scroll_top: f64, viewport_height: f64) -> Range {
        let n = self.sync_len();
        if n == 0 {
            return Range::EMPTY;
        }
        let top = finite_or_zero(scroll_top);
        let view = finite_or_zero(viewport_height).max(0.0);
        let pad = self.heights.estimated() * self.options.overscan as f64;

        let start_approx = self.heights.index_at_offset((top - pad).max(0.0));
        let end_approx = self.heights.index_at_offset(top + view + pad);

        let start = start_approx.min(n - 1);
        let end = n.min((start + 1).max(end_approx + 1));
        Range { start, end }
    }

    /// Number of live render targets.
    pub fn mounted_len(&self) -> usize {
        self.records.len()
    }

    /// Whether a render target is live for `index` under its current key.
    pub fn is_mounted(&self, index: usize) -> bool {
        let key = (self.options.get_item_key)(index);
        self.records.get(&key).is_some_and(|r| r.index == index)
    }

    pub fn target_for_key(&self, key: &str) -> Option<&C::Target> {
        self.records.get(key).map(|r| &r.target)
    }

    /// Visits live targets in ascending index order.
    pub fn for_each_mounted(&self, mut f: impl FnMut(usize, &str, &C::Target)) {
        let mut live: Vec<(&String, usize, &C::Target)> = self
            .records
            .iter()
            .map(|(k, r)| (k, r.index, &r.target))
            .collect();
        live.sort_by_key(|&(_, index, _)| index);
        for (key, index, target) in live {
            f(index, key, target);
        }
    }

    /// Spacer heights as last written to the container.
    pub fn spacer_heights(&self) -> (Px, Px) {
        self.spacers.applied()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let (top_spacer, bottom_spacer) = self.spacers.applied();
        ListSnapshot {
            range: self.range(),
            len: self.heights.len(),
            total_height: self.heights.total(),
            mounted: self.records.len(),
            measured: self.heights.measured_len(),
            top_spacer,
            bottom_spacer,
        }
    }

    /// Whether any queue is waiting on a frame. Hosts can idle their loop when this is `false`.
    pub fn has_armed_frames(&self) -> bool {
        self.measurements.slot.is_armed()
            || self.spacers.slot.is_armed()
            || self.scroll.slot.is_armed()
    }

    /// Delivers a fired frame. Returns `false` if no queue was waiting on `handle`.
    pub fn run_frame(&mut self, handle: FrameHandle) -> bool {
        if self.measurements.slot.fire(handle) {
            self.flush_measurements();
            return true;
        }
        if self.spacers.slot.fire(handle) {
            self.spacers.commit(&mut self.container);
            return true;
        }
        if self.scroll.slot.fire(handle) {
            self.evaluate_scroll();
            return true;
        }
        false
    }

    /// Cancels armed frames, detaches the scroll listener, unmounts every target (running
    /// unmount hooks) and releases all per-item state.
    ///
    /// Idempotent. Later calls that would mount or schedule work are ignored.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        vdebug!(mounted = self.records.len(), "destroy");
        self.measurements.clear(&mut self.frames);
        self.spacers.cancel(&mut self.frames);
        self.detach_scroll_handler();
        self.unmount_all();
        self.applied = None;
        self.heights.reset();
        self.destroyed = true;
    }

    pub(crate) fn sync_len(&mut self) -> usize {
        let n = (self.options.get_item_count)();
        self.set_data_length(n);
        self.heights.len()
    }

    pub(crate) fn flush_measurements(&mut self) {
        let pending = self.measurements.drain(&mut self.frames);
        if pending.is_empty() {
            return;
        }
        for (index, target) in pending {
            let height = self.container.measure(&target);
            let _accepted = self.heights.update_height(index, height);
            vtrace!(index, height, accepted = _accepted, "measured");
        }
        vtrace!(total = self.heights.total(), "flush_measurements");
        self.update_spacers();
    }

    /// Recomputes both spacer heights from the applied range and schedules the write.
    pub(crate) fn update_spacers(&mut self) {
        if self.destroyed {
            return;
        }
        let (top, bottom) = if !self.options.use_spacers || self.heights.is_empty() {
            (0.0, 0.0)
        } else {
            let range = self.range();
            let top = self.heights.offset(range.start);
            let bottom = (self.heights.total() - self.heights.offset(range.end)).max(0.0);
            (top, bottom)
        };
        self.spacers.schedule(top, bottom, &mut self.frames);
    }
}

impl<C: Container, F: FrameScheduler> core::fmt::Debug for VirtualList<C, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualList")
            .field("options", &self.options)
            .field("len", &self.heights.len())
            .field("range", &self.applied)
            .field("mounted", &self.records.len())
            .field("pending_measurements", &self.measurements.len())
            .field("scroll_attached", &self.scroll.attached)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

fn validate_estimate(height: f64) -> Result<(), Error> {
    if height.is_finite() && height > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidEstimatedHeight(height))
    }
}

pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
