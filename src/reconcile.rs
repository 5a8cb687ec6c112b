use alloc::collections::{BTreeMap, BTreeSet};
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::virtual_list::RenderRecord;
use crate::{Anchor, Container, FrameScheduler, MountMeta, Range, VirtualList};

impl<C: Container, F: FrameScheduler> VirtualList<C, F> {
    /// Materializes exactly the items in `[start, end)`.
    ///
    /// The range is clamped to the current data length. Re-applying the range that is already
    /// applied does nothing. Targets whose key stays inside the range are reused in place;
    /// everything else is mounted or unmounted, and the container's children end up in
    /// ascending index order between the two spacers.
    ///
    /// Failing host callbacks are logged and skip only the affected item.
    pub fn set_window(&mut self, start: usize, end: usize) {
        if self.destroyed {
            return;
        }
        let n = self.sync_len();
        let end = end.min(n);
        let next = Range::new(start.min(end), end);
        if self.applied == Some(next) {
            return;
        }
        vtrace!(
            from = ?self.applied,
            start = next.start,
            end = next.end,
            "set_window"
        );

        self.container.ensure_spacers();

        let get_key = Rc::clone(&self.options.get_item_key);
        let mut desired = BTreeSet::new();
        // Current index -> target, used to find the sibling a new target goes in front of.
        let mut placed: BTreeMap<usize, C::Target> = self
            .records
            .values()
            .map(|r| (r.index, r.target.clone()))
            .collect();

        for index in next.start..next.end {
            let key = get_key(index);
            if let Some(record) = self.records.get_mut(&key) {
                if record.index != index {
                    if placed.get(&record.index) == Some(&record.target) {
                        placed.remove(&record.index);
                    }
                    // Its measurement is still queued under the old index.
                    self.measurements.discard(record.index, &record.target);
                    record.index = index;
                    placed.insert(index, record.target.clone());
                }
                let target = record.target.clone();
                self.schedule_measurement(index, target, false);
            } else if let Some(target) = self.mount(index, &key, next, &placed) {
                placed.insert(index, target);
            }
            desired.insert(key);
        }

        let mut stale: Vec<(String, RenderRecord<C::Target>)> = Vec::new();
        self.records.retain(|key, record| {
            if desired.contains(key) {
                true
            } else {
                stale.push((key.clone(), record.clone()));
                false
            }
        });
        stale.sort_by_key(|(_, record)| record.index);
        for (key, record) in stale {
            self.unmount_record(&key, record, next);
        }

        self.patch_order();
        self.applied = Some(next);

        if let Some(on_range_change) = self.options.on_range_change.clone() {
            if let Err(_err) = on_range_change(next) {
                vwarn!(start = next.start, end = next.end, error = %_err, "on_range_change failed");
            }
        }
        self.update_spacers();
    }

    /// Re-applies the current range: retries items whose render failed and re-checks the
    /// sizes of mounted ones.
    pub fn refresh(&mut self) {
        let range = self.range();
        self.applied = None;
        self.set_window(range.start, range.end);
    }

    /// Renders, inserts and records a new target. Returns it on success.
    fn mount(
        &mut self,
        index: usize,
        key: &str,
        range: Range,
        placed: &BTreeMap<usize, C::Target>,
    ) -> Option<C::Target> {
        let render_item = Rc::clone(&self.options.render_item);
        let target = match render_item(index) {
            Ok(target) => target,
            Err(_err) => {
                vwarn!(index, key, error = %_err, "render_item failed; item skipped");
                return None;
            }
        };

        self.container.tag(&target, key);
        match placed.range(index + 1..).next() {
            Some((_, sibling)) => self.container.insert_before(&target, Anchor::Target(sibling)),
            None => self.container.insert_before(&target, Anchor::BottomSpacer),
        }
        self.records.insert(
            String::from(key),
            RenderRecord {
                index,
                target: target.clone(),
            },
        );

        if let Some(on_mount) = self.options.on_mount.clone() {
            if let Err(_err) = on_mount(index, &target, MountMeta { key, range }) {
                vwarn!(index, key, error = %_err, "on_mount failed");
            }
        }
        self.schedule_measurement(index, target.clone(), true);
        Some(target)
    }

    /// Runs the unmount hook and detaches the target. The record is already out of the map.
    fn unmount_record(&mut self, key: &str, record: RenderRecord<C::Target>, range: Range) {
        if let Some(on_unmount) = self.options.on_unmount.clone() {
            if let Err(_err) = on_unmount(record.index, &record.target, MountMeta { key, range }) {
                vwarn!(index = record.index, key, error = %_err, "on_unmount failed");
            }
        }
        if self.container.is_attached(&record.target) {
            self.container.remove(&record.target);
        }
        self.measurements.discard(record.index, &record.target);
    }

    pub(crate) fn unmount_all(&mut self) {
        let range = self.range();
        let mut records: Vec<(String, RenderRecord<C::Target>)> =
            core::mem::take(&mut self.records).into_iter().collect();
        records.sort_by_key(|(_, record)| record.index);
        for (key, record) in records {
            self.unmount_record(&key, record, range);
        }
    }

    /// Moves targets so the container order matches ascending index order.
    ///
    /// Walks from the top spacer; a target that is not directly after its predecessor is
    /// inserted there. Targets already in place are not touched.
    fn patch_order(&mut self) {
        let mut ordered: Vec<(usize, C::Target)> = self
            .records
            .values()
            .map(|r| (r.index, r.target.clone()))
            .collect();
        ordered.sort_by_key(|&(index, _)| index);

        let mut moved = 0usize;
        let mut prev: Option<C::Target> = None;
        for (_, target) in ordered {
            let after = match &prev {
                Some(p) => Anchor::Target(p),
                None => Anchor::TopSpacer,
            };
            let next = self.container.next_sibling(after);
            if next.as_ref() != Some(&target) {
                match &next {
                    Some(sibling) => self.container.insert_before(&target, Anchor::Target(sibling)),
                    None => self.container.insert_before(&target, Anchor::BottomSpacer),
                }
                moved += 1;
            }
            prev = Some(target);
        }
        if moved > 0 {
            vtrace!(moved, "patch_order");
        }
    }
}
