use virtual_list::{Align, Error, FrameQueue, VirtualList, VirtualListOptions};

use crate::{RetainedContainer, ScrollAnchor, Viewport, apply_anchor, capture_anchor};

/// Frame passes per [`Driver::tick`]; a pass can arm follow-up work (e.g. a measurement that
/// moves the spacers), which runs in the next pass.
const MAX_PASSES: usize = 8;

/// Owns a [`VirtualList`] over a [`RetainedContainer`] together with its [`Viewport`].
///
/// Hosts drive it by calling:
/// - `on_viewport_height` / `on_scroll` when UI events occur
/// - `tick()` once per frame, then draw `container().rows()`
pub struct Driver<T> {
    list: VirtualList<RetainedContainer<T>, FrameQueue>,
    viewport: Viewport,
}

impl<T> Driver<T> {
    /// Builds the list, binds a fresh [`Viewport`] and materializes the initial window.
    ///
    /// `options` must carry a [`RetainedContainer`].
    pub fn new(
        options: VirtualListOptions<RetainedContainer<T>>,
        viewport_height: f64,
    ) -> Result<Self, Error> {
        let mut list = VirtualList::new(options, FrameQueue::new())?;
        let viewport = Viewport::new(viewport_height);
        list.bind_scroll_element(viewport.clone());
        list.attach_scroll_handler();
        Ok(Self { list, viewport })
    }

    pub fn list(&self) -> &VirtualList<RetainedContainer<T>, FrameQueue> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut VirtualList<RetainedContainer<T>, FrameQueue> {
        &mut self.list
    }

    pub fn container(&self) -> &RetainedContainer<T> {
        self.list.container()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scroll_offset(&self) -> f64 {
        self.viewport.offset()
    }

    /// Largest valid scroll offset for the current total height.
    pub fn max_scroll_offset(&self) -> f64 {
        (self.list.get_total_height() - self.viewport.height()).max(0.0)
    }

    /// Feeds a user scroll (wheel, drag, keys). Returns the offset after clamping to
    /// `[0, max_scroll_offset]`.
    pub fn on_scroll(&mut self, offset: f64) -> f64 {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        let offset = offset.max(0.0).min(self.max_scroll_offset());
        self.viewport.set_offset(offset);
        self.list.handle_scroll_event();
        offset
    }

    pub fn on_viewport_height(&mut self, height: f64) {
        self.viewport.set_height(height);
        self.list.handle_scroll_event();
    }

    /// Runs every fired frame until the list stops requesting more, for at most `MAX_PASSES`
    /// passes. Returns the number run.
    ///
    /// Frames still pending after the last pass stay queued for the next call; check
    /// [`VirtualList::has_armed_frames`] to keep the host loop awake.
    pub fn tick(&mut self) -> usize {
        let mut ran = 0;
        for _ in 0..MAX_PASSES {
            let due = self.list.frames_mut().take_pending();
            if due.is_empty() {
                return ran;
            }
            for handle in due {
                if self.list.run_frame(handle) {
                    ran += 1;
                }
            }
        }
        #[cfg(feature = "tracing")]
        if self.list.frames().pending_len() > 0 {
            tracing::debug!(
                target: "virtual_list",
                ran,
                pending = self.list.frames().pending_len(),
                "tick: frames left for the next call"
            );
        }
        ran
    }

    /// Jumps so `index` is aligned as requested; the window follows on the next `tick`.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<f64> {
        self.list.scroll_to_index(index, align)
    }

    /// Forces re-measurement of a row whose content changed in place.
    pub fn notify_item_mutated(&mut self, index: usize) {
        self.list.notify_item_mutated(index);
    }

    pub fn capture_anchor(&self) -> Option<ScrollAnchor> {
        capture_anchor(&self.list, self.viewport.offset(), self.viewport.height())
    }

    /// See [`apply_anchor`].
    pub fn apply_anchor(
        &mut self,
        anchor: &ScrollAnchor,
        key_to_index: impl FnMut(&str) -> Option<usize>,
    ) -> Option<f64> {
        let mut viewport = self.viewport.clone();
        apply_anchor(&mut self.list, &mut viewport, anchor, key_to_index)
    }

    /// Tears the list down (unmount hooks run) and stops listening to the viewport.
    pub fn destroy(&mut self) {
        self.list.destroy();
    }
}

impl<T> core::fmt::Debug for Driver<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Driver")
            .field("list", &self.list)
            .field("viewport", &self.viewport.state())
            .finish()
    }
}
