use alloc::boxed::Box;

use crate::frame::FrameSlot;
use crate::virtual_list::finite_or_zero;
use crate::{Align, Container, FrameScheduler, ScrollElement, VirtualList};

#[derive(Default)]
pub(crate) struct ScrollBinding {
    pub(crate) element: Option<Box<dyn ScrollElement>>,
    pub(crate) attached: bool,
    pub(crate) slot: FrameSlot,
}

impl<C: Container, F: FrameScheduler> VirtualList<C, F> {
    /// Binds the element whose scroll position drives the window.
    ///
    /// If a handler is attached it moves over to the new element.
    pub fn bind_scroll_element(&mut self, element: impl ScrollElement + 'static) {
        let was_attached = self.scroll.attached;
        self.detach_scroll_handler();
        self.scroll.element = Some(Box::new(element));
        if was_attached {
            self.attach_scroll_handler();
        }
    }

    pub fn has_scroll_element(&self) -> bool {
        self.scroll.element.is_some()
    }

    pub fn is_scroll_attached(&self) -> bool {
        self.scroll.attached
    }

    /// Starts listening to the bound element and evaluates the window once for its current
    /// position.
    ///
    /// Returns `false` when no element is bound or the list was destroyed.
    pub fn attach_scroll_handler(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        let Some(element) = self.scroll.element.as_mut() else {
            vwarn!("attach_scroll_handler: no scroll element bound");
            return false;
        };
        if self.scroll.attached {
            return true;
        }
        element.listen();
        self.scroll.attached = true;
        self.evaluate_scroll();
        true
    }

    /// Cancels a pending evaluation and stops listening. Idempotent.
    pub fn detach_scroll_handler(&mut self) {
        self.scroll.slot.cancel(&mut self.frames);
        if !self.scroll.attached {
            return;
        }
        if let Some(element) = self.scroll.element.as_mut() {
            element.unlisten();
        }
        self.scroll.attached = false;
    }

    /// Called by the host for every scroll event; evaluations are coalesced to one per frame.
    pub fn handle_scroll_event(&mut self) {
        if !self.scroll.attached || self.destroyed {
            return;
        }
        self.scroll.slot.arm(&mut self.frames);
    }

    /// Scrolls the bound element so `index` is aligned as requested.
    ///
    /// Returns the applied offset, or `None` without an element or items.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<f64> {
        let n = self.heights.len();
        if n == 0 {
            return None;
        }
        let index = index.min(n - 1);
        let start = self.heights.offset(index);
        let size = self.heights.height(index);
        let end = start + size;
        let total = self.heights.total();

        let element = self.scroll.element.as_mut()?;
        let view = finite_or_zero(element.viewport_height()).max(0.0);
        let current = finite_or_zero(element.scroll_top());

        let target = match align {
            Align::Start => start,
            Align::Center => start - (view - size) / 2.0,
            Align::End => end - view,
            Align::Auto => {
                if start >= current && end <= current + view {
                    current
                } else if start < current {
                    start
                } else {
                    end - view
                }
            }
        };
        let max = (total - view).max(0.0);
        let offset = target.max(0.0).min(max);
        vtrace!(index, ?align, offset, "scroll_to_index");

        element.set_scroll_top(offset);
        self.handle_scroll_event();
        Some(offset)
    }

    /// Recomputes the window for the element's position and applies it if it changed.
    pub(crate) fn evaluate_scroll(&mut self) {
        let Some(element) = self.scroll.element.as_ref() else {
            return;
        };
        let scroll_top = element.scroll_top();
        let viewport_height = element.viewport_height();
        let next = self.compute_window_from_scroll(scroll_top, viewport_height);
        if self.applied != Some(next) {
            self.set_window(next.start, next.end);
        }
    }
}
